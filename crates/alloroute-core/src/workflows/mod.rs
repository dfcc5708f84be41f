//! High-level workflow entry points.
//!
//! Workflows orchestrate the full pipeline from input files to ranked
//! pathways: structure loading, contact ingestion, topology assembly, path
//! enumeration and ordering. They are the API surface intended for callers
//! such as the command-line binary; the layers underneath stay reusable on
//! their own.

pub mod route;

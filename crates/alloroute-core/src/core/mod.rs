//! # Core Module
//!
//! Fundamental building blocks for the contact-graph representation of a
//! protein: data models for alpha-carbon atoms, residue contacts and the
//! contact topology, readers for the supported input file formats, and small
//! shared utilities.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, contacts, topology, and the graph builder
//! - **File I/O** ([`io`]) - PDB structures, QM contact records, Cieplak contact maps
//! - **Utilities** ([`utils`]) - Residue-name classification and physical constants

pub mod io;
pub mod models;
pub mod utils;

//! # Core Models Module
//!
//! Data structures representing the residue-contact graph of a protein.
//!
//! - [`atom`] - The alpha-carbon anchor used as a graph node, one per residue
//! - [`contact`] - Weighted, undirected contacts between residues
//! - [`topology`] - The finalized graph: atoms, contacts, adjacency, lookup
//! - [`builder`] - Incremental construction from heterogeneous contact sources

pub mod atom;
pub mod builder;
pub mod contact;
pub mod topology;

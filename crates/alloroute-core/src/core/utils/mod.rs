//! Shared utilities: physical constants and residue-name classification.

pub mod constants;
pub mod residues;

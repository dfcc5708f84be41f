//! # Alloroute Core Library
//!
//! A library for discovering candidate allosteric communication routes between
//! two residues of a protein, by modeling residue contacts as a weighted graph
//! and repeatedly extracting shortest paths while penalizing the edges of each
//! found path so that successive searches surface distinct alternate routes.
//!
//! ## Architectural Philosophy
//!
//! The library is organized in three layers with a strict separation of concerns:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Topology`, `CaAtom`,
//!   `Contact`), the contact-graph builder, and readers for the structural and
//!   energetic input files.
//!
//! - **[`engine`]: The Logic Core.** The penalized-shortest-path machinery:
//!   search configuration, penalty policies, the shortest-path primitive, the
//!   enumeration loop, and result ranking.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into
//!   the end-to-end route search, from input files to ranked path strings.

pub mod core;
pub mod engine;
pub mod workflows;

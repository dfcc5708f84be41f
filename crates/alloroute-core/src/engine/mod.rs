//! # Engine Module
//!
//! The penalized-shortest-path machinery that turns a single "best path"
//! search into a generator of multiple distinct candidate routes.
//!
//! - **Configuration** ([`config`]) - Search options and their builder
//! - **Penalty Policies** ([`penalty`]) - Per-edge penalty factor strategies
//! - **Shortest Path** ([`search`]) - The Dijkstra-style primitive over the contact graph
//! - **Enumeration** ([`enumerate`]) - The search/penalize/repeat loop with filtering
//! - **Ranking** ([`rank`]) - Optional ordering of found routes by hop count
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! The enumeration loop is inherently sequential: each iteration's weights
//! depend on the previous iteration's penalties, so nothing in this module
//! is meant to run concurrently.

pub mod config;
pub mod enumerate;
pub mod error;
pub mod penalty;
pub mod rank;
pub mod search;

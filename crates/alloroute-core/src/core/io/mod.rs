//! Provides input functionality for the structural and energetic file formats
//! consumed by the route search.
//!
//! Each reader is strict: any malformed record is a fatal error carrying the
//! offending line and detail. The domain data is assumed internally
//! consistent by the time it reaches this tool, so there is no partial or
//! recoverable parsing.

pub mod cieplak;
pub mod pdb;
pub mod qm;

pub(crate) fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

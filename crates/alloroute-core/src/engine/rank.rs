use super::enumerate::FoundPath;

/// Reorders paths by ascending hop count, preserving discovery order among
/// paths of equal length.
pub fn sort_by_hops(paths: &mut [FoundPath]) {
    paths.sort_by_key(|path| path.hops);
}

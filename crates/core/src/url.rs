//! Helpers for upstream resource URLs such as `https://swapi.info/api/films/1`.

use crate::types::DbId;

/// Extract the trailing numeric id from a resource URL.
///
/// A single trailing slash is tolerated. Returns `None` when the last path
/// segment is not a positive integer.
pub fn extract_id(url: &str) -> Option<DbId> {
    let path = url.strip_suffix('/').unwrap_or(url);
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse::<DbId>().ok().filter(|id| *id > 0)
}

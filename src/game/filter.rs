use std::sync::Arc;

use crate::catalog::Track;

/// Tracks whose title or artist contains `query`, ignoring case.
///
/// An empty query yields nothing: suggestions only appear once the player types.
pub fn filter(tracks: &[Arc<Track>], query: &str) -> Vec<Arc<Track>> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    tracks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle) || t.artist.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Unique within its playlist.
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    /// Where the preview clip lives; `None` when the track has no preview asset.
    pub preview: Option<PathBuf>,
    pub artwork: Option<PathBuf>,
    pub display: String,
}

/// Shared, immutable track list handed from the catalog to the game and UI.
pub type TrackList = Arc<[Arc<Track>]>;

/// Wrap freshly fetched tracks so they can be shared by reference.
pub fn share(tracks: Vec<Track>) -> TrackList {
    tracks.into_iter().map(Arc::new).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub curator: Option<String>,
    pub artwork: Option<PathBuf>,
    pub track_count: usize,
}

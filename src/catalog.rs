//! Playlist catalog: where playlists and their tracks come from.
//!
//! The game only sees the `Catalog` trait; `LocalCatalog` serves a library
//! directory where every subdirectory is a playlist.

mod display;
mod local;
mod manifest;
mod model;
mod scan;

pub use local::LocalCatalog;
pub use model::*;

use crate::error::Result;

pub trait Catalog {
    /// Every playlist the catalog can serve, sorted by name.
    fn charts(&self) -> Result<Vec<PlaylistSummary>>;

    /// Tracks of one playlist, in display order.
    ///
    /// Fails with `NotFound` for unknown ids and `Io` when the source cannot be read.
    fn playlist_tracks(&self, id: &str) -> Result<Vec<Track>>;
}

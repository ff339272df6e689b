//! Error types shared by the catalog, preview fetch, playback and game engine.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong below the terminal front-end.
#[derive(Debug, Error)]
pub enum Error {
    /// A round cannot start without at least one track to pick from.
    #[error("playlist has no tracks to guess from")]
    InsufficientData,

    /// The catalog has no playlist with this id.
    #[error("playlist not found: {0}")]
    NotFound(String),

    /// A `playlist.toml` exists but cannot be parsed.
    #[error("invalid playlist manifest {path:?}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// The track has no preview locator.
    #[error("track {0:?} has no preview asset")]
    MissingPreviewAsset(String),

    /// The preview bytes could not be decoded.
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// No audio output could be opened.
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("fetch failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used to decide how a failure is surfaced.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    /// Empty or missing playlist data; a round must not start.
    DataUnavailable,
    /// The clip cannot be played; the round is unaffected.
    AssetUnavailable,
    /// Catalog or fetch I/O failed; shown inline, never retried automatically.
    TransientFetchFailure,
}

impl Error {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InsufficientData | Self::NotFound(_) | Self::Manifest { .. } => {
                ErrorClass::DataUnavailable
            }
            Self::MissingPreviewAsset(_) | Self::UnsupportedFormat(_) | Self::NoOutputDevice(_) => {
                ErrorClass::AssetUnavailable
            }
            Self::Io(_) => ErrorClass::TransientFetchFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

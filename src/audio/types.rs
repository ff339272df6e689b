//! Small types shared by the audio subsystem and the event loop.

use crate::error::Result;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Stopped,
    /// Waiting for preview bytes.
    Loading,
    Playing,
}

/// What the caller has to do after a play/stop toggle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// Playback was stopped; nothing else to do.
    Stopped,
    /// Fetch the preview and hand the bytes to `PlaybackSession::begin`.
    Fetch,
}

/// Posted by the periodic timer while a clip plays.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tick;

pub type RequestId = u64;

/// Result of one preview fetch, delivered through the fetcher's channel.
#[derive(Debug)]
pub struct FetchOutcome {
    pub id: RequestId,
    pub track_id: String,
    pub result: Result<Vec<u8>>,
}

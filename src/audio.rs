//! Preview audio: fetching clip bytes, playing them and timing the preview.
//!
//! `PlaybackSession` is the only piece the game screen talks to for playback;
//! the backend and the timer behind it are injected.

mod backend;
mod fetch;
mod session;
mod timer;
mod types;

pub use backend::{MutedBackend, PlaybackBackend, open_backend};
pub use fetch::PreviewFetcher;
pub use session::PlaybackSession;
pub use timer::{Scheduler, ThreadScheduler, TimerHandle};
pub use types::*;

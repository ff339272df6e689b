use std::time::Duration;

use crate::error::Result;

use super::backend::PlaybackBackend;
use super::timer::{Scheduler, TimerHandle};
use super::types::{SessionState, Toggle};

/// Play/stop state of the preview clip, with an optional hard cutoff.
///
/// While playing, a timer from the injected scheduler asks the caller to
/// `tick`; the timer is cancelled whenever playback stops and when the
/// session is dropped.
pub struct PlaybackSession<B, S> {
    backend: B,
    scheduler: S,
    state: SessionState,
    elapsed: Duration,
    cutoff: Option<Duration>,
    timer: Option<TimerHandle>,
}

impl<B: PlaybackBackend, S: Scheduler> PlaybackSession<B, S> {
    pub fn new(backend: B, scheduler: S) -> Self {
        Self {
            backend,
            scheduler,
            state: SessionState::Stopped,
            elapsed: Duration::ZERO,
            cutoff: None,
            timer: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn cutoff(&self) -> Option<Duration> {
        self.cutoff
    }

    /// Play/stop button: stops a playing clip, otherwise asks for a fetch.
    ///
    /// Toggling while a fetch is in flight asks for another one.
    pub fn toggle(&mut self) -> Toggle {
        if self.state == SessionState::Playing {
            self.stop();
            Toggle::Stopped
        } else {
            self.state = SessionState::Loading;
            Toggle::Fetch
        }
    }

    /// Load fetched bytes and start playing, stopping at `cutoff` when given.
    pub fn begin(&mut self, bytes: Vec<u8>, cutoff: Option<Duration>) -> Result<()> {
        self.stop();
        self.backend.load(bytes)?;
        self.backend.play();
        self.state = SessionState::Playing;
        self.cutoff = cutoff;
        self.timer = Some(self.scheduler.start());
        Ok(())
    }

    /// The pending fetch failed; go back to stopped.
    pub fn abort_loading(&mut self) {
        if self.state == SessionState::Loading {
            self.state = SessionState::Stopped;
        }
    }

    /// Poll elapsed time; force-stops at the cutoff or at the end of the clip.
    pub fn tick(&mut self) -> Duration {
        if self.state != SessionState::Playing {
            return self.elapsed;
        }

        let elapsed = self.backend.elapsed();
        let past_cutoff = self.cutoff.is_some_and(|c| elapsed >= c);
        if past_cutoff || self.backend.is_finished() {
            log::debug!("preview stopped at {elapsed:?}");
            self.stop();
        } else {
            self.elapsed = elapsed;
        }
        self.elapsed
    }

    /// Stop playback, cancel the timer and rewind.
    pub fn stop(&mut self) {
        self.backend.stop();
        self.timer = None;
        self.elapsed = Duration::ZERO;
        self.cutoff = None;
        self.state = SessionState::Stopped;
    }
}

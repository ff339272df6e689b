//! Glue between the game screens and the preview audio.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use crate::app::App;
use crate::audio::{
    FetchOutcome, PlaybackBackend, PlaybackSession, PreviewFetcher, RequestId, SessionState,
    ThreadScheduler, Tick, Toggle,
};
use crate::catalog::Track;

pub type Session = PlaybackSession<Box<dyn PlaybackBackend>, ThreadScheduler>;

/// What a preview fetch in flight is for.
enum Purpose {
    /// The hidden target of the current round, cut off at the round's budget.
    Round,
    /// A track picked on the playlist screen, played in full.
    Preview(Arc<Track>),
}

struct Pending {
    id: RequestId,
    purpose: Purpose,
}

pub struct AudioLink {
    session: Session,
    fetcher: PreviewFetcher,
    ticks: Receiver<Tick>,
    fetched: Receiver<FetchOutcome>,
    pending: Option<Pending>,
}

impl AudioLink {
    pub fn new(
        session: Session,
        fetcher: PreviewFetcher,
        ticks: Receiver<Tick>,
        fetched: Receiver<FetchOutcome>,
    ) -> Self {
        Self {
            session,
            fetcher,
            ticks,
            fetched,
            pending: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    /// Apply finished fetches and pending ticks, then mirror the session into `app`.
    pub fn sync(&mut self, app: &mut App) {
        while let Ok(outcome) = self.fetched.try_recv() {
            self.on_fetched(app, outcome);
        }

        let mut ticked = false;
        while self.ticks.try_recv().is_ok() {
            ticked = true;
        }
        if ticked {
            self.session.tick();
        }
        self.mirror(app);
    }

    fn on_fetched(&mut self, app: &mut App, outcome: FetchOutcome) {
        let Some(pending) = self.pending.take_if(|p| p.id == outcome.id) else {
            log::debug!(
                "discarding stale preview {} for {:?}",
                outcome.id,
                outcome.track_id
            );
            return;
        };

        // The budget in force when the clip arrives is the one that applies.
        let cutoff = match pending.purpose {
            Purpose::Round => app.game.as_ref().map(|g| g.round.allowed_playback()),
            Purpose::Preview(_) => None,
        };
        let started = outcome
            .result
            .and_then(|bytes| self.session.begin(bytes, cutoff));

        match (started, pending.purpose) {
            (Ok(()), Purpose::Preview(track)) => {
                log::info!("previewing {}", track.display);
                app.set_previewing(Some(track));
            }
            (Ok(()), Purpose::Round) => {
                log::debug!("round clip playing, cutoff {:?}", self.session.cutoff())
            }
            (Err(e), _) => {
                self.session.abort_loading();
                app.set_previewing(None);
                app.report(&e);
            }
        }
    }

    /// Play/stop the hidden target of the current round.
    pub fn toggle_round_clip(&mut self, app: &mut App) {
        let Some(target) = app.game.as_ref().map(|g| Arc::clone(g.round.target())) else {
            return;
        };

        match self.session.toggle() {
            Toggle::Stopped => self.pending = None,
            Toggle::Fetch => self.request(app, &target, Purpose::Round),
        }
        self.mirror(app);
    }

    /// (Re)start the mini-player on the selected playlist track.
    pub fn preview_selected(&mut self, app: &mut App) {
        let Some(track) = app.selected_track() else {
            return;
        };

        self.stop(app);
        if self.session.toggle() == Toggle::Fetch {
            let purpose = Purpose::Preview(Arc::clone(&track));
            self.request(app, &track, purpose);
        }
        self.mirror(app);
    }

    fn request(&mut self, app: &mut App, track: &Track, purpose: Purpose) {
        match self.fetcher.request(track) {
            Ok(id) => self.pending = Some(Pending { id, purpose }),
            Err(e) => {
                self.pending = None;
                self.session.abort_loading();
                app.report(&e);
            }
        }
    }

    /// Stop whatever plays and forget any fetch in flight.
    pub fn stop(&mut self, app: &mut App) {
        self.pending = None;
        self.session.stop();
        app.set_previewing(None);
        self.mirror(app);
    }

    fn mirror(&self, app: &mut App) {
        let state = self.session.state();
        if let Some(game) = app.game.as_mut() {
            game.elapsed = self.session.elapsed();
            game.playback = state;
        }
        if state == SessionState::Stopped && self.pending.is_none() {
            app.set_previewing(None);
        }
    }
}

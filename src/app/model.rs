//! Application model types: `App`, its screens and their view state.
//!
//! The model owns what the UI draws (catalog listings, the current round,
//! search text, alerts). Audio objects live in the runtime, which mirrors
//! their state into `GameView::elapsed` / `GameView::playback`.

use std::sync::Arc;
use std::time::Duration;

use crate::audio::SessionState;
use crate::catalog::{PlaylistSummary, Track, TrackList, share};
use crate::error::{Error, Result};
use crate::game::{self, GuessRound, Outcome, Rules, Verdict};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Charts,
    Playlist,
    Game,
}

/// Something fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    /// Fetch failed; the message is shown inline.
    Failed(String),
}

impl<T> Loadable<T> {
    fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(v) => Self::Ready(v),
            Err(e) => {
                log::warn!("loading failed: {e}");
                Self::Failed(e.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }
}

/// The track list of one playlist, with the mini-player.
pub struct PlaylistView {
    pub summary: PlaylistSummary,
    pub tracks: Loadable<TrackList>,
    pub selected: usize,
    /// Track shown in the mini-player while its preview plays.
    pub previewing: Option<Arc<Track>>,
}

/// The game screen: the round plus what only the UI cares about.
pub struct GameView {
    pub round: GuessRound,
    pub search: String,
    pub suggestion: usize,
    pub elapsed: Duration,
    pub playback: SessionState,
    alert: Option<Verdict>,
}

impl GameView {
    fn new(round: GuessRound) -> Self {
        Self {
            round,
            search: String::new(),
            suggestion: 0,
            elapsed: Duration::ZERO,
            playback: SessionState::Stopped,
            alert: None,
        }
    }

    /// The end-of-round message, once the round is over and until Retry/Close.
    pub fn alert(&self) -> Option<Verdict> {
        self.alert
    }

    /// Tracks matching the search text, at most `limit`.
    pub fn suggestions(&self, limit: usize) -> Vec<Arc<Track>> {
        let mut hits = game::filter(self.round.tracks(), &self.search);
        hits.truncate(limit);
        hits
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.suggestion = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.suggestion = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.suggestion = 0;
    }

    /// Move the suggestion cursor down, wrapping around.
    pub fn next_suggestion(&mut self, limit: usize) {
        let n = self.suggestions(limit).len();
        if n > 0 {
            self.suggestion = (self.suggestion + 1) % n;
        }
    }

    /// Move the suggestion cursor up, wrapping around.
    pub fn prev_suggestion(&mut self, limit: usize) {
        let n = self.suggestions(limit).len();
        if n > 0 {
            self.suggestion = (self.suggestion + n - 1) % n;
        }
    }

    /// Guess the highlighted suggestion. `None` when nothing is highlighted.
    ///
    /// The search box is cleared either way.
    pub fn submit_selected(&mut self, limit: usize) -> Option<Outcome> {
        let candidate = self.suggestions(limit).get(self.suggestion).cloned();
        self.clear_search();
        let candidate = candidate?;
        let outcome = self.round.submit_guess(&candidate);
        self.surface_verdict();
        Some(outcome)
    }

    /// Trade a turn for a longer preview.
    pub fn buy_time(&mut self) -> Outcome {
        self.clear_search();
        let outcome = self.round.purchase_time();
        self.surface_verdict();
        outcome
    }

    /// Start a fresh round on the same playlist.
    pub fn retry(&mut self) {
        self.round.reset();
        self.clear_search();
        self.elapsed = Duration::ZERO;
        self.playback = SessionState::Stopped;
        self.alert = None;
    }

    fn surface_verdict(&mut self) {
        if self.alert.is_none() {
            self.alert = self.round.verdict();
            if let Some(v) = self.alert {
                log::info!("round over: {v}");
            }
        }
    }
}

/// The main application model.
pub struct App {
    pub screen: Screen,
    pub charts: Loadable<Vec<PlaylistSummary>>,
    pub chart_selected: usize,
    pub playlist: Option<PlaylistView>,
    pub game: Option<GameView>,
    pub rules: Rules,
    pub suggestion_limit: usize,
    pub show_log: bool,
    /// Inline, non-fatal message (failed fetches, refused rounds).
    pub status: Option<String>,
    pub library_dir: Option<String>,
}

impl App {
    /// Create a new `App` on the charts screen, waiting for the catalog.
    pub fn new(rules: Rules, suggestion_limit: usize) -> Self {
        Self {
            screen: Screen::Charts,
            charts: Loadable::Loading,
            chart_selected: 0,
            playlist: None,
            game: None,
            rules,
            suggestion_limit: suggestion_limit.max(1),
            show_log: false,
            status: None,
            library_dir: None,
        }
    }

    /// Record the library directory in the app state.
    pub fn set_library_dir(&mut self, dir: String) {
        self.library_dir = Some(dir);
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
    }

    /// Log a failure and show it inline.
    pub fn report(&mut self, err: &Error) {
        log::warn!("{err} ({:?})", err.class());
        self.status = Some(err.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn set_charts(&mut self, charts: Result<Vec<PlaylistSummary>>) {
        self.charts = Loadable::from_result(charts);
        self.chart_selected = 0;
    }

    pub fn selected_chart(&self) -> Option<&PlaylistSummary> {
        self.charts.ready()?.get(self.chart_selected)
    }

    /// Move the chart cursor down, wrapping around.
    pub fn next_chart(&mut self) {
        if let Some(n) = self.charts.ready().map(Vec::len).filter(|&n| n > 0) {
            self.chart_selected = (self.chart_selected + 1) % n;
        }
    }

    /// Move the chart cursor up, wrapping around.
    pub fn prev_chart(&mut self) {
        if let Some(n) = self.charts.ready().map(Vec::len).filter(|&n| n > 0) {
            self.chart_selected = (self.chart_selected + n - 1) % n;
        }
    }

    /// Switch to the playlist screen; tracks arrive through `set_tracks`.
    pub fn open_playlist(&mut self, summary: PlaylistSummary) {
        self.playlist = Some(PlaylistView {
            summary,
            tracks: Loadable::Loading,
            selected: 0,
            previewing: None,
        });
        self.screen = Screen::Playlist;
        self.clear_status();
    }

    pub fn set_tracks(&mut self, tracks: Result<Vec<Track>>) {
        if let Some(pl) = self.playlist.as_mut() {
            pl.tracks = Loadable::from_result(tracks.map(share));
            pl.selected = 0;
        }
    }

    pub fn tracks(&self) -> Option<&TrackList> {
        self.playlist.as_ref()?.tracks.ready()
    }

    pub fn selected_track(&self) -> Option<Arc<Track>> {
        let pl = self.playlist.as_ref()?;
        pl.tracks.ready()?.get(pl.selected).cloned()
    }

    /// Move the track cursor down, wrapping around.
    pub fn next_track(&mut self) {
        if let Some(pl) = self.playlist.as_mut() {
            if let Some(n) = pl.tracks.ready().map(|t| t.len()).filter(|&n| n > 0) {
                pl.selected = (pl.selected + 1) % n;
            }
        }
    }

    /// Move the track cursor up, wrapping around.
    pub fn prev_track(&mut self) {
        if let Some(pl) = self.playlist.as_mut() {
            if let Some(n) = pl.tracks.ready().map(|t| t.len()).filter(|&n| n > 0) {
                pl.selected = (pl.selected + n - 1) % n;
            }
        }
    }

    pub fn set_previewing(&mut self, track: Option<Arc<Track>>) {
        if let Some(pl) = self.playlist.as_mut() {
            pl.previewing = track;
        }
    }

    /// Leave the playlist screen.
    pub fn back_to_charts(&mut self) {
        self.playlist = None;
        self.screen = Screen::Charts;
        self.clear_status();
    }

    /// Start a round on the open playlist.
    ///
    /// Refused with `InsufficientData` while tracks are missing or empty; the
    /// player stays on the playlist screen.
    pub fn start_game(&mut self) -> Result<()> {
        let tracks = self.tracks().cloned().ok_or(Error::InsufficientData)?;
        let round = GuessRound::new(tracks, self.rules)?;
        log::info!("round started on {} tracks", round.tracks().len());
        self.game = Some(GameView::new(round));
        self.screen = Screen::Game;
        self.clear_status();
        Ok(())
    }

    /// `start_game` with a fixed target picker.
    #[cfg(test)]
    pub fn start_game_with(&mut self, picker: game::Picker) -> Result<()> {
        let tracks = self.tracks().cloned().ok_or(Error::InsufficientData)?;
        self.game = Some(GameView::new(GuessRound::with_picker(
            tracks, self.rules, picker,
        )?));
        self.screen = Screen::Game;
        Ok(())
    }

    /// Close the game screen and drop the round.
    pub fn close_game(&mut self) {
        self.game = None;
        self.screen = if self.playlist.is_some() {
            Screen::Playlist
        } else {
            Screen::Charts
        };
    }
}

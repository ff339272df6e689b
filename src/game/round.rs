use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{Track, TrackList};
use crate::error::{Error, Result};

/// Tunable rules of a round.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Turns per round; every guess and every time purchase uses one.
    pub max_turns: usize,
    /// Preview window at round start, in seconds.
    pub initial_preview_secs: u32,
    /// Seconds each purchase adds to the preview window.
    pub purchase_secs: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_turns: 6,
            initial_preview_secs: 3,
            purchase_secs: 2,
        }
    }
}

/// One entry of the guess log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    Correct(Arc<Track>),
    Incorrect(Arc<Track>),
    /// A turn traded for a longer preview.
    Skipped,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    /// Won on this 1-indexed turn.
    Won(usize),
    Lost,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// What to tell the player once a round is over.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Won before the last turn.
    GuessedIn(usize),
    /// Every turn used; also reported for a win on the very last turn.
    OutOfGuesses,
    /// Lost.
    TimeUp,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GuessedIn(turns) => {
                write!(f, "Congratulations! You guessed correctly in {turns} turns.")
            }
            Self::OutOfGuesses => f.write_str("Game Over: You've used all your guesses!"),
            Self::TimeUp => f.write_str("Sorry, you didn't guess correctly in time."),
        }
    }
}

/// Picks the target index out of `len` candidates; `len` is never zero.
pub type Picker = fn(usize) -> usize;

fn random_pick(len: usize) -> usize {
    rand::random_range(0..len)
}

/// State of one guessing round.
///
/// The outcome is derived from the log and never stored, so it cannot
/// disagree with the entries.
#[derive(Debug, Clone)]
pub struct GuessRound {
    tracks: TrackList,
    rules: Rules,
    picker: Picker,
    target: Arc<Track>,
    log: Vec<Guess>,
    allowed_playback_secs: u32,
}

impl GuessRound {
    /// Start a round with a uniformly random target.
    pub fn new(tracks: TrackList, rules: Rules) -> Result<Self> {
        Self::with_picker(tracks, rules, random_pick)
    }

    /// Start a round whose targets (now and on every reset) come from `picker`.
    pub fn with_picker(tracks: TrackList, rules: Rules, picker: Picker) -> Result<Self> {
        let target = pick_target(&tracks, picker)?;
        Ok(Self {
            log: Vec::new(),
            allowed_playback_secs: rules.initial_preview_secs,
            tracks,
            rules,
            picker,
            target,
        })
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn target(&self) -> &Arc<Track> {
        &self.target
    }

    pub fn log(&self) -> &[Guess] {
        &self.log
    }

    pub fn turns_used(&self) -> usize {
        self.log.len()
    }

    pub fn turns_left(&self) -> usize {
        self.rules.max_turns - self.log.len()
    }

    pub fn allowed_playback_secs(&self) -> u32 {
        self.allowed_playback_secs
    }

    pub fn allowed_playback(&self) -> Duration {
        Duration::from_secs(u64::from(self.allowed_playback_secs))
    }

    pub fn outcome(&self) -> Outcome {
        if let Some(pos) = self.log.iter().position(|g| matches!(g, Guess::Correct(_))) {
            Outcome::Won(pos + 1)
        } else if self.log.len() >= self.rules.max_turns {
            Outcome::Lost
        } else {
            Outcome::InProgress
        }
    }

    /// The message for a finished round, `None` while it is in progress.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.outcome() {
            Outcome::InProgress => None,
            Outcome::Won(turn) if turn < self.rules.max_turns => Some(Verdict::GuessedIn(turn)),
            Outcome::Won(_) => Some(Verdict::OutOfGuesses),
            Outcome::Lost => Some(Verdict::TimeUp),
        }
    }

    fn has_turns_left(&self) -> bool {
        self.log.len() < self.rules.max_turns
    }

    /// Log a guess, compared to the target by id.
    ///
    /// Ignored once the round is over.
    pub fn submit_guess(&mut self, candidate: &Arc<Track>) -> Outcome {
        if self.outcome().is_over() || !self.has_turns_left() {
            log::debug!("guess {:?} ignored: round is over", candidate.id);
            return self.outcome();
        }

        if candidate.id == self.target.id {
            self.log.push(Guess::Correct(Arc::clone(candidate)));
        } else {
            self.log.push(Guess::Incorrect(Arc::clone(candidate)));
        }

        let outcome = self.outcome();
        log::debug!("turn {} guess {:?}: {outcome:?}", self.log.len(), candidate.id);
        outcome
    }

    /// Trade a turn for `purchase_secs` more preview time.
    ///
    /// Only needs a turn left; a won round stays won.
    pub fn purchase_time(&mut self) -> Outcome {
        if !self.has_turns_left() {
            log::debug!("time purchase ignored: no turns left");
            return self.outcome();
        }

        self.log.push(Guess::Skipped);
        self.allowed_playback_secs = self
            .allowed_playback_secs
            .saturating_add(self.rules.purchase_secs);

        let outcome = self.outcome();
        log::debug!(
            "turn {} bought time, preview now {}s: {outcome:?}",
            self.log.len(),
            self.allowed_playback_secs
        );
        outcome
    }

    /// Start over on the same tracks with a freshly picked target.
    pub fn reset(&mut self) {
        // The list was non-empty when the round was created and is immutable.
        if let Ok(target) = pick_target(&self.tracks, self.picker) {
            self.target = target;
        }
        self.log.clear();
        self.allowed_playback_secs = self.rules.initial_preview_secs;
    }
}

fn pick_target(tracks: &TrackList, picker: Picker) -> Result<Arc<Track>> {
    if tracks.is_empty() {
        return Err(Error::InsufficientData);
    }
    let i = picker(tracks.len()).min(tracks.len() - 1);
    Ok(Arc::clone(&tracks[i]))
}

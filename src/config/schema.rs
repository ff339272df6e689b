use serde::Deserialize;

use crate::game::Rules;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tunequiz/config.toml` or `~/.config/tunequiz/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TUNEQUIZ__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub catalog: CatalogSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Guesses (and time purchases) available per round.
    pub max_turns: usize,
    /// Length of the preview window at round start, in seconds.
    pub initial_preview_secs: u32,
    /// Seconds added to the preview window by each purchase.
    pub purchase_secs: u32,
    /// Full scale of the elapsed-time progress bar, in seconds.
    pub progress_secs: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        let rules = Rules::default();
        Self {
            max_turns: rules.max_turns,
            initial_preview_secs: rules.initial_preview_secs,
            purchase_secs: rules.purchase_secs,
            progress_secs: 10,
        }
    }
}

impl GameSettings {
    pub fn rules(&self) -> Rules {
        Rules {
            max_turns: self.max_turns,
            initial_preview_secs: self.initial_preview_secs,
            purchase_secs: self.purchase_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Period of the elapsed-time tick while a clip plays (milliseconds).
    pub tick_ms: u64,
    /// Output volume (1.0 = unchanged).
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the log pane starts visible.
    pub show_log: bool,
    /// Maximum number of search suggestions listed under the search box.
    pub suggestion_limit: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Guess the song! ~ ".to_string(),
            show_log: false,
            suggestion_limit: 8,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Library root; every subdirectory is a playlist. The CLI argument wins.
    pub root: Option<String>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Optional cap on directory recursion depth inside a playlist.
    pub max_depth: Option<usize>,

    /// Which fields build `Track.display` and its ordering.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            root: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            max_depth: None,
            display_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.level.trim().parse().ok()
    }
}

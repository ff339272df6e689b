use std::{env, path::PathBuf};

use super::schema::Settings;

/// Upper bound on `game.max_turns`; the guess list is drawn one row per turn.
pub const MAX_TURNS_LIMIT: usize = 99;

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `TUNEQUIZ__`) over an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("TUNEQUIZ")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_TURNS_LIMIT).contains(&self.game.max_turns) {
            return Err(format!("game.max_turns must be within 1..={MAX_TURNS_LIMIT}"));
        }
        if self.audio.tick_ms == 0 {
            return Err("audio.tick_ms must be >= 1".to_string());
        }
        if !(0.0..=2.0).contains(&self.audio.volume) {
            return Err("audio.volume must be within 0.0..=2.0".to_string());
        }
        if self.logging.level_filter().is_none() {
            return Err(format!("logging.level {:?} is not a log level", self.logging.level));
        }
        Ok(())
    }
}

/// Resolve the config path from `TUNEQUIZ_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("TUNEQUIZ_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/tunequiz/config.toml`
/// or `~/.config/tunequiz/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("tunequiz").join("config.toml"))
}

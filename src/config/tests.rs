use super::load::{MAX_TURNS_LIMIT, default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_override() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TUNEQUIZ_CONFIG_PATH", "/tmp/tunequiz-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tunequiz-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tunequiz")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tunequiz")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_classic_rules() {
    let s = Settings::default();
    assert_eq!(s.game.max_turns, 6);
    assert_eq!(s.game.initial_preview_secs, 3);
    assert_eq!(s.game.purchase_secs, 2);
    assert_eq!(s.game.progress_secs, 10);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[game]
max_turns = 8
initial_preview_secs = 5
purchase_secs = 1
progress_secs = 20

[audio]
tick_ms = 33
volume = 0.5

[ui]
header_text = "hello"
show_log = true
suggestion_limit = 3

[catalog]
root = "/srv/music"
extensions = ["mp3"]
include_hidden = true
follow_links = false
max_depth = 2
display_fields = ["title", "artist"]
display_separator = "::"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEQUIZ_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TUNEQUIZ__GAME__MAX_TURNS");

    let s = Settings::load().unwrap();
    assert_eq!(s.game.max_turns, 8);
    assert_eq!(s.game.initial_preview_secs, 5);
    assert_eq!(s.game.purchase_secs, 1);
    assert_eq!(s.game.progress_secs, 20);
    assert_eq!(s.audio.tick_ms, 33);
    assert_eq!(s.audio.volume, 0.5);
    assert_eq!(s.ui.header_text, "hello");
    assert!(s.ui.show_log);
    assert_eq!(s.ui.suggestion_limit, 3);
    assert_eq!(s.catalog.root.as_deref(), Some("/srv/music"));
    assert_eq!(s.catalog.extensions, vec!["mp3".to_string()]);
    assert!(s.catalog.include_hidden);
    assert!(!s.catalog.follow_links);
    assert_eq!(s.catalog.max_depth, Some(2));
    assert_eq!(
        s.catalog.display_fields,
        vec![TrackDisplayField::Title, TrackDisplayField::Artist]
    );
    assert_eq!(s.catalog.display_separator, "::");
    assert_eq!(s.logging.level_filter(), Some(log::LevelFilter::Debug));

    let rules = s.game.rules();
    assert_eq!(rules.max_turns, 8);
    assert_eq!(rules.initial_preview_secs, 5);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[game]
max_turns = 4
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEQUIZ_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TUNEQUIZ__GAME__MAX_TURNS", "9");

    let s = Settings::load().unwrap();
    assert_eq!(s.game.max_turns, 9);
}

#[test]
fn huge_max_turns_from_env_fails_validation() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TUNEQUIZ_CONFIG_PATH", "/nonexistent/tunequiz/config.toml");
    let _g2 = EnvGuard::set("TUNEQUIZ__GAME__MAX_TURNS", "65534");

    let s = Settings::load().unwrap();
    assert_eq!(s.game.max_turns, 65534);
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_degenerate_values() {
    let mut s = Settings::default();
    s.game.max_turns = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.game.max_turns = MAX_TURNS_LIMIT;
    assert!(s.validate().is_ok());
    s.game.max_turns = MAX_TURNS_LIMIT + 1;
    assert!(s.validate().is_err());
    s.game.max_turns = usize::MAX;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume = 3.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.logging.level = "loud".into();
    assert!(s.validate().is_err());
}

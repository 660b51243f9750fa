use super::load::{default_config_path, resolve_config_path};
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
fn resolve_config_path_prefers_musicbrain_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MUSICBRAIN_CONFIG_PATH", "/tmp/musicbrain-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/musicbrain-test-config.toml")
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
            .join("musicbrain")
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
            .join("musicbrain")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_side_split_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
extensions = ["flac"]
recursive = true
max_depth = 2
include_hidden = true
follow_links = false

[tracklist]
separator = " / "

[rename]
include_artist = true
include_medium_number = true
replacement_character = "-"
side_split = "by-length"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MUSICBRAIN_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MUSICBRAIN__TRACKLIST__SEPARATOR");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.extensions, vec!["flac".to_string()]);
    assert!(s.library.recursive);
    assert_eq!(s.library.max_depth, Some(2));
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.tracklist.separator, " / ");
    assert!(s.rename.include_artist);
    assert!(s.rename.include_medium_number);
    assert_eq!(s.rename.replacement_character, "-");
    assert_eq!(s.rename.side_split, SideSplit::Length);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[rename]
include_artist = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MUSICBRAIN_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("MUSICBRAIN__RENAME__INCLUDE_ARTIST", "true");

    let s = Settings::load().unwrap();
    assert!(s.rename.include_artist);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("absent.toml");
    let _g1 = EnvGuard::set("MUSICBRAIN_CONFIG_PATH", cfg_path.to_str().unwrap());

    let s = Settings::load().unwrap();
    assert_eq!(s.tracklist.separator, " – ");
    assert_eq!(s.rename.side_split, SideSplit::Half);
    assert!(!s.library.recursive);
}

#[test]
fn validate_rejects_bad_replacement_character() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.rename.replacement_character = "?".to_string();
    assert!(s.validate().is_err());

    s.rename.replacement_character = "__".to_string();
    assert!(s.validate().is_err());

    s.rename.replacement_character = String::new();
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_empty_separator() {
    let mut s = Settings::default();
    s.tracklist.separator.clear();
    assert!(s.validate().is_err());
}

#[test]
fn to_toml_round_trips_through_load() {
    let _lock = env_lock();
    let mut s = Settings::default();
    s.rename.side_split = SideSplit::Length;
    let text = s.to_toml().unwrap();
    assert!(text.contains("side_split = \"length\""));

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, text).unwrap();
    let _g1 = EnvGuard::set("MUSICBRAIN_CONFIG_PATH", cfg_path.to_str().unwrap());

    let loaded = Settings::load().unwrap();
    assert_eq!(loaded.rename.side_split, SideSplit::Length);
    assert_eq!(loaded.library.extensions, s.library.extensions);
}

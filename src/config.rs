//! Configuration file support for beyond-consent.
//!
//! This module loads and saves user preferences from a TOML configuration
//! file. Every field has a default, so a partial file is fine.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::filter::DEFAULT_PAGE_SIZE;
use crate::player::DEFAULT_TRACK_SECS;

/// User configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Episodes revealed per "load more"
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Length of the simulated track in seconds
    #[serde(default = "default_track_length_secs")]
    pub track_length_secs: u32,

    /// Progress simulator period in milliseconds
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    /// How long notifications stay visible, in seconds
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,

    /// Base URL used when sharing an episode
    #[serde(default = "default_share_url")]
    pub share_url: String,

    /// Key bindings
    #[serde(default)]
    pub keybindings: Keybindings,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_track_length_secs() -> u32 {
    DEFAULT_TRACK_SECS
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_notification_secs() -> u64 {
    5
}

fn default_share_url() -> String {
    "https://beyondconsent.example/#episodes".to_string()
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self {
            page_size: default_page_size(),
            track_length_secs: default_track_length_secs(),
            tick_millis: default_tick_millis(),
            notification_secs: default_notification_secs(),
            share_url: default_share_url(),
            keybindings: Keybindings::default(),
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }

    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/beyond-consent/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("beyond-consent");

        Ok(config_dir.join("config.toml"))
    }

    /// Get the log file path used while the TUI owns the terminal.
    ///
    /// Returns ~/.cache/beyond-consent/beyond-consent.log on Linux.
    pub fn get_log_path() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find cache directory")
            })?
            .join("beyond-consent");

        Ok(cache_dir.join("beyond-consent.log"))
    }

    /// Load config from the default location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Create a default config file if one doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn create_default_if_missing() -> Result<PathBuf> {
        let path = Self::get_config_path()?;

        if !path.exists() {
            Self::new().save_to(&path)?;
        }

        Ok(path)
    }
}

/// Open `path` for appending log lines, creating parent directories.
pub fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Key bindings. Each action accepts a list of key names such as `"j"`,
/// `"Down"`, `"Enter"` or `"Esc"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
    pub quit: Vec<String>,
    pub help: Vec<String>,
    pub search: Vec<String>,
    pub load_more: Vec<String>,
    pub category: Vec<String>,
    pub play: Vec<String>,
    pub share: Vec<String>,
    pub menu: Vec<String>,
    pub edit: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: keys(&["k", "Up"]),
            down: keys(&["j", "Down"]),
            select: keys(&["Enter"]),
            back: keys(&["Esc"]),
            quit: keys(&["q"]),
            help: keys(&["?"]),
            search: keys(&["/"]),
            load_more: keys(&["l"]),
            category: keys(&["c"]),
            play: keys(&["p", " "]),
            share: keys(&["s"]),
            menu: keys(&["m"]),
            edit: keys(&["i"]),
            next_page: keys(&["Tab", "Right"]),
            prev_page: keys(&["BackTab", "Left"]),
        }
    }
}

impl Keybindings {
    /// Check whether `key` matches any of the names in `binding`.
    pub fn matches(&self, binding: &[String], key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
        {
            return false;
        }
        binding
            .iter()
            .any(|name| parse_key(name).is_some_and(|code| code == key.code))
    }

    /// First configured name for an action, for help text.
    pub fn label<'a>(&self, binding: &'a [String]) -> &'a str {
        binding.first().map(String::as_str).unwrap_or("-")
    }
}

/// Parse a key name into a crossterm key code.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let code = match name {
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Enter" => KeyCode::Enter,
        "Esc" => KeyCode::Esc,
        "Backspace" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Space" => KeyCode::Char(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_config_has_defaults() {
        let config = Config::new();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.track_length_secs, 2723);
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.notification_lifetime(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            page_size: 3,
            share_url: "https://example.org".to_string(),
            ..Config::new()
        };

        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("page_size = 3"));
        assert!(toml_str.contains("share_url = \"https://example.org\""));
        assert!(toml_str.contains("[keybindings]"));
    }

    #[test]
    fn test_config_partial_deserialization() {
        // Only specify some fields, rest should use defaults
        let toml_str = r#"
            page_size = 4

            [keybindings]
            load_more = ["L", "PageDown"]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.page_size, 4);
        assert_eq!(config.track_length_secs, 2723); // default
        assert_eq!(config.keybindings.load_more, vec!["L", "PageDown"]);
        assert_eq!(config.keybindings.up, vec!["k", "Up"]); // default
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("beyond-consent-missing-config.toml");
        let _ = fs::remove_file(&path);
        assert_eq!(Config::load_from(&path).unwrap(), Config::new());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("beyond-consent-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let config = Config {
            tick_millis: 250,
            ..Config::new()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_open_log_file_appends() {
        use std::io::Write;

        let dir = std::env::temp_dir().join(format!("beyond-consent-log-{}", std::process::id()));
        let path = dir.join("nested").join("beyond-consent.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_log_path_is_beside_app_cache() {
        if let Ok(path) = Config::get_log_path() {
            assert!(path.ends_with("beyond-consent/beyond-consent.log"));
        }
    }

    #[test]
    fn test_keybinding_matches() {
        let kb = Keybindings::default();
        assert!(kb.matches(&kb.down, &key(KeyCode::Char('j'))));
        assert!(kb.matches(&kb.down, &key(KeyCode::Down)));
        assert!(!kb.matches(&kb.down, &key(KeyCode::Char('k'))));
        assert!(kb.matches(&kb.play, &key(KeyCode::Char(' '))));
        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert!(!kb.matches(&kb.down, &ctrl_j));
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("Esc"), Some(KeyCode::Esc));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("x"), Some(KeyCode::Char('x')));
        assert_eq!(parse_key("Nope"), None);
        assert_eq!(parse_key(""), None);
    }
}

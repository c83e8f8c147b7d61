//! Configuration management for Clarity.
//!
//! Configuration is read from `~/.config/clarity/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::app::Result;
use crate::placeholder::{PlaceholderCycler, PlaceholderTiming};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub placeholder: PlaceholderConfig,
    pub home: HomeConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Backend location and request limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Animated hint shown in the empty search box.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    pub phrases: Vec<String>,
    pub typing_interval_ms: u64,
    pub pause_ms: u64,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Find news about...".to_string(),
                "e.g. Global Warming".to_string(),
                "What's trending today?".to_string(),
                "Politics, Tech, Health...".to_string(),
                "Stay informed in seconds".to_string(),
            ],
            typing_interval_ms: 80,
            pause_ms: 1000,
        }
    }
}

/// Quick searches offered under the search box.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub trending: Vec<String>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            trending: vec![
                "Trump reclassifies 50,000 federal worker...".to_string(),
                "elon musk says AI will transform humanity...".to_string(),
            ],
        }
    }
}

impl PlaceholderConfig {
    pub fn timing(&self) -> PlaceholderTiming {
        PlaceholderTiming {
            typing_interval: Duration::from_millis(self.typing_interval_ms),
            pause: Duration::from_millis(self.pause_ms),
        }
    }

    pub fn cycler(&self) -> Result<PlaceholderCycler> {
        PlaceholderCycler::new(self.phrases.clone(), self.timing())
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/clarity/config.toml`
    pub fn default_config_path() -> std::result::Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("clarity").join("config.toml"))
    }

    /// Create a default config file with comments.
    pub fn create_default_config(path: &Path) -> std::result::Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Clarity Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"
#
# Plain characters without a modifier are always typed into the search box,
# so prefer special keys or modifiers for bindings.

[api]
# Backend serving /articles and /search
base_url = "http://localhost:8080"

# Per-request timeout in seconds
timeout_secs = 30

[placeholder]
# Hints typed into the empty search box, in order
phrases = [
    "Find news about...",
    "e.g. Global Warming",
    "What's trending today?",
    "Politics, Tech, Health...",
    "Stay informed in seconds",
]

# Delay between typed characters (deleting runs twice as fast)
typing_interval_ms = 80

# Hold time once a hint is fully typed
pause_ms = 1000

[home]
# Quick searches listed under the search box; select one with Up/Down
trending = [
    "Trump reclassifies 50,000 federal worker...",
    "elon musk says AI will transform humanity...",
]

[colors]
# Border colors
active_border = "White"
inactive_border = "DarkGray"

# Selection highlight
selection_bg = "Gray"
selection_fg = "Black"

# Text
title = "White"
text = "Gray"
muted = "DarkGray"
error = "LightRed"

# Related topics and category tabs
related_topic = "Cyan"
active_category = "White"
inactive_category = "DarkGray"

# Status bar
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["Ctrl+c"]
back = ["Esc"]
submit = ["Enter"]
toggle_explore = ["Tab"]
next_category = ["Right"]
prev_category = ["Left"]
move_up = ["Up"]
move_down = ["Down"]
page_up = ["PageUp"]
page_down = ["PageDown"]
retry = ["Ctrl+r"]
open_image = ["Ctrl+o"]
delete_char = ["Backspace"]
clear_input = ["Ctrl+u"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

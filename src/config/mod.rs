//! Configuration system for hexquill.
//!
//! This module provides the configuration structure for hexquill with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use hexquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.bytes_per_row, 16);
//! assert_eq!(config.window.jump_radius, 50);
//!
//! // Create custom configuration
//! let custom = Config {
//!     bytes_per_row: 8,
//!     ..Config::default()
//! };
//! assert!(custom.show_ascii);
//! ```
//!
//! # File format
//!
//! ```toml
//! theme = "gruvbox-dark"
//! bytes_per_row = 16
//! create_backup = true
//!
//! [window]
//! page_jump_ratio = 0.95
//! undo_limit = 500
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the hexquill application.
///
/// All fields have sensible defaults via `Config::default()`, and any field
/// missing from the config file falls back to its default.
///
/// # Fields
///
/// * `theme` - Color theme name (default: "default-dark")
/// * `bytes_per_row` - Bytes shown per row when the terminal is wide enough (default: 16)
/// * `create_backup` - Create .bak files before saving (default: false)
/// * `show_ascii` - Show the ASCII column next to the hex bytes (default: true)
/// * `log_level` - Log filter used when `RUST_LOG` is unset (default: "warn")
/// * `window` - Tunables for cursor, search and history behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Color theme name
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Bytes shown per row
    #[serde(default = "default_bytes_per_row")]
    pub bytes_per_row: usize,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// Show the ASCII column
    #[serde(default = "default_show_ascii")]
    pub show_ascii: bool,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-window tunables
    #[serde(default)]
    pub window: WindowOptions,
}

/// Tunables applied to every window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowOptions {
    /// Fraction of the screen height moved by page up/down
    #[serde(default = "default_page_jump_ratio")]
    pub page_jump_ratio: f64,

    /// Screens of bytes scanned by one search
    #[serde(default = "default_search_screens")]
    pub search_screens: usize,

    /// Multiples of the pattern length scanned by one search
    #[serde(default = "default_search_pattern_factor")]
    pub search_pattern_factor: usize,

    /// Bytes scanned on each side of the cursor when following an offset
    #[serde(default = "default_jump_radius")]
    pub jump_radius: usize,

    /// Maximum number of undo checkpoints to keep (0 keeps all)
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_bytes_per_row() -> usize {
    16
}

fn default_show_ascii() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_page_jump_ratio() -> f64 {
    0.95
}

fn default_search_screens() -> usize {
    50
}

fn default_search_pattern_factor() -> usize {
    500
}

fn default_jump_radius() -> usize {
    50
}

/// Returns the default undo limit.
fn default_undo_limit() -> usize {
    1000
}

impl Default for Config {
    /// Creates a new configuration with default values.
    ///
    /// # Default Values
    ///
    /// * `theme`: "default-dark"
    /// * `bytes_per_row`: 16
    /// * `create_backup`: false
    /// * `show_ascii`: true
    /// * `log_level`: "warn"
    /// * `window`: `WindowOptions::default()`
    fn default() -> Self {
        Self {
            theme: default_theme(),
            bytes_per_row: default_bytes_per_row(),
            create_backup: false,
            show_ascii: default_show_ascii(),
            log_level: default_log_level(),
            window: WindowOptions::default(),
        }
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            page_jump_ratio: default_page_jump_ratio(),
            search_screens: default_search_screens(),
            search_pattern_factor: default_search_pattern_factor(),
            jump_radius: default_jump_radius(),
            undo_limit: default_undo_limit(),
        }
    }
}

impl Config {
    /// Returns the directory holding hexquill's config and logs.
    ///
    /// Uses `~/.config/hexquill` on all platforms.
    pub fn config_dir() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("hexquill");
            path
        })
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Option<std::path::PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|err| {
                tracing::warn!("Ignoring invalid config {:?}: {}", config_path, err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_string)?;

        Ok(())
    }
}

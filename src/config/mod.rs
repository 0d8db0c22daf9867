//! Configuration for the friend list client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/roster/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::roster::{RosterLimits, UNKNOWN_NAME};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod demo;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use demo::{DemoConfig, FileDemo};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound for `capacity`; the slot arena is allocated up front
const MAX_CAPACITY: usize = 65_536;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the friend list is saved
    pub data_file: PathBuf,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Maximum number of friends
    pub capacity: usize,

    /// Nicknames this long (in bytes) or longer are rejected
    pub max_name_len: usize,

    /// Status messages this long (in bytes) or longer are rejected
    pub max_status_len: usize,

    /// Name shown for peers whose name is unknown
    pub placeholder_name: String,

    /// Theme name: "default", "nord", "gruvbox", "dracula"
    pub theme: String,

    /// Simulated peer network
    pub demo: DemoConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        let limits = RosterLimits::default();
        Self {
            data_file: Self::default_data_file(),
            enable_tui: true,
            capacity: limits.capacity,
            max_name_len: limits.max_name_len,
            max_status_len: limits.max_status_len,
            placeholder_name: UNKNOWN_NAME.to_string(),
            theme: "default".to_string(),
            demo: DemoConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub data_file: Option<String>,
    pub capacity: Option<usize>,
    pub max_name_len: Option<usize>,
    pub max_status_len: Option<usize>,
    pub placeholder_name: Option<String>,
    pub theme: Option<String>,

    /// Optional [demo] section
    pub demo: Option<FileDemo>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/roster/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("roster").join("config.toml"))
    }

    /// Default friend list location, next to the config file
    fn default_data_file() -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(".config").join("roster").join("friends.json"))
            .unwrap_or_else(|| PathBuf::from("friends.json"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be read or parsed is an error:
    /// silently falling back to defaults would hide the user's mistake.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents)
                .with_context(|| format!("Invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig> {
        toml::from_str(contents).context("Failed to parse TOML")
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str| {
            env(key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        };

        // Data file: env > file > default
        let data_file = env("ROSTER_DATA_FILE")
            .or(file.data_file)
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);

        // TUI toggle: env only (runtime flag)
        let enable_tui = !flag("ROSTER_NO_TUI").unwrap_or(false);

        // Capacity: env > file > default, clamped to something allocatable
        let capacity = env("ROSTER_CAPACITY")
            .and_then(|v| v.parse().ok())
            .or(file.capacity)
            .unwrap_or(defaults.capacity)
            .clamp(1, MAX_CAPACITY);

        // Length limits: file > default (protocol constants, rarely changed)
        let max_name_len = file.max_name_len.unwrap_or(defaults.max_name_len).max(1);
        let max_status_len = file
            .max_status_len
            .unwrap_or(defaults.max_status_len)
            .max(1);

        let placeholder_name = file
            .placeholder_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(defaults.placeholder_name);

        // Theme: env > file > default
        let theme = env("ROSTER_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let demo = DemoConfig::from_file(file.demo, flag("ROSTER_DEMO"));
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            data_file,
            enable_tui,
            capacity,
            max_name_len,
            max_status_len,
            placeholder_name,
            theme,
            demo,
            logging,
        }
    }

    /// Limits handed to the roster
    pub fn roster_limits(&self) -> RosterLimits {
        RosterLimits {
            capacity: self.capacity,
            max_name_len: self.max_name_len,
            max_status_len: self.max_status_len,
            placeholder_name: self.placeholder_name.clone(),
        }
    }
}

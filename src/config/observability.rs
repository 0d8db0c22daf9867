//! `[logging]` section
//!
//! Logs normally go to the in-app panel, or to stdout when headless. A JSON
//! log file under `~/.config/roster/logs` can be switched on as well.

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// How often the log file starts over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default verbosity for the `roster` target
    pub level: LevelFilter,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem; rotated files get a date suffix
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            file_enabled: false,
            file_dir: dirs::home_dir()
                .map(|p| p.join(".config").join("roster").join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs")),
            file_rotation: LogRotation::Daily,
            file_prefix: "roster.log".to_string(),
        }
    }
}

/// `[logging]` as written in the config file; a bad level or rotation
/// fails the whole file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    #[serde(default, deserialize_with = "level_filter")]
    pub level: Option<LevelFilter>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<PathBuf>,
    pub file_rotation: Option<LogRotation>,
    pub file_prefix: Option<String>,
}

fn level_filter<'de, D: Deserializer<'de>>(d: D) -> Result<Option<LevelFilter>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(d)? else {
        return Ok(None);
    };
    raw.parse().map(Some).map_err(serde::de::Error::custom)
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file.file_dir.unwrap_or(defaults.file_dir),
            file_rotation: file.file_rotation.unwrap_or(defaults.file_rotation),
            file_prefix: file
                .file_prefix
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.file_prefix),
        }
    }

    /// Level as written back into the config template
    pub fn level_name(&self) -> String {
        self.level.to_string().to_lowercase()
    }
}

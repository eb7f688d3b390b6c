//! `[logging]` section: filter level and the optional JSON log file

use serde::Deserialize;
use std::path::PathBuf;
use tracing_appender::rolling::Rotation;

/// How often the log file rolls over; written lowercase in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file forever
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

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

/// Logging settings; any key missing from the file keeps its default
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive for the `postboard` target (overridden by RUST_LOG)
    pub level: String,
    /// Also write JSON lines to `file_dir`
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem, e.g. "postboard" -> "postboard.2024-01-15"
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::default(),
            file_prefix: "postboard".to_string(),
        }
    }
}

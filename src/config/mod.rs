//! Configuration for the post viewer
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/postboard/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Employee shown when a selection carries no usable id
pub const DEFAULT_EMPLOYEE: u64 = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the posts service
    pub api_url: String,

    /// Employee to fall back on (and to show in headless mode)
    pub default_employee: u64,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Demo mode: serve built-in records instead of calling the service
    pub demo_mode: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: crate::api::DEFAULT_API_URL.to_string(),
            default_employee: DEFAULT_EMPLOYEE,
            enable_tui: true,
            demo_mode: false,
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
    pub api_url: Option<String>,
    pub default_employee: Option<u64>,

    /// Optional [logging] section
    pub logging: Option<LoggingConfig>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/postboard/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("postboard").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        // Config is optional; a failed write just means no template
        let _ = Self::default().write_to(&path);
    }

    /// Write this config as TOML to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml()).with_context(|| format!("writing {}", path.display()))
    }

    /// Parse the config file at `path`; `Ok(None)` when it does not exist
    pub(crate) fn read_file_config(path: &Path) -> anyhow::Result<Option<FileConfig>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).context("cannot read configuration file"),
        };
        let parsed = toml::from_str(&contents).context("failed to parse configuration file")?;
        Ok(Some(parsed))
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be read or parsed is fatal: a
    /// broken config should fail fast, not silently fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match Self::read_file_config(&path) {
            Ok(file) => file.unwrap_or_default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - {:<45}║", e.to_string());
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {:#}\n", e);
                eprintln!("  Tip: Check for:\n");
                eprintln!("    - Missing quotes around string values");
                eprintln!("    - Non-numeric default_employee");
                eprintln!("    - Typos in section names\n");
                eprintln!("  To reset, run `postboard config --reset`.\n");
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("POSTBOARD_API_URL")
            .filter(|v| !v.trim().is_empty())
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Default employee: env > file > default; 0 is "unset"
        let default_employee = env("POSTBOARD_EMPLOYEE")
            .and_then(|v| v.trim().parse().ok())
            .filter(|id| *id != 0)
            .or(file.default_employee.filter(|id| *id != 0))
            .unwrap_or(defaults.default_employee);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("POSTBOARD_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(defaults.enable_tui);

        // Demo mode: env only (runtime flag)
        let demo_mode = env("POSTBOARD_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.demo_mode);

        let logging = file.logging.unwrap_or_default();

        Self {
            api_url,
            default_employee,
            enable_tui,
            demo_mode,
            logging,
        }
    }
}

//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config file, comments included
    pub fn to_toml(&self) -> String {
        format!(
            r#"# postboard configuration

# Base URL of the posts service (POSTBOARD_API_URL overrides)
api_url = "{api_url}"

# Employee shown when a selection has no usable id, and in headless mode
# (POSTBOARD_EMPLOYEE overrides)
default_employee = {default_employee}

# Logging configuration (RUST_LOG env var overrides the level)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_url = escape(&self.api_url),
            default_employee = self.default_employee,
            log_level = escape(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = escape(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = escape(&self.logging.file_prefix),
        )
    }
}

/// Escape a value for a TOML basic string
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the effective configuration as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# roster configuration

# Where the friend list is saved
data_file = {data_file:?}

# Maximum number of friends
capacity = {capacity}

# Nicknames and status messages at or above these byte lengths are ignored
max_name_len = {max_name_len}
max_status_len = {max_status_len}

# Name shown for peers without a known nickname
placeholder_name = {placeholder:?}

# Theme: default, nord, gruvbox, dracula
theme = {theme:?}

# Simulated peer network (ROSTER_DEMO=0 disables)
[demo]
enabled = {demo_enabled}
peers = {demo_peers}
interval_ms = {demo_interval}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level:?}
# File logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}
"#,
            data_file = self.data_file.display().to_string(),
            capacity = self.capacity,
            max_name_len = self.max_name_len,
            max_status_len = self.max_status_len,
            placeholder = self.placeholder_name,
            theme = self.theme,
            demo_enabled = self.demo.enabled,
            demo_peers = self.demo.peers,
            demo_interval = self.demo.interval_ms,
            log_level = self.logging.level_name(),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}

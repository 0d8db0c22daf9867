//! Demo peer network configuration
//!
//! The demo network stands in for the protocol engine so the friend list
//! has something to show: peers get added, come online, change names and
//! send the occasional message.

use serde::Deserialize;

/// Demo network settings
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Run the simulated peer network
    pub enabled: bool,
    /// How many simulated peers to add at startup
    pub peers: u32,
    /// Delay between simulated events
    pub interval_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            peers: 6,
            interval_ms: 1500,
        }
    }
}

/// Demo settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDemo {
    pub enabled: Option<bool>,
    pub peers: Option<u32>,
    pub interval_ms: Option<u64>,
}

impl DemoConfig {
    /// Create from file config with defaults; `env_enabled` wins over the file
    pub fn from_file(file: Option<FileDemo>, env_enabled: Option<bool>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            enabled: env_enabled
                .or(file.enabled)
                .unwrap_or(defaults.enabled),
            peers: file.peers.unwrap_or(defaults.peers),
            interval_ms: file.interval_ms.unwrap_or(defaults.interval_ms).max(50),
        }
    }
}

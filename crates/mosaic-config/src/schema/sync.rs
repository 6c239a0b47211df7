//! History synchronization and push channel configuration.

use serde::{Deserialize, Serialize};

/// History fetching policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Fetch more history when a window shows fewer events than this
    /// (valid range: 1-1000).
    pub low_water_mark: u32,
    /// Send the oldest loaded timestamp as a `before` cursor with
    /// pagination fetches.
    pub use_cursor: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            low_water_mark: 10,
            use_cursor: false,
        }
    }
}

/// Live push channel connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Initial reconnect delay in seconds (valid range: 1-60).
    pub reconnect_delay_secs: u32,
    /// Reconnect backoff ceiling in seconds (reconnect delay to 600).
    pub max_reconnect_delay_secs: u32,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            reconnect_delay_secs: 1,
            max_reconnect_delay_secs: 30,
        }
    }
}

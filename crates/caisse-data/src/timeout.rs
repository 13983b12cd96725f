//! Timeout configuration for store server calls.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeouts applied to every request, in milliseconds in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout.
    #[serde(default = "default_connect_ms")]
    pub connect_ms: u64,
    /// Total operation timeout.
    #[serde(default = "default_total_ms")]
    pub total_ms: u64,
}

fn default_connect_ms() -> u64 {
    2_000
}

fn default_total_ms() -> u64 {
    10_000
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self {
            connect_ms: connect.as_millis() as u64,
            total_ms: total.as_millis() as u64,
        }
    }

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self::new(total / 4, total)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }

    pub fn total(&self) -> Duration {
        Duration::from_millis(self.total_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: default_connect_ms(),
            total_ms: default_total_ms(),
        }
    }
}

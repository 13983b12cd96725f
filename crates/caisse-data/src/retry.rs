//! Retries of the sale-info lookup.
//!
//! Only sale-info lookups are retried. A checkout POST creates a sale on the
//! server and is sent exactly once.

use std::time::Duration;

use crate::gateway::GatewayError;

const FIRST_DELAY: Duration = Duration::from_millis(200);
const MAX_DELAY: Duration = Duration::from_secs(2);

/// How many times a failed lookup is tried again, and how long to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub retries: u32,
    first_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    /// Doubling delays from 200 ms, at most 2 s.
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            first_delay: FIRST_DELAY,
            max_delay: MAX_DELAY,
        }
    }

    /// Retry without waiting.
    pub fn immediate(retries: u32) -> Self {
        Self {
            retries,
            first_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Whether the failure of attempt `attempt` (0 for the first) is tried again.
    ///
    /// Server errors (5xx), timeouts and lost connections are; anything the
    /// server answered on purpose is not.
    pub fn should_retry(&self, err: &GatewayError, attempt: u32) -> bool {
        if attempt >= self.retries {
            return false;
        }
        match err {
            GatewayError::Http { status, .. } => (500..600).contains(status),
            GatewayError::Timeout(_) | GatewayError::Transport(_) => true,
            _ => false,
        }
    }

    /// Wait before the retry that follows attempt `attempt`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.first_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

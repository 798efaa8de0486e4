//! Timeout configuration for catalog requests.

use std::time::Duration;

/// Default total timeout for one catalog request.
pub const DEFAULT_TOTAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout configuration for a fetch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout. The connect phase gets a quarter.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }

    /// Create from a total in milliseconds, as read from config files.
    pub fn from_millis(total_ms: u64) -> Self {
        Self::from_total(Duration::from_millis(total_ms))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(DEFAULT_TOTAL_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ten_seconds() {
        let config = TimeoutConfig::default();
        assert_eq!(config.total, Duration::from_secs(10));
        assert_eq!(config.connect, Duration::from_millis(2500));
    }

    #[test]
    fn test_from_millis() {
        let config = TimeoutConfig::from_millis(800);
        assert_eq!(config.total, Duration::from_millis(800));
        assert_eq!(config.connect, Duration::from_millis(200));
    }
}

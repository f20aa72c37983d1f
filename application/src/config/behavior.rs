//! Runtime behavior of the gate and dispatcher

use std::time::Duration;

/// Default bound on a single policy check
pub const DEFAULT_POLICY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of proposals in flight in concurrent mode
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a policy decision. Expiry counts as a deny.
    pub policy_timeout: Duration,
    /// Process proposals concurrently instead of one after another
    pub concurrent: bool,
    /// Upper bound on in-flight proposals when `concurrent` is set
    pub max_concurrency: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            policy_timeout: DEFAULT_POLICY_TIMEOUT,
            concurrent: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl BehaviorConfig {
    pub fn with_policy_timeout_seconds(self, seconds: u64) -> Self {
        self.with_policy_timeout(Duration::from_secs(seconds))
    }

    pub fn with_policy_timeout(mut self, timeout: Duration) -> Self {
        self.policy_timeout = timeout;
        self
    }

    /// Enable concurrent dispatch. A limit of zero is treated as one.
    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.concurrent = true;
        self.max_concurrency = max_concurrency.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BehaviorConfig::default();
        assert_eq!(config.policy_timeout, Duration::from_secs(10));
        assert!(!config.concurrent);
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let config = BehaviorConfig::default().with_concurrency(0);
        assert!(config.concurrent);
        assert_eq!(config.max_concurrency, 1);
    }
}

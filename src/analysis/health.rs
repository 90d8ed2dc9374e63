//! Online health monitoring of raw entropy.
//!
//! Both tests always run so the diagnostic names every failing test.
//! A failed check is recoverable: the caller supplements the buffer and
//! carries on. Counters are kept for observability.

use super::threshold::{HealthThresholds, HealthViolation};

/// Outcome of one health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckResult {
    violations: Vec<HealthViolation>,
}

impl HealthCheckResult {
    /// Returns true if both tests passed.
    #[inline]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the failing tests, in test order.
    pub fn violations(&self) -> &[HealthViolation] {
        &self.violations
    }

    /// Human-readable summary; `"ok"` when both tests passed.
    pub fn diagnostic(&self) -> String {
        if self.passed() {
            return "ok".to_string();
        }
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Running health counters.
#[derive(Debug, Clone, Default)]
pub struct HealthStats {
    /// Total checks performed.
    pub total_checks: u64,
    /// Checks where at least one test failed.
    pub total_failures: u64,
    /// Failures since the last passing check.
    pub consecutive_failures: u64,
    /// Most recent violation, if any.
    pub last_violation: Option<HealthViolation>,
}

/// Runs the Repetition Count and Adaptive Proportion tests.
pub struct HealthMonitor {
    thresholds: HealthThresholds,
    stats: HealthStats,
}

impl HealthMonitor {
    /// Creates a monitor with the given bounds.
    pub fn new(thresholds: HealthThresholds) -> Self {
        Self {
            thresholds,
            stats: HealthStats::default(),
        }
    }

    /// Checks a raw buffer and updates the counters.
    pub fn check(&mut self, raw: &[u8]) -> HealthCheckResult {
        let violations: Vec<HealthViolation> = [
            self.thresholds.check_repetition(raw),
            self.thresholds.check_proportion(raw),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        self.stats.total_checks += 1;

        let result = HealthCheckResult { violations };
        if result.passed() {
            self.stats.consecutive_failures = 0;
            tracing::trace!(bits = raw.len() * 8, "Health check passed");
        } else {
            self.stats.total_failures += 1;
            self.stats.consecutive_failures += 1;
            self.stats.last_violation = result.violations.last().cloned();
            tracing::warn!(
                diagnostic = %result.diagnostic(),
                consecutive = self.stats.consecutive_failures,
                "Entropy health check failed"
            );
        }

        result
    }

    /// Returns the configured bounds.
    pub fn thresholds(&self) -> &HealthThresholds {
        &self.thresholds
    }

    /// Returns the running counters.
    pub fn stats(&self) -> &HealthStats {
        &self.stats
    }
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new(HealthThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_good_data() -> Vec<u8> {
        // 0x5A = 01011010: balanced, short runs
        vec![0x5A; 128]
    }

    #[test]
    fn test_good_data_passes() {
        let mut monitor = HealthMonitor::default();
        let result = monitor.check(&make_good_data());

        assert!(result.passed());
        assert_eq!(result.diagnostic(), "ok");
        assert_eq!(monitor.stats().total_checks, 1);
        assert_eq!(monitor.stats().total_failures, 0);
    }

    #[test]
    fn test_all_zero_fails_both_tests() {
        let mut monitor = HealthMonitor::default();
        let result = monitor.check(&[0x00; 128]);

        assert!(!result.passed());
        assert_eq!(result.violations().len(), 2);
        let diagnostic = result.diagnostic();
        assert!(diagnostic.contains("repetition count"));
        assert!(diagnostic.contains("adaptive proportion"));
    }

    #[test]
    fn test_diagnostic_names_only_failing_test() {
        let mut raw = vec![0x00u8; 64];
        raw.extend_from_slice(&[0xFF; 64]);

        let mut monitor = HealthMonitor::default();
        let diagnostic = monitor.check(&raw).diagnostic();

        assert!(diagnostic.contains("repetition count"));
        assert!(!diagnostic.contains("adaptive proportion"));
    }

    #[test]
    fn test_consecutive_failures_reset_on_pass() {
        let mut monitor = HealthMonitor::default();

        monitor.check(&[0xFF; 128]);
        monitor.check(&[0xFF; 128]);
        assert_eq!(monitor.stats().consecutive_failures, 2);
        assert!(monitor.stats().last_violation.is_some());

        monitor.check(&make_good_data());
        assert_eq!(monitor.stats().consecutive_failures, 0);
        assert_eq!(monitor.stats().total_failures, 2);
        assert_eq!(monitor.stats().total_checks, 3);
    }
}

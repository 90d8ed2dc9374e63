//! Entropy health testing and output statistics.
//!
//! Health tests run online against every raw buffer and are meant to
//! catch gross source failure (a stuck bit, a frozen clock), not subtle
//! bias. The statistics helpers check bulk generator output.

mod health;
pub mod statistics;
mod threshold;

pub use health::{HealthCheckResult, HealthMonitor, HealthStats};
pub use threshold::{HealthThresholds, HealthViolation};

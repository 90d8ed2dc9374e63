//! Metrics collection and registry.

use crate::generator::GeneratorStats;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus metrics registry for generator monitoring.
pub struct MetricsRegistry {
    registry: Registry,

    // DRBG metrics
    reseed_total: IntCounter,
    bytes_since_reseed: IntGauge,
    reseed_interval_bytes: IntGauge,
    bytes_generated_total: IntCounter,

    // Entropy metrics
    health_checks_total: IntCounter,
    health_failures_total: IntCounter,
    supplemented_total: IntCounter,
    extraction_fallbacks_total: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all generator metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let reseed_total = IntCounter::new(
            "vqr_turn_drbg_reseed_total",
            "Total number of DRBG reseeds performed",
        )?;
        let bytes_since_reseed = IntGauge::new(
            "vqr_turn_drbg_bytes_since_reseed",
            "Bytes generated since last DRBG reseed",
        )?;
        let reseed_interval_bytes = IntGauge::new(
            "vqr_turn_drbg_reseed_interval_bytes",
            "Configured reseed interval in bytes",
        )?;
        let bytes_generated_total = IntCounter::new(
            "vqr_turn_bytes_generated_total",
            "Total random bytes served",
        )?;

        let health_checks_total = IntCounter::new(
            "vqr_turn_health_checks_total",
            "Total health checks run on raw entropy",
        )?;
        let health_failures_total = IntCounter::new(
            "vqr_turn_health_failures_total",
            "Health checks that failed the repetition or proportion test",
        )?;
        let supplemented_total = IntCounter::new(
            "vqr_turn_entropy_supplemented_total",
            "Collections supplemented with additional OS bytes",
        )?;
        let extraction_fallbacks_total = IntCounter::new(
            "vqr_turn_extraction_fallbacks_total",
            "Seeds derived from raw entropy because debiasing emitted nothing",
        )?;

        registry.register(Box::new(reseed_total.clone()))?;
        registry.register(Box::new(bytes_since_reseed.clone()))?;
        registry.register(Box::new(reseed_interval_bytes.clone()))?;
        registry.register(Box::new(bytes_generated_total.clone()))?;
        registry.register(Box::new(health_checks_total.clone()))?;
        registry.register(Box::new(health_failures_total.clone()))?;
        registry.register(Box::new(supplemented_total.clone()))?;
        registry.register(Box::new(extraction_fallbacks_total.clone()))?;

        Ok(Self {
            registry,
            reseed_total,
            bytes_since_reseed,
            reseed_interval_bytes,
            bytes_generated_total,
            health_checks_total,
            health_failures_total,
            supplemented_total,
            extraction_fallbacks_total,
        })
    }

    /// Updates all metrics from a generator snapshot.
    ///
    /// Counters only move forward; a snapshot behind the current value
    /// leaves the counter unchanged.
    pub fn update(&self, stats: &GeneratorStats) {
        advance(&self.reseed_total, stats.reseed_count);
        advance(&self.bytes_generated_total, stats.total_bytes_generated);
        advance(&self.health_checks_total, stats.health_checks);
        advance(&self.health_failures_total, stats.health_failures);
        advance(&self.supplemented_total, stats.supplemented_collections);
        advance(&self.extraction_fallbacks_total, stats.extraction_fallbacks);

        self.bytes_since_reseed.set(stats.bytes_since_reseed as i64);
        self.reseed_interval_bytes.set(stats.reseed_interval_bytes as i64);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn advance(counter: &IntCounter, target: u64) {
    let current = counter.get();
    if target > current {
        counter.inc_by(target - current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        assert!(MetricsRegistry::new().is_ok());
    }

    #[test]
    fn test_metrics_update() {
        let registry = MetricsRegistry::new().unwrap();

        let stats = GeneratorStats {
            reseed_count: 2,
            bytes_since_reseed: 1024,
            reseed_interval_bytes: 4096,
            total_bytes_generated: 9216,
            health_checks: 3,
            health_failures: 1,
            supplemented_collections: 1,
            extraction_fallbacks: 0,
        };
        registry.update(&stats);

        let output = registry.encode().unwrap();
        assert!(output.contains("vqr_turn_drbg_reseed_total 2"));
        assert!(output.contains("vqr_turn_drbg_bytes_since_reseed 1024"));
        assert!(output.contains("vqr_turn_health_failures_total 1"));
        assert!(output.contains("vqr_turn_bytes_generated_total 9216"));
    }

    #[test]
    fn test_counters_do_not_regress() {
        let registry = MetricsRegistry::new().unwrap();

        registry.update(&GeneratorStats {
            reseed_count: 5,
            ..Default::default()
        });
        registry.update(&GeneratorStats {
            reseed_count: 3,
            ..Default::default()
        });

        assert!(registry
            .encode()
            .unwrap()
            .contains("vqr_turn_drbg_reseed_total 5"));
    }

    #[test]
    fn test_metrics_encode() {
        let output = MetricsRegistry::new().unwrap().encode().unwrap();
        assert!(output.contains("vqr_turn_drbg_reseed_total"));
        assert!(output.contains("vqr_turn_health_checks_total"));
        assert!(output.contains("vqr_turn_extraction_fallbacks_total"));
    }
}

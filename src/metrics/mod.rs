//! Prometheus metrics for generator monitoring.
//!
//! Health-check failures are recovered inside the generator and never
//! surface to callers; these counters are how a hosting service sees
//! them. Serving the text output is left to the host.
//!
//! # Metrics Exposed
//!
//! ## DRBG Metrics
//! - `vqr_turn_drbg_reseed_total` - Total reseeds performed
//! - `vqr_turn_drbg_bytes_since_reseed` - Bytes generated since last reseed
//! - `vqr_turn_drbg_reseed_interval_bytes` - Configured reseed interval
//! - `vqr_turn_bytes_generated_total` - Total bytes served
//!
//! ## Entropy Metrics
//! - `vqr_turn_health_checks_total` - Health checks run on raw entropy
//! - `vqr_turn_health_failures_total` - Failed health checks
//! - `vqr_turn_entropy_supplemented_total` - Collections given extra OS bytes
//! - `vqr_turn_extraction_fallbacks_total` - Seeds hashed from raw entropy
//!
//! # Example
//!
//! ```no_run
//! use vqr_turn_rng::{metrics::MetricsRegistry, VqrTurnRng};
//!
//! let rng = VqrTurnRng::new(1 << 20).expect("OS entropy available");
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//!
//! rng.random_bytes(4096).expect("generation");
//! registry.update(&rng.stats().expect("stats"));
//! println!("{}", registry.encode().expect("encode"));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry};

//! VQR-TURN Random Bit Generation Library
//!
//! Harvests entropy from the operating system and CPU timing jitter,
//! validates it with online health tests, debiases it, derives a seed,
//! and expands that seed with an HMAC-SHA-256 DRBG that reseeds from
//! fresh entropy at a configurable byte interval.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! entropy → extraction → conditioning → reseeding → generator
//!    ↓
//! analysis (health tests)
//! ```
//!
//! # Design Principles
//!
//! - **OS entropy is primary**: jitter is defense in depth, not a replacement
//! - **Available under degradation**: failed health checks are supplemented, not fatal
//! - **Uses standard primitives**: SHA3-256 for seeding, HMAC-SHA-256 for expansion
//! - **No cryptographic claims**: health tests are sanity gates, not proofs
//! - **No hidden globals**: each generator is a value owned by its caller
//!
//! # Example
//!
//! ```no_run
//! use vqr_turn_rng::VqrTurnRng;
//!
//! let rng = VqrTurnRng::new(1 << 20).unwrap();
//!
//! let key = rng.random_bytes(32).unwrap();
//! let id = rng.random_u64().unwrap();
//! let sample = rng.random_float().unwrap();
//!
//! assert_eq!(key.len(), 32);
//! assert!((0.0..1.0).contains(&sample));
//! # let _ = id;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod conditioning;
pub mod config;
pub mod entropy;
pub mod extraction;
pub mod generator;
pub mod metrics;
pub mod reseeding;

// Re-export commonly used types at crate root
pub use analysis::{HealthCheckResult, HealthMonitor, HealthThresholds};
pub use conditioning::{HashAlgorithm, Seed, SeedDeriver};
pub use config::{ConfigError, GeneratorConfig};
pub use entropy::{EntropySource, JitterSampler, MockOsSource, OsEntropySource, SystemEntropy};
pub use extraction::{Debiasor, DebiasedBuffer, RawEntropyBuffer};
pub use generator::{GeneratorError, GeneratorStats, VqrTurnRng};
pub use reseeding::HmacDrbg;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

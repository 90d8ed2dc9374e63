//! Public random generator.
//!
//! Orchestrates collection, health checking, debiasing, seed derivation
//! and HMAC-DRBG expansion behind byte- and scalar-oriented operations.
//!
//! # Reseeding Model
//!
//! The DRBG is instantiated from freshly collected entropy and reseeded
//! synchronously by whichever caller reaches the byte interval. A reseed
//! mixes a new seed into the existing `K`/`V` rather than replacing them.
//!
//! # Concurrency
//!
//! All state sits behind one mutex held for the whole
//! check-reseed-generate sequence, so concurrent callers never
//! interleave partial state updates or race on the interval check.

use crate::analysis::HealthMonitor;
use crate::conditioning::{Seed, SeedDeriver, SeedMaterial};
use crate::config::{ConfigError, GeneratorConfig};
use crate::entropy::{EntropySource, JitterSampler, OsEntropySource, SourceError, SystemEntropy};
use crate::extraction::Debiasor;
use crate::reseeding::{DrbgError, HmacDrbg, ReseedPolicy};
use rand_core::{CryptoRng, RngCore};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by the generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Drbg(#[from] DrbgError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("generator state lock poisoned")]
    LockPoisoned,
}

/// Snapshot of generator counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorStats {
    /// Reseeds performed since construction.
    pub reseed_count: u64,
    /// Bytes served since the last reseed.
    pub bytes_since_reseed: u64,
    /// Configured reseed interval.
    pub reseed_interval_bytes: u64,
    /// Bytes served since construction.
    pub total_bytes_generated: u64,
    /// Health checks run on raw entropy.
    pub health_checks: u64,
    /// Health checks that failed.
    pub health_failures: u64,
    /// Collections that needed supplemental OS bytes.
    pub supplemented_collections: u64,
    /// Seeds hashed from raw entropy because extraction emitted nothing.
    pub extraction_fallbacks: u64,
}

/// Collection-to-seed pipeline.
struct SeedPipeline {
    entropy: EntropySource,
    debiasor: Debiasor,
    deriver: SeedDeriver,
    collection_bytes: usize,
    extraction_fallbacks: u64,
}

impl SeedPipeline {
    fn fresh_seed(&mut self, generated_so_far: u64) -> Result<Seed, SourceError> {
        let raw = self.entropy.collect(self.collection_bytes)?;
        let debiased = self.debiasor.extract(raw.data());
        let seed = self.deriver.derive_from(&debiased, &raw, generated_so_far);

        if seed.material() == SeedMaterial::RawFallback {
            self.extraction_fallbacks += 1;
        }

        tracing::debug!(
            raw_bytes = raw.len(),
            debiased_bits = debiased.bit_len(),
            "Derived seed from fresh entropy"
        );

        Ok(seed)
    }
}

struct GeneratorState {
    drbg: HmacDrbg,
    policy: ReseedPolicy,
    pipeline: SeedPipeline,
    chunk_bytes: usize,
    reseed_count: u64,
    total_bytes: u64,
}

impl GeneratorState {
    fn reseed(&mut self) -> Result<(), GeneratorError> {
        let seed = self.pipeline.fresh_seed(self.total_bytes)?;
        self.drbg.reseed(seed.as_bytes())?;
        self.policy.reset();
        self.reseed_count += 1;

        tracing::info!(
            reseed_count = self.reseed_count,
            total_bytes = self.total_bytes,
            "DRBG reseeded from fresh entropy"
        );

        Ok(())
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        let mut offset = 0;
        while offset < dest.len() {
            let draw = self.policy.next_draw(dest.len() - offset, self.chunk_bytes);
            if self.policy.must_reseed_before(draw) {
                self.reseed()?;
            }

            self.drbg.fill(&mut dest[offset..offset + draw]);
            self.policy.record(draw);
            self.total_bytes += draw as u64;
            offset += draw;
        }
        Ok(())
    }

    fn stats(&self) -> GeneratorStats {
        let health = self.pipeline.entropy.health_stats();
        GeneratorStats {
            reseed_count: self.reseed_count,
            bytes_since_reseed: self.policy.bytes_generated(),
            reseed_interval_bytes: self.policy.interval_bytes(),
            total_bytes_generated: self.total_bytes,
            health_checks: health.total_checks,
            health_failures: health.total_failures,
            supplemented_collections: self.pipeline.entropy.supplemented_count(),
            extraction_fallbacks: self.pipeline.extraction_fallbacks,
        }
    }
}

/// Entropy-seeded HMAC-DRBG with periodic reseeding.
///
/// Every instance seeds itself from fresh entropy; DRBG state is never
/// persisted. Instances are independent and can be shared across
/// threads behind an `Arc`.
///
/// # Security Model
///
/// - The OS source is the primary guarantee; jitter is defense in depth
/// - Health failures degrade confidence but never block output
/// - Only one-way derivatives of `V` are emitted
pub struct VqrTurnRng {
    state: Mutex<GeneratorState>,
}

impl VqrTurnRng {
    /// Creates a generator over the system entropy source.
    ///
    /// Fails only if the OS source cannot be read. An interval of zero
    /// is treated as one byte.
    pub fn new(reseed_interval_bytes: u64) -> Result<Self, GeneratorError> {
        Self::from_config(GeneratorConfig::with_reseed_interval(
            reseed_interval_bytes.max(1),
        ))
    }

    /// Creates a generator from configuration over the system entropy source.
    pub fn from_config(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        Self::with_source(config, Box::new(SystemEntropy))
    }

    /// Creates a generator over a caller-supplied OS entropy source.
    pub fn with_source(
        config: GeneratorConfig,
        os: Box<dyn OsEntropySource>,
    ) -> Result<Self, GeneratorError> {
        config.validate()?;

        let entropy = EntropySource::new(
            os,
            JitterSampler::new(config.jitter.clone()),
            HealthMonitor::new(config.health.clone()),
        );
        let mut pipeline = SeedPipeline {
            entropy,
            debiasor: Debiasor::new(),
            deriver: SeedDeriver::new(config.hash),
            collection_bytes: config.collection_bytes,
            extraction_fallbacks: 0,
        };

        let seed = pipeline.fresh_seed(0)?;
        let drbg = HmacDrbg::new(seed.as_bytes())?;

        tracing::info!(
            reseed_interval_bytes = config.reseed_interval_bytes,
            hash = ?config.hash,
            "Random generator initialized from fresh entropy"
        );

        Ok(Self {
            state: Mutex::new(GeneratorState {
                drbg,
                policy: ReseedPolicy::new(config.reseed_interval_bytes),
                pipeline,
                chunk_bytes: config.chunk_bytes,
                reseed_count: 0,
                total_bytes: 0,
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, GeneratorState>, GeneratorError> {
        self.state.lock().map_err(|_| GeneratorError::LockPoisoned)
    }

    /// Returns exactly `n` random bytes, reseeding first if due.
    pub fn random_bytes(&self, n: usize) -> Result<Vec<u8>, GeneratorError> {
        let mut out = vec![0u8; n];
        self.fill(&mut out)?;
        Ok(out)
    }

    /// Fills `dest` with random bytes, reseeding first if due.
    pub fn fill(&self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        self.lock()?.fill(dest)
    }

    /// Returns 8 random bytes read as a big-endian `u64`.
    pub fn random_u64(&self) -> Result<u64, GeneratorError> {
        let mut bytes = [0u8; 8];
        self.fill(&mut bytes)?;
        Ok(u64::from_be_bytes(bytes))
    }

    /// Returns a float uniformly distributed over `[0, 1)`.
    pub fn random_float(&self) -> Result<f64, GeneratorError> {
        self.random_u64().map(unit_float)
    }

    /// Forces a collect-derive-reseed cycle now.
    pub fn reseed(&self) -> Result<(), GeneratorError> {
        self.lock()?.reseed()
    }

    /// Returns a snapshot of the generator's counters.
    pub fn stats(&self) -> Result<GeneratorStats, GeneratorError> {
        Ok(self.lock()?.stats())
    }
}

/// Maps a `u64` onto `[0, 1)` as `x / 2^64`, keeping the 53 bits an
/// `f64` mantissa holds so the result never rounds up to 1.0.
fn unit_float(x: u64) -> f64 {
    (x >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

impl std::fmt::Debug for VqrTurnRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VqrTurnRng").finish_non_exhaustive()
    }
}

/// # Panics
///
/// `next_u32`, `next_u64` and `fill_bytes` panic if a due reseed cannot
/// read the OS source. Use `try_fill_bytes` to handle that case.
impl RngCore for VqrTurnRng {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = VqrTurnRng::fill(self, dest) {
            panic!("VqrTurnRng failed to generate: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        VqrTurnRng::fill(self, dest).map_err(rand_core::Error::new)
    }
}

impl CryptoRng for VqrTurnRng {}

//! CPU timing jitter sampler.
//!
//! Tight-loop reads of the monotonic clock produce deltas with a few
//! bits of scheduler and cache noise. Each masked delta is folded into a
//! BLAKE3 accumulator whose extendable output yields exactly the
//! requested length.
//!
//! The entropy contributed per iteration is unverified. The OS source is
//! the primary guarantee; jitter is defense in depth.

use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Jitter loop sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterConfig {
    /// Lower bound on clock reads per sample.
    pub min_iterations: usize,
    /// Clock reads per requested output byte.
    pub iterations_per_byte: usize,
    /// Low bits of each delta kept before hashing (1..=64).
    pub delta_mask_bits: u32,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            min_iterations: 2000,
            iterations_per_byte: 200,
            delta_mask_bits: 48,
        }
    }
}

impl JitterConfig {
    /// Returns true if the mask width is usable.
    pub fn is_consistent(&self) -> bool {
        (1..=64).contains(&self.delta_mask_bits)
    }
}

/// Produces entropy-bearing bytes from clock jitter.
#[derive(Debug, Clone, Default)]
pub struct JitterSampler {
    config: JitterConfig,
}

impl JitterSampler {
    /// Creates a sampler with the given loop sizing.
    pub fn new(config: JitterConfig) -> Self {
        Self { config }
    }

    /// Number of clock reads used for an `n_bytes` sample.
    pub fn iterations_for(&self, n_bytes: usize) -> usize {
        self.config
            .min_iterations
            .max(n_bytes.saturating_mul(self.config.iterations_per_byte))
    }

    /// Samples `n_bytes` of jitter-derived output. Never fails.
    pub fn sample(&self, n_bytes: usize) -> Vec<u8> {
        let mask = match self.config.delta_mask_bits {
            bits @ 1..=63 => (1u64 << bits) - 1,
            _ => u64::MAX,
        };

        let mut hasher = Hasher::new();
        let mut last = Instant::now();
        for _ in 0..self.iterations_for(n_bytes) {
            let now = Instant::now();
            let delta = now.duration_since(last).as_nanos() as u64;
            last = now;
            hasher.update(&(delta & mask).to_be_bytes());
        }

        let mut out = vec![0u8; n_bytes];
        hasher.finalize_xof().fill(&mut out);
        out
    }
}

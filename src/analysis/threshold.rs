//! Bounds for the online health tests.
//!
//! Two tests run on the bit expansion of every raw buffer: the
//! Repetition Count Test (longest run of identical bits) and the
//! Adaptive Proportion Test (ones per fixed window).

use crate::extraction::bits;
use serde::{Deserialize, Serialize};

/// Health test bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    /// Longest tolerated run of identical bits.
    pub max_run_length: usize,
    /// Window size in bits for the proportion test.
    pub window_bits: usize,
    /// Fewest ones tolerated per window.
    pub min_ones: usize,
    /// Most ones tolerated per window.
    pub max_ones: usize,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            max_run_length: 100,
            window_bits: 1024,
            min_ones: 448, // 512 - 64
            max_ones: 576, // 512 + 64
        }
    }
}

impl HealthThresholds {
    /// Returns true if the bounds are self-consistent.
    pub fn is_consistent(&self) -> bool {
        self.max_run_length > 0
            && self.window_bits > 0
            && self.min_ones <= self.max_ones
            && self.max_ones <= self.window_bits
    }

    /// Repetition Count Test.
    ///
    /// Equal adjacent bits extend the current run. Fails if the
    /// longest run exceeds `max_run_length`.
    pub fn check_repetition(&self, raw: &[u8]) -> Result<(), HealthViolation> {
        let longest = longest_run(raw);
        if longest > self.max_run_length {
            return Err(HealthViolation::RepetitionCount {
                run: longest,
                bound: self.max_run_length,
            });
        }
        Ok(())
    }

    /// Adaptive Proportion Test.
    ///
    /// Counts ones in each complete window; trailing bits that do not
    /// fill a window are not tested. The first out-of-band window fails
    /// the test.
    pub fn check_proportion(&self, raw: &[u8]) -> Result<(), HealthViolation> {
        let mut ones = 0usize;
        let mut filled = 0usize;
        let mut window = 0usize;

        for bit in bits(raw) {
            ones += bit as usize;
            filled += 1;
            if filled == self.window_bits {
                if ones < self.min_ones || ones > self.max_ones {
                    return Err(HealthViolation::AdaptiveProportion {
                        window,
                        ones,
                        window_bits: self.window_bits,
                        min: self.min_ones,
                        max: self.max_ones,
                    });
                }
                ones = 0;
                filled = 0;
                window += 1;
            }
        }

        Ok(())
    }
}

fn longest_run(raw: &[u8]) -> usize {
    let mut stream = bits(raw);
    let Some(mut previous) = stream.next() else {
        return 0;
    };

    let mut longest = 1;
    let mut current = 1;
    for bit in stream {
        if bit == previous {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
            previous = bit;
        }
    }
    longest
}

/// Health test failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HealthViolation {
    #[error("repetition count test failed: run of {run} identical bits exceeds {bound}")]
    RepetitionCount { run: usize, bound: usize },

    #[error(
        "adaptive proportion test failed: window {window} has {ones}/{window_bits} ones, outside [{min}, {max}]"
    )]
    AdaptiveProportion {
        window: usize,
        ones: usize,
        window_bits: usize,
        min: usize,
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_consistent() {
        assert!(HealthThresholds::default().is_consistent());
    }

    #[test]
    fn test_inverted_band_inconsistent() {
        let thresholds = HealthThresholds {
            min_ones: 600,
            max_ones: 500,
            ..Default::default()
        };
        assert!(!thresholds.is_consistent());
    }

    #[test]
    fn test_all_zero_fails_repetition() {
        let thresholds = HealthThresholds::default();
        assert!(matches!(
            thresholds.check_repetition(&[0x00; 128]),
            Err(HealthViolation::RepetitionCount { run: 1024, bound: 100 })
        ));
    }

    #[test]
    fn test_run_at_bound_passes() {
        let thresholds = HealthThresholds {
            max_run_length: 16,
            ..Default::default()
        };
        // 0x00 0x00 0xFF: run of 16 zeros then 8 ones
        assert!(thresholds.check_repetition(&[0x00, 0x00, 0xFF]).is_ok());
        // 0x00 0x00 0x00: run of 24
        assert!(thresholds.check_repetition(&[0x00, 0x00, 0x00]).is_err());
    }

    #[test]
    fn test_alternating_passes_both() {
        let thresholds = HealthThresholds::default();
        let raw = [0xAA; 256];
        assert!(thresholds.check_repetition(&raw).is_ok());
        assert!(thresholds.check_proportion(&raw).is_ok());
    }

    #[test]
    fn test_balanced_long_runs_pass_proportion_fail_repetition() {
        // 64 zero bytes then 64 one bytes: exactly 512/1024 ones, run of 512
        let mut raw = vec![0x00u8; 64];
        raw.extend_from_slice(&[0xFF; 64]);

        let thresholds = HealthThresholds::default();
        assert!(thresholds.check_proportion(&raw).is_ok());
        assert!(matches!(
            thresholds.check_repetition(&raw),
            Err(HealthViolation::RepetitionCount { run: 512, .. })
        ));
    }

    #[test]
    fn test_biased_window_fails_proportion() {
        // 0xFE has 7 ones per byte: 896 ones per 1024-bit window
        let thresholds = HealthThresholds::default();
        assert!(matches!(
            thresholds.check_proportion(&[0xFE; 128]),
            Err(HealthViolation::AdaptiveProportion { window: 0, ones: 896, .. })
        ));
    }

    #[test]
    fn test_second_window_reported() {
        let mut raw = vec![0xAAu8; 128];
        raw.extend_from_slice(&[0x01; 128]);

        let thresholds = HealthThresholds::default();
        assert!(matches!(
            thresholds.check_proportion(&raw),
            Err(HealthViolation::AdaptiveProportion { window: 1, ones: 128, .. })
        ));
    }

    #[test]
    fn test_partial_window_not_tested() {
        // 127 bytes = 1016 bits, short of one window
        let thresholds = HealthThresholds::default();
        assert!(thresholds.check_proportion(&[0xFF; 127]).is_ok());
    }
}

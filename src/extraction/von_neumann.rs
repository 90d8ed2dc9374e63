//! Von Neumann debiasing.
//!
//! Reads the input as non-overlapping bit pairs. Concordant pairs
//! (`00`, `11`) are dropped; `01` emits a 0 and `10` emits a 1. If
//! consecutive pairs are independent with a fixed bias the output is
//! unbiased. That independence is not established for timing jitter,
//! so this stage is hygiene on top of the OS source, not a substitute
//! for it.

use super::bitstream::{bits, DebiasedBuffer};

/// Von Neumann extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct Debiasor;

impl Debiasor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts unbiased bits from `raw`.
    ///
    /// The output may be empty when every pair is concordant.
    pub fn extract(&self, raw: &[u8]) -> DebiasedBuffer {
        let mut out = Vec::with_capacity(raw.len() / 4);
        let mut acc = 0u8;
        let mut acc_len = 0u32;
        let mut bit_len = 0usize;

        let mut stream = bits(raw);
        while let (Some(first), Some(second)) = (stream.next(), stream.next()) {
            if first == second {
                continue;
            }
            // (0,1) -> 0, (1,0) -> 1
            acc = (acc << 1) | first;
            acc_len += 1;
            bit_len += 1;
            if acc_len == 8 {
                out.push(acc);
                acc = 0;
                acc_len = 0;
            }
        }

        if acc_len > 0 {
            out.push(acc << (8 - acc_len));
        }

        DebiasedBuffer::new(out, bit_len)
    }
}

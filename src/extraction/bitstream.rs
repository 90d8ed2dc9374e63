//! Byte buffers that flow through one collection cycle.

use zeroize::Zeroize;

/// Iterates the bits of `data`, most significant bit of each byte first.
pub fn bits(data: &[u8]) -> impl Iterator<Item = u8> + '_ {
    data.iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
}

/// Raw entropy collected from the OS source and the jitter sampler.
///
/// This is the output of the collection stage and the input to both
/// health checking and debiasing. The OS bytes come first, followed by
/// jitter bytes and, if the health check failed, supplemental OS bytes.
/// Contents are wiped on drop.
pub struct RawEntropyBuffer {
    /// Raw byte data.
    data: Vec<u8>,
    /// Whether supplemental OS bytes were appended after a failed health check.
    supplemented: bool,
}

impl RawEntropyBuffer {
    /// Creates a new buffer from collected bytes.
    pub fn new(data: Vec<u8>, supplemented: bool) -> Self {
        Self { data, supplemented }
    }

    /// Returns the raw byte data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the number of bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of bits.
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.data.len() * 8
    }

    /// Returns true if the buffer carries supplemental OS bytes.
    #[inline]
    pub fn supplemented(&self) -> bool {
        self.supplemented
    }

    /// Counts the number of set bits.
    pub fn popcount(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Calculates bit bias as deviation from 0.5.
    ///
    /// Returns a value in [-0.5, 0.5] where 0.0 is unbiased.
    pub fn bit_bias(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let ones = self.popcount() as f64;
        let total = self.bit_count() as f64;
        (ones / total) - 0.5
    }
}

impl Drop for RawEntropyBuffer {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

impl std::fmt::Debug for RawEntropyBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawEntropyBuffer")
            .field("bytes", &self.data.len())
            .field("supplemented", &self.supplemented)
            .field("bit_bias", &format!("{:.4}", self.bit_bias()))
            .finish()
    }
}

/// Output of the Von Neumann extractor.
///
/// Emitted bits are packed most significant bit first. When the bit count
/// is not a multiple of 8 the last byte holds the trailing bits in its
/// high positions and zeros below them.
pub struct DebiasedBuffer {
    data: Vec<u8>,
    bit_len: usize,
}

impl DebiasedBuffer {
    pub(crate) fn new(data: Vec<u8>, bit_len: usize) -> Self {
        debug_assert_eq!(data.len(), bit_len.div_ceil(8));
        Self { data, bit_len }
    }

    /// Returns the packed bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the number of packed bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the extractor emitted nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of emitted bits, excluding padding.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }
}

impl Drop for DebiasedBuffer {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

impl std::fmt::Debug for DebiasedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebiasedBuffer")
            .field("bytes", &self.data.len())
            .field("bit_len", &self.bit_len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_msb_first() {
        let collected: Vec<u8> = bits(&[0b1000_0001, 0b0100_0000]).collect();
        assert_eq!(
            collected,
            vec![1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_unbiased_data() {
        // Alternating bits: 0xAA = 10101010
        let raw = RawEntropyBuffer::new(vec![0xAA; 100], false);
        assert!(raw.bit_bias().abs() < 0.001);
    }

    #[test]
    fn test_all_ones_bias() {
        let raw = RawEntropyBuffer::new(vec![0xFF; 100], false);
        assert!((raw.bit_bias() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_debug_does_not_print_contents() {
        let raw = RawEntropyBuffer::new(vec![0x5A; 4], true);
        let rendered = format!("{:?}", raw);
        assert!(rendered.contains("bytes: 4"));
        assert!(!rendered.contains("90")); // 0x5A
    }
}

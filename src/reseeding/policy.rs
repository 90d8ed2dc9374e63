//! Byte-count reseed policy.

/// Tracks output since the last reseed against a fixed interval.
///
/// The counter never exceeds the interval: callers size each draw with
/// [`next_draw`](ReseedPolicy::next_draw) and reseed first whenever
/// [`must_reseed_before`](ReseedPolicy::must_reseed_before) says so.
#[derive(Debug, Clone)]
pub struct ReseedPolicy {
    interval_bytes: u64,
    bytes_generated: u64,
}

impl ReseedPolicy {
    /// Creates a policy; an interval of zero is treated as one byte.
    pub fn new(interval_bytes: u64) -> Self {
        Self {
            interval_bytes: interval_bytes.max(1),
            bytes_generated: 0,
        }
    }

    /// Largest draw to serve next, given what the caller still needs.
    ///
    /// Never larger than `chunk` or the interval.
    pub fn next_draw(&self, remaining: usize, chunk: usize) -> usize {
        let cap = usize::try_from(self.interval_bytes).unwrap_or(usize::MAX);
        remaining.min(chunk.max(1)).min(cap)
    }

    /// Returns true if a reseed must run before serving `draw` bytes.
    ///
    /// That is the case once the interval is reached, or when serving
    /// `draw` more bytes would cross it.
    pub fn must_reseed_before(&self, draw: usize) -> bool {
        self.bytes_generated >= self.interval_bytes
            || self.bytes_generated.saturating_add(draw as u64) > self.interval_bytes
    }

    /// Records `n` bytes served.
    pub fn record(&mut self, n: usize) {
        self.bytes_generated += n as u64;
        debug_assert!(self.bytes_generated <= self.interval_bytes);
    }

    /// Resets the counter after a reseed.
    pub fn reset(&mut self) {
        self.bytes_generated = 0;
    }

    /// Bytes served since the last reseed.
    pub fn bytes_generated(&self) -> u64 {
        self.bytes_generated
    }

    /// The configured interval.
    pub fn interval_bytes(&self) -> u64 {
        self.interval_bytes
    }
}

//! Raw entropy collection.
//!
//! An [`OsEntropySource`] abstracts the operating-system CSPRNG so tests
//! can substitute a deterministic or failing source. [`EntropySource`]
//! combines it with the jitter sampler and gates the result through the
//! health monitor.

use super::jitter::JitterSampler;
use crate::analysis::{HealthMonitor, HealthStats};
use crate::extraction::RawEntropyBuffer;
use rand_core::{OsRng, RngCore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Errors from the OS entropy source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("OS entropy source unavailable: {0}")]
    Unavailable(String),
}

/// Trait for operating-system entropy sources.
///
/// Implementations must fill the whole buffer or fail.
pub trait OsEntropySource: Send {
    /// Fills `dest` with cryptographically secure bytes.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), SourceError>;
}

/// The system CSPRNG via `getrandom`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropy;

impl OsEntropySource for SystemEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), SourceError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| SourceError::Unavailable(e.to_string()))
    }
}

/// Deterministic source for testing.
///
/// Emits a BLAKE3 keystream over a read counter, or a constant byte, and
/// can be told to fail after a number of reads. NOT for entropy.
#[derive(Debug, Clone)]
pub struct MockOsSource {
    pattern: MockPattern,
    fail_after: Option<u64>,
    reads: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy)]
enum MockPattern {
    Stream,
    Constant(u8),
}

impl MockOsSource {
    /// Creates a source emitting a deterministic, well-mixed stream.
    pub fn new() -> Self {
        Self {
            pattern: MockPattern::Stream,
            fail_after: None,
            reads: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a source that emits `byte` forever.
    pub fn constant(byte: u8) -> Self {
        Self {
            pattern: MockPattern::Constant(byte),
            ..Self::new()
        }
    }

    /// Fails every read after the first `reads` succeed.
    pub fn fail_after(mut self, reads: u64) -> Self {
        self.fail_after = Some(reads);
        self
    }

    /// Returns a handle to the successful-read counter.
    ///
    /// The handle stays live after the source is moved into a generator.
    pub fn read_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.reads)
    }
}

impl Default for MockOsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl OsEntropySource for MockOsSource {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), SourceError> {
        let reads = self.reads.load(Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| reads >= limit) {
            return Err(SourceError::Unavailable(format!(
                "mock source exhausted after {} reads",
                reads
            )));
        }

        match self.pattern {
            MockPattern::Stream => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(b"mock-os-source");
                hasher.update(&reads.to_le_bytes());
                hasher.finalize_xof().fill(dest);
            }
            MockPattern::Constant(byte) => dest.fill(byte),
        }

        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Collects raw entropy from the OS source and the jitter sampler.
pub struct EntropySource {
    os: Box<dyn OsEntropySource>,
    jitter: JitterSampler,
    health: HealthMonitor,
    supplemented: u64,
}

impl EntropySource {
    /// Creates a collector over the given sources.
    pub fn new(os: Box<dyn OsEntropySource>, jitter: JitterSampler, health: HealthMonitor) -> Self {
        Self {
            os,
            jitter,
            health,
            supplemented: 0,
        }
    }

    /// Collects `target_bytes` from the OS followed by `target_bytes` of jitter.
    ///
    /// If the health check fails, one extra `target_bytes` OS draw is
    /// appended and collection proceeds. Only an OS read failure is an
    /// error.
    pub fn collect(&mut self, target_bytes: usize) -> Result<RawEntropyBuffer, SourceError> {
        let mut data = vec![0u8; target_bytes];
        self.os.fill(&mut data)?;
        data.extend_from_slice(&self.jitter.sample(target_bytes));

        let result = self.health.check(&data);
        let supplemented = !result.passed();
        if supplemented {
            let mut extra = vec![0u8; target_bytes];
            self.os.fill(&mut extra)?;
            data.extend_from_slice(&extra);
            self.supplemented += 1;

            tracing::warn!(
                extra_bytes = target_bytes,
                diagnostic = %result.diagnostic(),
                "Supplemented raw entropy with additional OS bytes"
            );
        }

        tracing::debug!(bytes = data.len(), supplemented, "Collected raw entropy");

        Ok(RawEntropyBuffer::new(data, supplemented))
    }

    /// Returns the health monitor's counters.
    pub fn health_stats(&self) -> &HealthStats {
        self.health.stats()
    }

    /// Returns how many collections were supplemented.
    pub fn supplemented_count(&self) -> u64 {
        self.supplemented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::JitterConfig;

    fn fast_jitter() -> JitterSampler {
        JitterSampler::new(JitterConfig {
            min_iterations: 100,
            iterations_per_byte: 4,
            ..Default::default()
        })
    }

    #[test]
    fn test_system_entropy_fills() {
        let mut buf = [0u8; 64];
        SystemEntropy.fill(&mut buf).unwrap();
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_mock_stream_is_deterministic() {
        let mut a = MockOsSource::new();
        let mut b = MockOsSource::new();
        let (mut x, mut y) = ([0u8; 32], [0u8; 32]);

        a.fill(&mut x).unwrap();
        b.fill(&mut y).unwrap();
        assert_eq!(x, y);

        a.fill(&mut x).unwrap();
        assert_ne!(x, y);
        assert_eq!(a.read_counter().load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_mock_fail_after() {
        let mut source = MockOsSource::new().fail_after(1);
        let mut buf = [0u8; 8];

        assert!(source.fill(&mut buf).is_ok());
        assert!(matches!(
            source.fill(&mut buf),
            Err(SourceError::Unavailable(_))
        ));
    }

    #[test]
    fn test_collect_concatenates_both_sources() {
        let mut source = EntropySource::new(
            Box::new(MockOsSource::new()),
            fast_jitter(),
            HealthMonitor::default(),
        );

        let raw = source.collect(64).unwrap();
        assert_eq!(raw.len(), 128);
        assert!(!raw.supplemented());
        assert_eq!(source.health_stats().total_checks, 1);
    }

    #[test]
    fn test_collect_starts_with_os_bytes() {
        let mut source = EntropySource::new(
            Box::new(MockOsSource::constant(0x5A)),
            fast_jitter(),
            HealthMonitor::default(),
        );

        let raw = source.collect(16).unwrap();
        assert_eq!(&raw.data()[..16], &[0x5A; 16]);
    }

    #[test]
    fn test_failed_health_check_supplements_once() {
        let os = MockOsSource::constant(0x00);
        let reads = os.read_counter();
        let mut source = EntropySource::new(Box::new(os), fast_jitter(), HealthMonitor::default());

        let raw = source.collect(64).unwrap();

        // 64 OS + 64 jitter + 64 supplemental
        assert_eq!(raw.len(), 192);
        assert!(raw.supplemented());
        assert_eq!(reads.load(Ordering::SeqCst), 2);
        assert_eq!(source.supplemented_count(), 1);
        assert_eq!(source.health_stats().total_failures, 1);
    }

    #[test]
    fn test_os_failure_surfaces() {
        let mut source = EntropySource::new(
            Box::new(MockOsSource::new().fail_after(0)),
            fast_jitter(),
            HealthMonitor::default(),
        );
        assert!(source.collect(64).is_err());
    }
}

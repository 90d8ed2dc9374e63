//! Seed derivation via cryptographic hashing.
//!
//! A first hash normalizes the collected material to 32 bytes. A second
//! hash binds that digest to a freshness tag (wall-clock nanoseconds and
//! the generator's cumulative output count), so seeds taken at different
//! points differ even if the material repeats.

use crate::extraction::{DebiasedBuffer, RawEntropyBuffer};
use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Sha3_256};
use zeroize::Zeroize;

/// Seed size in bytes.
pub const SEED_LEN: usize = 32;

/// Supported hash algorithms for seed derivation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA3-256 - default.
    #[default]
    Sha3_256,
    /// SHA-256 - widely deployed, conservative choice.
    Sha256,
    /// BLAKE3 - fast.
    Blake3,
}

impl HashAlgorithm {
    fn digest(self, parts: &[&[u8]]) -> [u8; SEED_LEN] {
        match self {
            HashAlgorithm::Sha3_256 => fixed_digest::<Sha3_256>(parts),
            HashAlgorithm::Sha256 => fixed_digest::<Sha256>(parts),
            HashAlgorithm::Blake3 => {
                let mut hasher = Blake3Hasher::new();
                for part in parts {
                    hasher.update(part);
                }
                *hasher.finalize().as_bytes()
            }
        }
    }
}

fn fixed_digest<D: Digest>(parts: &[&[u8]]) -> [u8; SEED_LEN] {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; SEED_LEN];
    out.copy_from_slice(&hasher.finalize()[..SEED_LEN]);
    out
}

/// Which buffer a seed was hashed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMaterial {
    /// The Von Neumann output.
    Debiased,
    /// The raw buffer, because extraction emitted nothing.
    RawFallback,
}

/// A 256-bit seed, used once to initialize or reseed the DRBG.
///
/// Bytes are wiped on drop and never printed.
pub struct Seed {
    data: [u8; SEED_LEN],
    material: SeedMaterial,
}

impl Seed {
    /// Returns the seed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.data
    }

    /// Returns which buffer the seed came from.
    #[inline]
    pub fn material(&self) -> SeedMaterial {
        self.material
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seed")
            .field("material", &self.material)
            .finish_non_exhaustive()
    }
}

/// Derives fixed-size seeds from collected material.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedDeriver {
    algorithm: HashAlgorithm,
}

impl SeedDeriver {
    /// Creates a deriver with the specified algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Returns the configured algorithm.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hashes the debiased buffer, or the raw buffer if extraction
    /// emitted nothing, into a seed.
    pub fn derive_from(
        &self,
        debiased: &DebiasedBuffer,
        raw: &RawEntropyBuffer,
        generated_so_far: u64,
    ) -> Seed {
        if debiased.is_empty() {
            tracing::debug!(
                raw_bytes = raw.len(),
                "Extraction yielded nothing, deriving seed from raw buffer"
            );
            let mut seed = self.derive(raw.data(), generated_so_far);
            seed.material = SeedMaterial::RawFallback;
            seed
        } else {
            self.derive(debiased.data(), generated_so_far)
        }
    }

    /// Derives a seed from `material` tagged with the current time and
    /// `generated_so_far`.
    pub fn derive(&self, material: &[u8], generated_so_far: u64) -> Seed {
        let timestamp_ns = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default() as u64;
        self.derive_at(material, timestamp_ns, generated_so_far)
    }

    /// Derives a seed with an explicit timestamp.
    pub(crate) fn derive_at(&self, material: &[u8], timestamp_ns: u64, generated_so_far: u64) -> Seed {
        let mut normalized = self.algorithm.digest(&[material]);

        let mut tag = [0u8; 16];
        tag[..8].copy_from_slice(&timestamp_ns.to_be_bytes());
        tag[8..].copy_from_slice(&generated_so_far.to_be_bytes());

        let data = self
            .algorithm
            .digest(&[normalized.as_slice(), tag.as_slice()]);
        normalized.zeroize();

        Seed {
            data,
            material: SeedMaterial::Debiased,
        }
    }
}

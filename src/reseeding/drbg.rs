//! HMAC-SHA-256 deterministic random bit generator.
//!
//! Follows the NIST SP 800-90A HMAC_DRBG update construction:
//!
//! ```text
//! K = HMAC(K, V || 0x00 || data);  V = HMAC(K, V)
//! if data non-empty:
//!     K = HMAC(K, V || 0x01 || data);  V = HMAC(K, V)
//! ```
//!
//! Output blocks are `V = HMAC(K, V)`; every generate call ends with an
//! update so the state that produced the output is not recoverable from
//! later state (backtracking resistance).
//!
//! Construction and seeding are one step, so an unseeded generator
//! cannot exist.

use hmac::digest::Key;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// Size of `K`, `V`, and each output block.
pub const OUTLEN: usize = 32;

/// Errors from DRBG construction or reseeding.
#[derive(Debug, Error)]
pub enum DrbgError {
    #[error("seed material is empty")]
    EmptySeedMaterial,
}

/// HMAC-DRBG state.
///
/// `K` and `V` never leave this type. They are wiped on drop and
/// redacted from `Debug`.
pub struct HmacDrbg {
    k: [u8; OUTLEN],
    v: [u8; OUTLEN],
}

impl HmacDrbg {
    /// Instantiates from seed material.
    ///
    /// `K` starts all-zero and `V` all-one before the material is
    /// mixed in. Empty material is rejected.
    pub fn new(seed_material: &[u8]) -> Result<Self, DrbgError> {
        if seed_material.is_empty() {
            return Err(DrbgError::EmptySeedMaterial);
        }

        let mut drbg = Self {
            k: [0x00; OUTLEN],
            v: [0x01; OUTLEN],
        };
        drbg.update(seed_material);
        Ok(drbg)
    }

    /// Mixes `provided_data` into the state.
    pub fn update(&mut self, provided_data: &[u8]) {
        self.k = hmac_sha256(&self.k, &[self.v.as_slice(), &[0x00], provided_data]);
        self.v = hmac_sha256(&self.k, &[self.v.as_slice()]);

        if !provided_data.is_empty() {
            self.k = hmac_sha256(&self.k, &[self.v.as_slice(), &[0x01], provided_data]);
            self.v = hmac_sha256(&self.k, &[self.v.as_slice()]);
        }
    }

    /// Mixes fresh seed material into the existing state.
    pub fn reseed(&mut self, seed_material: &[u8]) -> Result<(), DrbgError> {
        if seed_material.is_empty() {
            return Err(DrbgError::EmptySeedMaterial);
        }
        self.update(seed_material);
        Ok(())
    }

    /// Generates `n_bytes` of output.
    pub fn generate(&mut self, n_bytes: usize) -> Vec<u8> {
        let mut out = vec![0u8; n_bytes];
        self.fill(&mut out);
        out
    }

    /// Fills `dest` with output, truncating the final block.
    pub fn fill(&mut self, dest: &mut [u8]) {
        self.fill_blocks(dest);
        self.update(&[]);
    }

    /// Generates with caller-supplied additional input.
    ///
    /// Non-empty input is mixed in before generation and again in the
    /// closing update. With empty input this is identical to [`fill`].
    ///
    /// [`fill`]: HmacDrbg::fill
    pub fn fill_with_additional_input(&mut self, dest: &mut [u8], additional: &[u8]) {
        if !additional.is_empty() {
            self.update(additional);
        }
        self.fill_blocks(dest);
        self.update(additional);
    }

    fn fill_blocks(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(OUTLEN) {
            self.v = hmac_sha256(&self.k, &[self.v.as_slice()]);
            chunk.copy_from_slice(&self.v[..chunk.len()]);
        }
    }
}

fn hmac_sha256(key: &[u8; OUTLEN], parts: &[&[u8]]) -> [u8; OUTLEN] {
    // HMAC zero-pads keys shorter than the hash block size.
    let mut padded = Key::<HmacSha256>::default();
    padded[..OUTLEN].copy_from_slice(key);

    let mut mac = <HmacSha256 as Mac>::new(&padded);
    for part in parts {
        mac.update(part);
    }
    padded.as_mut_slice().zeroize();

    let mut out = [0u8; OUTLEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

impl Drop for HmacDrbg {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

impl std::fmt::Debug for HmacDrbg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacDrbg").finish_non_exhaustive()
    }
}

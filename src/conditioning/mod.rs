//! Seed derivation.
//!
//! This module hashes debiased (or, as a fallback, raw) entropy together
//! with a freshness tag into the fixed-size seed that initializes or
//! reseeds the DRBG.

mod hash;

pub use hash::{HashAlgorithm, Seed, SeedDeriver, SeedMaterial, SEED_LEN};

//! Deterministic expansion and reseed timing.
//!
//! This module provides the HMAC-DRBG that expands a seed into output,
//! and the byte-count policy that decides when fresh entropy must be
//! mixed back in.

mod drbg;
mod policy;

pub use drbg::{DrbgError, HmacDrbg, OUTLEN};
pub use policy::ReseedPolicy;

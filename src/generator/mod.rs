//! Public generator facade.
//!
//! This module wires entropy collection, health checks, debiasing and
//! seed derivation to the HMAC-DRBG and exposes the result as a single
//! thread-safe value owned by its caller.

mod facade;

pub use facade::{GeneratorError, GeneratorStats, VqrTurnRng};

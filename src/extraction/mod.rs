//! Bit-level buffers and debiasing.
//!
//! This module holds the byte buffers that live for one collection
//! cycle and the Von Neumann extractor that turns a raw, possibly
//! biased buffer into a shorter unbiased one.

mod bitstream;
mod von_neumann;

pub use bitstream::{bits, DebiasedBuffer, RawEntropyBuffer};
pub use von_neumann::Debiasor;

//! Entropy harvesting.
//!
//! This module gathers raw material from two independent sources: the
//! operating-system CSPRNG (the primary guarantee) and CPU timing jitter
//! (defense in depth). Neither output is used directly; it is health
//! checked, debiased, and hashed into a seed downstream.

mod jitter;
mod source;

pub use jitter::{JitterConfig, JitterSampler};
pub use source::{EntropySource, MockOsSource, OsEntropySource, SourceError, SystemEntropy};

//! Permission classification.
//!
//! Collapses a user's loosely-shaped permission entries into a fixed set
//! of capability flags for one target module. Classification is a single
//! pass, a monotonic OR across all matching entries: once a flag is set it
//! stays set, and entry order never matters.

mod classifier;
#[cfg(test)]
mod classifier_proptest;

pub use classifier::{classify, Capabilities};

//! Core traits for changepoint detection
//!
//! Every detector exposes the same capability: consume a [`Signal`] and
//! produce an ordered, sentinel-terminated breakpoint list. Configuration
//! lives in per-detector parameter structs rather than in trait methods, so
//! a detector is fully specified at construction time.

use rateshift_core::{Breakpoints, Result, Signal};

/// Properties of a detector that don't depend on the input signal
pub trait DetectorProperties {
    /// Name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Minimum number of observations for a meaningful detection. Signals
    /// below this size yield a sentinel-only result (or, for the sliding
    /// window detector, an error, since its comparison windows must fit).
    fn minimum_sample_size(&self) -> usize;
}

/// Core trait for changepoint detection
pub trait Detector: DetectorProperties {
    /// Detect changepoints in the given signal.
    ///
    /// The returned list is strictly increasing, bounded by the signal
    /// length N, and terminated with the sentinel index N.
    fn detect(&self, signal: &Signal) -> Result<Breakpoints>;
}

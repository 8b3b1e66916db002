//! The observation sequence consumed by every analysis stage
//!
//! A [`Signal`] is a time-ordered sequence of (x, y) pairs, where x is time
//! (or RTT-normalized time) and y is cumulative bytes acknowledged. The two
//! columns always have equal length and x is non-decreasing; both properties
//! are enforced at construction so downstream code never has to re-check
//! them. A constructed signal is immutable.

use crate::error::{Error, Result};
use crate::trace;

/// A validated two-column observation sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Signal {
    /// Create a signal from its two columns.
    ///
    /// Fails with [`Error::InvalidInput`] when the columns differ in length,
    /// are empty, contain non-finite values, or when x decreases anywhere.
    /// Precondition violations are fatal rather than silently degraded.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::size_mismatch(xs.len(), ys.len(), "signal columns"));
        }
        if xs.is_empty() {
            return Err(Error::empty_input());
        }
        if xs.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidInput(
                "x values contain NaN or infinite entries".to_string(),
            ));
        }
        if ys.iter().any(|y| !y.is_finite()) {
            return Err(Error::InvalidInput(
                "y values contain NaN or infinite entries".to_string(),
            ));
        }
        if xs.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::InvalidInput(
                "x values must be non-decreasing".to_string(),
            ));
        }
        Ok(Self { xs, ys })
    }

    /// Build a signal from raw trace material: per-event timestamps, a
    /// measured round-trip time, and per-event acked byte counts.
    ///
    /// Timestamps are normalized to RTT units and the byte counts are
    /// accumulated, producing the (RTT, cumulative bytes) form the
    /// detectors operate on.
    pub fn from_trace(times: &[f64], rtt: f64, acked: &[f64]) -> Result<Self> {
        let rtts = trace::normalize_by_rtt(times, rtt)?;
        let cum = trace::cumulative(acked);
        Self::new(rtts, cum)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// A signal is never empty; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// The x column (time or RTT-normalized time).
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// The y column (cumulative bytes acknowledged).
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// x value at index `i`.
    pub fn x(&self, i: usize) -> f64 {
        self.xs[i]
    }

    /// y value at index `i`.
    pub fn y(&self, i: usize) -> f64 {
        self.ys[i]
    }
}

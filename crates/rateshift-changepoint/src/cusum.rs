//! CUSUM (Cumulative Sum) changepoint detection
//!
//! The one fully custom sequential detector: it walks the y column once,
//! accumulating normalized deviations from the whole-series mean in twin
//! statistics (one for upward shifts, one for downward). Whenever either
//! statistic exceeds the threshold, the current index is recorded as a
//! breakpoint and both accumulators reset.
//!
//! `drift` desensitizes the accumulators to slow wander and has no default:
//! call sites in prior art disagreed on its value, so it must be chosen
//! explicitly. Raw CUSUM output tends to double-report a single regime
//! change; the dispatch layer runs it through
//! [`crate::postprocess::suppress_weak_breakpoints`].

use crate::traits::{Detector, DetectorProperties};
use rateshift_core::{Breakpoints, Error, Result, Signal};

/// Default detection threshold.
pub const DEFAULT_THRESHOLD: f64 = 28.0;

/// CUSUM parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CusumParameters {
    /// Detection threshold on the accumulated normalized deviation.
    pub threshold: f64,
    /// Per-step desensitization subtracted from each deviation. Required;
    /// no default is provided.
    pub drift: f64,
}

/// CUSUM changepoint detector
#[derive(Debug, Clone)]
pub struct CusumDetector {
    params: CusumParameters,
}

impl CusumDetector {
    /// Create a new CUSUM detector. Both sensitivity parameters are
    /// explicit.
    pub fn new(threshold: f64, drift: f64) -> Self {
        Self {
            params: CusumParameters { threshold, drift },
        }
    }

    /// Create with the default threshold and an explicit drift.
    pub fn with_default_threshold(drift: f64) -> Self {
        Self::new(DEFAULT_THRESHOLD, drift)
    }

    pub fn parameters(&self) -> &CusumParameters {
        &self.params
    }

    /// Twin accumulator pass over the normalized series. Returns the raw
    /// breakpoint indices, without the sentinel.
    fn scan(&self, normalized: &[f64]) -> Vec<usize> {
        let mut breakpoints = Vec::new();
        let mut s_pos = 0.0f64;
        let mut s_neg = 0.0f64;

        for (i, &z) in normalized.iter().enumerate().skip(1) {
            s_pos = (s_pos + z - self.params.drift).max(0.0);
            s_neg = (s_neg - z - self.params.drift).max(0.0);

            if s_pos > self.params.threshold || s_neg > self.params.threshold {
                breakpoints.push(i);
                s_pos = 0.0;
                s_neg = 0.0;
            }
        }

        breakpoints
    }
}

impl DetectorProperties for CusumDetector {
    fn algorithm_name(&self) -> &'static str {
        "CUSUM"
    }

    fn minimum_sample_size(&self) -> usize {
        2
    }
}

impl Detector for CusumDetector {
    fn detect(&self, signal: &Signal) -> Result<Breakpoints> {
        if !self.params.threshold.is_finite() || self.params.threshold <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "CUSUM threshold must be positive and finite, got {}",
                self.params.threshold
            )));
        }
        if !self.params.drift.is_finite() || self.params.drift < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "CUSUM drift must be non-negative and finite, got {}",
                self.params.drift
            )));
        }

        let n = signal.len();
        let ys = signal.ys();

        // Whole-series normalization, computed once up front.
        let mean = ys.iter().sum::<f64>() / n as f64;
        let var = ys.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / n as f64;
        let std = var.sqrt();

        // A zero-variance series has no regimes to separate; the
        // normalization is undefined, so only the sentinel is returned.
        if std == 0.0 {
            return Ok(Breakpoints::new(vec![n]));
        }

        let normalized: Vec<f64> = ys.iter().map(|y| (y - mean) / std).collect();
        let mut bkps = self.scan(&normalized);
        bkps.push(n);
        Ok(Breakpoints::new(bkps))
    }
}

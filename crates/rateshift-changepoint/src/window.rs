//! Sliding-window changepoint detection
//!
//! Scores every candidate index with the discrepancy between the
//! fixed-width windows immediately left and right of it: the L2 cost of the
//! joined window minus the costs of the two halves. Peaks in that score,
//! taken greedily from the strongest down while they exceed the stopping
//! penalty `ln(N) * dims * sigma^2`, become breakpoints. Accepted peaks
//! suppress weaker candidates within one window width.

use crate::cost::{split_penalty, L2Cost};
use crate::traits::{Detector, DetectorProperties};
use rateshift_core::{Breakpoints, Error, Result, Signal};

/// Default comparison half-window size.
pub const DEFAULT_WIDTH: usize = 3;

/// Default noise-scale parameter for the stopping criterion.
pub const DEFAULT_SIGMA: f64 = 3.0;

/// Sliding-window parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WindowParameters {
    /// Half-window size: each candidate is scored from `width` samples on
    /// either side.
    pub width: usize,
    /// Noise scale; the stopping penalty grows with sigma squared.
    pub sigma: f64,
}

impl Default for WindowParameters {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            sigma: DEFAULT_SIGMA,
        }
    }
}

/// Sliding-window detector
#[derive(Debug, Clone, Default)]
pub struct WindowDetector {
    params: WindowParameters,
}

impl WindowDetector {
    pub fn new(width: usize, sigma: f64) -> Self {
        Self {
            params: WindowParameters { width, sigma },
        }
    }

    pub fn parameters(&self) -> &WindowParameters {
        &self.params
    }
}

impl DetectorProperties for WindowDetector {
    fn algorithm_name(&self) -> &'static str {
        "WINDOW"
    }

    fn minimum_sample_size(&self) -> usize {
        2 * self.params.width
    }
}

impl Detector for WindowDetector {
    fn detect(&self, signal: &Signal) -> Result<Breakpoints> {
        if self.params.width < 1 {
            return Err(Error::InvalidParameter(
                "window width must be at least 1".to_string(),
            ));
        }
        if !self.params.sigma.is_finite() || self.params.sigma <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "window sigma must be positive and finite, got {}",
                self.params.sigma
            )));
        }

        let n = signal.len();
        let width = self.params.width;
        if n < self.minimum_sample_size() {
            // The comparison windows must fit; parameter search relies on
            // this being an error it can skip.
            return Err(Error::InsufficientData {
                expected: self.minimum_sample_size(),
                actual: n,
            });
        }

        let cost = L2Cost::new(signal);
        let penalty = split_penalty(n, self.params.sigma);

        // Discrepancy score per candidate index.
        let mut scored: Vec<(usize, f64)> = (width..=n - width)
            .map(|t| {
                let gain =
                    cost.cost(t - width, t + width) - cost.cost(t - width, t) - cost.cost(t, t + width);
                (t, gain)
            })
            .collect();

        // Strongest peaks first; ties resolved towards the earlier index so
        // detection order is deterministic.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let mut accepted: Vec<usize> = Vec::new();
        for (t, gain) in scored {
            if gain <= penalty {
                break;
            }
            if accepted.iter().any(|&a| t.abs_diff(a) < width) {
                continue;
            }
            accepted.push(t);
        }

        accepted.sort_unstable();
        accepted.push(n);
        Ok(Breakpoints::new(accepted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rateshift_core::Signal;

    fn stepped_signal() -> Signal {
        let xs: Vec<f64> = (0..60).map(|i| i as f64 * 0.1).collect();
        let ys: Vec<f64> = (0..60)
            .map(|i| if i < 30 { 50.0 } else { 800.0 })
            .collect();
        Signal::new(xs, ys).unwrap()
    }

    #[test]
    fn test_peak_at_mean_shift() {
        let detector = WindowDetector::new(3, 3.0);
        let bkps = detector.detect(&stepped_signal()).unwrap();

        bkps.validate(60).unwrap();
        assert!(
            bkps.interior(60).contains(&30),
            "expected peak at 30, got {bkps}"
        );
    }

    #[test]
    fn test_window_larger_than_signal_is_an_error() {
        let signal = Signal::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();
        let detector = WindowDetector::new(40, 3.0);
        assert!(matches!(
            detector.detect(&signal),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_flat_signal_has_no_peaks() {
        let xs: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let ys = vec![7.0; 40];
        let signal = Signal::new(xs, ys).unwrap();
        let bkps = WindowDetector::default().detect(&signal).unwrap();
        assert_eq!(bkps.as_slice(), &[40]);
    }

    #[test]
    fn test_rejects_bad_sigma() {
        let signal = stepped_signal();
        assert!(WindowDetector::new(3, 0.0).detect(&signal).is_err());
        assert!(WindowDetector::new(3, f64::NAN).detect(&signal).is_err());
    }
}

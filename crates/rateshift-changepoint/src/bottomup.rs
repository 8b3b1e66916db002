//! Bottom-up segmentation changepoint detection
//!
//! The dual of binary segmentation: start from the finest admissible
//! partition and repeatedly merge the adjacent pair whose merge increases
//! total L2 cost the least, until the cheapest merge would cost more than
//! the stopping penalty `ln(N) * dims * sigma^2`. Boundaries that survive
//! the merging are the breakpoints.

use crate::cost::{split_penalty, L2Cost};
use crate::traits::{Detector, DetectorProperties};
use rateshift_core::{Breakpoints, Error, Result, Signal};

/// Default noise-scale parameter for the stopping criterion.
pub const DEFAULT_SIGMA: f64 = 10.0;

/// Size of the initial fine-grained segments.
const INITIAL_GRAIN: usize = 2;

/// Bottom-up segmentation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BottomUpParameters {
    /// Noise scale; the stopping penalty grows with sigma squared.
    pub sigma: f64,
}

impl Default for BottomUpParameters {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
        }
    }
}

/// Bottom-up merge detector
#[derive(Debug, Clone, Default)]
pub struct BottomUpDetector {
    params: BottomUpParameters,
}

impl BottomUpDetector {
    pub fn new(sigma: f64) -> Self {
        Self {
            params: BottomUpParameters { sigma },
        }
    }

    pub fn parameters(&self) -> &BottomUpParameters {
        &self.params
    }
}

impl DetectorProperties for BottomUpDetector {
    fn algorithm_name(&self) -> &'static str {
        "BOTTOMUP"
    }

    fn minimum_sample_size(&self) -> usize {
        2 * INITIAL_GRAIN
    }
}

impl Detector for BottomUpDetector {
    fn detect(&self, signal: &Signal) -> Result<Breakpoints> {
        if !self.params.sigma.is_finite() || self.params.sigma <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "bottom-up sigma must be positive and finite, got {}",
                self.params.sigma
            )));
        }

        let n = signal.len();
        let cost = L2Cost::new(signal);
        let penalty = split_penalty(n, self.params.sigma);

        // Finest partition: boundaries every INITIAL_GRAIN samples.
        let mut bounds: Vec<usize> = (0..=n).step_by(INITIAL_GRAIN).collect();
        if *bounds.last().unwrap() != n {
            bounds.push(n);
        }

        // bounds[0] == 0 and bounds.last() == n are fixed; interior
        // boundaries are merge candidates.
        while bounds.len() > 2 {
            let mut cheapest: Option<(usize, f64)> = None; // (boundary idx, cost increase)
            for i in 1..bounds.len() - 1 {
                let (left, mid, right) = (bounds[i - 1], bounds[i], bounds[i + 1]);
                let delta =
                    cost.cost(left, right) - cost.cost(left, mid) - cost.cost(mid, right);
                if cheapest.map_or(true, |(_, d)| delta < d) {
                    cheapest = Some((i, delta));
                }
            }

            match cheapest {
                Some((i, delta)) if delta < penalty => {
                    bounds.remove(i);
                }
                _ => break,
            }
        }

        // Interior boundaries plus the sentinel.
        let bkps: Vec<usize> = bounds.into_iter().skip(1).collect();
        Ok(Breakpoints::new(bkps))
    }
}

//! Binary segmentation changepoint detection
//!
//! Greedy recursive splitting: at each step the single split that most
//! reduces total L2 cost across all current segments is applied, until the
//! best remaining cost reduction no longer exceeds the stopping penalty
//! `ln(N) * dims * sigma^2`.

use crate::cost::{split_penalty, L2Cost};
use crate::traits::{Detector, DetectorProperties};
use rateshift_core::{Breakpoints, Error, Result, Signal};

/// Default noise-scale parameter for the stopping criterion.
pub const DEFAULT_SIGMA: f64 = 10.0;

/// Smallest segment either side of a split.
const MIN_SEGMENT: usize = 2;

/// Binary segmentation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BinsegParameters {
    /// Noise scale; the stopping penalty grows with sigma squared.
    pub sigma: f64,
}

impl Default for BinsegParameters {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
        }
    }
}

/// Binary segmentation detector
#[derive(Debug, Clone, Default)]
pub struct BinsegDetector {
    params: BinsegParameters,
}

impl BinsegDetector {
    pub fn new(sigma: f64) -> Self {
        Self {
            params: BinsegParameters { sigma },
        }
    }

    pub fn parameters(&self) -> &BinsegParameters {
        &self.params
    }
}

/// Best split of `[start, end)` and the cost reduction it yields.
fn best_split(
    cost: &L2Cost,
    start: usize,
    end: usize,
    min_segment: usize,
) -> Option<(usize, f64)> {
    if end - start < 2 * min_segment {
        return None;
    }
    let whole = cost.cost(start, end);
    let mut best: Option<(usize, f64)> = None;
    for split in (start + min_segment)..=(end - min_segment) {
        let gain = whole - cost.cost(start, split) - cost.cost(split, end);
        if best.map_or(true, |(_, g)| gain > g) {
            best = Some((split, gain));
        }
    }
    best
}

impl DetectorProperties for BinsegDetector {
    fn algorithm_name(&self) -> &'static str {
        "BINSEG"
    }

    fn minimum_sample_size(&self) -> usize {
        2 * MIN_SEGMENT
    }
}

impl Detector for BinsegDetector {
    fn detect(&self, signal: &Signal) -> Result<Breakpoints> {
        if !self.params.sigma.is_finite() || self.params.sigma <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "binseg sigma must be positive and finite, got {}",
                self.params.sigma
            )));
        }

        let n = signal.len();
        let cost = L2Cost::new(signal);
        let penalty = split_penalty(n, self.params.sigma);

        let mut segments: Vec<(usize, usize)> = vec![(0, n)];
        let mut splits: Vec<usize> = Vec::new();

        // One split can be applied per interior position at most.
        while splits.len() < n {
            let mut best: Option<(usize, usize, f64)> = None; // (segment idx, split, gain)
            for (i, &(start, end)) in segments.iter().enumerate() {
                if let Some((split, gain)) = best_split(&cost, start, end, MIN_SEGMENT) {
                    if best.map_or(true, |(_, _, g)| gain > g) {
                        best = Some((i, split, gain));
                    }
                }
            }

            match best {
                Some((i, split, gain)) if gain > penalty => {
                    let (start, end) = segments[i];
                    segments[i] = (start, split);
                    segments.push((split, end));
                    splits.push(split);
                }
                _ => break,
            }
        }

        splits.sort_unstable();
        splits.push(n);
        Ok(Breakpoints::new(splits))
    }
}

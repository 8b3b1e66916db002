//! PELT (Pruned Exact Linear Time) changepoint detection
//!
//! Exact optimal partitioning of the signal into segments minimizing
//! L2 cost plus a per-segment penalty, after Killick, Fearnhead & Eckley
//! (2012). Candidate positions are pruned as the dynamic program advances,
//! giving expected linear runtime for a bounded number of changepoints.
//!
//! The penalty has no safe default: the algorithm is highly
//! penalty-sensitive, so callers must supply it. `min_size` defaults per
//! signal to clamp(N/10, 5, 20) and `jump` (the candidate stride) to 5.

use crate::cost::L2Cost;
use crate::traits::{Detector, DetectorProperties};
use rateshift_core::{Breakpoints, Error, Result, Signal};

/// Default candidate-boundary stride.
pub const DEFAULT_JUMP: usize = 5;

/// Default minimum segment length for a signal of `n` observations.
pub fn default_min_size(n: usize) -> usize {
    (n / 10).clamp(5, 20)
}

/// PELT parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PeltParameters {
    /// Cost added per segment; larger means fewer breakpoints. Required.
    pub penalty: f64,
    /// Minimum samples per segment. `None` resolves to
    /// [`default_min_size`] of the signal being analyzed.
    pub min_size: Option<usize>,
    /// Stride for candidate boundary evaluation; 1 is exact, larger values
    /// subsample candidates for speed.
    pub jump: usize,
}

impl PeltParameters {
    pub fn new(penalty: f64) -> Self {
        Self {
            penalty,
            min_size: None,
            jump: DEFAULT_JUMP,
        }
    }
}

/// PELT changepoint detector
#[derive(Debug, Clone)]
pub struct PeltDetector {
    params: PeltParameters,
}

impl PeltDetector {
    /// Create a detector with the given penalty and default
    /// `min_size`/`jump`.
    pub fn new(penalty: f64) -> Self {
        Self {
            params: PeltParameters::new(penalty),
        }
    }

    /// Create with full parameters.
    pub fn with_params(params: PeltParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &PeltParameters {
        &self.params
    }
}

impl DetectorProperties for PeltDetector {
    fn algorithm_name(&self) -> &'static str {
        "PELT"
    }

    fn minimum_sample_size(&self) -> usize {
        1
    }
}

impl Detector for PeltDetector {
    fn detect(&self, signal: &Signal) -> Result<Breakpoints> {
        if !self.params.penalty.is_finite() || self.params.penalty < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "PELT penalty must be non-negative and finite, got {}",
                self.params.penalty
            )));
        }
        if self.params.jump == 0 {
            return Err(Error::InvalidParameter(
                "PELT jump must be at least 1".to_string(),
            ));
        }
        let min_size = self
            .params
            .min_size
            .unwrap_or_else(|| default_min_size(signal.len()));
        if min_size == 0 {
            return Err(Error::InvalidParameter(
                "PELT min_size must be at least 1".to_string(),
            ));
        }

        let n = signal.len();
        let cost = L2Cost::new(signal);
        let penalty = self.params.penalty;
        let jump = self.params.jump;

        // Admissible segment boundaries: multiples of `jump` that leave at
        // least `min_size` samples behind them, plus the end of the signal.
        let mut positions: Vec<usize> = (1..n)
            .filter(|t| t % jump == 0 && *t >= min_size)
            .collect();
        positions.push(n);

        // f[t] = optimal cost of data[0..t]; prev[t] = last boundary of the
        // optimal partition ending at t. Seeding f[0] with -penalty makes
        // the per-segment penalty uniform across segment counts.
        let mut f = vec![f64::INFINITY; n + 1];
        let mut prev = vec![0usize; n + 1];
        f[0] = -penalty;

        let mut candidates: Vec<usize> = vec![0];

        for &t in &positions {
            let mut best_cost = f64::INFINITY;
            let mut best_start = 0usize;

            for &s in &candidates {
                if t - s < min_size {
                    continue;
                }
                let c = f[s] + cost.cost(s, t) + penalty;
                if c < best_cost {
                    best_cost = c;
                    best_start = s;
                }
            }

            // Signals shorter than min_size still form one whole segment.
            if best_cost.is_infinite() {
                best_cost = f[0] + cost.cost(0, t) + penalty;
                best_start = 0;
            }

            f[t] = best_cost;
            prev[t] = best_start;

            // Pruning: a start that is already worse than the best
            // partition ending at t can never become optimal later.
            candidates.retain(|&s| {
                if t - s < min_size {
                    return true;
                }
                f[s] + cost.cost(s, t) <= f[t]
            });
            candidates.push(t);
        }

        // Backtrack; the sentinel n falls out naturally as the last entry.
        let mut bkps = Vec::new();
        let mut t = n;
        while t > 0 {
            bkps.push(t);
            t = prev[t];
        }
        bkps.reverse();

        Ok(Breakpoints::new(bkps))
    }
}

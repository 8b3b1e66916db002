//! Segment cost model shared by the offline partition-search detectors
//!
//! All four offline algorithms score candidate segments with the same L2
//! cost: the sum, over both signal dimensions, of squared deviation from the
//! segment mean. Prefix sums make each evaluation O(1) after an O(N) setup.

use rateshift_core::Signal;

/// Number of stacked dimensions in the detection signal (x and y).
pub const SIGNAL_DIMS: usize = 2;

/// Stopping criterion shared by the split/merge/window detectors:
/// `ln(N) * dims * sigma^2`. Larger sigma means fewer breakpoints.
pub fn split_penalty(n: usize, sigma: f64) -> f64 {
    (n as f64).ln() * SIGNAL_DIMS as f64 * sigma * sigma
}

/// O(1) L2 segment cost over the stacked (x, y) signal.
#[derive(Debug, Clone)]
pub struct L2Cost {
    sum_x: Vec<f64>,
    sum_x2: Vec<f64>,
    sum_y: Vec<f64>,
    sum_y2: Vec<f64>,
}

impl L2Cost {
    pub fn new(signal: &Signal) -> Self {
        let n = signal.len();
        let mut sum_x = vec![0.0; n + 1];
        let mut sum_x2 = vec![0.0; n + 1];
        let mut sum_y = vec![0.0; n + 1];
        let mut sum_y2 = vec![0.0; n + 1];

        for i in 0..n {
            let x = signal.x(i);
            let y = signal.y(i);
            sum_x[i + 1] = sum_x[i] + x;
            sum_x2[i + 1] = sum_x2[i] + x * x;
            sum_y[i + 1] = sum_y[i] + y;
            sum_y2[i + 1] = sum_y2[i] + y * y;
        }

        Self {
            sum_x,
            sum_x2,
            sum_y,
            sum_y2,
        }
    }

    /// Cost of segment `[start, end)`: within-segment squared deviation from
    /// the mean, summed across both dimensions. Clamped at zero against
    /// floating-point cancellation.
    pub fn cost(&self, start: usize, end: usize) -> f64 {
        debug_assert!(start <= end);
        let len = (end - start) as f64;
        if len <= 0.0 {
            return 0.0;
        }

        let sx = self.sum_x[end] - self.sum_x[start];
        let sx2 = self.sum_x2[end] - self.sum_x2[start];
        let sy = self.sum_y[end] - self.sum_y[start];
        let sy2 = self.sum_y2[end] - self.sum_y2[start];

        let cost_x = sx2 - (sx * sx) / len;
        let cost_y = sy2 - (sy * sy) / len;
        (cost_x + cost_y).max(0.0)
    }
}

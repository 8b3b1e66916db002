//! Breakpoint post-processing for the sequential detector
//!
//! CUSUM tends to report a single regime transition twice in quick
//! succession. When two adjacent detected breakpoints sit on stretches with
//! nearly the same local slope, the pair is one spurious double-detection,
//! not two regime changes; the left one is dropped. The similarity
//! threshold is a large fixed constant matching the byte-count scale of the
//! data.

use rateshift_core::{Breakpoints, Signal};

/// Two adjacent breakpoints whose local slopes differ by less than this are
/// collapsed into one.
pub const SLOPE_MERGE_THRESHOLD: f64 = 100_000.0;

/// Local rate of the signal just before index `b`.
///
/// Index 0 has no left neighbour and a repeated x gives an infinite or NaN
/// slope; both compare as "not similar" and therefore always survive.
fn local_slope(signal: &Signal, b: usize) -> f64 {
    if b == 0 {
        return f64::INFINITY;
    }
    (signal.y(b) - signal.y(b - 1)) / (signal.x(b) - signal.x(b - 1))
}

/// Drop breakpoints whose adjacent neighbour detects the same slope.
///
/// The final sentinel (index == signal length) is never examined and is
/// preserved. A single breakpoint has no neighbour to compare against and
/// is always kept. The input is not mutated; a filtered copy is returned.
pub fn suppress_weak_breakpoints(signal: &Signal, breakpoints: &Breakpoints) -> Breakpoints {
    let n = signal.len();
    let interior = breakpoints.interior(n);
    let has_sentinel = interior.len() < breakpoints.len();

    if interior.len() < 2 {
        return breakpoints.clone();
    }

    let slopes: Vec<f64> = interior.iter().map(|&b| local_slope(signal, b)).collect();

    let mut removed = vec![false; interior.len()];
    for i in 0..slopes.len() - 1 {
        if (slopes[i] - slopes[i + 1]).abs() < SLOPE_MERGE_THRESHOLD {
            removed[i] = true;
        }
    }

    let mut kept: Vec<usize> = interior
        .iter()
        .zip(&removed)
        .filter(|(_, &r)| !r)
        .map(|(&b, _)| b)
        .collect();
    if has_sentinel {
        kept.push(n);
    }
    Breakpoints::new(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rateshift_core::Signal;

    /// Signal whose local slope at index b is ys[b] - ys[b-1] (unit x steps).
    fn ramp_signal(ys: Vec<f64>) -> Signal {
        let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
        Signal::new(xs, ys).unwrap()
    }

    #[test]
    fn test_similar_adjacent_slopes_collapse() {
        // Slopes at indices 2 and 4 are both ~1e6; the pair is one
        // double-detected transition, so the left breakpoint goes.
        let ys = vec![0.0, 1e6, 2e6, 3e6, 4e6, 5e6];
        let signal = ramp_signal(ys);
        let bkps = Breakpoints::new(vec![2, 4, 6]);

        let filtered = suppress_weak_breakpoints(&signal, &bkps);
        assert_eq!(filtered.as_slice(), &[4, 6]);
    }

    #[test]
    fn test_distinct_slopes_survive() {
        // Slope jumps from 1e6 to 5e6 at index 3.
        let ys = vec![0.0, 1e6, 2e6, 7e6, 12e6, 17e6];
        let signal = ramp_signal(ys);
        let bkps = Breakpoints::new(vec![2, 4, 6]);

        let filtered = suppress_weak_breakpoints(&signal, &bkps);
        assert_eq!(filtered.as_slice(), &[2, 4, 6]);
    }

    #[test]
    fn test_single_breakpoint_never_removed() {
        let ys = vec![0.0, 1.0, 2.0, 3.0];
        let signal = ramp_signal(ys);
        let bkps = Breakpoints::new(vec![2, 4]);

        let filtered = suppress_weak_breakpoints(&signal, &bkps);
        assert_eq!(filtered.as_slice(), &[2, 4]);
    }

    #[test]
    fn test_idempotent_on_filtered_output() {
        let ys = vec![0.0, 1e6, 2e6, 3e6, 4e6, 5e6, 5.5e6, 6e6];
        let signal = ramp_signal(ys);
        let bkps = Breakpoints::new(vec![2, 4, 6, 8]);

        let once = suppress_weak_breakpoints(&signal, &bkps);
        let twice = suppress_weak_breakpoints(&signal, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sentinel_only_list_untouched() {
        let signal = ramp_signal(vec![0.0, 1.0, 2.0]);
        let bkps = Breakpoints::new(vec![3]);
        let filtered = suppress_weak_breakpoints(&signal, &bkps);
        assert_eq!(filtered.as_slice(), &[3]);
    }
}

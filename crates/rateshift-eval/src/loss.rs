//! Breakpoint-distance loss
//!
//! Scores a predicted breakpoint list against a known-correct one. Distance
//! is measured in x-space (time), not index-space: two predictions one
//! index apart can be very close or very far depending on how densely the
//! trace sampled that region.

use rateshift_core::{Error, Result};

/// Weight of the segment-count mismatch term in [`changepoint_loss`].
pub const COUNT_PENALTY: f64 = 1.0;

/// x value for a breakpoint index, with the end-of-signal sentinel (index
/// == len) clamped to the last observation.
fn x_at(xs: &[f64], index: usize) -> f64 {
    xs[index.min(xs.len() - 1)]
}

/// Find the candidate breakpoint nearest to `target` in x-space.
///
/// `candidates` must be non-empty and sorted ascending. Binary search
/// locates the two candidates bracketing the target; a target below every
/// candidate maps to the smallest, above every candidate to the largest,
/// and exact x-distance ties favor the smaller candidate.
pub fn nearest_breakpoint(target: usize, candidates: &[usize], xs: &[f64]) -> Result<usize> {
    if candidates.is_empty() {
        return Err(Error::InvalidInput(
            "candidate breakpoint list is empty".to_string(),
        ));
    }

    let pos = candidates.partition_point(|&c| c < target);
    if pos == 0 {
        return Ok(candidates[0]);
    }
    if pos == candidates.len() {
        return Ok(candidates[candidates.len() - 1]);
    }

    let (left, right) = (candidates[pos - 1], candidates[pos]);
    let target_x = x_at(xs, target);
    let d_left = (x_at(xs, left) - target_x).abs();
    let d_right = (x_at(xs, right) - target_x).abs();
    Ok(if d_left <= d_right { left } else { right })
}

/// Total x-space distance from each correct breakpoint to its nearest
/// prediction, plus [`COUNT_PENALTY`] per unit of count mismatch. Lower is
/// better; 0 is a perfect match in both position and count.
///
/// An empty prediction list against a non-empty correct list has no nearest
/// candidates; it scores `f64::INFINITY` so parameter search ranks it last.
pub fn changepoint_loss(predicted: &[usize], correct: &[usize], xs: &[f64]) -> f64 {
    if predicted.is_empty() {
        return if correct.is_empty() { 0.0 } else { f64::INFINITY };
    }

    let positional: f64 = correct
        .iter()
        .map(|&c| {
            let nearest = nearest_breakpoint(c, predicted, xs)
                .expect("predicted list is non-empty");
            (x_at(xs, nearest) - x_at(xs, c)).abs()
        })
        .sum();

    positional + COUNT_PENALTY * predicted.len().abs_diff(correct.len()) as f64
}

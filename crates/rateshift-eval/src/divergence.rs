//! Two-trace divergence checking
//!
//! Decides whether two traces of the same transfer (e.g. the same download
//! under HTTP/2 and HTTP/3, or before and after an impairment change)
//! exhibit the same throughput behavior. Both signals are segmented with
//! PELT at a fixed penalty, then compared segment by segment through their
//! best-fit polynomials.

use rateshift_changepoint::{Detector as _, PeltDetector};
use rateshift_core::{Result, Signal};
use rateshift_polyfit::{
    fit_best_per_segment, DEFAULT_MAX_DEGREE_EXCLUSIVE, DEFAULT_PENALTY_FACTOR,
};
use std::fmt;

/// PELT penalty used for both traces.
pub const DIVERGENCE_PENALTY: f64 = 1.2;

/// Two same-degree polynomials whose coefficient-wise MSE reaches this
/// margin model different behavior.
pub const COEFF_MSE_MARGIN: f64 = 5.0;

/// Outcome of a divergence check
#[derive(Debug, Clone, PartialEq)]
pub enum Divergence {
    /// The traces show the same segment structure and per-segment models.
    Identical,
    /// The traces diverge; `segment` is the first differing segment index,
    /// absent when the segment counts already differ.
    Different {
        reason: String,
        segment: Option<usize>,
    },
}

impl Divergence {
    pub fn is_different(&self) -> bool {
        matches!(self, Divergence::Different { .. })
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Divergence::Identical => write!(f, "the two traces are the same"),
            Divergence::Different { reason, segment } => match segment {
                Some(i) => write!(f, "traces diverge at segment {i}: {reason}"),
                None => write!(f, "traces diverge: {reason}"),
            },
        }
    }
}

/// Mean of squared coefficient-wise differences; callers ensure equal
/// lengths by checking the degree first.
fn coefficient_mse(a: &[f64], b: &[f64]) -> f64 {
    let total: f64 = a.iter().zip(b).map(|(&ca, &cb)| (ca - cb).powi(2)).sum();
    total / a.len() as f64
}

/// Compare two traces for throughput divergence.
///
/// Both signals are expected in the normalized form produced by trace
/// preparation (RTT-relative time, cumulative bytes). Each is segmented
/// with PELT at [`DIVERGENCE_PENALTY`]; differing segment counts diverge
/// immediately. Otherwise each segment pair is compared through its
/// best-fit polynomial: a degree mismatch or a coefficient MSE of at least
/// [`COEFF_MSE_MARGIN`] reports divergence at that segment.
pub fn check_divergence(a: &Signal, b: &Signal) -> Result<Divergence> {
    let detector = PeltDetector::new(DIVERGENCE_PENALTY);
    let bkps_a = detector.detect(a)?;
    let bkps_b = detector.detect(b)?;

    // Sentinel-terminated list length == number of segments.
    if bkps_a.len() != bkps_b.len() {
        return Ok(Divergence::Different {
            reason: format!(
                "trace A splits into {} segments, trace B into {}",
                bkps_a.len(),
                bkps_b.len()
            ),
            segment: None,
        });
    }

    let polys_a = fit_best_per_segment(
        a.xs(),
        a.ys(),
        bkps_a.interior(a.len()),
        DEFAULT_MAX_DEGREE_EXCLUSIVE,
        DEFAULT_PENALTY_FACTOR,
    )?;
    let polys_b = fit_best_per_segment(
        b.xs(),
        b.ys(),
        bkps_b.interior(b.len()),
        DEFAULT_MAX_DEGREE_EXCLUSIVE,
        DEFAULT_PENALTY_FACTOR,
    )?;
    debug_assert_eq!(polys_a.len(), polys_b.len());

    for (i, (poly_a, poly_b)) in polys_a.iter().zip(&polys_b).enumerate() {
        if poly_a.len() != poly_b.len() {
            return Ok(Divergence::Different {
                reason: format!(
                    "segment models have degree {} for trace A, {} for trace B",
                    poly_a.len() - 1,
                    poly_b.len() - 1
                ),
                segment: Some(i),
            });
        }

        let mse = coefficient_mse(poly_a, poly_b);
        if mse >= COEFF_MSE_MARGIN {
            return Ok(Divergence::Different {
                reason: format!(
                    "segment models {poly_a:?} and {poly_b:?} differ, coefficient MSE {mse:.3} >= margin {COEFF_MSE_MARGIN}"
                ),
                segment: Some(i),
            });
        }
    }

    Ok(Divergence::Identical)
}

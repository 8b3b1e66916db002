//! Per-segment polynomial models
//!
//! Fits low-degree polynomials to segments of a (x, y) signal by least
//! squares and selects, per segment, the degree minimizing a
//! complexity-penalized error. Coefficients are stored highest-degree
//! first throughout.
//!
//! The complexity penalty adds `penalty_factor * degree * sum(coefficients)`
//! to the raw MSE, using the raw, signed coefficient sum rather than an
//! absolute or squared norm. A polynomial with negative coefficients can
//! *lower* its adjusted error. This is a quirk of the original error
//! heuristic, preserved exactly for compatibility; see
//! [`adjusted_error`].

use nalgebra::{DMatrix, DVector};
use rateshift_core::{Error, Result};

/// Default exclusive upper bound on candidate degrees (cubic and below).
pub const DEFAULT_MAX_DEGREE_EXCLUSIVE: usize = 4;

/// Default complexity penalty factor.
pub const DEFAULT_PENALTY_FACTOR: f64 = 0.7;

/// Evaluate a polynomial (coefficients highest-degree first) at `x`.
pub fn eval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Mean squared error of the polynomial over the given points.
pub fn mse(xs: &[f64], ys: &[f64], coeffs: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(Error::size_mismatch(xs.len(), ys.len(), "mse inputs"));
    }
    if xs.is_empty() {
        return Err(Error::empty_input());
    }
    let total: f64 = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| (y - eval(coeffs, x)).powi(2))
        .sum();
    Ok(total / xs.len() as f64)
}

/// Complexity-penalized fit error: `mse + penalty_factor * degree * Σ c_i`.
///
/// The coefficient sum is deliberately *not* absolute or squared: negative
/// coefficients reduce the adjusted error. Preserved as-is for
/// compatibility with the original selection heuristic; do not "fix"
/// without revisiting every tuned penalty factor.
pub fn adjusted_error(mse: f64, coeffs: &[f64], penalty_factor: f64) -> f64 {
    let degree = coeffs.len().saturating_sub(1);
    mse + penalty_factor * degree as f64 * coeffs.iter().sum::<f64>()
}

/// Least-squares fit of a fixed-degree polynomial.
///
/// Solves the normal equations with Cholesky, falling back to SVD for
/// rank-deficient systems (which arise when `degree + 1` exceeds the number
/// of points; permitted, but the result is a degenerate/overfit model).
/// Returns `degree + 1` coefficients, highest degree first.
pub fn fit_polynomial(xs: &[f64], ys: &[f64], degree: usize) -> Result<Vec<f64>> {
    if xs.len() != ys.len() {
        return Err(Error::size_mismatch(xs.len(), ys.len(), "fit inputs"));
    }
    if xs.is_empty() {
        return Err(Error::empty_input());
    }

    let n = xs.len();
    // Design matrix: column j holds x^j.
    let mut design = DMatrix::zeros(n, degree + 1);
    for i in 0..n {
        let mut power = 1.0;
        for j in 0..=degree {
            design[(i, j)] = power;
            power *= xs[i];
        }
    }
    let y = DVector::from_row_slice(ys);

    let xtx = design.transpose() * &design;
    let xty = design.transpose() * y;

    let direct = xtx
        .clone()
        .cholesky()
        .map(|chol| chol.solve(&xty))
        .filter(|sol| sol.iter().all(|c| c.is_finite()));
    let solution = match direct {
        Some(sol) => sol,
        None => {
            let svd = xtx.svd(true, true);
            svd.solve(&xty, 1e-10)
                .map_err(|e| Error::Computation(format!("polynomial solve failed: {e}")))?
        }
    };

    // nalgebra yields lowest-degree-first; flip to the public convention.
    let mut coeffs: Vec<f64> = solution.iter().copied().collect();
    coeffs.reverse();
    Ok(coeffs)
}

/// Fit each candidate degree in `[1, max_degree_exclusive)` and return the
/// coefficients minimizing the complexity-adjusted error. Ties keep the
/// lowest degree.
pub fn fit_best_polynomial(
    xs: &[f64],
    ys: &[f64],
    max_degree_exclusive: usize,
    penalty_factor: f64,
) -> Result<Vec<f64>> {
    if max_degree_exclusive < 2 {
        return Err(Error::InvalidParameter(format!(
            "max_degree_exclusive must be at least 2, got {max_degree_exclusive}"
        )));
    }

    let mut best: Option<(f64, Vec<f64>)> = None;
    for degree in 1..max_degree_exclusive {
        let coeffs = fit_polynomial(xs, ys, degree)?;
        let err = adjusted_error(mse(xs, ys, &coeffs)?, &coeffs, penalty_factor);
        if best.as_ref().map_or(true, |(e, _)| err < *e) {
            best = Some((err, coeffs));
        }
    }

    Ok(best.expect("degree range is non-empty").1)
}

/// Partition `(xs, ys)` at the given right-exclusive cut points and fit the
/// best polynomial per segment.
///
/// `cuts` are interior breakpoints (sentinel already stripped): the first
/// segment starts at 0, segment i spans `[cuts[i-1], cuts[i])`, and the
/// last segment runs to the end. One coefficient vector is returned per
/// segment, in segment order.
pub fn fit_best_per_segment(
    xs: &[f64],
    ys: &[f64],
    cuts: &[usize],
    max_degree_exclusive: usize,
    penalty_factor: f64,
) -> Result<Vec<Vec<f64>>> {
    if xs.len() != ys.len() {
        return Err(Error::size_mismatch(xs.len(), ys.len(), "segment inputs"));
    }
    let n = xs.len();
    if cuts.windows(2).any(|w| w[1] <= w[0]) {
        return Err(Error::InvalidInput(
            "cut points must be strictly increasing".to_string(),
        ));
    }
    if cuts.iter().any(|&c| c == 0 || c >= n) {
        return Err(Error::InvalidInput(format!(
            "cut points must lie strictly inside (0, {n})"
        )));
    }

    let mut polys = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for &cut in cuts.iter().chain(std::iter::once(&n)) {
        polys.push(fit_best_polynomial(
            &xs[start..cut],
            &ys[start..cut],
            max_degree_exclusive,
            penalty_factor,
        )?);
        start = cut;
    }
    Ok(polys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_eval_highest_degree_first() {
        // 2x^2 + 3x + 1
        let coeffs = [2.0, 3.0, 1.0];
        assert_abs_diff_eq!(eval(&coeffs, 0.0), 1.0);
        assert_abs_diff_eq!(eval(&coeffs, 1.0), 6.0);
        assert_abs_diff_eq!(eval(&coeffs, 2.0), 15.0);
    }

    #[test]
    fn test_linear_fit_through_two_points_is_exact() {
        let xs = [0.0, 1.0];
        let ys = [1.0, 3.0];
        let coeffs = fit_polynomial(&xs, &ys, 1).unwrap();

        assert_eq!(coeffs.len(), 2);
        assert_abs_diff_eq!(coeffs[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(coeffs[1], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mse(&xs, &ys, &coeffs).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_best_fit_prefers_lowest_degree_on_linear_data() {
        // Perfectly linear data fits exactly at every degree; the
        // complexity penalty leaves degree 1 with the smallest adjusted
        // error.
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let coeffs =
            fit_best_polynomial(&xs, &ys, DEFAULT_MAX_DEGREE_EXCLUSIVE, DEFAULT_PENALTY_FACTOR)
                .unwrap();
        assert_eq!(coeffs.len(), 2, "expected a linear model, got {coeffs:?}");
    }

    #[test]
    fn test_adjusted_error_penalizes_by_degree_and_sum() {
        let err = adjusted_error(1.0, &[2.0, 1.0, 1.0], 0.5);
        // 1.0 + 0.5 * 2 * 4.0
        assert_abs_diff_eq!(err, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_adjusted_error_negative_sum_quirk() {
        // The raw coefficient sum means a negative-leaning polynomial gets
        // an adjusted error below its MSE. Intentionally preserved.
        let err = adjusted_error(1.0, &[-5.0, 0.0], 0.7);
        assert!(err < 1.0);
        assert_abs_diff_eq!(err, 1.0 - 3.5, epsilon = 1e-12);
    }

    #[test]
    fn test_per_segment_fits_each_regime() {
        // Two linear regimes: slope 1, then slope 10 starting at index 5.
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs
            .iter()
            .map(|&x| if x < 5.0 { x } else { 10.0 * x })
            .collect();

        let polys = fit_best_per_segment(
            &xs,
            &ys,
            &[5],
            DEFAULT_MAX_DEGREE_EXCLUSIVE,
            DEFAULT_PENALTY_FACTOR,
        )
        .unwrap();

        assert_eq!(polys.len(), 2);
        // Leading coefficient of each linear fit is the segment slope.
        assert_abs_diff_eq!(polys[0][0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(polys[1][0], 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_no_cuts_fits_whole_signal() {
        let xs: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x).collect();
        let polys = fit_best_per_segment(&xs, &ys, &[], 4, 0.7).unwrap();
        assert_eq!(polys.len(), 1);
        assert_abs_diff_eq!(polys[0][0], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_degree_exceeding_points() {
        // One point, degree 1: rank-deficient but permitted; the SVD
        // fallback returns a usable (overfit) model.
        let coeffs = fit_polynomial(&[2.0], &[4.0], 1).unwrap();
        assert_eq!(coeffs.len(), 2);
        assert_abs_diff_eq!(eval(&coeffs, 2.0), 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(fit_polynomial(&[], &[], 1).is_err());
        assert!(fit_polynomial(&[1.0], &[1.0, 2.0], 1).is_err());
        assert!(fit_best_polynomial(&[0.0, 1.0], &[0.0, 1.0], 1, 0.7).is_err());
        // Cut at 0 and cut beyond the end are both rejected
        assert!(fit_best_per_segment(&[0.0, 1.0], &[0.0, 1.0], &[0], 4, 0.7).is_err());
        assert!(fit_best_per_segment(&[0.0, 1.0], &[0.0, 1.0], &[2], 4, 0.7).is_err());
        assert!(fit_best_per_segment(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], &[2, 1], 4, 0.7).is_err());
    }
}

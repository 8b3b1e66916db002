//! Exhaustive detector parameter search
//!
//! Brute-force grid search over an algorithm's tunables, scoring every
//! combination with [`changepoint_loss`](crate::loss::changepoint_loss)
//! against a known-correct breakpoint list. The grid is enumerated in a
//! fixed order and the first combination achieving the minimum loss wins;
//! a combination whose detector invocation fails (e.g. a comparison window
//! larger than the signal) is skipped, not fatal.
//!
//! With the `parallel` feature the combinations are evaluated on a rayon
//! pool; evaluations are independent and side-effect-free, and the
//! first-seen tie-breaking of the sequential enumeration is preserved.

use crate::loss::changepoint_loss;
use rateshift_changepoint::{detect, Algorithm, DetectorParams};
use rateshift_core::{Error, Result, Signal};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Grid-search configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Penalty used for every PELT invocation. PELT's penalty is not part
    /// of the searched grid and has no safe default, so it must be set when
    /// searching PELT parameters.
    pub pelt_penalty: Option<f64>,
    /// Upper end of the sigma grid for BINSEG/BOTTOMUP/WINDOW.
    pub sigma_max: f64,
    /// Number of sigma steps.
    pub sigma_steps: usize,
    /// Upper bound on the number of window widths visited.
    pub max_widths: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pelt_penalty: None,
            sigma_max: 50.0,
            sigma_steps: 100,
            max_widths: 100,
        }
    }
}

/// The winning parameter combination, per algorithm family
#[derive(Debug, Clone, PartialEq)]
pub enum BestParams {
    Pelt { min_size: usize, jump: usize },
    Sigma { sigma: f64 },
    SigmaWidth { sigma: f64, width: usize },
}

/// Result of a parameter search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub params: BestParams,
    pub loss: f64,
}

fn sigma_grid(config: &SearchConfig) -> Vec<f64> {
    let step = config.sigma_max / config.sigma_steps as f64;
    (1..=config.sigma_steps).map(|i| i as f64 * step).collect()
}

/// Enumerate the parameter grid for the given algorithm, in evaluation
/// order.
fn build_grid(
    signal: &Signal,
    algorithm: Algorithm,
    config: &SearchConfig,
) -> Result<Vec<(BestParams, DetectorParams)>> {
    let n = signal.len();
    let mut grid = Vec::new();

    match algorithm {
        Algorithm::Pelt => {
            let penalty = config.pelt_penalty.ok_or_else(|| {
                Error::InvalidParameter(
                    "searching PELT parameters requires SearchConfig.pelt_penalty".to_string(),
                )
            })?;
            for min_size in 1..(n / 4).max(2) {
                for jump in 1..20 {
                    grid.push((
                        BestParams::Pelt { min_size, jump },
                        DetectorParams {
                            penalty: Some(penalty),
                            min_size: Some(min_size),
                            jump: Some(jump),
                            ..Default::default()
                        },
                    ));
                }
            }
        }
        Algorithm::Binseg | Algorithm::BottomUp => {
            for sigma in sigma_grid(config) {
                grid.push((
                    BestParams::Sigma { sigma },
                    DetectorParams {
                        sigma: Some(sigma),
                        ..Default::default()
                    },
                ));
            }
        }
        Algorithm::Window => {
            // Widths range over the whole signal length; oversized windows
            // fail detection and are skipped below.
            let stride = (n / config.max_widths).max(1);
            for sigma in sigma_grid(config) {
                for width in (2..=n).step_by(stride) {
                    grid.push((
                        BestParams::SigmaWidth { sigma, width },
                        DetectorParams {
                            sigma: Some(sigma),
                            width: Some(width),
                            ..Default::default()
                        },
                    ));
                }
            }
        }
        Algorithm::Cusum => {
            return Err(Error::InvalidParameter(
                "no search grid is defined for CUSUM; tune threshold/drift directly".to_string(),
            ));
        }
    }

    Ok(grid)
}

/// Search the algorithm's parameter grid for the combination minimizing
/// [`changepoint_loss`](crate::loss::changepoint_loss) against
/// `correct`.
///
/// `correct` follows the usual convention: sorted indices, sentinel
/// included. Fails only when no combination produces a successful
/// detection (or when the grid itself cannot be built).
pub fn search_best_params(
    signal: &Signal,
    correct: &[usize],
    algorithm: Algorithm,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    let grid = build_grid(signal, algorithm, config)?;
    debug!(
        algorithm = %algorithm,
        combinations = grid.len(),
        "starting parameter grid search"
    );

    // Evaluate every combination; failed invocations score None.
    let evaluate = |params: &DetectorParams| -> Option<f64> {
        detect(signal, algorithm, params)
            .ok()
            .map(|bkps| changepoint_loss(bkps.as_slice(), correct, signal.xs()))
    };

    #[cfg(feature = "parallel")]
    let losses: Vec<Option<f64>> = grid.par_iter().map(|(_, p)| evaluate(p)).collect();
    #[cfg(not(feature = "parallel"))]
    let losses: Vec<Option<f64>> = grid.iter().map(|(_, p)| evaluate(p)).collect();

    // Sequential scan with strict comparison keeps the first-enumerated
    // combination on ties, parallel or not.
    let mut best: Option<(f64, usize)> = None;
    for (i, loss) in losses.iter().enumerate() {
        if let Some(loss) = loss {
            if best.map_or(true, |(b, _)| *loss < b) {
                best = Some((*loss, i));
            }
        }
    }

    match best {
        Some((loss, i)) => Ok(SearchOutcome {
            params: grid[i].0.clone(),
            loss,
        }),
        None => Err(Error::Computation(
            "no parameter combination produced a successful detection".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rateshift_changepoint::{detect, Algorithm, DetectorParams};
    use rateshift_core::Signal;

    fn two_regime_signal(n: usize) -> Signal {
        // Clean mean shift halfway through: the strongest split is exactly
        // at n/2 for every partition-search detector.
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let ys: Vec<f64> = (0..n)
            .map(|i| if i < n / 2 { 100.0 } else { 900.0 })
            .collect();
        Signal::new(xs, ys).unwrap()
    }

    #[test]
    fn test_pelt_search_recovers_generating_parameters() {
        let signal = two_regime_signal(60);
        // Ground truth produced by a known parameter combination; the grid
        // contains that combination, so the search must reach loss 0.
        let truth = detect(
            &signal,
            Algorithm::Pelt,
            &DetectorParams {
                penalty: Some(5000.0),
                min_size: Some(5),
                jump: Some(5),
                ..Default::default()
            },
        )
        .unwrap();

        let config = SearchConfig {
            pelt_penalty: Some(5000.0),
            ..Default::default()
        };
        let outcome =
            search_best_params(&signal, truth.as_slice(), Algorithm::Pelt, &config).unwrap();

        assert_abs_diff_eq!(outcome.loss, 0.0);
        assert!(matches!(outcome.params, BestParams::Pelt { .. }));
    }

    #[test]
    fn test_window_search_finds_exact_breakpoints() {
        let signal = two_regime_signal(60);
        let outcome = search_best_params(
            &signal,
            &[30, 60],
            Algorithm::Window,
            &SearchConfig::default(),
        )
        .unwrap();

        assert_abs_diff_eq!(outcome.loss, 0.0);
        assert!(matches!(outcome.params, BestParams::SigmaWidth { .. }));
    }

    #[test]
    fn test_oversized_windows_are_skipped_not_fatal() {
        // Width grid extends to the signal length; widths above n/2 make
        // the detector fail and must simply be skipped.
        let signal = two_regime_signal(20);
        let outcome = search_best_params(
            &signal,
            &[10, 20],
            Algorithm::Window,
            &SearchConfig::default(),
        )
        .unwrap();
        assert!(outcome.loss.is_finite());
    }

    #[test]
    fn test_sigma_search_for_binseg_and_bottomup() {
        let signal = two_regime_signal(60);
        for algorithm in [Algorithm::Binseg, Algorithm::BottomUp] {
            let outcome =
                search_best_params(&signal, &[30, 60], algorithm, &SearchConfig::default())
                    .unwrap();
            assert!(matches!(outcome.params, BestParams::Sigma { .. }));
            assert_abs_diff_eq!(outcome.loss, 0.0);
        }
    }

    #[test]
    fn test_pelt_search_requires_penalty() {
        let signal = two_regime_signal(40);
        let err = search_best_params(
            &signal,
            &[20, 40],
            Algorithm::Pelt,
            &SearchConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_cusum_has_no_grid() {
        let signal = two_regime_signal(40);
        assert!(search_best_params(
            &signal,
            &[20, 40],
            Algorithm::Cusum,
            &SearchConfig::default()
        )
        .is_err());
    }
}

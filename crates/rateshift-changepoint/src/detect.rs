//! Algorithm selection and unified detection entry point
//!
//! One capability, five implementations: the [`Algorithm`] enum keys the
//! detector family, and [`DetectorParams`] carries the per-algorithm
//! tunables with their documented defaults. [`detect`] builds the chosen
//! detector, runs it, and routes CUSUM output through the post-processor
//! (the other detectors' outputs are returned as-is).

use crate::binseg::{self, BinsegDetector};
use crate::bottomup::{self, BottomUpDetector};
use crate::cusum::{self, CusumDetector};
use crate::pelt::{PeltDetector, PeltParameters, DEFAULT_JUMP};
use crate::postprocess::suppress_weak_breakpoints;
use crate::traits::Detector as _;
use crate::window::{self, WindowDetector};
use rateshift_core::{Breakpoints, Error, Result, Signal};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The detector families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Pelt,
    Binseg,
    BottomUp,
    Window,
    Cusum,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Pelt => "PELT",
            Algorithm::Binseg => "BINSEG",
            Algorithm::BottomUp => "BOTTOMUP",
            Algorithm::Window => "WINDOW",
            Algorithm::Cusum => "CUSUM",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PELT" => Ok(Algorithm::Pelt),
            "BINSEG" => Ok(Algorithm::Binseg),
            "BOTTOMUP" => Ok(Algorithm::BottomUp),
            "WINDOW" => Ok(Algorithm::Window),
            "CUSUM" => Ok(Algorithm::Cusum),
            other => Err(Error::InvalidParameter(format!(
                "unknown changepoint algorithm: {other}"
            ))),
        }
    }
}

/// Algorithm tunables. Unset fields fall back to each detector's default;
/// two have none: PELT's `penalty` (the algorithm is too penalty-sensitive
/// for a silent default) and CUSUM's `drift` (call-site conventions
/// disagree, so the choice must be explicit).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorParams {
    /// Minimum samples per segment (PELT; default clamp(N/10, 5, 20)).
    pub min_size: Option<usize>,
    /// Candidate-boundary stride (PELT; default 5).
    pub jump: Option<usize>,
    /// Per-segment cost penalty (PELT; required).
    pub penalty: Option<f64>,
    /// Noise scale (BINSEG/BOTTOMUP default 10.0; WINDOW default 3.0).
    pub sigma: Option<f64>,
    /// Comparison half-window (WINDOW; default 3).
    pub width: Option<usize>,
    /// Detection threshold (CUSUM; default 28.0).
    pub threshold: Option<f64>,
    /// Accumulator desensitization (CUSUM; required).
    pub drift: Option<f64>,
}

/// Run the selected algorithm over the signal.
///
/// Returns the sentinel-terminated breakpoint list; for CUSUM the raw
/// detections are first filtered by
/// [`suppress_weak_breakpoints`].
pub fn detect(signal: &Signal, algorithm: Algorithm, params: &DetectorParams) -> Result<Breakpoints> {
    match algorithm {
        Algorithm::Pelt => {
            let penalty = params.penalty.ok_or_else(|| {
                Error::InvalidParameter(
                    "PELT requires an explicit penalty; there is no safe default".to_string(),
                )
            })?;
            let detector = PeltDetector::with_params(PeltParameters {
                penalty,
                min_size: params.min_size,
                jump: params.jump.unwrap_or(DEFAULT_JUMP),
            });
            detector.detect(signal)
        }
        Algorithm::Binseg => {
            let detector = BinsegDetector::new(params.sigma.unwrap_or(binseg::DEFAULT_SIGMA));
            detector.detect(signal)
        }
        Algorithm::BottomUp => {
            let detector = BottomUpDetector::new(params.sigma.unwrap_or(bottomup::DEFAULT_SIGMA));
            detector.detect(signal)
        }
        Algorithm::Window => {
            let detector = WindowDetector::new(
                params.width.unwrap_or(window::DEFAULT_WIDTH),
                params.sigma.unwrap_or(window::DEFAULT_SIGMA),
            );
            detector.detect(signal)
        }
        Algorithm::Cusum => {
            let drift = params.drift.ok_or_else(|| {
                Error::InvalidParameter(
                    "CUSUM requires an explicit drift; there is no safe default".to_string(),
                )
            })?;
            let detector =
                CusumDetector::new(params.threshold.unwrap_or(cusum::DEFAULT_THRESHOLD), drift);
            let raw = detector.detect(signal)?;
            Ok(suppress_weak_breakpoints(signal, &raw))
        }
    }
}

/// String-keyed variant of [`detect`] for callers driven by external
/// configuration. An unknown selector is non-fatal: it logs a warning and
/// yields an empty breakpoint list.
pub fn detect_by_name(signal: &Signal, name: &str, params: &DetectorParams) -> Result<Breakpoints> {
    match name.parse::<Algorithm>() {
        Ok(algorithm) => detect(signal, algorithm, params),
        Err(_) => {
            warn!(selector = name, "unknown changepoint algorithm, returning no breakpoints");
            Ok(Breakpoints::empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rateshift_core::Signal;

    fn burst_signal() -> Signal {
        let n = 60;
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mut y = 0.0;
        let ys: Vec<f64> = (0..n)
            .map(|i| {
                y += if i < 30 { 5.0 } else { 400.0 };
                y
            })
            .collect();
        Signal::new(xs, ys).unwrap()
    }

    #[test]
    fn test_every_algorithm_terminates_with_sentinel() {
        let signal = burst_signal();
        let params = DetectorParams {
            penalty: Some(100.0),
            drift: Some(0.5),
            ..Default::default()
        };

        for algorithm in [
            Algorithm::Pelt,
            Algorithm::Binseg,
            Algorithm::BottomUp,
            Algorithm::Window,
            Algorithm::Cusum,
        ] {
            let bkps = detect(&signal, algorithm, &params).unwrap();
            bkps.validate(signal.len())
                .unwrap_or_else(|e| panic!("{algorithm}: {e}"));
        }
    }

    #[test]
    fn test_pelt_requires_penalty() {
        let signal = burst_signal();
        let err = detect(&signal, Algorithm::Pelt, &DetectorParams::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_cusum_requires_drift() {
        let signal = burst_signal();
        let err = detect(&signal, Algorithm::Cusum, &DetectorParams::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_unknown_selector_is_non_fatal() {
        let signal = burst_signal();
        let bkps = detect_by_name(&signal, "KERNEL-RBF", &DetectorParams::default()).unwrap();
        assert!(bkps.is_empty());
    }

    #[test]
    fn test_selector_parsing_is_case_insensitive() {
        assert_eq!("pelt".parse::<Algorithm>().unwrap(), Algorithm::Pelt);
        assert_eq!("BottomUp".parse::<Algorithm>().unwrap(), Algorithm::BottomUp);
        assert!("rbf".parse::<Algorithm>().is_err());
    }
}

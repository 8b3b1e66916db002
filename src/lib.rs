//! Throughput regime-shift analysis toolkit
//!
//! Umbrella crate re-exporting the rateshift workspace: given a
//! time-ordered sequence of (time, cumulative-bytes-acknowledged)
//! observations extracted from a packet trace, detect where the delivery
//! rate changes regime, model each regime with a polynomial, tune detector
//! parameters against ground truth, and compare two traces for divergence.
//!
//! # Crates
//!
//! - [`core`]: signal/breakpoint types, errors, trace preparation
//! - [`changepoint`]: PELT, binary segmentation, bottom-up, sliding
//!   window, and CUSUM detectors with post-processing
//! - [`polyfit`]: per-segment polynomial models with complexity-penalized
//!   degree selection
//! - [`eval`]: breakpoint-distance loss, parameter grid search, and
//!   two-trace divergence
//!
//! # Example
//!
//! ```rust
//! use rateshift::{detect, Algorithm, DetectorParams, Signal};
//!
//! let xs: Vec<f64> = (0..60).map(|i| i as f64).collect();
//! let mut total = 0.0;
//! let ys: Vec<f64> = (0..60)
//!     .map(|i| {
//!         total += if i < 30 { 100.0 } else { 4_000.0 };
//!         total
//!     })
//!     .collect();
//! let signal = Signal::new(xs, ys).unwrap();
//!
//! let params = DetectorParams { penalty: Some(500.0), ..Default::default() };
//! let breakpoints = detect(&signal, Algorithm::Pelt, &params).unwrap();
//! assert_eq!(*breakpoints.as_slice().last().unwrap(), 60);
//! ```

pub use rateshift_changepoint as changepoint;
pub use rateshift_core as core;
pub use rateshift_eval as eval;
pub use rateshift_polyfit as polyfit;

// Common entry points at the crate root
pub use rateshift_changepoint::{
    detect, detect_by_name, Algorithm, CusumDetector, Detector, DetectorParams,
    DetectorProperties, PeltDetector, suppress_weak_breakpoints,
};
pub use rateshift_core::{Breakpoints, Error, Result, Signal};
pub use rateshift_eval::{
    changepoint_loss, check_divergence, nearest_breakpoint, search_best_params, Divergence,
    SearchConfig, SearchOutcome,
};
pub use rateshift_polyfit::{fit_best_per_segment, fit_best_polynomial};

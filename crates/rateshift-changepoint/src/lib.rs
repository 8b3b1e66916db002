//! Throughput changepoint detection algorithms
//!
//! This crate locates the indices at which the delivery rate of a
//! (time, cumulative-bytes-acked) signal shifts regime.
//!
//! # Algorithms
//!
//! ## Offline partition search
//! - **PELT**: exact optimal partitioning with pruning
//! - **Binary Segmentation**: greedy recursive splitting
//! - **Bottom-Up**: greedy merging from a fine partition
//! - **Sliding Window**: local discrepancy peaks
//!
//! ## Sequential
//! - **CUSUM**: single-pass twin-accumulator drift detection, with a
//!   slope-similarity post-processing step to collapse double detections
//!
//! All detectors share the breakpoint-list convention: strictly increasing
//! indices terminated by a sentinel equal to the signal length.
//!
//! ## Usage
//!
//! ```rust
//! use rateshift_changepoint::{detect, Algorithm, DetectorParams};
//! use rateshift_core::Signal;
//!
//! let xs: Vec<f64> = (0..40).map(|i| i as f64).collect();
//! let ys: Vec<f64> = (0..40)
//!     .map(|i| if i < 20 { i as f64 * 10.0 } else { 200.0 + (i - 20) as f64 * 900.0 })
//!     .collect();
//! let signal = Signal::new(xs, ys).unwrap();
//!
//! let params = DetectorParams { penalty: Some(50.0), ..Default::default() };
//! let breakpoints = detect(&signal, Algorithm::Pelt, &params).unwrap();
//! assert_eq!(*breakpoints.as_slice().last().unwrap(), 40);
//! ```

pub mod binseg;
pub mod bottomup;
pub mod cost;
pub mod cusum;
pub mod detect;
pub mod pelt;
pub mod postprocess;
pub mod traits;
pub mod window;

// Re-exports - detectors
pub use binseg::{BinsegDetector, BinsegParameters};
pub use bottomup::{BottomUpDetector, BottomUpParameters};
pub use cusum::{CusumDetector, CusumParameters};
pub use pelt::{PeltDetector, PeltParameters};
pub use window::{WindowDetector, WindowParameters};

// Core traits and dispatch
pub use cost::L2Cost;
pub use detect::{detect, detect_by_name, Algorithm, DetectorParams};
pub use postprocess::{suppress_weak_breakpoints, SLOPE_MERGE_THRESHOLD};
pub use traits::{Detector, DetectorProperties};

//! Evaluation and tuning for throughput changepoint detection
//!
//! Three consumers of detector output live here:
//!
//! - [`loss`]: x-space breakpoint-distance loss against ground truth
//! - [`search`]: exhaustive per-algorithm parameter grid search minimizing
//!   that loss (optionally parallelized via the `parallel` feature)
//! - [`divergence`]: two-trace comparison through per-segment polynomial
//!   models

pub mod divergence;
pub mod loss;
pub mod search;

pub use divergence::{check_divergence, Divergence, COEFF_MSE_MARGIN, DIVERGENCE_PENALTY};
pub use loss::{changepoint_loss, nearest_breakpoint, COUNT_PENALTY};
pub use search::{search_best_params, BestParams, SearchConfig, SearchOutcome};

//! Parameter search and trace divergence example

use rateshift_changepoint::{detect, Algorithm, DetectorParams};
use rateshift_core::Signal;
use rateshift_eval::{check_divergence, search_best_params, SearchConfig};

/// Synthetic cumulative-bytes trace with a rate change at `split`.
fn synthetic_trace(n: usize, split: usize, slow: f64, fast: f64) -> Signal {
    let xs: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
    let mut total = 0.0;
    let ys: Vec<f64> = (0..n)
        .map(|i| {
            total += if i < split { slow } else { fast };
            total
        })
        .collect();
    Signal::new(xs, ys).expect("synthetic trace is well-formed")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Tune the sliding-window detector against a hand-labelled trace.
    let labelled = synthetic_trace(80, 40, 200.0, 9_000.0);
    let truth = detect(
        &labelled,
        Algorithm::Pelt,
        &DetectorParams {
            penalty: Some(1_000.0),
            ..Default::default()
        },
    )?;
    println!("reference breakpoints: {truth}");

    let outcome = search_best_params(
        &labelled,
        truth.as_slice(),
        Algorithm::Window,
        &SearchConfig::default(),
    )?;
    println!("best window parameters: {:?} (loss {:.3})\n", outcome.params, outcome.loss);

    // Compare two captures of the "same" transfer.
    let h2 = synthetic_trace(80, 40, 200.0, 9_000.0);
    let h3 = synthetic_trace(80, 40, 200.0, 9_000.0);
    println!("same shape:   {}", check_divergence(&h2, &h3)?);

    let impaired = synthetic_trace(80, 40, 200.0, 1_500.0);
    println!("rate-limited: {}", check_divergence(&h2, &impaired)?);

    Ok(())
}

//! Basic changepoint detection example

use rateshift_changepoint::{detect, Algorithm, DetectorParams};
use rateshift_core::Signal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Throughput Changepoint Detection Examples ===\n");

    // A download that ramps up slowly, stalls, then bursts: three rate
    // regimes over 120 RTTs.
    let n = 120;
    let xs: Vec<f64> = (0..n).map(|i| i as f64 * 0.25).collect();
    let mut total = 0.0;
    let ys: Vec<f64> = (0..n)
        .map(|i| {
            total += match i {
                0..=39 => 1_200.0,
                40..=79 => 150.0,
                _ => 14_000.0,
            };
            total
        })
        .collect();
    let signal = Signal::new(xs, ys)?;

    println!("Trace: slow-start, stall, burst across {n} samples\n");

    // Offline partition search
    println!("1. PELT (penalty = 500)");
    let params = DetectorParams {
        penalty: Some(500.0),
        ..Default::default()
    };
    let bkps = detect(&signal, Algorithm::Pelt, &params)?;
    println!("   breakpoints: {bkps}");

    println!("2. Binary segmentation (default sigma)");
    let bkps = detect(&signal, Algorithm::Binseg, &DetectorParams::default())?;
    println!("   breakpoints: {bkps}");

    println!("3. Bottom-up (default sigma)");
    let bkps = detect(&signal, Algorithm::BottomUp, &DetectorParams::default())?;
    println!("   breakpoints: {bkps}");

    println!("4. Sliding window (default width/sigma)");
    let bkps = detect(&signal, Algorithm::Window, &DetectorParams::default())?;
    println!("   breakpoints: {bkps}");

    // Sequential detection; drift must always be explicit
    println!("5. CUSUM (threshold = 5, drift = 0.5, post-processed)");
    let params = DetectorParams {
        threshold: Some(5.0),
        drift: Some(0.5),
        ..Default::default()
    };
    let bkps = detect(&signal, Algorithm::Cusum, &params)?;
    println!("   breakpoints: {bkps}");

    // Unknown selectors degrade to an empty result with a warning
    let bkps = detect_unknown(&signal);
    println!("\nUnknown selector produced {} breakpoints", bkps.len());

    Ok(())
}

fn detect_unknown(signal: &Signal) -> rateshift_core::Breakpoints {
    rateshift_changepoint::detect_by_name(signal, "wavelet", &DetectorParams::default())
        .expect("unknown selectors are non-fatal")
}

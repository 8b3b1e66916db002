//! Numeric trace preparation
//!
//! The capture pipeline hands this crate per-event timestamps and acked byte
//! counts; the helpers here turn those into the RTT-normalized,
//! cumulative-bytes form the detectors consume. Packet parsing itself lives
//! outside this workspace.

use crate::error::{Error, Result};

/// Normalize timestamps to round-trip-time units.
///
/// `rtt` must be positive and finite; it is typically the initial RTT
/// estimate sampled from the connection handshake.
pub fn normalize_by_rtt(times: &[f64], rtt: f64) -> Result<Vec<f64>> {
    if !rtt.is_finite() || rtt <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "rtt must be positive and finite, got {rtt}"
        )));
    }
    Ok(times.iter().map(|t| t / rtt).collect())
}

/// Running sum of per-event acked byte counts.
pub fn cumulative(acked: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    acked
        .iter()
        .map(|a| {
            total += a;
            total
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_by_rtt() {
        let rtts = normalize_by_rtt(&[0.0, 25.0, 50.0, 100.0], 25.0).unwrap();
        assert_eq!(rtts, vec![0.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_normalize_rejects_bad_rtt() {
        assert!(normalize_by_rtt(&[0.0], 0.0).is_err());
        assert!(normalize_by_rtt(&[0.0], -1.0).is_err());
        assert!(normalize_by_rtt(&[0.0], f64::NAN).is_err());
    }

    #[test]
    fn test_cumulative() {
        let cum = cumulative(&[100.0, 50.0, 0.0, 25.0]);
        assert_abs_diff_eq!(cum[0], 100.0);
        assert_abs_diff_eq!(cum[1], 150.0);
        assert_abs_diff_eq!(cum[2], 150.0);
        assert_abs_diff_eq!(cum[3], 175.0);
    }

    #[test]
    fn test_cumulative_empty() {
        assert!(cumulative(&[]).is_empty());
    }
}

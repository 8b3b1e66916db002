//! Breakpoint lists and the end-of-signal sentinel convention
//!
//! Every detector returns its breakpoints as an ordered list of strictly
//! increasing indices into the signal, terminated by a sentinel equal to the
//! signal length. The sentinel marks end-of-signal, not a real regime
//! change; callers that need true regime boundaries use
//! [`Breakpoints::interior`].

use crate::error::{Error, Result};
use std::fmt;

/// An ordered breakpoint list, by convention ending with the sentinel
/// index `N` (the signal length).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Breakpoints(Vec<usize>);

impl Breakpoints {
    /// Wrap a raw index list. No validation is performed here; detectors
    /// uphold the ordering invariant and [`Breakpoints::validate`] checks it
    /// when callers hand in external data (e.g. ground-truth lists).
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The empty list (used for non-fatal degradations such as an unknown
    /// algorithm selector).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Check the list invariants against a signal of `n` observations:
    /// strictly increasing, all indices in `[0, n]`, last element equal to
    /// `n`.
    pub fn validate(&self, n: usize) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::InvalidInput(
                "breakpoint list is empty (missing sentinel)".to_string(),
            ));
        }
        if self.0.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::InvalidInput(
                "breakpoint indices must be strictly increasing".to_string(),
            ));
        }
        if *self.0.last().unwrap() != n {
            return Err(Error::InvalidInput(format!(
                "breakpoint list must end with the sentinel {n}, got {}",
                self.0.last().unwrap()
            )));
        }
        Ok(())
    }

    /// All indices, sentinel included.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// The true regime boundaries: every index except a trailing sentinel
    /// equal to `n`.
    pub fn interior(&self, n: usize) -> &[usize] {
        match self.0.last() {
            Some(&last) if last == n => &self.0[..self.0.len() - 1],
            _ => &self.0,
        }
    }

    /// Number of indices, sentinel included. For a sentinel-terminated list
    /// this equals the number of segments the signal is partitioned into.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }
}

impl From<Vec<usize>> for Breakpoints {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}

impl fmt::Display for Breakpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_sentinel_terminated() {
        let b = Breakpoints::new(vec![5, 10]);
        assert!(b.validate(10).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_sentinel() {
        let b = Breakpoints::new(vec![5, 9]);
        assert!(b.validate(10).is_err());
    }

    #[test]
    fn test_validate_rejects_unordered() {
        let b = Breakpoints::new(vec![5, 5, 10]);
        assert!(b.validate(10).is_err());
        let b = Breakpoints::new(vec![7, 5, 10]);
        assert!(b.validate(10).is_err());
    }

    #[test]
    fn test_interior_strips_sentinel() {
        let b = Breakpoints::new(vec![3, 7, 10]);
        assert_eq!(b.interior(10), &[3, 7]);
        // Sentinel-only list partitions the signal into one segment
        let b = Breakpoints::new(vec![10]);
        assert_eq!(b.interior(10), &[] as &[usize]);
    }

    #[test]
    fn test_interior_is_identity_without_sentinel() {
        let b = Breakpoints::new(vec![3, 7]);
        assert_eq!(b.interior(10), &[3, 7]);
    }
}

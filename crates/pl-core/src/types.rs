//! Common data types for the powerlaw workspace.

use serde::{Deserialize, Serialize};

/// A threshold candidate: a distinct value of the sorted sample.
///
/// `rank` is the index of the first occurrence of `value` in the ascending
/// sorted sample, so the number of points at or above the candidate is
/// `sample_len - rank`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The candidate threshold value.
    pub value: f64,
    /// Index of the first occurrence of `value` in the sorted sample.
    pub rank: usize,
}

/// Per-candidate statistics produced by a sweep backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateStat {
    /// MLE scaling exponent at this threshold (0 when fewer than 2 points qualify).
    pub alpha: f64,
    /// Kolmogorov-Smirnov distance between the tail and the fitted model.
    pub ks: f64,
}

/// Per-candidate arrays retained on the fit result for diagnostic consumers.
///
/// Empty when the fit was run with a fixed `xmin` (no threshold search).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateScan {
    /// Candidate threshold values (the distinct sample values, ascending).
    pub xmins: Vec<f64>,
    /// MLE alpha at each candidate.
    pub alphas: Vec<f64>,
    /// KS distance at each candidate.
    pub ks: Vec<f64>,
    /// Standard error `(alpha_i - 1)/sqrt(n_i)` at each candidate.
    pub sigmas: Vec<f64>,
}

impl CandidateScan {
    /// Number of candidates in the scan.
    pub fn len(&self) -> usize {
        self.xmins.len()
    }

    /// True when no scan was performed (fixed-xmin fits).
    pub fn is_empty(&self) -> bool {
        self.xmins.is_empty()
    }
}

/// Result of a power-law tail fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerLawFit {
    /// The selected (or caller-fixed) lower threshold.
    pub xmin: f64,
    /// The scaling exponent, `p(x) ~ x^-alpha` above `xmin`.
    pub alpha: f64,
    /// Standard error on alpha, `(alpha - 1)/sqrt(n_tail)`.
    pub alpha_error: f64,
    /// KS distance between the tail and the fitted model at `xmin`.
    pub ks: f64,
    /// One-sided one-sample KS tail probability of `ks` at `n_tail` points.
    pub ks_probability: f64,
    /// Log-likelihood of the tail under the fitted model.
    pub likelihood: f64,
    /// Number of points at or above `xmin`.
    pub n_tail: usize,
    /// Whether the discrete estimator family produced this fit.
    pub discrete: bool,
    /// Retained per-candidate arrays (empty for fixed-xmin fits).
    pub scan: CandidateScan,
}

impl PowerLawFit {
    /// Zeroed-out result for a threshold leaving fewer than 2 points.
    ///
    /// Signals "no usable fit" without raising; see the degenerate-fit
    /// handling in the orchestrator.
    pub fn degenerate(xmin: f64, n_tail: usize, discrete: bool, scan: CandidateScan) -> Self {
        Self {
            xmin,
            alpha: 0.0,
            alpha_error: 0.0,
            ks: 0.0,
            ks_probability: 0.0,
            likelihood: 0.0,
            n_tail,
            discrete,
            scan,
        }
    }

    /// True when the fit collapsed to fewer than 2 tail points.
    pub fn is_degenerate(&self) -> bool {
        self.n_tail < 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_is_zeroed() {
        let fit = PowerLawFit::degenerate(3.0, 1, false, CandidateScan::default());
        assert!(fit.is_degenerate());
        assert_eq!(fit.alpha, 0.0);
        assert_eq!(fit.ks, 0.0);
        assert_eq!(fit.likelihood, 0.0);
        assert_eq!(fit.xmin, 3.0);
    }

    #[test]
    fn test_fit_result_roundtrips_through_json() {
        let fit = PowerLawFit {
            xmin: 1.0,
            alpha: 2.5,
            alpha_error: 0.015,
            ks: 0.02,
            ks_probability: 0.7,
            likelihood: -1234.5,
            n_tail: 10_000,
            discrete: false,
            scan: CandidateScan::default(),
        };
        let json = serde_json::to_string(&fit).unwrap();
        let back: PowerLawFit = serde_json::from_str(&json).unwrap();
        assert_eq!(back.alpha, fit.alpha);
        assert_eq!(back.n_tail, fit.n_tail);
    }
}

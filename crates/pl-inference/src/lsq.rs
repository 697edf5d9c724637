//! Least-squares power-law fit in log-log space.
//!
//! Returns `(A, B)` such that `y = A x^B` minimizes squared error in
//! `ln y` vs `ln x`. This is the naive estimator the MLE methodology
//! replaces; it is provided for comparison only and is known to be biased
//! for distribution fitting (Clauset et al. 2009 sec. 3).

use pl_core::{Error, Result};

/// Least-squares `(A, B)` for `y = A x^B`.
pub fn least_squares_loglog(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    if x.len() != y.len() {
        return Err(Error::Validation(format!(
            "length mismatch: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(Error::Validation("need at least 2 points".to_string()));
    }
    if x.iter().chain(y).any(|&v| !v.is_finite() || v <= 0.0) {
        return Err(Error::Validation(
            "log-log regression requires finite, strictly positive values".to_string(),
        ));
    }

    let n = x.len() as f64;
    let lx: Vec<f64> = x.iter().map(|&v| v.ln()).collect();
    let ly: Vec<f64> = y.iter().map(|&v| v.ln()).collect();
    let sum_lx: f64 = lx.iter().sum();
    let sum_ly: f64 = ly.iter().sum();
    let sum_lxly: f64 = lx.iter().zip(&ly).map(|(&a, &b)| a * b).sum();
    let sum_lx2: f64 = lx.iter().map(|&a| a * a).sum();

    let denom = n * sum_lx2 - sum_lx * sum_lx;
    if denom.abs() < f64::EPSILON {
        return Err(Error::Computation(
            "singular design: all x values are identical".to_string(),
        ));
    }
    let b = (n * sum_lxly - sum_lx * sum_ly) / denom;
    let a = ((sum_ly - b * sum_lx) / n).exp();
    Ok((a, b))
}

//! Lognormal alternative-hypothesis comparison. EXPERIMENTAL.
//!
//! Fits a two-parameter lognormal to the whole sample by closed-form MLE and
//! reports its goodness of fit next to the power law's, as a cheap check
//! against the most common competing heavy-tailed hypothesis. Note the
//! asymmetry inherited from the reference methodology: the power-law
//! likelihood covers only the tail above `xmin`, the lognormal likelihood
//! the full sample.
//!
//! The reference implementation flags its own likelihood-ratio sign
//! convention as uncertain; here `likelihood_ratio = 2 (L_pl - L_ln)`, so
//! positive values favor the power law. Treat this number as indicative
//! only; see Clauset et al. 2009 appendix C for the significance analysis
//! a real model comparison needs.

use pl_core::{Error, PowerLawFit, Result};
use pl_prob::kolmogorov::kolmogorov_sf;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, LogNormal};

/// Lognormal fit and its comparison against a power-law fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LognormalComparison {
    /// MLE location of `ln x`.
    pub mu: f64,
    /// MLE scale of `ln x` (population convention).
    pub sigma: f64,
    /// Full-sample lognormal log-likelihood.
    pub likelihood: f64,
    /// Two-sided KS distance between the sample and the fitted lognormal.
    pub ks: f64,
    /// Asymptotic two-sided KS tail probability.
    pub ks_probability: f64,
    /// `2 (L_powerlaw - L_lognormal)`; positive favors the power law.
    pub likelihood_ratio: f64,
}

/// Fit a lognormal to `data` and compare it with `pl`.
pub fn lognormal_alternative(data: &[f64], pl: &PowerLawFit) -> Result<LognormalComparison> {
    if data.len() < 2 {
        return Err(Error::Validation(format!(
            "need at least 2 observations, got {}",
            data.len()
        )));
    }
    if data.iter().any(|&x| !x.is_finite() || x <= 0.0) {
        return Err(Error::Validation(
            "lognormal fitting requires finite, strictly positive data".to_string(),
        ));
    }

    let n = data.len() as f64;
    let logs: Vec<f64> = data.iter().map(|&x| x.ln()).collect();
    let mu = logs.iter().sum::<f64>() / n;
    let var = logs.iter().map(|&l| (l - mu) * (l - mu)).sum::<f64>() / n;
    let sigma = var.sqrt();
    if !(sigma > 0.0) || !sigma.is_finite() {
        return Err(Error::Computation(
            "degenerate lognormal fit: zero variance in ln(x)".to_string(),
        ));
    }

    let half_ln_2pi = 0.5 * (2.0 * std::f64::consts::PI).ln();
    let likelihood: f64 = data
        .iter()
        .zip(&logs)
        .map(|(&x, &l)| -x.ln() - sigma.ln() - half_ln_2pi - (l - mu) * (l - mu) / (2.0 * var))
        .sum();

    let dist = LogNormal::new(mu, sigma)
        .map_err(|e| Error::Computation(format!("lognormal distribution: {}", e)))?;
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut ks = 0.0_f64;
    for (i, &x) in sorted.iter().enumerate() {
        let c = dist.cdf(x);
        let lo = (c - i as f64 / n).abs();
        let hi = ((i + 1) as f64 / n - c).abs();
        ks = ks.max(lo.max(hi));
    }

    let t = ks * (n.sqrt() + 0.12 + 0.11 / n.sqrt());
    let ks_probability = kolmogorov_sf(t);
    let likelihood_ratio = 2.0 * (pl.likelihood - likelihood);

    Ok(LognormalComparison {
        mu,
        sigma,
        likelihood,
        ks,
        ks_probability,
        likelihood_ratio,
    })
}

//! Monte-Carlo goodness-of-fit test via toy resamples.
//!
//! Determines whether the data are consistent with the fitted power law:
//! each toy keeps the observed below-threshold values (bootstrapped) and
//! replaces the tail with draws from the fitted model, then the whole fit is
//! re-run on the toy and its KS distance recorded. The p-value is the
//! fraction of toy KS distances exceeding the observed one; `p < 0.1`
//! suggests the data may be inconsistent with a power law. Distinguishing a
//! power law from an exponential needs roughly `n_tail > 100`, from a
//! lognormal roughly `n_tail > 300` (Clauset et al. 2009 sec. 4).
//!
//! Toys are independent and run in parallel; toy `i` uses seed `seed + 1 + i`,
//! so results are reproducible for a given `(seed, n_toys)`.

use pl_core::{Error, PowerLawFit, Result};
use pl_prob::powerlaw;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::FitOptions;
use crate::fit::PowerLawFitter;

/// Outcome of the toy Monte-Carlo test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KsToyTest {
    /// Fraction of toys with a KS distance above the observed one.
    pub p_value: f64,
    /// KS distance of each toy fit.
    pub ks_values: Vec<f64>,
}

/// Run `n_toys` toy resamples of `data` against `fit` and report the
/// KS-based consistency p-value.
///
/// `options` are reused for the toy fits (with any fixed `xmin` cleared, so
/// every toy searches for its own threshold). Execution time scales as
/// `n_toys * data.len()^2 / n_threads` in the worst case.
pub fn ks_toy_test(
    data: &[f64],
    fit: &PowerLawFit,
    options: &FitOptions,
    n_toys: usize,
    seed: u64,
) -> Result<KsToyTest> {
    if n_toys == 0 {
        return Err(Error::Validation("n_toys must be > 0".to_string()));
    }
    if fit.is_degenerate() {
        return Err(Error::Validation(
            "cannot toy-test a degenerate fit".to_string(),
        ));
    }
    if fit.alpha <= 1.0 {
        return Err(Error::Validation(format!(
            "toy generation requires alpha > 1, got {}",
            fit.alpha
        )));
    }

    let ntot = data.len();
    let below: Vec<f64> = data.iter().copied().filter(|&x| x < fit.xmin).collect();
    let p_below = below.len() as f64 / ntot as f64;

    // How many points fall below the threshold is itself a random quantity;
    // draw it once so every toy shares the same split, as the reference does.
    let mut rng = StdRng::seed_from_u64(seed);
    let n_below: usize = (0..ntot).filter(|_| rng.gen::<f64>() < p_below).count();
    let n_tail = ntot - n_below;

    let mut toy_options = options.clone();
    toy_options.xmin = None;
    let fitter = PowerLawFitter::with_options(toy_options);

    let ks_values: Result<Vec<f64>> = (0..n_toys)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64 + 1));
            let mut toy = Vec::with_capacity(ntot);
            for _ in 0..n_below {
                let idx = (rng.gen::<f64>() * below.len() as f64) as usize;
                toy.push(below[idx.min(below.len() - 1)]);
            }
            for _ in 0..n_tail {
                let u: f64 = rng.gen();
                toy.push(powerlaw::quantile(u, fit.xmin, fit.alpha)?);
            }
            Ok(fitter.fit(&toy)?.ks)
        })
        .collect();
    let ks_values = ks_values?;

    let exceed = ks_values.iter().filter(|&&k| k > fit.ks).count();
    Ok(KsToyTest {
        p_value: exceed as f64 / n_toys as f64,
        ks_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn powerlaw_sample(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        powerlaw::sample(&mut rng, 1.0, 2.5, n).unwrap()
    }

    #[test]
    fn test_toy_test_reproducible() {
        let data = powerlaw_sample(150, 11);
        let fit = crate::fit::fit(&data).unwrap();
        let opts = FitOptions::default();
        let a = ks_toy_test(&data, &fit, &opts, 10, 99).unwrap();
        let b = ks_toy_test(&data, &fit, &opts, 10, 99).unwrap();
        assert_eq!(a.ks_values, b.ks_values);
        assert_eq!(a.p_value, b.p_value);
    }

    #[test]
    fn test_toy_test_p_value_bounds() {
        let data = powerlaw_sample(150, 23);
        let fit = crate::fit::fit(&data).unwrap();
        let result = ks_toy_test(&data, &fit, &FitOptions::default(), 20, 5).unwrap();
        assert!((0.0..=1.0).contains(&result.p_value));
        assert_eq!(result.ks_values.len(), 20);
        assert!(result.ks_values.iter().all(|&k| (0.0..=1.0).contains(&k)));
    }

    #[test]
    fn test_toy_test_rejects_degenerate_fit() {
        let data = powerlaw_sample(150, 31);
        let mut fit = crate::fit::fit(&data).unwrap();
        fit.n_tail = 1;
        assert!(ks_toy_test(&data, &fit, &FitOptions::default(), 5, 0).is_err());
    }
}

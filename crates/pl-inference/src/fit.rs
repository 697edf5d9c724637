//! Fit orchestrator.
//!
//! Entry point for the Clauset-Shalizi-Newman power-law fit: validates the
//! sample, classifies it as continuous or discrete, dispatches to the
//! matching threshold selector (or fits a caller-fixed `xmin` directly),
//! cross-checks the selected alpha, and derives the final statistics.

use pl_core::traits::SweepBackend;
use pl_core::{Candidate, CandidateScan, Error, PowerLawFit, Result};
use pl_prob::kolmogorov::ks_one_sided_sf;

use crate::config::{BackendKind, FitOptions};
use crate::continuous::{self, ParallelSweep, SerialSweep};
use crate::discrete;

/// Relative tolerance of the post-selection alpha cross-check.
const CONSISTENCY_RTOL: f64 = 1e-4;

/// Below this tail size the uncorrected estimator carries a noticeable
/// finite-size bias (Clauset et al. 2009 sec. 3.1).
const SMALL_TAIL_WARN: usize = 50;

/// Power-law tail fitter.
///
/// ```
/// use pl_inference::PowerLawFitter;
///
/// let data: Vec<f64> = (1..=200).map(|i| 1.0 + (i as f64).sqrt()).collect();
/// let fit = PowerLawFitter::new().fit(&data).unwrap();
/// assert!(data.contains(&fit.xmin));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PowerLawFitter {
    options: FitOptions,
}

impl PowerLawFitter {
    /// Fitter with default options.
    pub fn new() -> Self {
        Self { options: FitOptions::default() }
    }

    /// Fitter with custom options.
    pub fn with_options(options: FitOptions) -> Self {
        Self { options }
    }

    /// The active options.
    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit a power-law tail to `data`.
    pub fn fit(&self, data: &[f64]) -> Result<PowerLawFit> {
        let opts = &self.options;

        if data.iter().any(|x| !x.is_finite()) {
            return Err(Error::Validation("data must be finite".to_string()));
        }

        let mut z: Vec<f64> = if opts.strip_nonpositive {
            let kept: Vec<f64> = data.iter().copied().filter(|&x| x > 0.0).collect();
            let removed = data.len() - kept.len();
            if removed > 0 {
                log::warn!("removed {} non-positive points before fitting", removed);
            }
            kept
        } else {
            if data.iter().any(|&x| x < 0.0) {
                return Err(Error::Validation(
                    "power-law distributions are only defined for non-negative data; \
                     remove negative values or enable strip_nonpositive"
                        .to_string(),
                ));
            }
            data.to_vec()
        };
        if z.len() < 2 {
            return Err(Error::Validation(format!(
                "need at least 2 usable observations, got {}",
                z.len()
            )));
        }
        z.sort_by(f64::total_cmp);

        let candidates = unique_candidates(&z);
        let is_discrete = opts.discrete.unwrap_or_else(|| {
            let d = candidates.len() < z.len();
            log::debug!(
                "auto-classified as {} ({} distinct / {} total values)",
                if d { "discrete" } else { "continuous" },
                candidates.len(),
                z.len()
            );
            d
        });

        if let Some(x0) = opts.xmin {
            if !x0.is_finite() || x0 <= 0.0 {
                return Err(Error::Validation(format!(
                    "fixed xmin must be finite and > 0, got {}",
                    x0
                )));
            }
            return if is_discrete {
                let alpha = discrete::candidate_alpha(
                    &z,
                    x0,
                    opts.discrete_approx,
                    opts.discrete_n_alpha,
                );
                let ks = discrete::discrete_ks_statistic(&z, x0, alpha);
                self.finalize_discrete(&z, x0, alpha, ks, CandidateScan::default())
            } else {
                self.finalize_continuous(&z, x0, CandidateScan::default())
            };
        }

        if is_discrete {
            self.fit_discrete(&z, &candidates)
        } else {
            self.fit_continuous(&z, &candidates)
        }
    }

    fn fit_continuous(&self, z: &[f64], candidates: &[Candidate]) -> Result<PowerLawFit> {
        let opts = &self.options;
        let backend: &dyn SweepBackend = match opts.backend {
            BackendKind::Serial => &SerialSweep,
            BackendKind::Parallel => &ParallelSweep,
        };
        let sel = continuous::select_xmin(z, candidates, backend, opts.nosmall)?;
        let xmin = sel.scan.xmins[sel.best];

        if !opts.skip_consistency_check {
            let direct = continuous::alpha_mle(z, xmin);
            check_consistent(sel.scan.alphas[sel.best], direct)?;
        }

        self.finalize_continuous(z, xmin, sel.scan)
    }

    fn fit_discrete(&self, z: &[f64], candidates: &[Candidate]) -> Result<PowerLawFit> {
        let opts = &self.options;
        let sel = discrete::select_xmin_discrete(z, candidates, opts)?;
        let xmin = sel.scan.xmins[sel.best];
        let alpha = sel.scan.alphas[sel.best];
        let ks = sel.scan.ks[sel.best];

        if !ks.is_finite() {
            // Every candidate tail was degenerate.
            let n_tail = tail_len(z, xmin);
            log::warn!(
                "no candidate threshold left >= 2 points; probably not a power-law distribution"
            );
            return Ok(PowerLawFit::degenerate(xmin, n_tail, true, sel.scan));
        }

        if !opts.skip_consistency_check {
            let direct =
                discrete::candidate_alpha(z, xmin, opts.discrete_approx, opts.discrete_n_alpha);
            check_consistent(alpha, direct)?;
        }

        self.finalize_discrete(z, xmin, alpha, ks, sel.scan)
    }

    /// Final continuous-path statistics at a settled `xmin`.
    fn finalize_continuous(
        &self,
        z: &[f64],
        xmin: f64,
        scan: CandidateScan,
    ) -> Result<PowerLawFit> {
        let opts = &self.options;
        let tail = &z[z.partition_point(|&v| v < xmin)..];
        let n = tail.len();
        if n < 2 {
            log::warn!(
                "only {} point(s) at or above xmin={}; probably not a power-law distribution",
                n,
                xmin
            );
            return Ok(PowerLawFit::degenerate(xmin, n, false, scan));
        }
        let nf = n as f64;

        let sum_log: f64 = tail.iter().map(|&x| (x / xmin).ln()).sum();
        let mut alpha = 1.0 + nf / sum_log;
        if opts.finite {
            alpha = alpha * (nf - 1.0) / nf + 1.0 / nf;
        } else if n < SMALL_TAIL_WARN {
            log::warn!("finite-size bias may be present at n={}; consider the finite option", n);
        }

        let ks = continuous::ks_statistic(z, xmin, opts.finite);
        let likelihood = nf * ((alpha - 1.0) / xmin).ln() - alpha * sum_log;
        let alpha_error = (alpha - 1.0) / nf.sqrt();
        let ks_probability = ks_one_sided_sf(ks, n);

        check_finite(likelihood, xmin, alpha)?;
        Ok(PowerLawFit {
            xmin,
            alpha,
            alpha_error,
            ks,
            ks_probability,
            likelihood,
            n_tail: n,
            discrete: false,
            scan,
        })
    }

    /// Final discrete-path statistics at a settled `xmin` and selector alpha.
    fn finalize_discrete(
        &self,
        z: &[f64],
        xmin: f64,
        alpha: f64,
        ks: f64,
        scan: CandidateScan,
    ) -> Result<PowerLawFit> {
        let opts = &self.options;
        let n = tail_len(z, xmin);
        if n < 2 || !ks.is_finite() {
            log::warn!(
                "only {} point(s) at or above xmin={}; probably not a power-law distribution",
                n,
                xmin
            );
            return Ok(PowerLawFit::degenerate(xmin, n, true, scan));
        }
        let nf = n as f64;

        // Likelihood is evaluated at the selector's alpha; the finite-size
        // correction applies to the reported exponent afterwards.
        let likelihood = discrete::discrete_log_likelihood(z, xmin, alpha)?;
        let mut alpha = alpha;
        if opts.finite {
            alpha = alpha * (nf - 1.0) / nf + 1.0 / nf;
        } else if n < SMALL_TAIL_WARN {
            log::warn!("finite-size bias may be present at n={}; consider the finite option", n);
        }
        let alpha_error = (alpha - 1.0) / nf.sqrt();
        let ks_probability = ks_one_sided_sf(ks, n);

        check_finite(likelihood, xmin, alpha)?;
        Ok(PowerLawFit {
            xmin,
            alpha,
            alpha_error,
            ks,
            ks_probability,
            likelihood,
            n_tail: n,
            discrete: true,
            scan,
        })
    }
}

/// Fit with default options.
pub fn fit(data: &[f64]) -> Result<PowerLawFit> {
    PowerLawFitter::new().fit(data)
}

fn tail_len(z: &[f64], xmin: f64) -> usize {
    z.len() - z.partition_point(|&v| v < xmin)
}

fn check_consistent(selector: f64, direct: f64) -> Result<()> {
    if (selector - direct).abs() > CONSISTENCY_RTOL * direct.abs().max(1.0) {
        return Err(Error::InconsistentAlpha { selector, direct });
    }
    Ok(())
}

fn check_finite(likelihood: f64, xmin: f64, alpha: f64) -> Result<()> {
    if likelihood.is_nan() || xmin.is_nan() || alpha.is_nan() {
        return Err(Error::Computation(format!(
            "fit produced NaN (likelihood={}, xmin={}, alpha={})",
            likelihood, xmin, alpha
        )));
    }
    Ok(())
}

/// Distinct sample values with the index of their first occurrence.
pub(crate) fn unique_candidates(sorted: &[f64]) -> Vec<Candidate> {
    let mut out = Vec::new();
    for (i, &v) in sorted.iter().enumerate() {
        if i == 0 || sorted[i - 1] != v {
            out.push(Candidate { value: v, rank: i });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometric_sample() -> Vec<f64> {
        // Distinct values, roughly heavy-tailed; enough structure for the
        // continuous search to settle deterministically.
        (1..=400).map(|i| 1.0 + (i as f64).powf(2.2) / 100.0).collect()
    }

    #[test]
    fn test_unique_candidates_ranks() {
        let z = [1.0, 1.0, 2.0, 3.0, 3.0, 3.0, 7.0];
        let c = unique_candidates(&z);
        assert_eq!(c.len(), 4);
        assert_eq!((c[0].value, c[0].rank), (1.0, 0));
        assert_eq!((c[1].value, c[1].rank), (2.0, 2));
        assert_eq!((c[2].value, c[2].rank), (3.0, 3));
        assert_eq!((c[3].value, c[3].rank), (7.0, 6));
    }

    #[test]
    fn test_negative_data_rejected_by_default() {
        let err = fit(&[1.0, 2.0, -3.0]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_strip_nonpositive_recovers() {
        let opts = FitOptions { strip_nonpositive: true, ..FitOptions::default() };
        let mut data = geometric_sample();
        data.push(-5.0);
        data.push(0.0);
        let fit = PowerLawFitter::with_options(opts).fit(&data).unwrap();
        assert!(fit.xmin > 0.0);
    }

    #[test]
    fn test_non_finite_data_rejected() {
        assert!(fit(&[1.0, f64::NAN]).is_err());
        assert!(fit(&[1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_too_few_observations_rejected() {
        assert!(fit(&[]).is_err());
        assert!(fit(&[1.0]).is_err());
    }

    #[test]
    fn test_auto_classification() {
        let unique = geometric_sample();
        assert!(!fit(&unique).unwrap().discrete);

        let tied = vec![1.0, 1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 10.0, 20.0, 50.0];
        assert!(fit(&tied).unwrap().discrete);
    }

    #[test]
    fn test_forced_mode_overrides_classification() {
        let tied = vec![1.0, 1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 10.0, 20.0, 50.0];
        let opts = FitOptions { discrete: Some(false), ..FitOptions::default() };
        let fit = PowerLawFitter::with_options(opts).fit(&tied).unwrap();
        assert!(!fit.discrete);
    }

    #[test]
    fn test_fixed_xmin_skips_search() {
        let data = geometric_sample();
        let opts = FitOptions { xmin: Some(4.0), ..FitOptions::default() };
        let fit = PowerLawFitter::with_options(opts).fit(&data).unwrap();
        assert_eq!(fit.xmin, 4.0);
        assert!(fit.scan.is_empty());
        let n = data.iter().filter(|&&x| x >= 4.0).count();
        assert_eq!(fit.n_tail, n);
        let expected = crate::continuous::alpha_mle(
            &{
                let mut z = data.clone();
                z.sort_by(f64::total_cmp);
                z
            },
            4.0,
        );
        assert!((fit.alpha - expected).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_xmin_degenerate_tail_is_zeroed() {
        let data = geometric_sample();
        let max = data.iter().copied().fold(f64::MIN, f64::max);
        for x0 in [max - 0.5, max + 1.0] {
            let opts = FitOptions { xmin: Some(x0), ..FitOptions::default() };
            let fit = PowerLawFitter::with_options(opts).fit(&data).unwrap();
            assert!(fit.is_degenerate());
            assert_eq!(fit.alpha, 0.0);
            assert_eq!(fit.ks, 0.0);
            assert_eq!(fit.likelihood, 0.0);
            assert_eq!(fit.ks_probability, 0.0);
        }
    }

    #[test]
    fn test_alpha_error_identity() {
        let data = geometric_sample();
        let fit = fit(&data).unwrap();
        let expected = (fit.alpha - 1.0) / (fit.n_tail as f64).sqrt();
        assert_eq!(fit.alpha_error, expected);
    }

    #[test]
    fn test_scan_retained_and_bounded() {
        let data = geometric_sample();
        let fit = fit(&data).unwrap();
        assert_eq!(fit.scan.len(), unique_candidates(&data).len());
        // Every candidate KS distance lies in [0, 1].
        assert!(fit.scan.ks.iter().all(|&d| (0.0..=1.0).contains(&d)));
        assert!(data.contains(&fit.xmin));
    }

    #[test]
    fn test_deterministic_rerun() {
        let data = geometric_sample();
        let a = fit(&data).unwrap();
        let b = fit(&data).unwrap();
        assert_eq!(a.xmin, b.xmin);
        assert_eq!(a.alpha.to_bits(), b.alpha.to_bits());
        assert_eq!(a.ks.to_bits(), b.ks.to_bits());
        assert_eq!(a.likelihood.to_bits(), b.likelihood.to_bits());
    }

    #[test]
    fn test_serial_backend_matches_parallel() {
        let data = geometric_sample();
        let serial = PowerLawFitter::with_options(FitOptions {
            backend: BackendKind::Serial,
            ..FitOptions::default()
        })
        .fit(&data)
        .unwrap();
        let parallel = PowerLawFitter::with_options(FitOptions {
            backend: BackendKind::Parallel,
            ..FitOptions::default()
        })
        .fit(&data)
        .unwrap();
        assert_eq!(serial.xmin, parallel.xmin);
        assert_eq!(serial.alpha.to_bits(), parallel.alpha.to_bits());
    }

    #[test]
    fn test_finite_correction_shifts_alpha() {
        let data = geometric_sample();
        let plain = fit(&data).unwrap();
        let corrected = PowerLawFitter::with_options(FitOptions {
            finite: true,
            ..FitOptions::default()
        })
        .fit(&data)
        .unwrap();
        assert_eq!(plain.xmin, corrected.xmin);
        let n = plain.n_tail as f64;
        let expected = plain.alpha * (n - 1.0) / n + 1.0 / n;
        assert!((corrected.alpha - expected).abs() < 1e-12);
    }

    #[test]
    fn test_consistency_check_passes_and_skip_agrees() {
        let data = geometric_sample();
        let checked = fit(&data).unwrap();
        let skipped = PowerLawFitter::with_options(FitOptions {
            skip_consistency_check: true,
            ..FitOptions::default()
        })
        .fit(&data)
        .unwrap();
        assert_eq!(checked.alpha.to_bits(), skipped.alpha.to_bits());
    }
}

//! Discrete-case estimator primitives and xmin selector.
//!
//! Integer-valued data get their own estimator family (Clauset et al. 2009
//! appendix B): the closed-form MLE `alpha = 1 + n / sum(ln(x_i/(xmin-0.5)))`
//! (eq. B.17), and an "exact" alternative that maximizes the zeta-normalized
//! log-likelihood `L(alpha) = -n ln(zeta(alpha, xmin)) - alpha sum(ln x_i)`
//! (eq. B.8) over a dense grid zoomed around the closed form.

use pl_core::{Candidate, CandidateScan, Error, Result};
use pl_prob::zeta::hurwitz_zeta;
use rayon::prelude::*;

use crate::config::{BackendKind, FitOptions};
use crate::continuous::argmin_first;

/// Grid bounds for the exact likelihood search, as multiples of the
/// closed-form approximate alpha.
const ZOOM_MULTS: (f64, f64) = (0.9, 1.1);

/// Closed-form discrete MLE for the tail at `xmin` (eq. B.17).
///
/// Returns the sentinel 0 when fewer than 2 points qualify.
pub fn discrete_alpha_mle(sorted: &[f64], xmin: f64) -> f64 {
    let tail = &sorted[sorted.partition_point(|&v| v < xmin)..];
    let n = tail.len();
    if n < 2 {
        return 0.0;
    }
    let sum_log: f64 = tail.iter().map(|&x| (x / (xmin - 0.5)).ln()).sum();
    1.0 + n as f64 / sum_log
}

/// Discrete log-likelihood of the tail at `(xmin, alpha)` (eq. B.8).
///
/// The Hurwitz zeta normalization requires `alpha > 1`; outside that domain
/// the likelihood is undefined and the zeta error propagates.
pub fn discrete_log_likelihood(sorted: &[f64], xmin: f64, alpha: f64) -> Result<f64> {
    let tail = &sorted[sorted.partition_point(|&v| v < xmin)..];
    let n = tail.len() as f64;
    let sum_log: f64 = tail.iter().map(|&x| x.ln()).sum();
    let z = hurwitz_zeta(alpha, xmin)?;
    Ok(-n * z.ln() - alpha * sum_log)
}

/// Arg-max of the discrete log-likelihood over a linear alpha grid.
///
/// Grid points outside the zeta domain are skipped; if no grid point has a
/// finite likelihood the lower bound is returned (which is the closed-form
/// sentinel when the zoom range collapsed around it).
pub fn most_likely_alpha(
    sorted: &[f64],
    xmin: f64,
    alpha_range: (f64, f64),
    n_alpha: usize,
) -> f64 {
    let (lo, hi) = alpha_range;
    if n_alpha < 2 || hi <= lo {
        return lo;
    }
    let tail = &sorted[sorted.partition_point(|&v| v < xmin)..];
    let n = tail.len() as f64;
    let sum_log: f64 = tail.iter().map(|&x| x.ln()).sum();

    let step = (hi - lo) / (n_alpha - 1) as f64;
    let mut best: Option<(f64, f64)> = None;
    for i in 0..n_alpha {
        let a = lo + step * i as f64;
        let ll = match hurwitz_zeta(a, xmin) {
            Ok(z) => -n * z.ln() - a * sum_log,
            Err(_) => continue,
        };
        if !ll.is_finite() {
            continue;
        }
        match best {
            Some((_, bl)) if ll <= bl => {}
            _ => best = Some((a, ll)),
        }
    }
    best.map(|(a, _)| a).unwrap_or(lo)
}

/// Discrete KS distance between the tail at `xmin` and the fitted model.
///
/// The empirical CDF uses the left-inclusive rank of each point (the first
/// index of its tied run over `n`), because discrete data carry repeated
/// values that must all compare against the model at the same height.
/// Returns `+inf` when fewer than 2 points qualify.
pub fn discrete_ks_statistic(sorted: &[f64], xmin: f64, alpha: f64) -> f64 {
    let tail = &sorted[sorted.partition_point(|&v| v < xmin)..];
    let n = tail.len();
    if n < 2 {
        return f64::INFINITY;
    }
    let nf = n as f64;
    let mut d = 0.0_f64;
    let mut run_start = 0;
    for (i, &x) in tail.iter().enumerate() {
        if i > 0 && x != tail[i - 1] {
            run_start = i;
        }
        let ecdf = run_start as f64 / nf;
        let model = 1.0 - (x / xmin).powf(1.0 - alpha);
        let dev = (model - ecdf).abs();
        if dev.is_nan() {
            return f64::NAN;
        }
        if dev > d {
            d = dev;
        }
    }
    d
}

pub(crate) fn candidate_alpha(sorted: &[f64], xmin: f64, approx: bool, n_alpha: usize) -> f64 {
    let closed = discrete_alpha_mle(sorted, xmin);
    if approx {
        closed
    } else {
        most_likely_alpha(
            sorted,
            xmin,
            (ZOOM_MULTS.0 * closed, ZOOM_MULTS.1 * closed),
            n_alpha,
        )
    }
}

pub(crate) struct DiscreteSelection {
    /// Index of the winning candidate.
    pub best: usize,
    /// Retained per-candidate arrays.
    pub scan: CandidateScan,
}

/// Sweep all candidates with the discrete primitives and pick the
/// KS-minimizing threshold.
///
/// No low-S/N truncation applies here; non-finite KS values (degenerate
/// tails, numerical failures) rank worse than any finite value.
pub(crate) fn select_xmin_discrete(
    sorted: &[f64],
    candidates: &[Candidate],
    opts: &FitOptions,
) -> Result<DiscreteSelection> {
    if candidates.is_empty() {
        return Err(Error::Validation("no threshold candidates".to_string()));
    }

    let eval = |c: &Candidate| {
        let alpha = candidate_alpha(sorted, c.value, opts.discrete_approx, opts.discrete_n_alpha);
        let ks = discrete_ks_statistic(sorted, c.value, alpha);
        let ks = if ks.is_nan() { f64::INFINITY } else { ks };
        (alpha, ks)
    };

    let stats: Vec<(f64, f64)> = match opts.backend {
        BackendKind::Serial => candidates.iter().map(eval).collect(),
        BackendKind::Parallel => candidates.par_iter().map(eval).collect(),
    };

    let ks: Vec<f64> = stats.iter().map(|&(_, k)| k).collect();
    let best = argmin_first(&ks)
        .ok_or_else(|| Error::Computation("no candidate produced a KS distance".to_string()))?;

    let n_total = sorted.len();
    let scan = CandidateScan {
        xmins: candidates.iter().map(|c| c.value).collect(),
        alphas: stats.iter().map(|&(a, _)| a).collect(),
        ks,
        sigmas: stats
            .iter()
            .zip(candidates)
            .map(|(&(a, _), c)| (a - 1.0) / ((n_total - c.rank) as f64).sqrt())
            .collect(),
    };

    Ok(DiscreteSelection { best, scan })
}

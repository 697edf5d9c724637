//! Continuous-case estimator primitives and xmin selector.
//!
//! Per-candidate MLE: `alpha = 1 + n / sum(ln(x_i/xmin))` over the tail
//! `x_i >= xmin`; KS distance compares the tail's empirical CDF against the
//! fitted `1 - (xmin/x)^(alpha-1)`. Each candidate reads only the shared
//! sorted sample, so the sweep is an independent map over candidates.

use pl_core::traits::SweepBackend;
use pl_core::{Candidate, CandidateScan, CandidateStat, Error, Result};
use rayon::prelude::*;

/// Candidates whose alpha standard error reaches this value carry too little
/// signal to pin down the exponent and are rejected by the `nosmall` rule.
const SIGMA_CUTOFF: f64 = 0.1;

/// MLE scaling exponent for the tail at `xmin`.
///
/// Returns the sentinel 0 when fewer than 2 points qualify; callers filter
/// it out rather than treating it as a fit.
pub fn alpha_mle(sorted: &[f64], xmin: f64) -> f64 {
    let tail = &sorted[sorted.partition_point(|&v| v < xmin)..];
    alpha_mle_tail(tail, xmin)
}

/// KS distance between the tail at `xmin` and the power law fitted to it.
///
/// `finite` applies the finite-sample correction to the exponent before the
/// comparison; the selector sweep runs uncorrected.
pub fn ks_statistic(sorted: &[f64], xmin: f64, finite: bool) -> f64 {
    let tail = &sorted[sorted.partition_point(|&v| v < xmin)..];
    ks_tail(tail, xmin, finite)
}

fn alpha_mle_tail(tail: &[f64], xmin: f64) -> f64 {
    let n = tail.len();
    if n < 2 {
        return 0.0;
    }
    let sum_log: f64 = tail.iter().map(|&x| (x / xmin).ln()).sum();
    1.0 + n as f64 / sum_log
}

fn ks_tail(tail: &[f64], xmin: f64, finite: bool) -> f64 {
    let n = tail.len();
    if n == 0 {
        return f64::INFINITY;
    }
    let nf = n as f64;
    let sum_log: f64 = tail.iter().map(|&x| (x / xmin).ln()).sum();
    let mut a = 1.0 + nf / sum_log;
    if finite {
        a = a * (nf - 1.0) / nf + 1.0 / nf;
    }
    let mut d = 0.0_f64;
    for (i, &x) in tail.iter().enumerate() {
        let cx = i as f64 / nf;
        let cf = 1.0 - (xmin / x).powf(a - 1.0);
        let dev = (cf - cx).abs();
        if dev.is_nan() {
            return f64::NAN;
        }
        if dev > d {
            d = dev;
        }
    }
    d
}

fn candidate_stat(sorted: &[f64], c: &Candidate) -> CandidateStat {
    let tail = &sorted[c.rank..];
    CandidateStat {
        alpha: alpha_mle_tail(tail, c.value),
        ks: ks_tail(tail, c.value, false),
    }
}

/// Scalar reference sweep.
pub struct SerialSweep;

impl SweepBackend for SerialSweep {
    fn sweep(&self, sorted: &[f64], candidates: &[Candidate]) -> Vec<CandidateStat> {
        candidates.iter().map(|c| candidate_stat(sorted, c)).collect()
    }

    fn name(&self) -> &str {
        "serial"
    }
}

/// Rayon parallel sweep; same numeric contract as [`SerialSweep`].
pub struct ParallelSweep;

impl SweepBackend for ParallelSweep {
    fn sweep(&self, sorted: &[f64], candidates: &[Candidate]) -> Vec<CandidateStat> {
        candidates.par_iter().map(|c| candidate_stat(sorted, c)).collect()
    }

    fn name(&self) -> &str {
        "parallel"
    }
}

/// Index of the smallest non-NaN value, first occurrence on ties.
pub(crate) fn argmin_first(xs: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in xs.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, bv)) if v >= bv => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

pub(crate) struct ContinuousSelection {
    /// Index of the winning candidate.
    pub best: usize,
    /// Retained per-candidate arrays.
    pub scan: CandidateScan,
}

/// Sweep all candidates and pick the KS-minimizing threshold.
///
/// With `nosmall`, the usable range is truncated at the first candidate whose
/// alpha standard error reaches 0.1; when that truncation would leave
/// nothing (including the case where every candidate clears the bar, which
/// only says the cut never engaged), the full range minus the final
/// single-point candidate is used instead, with a warning. Without
/// `nosmall`, only the final candidate is dropped.
pub(crate) fn select_xmin(
    sorted: &[f64],
    candidates: &[Candidate],
    backend: &dyn SweepBackend,
    nosmall: bool,
) -> Result<ContinuousSelection> {
    if candidates.len() < 2 {
        return Err(Error::Validation(
            "need at least two distinct values to search for xmin".to_string(),
        ));
    }

    let stats = backend.sweep(sorted, candidates);
    let n_total = sorted.len();
    let sigmas: Vec<f64> = stats
        .iter()
        .zip(candidates)
        .map(|(s, c)| (s.alpha - 1.0) / ((n_total - c.rank) as f64).sqrt())
        .collect();

    let nmax = if nosmall {
        match sigmas.iter().position(|&s| !(s < SIGMA_CUTOFF)) {
            Some(i) if i > 0 => i,
            _ => {
                log::warn!(
                    "not enough data left after flagging low-S/N candidates; using all candidates"
                );
                candidates.len() - 1
            }
        }
    } else {
        // The final candidate's tail is a single point and cannot support a
        // power-law fit.
        candidates.len() - 1
    };

    let ks: Vec<f64> = stats.iter().map(|s| s.ks).collect();
    let best = argmin_first(&ks[..nmax]).ok_or_else(|| {
        Error::Computation("no candidate produced a finite KS distance".to_string())
    })?;

    let scan = CandidateScan {
        xmins: candidates.iter().map(|c| c.value).collect(),
        alphas: stats.iter().map(|s| s.alpha).collect(),
        ks,
        sigmas,
    };

    Ok(ContinuousSelection { best, scan })
}

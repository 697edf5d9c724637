//! Piecewise exponential/power-law reference distribution.
//!
//! Exponential below `xmin`, power law at and above it, with a shared
//! normalization constant so the density is continuous (the reference
//! distribution of Clauset et al. 2009 fig. 3.4, used to validate the
//! fitter on data whose lower region is *not* power-law).

use pl_core::{Error, Result};
use rand::Rng;

const QUANTILE_MAX_ITERS: usize = 200;
const QUANTILE_BRACKET_LIMIT: f64 = 1e300;

fn check_params(xmin: f64, alpha: f64) -> Result<()> {
    if !xmin.is_finite() || xmin <= 0.0 {
        return Err(Error::Validation(format!(
            "xmin must be finite and > 0, got {}",
            xmin
        )));
    }
    if !alpha.is_finite() || alpha <= 1.0 {
        return Err(Error::Validation(format!(
            "alpha must be finite and > 1, got {}",
            alpha
        )));
    }
    Ok(())
}

/// Normalization constant shared by both pieces.
fn norm_const(xmin: f64, alpha: f64) -> f64 {
    1.0 / (-xmin / (1.0 - alpha) - xmin / alpha + alpha.exp() * xmin / alpha)
}

/// CDF at `x` (exponential piece below `xmin`, power-law piece above).
pub fn cdf(x: f64, xmin: f64, alpha: f64) -> Result<f64> {
    check_params(xmin, alpha)?;
    if x <= 0.0 {
        return Ok(0.0);
    }
    let c = norm_const(xmin, alpha);
    let v = if x < xmin {
        c * xmin / alpha * alpha.exp() - c * (xmin / alpha) * (-alpha * (x / xmin - 1.0)).exp()
    } else {
        1.0 + c * (xmin / (1.0 - alpha)) * (x / xmin).powf(1.0 - alpha)
    };
    Ok(v.clamp(0.0, 1.0))
}

/// PDF at `x`.
pub fn pdf(x: f64, xmin: f64, alpha: f64) -> Result<f64> {
    check_params(xmin, alpha)?;
    if x <= 0.0 {
        return Ok(0.0);
    }
    let c = norm_const(xmin, alpha);
    let v = if x < xmin {
        c * (-alpha * (x / xmin - 1.0)).exp()
    } else {
        c * (x / xmin).powf(-alpha)
    };
    Ok(v)
}

/// Quantile (inverse CDF) at probability `p` in `[0, 1)`.
///
/// The CDF has no closed-form inverse across the two pieces; the root is
/// bracketed by doubling and then bisected to convergence.
pub fn quantile(p: f64, xmin: f64, alpha: f64) -> Result<f64> {
    check_params(xmin, alpha)?;
    if !(0.0..1.0).contains(&p) {
        return Err(Error::Validation(format!("p must be in [0, 1), got {}", p)));
    }
    if p == 0.0 {
        return Ok(0.0);
    }

    let mut lo = 0.0_f64;
    let mut hi = xmin;
    while cdf(hi, xmin, alpha)? < p {
        lo = hi;
        hi *= 2.0;
        if hi > QUANTILE_BRACKET_LIMIT {
            return Err(Error::Computation(format!(
                "failed to bracket quantile p={}",
                p
            )));
        }
    }
    for _ in 0..QUANTILE_MAX_ITERS {
        let mid = 0.5 * (lo + hi);
        if cdf(mid, xmin, alpha)? < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if (hi - lo) <= f64::EPSILON * hi.abs() {
            break;
        }
    }
    Ok(0.5 * (lo + hi))
}

/// Draw `n` samples by inverse-CDF transform of uniform variates.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, xmin: f64, alpha: f64, n: usize) -> Result<Vec<f64>> {
    check_params(xmin, alpha)?;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let u: f64 = rng.gen();
        out.push(quantile(u, xmin, alpha)?);
    }
    Ok(out)
}

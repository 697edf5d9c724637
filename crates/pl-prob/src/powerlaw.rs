//! Continuous power-law distribution utilities.
//!
//! Density `p(x) = (alpha-1)/xmin * (x/xmin)^-alpha` for `x >= xmin`,
//! with `xmin > 0` and `alpha > 1`.

use pl_core::{Error, Result};
use rand::Rng;

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

/// Log-PDF of the power law at `x`.
///
/// Support: `x >= xmin`.
pub fn logpdf(x: f64, xmin: f64, alpha: f64) -> Result<f64> {
    check_params(xmin, alpha)?;
    if x < xmin {
        return Ok(f64::NEG_INFINITY);
    }
    Ok((alpha - 1.0).ln() - xmin.ln() - alpha * (x / xmin).ln())
}

/// PDF of the power law at `x`.
pub fn pdf(x: f64, xmin: f64, alpha: f64) -> Result<f64> {
    Ok(logpdf(x, xmin, alpha)?.exp())
}

/// CDF of the power law at `x`: `1 - (x/xmin)^(1-alpha)` for `x >= xmin`.
pub fn cdf(x: f64, xmin: f64, alpha: f64) -> Result<f64> {
    check_params(xmin, alpha)?;
    if x < xmin {
        return Ok(0.0);
    }
    Ok(1.0 - (x / xmin).powf(1.0 - alpha))
}

/// Survival function `1 - CDF(x)`.
pub fn sf(x: f64, xmin: f64, alpha: f64) -> Result<f64> {
    check_params(xmin, alpha)?;
    if x < xmin {
        return Ok(1.0);
    }
    Ok((x / xmin).powf(1.0 - alpha))
}

/// Quantile (inverse CDF) at probability `p` in `[0, 1)`.
///
/// `x = xmin * (1-p)^(1/(1-alpha))`.
pub fn quantile(p: f64, xmin: f64, alpha: f64) -> Result<f64> {
    check_params(xmin, alpha)?;
    if !(0.0..1.0).contains(&p) {
        return Err(Error::Validation(format!("p must be in [0, 1), got {}", p)));
    }
    Ok(xmin * (1.0 - p).powf(1.0 / (1.0 - alpha)))
}

/// Draw `n` samples by inverse-CDF transform of uniform variates.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, xmin: f64, alpha: f64, n: usize) -> Result<Vec<f64>> {
    check_params(xmin, alpha)?;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let u: f64 = rng.gen();
        out.push(xmin * (1.0 - u).powf(1.0 / (1.0 - alpha)));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cdf_at_support_edges() {
        assert_eq!(cdf(0.5, 1.0, 2.5).unwrap(), 0.0);
        assert_eq!(cdf(1.0, 1.0, 2.5).unwrap(), 0.0);
        let far = cdf(1e6, 1.0, 2.5).unwrap();
        assert!(far > 0.999999);
    }

    #[test]
    fn test_quantile_inverts_cdf() {
        let (xmin, alpha) = (2.0, 3.0);
        for &p in &[0.0, 0.1, 0.5, 0.9, 0.999] {
            let x = quantile(p, xmin, alpha).unwrap();
            let back = cdf(x, xmin, alpha).unwrap();
            assert!((back - p).abs() < 1e-12, "p={}: got {}", p, back);
        }
    }

    #[test]
    fn test_pdf_known_value() {
        // p(xmin) = (alpha-1)/xmin
        let p = pdf(2.0, 2.0, 3.0).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(cdf(1.0, 0.0, 2.5).is_err());
        assert!(cdf(1.0, -1.0, 2.5).is_err());
        assert!(cdf(1.0, 1.0, 1.0).is_err());
        assert!(quantile(1.0, 1.0, 2.5).is_err());
    }

    #[test]
    fn test_sample_median_matches_quantile() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut xs = sample(&mut rng, 1.0, 2.5, 20_000).unwrap();
        xs.sort_by(f64::total_cmp);
        let median = xs[xs.len() / 2];
        let expected = quantile(0.5, 1.0, 2.5).unwrap();
        assert!(
            (median - expected).abs() / expected < 0.05,
            "median {} vs {}",
            median,
            expected
        );
        assert!(xs.iter().all(|&x| x >= 1.0));
    }
}

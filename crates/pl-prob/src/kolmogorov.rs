//! Kolmogorov-Smirnov survival functions.
//!
//! Two tail probabilities are needed by the fitter:
//! - the exact one-sided, one-sample survival function at finite `n`
//!   (Birnbaum-Tingey), reported as `ks_probability` on fit results;
//! - the asymptotic two-sided Kolmogorov survival function, used by the
//!   lognormal alternative comparison.

use statrs::function::gamma::ln_gamma;

/// Exact one-sided one-sample KS survival function `P(D+ > d)` at `n` points
/// (Birnbaum-Tingey):
///
/// `P = d * sum_{j=0}^{floor(n(1-d))} C(n,j) (d + j/n)^(j-1) (1 - d - j/n)^(n-j)`
///
/// Terms are accumulated in log space to stay finite at large `n`.
pub fn ks_one_sided_sf(d: f64, n: usize) -> f64 {
    if n == 0 || d.is_nan() {
        return f64::NAN;
    }
    if d <= 0.0 {
        return 1.0;
    }
    if d >= 1.0 {
        return 0.0;
    }

    let nf = n as f64;
    let ln_nfact = ln_gamma(nf + 1.0);
    let mut sum = 0.0;
    for j in 0..=n {
        let jf = j as f64;
        let t2 = 1.0 - d - jf / nf;
        if t2 <= 0.0 {
            break;
        }
        let t1 = d + jf / nf;
        let ln_binom = ln_nfact - ln_gamma(jf + 1.0) - ln_gamma(nf - jf + 1.0);
        let ln_term = ln_binom + (jf - 1.0) * t1.ln() + (nf - jf) * t2.ln();
        sum += ln_term.exp();
    }
    (d * sum).clamp(0.0, 1.0)
}

/// Asymptotic two-sided Kolmogorov survival function
/// `Q(t) = 2 sum_{k>=1} (-1)^(k-1) exp(-2 k^2 t^2)`.
pub fn kolmogorov_sf(t: f64) -> f64 {
    if t.is_nan() {
        return f64::NAN;
    }
    // Q -> 1 as t -> 0; the series converges too slowly below ~0.1 and the
    // answer there is 1 to well past double precision.
    if t <= 0.1 {
        return 1.0;
    }
    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let kf = k as f64;
        let term = (-2.0 * kf * kf * t * t).exp();
        sum += sign * term;
        if term < 1e-16 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_sided_closed_form_n1() {
        // n = 1: P(D+ > d) = 1 - d
        for &d in &[0.1, 0.25, 0.5, 0.9] {
            let p = ks_one_sided_sf(d, 1);
            assert!((p - (1.0 - d)).abs() < 1e-12, "d={}: {}", d, p);
        }
    }

    #[test]
    fn test_one_sided_closed_form_n2() {
        // n = 2: P = 1 - d - d^2 for d < 1/2, (1-d)^2 above
        let p = ks_one_sided_sf(0.3, 2);
        assert!((p - 0.61).abs() < 1e-12, "{}", p);
        let p = ks_one_sided_sf(0.6, 2);
        assert!((p - 0.16).abs() < 1e-12, "{}", p);
    }

    #[test]
    fn test_one_sided_bounds_and_monotonicity() {
        for &n in &[5usize, 50, 1000] {
            let mut prev = 1.0;
            for i in 1..100 {
                let d = i as f64 / 100.0;
                let p = ks_one_sided_sf(d, n);
                assert!((0.0..=1.0).contains(&p));
                assert!(p <= prev + 1e-12, "not monotone at d={}, n={}", d, n);
                prev = p;
            }
        }
        assert_eq!(ks_one_sided_sf(0.0, 10), 1.0);
        assert_eq!(ks_one_sided_sf(1.0, 10), 0.0);
    }

    #[test]
    fn test_kolmogorov_known_values() {
        assert!((kolmogorov_sf(1.0) - 0.269_999_67).abs() < 1e-6);
        assert!((kolmogorov_sf(0.5) - 0.963_945_24).abs() < 1e-6);
        assert_eq!(kolmogorov_sf(0.05), 1.0);
        assert!(kolmogorov_sf(4.0) < 1e-10);
    }
}

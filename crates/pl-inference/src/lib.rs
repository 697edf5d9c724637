//! # pl-inference
//!
//! Power-law tail estimation following Clauset, Shalizi and Newman,
//! "Power-law distributions in empirical data", SIAM Review 51, 661-703
//! (2009), arXiv:0706.1062.
//!
//! The core is the joint `xmin`/`alpha` search: every distinct sample value
//! is a threshold candidate, a maximum-likelihood exponent and a
//! Kolmogorov-Smirnov distance are computed per candidate, and the
//! KS-minimizing threshold wins. Continuous and integer-valued (discrete)
//! data get separate estimator families, selected automatically or forced
//! via [`FitOptions`].
//!
//! ```
//! use pl_inference::PowerLawFitter;
//!
//! let data: Vec<f64> = (1..=500).map(|i| (i as f64).powf(0.8) + 0.25).collect();
//! let fit = PowerLawFitter::new().fit(&data).unwrap();
//! println!("xmin = {}, alpha = {} +/- {}", fit.xmin, fit.alpha, fit.alpha_error);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Fit configuration.
pub mod config;
/// Continuous-case primitives, sweep backends, and xmin selector.
pub mod continuous;
/// Discrete-case primitives (zeta likelihood) and xmin selector.
pub mod discrete;
/// The fit orchestrator.
pub mod fit;
/// Lognormal alternative-hypothesis comparison (experimental).
pub mod lognormal;
/// Least-squares log-log comparison fit.
pub mod lsq;
/// Monte-Carlo goodness-of-fit toys.
pub mod toys;

pub use config::{BackendKind, FitOptions};
pub use fit::{fit, PowerLawFitter};
pub use lognormal::{lognormal_alternative, LognormalComparison};
pub use pl_core::{CandidateScan, Error, PowerLawFit, Result};
pub use toys::{ks_toy_test, KsToyTest};

//! Probability building blocks for the powerlaw workspace.
//!
//! This crate hosts reusable probability math with no dependency on the
//! fitting layer:
//! - the continuous power-law distribution (pdf/cdf/quantile/sampling)
//! - the piecewise exponential/power-law reference distribution used for
//!   fitter validation
//! - the Hurwitz zeta function (discrete likelihood normalization)
//! - Kolmogorov-Smirnov survival functions (goodness-of-fit tail
//!   probabilities)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kolmogorov;
pub mod plexp;
pub mod powerlaw;
pub mod zeta;

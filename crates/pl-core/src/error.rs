//! Error types for the powerlaw workspace.

use thiserror::Error;

/// Powerlaw error type
#[derive(Error, Debug)]
pub enum Error {
    /// Input validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// The selector's alpha and the directly recomputed alpha disagree.
    ///
    /// This guards against numerical drift between the sweep and the scalar
    /// recomputation; it can be suppressed via
    /// `FitOptions::skip_consistency_check`.
    #[error(
        "inconsistent fit: selector alpha {selector} vs directly recomputed alpha {direct}; \
         set skip_consistency_check if the difference is acceptable"
    )]
    InconsistentAlpha {
        /// Alpha reported by the candidate sweep at the winning threshold.
        selector: f64,
        /// Alpha recomputed directly at the winning threshold.
        direct: f64,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

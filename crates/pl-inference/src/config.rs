//! Fit configuration.

/// Which sweep backend computes the per-candidate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Scalar loop over candidates; the numeric reference.
    Serial,
    /// Rayon parallel map over candidates. Same contract as `Serial`.
    Parallel,
}

/// Options controlling a power-law fit.
///
/// Defaults match the reference methodology: search for `xmin`,
/// auto-classify continuous vs discrete, approximate discrete estimator,
/// no finite-size correction, low-S/N candidate rejection on.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Force a specific threshold, skipping the candidate search.
    pub xmin: Option<f64>,
    /// Force the discrete (`true`) or continuous (`false`) estimator family.
    ///
    /// `None` classifies automatically: any repeated value means discrete.
    /// This heuristic is unreliable for continuous data with incidental ties
    /// (e.g. flagged sentinel values); force the mode if you know it.
    pub discrete: Option<bool>,
    /// Use the closed-form discrete MLE (`true`) instead of maximizing the
    /// zeta-based likelihood over a grid zoomed around it (`false`).
    pub discrete_approx: bool,
    /// Grid resolution for the exact discrete likelihood search.
    pub discrete_n_alpha: usize,
    /// Apply the finite-sample bias correction to the final alpha.
    pub finite: bool,
    /// Reject candidates whose alpha standard error reaches 0.1 before
    /// selecting the KS minimum (continuous path only).
    pub nosmall: bool,
    /// Remove values `<= 0` (with a warning) instead of rejecting negative
    /// input outright.
    pub strip_nonpositive: bool,
    /// Suppress the post-selection alpha cross-check failure.
    pub skip_consistency_check: bool,
    /// Sweep backend selection.
    pub backend: BackendKind,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            xmin: None,
            discrete: None,
            discrete_approx: true,
            discrete_n_alpha: 1000,
            finite: false,
            nosmall: true,
            strip_nonpositive: false,
            skip_consistency_check: false,
            backend: BackendKind::Parallel,
        }
    }
}

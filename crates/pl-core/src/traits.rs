//! Core traits for the powerlaw workspace.
//!
//! The sweep-backend trait decouples the threshold selector from the code
//! computing per-candidate statistics, so serial and parallel
//! implementations are interchangeable behind one numeric contract.

use crate::types::{Candidate, CandidateStat};

/// Candidate-sweep backend.
///
/// Computes the `(alpha, ks)` pair for every threshold candidate over the
/// shared, immutable sorted sample. Each candidate's computation is
/// independent, so implementations may fan out freely; all implementations
/// must agree with the serial reference within 1e-4 relative tolerance.
pub trait SweepBackend: Send + Sync {
    /// Per-candidate statistics, indexed by candidate rank order.
    fn sweep(&self, sorted: &[f64], candidates: &[Candidate]) -> Vec<CandidateStat>;

    /// Backend name (e.g. "serial", "parallel").
    fn name(&self) -> &str;
}

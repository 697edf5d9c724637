//! Core types for the powerlaw workspace.
//!
//! This crate holds what every other layer shares: the error type, the fit
//! result and candidate-scan data types, and the sweep-backend trait that
//! decouples the threshold selector from the code computing per-candidate
//! statistics.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use types::{Candidate, CandidateScan, CandidateStat, PowerLawFit};

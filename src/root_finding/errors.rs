//! Root-finding error types shared by every operation.
//!
//! ┌ [`RootFindingError`] : common runtime and configuration errors
//! │   ├ non-finite function evaluation
//! │   └ invalid configuration (tolerance, resolution, thresholds)
//! │
//! ├ [`crate::root_finding::regula_falsi::FalsiError`] : solver errors
//! └ [`crate::root_finding::search::SearchError`]      : bracket search errors
//!
//! Algorithm-specific enums wrap [`RootFindingError`] transparently.

use thiserror::Error;


/// Root-finding runtime and configuration errors.
///
/// ┌ Non-finite function evaluation
/// ├ Invalid tolerance (<= 0 or non-finite)
/// ├ Invalid resolution (< 1)
/// ├ Invalid stagnation threshold (< 1)
/// └ Invalid bracket search attempt cap (< 1)
#[derive(Debug, Error)]
pub enum RootFindingError {
    #[error("function non-finite at x={x}, f(x)={fx}")]
    NonFiniteEvaluation { x: f64, fx: f64 },

    #[error("invalid `tolerance`: must be finite and > 0. got {got}")]
    InvalidTolerance { got: f64 },

    #[error("invalid `resolution`: must be >= 1. got resolution={got}")]
    InvalidResolution { got: usize },

    #[error("invalid `stagnation_threshold`: must be >= 1. got {got}")]
    InvalidStagnationThreshold { got: usize },

    #[error("invalid `max_attempts`: must be >= 1. got {got}")]
    InvalidMaxAttempts { got: usize },
}

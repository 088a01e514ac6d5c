//! Defines the [`RootReport`] returned by a converged solve.

use super::bracket::Bracket;


/// Final report of a converged modified regula falsi run.
///
/// [`RootReport`]
/// - `root`          : root estimate, |f(root)| < tolerance
/// - `f_root`        : function value at `root`
/// - `iterations`    : false-position iterations, 0 if an initial bound was a root
/// - `evals`         : total function evaluations (at most resolution + 2)
/// - `bracket`       : final bracket; contains `root`
/// - `modifications` : how many times a stale endpoint value was scaled
/// - `algorithm`     : variant name (e.g. `"regula_falsi_illinois"`)
///
/// Runs that do not converge never produce a report; see
/// [`crate::root_finding::regula_falsi::FalsiError::NonConvergence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootReport {
    pub root:          f64,
    pub f_root:        f64,
    pub iterations:    usize,
    pub evals:         usize,
    pub bracket:       Bracket,
    pub modifications: usize,
    pub algorithm:     &'static str,
}

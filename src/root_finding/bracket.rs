//! Bracketing interval and per-iteration history record.
//!
//! [`Bracket`]     : `[left, right]` with `f(left) * f(right) <= 0`
//! [`BracketStep`] : one iteration of the solver, as yielded by
//!                   [`crate::root_finding::regula_falsi::BracketHistory`]

use super::stagnation::Side;


/// Closed interval `[left, right]` known to contain a sign change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub left:  f64,
    pub right: f64,
}

impl Bracket {
    #[must_use]
    pub fn new(left: f64, right: f64) -> Self { Self { left, right } }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 { self.right - self.left }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: f64) -> bool { self.left <= x && x <= self.right }

    /// Endpoints as an `(a, b)` pair, e.g. for plotting.
    #[inline]
    #[must_use]
    pub fn pair(&self) -> (f64, f64) { (self.left, self.right) }
}


/// One solver iteration.
///
/// ├ `iteration` : 1-based iteration number
/// ├ `estimate`  : false-position iterate `c`
/// ├ `residual`  : `f(c)`
/// ├ `bracket`   : bracket after the endpoint update; unchanged on the converging step
/// └ `scaled`    : endpoint whose function value was scaled this iteration, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketStep {
    pub iteration: usize,
    pub estimate:  f64,
    pub residual:  f64,
    pub bracket:   Bracket,
    pub scaled:    Option<Side>,
}


/// Returns `true` if the two residuals straddle zero (or touch it).
#[inline]
pub(crate) fn straddles_zero(fa: f64, fb: f64) -> bool {
    fa == 0.0 || fb == 0.0 || fa.is_sign_negative() != fb.is_sign_negative()
}


/// Checks the initial bounds and orders them as `(left, right)`.
///
/// Returns `None` if either bound is NaN/inf or both are equal.
pub(crate) fn ordered_bounds(a: f64, b: f64) -> Option<(f64, f64)> {
    #[allow(clippy::float_cmp)]
    if !(a.is_finite() && b.is_finite()) || a == b {
        return None;
    }
    Some(if a < b { (a, b) } else { (b, a) })
}

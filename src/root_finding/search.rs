//! Search for a usable initial bracket.
//!
//! [`modified_regula_falsi`](super::regula_falsi::modified_regula_falsi)
//! rejects bounds whose values share a sign. [`search_bracket`] is the
//! opt-in repair step: starting from two guesses it extrapolates along
//! the secant, assuming the function decays toward its root, until the
//! values straddle zero or the attempt cap is hit.

use thiserror::Error;

use super::bracket::{ordered_bounds, straddles_zero, Bracket};
use super::errors::RootFindingError;
use super::regula_falsi::evaluate;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Common(#[from] RootFindingError),

    #[error("invalid bounds: a and b must be finite and distinct. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },

    #[error("flat secant on [{a}, {b}]: cannot extrapolate a new guess")]
    FlatSlope { a: f64, b: f64 },

    #[error("no sign change found after {attempts} attempts, last window [{a}, {b}]")]
    NotFound { a: f64, b: f64, attempts: usize },
}


/// Bracket search configuration.
///
/// # Defaults
/// └ DEFAULT_MAX_ATTEMPTS - 1000 extrapolation attempts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchCfg {
    max_attempts: Option<usize>,
}

impl SearchCfg {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_max_attempts(mut self, v: usize) -> Self { self.max_attempts = Some(v); self }

    #[inline]
    #[must_use]
    pub fn max_attempts(&self) -> usize { self.max_attempts.unwrap_or(Self::DEFAULT_MAX_ATTEMPTS) }

    /// # Errors
    /// └ [`RootFindingError::InvalidMaxAttempts`] - `max_attempts` == 0
    pub fn validate(&self) -> Result<SearchCfg, RootFindingError> {
        let max_attempts = self.max_attempts();
        if max_attempts == 0 {
            return Err(RootFindingError::InvalidMaxAttempts { got: max_attempts });
        }
        Ok(Self { max_attempts: Some(max_attempts) })
    }
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self { max_attempts: Some(Self::DEFAULT_MAX_ATTEMPTS) }
    }
}


/// Outcome of a successful [`search_bracket`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BracketSearch {
    /// A guess evaluated to exactly zero.
    Root(f64),
    /// Bounds whose values straddle zero.
    Bracket(Bracket),
}


/// Extrapolates a new guess from the secant through `(a, fa)` and
/// `(b, fb)`, aiming past zero on the side the slope points to.
///
/// Targets a value of opposite sign to `fa`: `|fb|` when the slope already
/// heads that way, `2|fb|` otherwise (the function is assumed to decay).
fn decay_guess(
    (a, fa): (f64, f64),
    (b, fb): (f64, f64),
) -> Result<f64, SearchError> {
    let slope = (fb - fa) / (b - a);
    if slope == 0.0 || !slope.is_finite() {
        return Err(SearchError::FlatSlope { a, b });
    }

    let target = match (fa < 0.0, slope < 0.0) {
        (true,  true)  => fb.abs(),
        (true,  false) => 2.0 * fb.abs(),
        (false, true)  => -2.0 * fb.abs(),
        (false, false) => -fb.abs(),
    };

    let c = (target - fa) / slope + a;
    if !c.is_finite() {
        return Err(SearchError::FlatSlope { a, b });
    }
    Ok(c)
}


/// Searches for bounds around a root of `func`, starting from `a` and `b`.
///
/// # Returns
/// ├ [`BracketSearch::Bracket`] unchanged if `func(a)` and `func(b)` already straddle zero
/// ├ [`BracketSearch::Root`]    if any evaluated guess is exactly a root
/// └ [`BracketSearch::Bracket`] with the repaired bounds otherwise
///
/// Each attempt extrapolates a guess `c` along the secant:
/// ├ `c` below the window  : window becomes `[c, a]`
/// ├ `c` above the window  : window becomes `[b, c]`
/// └ `c` inside the window : a sign change against either end is returned,
///                           else `c` replaces the end with the larger `|f|`
///
/// # Errors
/// ┌ [`SearchError::InvalidBounds`] - `a` or `b` is NaN/inf, or `a == b`.
/// ├ [`SearchError::FlatSlope`]     - the secant is flat or extrapolation overflows.
/// ├ [`SearchError::NotFound`]      - `max_attempts` spent without a sign change.
/// │
/// * The following are propagated via [`SearchError::Common`]
/// ├ [`RootFindingError::NonFiniteEvaluation`] - `func` returned NaN or inf.
/// └ [`RootFindingError::InvalidMaxAttempts`]  - `cfg.max_attempts` == 0.
pub fn search_bracket<F>(
    mut func: F,
    a: f64,
    b: f64,
    cfg: SearchCfg,
) -> Result<BracketSearch, SearchError>
where F: FnMut(f64) -> f64 {

    let cfg = cfg.validate()?;
    let (mut a, mut b) = ordered_bounds(a, b).ok_or(SearchError::InvalidBounds { a, b })?;

    let mut evals = 0;
    let mut fa = evaluate(&mut func, &mut evals, a)?;
    let mut fb = evaluate(&mut func, &mut evals, b)?;

    if fa == 0.0 { return Ok(BracketSearch::Root(a)); }
    if fb == 0.0 { return Ok(BracketSearch::Root(b)); }
    if straddles_zero(fa, fb) {
        return Ok(BracketSearch::Bracket(Bracket::new(a, b)));
    }

    for _ in 0..cfg.max_attempts() {
        let c  = decay_guess((a, fa), (b, fb))?;
        let fc = evaluate(&mut func, &mut evals, c)?;
        if fc == 0.0 {
            return Ok(BracketSearch::Root(c));
        }

        if c < a {
            (a, fa, b, fb) = (c, fc, a, fa);
        } else if c > b {
            (a, fa, b, fb) = (b, fb, c, fc);
        } else {
            if straddles_zero(fa, fc) {
                return Ok(BracketSearch::Bracket(Bracket::new(a, c)));
            }
            if straddles_zero(fc, fb) {
                return Ok(BracketSearch::Bracket(Bracket::new(c, b)));
            }
            if fa.abs() >= fb.abs() {
                (a, fa) = (c, fc);
            } else {
                (b, fb) = (c, fc);
            }
        }

        if straddles_zero(fa, fb) {
            return Ok(BracketSearch::Bracket(Bracket::new(a, b)));
        }
    }

    Err(SearchError::NotFound { a, b, attempts: cfg.max_attempts() })
}

use std::iter::FusedIterator;

use thiserror::Error;

use super::bracket::{ordered_bounds, straddles_zero, Bracket, BracketStep};
use super::config::FalsiCfg;
use super::errors::RootFindingError;
use super::report::RootReport;
use super::stagnation::{Side, StagnationCounter};

#[derive(Debug, Error)]
pub enum FalsiError {
    #[error(transparent)]
    Common(#[from] RootFindingError),

    #[error("invalid bounds: a and b must be finite and distinct. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },

    #[error("no sign change on [{a}, {b}]: f(a)={fa}, f(b)={fb}")]
    NoSignChange { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("degenerate bracket [{a}, {b}]: f(b) - f(a) vanishes with fa={fa}, fb={fb}")]
    DegenerateBracket { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("no convergence after {iterations} iterations: last estimate x={x}, f(x)={fx}")]
    NonConvergence { x: f64, fx: f64, iterations: usize },
}


/// Calculates the false-position intersection of the line through
/// `(a, fa)` and `(b, fb)` with the x-axis.
///
/// `fa` and `fb` may be scaled values; only their ratio matters.
///
/// Works with the fraction `fa / (fa - fb)` of the bracket width, which
/// lies in `[0, 1]` when the values straddle zero, so large function
/// values never overflow the estimate.
///
/// # Returns
/// ├ `Ok(x)` clamped into `[a, b]` against rounding
/// └ `Err(DegenerateBracket)` if the fraction is not finite, i.e. `fa == fb`
#[inline]
fn false_position(
    (a, fa): (f64, f64),
    (b, fb): (f64, f64),
) -> Result<f64, FalsiError> {
    let diff = fa - fb;
    let ratio = if diff.is_finite() { fa / diff } else { 1.0 / (1.0 - fb / fa) };

    if !ratio.is_finite() {
        return Err(FalsiError::DegenerateBracket { a, b, fa, fb });
    }

    let width = b - a;
    let x = if width.is_finite() {
        a + ratio * width
    } else {
        a * (1.0 - ratio) + b * ratio
    };

    Ok(x.clamp(a, b))
}


/// Evaluates `func` at `x`, counting the call and rejecting NaN/inf.
#[inline]
pub(crate) fn evaluate<F>(func: &mut F, evals: &mut usize, x: f64) -> Result<f64, RootFindingError>
where F: FnMut(f64) -> f64 {
    *evals += 1;
    let fx = func(x);
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(RootFindingError::NonFiniteEvaluation { x, fx })
    }
}


/// Lazily iterated modified regula falsi run.
///
/// Created by [`bracket_history`]. Each call to [`Iterator::next`]
/// performs one false-position iteration and yields a [`BracketStep`]
/// carrying the updated bracket. The sequence is finite (at most
/// `resolution` steps), fused, and cannot be restarted.
///
/// Once it yields `None` the run is over and [`BracketHistory::finish`]
/// returns the outcome. `finish` can also be called mid-run; it drives
/// the remaining iterations first.
pub struct BracketHistory<F> {
    func:          F,
    cfg:           FalsiCfg,
    // (x, f(x)); the f value may have been scaled by the modification step
    left:          (f64, f64),
    right:         (f64, f64),
    stagnation:    StagnationCounter,
    last:          (f64, f64),
    iterations:    usize,
    evals:         usize,
    modifications: usize,
    outcome:       Option<Result<RootReport, FalsiError>>,
}

impl<F> BracketHistory<F>
where F: FnMut(f64) -> f64 {

    /// Current bracket.
    #[must_use]
    pub fn bracket(&self) -> Bracket { Bracket::new(self.left.0, self.right.0) }

    /// Iterations performed so far.
    #[must_use]
    pub fn iterations(&self) -> usize { self.iterations }

    /// Function evaluations performed so far, including both bounds.
    #[must_use]
    pub fn evals(&self) -> usize { self.evals }

    /// `true` once the run converged, failed, or ran out of iterations.
    #[must_use]
    pub fn is_finished(&self) -> bool { self.outcome.is_some() }

    /// Outcome of a finished run, `None` while still iterating.
    #[must_use]
    pub fn outcome(&self) -> Option<&Result<RootReport, FalsiError>> { self.outcome.as_ref() }

    /// Runs the remaining iterations and returns the outcome.
    ///
    /// # Errors
    /// See [`modified_regula_falsi`].
    pub fn finish(mut self) -> Result<RootReport, FalsiError> {
        while self.next().is_some() {}
        match self.outcome.take() {
            Some(outcome) => outcome,
            None          => Err(self.non_convergence()),
        }
    }

    fn report(&self, root: f64, f_root: f64) -> RootReport {
        RootReport {
            root,
            f_root,
            iterations:    self.iterations,
            evals:         self.evals,
            bracket:       self.bracket(),
            modifications: self.modifications,
            algorithm:     self.cfg.variant().algorithm_name(),
        }
    }

    fn non_convergence(&self) -> FalsiError {
        let (x, fx) = self.last;
        FalsiError::NonConvergence { x, fx, iterations: self.iterations }
    }

    /// One false-position iteration followed by the modification step.
    fn iterate(&mut self) -> Result<BracketStep, FalsiError> {
        let (a, fa) = self.left;
        let (b, fb) = self.right;

        let c  = false_position((a, fa), (b, fb))?;
        let fc = evaluate(&mut self.func, &mut self.evals, c)?;
        self.iterations += 1;
        self.last = (c, fc);

        if fc.abs() < self.cfg.tolerance() {
            self.outcome = Some(Ok(self.report(c, fc)));
            return Ok(BracketStep {
                iteration: self.iterations,
                estimate:  c,
                residual:  fc,
                bracket:   self.bracket(),
                scaled:    None,
            });
        }

        // root in [a, c] -> the right end moves, else the left one does
        let (moved, f_old) = if straddles_zero(fa, fc) {
            self.right = (c, fc);
            (Side::Right, fb)
        } else {
            self.left = (c, fc);
            (Side::Left, fa)
        };
        self.stagnation.record_move(moved);

        let stale = moved.opposite();
        let mut scaled = None;
        if self.stagnation.is_stale(stale, self.cfg.stagnation_threshold()) {
            if let Some(factor) = self.cfg.variant().scale_factor(f_old, fc) {
                match stale {
                    Side::Left  => self.left.1  *= factor,
                    Side::Right => self.right.1 *= factor,
                }
                self.modifications += 1;
                scaled = Some(stale);
            }
        }

        Ok(BracketStep {
            iteration: self.iterations,
            estimate:  c,
            residual:  fc,
            bracket:   self.bracket(),
            scaled,
        })
    }
}

impl<F> Iterator for BracketHistory<F>
where F: FnMut(f64) -> f64 {
    type Item = BracketStep;

    fn next(&mut self) -> Option<BracketStep> {
        if self.outcome.is_some() {
            return None;
        }

        if self.iterations >= self.cfg.resolution() {
            self.outcome = Some(Err(self.non_convergence()));
            return None;
        }

        match self.iterate() {
            Ok(step) => Some(step),
            Err(err) => {
                self.outcome = Some(Err(err));
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.outcome.is_some() {
            (0, Some(0))
        } else {
            (0, Some(self.cfg.resolution() - self.iterations))
        }
    }
}

impl<F> FusedIterator for BracketHistory<F> where F: FnMut(f64) -> f64 {}


/// Validates the inputs, evaluates both bounds, and returns the run as a
/// lazy sequence of [`BracketStep`]s.
///
/// Bracket and configuration problems surface here, before any iteration.
/// If a bound is already a root the returned history is finished and
/// yields nothing.
///
/// # Errors
/// Same as [`modified_regula_falsi`], except that the iteration-time
/// errors (`DegenerateBracket`, `NonConvergence`, non-finite `f(c)`) are
/// reported by [`BracketHistory::finish`].
pub fn bracket_history<F>(
    mut func: F,
    a: f64,
    b: f64,
    cfg: FalsiCfg,
) -> Result<BracketHistory<F>, FalsiError>
where F: FnMut(f64) -> f64 {

    let cfg = cfg.validate()?;
    let (a, b) = ordered_bounds(a, b).ok_or(FalsiError::InvalidBounds { a, b })?;
    let tolerance = cfg.tolerance();

    let mut evals = 0;
    let fa = evaluate(&mut func, &mut evals, a)?;
    let fb = if fa.abs() < tolerance { fa } else { evaluate(&mut func, &mut evals, b)? };

    let mut history = BracketHistory {
        func,
        cfg,
        left:          (a, fa),
        right:         (b, fb),
        stagnation:    StagnationCounter::new(),
        last:          if fa.abs() <= fb.abs() { (a, fa) } else { (b, fb) },
        iterations:    0,
        evals,
        modifications: 0,
        outcome:       None,
    };

    // immediate bounds are roots
    if fa.abs() < tolerance {
        history.outcome = Some(Ok(history.report(a, fa)));
        return Ok(history);
    }
    if fb.abs() < tolerance {
        history.outcome = Some(Ok(history.report(b, fb)));
        return Ok(history);
    }

    if !straddles_zero(fa, fb) {
        return Err(FalsiError::NoSignChange { a, b, fa, fb });
    }

    Ok(history)
}


/// Finds a root of `func` in `[a, b]` with the
/// [modified regula falsi method](https://en.wikipedia.org/wiki/Regula_falsi#The_Illinois_algorithm).
///
/// Each iteration interpolates the line through `(a, f(a))` and `(b, f(b))`
/// and replaces the endpoint whose value shares the sign of the new
/// estimate. When one endpoint stays put for more than
/// `cfg.stagnation_threshold()` consecutive iterations, its function value
/// (never its position) is scaled according to `cfg.variant()`, pulling
/// the next interpolation toward it.
///
/// # Arguments
///
/// ┌ `func` - continuous function on `[a, b]`; extra arguments are captured
/// │          by the closure, see [`bind`]
/// ├ `a, b` - bracket bounds, finite and distinct, in either order
/// └ `cfg`  - tolerance, resolution, stagnation threshold and variant.
///            See [`FalsiCfg`]
///
/// # Returns
///
/// A [`RootReport`] whose `root` satisfies `|func(root)| < cfg.tolerance()`.
/// `iterations` is 0 if a bound is already a root. `func` is called at
/// most `cfg.resolution() + 2` times.
///
/// # Errors
///
/// ┌ [`FalsiError::InvalidBounds`]     - `a` or `b` is NaN/inf, or `a == b`.
/// ├ [`FalsiError::NoSignChange`]      - `func(a)` and `func(b)` share a sign. No iteration is run.
/// ├ [`FalsiError::DegenerateBracket`] - `f(b) - f(a)` vanished during interpolation.
/// ├ [`FalsiError::NonConvergence`]    - `resolution` iterations without meeting the tolerance.
/// │                                     Carries the last estimate and its residual.
/// │
/// * The following are propagated via [`FalsiError::Common`]
/// ├ [`RootFindingError::NonFiniteEvaluation`]        - `func` returned NaN or inf.
/// ├ [`RootFindingError::InvalidTolerance`]           - `tolerance` <= 0 or not finite.
/// ├ [`RootFindingError::InvalidResolution`]          - `resolution` == 0.
/// └ [`RootFindingError::InvalidStagnationThreshold`] - `stagnation_threshold` == 0.
pub fn modified_regula_falsi<F>(
    func: F,
    a: f64,
    b: f64,
    cfg: FalsiCfg,
) -> Result<RootReport, FalsiError>
where F: FnMut(f64) -> f64 {
    bracket_history(func, a, b, cfg)?.finish()
}


/// [`modified_regula_falsi`] with only a tolerance and a resolution;
/// every other setting keeps its default.
///
/// # Errors
/// See [`modified_regula_falsi`].
pub fn find_root<F>(
    func: F,
    a: f64,
    b: f64,
    tolerance: f64,
    resolution: usize,
) -> Result<RootReport, FalsiError>
where F: FnMut(f64) -> f64 {
    let cfg = FalsiCfg::new()
        .with_tolerance(tolerance)
        .with_resolution(resolution);
    modified_regula_falsi(func, a, b, cfg)
}


/// Pre-binds `args` to a two-argument function, producing the
/// single-argument closure the solvers expect.
///
/// ```
/// use falsi::root_finding::regula_falsi::{bind, find_root};
///
/// struct Shift { by: f64 }
///
/// let f = bind(|x: f64, s: &Shift| x - s.by, Shift { by: 3.0 });
/// let report = find_root(f, 0.0, 5.0, 1e-10, 50).unwrap();
/// assert!((report.root - 3.0).abs() < 1e-10);
/// ```
pub fn bind<A, F>(mut func: F, args: A) -> impl FnMut(f64) -> f64
where F: FnMut(f64, &A) -> f64 {
    move |x| func(x, &args)
}

//! Endpoint stagnation tracking for the modification step.
//!
//! Plain false position can keep replacing the same endpoint while the
//! other one freezes. The crate-internal `StagnationCounter` counts, per
//! side, how many consecutive iterations an endpoint stayed put; once that
//! count exceeds the configured threshold the stale endpoint's function
//! value is scaled by the [`RegulaFalsiVariant`] factor before the next
//! interpolation.

/// Bracket endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left  => Side::Right,
            Side::Right => Side::Left,
        }
    }
}


/// Which false-position scaling rule to apply to a stale endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegulaFalsiVariant {
    // classic regula falsi, no scaling: stalls on convex/concave functions
    Pure,

    // halve the stale endpoint's function value
    #[default]
    Illinois,

    // scale by `f_old / (f_old + f_new)`, where `f_old` and `f_new` are the
    // replaced and replacing values of the endpoint that moved
    Pegasus,

    // scale by `1 - f_new / f_old`, or halve when that is not positive
    AndersonBjorck,
}

impl RegulaFalsiVariant {
    /// Factor applied to the stale endpoint's function value, or `None`
    /// when the variant never scales.
    ///
    /// `f_old` and `f_new` share a sign: both are values of the endpoint
    /// that just moved, before and after the move.
    #[must_use]
    pub fn scale_factor(self, f_old: f64, f_new: f64) -> Option<f64> {
        match self {
            RegulaFalsiVariant::Pure     => None,
            RegulaFalsiVariant::Illinois => Some(0.5),
            RegulaFalsiVariant::Pegasus  => {
                let factor = f_old / (f_old + f_new);
                if factor.is_finite() && factor > 0.0 { Some(factor) } else { Some(0.5) }
            },
            RegulaFalsiVariant::AndersonBjorck => {
                let ratio = 1.0 - f_new / f_old;
                if ratio.is_finite() && ratio > 0.0 { Some(ratio) } else { Some(0.5) }
            },
        }
    }

    #[must_use]
    pub const fn algorithm_name(self) -> &'static str {
        match self {
            RegulaFalsiVariant::Pure           => "regula_falsi_pure",
            RegulaFalsiVariant::Illinois       => "regula_falsi_illinois",
            RegulaFalsiVariant::Pegasus        => "regula_falsi_pegasus",
            RegulaFalsiVariant::AndersonBjorck => "regula_falsi_anderson_bjorck",
        }
    }
}

impl std::fmt::Display for RegulaFalsiVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}


/// Consecutive non-move counts for both endpoints.
///
/// ┌ [`StagnationCounter::record_move`] resets the moved side and bumps the other
/// └ scaling a stale value never resets a count; only a real move does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct StagnationCounter {
    left:  usize,
    right: usize,
}

impl StagnationCounter {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Records that `moved` was replaced this iteration.
    pub fn record_move(&mut self, moved: Side) {
        match moved {
            Side::Left  => { self.left = 0; self.right += 1; },
            Side::Right => { self.right = 0; self.left += 1; },
        }
    }

    #[inline]
    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        match side {
            Side::Left  => self.left,
            Side::Right => self.right,
        }
    }

    /// `true` if `side` has stayed put for more than `threshold` iterations.
    #[inline]
    #[must_use]
    pub fn is_stale(&self, side: Side, threshold: usize) -> bool {
        self.count(side) > threshold
    }
}

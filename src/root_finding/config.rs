//! Solver configuration for the modified regula falsi method.
//!
//! [`FalsiCfg`] is validated at the boundary of every solve
//! ├ `tolerance`            : residual tolerance, converged when |f(c)| < tolerance
//! ├ `resolution`           : iteration cap
//! ├ `stagnation_threshold` : consecutive non-moves of an endpoint tolerated
//! │                          before its function value is scaled
//! └ `variant`              : scaling rule, see [`RegulaFalsiVariant`]
//!
//! Unset fields fall back to the `DEFAULT_*` associated constants.

use super::errors::RootFindingError;
use super::stagnation::RegulaFalsiVariant;


/// Modified regula falsi configuration.
///
/// # Defaults
///
/// ┌ DEFAULT_TOLERANCE            - 1e-12
/// ├ DEFAULT_RESOLUTION           - 100 iterations
/// ├ DEFAULT_STAGNATION_THRESHOLD - 1, i.e. scale on the second consecutive non-move
/// └ variant                      - [`RegulaFalsiVariant::Illinois`]
///
/// # Validation
/// └ Performed by [`FalsiCfg::validate()`] before any function evaluation.
///
///    ├ `tolerance`            > 0 and finite
///    ├ `resolution`           >= 1
///    └ `stagnation_threshold` >= 1
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FalsiCfg {
    tolerance:            Option<f64>,
    resolution:           Option<usize>,
    stagnation_threshold: Option<usize>,
    variant:              RegulaFalsiVariant,
}

impl FalsiCfg {
    pub const DEFAULT_TOLERANCE:            f64   = 1e-12;
    pub const DEFAULT_RESOLUTION:           usize = 100;
    pub const DEFAULT_STAGNATION_THRESHOLD: usize = 1;

    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use] pub fn with_tolerance(mut self, v: f64) -> Self { self.tolerance = Some(v); self }
    #[must_use] pub fn with_resolution(mut self, v: usize) -> Self { self.resolution = Some(v); self }
    #[must_use] pub fn with_stagnation_threshold(mut self, v: usize) -> Self { self.stagnation_threshold = Some(v); self }
    #[must_use] pub fn with_variant(mut self, v: RegulaFalsiVariant) -> Self { self.variant = v; self }

    #[inline] #[must_use] pub fn tolerance(&self) -> f64 { self.tolerance.unwrap_or(Self::DEFAULT_TOLERANCE) }
    #[inline] #[must_use] pub fn resolution(&self) -> usize { self.resolution.unwrap_or(Self::DEFAULT_RESOLUTION) }
    #[inline] #[must_use] pub fn stagnation_threshold(&self) -> usize {
        self.stagnation_threshold.unwrap_or(Self::DEFAULT_STAGNATION_THRESHOLD)
    }
    #[inline] #[must_use] pub fn variant(&self) -> RegulaFalsiVariant { self.variant }

    /// Checks every field and returns a copy with defaults filled in.
    ///
    /// # Errors
    /// ├ [`RootFindingError::InvalidTolerance`]           - `tolerance` <= 0, NaN or inf
    /// ├ [`RootFindingError::InvalidResolution`]          - `resolution` == 0
    /// └ [`RootFindingError::InvalidStagnationThreshold`] - `stagnation_threshold` == 0
    pub fn validate(&self) -> Result<FalsiCfg, RootFindingError> {
        let tolerance = self.tolerance();
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(RootFindingError::InvalidTolerance { got: tolerance });
        }

        let resolution = self.resolution();
        if resolution == 0 {
            return Err(RootFindingError::InvalidResolution { got: resolution });
        }

        let stagnation_threshold = self.stagnation_threshold();
        if stagnation_threshold == 0 {
            return Err(RootFindingError::InvalidStagnationThreshold { got: stagnation_threshold });
        }

        Ok(Self {
            tolerance:            Some(tolerance),
            resolution:           Some(resolution),
            stagnation_threshold: Some(stagnation_threshold),
            variant:              self.variant,
        })
    }
}

impl Default for FalsiCfg {
    fn default() -> Self {
        Self {
            tolerance:            Some(Self::DEFAULT_TOLERANCE),
            resolution:           Some(Self::DEFAULT_RESOLUTION),
            stagnation_threshold: Some(Self::DEFAULT_STAGNATION_THRESHOLD),
            variant:              RegulaFalsiVariant::Illinois,
        }
    }
}

//! Error type for arc-flash calculations.
//!
//! Every failure is fatal for the calculation that raised it: the engine
//! never retries, clamps or substitutes a default. Callers get the first
//! violated precondition and decide what to do with it.
//!
//! # Example
//!
//! ```
//! use arcflash_core::{ArcFlashError, ArcFlashResult};
//!
//! fn check_gap(gap_mm: f64) -> ArcFlashResult<()> {
//!     ArcFlashError::check_range("busbar gap", gap_mm, 6.35, 76.2)
//! }
//!
//! assert!(check_gap(32.0).is_ok());
//! assert!(matches!(check_gap(100.0), Err(ArcFlashError::RangeViolation { .. })));
//! ```

use thiserror::Error;

/// Unified error type for the calculation engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArcFlashError {
    /// An input lies outside the validated range of the empirical model.
    #[error("{quantity} = {value} is outside the valid range [{min}, {max}]")]
    RangeViolation {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An electrode configuration, voltage class or enclosure type has no
    /// entry in the coefficient table being consulted.
    #[error("Undefined configuration: {0}")]
    UndefinedConfiguration(String),

    /// Inputs that are individually valid combine into a mathematically
    /// invalid expression (negative radicand, negative energy, ...).
    #[error("Domain error: {0}")]
    Domain(String),

    /// A calculation step was requested before the step it depends on.
    #[error("Sequencing error: {0}")]
    Sequencing(String),

    /// Multi-step aggregation was given steps computed for different equipment.
    #[error("Calculation steps refer to different equipment geometries")]
    GeometryMismatch,
}

/// Convenience type alias for Results using ArcFlashError.
pub type ArcFlashResult<T> = Result<T, ArcFlashError>;

impl ArcFlashError {
    /// Fails with [`ArcFlashError::RangeViolation`] unless `min <= value <= max`.
    ///
    /// NaN always fails.
    pub fn check_range(
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> ArcFlashResult<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ArcFlashError::RangeViolation {
                quantity,
                value,
                min,
                max,
            })
        }
    }

    /// Fails with [`ArcFlashError::Domain`] unless `value` is finite and non-negative.
    pub(crate) fn check_non_negative(what: &str, value: f64) -> ArcFlashResult<f64> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(ArcFlashError::Domain(format!(
                "{what} evaluated to {value}; expected a finite non-negative value"
            )))
        }
    }
}

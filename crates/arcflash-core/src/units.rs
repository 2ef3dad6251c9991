//! Compile-time dimension safety for arc-flash quantities.
//!
//! Every physical quantity that enters or leaves the calculation engine is
//! wrapped in a newtype carrying its dimension. Adding a current to a voltage,
//! or passing a gap where a working distance in the wrong unit is expected,
//! fails to compile instead of silently producing a wrong answer.
//!
//! Each type stores its magnitude in one fixed internal unit and exposes named
//! constructors and accessors for the units the calculation needs. The
//! equations always read magnitudes back in the standard's convention:
//! kV, kA, mm, ms and J/cm².
//!
//! # Usage
//!
//! ```
//! use arcflash_core::units::{Current, Length, Voltage};
//!
//! let v = Voltage::from_millivolts(4_160_000.0);
//! assert!((v.kilovolts() - 4.16).abs() < 1e-12);
//!
//! let gap = Length::from_metres(0.104) + Length::from_millimetres(1.0);
//! assert!((gap.millimetres() - 105.0).abs() < 1e-9);
//!
//! // This would NOT compile - different dimensions
//! // let wrong = v + Current::from_kiloamperes(1.0);
//! let _ = Current::from_kiloamperes(1.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Joules per calorie (thermochemical calorie).
pub const JOULES_PER_CALORIE: f64 = 4.184;

/// Millimetres per inch.
pub const MILLIMETRES_PER_INCH: f64 = 25.4;

/// Implements arithmetic, ordering helpers and display for a quantity newtype.
macro_rules! impl_quantity_ops {
    ($type:ty, $display:ident, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                rhs * self
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.$display(), $unit_name),
                    None => write!(f, "{:.4} {}", self.$display(), $unit_name),
                }
            }
        }

        impl $type {
            /// Zero in any unit.
            pub const ZERO: Self = Self(0.0);

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Minimum of two values
            #[inline]
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// Maximum of two values
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }

        impl<'a> std::iter::Sum<&'a $type> for $type {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

// =============================================================================
// Voltage
// =============================================================================

/// Electric potential, stored in volts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Voltage(f64);

impl_quantity_ops!(Voltage, kilovolts, "kV");

impl Voltage {
    #[inline]
    pub const fn from_volts(v: f64) -> Self {
        Self(v)
    }

    #[inline]
    pub fn from_millivolts(mv: f64) -> Self {
        Self(mv / 1e3)
    }

    #[inline]
    pub fn from_kilovolts(kv: f64) -> Self {
        Self(kv * 1e3)
    }

    #[inline]
    pub const fn volts(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn kilovolts(self) -> f64 {
        self.0 / 1e3
    }
}

// =============================================================================
// Current
// =============================================================================

/// Electric current, stored in amperes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Current(f64);

impl_quantity_ops!(Current, kiloamperes, "kA");

impl Current {
    #[inline]
    pub const fn from_amperes(a: f64) -> Self {
        Self(a)
    }

    #[inline]
    pub fn from_milliamperes(ma: f64) -> Self {
        Self(ma / 1e3)
    }

    #[inline]
    pub fn from_kiloamperes(ka: f64) -> Self {
        Self(ka * 1e3)
    }

    #[inline]
    pub const fn amperes(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn kiloamperes(self) -> f64 {
        self.0 / 1e3
    }
}

// =============================================================================
// Length
// =============================================================================

/// Distance, stored in millimetres.
///
/// Gaps, working distances, enclosure dimensions and arc-flash boundaries all
/// use this type.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Length(f64);

impl_quantity_ops!(Length, millimetres, "mm");

impl Length {
    #[inline]
    pub const fn from_millimetres(mm: f64) -> Self {
        Self(mm)
    }

    #[inline]
    pub fn from_micrometres(um: f64) -> Self {
        Self(um / 1e3)
    }

    #[inline]
    pub fn from_metres(m: f64) -> Self {
        Self(m * 1e3)
    }

    #[inline]
    pub fn from_kilometres(km: f64) -> Self {
        Self(km * 1e6)
    }

    #[inline]
    pub fn from_inches(inches: f64) -> Self {
        Self(inches * MILLIMETRES_PER_INCH)
    }

    #[inline]
    pub const fn millimetres(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn metres(self) -> f64 {
        self.0 / 1e3
    }

    #[inline]
    pub fn inches(self) -> f64 {
        self.0 / MILLIMETRES_PER_INCH
    }
}

// =============================================================================
// Duration
// =============================================================================

/// Arc duration, stored in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Duration(f64);

impl_quantity_ops!(Duration, milliseconds, "ms");

impl Duration {
    #[inline]
    pub fn from_seconds(s: f64) -> Self {
        Self(s * 1e3)
    }

    #[inline]
    pub const fn from_milliseconds(ms: f64) -> Self {
        Self(ms)
    }

    #[inline]
    pub fn from_microseconds(us: f64) -> Self {
        Self(us / 1e3)
    }

    #[inline]
    pub fn seconds(self) -> f64 {
        self.0 / 1e3
    }

    #[inline]
    pub const fn milliseconds(self) -> f64 {
        self.0
    }
}

// =============================================================================
// Incident energy
// =============================================================================

/// Incident energy per unit area, stored in J/cm².
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct EnergyDensity(f64);

impl_quantity_ops!(EnergyDensity, joules_per_cm2, "J/cm²");

impl EnergyDensity {
    #[inline]
    pub const fn from_joules_per_cm2(j: f64) -> Self {
        Self(j)
    }

    #[inline]
    pub fn from_calories_per_cm2(cal: f64) -> Self {
        Self(cal * JOULES_PER_CALORIE)
    }

    #[inline]
    pub const fn joules_per_cm2(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn calories_per_cm2(self) -> f64 {
        self.0 / JOULES_PER_CALORIE
    }
}

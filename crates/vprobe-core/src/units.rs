//! Compile-time unit safety for the voltage quantities this pipeline handles.
//!
//! Prevents mixing incompatible quantities like volts and kilovolts, or a raw
//! magnitude and its per-unit normalization.
//!
//! All types use `#[repr(transparent)]` so they have the same memory layout as
//! `f64`; the compiler optimizes away the wrappers. Serde serializes them as
//! plain numbers, which keeps report rows flat.
//!
//! # Usage
//!
//! ```
//! use vprobe_core::units::{Kilovolts, Volts};
//!
//! let base = Kilovolts(7.2);
//! let magnitude = Volts(7200.0);
//! let pu = magnitude.per_unit(base.to_volts());
//! assert!((pu.0 - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
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
                write!(f, "{:.4} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }
    };
}

/// Voltage magnitude in volts (V), as reported by per-bus telemetry.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Volts(pub f64);

impl_unit_ops!(Volts, "V");

/// Nominal bus base voltage in kilovolts (kV).
///
/// The normalization denominator for per-unit calculation. A base of zero or
/// less means the engine could not attribute a base to the bus.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilovolts(pub f64);

impl_unit_ops!(Kilovolts, "kV");

/// Voltage magnitude in per-unit (pu)
///
/// Normalized to the bus base voltage; 1.0 is nominal. Normal operating range
/// is 0.95 - 1.05 pu.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PerUnit(pub f64);

impl_unit_ops!(PerUnit, "pu");

/// Voltage angle in degrees, as reported by per-bus telemetry.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(pub f64);

impl_unit_ops!(Degrees, "deg");

impl Kilovolts {
    /// Convert to volts: 1 kV = 1000 V
    #[inline]
    pub fn to_volts(self) -> Volts {
        Volts(self.0 * 1000.0)
    }
}

impl Volts {
    /// Normalize against a base voltage: pu = V / V_base
    #[inline]
    pub fn per_unit(self, base: Volts) -> PerUnit {
        PerUnit(self.0 / base.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilovolt_to_volt_conversion() {
        assert_eq!(Kilovolts(7.2).to_volts(), Volts(7200.0));
        assert_eq!(Kilovolts(0.0).to_volts(), Volts(0.0));
    }

    #[test]
    fn per_unit_normalization() {
        let pu = Volts(6840.0).per_unit(Kilovolts(7.2).to_volts());
        assert!((pu.value() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn unit_arithmetic() {
        assert_eq!(Volts(100.0) + Volts(20.0), Volts(120.0));
        assert_eq!(Volts(100.0) * 3.5, Volts(350.0));
        assert_eq!(PerUnit(1.0) / PerUnit(0.5), 2.0);
    }

    #[test]
    fn display_includes_unit() {
        assert_eq!(format!("{}", Kilovolts(7.2)), "7.2000 kV");
        assert_eq!(format!("{}", PerUnit(1.0)), "1.0000 pu");
    }
}

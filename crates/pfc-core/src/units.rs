//! Unit newtypes and the per-unit normalizer.
//!
//! Solver B reports voltages in volts (line-to-neutral) while the baseline and
//! solver A already report per-unit values. [`normalize_voltage`] bridges the
//! two with a best-fit base heuristic: realistic per-unit voltages sit near
//! 1.0, so the first candidate base giving a ratio below
//! [`PU_ACCEPT_LIMIT`] is taken to be the right one.
//!
//! ```
//! use pfc_core::units::{normalize_voltage, PerUnit, Volts};
//!
//! let bases = [Volts(4160.0 / 3f64.sqrt())];
//! let pu = normalize_voltage(Volts(2450.0), &bases);
//! assert!((pu.value() - 1.0201).abs() < 1e-3);
//! assert_eq!(normalize_voltage(Volts(120.0), &[]), PerUnit(1.0));
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Div;

/// Default secondary base (120 V line-to-neutral), always tried first.
pub const DEFAULT_BASE_VOLTS: Volts = Volts(120.0);

/// Upper bound on an acceptable per-unit ratio. Deliberately loose so a
/// plausible base is not rejected for a slightly high voltage.
pub const PU_ACCEPT_LIMIT: f64 = 1.1;

macro_rules! impl_unit_ops {
    ($type:ty) => {
        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl $type {
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }
        }
    };
}

/// Voltage magnitude in volts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Volts(pub f64);

impl_unit_ops!(Volts);

impl Volts {
    /// Convert a line-to-line magnitude to line-to-neutral.
    pub fn line_to_neutral(self) -> Self {
        Self(self.0 / 3f64.sqrt())
    }
}

/// Dimensionless per-unit value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PerUnit(pub f64);

impl_unit_ops!(PerUnit);

impl PerUnit {
    /// Sentinel returned when no candidate base gives a plausible ratio.
    pub const UNRESOLVED: Self = Self(0.0);

    pub fn is_unresolved(self) -> bool {
        self.0 == 0.0
    }
}

/// Convert a line-to-neutral magnitude to per-unit.
///
/// Tries [`DEFAULT_BASE_VOLTS`] first and then `bases_ln` in the given order,
/// returning the first ratio below [`PU_ACCEPT_LIMIT`]. Returns
/// [`PerUnit::UNRESOLVED`] (0.0) when no base fits, or when the magnitude is
/// not a positive finite number. Non-positive bases are skipped.
pub fn normalize_voltage(magnitude: Volts, bases_ln: &[Volts]) -> PerUnit {
    if !magnitude.0.is_finite() || magnitude.0 <= 0.0 {
        return PerUnit::UNRESOLVED;
    }
    std::iter::once(DEFAULT_BASE_VOLTS)
        .chain(bases_ln.iter().copied())
        .filter(|base| base.0 > 0.0)
        .map(|base| magnitude / base)
        .find(|ratio| *ratio < PU_ACCEPT_LIMIT)
        .map(PerUnit)
        .unwrap_or(PerUnit::UNRESOLVED)
}

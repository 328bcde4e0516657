//! Conversion between a unit's own values and SI values.
//!
//! Every [`Unit`](crate::Unit) owns exactly one [`Scale`]. Storage always
//! holds SI values; the scale is applied when values enter (from a display
//! unit) or leave (to a display unit).
//!
//! # Variants
//!
//! - [`Scale::Identity`] - SI units (`m`, `kg`, `s`, `m2`)
//! - [`Scale::Linear`] - `si = value * factor` (`km`, `h`, `lb`)
//! - [`Scale::OffsetLinear`] - `si = (value + offset) * factor` (`°C`, `°F`)
//!
//! # Usage
//!
//! ```
//! use qty_core::Scale;
//!
//! let celsius = Scale::offset_linear(1.0, 273.15);
//! assert_eq!(celsius.to_standard_unit(0.0), 273.15);
//! assert!((celsius.from_standard_unit(373.15) - 100.0).abs() < 1e-9);
//! ```

use std::fmt;

/// Affine or linear transform from unit values to SI values.
///
/// Both directions are total over `f64`; a scale never fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// The unit is the SI unit itself.
    Identity,
    /// `si = value * factor`.
    Linear {
        /// Multiplier to SI
        factor: f64,
    },
    /// `si = (value + offset) * factor`.
    OffsetLinear {
        /// Multiplier to SI, applied after the offset
        factor: f64,
        /// Offset added in the unit's own representation
        offset: f64,
    },
}

impl Scale {
    /// Creates a linear scale. A factor of exactly 1 collapses to [`Scale::Identity`].
    #[inline]
    pub const fn linear(factor: f64) -> Self {
        if factor == 1.0 {
            Self::Identity
        } else {
            Self::Linear { factor }
        }
    }

    /// Creates an offset-linear scale. A zero offset collapses to [`Scale::linear`].
    #[inline]
    pub const fn offset_linear(factor: f64, offset: f64) -> Self {
        if offset == 0.0 {
            Self::linear(factor)
        } else {
            Self::OffsetLinear { factor, offset }
        }
    }

    /// Converts a value expressed in the unit to its SI value.
    #[inline]
    pub fn to_standard_unit(&self, value: f64) -> f64 {
        match *self {
            Self::Identity => value,
            Self::Linear { factor } => value * factor,
            Self::OffsetLinear { factor, offset } => (value + offset) * factor,
        }
    }

    /// Converts an SI value to the unit's representation.
    #[inline]
    pub fn from_standard_unit(&self, si: f64) -> f64 {
        match *self {
            Self::Identity => si,
            Self::Linear { factor } => si / factor,
            Self::OffsetLinear { factor, offset } => si / factor - offset,
        }
    }

    /// Multiplier to SI (1 for [`Scale::Identity`]).
    #[inline]
    pub fn factor(&self) -> f64 {
        match *self {
            Self::Identity => 1.0,
            Self::Linear { factor } | Self::OffsetLinear { factor, .. } => factor,
        }
    }

    /// Offset in the unit's representation (0 unless offset-linear).
    #[inline]
    pub fn offset(&self) -> f64 {
        match *self {
            Self::OffsetLinear { offset, .. } => offset,
            _ => 0.0,
        }
    }

    /// Returns `true` if values are already SI values.
    #[inline]
    pub fn is_base_si_scale(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Returns `true` if zero in the unit is zero in SI.
    ///
    /// Sparse storage can only convert entry-by-entry when this holds.
    #[inline]
    pub fn maps_zero_to_zero(&self) -> bool {
        !matches!(self, Self::OffsetLinear { .. })
    }

    /// Returns a scale for the same unit multiplied by `prefix_factor`
    /// (e.g. kilo = 1000 applied to metre gives kilometre).
    pub fn prefixed(&self, prefix_factor: f64) -> Self {
        match *self {
            Self::Identity => Self::linear(prefix_factor),
            Self::Linear { factor } => Self::linear(factor * prefix_factor),
            Self::OffsetLinear { factor, offset } => Self::OffsetLinear {
                factor: factor * prefix_factor,
                offset: offset / prefix_factor,
            },
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::Identity
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Identity => write!(f, "identity"),
            Self::Linear { factor } => write!(f, "x{factor}"),
            Self::OffsetLinear { factor, offset } => write!(f, "(x+{offset})*{factor}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_linear_collapses_to_identity() {
        assert_eq!(Scale::linear(1.0), Scale::Identity);
        assert_eq!(Scale::offset_linear(1000.0, 0.0), Scale::Linear { factor: 1000.0 });
    }

    #[test]
    fn test_fahrenheit() {
        let f = Scale::offset_linear(5.0 / 9.0, 459.67);
        assert_relative_eq!(f.to_standard_unit(32.0), 273.15, epsilon = 1e-9);
        assert_relative_eq!(f.from_standard_unit(373.15), 212.0, epsilon = 1e-9);
        assert!(!f.maps_zero_to_zero());
    }

    #[test]
    fn test_prefixed() {
        let km = Scale::Identity.prefixed(1000.0);
        assert_eq!(km.to_standard_unit(2.5), 2500.0);
        let mg = Scale::linear(1e-3).prefixed(1e-3);
        assert_relative_eq!(mg.factor(), 1e-6);
    }

    #[test]
    fn test_prefixed_offset_keeps_zero_point() {
        let celsius = Scale::offset_linear(1.0, 273.15);
        let kilo = celsius.prefixed(1e3);
        assert_relative_eq!(kilo.offset(), 0.27315, epsilon = 1e-12);
        // -0.27315 k°C is absolute zero; 0 k°C is 0 °C
        assert_relative_eq!(kilo.to_standard_unit(-0.27315), 0.0, epsilon = 1e-9);
        assert_relative_eq!(kilo.to_standard_unit(0.0), 273.15, epsilon = 1e-9);
        for x in [-40.0, 0.0, 1.0, 1234.5] {
            assert_relative_eq!(kilo.from_standard_unit(kilo.to_standard_unit(x)), x, epsilon = 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_roundtrip(x in -1e9f64..1e9, factor in 1e-6f64..1e6, offset in -1e3f64..1e3) {
            for scale in [Scale::Identity, Scale::linear(factor), Scale::offset_linear(factor, offset)] {
                let back = scale.from_standard_unit(scale.to_standard_unit(x));
                prop_assert!((back - x).abs() <= 1e-6 * x.abs().max(1.0) + 1e-6 * offset.abs());
            }
        }
    }
}

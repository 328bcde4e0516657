//! Absolute and relative value kinds.
//!
//! A value is either a **relative** magnitude (a length, a duration, a
//! temperature difference) or an **absolute** point on a scale (a
//! position, a moment in time, a temperature reading). The kind is a
//! zero-sized type parameter, so mixing the two is a compile error rather
//! than a runtime check:
//!
//! | left  | op  | right | result |
//! |-------|-----|-------|--------|
//! | Rel   | +/- | Rel   | Rel    |
//! | Abs   | +/- | Rel   | Abs    |
//! | Abs   | -   | Abs   | Rel    |
//! | Rel   | *,/ | Rel   | Rel    |
//!
//! # Usage
//!
//! ```
//! use qty_value::{Abs, Kind, Rel};
//!
//! fn tag<K: Kind>() -> &'static str {
//!     K::TAG
//! }
//!
//! assert_eq!(tag::<Abs>(), "Abs");
//! assert!(!Rel::IS_ABSOLUTE);
//! ```

use std::fmt;

use qty_core::Unit;

/// Marker trait for [`Abs`] and [`Rel`].
pub trait Kind: Copy + Clone + Default + Send + Sync + fmt::Debug + 'static {
    /// Whether values of this kind are points rather than magnitudes.
    const IS_ABSOLUTE: bool;

    /// Three-letter tag used in verbose text output.
    const TAG: &'static str;

    /// The unit a value of this kind is displayed in, given a requested unit.
    ///
    /// Relative values map absolute units to their relative counterpart
    /// (`°C` reading to `°C` difference); absolute values do the reverse
    /// where a counterpart exists.
    fn bind(unit: &Unit) -> Unit;
}

/// Absolute kind: a point on a scale.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Abs;

impl Kind for Abs {
    const IS_ABSOLUTE: bool = true;
    const TAG: &'static str = "Abs";

    #[inline]
    fn bind(unit: &Unit) -> Unit {
        unit.absolute_unit().unwrap_or_else(|| unit.clone())
    }
}

/// Relative kind: a magnitude or difference.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rel;

impl Kind for Rel {
    const IS_ABSOLUTE: bool = false;
    const TAG: &'static str = "Rel";

    #[inline]
    fn bind(unit: &Unit) -> Unit {
        unit.relative_unit()
    }
}

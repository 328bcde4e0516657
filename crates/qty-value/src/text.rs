//! Text rendering of scalars, vectors and matrices.
//!
//! Verbose output starts with fixed-width tags that callers match on:
//!
//! ```text
//! Mutable   Rel Dense  [ 1 2 3] km
//! Immutable Abs Sparse [ 0 20 0] °C
//! ```
//!
//! Matrices put each row on its own line and the unit on the last line.
//! In verbose output the rows follow the header, indented with a tab. Values are printed in the display unit with the element
//! type's `Display` formatting.

use std::fmt::{self, Write};

use qty_core::{Element, StorageType, Unit};

/// What to include in rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextOptions {
    /// Prefix with mutability, Abs/Rel and Dense/Sparse tags
    pub verbose: bool,
    /// Append the display unit abbreviation
    pub with_unit: bool,
}

impl TextOptions {
    /// Values and unit (the `Display` form).
    pub const PLAIN: Self = Self {
        verbose: false,
        with_unit: true,
    };

    /// Tags, values and unit.
    pub const VERBOSE: Self = Self {
        verbose: true,
        with_unit: true,
    };

    /// Values only.
    pub const BARE: Self = Self {
        verbose: false,
        with_unit: false,
    };
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::PLAIN
    }
}

pub(crate) fn mutability_tag(mutable: bool) -> &'static str {
    if mutable { "Mutable   " } else { "Immutable " }
}

pub(crate) fn storage_tag(storage: StorageType) -> &'static str {
    match storage {
        StorageType::Dense => "Dense  ",
        StorageType::Sparse => "Sparse ",
    }
}

pub(crate) fn write_header(out: &mut String, mutable: bool, kind: &str, storage: StorageType) {
    out.push_str(mutability_tag(mutable));
    out.push_str(kind);
    out.push(' ');
    out.push_str(storage_tag(storage));
}

/// `[ v0 v1 ...]` in `unit`.
pub(crate) fn write_values<T: Element>(
    out: &mut String,
    si: impl Iterator<Item = T>,
    unit: &Unit,
) -> fmt::Result {
    out.push('[');
    for v in si {
        write!(out, " {}", display_value(v, unit))?;
    }
    out.push(']');
    Ok(())
}

pub(crate) fn write_unit(out: &mut String, unit: &Unit, leading: &str) {
    let abbreviation = unit.abbreviation();
    if !abbreviation.is_empty() {
        out.push_str(leading);
        out.push_str(abbreviation);
    }
}

#[inline]
pub(crate) fn display_value<T: Element>(si: T, unit: &Unit) -> T {
    if unit.scale().is_base_si_scale() {
        si
    } else {
        T::from_f64(unit.from_si(si.to_f64()))
    }
}

#[inline]
pub(crate) fn si_value<T: Element>(value: T, unit: &Unit) -> T {
    if unit.scale().is_base_si_scale() {
        value
    } else {
        T::from_f64(unit.to_si(value.to_f64()))
    }
}

/// Maps an SI value read in `from` to the SI value of the same display
/// value read in `to`. `None` when the two scales agree.
pub(crate) fn rebase<T: Element>(from: &Unit, to: &Unit) -> Option<impl Fn(T) -> T + Send + Sync> {
    let (from, to) = (*from.scale(), *to.scale());
    (from != to).then(move || {
        move |si: T| T::from_f64(to.to_standard_unit(from.from_standard_unit(si.to_f64())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qty_core::{Quantity, UnitRegistry};

    #[test]
    fn test_tags_are_fixed_width() {
        assert_eq!(mutability_tag(true).len(), mutability_tag(false).len());
        assert_eq!(storage_tag(StorageType::Dense).len(), storage_tag(StorageType::Sparse).len());
    }

    #[test]
    fn test_write_values() {
        let km = UnitRegistry::global().unit(Quantity::Length, "km").unwrap();
        let mut out = String::new();
        write_values(&mut out, [1000.0, 2500.0].into_iter(), &km).unwrap();
        write_unit(&mut out, &km, " ");
        assert_eq!(out, "[ 1 2.5] km");
    }

    #[test]
    fn test_dimensionless_unit_omitted() {
        let one = UnitRegistry::global().unit_base(Quantity::Dimensionless).standard_unit().clone();
        let mut out = String::from("[ 1]");
        write_unit(&mut out, &one, " ");
        assert_eq!(out, "[ 1]");
    }
}

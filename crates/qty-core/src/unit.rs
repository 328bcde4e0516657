//! Units of measure.
//!
//! A [`Unit`] is a cheap, shareable handle (`Arc`) to an immutable unit
//! definition: id, name, abbreviations, [`Scale`] and [`SIDimensions`].
//!
//! Two flavours exist:
//!
//! - **Named units** belong to a [`Quantity`] and are created once by the
//!   [`UnitRegistry`](crate::UnitRegistry). Their standard unit is the first
//!   unit of that quantity's [`UnitBase`](crate::UnitBase).
//! - **SI units** ([`Unit::si`]) wrap a bare dimension signature with an
//!   identity scale. They are built on demand for signatures no quantity
//!   claims (area times area) and are never registered anywhere.
//!
//! # Usage
//!
//! ```
//! use qty_core::{Quantity, SIDimensions, Unit, UnitRegistry};
//!
//! let km = UnitRegistry::global().unit(Quantity::Length, "km").unwrap();
//! assert_eq!(km.to_si(1.5), 1500.0);
//! assert_eq!(km.standard_unit().abbreviation(), "m");
//!
//! let m4 = Unit::si(SIDimensions::parse("m4").unwrap());
//! assert!(m4.is_si_generic());
//! assert_eq!(m4.abbreviation(), "m4");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::base::UnitBase;
use crate::dimensions::SIDimensions;
use crate::quantity::Quantity;
use crate::registry::UnitRegistry;
use crate::scale::Scale;

#[derive(Debug)]
struct UnitDef {
    id: String,
    name: String,
    abbreviations: Vec<String>,
    scale: Scale,
    dimensions: SIDimensions,
    quantity: Option<Quantity>,
    generated: bool,
}

/// Shared handle to a unit definition.
#[derive(Clone)]
pub struct Unit(Arc<UnitDef>);

impl Unit {
    /// Creates a named unit of `quantity`.
    ///
    /// Only the registry calls this; users obtain named units from
    /// [`UnitRegistry`] or [`UnitBase`].
    pub(crate) fn named(
        quantity: Quantity,
        id: String,
        name: String,
        abbreviations: Vec<String>,
        scale: Scale,
        generated: bool,
    ) -> Self {
        Self(Arc::new(UnitDef {
            id,
            name,
            abbreviations,
            scale,
            dimensions: quantity.si_dimensions(),
            quantity: Some(quantity),
            generated,
        }))
    }

    /// Creates an SI unit directly from a dimension signature.
    ///
    /// Identity scale; id, name and abbreviation are the signature text.
    pub fn si(dimensions: SIDimensions) -> Self {
        let text = dimensions.to_string();
        Self(Arc::new(UnitDef {
            id: text.clone(),
            name: text.clone(),
            abbreviations: vec![text],
            scale: Scale::Identity,
            dimensions,
            quantity: None,
            generated: true,
        }))
    }

    /// Unique id within the unit's quantity.
    pub fn id(&self) -> &str {
        &self.0.id
    }

    /// Full name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Display abbreviation.
    pub fn abbreviation(&self) -> &str {
        self.0.abbreviations.first().map(String::as_str).unwrap_or("")
    }

    /// All accepted abbreviations, display abbreviation first.
    pub fn abbreviations(&self) -> &[String] {
        &self.0.abbreviations
    }

    /// Conversion to SI.
    pub fn scale(&self) -> &Scale {
        &self.0.scale
    }

    /// Dimension signature.
    pub fn si_dimensions(&self) -> SIDimensions {
        self.0.dimensions
    }

    /// Quantity this unit belongs to, `None` for SI units.
    pub fn quantity(&self) -> Option<Quantity> {
        self.0.quantity
    }

    /// Returns `true` if the unit was derived (SI prefix or bare signature)
    /// rather than listed explicitly.
    pub fn is_generated(&self) -> bool {
        self.0.generated
    }

    /// Returns `true` for units built by [`Unit::si`].
    pub fn is_si_generic(&self) -> bool {
        self.0.quantity.is_none()
    }

    /// The family of units this unit belongs to.
    pub fn unit_base(&self) -> Option<&'static UnitBase> {
        self.0.quantity.map(|q| UnitRegistry::global().unit_base(q))
    }

    /// Canonical unit of the family (itself for SI units).
    pub fn standard_unit(&self) -> Unit {
        match self.unit_base() {
            Some(base) => base.standard_unit().clone(),
            None => self.clone(),
        }
    }

    /// Returns `true` if this is its family's standard unit.
    pub fn is_standard(&self) -> bool {
        self.standard_unit() == *self
    }

    /// Unit with the same id in the relative counterpart quantity.
    ///
    /// Returns `self` when the unit is already relative or has no
    /// counterpart with that id.
    pub fn relative_unit(&self) -> Unit {
        self.counterpart(|q| Some(q.relative()))
    }

    /// Unit with the same id in the absolute counterpart quantity, if any.
    pub fn absolute_unit(&self) -> Option<Unit> {
        let q = self.0.quantity?.absolute()?;
        UnitRegistry::global().unit_base(q).unit_by_id(self.id()).cloned()
    }

    fn counterpart(&self, pick: impl Fn(Quantity) -> Option<Quantity>) -> Unit {
        self.0
            .quantity
            .and_then(pick)
            .and_then(|q| UnitRegistry::global().unit_base(q).unit_by_id(self.id()).cloned())
            .unwrap_or_else(|| self.clone())
    }

    /// Converts a value in this unit to SI.
    #[inline]
    pub fn to_si(&self, value: f64) -> f64 {
        self.0.scale.to_standard_unit(value)
    }

    /// Converts an SI value to this unit.
    #[inline]
    pub fn from_si(&self, si: f64) -> f64 {
        self.0.scale.from_standard_unit(si)
    }

    /// Returns `true` if values of `other` can be expressed in this unit.
    #[inline]
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.0.dimensions == other.0.dimensions
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.id == other.0.id
                && self.0.dimensions == other.0.dimensions
                && self.0.scale == other.0.scale)
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
        self.0.dimensions.hash(state);
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("id", &self.0.id)
            .field("quantity", &self.0.quantity)
            .field("scale", &self.0.scale)
            .field("dimensions", &self.0.dimensions.to_string())
            .finish()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

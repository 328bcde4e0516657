//! Process-wide unit registry.
//!
//! The registry holds one [`UnitBase`] per [`Quantity`] and an index from
//! dimension signatures to quantities. It is built on first access and is
//! read-only afterwards, so lookups need no locking.
//!
//! # Architecture
//!
//! The registry uses a singleton pattern via [`UnitRegistry::global()`].
//! SI units synthesized by [`UnitRegistry::lookup_or_create_si_unit`] are
//! handed to the caller and never stored.
//!
//! # Example
//!
//! ```
//! use qty_core::{Quantity, SIDimensions, UnitRegistry};
//!
//! let registry = UnitRegistry::global();
//!
//! // Named unit for a known signature
//! let speed = SIDimensions::parse("m/s").unwrap();
//! assert_eq!(registry.lookup_or_create_si_unit(speed).id(), "m/s");
//!
//! // Synthetic unit for a signature without a quantity
//! let m4 = SIDimensions::parse("m4").unwrap();
//! let unit = registry.lookup_or_create_si_unit(m4);
//! assert!(unit.is_si_generic());
//! assert_eq!(unit.abbreviation(), "m4");
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::base::UnitBase;
use crate::dimensions::SIDimensions;
use crate::quantity::Quantity;
use crate::unit::Unit;

/// Registry of every named unit, grouped by quantity.
///
/// # Thread Safety
///
/// Populated once inside a [`OnceLock`]; all methods take `&self` and are
/// safe to call from any thread.
#[derive(Debug)]
pub struct UnitRegistry {
    bases: HashMap<Quantity, UnitBase>,
    by_dimensions: HashMap<SIDimensions, Vec<Quantity>>,
}

impl UnitRegistry {
    /// Builds a registry containing every quantity of the table.
    pub fn new() -> Self {
        let mut bases = HashMap::with_capacity(Quantity::ALL.len());
        let mut by_dimensions: HashMap<SIDimensions, Vec<Quantity>> = HashMap::new();
        for &q in Quantity::ALL {
            bases.insert(q, UnitBase::build(q));
            by_dimensions.entry(q.si_dimensions()).or_default().push(q);
        }
        debug!(quantities = bases.len(), "unit registry built");
        Self {
            bases,
            by_dimensions,
        }
    }

    /// Returns the global registry instance.
    pub fn global() -> &'static UnitRegistry {
        static INSTANCE: OnceLock<UnitRegistry> = OnceLock::new();
        INSTANCE.get_or_init(UnitRegistry::new)
    }

    /// Family of units of `quantity`.
    pub fn unit_base(&self, quantity: Quantity) -> &UnitBase {
        // Every quantity is inserted by `new`.
        &self.bases[&quantity]
    }

    /// Looks up a unit of `quantity` by abbreviation, then by id.
    pub fn unit(&self, quantity: Quantity, text: &str) -> Option<Unit> {
        let base = self.unit_base(quantity);
        base.unit_by_abbreviation(text)
            .or_else(|| base.unit_by_id(text))
            .cloned()
    }

    /// Quantities with the given signature, in table order.
    pub fn quantities_for(&self, dimensions: &SIDimensions) -> &[Quantity] {
        self.by_dimensions
            .get(dimensions)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The relative quantity a computed signature resolves to.
    ///
    /// When several quantities share a signature (energy and torque) the
    /// first one in table order wins.
    pub fn resolve_quantity(&self, dimensions: &SIDimensions) -> Option<Quantity> {
        self.quantities_for(dimensions)
            .iter()
            .copied()
            .find(|q| !q.is_absolute())
    }

    /// Standard unit of the quantity matching `dimensions`, or a synthetic
    /// SI unit wrapping the signature when no quantity matches.
    pub fn lookup_or_create_si_unit(&self, dimensions: SIDimensions) -> Unit {
        match self.resolve_quantity(&dimensions) {
            Some(q) => self.unit_base(q).standard_unit().clone(),
            None => {
                debug!(dimensions = %dimensions, "synthesizing SI unit");
                Unit::si(dimensions)
            }
        }
    }

    /// Finds a unit by abbreviation across all quantities.
    ///
    /// Relative quantities are searched before absolute ones.
    pub fn find_unit(&self, text: &str) -> Option<Unit> {
        Quantity::ALL
            .iter()
            .find_map(|&q| self.unit_base(q).unit_by_abbreviation(text).cloned())
    }

    /// All quantities in table order.
    pub fn quantities(&self) -> impl Iterator<Item = Quantity> + '_ {
        Quantity::ALL.iter().copied()
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

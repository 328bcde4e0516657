//! Families of units sharing one quantity.
//!
//! A [`UnitBase`] is built once per [`Quantity`] from its unit table:
//! explicit units first, in table order, then the SI-prefixed variants of
//! every prefixable unit. When a generated unit would reuse the id or an
//! abbreviation of an explicit unit, the explicit unit wins.

use std::collections::HashMap;

use crate::dimensions::SIDimensions;
use crate::prefix::SI_PREFIXES;
use crate::quantity::Quantity;
use crate::unit::Unit;

/// All named units of one quantity.
#[derive(Debug)]
pub struct UnitBase {
    quantity: Quantity,
    dimensions: SIDimensions,
    units: Vec<Unit>,
    by_id: HashMap<String, Unit>,
    by_abbreviation: HashMap<String, Unit>,
    by_normalized: HashMap<String, Unit>,
}

impl UnitBase {
    /// Builds the family for `quantity` from its unit table.
    pub(crate) fn build(quantity: Quantity) -> Self {
        let mut base = Self {
            quantity,
            dimensions: quantity.si_dimensions(),
            units: Vec::new(),
            by_id: HashMap::new(),
            by_abbreviation: HashMap::new(),
            by_normalized: HashMap::new(),
        };

        let specs = quantity.unit_specs();
        for spec in specs {
            base.register(Unit::named(
                quantity,
                spec.id.to_string(),
                spec.name.to_string(),
                spec.abbreviations.iter().map(|a| a.to_string()).collect(),
                spec.scale,
                false,
            ));
        }

        for spec in specs.iter().filter(|s| s.prefixable) {
            for prefix in &SI_PREFIXES {
                let mut abbreviations: Vec<String> = spec
                    .abbreviations
                    .iter()
                    .map(|a| format!("{}{a}", prefix.symbol))
                    .collect();
                if prefix.ascii != prefix.symbol {
                    abbreviations.extend(spec.abbreviations.iter().map(|a| format!("{}{a}", prefix.ascii)));
                }
                base.register(Unit::named(
                    quantity,
                    format!("{}{}", prefix.ascii, spec.id),
                    format!("{}{}", prefix.name, spec.name),
                    abbreviations,
                    spec.scale.prefixed(prefix.factor),
                    true,
                ));
            }
        }

        base
    }

    fn register(&mut self, unit: Unit) {
        if self.by_id.contains_key(unit.id()) {
            return;
        }
        if unit.is_generated()
            && unit
                .abbreviations()
                .iter()
                .any(|a| self.by_abbreviation.contains_key(a))
        {
            return;
        }
        self.by_id.insert(unit.id().to_string(), unit.clone());
        for abbreviation in unit.abbreviations() {
            self.by_abbreviation
                .entry(abbreviation.clone())
                .or_insert_with(|| unit.clone());
            self.by_normalized
                .entry(normalize(abbreviation))
                .or_insert_with(|| unit.clone());
        }
        self.units.push(unit);
    }

    /// Quantity of this family.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Dimension signature shared by every unit of the family.
    pub fn si_dimensions(&self) -> SIDimensions {
        self.dimensions
    }

    /// Canonical unit of the family (the first unit of its table).
    pub fn standard_unit(&self) -> &Unit {
        &self.units[0]
    }

    /// All units, explicit ones first.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Units keyed by id.
    pub fn units_by_id(&self) -> &HashMap<String, Unit> {
        &self.by_id
    }

    /// Looks up a unit by id.
    pub fn unit_by_id(&self, id: &str) -> Option<&Unit> {
        self.by_id.get(id)
    }

    /// Looks up a unit by abbreviation.
    ///
    /// Tries the exact text, then the text without spaces, `.` and `^`,
    /// and finally reads it as SI dimension text that resolves to the
    /// standard unit when it matches this family's signature.
    pub fn unit_by_abbreviation(&self, abbreviation: &str) -> Option<&Unit> {
        self.by_abbreviation
            .get(abbreviation)
            .or_else(|| self.by_normalized.get(&normalize(abbreviation)))
            .or_else(|| {
                SIDimensions::parse(abbreviation)
                    .ok()
                    .filter(|d| *d == self.dimensions)
                    .map(|_| self.standard_unit())
            })
    }
}

fn normalize(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, ' ' | '.' | '^')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prefixed_length() {
        let base = UnitBase::build(Quantity::Length);
        let km = base.unit_by_abbreviation("km").unwrap();
        assert_eq!(km.id(), "km");
        assert_eq!(km.name(), "kilometer");
        assert!(km.is_generated());
        assert_relative_eq!(km.to_si(1.0), 1000.0);
        let um = base.unit_by_abbreviation("µm").unwrap();
        assert_eq!(base.unit_by_abbreviation("mum"), Some(um));
        assert_relative_eq!(um.to_si(1.0), 1e-6);
    }

    #[test]
    fn test_explicit_wins_over_generated() {
        let base = UnitBase::build(Quantity::Mass);
        let kg = base.unit_by_id("kg").unwrap();
        assert!(!kg.is_generated());
        assert!(kg.scale().is_base_si_scale());
        assert_eq!(base.standard_unit(), kg);
        let mg = base.unit_by_abbreviation("mg").unwrap();
        assert_relative_eq!(mg.to_si(1.0), 1e-6);
    }

    #[test]
    fn test_prefixed_next_to_explicit() {
        let base = UnitBase::build(Quantity::Duration);
        assert_eq!(base.unit_by_abbreviation("min").unwrap().id(), "min");
        assert_relative_eq!(base.unit_by_abbreviation("ms").unwrap().to_si(1.0), 1e-3);
        assert_eq!(base.standard_unit().id(), "s");
    }

    #[test]
    fn test_lookup_fallbacks() {
        let base = UnitBase::build(Quantity::Acceleration);
        assert_eq!(base.unit_by_abbreviation("m/s^2").unwrap().id(), "m/s^2");
        assert_eq!(base.unit_by_abbreviation("m/s 2").unwrap().id(), "m/s^2");
        assert_eq!(base.unit_by_abbreviation("ms-2").unwrap().id(), "m/s^2");
        assert!(base.unit_by_abbreviation("furlong").is_none());

        let force = UnitBase::build(Quantity::Force);
        assert_eq!(force.unit_by_abbreviation("kgm/s2").unwrap().id(), "N");
    }

    #[test]
    fn test_units_by_id_covers_units() {
        let base = UnitBase::build(Quantity::Duration);
        assert_eq!(base.units_by_id().len(), base.units().len());
        assert_eq!(base.si_dimensions().to_string(), "s");
    }
}

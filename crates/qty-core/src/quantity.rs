//! Physical quantities and their named units.
//!
//! Every quantity is one row of a static table: a name, an SI dimension
//! signature, an optional absolute/relative counterpart and the list of
//! named units. The first unit of a row is the quantity's standard unit.
//!
//! Relative quantities describe magnitudes and differences (a length, a
//! duration). Absolute quantities describe points (a position, a time) and
//! pair with the relative quantity of the same dimensions.
//!
//! # Usage
//!
//! ```
//! use qty_core::Quantity;
//!
//! assert_eq!(Quantity::Speed.si_dimensions().to_string(), "ms-1");
//! assert_eq!(Quantity::Time.relative(), Quantity::Duration);
//! assert!(Quantity::AbsoluteTemperature.is_absolute());
//! ```
//!
//! # Used By
//!
//! - [`crate::UnitBase`] - builds one family of units per row
//! - [`crate::UnitRegistry`] - maps signatures back to quantities

use std::fmt;

use crate::dimensions::SIDimensions;
use crate::scale::Scale;

/// Definition of one named unit in the quantity table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSpec {
    /// Unique id within its quantity (ASCII).
    pub id: &'static str,
    /// Full name.
    pub name: &'static str,
    /// Accepted abbreviations; the first is used for display.
    pub abbreviations: &'static [&'static str],
    /// Conversion to SI.
    pub scale: Scale,
    /// Whether SI-prefixed variants are derived from this unit.
    pub prefixable: bool,
}

const fn unit(
    id: &'static str,
    name: &'static str,
    abbreviations: &'static [&'static str],
    factor: f64,
) -> UnitSpec {
    UnitSpec {
        id,
        name,
        abbreviations,
        scale: Scale::linear(factor),
        prefixable: false,
    }
}

const fn prefixable(
    id: &'static str,
    name: &'static str,
    abbreviations: &'static [&'static str],
    factor: f64,
) -> UnitSpec {
    UnitSpec {
        prefixable: true,
        ..unit(id, name, abbreviations, factor)
    }
}

const fn offset(
    id: &'static str,
    name: &'static str,
    abbreviations: &'static [&'static str],
    factor: f64,
    offset: f64,
) -> UnitSpec {
    UnitSpec {
        scale: Scale::offset_linear(factor, offset),
        ..unit(id, name, abbreviations, factor)
    }
}

const fn dims(kg: i8, m: i8, s: i8, a: i8, k: i8) -> SIDimensions {
    SIDimensions::new(0, 0, kg, m, s, a, k, 0, 0)
}

const PI: f64 = std::f64::consts::PI;

macro_rules! quantities {
    ($($variant:ident => $name:literal,)*) => {
        /// A physical quantity with a row in the quantity table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Quantity {
            $(
                #[doc = concat!("The ", $name, " quantity.")]
                $variant,
            )*
        }

        impl Quantity {
            /// All quantities in table order. Relative quantities come first.
            pub const ALL: &'static [Quantity] = &[$(Quantity::$variant,)*];

            /// Human-readable name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Quantity::$variant => $name,)*
                }
            }
        }
    };
}

quantities! {
    Dimensionless => "Dimensionless",
    Length => "Length",
    Area => "Area",
    Volume => "Volume",
    Mass => "Mass",
    Duration => "Duration",
    Speed => "Speed",
    Acceleration => "Acceleration",
    Force => "Force",
    Energy => "Energy",
    Torque => "Torque",
    Power => "Power",
    Pressure => "Pressure",
    Frequency => "Frequency",
    ElectricalCurrent => "ElectricalCurrent",
    ElectricalCharge => "ElectricalCharge",
    ElectricalPotential => "ElectricalPotential",
    ElectricalResistance => "ElectricalResistance",
    Temperature => "Temperature",
    Angle => "Angle",
    SolidAngle => "SolidAngle",
    AmountOfSubstance => "AmountOfSubstance",
    LuminousIntensity => "LuminousIntensity",
    Density => "Density",
    FlowVolume => "FlowVolume",
    FlowMass => "FlowMass",
    LinearDensity => "LinearDensity",
    Position => "Position",
    Time => "Time",
    Direction => "Direction",
    AbsoluteTemperature => "AbsoluteTemperature",
}

impl Quantity {
    /// SI dimension signature shared by all units of this quantity.
    pub const fn si_dimensions(self) -> SIDimensions {
        use Quantity::*;
        match self {
            Dimensionless => SIDimensions::DIMENSIONLESS,
            Length | Position => dims(0, 1, 0, 0, 0),
            Area => dims(0, 2, 0, 0, 0),
            Volume => dims(0, 3, 0, 0, 0),
            Mass => dims(1, 0, 0, 0, 0),
            Duration | Time => dims(0, 0, 1, 0, 0),
            Speed => dims(0, 1, -1, 0, 0),
            Acceleration => dims(0, 1, -2, 0, 0),
            Force => dims(1, 1, -2, 0, 0),
            Energy | Torque => dims(1, 2, -2, 0, 0),
            Power => dims(1, 2, -3, 0, 0),
            Pressure => dims(1, -1, -2, 0, 0),
            Frequency => dims(0, 0, -1, 0, 0),
            ElectricalCurrent => dims(0, 0, 0, 1, 0),
            ElectricalCharge => dims(0, 0, 1, 1, 0),
            ElectricalPotential => dims(1, 2, -3, -1, 0),
            ElectricalResistance => dims(1, 2, -3, -2, 0),
            Temperature | AbsoluteTemperature => dims(0, 0, 0, 0, 1),
            Angle | Direction => SIDimensions::new(1, 0, 0, 0, 0, 0, 0, 0, 0),
            SolidAngle => SIDimensions::new(0, 1, 0, 0, 0, 0, 0, 0, 0),
            AmountOfSubstance => SIDimensions::new(0, 0, 0, 0, 0, 0, 0, 1, 0),
            LuminousIntensity => SIDimensions::new(0, 0, 0, 0, 0, 0, 0, 0, 1),
            Density => dims(1, -3, 0, 0, 0),
            FlowVolume => dims(0, 3, -1, 0, 0),
            FlowMass => dims(1, 0, -1, 0, 0),
            LinearDensity => dims(0, -1, 0, 0, 0),
        }
    }

    /// Returns `true` for quantities that describe points rather than magnitudes.
    pub const fn is_absolute(self) -> bool {
        matches!(
            self,
            Quantity::Position | Quantity::Time | Quantity::Direction | Quantity::AbsoluteTemperature
        )
    }

    /// The relative quantity paired with this one (itself if already relative).
    pub const fn relative(self) -> Quantity {
        match self {
            Quantity::Position => Quantity::Length,
            Quantity::Time => Quantity::Duration,
            Quantity::Direction => Quantity::Angle,
            Quantity::AbsoluteTemperature => Quantity::Temperature,
            q => q,
        }
    }

    /// The absolute quantity paired with this one, if any.
    pub const fn absolute(self) -> Option<Quantity> {
        match self {
            Quantity::Length | Quantity::Position => Some(Quantity::Position),
            Quantity::Duration | Quantity::Time => Some(Quantity::Time),
            Quantity::Angle | Quantity::Direction => Some(Quantity::Direction),
            Quantity::Temperature | Quantity::AbsoluteTemperature => {
                Some(Quantity::AbsoluteTemperature)
            }
            _ => None,
        }
    }

    /// Named units of this quantity; the first one is the standard unit.
    pub fn unit_specs(self) -> &'static [UnitSpec] {
        use Quantity::*;
        match self {
            Dimensionless => DIMENSIONLESS_UNITS,
            Length | Position => LENGTH_UNITS,
            Area => AREA_UNITS,
            Volume => VOLUME_UNITS,
            Mass => MASS_UNITS,
            Duration | Time => DURATION_UNITS,
            Speed => SPEED_UNITS,
            Acceleration => ACCELERATION_UNITS,
            Force => FORCE_UNITS,
            Energy => ENERGY_UNITS,
            Torque => TORQUE_UNITS,
            Power => POWER_UNITS,
            Pressure => PRESSURE_UNITS,
            Frequency => FREQUENCY_UNITS,
            ElectricalCurrent => CURRENT_UNITS,
            ElectricalCharge => CHARGE_UNITS,
            ElectricalPotential => POTENTIAL_UNITS,
            ElectricalResistance => RESISTANCE_UNITS,
            Temperature => TEMPERATURE_UNITS,
            AbsoluteTemperature => ABSOLUTE_TEMPERATURE_UNITS,
            Angle | Direction => ANGLE_UNITS,
            SolidAngle => SOLID_ANGLE_UNITS,
            AmountOfSubstance => AMOUNT_UNITS,
            LuminousIntensity => LUMINOUS_INTENSITY_UNITS,
            Density => DENSITY_UNITS,
            FlowVolume => FLOW_VOLUME_UNITS,
            FlowMass => FLOW_MASS_UNITS,
            LinearDensity => LINEAR_DENSITY_UNITS,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Unit tables
// ============================================================================

const DIMENSIONLESS_UNITS: &[UnitSpec] = &[unit("1", "unit", &[""], 1.0)];

const LENGTH_UNITS: &[UnitSpec] = &[
    prefixable("m", "meter", &["m"], 1.0),
    unit("in", "inch", &["in", "\""], 0.0254),
    unit("ft", "foot", &["ft", "'"], 0.3048),
    unit("yd", "yard", &["yd"], 0.9144),
    unit("mi", "mile", &["mi"], 1609.344),
    unit("NM", "nautical mile", &["NM"], 1852.0),
    unit("AU", "astronomical unit", &["AU"], 149_597_870_700.0),
    unit("ly", "lightyear", &["ly"], 9_460_730_472_580_800.0),
    unit("pc", "parsec", &["pc"], 3.085_677_581_491_367_3e16),
    unit("A", "angstrom", &["Å", "A"], 1e-10),
];

const AREA_UNITS: &[UnitSpec] = &[
    unit("m^2", "square meter", &["m2", "m^2"], 1.0),
    unit("km^2", "square kilometer", &["km2", "km^2"], 1e6),
    unit("cm^2", "square centimeter", &["cm2", "cm^2"], 1e-4),
    unit("mm^2", "square millimeter", &["mm2", "mm^2"], 1e-6),
    unit("ha", "hectare", &["ha"], 1e4),
    unit("a", "are", &["a"], 100.0),
    unit("ac", "acre", &["ac"], 4046.856_422_4),
    unit("ft^2", "square foot", &["ft2", "ft^2"], 0.092_903_04),
    unit("in^2", "square inch", &["in2", "in^2"], 6.4516e-4),
    unit("mi^2", "square mile", &["mi2", "mi^2"], 2_589_988.110_336),
];

const VOLUME_UNITS: &[UnitSpec] = &[
    unit("m^3", "cubic meter", &["m3", "m^3"], 1.0),
    prefixable("L", "liter", &["L", "l"], 1e-3),
    unit("cm^3", "cubic centimeter", &["cm3", "cm^3", "cc"], 1e-6),
    unit("mm^3", "cubic millimeter", &["mm3", "mm^3"], 1e-9),
    unit("km^3", "cubic kilometer", &["km3", "km^3"], 1e9),
    unit("ft^3", "cubic foot", &["ft3", "ft^3"], 0.028_316_846_592),
    unit("in^3", "cubic inch", &["in3", "in^3"], 1.638_706_4e-5),
    unit("gal(US)", "gallon (US)", &["gal(US)", "gal"], 3.785_411_784e-3),
];

// Prefixed mass units derive from the gram; the explicit kilogram row wins
// over the generated "kg".
const MASS_UNITS: &[UnitSpec] = &[
    unit("kg", "kilogram", &["kg"], 1.0),
    prefixable("g", "gram", &["g"], 1e-3),
    unit("t", "tonne", &["t"], 1000.0),
    unit("lb", "pound", &["lb"], 0.453_592_37),
    unit("oz", "ounce", &["oz"], 0.028_349_523_125),
    unit("Da", "dalton", &["Da"], 1.660_539_066_60e-27),
];

const DURATION_UNITS: &[UnitSpec] = &[
    prefixable("s", "second", &["s", "sec"], 1.0),
    unit("min", "minute", &["min"], 60.0),
    unit("h", "hour", &["h", "hr"], 3600.0),
    unit("day", "day", &["day", "d"], 86_400.0),
    unit("wk", "week", &["wk", "week"], 604_800.0),
];

const SPEED_UNITS: &[UnitSpec] = &[
    unit("m/s", "meter per second", &["m/s"], 1.0),
    unit("km/h", "kilometer per hour", &["km/h", "kph"], 1.0 / 3.6),
    unit("mi/h", "mile per hour", &["mi/h", "mph"], 0.447_04),
    unit("kt", "knot", &["kt"], 1852.0 / 3600.0),
    unit("ft/s", "foot per second", &["ft/s", "fps"], 0.3048),
];

const ACCELERATION_UNITS: &[UnitSpec] = &[
    unit("m/s^2", "meter per second squared", &["m/s2", "m/s^2"], 1.0),
    unit("Gal", "gal", &["Gal"], 0.01),
    unit("g", "standard gravity", &["g", "g0"], 9.806_65),
    unit("ft/s^2", "foot per second squared", &["ft/s2", "ft/s^2"], 0.3048),
];

const FORCE_UNITS: &[UnitSpec] = &[
    prefixable("N", "newton", &["N"], 1.0),
    unit("dyn", "dyne", &["dyn"], 1e-5),
    unit("kgf", "kilogram-force", &["kgf"], 9.806_65),
    unit("lbf", "pound-force", &["lbf"], 4.448_221_615_260_5),
];

const ENERGY_UNITS: &[UnitSpec] = &[
    prefixable("J", "joule", &["J"], 1.0),
    prefixable("Wh", "watt-hour", &["Wh"], 3600.0),
    prefixable("eV", "electronvolt", &["eV"], 1.602_176_634e-19),
    unit("cal", "calorie", &["cal"], 4.184),
    unit("kcal", "kilocalorie", &["kcal"], 4184.0),
    unit("BTU", "british thermal unit", &["BTU"], 1055.055_852_62),
    unit("erg", "erg", &["erg"], 1e-7),
];

const TORQUE_UNITS: &[UnitSpec] = &[
    unit("N.m", "newton meter", &["N.m", "Nm"], 1.0),
    unit("lbf.ft", "pound-foot", &["lbf.ft"], 1.355_817_948_331_400_4),
];

const POWER_UNITS: &[UnitSpec] = &[
    prefixable("W", "watt", &["W"], 1.0),
    unit("hp", "horsepower (metric)", &["hp"], 735.498_75),
    unit("erg/s", "erg per second", &["erg/s"], 1e-7),
];

const PRESSURE_UNITS: &[UnitSpec] = &[
    prefixable("Pa", "pascal", &["Pa"], 1.0),
    prefixable("bar", "bar", &["bar"], 1e5),
    unit("atm", "atmosphere", &["atm"], 101_325.0),
    unit("mmHg", "millimeter of mercury", &["mmHg"], 133.322_387_415),
    unit("torr", "torr", &["torr"], 101_325.0 / 760.0),
    unit("psi", "pound per square inch", &["psi"], 6894.757_293_168),
];

const FREQUENCY_UNITS: &[UnitSpec] = &[
    prefixable("Hz", "hertz", &["Hz"], 1.0),
    unit("rpm", "revolutions per minute", &["rpm"], 1.0 / 60.0),
];

const CURRENT_UNITS: &[UnitSpec] = &[prefixable("A", "ampere", &["A"], 1.0)];

const CHARGE_UNITS: &[UnitSpec] = &[
    prefixable("C", "coulomb", &["C"], 1.0),
    unit("Ah", "ampere-hour", &["Ah"], 3600.0),
    unit("mAh", "milliampere-hour", &["mAh"], 3.6),
];

const POTENTIAL_UNITS: &[UnitSpec] = &[prefixable("V", "volt", &["V"], 1.0)];

const RESISTANCE_UNITS: &[UnitSpec] = &[prefixable("ohm", "ohm", &["Ω", "ohm"], 1.0)];

const TEMPERATURE_UNITS: &[UnitSpec] = &[
    unit("K", "kelvin", &["K"], 1.0),
    unit("dgC", "degree Celsius", &["°C", "dgC"], 1.0),
    unit("dgF", "degree Fahrenheit", &["°F", "dgF"], 5.0 / 9.0),
    unit("dgR", "degree Rankine", &["°R", "dgR"], 5.0 / 9.0),
];

const ABSOLUTE_TEMPERATURE_UNITS: &[UnitSpec] = &[
    unit("K", "kelvin", &["K"], 1.0),
    offset("dgC", "degree Celsius", &["°C", "dgC"], 1.0, 273.15),
    offset("dgF", "degree Fahrenheit", &["°F", "dgF"], 5.0 / 9.0, 459.67),
    unit("dgR", "degree Rankine", &["°R", "dgR"], 5.0 / 9.0),
];

const ANGLE_UNITS: &[UnitSpec] = &[
    unit("rad", "radian", &["rad"], 1.0),
    unit("deg", "degree", &["°", "deg"], PI / 180.0),
    unit("grad", "gradian", &["grad"], PI / 200.0),
    unit("arcmin", "arcminute", &["'", "arcmin"], PI / 10_800.0),
    unit("arcsec", "arcsecond", &["\"", "arcsec"], PI / 648_000.0),
];

const SOLID_ANGLE_UNITS: &[UnitSpec] = &[
    unit("sr", "steradian", &["sr"], 1.0),
    unit("sq.deg", "square degree", &["sq.deg", "deg^2"], (PI / 180.0) * (PI / 180.0)),
];

const AMOUNT_UNITS: &[UnitSpec] = &[prefixable("mol", "mole", &["mol"], 1.0)];

const LUMINOUS_INTENSITY_UNITS: &[UnitSpec] = &[unit("cd", "candela", &["cd"], 1.0)];

const DENSITY_UNITS: &[UnitSpec] = &[
    unit("kg/m^3", "kilogram per cubic meter", &["kg/m3", "kg/m^3"], 1.0),
    unit("g/cm^3", "gram per cubic centimeter", &["g/cm3", "g/cm^3"], 1000.0),
];

const FLOW_VOLUME_UNITS: &[UnitSpec] = &[
    unit("m^3/s", "cubic meter per second", &["m3/s", "m^3/s"], 1.0),
    unit("m^3/h", "cubic meter per hour", &["m3/h", "m^3/h"], 1.0 / 3600.0),
    unit("L/s", "liter per second", &["L/s"], 1e-3),
    unit("L/min", "liter per minute", &["L/min"], 1e-3 / 60.0),
];

const FLOW_MASS_UNITS: &[UnitSpec] = &[
    unit("kg/s", "kilogram per second", &["kg/s"], 1.0),
    unit("g/s", "gram per second", &["g/s"], 1e-3),
    unit("t/h", "tonne per hour", &["t/h"], 1000.0 / 3600.0),
];

const LINEAR_DENSITY_UNITS: &[UnitSpec] = &[
    unit("/m", "per meter", &["/m", "1/m"], 1.0),
    unit("/km", "per kilometer", &["/km", "1/km"], 1e-3),
    unit("/cm", "per centimeter", &["/cm", "1/cm"], 100.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_units_are_si() {
        for &q in Quantity::ALL {
            let first = q.unit_specs()[0];
            assert!(first.scale.is_base_si_scale(), "{q}: {}", first.id);
        }
    }

    #[test]
    fn test_counterparts() {
        for &q in Quantity::ALL {
            if q.is_absolute() {
                assert_eq!(q.absolute(), Some(q));
                assert_eq!(q.relative().si_dimensions(), q.si_dimensions());
                assert!(!q.relative().is_absolute());
            } else if let Some(abs) = q.absolute() {
                assert_eq!(abs.relative(), q);
            }
        }
    }

    #[test]
    fn test_ids_unique_per_quantity() {
        for &q in Quantity::ALL {
            let specs = q.unit_specs();
            for (i, a) in specs.iter().enumerate() {
                assert!(specs[i + 1..].iter().all(|b| b.id != a.id), "{q}: {}", a.id);
            }
        }
    }

    #[test]
    fn test_relative_listed_first() {
        let first_abs = Quantity::ALL.iter().position(|q| q.is_absolute()).unwrap();
        assert!(Quantity::ALL[first_abs..].iter().all(|q| q.is_absolute()));
    }
}

//! Single values with a unit.
//!
//! A [`Scalar`] stores its SI value and a display [`Unit`]. The display
//! value is derived on demand, so changing the display unit never changes
//! the quantity.
//!
//! # Arithmetic
//!
//! - `plus` / `minus` need equal dimensions. Operands in the same unit are
//!   added in that unit; otherwise the result is in the left operand's
//!   standard unit.
//! - `times` / `divide` compose dimensions and resolve the result unit
//!   through the [`UnitRegistry`]: `m / s` becomes a speed in `m/s`,
//!   `m2 * m2` becomes an SI scalar in `m4`.
//! - Math functions (`abs`, `sqrt`, `sin`, ...) and negation act on the
//!   display value and keep the unit.
//!
//! # Usage
//!
//! ```
//! use qty_core::Quantity;
//! use qty_value::Scalar;
//!
//! let d = Scalar::<f64>::of(1.5, Quantity::Length, "km").unwrap();
//! let t = Scalar::<f64>::of(30.0, Quantity::Duration, "min").unwrap();
//! let v = d.divide(&t);
//! assert_eq!(v.quantity(), Some(Quantity::Speed));
//! assert!((v.si() - 1500.0 / 1800.0).abs() < 1e-12);
//! assert_eq!(d.to_string(), "1.5 km");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Div, Mul, Neg};

use qty_core::{Element, Error, Quantity, Result, SIDimensions, Unit, UnitRegistry};

use crate::kind::{Abs, Kind, Rel};
use crate::text::{self, TextOptions};

/// A value with a unit, relative by default.
#[derive(Debug, Clone)]
pub struct Scalar<T, K = Rel> {
    si: T,
    unit: Unit,
    kind: PhantomData<K>,
}

/// An absolute scalar: a point such as a position or a temperature reading.
pub type AbsScalar<T> = Scalar<T, Abs>;

pub(crate) fn check_compatible(have: &Unit, want: &Unit) -> Result<()> {
    if have.si_dimensions() != want.si_dimensions() {
        return Err(Error::incompatible_unit(
            have.si_dimensions().to_string(),
            want.si_dimensions().to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn lookup_unit(quantity: Quantity, text: &str) -> Result<Unit> {
    UnitRegistry::global()
        .unit(quantity, text)
        .ok_or_else(|| Error::construction(format!("unknown unit {text:?} for {quantity}")))
}

pub(crate) fn quantity_unit(have: SIDimensions, quantity: Quantity) -> Result<Unit> {
    if have != quantity.si_dimensions() {
        return Err(Error::incompatible_unit(
            have.to_string(),
            format!("{quantity} ({})", quantity.si_dimensions()),
        ));
    }
    Ok(UnitRegistry::global()
        .unit_base(quantity)
        .standard_unit()
        .clone())
}

impl<T: Element, K: Kind> Scalar<T, K> {
    /// Creates a scalar from a value expressed in `unit`.
    pub fn new(value: T, unit: &Unit) -> Self {
        Self::raw_in(value, K::bind(unit))
    }

    /// Creates a scalar from an SI value, displayed in `unit`.
    pub fn from_si(si: T, unit: &Unit) -> Self {
        Self {
            si,
            unit: K::bind(unit),
            kind: PhantomData,
        }
    }

    /// Creates a scalar from an SI value in the standard unit of `quantity`.
    pub fn instantiate_si(si: T, quantity: Quantity) -> Self {
        Self::from_si(si, UnitRegistry::global().unit_base(quantity).standard_unit())
    }

    /// Creates a scalar from a value and a unit abbreviation or id of `quantity`.
    ///
    /// # Errors
    ///
    /// [`Error::Construction`] if `quantity` has no such unit.
    pub fn of(value: T, quantity: Quantity, unit: &str) -> Result<Self> {
        Ok(Self::new(value, &lookup_unit(quantity, unit)?))
    }

    fn raw_in(value: T, unit: Unit) -> Self {
        Self {
            si: text::si_value(value, &unit),
            unit,
            kind: PhantomData,
        }
    }

    /// SI value.
    #[inline]
    pub fn si(&self) -> T {
        self.si
    }

    /// Value in the display unit.
    #[inline]
    pub fn value(&self) -> T {
        text::display_value(self.si, &self.unit)
    }

    /// Value expressed in another unit of the same dimensions.
    pub fn value_in(&self, unit: &Unit) -> Result<T> {
        check_compatible(&self.unit, unit)?;
        Ok(text::display_value(self.si, unit))
    }

    /// Display unit.
    #[inline]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Dimension signature of the display unit.
    #[inline]
    pub fn si_dimensions(&self) -> SIDimensions {
        self.unit.si_dimensions()
    }

    /// Quantity of the display unit, `None` for SI units.
    #[inline]
    pub fn quantity(&self) -> Option<Quantity> {
        self.unit.quantity()
    }

    /// Returns `true` for [`Abs`] scalars.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        K::IS_ABSOLUTE
    }

    /// Same value shown in another unit of the same dimensions.
    pub fn with_display_unit(&self, unit: &Unit) -> Result<Self> {
        check_compatible(&self.unit, unit)?;
        Ok(Self::from_si(self.si, unit))
    }

    /// Reinterprets an SI-generic scalar as `quantity`, in its standard unit.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleUnit`] if the dimensions differ.
    pub fn as_quantity(&self, quantity: Quantity) -> Result<Self> {
        let unit = quantity_unit(self.si_dimensions(), quantity)?;
        Ok(Self::from_si(self.si, &unit))
    }

    fn map_value(&self, f: impl Fn(T) -> T) -> Self {
        Self::raw_in(f(self.value()), self.unit.clone())
    }

    /// Linear interpolation between `zero` (ratio 0) and `one` (ratio 1),
    /// in the unit of `zero`.
    pub fn interpolate(zero: &Self, one: &Self, ratio: T) -> Result<Self> {
        let a = zero.value();
        let b = one.value_in(&zero.unit)?;
        Ok(Self::raw_in(a * (T::ONE - ratio) + b * ratio, zero.unit.clone()))
    }

    /// The larger of two scalars (`self` on ties and NaN).
    pub fn max(&self, other: &Self) -> Self {
        if other.si > self.si { other.clone() } else { self.clone() }
    }

    /// The smaller of two scalars (`self` on ties and NaN).
    pub fn min(&self, other: &Self) -> Self {
        if other.si < self.si { other.clone() } else { self.clone() }
    }

    /// `self < 0`
    pub fn lt0(&self) -> bool {
        self.si < T::ZERO
    }

    /// `self <= 0`
    pub fn le0(&self) -> bool {
        self.si <= T::ZERO
    }

    /// `self > 0`
    pub fn gt0(&self) -> bool {
        self.si > T::ZERO
    }

    /// `self >= 0`
    pub fn ge0(&self) -> bool {
        self.si >= T::ZERO
    }

    /// `self == 0`
    pub fn eq0(&self) -> bool {
        self.si == T::ZERO
    }

    /// `self != 0`
    pub fn ne0(&self) -> bool {
        self.si != T::ZERO
    }

    /// Display value raised to `exponent`, same unit.
    pub fn pow(&self, exponent: T) -> Self {
        self.map_value(|v| v.powf(exponent))
    }

    /// Renders the scalar with the given options.
    pub fn to_string_with(&self, options: TextOptions) -> String {
        let mut out = String::new();
        if options.verbose {
            out.push_str(K::TAG);
            out.push(' ');
        }
        out.push_str(&self.value().to_string());
        if options.with_unit {
            text::write_unit(&mut out, &self.unit, " ");
        }
        out
    }
}

macro_rules! value_math {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        impl<T: Element, K: Kind> Scalar<T, K> {
            $(
                $(#[$doc])*
                pub fn $name(&self) -> Self {
                    self.map_value(<T as Element>::$name)
                }
            )*
        }
    };
}

value_math! {
    /// Absolute display value.
    abs,
    /// Display value rounded up.
    ceil,
    /// Display value rounded down.
    floor,
    /// Display value rounded half away from zero.
    round,
    /// Display value rounded half to even.
    rint,
    /// Sign of the display value.
    signum,
    /// Square root of the display value.
    sqrt,
    /// Cube root of the display value.
    cbrt,
    /// `e` raised to the display value.
    exp,
    /// `e^v - 1` of the display value.
    exp_m1,
    /// Natural logarithm of the display value.
    ln,
    /// `ln(1 + v)` of the display value.
    ln_1p,
    /// Base-10 logarithm of the display value.
    log10,
    /// Sine of the display value.
    sin,
    /// Cosine of the display value.
    cos,
    /// Tangent of the display value.
    tan,
    /// Arcsine of the display value.
    asin,
    /// Arccosine of the display value.
    acos,
    /// Arctangent of the display value.
    atan,
    /// Hyperbolic sine of the display value.
    sinh,
    /// Hyperbolic cosine of the display value.
    cosh,
    /// Hyperbolic tangent of the display value.
    tanh,
}

// ============================================================================
// Relative arithmetic
// ============================================================================

impl<T: Element> Scalar<T, Rel> {
    fn additive(&self, other: &Self, sign: T) -> Result<Self> {
        check_compatible(&other.unit, &self.unit)?;
        if self.unit == other.unit {
            let value = self.value() + sign * other.value();
            return Ok(Self::raw_in(value, self.unit.clone()));
        }
        Ok(Self {
            si: self.si + sign * other.si,
            unit: self.unit.standard_unit(),
            kind: PhantomData,
        })
    }

    /// `self + other`.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleUnit`] if the dimensions differ.
    pub fn plus(&self, other: &Self) -> Result<Self> {
        self.additive(other, T::ONE)
    }

    /// `self - other`.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleUnit`] if the dimensions differ.
    pub fn minus(&self, other: &Self) -> Result<Self> {
        self.additive(other, -T::ONE)
    }

    /// `self * other`, in the unit resolved for the product's dimensions.
    pub fn times(&self, other: &Self) -> Self {
        let unit = UnitRegistry::global()
            .lookup_or_create_si_unit(self.si_dimensions().plus(&other.si_dimensions()));
        Self::from_si(self.si * other.si, &unit)
    }

    /// `self / other`, in the unit resolved for the quotient's dimensions.
    pub fn divide(&self, other: &Self) -> Self {
        let unit = UnitRegistry::global()
            .lookup_or_create_si_unit(self.si_dimensions().minus(&other.si_dimensions()));
        Self::from_si(self.si / other.si, &unit)
    }

    /// `1 / self`, with inverted dimensions.
    pub fn inv(&self) -> Self {
        let unit = UnitRegistry::global().lookup_or_create_si_unit(self.si_dimensions().invert());
        Self::from_si(T::ONE / self.si, &unit)
    }

    /// SI value multiplied by `factor`, same display unit.
    pub fn scale(&self, factor: T) -> Self {
        Self {
            si: self.si * factor,
            unit: self.unit.clone(),
            kind: PhantomData,
        }
    }

    /// The absolute scalar with the same display value, e.g. a 20 °C
    /// difference becomes a 20 °C reading.
    pub fn to_abs(&self) -> Scalar<T, Abs> {
        Scalar::new(self.value(), &self.unit)
    }
}

// ============================================================================
// Absolute arithmetic
// ============================================================================

impl<T: Element> Scalar<T, Abs> {
    fn shifted(&self, increment: &Scalar<T, Rel>, sign: T) -> Result<Self> {
        let step = increment.value_in(&self.unit.relative_unit())?;
        Ok(Self::raw_in(self.value() + sign * step, self.unit.clone()))
    }

    /// Point moved forward by `increment`, in this scalar's unit.
    pub fn plus_rel(&self, increment: &Scalar<T, Rel>) -> Result<Self> {
        self.shifted(increment, T::ONE)
    }

    /// Point moved back by `decrement`, in this scalar's unit.
    pub fn minus_rel(&self, decrement: &Scalar<T, Rel>) -> Result<Self> {
        self.shifted(decrement, -T::ONE)
    }

    /// Distance between two points, as a relative scalar in this scalar's
    /// relative unit.
    pub fn minus_abs(&self, other: &Self) -> Result<Scalar<T, Rel>> {
        let value = self.value() - other.value_in(&self.unit)?;
        Ok(Scalar::new(value, &self.unit))
    }

    /// The relative scalar with the same display value.
    pub fn to_rel(&self) -> Scalar<T, Rel> {
        Scalar::new(self.value(), &self.unit)
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl<T: Element, K: Kind> PartialEq for Scalar<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.si == other.si && self.unit.standard_unit() == other.unit.standard_unit()
    }
}

impl<T: Element, K: Kind> PartialOrd for Scalar<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.unit.standard_unit() != other.unit.standard_unit() {
            return None;
        }
        self.si.partial_cmp(&other.si)
    }
}

// ============================================================================
// Operators
// ============================================================================

impl<T: Element> Mul for &Scalar<T, Rel> {
    type Output = Scalar<T, Rel>;

    fn mul(self, rhs: Self) -> Scalar<T, Rel> {
        self.times(rhs)
    }
}

impl<T: Element> Mul for Scalar<T, Rel> {
    type Output = Scalar<T, Rel>;

    fn mul(self, rhs: Self) -> Scalar<T, Rel> {
        self.times(&rhs)
    }
}

impl<T: Element> Div for &Scalar<T, Rel> {
    type Output = Scalar<T, Rel>;

    fn div(self, rhs: Self) -> Scalar<T, Rel> {
        self.divide(rhs)
    }
}

impl<T: Element> Div for Scalar<T, Rel> {
    type Output = Scalar<T, Rel>;

    fn div(self, rhs: Self) -> Scalar<T, Rel> {
        self.divide(&rhs)
    }
}

impl<T: Element, K: Kind> Neg for Scalar<T, K> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map_value(|v| -v)
    }
}

impl<T: Element, K: Kind> fmt::Display for Scalar<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(TextOptions::PLAIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn length(value: f64, unit: &str) -> Scalar<f64> {
        Scalar::of(value, Quantity::Length, unit).unwrap()
    }

    #[test]
    fn test_new_and_units() {
        let d = length(1.5, "km");
        assert_eq!(d.si(), 1500.0);
        assert_eq!(d.value(), 1.5);
        assert_eq!(d.unit().abbreviation(), "km");
        let m = d.with_display_unit(&d.unit().standard_unit()).unwrap();
        assert_eq!(m.value(), 1500.0);
        assert_eq!(m, d);
        assert!(Scalar::<f64>::of(1.0, Quantity::Length, "furlong").unwrap_err().is_construction());
    }

    #[test]
    fn test_plus_same_unit_stays() {
        let sum = length(1.0, "km").plus(&length(2.0, "km")).unwrap();
        assert_eq!(sum.unit().abbreviation(), "km");
        assert_eq!(sum.value(), 3.0);
    }

    #[test]
    fn test_plus_mixed_goes_standard() {
        let sum = length(1.0, "km").plus(&length(500.0, "m")).unwrap();
        assert_eq!(sum.unit().abbreviation(), "m");
        assert_eq!(sum.value(), 1500.0);
        let diff = length(1.0, "mi").minus(&length(1.0, "km")).unwrap();
        assert_eq!(diff.unit().abbreviation(), "m");
        assert_relative_eq!(diff.si(), 609.344, epsilon = 1e-9);
    }

    #[test]
    fn test_plus_incompatible() {
        let t = Scalar::<f64>::of(1.0, Quantity::Duration, "s").unwrap();
        assert!(length(1.0, "m").plus(&t).unwrap_err().is_incompatible_unit());
    }

    #[test]
    fn test_times_divide_resolve() {
        let a = length(2.0, "m") * length(3.0, "m");
        assert_eq!(a.quantity(), Some(Quantity::Area));
        assert_eq!(a.si(), 6.0);

        let t = Scalar::<f64>::of(2.0, Quantity::Duration, "s").unwrap();
        let v = length(10.0, "m").divide(&t);
        assert_eq!(v.quantity(), Some(Quantity::Speed));
        assert_eq!(v.si(), 5.0);

        let m4 = &a * &a;
        assert!(m4.unit().is_si_generic());
        assert_eq!(m4.unit().abbreviation(), "m4");

        let ratio = &a / &a;
        assert_eq!(ratio.quantity(), Some(Quantity::Dimensionless));
        assert_eq!(ratio.to_string(), "1");

        let f = t.inv();
        assert_eq!(f.quantity(), Some(Quantity::Frequency));
        assert_eq!(f.si(), 0.5);
    }

    #[test]
    fn test_as_quantity() {
        let a = length(2.0, "m") * length(3.0, "m");
        let m4 = &a * &a;
        assert!(m4.as_quantity(Quantity::Area).unwrap_err().is_incompatible_unit());
        let back = m4.divide(&a).as_quantity(Quantity::Area).unwrap();
        assert_eq!(back.unit().abbreviation(), "m2");
        assert_eq!(back.si(), 6.0);
    }

    #[test]
    fn test_absolute_temperature() {
        let t20 = AbsScalar::<f64>::of(20.0, Quantity::AbsoluteTemperature, "°C").unwrap();
        assert_relative_eq!(t20.si(), 293.15);
        assert!(t20.is_absolute());

        let step = Scalar::<f64>::of(10.0, Quantity::Temperature, "K").unwrap();
        let t30 = t20.plus_rel(&step).unwrap();
        assert_relative_eq!(t30.value(), 30.0, epsilon = 1e-9);
        assert_eq!(t30.unit().abbreviation(), "°C");

        let diff = t30.minus_abs(&t20).unwrap();
        assert!(!diff.is_absolute());
        assert_eq!(diff.quantity(), Some(Quantity::Temperature));
        assert_relative_eq!(diff.si(), 10.0, epsilon = 1e-9);

        let back = t30.minus_rel(&step).unwrap();
        assert_relative_eq!(back.si(), t20.si(), epsilon = 1e-9);

        let rel = t20.to_rel();
        assert_relative_eq!(rel.value(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(rel.to_abs().si(), 293.15);
    }

    #[test]
    fn test_math_on_display_value() {
        let d = length(-2.5, "km");
        assert_eq!(d.abs().value(), 2.5);
        assert_eq!(d.abs().unit().abbreviation(), "km");
        assert_eq!(d.floor().value(), -3.0);
        assert_eq!(d.ceil().value(), -2.0);
        assert_eq!(d.rint().value(), -2.0);
        assert_eq!(d.round().value(), -3.0);
        assert_eq!((-d.clone()).value(), 2.5);
        assert_eq!(length(4.0, "km").sqrt().value(), 2.0);
        assert_relative_eq!(length(3.0, "m").pow(2.0).value(), 9.0);
    }

    #[test]
    fn test_scale_multiplies_si() {
        let d = length(1.5, "km").scale(2.0);
        assert_eq!(d.si(), 3000.0);
        assert_eq!(d.value(), 3.0);
        assert_eq!(d.unit().abbreviation(), "km");
    }

    #[test]
    fn test_comparisons() {
        let a = length(1.0, "km");
        let b = length(999.0, "m");
        assert!(a > b);
        assert!(b < a);
        assert_eq!(a.max(&b), a);
        assert_eq!(a.min(&b), b);
        assert!(a.gt0() && a.ne0() && !a.lt0());
        assert!(length(0.0, "m").eq0());
        let t = Scalar::<f64>::of(1.0, Quantity::Duration, "s").unwrap();
        assert_eq!(length(1.0, "m").partial_cmp(&t), None);
        assert_ne!(length(1.0, "m"), t);
    }

    #[test]
    fn test_interpolate() {
        let zero = length(0.0, "km");
        let one = length(1000.0, "m");
        let q = Scalar::interpolate(&zero, &one, 0.25).unwrap();
        assert_eq!(q.unit().abbreviation(), "km");
        assert_relative_eq!(q.value(), 0.25);
    }

    #[test]
    fn test_text() {
        let d = length(1.5, "km");
        assert_eq!(d.to_string(), "1.5 km");
        assert_eq!(d.to_string_with(TextOptions::VERBOSE), "Rel 1.5 km");
        assert_eq!(d.to_string_with(TextOptions::BARE), "1.5");
    }

    #[test]
    fn test_f32() {
        let d = Scalar::<f32>::of(2.0, Quantity::Length, "km").unwrap();
        assert_eq!(d.si(), 2000.0f32);
        assert_eq!(d.times(&d).si(), 4.0e6f32);
    }
}

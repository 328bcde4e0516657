//! SI dimension signatures.
//!
//! An [`SIDimensions`] value is the exponent vector of a quantity over the
//! nine base dimensions, in this fixed order:
//!
//! | slot | symbol | dimension          |
//! |------|--------|--------------------|
//! | 0    | `rad`  | angle              |
//! | 1    | `sr`   | solid angle        |
//! | 2    | `kg`   | mass               |
//! | 3    | `m`    | length             |
//! | 4    | `s`    | time               |
//! | 5    | `A`    | electric current   |
//! | 6    | `K`    | temperature        |
//! | 7    | `mol`  | amount of substance|
//! | 8    | `cd`   | luminous intensity |
//!
//! Multiplying quantities adds exponents, dividing subtracts them and
//! inverting negates them. The plain rendering (`"kgms-2"`, `"m4"`, `"1"`)
//! is the canonical key used by the unit registry.
//!
//! # Usage
//!
//! ```
//! use qty_core::SIDimensions;
//!
//! let length = SIDimensions::parse("m").unwrap();
//! let time = SIDimensions::parse("s").unwrap();
//! let speed = length / time;
//! assert_eq!(speed.to_string(), "ms-1");
//! assert_eq!(speed * time, length);
//! ```

use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of base dimensions.
pub const NUMBER_DIMENSIONS: usize = 9;

/// Symbols of the base dimensions, in slot order.
pub const SI_ABBREVIATIONS: [&str; NUMBER_DIMENSIONS] =
    ["rad", "sr", "kg", "m", "s", "A", "K", "mol", "cd"];

// Parser tries longer symbols first so `mol` is not read as `m` + `ol`.
const PARSE_ORDER: [usize; NUMBER_DIMENSIONS] = [0, 7, 1, 2, 8, 3, 4, 5, 6];

/// Exponents of a quantity over the nine base dimensions.
///
/// Equality is exponent-wise. Arithmetic saturates at the `i8` range; use
/// [`checked_pow`](Self::checked_pow) where large powers are possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SIDimensions([i8; NUMBER_DIMENSIONS]);

impl SIDimensions {
    /// The dimensionless signature (all exponents zero).
    pub const DIMENSIONLESS: Self = Self([0; NUMBER_DIMENSIONS]);

    /// Creates a signature from exponents in slot order.
    #[inline]
    pub const fn from_exponents(exponents: [i8; NUMBER_DIMENSIONS]) -> Self {
        Self(exponents)
    }

    /// Creates a signature from the individual exponents.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        angle: i8,
        solid_angle: i8,
        mass: i8,
        length: i8,
        time: i8,
        current: i8,
        temperature: i8,
        amount_of_substance: i8,
        luminous_intensity: i8,
    ) -> Self {
        Self([
            angle,
            solid_angle,
            mass,
            length,
            time,
            current,
            temperature,
            amount_of_substance,
            luminous_intensity,
        ])
    }

    /// Exponents in slot order.
    #[inline]
    pub const fn exponents(&self) -> [i8; NUMBER_DIMENSIONS] {
        self.0
    }

    /// Exponent of one slot.
    #[inline]
    pub fn exponent(&self, slot: usize) -> Option<i8> {
        self.0.get(slot).copied()
    }

    /// Returns `true` if every exponent is zero.
    #[inline]
    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// Signature of the product of two quantities.
    ///
    /// Exponents wrap on overflow so that `(a * b) / b == a` always holds.
    pub fn plus(&self, other: &Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i].wrapping_add(other.0[i])))
    }

    /// Signature of the quotient of two quantities.
    pub fn minus(&self, other: &Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i].wrapping_sub(other.0[i])))
    }

    /// Signature of the reciprocal.
    pub fn invert(&self) -> Self {
        Self(self.0.map(i8::wrapping_neg))
    }

    /// Signature raised to an integer power, or `None` if an exponent overflows.
    pub fn checked_pow(&self, n: u32) -> Option<Self> {
        let n = i8::try_from(n).ok();
        let mut out = [0i8; NUMBER_DIMENSIONS];
        for (slot, &e) in out.iter_mut().zip(self.0.iter()) {
            *slot = match (e, n) {
                (0, _) => 0,
                (e, Some(n)) => e.checked_mul(n)?,
                (_, None) => return None,
            };
        }
        Some(Self(out))
    }

    /// Parses SI dimension text such as `"kgm/s2"`, `"kgms-2"`, `"m2"` or `"1"`.
    ///
    /// Rules:
    /// - `""` and `"1"` are dimensionless (also as either side of `/`)
    /// - at most one `/`; the right side is subtracted
    /// - each symbol takes an optional exponent: digits, optionally preceded by `-`
    /// - `.`, `^` and spaces between symbols are ignored
    /// - a repeated symbol accumulates
    /// - anything else is a [`Error::DimensionParse`]
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.split('/');
        let numerator = parts.next().unwrap_or_default();
        let denominator = parts.next();
        if parts.next().is_some() {
            return Err(Error::dimension_parse(text, "more than one division sign"));
        }
        let num = parse_product(text, numerator)?;
        match denominator {
            Some(den) => Ok(num.minus(&parse_product(text, den)?)),
            None => Ok(num),
        }
    }

    /// Renders the signature with explicit options.
    ///
    /// ```
    /// use qty_core::{DimensionFormat, SIDimensions};
    ///
    /// let force = SIDimensions::parse("kgm/s2").unwrap();
    /// assert_eq!(force.format(DimensionFormat::PLAIN), "kgms-2");
    /// assert_eq!(force.format(DimensionFormat::DIVIDED), "kgm/s2");
    /// assert_eq!(
    ///     force.format(DimensionFormat { separator: true, power: true, ..DimensionFormat::DIVIDED }),
    ///     "kg.m/s^2"
    /// );
    /// ```
    pub fn format(&self, options: DimensionFormat) -> String {
        if !options.names {
            return format!("{:?}", self.0);
        }
        let mut out = String::new();
        let mut first = true;
        for (i, &e) in self.0.iter().enumerate() {
            if e == 0 || (options.divided && e < 0) {
                continue;
            }
            push_term(&mut out, &mut first, options, SI_ABBREVIATIONS[i], i16::from(e));
        }
        if out.is_empty() {
            out.push('1');
        }
        if options.divided && self.0.iter().any(|&e| e < 0) {
            out.push('/');
            let mut first = true;
            for (i, &e) in self.0.iter().enumerate() {
                if e < 0 {
                    push_term(&mut out, &mut first, options, SI_ABBREVIATIONS[i], -i16::from(e));
                }
            }
        }
        out
    }
}

fn push_term(out: &mut String, first: &mut bool, options: DimensionFormat, symbol: &str, e: i16) {
    if !*first && options.separator {
        out.push('.');
    }
    *first = false;
    out.push_str(symbol);
    if e != 1 {
        if options.power {
            out.push('^');
        }
        out.push_str(&e.to_string());
    }
}

fn parse_product(full: &str, text: &str) -> Result<SIDimensions> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "1" {
        return Ok(SIDimensions::DIMENSIONLESS);
    }
    let mut exps = [0i8; NUMBER_DIMENSIONS];
    let mut rest = trimmed;
    while !rest.is_empty() {
        rest = rest.trim_start_matches(['.', ' ']);
        if rest.is_empty() {
            break;
        }
        let Some(slot) = PARSE_ORDER
            .iter()
            .copied()
            .find(|&i| rest.starts_with(SI_ABBREVIATIONS[i]))
        else {
            return Err(Error::dimension_parse(full, format!("unexpected text {rest:?}")));
        };
        let symbol = SI_ABBREVIATIONS[slot];
        rest = &rest[symbol.len()..];
        rest = rest.strip_prefix('^').unwrap_or(rest);
        let (negative, after_sign) = match rest.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, rest),
        };
        let digits = after_sign
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after_sign.len());
        let exponent: i8 = if digits == 0 {
            if negative {
                return Err(Error::dimension_parse(
                    full,
                    format!("minus sign after {symbol} without an exponent"),
                ));
            }
            1
        } else {
            after_sign[..digits]
                .parse::<i8>()
                .map_err(|_| Error::dimension_parse(full, format!("exponent of {symbol} out of range")))?
        };
        rest = &after_sign[digits..];
        let signed = if negative { -exponent } else { exponent };
        exps[slot] = exps[slot].saturating_add(signed);
    }
    Ok(SIDimensions(exps))
}

/// Rendering options for [`SIDimensions::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionFormat {
    /// Put negative exponents after a single `/` (`m/s2` instead of `ms-2`).
    pub divided: bool,
    /// Separate terms with `.` (`kg.m.s-2`).
    pub separator: bool,
    /// Mark exponents with `^` (`m^2`).
    pub power: bool,
    /// Use base symbols; when `false`, print the raw exponent list.
    pub names: bool,
}

impl DimensionFormat {
    /// Canonical form used as registry key and by `Display`.
    pub const PLAIN: Self = Self {
        divided: false,
        separator: false,
        power: false,
        names: true,
    };

    /// Numerator/denominator form.
    pub const DIVIDED: Self = Self {
        divided: true,
        ..Self::PLAIN
    };
}

impl Default for DimensionFormat {
    fn default() -> Self {
        Self::PLAIN
    }
}

impl fmt::Display for SIDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DimensionFormat::PLAIN))
    }
}

impl FromStr for SIDimensions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Mul for SIDimensions {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.plus(&rhs)
    }
}

impl Div for SIDimensions {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.minus(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_forms() {
        let force = SIDimensions::new(0, 0, 1, 1, -2, 0, 0, 0, 0);
        assert_eq!(SIDimensions::parse("kgm/s2").unwrap(), force);
        assert_eq!(SIDimensions::parse("kgms-2").unwrap(), force);
        assert_eq!(SIDimensions::parse("kg.m.s^-2").unwrap(), force);
        assert_eq!(SIDimensions::parse("1").unwrap(), SIDimensions::DIMENSIONLESS);
        assert_eq!(SIDimensions::parse("").unwrap(), SIDimensions::DIMENSIONLESS);
        assert_eq!(
            SIDimensions::parse("1/s").unwrap(),
            SIDimensions::new(0, 0, 0, 0, -1, 0, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_mol_not_metre() {
        let d = SIDimensions::parse("mol/m3").unwrap();
        assert_eq!(d.exponents(), [0, 0, 0, -3, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["m/s/s", "m-", "mx", "kgm/s-", "m2q"] {
            let err = SIDimensions::parse(bad).unwrap_err();
            assert!(matches!(err, Error::DimensionParse { .. }), "{bad}");
        }
    }

    #[test]
    fn test_render() {
        let area = SIDimensions::parse("m2").unwrap();
        assert_eq!((area * area).to_string(), "m4");
        assert_eq!((area / area).to_string(), "1");
        let hz = SIDimensions::parse("1/s").unwrap();
        assert_eq!(hz.format(DimensionFormat::DIVIDED), "1/s");
        assert_eq!(hz.to_string(), "s-1");
        let names_off = DimensionFormat {
            names: false,
            ..DimensionFormat::PLAIN
        };
        assert_eq!(area.format(names_off), "[0, 0, 0, 2, 0, 0, 0, 0, 0]");
    }

    #[test]
    fn test_checked_pow() {
        let area = SIDimensions::parse("m2").unwrap();
        assert_eq!(area.checked_pow(3).unwrap().to_string(), "m6");
        assert_eq!(area.checked_pow(0).unwrap(), SIDimensions::DIMENSIONLESS);
        assert!(area.checked_pow(100).is_none());
        assert_eq!(SIDimensions::DIMENSIONLESS.checked_pow(1000), Some(SIDimensions::DIMENSIONLESS));
    }

    #[test]
    fn test_large_exponents_compose_back() {
        let mut e = [0i8; NUMBER_DIMENSIONS];
        e[3] = 100;
        let m100 = SIDimensions::from_exponents(e);
        assert_eq!((m100 * m100) / m100, m100);
        assert_eq!((m100 / m100) * m100, m100);
        assert_eq!(m100.invert().invert(), m100);
        let min = SIDimensions::from_exponents([i8::MIN; NUMBER_DIMENSIONS]);
        assert_eq!(min.invert().invert(), min);
    }

    fn small_dims() -> impl Strategy<Value = SIDimensions> {
        prop::array::uniform9(-5i8..=5).prop_map(SIDimensions::from_exponents)
    }

    proptest! {
        #[test]
        fn prop_multiply_then_divide_recovers(a in small_dims(), b in small_dims()) {
            prop_assert_eq!((a * b) / b, a);
            prop_assert_eq!(a.invert().invert(), a);
        }

        #[test]
        fn prop_closure_over_full_range(
            a in prop::array::uniform9(any::<i8>()).prop_map(SIDimensions::from_exponents),
            b in prop::array::uniform9(any::<i8>()).prop_map(SIDimensions::from_exponents),
        ) {
            prop_assert_eq!((a * b) / b, a);
            prop_assert_eq!(a.invert().invert(), a);
        }

        #[test]
        fn prop_render_parse_roundtrip(a in small_dims()) {
            prop_assert_eq!(SIDimensions::parse(&a.to_string()).unwrap(), a);
            prop_assert_eq!(SIDimensions::parse(&a.format(DimensionFormat::DIVIDED)).unwrap(), a);
        }
    }
}

//! Numeric element types for scalars, vectors and matrices.
//!
//! Every container in the workspace is generic over its element type so the
//! same code serves double and single precision.
//!
//! # Types
//!
//! - [`Element`] - Trait for the floating-point cell types (`f64`, `f32`)
//!
//! # Design
//!
//! Unit conversions ([`crate::Scale`]) are always evaluated in `f64`; an
//! element only needs to round-trip through `f64` via
//! [`to_f64`](Element::to_f64) / [`from_f64`](Element::from_f64).
//! Arithmetic between elements stays in the element's own precision.
//!
//! ```
//! use qty_core::Element;
//!
//! fn halve<T: Element>(v: T) -> T {
//!     v / T::from_f64(2.0)
//! }
//!
//! assert_eq!(halve(3.0f32), 1.5f32);
//! assert_eq!(halve(3.0f64), 1.5f64);
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Trait for container element types.
///
/// Implemented for:
/// - `f64` - double precision (the default everywhere)
/// - `f32` - single precision
///
/// Zero is the only value a sparse container never stores. Comparisons with
/// [`ZERO`](Element::ZERO) use IEEE semantics: `-0.0` counts as zero and
/// `NaN` counts as non-zero.
pub trait Element:
    Copy
    + Clone
    + Default
    + Send
    + Sync
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
    + 'static
{
    /// Short type name used in diagnostics (`"f64"`, `"f32"`).
    const NAME: &'static str;

    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Narrow from `f64` (rounds to nearest for `f32`).
    fn from_f64(v: f64) -> Self;

    /// Returns `true` for any value a sparse container has to store.
    #[inline]
    fn is_nonzero(self) -> bool {
        self != Self::ZERO
    }

    /// Returns `true` if the value is NaN.
    fn is_nan(self) -> bool;

    /// Absolute value.
    fn abs(self) -> Self;
    /// Smallest integer greater than or equal to the value.
    fn ceil(self) -> Self;
    /// Largest integer less than or equal to the value.
    fn floor(self) -> Self;
    /// Round half away from zero.
    fn round(self) -> Self;
    /// Round half to even.
    fn rint(self) -> Self;
    /// Sign of the value (`-1`, `+1`, or NaN).
    fn signum(self) -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Cube root.
    fn cbrt(self) -> Self;
    /// `e^x`.
    fn exp(self) -> Self;
    /// `e^x - 1`, accurate near zero.
    fn exp_m1(self) -> Self;
    /// Natural logarithm.
    fn ln(self) -> Self;
    /// `ln(1 + x)`, accurate near zero.
    fn ln_1p(self) -> Self;
    /// Base-10 logarithm.
    fn log10(self) -> Self;
    /// Raise to a floating-point power.
    fn powf(self, n: Self) -> Self;
    /// Sine (radians).
    fn sin(self) -> Self;
    /// Cosine (radians).
    fn cos(self) -> Self;
    /// Tangent (radians).
    fn tan(self) -> Self;
    /// Arcsine.
    fn asin(self) -> Self;
    /// Arccosine.
    fn acos(self) -> Self;
    /// Arctangent.
    fn atan(self) -> Self;
    /// Hyperbolic sine.
    fn sinh(self) -> Self;
    /// Hyperbolic cosine.
    fn cosh(self) -> Self;
    /// Hyperbolic tangent.
    fn tanh(self) -> Self;
}

macro_rules! impl_element {
    ($t:ty, $name:literal) => {
        impl Element for $t {
            const NAME: &'static str = $name;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline]
            fn ceil(self) -> Self {
                <$t>::ceil(self)
            }

            #[inline]
            fn floor(self) -> Self {
                <$t>::floor(self)
            }

            #[inline]
            fn round(self) -> Self {
                <$t>::round(self)
            }

            #[inline]
            fn rint(self) -> Self {
                <$t>::round_ties_even(self)
            }

            #[inline]
            fn signum(self) -> Self {
                <$t>::signum(self)
            }

            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            #[inline]
            fn cbrt(self) -> Self {
                <$t>::cbrt(self)
            }

            #[inline]
            fn exp(self) -> Self {
                <$t>::exp(self)
            }

            #[inline]
            fn exp_m1(self) -> Self {
                <$t>::exp_m1(self)
            }

            #[inline]
            fn ln(self) -> Self {
                <$t>::ln(self)
            }

            #[inline]
            fn ln_1p(self) -> Self {
                <$t>::ln_1p(self)
            }

            #[inline]
            fn log10(self) -> Self {
                <$t>::log10(self)
            }

            #[inline]
            fn powf(self, n: Self) -> Self {
                <$t>::powf(self, n)
            }

            #[inline]
            fn sin(self) -> Self {
                <$t>::sin(self)
            }

            #[inline]
            fn cos(self) -> Self {
                <$t>::cos(self)
            }

            #[inline]
            fn tan(self) -> Self {
                <$t>::tan(self)
            }

            #[inline]
            fn asin(self) -> Self {
                <$t>::asin(self)
            }

            #[inline]
            fn acos(self) -> Self {
                <$t>::acos(self)
            }

            #[inline]
            fn atan(self) -> Self {
                <$t>::atan(self)
            }

            #[inline]
            fn sinh(self) -> Self {
                <$t>::sinh(self)
            }

            #[inline]
            fn cosh(self) -> Self {
                <$t>::cosh(self)
            }

            #[inline]
            fn tanh(self) -> Self {
                <$t>::tanh(self)
            }
        }
    };
}

impl_element!(f64, "f64");
impl_element!(f32, "f32");

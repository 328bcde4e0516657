//! # qty-value
//!
//! Scalars, vectors and matrices that carry a unit.
//!
//! - [`Scalar`] - one value with a display unit
//! - [`Vector`] - dense or sparse list of values sharing a unit
//! - [`Matrix`] - dense or sparse grid of values sharing a unit
//! - [`Abs`], [`Rel`] - points versus magnitudes, checked at compile time
//! - [`TextOptions`] - plain and verbose text rendering
//!
//! Values are held in SI; the unit only controls how they are entered and
//! shown. Vectors and matrices are immutable when created. `mutable()`
//! returns a handle that accepts writes and shares storage with its source
//! until the first write.
//!
//! ## Dimensional arithmetic
//!
//! `times` and `divide` compose [`SIDimensions`](qty_core::SIDimensions).
//! Scalars resolve the result through the unit registry; vectors and
//! matrices return SI containers ([`SiVector`], [`SiMatrix`]) that
//! `as_quantity` turns back into a named quantity:
//!
//! ```
//! use qty_value::prelude::*;
//!
//! let d = Vector::<f64>::of([100.0, 200.0], Quantity::Length, "m", StorageType::Dense).unwrap();
//! let t = Vector::<f64>::of([10.0, 20.0], Quantity::Duration, "s", StorageType::Dense).unwrap();
//!
//! let v = d.divide(&t).unwrap();
//! assert_eq!(v.to_string(), "[ 10 10] ms-1");
//!
//! let v = v.as_quantity(Quantity::Speed).unwrap();
//! assert_eq!(v.to_string(), "[ 10 10] m/s");
//! ```
//!
//! ## Features
//!
//! - `parallel` (default) - Rayon-backed bulk kernels in `qty-data`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod kind;
pub mod matrix;
pub mod scalar;
mod shared;
pub mod text;
pub mod vector;

pub use kind::{Abs, Kind, Rel};
pub use matrix::{AbsMatrix, Matrix, SiMatrix};
pub use scalar::{AbsScalar, Scalar};
pub use text::TextOptions;
pub use vector::{AbsVector, SiVector, Vector};

/// Prelude module for convenient imports.
///
/// Also re-exports the `qty-core` types needed to build values.
pub mod prelude {
    pub use crate::kind::{Abs, Kind, Rel};
    pub use crate::matrix::{AbsMatrix, Matrix, SiMatrix};
    pub use crate::scalar::{AbsScalar, Scalar};
    pub use crate::text::TextOptions;
    pub use crate::vector::{AbsVector, SiVector, Vector};
    pub use qty_core::{Quantity, SIDimensions, StorageType, Unit, UnitRegistry};
}

//! # qty-core
//!
//! Core types for strongly-typed physical quantities.
//!
//! This crate provides the foundational types used throughout the qty workspace:
//!
//! - [`SIDimensions`] - Exponents over the nine SI base dimensions
//! - [`Scale`] - Linear and affine conversion to SI values
//! - [`Unit`], [`UnitBase`] - Named units and their families
//! - [`Quantity`] - The data table of known quantities and units
//! - [`UnitRegistry`] - Process-wide lookup, including synthesis of SI units
//! - [`Element`] - Numeric element trait for `f64` / `f32`
//! - [`StorageType`] - Dense / Sparse tag
//! - [`Error`] - Error taxonomy shared by every crate
//!
//! ## Design Philosophy
//!
//! Values are stored in SI; a unit only decides how they are shown and
//! entered. Multiplying or dividing quantities composes their
//! [`SIDimensions`], and the registry turns the result back into a named
//! unit when one exists:
//!
//! ```
//! use qty_core::prelude::*;
//!
//! let registry = UnitRegistry::global();
//! let length = Quantity::Length.si_dimensions();
//! let time = Quantity::Duration.si_dimensions();
//! let unit = registry.lookup_or_create_si_unit(length / time);
//! assert_eq!(unit.quantity(), Some(Quantity::Speed));
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! qty-core (this crate)
//!    ^
//!    |
//!    +-- qty-data (dense/sparse SI storage)
//!           ^
//!           |
//!           +-- qty-value (scalars, vectors, matrices with units)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod base;
pub mod dimensions;
pub mod element;
pub mod error;
pub mod prefix;
pub mod quantity;
pub mod registry;
pub mod scale;
pub mod storage;
pub mod unit;

// Re-exports for convenience
pub use base::UnitBase;
pub use dimensions::{DimensionFormat, NUMBER_DIMENSIONS, SI_ABBREVIATIONS, SIDimensions};
pub use element::Element;
pub use error::{Error, Result};
pub use prefix::{SI_PREFIXES, SiPrefix, prefix_by_symbol};
pub use quantity::{Quantity, UnitSpec};
pub use registry::UnitRegistry;
pub use scale::Scale;
pub use storage::StorageType;
pub use unit::Unit;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use qty_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::base::UnitBase;
    pub use crate::dimensions::{DimensionFormat, SIDimensions};
    pub use crate::element::Element;
    pub use crate::error::{Error, Result};
    pub use crate::quantity::Quantity;
    pub use crate::registry::UnitRegistry;
    pub use crate::scale::Scale;
    pub use crate::storage::StorageType;
    pub use crate::unit::Unit;
}

//! Error types for qty operations.
//!
//! This module provides the single error type shared by every crate in the
//! qty workspace: unit registry lookups, storage construction, elementwise
//! arithmetic and the typed value layer all report through [`Error`].
//!
//! # Overview
//!
//! Each failure mode is its own variant so calling code can match on the
//! *kind* of failure instead of parsing messages:
//!
//! - Missing input: [`NullArgument`](Error::NullArgument)
//! - Bad construction input: [`Construction`](Error::Construction)
//! - Operand shape disagreement: [`SizeMismatch`](Error::SizeMismatch)
//! - Writes to a frozen container: [`Immutable`](Error::Immutable)
//! - Square-only operations: [`NotSquare`](Error::NotSquare)
//! - Dimension disagreement: [`IncompatibleUnit`](Error::IncompatibleUnit)
//! - Cell access: [`IndexOutOfRange`](Error::IndexOutOfRange)
//! - SI text parsing: [`DimensionParse`](Error::DimensionParse)
//!
//! Floating-point edge cases (division by zero, NaN propagation) are **not**
//! errors; they travel through as ordinary IEEE values.
//!
//! # Usage
//!
//! ```rust
//! use qty_core::{Error, Result};
//!
//! fn check_len(a: usize, b: usize) -> Result<()> {
//!     if a != b {
//!         return Err(Error::size_mismatch((1, a), (1, b)));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_len(3, 4).unwrap_err().is_size_mismatch());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::dimensions::SIDimensions`] - SI text parsing
//! - `qty-data` - storage construction and elementwise operations
//! - `qty-value` - mutability and unit checks

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or combining quantities.
///
/// # Categories
///
/// - **Input errors**: [`NullArgument`](Error::NullArgument), [`Construction`](Error::Construction)
/// - **Shape errors**: [`SizeMismatch`](Error::SizeMismatch), [`NotSquare`](Error::NotSquare),
///   [`IndexOutOfRange`](Error::IndexOutOfRange)
/// - **State errors**: [`Immutable`](Error::Immutable)
/// - **Unit errors**: [`IncompatibleUnit`](Error::IncompatibleUnit), [`DimensionParse`](Error::DimensionParse)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A required input was absent.
    ///
    /// Produced when an optional value source evaluates to `None`
    /// on a factory call.
    #[error("null argument: {what}")]
    NullArgument {
        /// Which argument was missing
        what: String,
    },

    /// Input could not be turned into a container.
    ///
    /// Zero-length vectors, zero-row or zero-column matrices, jagged rows,
    /// sparse keys outside the declared shape and unknown storage tags all
    /// end up here. Input is never silently reshaped.
    #[error("construction failed: {reason}")]
    Construction {
        /// Why construction was rejected
        reason: String,
    },

    /// Two operands of an elementwise operation have different shapes.
    ///
    /// Vectors report their shape as `(1, len)`.
    #[error("size mismatch: {}x{} vs {}x{}", left.0, left.1, right.0, right.1)]
    SizeMismatch {
        /// Shape of the left operand as (rows, cols)
        left: (usize, usize),
        /// Shape of the right operand as (rows, cols)
        right: (usize, usize),
    },

    /// A mutating operation was called on an immutable container.
    ///
    /// The container is left untouched.
    #[error("cannot apply `{operation}` to an immutable value; call mutable() first")]
    Immutable {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// A square-only operation was called on a rectangular matrix.
    #[error("matrix is {rows}x{cols}, operation requires a square matrix")]
    NotSquare {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// SI dimensions of a value do not match what the operation expects.
    ///
    /// Raised by additive operations across different dimensions and by
    /// `as_quantity` downcasts.
    #[error("incompatible units: {from} cannot be used as {to}")]
    IncompatibleUnit {
        /// Dimension signature (or unit) of the value
        from: String,
        /// Dimension signature (or unit) that was required
        to: String,
    },

    /// Cell index outside the container.
    #[error("index {index} out of range (valid range is 0..{len})")]
    IndexOutOfRange {
        /// Index that was accessed
        index: usize,
        /// Number of valid positions along the accessed axis
        len: usize,
    },

    /// Text could not be parsed as an SI dimension signature.
    #[error("cannot parse SI dimensions from {text:?}: {reason}")]
    DimensionParse {
        /// The offending input
        text: String,
        /// Parser diagnostic
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::NullArgument`] error.
    #[inline]
    pub fn null_argument(what: impl Into<String>) -> Self {
        Self::NullArgument { what: what.into() }
    }

    /// Creates an [`Error::Construction`] error.
    #[inline]
    pub fn construction(reason: impl Into<String>) -> Self {
        Self::Construction {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::SizeMismatch`] error from two `(rows, cols)` shapes.
    #[inline]
    pub fn size_mismatch(left: (usize, usize), right: (usize, usize)) -> Self {
        Self::SizeMismatch { left, right }
    }

    /// Creates an [`Error::Immutable`] error.
    #[inline]
    pub fn immutable(operation: &'static str) -> Self {
        Self::Immutable { operation }
    }

    /// Creates an [`Error::NotSquare`] error.
    #[inline]
    pub fn not_square(rows: usize, cols: usize) -> Self {
        Self::NotSquare { rows, cols }
    }

    /// Creates an [`Error::IncompatibleUnit`] error.
    #[inline]
    pub fn incompatible_unit(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::IncompatibleUnit {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates an [`Error::IndexOutOfRange`] error.
    #[inline]
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Creates an [`Error::DimensionParse`] error.
    #[inline]
    pub fn dimension_parse(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DimensionParse {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a null-argument error.
    #[inline]
    pub fn is_null_argument(&self) -> bool {
        matches!(self, Self::NullArgument { .. })
    }

    /// Returns `true` if this is a construction error.
    #[inline]
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction { .. })
    }

    /// Returns `true` if this is a size-mismatch error.
    #[inline]
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. })
    }

    /// Returns `true` if this is an immutability error.
    #[inline]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Immutable { .. })
    }

    /// Returns `true` if this is a shape error from a square-only operation.
    #[inline]
    pub fn is_not_square(&self) -> bool {
        matches!(self, Self::NotSquare { .. })
    }

    /// Returns `true` if this is a unit-incompatibility error.
    #[inline]
    pub fn is_incompatible_unit(&self) -> bool {
        matches!(self, Self::IncompatibleUnit { .. })
    }

    /// Returns `true` if this is an index error.
    #[inline]
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch() {
        let err = Error::size_mismatch((10, 10), (10, 9));
        let msg = err.to_string();
        assert!(msg.contains("10x10"));
        assert!(msg.contains("10x9"));
        assert!(err.is_size_mismatch());
    }

    #[test]
    fn test_immutable() {
        let err = Error::immutable("set_si");
        assert!(err.to_string().contains("set_si"));
        assert!(err.is_immutable());
        assert!(!err.is_construction());
    }

    #[test]
    fn test_not_square() {
        let err = Error::not_square(2, 3);
        assert!(err.to_string().contains("2x3"));
        assert!(err.is_not_square());
    }

    #[test]
    fn test_kinds_are_distinct() {
        let errors = [
            Error::null_argument("values"),
            Error::construction("empty"),
            Error::incompatible_unit("m2", "m"),
            Error::index_out_of_range(5, 3),
        ];
        assert!(errors[0].is_null_argument());
        assert!(errors[1].is_construction());
        assert!(errors[2].is_incompatible_unit());
        assert!(errors[3].is_index_out_of_range());
        assert!(!errors[0].is_construction());
    }
}

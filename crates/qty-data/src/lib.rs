//! # qty-data
//!
//! Unit-free storage of SI values for vectors and matrices.
//!
//! - [`VectorData`] - dense or sparse vector cells
//! - [`MatrixData`] - dense or sparse matrix cells, row-major
//! - [`VectorSource`], [`MatrixSource`] - accepted input shapes
//! - [`parallel`] - bulk kernels, Rayon-backed with the `parallel` feature
//!
//! Every value held here is already SI. Units live one layer up in
//! `qty-value`; this crate only knows a [`Scale`](qty_core::Scale) at
//! construction time.
//!
//! ## Features
//!
//! - `parallel` (default) - run kernels on arrays of at least
//!   [`PARALLEL_THRESHOLD`] cells with Rayon
//!
//! ## Usage
//!
//! ```
//! use qty_core::{Scale, StorageType};
//! use qty_data::prelude::*;
//!
//! let a = VectorData::instantiate_si(vec![0.0, 1.0, 0.0, 2.0], StorageType::Sparse).unwrap();
//! let b = VectorData::instantiate_si(vec![1.0, 1.0, 1.0, 1.0], StorageType::Dense).unwrap();
//!
//! // addition with a dense operand yields dense storage
//! let sum = a.plus(&b).unwrap();
//! assert!(sum.is_dense());
//! assert_eq!(sum.values_si(), vec![1.0, 2.0, 1.0, 3.0]);
//!
//! // multiplication with a sparse operand yields sparse storage
//! assert!(a.times(&b).unwrap().is_sparse());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod matrix;
pub mod parallel;
pub mod source;
pub mod vector;

pub use matrix::MatrixData;
pub use parallel::PARALLEL_THRESHOLD;
pub use source::{
    MatrixSource, MatrixValues, SourceValues, SparseMatrixSource, SparseSource, VectorSource,
};
pub use vector::{BinaryOp, Cells, DenseVector, SparseVector, VectorData};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::matrix::MatrixData;
    pub use crate::source::{MatrixSource, SparseMatrixSource, SparseSource, VectorSource};
    pub use crate::vector::{BinaryOp, VectorData};
}

//! Raw value sources accepted by the storage factories.
//!
//! Every factory path funnels through [`VectorSource`] or [`MatrixSource`],
//! which turn arrays, `Vec`s, and sparse index maps into one normalized
//! form. Shape validation happens here: empty input, jagged rows and
//! out-of-range sparse keys are construction errors, and an `Option`
//! source holding `None` is a null-argument error.
//!
//! # Usage
//!
//! ```
//! use std::collections::BTreeMap;
//! use qty_data::{SparseSource, VectorSource};
//!
//! let dense = vec![1.0, 0.0, 2.0].into_values().unwrap();
//! assert_eq!(dense.len(), 3);
//!
//! let sparse = SparseSource::new(100, BTreeMap::from([(10, 1.0), (20, 2.0)]));
//! assert_eq!(sparse.into_values().unwrap().len(), 100);
//!
//! let missing: Option<Vec<f64>> = None;
//! assert!(missing.into_values().unwrap_err().is_null_argument());
//! ```

use std::collections::BTreeMap;

use qty_core::{Element, Error, Result};

/// Normalized vector input.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValues<T> {
    /// One value per cell.
    Dense(Vec<T>),
    /// Declared length plus entries sorted by index. Entries may hold zeros.
    Sparse {
        /// Number of cells
        len: usize,
        /// (index, value) pairs in ascending index order
        entries: Vec<(usize, T)>,
    },
}

impl<T: Element> SourceValues<T> {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Self::Dense(v) => v.len(),
            Self::Sparse { len, .. } => *len,
        }
    }

    /// Returns `true` if there are no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expands to one value per cell; missing sparse cells are zero.
    pub fn into_dense(self) -> Vec<T> {
        match self {
            Self::Dense(v) => v,
            Self::Sparse { len, entries } => {
                let mut out = vec![T::ZERO; len];
                for (i, v) in entries {
                    out[i] = v;
                }
                out
            }
        }
    }
}

/// Input for a vector factory.
pub trait VectorSource<T: Element> {
    /// Validates and normalizes the input.
    fn into_values(self) -> Result<SourceValues<T>>;
}

impl<T: Element> VectorSource<T> for Vec<T> {
    fn into_values(self) -> Result<SourceValues<T>> {
        non_empty(SourceValues::Dense(self))
    }
}

impl<T: Element> VectorSource<T> for &[T] {
    fn into_values(self) -> Result<SourceValues<T>> {
        non_empty(SourceValues::Dense(self.to_vec()))
    }
}

impl<T: Element> VectorSource<T> for &Vec<T> {
    fn into_values(self) -> Result<SourceValues<T>> {
        self.as_slice().into_values()
    }
}

impl<T: Element, const N: usize> VectorSource<T> for [T; N] {
    fn into_values(self) -> Result<SourceValues<T>> {
        non_empty(SourceValues::Dense(self.to_vec()))
    }
}

impl<T: Element, const N: usize> VectorSource<T> for &[T; N] {
    fn into_values(self) -> Result<SourceValues<T>> {
        self.as_slice().into_values()
    }
}

impl<T: Element, S: VectorSource<T>> VectorSource<T> for Option<S> {
    fn into_values(self) -> Result<SourceValues<T>> {
        self.ok_or_else(|| Error::null_argument("vector values"))?
            .into_values()
    }
}

fn non_empty<T: Element>(values: SourceValues<T>) -> Result<SourceValues<T>> {
    if values.is_empty() {
        return Err(Error::construction("vector length must be > 0"));
    }
    Ok(values)
}

/// Sparse vector input: a declared length and a map of the non-default cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseSource<T> {
    len: usize,
    entries: BTreeMap<usize, T>,
}

impl<T: Element> SparseSource<T> {
    /// Creates a sparse source of `len` cells.
    pub fn new(len: usize, entries: BTreeMap<usize, T>) -> Self {
        Self { len, entries }
    }
}

impl<T: Element> VectorSource<T> for SparseSource<T> {
    fn into_values(self) -> Result<SourceValues<T>> {
        if let Some((&last, _)) = self.entries.last_key_value() {
            if last >= self.len {
                return Err(Error::construction(format!(
                    "sparse index {last} outside vector of length {}",
                    self.len
                )));
            }
        }
        non_empty(SourceValues::Sparse {
            len: self.len,
            entries: self.entries.into_iter().collect(),
        })
    }
}

// ============================================================================
// Matrix sources
// ============================================================================

/// Normalized matrix input; cells are addressed row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixValues<T> {
    /// Row count (> 0)
    pub rows: usize,
    /// Column count (> 0)
    pub cols: usize,
    /// Cell values with linear index `row * cols + col`
    pub values: SourceValues<T>,
}

/// Input for a matrix factory.
pub trait MatrixSource<T: Element> {
    /// Validates and normalizes the input.
    fn into_cells(self) -> Result<MatrixValues<T>>;
}

fn from_rows<T: Element, R: AsRef<[T]>>(rows: &[R]) -> Result<MatrixValues<T>> {
    let Some(first) = rows.first() else {
        return Err(Error::construction("matrix must have at least one row"));
    };
    let cols = first.as_ref().len();
    if cols == 0 {
        return Err(Error::construction("matrix must have at least one column"));
    }
    let mut values = Vec::with_capacity(rows.len() * cols);
    for (r, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != cols {
            return Err(Error::construction(format!(
                "jagged matrix: row {r} has {} columns, expected {cols}",
                row.len()
            )));
        }
        values.extend_from_slice(row);
    }
    Ok(MatrixValues {
        rows: rows.len(),
        cols,
        values: SourceValues::Dense(values),
    })
}

impl<T: Element> MatrixSource<T> for Vec<Vec<T>> {
    fn into_cells(self) -> Result<MatrixValues<T>> {
        from_rows(self.as_slice())
    }
}

impl<T: Element> MatrixSource<T> for &[Vec<T>] {
    fn into_cells(self) -> Result<MatrixValues<T>> {
        from_rows(self)
    }
}

impl<T: Element> MatrixSource<T> for &Vec<Vec<T>> {
    fn into_cells(self) -> Result<MatrixValues<T>> {
        from_rows(self.as_slice())
    }
}

impl<T: Element, const C: usize> MatrixSource<T> for &[[T; C]] {
    fn into_cells(self) -> Result<MatrixValues<T>> {
        from_rows(self)
    }
}

impl<T: Element, const R: usize, const C: usize> MatrixSource<T> for [[T; C]; R] {
    fn into_cells(self) -> Result<MatrixValues<T>> {
        from_rows(self.as_slice())
    }
}

impl<T: Element, S: MatrixSource<T>> MatrixSource<T> for Option<S> {
    fn into_cells(self) -> Result<MatrixValues<T>> {
        self.ok_or_else(|| Error::null_argument("matrix values"))?
            .into_cells()
    }
}

/// Sparse matrix input: a declared shape and a map of `(row, col)` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrixSource<T> {
    rows: usize,
    cols: usize,
    entries: BTreeMap<(usize, usize), T>,
}

impl<T: Element> SparseMatrixSource<T> {
    /// Creates a sparse source of `rows x cols` cells.
    pub fn new(rows: usize, cols: usize, entries: BTreeMap<(usize, usize), T>) -> Self {
        Self {
            rows,
            cols,
            entries,
        }
    }
}

impl<T: Element> MatrixSource<T> for SparseMatrixSource<T> {
    fn into_cells(self) -> Result<MatrixValues<T>> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::construction(format!(
                "matrix shape {}x{} has no cells",
                self.rows, self.cols
            )));
        }
        let len = self.rows.checked_mul(self.cols).ok_or_else(|| {
            Error::construction(format!(
                "matrix shape {}x{} overflows",
                self.rows, self.cols
            ))
        })?;
        let mut entries = Vec::with_capacity(self.entries.len());
        // BTreeMap order on (row, col) is row-major order.
        for ((r, c), v) in self.entries {
            if r >= self.rows || c >= self.cols {
                return Err(Error::construction(format!(
                    "sparse cell ({r}, {c}) outside {}x{} matrix",
                    self.rows, self.cols
                )));
            }
            // r < rows and c < cols, so this stays below len.
            entries.push((r * self.cols + c, v));
        }
        Ok(MatrixValues {
            rows: self.rows,
            cols: self.cols,
            values: SourceValues::Sparse { len, entries },
        })
    }
}

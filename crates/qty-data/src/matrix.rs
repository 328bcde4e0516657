//! Dense and sparse matrix storage of SI values.
//!
//! A [`MatrixData`] is a [`VectorData`] over `rows * cols` cells in
//! row-major order plus its shape. Sparse matrices therefore store
//! `(row * cols + col, value)` pairs, which sort exactly like
//! `(row, col)` triples.
//!
//! Elementwise operations follow the same result-storage rules as vectors
//! (see [`BinaryOp::result_storage`]) but require identical shapes rather
//! than identical lengths.
//!
//! # Usage
//!
//! ```
//! use qty_core::{Scale, StorageType};
//! use qty_data::MatrixData;
//!
//! let m: MatrixData<f64> = MatrixData::instantiate_si([[2.0, 0.0], [1.0, 3.0]], StorageType::Sparse).unwrap();
//! assert_eq!(m.cardinality(), 3);
//! assert_eq!(m.get_si(1, 1).unwrap(), 3.0);
//! assert_eq!(m.diagonal_si().unwrap(), vec![2.0, 3.0]);
//! assert!((m.determinant_si().unwrap() - 6.0).abs() < 1e-12);
//! ```

use qty_core::{Element, Error, Result, Scale, StorageType};
use tracing::trace;

use crate::source::MatrixSource;
use crate::vector::{BinaryOp, VectorData};

/// SI values of a matrix in dense or sparse representation.
///
/// `==` compares shape, storage type and values; use
/// [`same_values`](Self::same_values) to compare across representations.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixData<T> {
    rows: usize,
    cols: usize,
    data: VectorData<T>,
}

impl<T: Element> MatrixData<T> {
    /// Creates storage from raw values expressed in the unit of `scale`.
    ///
    /// # Errors
    ///
    /// - [`Error::NullArgument`] if the source is `None`
    /// - [`Error::Construction`] for zero rows, zero columns, jagged rows
    ///   or sparse cells outside the declared shape
    pub fn instantiate<S: MatrixSource<T>>(
        source: S,
        scale: &Scale,
        storage: StorageType,
    ) -> Result<Self> {
        let cells = source.into_cells()?;
        let data = VectorData::from_source_values(cells.values, scale, storage);
        trace!(rows = cells.rows, cols = cells.cols, storage = %storage, "matrix data instantiated");
        Ok(Self {
            rows: cells.rows,
            cols: cells.cols,
            data,
        })
    }

    /// Creates storage from values that are already SI.
    pub fn instantiate_si<S: MatrixSource<T>>(source: S, storage: StorageType) -> Result<Self> {
        Self::instantiate(source, &Scale::Identity, storage)
    }

    fn from_parts(rows: usize, cols: usize, data: VectorData<T>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        Self { rows, cols, data }
    }

    /// Row count.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns `true` if rows equal columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Storage type tag.
    #[inline]
    pub fn storage_type(&self) -> StorageType {
        self.data.storage_type()
    }

    /// Returns `true` for dense storage.
    #[inline]
    pub fn is_dense(&self) -> bool {
        self.data.is_dense()
    }

    /// Returns `true` for sparse storage.
    #[inline]
    pub fn is_sparse(&self) -> bool {
        self.data.is_sparse()
    }

    /// Row-major cell storage.
    #[inline]
    pub fn cells(&self) -> &VectorData<T> {
        &self.data
    }

    fn linear(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows {
            return Err(Error::index_out_of_range(row, self.rows));
        }
        if col >= self.cols {
            return Err(Error::index_out_of_range(col, self.cols));
        }
        Ok(row * self.cols + col)
    }

    fn check_shape(&self, other: &Self) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::size_mismatch(self.shape(), other.shape()));
        }
        Ok(())
    }

    fn check_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(Error::not_square(self.rows, self.cols));
        }
        Ok(())
    }

    /// SI value of one cell.
    pub fn get_si(&self, row: usize, col: usize) -> Result<T> {
        self.data.get_si(self.linear(row, col)?)
    }

    /// Sets the SI value of one cell.
    pub fn set_si(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let index = self.linear(row, col)?;
        self.data.set_si(index, value)
    }

    /// Number of non-zero cells.
    pub fn cardinality(&self) -> usize {
        self.data.cardinality()
    }

    /// Sum of all SI values in row-major order.
    pub fn z_sum(&self) -> T {
        self.data.z_sum()
    }

    /// All SI values as rows.
    pub fn values_si(&self) -> Vec<Vec<T>> {
        self.data
            .values_si()
            .chunks(self.cols)
            .map(<[T]>::to_vec)
            .collect()
    }

    /// Iterates over non-zero cells as `(row, col, value)`.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let cols = self.cols;
        self.data
            .iter_nonzero()
            .map(move |(i, v)| (i / cols, i % cols, v))
    }

    // ------------------------------------------------------------------
    // Extraction
    // ------------------------------------------------------------------

    /// SI values of one row.
    pub fn row_si(&self, row: usize) -> Result<Vec<T>> {
        if row >= self.rows {
            return Err(Error::index_out_of_range(row, self.rows));
        }
        let start = row * self.cols;
        Ok(match &self.data {
            VectorData::Dense(d) => d.values()[start..start + self.cols].to_vec(),
            VectorData::Sparse(s) => {
                let mut out = vec![T::ZERO; self.cols];
                let lo = s.indices().partition_point(|&i| i < start);
                let hi = s.indices().partition_point(|&i| i < start + self.cols);
                for k in lo..hi {
                    out[s.indices()[k] - start] = s.values()[k];
                }
                out
            }
        })
    }

    /// SI values of one column.
    pub fn column_si(&self, col: usize) -> Result<Vec<T>> {
        if col >= self.cols {
            return Err(Error::index_out_of_range(col, self.cols));
        }
        (0..self.rows)
            .map(|r| self.data.get_si(r * self.cols + col))
            .collect()
    }

    /// SI values of the main diagonal.
    ///
    /// # Errors
    ///
    /// [`Error::NotSquare`] for rectangular matrices.
    pub fn diagonal_si(&self) -> Result<Vec<T>> {
        self.check_square()?;
        (0..self.rows)
            .map(|i| self.data.get_si(i * self.cols + i))
            .collect()
    }

    /// One row as vector storage of the same storage type.
    pub fn row(&self, row: usize) -> Result<VectorData<T>> {
        Ok(VectorData::with_storage(self.row_si(row)?, self.storage_type()))
    }

    /// One column as vector storage of the same storage type.
    pub fn column(&self, col: usize) -> Result<VectorData<T>> {
        Ok(VectorData::with_storage(self.column_si(col)?, self.storage_type()))
    }

    /// Main diagonal as vector storage of the same storage type.
    pub fn diagonal(&self) -> Result<VectorData<T>> {
        Ok(VectorData::with_storage(self.diagonal_si()?, self.storage_type()))
    }

    /// Transposed copy with the same storage type.
    pub fn transpose(&self) -> Self {
        let (rows, cols) = (self.rows, self.cols);
        let data = match &self.data {
            VectorData::Dense(d) => {
                let src = d.values();
                let mut out = vec![T::ZERO; rows * cols];
                for r in 0..rows {
                    for c in 0..cols {
                        out[c * rows + r] = src[r * cols + c];
                    }
                }
                VectorData::with_storage(out, StorageType::Dense)
            }
            VectorData::Sparse(_) => {
                let mut out = vec![T::ZERO; rows * cols];
                for (i, v) in self.data.iter_nonzero() {
                    out[(i % cols) * rows + i / cols] = v;
                }
                VectorData::with_storage(out, StorageType::Sparse)
            }
        };
        Self::from_parts(cols, rows, data)
    }

    /// Determinant of the SI values.
    ///
    /// Computed by LU decomposition with partial pivoting in `f64`.
    ///
    /// # Errors
    ///
    /// [`Error::NotSquare`] for rectangular matrices.
    pub fn determinant_si(&self) -> Result<T> {
        self.check_square()?;
        let n = self.rows;
        let mut a: Vec<f64> = self.data.iter_si().map(Element::to_f64).collect();
        let mut det = 1.0f64;
        for k in 0..n {
            let mut p = k;
            for i in k + 1..n {
                if a[i * n + k].abs() > a[p * n + k].abs() {
                    p = i;
                }
            }
            let pivot = a[p * n + k];
            if pivot == 0.0 {
                return Ok(T::ZERO);
            }
            if p != k {
                for j in 0..n {
                    a.swap(k * n + j, p * n + j);
                }
                det = -det;
            }
            det *= pivot;
            for i in k + 1..n {
                let factor = a[i * n + k] / pivot;
                if factor != 0.0 {
                    for j in k + 1..n {
                        a[i * n + j] -= factor * a[k * n + j];
                    }
                }
            }
        }
        Ok(T::from_f64(det))
    }

    // ------------------------------------------------------------------
    // Conversion and comparison
    // ------------------------------------------------------------------

    /// Copy with the given storage type.
    pub fn to_storage(&self, storage: StorageType) -> Self {
        Self::from_parts(self.rows, self.cols, self.data.to_storage(storage))
    }

    /// Dense copy (a plain clone when already dense).
    pub fn to_dense(&self) -> Self {
        Self::from_parts(self.rows, self.cols, self.data.to_dense())
    }

    /// Sparse copy (a plain clone when already sparse).
    pub fn to_sparse(&self) -> Self {
        Self::from_parts(self.rows, self.cols, self.data.to_sparse())
    }

    /// Converts to dense storage, reusing `self` when already dense.
    pub fn into_dense(self) -> Self {
        Self::from_parts(self.rows, self.cols, self.data.into_dense())
    }

    /// Converts to sparse storage, reusing `self` when already sparse.
    pub fn into_sparse(self) -> Self {
        Self::from_parts(self.rows, self.cols, self.data.into_sparse())
    }

    /// Returns `true` if shapes and cell values match, regardless of storage type.
    pub fn same_values(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data.same_values(&other.data)
    }

    // ------------------------------------------------------------------
    // Elementwise operations
    // ------------------------------------------------------------------

    /// Elementwise `self + other`.
    pub fn plus(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Plus)
    }

    /// Elementwise `self - other`.
    pub fn minus(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Minus)
    }

    /// Elementwise `self * other`.
    pub fn times(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Times)
    }

    /// Elementwise `self / other`.
    pub fn divide(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Divide)
    }

    /// Elementwise operation with the result storage chosen by
    /// [`BinaryOp::result_storage`].
    pub fn combine(&self, other: &Self, op: BinaryOp) -> Result<Self> {
        self.check_shape(other)?;
        let storage = op.result_storage(self.storage_type(), other.storage_type());
        Ok(Self::from_parts(
            self.rows,
            self.cols,
            self.data.combine_as(&other.data, op, storage),
        ))
    }

    /// In-place `self += other`, keeping the storage type.
    pub fn increment_by(&mut self, other: &Self) -> Result<()> {
        self.apply_in_place(other, BinaryOp::Plus)
    }

    /// In-place `self -= other`, keeping the storage type.
    pub fn decrement_by(&mut self, other: &Self) -> Result<()> {
        self.apply_in_place(other, BinaryOp::Minus)
    }

    /// In-place `self *= other`, keeping the storage type.
    pub fn multiply_by(&mut self, other: &Self) -> Result<()> {
        self.apply_in_place(other, BinaryOp::Times)
    }

    /// In-place `self /= other`, keeping the storage type.
    pub fn divide_by(&mut self, other: &Self) -> Result<()> {
        self.apply_in_place(other, BinaryOp::Divide)
    }

    /// In-place elementwise operation against another matrix.
    pub fn apply_in_place(&mut self, other: &Self, op: BinaryOp) -> Result<()> {
        self.check_shape(other)?;
        self.data.apply_in_place_unchecked(&other.data, op);
        Ok(())
    }

    /// In-place `self += si` on every cell.
    pub fn increment_by_scalar(&mut self, si: T) {
        self.data.increment_by_scalar(si);
    }

    /// In-place `self -= si` on every cell.
    pub fn decrement_by_scalar(&mut self, si: T) {
        self.data.decrement_by_scalar(si);
    }

    /// In-place `self *= factor` on every cell.
    pub fn multiply_by_scalar(&mut self, factor: T) {
        self.data.multiply_by_scalar(factor);
    }

    /// In-place `self /= divisor` on every cell.
    pub fn divide_by_scalar(&mut self, divisor: T) {
        self.data.divide_by_scalar(divisor);
    }

    /// Replaces every SI value `v` with `f(v)`, keeping the storage type.
    pub fn assign<F>(&mut self, f: F)
    where
        F: Fn(T) -> T + Sync + Send,
    {
        self.data.assign(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SparseMatrixSource;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn grid(n: usize, storage: StorageType) -> MatrixData<f64> {
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| (10 * i + j + 1) as f64).collect())
            .collect();
        MatrixData::instantiate(rows, &Scale::linear(1000.0), storage).unwrap()
    }

    #[test]
    fn test_grid_km() {
        let m = grid(10, StorageType::Dense);
        assert_eq!(m.shape(), (10, 10));
        assert_eq!(m.cardinality(), 100);
        assert_relative_eq!(m.z_sum(), 50.0 * 101.0 * 1000.0);
        assert_eq!(m.get_si(2, 3).unwrap(), 24_000.0);
    }

    #[test]
    fn test_representation_equality() {
        let m = grid(10, StorageType::Dense);
        assert_eq!(m.to_sparse().to_dense(), m);
        assert_ne!(m.to_sparse(), m);
        assert_eq!(m.to_sparse(), grid(10, StorageType::Sparse));
        assert!(m.same_values(&m.to_sparse()));
    }

    #[test]
    fn test_bad_shapes() {
        let zero_rows: Vec<Vec<f64>> = vec![];
        let err = MatrixData::instantiate_si(zero_rows, StorageType::Dense).unwrap_err();
        assert!(err.is_construction());
        let zero_cols: Vec<Vec<f64>> = vec![vec![]];
        let err = MatrixData::instantiate_si(zero_cols, StorageType::Sparse).unwrap_err();
        assert!(err.is_construction());
        let none: Option<Vec<Vec<f64>>> = None;
        let err = MatrixData::instantiate_si(none, StorageType::Dense).unwrap_err();
        assert!(err.is_null_argument());
        let huge = SparseMatrixSource::<f64>::new(usize::MAX, 2, BTreeMap::new());
        let err = MatrixData::instantiate_si(huge, StorageType::Sparse).unwrap_err();
        assert!(err.is_construction());
    }

    #[test]
    fn test_extraction_dense_and_sparse() {
        for storage in [StorageType::Dense, StorageType::Sparse] {
            let m = MatrixData::instantiate_si([[1.0, 0.0, 2.0], [0.0, 3.0, 0.0]], storage).unwrap();
            assert_eq!(m.row_si(0).unwrap(), vec![1.0, 0.0, 2.0]);
            assert_eq!(m.row_si(1).unwrap(), vec![0.0, 3.0, 0.0]);
            assert_eq!(m.column_si(2).unwrap(), vec![2.0, 0.0]);
            assert!(m.diagonal_si().unwrap_err().is_not_square());
            assert!(m.row_si(2).unwrap_err().is_index_out_of_range());
            assert_eq!(m.row(0).unwrap().storage_type(), storage);
            assert_eq!(
                m.iter_nonzero().collect::<Vec<_>>(),
                vec![(0, 0, 1.0), (0, 2, 2.0), (1, 1, 3.0)]
            );
        }
    }

    #[test]
    fn test_transpose() {
        for storage in [StorageType::Dense, StorageType::Sparse] {
            let m = MatrixData::instantiate_si([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], storage).unwrap();
            let t = m.transpose();
            assert_eq!(t.shape(), (3, 2));
            assert_eq!(t.storage_type(), storage);
            assert_eq!(t.values_si(), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
            assert_eq!(t.transpose(), m);
        }
    }

    #[test]
    fn test_determinant() {
        let m = MatrixData::instantiate_si(
            [[2.0, -3.0, 1.0], [2.0, 0.0, -1.0], [1.0, 4.0, 5.0]],
            StorageType::Dense,
        )
        .unwrap();
        assert_relative_eq!(m.determinant_si().unwrap(), 49.0, epsilon = 1e-9);

        // needs a row swap
        let p = MatrixData::instantiate_si([[0.0, 1.0], [1.0, 0.0]], StorageType::Sparse).unwrap();
        assert_relative_eq!(p.determinant_si().unwrap(), -1.0);

        let singular =
            MatrixData::instantiate_si([[1.0, 2.0], [2.0, 4.0]], StorageType::Dense).unwrap();
        assert_relative_eq!(singular.determinant_si().unwrap(), 0.0, epsilon = 1e-12);

        let rect = MatrixData::instantiate_si([[1.0, 2.0]], StorageType::Dense).unwrap();
        assert!(rect.determinant_si().unwrap_err().is_not_square());

        let one = MatrixData::instantiate_si([[7.5f32]], StorageType::Dense).unwrap();
        assert_eq!(one.determinant_si().unwrap(), 7.5f32);
    }

    #[test]
    fn test_shape_mismatch_same_len() {
        let a = MatrixData::instantiate_si([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], StorageType::Dense).unwrap();
        let b = a.transpose();
        let err = a.plus(&b).unwrap_err();
        assert_eq!(err, Error::size_mismatch((2, 3), (3, 2)));
        let mut c = a.clone();
        assert!(c.multiply_by(&b).unwrap_err().is_size_mismatch());
    }

    #[test]
    fn test_sparse_source_and_ops() {
        let s = MatrixData::instantiate_si(
            SparseMatrixSource::new(3, 3, BTreeMap::from([((0, 0), 1.0), ((2, 2), 2.0)])),
            StorageType::Sparse,
        )
        .unwrap();
        let d = s.to_dense();
        assert!(s.plus(&d).unwrap().is_dense());
        assert!(s.times(&d).unwrap().is_sparse());
        let mut m = s.clone();
        m.increment_by(&s).unwrap();
        assert!(m.is_sparse());
        assert_eq!(m.diagonal_si().unwrap(), vec![2.0, 0.0, 4.0]);
        m.set_si(1, 1, 5.0).unwrap();
        assert_eq!(m.cardinality(), 3);
        assert!(m.set_si(1, 3, 5.0).unwrap_err().is_index_out_of_range());
    }
}

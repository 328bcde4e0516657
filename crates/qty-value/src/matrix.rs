//! Matrices of values with a unit.
//!
//! [`Matrix`] is the two-dimensional counterpart of [`Vector`]: the same
//! mutability and copy-on-write rules, the same Abs/Rel kinds and the same
//! storage tie-break for elementwise arithmetic. Rows, columns and the
//! diagonal can be read as raw SI values, as vectors or as scalars.
//!
//! # Usage
//!
//! ```
//! use qty_core::{Quantity, StorageType};
//! use qty_value::Matrix;
//!
//! let m = Matrix::<f64>::of([[1.0, 2.0], [3.0, 4.0]], Quantity::Length, "m", StorageType::Dense)
//!     .unwrap();
//! assert_eq!(m.shape(), (2, 2));
//! assert_eq!(m.column(1).unwrap().values_in_unit(), vec![2.0, 4.0]);
//!
//! let det = m.determinant().unwrap();
//! assert!((det.si() + 2.0).abs() < 1e-12);
//! assert_eq!(det.quantity(), Some(Quantity::Area));
//! ```

use std::fmt;
use std::marker::PhantomData;

use qty_core::{Element, Error, Quantity, Result, SIDimensions, StorageType, Unit, UnitRegistry};
use qty_data::{MatrixData, MatrixSource};
use tracing::debug;

use crate::kind::{Abs, Kind, Rel};
use crate::scalar::{Scalar, check_compatible, lookup_unit, quantity_unit};
use crate::shared::Shared;
use crate::text::{self, TextOptions};
use crate::vector::Vector;

/// A matrix of values with a unit, relative by default.
#[derive(Debug)]
pub struct Matrix<T, K = Rel> {
    data: Shared<MatrixData<T>>,
    unit: Unit,
    kind: PhantomData<K>,
}

/// An absolute matrix.
pub type AbsMatrix<T> = Matrix<T, Abs>;

/// A relative matrix whose unit is built from a dimension signature.
pub type SiMatrix<T> = Matrix<T, Rel>;

impl<T: Element, K: Kind> Matrix<T, K> {
    /// Creates an immutable matrix from rows of values expressed in `unit`.
    ///
    /// # Errors
    ///
    /// - [`Error::NullArgument`] if `values` is `None`
    /// - [`Error::Construction`] for zero rows, zero columns or jagged rows
    pub fn instantiate<S: MatrixSource<T>>(
        values: S,
        unit: &Unit,
        storage: StorageType,
    ) -> Result<Self> {
        let unit = K::bind(unit);
        let data = MatrixData::instantiate(values, unit.scale(), storage)?;
        Ok(Self::wrap(data, unit))
    }

    /// Creates an immutable matrix from SI values, displayed in `unit`.
    pub fn instantiate_si<S: MatrixSource<T>>(
        values: S,
        unit: &Unit,
        storage: StorageType,
    ) -> Result<Self> {
        let data = MatrixData::instantiate_si(values, storage)?;
        Ok(Self::wrap(data, K::bind(unit)))
    }

    /// Creates an immutable matrix from values in the unit of `quantity`
    /// named by `unit`.
    pub fn of<S: MatrixSource<T>>(
        values: S,
        quantity: Quantity,
        unit: &str,
        storage: StorageType,
    ) -> Result<Self> {
        Self::instantiate(values, &lookup_unit(quantity, unit)?, storage)
    }

    /// Creates an immutable matrix from rows of scalars, displayed in the
    /// unit of the first one.
    pub fn from_scalars(rows: &[Vec<Scalar<T, K>>], storage: StorageType) -> Result<Self> {
        let first = rows
            .first()
            .and_then(|r| r.first())
            .ok_or_else(|| Error::construction("matrix must have at least one row and column"))?;
        let mut si = Vec::with_capacity(rows.len());
        for row in rows {
            let mut out = Vec::with_capacity(row.len());
            for s in row {
                check_compatible(s.unit(), first.unit())?;
                out.push(s.si());
            }
            si.push(out);
        }
        Self::instantiate_si(si, first.unit(), storage)
    }

    /// Wraps existing SI storage, displayed in `unit`.
    pub fn from_data(data: MatrixData<T>, unit: &Unit) -> Self {
        Self::wrap(data, K::bind(unit))
    }

    fn wrap(data: MatrixData<T>, unit: Unit) -> Self {
        Self {
            data: Shared::new(data),
            unit,
            kind: PhantomData,
        }
    }

    fn handle(&self, mutable: bool, unit: Unit) -> Self {
        Self {
            data: self.data.share(mutable),
            unit,
            kind: PhantomData,
        }
    }

    // ------------------------------------------------------------------
    // Mutability
    // ------------------------------------------------------------------

    /// Returns `true` if this handle accepts writes.
    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.data.is_mutable()
    }

    /// A mutable handle on the same storage.
    pub fn mutable(&self) -> Self {
        self.handle(true, self.unit.clone())
    }

    /// An immutable handle on the same storage.
    pub fn immutable(&self) -> Self {
        self.handle(false, self.unit.clone())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Underlying SI storage.
    #[inline]
    pub fn data(&self) -> &MatrixData<T> {
        self.data.get()
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

    /// Quantity of the display unit, `None` for SI matrices.
    #[inline]
    pub fn quantity(&self) -> Option<Quantity> {
        self.unit.quantity()
    }

    /// Returns `true` for [`Abs`] matrices.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        K::IS_ABSOLUTE
    }

    /// Row count.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data().rows()
    }

    /// Column count.
    #[inline]
    pub fn cols(&self) -> usize {
        self.data().cols()
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data().shape()
    }

    /// Returns `true` if rows equal columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.data().is_square()
    }

    /// Storage type tag.
    #[inline]
    pub fn storage_type(&self) -> StorageType {
        self.data().storage_type()
    }

    /// Returns `true` for dense storage.
    #[inline]
    pub fn is_dense(&self) -> bool {
        self.data().is_dense()
    }

    /// Returns `true` for sparse storage.
    #[inline]
    pub fn is_sparse(&self) -> bool {
        self.data().is_sparse()
    }

    /// SI value of one cell.
    pub fn get_si(&self, row: usize, col: usize) -> Result<T> {
        self.data().get_si(row, col)
    }

    /// Value of one cell in the display unit.
    pub fn get_in_unit(&self, row: usize, col: usize) -> Result<T> {
        Ok(text::display_value(self.get_si(row, col)?, &self.unit))
    }

    /// Value of one cell in another unit of the same dimensions.
    pub fn get_in(&self, row: usize, col: usize, unit: &Unit) -> Result<T> {
        check_compatible(&self.unit, unit)?;
        Ok(text::display_value(self.get_si(row, col)?, unit))
    }

    /// One cell as a scalar.
    pub fn get(&self, row: usize, col: usize) -> Result<Scalar<T, K>> {
        Ok(Scalar::from_si(self.get_si(row, col)?, &self.unit))
    }

    /// All SI values as rows.
    pub fn values_si(&self) -> Vec<Vec<T>> {
        self.data().values_si()
    }

    /// All values in the display unit, as rows.
    pub fn values_in_unit(&self) -> Vec<Vec<T>> {
        self.values_si()
            .into_iter()
            .map(|row| self.to_display(row))
            .collect()
    }

    fn to_display(&self, si: Vec<T>) -> Vec<T> {
        si.into_iter()
            .map(|v| text::display_value(v, &self.unit))
            .collect()
    }

    fn to_scalars(&self, si: Vec<T>) -> Vec<Scalar<T, K>> {
        si.into_iter()
            .map(|v| Scalar::from_si(v, &self.unit))
            .collect()
    }

    fn to_vector(&self, data: qty_data::VectorData<T>) -> Vector<T, K> {
        Vector::from_data(data, &self.unit)
    }

    /// Number of non-zero cells.
    pub fn cardinality(&self) -> usize {
        self.data().cardinality()
    }

    /// Sum of all cells, in the display unit.
    pub fn z_sum(&self) -> Scalar<T, K> {
        Scalar::from_si(self.data().z_sum(), &self.unit)
    }

    // ------------------------------------------------------------------
    // Rows, columns and diagonal
    // ------------------------------------------------------------------

    /// SI values of one row.
    pub fn row_si(&self, row: usize) -> Result<Vec<T>> {
        self.data().row_si(row)
    }

    /// One row as a vector with the same storage type and unit.
    pub fn row(&self, row: usize) -> Result<Vector<T, K>> {
        Ok(self.to_vector(self.data().row(row)?))
    }

    /// One row as scalars.
    pub fn row_scalars(&self, row: usize) -> Result<Vec<Scalar<T, K>>> {
        Ok(self.to_scalars(self.row_si(row)?))
    }

    /// SI values of one column.
    pub fn column_si(&self, col: usize) -> Result<Vec<T>> {
        self.data().column_si(col)
    }

    /// One column as a vector with the same storage type and unit.
    pub fn column(&self, col: usize) -> Result<Vector<T, K>> {
        Ok(self.to_vector(self.data().column(col)?))
    }

    /// One column as scalars.
    pub fn column_scalars(&self, col: usize) -> Result<Vec<Scalar<T, K>>> {
        Ok(self.to_scalars(self.column_si(col)?))
    }

    /// SI values of the main diagonal.
    ///
    /// # Errors
    ///
    /// [`Error::NotSquare`] for rectangular matrices.
    pub fn diagonal_si(&self) -> Result<Vec<T>> {
        self.data().diagonal_si()
    }

    /// Main diagonal as a vector.
    pub fn diagonal(&self) -> Result<Vector<T, K>> {
        Ok(self.to_vector(self.data().diagonal()?))
    }

    /// Main diagonal as scalars.
    pub fn diagonal_scalars(&self) -> Result<Vec<Scalar<T, K>>> {
        Ok(self.to_scalars(self.diagonal_si()?))
    }

    /// Transposed copy, immutable, with the same storage type and unit.
    pub fn transpose(&self) -> Self {
        Self::wrap(self.data().transpose(), self.unit.clone())
    }

    // ------------------------------------------------------------------
    // Conversion
    // ------------------------------------------------------------------

    /// Dense version; shares storage when already dense.
    pub fn to_dense(&self) -> Self {
        self.to_storage(StorageType::Dense)
    }

    /// Sparse version; shares storage when already sparse.
    pub fn to_sparse(&self) -> Self {
        self.to_storage(StorageType::Sparse)
    }

    fn to_storage(&self, storage: StorageType) -> Self {
        if self.storage_type() == storage {
            return self.handle(self.is_mutable(), self.unit.clone());
        }
        let converted = Self::wrap(self.data().to_storage(storage), self.unit.clone());
        if self.is_mutable() {
            converted.mutable()
        } else {
            converted
        }
    }

    /// Same values shown in another unit of the same dimensions.
    pub fn with_display_unit(&self, unit: &Unit) -> Result<Self> {
        check_compatible(&self.unit, unit)?;
        Ok(self.handle(self.is_mutable(), K::bind(unit)))
    }

    /// Reinterprets an SI matrix as `quantity`, sharing storage.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleUnit`] if the dimensions differ.
    pub fn as_quantity(&self, quantity: Quantity) -> Result<Self> {
        let unit = quantity_unit(self.si_dimensions(), quantity)?;
        Ok(self.handle(self.is_mutable(), K::bind(&unit)))
    }

    /// Returns `true` if the cell values match, regardless of storage type and unit.
    pub fn same_values(&self, other: &Self) -> bool {
        self.data().same_values(other.data())
    }

    fn recast<K2: Kind>(&self) -> Matrix<T, K2> {
        let unit = K2::bind(&self.unit);
        let data = match text::rebase::<T>(&self.unit, &unit) {
            None => self.data.share(false),
            Some(f) => {
                let mut data = self.data().clone();
                data.assign(f);
                Shared::new(data)
            }
        };
        Matrix {
            data,
            unit,
            kind: PhantomData,
        }
    }

    // ------------------------------------------------------------------
    // In-place operations
    // ------------------------------------------------------------------

    /// Sets the SI value of one cell.
    pub fn set_si(&mut self, row: usize, col: usize, si: T) -> Result<()> {
        self.data.write("set_si")?.set_si(row, col, si)
    }

    /// Sets one cell from a value in the display unit.
    pub fn set_in_unit(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let si = text::si_value(value, &self.unit);
        self.data.write("set_in_unit")?.set_si(row, col, si)
    }

    /// Sets one cell from a scalar of the same dimensions.
    pub fn set(&mut self, row: usize, col: usize, value: &Scalar<T, K>) -> Result<()> {
        self.data.check("set")?;
        check_compatible(value.unit(), &self.unit)?;
        self.data.write("set")?.set_si(row, col, value.si())
    }

    /// Replaces every SI value `v` with `f(v)`.
    pub fn assign<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn(T) -> T + Sync + Send,
    {
        self.data.write("assign")?.assign(f);
        Ok(())
    }

    /// Absolute value of every SI value.
    pub fn abs(&mut self) -> Result<()> {
        self.data.write("abs")?.assign(T::abs);
        Ok(())
    }

    /// Rounds every SI value up.
    pub fn ceil(&mut self) -> Result<()> {
        self.data.write("ceil")?.assign(T::ceil);
        Ok(())
    }

    /// Rounds every SI value down.
    pub fn floor(&mut self) -> Result<()> {
        self.data.write("floor")?.assign(T::floor);
        Ok(())
    }

    /// Rounds every SI value half to even.
    pub fn rint(&mut self) -> Result<()> {
        self.data.write("rint")?.assign(T::rint);
        Ok(())
    }

    /// Negates every SI value.
    pub fn neg(&mut self) -> Result<()> {
        self.data.write("neg")?.assign(|v: T| -v);
        Ok(())
    }

    /// Adds `other` cell by cell, keeping the storage type.
    ///
    /// # Errors
    ///
    /// [`Error::Immutable`], [`Error::IncompatibleUnit`] or
    /// [`Error::SizeMismatch`]; the matrix is unchanged on error.
    pub fn increment_by(&mut self, other: &Matrix<T, Rel>) -> Result<()> {
        self.data.check("increment_by")?;
        check_compatible(other.unit(), &self.unit)?;
        self.data.write("increment_by")?.increment_by(other.data())
    }

    /// Subtracts `other` cell by cell, keeping the storage type.
    pub fn decrement_by(&mut self, other: &Matrix<T, Rel>) -> Result<()> {
        self.data.check("decrement_by")?;
        check_compatible(other.unit(), &self.unit)?;
        self.data.write("decrement_by")?.decrement_by(other.data())
    }

    /// Multiplies cell by cell with dimensionless `factors`.
    pub fn multiply_by(&mut self, factors: &Matrix<T, Rel>) -> Result<()> {
        self.data.check("multiply_by")?;
        require_dimensionless(factors)?;
        self.data.write("multiply_by")?.multiply_by(factors.data())
    }

    /// Divides cell by cell by dimensionless `divisors`.
    pub fn divide_by(&mut self, divisors: &Matrix<T, Rel>) -> Result<()> {
        self.data.check("divide_by")?;
        require_dimensionless(divisors)?;
        self.data.write("divide_by")?.divide_by(divisors.data())
    }

    /// Adds a relative scalar to every cell.
    pub fn increment_by_scalar(&mut self, increment: &Scalar<T, Rel>) -> Result<()> {
        self.data.check("increment_by_scalar")?;
        check_compatible(increment.unit(), &self.unit)?;
        self.data
            .write("increment_by_scalar")?
            .increment_by_scalar(increment.si());
        Ok(())
    }

    /// Subtracts a relative scalar from every cell.
    pub fn decrement_by_scalar(&mut self, decrement: &Scalar<T, Rel>) -> Result<()> {
        self.data.check("decrement_by_scalar")?;
        check_compatible(decrement.unit(), &self.unit)?;
        self.data
            .write("decrement_by_scalar")?
            .decrement_by_scalar(decrement.si());
        Ok(())
    }

    /// Multiplies every cell by a plain factor.
    pub fn multiply_by_factor(&mut self, factor: T) -> Result<()> {
        self.data.write("multiply_by_factor")?.multiply_by_scalar(factor);
        Ok(())
    }

    /// Divides every cell by a plain divisor.
    pub fn divide_by_factor(&mut self, divisor: T) -> Result<()> {
        self.data.write("divide_by_factor")?.divide_by_scalar(divisor);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Renders the matrix with the given options.
    ///
    /// One row per line and the unit, when requested, on the line after the
    /// last row. Verbose output puts the header on the first line and indents
    /// the rows below it with a tab.
    pub fn to_string_with(&self, options: TextOptions) -> String {
        self.render(&self.unit, options)
    }

    /// Renders the matrix with values expressed in `unit`.
    ///
    /// Fails with [`Error::IncompatibleUnit`] if `unit` has other SI dimensions.
    pub fn to_string_in(&self, unit: &Unit, options: TextOptions) -> Result<String> {
        check_compatible(unit, &self.unit)?;
        Ok(self.render(unit, options))
    }

    fn render(&self, unit: &Unit, options: TextOptions) -> String {
        let mut out = String::new();
        let separator = if options.verbose {
            text::write_header(&mut out, self.is_mutable(), K::TAG, self.storage_type());
            "\n\t"
        } else {
            "\n"
        };
        for (i, row) in self.values_si().into_iter().enumerate() {
            if i > 0 || options.verbose {
                out.push_str(separator);
            }
            // Writing into a String cannot fail.
            let _ = text::write_values(&mut out, row.into_iter(), unit);
        }
        if options.with_unit {
            text::write_unit(&mut out, unit, "\n");
        }
        out
    }
}

fn require_dimensionless<T: Element>(factors: &Matrix<T, Rel>) -> Result<()> {
    if !factors.si_dimensions().is_dimensionless() {
        return Err(Error::incompatible_unit(
            factors.si_dimensions().to_string(),
            SIDimensions::DIMENSIONLESS.to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Relative arithmetic
// ============================================================================

impl<T: Element> Matrix<T, Rel> {
    fn additive(&self, other: &Self, data: MatrixData<T>) -> Self {
        let unit = if self.unit == other.unit {
            self.unit.clone()
        } else {
            self.unit.standard_unit()
        };
        Self::wrap(data, unit)
    }

    /// `self + other`; sparse only if both are sparse.
    pub fn plus(&self, other: &Self) -> Result<Self> {
        check_compatible(other.unit(), &self.unit)?;
        Ok(self.additive(other, self.data().plus(other.data())?))
    }

    /// `self - other`; sparse only if both are sparse.
    pub fn minus(&self, other: &Self) -> Result<Self> {
        check_compatible(other.unit(), &self.unit)?;
        Ok(self.additive(other, self.data().minus(other.data())?))
    }

    /// Cell-by-cell product as an SI matrix; dense only if both are dense.
    pub fn times(&self, other: &Self) -> Result<SiMatrix<T>> {
        let data = self.data().times(other.data())?;
        let dims = self.si_dimensions().plus(&other.si_dimensions());
        debug!(dimensions = %dims, "matrix product");
        Ok(Self::wrap(data, Unit::si(dims)))
    }

    /// Cell-by-cell quotient as an SI matrix; dense only if both are dense.
    pub fn divide(&self, other: &Self) -> Result<SiMatrix<T>> {
        let data = self.data().divide(other.data())?;
        let dims = self.si_dimensions().minus(&other.si_dimensions());
        debug!(dimensions = %dims, "matrix quotient");
        Ok(Self::wrap(data, Unit::si(dims)))
    }

    /// Determinant as a scalar whose dimensions are the element dimensions
    /// raised to the matrix order.
    ///
    /// # Errors
    ///
    /// - [`Error::NotSquare`] for rectangular matrices
    /// - [`Error::Construction`] if the raised exponents overflow
    pub fn determinant(&self) -> Result<Scalar<T, Rel>> {
        let det = self.data().determinant_si()?;
        let order = self.rows();
        let dims = u32::try_from(order)
            .ok()
            .and_then(|n| self.si_dimensions().checked_pow(n))
            .ok_or_else(|| {
                Error::construction(format!(
                    "dimensions {} raised to {order} overflow",
                    self.si_dimensions()
                ))
            })?;
        let unit = UnitRegistry::global().lookup_or_create_si_unit(dims);
        Ok(Scalar::from_si(det, &unit))
    }

    /// Absolute matrix with the same display values.
    pub fn to_abs(&self) -> Matrix<T, Abs> {
        self.recast()
    }
}

// ============================================================================
// Absolute arithmetic
// ============================================================================

impl<T: Element> Matrix<T, Abs> {
    /// Points moved by `increment`, in this matrix's unit.
    pub fn plus_rel(&self, increment: &Matrix<T, Rel>) -> Result<Self> {
        check_compatible(increment.unit(), &self.unit)?;
        Ok(Self::wrap(self.data().plus(increment.data())?, self.unit.clone()))
    }

    /// Points moved back by `decrement`, in this matrix's unit.
    pub fn minus_rel(&self, decrement: &Matrix<T, Rel>) -> Result<Self> {
        check_compatible(decrement.unit(), &self.unit)?;
        Ok(Self::wrap(self.data().minus(decrement.data())?, self.unit.clone()))
    }

    /// Distances between two matrices of points, in the relative unit.
    pub fn minus_abs(&self, other: &Self) -> Result<Matrix<T, Rel>> {
        check_compatible(other.unit(), &self.unit)?;
        let data = self.data().minus(other.data())?;
        Ok(Matrix::wrap(data, self.unit.relative_unit()))
    }

    /// Relative matrix with the same display values.
    pub fn to_rel(&self) -> Matrix<T, Rel> {
        self.recast()
    }
}

// ============================================================================
// Trait impls
// ============================================================================

/// Clones into an independent immutable matrix.
impl<T: Element, K: Kind> Clone for Matrix<T, K> {
    fn clone(&self) -> Self {
        self.immutable()
    }
}

impl<T: Element, K: Kind> PartialEq for Matrix<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.data() == other.data() && self.unit.standard_unit() == other.unit.standard_unit()
    }
}

impl<T: Element, K: Kind> fmt::Display for Matrix<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(TextOptions::PLAIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    use qty_data::SparseMatrixSource;

    fn km(rows: &[Vec<f64>], storage: StorageType) -> Matrix<f64> {
        Matrix::of(rows, Quantity::Length, "km", storage).unwrap()
    }

    fn grid() -> Vec<Vec<f64>> {
        vec![vec![1.0, 2.0, 0.0], vec![0.0, 5.0, 6.0]]
    }

    #[test]
    fn test_access() {
        let m = km(&grid(), StorageType::Sparse);
        assert_eq!(m.shape(), (2, 3));
        assert!(!m.is_square());
        assert_eq!(m.get_si(1, 2).unwrap(), 6000.0);
        assert_eq!(m.get_in_unit(1, 2).unwrap(), 6.0);
        assert_eq!(m.get(0, 1).unwrap().to_string(), "2 km");
        assert_eq!(m.values_in_unit(), grid());
        assert_eq!(m.cardinality(), 4);
        assert_eq!(m.z_sum().si(), 14_000.0);
        assert!(m.get_si(2, 0).unwrap_err().is_index_out_of_range());
        let metre = m.unit().standard_unit();
        assert_eq!(m.get_in(0, 0, &metre).unwrap(), 1000.0);
    }

    #[test]
    fn test_three_views_agree() {
        let m = km(&grid(), StorageType::Sparse);
        let row = m.row(1).unwrap();
        assert!(row.is_sparse());
        assert_eq!(row.unit(), m.unit());
        assert_eq!(row.values_si(), m.row_si(1).unwrap());
        let scalars: Vec<f64> = m.row_scalars(1).unwrap().iter().map(Scalar::si).collect();
        assert_eq!(scalars, m.row_si(1).unwrap());

        let col = m.column(1).unwrap();
        assert_eq!(col.values_in_unit(), vec![2.0, 5.0]);
        assert_eq!(m.column_scalars(1).unwrap()[1].value(), 5.0);
        assert!(m.column_si(3).unwrap_err().is_index_out_of_range());

        assert!(m.diagonal_si().unwrap_err().is_not_square());
        assert!(m.diagonal().unwrap_err().is_not_square());
        assert!(m.diagonal_scalars().unwrap_err().is_not_square());
    }

    #[test]
    fn test_diagonal_and_transpose() {
        let m = km(&[vec![1.0, 2.0], vec![3.0, 4.0]], StorageType::Dense);
        assert_eq!(m.diagonal().unwrap().values_in_unit(), vec![1.0, 4.0]);
        assert_eq!(m.diagonal_scalars().unwrap().len(), 2);
        let t = km(&grid(), StorageType::Sparse).transpose();
        assert_eq!(t.shape(), (3, 2));
        assert!(t.is_sparse());
        assert_eq!(t.values_in_unit()[2], vec![0.0, 6.0]);
    }

    #[test]
    fn test_determinant_unit() {
        let m = km(&[vec![2.0, 0.0], vec![1.0, 3.0]], StorageType::Sparse);
        let det = m.determinant().unwrap();
        assert_relative_eq!(det.si(), 6e6, max_relative = 1e-12);
        assert_eq!(det.quantity(), Some(Quantity::Area));

        let cube = km(
            &[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]],
            StorageType::Dense,
        );
        assert_eq!(cube.determinant().unwrap().quantity(), Some(Quantity::Volume));
        assert!(km(&grid(), StorageType::Dense).determinant().unwrap_err().is_not_square());
    }

    #[test]
    fn test_immutable_rejects_every_mutator() {
        let mut m = km(&grid(), StorageType::Dense);
        let other = km(&grid(), StorageType::Dense);
        let step = Scalar::<f64>::of(1.0, Quantity::Length, "m").unwrap();
        let results = [
            m.set_si(0, 0, 1.0),
            m.set_in_unit(0, 0, 1.0),
            m.set(0, 0, &step),
            m.assign(|x| x + 1.0),
            m.abs(),
            m.ceil(),
            m.floor(),
            m.rint(),
            m.neg(),
            m.increment_by(&other),
            m.decrement_by(&other),
            m.increment_by_scalar(&step),
            m.decrement_by_scalar(&step),
            m.multiply_by_factor(2.0),
            m.divide_by_factor(2.0),
        ];
        for r in results {
            assert!(r.unwrap_err().is_immutable());
        }
        assert_eq!(m.values_in_unit(), grid());
    }

    #[test]
    fn test_copy_on_write() {
        let original = km(&grid(), StorageType::Sparse);
        let mut copy = original.mutable();
        assert!(copy.data.shares_with(&original.data));
        copy.set_in_unit(0, 2, 9.0).unwrap();
        assert!(!copy.data.shares_with(&original.data));
        assert_eq!(original.get_in_unit(0, 2).unwrap(), 0.0);
        assert_eq!(copy.get_in_unit(0, 2).unwrap(), 9.0);
        assert_eq!(copy.cardinality(), 5);

        let frozen = copy.clone();
        copy.neg().unwrap();
        assert!(!frozen.is_mutable());
        assert_eq!(frozen.get_in_unit(0, 2).unwrap(), 9.0);
    }

    #[test]
    fn test_in_place_arithmetic() {
        let mut m = km(&grid(), StorageType::Dense).mutable();
        let ones = Matrix::<f64>::of(
            vec![vec![1.0, 1.0, 1.0], vec![1.0, 1.0, 1.0]],
            Quantity::Length,
            "m",
            StorageType::Sparse,
        )
        .unwrap();
        m.increment_by(&ones).unwrap();
        assert_eq!(m.get_si(0, 2).unwrap(), 1.0);
        m.decrement_by(&ones).unwrap();
        assert_eq!(m.values_in_unit(), grid());

        let half = Matrix::<f64>::of(
            vec![vec![0.5, 0.5, 0.5], vec![0.5, 0.5, 0.5]],
            Quantity::Dimensionless,
            "",
            StorageType::Dense,
        )
        .unwrap();
        m.multiply_by(&half).unwrap();
        assert_eq!(m.get_in_unit(1, 1).unwrap(), 2.5);
        m.divide_by(&half).unwrap();
        assert_eq!(m.get_in_unit(1, 1).unwrap(), 5.0);
        assert!(m.multiply_by(&ones).unwrap_err().is_incompatible_unit());

        let square = km(&[vec![1.0]], StorageType::Dense);
        assert!(m.increment_by(&square).unwrap_err().is_size_mismatch());
        assert_eq!(m.values_in_unit(), grid());
    }

    #[test]
    fn test_si_matrices() {
        let area = Matrix::<f64>::of(vec![vec![1.0, 2.0]], Quantity::Area, "m2", StorageType::Dense).unwrap();
        let m4 = area.times(&area).unwrap();
        assert_eq!(m4.si_dimensions().to_string(), "m4");
        assert!(m4.as_quantity(Quantity::Area).unwrap_err().is_incompatible_unit());
        let len = Matrix::<f64>::of(vec![vec![3.0, 4.0]], Quantity::Length, "m", StorageType::Dense).unwrap();
        let back = area.divide(&len).unwrap().as_quantity(Quantity::Length).unwrap();
        assert_eq!(back.unit().abbreviation(), "m");
        assert_relative_eq!(back.get_si(0, 1).unwrap(), 0.5);
    }

    #[test]
    fn test_equality_and_conversion() {
        let dense = km(&grid(), StorageType::Dense);
        let sparse = dense.to_sparse();
        assert_ne!(sparse, dense);
        assert!(sparse.same_values(&dense));
        assert_eq!(sparse.to_dense(), dense);
        assert_eq!(sparse, km(&grid(), StorageType::Sparse));
        assert!(dense.to_dense().data.shares_with(&dense.data));
    }

    #[test]
    fn test_sparse_map_source() {
        let entries = BTreeMap::from([((0, 1), 2.0), ((2, 2), 3.0)]);
        let unit = lookup_unit(Quantity::Length, "km").unwrap();
        let m = Matrix::<f64>::instantiate(
            SparseMatrixSource::new(3, 3, entries),
            &unit,
            StorageType::Sparse,
        )
        .unwrap();
        assert_eq!(m.cardinality(), 2);
        assert_eq!(m.get_si(2, 2).unwrap(), 3000.0);
        assert_eq!(m.determinant().unwrap().si(), 0.0);
    }

    #[test]
    fn test_from_scalars() {
        let s = |v| Scalar::<f64>::of(v, Quantity::Length, "km").unwrap();
        let m = Matrix::from_scalars(&[vec![s(1.0), s(2.0)], vec![s(3.0), s(4.0)]], StorageType::Dense)
            .unwrap();
        assert_eq!(m.unit().abbreviation(), "km");
        assert_eq!(m.get_si(1, 0).unwrap(), 3000.0);
        assert!(Matrix::<f64>::from_scalars(&[], StorageType::Dense).unwrap_err().is_construction());
        assert!(
            Matrix::<f64>::from_scalars(&[vec![s(1.0)], vec![s(1.0), s(2.0)]], StorageType::Dense)
                .unwrap_err()
                .is_construction()
        );
    }

    #[test]
    fn test_absolute_matrices() {
        let readings = AbsMatrix::<f64>::of(
            vec![vec![20.0, 25.0]],
            Quantity::AbsoluteTemperature,
            "°C",
            StorageType::Dense,
        )
        .unwrap();
        let step =
            Matrix::<f64>::of(vec![vec![5.0, 5.0]], Quantity::Temperature, "K", StorageType::Dense).unwrap();
        let later = readings.plus_rel(&step).unwrap();
        assert_relative_eq!(later.get_in_unit(0, 0).unwrap(), 25.0, epsilon = 1e-9);
        assert!(later.minus_rel(&step).unwrap().same_values(&readings));
        let diff = later.minus_abs(&readings).unwrap();
        assert_eq!(diff.quantity(), Some(Quantity::Temperature));
        assert_relative_eq!(readings.to_rel().get_si(0, 1).unwrap(), 25.0, epsilon = 1e-9);
        assert!(readings.to_rel().to_abs().same_values(&readings));
    }

    #[test]
    fn test_text() {
        let m = km(&[vec![1.0, 0.0], vec![0.0, 2.0]], StorageType::Sparse);
        assert_eq!(m.to_string(), "[ 1 0]\n[ 0 2]\nkm");
        assert_eq!(
            m.mutable().to_string_with(TextOptions::VERBOSE),
            "Mutable   Rel Sparse \n\t[ 1 0]\n\t[ 0 2]\nkm"
        );
        assert_eq!(m.to_string_with(TextOptions::BARE), "[ 1 0]\n[ 0 2]");
        assert!(!format!("{m}").starts_with('\n'));

        let metre = m.unit().standard_unit();
        assert_eq!(
            m.to_string_in(&metre, TextOptions::BARE).unwrap(),
            "[ 1000 0]\n[ 0 2000]"
        );
        let hour = UnitRegistry::global().unit(Quantity::Duration, "h").unwrap();
        assert!(m.to_string_in(&hour, TextOptions::PLAIN).unwrap_err().is_incompatible_unit());
    }
}

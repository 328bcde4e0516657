//! Dense and sparse vector storage of SI values.
//!
//! [`VectorData`] is a tagged enum over two representations:
//!
//! - [`DenseVector`] - one value per cell
//! - [`SparseVector`] - sorted `(index, value)` pairs for the non-zero cells
//!
//! Storage carries no unit. Values enter through a [`Scale`] at
//! construction and are SI from then on.
//!
//! # Invariants
//!
//! - length is never zero
//! - a sparse vector never stores a zero (`-0.0` included); NaN is stored
//! - sparse indices are strictly ascending
//!
//! # Result storage of binary operations
//!
//! | operation         | result                              |
//! |-------------------|-------------------------------------|
//! | `plus`, `minus`   | Sparse only if both operands are    |
//! | `times`, `divide` | Dense only if both operands are     |
//!
//! In-place operations keep the receiver's storage type.
//!
//! # Usage
//!
//! ```
//! use qty_core::{Scale, StorageType};
//! use qty_data::VectorData;
//!
//! let km = Scale::linear(1000.0);
//! let a = VectorData::instantiate(vec![1.0, 0.0, 2.0], &km, StorageType::Dense).unwrap();
//! assert_eq!(a.get_si(2).unwrap(), 2000.0);
//!
//! let b = a.to_sparse();
//! assert_eq!(b.cardinality(), 2);
//! assert!(a.same_values(&b));
//! assert_ne!(a, b);
//! ```

use std::borrow::Cow;

use qty_core::{Element, Error, Result, Scale, StorageType};
use tracing::trace;

use crate::parallel;
use crate::source::{SourceValues, VectorSource};

/// Elementwise binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`
    Plus,
    /// `a - b`
    Minus,
    /// `a * b`
    Times,
    /// `a / b`
    Divide,
}

impl BinaryOp {
    /// Applies the operation to one pair of values.
    #[inline]
    pub fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            Self::Plus => a + b,
            Self::Minus => a - b,
            Self::Times => a * b,
            Self::Divide => a / b,
        }
    }

    /// Storage type of a fresh result from operands of the given types.
    ///
    /// Addition and subtraction only stay sparse when both operands are
    /// sparse; multiplication and division only stay dense when both are
    /// dense.
    #[inline]
    pub fn result_storage(self, left: StorageType, right: StorageType) -> StorageType {
        use StorageType::{Dense, Sparse};
        match self {
            Self::Plus | Self::Minus => match (left, right) {
                (Sparse, Sparse) => Sparse,
                _ => Dense,
            },
            Self::Times | Self::Divide => match (left, right) {
                (Dense, Dense) => Dense,
                _ => Sparse,
            },
        }
    }

    #[inline]
    fn is_additive(self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }
}

// ============================================================================
// Dense
// ============================================================================

/// One SI value per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseVector<T> {
    values: Vec<T>,
}

impl<T: Element> DenseVector<T> {
    /// The values, one per cell.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

// ============================================================================
// Sparse
// ============================================================================

/// Non-zero SI values with their cell indices.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector<T> {
    len: usize,
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Element> SparseVector<T> {
    /// Builds from ascending `(index, value)` pairs, dropping zeros.
    fn from_entries(len: usize, entries: impl IntoIterator<Item = (usize, T)>) -> Self {
        let (indices, values) = entries.into_iter().filter(|(_, v)| v.is_nonzero()).unzip();
        Self {
            len,
            indices,
            values,
        }
    }

    fn from_dense(values: &[T]) -> Self {
        Self::from_entries(values.len(), values.iter().copied().enumerate())
    }

    /// Stored cell indices, ascending.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Stored values, parallel to [`indices`](Self::indices).
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of stored entries.
    #[inline]
    pub fn stored(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, index: usize) -> T {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => T::ZERO,
        }
    }

    fn set(&mut self, index: usize, value: T) {
        match (self.indices.binary_search(&index), value.is_nonzero()) {
            (Ok(pos), true) => self.values[pos] = value,
            (Ok(pos), false) => {
                self.indices.remove(pos);
                self.values.remove(pos);
            }
            (Err(pos), true) => {
                self.indices.insert(pos, index);
                self.values.insert(pos, value);
            }
            (Err(_), false) => {}
        }
    }

    fn to_dense_vec(&self) -> Vec<T> {
        let mut out = vec![T::ZERO; self.len];
        for (&i, &v) in self.indices.iter().zip(&self.values) {
            out[i] = v;
        }
        out
    }

    /// Union merge: `f` is evaluated wherever either side stores a value.
    /// Only valid when `f(0, 0) == 0`.
    fn merge(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        let cap = self.stored() + other.stored();
        let mut indices = Vec::with_capacity(cap);
        let mut values = Vec::with_capacity(cap);
        let (mut i, mut j) = (0, 0);
        loop {
            let (index, v) = match (self.indices.get(i), other.indices.get(j)) {
                (Some(&a), Some(&b)) if a == b => {
                    i += 1;
                    j += 1;
                    (a, f(self.values[i - 1], other.values[j - 1]))
                }
                (Some(&a), Some(&b)) if a < b => {
                    i += 1;
                    (a, f(self.values[i - 1], T::ZERO))
                }
                (Some(&a), None) => {
                    i += 1;
                    (a, f(self.values[i - 1], T::ZERO))
                }
                (_, Some(&b)) => {
                    j += 1;
                    (b, f(T::ZERO, other.values[j - 1]))
                }
                (None, None) => break,
            };
            if v.is_nonzero() {
                indices.push(index);
                values.push(v);
            }
        }
        Self {
            len: self.len,
            indices,
            values,
        }
    }

    /// Applies `f` to the stored values only. Only valid when `f(0) == 0`.
    fn map_stored(&mut self, f: impl Fn(T) -> T) {
        let mut w = 0;
        for r in 0..self.values.len() {
            let v = f(self.values[r]);
            if v.is_nonzero() {
                self.indices[w] = self.indices[r];
                self.values[w] = v;
                w += 1;
            }
        }
        self.indices.truncate(w);
        self.values.truncate(w);
    }
}

// ============================================================================
// VectorData
// ============================================================================

/// SI values of a vector in dense or sparse representation.
///
/// `==` compares storage type and values, so a dense vector never equals
/// its sparse conversion; use [`same_values`](Self::same_values) to compare
/// across representations.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorData<T> {
    /// Contiguous storage
    Dense(DenseVector<T>),
    /// Non-zero entries only
    Sparse(SparseVector<T>),
}

impl<T: Element> VectorData<T> {
    /// Creates storage from raw values expressed in the unit of `scale`.
    ///
    /// # Errors
    ///
    /// - [`Error::NullArgument`] if the source is `None`
    /// - [`Error::Construction`] if the source has no cells or an
    ///   out-of-range sparse index
    pub fn instantiate<S: VectorSource<T>>(
        source: S,
        scale: &Scale,
        storage: StorageType,
    ) -> Result<Self> {
        let data = Self::from_source_values(source.into_values()?, scale, storage);
        trace!(len = data.len(), storage = %storage, "vector data instantiated");
        Ok(data)
    }

    /// Creates storage from values that are already SI.
    pub fn instantiate_si<S: VectorSource<T>>(source: S, storage: StorageType) -> Result<Self> {
        Self::instantiate(source, &Scale::Identity, storage)
    }

    pub(crate) fn from_source_values(
        values: SourceValues<T>,
        scale: &Scale,
        storage: StorageType,
    ) -> Self {
        let identity = scale.is_base_si_scale();
        let to_si = move |v: T| {
            if identity {
                v
            } else {
                T::from_f64(scale.to_standard_unit(v.to_f64()))
            }
        };
        match values {
            SourceValues::Sparse { len, entries }
                if storage.is_sparse() && scale.maps_zero_to_zero() =>
            {
                Self::Sparse(SparseVector::from_entries(
                    len,
                    entries.into_iter().map(|(i, v)| (i, to_si(v))),
                ))
            }
            values => {
                let mut dense = values.into_dense();
                if !identity {
                    parallel::map_in_place(&mut dense, to_si);
                }
                Self::with_storage(dense, storage)
            }
        }
    }

    pub(crate) fn with_storage(values: Vec<T>, storage: StorageType) -> Self {
        match storage {
            StorageType::Dense => Self::Dense(DenseVector { values }),
            StorageType::Sparse => Self::Sparse(SparseVector::from_dense(&values)),
        }
    }

    /// Storage type tag.
    #[inline]
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::Dense(_) => StorageType::Dense,
            Self::Sparse(_) => StorageType::Sparse,
        }
    }

    /// Returns `true` for dense storage.
    #[inline]
    pub fn is_dense(&self) -> bool {
        matches!(self, Self::Dense(_))
    }

    /// Returns `true` for sparse storage.
    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Dense(d) => d.values.len(),
            Self::Sparse(s) => s.len,
        }
    }

    /// Always `false`; empty storage cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(Error::index_out_of_range(index, self.len()));
        }
        Ok(())
    }

    pub(crate) fn check_size(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::size_mismatch((1, self.len()), (1, other.len())));
        }
        Ok(())
    }

    /// SI value of one cell.
    pub fn get_si(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(match self {
            Self::Dense(d) => d.values[index],
            Self::Sparse(s) => s.get(index),
        })
    }

    /// Sets the SI value of one cell.
    ///
    /// Sparse storage overwrites, removes (when set to zero) or inserts the
    /// entry so the no-stored-zeros invariant holds.
    pub fn set_si(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        match self {
            Self::Dense(d) => d.values[index] = value,
            Self::Sparse(s) => s.set(index, value),
        }
        Ok(())
    }

    /// Number of non-zero cells.
    pub fn cardinality(&self) -> usize {
        match self {
            Self::Dense(d) => parallel::count_nonzero(&d.values),
            Self::Sparse(s) => s.stored(),
        }
    }

    /// Sum of all SI values, accumulated left to right.
    pub fn z_sum(&self) -> T {
        match self {
            Self::Dense(d) => parallel::sum(&d.values),
            Self::Sparse(s) => parallel::sum(&s.values),
        }
    }

    /// All SI values, one per cell.
    pub fn values_si(&self) -> Vec<T> {
        self.dense_cow().into_owned()
    }

    pub(crate) fn dense_cow(&self) -> Cow<'_, [T]> {
        match self {
            Self::Dense(d) => Cow::Borrowed(&d.values),
            Self::Sparse(s) => Cow::Owned(s.to_dense_vec()),
        }
    }

    /// Iterates over every cell's SI value.
    pub fn iter_si(&self) -> Cells<'_, T> {
        Cells {
            data: self,
            index: 0,
            cursor: 0,
        }
    }

    /// Iterates over the non-zero cells as `(index, value)`.
    pub fn iter_nonzero(&self) -> Box<dyn Iterator<Item = (usize, T)> + '_> {
        match self {
            Self::Dense(d) => Box::new(
                d.values
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|(_, v)| v.is_nonzero()),
            ),
            Self::Sparse(s) => Box::new(s.indices.iter().copied().zip(s.values.iter().copied())),
        }
    }

    /// Dense copy (a plain clone when already dense).
    pub fn to_dense(&self) -> Self {
        match self {
            Self::Dense(_) => self.clone(),
            Self::Sparse(s) => {
                trace!(len = s.len, stored = s.stored(), "densify vector data");
                Self::Dense(DenseVector {
                    values: s.to_dense_vec(),
                })
            }
        }
    }

    /// Sparse copy (a plain clone when already sparse).
    pub fn to_sparse(&self) -> Self {
        match self {
            Self::Sparse(_) => self.clone(),
            Self::Dense(d) => {
                trace!(len = d.values.len(), "sparsify vector data");
                Self::Sparse(SparseVector::from_dense(&d.values))
            }
        }
    }

    /// Converts to dense storage, reusing `self` when already dense.
    pub fn into_dense(self) -> Self {
        match self {
            Self::Dense(_) => self,
            sparse => sparse.to_dense(),
        }
    }

    /// Converts to sparse storage, reusing `self` when already sparse.
    pub fn into_sparse(self) -> Self {
        match self {
            Self::Sparse(_) => self,
            dense => dense.to_sparse(),
        }
    }

    /// Copy in the requested storage type.
    pub fn to_storage(&self, storage: StorageType) -> Self {
        match storage {
            StorageType::Dense => self.to_dense(),
            StorageType::Sparse => self.to_sparse(),
        }
    }

    /// Returns `true` if both hold the same values cell for cell,
    /// regardless of storage type.
    pub fn same_values(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Dense(a), Self::Dense(b)) => a.values == b.values,
            (Self::Sparse(a), Self::Sparse(b)) => a == b,
            _ => self.len() == other.len() && *self.dense_cow() == *other.dense_cow(),
        }
    }

    // ------------------------------------------------------------------
    // Binary operations
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

    /// Elementwise `self / other`. Division by zero yields IEEE Inf/NaN.
    pub fn divide(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Divide)
    }

    /// Elementwise operation with the result storage chosen by
    /// [`BinaryOp::result_storage`].
    pub fn combine(&self, other: &Self, op: BinaryOp) -> Result<Self> {
        self.check_size(other)?;
        let storage = op.result_storage(self.storage_type(), other.storage_type());
        Ok(self.combine_as(other, op, storage))
    }

    /// Sizes must already match.
    pub(crate) fn combine_as(&self, other: &Self, op: BinaryOp, storage: StorageType) -> Self {
        if let (Self::Sparse(a), Self::Sparse(b), StorageType::Sparse) = (self, other, storage) {
            if !op.apply(T::ZERO, T::ZERO).is_nonzero() {
                return Self::Sparse(a.merge(b, |x, y| op.apply(x, y)));
            }
        }
        let out = parallel::zip(&self.dense_cow(), &other.dense_cow(), move |x, y| op.apply(x, y));
        Self::with_storage(out, storage)
    }

    // ------------------------------------------------------------------
    // In-place operations
    // ------------------------------------------------------------------

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

    /// In-place elementwise operation against another vector.
    pub fn apply_in_place(&mut self, other: &Self, op: BinaryOp) -> Result<()> {
        self.check_size(other)?;
        self.apply_in_place_unchecked(other, op);
        Ok(())
    }

    pub(crate) fn apply_in_place_unchecked(&mut self, other: &Self, op: BinaryOp) {
        if let Self::Dense(d) = self {
            match other {
                Self::Sparse(s) if op.is_additive() => {
                    for (&i, &v) in s.indices.iter().zip(&s.values) {
                        d.values[i] = op.apply(d.values[i], v);
                    }
                }
                _ => parallel::zip_in_place(&mut d.values, &other.dense_cow(), move |x, y| {
                    op.apply(x, y)
                }),
            }
            return;
        }
        let result = self.combine_as(other, op, StorageType::Sparse);
        *self = result;
    }

    /// In-place `self += si` on every cell.
    pub fn increment_by_scalar(&mut self, si: T) {
        self.apply_scalar_in_place(si, BinaryOp::Plus);
    }

    /// In-place `self -= si` on every cell.
    pub fn decrement_by_scalar(&mut self, si: T) {
        self.apply_scalar_in_place(si, BinaryOp::Minus);
    }

    /// In-place `self *= factor` on every cell.
    pub fn multiply_by_scalar(&mut self, factor: T) {
        self.apply_scalar_in_place(factor, BinaryOp::Times);
    }

    /// In-place `self /= divisor` on every cell.
    pub fn divide_by_scalar(&mut self, divisor: T) {
        self.apply_scalar_in_place(divisor, BinaryOp::Divide);
    }

    fn apply_scalar_in_place(&mut self, s: T, op: BinaryOp) {
        self.assign(move |x| op.apply(x, s));
    }

    /// Replaces every SI value `v` with `f(v)`, keeping the storage type.
    ///
    /// Sparse storage only visits stored entries when `f(0) == 0`;
    /// otherwise every cell is evaluated.
    pub fn assign<F>(&mut self, f: F)
    where
        F: Fn(T) -> T + Sync + Send,
    {
        match self {
            Self::Dense(d) => parallel::map_in_place(&mut d.values, f),
            Self::Sparse(s) => {
                if f(T::ZERO).is_nonzero() {
                    let dense = parallel::map(&s.to_dense_vec(), f);
                    *s = SparseVector::from_dense(&dense);
                } else {
                    s.map_stored(f);
                }
            }
        }
    }
}

/// Iterator over every cell of a [`VectorData`], zeros included.
#[derive(Debug, Clone)]
pub struct Cells<'a, T> {
    data: &'a VectorData<T>,
    index: usize,
    cursor: usize,
}

impl<T: Element> Iterator for Cells<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.index >= self.data.len() {
            return None;
        }
        let value = match self.data {
            VectorData::Dense(d) => d.values[self.index],
            VectorData::Sparse(s) => {
                if s.indices.get(self.cursor) == Some(&self.index) {
                    self.cursor += 1;
                    s.values[self.cursor - 1]
                } else {
                    T::ZERO
                }
            }
        };
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.data.len() - self.index;
        (rest, Some(rest))
    }
}

impl<T: Element> ExactSizeIterator for Cells<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SparseSource;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn dense(values: &[f64]) -> VectorData<f64> {
        VectorData::instantiate_si(values, StorageType::Dense).unwrap()
    }

    fn sparse(values: &[f64]) -> VectorData<f64> {
        VectorData::instantiate_si(values, StorageType::Sparse).unwrap()
    }

    #[test]
    fn test_instantiate_with_scale() {
        let km = Scale::linear(1000.0);
        let v = VectorData::instantiate([1.5, 0.0], &km, StorageType::Sparse).unwrap();
        assert_eq!(v.get_si(0).unwrap(), 1500.0);
        assert_eq!(v.cardinality(), 1);
    }

    #[test]
    fn test_offset_scale_densifies_sparse_source() {
        let celsius = Scale::offset_linear(1.0, 273.15);
        let src = SparseSource::new(3, BTreeMap::from([(1, 10.0)]));
        let v = VectorData::<f64>::instantiate(src, &celsius, StorageType::Sparse).unwrap();
        assert!(v.is_sparse());
        assert_eq!(v.cardinality(), 3);
        assert_relative_eq!(v.get_si(0).unwrap(), 273.15);
        assert_relative_eq!(v.get_si(1).unwrap(), 283.15);
    }

    #[test]
    fn test_null_and_empty() {
        let none: Option<Vec<f64>> = None;
        let err = VectorData::instantiate_si(none, StorageType::Dense).unwrap_err();
        assert!(err.is_null_argument());
        let err = VectorData::<f64>::instantiate_si(Vec::new(), StorageType::Sparse).unwrap_err();
        assert!(err.is_construction());
    }

    #[test]
    fn test_sparse_set_three_cases() {
        let mut v = sparse(&[0.0, 1.0, 0.0, 3.0]);
        // overwrite
        v.set_si(1, 5.0).unwrap();
        // insert
        v.set_si(2, 7.0).unwrap();
        // remove
        v.set_si(3, 0.0).unwrap();
        // zero onto zero
        v.set_si(0, -0.0).unwrap();
        match &v {
            VectorData::Sparse(s) => {
                assert_eq!(s.indices(), &[1, 2]);
                assert_eq!(s.values(), &[5.0, 7.0]);
            }
            VectorData::Dense(_) => panic!("storage type changed"),
        }
        assert_eq!(v.values_si(), vec![0.0, 5.0, 7.0, 0.0]);
        assert!(v.set_si(4, 1.0).unwrap_err().is_index_out_of_range());
    }

    #[test]
    fn test_cardinality_ieee() {
        let v = dense(&[0.0, -0.0, f64::NAN, 2.0]);
        assert_eq!(v.cardinality(), 2);
        assert_eq!(v.to_sparse().cardinality(), 2);
    }

    #[test]
    fn test_z_sum() {
        let mut values = vec![0.0; 100];
        for k in 1..=10 {
            values[(k - 1) * 10] = k as f64;
        }
        let s = sparse(&values);
        assert_eq!(s.cardinality(), 10);
        assert_eq!(s.z_sum(), 55.0);
        assert_eq!(s.to_dense().z_sum(), 55.0);
    }

    #[test]
    fn test_tie_break_all_combinations() {
        let d = dense(&[1.0, 0.0, 2.0]);
        let s = sparse(&[0.0, 3.0, 4.0]);
        use StorageType::{Dense, Sparse};
        let cases = [(&d, &d), (&d, &s), (&s, &d), (&s, &s)];
        let additive = [Dense, Dense, Dense, Sparse];
        let multiplicative = [Dense, Sparse, Sparse, Sparse];
        for (k, (a, b)) in cases.iter().enumerate() {
            assert_eq!(a.plus(b).unwrap().storage_type(), additive[k]);
            assert_eq!(a.minus(b).unwrap().storage_type(), additive[k]);
            assert_eq!(a.times(b).unwrap().storage_type(), multiplicative[k]);
            assert_eq!(a.divide(b).unwrap().storage_type(), multiplicative[k]);
        }
    }

    #[test]
    fn test_binary_values() {
        let d = dense(&[1.0, 0.0, 2.0]);
        let s = sparse(&[0.0, 3.0, 4.0]);
        assert_eq!(d.plus(&s).unwrap().values_si(), vec![1.0, 3.0, 6.0]);
        assert_eq!(s.minus(&s).unwrap().cardinality(), 0);
        assert_eq!(d.times(&s).unwrap().values_si(), vec![0.0, 0.0, 8.0]);
        let q = s.divide(&d).unwrap();
        let values = q.values_si();
        assert_eq!(values[0], 0.0);
        assert!(values[1].is_infinite());
        assert_eq!(values[2], 2.0);
        assert_eq!(q.cardinality(), 2);
        // 0/0 is NaN, which a sparse result has to store
        let nan = s.divide(&s).unwrap();
        assert!(nan.is_sparse());
        assert!(nan.get_si(0).unwrap().is_nan());
        assert_eq!(nan.cardinality(), 3);
    }

    #[test]
    fn test_size_mismatch() {
        let a = dense(&[1.0, 2.0]);
        let b = dense(&[1.0, 2.0, 3.0]);
        assert!(a.plus(&b).unwrap_err().is_size_mismatch());
        let mut c = a.clone();
        assert!(c.increment_by(&b).unwrap_err().is_size_mismatch());
        assert_eq!(c, a);
    }

    #[test]
    fn test_in_place_keeps_storage() {
        let mut s = sparse(&[0.0, 1.0, 0.0, 0.0]);
        s.increment_by(&sparse(&[0.0, 0.0, 2.0, 0.0])).unwrap();
        assert!(s.is_sparse());
        assert_eq!(s.values_si(), vec![0.0, 1.0, 2.0, 0.0]);

        s.increment_by(&dense(&[1.0, 1.0, 1.0, 1.0])).unwrap();
        assert!(s.is_sparse());
        assert_eq!(s.cardinality(), 4);

        let mut d = dense(&[1.0, 2.0, 3.0, 4.0]);
        d.multiply_by(&sparse(&[0.0, 1.0, 0.0, 2.0])).unwrap();
        assert!(d.is_dense());
        assert_eq!(d.values_si(), vec![0.0, 2.0, 0.0, 8.0]);
    }

    #[test]
    fn test_scalar_in_place() {
        let mut s = sparse(&[0.0, 2.0, 0.0]);
        s.multiply_by_scalar(3.0);
        assert_eq!(s.values_si(), vec![0.0, 6.0, 0.0]);
        s.increment_by_scalar(1.0);
        assert!(s.is_sparse());
        assert_eq!(s.values_si(), vec![1.0, 7.0, 1.0]);
        s.decrement_by_scalar(1.0);
        assert_eq!(s.cardinality(), 1);
        s.divide_by_scalar(0.0);
        assert_eq!(s.cardinality(), 3);
    }

    #[test]
    fn test_assign() {
        let mut s = sparse(&[0.0, -2.5, 0.0]);
        s.assign(f64::abs);
        assert_eq!(s.values_si(), vec![0.0, 2.5, 0.0]);
        s.assign(|x| x - 2.5);
        assert!(s.is_sparse());
        assert_eq!(s.values_si(), vec![-2.5, 0.0, -2.5]);
    }

    #[test]
    fn test_equality_rules() {
        let d = dense(&[1.0, 0.0, 2.0]);
        let s = d.to_sparse();
        assert_ne!(d, s);
        assert!(d.same_values(&s));
        assert_eq!(s, sparse(&[1.0, 0.0, 2.0]));
        assert_eq!(s.to_dense(), d);
        assert!(!d.same_values(&dense(&[1.0, 0.0, 3.0])));
    }

    #[test]
    fn test_iterators() {
        let s = sparse(&[0.0, 4.0, 0.0, 5.0]);
        assert_eq!(s.iter_si().collect::<Vec<_>>(), vec![0.0, 4.0, 0.0, 5.0]);
        assert_eq!(s.iter_si().len(), 4);
        assert_eq!(s.iter_nonzero().collect::<Vec<_>>(), vec![(1, 4.0), (3, 5.0)]);
        assert_eq!(s.to_dense().iter_nonzero().collect::<Vec<_>>(), vec![(1, 4.0), (3, 5.0)]);
    }

    fn cells() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(
            prop_oneof![3 => Just(0.0), 2 => -1e6f64..1e6],
            1..64,
        )
    }

    proptest! {
        #[test]
        fn prop_representation_roundtrip(values in cells()) {
            let d = dense(&values);
            let s = sparse(&values);
            prop_assert_eq!(d.to_sparse().to_dense(), d.clone());
            prop_assert_eq!(s.to_dense().to_sparse(), s.clone());
            prop_assert!(d.same_values(&s));
            prop_assert_eq!(d.cardinality(), s.cardinality());
            prop_assert_eq!(d.z_sum(), s.z_sum());
        }

        #[test]
        fn prop_sparse_merge_matches_dense(a in cells(), b in cells()) {
            let n = a.len().min(b.len());
            let (a, b) = (&a[..n], &b[..n]);
            for op in [BinaryOp::Plus, BinaryOp::Minus, BinaryOp::Times] {
                let fast = sparse(a).combine(&sparse(b), op).unwrap();
                let slow = dense(a).combine(&dense(b), op).unwrap();
                prop_assert!(fast.same_values(&slow));
            }
        }
    }
}

//! Vectors of values with a unit.
//!
//! A [`Vector`] binds [`VectorData`] storage to a display [`Unit`] and an
//! [`Abs`]/[`Rel`] kind. Vectors are immutable when created; call
//! [`mutable`](Vector::mutable) for a handle that accepts writes. Handles
//! share storage until the first write (copy-on-write), so a write through
//! one handle is never visible through another.
//!
//! `times` and `divide` produce SI vectors: the result unit is built from
//! the composed dimensions rather than looked up, and
//! [`as_quantity`](Vector::as_quantity) turns it back into a named quantity.
//!
//! # Usage
//!
//! ```
//! use qty_core::{Quantity, StorageType};
//! use qty_value::{TextOptions, Vector};
//!
//! let v = Vector::<f64>::of([1.0, 2.0], Quantity::Length, "km", StorageType::Dense).unwrap();
//! assert_eq!(v.get_si(1).unwrap(), 2000.0);
//!
//! let mut w = v.mutable();
//! w.increment_by(&v).unwrap();
//! assert_eq!(w.get_in_unit(1).unwrap(), 4.0);
//! assert_eq!(v.get_in_unit(1).unwrap(), 2.0);
//! assert_eq!(w.to_string_with(TextOptions::VERBOSE), "Mutable   Rel Dense  [ 2 4] km");
//!
//! let area = v.times(&v).unwrap();
//! assert_eq!(area.unit().abbreviation(), "m2");
//! assert!(area.unit().is_si_generic());
//! let area = area.as_quantity(Quantity::Area).unwrap();
//! assert_eq!(area.quantity(), Some(Quantity::Area));
//! ```

use std::fmt;
use std::marker::PhantomData;

use qty_core::{Element, Error, Quantity, Result, SIDimensions, StorageType, Unit};
use qty_data::{VectorData, VectorSource};
use tracing::debug;

use crate::kind::{Abs, Kind, Rel};
use crate::scalar::{Scalar, check_compatible, lookup_unit, quantity_unit};
use crate::shared::Shared;
use crate::text::{self, TextOptions};

/// A vector of values with a unit, relative by default.
#[derive(Debug)]
pub struct Vector<T, K = Rel> {
    data: Shared<VectorData<T>>,
    unit: Unit,
    kind: PhantomData<K>,
}

/// An absolute vector, e.g. a list of positions or readings.
pub type AbsVector<T> = Vector<T, Abs>;

/// A relative vector whose unit is built from a dimension signature, as
/// returned by [`Vector::times`] and [`Vector::divide`].
pub type SiVector<T> = Vector<T, Rel>;

impl<T: Element, K: Kind> Vector<T, K> {
    /// Creates an immutable vector from values expressed in `unit`.
    ///
    /// # Errors
    ///
    /// - [`Error::NullArgument`] if `values` is `None`
    /// - [`Error::Construction`] if `values` is empty
    pub fn instantiate<S: VectorSource<T>>(
        values: S,
        unit: &Unit,
        storage: StorageType,
    ) -> Result<Self> {
        let unit = K::bind(unit);
        let data = VectorData::instantiate(values, unit.scale(), storage)?;
        Ok(Self::wrap(data, unit))
    }

    /// Creates an immutable vector from SI values, displayed in `unit`.
    pub fn instantiate_si<S: VectorSource<T>>(
        values: S,
        unit: &Unit,
        storage: StorageType,
    ) -> Result<Self> {
        let data = VectorData::instantiate_si(values, storage)?;
        Ok(Self::wrap(data, K::bind(unit)))
    }

    /// Creates an immutable vector from values in the unit of `quantity`
    /// named by `unit` (abbreviation or id).
    pub fn of<S: VectorSource<T>>(
        values: S,
        quantity: Quantity,
        unit: &str,
        storage: StorageType,
    ) -> Result<Self> {
        Self::instantiate(values, &lookup_unit(quantity, unit)?, storage)
    }

    /// Creates an immutable vector from scalars, displayed in the unit of
    /// the first one.
    ///
    /// # Errors
    ///
    /// - [`Error::Construction`] if `scalars` is empty
    /// - [`Error::IncompatibleUnit`] if the scalars differ in dimensions
    pub fn from_scalars(scalars: &[Scalar<T, K>], storage: StorageType) -> Result<Self> {
        let first = scalars
            .first()
            .ok_or_else(|| Error::construction("vector length must be > 0"))?;
        let mut si = Vec::with_capacity(scalars.len());
        for s in scalars {
            check_compatible(s.unit(), first.unit())?;
            si.push(s.si());
        }
        Self::instantiate_si(si, first.unit(), storage)
    }

    /// Wraps existing SI storage, displayed in `unit`.
    pub fn from_data(data: VectorData<T>, unit: &Unit) -> Self {
        Self::wrap(data, K::bind(unit))
    }

    fn wrap(data: VectorData<T>, unit: Unit) -> Self {
        Self {
            data: Shared::new(data),
            unit,
            kind: PhantomData,
        }
    }

    fn with_unit(&self, unit: Unit) -> Self {
        Self {
            data: self.data.share(self.data.is_mutable()),
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
        Self {
            data: self.data.share(true),
            unit: self.unit.clone(),
            kind: PhantomData,
        }
    }

    /// An immutable handle on the same storage.
    pub fn immutable(&self) -> Self {
        Self {
            data: self.data.share(false),
            unit: self.unit.clone(),
            kind: PhantomData,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Underlying SI storage.
    #[inline]
    pub fn data(&self) -> &VectorData<T> {
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

    /// Quantity of the display unit, `None` for SI vectors.
    #[inline]
    pub fn quantity(&self) -> Option<Quantity> {
        self.unit.quantity()
    }

    /// Returns `true` for [`Abs`] vectors.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        K::IS_ABSOLUTE
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Always `false`; empty vectors cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
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
    pub fn get_si(&self, index: usize) -> Result<T> {
        self.data().get_si(index)
    }

    /// Value of one cell in the display unit.
    pub fn get_in_unit(&self, index: usize) -> Result<T> {
        Ok(text::display_value(self.get_si(index)?, &self.unit))
    }

    /// Value of one cell in another unit of the same dimensions.
    pub fn get_in(&self, index: usize, unit: &Unit) -> Result<T> {
        check_compatible(&self.unit, unit)?;
        Ok(text::display_value(self.get_si(index)?, unit))
    }

    /// One cell as a scalar in the display unit.
    pub fn get(&self, index: usize) -> Result<Scalar<T, K>> {
        Ok(Scalar::from_si(self.get_si(index)?, &self.unit))
    }

    /// All SI values.
    pub fn values_si(&self) -> Vec<T> {
        self.data().values_si()
    }

    /// All values in the display unit.
    pub fn values_in_unit(&self) -> Vec<T> {
        self.data()
            .iter_si()
            .map(|si| text::display_value(si, &self.unit))
            .collect()
    }

    /// All values in another unit of the same dimensions.
    pub fn values_in(&self, unit: &Unit) -> Result<Vec<T>> {
        check_compatible(&self.unit, unit)?;
        Ok(self
            .data()
            .iter_si()
            .map(|si| text::display_value(si, unit))
            .collect())
    }

    /// All cells as scalars in the display unit.
    pub fn scalars(&self) -> Vec<Scalar<T, K>> {
        self.data()
            .iter_si()
            .map(|si| Scalar::from_si(si, &self.unit))
            .collect()
    }

    /// Iterates over the SI values.
    pub fn iter_si(&self) -> impl ExactSizeIterator<Item = T> + '_ {
        self.data().iter_si()
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
            return self.with_unit(self.unit.clone());
        }
        let mut data = Shared::new(self.data().to_storage(storage));
        if self.is_mutable() {
            data = data.share(true);
        }
        Self {
            data,
            unit: self.unit.clone(),
            kind: PhantomData,
        }
    }

    /// Same values shown in another unit of the same dimensions.
    pub fn with_display_unit(&self, unit: &Unit) -> Result<Self> {
        check_compatible(&self.unit, unit)?;
        Ok(self.with_unit(K::bind(unit)))
    }

    /// Reinterprets an SI vector as `quantity`, in its standard unit.
    ///
    /// Storage is shared, not copied.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleUnit`] if the dimensions differ.
    pub fn as_quantity(&self, quantity: Quantity) -> Result<Self> {
        let unit = quantity_unit(self.si_dimensions(), quantity)?;
        Ok(self.with_unit(K::bind(&unit)))
    }

    /// Returns `true` if the cell values match, regardless of storage type and unit.
    pub fn same_values(&self, other: &Self) -> bool {
        self.data().same_values(other.data())
    }

    fn recast<K2: Kind>(&self) -> Vector<T, K2> {
        let unit = K2::bind(&self.unit);
        let data = match text::rebase::<T>(&self.unit, &unit) {
            None => self.data.share(false),
            Some(f) => {
                let mut data = self.data().clone();
                data.assign(f);
                Shared::new(data)
            }
        };
        Vector {
            data,
            unit,
            kind: PhantomData,
        }
    }

    // ------------------------------------------------------------------
    // In-place operations
    // ------------------------------------------------------------------

    /// Sets the SI value of one cell.
    pub fn set_si(&mut self, index: usize, si: T) -> Result<()> {
        self.data.write("set_si")?.set_si(index, si)
    }

    /// Sets one cell from a value in the display unit.
    pub fn set_in_unit(&mut self, index: usize, value: T) -> Result<()> {
        let si = text::si_value(value, &self.unit);
        self.data.write("set_in_unit")?.set_si(index, si)
    }

    /// Sets one cell from a scalar of the same dimensions.
    pub fn set(&mut self, index: usize, value: &Scalar<T, K>) -> Result<()> {
        check_compatible(value.unit(), &self.unit)?;
        self.data.write("set")?.set_si(index, value.si())
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
    /// [`Error::SizeMismatch`]; the vector is unchanged on error.
    pub fn increment_by(&mut self, other: &Vector<T, Rel>) -> Result<()> {
        self.data.check("increment_by")?;
        check_compatible(other.unit(), &self.unit)?;
        self.data.write("increment_by")?.increment_by(other.data())
    }

    /// Subtracts `other` cell by cell, keeping the storage type.
    pub fn decrement_by(&mut self, other: &Vector<T, Rel>) -> Result<()> {
        self.data.check("decrement_by")?;
        check_compatible(other.unit(), &self.unit)?;
        self.data.write("decrement_by")?.decrement_by(other.data())
    }

    /// Multiplies cell by cell with dimensionless `factors`.
    pub fn multiply_by(&mut self, factors: &Vector<T, Rel>) -> Result<()> {
        self.data.check("multiply_by")?;
        require_dimensionless(factors)?;
        self.data.write("multiply_by")?.multiply_by(factors.data())
    }

    /// Divides cell by cell by dimensionless `divisors`.
    pub fn divide_by(&mut self, divisors: &Vector<T, Rel>) -> Result<()> {
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

    /// Renders the vector with the given options.
    pub fn to_string_with(&self, options: TextOptions) -> String {
        self.render(&self.unit, options)
    }

    /// Renders the vector with values expressed in `unit`.
    ///
    /// Fails with [`Error::IncompatibleUnit`] if `unit` has other SI dimensions.
    pub fn to_string_in(&self, unit: &Unit, options: TextOptions) -> Result<String> {
        check_compatible(unit, &self.unit)?;
        Ok(self.render(unit, options))
    }

    fn render(&self, unit: &Unit, options: TextOptions) -> String {
        let mut out = String::new();
        if options.verbose {
            text::write_header(&mut out, self.is_mutable(), K::TAG, self.storage_type());
        }
        // Writing into a String cannot fail.
        let _ = text::write_values(&mut out, self.data().iter_si(), unit);
        if options.with_unit {
            text::write_unit(&mut out, unit, " ");
        }
        out
    }
}

fn require_dimensionless<T: Element>(factors: &Vector<T, Rel>) -> Result<()> {
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

impl<T: Element> Vector<T, Rel> {
    fn additive(&self, other: &Self, result: Result<VectorData<T>>) -> Result<Self> {
        let data = result?;
        let unit = if self.unit == other.unit {
            self.unit.clone()
        } else {
            self.unit.standard_unit()
        };
        Ok(Self::wrap(data, unit))
    }

    /// `self + other`; sparse only if both are sparse.
    ///
    /// The result keeps the unit when both share it, otherwise it is in
    /// the left operand's standard unit.
    pub fn plus(&self, other: &Self) -> Result<Self> {
        check_compatible(other.unit(), &self.unit)?;
        self.additive(other, self.data().plus(other.data()))
    }

    /// `self - other`; sparse only if both are sparse.
    pub fn minus(&self, other: &Self) -> Result<Self> {
        check_compatible(other.unit(), &self.unit)?;
        self.additive(other, self.data().minus(other.data()))
    }

    /// Cell-by-cell product as an SI vector; dense only if both are dense.
    pub fn times(&self, other: &Self) -> Result<SiVector<T>> {
        let data = self.data().times(other.data())?;
        let dims = self.si_dimensions().plus(&other.si_dimensions());
        debug!(dimensions = %dims, "vector product");
        Ok(Self::wrap(data, Unit::si(dims)))
    }

    /// Cell-by-cell quotient as an SI vector; dense only if both are dense.
    pub fn divide(&self, other: &Self) -> Result<SiVector<T>> {
        let data = self.data().divide(other.data())?;
        let dims = self.si_dimensions().minus(&other.si_dimensions());
        debug!(dimensions = %dims, "vector quotient");
        Ok(Self::wrap(data, Unit::si(dims)))
    }

    /// Absolute vector with the same display values.
    pub fn to_abs(&self) -> Vector<T, Abs> {
        self.recast()
    }
}

// ============================================================================
// Absolute arithmetic
// ============================================================================

impl<T: Element> Vector<T, Abs> {
    /// Points moved by `increment`, in this vector's unit.
    pub fn plus_rel(&self, increment: &Vector<T, Rel>) -> Result<Self> {
        check_compatible(increment.unit(), &self.unit)?;
        let data = self.data().plus(increment.data())?;
        Ok(Self::wrap(data, self.unit.clone()))
    }

    /// Points moved back by `decrement`, in this vector's unit.
    pub fn minus_rel(&self, decrement: &Vector<T, Rel>) -> Result<Self> {
        check_compatible(decrement.unit(), &self.unit)?;
        let data = self.data().minus(decrement.data())?;
        Ok(Self::wrap(data, self.unit.clone()))
    }

    /// Distances between two vectors of points, in this vector's relative unit.
    pub fn minus_abs(&self, other: &Self) -> Result<Vector<T, Rel>> {
        check_compatible(other.unit(), &self.unit)?;
        let data = self.data().minus(other.data())?;
        Ok(Vector::wrap(data, self.unit.relative_unit()))
    }

    /// Relative vector with the same display values.
    pub fn to_rel(&self) -> Vector<T, Rel> {
        self.recast()
    }
}

// ============================================================================
// Trait impls
// ============================================================================

/// Clones into an independent immutable vector.
impl<T: Element, K: Kind> Clone for Vector<T, K> {
    fn clone(&self) -> Self {
        self.immutable()
    }
}

/// Equal when storage type, cell values, standard unit and kind match.
impl<T: Element, K: Kind> PartialEq for Vector<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.data() == other.data() && self.unit.standard_unit() == other.unit.standard_unit()
    }
}

impl<T: Element, K: Kind> fmt::Display for Vector<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(TextOptions::PLAIN))
    }
}

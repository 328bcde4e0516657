//! End-to-end scenarios across storage, units and typed containers.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use qty_data::SparseSource;
use qty_value::prelude::*;

/// 10x10 kilometre matrix with cell `(i, j) = 10 * i + j + 1`.
fn km_grid(storage: StorageType) -> Matrix<f64> {
    let rows: Vec<Vec<f64>> = (0..10)
        .map(|i| (0..10).map(|j| (10 * i + j + 1) as f64).collect())
        .collect();
    Matrix::of(rows, Quantity::Length, "km", storage).unwrap()
}

#[test]
fn dense_matrix_shape_and_sum() {
    let m = km_grid(StorageType::Dense);
    assert_eq!(m.rows(), 10);
    assert_eq!(m.cols(), 10);
    assert_eq!(m.cardinality(), 100);
    assert_relative_eq!(m.z_sum().si(), 50.0 * 101.0 * 1000.0, max_relative = 1e-12);
    assert_relative_eq!(m.z_sum().value(), 5050.0, max_relative = 1e-12);
}

#[test]
fn matrix_equality_depends_on_storage() {
    let dense = km_grid(StorageType::Dense);
    assert_eq!(dense.to_sparse().to_dense(), dense);
    assert_ne!(dense.to_sparse(), dense);
    assert_eq!(dense.to_sparse(), km_grid(StorageType::Sparse));
    assert!(dense.to_sparse().same_values(&dense));
}

#[test]
fn sparse_vector_every_tenth_cell() {
    let entries: BTreeMap<usize, f64> = (1..=10).map(|k| (10 * (k - 1), k as f64)).collect();
    let unit = UnitRegistry::global().unit(Quantity::Length, "km").unwrap();
    let v = Vector::<f64>::instantiate(SparseSource::new(100, entries), &unit, StorageType::Sparse)
        .unwrap();
    assert_eq!(v.len(), 100);
    assert_eq!(v.cardinality(), 10);
    assert_relative_eq!(v.z_sum().value(), 55.0);
    assert_relative_eq!(v.z_sum().si(), 55_000.0);
    assert_eq!(v.get_in_unit(90).unwrap(), 10.0);
    assert_eq!(v.get_in_unit(91).unwrap(), 0.0);
}

#[test]
fn area_products_are_si_vectors() {
    let area = Vector::<f64>::of([1.0, 2.0, 3.0], Quantity::Area, "m2", StorageType::Dense).unwrap();

    let squared = area.times(&area).unwrap();
    assert_eq!(squared.si_dimensions().to_string(), "m4");
    assert_eq!(squared.quantity(), None);
    assert_eq!(squared.values_si(), vec![1.0, 4.0, 9.0]);

    let ratio = area.divide(&area).unwrap();
    assert_eq!(ratio.si_dimensions().to_string(), "1");
    let ratio = ratio.as_quantity(Quantity::Dimensionless).unwrap();
    assert_eq!(ratio.to_string(), "[ 1 1 1]");
}

#[test]
fn matrix_construction_errors() {
    let zero_rows: Vec<Vec<f64>> = vec![];
    let err = Matrix::<f64>::of(zero_rows, Quantity::Length, "m", StorageType::Dense).unwrap_err();
    assert!(err.is_construction());

    let zero_cols: Vec<Vec<f64>> = vec![vec![]];
    let err = Matrix::<f64>::of(zero_cols, Quantity::Length, "m", StorageType::Sparse).unwrap_err();
    assert!(err.is_construction());

    let missing: Option<Vec<Vec<f64>>> = None;
    let err = Matrix::<f64>::of(missing, Quantity::Length, "m", StorageType::Dense).unwrap_err();
    assert!(err.is_null_argument());
}

#[test]
fn unknown_unit_is_a_construction_error() {
    let err = Vector::<f64>::of([1.0], Quantity::Length, "furlong", StorageType::Dense).unwrap_err();
    assert!(err.is_construction());
}

#[test]
fn verbose_text_tags() {
    let v = Vector::<f64>::of([1.0, 2.0, 3.0], Quantity::Length, "km", StorageType::Dense).unwrap();
    let text = v.mutable().to_string_with(TextOptions::VERBOSE);
    assert!(text.starts_with("Mutable"));
    assert!(text.contains("Rel"));
    assert!(text.contains("Dense"));
    assert!(text.ends_with("km"));

    let abs = v.to_abs().to_sparse();
    let text = abs.to_string_with(TextOptions::VERBOSE);
    assert!(text.starts_with("Immutable"));
    assert!(text.contains("Abs"));
    assert!(text.contains("Sparse"));
}

#[test]
fn scalar_speed_from_vectors() {
    let d = Vector::<f64>::of([3.0, 6.0], Quantity::Length, "km", StorageType::Dense).unwrap();
    let t = Vector::<f64>::of([0.5, 1.0], Quantity::Duration, "h", StorageType::Dense).unwrap();
    let v = d.divide(&t).unwrap().as_quantity(Quantity::Speed).unwrap();
    let kmh = UnitRegistry::global().unit(Quantity::Speed, "km/h").unwrap();
    let shown = v.with_display_unit(&kmh).unwrap();
    assert_relative_eq!(shown.get_in_unit(0).unwrap(), 6.0, max_relative = 1e-12);
    assert_relative_eq!(shown.z_sum().value(), 12.0, max_relative = 1e-12);
}

#[test]
fn determinant_of_three_lengths_is_a_volume() {
    let m = Matrix::<f64>::of(
        [[4.0, 3.0, 0.0], [6.0, 3.0, 0.0], [0.0, 0.0, 1.0]],
        Quantity::Length,
        "m",
        StorageType::Dense,
    )
    .unwrap();
    let det = m.determinant().unwrap();
    assert_relative_eq!(det.si(), -6.0, max_relative = 1e-12);
    assert_eq!(det.quantity(), Some(Quantity::Volume));
}

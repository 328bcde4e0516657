//! Bulk kernels over dense SI arrays.
//!
//! Every cell-wise transform is independent of the others, so large arrays
//! are processed with Rayon when the `parallel` feature is enabled. Arrays
//! shorter than [`PARALLEL_THRESHOLD`] always run on the calling thread.
//!
//! Summation is deliberately absent here: sums are accumulated
//! left-to-right on one thread so results are bit-reproducible.

use qty_core::Element;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Minimum number of cells before a kernel goes parallel.
pub const PARALLEL_THRESHOLD: usize = 1000;

#[cfg(feature = "parallel")]
#[inline]
fn go_parallel(len: usize) -> bool {
    len >= PARALLEL_THRESHOLD
}

/// Applies `f` to every value in place.
pub fn map_in_place<T, F>(values: &mut [T], f: F)
where
    T: Element,
    F: Fn(T) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    if go_parallel(values.len()) {
        values.par_iter_mut().for_each(|v| *v = f(*v));
        return;
    }
    values.iter_mut().for_each(|v| *v = f(*v));
}

/// Returns `f` applied to every value.
pub fn map<T, F>(values: &[T], f: F) -> Vec<T>
where
    T: Element,
    F: Fn(T) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    if go_parallel(values.len()) {
        return values.par_iter().map(|&v| f(v)).collect();
    }
    values.iter().map(|&v| f(v)).collect()
}

/// Replaces `dst[i]` with `f(dst[i], src[i])`. Slices must have equal length.
pub fn zip_in_place<T, F>(dst: &mut [T], src: &[T], f: F)
where
    T: Element,
    F: Fn(T, T) -> T + Sync + Send,
{
    debug_assert_eq!(dst.len(), src.len());
    #[cfg(feature = "parallel")]
    if go_parallel(dst.len()) {
        dst.par_iter_mut()
            .zip(src.par_iter())
            .for_each(|(d, &s)| *d = f(*d, s));
        return;
    }
    dst.iter_mut().zip(src).for_each(|(d, &s)| *d = f(*d, s));
}

/// Returns `f(a[i], b[i])` for every index. Slices must have equal length.
pub fn zip<T, F>(a: &[T], b: &[T], f: F) -> Vec<T>
where
    T: Element,
    F: Fn(T, T) -> T + Sync + Send,
{
    debug_assert_eq!(a.len(), b.len());
    #[cfg(feature = "parallel")]
    if go_parallel(a.len()) {
        return a.par_iter().zip(b.par_iter()).map(|(&x, &y)| f(x, y)).collect();
    }
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

/// Number of non-zero values (`-0.0` is zero, NaN is not).
pub fn count_nonzero<T: Element>(values: &[T]) -> usize {
    #[cfg(feature = "parallel")]
    if go_parallel(values.len()) {
        return values.par_iter().filter(|v| v.is_nonzero()).count();
    }
    values.iter().filter(|v| v.is_nonzero()).count()
}

/// Sequential left-to-right sum.
#[inline]
pub fn sum<T: Element>(values: &[T]) -> T {
    values.iter().fold(T::ZERO, |acc, &v| acc + v)
}

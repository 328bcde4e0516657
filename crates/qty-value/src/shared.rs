//! Copy-on-write storage handle with a mutability flag.
//!
//! Every [`Vector`](crate::Vector) and [`Matrix`](crate::Matrix) keeps its
//! storage in an [`Arc`]. Handles derived with `mutable()` / `immutable()`
//! share that allocation. The first write through a handle whose storage is
//! still shared clones it (via [`Arc::make_mut`]), so writes on one handle
//! are never visible through another.

use std::sync::Arc;

use qty_core::{Error, Result};
use tracing::trace;

#[derive(Debug)]
pub(crate) struct Shared<D> {
    data: Arc<D>,
    mutable: bool,
}

impl<D: Clone> Shared<D> {
    pub(crate) fn new(data: D) -> Self {
        Self {
            data: Arc::new(data),
            mutable: false,
        }
    }

    #[inline]
    pub(crate) fn get(&self) -> &D {
        &self.data
    }

    #[inline]
    pub(crate) fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Another handle on the same storage.
    pub(crate) fn share(&self, mutable: bool) -> Self {
        Self {
            data: Arc::clone(&self.data),
            mutable,
        }
    }

    /// Fails when the handle is immutable; the storage is not touched.
    pub(crate) fn check(&self, operation: &'static str) -> Result<()> {
        if self.mutable {
            Ok(())
        } else {
            Err(Error::immutable(operation))
        }
    }

    /// Exclusive access for a write, cloning shared storage first.
    pub(crate) fn write(&mut self, operation: &'static str) -> Result<&mut D> {
        self.check(operation)?;
        if Arc::strong_count(&self.data) > 1 {
            trace!(operation, "copy-on-write");
        }
        Ok(Arc::make_mut(&mut self.data))
    }

    #[cfg(test)]
    pub(crate) fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

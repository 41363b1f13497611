//! Typed handle to a registered cell

use arc_swap::{ArcSwap, Guard};
use std::fmt;
use std::sync::Arc;

pub(crate) type Cell<T> = ArcSwap<T>;

/// Shared, read-only handle to the cached value of one environment variable.
///
/// Every lookup of the same name returns a handle to the same cell, so a
/// handle obtained once keeps observing the value published by later
/// reloads. Reads are lock-free: each reload swaps in a freshly parsed value
/// atomically, and a reader sees either the old or the new value in full.
pub struct EnvRef<T> {
    cell: Arc<Cell<T>>,
}

impl<T> EnvRef<T> {
    pub(crate) fn from_cell(cell: Arc<Cell<T>>) -> Self {
        Self { cell }
    }

    /// Borrow the current value
    ///
    /// The guard pins the value it was loaded with; a reload that happens
    /// while it is alive does not affect it.
    pub fn load(&self) -> Guard<Arc<T>> {
        self.cell.load()
    }

    /// Get a shared pointer to the current value
    pub fn get(&self) -> Arc<T> {
        self.cell.load_full()
    }

    /// Whether both handles point at the same cell
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Clone> EnvRef<T> {
    /// Clone the current value out of the cell
    pub fn value(&self) -> T {
        (**self.cell.load()).clone()
    }
}

impl<T> Clone for EnvRef<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for EnvRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnvRef").field(&**self.cell.load()).finish()
    }
}

impl<T: PartialEq> PartialEq<T> for EnvRef<T> {
    fn eq(&self, other: &T) -> bool {
        **self.cell.load() == *other
    }
}

/*!
 * Atomic Values
 * Load/store wrapper over a guarded value
 */

use crate::core::sync::{AccessMode, GuardedValue};
use std::fmt;

/// Thread-safe cell for a single value
///
/// Stores are asynchronous; a load issued after a store from the same thread
/// always observes it, because reads queue behind earlier writes.
///
/// # Example
///
/// ```
/// use threaded_collections::Atomic;
///
/// let hits = Atomic::from_value(0u32);
/// hits.update(|n| *n += 1);
/// hits.store(10);
/// assert_eq!(hits.load(), 10);
/// assert_eq!(hits.swap(0), 10);
/// ```
pub struct Atomic<T> {
    inner: GuardedValue<T>,
}

impl<T> Clone for Atomic<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Atomic<T> {
    pub fn new(value: T, mode: AccessMode) -> Self {
        Self {
            inner: GuardedValue::new(value, mode),
        }
    }

    /// Concurrent-mode cell holding `value`
    pub fn from_value(value: T) -> Self {
        Self::new(value, AccessMode::Concurrent)
    }

    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.inner.mode()
    }

    /// Current value
    pub fn load(&self) -> T {
        self.inner.snapshot()
    }

    /// Replace the value (asynchronous)
    pub fn store(&self, value: T) {
        self.inner.mutate(move |current| *current = value);
    }

    /// Change the value in place (asynchronous)
    pub fn update<F>(&self, action: F)
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.inner.mutate(action);
    }

    /// Replace the value and return the previous one
    pub fn swap(&self, value: T) -> T {
        self.inner
            .read_mutate(move |current| std::mem::replace(current, value))
    }

    /// Change the value in place and return whatever `action` returns
    pub fn fetch_update<R, F>(&self, action: F) -> R
    where
        F: FnOnce(&mut T) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.inner.read_mutate(action)
    }

    /// The guarded value backing this cell
    pub fn guarded(&self) -> &GuardedValue<T> {
        &self.inner
    }
}

impl<T: Default + Clone + Send + Sync + 'static> Default for Atomic<T> {
    fn default() -> Self {
        Self::from_value(T::default())
    }
}

impl<T: fmt::Display + Clone + Send + Sync + 'static> fmt::Display for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.load(), f)
    }
}

impl<T: fmt::Debug + Clone + Send + Sync + 'static> fmt::Debug for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Atomic").field(&self.load()).finish()
    }
}

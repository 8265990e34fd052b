/*!
 * Collection Traits
 */

use crate::core::sync::GuardedValue;

/// Facade over a guarded internal collection
pub trait ThreadedCollection {
    /// Plain, unsynchronized collection type held by the facade
    type Unthreaded: Clone + Send + Sync + 'static;

    /// The guarded value backing this facade
    fn guarded(&self) -> &GuardedValue<Self::Unthreaded>;

    /// Snapshot copy of the internal collection
    fn unthreaded(&self) -> Self::Unthreaded {
        self.guarded().snapshot()
    }

    /// Wait for every previously submitted operation to take effect
    fn flush(&self) {
        self.guarded().flush()
    }
}

/*!
 * Threaded Collections
 * Thread-safe containers built on a single guarded-value primitive
 *
 * Every collection owns one [`GuardedValue`] and turns each of its methods
 * into exactly one of the three core primitives: `read` for observations,
 * `mutate` for fire-and-forget changes and `read_mutate` for changes that
 * hand a value back.
 */

pub mod collections;
pub mod core;
pub mod monitoring;

// Re-exports
pub use crate::core::data_structures::{CircularQueue, FifoQueue, LinkedQueue};
pub use crate::core::errors::{ThreadingError, ThreadingResult};
pub use crate::core::id::QueueLabel;
pub use crate::core::sync::{
    init_pool, AccessMode, DispatchConfig, ExecutionQueue, GuardedValue, TaskKind,
};
pub use collections::{Atomic, ThreadedArray, ThreadedCollection, ThreadedDictionary, ThreadedQueue};
pub use monitoring::init_tracing;

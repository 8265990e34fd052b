/*!
 * Core Module
 * Guarded-value core, internal data structures and error handling
 */

pub mod data_structures;
pub mod errors;
pub mod id;
pub mod sync;

// Re-export for convenience
pub use data_structures::{CircularQueue, FifoQueue, LinkedQueue};
pub use errors::*;
pub use id::QueueLabel;
pub use sync::{AccessMode, DispatchConfig, ExecutionQueue, GuardedValue};

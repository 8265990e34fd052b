/*!
 * Data Structures
 *
 * Queue implementations guarded by the threaded collections:
 * - Linked FIFO queue with O(1) enqueue/dequeue and no random access
 * - Circular buffer queue with doubling growth and quarter-full shrink
 *
 * Both implement [`FifoQueue`] so the threaded queue facade can be
 * parameterized over either storage strategy.
 */

mod circular_queue;
mod linked_queue;
mod traits;

pub use circular_queue::{CircularQueue, DEFAULT_CAPACITY};
pub use linked_queue::LinkedQueue;
pub use traits::FifoQueue;

/// Iterator types
pub mod iter {
    pub use super::circular_queue::Iter as CircularIter;
    pub use super::linked_queue::{IntoIter as LinkedIntoIter, Iter as LinkedIter};
}

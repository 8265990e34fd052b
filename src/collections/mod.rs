/*!
 * Threaded Collections
 *
 * Typed facades over [`GuardedValue`](crate::core::sync::GuardedValue):
 * - [`ThreadedArray`]: growable sequence (`Vec`)
 * - [`ThreadedDictionary`]: keyed map (`AHashMap`)
 * - [`ThreadedQueue`]: FIFO queue over any [`FifoQueue`](crate::core::data_structures::FifoQueue)
 * - [`Atomic`]: single scalar or small value
 *
 * # Dispatch Rules
 *
 * - Observations (`get`, `len`, `for_each`, ...) run through `read`
 * - Changes without a result (`push`, `insert`, `enqueue`, ...) run through
 *   `mutate` and return before they take effect
 * - Changes with a result (`pop`, `dequeue`, `swap`, ...) run through
 *   `read_mutate`
 * - `*_then` variants run through `mutate` and deliver their result to a
 *   callback on the notification thread
 */

mod array;
mod atomic;
mod dictionary;
mod queue;
mod traits;

pub use array::ThreadedArray;
pub use atomic::Atomic;
pub use dictionary::ThreadedDictionary;
pub use queue::ThreadedQueue;
pub use traits::ThreadedCollection;

/*!
 * Threaded Queue
 * FIFO queue behind a guarded value
 */

use super::traits::ThreadedCollection;
use crate::core::data_structures::{FifoQueue, LinkedQueue};
use crate::core::sync::{AccessMode, GuardedValue};
use std::fmt;
use std::marker::PhantomData;

/// Thread-safe FIFO queue
///
/// Backed by a [`LinkedQueue`] unless another [`FifoQueue`] storage is named,
/// e.g. `ThreadedQueue<T, CircularQueue<T>>`.
///
/// # Example
///
/// ```
/// use threaded_collections::ThreadedQueue;
///
/// let jobs: ThreadedQueue<&str> = ThreadedQueue::default();
/// jobs.enqueue("build");
/// jobs.enqueue("test");
///
/// assert_eq!(jobs.safe_dequeue(), Some("build"));
/// assert_eq!(jobs.safe_dequeue(), Some("test"));
/// assert_eq!(jobs.safe_dequeue(), None);
/// ```
pub struct ThreadedQueue<T, Q = LinkedQueue<T>> {
    inner: GuardedValue<Q>,
    _element: PhantomData<fn() -> T>,
}

impl<T, Q> Clone for ThreadedQueue<T, Q> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _element: PhantomData,
        }
    }
}

impl<T, Q> ThreadedQueue<T, Q>
where
    T: Clone + Send + Sync + 'static,
    Q: FifoQueue<T> + Clone + Send + Sync + 'static,
{
    pub fn new(queue: Q, mode: AccessMode) -> Self {
        Self {
            inner: GuardedValue::new(queue, mode),
            _element: PhantomData,
        }
    }

    /// Concurrent-mode queue holding `queue`
    pub fn from_queue(queue: Q) -> Self {
        Self::new(queue, AccessMode::Concurrent)
    }

    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.inner.mode()
    }

    // ------------------------------------------------------------------
    // Mutating
    // ------------------------------------------------------------------

    /// Append an element at the back
    pub fn enqueue(&self, element: T) {
        self.inner.mutate(move |queue| queue.enqueue(element));
    }

    /// Remove and return the front element
    ///
    /// # Panics
    ///
    /// Panics on the calling thread when the queue is empty. With several
    /// consumers prefer [`safe_dequeue`](Self::safe_dequeue): an emptiness
    /// check followed by `dequeue` is not atomic.
    pub fn dequeue(&self) -> T {
        self.inner.read_mutate(|queue| queue.dequeue())
    }

    /// Remove and return the front element, or `None` if the queue is empty
    pub fn safe_dequeue(&self) -> Option<T> {
        self.inner.read_mutate(|queue| queue.try_dequeue())
    }

    /// Remove the front element, if any, and pass it to `callback` on the
    /// notification thread
    pub fn dequeue_then<C>(&self, callback: C)
    where
        C: FnOnce(Option<T>) + Send + 'static,
    {
        self.inner.mutate_then(|queue| queue.try_dequeue(), callback);
    }

    // ------------------------------------------------------------------
    // Non-mutating
    // ------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.inner.read(|queue| queue.len())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read(|queue| queue.is_empty())
    }

    /// Copy of the front element, if any
    pub fn front(&self) -> Option<T> {
        self.inner.read(|queue| queue.front().cloned())
    }

    /// Copy of the back element, if any
    pub fn back(&self) -> Option<T> {
        self.inner.read(|queue| queue.back().cloned())
    }

    /// Call `callback` on each element from front to back
    pub fn for_each<F>(&self, callback: F)
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.inner.read(move |queue| queue.for_each(callback));
    }

    /// Collect `transform` applied to each element from front to back
    pub fn map<U, F>(&self, mut transform: F) -> Vec<U>
    where
        F: FnMut(&T) -> U + Send + 'static,
        U: Send + 'static,
    {
        self.inner.read(move |queue| {
            let mut out = Vec::with_capacity(queue.len());
            queue.for_each(|element| out.push(transform(element)));
            out
        })
    }
}

impl<T, Q> ThreadedCollection for ThreadedQueue<T, Q>
where
    T: Clone + Send + Sync + 'static,
    Q: FifoQueue<T> + Clone + Send + Sync + 'static,
{
    type Unthreaded = Q;

    fn guarded(&self) -> &GuardedValue<Q> {
        &self.inner
    }
}

impl<T, Q> Default for ThreadedQueue<T, Q>
where
    T: Clone + Send + Sync + 'static,
    Q: FifoQueue<T> + Default + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::from_queue(Q::default())
    }
}

impl<T, Q> fmt::Debug for ThreadedQueue<T, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadedQueue")
            .field("guarded", &self.inner)
            .finish()
    }
}

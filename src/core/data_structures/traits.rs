/*!
 * Queue Capability Trait
 * Shared FIFO surface implemented by the linked and circular queues
 */

use super::{CircularQueue, LinkedQueue};

/// First-in first-out queue operations
///
/// Lets [`ThreadedQueue`](crate::collections::ThreadedQueue) guard either
/// queue implementation without caring about its storage.
pub trait FifoQueue<T> {
    /// Append an element at the back
    fn enqueue(&mut self, element: T);

    /// Remove the front element
    ///
    /// # Panics
    ///
    /// Implementations panic when the queue is empty.
    fn dequeue(&mut self) -> T;

    /// Remove the front element if there is one
    fn try_dequeue(&mut self) -> Option<T>;

    fn front(&self) -> Option<&T>;

    fn back(&self) -> Option<&T>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every element from front to back
    fn for_each<F: FnMut(&T)>(&self, callback: F);
}

impl<T> FifoQueue<T> for LinkedQueue<T> {
    #[inline]
    fn enqueue(&mut self, element: T) {
        LinkedQueue::enqueue(self, element)
    }

    #[inline]
    fn dequeue(&mut self) -> T {
        LinkedQueue::dequeue(self)
    }

    #[inline]
    fn try_dequeue(&mut self) -> Option<T> {
        LinkedQueue::try_dequeue(self)
    }

    #[inline]
    fn front(&self) -> Option<&T> {
        LinkedQueue::front(self)
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        LinkedQueue::back(self)
    }

    #[inline]
    fn len(&self) -> usize {
        LinkedQueue::len(self)
    }

    fn for_each<F: FnMut(&T)>(&self, callback: F) {
        LinkedQueue::for_each(self, callback)
    }
}

impl<T> FifoQueue<T> for CircularQueue<T> {
    #[inline]
    fn enqueue(&mut self, element: T) {
        self.push(element)
    }

    #[inline]
    fn dequeue(&mut self) -> T {
        CircularQueue::dequeue(self)
    }

    #[inline]
    fn try_dequeue(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn front(&self) -> Option<&T> {
        CircularQueue::front(self)
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        CircularQueue::back(self)
    }

    #[inline]
    fn len(&self) -> usize {
        CircularQueue::len(self)
    }

    fn for_each<F: FnMut(&T)>(&self, callback: F) {
        self.iter().for_each(callback)
    }
}

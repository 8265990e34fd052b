/*!
 * Circular Buffer Queue
 * Growable ring buffer over a single contiguous allocation
 *
 * # Layout
 *
 * Occupied slots are those reachable from `start` by `len` forward steps
 * modulo the capacity. `end` is the slot the next push writes to, so a full
 * buffer has `end == start`.
 *
 * # Growth and Shrink
 *
 * - Pushing into a full buffer doubles the capacity and compacts the live
 *   elements to `[0, len)` of the new buffer before inserting
 * - Popping halves the capacity once `len <= capacity / 4`, never below the
 *   capacity requested at construction
 * - `shrink_to_fit` compacts to exactly `max(len, 1)` slots
 */

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::iter::FusedIterator;

/// Capacity used by [`CircularQueue::new`]
pub const DEFAULT_CAPACITY: usize = 16;

/// Ring buffer queue with doubling growth
///
/// # Example
///
/// ```
/// use threaded_collections::CircularQueue;
///
/// let mut queue = CircularQueue::with_capacity(2);
/// queue.push(0);
/// queue.push(1);
/// queue.push(2);
///
/// assert_eq!(queue.capacity(), 4);
/// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
/// assert_eq!(queue.pop(), Some(0));
/// ```
pub struct CircularQueue<T> {
    buffer: Box<[Option<T>]>,
    start: usize,
    end: usize,
    len: usize,
    min_capacity: usize,
}

fn alloc_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

impl<T> CircularQueue<T> {
    /// Create an empty queue with [`DEFAULT_CAPACITY`] slots
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty queue with room for `capacity` elements
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: alloc_slots(capacity),
            start: 0,
            end: 0,
            len: 0,
            min_capacity: capacity,
        }
    }

    /// Number of slots in the current buffer
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of queued elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` when the next push has to grow the buffer
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Physical slot of the front element
    #[inline]
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// Physical slot the next push writes to
    #[inline]
    pub fn end_index(&self) -> usize {
        self.end
    }

    /// Physical slot following `i`, wrapping at the capacity
    #[inline]
    pub fn index_after(&self, i: usize) -> usize {
        (i + 1) % self.capacity()
    }

    /// Returns `true` if physical slot `i` currently holds an element
    pub fn is_occupied(&self, i: usize) -> bool {
        if self.len == 0 || i >= self.capacity() {
            return false;
        }
        if self.end > self.start {
            i >= self.start && i < self.end
        } else {
            // Wrapped past the end of the buffer (or full)
            i >= self.start || i < self.end
        }
    }

    /// Element at logical position `index` (0 is the front)
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.buffer[self.physical(index)].as_ref()
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Append an element at the back, doubling the buffer when full
    ///
    /// # Complexity
    ///
    /// Amortized O(1); O(n) when the buffer grows
    pub fn push(&mut self, element: T) {
        if self.is_full() {
            self.relocate(self.capacity() * 2);
        }
        self.buffer[self.end] = Some(element);
        self.end = self.index_after(self.end);
        self.len += 1;
    }

    /// Remove and return the front element, or `None` if empty
    ///
    /// May halve the buffer afterwards (see the module docs).
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let element = self.buffer[self.start].take();
        self.start = self.index_after(self.start);
        self.len -= 1;
        self.maybe_shrink();
        element
    }

    /// Remove and return the front element
    ///
    /// # Panics
    ///
    /// Panics when the queue is empty.
    pub fn dequeue(&mut self) -> T {
        match self.pop() {
            Some(element) => element,
            None => panic!("dequeue called on empty queue"),
        }
    }

    /// Compact the buffer to exactly `max(len, 1)` slots
    pub fn shrink_to_fit(&mut self) {
        let target = self.len.max(1);
        if target != self.capacity() {
            self.relocate(target);
        }
    }

    /// Drop every element and return to the construction capacity
    pub fn clear(&mut self) {
        self.buffer = alloc_slots(self.min_capacity);
        self.start = 0;
        self.end = 0;
        self.len = 0;
    }

    /// Borrowing iterator in logical (front to back) order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            position: 0,
        }
    }

    #[inline]
    fn physical(&self, logical: usize) -> usize {
        (self.start + logical) % self.capacity()
    }

    fn maybe_shrink(&mut self) {
        let capacity = self.capacity();
        if self.len <= capacity / 4 && capacity / 2 >= self.min_capacity {
            self.relocate(capacity / 2);
        }
    }

    /// Move live elements, in logical order, to `[0, len)` of a fresh buffer
    fn relocate(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.len && new_capacity > 0);
        let mut fresh = alloc_slots(new_capacity);
        for (j, slot) in fresh.iter_mut().enumerate().take(self.len) {
            let i = self.physical(j);
            *slot = self.buffer[i].take();
        }
        self.buffer = fresh;
        self.start = 0;
        self.end = self.len % new_capacity;
    }
}

impl<T> Default for CircularQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for CircularQueue<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            start: self.start,
            end: self.end,
            len: self.len,
            min_capacity: self.min_capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for CircularQueue<T> {
    /// Logical equality; capacity and physical layout are ignored
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularQueue<T> {}

impl<T> FromIterator<T> for CircularQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut queue = Self::new();
        // Pre-size on the doubling ladder so the queue can still shrink back
        // to DEFAULT_CAPACITY once drained
        let hint = iter.size_hint().0;
        if hint > DEFAULT_CAPACITY {
            queue.relocate(hint.next_power_of_two());
        }
        queue.extend(iter);
        queue
    }
}

impl<T> Extend<T> for CircularQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

/// Borrowing iterator in logical order
pub struct Iter<'a, T> {
    queue: &'a CircularQueue<T>,
    position: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let element = self.queue.get(self.position)?;
        self.position += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.queue.len - self.position;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a CircularQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: Serialize> Serialize for CircularQueue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for element in self.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for CircularQueue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Ok(elements.into_iter().collect())
    }
}

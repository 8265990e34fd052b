/*!
 * Threaded Array
 * Growable sequence behind a guarded value
 */

use super::traits::ThreadedCollection;
use crate::core::sync::{AccessMode, GuardedValue};
use std::fmt;

/// Thread-safe `Vec<T>`
///
/// Positional changes are asynchronous, so an index is interpreted against
/// the array as it stands when the change runs, not when it was issued.
///
/// # Example
///
/// ```
/// use threaded_collections::{ThreadedArray, ThreadedCollection};
///
/// let array = ThreadedArray::from_vec(vec![1, 2]);
/// array.push(3);
/// assert_eq!(array.len(), 3);
/// assert_eq!(array.unthreaded(), vec![1, 2, 3]);
/// ```
pub struct ThreadedArray<T> {
    inner: GuardedValue<Vec<T>>,
}

impl<T> Clone for ThreadedArray<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ThreadedArray<T> {
    pub fn new(array: Vec<T>, mode: AccessMode) -> Self {
        Self {
            inner: GuardedValue::new(array, mode),
        }
    }

    /// Concurrent-mode array holding `array`
    pub fn from_vec(array: Vec<T>) -> Self {
        Self::new(array, AccessMode::Concurrent)
    }

    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.inner.mode()
    }

    // ------------------------------------------------------------------
    // Mutating
    // ------------------------------------------------------------------

    /// Append an element
    pub fn push(&self, element: T) {
        self.inner.mutate(move |array| array.push(element));
    }

    /// Append every element of `elements`
    pub fn extend<I>(&self, elements: I)
    where
        I: IntoIterator<Item = T>,
    {
        let elements: Vec<T> = elements.into_iter().collect();
        self.inner.mutate(move |array| array.extend(elements));
    }

    /// Replace the element at `index`
    ///
    /// An out-of-range index is reported through the failure side channel.
    pub fn set(&self, index: usize, element: T) {
        self.inner.mutate(move |array| array[index] = element);
    }

    /// Remove the element at `index`, shifting later elements down
    pub fn remove(&self, index: usize) {
        self.inner.mutate(move |array| {
            array.remove(index);
        });
    }

    /// Remove the element at `index` and pass it to `callback` on the
    /// notification thread
    pub fn remove_then<C>(&self, index: usize, callback: C)
    where
        C: FnOnce(T) + Send + 'static,
    {
        self.inner.mutate_then(move |array| array.remove(index), callback);
    }

    /// Remove the first element; the array must not be empty
    pub fn remove_first(&self) {
        self.remove(0);
    }

    pub fn remove_first_then<C>(&self, callback: C)
    where
        C: FnOnce(T) + Send + 'static,
    {
        self.remove_then(0, callback);
    }

    /// Remove the last element; the array must not be empty
    pub fn remove_last(&self) {
        self.inner.mutate(|array| {
            if array.pop().is_none() {
                panic!("remove_last called on empty array");
            }
        });
    }

    pub fn remove_last_then<C>(&self, callback: C)
    where
        C: FnOnce(T) + Send + 'static,
    {
        self.inner.mutate_then(
            |array| match array.pop() {
                Some(element) => element,
                None => panic!("remove_last called on empty array"),
            },
            callback,
        );
    }

    /// Remove and return the last element, if any
    pub fn pop(&self) -> Option<T> {
        self.inner.read_mutate(|array| array.pop())
    }

    /// Remove every element
    pub fn clear(&self) {
        self.inner.mutate(|array| array.clear());
    }

    // ------------------------------------------------------------------
    // Non-mutating
    // ------------------------------------------------------------------

    /// Copy of the element at `index`
    ///
    /// # Panics
    ///
    /// Panics on the calling thread if `index` is out of range.
    pub fn at(&self, index: usize) -> T {
        self.inner.read(move |array| array[index].clone())
    }

    /// Copy of the element at `index`, or `None` if out of range
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.read(move |array| array.get(index).cloned())
    }

    pub fn first(&self) -> Option<T> {
        self.inner.read(|array| array.first().cloned())
    }

    pub fn last(&self) -> Option<T> {
        self.inner.read(|array| array.last().cloned())
    }

    pub fn len(&self) -> usize {
        self.inner.read(|array| array.len())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read(|array| array.is_empty())
    }

    /// Returns `true` if any element equals `element`
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        let element = element.clone();
        self.inner.read(move |array| array.contains(&element))
    }

    /// Call `callback` on each element in order
    pub fn for_each<F>(&self, callback: F)
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.inner.read(move |array| array.iter().for_each(callback));
    }

    /// Collect `transform` applied to each element in order
    pub fn map<U, F>(&self, transform: F) -> Vec<U>
    where
        F: FnMut(&T) -> U + Send + 'static,
        U: Send + 'static,
    {
        self.inner.read(move |array| array.iter().map(transform).collect())
    }
}

impl<T: Clone + Send + Sync + 'static> ThreadedCollection for ThreadedArray<T> {
    type Unthreaded = Vec<T>;

    fn guarded(&self) -> &GuardedValue<Vec<T>> {
        &self.inner
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ThreadedArray<T> {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl<T: Clone + Send + Sync + 'static> From<Vec<T>> for ThreadedArray<T> {
    fn from(array: Vec<T>) -> Self {
        Self::from_vec(array)
    }
}

impl<T: Clone + Send + Sync + 'static> FromIterator<T> for ThreadedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug + Clone + Send + Sync + 'static> fmt::Debug for ThreadedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.unthreaded().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_push_and_read_back() {
        let array = ThreadedArray::default();
        array.push(1);
        array.extend([2, 3]);

        assert_eq!(array.len(), 3);
        assert_eq!(array.at(1), 2);
        assert_eq!(array.get(5), None);
        assert_eq!(array.first(), Some(1));
        assert_eq!(array.last(), Some(3));
        assert!(array.contains(&3));
        assert!(!array.contains(&4));
    }

    #[test]
    fn test_set_and_remove() {
        let array = ThreadedArray::new(vec!['a', 'b', 'c', 'd'], AccessMode::Serial);
        array.set(0, 'z');
        array.remove(1);
        array.remove_first();
        array.remove_last();

        assert_eq!(array.unthreaded(), vec!['c']);
    }

    #[test]
    fn test_remove_then_delivers_element() {
        let array = ThreadedArray::from_vec(vec![10, 20, 30]);
        let (tx, rx) = flume::bounded(3);

        let first = tx.clone();
        array.remove_first_then(move |v| first.send(v).unwrap());
        let last = tx.clone();
        array.remove_last_then(move |v| last.send(v).unwrap());

        let mut removed = vec![
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        ];
        removed.sort();
        assert_eq!(removed, vec![10, 30]);
        assert_eq!(array.unthreaded(), vec![20]);
    }

    #[test]
    fn test_out_of_range_set_is_reported() {
        let array = ThreadedArray::from_vec(vec![1]);
        array.set(4, 9);
        array.flush();

        assert!(array.guarded().take_failure().is_some());
        assert_eq!(array.unthreaded(), vec![1]);
    }

    #[test]
    #[should_panic]
    fn test_at_out_of_range_panics() {
        let array: ThreadedArray<u8> = ThreadedArray::default();
        array.at(0);
    }

    #[test]
    fn test_map_and_for_each() {
        let array: ThreadedArray<i32> = (1..=3).collect();
        assert_eq!(array.map(|v| v * 2), vec![2, 4, 6]);

        let (tx, rx) = flume::unbounded();
        array.for_each(move |v| tx.send(*v).unwrap());
        assert_eq!(rx.drain().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_pop() {
        let array = ThreadedArray::from(vec![1, 2]);
        assert_eq!(array.pop(), Some(2));
        assert_eq!(array.pop(), Some(1));
        assert_eq!(array.pop(), None);
    }
}

/*!
 * Linked FIFO Queue
 * Singly-linked first-in first-out queue with O(1) enqueue and dequeue
 */

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Linked list node
///
/// A node logically owns its successor: dropping the queue releases the
/// chain starting at the head, one node at a time.
struct Node<T> {
    element: T,
    next: Option<NonNull<Node<T>>>,
}

impl<T> Node<T> {
    fn alloc(element: T) -> NonNull<Node<T>> {
        let boxed = Box::new(Node {
            element,
            next: None,
        });
        // SAFETY: Box::into_raw never returns null
        unsafe { NonNull::new_unchecked(Box::into_raw(boxed)) }
    }
}

/// Linked list implementation of a first-in first-out queue
///
/// Insertion and extraction are O(1). There is no random access: elements can
/// only be observed from the front, the back, or by traversing front to back.
///
/// # Invariants
///
/// - `len == 0` iff `head` and `tail` are both `None`
/// - following `next` from `head` reaches `tail` in exactly `len - 1` steps
///
/// # Example
///
/// ```
/// use threaded_collections::LinkedQueue;
///
/// let mut queue = LinkedQueue::new();
/// queue.enqueue(1);
/// queue.enqueue(2);
///
/// assert_eq!(queue.dequeue(), 1);
/// assert_eq!(queue.dequeue(), 2);
/// assert!(queue.is_empty());
/// ```
pub struct LinkedQueue<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

// SAFETY: the queue uniquely owns every node; sending or sharing it is as safe
// as sending or sharing the elements themselves
unsafe impl<T: Send> Send for LinkedQueue<T> {}
unsafe impl<T: Sync> Sync for LinkedQueue<T> {}

impl<T> LinkedQueue<T> {
    /// Create an empty queue
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Number of elements in the queue
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no elements in the queue
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First element of the queue, if any
    #[inline]
    pub fn front(&self) -> Option<&T> {
        // SAFETY: head, when present, points to a live node owned by self
        self.head.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    /// Last element of the queue, if any
    #[inline]
    pub fn back(&self) -> Option<&T> {
        // SAFETY: tail, when present, points to a live node owned by self
        self.tail.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    /// Append an element at the back
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn enqueue(&mut self, element: T) {
        let node = Node::alloc(element);
        match self.tail {
            // SAFETY: tail is the last live node; we hold &mut self
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Remove and return the front element
    ///
    /// # Panics
    ///
    /// Panics when the queue is empty. Use [`try_dequeue`](Self::try_dequeue)
    /// when the queue may be empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn dequeue(&mut self) -> T {
        match self.try_dequeue() {
            Some(element) => element,
            None => panic!("dequeue called on empty queue"),
        }
    }

    /// Remove and return the front element, or `None` if the queue is empty
    pub fn try_dequeue(&mut self) -> Option<T> {
        self.head.map(|head| {
            // SAFETY: head came from Node::alloc and is unlinked exactly once here
            let node = unsafe { Box::from_raw(head.as_ptr()) };
            self.head = node.next;
            if self.head.is_none() {
                self.tail = None;
            }
            self.len -= 1;
            node.element
        })
    }

    /// Remove every element
    pub fn clear(&mut self) {
        while self.try_dequeue().is_some() {}
    }

    /// Borrowing iterator from front to back
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Call `callback` on every element from front to back
    ///
    /// # Complexity
    ///
    /// O(n * x) where x is the cost of `callback`
    pub fn for_each<F>(&self, callback: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(callback);
    }

    /// Collect the result of `transform` applied to each element, in order
    pub fn map<U, F>(&self, transform: F) -> Vec<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(transform).collect()
    }
}

impl<T> Drop for LinkedQueue<T> {
    fn drop(&mut self) {
        // Iterative so long chains don't blow the stack
        self.clear();
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedQueue<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedQueue<T> {}

impl<T> FromIterator<T> for LinkedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T> Extend<T> for LinkedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.enqueue(element);
        }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Borrowing front-to-back iterator
pub struct Iter<'a, T> {
    next: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|node| {
            // SAFETY: the queue is borrowed for 'a so every reachable node is live
            let node = unsafe { &*node.as_ptr() };
            self.next = node.next;
            self.remaining -= 1;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning front-to-back iterator
pub struct IntoIter<T> {
    queue: LinkedQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.queue.try_dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { queue: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ============================================================================
// Serde (sequence form, front to back)
// ============================================================================

impl<T: Serialize> Serialize for LinkedQueue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for element in self.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for LinkedQueue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QueueVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for QueueVisitor<T> {
            type Value = LinkedQueue<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of queue elements")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut queue = LinkedQueue::new();
                while let Some(element) = seq.next_element()? {
                    queue.enqueue(element);
                }
                Ok(queue)
            }
        }

        deserializer.deserialize_seq(QueueVisitor(PhantomData))
    }
}

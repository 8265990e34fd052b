/*!
 * Linked Queue Tests
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use threaded_collections::LinkedQueue;

#[test]
fn test_two_element_scenario() {
    let mut queue = LinkedQueue::new();
    queue.enqueue(1);
    queue.enqueue(2);
    assert_eq!(queue.len(), 2);

    assert_eq!(queue.dequeue(), 1);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.dequeue(), 2);
    assert_eq!(queue.len(), 0);
    assert!(queue.is_empty());
}

#[test]
#[should_panic(expected = "dequeue called on empty queue")]
fn test_dequeue_on_empty_is_fatal() {
    let mut queue: LinkedQueue<String> = LinkedQueue::new();
    queue.enqueue("only".into());
    queue.dequeue();
    queue.dequeue();
}

#[test]
fn test_front_and_back_track_ends() {
    let mut queue = LinkedQueue::new();
    assert_eq!(queue.front(), None);

    queue.enqueue('a');
    queue.enqueue('b');
    queue.enqueue('c');
    assert_eq!(queue.front(), Some(&'a'));
    assert_eq!(queue.back(), Some(&'c'));

    queue.dequeue();
    assert_eq!(queue.front(), Some(&'b'));
    assert_eq!(queue.back(), Some(&'c'));
}

proptest! {
    #[test]
    fn prop_fifo_law(elements in proptest::collection::vec(any::<i64>(), 0..200)) {
        let mut queue: LinkedQueue<i64> = elements.iter().copied().collect();
        let mut out = Vec::new();
        for _ in 0..elements.len() {
            out.push(queue.dequeue());
        }
        prop_assert_eq!(out, elements);
        prop_assert!(queue.is_empty());
    }

    #[test]
    fn prop_len_is_enqueues_minus_dequeues(k in 0usize..100, j_seed in 0usize..100) {
        let j = if k == 0 { 0 } else { j_seed % (k + 1) };
        let mut queue = LinkedQueue::new();
        for i in 0..k {
            queue.enqueue(i);
        }
        for _ in 0..j {
            queue.dequeue();
        }
        prop_assert_eq!(queue.len(), k - j);
        prop_assert_eq!(queue.iter().count(), k - j);
        prop_assert_eq!(queue.front().copied(), if j < k { Some(j) } else { None });
    }

    #[test]
    fn prop_interleaved_matches_vecdeque(ops in proptest::collection::vec(any::<Option<u8>>(), 0..300)) {
        let mut queue = LinkedQueue::new();
        let mut model = std::collections::VecDeque::new();
        for op in ops {
            match op {
                Some(v) => {
                    queue.enqueue(v);
                    model.push_back(v);
                }
                None => {
                    prop_assert_eq!(queue.try_dequeue(), model.pop_front());
                }
            }
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.back(), model.back());
        }
        prop_assert_eq!(queue.map(|v| *v), model.into_iter().collect::<Vec<_>>());
    }
}

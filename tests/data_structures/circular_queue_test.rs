/*!
 * Circular Queue Tests
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use threaded_collections::CircularQueue;

/// Walk the physical buffer from start_index for len steps
fn physical_walk<T: Clone>(queue: &CircularQueue<T>) -> Vec<T> {
    let mut out = Vec::new();
    let mut i = queue.start_index();
    for logical in 0..queue.len() {
        assert!(queue.is_occupied(i), "slot {} should be occupied", i);
        out.push(queue.get(logical).cloned().unwrap());
        i = queue.index_after(i);
    }
    out
}

#[test]
fn test_capacity_two_scenario() {
    let mut queue = CircularQueue::with_capacity(2);
    queue.push(0);
    queue.push(1);
    queue.push(2);

    assert_eq!(queue.capacity(), 4);
    assert_eq!(queue.len(), 3);
    assert_eq!(physical_walk(&queue), vec![0, 1, 2]);
}

#[test]
fn test_default_capacity() {
    let queue: CircularQueue<u8> = CircularQueue::new();
    assert_eq!(queue.capacity(), threaded_collections::core::data_structures::DEFAULT_CAPACITY);
    assert!(queue.is_empty());
}

#[test]
fn test_fifo_across_wraparound_and_growth() {
    let mut queue = CircularQueue::with_capacity(3);
    let mut expected = std::collections::VecDeque::new();

    for round in 0..50 {
        for i in 0..(round % 5) {
            queue.push(round * 10 + i);
            expected.push_back(round * 10 + i);
        }
        for _ in 0..(round % 3) {
            assert_eq!(queue.pop(), expected.pop_front());
        }
    }
    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), Vec::from(expected));
}

proptest! {
    #[test]
    fn prop_growth_preserves_order(initial in 1usize..8, count in 0usize..300) {
        let mut queue = CircularQueue::with_capacity(initial);
        for i in 0..count {
            queue.push(i);
        }
        prop_assert_eq!(queue.len(), count);
        prop_assert!(queue.capacity() >= count);
        prop_assert!(queue.capacity() >= initial);
        prop_assert_eq!(physical_walk(&queue), (0..count).collect::<Vec<_>>());
    }

    #[test]
    fn prop_shrink_never_loses_elements(
        initial in 1usize..8,
        ops in proptest::collection::vec(any::<bool>(), 0..400),
    ) {
        let mut queue = CircularQueue::with_capacity(initial);
        let mut model = std::collections::VecDeque::new();
        let mut next = 0u32;

        for push in ops {
            if push {
                queue.push(next);
                model.push_back(next);
                next += 1;
            } else {
                prop_assert_eq!(queue.pop(), model.pop_front());
            }
            prop_assert!(queue.len() <= queue.capacity());
            prop_assert!(queue.capacity() >= initial);
            prop_assert_eq!(queue.len(), model.len());
        }
        prop_assert_eq!(physical_walk(&queue), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_shrink_to_fit_keeps_contents(count in 0usize..100, pops in 0usize..100) {
        let mut queue: CircularQueue<usize> = (0..count).collect();
        let pops = pops.min(count);
        for _ in 0..pops {
            queue.pop();
        }
        queue.shrink_to_fit();

        prop_assert_eq!(queue.capacity(), (count - pops).max(1));
        prop_assert_eq!(physical_walk(&queue), (pops..count).collect::<Vec<_>>());
    }
}

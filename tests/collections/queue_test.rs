/*!
 * Threaded Queue Tests
 */

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::thread;
use threaded_collections::{AccessMode, CircularQueue, LinkedQueue, ThreadedCollection, ThreadedQueue};

#[test]
fn test_multi_producer_multi_consumer() {
    let queue: ThreadedQueue<u32> = ThreadedQueue::default();

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let queue = queue.clone();
            thread::spawn(move || {
                for i in 0..250 {
                    queue.enqueue(p * 1000 + i);
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let queue = queue.clone();
            thread::spawn(move || {
                let mut taken = Vec::new();
                while let Some(v) = queue.safe_dequeue() {
                    taken.push(v);
                }
                taken
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for consumer in consumers {
        let taken = consumer.join().unwrap();
        // Each producer's items come out in the order it enqueued them
        for p in 0..4 {
            let mine: Vec<_> = taken.iter().filter(|v| *v / 1000 == p).collect();
            assert!(mine.windows(2).all(|w| w[0] < w[1]));
        }
        for v in taken {
            assert!(seen.insert(v));
        }
    }
    assert_eq!(seen.len(), 1000);
    assert!(queue.is_empty());
}

#[test]
fn test_snapshot_is_value_copy() {
    let queue: ThreadedQueue<i32> = ThreadedQueue::new(LinkedQueue::new(), AccessMode::Serial);
    queue.enqueue(1);
    queue.enqueue(2);

    let mut snapshot = queue.unthreaded();
    snapshot.dequeue();

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.map(|v| *v), vec![1, 2]);
    assert_eq!(serde_json::to_string(&snapshot).unwrap(), "[2]");
}

#[test]
fn test_ring_backed_queue_grows_under_load() {
    let queue: ThreadedQueue<usize, CircularQueue<usize>> =
        ThreadedQueue::from_queue(CircularQueue::with_capacity(4));
    for i in 0..100 {
        queue.enqueue(i);
    }
    assert_eq!(queue.len(), 100);
    assert!(queue.unthreaded().capacity() >= 100);

    let drained: Vec<_> = std::iter::from_fn(|| queue.safe_dequeue()).collect();
    assert_eq!(drained, (0..100).collect::<Vec<_>>());
    assert_eq!(queue.unthreaded().capacity(), 4);
}

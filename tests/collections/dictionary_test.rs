/*!
 * Threaded Dictionary Tests
 */

use pretty_assertions::assert_eq;
use std::thread;
use threaded_collections::{AccessMode, ThreadedCollection, ThreadedDictionary};

#[test]
fn test_parallel_writers_distinct_keys() {
    let dict: ThreadedDictionary<u32, u32> = ThreadedDictionary::default();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let dict = dict.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    dict.insert(t * 1000 + i, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(dict.len(), 200);
    assert_eq!(dict.get(&3049), Some(49));
}

#[test]
fn test_remove_returns_each_value_once() {
    let dict: ThreadedDictionary<u32, u32> = (0..100).map(|k| (k, k)).collect();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dict = dict.clone();
            thread::spawn(move || (0..100).filter_map(|k| dict.remove(k)).count())
        })
        .collect();

    let removed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(removed, 100);
    assert!(dict.is_empty());
}

#[test]
fn test_for_each_visits_every_entry() {
    let dict = ThreadedDictionary::new(
        [("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect(),
        AccessMode::Serial,
    );
    let (tx, rx) = flume::unbounded();
    dict.for_each(move |k, v| tx.send((k.clone(), *v)).unwrap());

    let mut seen: Vec<_> = rx.drain().collect();
    seen.sort();
    assert_eq!(seen, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
}

#[test]
fn test_unthreaded_snapshot_and_clear() {
    let dict: ThreadedDictionary<u8, &'static str> = ThreadedDictionary::default();
    dict.insert(1, "one");
    let snapshot = dict.unthreaded();
    dict.clear();

    assert_eq!(snapshot.get(&1), Some(&"one"));
    assert!(dict.is_empty());
}

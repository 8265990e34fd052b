/*!
 * Threaded Array Tests
 */

use pretty_assertions::assert_eq;
use std::thread;
use std::time::Duration;
use threaded_collections::{AccessMode, ThreadedArray, ThreadedCollection};

#[test]
fn test_concurrent_pushes_are_all_kept() {
    let array = ThreadedArray::default();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let array = array.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    array.push(t * 100 + i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut values = array.unthreaded();
    values.sort();
    assert_eq!(values, (0..800).collect::<Vec<_>>());
}

#[test]
fn test_per_thread_order_is_preserved() {
    let array = ThreadedArray::new(Vec::new(), AccessMode::Serial);
    for i in 0..50 {
        array.push(i);
    }
    assert_eq!(array.unthreaded(), (0..50).collect::<Vec<_>>());
}

#[test]
fn test_removal_callback_runs_off_caller_thread() {
    let array = ThreadedArray::from_vec(vec!["a", "b"]);
    let (tx, rx) = flume::bounded(1);
    let caller = thread::current().id();

    array.remove_then(1, move |removed| {
        tx.send((removed, thread::current().id())).unwrap();
    });

    let (removed, callback_thread) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(removed, "b");
    assert_ne!(callback_thread, caller);
    assert_eq!(array.len(), 1);
}

#[test]
fn test_remove_on_empty_is_reported_not_fatal() {
    let array: ThreadedArray<u8> = ThreadedArray::default();
    array.remove_last();
    array.flush();

    let failure = array.guarded().take_failure().unwrap();
    assert!(failure.to_string().contains("remove_last called on empty array"));
    assert!(array.is_empty());
}

#[test]
fn test_snapshot_serializes() {
    let array = ThreadedArray::from_vec(vec![1, 2, 3]);
    let json = serde_json::to_string(&array.unthreaded()).unwrap();
    assert_eq!(json, "[1,2,3]");
}

#[test]
fn test_contains_borrows_the_needle() {
    let names = ThreadedArray::from_vec(vec!["ada".to_string(), "grace".to_string()]);
    let needle = "grace".to_string();

    assert!(names.contains(&needle));
    assert!(!names.contains(&"alan".to_string()));
    // Still usable after the lookup
    names.push(needle);
    assert_eq!(names.len(), 3);
}

/*!
 * Atomic Tests
 */

use pretty_assertions::assert_eq;
use std::thread;
use threaded_collections::{AccessMode, Atomic};

#[test]
fn test_increment_from_many_threads() {
    for mode in [AccessMode::Concurrent, AccessMode::Serial] {
        let counter = Atomic::new(0i64, mode);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = counter.clone();
                thread::spawn(move || {
                    for _ in 0..125 {
                        counter.update(|n| *n += 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.load(), 1000, "mode {:?}", mode);
    }
}

#[test]
fn test_fetch_update_returns_previous() {
    let cell = Atomic::from_value(vec![1]);
    let before = cell.fetch_update(|v| {
        let len = v.len();
        v.push(2);
        len
    });
    assert_eq!(before, 1);
    assert_eq!(cell.load(), vec![1, 2]);
}

#[test]
fn test_display_reads_current_value() {
    let cell = Atomic::default();
    cell.store(3.5f64);
    assert_eq!(format!("{}", cell), "3.5");
}

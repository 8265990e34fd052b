/*!
 * Threaded Dictionary
 * Keyed map behind a guarded value
 */

use super::traits::ThreadedCollection;
use crate::core::sync::{AccessMode, GuardedValue};
use ahash::AHashMap;
use std::fmt;
use std::hash::Hash;

/// Thread-safe hash map
///
/// # Example
///
/// ```
/// use threaded_collections::ThreadedDictionary;
///
/// let scores = ThreadedDictionary::default();
/// scores.insert("alice", 3);
/// scores.set("bob", Some(5));
/// scores.set("alice", None);
///
/// assert_eq!(scores.get(&"bob"), Some(5));
/// assert_eq!(scores.get(&"alice"), None);
/// ```
pub struct ThreadedDictionary<K, V> {
    inner: GuardedValue<AHashMap<K, V>>,
}

impl<K, V> Clone for ThreadedDictionary<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> ThreadedDictionary<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(map: AHashMap<K, V>, mode: AccessMode) -> Self {
        Self {
            inner: GuardedValue::new(map, mode),
        }
    }

    /// Concurrent-mode dictionary holding `map`
    pub fn from_map(map: AHashMap<K, V>) -> Self {
        Self::new(map, AccessMode::Concurrent)
    }

    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.inner.mode()
    }

    // ------------------------------------------------------------------
    // Mutating
    // ------------------------------------------------------------------

    /// Insert or replace the value for `key`
    pub fn insert(&self, key: K, value: V) {
        self.inner.mutate(move |map| {
            map.insert(key, value);
        });
    }

    /// Store `value` under `key`; `None` removes the entry
    pub fn set(&self, key: K, value: Option<V>) {
        self.inner.mutate(move |map| match value {
            Some(value) => {
                map.insert(key, value);
            }
            None => {
                map.remove(&key);
            }
        });
    }

    /// Remove `key` and return its value
    pub fn remove(&self, key: K) -> Option<V> {
        self.inner.read_mutate(move |map| map.remove(&key))
    }

    /// Remove `key` and pass its former value to `callback` on the
    /// notification thread
    pub fn remove_then<C>(&self, key: K, callback: C)
    where
        C: FnOnce(Option<V>) + Send + 'static,
    {
        self.inner.mutate_then(move |map| map.remove(&key), callback);
    }

    pub fn clear(&self) {
        self.inner.mutate(|map| map.clear());
    }

    // ------------------------------------------------------------------
    // Non-mutating
    // ------------------------------------------------------------------

    /// Copy of the value stored under `key`
    pub fn get(&self, key: &K) -> Option<V> {
        let key = key.clone();
        self.inner.read(move |map| map.get(&key).cloned())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        let key = key.clone();
        self.inner.read(move |map| map.contains_key(&key))
    }

    /// Every key, in unspecified order
    pub fn keys(&self) -> Vec<K> {
        self.inner.read(|map| map.keys().cloned().collect())
    }

    /// Every value, in unspecified order
    pub fn values(&self) -> Vec<V> {
        self.inner.read(|map| map.values().cloned().collect())
    }

    /// New map with `transform` applied to every value
    pub fn map_values<U, F>(&self, mut transform: F) -> AHashMap<K, U>
    where
        F: FnMut(&V) -> U + Send + 'static,
        U: Send + 'static,
    {
        self.inner.read(move |map| {
            map.iter()
                .map(|(key, value)| (key.clone(), transform(value)))
                .collect()
        })
    }

    pub fn len(&self) -> usize {
        self.inner.read(|map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read(|map| map.is_empty())
    }

    /// Call `callback` on every entry, in unspecified order
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        self.inner.read(move |map| {
            for (key, value) in map.iter() {
                callback(key, value);
            }
        });
    }
}

impl<K, V> ThreadedCollection for ThreadedDictionary<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    type Unthreaded = AHashMap<K, V>;

    fn guarded(&self) -> &GuardedValue<AHashMap<K, V>> {
        &self.inner
    }
}

impl<K, V> Default for ThreadedDictionary<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::from_map(AHashMap::new())
    }
}

impl<K, V> FromIterator<(K, V)> for ThreadedDictionary<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<K, V> fmt::Debug for ThreadedDictionary<K, V>
where
    K: fmt::Debug + Eq + Hash + Clone + Send + Sync + 'static,
    V: fmt::Debug + Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.unthreaded().iter()).finish()
    }
}

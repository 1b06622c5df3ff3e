use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

pub const DEFAULT_TTL_HOURS: i64 = 6;

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub inserted_at: DateTime<Utc>,
}

/// Shared in-memory map whose entries expire a fixed time after insertion.
///
/// Expiry is lazy: a stale entry is removed only when `get` finds it. The
/// map is unbounded. Clones share the same entries.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_TTL_HOURS))
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.get_at(key, Utc::now())
    }

    pub fn get_at<Q>(&self, key: &Q, now: DateTime<Utc>) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        {
            let guard = self.entries.read();
            let entry = guard.get(key)?;
            if !self.is_expired(entry, now) {
                return Some(entry.value.clone());
            }
        }

        // Re-check under the write lock: a concurrent `set` may have
        // replaced the stale entry in between.
        let mut guard = self.entries.write();
        if guard
            .get(key)
            .is_some_and(|entry| self.is_expired(entry, now))
        {
            guard.remove(key);
        }
        None
    }

    pub fn set(&self, key: K, value: V) {
        self.set_at(key, value, Utc::now());
    }

    pub fn set_at(&self, key: K, value: V, inserted_at: DateTime<Utc>) {
        self.entries
            .write()
            .insert(key, CacheEntry { value, inserted_at });
    }

    /// Presence check that neither clones nor evicts.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: DateTime<Utc>) -> bool {
        now - entry.inserted_at > self.ttl
    }
}

//! Capacity-bounded memo shared by the gateways.

use log::debug;
use std::collections::{hash_map::Entry, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use tokio::sync::Mutex;

/// Default number of entries each gateway cache holds.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// A least-recently-used cache with a fixed entry limit.
///
/// All access goes through one async mutex; each lookup and each insert is a single
/// critical section. Callers are expected to do slow work (network calls) between a
/// missed [`get`](Self::get) and the following [`insert`](Self::insert), outside the lock.
///
/// A capacity of zero disables caching: nothing is ever stored.
pub struct BoundedCache<K, V> {
    capacity: usize,
    state: Mutex<CacheState<K, V>>,
}

struct CacheState<K, V> {
    entries: HashMap<K, Slot<V>>,
    clock: u64,
}

struct Slot<V> {
    value: V,
    last_used: u64,
}

impl<K, V> CacheState<K, V> {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState {
                entries: HashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
                clock: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a clone of the cached value and marks it as recently used.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock().await;
        let now = state.tick();
        let slot = state.entries.get_mut(key)?;
        slot.last_used = now;
        Some(slot.value.clone())
    }

    /// Stores `value` under `key` unless another caller filled the key first, in which case
    /// the stored value wins. Returns whichever value is now cached.
    ///
    /// Inserting a new key into a full cache evicts the least recently used entry.
    pub async fn insert(&self, key: K, value: V) -> V {
        if self.capacity == 0 {
            return value;
        }

        let mut state = self.state.lock().await;
        let now = state.tick();

        if !state.entries.contains_key(&key) && state.entries.len() >= self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                debug!("Cache full ({} entries), evicting {:?}", self.capacity, oldest);
                state.entries.remove(&oldest);
            }
        }

        match state.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                slot.last_used = now;
                slot.value.clone()
            }
            Entry::Vacant(entry) => {
                entry.insert(Slot {
                    value: value.clone(),
                    last_used: now,
                });
                value
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        self.state.lock().await.entries.clear();
    }
}

impl<K, V> Default for BoundedCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

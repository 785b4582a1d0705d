//! Process-local key→value cache with TTL expiration.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Cache key under which the departament list is stored.
pub const DEPARTAMENT_LIST_KEY: &str = "ListDepartaments";

/// Simple in-memory cache shared across requests.
///
/// Entries expire after a fixed TTL and are evicted lazily on read. Writes
/// are last-writer-wins; the mutex is the only coordination between
/// concurrent requests.
#[derive(Clone)]
pub struct MemoryCache<T: Clone> {
    ttl: Duration,
    storage: Arc<Mutex<HashMap<String, (T, Instant)>>>,
}

impl<T: Clone> MemoryCache<T> {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Look up a key, evicting it first if its TTL has elapsed.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut storage = self.storage.lock().unwrap();
        match storage.get(key) {
            Some((_, stored_at)) if stored_at.elapsed() >= self.ttl => {
                storage.remove(key);
                None
            }
            Some((value, _)) => Some(value.clone()),
            None => None,
        }
    }

    /// Store a value, replacing any previous entry for the key.
    pub fn set(&self, key: &str, value: T) {
        self.storage
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, Instant::now()));
    }

    /// Invalidate a key immediately.
    pub fn remove(&self, key: &str) {
        self.storage.lock().unwrap().remove(key);
    }
}

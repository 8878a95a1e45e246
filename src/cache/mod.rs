//! # Cache Layer
//!
//! A time-boxed response cache in front of the read endpoints. Two key
//! families: one entry per distinct list query string, one entry per book
//! id. Writes invalidate coarsely (any write clears the whole list family,
//! since any new or changed record can move any page/sort/search result).
//!
//! The cache is best-effort: its only failure mode (a poisoned lock) is
//! treated as a miss or no-op so a cache problem never fails a request.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde_json::Value;

/// Default entry time-to-live, five minutes
pub const DEFAULT_TTL_SECS: u64 = 300;

const LIST_PREFIX: &str = "books:list:";
const BOOK_PREFIX: &str = "books:id:";

/// Cache key for a list request, derived from the raw query string
pub fn list_key(query_string: &str) -> String {
    format!("{}{}", LIST_PREFIX, query_string)
}

/// Cache key for a single-book lookup
pub fn book_key(id: i64) -> String {
    format!("{}{}", BOOK_PREFIX, id)
}

struct Entry {
    payload: Value,
    expires_at: Instant,
}

impl Entry {
    fn new(payload: Value, ttl: Duration) -> Self {
        Self {
            payload,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Shared TTL cache of serialized response payloads
pub struct ResponseCache {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Cache with the default five-minute TTL
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Look up a payload; expired entries are dropped on read
    pub fn get(&self, key: &str) -> Option<Value> {
        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.payload.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: upgrade to a write lock to evict
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
        None
    }

    /// Store a payload under the configured TTL
    pub fn set(&self, key: &str, payload: Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), Entry::new(payload, self.ttl));
        }
    }

    /// Drop one key
    pub fn delete(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    /// Drop every cached list response
    pub fn invalidate_lists(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|key, _| !key.starts_with(LIST_PREFIX));
        }
    }

    /// Entry count, expired entries included until touched
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

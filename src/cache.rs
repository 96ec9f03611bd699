//! Tag-keyed read-through cache for the core API collections.
//!
//! Each collection query is tagged with a [`CacheTag`]. A successful fetch
//! stores the raw JSON under its tag and later reads are served from memory
//! until the tag is invalidated. Invalidation marks an entry stale instead of
//! dropping it, so callers can still show the old copy if the refetch fails.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config;

/// Logical resource names used as cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Kpis,
    Products,
    Transactions,
}

impl CacheTag {
    pub const ALL: [CacheTag; 3] = [CacheTag::Kpis, CacheTag::Products, CacheTag::Transactions];

    pub fn as_str(self) -> &'static str {
        match self {
            CacheTag::Kpis => "kpis",
            CacheTag::Products => "products",
            CacheTag::Transactions => "transactions",
        }
    }

    /// Path of the collection relative to the core API base URL.
    pub fn path(self) -> &'static str {
        match self {
            CacheTag::Kpis => config::KPIS_PATH,
            CacheTag::Products => config::PRODUCTS_PATH,
            CacheTag::Transactions => config::TRANSACTIONS_PATH,
        }
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    fetched_at: DateTime<Utc>,
    stale: bool,
}

/// In-memory store of fetched collections keyed by [`CacheTag`].
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<CacheTag, CacheEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `tag` if present and not invalidated.
    pub fn get(&self, tag: CacheTag) -> Option<&Value> {
        self.entries
            .get(&tag)
            .filter(|e| !e.stale)
            .map(|e| &e.value)
    }

    /// Return whatever is stored for `tag`, stale or not.
    pub fn peek(&self, tag: CacheTag) -> Option<&Value> {
        self.entries.get(&tag).map(|e| &e.value)
    }

    /// Store a freshly fetched value, replacing any previous entry.
    pub fn insert(&mut self, tag: CacheTag, value: Value) {
        self.entries.insert(
            tag,
            CacheEntry {
                value,
                fetched_at: Utc::now(),
                stale: false,
            },
        );
    }

    /// Mark `tag` stale so the next read refetches.
    ///
    /// Returns `true` if there was a fresh entry to invalidate.
    pub fn invalidate(&mut self, tag: CacheTag) -> bool {
        match self.entries.get_mut(&tag) {
            Some(entry) if !entry.stale => {
                entry.stale = true;
                true
            }
            _ => false,
        }
    }

    /// Mark every entry stale.
    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.stale = true;
        }
    }

    pub fn is_cached(&self, tag: CacheTag) -> bool {
        self.get(tag).is_some()
    }

    /// When the value stored for `tag` was fetched.
    pub fn fetched_at(&self, tag: CacheTag) -> Option<DateTime<Utc>> {
        self.entries.get(&tag).map(|e| e.fetched_at)
    }
}

//! Query cache
//!
//! Memoizes oracle answers per query for the lifetime of one session.
//! Hit/miss accounting lives in the session counters.

use crate::features::aliasing::domain::{AliasQuery, OracleAccessPath};
use lru::LruCache;
use rustc_hash::FxHashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Shared, immutable alias set
pub type AliasSet = Arc<FxHashSet<OracleAccessPath>>;

pub struct QueryCache {
    entries: LruCache<AliasQuery, AliasSet>,
}

impl QueryCache {
    /// Create a cache; `None` means unbounded
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        let entries = match capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self { entries }
    }

    pub fn get(&mut self, query: &AliasQuery) -> Option<AliasSet> {
        self.entries.get(query).map(Arc::clone)
    }

    pub fn insert(&mut self, query: AliasQuery, aliases: AliasSet) {
        self.entries.put(query, aliases);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

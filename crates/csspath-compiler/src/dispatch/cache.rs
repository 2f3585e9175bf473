use std::fmt;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::CompileOptions;

/// CRC-32 of the option fingerprint and the trimmed selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(u32);

impl CacheKey {
    pub fn new(selector: &str, options: &CompileOptions) -> Self {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(options.fingerprint().as_bytes());
        hasher.update(&[0]);
        hasher.update(selector.as_bytes());
        Self(hasher.finalize())
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// A compiled selector. The selector text is kept so a colliding key is a miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheEntry {
    pub selector: String,
    pub xpath: String,
}

/// Storage for compiled CSS selectors.
///
/// Compilation is deterministic, so concurrent writers of one key store the
/// same value and last-write-wins is enough.
pub trait SelectorCache: Send + Sync {
    fn get(&self, key: CacheKey) -> Option<CacheEntry>;
    fn set(&self, key: CacheKey, entry: CacheEntry);
    /// Snapshot in insertion order.
    fn entries(&self) -> Vec<(CacheKey, CacheEntry)>;
    fn replace(&self, entries: Vec<(CacheKey, CacheEntry)>);
    fn clear(&self);

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutex-guarded, insertion-ordered in-memory cache. Entries are never evicted.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<IndexMap<CacheKey, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compilation never leaves the map half-updated, so a poisoned lock is still usable.
    fn locked(&self) -> MutexGuard<'_, IndexMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SelectorCache for MemoryCache {
    fn get(&self, key: CacheKey) -> Option<CacheEntry> {
        self.locked().get(&key).cloned()
    }

    fn set(&self, key: CacheKey, entry: CacheEntry) {
        self.locked().insert(key, entry);
    }

    fn entries(&self) -> Vec<(CacheKey, CacheEntry)> {
        self.locked()
            .iter()
            .map(|(key, entry)| (*key, entry.clone()))
            .collect()
    }

    fn replace(&self, entries: Vec<(CacheKey, CacheEntry)>) {
        let mut locked = self.locked();
        locked.clear();
        locked.extend(entries);
    }

    fn clear(&self) {
        self.locked().clear();
    }

    fn len(&self) -> usize {
        self.locked().len()
    }
}

static GLOBAL_CACHE: LazyLock<std::sync::Arc<MemoryCache>> = LazyLock::new(|| {
    log::debug!("initializing global selector cache");
    std::sync::Arc::new(MemoryCache::new())
});

/// The process-wide cache behind [`Compiler::new`](super::Compiler::new).
pub fn global_cache() -> std::sync::Arc<MemoryCache> {
    GLOBAL_CACHE.clone()
}

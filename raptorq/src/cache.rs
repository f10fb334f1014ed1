//! Cache interface (spec §3, §4.11): lets a caller reuse a solved
//! intermediate-symbol replay matrix across calls that share the same
//! `Parameters` and received-ESI set, instead of re-running the solver.
//! Thread-safety is the implementation's job; `MemoryCache` here uses a
//! `Mutex<HashMap<..>>`, the same shape as the teacher's `MemoryPool`
//! (`rust/fec/src/lib.rs`).
use std::collections::HashMap;
use std::sync::Mutex;

/// Identifies a cacheable replay matrix: the block size and the set of
/// ESIs (sorted, source first) that produced it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    pub k: u32,
    pub esis: Vec<u32>,
}

impl CacheKey {
    pub fn new(k: u32, mut esis: Vec<u32>) -> Self {
        esis.sort_unstable();
        Self { k, esis }
    }
}

pub trait Cache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Vec<u8>>;
    fn put(&self, key: CacheKey, blob: Vec<u8>);
}

/// Above this many repair ESIs, entries are not cached: a replay matrix
/// built from a very large repair set is unlikely to be reused and would
/// otherwise dominate cache memory with one-shot entries.
pub const DEFAULT_CACHE_ESI_THRESHOLD: u32 = 256;

pub struct MemoryCache {
    threshold: u32,
    entries: Mutex<HashMap<CacheKey, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_ESI_THRESHOLD)
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<u8>> {
        let guard = self.entries.lock().ok()?;
        guard.get(key).cloned()
    }

    fn put(&self, key: CacheKey, blob: Vec<u8>) {
        if key.esis.iter().filter(|&&esi| esi >= key.k).count() as u32 > self.threshold {
            log::debug!("cache: skipping put for {} repair esis over threshold", key.esis.len());
            return;
        }
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key, blob);
        }
    }
}

use super::KvStore;

#[cfg(feature = "ahash")]
use ahash::AHashMap as HashMap;
#[cfg(not(feature = "ahash"))]
use std::collections::HashMap;

// Configuration constants
const DEFAULT_CAPACITY: usize = 64;
const CAPACITY_OVERHEAD_FACTOR: f64 = 1.3;

/// In-memory key-value store
///
/// Process-local storage for window records. State is lost when the
/// process exits, so rate limit windows start fresh on every launch.
/// Suitable for tests and for sessions where durability does not matter.
///
/// # Example
///
/// ```
/// use builder_engage::{KvStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("vote:u1:project", "{}").unwrap();
/// assert_eq!(store.get("vote:u1:project").unwrap().as_deref(), Some("{}"));
/// ```
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    /// Create a new store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new store sized for the expected number of keys
    ///
    /// The store allocates 30% more space to reduce hash collisions.
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            // Pre-allocate with overhead to avoid rehashing
            data: HashMap::with_capacity((capacity as f64 * CAPACITY_OVERHEAD_FACTOR) as usize),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

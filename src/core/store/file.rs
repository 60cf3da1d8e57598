use super::KvStore;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// JSON-file-backed key-value store
///
/// The durable counterpart of [`MemoryStore`](super::MemoryStore): the
/// whole map is kept as a single JSON object on disk, loaded when the
/// store is opened and rewritten on every `set`. Window records survive
/// restarts, so rate limits keep counting across sessions.
///
/// Concurrent writers are not coordinated. Two processes sharing one
/// file resolve last-write-wins on the entire map, the same way two
/// browser tabs race on a shared local-storage key.
///
/// # Example
///
/// ```no_run
/// use builder_engage::{FileStore, KvStore};
///
/// let mut store = FileStore::open("engage-state.json")?;
/// store.set("vote:u1:project", "{\"count\":1,\"resetAt\":0}")?;
/// # Ok::<(), String>(())
/// ```
pub struct FileStore {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a store backed by the given file, creating it on first write
    ///
    /// A missing file is treated as an empty store. A file that exists
    /// but does not parse as a JSON string map is an error; callers who
    /// want to discard corrupt state should delete the file first.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| format!("parse {}: {e}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(format!("read {}: {err}", path.display())),
        };
        Ok(FileStore { path, data })
    }

    /// Path of the backing file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self) -> Result<(), String> {
        let json = serde_json::to_string(&self.data)
            .map_err(|e| format!("encode {}: {e}", self.path.display()))?;
        fs::write(&self.path, json).map_err(|e| format!("write {}: {e}", self.path.display()))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.data.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

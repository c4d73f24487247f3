//! Historic date store implementations

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

use super::HistoricDateStore;

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryHistoricStore {
    dates: RwLock<BTreeMap<String, String>>,
}

impl MemoryHistoricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from `(asteroid id, date)` pairs
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let dates = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            dates: RwLock::new(dates),
        }
    }

    /// Copy of all stored entries
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.dates.read().clone()
    }
}

impl HistoricDateStore for MemoryHistoricStore {
    fn get(&self, asteroid_id: &str) -> Result<Option<String>> {
        Ok(self.dates.read().get(asteroid_id).cloned())
    }

    fn record(&self, asteroid_id: &str, orbit_date: &str) -> Result<()> {
        self.dates
            .write()
            .insert(asteroid_id.to_string(), orbit_date.to_string());
        Ok(())
    }

    fn len(&self) -> usize {
        self.dates.read().len()
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Store backed by a JSON object `{ "<asteroid id>": "<orbit date>" }`
///
/// Entries are held in memory and written on [`HistoricDateStore::flush`];
/// the file is replaced atomically through a temp file in the same directory.
#[derive(Debug)]
pub struct JsonFileHistoricStore {
    path: PathBuf,
    inner: MemoryHistoricStore,
    dirty: AtomicBool,
}

impl JsonFileHistoricStore {
    /// Open the store, loading the file when it exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries: BTreeMap<String, String> = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text).map_err(|e| {
                    Error::store(format!("Failed to parse '{}': {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            "Opened history store {} with {} entries",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            inner: MemoryHistoricStore::with_entries(entries),
            dirty: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner.snapshot()
    }

    fn write_file(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let body = serde_json::to_vec_pretty(&self.inner.snapshot())?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&body)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| {
            Error::store(format!("Failed to replace '{}': {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

impl HistoricDateStore for JsonFileHistoricStore {
    fn get(&self, asteroid_id: &str) -> Result<Option<String>> {
        self.inner.get(asteroid_id)
    }

    fn record(&self, asteroid_id: &str, orbit_date: &str) -> Result<()> {
        self.inner.record(asteroid_id, orbit_date)?;
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn flush(&self) -> Result<()> {
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        if let Err(e) = self.write_file() {
            self.dirty.store(true, Ordering::Release);
            return Err(e);
        }
        tracing::info!("Saved {} history entries to {}", self.len(), self.path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryHistoricStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("2000433").unwrap(), None);

        store.record("2000433", "2021-05-24 17:55:05").unwrap();
        store.record("2000433", "2022-01-01 00:00:00").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("2000433").unwrap().as_deref(), Some("2022-01-01 00:00:00"));
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let store = JsonFileHistoricStore::open(&path).unwrap();
        assert!(store.is_empty());
        store.record("a", "2001-01-05 12:00:00").unwrap();
        store.record("b", "2001-01-06 12:00:00").unwrap();
        store.flush().unwrap();

        let reopened = JsonFileHistoricStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2001-01-06 12:00:00"));
    }

    #[test]
    fn test_flush_without_changes_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonFileHistoricStore::open(&path).unwrap();
        store.flush().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let err = JsonFileHistoricStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "\n").unwrap();
        let store = JsonFileHistoricStore::open(&path).unwrap();
        assert!(store.is_empty());
    }
}

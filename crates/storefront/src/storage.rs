//! Key-value storage backends for the cart.
//!
//! The cart needs exactly what browser `localStorage` offers: string values
//! under string keys, read and written synchronously. [`KeyValueStorage`] is
//! that contract; the backends here are an in-memory map, a JSON file, and a
//! wrapper that degrades to memory when its primary backend stops accepting
//! writes.

use std::collections::{BTreeMap, HashMap};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Storage file {path} is not a JSON object of strings: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous string key-value storage.
pub trait KeyValueStorage {
    /// Value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written. The previous value
    /// must still be in place when this fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

// =============================================================================
// Memory
// =============================================================================

/// Transient storage that lives as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File
// =============================================================================

/// Storage persisted as a JSON object of string values in a single file.
///
/// Every write replaces the whole file through a uniquely named temporary
/// sibling and a rename, so readers see either the old or the new content.
/// A missing or empty file reads as an empty store. A file that is not a JSON
/// object of strings fails reads, and is overwritten by the next write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Current entries as the base for a write. A malformed file is
    /// replaced rather than blocking every later write.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_all() {
            Err(e @ StorageError::Format { .. }) => {
                tracing::warn!(error = %e, "Discarding malformed storage file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };

        let json = serde_json::to_string_pretty(entries).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;

        // Dropped without persisting on any error, which deletes it.
        let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
        temp_file.write_all(json.as_bytes()).map_err(io_err)?;
        temp_file
            .persist(&self.path)
            .map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_for_update()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&entries)
    }
}

// =============================================================================
// Fallback
// =============================================================================

/// Wraps a primary backend and switches to memory after its first failed
/// write.
///
/// Once degraded, the wrapper never goes back to the primary for the rest of
/// its lifetime; reads and writes are served from memory only.
#[derive(Debug)]
pub struct FallbackStorage<S> {
    primary: S,
    fallback: Option<MemoryStorage>,
}

impl<S: KeyValueStorage> FallbackStorage<S> {
    pub const fn new(primary: S) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Whether writes are currently going to memory.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    #[must_use]
    pub const fn primary(&self) -> &S {
        &self.primary
    }

    /// Switch to memory, seeding it with whatever the primary can still
    /// return for `key`.
    fn degrade(&mut self, key: &str, error: &StorageError) -> &mut MemoryStorage {
        tracing::warn!(error = %error, "Storage write failed, keeping data in memory for this session");
        let seed = self.primary.get(key).ok().flatten();
        self.fallback.get_or_insert_with(|| {
            let mut memory = MemoryStorage::new();
            if let Some(value) = seed {
                memory.entries.insert(key.to_string(), value);
            }
            memory
        })
    }
}

impl<S: KeyValueStorage> KeyValueStorage for FallbackStorage<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.fallback {
            Some(memory) => memory.get(key),
            None => self.primary.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(memory) = &mut self.fallback {
            return memory.set(key, value);
        }
        match self.primary.set(key, value) {
            Ok(()) => Ok(()),
            Err(e) => self.degrade(key, &e).set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if let Some(memory) = &mut self.fallback {
            return memory.remove(key);
        }
        match self.primary.remove(key) {
            Ok(()) => Ok(()),
            Err(e) => self.degrade(key, &e).remove(key),
        }
    }
}

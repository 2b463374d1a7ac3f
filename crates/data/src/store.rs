//! [`LocalStore`] implementations.
//!
//! - [`MemoryStore`]: process-local, for tests and ephemeral sessions.
//! - [`JsonFileStore`]: one JSON document per slot on disk. Each write goes to
//!   its own uniquely named sibling temporary file, is synced, and is then
//!   renamed over the target. Readers only ever see a complete document, even
//!   with several writers on one slot.

use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use model::{LocalStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

pub struct MemoryStore<T> {
    slot: Mutex<Option<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    pub fn with_value(value: T) -> Self {
        Self {
            slot: Mutex::new(Some(value)),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> LocalStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn read(&self) -> Result<Option<T>, StoreError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn write(&self, value: &T) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// Slot persisted as a JSON file.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _value: PhantomData,
        }
    }

    /// Slot named `file_name` inside `directory`.
    pub fn in_dir(directory: impl AsRef<Path>, file_name: &str) -> Self {
        Self::new(directory.as_ref().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes `bytes` to `path` through a synced temporary file in the same
/// directory.
///
/// Temporary names are unique per write, so concurrent writers never share a
/// partially written file. A failed write removes its temporary file.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|error| StoreError::io(parent, error))?;

    let prefix = match path.file_name() {
        Some(name) => format!(".{}.", name.to_string_lossy()),
        None => ".slot.".to_owned(),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|error| StoreError::io(parent, error))?;
    temp.write_all(bytes)
        .map_err(|error| StoreError::io(temp.path(), error))?;
    temp.as_file()
        .sync_all()
        .map_err(|error| StoreError::io(temp.path(), error))?;
    temp.persist(path)
        .map_err(|error| StoreError::io(path, error.error))?;
    Ok(())
}

#[async_trait]
impl<T> LocalStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn read(&self) -> Result<Option<T>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StoreError::io(&self.path, error)),
        }
    }

    async fn write(&self, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let path = self.path.clone();
        // Runs to completion even if this future is dropped; the rename is the
        // only step visible to readers.
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|error| StoreError::io(&self.path, std::io::Error::other(error)))??;
        tracing::trace!(path = %self.path.display(), "slot written");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StoreError::io(&self.path, error)),
        }
    }
}

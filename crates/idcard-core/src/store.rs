//! # Record Store
//!
//! A single JSON array persisted at a fixed path, pretty-printed with
//! two-space indentation and non-ASCII text kept literal.
//!
//! ## Read Rule
//!
//! [`RecordStore::load`] never fails: a missing, empty, malformed, or
//! non-array file reads as an empty sequence. The next
//! [`RecordStore::append`] then replaces the unreadable content with a valid
//! array holding only the new entry.
//!
//! ## Writes
//!
//! `append` runs read-modify-write under an in-process mutex so concurrent
//! submissions within one server do not clobber each other. The new array is
//! written to a temporary file in the same directory and renamed over the
//! store, so a crash mid-write leaves the previous file intact. Separate
//! processes sharing one store file are not coordinated.
//!
//! Every JSON object in the array is listed by `load`, with missing keys
//! read as blank (see [`Entry`]). Elements that are not objects are skipped
//! by `load` but carried through `append` untouched.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::entry::Entry;
use crate::error::StoreError;

/// Handle to the on-disk entry array. Clones share the same write lock.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl RecordStore {
    /// Create a handle for the store at `path`. The file need not exist.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Location of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry in insertion order.
    pub fn load(&self) -> Vec<Entry> {
        self.load_raw()
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable store element");
                    None
                }
            })
            .collect()
    }

    /// Append `entry` and rewrite the whole file. Returns the new element count.
    pub fn append(&self, entry: &Entry) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock();
        let mut items = self.load_raw();
        items.push(serde_json::to_value(entry)?);
        self.write_all(&items)?;
        Ok(items.len())
    }

    fn load_raw(&self) -> Vec<Value> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "record store unreadable, treating as empty");
                return Vec::new();
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "record store is not a JSON array, treating as empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "record store is not valid JSON, treating as empty");
                Vec::new()
            }
        }
    }

    fn write_all(&self, items: &[Value]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        serde_json::to_writer_pretty(&mut tmp, items)?;
        tmp.flush().map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

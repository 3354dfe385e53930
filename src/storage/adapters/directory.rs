//! Directory-backed key/value store.
//!
//! Each key maps to one `<key>.json` file inside a capability-scoped
//! directory. Writes go to a temporary sibling first and are renamed into
//! place, so readers never observe a half-written blob.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Mutex;

use crate::storage::{KeyValueStore, StorageError, StorageKey, StorageResult};

const FILE_EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = "tmp";

/// Key/value store persisting each record as a file in one directory.
#[derive(Debug)]
pub struct DirectoryKeyValueStore {
    dir: Dir,
    write_lock: Mutex<()>,
}

impl DirectoryKeyValueStore {
    /// Opens (creating if needed) the store rooted at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(StorageError::unavailable)?;
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(StorageError::unavailable)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory capability.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self {
            dir,
            write_lock: Mutex::new(()),
        }
    }

    fn file_name(key: &StorageKey) -> String {
        format!("{}.{FILE_EXTENSION}", key.as_key())
    }
}

impl KeyValueStore for DirectoryKeyValueStore {
    fn get(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        match self.dir.read_to_string(Self::file_name(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::unavailable(err)),
        }
    }

    fn set(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|err| StorageError::unavailable(std::io::Error::other(err.to_string())))?;
        let target = Self::file_name(key);
        let staging = format!("{target}.{TEMP_SUFFIX}");
        self.dir
            .write(&staging, value)
            .map_err(StorageError::unavailable)?;
        self.dir
            .rename(&staging, &self.dir, &target)
            .map_err(StorageError::unavailable)
    }

    fn remove(&self, key: &StorageKey) -> StorageResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|err| StorageError::unavailable(std::io::Error::other(err.to_string())))?;
        match self.dir.remove_file(Self::file_name(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::unavailable(err)),
        }
    }
}

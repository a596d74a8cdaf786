//! File storage

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{CartStorage, StorageError, validate_slot};

/// File Storage
///
/// Each slot is a JSON file inside one directory. Writes go to a temporary file next to the
/// target which is then renamed over it, so a failed write never leaves a truncated value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidSlot`] if the slot name is invalid.
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        validate_slot(slot)?;

        Ok(self.dir.join(format!("{slot}.json")))
    }

    fn replace(&self, path: &Path, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let mut file = NamedTempFile::new_in(&self.dir)?;

        file.write_all(value.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|error| error.error)?;

        Ok(())
    }
}

impl CartStorage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                slot: slot.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;

        self.replace(&path, value)
            .map_err(|source| StorageError::Write {
                slot: slot.to_string(),
                source,
            })?;

        debug!(slot, path = %path.display(), bytes = value.len(), "wrote slot");

        Ok(())
    }
}

//! Storage
//!
//! A key-value seam for persisted state. Each named slot holds one serialized value, always
//! replaced as a whole.

use std::io;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Slot names must be non-empty ASCII alphanumerics, `-` or `_`.
    #[error("invalid slot name {0:?}")]
    InvalidSlot(String),

    /// Reading a slot failed.
    #[error("failed to read slot {slot:?}")]
    Read {
        /// Slot name
        slot: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Writing a slot failed. The previous value is left in place.
    #[error("failed to write slot {slot:?}")]
    Write {
        /// Slot name
        slot: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The value could not be serialized.
    #[error("failed to encode value")]
    Encode(#[from] serde_json::Error),
}

/// Cart Storage
///
/// Reads and whole-value writes of named slots.
#[cfg_attr(test, mockall::automock)]
pub trait CartStorage {
    /// Read the value held in `slot`, or `None` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot name is invalid or the backend cannot be read.
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value held in `slot`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot name is invalid or the write did not complete; the
    /// previous value must then be left untouched.
    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError>;
}

/// Check a slot name.
///
/// # Errors
///
/// Returns [`StorageError::InvalidSlot`] for empty names or names with characters other than
/// ASCII alphanumerics, `-` and `_`.
pub fn validate_slot(slot: &str) -> Result<(), StorageError> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidSlot(slot.to_string()))
    }
}

//! In-memory storage

use rustc_hash::FxHashMap;

use super::{CartStorage, StorageError, validate_slot};

/// Memory Storage
///
/// Slots live for as long as the value does. Clones share nothing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with `slot` already holding `value`.
    #[must_use]
    pub fn with_slot(slot: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = FxHashMap::default();
        slots.insert(slot.into(), value.into());

        Self { slots }
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        validate_slot(slot)?;

        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        validate_slot(slot)?;

        self.slots.insert(slot.to_string(), value.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unwritten_slot_reads_as_none() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.read("cart")?, None);

        Ok(())
    }

    #[test]
    fn writes_replace_the_whole_value() -> TestResult {
        let mut storage = MemoryStorage::with_slot("cart", "[1]");

        storage.write("cart", "[]")?;

        assert_eq!(storage.read("cart")?.as_deref(), Some("[]"));

        Ok(())
    }
}

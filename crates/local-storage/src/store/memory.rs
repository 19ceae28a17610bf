use std::{collections::HashMap, sync::RwLock};

use super::{PlatformStore, StoreError};
use crate::StoredValue;

/// A [`PlatformStore`] that keeps values in memory for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, StoredValue>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish()
    }
}

impl MemoryStore {
    /// Creates a new empty `MemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlatformStore for MemoryStore {
    fn get_value(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        Ok(self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .get(key)
            .cloned())
    }

    fn set_value(&self, key: &str, value: Option<StoredValue>) -> Result<(), StoreError> {
        let mut values = self.values.write().expect("RwLock should not be poisoned");
        match value {
            Some(value) => {
                values.insert(key.to_owned(), value);
            }
            None => {
                values.remove(key);
            }
        }
        Ok(())
    }
}

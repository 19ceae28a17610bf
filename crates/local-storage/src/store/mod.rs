//! Platform persistence primitives.
//!
//! A [`PlatformStore`] is the string-keyed store the [`LocalStorage`](crate::LocalStorage) facade
//! delegates to. The crate ships one in-memory backend and one persistent backend per target,
//! selected through [`StoreConfiguration`].

use std::{path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::StoredValue;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod sqlite;
#[cfg(not(target_arch = "wasm32"))]
pub use sqlite::SqliteStore;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::WebLocalStorage;

/// An error raised by a [`PlatformStore`] backend.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store not supported on this platform: {0:?}")]
    UnsupportedConfiguration(StoreConfiguration),

    #[error("Suite name '{0}' must contain only alphabetic characters and underscores")]
    InvalidSuiteName(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[cfg(not(target_arch = "wasm32"))]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// A string-keyed persistent store holding [`StoredValue`]s.
///
/// Implementations provide their own internal locking, the facade adds none.
pub trait PlatformStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get_value(&self, key: &str) -> Result<Option<StoredValue>, StoreError>;

    /// Writes `value` under `key`. `None` removes the slot.
    fn set_value(&self, key: &str, value: Option<StoredValue>) -> Result<(), StoreError>;

    /// Reads the boolean stored under `key`, `false` when absent or not a boolean.
    fn get_bool(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self
            .get_value(key)?
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }

    /// Reads the string stored under `key`, `None` when absent or not a string.
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .get_value(key)?
            .and_then(|value| value.as_str().map(str::to_owned)))
    }
}

/// Configuration for the backend behind a [`LocalStorage`](crate::LocalStorage).
///
/// Deserializable so applications can embed it in their own configuration files:
///
/// ```json
/// { "backend": "sqlite", "folder_path": "/var/lib/app", "db_name": "prefs", "suite": "standard" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfiguration {
    /// Values live only as long as the process.
    Memory,

    /// SQLite configuration, used on native platforms
    Sqlite {
        /// Folder holding the database file.
        folder_path: PathBuf,
        /// The database file is `{folder_path}/{db_name}.sqlite`. Stores for different users
        /// should use different files.
        db_name: String,
        /// Table the values are kept in, so several suites can share one file.
        #[serde(default = "default_suite")]
        suite: String,
    },

    /// Browser `localStorage`, used on WebAssembly platforms
    WebLocalStorage {
        /// Prefix applied to every key as `{suite}.{key}`. Keys are used as-is when unset.
        #[serde(default)]
        suite: Option<String>,
    },
}

fn default_suite() -> String {
    crate::DEFAULT_SUITE.to_owned()
}

impl StoreConfiguration {
    /// SQLite configuration using the default suite.
    pub fn sqlite(folder_path: impl Into<PathBuf>, db_name: impl Into<String>) -> Self {
        StoreConfiguration::Sqlite {
            folder_path: folder_path.into(),
            db_name: db_name.into(),
            suite: default_suite(),
        }
    }

    /// Builds the configured backend.
    pub fn open(self) -> Result<Arc<dyn PlatformStore>, StoreError> {
        tracing::debug!(configuration = ?self, "Opening local storage");

        match self {
            StoreConfiguration::Memory => Ok(Arc::new(MemoryStore::new())),

            #[cfg(not(target_arch = "wasm32"))]
            StoreConfiguration::Sqlite {
                folder_path,
                db_name,
                suite,
            } => Ok(Arc::new(SqliteStore::open(
                folder_path.join(format!("{db_name}.sqlite")),
                &suite,
            )?)),

            #[cfg(target_arch = "wasm32")]
            StoreConfiguration::WebLocalStorage { suite } => {
                Ok(Arc::new(WebLocalStorage::open(suite)?))
            }

            configuration => Err(StoreError::UnsupportedConfiguration(configuration)),
        }
    }
}

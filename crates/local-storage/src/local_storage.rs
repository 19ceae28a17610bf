//! The typed facade over a [`PlatformStore`].

use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    codec,
    store::{MemoryStore, PlatformStore, StoreConfiguration, StoreError},
    StorageKey, StoredValue,
};

/// Errors reported by the `try_` operations of [`LocalStorage`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend failed to read or write
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The slot holds a value of another type than the one requested
    #[error("Value stored under '{key}' is {found}, expected {expected}")]
    TypeMismatch {
        /// Rendered key of the slot.
        key: String,
        /// Variant the operation needs.
        expected: &'static str,
        /// Variant found in the slot.
        found: &'static str,
    },
    /// The value could not be encoded
    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        /// Rendered key of the slot.
        key: String,
        /// Underlying encoder error.
        source: serde_json::Error,
    },
    /// The stored bytes could not be decoded into the requested type
    #[error("Failed to decode value stored under '{key}': {source}")]
    Decode {
        /// Rendered key of the slot.
        key: String,
        /// Underlying decoder error.
        source: serde_json::Error,
    },
}

/// Typed read/write access to a string-keyed [`PlatformStore`].
///
/// Every operation maps to a single read or write against the store, nothing is cached between
/// calls. The plain operations never fail: a missing key, a value of the wrong type, malformed
/// bytes or a backend error all degrade to `None`, `false` or the supplied default, and failed
/// writes are skipped. Apart from `get_decodable_or`, each of them has a `try_` twin reporting the
/// failure instead.
///
/// The facade holds no logic beyond key rendering and encoding, so it is a concrete type rather
/// than a trait. Substitute the [`PlatformStore`] it wraps to fake or mock storage, for example
/// in tests.
///
/// # Example
/// ```rust
/// use local_storage::LocalStorage;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Window {
///     width: u32,
///     height: u32,
/// }
///
/// let storage: LocalStorage = LocalStorage::in_memory();
///
/// storage.set_raw(Some(true.into()), "onboarded");
/// assert!(storage.get_bool("onboarded"));
///
/// storage.set_codable("window", &Window { width: 800, height: 600 });
/// assert_eq!(
///     storage.get_decodable::<Window>("window"),
///     Some(Window { width: 800, height: 600 })
/// );
/// ```
pub struct LocalStorage<K: ?Sized = str> {
    store: Arc<dyn PlatformStore>,
    _key: PhantomData<fn(&K)>,
}

impl<K: ?Sized> Clone for LocalStorage<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _key: PhantomData,
        }
    }
}

impl<K: ?Sized> std::fmt::Debug for LocalStorage<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage").finish()
    }
}

impl<K: StorageKey + ?Sized> LocalStorage<K> {
    /// Wraps an existing store.
    pub fn new(store: Arc<dyn PlatformStore>) -> Self {
        Self {
            store,
            _key: PhantomData,
        }
    }

    /// Builds the backend described by `configuration`.
    pub fn open(configuration: StoreConfiguration) -> Result<Self, StorageError> {
        Ok(Self::new(configuration.open()?))
    }

    /// A facade over a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// A facade using another key type over the same store.
    pub fn with_key<K2: StorageKey + ?Sized>(&self) -> LocalStorage<K2> {
        LocalStorage::new(Arc::clone(self.store()))
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn PlatformStore> {
        &self.store
    }

    /// Writes a raw value under `key`. `None` clears the slot.
    pub fn set_raw(&self, value: Option<StoredValue>, key: &K) {
        if let Err(e) = self.try_set_raw(value, key) {
            warn!("Failed to write '{}': {}", key.storage_key(), e);
        }
    }

    /// Writes a raw value under `key`, reporting backend failures.
    pub fn try_set_raw(&self, value: Option<StoredValue>, key: &K) -> Result<(), StorageError> {
        self.store.set_value(&key.storage_key(), value)?;
        Ok(())
    }

    /// Reads the raw value under `key`, `None` if it was never set.
    pub fn get_raw(&self, key: &K) -> Option<StoredValue> {
        self.try_get_raw(key).unwrap_or_else(|e| {
            warn!("Failed to read '{}': {}", key.storage_key(), e);
            None
        })
    }

    /// Reads the raw value under `key`, reporting backend failures.
    pub fn try_get_raw(&self, key: &K) -> Result<Option<StoredValue>, StorageError> {
        Ok(self.store.get_value(&key.storage_key())?)
    }

    /// Reads the boolean under `key`, `false` when absent or not a boolean.
    pub fn get_bool(&self, key: &K) -> bool {
        let key = key.storage_key();
        self.store.get_bool(&key).unwrap_or_else(|e| {
            warn!("Failed to read '{}': {}", key, e);
            false
        })
    }

    /// Reads the boolean under `key`. Absent keys are `false`, other types are an error.
    pub fn try_get_bool(&self, key: &K) -> Result<bool, StorageError> {
        let key = key.storage_key();
        match self.store.get_value(&key)? {
            None => Ok(false),
            Some(StoredValue::Bool(b)) => Ok(b),
            Some(other) => Err(mismatch(&key, "Bool", &other)),
        }
    }

    /// Reads the string under `key`, `None` when absent or not a string.
    pub fn get_string(&self, key: &K) -> Option<String> {
        let key = key.storage_key();
        self.store.get_string(&key).unwrap_or_else(|e| {
            warn!("Failed to read '{}': {}", key, e);
            None
        })
    }

    /// Reads the string under `key`. Absent keys are `None`, other types are an error.
    pub fn try_get_string(&self, key: &K) -> Result<Option<String>, StorageError> {
        let key = key.storage_key();
        match self.store.get_value(&key)? {
            None => Ok(None),
            Some(StoredValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(mismatch(&key, "String", &other)),
        }
    }

    /// Encodes `value` and writes the bytes under `key`.
    ///
    /// If encoding fails nothing is written and the previous value, if any, is kept.
    pub fn set_codable<T: Serialize + ?Sized>(&self, key: &K, value: &T) {
        if let Err(e) = self.try_set_codable(key, value) {
            warn!("Skipped write of '{}': {}", key.storage_key(), e);
        }
    }

    /// Encodes `value` and writes the bytes under `key`, reporting failures.
    pub fn try_set_codable<T: Serialize + ?Sized>(
        &self,
        key: &K,
        value: &T,
    ) -> Result<(), StorageError> {
        let key = key.storage_key();
        let bytes = codec::encode(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set_value(&key, Some(StoredValue::Bytes(bytes)))?;
        Ok(())
    }

    /// Decodes the value under `key`.
    ///
    /// Returns `None` if the key doesn't exist, doesn't hold bytes, or the bytes don't decode
    /// into `T`. Failures other than a missing key are logged.
    pub fn get_decodable<T: DeserializeOwned>(&self, key: &K) -> Option<T> {
        self.try_get_decodable(key).unwrap_or_else(|e| {
            warn!("Failed to decode '{}': {}", key.storage_key(), e);
            None
        })
    }

    /// Decodes the value under `key`, or returns `default` on any failure.
    pub fn get_decodable_or<T: DeserializeOwned>(&self, key: &K, default: T) -> T {
        self.get_decodable(key).unwrap_or(default)
    }

    /// Decodes the value under `key`. Absent keys are `None`, everything else that prevents
    /// decoding is an error.
    pub fn try_get_decodable<T: DeserializeOwned>(
        &self,
        key: &K,
    ) -> Result<Option<T>, StorageError> {
        let key = key.storage_key();
        let Some(value) = self.store.get_value(&key)? else {
            return Ok(None);
        };
        let bytes = value
            .as_bytes()
            .ok_or_else(|| mismatch(&key, "Bytes", &value))?;

        codec::decode(bytes)
            .map(Some)
            .map_err(|source| StorageError::Decode {
                key: key.to_string(),
                source,
            })
    }
}

fn mismatch(key: &str, expected: &'static str, found: &StoredValue) -> StorageError {
    StorageError::TypeMismatch {
        key: key.to_owned(),
        expected,
        found: found.type_name(),
    }
}

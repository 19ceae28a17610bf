use super::{PlatformStore, StoreError};
use crate::{validate_suite_name, StoredValue};

/// A [`PlatformStore`] backed by the browser's `window.localStorage`.
///
/// The browser only holds strings, so values are kept as the JSON rendering of a
/// [`StoredValue`]. The `Storage` handle is looked up on every call since it can't be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct WebLocalStorage {
    suite: Option<String>,
}

impl WebLocalStorage {
    /// Checks that `localStorage` is reachable and returns a store prefixing keys with `suite`.
    pub fn open(suite: Option<String>) -> Result<Self, StoreError> {
        if let Some(suite) = &suite {
            if !validate_suite_name(suite) {
                return Err(StoreError::InvalidSuiteName(suite.clone()));
            }
        }

        Self::storage()?;
        Ok(WebLocalStorage { suite })
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no global `window`".to_owned()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("`localStorage` is disabled".to_owned()))
    }

    fn item_key(&self, key: &str) -> String {
        match &self.suite {
            Some(suite) => format!("{suite}.{key}"),
            None => key.to_owned(),
        }
    }
}

impl PlatformStore for WebLocalStorage {
    fn get_value(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let item = Self::storage()?
            .get_item(&self.item_key(key))
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;

        match item {
            Some(item) => Ok(Some(serde_json::from_str(&item)?)),
            None => Ok(None),
        }
    }

    fn set_value(&self, key: &str, value: Option<StoredValue>) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let key = self.item_key(key);

        let result = match value {
            Some(value) => storage.set_item(&key, &serde_json::to_string(&value)?),
            None => storage.remove_item(&key),
        };
        result.map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}

#![doc = include_str!("../README.md")]

pub mod codec;

mod key;
mod local_storage;

pub mod store;

mod value;

pub use key::{validate_suite_name, StorageKey, DEFAULT_SUITE};
pub use local_storage::{LocalStorage, StorageError};
#[cfg(not(target_arch = "wasm32"))]
pub use store::SqliteStore;
#[cfg(target_arch = "wasm32")]
pub use store::WebLocalStorage;
pub use store::{MemoryStore, PlatformStore, StoreConfiguration, StoreError};
pub use value::StoredValue;

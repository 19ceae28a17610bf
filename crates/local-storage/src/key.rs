//! Keys addressing slots in a [`PlatformStore`](crate::PlatformStore).

use std::borrow::Cow;

/// A value that renders to a stable, unique string used as the storage slot name.
///
/// The store only ever sees the rendered string. Two keys with the same rendering address the
/// same slot, so the rendering must stay unique and stable across process restarts. Collisions
/// are a bug in the caller, not in the store.
///
/// Use the [`register_storage_key!`](crate::register_storage_key) macro to implement this for a
/// type that already implements [`Display`](std::fmt::Display).
pub trait StorageKey {
    /// The string this key is stored under.
    fn storage_key(&self) -> Cow<'_, str>;
}

impl StorageKey for str {
    fn storage_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl StorageKey for String {
    fn storage_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// Register a type as a [`StorageKey`] rendered through its [`Display`](std::fmt::Display)
/// implementation.
///
/// # Example
/// ```rust
/// use std::fmt;
///
/// use local_storage::{register_storage_key, StorageKey};
///
/// enum AppKey {
///     Theme,
///     Onboarded,
/// }
///
/// impl fmt::Display for AppKey {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         match self {
///             AppKey::Theme => f.write_str("theme"),
///             AppKey::Onboarded => f.write_str("onboarded"),
///         }
///     }
/// }
///
/// register_storage_key!(AppKey);
///
/// assert_eq!(AppKey::Theme.storage_key(), "theme");
/// ```
#[macro_export]
macro_rules! register_storage_key {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::StorageKey for $ty {
                fn storage_key(&self) -> ::std::borrow::Cow<'_, str> {
                    ::std::borrow::Cow::Owned(::std::string::ToString::to_string(self))
                }
            }
        )+
    };
}

/// Name of the suite used when none is configured.
pub const DEFAULT_SUITE: &str = "standard";

/// Validate that the provided suite name will be a valid identifier for every backend.
/// Suites become SQLite table names and web storage key prefixes, so valid characters are
/// limited to a-z, A-Z, and underscore (_). Empty names are rejected.
pub const fn validate_suite_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if !(byte.is_ascii_alphabetic() || byte == b'_') {
            return false;
        }
        i += 1;
    }
    true
}

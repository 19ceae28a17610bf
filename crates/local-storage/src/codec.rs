//! Portable byte encoding for structured values.
//!
//! Structured values are stored as JSON rendered to bytes, which every backend can hold as an
//! opaque [`StoredValue::Bytes`](crate::StoredValue::Bytes) blob.

use serde::{de::DeserializeOwned, Serialize};

/// Encode a value to JSON bytes.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// Decode JSON bytes into a value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}

use serde::{Deserialize, Serialize};

/// A value as held by a [`PlatformStore`](crate::PlatformStore).
///
/// Scalars are accepted directly by every backend. Structured values are encoded by
/// [`LocalStorage::set_codable`](crate::LocalStorage::set_codable) and stored as opaque
/// [`StoredValue::Bytes`]. Nothing records which accessor wrote a slot, readers must use an
/// accessor consistent with the write.
///
/// Persistent backends keep the value as JSON text of this enum, for example
/// `{"type":"Bool","value":true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum StoredValue {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number. Non-finite values are written as `"NaN"`, `"Infinity"` and
    /// `"-Infinity"` since JSON numbers can't hold them.
    Float(#[serde(with = "float_text")] f64),
    /// A UTF-8 string.
    String(String),
    /// An opaque binary blob, usually an encoded structured value.
    Bytes(#[serde(with = "serde_bytes")] Vec<u8>),
}

mod float_text {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FloatRepr {
        Number(f64),
        Text(String),
    }

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match FloatRepr::deserialize(deserializer)? {
            FloatRepr::Number(n) => Ok(n),
            FloatRepr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"NaN\", \"Infinity\" or \"-Infinity\"",
                )),
            },
        }
    }
}

impl StoredValue {
    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            StoredValue::Bool(_) => "Bool",
            StoredValue::Integer(_) => "Integer",
            StoredValue::Float(_) => "Float",
            StoredValue::String(_) => "String",
            StoredValue::Bytes(_) => "Bytes",
        }
    }

    /// The boolean held by this value, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StoredValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string held by this value, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StoredValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The blob held by this value, if it is one.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            StoredValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<bool> for StoredValue {
    fn from(value: bool) -> Self {
        StoredValue::Bool(value)
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Integer(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Integer(value.into())
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::String(value)
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::String(value.to_owned())
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

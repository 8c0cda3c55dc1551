//! The Value type - the metadata library's tagged union.
//!
//! Every structured field the library exposes (complex properties, embedded
//! pictures, chapter markers) is a tree of these.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::Text;

/// Map of string keys to values.
///
/// Keys are compared by exact byte content. Iteration is in key order, which
/// matches the metadata library's own map.
pub type ValueMap = BTreeMap<String, Value>;

/// A typed metadata value.
///
/// # Design Notes
///
/// - Integer width and signedness are kept; the library distinguishes them
/// - `Text` and `Bytes` are separate variants, so binary payloads never get
///   mistaken for text
/// - `Empty` is the library's null
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Empty,
    Bool(bool),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Text(Text),
    Bytes(Bytes),
    TextList(Vec<Text>),
    BytesList(Vec<Bytes>),
    List(Vec<Value>),
    Map(ValueMap),
}

/// The variant of a [`Value`], without its payload.
///
/// Used to request a specific target shape when converting into a `Value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Empty,
    Bool,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Text,
    Bytes,
    TextList,
    BytesList,
    List,
    Map,
}

impl Value {
    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(ValueMap::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int32(_) => ValueKind::Int32,
            Value::UInt32(_) => ValueKind::UInt32,
            Value::Int64(_) => ValueKind::Int64,
            Value::UInt64(_) => ValueKind::UInt64,
            Value::Text(_) => ValueKind::Text,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::TextList(_) => ValueKind::TextList,
            Value::BytesList(_) => ValueKind::BytesList,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// The numeric value of any integer variant, widened.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int32(v) => Some(i128::from(*v)),
            Value::UInt32(v) => Some(i128::from(*v)),
            Value::Int64(v) => Some(i128::from(*v)),
            Value::UInt64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt64(v)
    }
}

impl From<Text> for Value {
    fn from(v: Text) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Text::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Text::from(v))
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(v))
    }
}

impl From<Vec<Text>> for Value {
    fn from(v: Vec<Text>) -> Self {
        Value::TextList(v)
    }
}

impl From<Vec<Bytes>> for Value {
    fn from(v: Vec<Bytes>) -> Self {
        Value::BytesList(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Value::Map(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Empty.kind(), ValueKind::Empty);
        assert_eq!(Value::from(7u32).kind(), ValueKind::UInt32);
        assert_eq!(Value::from(-7i64).kind(), ValueKind::Int64);
        assert_eq!(Value::from("x").kind(), ValueKind::Text);
        assert_eq!(Value::from(vec![1u8, 2]).kind(), ValueKind::Bytes);
        assert_eq!(Value::map().kind(), ValueKind::Map);
    }

    #[test]
    fn integers_keep_width() {
        assert_ne!(Value::from(1i32), Value::from(1i64));
        assert_eq!(Value::from(1i32).as_integer(), Value::from(1i64).as_integer());
        assert_eq!(Value::from(u64::MAX).as_integer(), Some(u64::MAX as i128));
        assert_eq!(Value::from("1").as_integer(), None);
    }

    #[test]
    fn text_and_bytes_stay_distinct() {
        assert_ne!(Value::from("abc"), Value::from(b"abc".to_vec()));
    }

    #[test]
    fn map_lookup() {
        let mut map = ValueMap::new();
        map.insert("description".to_string(), Value::from("Front cover"));
        map.insert("pictureType".to_string(), Value::from("Front Cover"));
        let value = Value::from(map);

        assert_eq!(value.get("description"), Some(&Value::from("Front cover")));
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::from(true).get("description"), None);
    }

    #[test]
    fn map_iterates_in_key_order() {
        let mut map = ValueMap::new();
        map.insert("b".to_string(), Value::Empty);
        map.insert("a".to_string(), Value::Empty);
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn serde_roundtrip() {
        let value = Value::List(vec![
            Value::from(true),
            Value::from(vec![Text::from("a"), Text::from("b")]),
            Value::from(vec![0xFFu8, 0x00]),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}

//! The host's untyped value model.
//!
//! A [`DynamicValue`] is what the host hands across the boundary: nil,
//! booleans, arbitrary-width integers, encoding-tagged strings, sequences and
//! mappings. Strings and binary blobs share one container ([`DynText`]) and
//! are told apart only by the [`Encoding`] tag.

use std::fmt;

use bytes::Bytes;

/// The encoding tag carried by a host string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    /// Opaque octets; not text at all.
    Binary,
    UsAscii,
    Latin1,
    /// UTF-16 with the byte order given by a BOM (big-endian without one).
    Utf16,
    Utf16Le,
    Utf16Be,
    /// Any other label the host knows, e.g. `"Shift_JIS"`.
    Other(String),
}

impl Encoding {
    /// Map a host encoding name onto a tag. Matching ignores ASCII case.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Encoding::Utf8,
            "ASCII-8BIT" | "BINARY" => Encoding::Binary,
            "US-ASCII" | "ASCII" => Encoding::UsAscii,
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" => Encoding::Latin1,
            "UTF-16" => Encoding::Utf16,
            "UTF-16LE" => Encoding::Utf16Le,
            "UTF-16BE" => Encoding::Utf16Be,
            _ => Encoding::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Binary => "ASCII-8BIT",
            Encoding::UsAscii => "US-ASCII",
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Utf16 => "UTF-16",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Other(label) => label,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Encoding::Binary)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A host string: raw octets plus the encoding they are tagged with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynText {
    bytes: Bytes,
    encoding: Encoding,
}

impl DynText {
    pub fn new(bytes: impl Into<Bytes>, encoding: Encoding) -> Self {
        Self {
            bytes: bytes.into(),
            encoding,
        }
    }

    pub fn utf8(content: impl Into<String>) -> Self {
        Self::new(Bytes::from(content.into()), Encoding::Utf8)
    }

    pub fn binary(bytes: impl Into<Bytes>) -> Self {
        Self::new(bytes, Encoding::Binary)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn is_binary(&self) -> bool {
        self.encoding.is_binary()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A mapping key. Hosts distinguish symbol keys from string keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapKey {
    Text(String),
    Symbol(String),
}

impl MapKey {
    pub fn as_str(&self) -> &str {
        match self {
            MapKey::Text(s) | MapKey::Symbol(s) => s,
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Text(s) => write!(f, "{:?}", s),
            MapKey::Symbol(s) => write!(f, ":{}", s),
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::Text(s.to_string())
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::Text(s)
    }
}

/// An insertion-ordered mapping.
///
/// Inserting an existing key replaces its value in place. A text key and a
/// symbol key with the same name are different keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(MapKey, DynamicValue)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<MapKey>, value: DynamicValue) -> Option<DynamicValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &MapKey) -> Option<&DynamicValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up by name, accepting either a text or a symbol key.
    pub fn get_str(&self, name: &str) -> Option<&DynamicValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &DynamicValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &MapKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<MapKey>> FromIterator<(K, DynamicValue)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, DynamicValue)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (MapKey, DynamicValue);
    type IntoIter = std::vec::IntoIter<(MapKey, DynamicValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A dynamically-typed host value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DynamicValue {
    #[default]
    Nil,
    Bool(bool),
    Integer(i128),
    Float(f64),
    Text(DynText),
    Symbol(String),
    Sequence(Vec<DynamicValue>),
    Mapping(Mapping),
}

impl DynamicValue {
    /// A UTF-8 tagged string.
    pub fn text(content: impl Into<String>) -> Self {
        DynamicValue::Text(DynText::utf8(content))
    }

    /// A binary tagged string.
    pub fn binary(bytes: impl Into<Bytes>) -> Self {
        DynamicValue::Text(DynText::binary(bytes))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        DynamicValue::Symbol(name.into())
    }

    /// Short name of the shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DynamicValue::Nil => "nil",
            DynamicValue::Bool(_) => "bool",
            DynamicValue::Integer(_) => "integer",
            DynamicValue::Float(_) => "float",
            DynamicValue::Text(t) if t.is_binary() => "binary",
            DynamicValue::Text(_) => "text",
            DynamicValue::Symbol(_) => "symbol",
            DynamicValue::Sequence(_) => "sequence",
            DynamicValue::Mapping(_) => "mapping",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, DynamicValue::Nil)
    }

    pub fn as_text(&self) -> Option<&DynText> {
        match self {
            DynamicValue::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            DynamicValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a field by name when this is a mapping.
    pub fn get(&self, name: &str) -> Option<&DynamicValue> {
        self.as_mapping()?.get_str(name)
    }
}

impl From<bool> for DynamicValue {
    fn from(v: bool) -> Self {
        DynamicValue::Bool(v)
    }
}

impl From<i32> for DynamicValue {
    fn from(v: i32) -> Self {
        DynamicValue::Integer(i128::from(v))
    }
}

impl From<u32> for DynamicValue {
    fn from(v: u32) -> Self {
        DynamicValue::Integer(i128::from(v))
    }
}

impl From<i64> for DynamicValue {
    fn from(v: i64) -> Self {
        DynamicValue::Integer(i128::from(v))
    }
}

impl From<u64> for DynamicValue {
    fn from(v: u64) -> Self {
        DynamicValue::Integer(i128::from(v))
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        DynamicValue::text(v)
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        DynamicValue::text(v)
    }
}

impl From<DynText> for DynamicValue {
    fn from(v: DynText) -> Self {
        DynamicValue::Text(v)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(v: Vec<DynamicValue>) -> Self {
        DynamicValue::Sequence(v)
    }
}

impl From<Mapping> for DynamicValue {
    fn from(v: Mapping) -> Self {
        DynamicValue::Mapping(v)
    }
}

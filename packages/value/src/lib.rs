//! tagbridge-value: the typed side of the metadata bridge
//!
//! This layer mirrors the value model of the typed metadata library:
//! - `Value`: recursive tagged union (integers of two widths, text, bytes, lists, maps)
//! - `Text`: decoded text with the encoding the library should prefer on write
//! - `PropertyMap`: simple string key to list-of-text projection
//! - `ComplexProperties`: string key to list-of-record projection
//! - `Tag` / `AudioProperties`: the fixed records every file exposes
//!
//! # Example
//!
//! ```rust
//! use tagbridge_value::{PropertyMap, Text, Value, ValueMap};
//!
//! let mut picture = ValueMap::new();
//! picture.insert("mimeType".to_string(), Value::from("image/png"));
//! picture.insert("data".to_string(), Value::from(vec![0x89u8, b'P', b'N', b'G']));
//!
//! let mut properties = PropertyMap::new();
//! properties.replace("ARTIST", vec![Text::from("Nina Simone")]);
//! assert_eq!(properties.get("ARTIST").map(|v| v.len()), Some(1));
//! ```

pub use bytes::Bytes;

mod complex;
mod property_map;
mod tag;
mod text;
mod value;

pub use complex::{ComplexProperties, ComplexPropertyList};
pub use property_map::PropertyMap;
pub use tag::{AudioProperties, Tag, TagField};
pub use text::{Text, TextHint};
pub use value::{Value, ValueKind, ValueMap};

//! tagbridge-marshal: dynamic host values to typed metadata values and back
//!
//! The host side only knows nil, booleans, integers, encoding-tagged strings,
//! sequences and mappings ([`DynamicValue`]). The typed side is
//! [`tagbridge_value::Value`] and its projections. This crate converts between
//! the two:
//!
//! - [`to_dynamic`]: total, lossless apart from integer width
//! - [`to_value`]: best effort; unrecognised shapes become `Value::Empty`
//! - [`to_value_as`]: conversion toward a requested [`ValueKind`]
//! - [`merge_properties`], [`merge_tag_properties`], [`merge_complex_properties`]:
//!   apply dynamic updates to the projections
//! - [`Marshaller`]: builds tag and audio-properties records through an
//!   injected [`RecordFactory`]
//!
//! # Known sharp edges
//!
//! - A sequence's shape is decided by its first element only
//! - Tag merges are not atomic; fields before a failing key stay applied
//!
//! # Example
//!
//! ```rust
//! use tagbridge_marshal::{to_dynamic, to_value, DynamicValue};
//! use tagbridge_value::{Bytes, Value};
//!
//! let value = Value::BytesList(vec![Bytes::from_static(b"\x89PNG")]);
//! let dynamic = to_dynamic(&value);
//! assert_eq!(dynamic.type_name(), "sequence");
//! assert_eq!(to_value(&dynamic), value);
//!
//! assert_eq!(to_value(&DynamicValue::from(42)), Value::Int64(42));
//! ```

mod dynamic;
mod encoding;
mod error;
mod json;
mod projection;
mod records;
mod to_dynamic;
mod to_value;

pub use dynamic::{DynText, DynamicValue, Encoding, MapKey, Mapping};
pub use encoding::decode_text;
pub use error::{MarshalError, Result};
pub use json::{dynamic_to_json, json_to_dynamic};
pub use projection::{
    complex_list_to_dynamic, complex_updates, keys_to_dynamic, merge_complex_properties,
    merge_properties, merge_tag_properties, property_map_to_dynamic,
};
pub use records::{AudioPropertiesRecord, MappingFactory, Marshaller, RecordFactory, TagRecord};
pub use tagbridge_value::ValueKind;
pub use to_dynamic::{map_to_dynamic, text_or_nil, text_to_dynamic, to_dynamic, uint_or_nil};
pub use to_value::{mapping_to_map, text_or_empty, to_text, to_value, to_value_as, uint_or_zero};

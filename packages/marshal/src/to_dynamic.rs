//! Typed to dynamic conversion.

use tagbridge_value::{Text, Value, ValueMap};

use crate::{DynText, DynamicValue, MapKey, Mapping};

/// Convert a typed value into its dynamic form.
///
/// Total and recursive. All text comes out UTF-8 tagged whatever its hint;
/// byte blocks come out binary tagged. Integer width is not retained.
pub fn to_dynamic(value: &Value) -> DynamicValue {
    match value {
        Value::Empty => DynamicValue::Nil,
        Value::Bool(b) => DynamicValue::Bool(*b),
        Value::Int32(i) => DynamicValue::from(*i),
        Value::UInt32(i) => DynamicValue::from(*i),
        Value::Int64(i) => DynamicValue::from(*i),
        Value::UInt64(i) => DynamicValue::from(*i),
        Value::Text(t) => text_to_dynamic(t),
        Value::Bytes(b) => DynamicValue::binary(b.clone()),
        Value::TextList(list) => DynamicValue::Sequence(list.iter().map(text_to_dynamic).collect()),
        Value::BytesList(list) => DynamicValue::Sequence(
            list.iter()
                .map(|b| DynamicValue::binary(b.clone()))
                .collect(),
        ),
        Value::List(list) => DynamicValue::Sequence(list.iter().map(to_dynamic).collect()),
        Value::Map(map) => map_to_dynamic(map),
    }
}

/// A value map as a mapping with text keys.
pub fn map_to_dynamic(map: &ValueMap) -> DynamicValue {
    DynamicValue::Mapping(
        map.iter()
            .map(|(k, v)| (MapKey::Text(k.clone()), to_dynamic(v)))
            .collect::<Mapping>(),
    )
}

/// Text as a UTF-8 tagged host string.
pub fn text_to_dynamic(text: &Text) -> DynamicValue {
    DynamicValue::Text(DynText::utf8(text.as_str()))
}

/// Text for an optional field: empty text is absence.
pub fn text_or_nil(text: &Text) -> DynamicValue {
    if text.is_empty() {
        DynamicValue::Nil
    } else {
        text_to_dynamic(text)
    }
}

/// Number for an optional field: zero is absence.
pub fn uint_or_nil(value: u32) -> DynamicValue {
    if value == 0 {
        DynamicValue::Nil
    } else {
        DynamicValue::from(value)
    }
}

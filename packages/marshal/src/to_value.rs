//! Dynamic to typed conversion.
//!
//! Conversion is best effort: a shape with no typed counterpart becomes
//! [`Value::Empty`] instead of failing. The strict helpers at the bottom are
//! for the fixed tag fields, where a wrong shape is a caller error.

use tagbridge_value::{Text, Value, ValueKind, ValueMap};

use crate::encoding::{decode_text, utf8_lossy};
use crate::{DynText, DynamicValue, MarshalError, Mapping, Result};

/// Convert a dynamic value into a typed value.
///
/// Sequences take their shape from the first element alone: a binary first
/// element makes a `BytesList`, a text first element a `TextList`, anything
/// else a `List`. Later elements are not inspected, so a heterogeneous
/// sequence converts according to its head.
pub fn to_value(dynamic: &DynamicValue) -> Value {
    match dynamic {
        DynamicValue::Nil => Value::Empty,
        DynamicValue::Bool(b) => Value::Bool(*b),
        DynamicValue::Integer(i) => integer_to_value(*i),
        DynamicValue::Text(t) => text_to_value(t),
        DynamicValue::Sequence(items) => sequence_to_value(items),
        DynamicValue::Mapping(m) => Value::Map(mapping_to_map(m)),
        DynamicValue::Float(_) | DynamicValue::Symbol(_) => Value::Empty,
    }
}

/// Convert toward a requested kind.
///
/// Integers narrow to the requested width (out of range gives `Empty`), any
/// text requested as `Bytes` keeps its raw octets, and binary requested as
/// `Text` is read as UTF-8. Everything else converts as [`to_value`] would.
pub fn to_value_as(dynamic: &DynamicValue, kind: ValueKind) -> Value {
    match (dynamic, kind) {
        (DynamicValue::Integer(i), ValueKind::Int32) => narrow(*i, kind, Value::Int32),
        (DynamicValue::Integer(i), ValueKind::UInt32) => narrow(*i, kind, Value::UInt32),
        (DynamicValue::Integer(i), ValueKind::Int64) => narrow(*i, kind, Value::Int64),
        (DynamicValue::Integer(i), ValueKind::UInt64) => narrow(*i, kind, Value::UInt64),
        (DynamicValue::Text(t), ValueKind::Bytes) => Value::Bytes(t.bytes().clone()),
        (DynamicValue::Text(t), ValueKind::Text) if t.is_binary() => {
            Value::Text(Text::utf8(utf8_lossy(t.as_bytes())))
        }
        _ => to_value(dynamic),
    }
}

/// Decode a host string into text, whatever its tag.
pub fn to_text(text: &DynText) -> Text {
    decode_text(text)
}

/// Convert mapping entries into a value map. Keys become plain strings; if a
/// symbol and a text key share a name the later entry wins.
pub fn mapping_to_map(mapping: &Mapping) -> ValueMap {
    mapping
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), to_value(v)))
        .collect()
}

fn integer_to_value(i: i128) -> Value {
    if let Ok(v) = i64::try_from(i) {
        Value::Int64(v)
    } else if let Ok(v) = u64::try_from(i) {
        Value::UInt64(v)
    } else {
        log::warn!("integer {} does not fit 64 bits, dropped", i);
        Value::Empty
    }
}

fn narrow<T: TryFrom<i128>>(i: i128, kind: ValueKind, wrap: fn(T) -> Value) -> Value {
    match T::try_from(i) {
        Ok(v) => wrap(v),
        Err(_) => {
            log::warn!("integer {} out of range for {:?}, dropped", i, kind);
            Value::Empty
        }
    }
}

fn text_to_value(text: &DynText) -> Value {
    if text.is_binary() {
        Value::Bytes(text.bytes().clone())
    } else {
        Value::Text(decode_text(text))
    }
}

fn sequence_to_value(items: &[DynamicValue]) -> Value {
    match items.first() {
        None => Value::Empty,
        Some(DynamicValue::Text(head)) if head.is_binary() => {
            Value::BytesList(text_elements(items, |t| t.bytes().clone()))
        }
        Some(DynamicValue::Text(_)) => Value::TextList(text_elements(items, decode_text)),
        Some(_) => Value::List(items.iter().map(to_value).collect()),
    }
}

fn text_elements<T>(items: &[DynamicValue], convert: impl Fn(&DynText) -> T) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match item {
            DynamicValue::Text(t) => Some(convert(t)),
            other => {
                log::warn!("dropping {} element from string list", other.type_name());
                None
            }
        })
        .collect()
}

/// Text for a fixed tag field: `Nil` is empty text.
pub fn text_or_empty(dynamic: &DynamicValue) -> Result<Text> {
    match dynamic {
        DynamicValue::Nil => Ok(Text::default()),
        DynamicValue::Text(t) => Ok(decode_text(t)),
        other => Err(MarshalError::mismatch("text or nil", other)),
    }
}

/// Number for a fixed tag field: `Nil` is zero.
pub fn uint_or_zero(dynamic: &DynamicValue, target: &'static str) -> Result<u32> {
    match dynamic {
        DynamicValue::Nil => Ok(0),
        DynamicValue::Integer(i) => {
            u32::try_from(*i).map_err(|_| MarshalError::OutOfRange { value: *i, target })
        }
        other => Err(MarshalError::mismatch("integer or nil", other)),
    }
}

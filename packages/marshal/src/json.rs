//! JSON interop for dynamic values.

use base64::Engine;

use crate::encoding::decode_text;
use crate::{DynamicValue, MapKey, Mapping};

/// Convert a dynamic value to JSON.
///
/// Binary text is base64 encoded; other text is transcoded to UTF-8.
/// Integers outside the 64-bit range and non-finite floats have no JSON
/// number form and become strings and null respectively.
pub fn dynamic_to_json(value: &DynamicValue) -> serde_json::Value {
    match value {
        DynamicValue::Nil => serde_json::Value::Null,
        DynamicValue::Bool(b) => serde_json::Value::Bool(*b),
        DynamicValue::Integer(i) => integer_to_json(*i),
        DynamicValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        DynamicValue::Text(t) if t.is_binary() => {
            // JSON has no byte strings
            serde_json::Value::String(base64::engine::general_purpose::STANDARD.encode(t.as_bytes()))
        }
        DynamicValue::Text(t) => serde_json::Value::String(decode_text(t).into_string()),
        DynamicValue::Symbol(s) => serde_json::Value::String(s.clone()),
        DynamicValue::Sequence(items) => {
            serde_json::Value::Array(items.iter().map(dynamic_to_json).collect())
        }
        DynamicValue::Mapping(m) => serde_json::Value::Object(
            m.iter()
                .map(|(k, v)| (k.as_str().to_string(), dynamic_to_json(v)))
                .collect(),
        ),
    }
}

fn integer_to_json(i: i128) -> serde_json::Value {
    if let Ok(v) = i64::try_from(i) {
        serde_json::Value::Number(v.into())
    } else if let Ok(v) = u64::try_from(i) {
        serde_json::Value::Number(v.into())
    } else {
        serde_json::Value::String(i.to_string())
    }
}

/// Convert JSON to a dynamic value. Strings come back UTF-8 tagged and
/// object keys as text keys.
pub fn json_to_dynamic(json: serde_json::Value) -> DynamicValue {
    match json {
        serde_json::Value::Null => DynamicValue::Nil,
        serde_json::Value::Bool(b) => DynamicValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                DynamicValue::from(i)
            } else if let Some(u) = n.as_u64() {
                DynamicValue::from(u)
            } else {
                DynamicValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => DynamicValue::text(s),
        serde_json::Value::Array(arr) => {
            DynamicValue::Sequence(arr.into_iter().map(json_to_dynamic).collect())
        }
        serde_json::Value::Object(map) => DynamicValue::Mapping(
            map.into_iter()
                .map(|(k, v)| (MapKey::Text(k), json_to_dynamic(v)))
                .collect::<Mapping>(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DynText, Encoding};

    #[test]
    fn binary_is_base64() {
        let json = dynamic_to_json(&DynamicValue::binary(b"hello".to_vec()));
        assert_eq!(json, serde_json::json!("aGVsbG8="));
    }

    #[test]
    fn non_utf8_text_is_transcoded() {
        let latin1 = DynamicValue::Text(DynText::new(vec![0xE9u8], Encoding::Latin1));
        assert_eq!(dynamic_to_json(&latin1), serde_json::json!("é"));
    }

    #[test]
    fn wide_integers() {
        assert_eq!(
            dynamic_to_json(&DynamicValue::from(u64::MAX)),
            serde_json::json!(u64::MAX)
        );
        assert_eq!(
            dynamic_to_json(&DynamicValue::Integer(i128::MAX)),
            serde_json::json!(i128::MAX.to_string())
        );
    }

    #[test]
    fn symbols_and_floats() {
        assert_eq!(
            dynamic_to_json(&DynamicValue::symbol("fast")),
            serde_json::json!("fast")
        );
        assert_eq!(
            dynamic_to_json(&DynamicValue::Float(f64::INFINITY)),
            serde_json::Value::Null
        );
    }

    #[test]
    fn json_roundtrip_for_plain_values() {
        let json = serde_json::json!({
            "title": "Sinnerman",
            "year": 1965,
            "genres": ["Jazz", "Gospel"],
            "live": false,
            "rating": null
        });
        let dynamic = json_to_dynamic(json.clone());
        assert_eq!(dynamic.get("year"), Some(&DynamicValue::Integer(1965)));
        assert_eq!(dynamic_to_json(&dynamic), json);
    }
}

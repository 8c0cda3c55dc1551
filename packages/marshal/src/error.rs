//! Error types for the marshalling layer.

/// Result type for marshalling operations.
pub type Result<T> = std::result::Result<T, MarshalError>;

/// Errors raised while converting dynamic values into typed ones.
///
/// Most conversions are lossy but never fail (an unrecognised shape becomes
/// `Value::Empty`). These errors cover the few places that must reject
/// input: the fixed tag record and the property projections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarshalError {
    /// The input had the wrong dynamic shape.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An integer did not fit the target field.
    #[error("integer {value} out of range for {target}")]
    OutOfRange { value: i128, target: &'static str },

    /// A tag update named a field outside the fixed set.
    #[error("unknown tag property: {key}")]
    UnknownKey { key: String },
}

impl MarshalError {
    pub(crate) fn mismatch(expected: &'static str, found: &crate::DynamicValue) -> Self {
        MarshalError::TypeMismatch {
            expected,
            found: found.type_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DynamicValue;

    #[test]
    fn display_messages() {
        let e = MarshalError::mismatch("text", &DynamicValue::Integer(3));
        assert_eq!(e.to_string(), "type mismatch: expected text, found integer");

        let e = MarshalError::OutOfRange {
            value: -1,
            target: "year",
        };
        assert_eq!(e.to_string(), "integer -1 out of range for year");

        let e = MarshalError::UnknownKey {
            key: "bogus".to_string(),
        };
        assert!(e.to_string().contains("bogus"));
    }
}

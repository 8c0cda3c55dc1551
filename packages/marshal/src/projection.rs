//! The property projections: merging dynamic updates into property maps,
//! tag fields and complex properties, and rendering them back.

use tagbridge_value::{
    ComplexProperties, ComplexPropertyList, PropertyMap, Tag, TagField, Text, ValueMap,
};

use crate::to_dynamic::{map_to_dynamic, text_to_dynamic};
use crate::to_value::{mapping_to_map, text_or_empty, to_text, uint_or_zero};
use crate::{DynamicValue, MapKey, MarshalError, Mapping, Result};

/// Merge property updates, replacing each updated key's whole list.
///
/// With `replace_all` the result starts empty instead of from `current`.
/// Each update value may be a sequence of text, a single text or `Nil`
/// (delete the key). Keys left with an empty list are removed.
pub fn merge_properties(
    current: &PropertyMap,
    updates: &DynamicValue,
    replace_all: bool,
) -> Result<PropertyMap> {
    let updates = expect_mapping(updates)?;
    let mut merged = if replace_all {
        PropertyMap::new()
    } else {
        current.clone()
    };

    for (key, value) in updates.iter() {
        merged.replace(key.as_str(), text_list(value)?);
    }
    merged.remove_empty();
    Ok(merged)
}

fn text_list(value: &DynamicValue) -> Result<Vec<Text>> {
    match value {
        DynamicValue::Nil => Ok(Vec::new()),
        DynamicValue::Text(t) => Ok(vec![to_text(t)]),
        DynamicValue::Sequence(items) => items
            .iter()
            .map(|item| match item {
                DynamicValue::Text(t) => Ok(to_text(t)),
                other => Err(MarshalError::mismatch("text", other)),
            })
            .collect(),
        other => Err(MarshalError::mismatch("sequence of text", other)),
    }
}

/// Apply tag field updates in input order.
///
/// Not atomic: on an unknown key or a bad value, fields processed earlier
/// in the same call stay applied.
pub fn merge_tag_properties(tag: &mut Tag, updates: &DynamicValue) -> Result<()> {
    let updates = expect_mapping(updates)?;
    for (key, value) in updates.iter() {
        let field = TagField::from_key(key.as_str()).ok_or_else(|| MarshalError::UnknownKey {
            key: key.as_str().to_string(),
        })?;
        if let Some(slot) = tag.number_mut(field) {
            *slot = uint_or_zero(value, field.as_str())?;
            continue;
        }
        if let Some(slot) = tag.text_mut(field) {
            *slot = text_or_empty(value)?;
        }
    }
    Ok(())
}

/// Merge complex property updates, replacing each updated key's whole list.
///
/// With `replace_all` every key already in `current` is first set to an
/// empty list, so the library clears it on write. All updates are converted
/// before anything is changed.
pub fn merge_complex_properties(
    current: &mut ComplexProperties,
    updates: &DynamicValue,
    replace_all: bool,
) -> Result<()> {
    let updates = complex_updates(updates)?;
    if replace_all {
        current.clear_all();
    }
    for (key, records) in updates {
        current.set(key, records);
    }
    Ok(())
}

/// Convert a complex property update mapping into typed record lists.
pub fn complex_updates(updates: &DynamicValue) -> Result<Vec<(String, ComplexPropertyList)>> {
    expect_mapping(updates)?
        .iter()
        .map(|(key, value)| Ok((key.as_str().to_string(), record_list(value)?)))
        .collect()
}

fn record_list(value: &DynamicValue) -> Result<ComplexPropertyList> {
    match value {
        DynamicValue::Nil => Ok(Vec::new()),
        DynamicValue::Sequence(items) => items
            .iter()
            .map(|item| match item {
                DynamicValue::Mapping(m) => Ok(mapping_to_map(m)),
                other => Err(MarshalError::mismatch("mapping", other)),
            })
            .collect(),
        other => Err(MarshalError::mismatch("sequence of mappings", other)),
    }
}

/// Render a property map as a mapping of key to sequence of UTF-8 text.
pub fn property_map_to_dynamic(properties: &PropertyMap) -> DynamicValue {
    DynamicValue::Mapping(
        properties
            .iter()
            .map(|(key, values)| {
                (
                    MapKey::Text(key.clone()),
                    DynamicValue::Sequence(values.iter().map(text_to_dynamic).collect()),
                )
            })
            .collect::<Mapping>(),
    )
}

/// Render one complex property's records as a sequence of mappings.
pub fn complex_list_to_dynamic(records: &[ValueMap]) -> DynamicValue {
    DynamicValue::Sequence(records.iter().map(map_to_dynamic).collect())
}

/// Render a list of keys as a sequence of UTF-8 text.
pub fn keys_to_dynamic<'a>(keys: impl IntoIterator<Item = &'a str>) -> DynamicValue {
    DynamicValue::Sequence(keys.into_iter().map(DynamicValue::text).collect())
}

fn expect_mapping(value: &DynamicValue) -> Result<&Mapping> {
    value
        .as_mapping()
        .ok_or_else(|| MarshalError::mismatch("mapping", value))
}

//! The complex property projection: string key to list of records.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::ValueMap;

/// The records stored under one complex property key.
///
/// Each map is an independent record, e.g. one embedded picture.
pub type ComplexPropertyList = Vec<ValueMap>;

/// Every complex property of a file, by key.
///
/// An empty list under a key means "clear this property" when handed back to
/// the metadata library.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplexProperties {
    entries: BTreeMap<String, ComplexPropertyList>,
}

impl ComplexProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&[ValueMap]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Replace the entire list under `key`.
    pub fn set(&mut self, key: impl Into<String>, records: ComplexPropertyList) {
        self.entries.insert(key.into(), records);
    }

    /// Set every present key to an empty list.
    pub fn clear_all(&mut self) {
        for records in self.entries.values_mut() {
            records.clear();
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<ComplexPropertyList> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ComplexPropertyList> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ComplexPropertyList)> for ComplexProperties {
    fn from_iter<I: IntoIterator<Item = (String, ComplexPropertyList)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ComplexProperties {
    type Item = (String, ComplexPropertyList);
    type IntoIter = btree_map::IntoIter<String, ComplexPropertyList>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

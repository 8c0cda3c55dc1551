//! The simple property projection: string key to list of text.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Text;

/// String-keyed map of text lists.
///
/// A key whose list is empty carries no information; [`remove_empty`](Self::remove_empty)
/// drops such keys and every merge ends with it, so a map handed back to the
/// metadata library never holds an empty entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap {
    entries: BTreeMap<String, Vec<Text>>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&[Text]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Set the whole list for `key`, returning the previous list.
    pub fn replace(&mut self, key: impl Into<String>, values: Vec<Text>) -> Option<Vec<Text>> {
        self.entries.insert(key.into(), values)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<Text>> {
        self.entries.remove(key)
    }

    /// Drop every key whose list is empty.
    pub fn remove_empty(&mut self) {
        self.entries.retain(|_, values| !values.is_empty());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<Text>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<Text>)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Text>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PropertyMap {
    type Item = (String, Vec<Text>);
    type IntoIter = btree_map::IntoIter<String, Vec<Text>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a Vec<Text>);
    type IntoIter = btree_map::Iter<'a, String, Vec<Text>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

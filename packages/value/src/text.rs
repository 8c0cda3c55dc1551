//! Decoded text with an encoding hint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The on-disk encoding the metadata library should prefer for a text.
///
/// The content of a [`Text`] is always held as a Rust `String`; the hint only
/// records how the text arrived or how it should be written back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextHint {
    Latin1,
    #[default]
    Utf8,
}

/// A text value.
///
/// Equality compares content only; two texts that differ just in their hint
/// are equal, as they are in the metadata library.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Text {
    content: String,
    hint: TextHint,
}

impl Text {
    pub fn new(content: impl Into<String>, hint: TextHint) -> Self {
        Self {
            content: content.into(),
            hint,
        }
    }

    pub fn utf8(content: impl Into<String>) -> Self {
        Self::new(content, TextHint::Utf8)
    }

    pub fn latin1(content: impl Into<String>) -> Self {
        Self::new(content, TextHint::Latin1)
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn hint(&self) -> TextHint {
        self.hint
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.content == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.content == *other
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl From<&str> for Text {
    fn from(v: &str) -> Self {
        Text::utf8(v)
    }
}

impl From<String> for Text {
    fn from(v: String) -> Self {
        Text::utf8(v)
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

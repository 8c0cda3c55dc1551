//! The fixed records: basic tag fields and audio properties.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Text;

/// The normalised subset of tag fields every format supports.
///
/// Absence is the zero value: an empty text or a zero number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub title: Text,
    pub artist: Text,
    pub album: Text,
    pub genre: Text,
    pub year: u32,
    pub track: u32,
    pub comment: Text,
}

/// One field of a [`Tag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagField {
    Title,
    Artist,
    Album,
    Genre,
    Year,
    Track,
    Comment,
}

impl TagField {
    /// Every field, in record order.
    pub const ALL: [TagField; 7] = [
        TagField::Title,
        TagField::Artist,
        TagField::Album,
        TagField::Genre,
        TagField::Year,
        TagField::Track,
        TagField::Comment,
    ];

    /// Resolve a key such as `"title"`. Keys outside the fixed set give `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagField::Title => "title",
            TagField::Artist => "artist",
            TagField::Album => "album",
            TagField::Genre => "genre",
            TagField::Year => "year",
            TagField::Track => "track",
            TagField::Comment => "comment",
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Tag {
    /// The text held in a textual field; `None` for numeric fields.
    pub fn text(&self, field: TagField) -> Option<&Text> {
        match field {
            TagField::Title => Some(&self.title),
            TagField::Artist => Some(&self.artist),
            TagField::Album => Some(&self.album),
            TagField::Genre => Some(&self.genre),
            TagField::Comment => Some(&self.comment),
            TagField::Year | TagField::Track => None,
        }
    }

    /// Mutable access to a textual field; `None` for numeric fields.
    pub fn text_mut(&mut self, field: TagField) -> Option<&mut Text> {
        match field {
            TagField::Title => Some(&mut self.title),
            TagField::Artist => Some(&mut self.artist),
            TagField::Album => Some(&mut self.album),
            TagField::Genre => Some(&mut self.genre),
            TagField::Comment => Some(&mut self.comment),
            TagField::Year | TagField::Track => None,
        }
    }

    /// Mutable access to a numeric field; `None` for textual fields.
    pub fn number_mut(&mut self, field: TagField) -> Option<&mut u32> {
        match field {
            TagField::Year => Some(&mut self.year),
            TagField::Track => Some(&mut self.track),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Tag::default()
    }
}

/// Properties of the audio stream itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioProperties {
    pub length_ms: u32,
    /// Kilobits per second.
    pub bitrate: u32,
    pub sample_rate: u32,
    pub channels: u32,
}

//! Record construction for the two fixed shapes.
//!
//! The host decides what a tag record and an audio-properties record look
//! like (a struct, a frozen data object, a plain mapping). The marshaller is
//! handed a [`RecordFactory`] at setup and calls it for every record it
//! produces.

use tagbridge_value::{AudioProperties, Tag};

use crate::to_dynamic::{text_or_nil, uint_or_nil};
use crate::{DynamicValue, MapKey, Mapping};

/// Tag fields, already converted with the absence convention.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagRecord {
    pub title: DynamicValue,
    pub artist: DynamicValue,
    pub album: DynamicValue,
    pub genre: DynamicValue,
    pub year: DynamicValue,
    pub track: DynamicValue,
    pub comment: DynamicValue,
}

impl From<&Tag> for TagRecord {
    fn from(tag: &Tag) -> Self {
        Self {
            title: text_or_nil(&tag.title),
            artist: text_or_nil(&tag.artist),
            album: text_or_nil(&tag.album),
            genre: text_or_nil(&tag.genre),
            year: uint_or_nil(tag.year),
            track: uint_or_nil(tag.track),
            comment: text_or_nil(&tag.comment),
        }
    }
}

/// Audio properties as host integers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioPropertiesRecord {
    pub length_ms: DynamicValue,
    pub bitrate: DynamicValue,
    pub sample_rate: DynamicValue,
    pub channels: DynamicValue,
}

impl From<&AudioProperties> for AudioPropertiesRecord {
    fn from(props: &AudioProperties) -> Self {
        Self {
            length_ms: DynamicValue::from(props.length_ms),
            bitrate: DynamicValue::from(props.bitrate),
            sample_rate: DynamicValue::from(props.sample_rate),
            channels: DynamicValue::from(props.channels),
        }
    }
}

/// Builds host records from converted fields.
pub trait RecordFactory {
    fn tag_record(&self, record: TagRecord) -> DynamicValue;

    fn audio_properties_record(&self, record: AudioPropertiesRecord) -> DynamicValue;
}

impl<T: RecordFactory + ?Sized> RecordFactory for Box<T> {
    fn tag_record(&self, record: TagRecord) -> DynamicValue {
        (**self).tag_record(record)
    }

    fn audio_properties_record(&self, record: AudioPropertiesRecord) -> DynamicValue {
        (**self).audio_properties_record(record)
    }
}

/// Builds records as symbol-keyed mappings, fields in declaration order.
#[derive(Clone, Copy, Debug, Default)]
pub struct MappingFactory;

impl RecordFactory for MappingFactory {
    fn tag_record(&self, record: TagRecord) -> DynamicValue {
        symbol_mapping([
            ("title", record.title),
            ("artist", record.artist),
            ("album", record.album),
            ("genre", record.genre),
            ("year", record.year),
            ("track", record.track),
            ("comment", record.comment),
        ])
    }

    fn audio_properties_record(&self, record: AudioPropertiesRecord) -> DynamicValue {
        symbol_mapping([
            ("length_ms", record.length_ms),
            ("bitrate", record.bitrate),
            ("sample_rate", record.sample_rate),
            ("channels", record.channels),
        ])
    }
}

fn symbol_mapping<const N: usize>(fields: [(&str, DynamicValue); N]) -> DynamicValue {
    DynamicValue::Mapping(
        fields
            .into_iter()
            .map(|(name, value)| (MapKey::Symbol(name.to_string()), value))
            .collect::<Mapping>(),
    )
}

/// Converts the fixed records through an injected factory.
pub struct Marshaller {
    factory: Box<dyn RecordFactory>,
}

impl Marshaller {
    pub fn new(factory: impl RecordFactory + 'static) -> Self {
        Self {
            factory: Box::new(factory),
        }
    }

    pub fn tag(&self, tag: &Tag) -> DynamicValue {
        self.factory.tag_record(TagRecord::from(tag))
    }

    pub fn audio_properties(&self, props: &AudioProperties) -> DynamicValue {
        self.factory
            .audio_properties_record(AudioPropertiesRecord::from(props))
    }
}

impl Default for Marshaller {
    fn default() -> Self {
        Self::new(MappingFactory)
    }
}

impl std::fmt::Debug for Marshaller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marshaller").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagbridge_value::Text;

    #[test]
    fn tag_record_uses_absence_convention() {
        let tag = Tag {
            title: Text::from("Feeling Good"),
            year: 1965,
            ..Tag::default()
        };
        let record = Marshaller::default().tag(&tag);

        assert_eq!(record.get("title"), Some(&DynamicValue::text("Feeling Good")));
        assert_eq!(record.get("artist"), Some(&DynamicValue::Nil));
        assert_eq!(record.get("year"), Some(&DynamicValue::Integer(1965)));
        assert_eq!(record.get("track"), Some(&DynamicValue::Nil));

        let keys: Vec<_> = record.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys[0], MapKey::Symbol("title".into()));
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn audio_properties_keep_zero() {
        let props = AudioProperties {
            length_ms: 0,
            bitrate: 320,
            sample_rate: 44100,
            channels: 2,
        };
        let record = Marshaller::default().audio_properties(&props);
        assert_eq!(record.get("length_ms"), Some(&DynamicValue::Integer(0)));
        assert_eq!(record.get("sample_rate"), Some(&DynamicValue::Integer(44100)));
    }

    struct Positional;

    impl RecordFactory for Positional {
        fn tag_record(&self, record: TagRecord) -> DynamicValue {
            DynamicValue::Sequence(vec![record.title, record.year])
        }

        fn audio_properties_record(&self, record: AudioPropertiesRecord) -> DynamicValue {
            DynamicValue::Sequence(vec![record.channels])
        }
    }

    #[test]
    fn injected_factory_shapes_records() {
        let marshaller = Marshaller::new(Positional);
        let tag = Tag {
            track: 3,
            ..Tag::default()
        };
        assert_eq!(
            marshaller.tag(&tag),
            DynamicValue::Sequence(vec![DynamicValue::Nil, DynamicValue::Nil])
        );
        assert_eq!(
            marshaller.audio_properties(&AudioProperties::default()),
            DynamicValue::Sequence(vec![DynamicValue::Integer(0)])
        );
    }
}

use std::fs;
use std::path::Path;

use tagbridge::fileref::fixture::{self, FixtureLibrary, FixtureMetadata};
use tagbridge::marshal::{AudioPropertiesRecord, MappingFactory, TagRecord};
use tagbridge::value::{AudioProperties, Tag};
use tagbridge::{
    Bridge, DynamicValue, FileRefError, FileResource, MapKey, Mapping, OpenOptions,
    RecordFactory, Source, Text,
};
use tempfile::tempdir;

const PAYLOAD: &[u8] = b"\xFF\xFBaudio frames follow";

fn write_sample(path: &Path) {
    let metadata = FixtureMetadata {
        tag: Tag {
            title: Text::from("Feeling Good"),
            artist: Text::from("Nina Simone"),
            track: 7,
            ..Tag::default()
        },
        audio: AudioProperties {
            length_ms: 177_000,
            bitrate: 256,
            sample_rate: 48_000,
            channels: 2,
        },
        ..FixtureMetadata::default()
    };
    fs::write(path, fixture::encode(&metadata, PAYLOAD).unwrap()).unwrap();
}

fn mapping(entries: Vec<(&str, DynamicValue)>) -> DynamicValue {
    DynamicValue::Mapping(entries.into_iter().collect::<Mapping>())
}

#[test]
fn path_open_edit_save_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("feeling-good.tbmd");
    write_sample(&path);

    let bridge = Bridge::init(FixtureLibrary::default(), MappingFactory).unwrap();
    let path_value = DynamicValue::text(path.to_string_lossy());
    {
        let mut file = bridge
            .open_dynamic(&path_value, &DynamicValue::symbol("accurate"))
            .unwrap();
        assert!(file.is_valid());
        assert!(!file.is_read_only().unwrap());

        let props = file.audio_properties().unwrap();
        assert_eq!(props.get("sample_rate"), Some(&DynamicValue::Integer(48_000)));

        let mut updates = Mapping::new();
        updates.insert(MapKey::Symbol("album".into()), DynamicValue::text("I Put a Spell on You"));
        updates.insert(MapKey::Symbol("year".into()), DynamicValue::from(1965));
        updates.insert(MapKey::Symbol("track".into()), DynamicValue::Nil);
        file.merge_tag_properties(&DynamicValue::Mapping(updates))
            .unwrap();
        file.save().unwrap();
        file.close();
    }

    let file = bridge
        .open_dynamic(&path_value, &DynamicValue::Nil)
        .unwrap();
    let tag = file.tag().unwrap();
    assert_eq!(
        tag.get("album"),
        Some(&DynamicValue::text("I Put a Spell on You"))
    );
    assert_eq!(tag.get("year"), Some(&DynamicValue::Integer(1965)));
    assert_eq!(tag.get("track"), Some(&DynamicValue::Nil));
    assert_eq!(file.audio_properties().unwrap(), DynamicValue::Nil);

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.ends_with(PAYLOAD));
}

#[test]
fn stream_splice_grows_and_shrinks_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cover.tbmd");
    write_sample(&path);
    let original_len = fs::metadata(&path).unwrap().len();

    let bridge = Bridge::init(FixtureLibrary::default(), MappingFactory).unwrap();
    let mut resource = FileResource::open_read_write(&path).unwrap();
    {
        let mut file = bridge.open(Source::stream(&mut resource), OpenOptions::default());
        let picture = mapping(vec![
            ("mimeType", DynamicValue::text("image/jpeg")),
            ("data", DynamicValue::binary(vec![0xD8u8; 512])),
        ]);
        file.merge_complex_properties(
            &mapping(vec![("PICTURE", DynamicValue::Sequence(vec![picture]))]),
            false,
        )
        .unwrap();
        file.save().unwrap();
    }
    let grown_len = fs::metadata(&path).unwrap().len();
    assert!(grown_len > original_len);

    {
        let mut file = bridge.open(Source::stream(&mut resource), OpenOptions::default());
        assert_eq!(
            file.complex_property_keys().unwrap(),
            DynamicValue::Sequence(vec![DynamicValue::text("PICTURE")])
        );
        file.merge_complex_properties(&DynamicValue::Mapping(Mapping::new()), true)
            .unwrap();
        file.save().unwrap();
    }
    assert_eq!(fs::metadata(&path).unwrap().len(), original_len);

    let bytes = fs::read(&path).unwrap();
    let (metadata, payload) = fixture::decode(&bytes).unwrap();
    assert!(metadata.complex.is_empty());
    assert_eq!(payload, PAYLOAD);
}

#[test]
fn read_only_resource_cannot_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("locked.tbmd");
    write_sample(&path);

    let bridge = Bridge::init(FixtureLibrary::default(), MappingFactory).unwrap();
    let mut resource = FileResource::open_read_only(&path).unwrap();
    let mut file = bridge.open(Source::stream(&mut resource), OpenOptions::default());

    assert!(file.is_read_only().unwrap());
    assert!(matches!(file.save(), Err(FileRefError::SaveFailed { .. })));
}

#[test]
fn properties_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("props.tbmd");
    write_sample(&path);

    let bridge = Bridge::init(FixtureLibrary::default(), MappingFactory).unwrap();
    let mut resource = FileResource::open_read_write(&path).unwrap();
    let mut file = bridge.open(Source::stream(&mut resource), OpenOptions::default());

    file.merge_properties(
        &mapping(vec![
            (
                "GENRE",
                DynamicValue::Sequence(vec![DynamicValue::text("Jazz"), DynamicValue::text("Soul")]),
            ),
            ("COMPOSER", DynamicValue::text("Anthony Newley")),
        ]),
        false,
    )
    .unwrap();
    file.merge_properties(&mapping(vec![("COMPOSER", DynamicValue::Nil)]), false)
        .unwrap();

    assert_eq!(
        file.properties().unwrap(),
        mapping(vec![(
            "GENRE",
            DynamicValue::Sequence(vec![DynamicValue::text("Jazz"), DynamicValue::text("Soul")])
        )])
    );
}

struct Tuples;

impl RecordFactory for Tuples {
    fn tag_record(&self, record: TagRecord) -> DynamicValue {
        DynamicValue::Sequence(vec![record.title, record.artist, record.track])
    }

    fn audio_properties_record(&self, record: AudioPropertiesRecord) -> DynamicValue {
        DynamicValue::Sequence(vec![record.length_ms])
    }
}

#[test]
fn bridge_uses_injected_factory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("factory.tbmd");
    write_sample(&path);

    let bridge = Bridge::init(FixtureLibrary::default(), Tuples).unwrap();
    let file = bridge.open(Source::path(&path), OpenOptions::default());
    assert_eq!(
        file.tag().unwrap(),
        DynamicValue::Sequence(vec![
            DynamicValue::text("Feeling Good"),
            DynamicValue::text("Nina Simone"),
            DynamicValue::Integer(7),
        ])
    );
}

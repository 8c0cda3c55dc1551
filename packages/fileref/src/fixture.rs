//! An in-memory metadata library for tests.
//!
//! Files start with a metadata block: the magic `b"TBMD"`, a big-endian `u32`
//! length, then that many bytes of JSON. Everything after the block is opaque
//! payload. Saving rewrites the block in place with [`TagStream::insert`], so
//! a metadata block that grows or shrinks shifts the payload through the
//! splice emulation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tagbridge_stream::{FileResource, ResourceStream, SeekOrigin, StreamError, TagStream};
use tagbridge_value::{AudioProperties, ComplexPropertyList, PropertyMap, Tag, ValueMap};

use crate::{MetadataFile, MetadataLibrary, OpenOptions, Version};

pub const MAGIC: &[u8; 4] = b"TBMD";

const PREFIX_LEN: usize = 8;

/// Everything the fixture format stores.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureMetadata {
    pub tag: Tag,
    pub audio: AudioProperties,
    pub properties: PropertyMap,
    pub complex: BTreeMap<String, Vec<ValueMap>>,
}

/// Build the metadata block for `metadata`.
pub fn header(metadata: &FixtureMetadata) -> serde_json::Result<Vec<u8>> {
    let json = serde_json::to_vec(metadata)?;
    let mut block = Vec::with_capacity(PREFIX_LEN + json.len());
    block.extend_from_slice(MAGIC);
    block.extend_from_slice(&(json.len() as u32).to_be_bytes());
    block.extend_from_slice(&json);
    Ok(block)
}

/// Build a whole file.
pub fn encode(metadata: &FixtureMetadata, payload: &[u8]) -> serde_json::Result<Vec<u8>> {
    let mut bytes = header(metadata)?;
    bytes.extend_from_slice(payload);
    Ok(bytes)
}

/// Split a whole file into metadata and payload.
pub fn decode(bytes: &[u8]) -> Option<(FixtureMetadata, &[u8])> {
    let json_len = block_len(bytes.get(..PREFIX_LEN)?)?;
    let json = bytes.get(PREFIX_LEN..PREFIX_LEN + json_len)?;
    let metadata = serde_json::from_slice(json).ok()?;
    Some((metadata, &bytes[PREFIX_LEN + json_len..]))
}

fn block_len(prefix: &[u8]) -> Option<usize> {
    if prefix.get(..MAGIC.len())? != MAGIC {
        return None;
    }
    let len: [u8; 4] = prefix.get(MAGIC.len()..PREFIX_LEN)?.try_into().ok()?;
    usize::try_from(u32::from_be_bytes(len)).ok()
}

fn read_exact<S: TagStream + ?Sized>(stream: &mut S, len: usize) -> tagbridge_stream::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    while buf.len() < len {
        let block = stream.read_block(len - buf.len())?;
        if block.is_empty() {
            break;
        }
        buf.extend_from_slice(&block);
    }
    Ok(buf)
}

/// Read the metadata block from the start of `stream`. Returns the metadata
/// and the block's total length.
fn read_metadata<S: TagStream + ?Sized>(stream: &mut S) -> Option<(FixtureMetadata, u64)> {
    stream.seek(0, SeekOrigin::Start).ok()?;
    let prefix = read_exact(stream, PREFIX_LEN).ok()?;
    let json_len = block_len(&prefix)?;
    let json = read_exact(stream, json_len).ok()?;
    if json.len() != json_len {
        log::debug!("truncated metadata block in {}", stream.name());
        return None;
    }
    let metadata = serde_json::from_slice(&json).ok()?;
    Some((metadata, (PREFIX_LEN + json_len) as u64))
}

/// The fixture library. Defaults to version 2.0.1 for both compiled and
/// runtime versions.
#[derive(Clone, Copy, Debug)]
pub struct FixtureLibrary {
    compiled: Version,
    runtime: Version,
}

impl FixtureLibrary {
    pub fn with_versions(compiled: Version, runtime: Version) -> Self {
        Self { compiled, runtime }
    }
}

impl Default for FixtureLibrary {
    fn default() -> Self {
        let version = Version::new(2, 0, 1);
        Self::with_versions(version, version)
    }
}

impl MetadataLibrary for FixtureLibrary {
    fn compiled_version(&self) -> Version {
        self.compiled
    }

    fn runtime_version(&self) -> Version {
        self.runtime
    }

    fn open_path(&self, path: &Path, options: &OpenOptions) -> Option<Box<dyn MetadataFile>> {
        let mut resource = FileResource::open_read_only(path).ok()?;
        let (metadata, header_len) = read_metadata(&mut ResourceStream::new(&mut resource))?;
        Some(Box::new(FixtureFile {
            backing: Backing::Path(path.to_path_buf()),
            metadata,
            header_len,
            audio: options.reads_audio_properties(),
        }))
    }

    fn open_stream<'s>(
        &self,
        mut stream: Box<dyn TagStream + 's>,
        options: &OpenOptions,
    ) -> Option<Box<dyn MetadataFile + 's>> {
        let (metadata, header_len) = read_metadata(stream.as_mut())?;
        Some(Box::new(FixtureFile {
            backing: Backing::Stream(stream),
            metadata,
            header_len,
            audio: options.reads_audio_properties(),
        }))
    }
}

enum Backing<'s> {
    Stream(Box<dyn TagStream + 's>),
    Path(PathBuf),
}

struct FixtureFile<'s> {
    backing: Backing<'s>,
    metadata: FixtureMetadata,
    header_len: u64,
    audio: bool,
}

impl FixtureFile<'_> {
    fn rewrite_header<S: TagStream + ?Sized>(
        stream: &mut S,
        block: &[u8],
        old_len: u64,
    ) -> tagbridge_stream::Result<()> {
        log::debug!(
            "rewriting metadata block of {}: {} -> {} bytes",
            stream.name(),
            old_len,
            block.len()
        );
        stream.insert(block, 0, old_len)
    }
}

impl MetadataFile for FixtureFile<'_> {
    fn name(&self) -> String {
        match &self.backing {
            Backing::Stream(stream) => stream.name(),
            Backing::Path(path) => path.display().to_string(),
        }
    }

    fn file_type(&self) -> &str {
        "FixtureFile"
    }

    fn tag_type(&self) -> &str {
        "FixtureTag"
    }

    fn read_only(&self) -> bool {
        match &self.backing {
            Backing::Stream(stream) => stream.read_only(),
            Backing::Path(path) => std::fs::metadata(path)
                .map(|m| m.permissions().readonly())
                .unwrap_or(true),
        }
    }

    fn tag(&self) -> Option<&Tag> {
        Some(&self.metadata.tag)
    }

    fn tag_mut(&mut self) -> Option<&mut Tag> {
        Some(&mut self.metadata.tag)
    }

    fn audio_properties(&self) -> Option<AudioProperties> {
        self.audio.then_some(self.metadata.audio)
    }

    fn properties(&self) -> PropertyMap {
        self.metadata.properties.clone()
    }

    fn set_properties(&mut self, properties: PropertyMap) {
        self.metadata.properties = properties;
    }

    fn complex_property_keys(&self) -> Vec<String> {
        self.metadata.complex.keys().cloned().collect()
    }

    fn complex_properties(&self, key: &str) -> ComplexPropertyList {
        self.metadata.complex.get(key).cloned().unwrap_or_default()
    }

    fn set_complex_properties(&mut self, key: &str, records: ComplexPropertyList) -> bool {
        if records.is_empty() {
            self.metadata.complex.remove(key);
        } else {
            self.metadata.complex.insert(key.to_string(), records);
        }
        true
    }

    fn save(&mut self) -> tagbridge_stream::Result<bool> {
        if self.read_only() {
            return Ok(false);
        }
        let block = header(&self.metadata).map_err(StreamError::transport)?;
        match &mut self.backing {
            Backing::Stream(stream) => Self::rewrite_header(stream.as_mut(), &block, self.header_len)?,
            Backing::Path(path) => {
                let mut resource = FileResource::open_read_write(&*path)?;
                Self::rewrite_header(&mut ResourceStream::new(&mut resource), &block, self.header_len)?;
            }
        }
        self.header_len = block.len() as u64;
        Ok(true)
    }
}

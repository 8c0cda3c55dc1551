//! The boundary to the typed metadata library.
//!
//! The library itself (format detection, tag parsing, on-disk encodings) is
//! not part of this crate. These traits describe what the file handle needs
//! from it.

use std::path::Path;

use tagbridge_stream::TagStream;
use tagbridge_value::{AudioProperties, ComplexPropertyList, PropertyMap, Tag};

use crate::{OpenOptions, Version};

/// A metadata library able to parse files from a path or a stream.
///
/// # Object Safety
///
/// This trait is object-safe; a bridge can hold `Box<dyn MetadataLibrary>`.
pub trait MetadataLibrary {
    /// The version the bridge was built against.
    fn compiled_version(&self) -> Version;

    /// The version actually loaded.
    fn runtime_version(&self) -> Version;

    /// Parse the file at `path`. `None` when the file cannot be parsed.
    fn open_path(&self, path: &Path, options: &OpenOptions) -> Option<Box<dyn MetadataFile>>;

    /// Parse a stream. The library keeps the stream for later reads and
    /// writes; on failure it drops it before returning `None`.
    fn open_stream<'s>(
        &self,
        stream: Box<dyn TagStream + 's>,
        options: &OpenOptions,
    ) -> Option<Box<dyn MetadataFile + 's>>;
}

impl<T: MetadataLibrary + ?Sized> MetadataLibrary for Box<T> {
    fn compiled_version(&self) -> Version {
        (**self).compiled_version()
    }

    fn runtime_version(&self) -> Version {
        (**self).runtime_version()
    }

    fn open_path(&self, path: &Path, options: &OpenOptions) -> Option<Box<dyn MetadataFile>> {
        (**self).open_path(path, options)
    }

    fn open_stream<'s>(
        &self,
        stream: Box<dyn TagStream + 's>,
        options: &OpenOptions,
    ) -> Option<Box<dyn MetadataFile + 's>> {
        (**self).open_stream(stream, options)
    }
}

/// A parsed file.
pub trait MetadataFile {
    /// Display name of the underlying file or stream.
    fn name(&self) -> String;

    /// Name of the concrete file format, for diagnostics.
    fn file_type(&self) -> &str;

    /// Name of the concrete tag implementation, for diagnostics.
    fn tag_type(&self) -> &str;

    fn is_valid(&self) -> bool {
        true
    }

    fn read_only(&self) -> bool;

    fn tag(&self) -> Option<&Tag>;

    fn tag_mut(&mut self) -> Option<&mut Tag>;

    /// `None` unless audio properties were requested at open.
    fn audio_properties(&self) -> Option<AudioProperties>;

    fn properties(&self) -> PropertyMap;

    fn set_properties(&mut self, properties: PropertyMap);

    fn complex_property_keys(&self) -> Vec<String> {
        Vec::new()
    }

    fn complex_properties(&self, _key: &str) -> ComplexPropertyList {
        Vec::new()
    }

    /// Replace the records under `key`; an empty list removes them.
    /// Returns `false` if the format cannot store the key.
    fn set_complex_properties(&mut self, _key: &str, _records: ComplexPropertyList) -> bool {
        false
    }

    /// Write pending changes. `Ok(false)` when the library declines.
    fn save(&mut self) -> tagbridge_stream::Result<bool>;
}

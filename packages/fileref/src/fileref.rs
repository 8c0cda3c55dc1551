//! The host-facing file handle.

use std::fmt;

use tagbridge_marshal::{
    complex_list_to_dynamic, complex_updates, keys_to_dynamic, merge_properties,
    merge_tag_properties, property_map_to_dynamic, DynamicValue, Marshaller,
};
use tagbridge_stream::{ResourceStream, TagStream};

use crate::{FileRefError, MetadataFile, MetadataLibrary, OpenOptions, Result, Source};

/// First major library version with complex properties.
pub const COMPLEX_PROPERTIES_SINCE: u32 = 2;

const COMPLEX_PROPERTIES: &str = "complex properties";

/// An open (or failed, or closed) metadata file.
///
/// The handle exclusively owns the library's parse result. When opened from a
/// stream it also owns the adapter wrapping the caller's resource, but never
/// the resource itself: [`close`](Self::close) and drop release the adapter
/// and leave the resource open.
///
/// Every accessor fails with [`FileRefError::InvalidHandle`] once the handle
/// is closed or if parsing failed.
pub struct FileRef<'a> {
    file: Option<Box<dyn MetadataFile + 'a>>,
    marshaller: &'a Marshaller,
    compiled_major: u32,
}

impl<'a> FileRef<'a> {
    /// Open `source` with `library`. A source the library cannot parse gives
    /// an invalid handle, not an error.
    pub fn open<L: MetadataLibrary + ?Sized>(
        library: &L,
        marshaller: &'a Marshaller,
        source: Source<'a>,
        options: OpenOptions,
    ) -> Self {
        let file = match source {
            Source::Path(path) if path.as_os_str().is_empty() => None,
            Source::Path(path) => {
                log::debug!("opening {}", path.display());
                library.open_path(&path, &options)
            }
            Source::Stream(resource) => {
                let stream: Box<dyn TagStream + 'a> = Box::new(ResourceStream::new(resource));
                log::debug!("opening stream {}", stream.name());
                let file = library.open_stream(stream, &options);
                if file.is_none() {
                    log::debug!("stream could not be parsed, adapter released");
                }
                file
            }
        };

        Self {
            file,
            marshaller,
            compiled_major: library.compiled_version().major,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.file.as_ref().is_some_and(|file| file.is_valid())
    }

    /// Release the parse result and any stream adapter. Idempotent.
    pub fn close(&mut self) {
        if let Some(file) = self.file.take() {
            log::debug!("closing {}", file.name());
        }
    }

    pub fn supports_complex_properties(&self) -> bool {
        self.compiled_major >= COMPLEX_PROPERTIES_SINCE
    }

    fn file(&self) -> Result<&(dyn MetadataFile + 'a)> {
        match &self.file {
            Some(file) if file.is_valid() => Ok(file.as_ref()),
            _ => Err(FileRefError::InvalidHandle),
        }
    }

    fn file_mut(&mut self) -> Result<&mut (dyn MetadataFile + 'a)> {
        match &mut self.file {
            Some(file) if file.is_valid() => Ok(file.as_mut()),
            _ => Err(FileRefError::InvalidHandle),
        }
    }

    fn unsupported(&self) -> FileRefError {
        FileRefError::UnsupportedFeature {
            feature: COMPLEX_PROPERTIES,
            major: self.compiled_major,
        }
    }

    pub fn is_read_only(&self) -> Result<bool> {
        Ok(self.file()?.read_only())
    }

    /// The basic tag as a host record, or `Nil` if the file has no tag.
    pub fn tag(&self) -> Result<DynamicValue> {
        Ok(self
            .file()?
            .tag()
            .map_or(DynamicValue::Nil, |tag| self.marshaller.tag(tag)))
    }

    /// Audio properties as a host record, or `Nil` when not requested at open.
    pub fn audio_properties(&self) -> Result<DynamicValue> {
        Ok(self
            .file()?
            .audio_properties()
            .map_or(DynamicValue::Nil, |props| {
                self.marshaller.audio_properties(&props)
            }))
    }

    pub fn properties(&self) -> Result<DynamicValue> {
        Ok(property_map_to_dynamic(&self.file()?.properties()))
    }

    /// Keys that have complex properties; empty when the library lacks them.
    pub fn complex_property_keys(&self) -> Result<DynamicValue> {
        let file = self.file()?;
        if !self.supports_complex_properties() {
            return Ok(DynamicValue::Sequence(Vec::new()));
        }
        let keys = file.complex_property_keys();
        Ok(keys_to_dynamic(keys.iter().map(String::as_str)))
    }

    pub fn complex_property(&self, key: &str) -> Result<DynamicValue> {
        let file = self.file()?;
        if !self.supports_complex_properties() {
            return Err(self.unsupported());
        }
        Ok(complex_list_to_dynamic(&file.complex_properties(key)))
    }

    /// Replace the listed property keys; with `replace_all`, drop the rest.
    pub fn merge_properties(&mut self, updates: &DynamicValue, replace_all: bool) -> Result<()> {
        let file = self.file_mut()?;
        let merged = merge_properties(&file.properties(), updates, replace_all)?;
        file.set_properties(merged);
        Ok(())
    }

    /// Set basic tag fields. Fields before a failing key stay applied.
    pub fn merge_tag_properties(&mut self, updates: &DynamicValue) -> Result<()> {
        let tag = self
            .file_mut()?
            .tag_mut()
            .ok_or_else(|| FileRefError::invalid_argument("file has no tag"))?;
        merge_tag_properties(tag, updates)?;
        Ok(())
    }

    /// Replace the listed complex property keys; with `replace_all`, clear
    /// every existing key first.
    ///
    /// Only the cleared keys and the updated keys are written back. Every
    /// update is converted before the file is touched. A key the library
    /// refuses to store is skipped with a warning and the merge still
    /// succeeds.
    pub fn merge_complex_properties(
        &mut self,
        updates: &DynamicValue,
        replace_all: bool,
    ) -> Result<()> {
        self.file()?;
        if !self.supports_complex_properties() {
            return match updates.as_mapping() {
                Some(mapping) if mapping.is_empty() => Ok(()),
                _ => Err(self.unsupported()),
            };
        }

        let updates = complex_updates(updates)?;
        let file = self.file_mut()?;
        if replace_all {
            for key in file.complex_property_keys() {
                file.set_complex_properties(&key, Vec::new());
            }
        }
        for (key, records) in updates {
            if !file.set_complex_properties(&key, records) {
                log::warn!("{} cannot store complex property {}", file.name(), key);
            }
        }
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        let file = self.file_mut()?;
        log::debug!("saving {}", file.name());
        if file.save()? {
            Ok(())
        } else {
            Err(FileRefError::SaveFailed { name: file.name() })
        }
    }

    /// Longer description including the format and tag implementation.
    pub fn inspect(&self) -> String {
        match self.file() {
            Ok(file) => format!(
                "FileRef [io='{}', file_type={}, tag_type={}]",
                file.name(),
                file.file_type(),
                file.tag_type()
            ),
            Err(_) => "FileRef [valid=false]".to_string(),
        }
    }
}

impl fmt::Display for FileRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.file() {
            Ok(file) => write!(f, "FileRef [io={}]", file.name()),
            Err(_) => f.write_str("FileRef [valid=false]"),
        }
    }
}

impl fmt::Debug for FileRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

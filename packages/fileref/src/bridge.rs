//! Setup: the version gate and the injected record factory.

use tagbridge_marshal::{DynamicValue, Marshaller, RecordFactory};

use crate::version::check_compatible;
use crate::{FileRef, MetadataLibrary, OpenOptions, ReadStyle, Result, Source, Version};

/// A checked metadata library plus the marshaller its handles share.
///
/// Created once at startup. There is no global state; every [`FileRef`]
/// borrows its bridge.
#[derive(Debug)]
pub struct Bridge<L> {
    library: L,
    marshaller: Marshaller,
}

impl<L: MetadataLibrary> Bridge<L> {
    /// Check the library version and set up record construction.
    ///
    /// Fails with `VersionMismatch` if the compiled and runtime major versions
    /// differ.
    pub fn init(library: L, factory: impl RecordFactory + 'static) -> Result<Self> {
        check_compatible(library.compiled_version(), library.runtime_version())?;
        log::debug!(
            "metadata library {} ready (compiled for {})",
            library.runtime_version(),
            library.compiled_version()
        );
        Ok(Self {
            library,
            marshaller: Marshaller::new(factory),
        })
    }

    /// The runtime library version.
    pub fn version(&self) -> Version {
        self.library.runtime_version()
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn marshaller(&self) -> &Marshaller {
        &self.marshaller
    }

    pub fn open<'a>(&'a self, source: Source<'a>, options: OpenOptions) -> FileRef<'a> {
        FileRef::open(&self.library, &self.marshaller, source, options)
    }

    /// Open from host values: a path string and an audio-properties request
    /// (see [`ReadStyle::from_dynamic`]).
    pub fn open_dynamic(&self, path: &DynamicValue, style: &DynamicValue) -> Result<FileRef<'_>> {
        let source = Source::try_from(path)?;
        let options = OpenOptions {
            audio_properties: ReadStyle::from_dynamic(style)?,
        };
        Ok(self.open(source, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureLibrary;
    use crate::FileRefError;
    use tagbridge_marshal::MappingFactory;

    #[test]
    fn init_checks_major_version() {
        let library = FixtureLibrary::with_versions(Version::new(2, 0, 0), Version::new(1, 13, 1));
        assert!(matches!(
            Bridge::init(library, MappingFactory),
            Err(FileRefError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn init_tolerates_older_minor() {
        let library = FixtureLibrary::with_versions(Version::new(2, 1, 0), Version::new(2, 0, 1));
        let bridge = Bridge::init(library, MappingFactory).unwrap();
        assert_eq!(bridge.version().to_string(), "2.0.1");
    }

    #[test]
    fn open_dynamic_rejects_non_paths() {
        let bridge = Bridge::init(FixtureLibrary::default(), MappingFactory).unwrap();
        assert!(matches!(
            bridge.open_dynamic(&DynamicValue::from(3), &DynamicValue::Nil),
            Err(FileRefError::UnsupportedInput { found: "integer" })
        ));
        assert!(matches!(
            bridge.open_dynamic(&DynamicValue::text("x"), &DynamicValue::symbol("slow")),
            Err(FileRefError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn open_dynamic_missing_file_is_invalid_handle() {
        let bridge = Bridge::init(FixtureLibrary::default(), MappingFactory).unwrap();
        let file = bridge
            .open_dynamic(
                &DynamicValue::text("/definitely/not/here.tbmd"),
                &DynamicValue::Bool(true),
            )
            .unwrap();
        assert!(!file.is_valid());
    }
}

//! tagbridge: dynamic host values over a typed audio metadata library.
//!
//! The layers, leaf first:
//! - [`stream`]: host resources and the splice-capable stream the library reads
//! - [`value`]: the typed value model and its projections
//! - [`marshal`]: conversion between dynamic host values and typed values
//! - [`fileref`]: the host-facing file handle
//!
//! The most used types are re-exported at the crate root.

pub use tagbridge_fileref as fileref;
pub use tagbridge_marshal as marshal;
pub use tagbridge_stream as stream;
pub use tagbridge_value as value;

pub use tagbridge_fileref::{
    Bridge, FileRef, FileRefError, MetadataFile, MetadataLibrary, OpenOptions, ReadStyle, Source,
    Version,
};
pub use tagbridge_marshal::{
    to_dynamic, to_value, to_value_as, DynamicValue, MapKey, Mapping, MarshalError, Marshaller,
    RecordFactory,
};
pub use tagbridge_stream::{FileResource, MemoryResource, Resource, ResourceStream, TagStream};
pub use tagbridge_value::{Text, Value, ValueKind, ValueMap};

//! tagbridge-fileref: the host-facing file handle
//!
//! Ties the lower layers together:
//! - a [`MetadataLibrary`] parses files, from a path or from a host resource
//!   wrapped in a splice-capable stream
//! - [`FileRef`] owns the parse result and exposes tag, audio properties,
//!   property map and complex properties as dynamic values
//! - [`Bridge`] checks the library version once and carries the record
//!   factory every handle uses
//!
//! # Lifetimes
//!
//! A handle opened from a stream borrows the caller's resource for as long as
//! the handle lives. Closing or dropping the handle ends the borrow; the
//! resource itself is never closed here.
//!
//! # Example
//!
//! ```rust,ignore
//! use tagbridge_fileref::{Bridge, OpenOptions, ReadStyle, Source};
//! use tagbridge_marshal::MappingFactory;
//! use tagbridge_stream::MemoryResource;
//!
//! let bridge = Bridge::init(my_library, MappingFactory)?;
//! let mut resource = MemoryResource::new(bytes);
//! let mut file = bridge.open(
//!     Source::stream(&mut resource),
//!     OpenOptions::new().read_audio_properties(ReadStyle::Fast),
//! );
//! let tag = file.tag()?;
//! file.save()?;
//! ```

mod bridge;
mod error;
mod fileref;
mod library;
mod options;
mod source;
mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixture;

pub use bridge::Bridge;
pub use error::{FileRefError, Result};
pub use fileref::{FileRef, COMPLEX_PROPERTIES_SINCE};
pub use library::{MetadataFile, MetadataLibrary};
pub use options::{OpenOptions, ReadStyle};
pub use source::Source;
pub use version::{check_compatible, Version};

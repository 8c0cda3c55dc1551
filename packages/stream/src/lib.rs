//! tagbridge-stream: splice-capable octet streams over host resources
//!
//! This is the narrow waist between a host's I/O object and the typed metadata
//! library. Everything at this level is pure bytes - no tag semantics, no
//! format interpretation.
//!
//! Two contracts live here:
//! - [`Resource`]: the primitives a host exposes (read/write/seek/tell/truncate)
//! - [`TagStream`]: what the metadata library needs, including insert-with-shift
//!   and remove-with-shift
//!
//! [`ResourceStream`] bridges the two. It borrows the resource and never closes it.
//!
//! # Example
//!
//! ```rust
//! use tagbridge_stream::{MemoryResource, ResourceStream, TagStream};
//!
//! let mut resource = MemoryResource::new(b"0123456789".to_vec());
//! {
//!     let mut stream = ResourceStream::new(&mut resource);
//!     stream.insert(b"abc", 2, 3).unwrap();
//! }
//! assert_eq!(resource.as_slice(), b"01abc56789");
//! ```

pub use bytes::Bytes;

mod adapter;
mod error;
mod file;
mod memory;
mod resource;
mod traits;

pub use adapter::ResourceStream;
pub use error::{Result, StreamError};
pub use file::FileResource;
pub use memory::MemoryResource;
pub use resource::{Resource, SeekOrigin};
pub use traits::TagStream;

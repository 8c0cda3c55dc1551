//! The host-side resource contract.

use std::fmt;

use bytes::Bytes;

use crate::Result;

/// Origin for a seek, mirroring `SEEK_SET`, `SEEK_CUR` and `SEEK_END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeekOrigin {
    #[default]
    Start,
    Current,
    End,
}

/// Primitive operations a host exposes on an I/O object it owns.
///
/// A `Resource` is never owned by the stream layer. The adapter borrows it,
/// drives it, and hands it back untouched when it is dropped: closing is the
/// caller's business.
///
/// The `Display` implementation is the resource's own string representation,
/// used as the stream name in diagnostics.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&mut dyn Resource`.
pub trait Resource: fmt::Display {
    /// Read up to `max_len` bytes from the current position.
    ///
    /// * `Ok(None)` - end of resource.
    /// * `Ok(Some(bytes))` - at most `max_len` bytes.
    fn read(&mut self, max_len: usize) -> Result<Option<Bytes>>;

    /// Read everything from the current position to the end.
    ///
    /// Returns an empty buffer at end of resource.
    fn read_to_end(&mut self) -> Result<Bytes>;

    /// Write all of `data` at the current position, advancing it.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Move the current position.
    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<()>;

    /// Current position, in bytes from the start.
    fn tell(&mut self) -> Result<u64>;

    /// Cut or extend the resource to exactly `len` bytes.
    fn truncate(&mut self, len: u64) -> Result<()>;

    /// Whether the host has closed the resource.
    fn is_closed(&self) -> bool;

    /// Whether the host declares the resource writable.
    fn is_writable(&self) -> bool;
}

impl<T: Resource + ?Sized> Resource for &mut T {
    fn read(&mut self, max_len: usize) -> Result<Option<Bytes>> {
        (**self).read(max_len)
    }

    fn read_to_end(&mut self) -> Result<Bytes> {
        (**self).read_to_end()
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<()> {
        (**self).seek(offset, origin)
    }

    fn tell(&mut self) -> Result<u64> {
        (**self).tell()
    }

    fn truncate(&mut self, len: u64) -> Result<()> {
        (**self).truncate(len)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }

    fn is_writable(&self) -> bool {
        (**self).is_writable()
    }
}

impl<T: Resource + ?Sized> Resource for Box<T> {
    fn read(&mut self, max_len: usize) -> Result<Option<Bytes>> {
        self.as_mut().read(max_len)
    }

    fn read_to_end(&mut self) -> Result<Bytes> {
        self.as_mut().read_to_end()
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.as_mut().write(data)
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<()> {
        self.as_mut().seek(offset, origin)
    }

    fn tell(&mut self) -> Result<u64> {
        self.as_mut().tell()
    }

    fn truncate(&mut self, len: u64) -> Result<()> {
        self.as_mut().truncate(len)
    }

    fn is_closed(&self) -> bool {
        self.as_ref().is_closed()
    }

    fn is_writable(&self) -> bool {
        self.as_ref().is_writable()
    }
}

//! The stream contract required by the typed metadata library.

use bytes::Bytes;

use crate::{Result, SeekOrigin};

/// A random-access octet stream with splice operations.
///
/// This is what a tag parser reads from and writes back to. On top of the
/// usual read/write/seek/tell/truncate it can insert or remove bytes at any
/// offset, shifting everything after the affected region.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn TagStream>`.
pub trait TagStream {
    /// Display name for diagnostics.
    fn name(&self) -> String;

    /// Read up to `length` bytes from the current position.
    ///
    /// Returns an empty buffer at end of stream, never an error for that case.
    fn read_block(&mut self, length: usize) -> Result<Bytes>;

    /// Write `data` at the current position, advancing it.
    fn write_block(&mut self, data: &[u8]) -> Result<()>;

    /// Replace `replace` bytes at `start` with `data`, shifting the tail.
    fn insert(&mut self, data: &[u8], start: u64, replace: u64) -> Result<()>;

    /// Remove `length` bytes at `start`, shifting the tail down.
    fn remove_block(&mut self, start: u64, length: u64) -> Result<()>;

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<()>;

    fn tell(&mut self) -> Result<u64>;

    /// Total length. The current position is left where it was.
    fn length(&mut self) -> Result<u64>;

    fn truncate(&mut self, length: u64) -> Result<()>;

    fn is_open(&self) -> bool;

    fn read_only(&self) -> bool;

    /// Reset any locally buffered state.
    fn clear(&mut self);
}

// Blanket implementations for references and boxes

impl<T: TagStream + ?Sized> TagStream for &mut T {
    fn name(&self) -> String {
        (**self).name()
    }

    fn read_block(&mut self, length: usize) -> Result<Bytes> {
        (**self).read_block(length)
    }

    fn write_block(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_block(data)
    }

    fn insert(&mut self, data: &[u8], start: u64, replace: u64) -> Result<()> {
        (**self).insert(data, start, replace)
    }

    fn remove_block(&mut self, start: u64, length: u64) -> Result<()> {
        (**self).remove_block(start, length)
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<()> {
        (**self).seek(offset, origin)
    }

    fn tell(&mut self) -> Result<u64> {
        (**self).tell()
    }

    fn length(&mut self) -> Result<u64> {
        (**self).length()
    }

    fn truncate(&mut self, length: u64) -> Result<()> {
        (**self).truncate(length)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn read_only(&self) -> bool {
        (**self).read_only()
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}

impl<T: TagStream + ?Sized> TagStream for Box<T> {
    fn name(&self) -> String {
        self.as_ref().name()
    }

    fn read_block(&mut self, length: usize) -> Result<Bytes> {
        self.as_mut().read_block(length)
    }

    fn write_block(&mut self, data: &[u8]) -> Result<()> {
        self.as_mut().write_block(data)
    }

    fn insert(&mut self, data: &[u8], start: u64, replace: u64) -> Result<()> {
        self.as_mut().insert(data, start, replace)
    }

    fn remove_block(&mut self, start: u64, length: u64) -> Result<()> {
        self.as_mut().remove_block(start, length)
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<()> {
        self.as_mut().seek(offset, origin)
    }

    fn tell(&mut self) -> Result<u64> {
        self.as_mut().tell()
    }

    fn length(&mut self) -> Result<u64> {
        self.as_mut().length()
    }

    fn truncate(&mut self, length: u64) -> Result<()> {
        self.as_mut().truncate(length)
    }

    fn is_open(&self) -> bool {
        self.as_ref().is_open()
    }

    fn read_only(&self) -> bool {
        self.as_ref().read_only()
    }

    fn clear(&mut self) {
        self.as_mut().clear()
    }
}

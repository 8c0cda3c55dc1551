//! Adapter presenting a borrowed [`Resource`] as a [`TagStream`].

use bytes::Bytes;

use crate::{Resource, Result, SeekOrigin, StreamError, TagStream};

/// Wraps a host resource and emulates splice operations on it.
///
/// The resource is borrowed for the adapter's lifetime and is never closed or
/// dropped by it. Dropping the adapter releases nothing but the adapter.
///
/// # Splice emulation
///
/// The resource has no insert/remove primitive, so [`insert`](TagStream::insert)
/// and [`remove_block`](TagStream::remove_block) read the *entire* tail after the
/// affected region into memory, write it back at its shifted offset and
/// truncate to the new length. Memory use is bounded by the size of that tail.
/// Tag regions usually sit near the start of a media file, so the tail is
/// most of the file; callers splicing large resources should expect a buffer
/// of that size.
///
/// These sequences are not transactional. If the resource fails midway the
/// error is returned unchanged and whatever was already written stays written.
///
/// # Example
///
/// ```rust
/// use tagbridge_stream::{MemoryResource, ResourceStream, TagStream};
///
/// let mut resource = MemoryResource::new(b"header-payload".to_vec());
/// let mut stream = ResourceStream::new(&mut resource);
/// stream.remove_block(0, 7).unwrap();
/// assert_eq!(stream.length().unwrap(), 7);
/// ```
pub struct ResourceStream<'r, R: Resource + ?Sized> {
    resource: &'r mut R,
    read_only: bool,
}

impl<'r, R: Resource + ?Sized> ResourceStream<'r, R> {
    /// Wrap a resource. Its writability is sampled once, here.
    pub fn new(resource: &'r mut R) -> Self {
        let read_only = !resource.is_writable();
        Self {
            resource,
            read_only,
        }
    }

    /// Get a reference to the wrapped resource.
    pub fn inner(&self) -> &R {
        self.resource
    }

    /// Give the borrow back.
    pub fn into_inner(self) -> &'r mut R {
        self.resource
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        let offset = i64::try_from(offset).map_err(|_| StreamError::InvalidSeek {
            offset: i64::MAX,
            origin: SeekOrigin::Start,
        })?;
        self.resource.seek(offset, SeekOrigin::Start)
    }

    /// Everything from `offset` to the end of the resource.
    fn read_tail(&mut self, offset: u64) -> Result<Bytes> {
        self.seek_to(offset)?;
        self.resource.read_to_end()
    }
}

impl<R: Resource + ?Sized> TagStream for ResourceStream<'_, R> {
    fn name(&self) -> String {
        self.resource.to_string()
    }

    fn read_block(&mut self, length: usize) -> Result<Bytes> {
        let block = self.resource.read(length)?.unwrap_or_default();
        log::trace!("read {} of {} requested bytes", block.len(), length);
        Ok(block)
    }

    fn write_block(&mut self, data: &[u8]) -> Result<()> {
        self.resource.write(data)
    }

    fn insert(&mut self, data: &[u8], start: u64, replace: u64) -> Result<()> {
        let tail_start = start.checked_add(replace).ok_or(StreamError::InvalidSeek {
            offset: i64::MAX,
            origin: SeekOrigin::Start,
        })?;
        let remainder = self.read_tail(tail_start)?;
        log::debug!(
            "insert {} bytes at {} replacing {}; buffering {} tail bytes",
            data.len(),
            start,
            replace,
            remainder.len()
        );

        self.seek_to(start)?;
        self.resource.write(data)?;
        if !remainder.is_empty() {
            self.resource.write(&remainder)?;
        }

        let new_length = start + data.len() as u64 + remainder.len() as u64;
        self.resource.truncate(new_length)
    }

    fn remove_block(&mut self, start: u64, length: u64) -> Result<()> {
        if start >= self.length()? {
            return Ok(());
        }
        let tail_start = start.saturating_add(length);
        let remainder = self.read_tail(tail_start)?;
        log::debug!(
            "remove {} bytes at {}; buffering {} tail bytes",
            length,
            start,
            remainder.len()
        );

        self.seek_to(start)?;
        if !remainder.is_empty() {
            self.resource.write(&remainder)?;
        }

        self.resource.truncate(start + remainder.len() as u64)
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<()> {
        self.resource.seek(offset, origin)
    }

    fn tell(&mut self) -> Result<u64> {
        self.resource.tell()
    }

    fn length(&mut self) -> Result<u64> {
        let current = self.resource.tell()?;
        let end = self
            .resource
            .seek(0, SeekOrigin::End)
            .and_then(|_| self.resource.tell());
        let restored = self.seek_to(current);
        let length = end?;
        restored?;
        Ok(length)
    }

    fn truncate(&mut self, length: u64) -> Result<()> {
        self.resource.truncate(length)
    }

    fn is_open(&self) -> bool {
        !self.resource.is_closed()
    }

    fn read_only(&self) -> bool {
        self.read_only
    }

    fn clear(&mut self) {}
}

//! In-memory resource.

use std::fmt;

use bytes::Bytes;

use crate::{Resource, Result, SeekOrigin, StreamError};

/// A growable in-memory buffer exposing the [`Resource`] primitives.
///
/// Behaves like a host file object: writes past the end zero-fill the gap,
/// truncation does not move the position, and every operation fails with
/// [`StreamError::Closed`] once [`close`](Self::close) has been called.
///
/// # Example
///
/// ```rust
/// use tagbridge_stream::{MemoryResource, Resource, SeekOrigin};
///
/// let mut resource = MemoryResource::new(b"hello".to_vec());
/// resource.seek(0, SeekOrigin::End).unwrap();
/// resource.write(b" world").unwrap();
/// assert_eq!(resource.as_slice(), b"hello world");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryResource {
    data: Vec<u8>,
    position: u64,
    closed: bool,
    writable: bool,
    label: Option<String>,
}

impl MemoryResource {
    /// Create a writable resource holding `data`, positioned at the start.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            position: 0,
            closed: false,
            writable: true,
            label: None,
        }
    }

    /// Create a resource that rejects writes and truncation.
    pub fn read_only(data: Vec<u8>) -> Self {
        Self {
            writable: false,
            ..Self::new(data)
        }
    }

    /// Set the string representation reported through `Display`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the resource closed. Later operations fail.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Current contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Length of the contents.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Unwrap and return the contents.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        Ok(())
    }

    fn ensure_writable(&self) -> Result<()> {
        self.ensure_open()?;
        if !self.writable {
            return Err(StreamError::ReadOnly);
        }
        Ok(())
    }

    fn remaining(&self) -> &[u8] {
        let len = self.data.len();
        let start = usize::try_from(self.position).map_or(len, |p| p.min(len));
        &self.data[start..]
    }

    /// Zero-fill up to `len` bytes. Fails instead of aborting when the
    /// buffer cannot grow that far.
    fn grow_to(&mut self, len: u64) -> Result<()> {
        let len = usize::try_from(len).map_err(StreamError::transport)?;
        if let Some(extra) = len.checked_sub(self.data.len()) {
            self.data.try_reserve(extra).map_err(StreamError::transport)?;
            self.data.resize(len, 0);
        }
        Ok(())
    }
}

impl fmt::Display for MemoryResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "memory[{} bytes]", self.data.len()),
        }
    }
}

impl Resource for MemoryResource {
    fn read(&mut self, max_len: usize) -> Result<Option<Bytes>> {
        self.ensure_open()?;
        let remaining = self.remaining();
        if remaining.is_empty() && max_len > 0 {
            return Ok(None);
        }
        let take = remaining.len().min(max_len);
        let chunk = Bytes::copy_from_slice(&remaining[..take]);
        self.position += take as u64;
        Ok(Some(chunk))
    }

    fn read_to_end(&mut self) -> Result<Bytes> {
        self.ensure_open()?;
        let chunk = Bytes::copy_from_slice(self.remaining());
        self.position += chunk.len() as u64;
        Ok(chunk)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_writable()?;
        let end = self
            .position
            .checked_add(data.len() as u64)
            .ok_or(StreamError::InvalidSeek {
                offset: i64::MAX,
                origin: SeekOrigin::Current,
            })?;
        self.grow_to(end)?;
        // grow_to succeeded, so `end` fits in usize.
        let end = end as usize;
        self.data[end - data.len()..end].copy_from_slice(data);
        self.position = end as u64;
        Ok(())
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<()> {
        self.ensure_open()?;
        let base = match origin {
            SeekOrigin::Start => 0,
            SeekOrigin::Current => self.position as i64,
            SeekOrigin::End => self.data.len() as i64,
        };
        let target = base
            .checked_add(offset)
            .filter(|target| *target >= 0)
            .ok_or(StreamError::InvalidSeek { offset, origin })?;
        self.position = target as u64;
        Ok(())
    }

    fn tell(&mut self) -> Result<u64> {
        self.ensure_open()?;
        Ok(self.position)
    }

    fn truncate(&mut self, len: u64) -> Result<()> {
        self.ensure_writable()?;
        match usize::try_from(len) {
            Ok(len) if len <= self.data.len() => {
                self.data.truncate(len);
                Ok(())
            }
            _ => self.grow_to(len),
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn is_writable(&self) -> bool {
        self.writable
    }
}

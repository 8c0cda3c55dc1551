//! Resource backed by an open `std::fs::File`.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::{Resource, Result, SeekOrigin, StreamError};

/// A host file exposed through the [`Resource`] primitives.
///
/// Writability is declared when the resource is built and is not re-queried.
/// The file is released when the resource is closed or dropped, never by a
/// stream that borrows it.
pub struct FileResource {
    file: Option<File>,
    path: PathBuf,
    writable: bool,
}

impl FileResource {
    /// Open an existing file for reading only.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::from_file(file, path, false))
    }

    /// Open an existing file for reading and writing.
    pub fn open_read_write(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self::from_file(file, path, true))
    }

    /// Wrap an already-open file.
    ///
    /// `writable` must match the mode the file was opened with.
    pub fn from_file(file: File, path: impl Into<PathBuf>, writable: bool) -> Self {
        Self {
            file: Some(file),
            path: path.into(),
            writable,
        }
    }

    /// Path the resource was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the file. Later operations fail with [`StreamError::Closed`].
    pub fn close(&mut self) {
        self.file = None;
    }

    fn file(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(StreamError::Closed)
    }

    fn writable_file(&mut self) -> Result<&mut File> {
        if !self.writable {
            return Err(StreamError::ReadOnly);
        }
        self.file()
    }
}

impl fmt::Display for FileResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl fmt::Debug for FileResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileResource")
            .field("path", &self.path)
            .field("open", &self.file.is_some())
            .field("writable", &self.writable)
            .finish()
    }
}

impl Resource for FileResource {
    fn read(&mut self, max_len: usize) -> Result<Option<Bytes>> {
        let file = self.file()?;
        let mut buffer = Vec::with_capacity(max_len.min(64 * 1024));
        file.take(max_len as u64).read_to_end(&mut buffer)?;
        if buffer.is_empty() && max_len > 0 {
            return Ok(None);
        }
        Ok(Some(Bytes::from(buffer)))
    }

    fn read_to_end(&mut self) -> Result<Bytes> {
        let file = self.file()?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(Bytes::from(buffer))
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.writable_file()?.write_all(data)?;
        Ok(())
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<()> {
        let target = match origin {
            SeekOrigin::Start => {
                let start =
                    u64::try_from(offset).map_err(|_| StreamError::InvalidSeek { offset, origin })?;
                SeekFrom::Start(start)
            }
            SeekOrigin::Current => SeekFrom::Current(offset),
            SeekOrigin::End => SeekFrom::End(offset),
        };
        self.file()?.seek(target)?;
        Ok(())
    }

    fn tell(&mut self) -> Result<u64> {
        Ok(self.file()?.stream_position()?)
    }

    fn truncate(&mut self, len: u64) -> Result<()> {
        self.writable_file()?.set_len(len)?;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    fn is_writable(&self) -> bool {
        self.writable
    }
}

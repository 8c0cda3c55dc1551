use std::cell::Cell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use proptest::prelude::*;
use tagbridge_stream::{
    Bytes, FileResource, MemoryResource, Resource, ResourceStream, SeekOrigin, StreamError,
    TagStream,
};

/// Memory resource whose writes start failing after a budget is spent, and
/// whose closed flag can be flipped from outside.
struct FlakyResource {
    inner: MemoryResource,
    writes_left: usize,
    closed: Rc<Cell<bool>>,
}

impl FlakyResource {
    fn new(data: Vec<u8>, writes_left: usize) -> Self {
        Self {
            inner: MemoryResource::new(data),
            writes_left,
            closed: Rc::new(Cell::new(false)),
        }
    }
}

impl fmt::Display for FlakyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flaky({})", self.inner)
    }
}

impl Resource for FlakyResource {
    fn read(&mut self, max_len: usize) -> tagbridge_stream::Result<Option<Bytes>> {
        self.inner.read(max_len)
    }

    fn read_to_end(&mut self) -> tagbridge_stream::Result<Bytes> {
        self.inner.read_to_end()
    }

    fn write(&mut self, data: &[u8]) -> tagbridge_stream::Result<()> {
        if self.writes_left == 0 {
            return Err(StreamError::transport(std::io::Error::other("disk full")));
        }
        self.writes_left -= 1;
        self.inner.write(data)
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> tagbridge_stream::Result<()> {
        self.inner.seek(offset, origin)
    }

    fn tell(&mut self) -> tagbridge_stream::Result<u64> {
        self.inner.tell()
    }

    fn truncate(&mut self, len: u64) -> tagbridge_stream::Result<()> {
        self.inner.truncate(len)
    }

    fn is_closed(&self) -> bool {
        self.closed.get()
    }

    fn is_writable(&self) -> bool {
        true
    }
}

#[test]
fn failed_tail_write_is_not_rolled_back() {
    // First write (the new data) succeeds, the tail write fails.
    let mut resource = FlakyResource::new(b"abcdefgh".to_vec(), 1);
    let err = ResourceStream::new(&mut resource)
        .insert(b"XYZ", 2, 1)
        .unwrap_err();

    match err {
        StreamError::Transport(inner) => assert_eq!(inner.to_string(), "disk full"),
        other => panic!("expected transport error, got {:?}", other),
    }
    // The data block landed, the shifted tail and the truncation never happened.
    assert_eq!(resource.inner.as_slice(), b"abXYZfgh");
}

#[test]
fn failed_remove_leaves_resource_untouched_when_nothing_written() {
    let mut resource = FlakyResource::new(b"abcdefgh".to_vec(), 0);
    let err = ResourceStream::new(&mut resource)
        .remove_block(1, 2)
        .unwrap_err();

    assert!(matches!(err, StreamError::Transport(_)));
    assert_eq!(resource.inner.as_slice(), b"abcdefgh");
}

#[test]
fn is_open_is_queried_live() {
    let mut resource = FlakyResource::new(Vec::new(), 0);
    let closed = Rc::clone(&resource.closed);
    let stream = ResourceStream::new(&mut resource);

    assert!(stream.is_open());
    closed.set(true);
    assert!(!stream.is_open());
    assert_eq!(stream.name(), "flaky(memory[0 bytes])");
}

#[test]
fn splice_through_real_file() {
    let mut temp = tempfile::NamedTempFile::new().unwrap();
    temp.write_all(b"TAGSpayload").unwrap();
    temp.flush().unwrap();

    let mut resource = FileResource::open_read_write(temp.path()).unwrap();
    {
        let mut stream = ResourceStream::new(&mut resource);
        stream.insert(b"LONGER-TAGS", 0, 4).unwrap();
        assert_eq!(stream.length().unwrap(), 18);
    }
    assert!(!resource.is_closed());
    drop(resource);

    assert_eq!(std::fs::read(temp.path()).unwrap(), b"LONGER-TAGSpayload");
}

#[test]
fn read_only_file_reports_read_only() {
    let temp = tempfile::NamedTempFile::new().unwrap();
    let mut resource = FileResource::open_read_only(temp.path()).unwrap();
    let stream = ResourceStream::new(&mut resource);
    assert!(stream.read_only());
}

proptest! {
    #[test]
    fn insert_matches_vec_splice(
        original in proptest::collection::vec(any::<u8>(), 0..256),
        data in proptest::collection::vec(any::<u8>(), 0..64),
        start_seed in any::<usize>(),
        replace_seed in any::<usize>(),
    ) {
        let start = if original.is_empty() { 0 } else { start_seed % (original.len() + 1) };
        let replace = replace_seed % (original.len() - start + 1);

        let mut expected = original.clone();
        expected.splice(start..start + replace, data.iter().copied());

        let mut resource = MemoryResource::new(original);
        ResourceStream::new(&mut resource)
            .insert(&data, start as u64, replace as u64)
            .unwrap();

        prop_assert_eq!(resource.as_slice(), expected.as_slice());
    }

    #[test]
    fn remove_matches_vec_drain(
        original in proptest::collection::vec(any::<u8>(), 1..256),
        start_seed in any::<usize>(),
        length_seed in any::<usize>(),
    ) {
        let start = start_seed % original.len();
        let length = length_seed % (original.len() - start + 1);

        let mut expected = original.clone();
        expected.drain(start..start + length);

        let mut resource = MemoryResource::new(original);
        ResourceStream::new(&mut resource)
            .remove_block(start as u64, length as u64)
            .unwrap();

        prop_assert_eq!(resource.as_slice(), expected.as_slice());
    }

    #[test]
    fn length_never_moves_position(
        original in proptest::collection::vec(any::<u8>(), 0..128),
        position_seed in any::<usize>(),
    ) {
        let position = position_seed % (original.len() + 1);
        let total = original.len() as u64;

        let mut resource = MemoryResource::new(original);
        let mut stream = ResourceStream::new(&mut resource);
        stream.seek(position as i64, SeekOrigin::Start).unwrap();

        prop_assert_eq!(stream.length().unwrap(), total);
        prop_assert_eq!(stream.tell().unwrap(), position as u64);
    }
}

//! What a file handle can be opened from.

use std::fmt;
use std::path::PathBuf;

use tagbridge_marshal::{decode_text, DynamicValue};
use tagbridge_stream::Resource;

use crate::FileRefError;

/// A path, or a borrowed host resource.
pub enum Source<'r> {
    Path(PathBuf),
    Stream(&'r mut dyn Resource),
}

impl Source<'_> {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }
}

impl<'r> Source<'r> {
    pub fn stream(resource: &'r mut dyn Resource) -> Self {
        Source::Stream(resource)
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Stream(resource) => f.debug_tuple("Stream").field(&resource.to_string()).finish(),
        }
    }
}

/// Only text converts; it names a path.
impl<'r> TryFrom<&DynamicValue> for Source<'r> {
    type Error = FileRefError;

    fn try_from(value: &DynamicValue) -> Result<Self, Self::Error> {
        match value {
            DynamicValue::Text(text) => Ok(Source::Path(PathBuf::from(
                decode_text(text).into_string(),
            ))),
            other => Err(FileRefError::UnsupportedInput {
                found: other.type_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagbridge_stream::MemoryResource;

    #[test]
    fn text_is_a_path() {
        let source = Source::try_from(&DynamicValue::text("/music/a.flac")).unwrap();
        assert!(matches!(source, Source::Path(ref p) if p == &PathBuf::from("/music/a.flac")));
    }

    #[test]
    fn other_shapes_are_rejected() {
        for value in [
            DynamicValue::from(1),
            DynamicValue::Nil,
            DynamicValue::Sequence(vec![]),
        ] {
            assert!(matches!(
                Source::try_from(&value),
                Err(FileRefError::UnsupportedInput { .. })
            ));
        }
    }

    #[test]
    fn debug_uses_resource_name() {
        let mut memory = MemoryResource::new(Vec::new()).with_label("cover.mp3");
        let source = Source::stream(&mut memory);
        assert_eq!(format!("{:?}", source), "Stream(\"cover.mp3\")");
    }
}

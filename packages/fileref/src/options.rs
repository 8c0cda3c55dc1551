//! Open options.

use std::fmt;

use tagbridge_marshal::{decode_text, DynamicValue};

use crate::{FileRefError, Result};

/// How thoroughly the library should compute audio properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReadStyle {
    Fast,
    #[default]
    Average,
    Accurate,
}

impl ReadStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadStyle::Fast => "fast",
            ReadStyle::Average => "average",
            ReadStyle::Accurate => "accurate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fast" => Some(ReadStyle::Fast),
            "average" => Some(ReadStyle::Average),
            "accurate" => Some(ReadStyle::Accurate),
            _ => None,
        }
    }

    /// Interpret a host value as an audio-properties request.
    ///
    /// `nil` and `false` read no audio properties, `true` reads them at the
    /// default style, and a symbol or string names the style.
    pub fn from_dynamic(value: &DynamicValue) -> Result<Option<Self>> {
        let name = match value {
            DynamicValue::Nil | DynamicValue::Bool(false) => return Ok(None),
            DynamicValue::Bool(true) => return Ok(Some(ReadStyle::default())),
            DynamicValue::Symbol(name) => name.clone(),
            DynamicValue::Text(text) => decode_text(text).into_string(),
            other => {
                return Err(FileRefError::invalid_argument(format!(
                    "read style must be a symbol, string or boolean, got {}",
                    other.type_name()
                )))
            }
        };
        Self::from_name(&name)
            .map(Some)
            .ok_or_else(|| FileRefError::invalid_argument(format!("unknown read style: {}", name)))
    }
}

impl fmt::Display for ReadStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for opening a file.
///
/// The default reads tags only; audio properties are skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenOptions {
    pub audio_properties: Option<ReadStyle>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_audio_properties(mut self, style: ReadStyle) -> Self {
        self.audio_properties = Some(style);
        self
    }

    pub fn reads_audio_properties(&self) -> bool {
        self.audio_properties.is_some()
    }
}

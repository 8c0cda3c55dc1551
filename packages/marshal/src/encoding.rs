//! Transcoding host strings into typed text.
//!
//! Only Latin-1 keeps its own hint; everything else arrives as UTF-8. Bytes
//! that are invalid in their declared encoding decode with replacement
//! characters and a warning rather than an error.

use std::borrow::Cow;

use tagbridge_value::{Text, TextHint};

use crate::{DynText, Encoding};

/// Decode a host string into text.
///
/// Binary-tagged strings are read as UTF-8.
pub fn decode_text(text: &DynText) -> Text {
    let bytes = text.as_bytes();
    match text.encoding() {
        Encoding::Utf8 | Encoding::UsAscii | Encoding::Binary => Text::utf8(utf8_lossy(bytes)),
        Encoding::Latin1 => Text::new(latin1_to_string(bytes), TextHint::Latin1),
        Encoding::Utf16Le => Text::utf8(without_bom(encoding_rs::UTF_16LE, bytes)),
        Encoding::Utf16Be => Text::utf8(without_bom(encoding_rs::UTF_16BE, bytes)),
        Encoding::Utf16 => {
            let (decoded, _, had_errors) = encoding_rs::UTF_16BE.decode(bytes);
            warn_if_lossy(had_errors, "UTF-16");
            Text::utf8(decoded.into_owned())
        }
        Encoding::Other(label) => Text::utf8(decode_labelled(label, bytes)),
    }
}

/// Decode UTF-8, replacing invalid sequences.
pub fn utf8_lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => {
            log::warn!("invalid UTF-8 in {} byte string, replaced", bytes.len());
            s
        }
    }
}

fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn without_bom(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> String {
    let (decoded, had_errors) = encoding.decode_without_bom_handling(bytes);
    warn_if_lossy(had_errors, encoding.name());
    decoded.into_owned()
}

fn decode_labelled(label: &str, bytes: &[u8]) -> String {
    match encoding_rs::Encoding::for_label(label.as_bytes()) {
        Some(encoding) => {
            let (decoded, _, had_errors) = encoding.decode(bytes);
            warn_if_lossy(had_errors, label);
            decoded.into_owned()
        }
        None => {
            log::warn!("unknown encoding {:?}, reading as UTF-8", label);
            utf8_lossy(bytes)
        }
    }
}

fn warn_if_lossy(had_errors: bool, label: &str) {
    if had_errors {
        log::warn!("malformed {} input, replaced invalid sequences", label);
    }
}

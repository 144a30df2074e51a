//! Byte-to-text decoding with a legacy single-byte fallback.

use std::borrow::Cow;

/// Byte-order mark written by spreadsheet "CSV UTF-8" exports.
const UTF8_BOM: char = '\u{feff}';

/// Which encoding produced the decoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Latin1,
}

/// Decoded submission text, borrowed from the input when it was already UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<'a> {
    pub text: Cow<'a, str>,
    pub encoding: SourceEncoding,
}

/// Decode raw bytes as UTF-8, falling back to ISO-8859-1.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback cannot fail and this function is infallible. A leading UTF-8
/// byte-order mark is dropped.
pub fn decode(bytes: &[u8]) -> Decoded<'_> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Decoded {
            text: Cow::Borrowed(text.strip_prefix(UTF8_BOM).unwrap_or(text)),
            encoding: SourceEncoding::Utf8,
        },
        Err(err) => {
            tracing::debug!(
                valid_up_to = err.valid_up_to(),
                len = bytes.len(),
                "Input is not valid UTF-8, decoding as Latin-1"
            );
            Decoded {
                text: Cow::Owned(decode_latin1(bytes)),
                encoding: SourceEncoding::Latin1,
            }
        }
    }
}

/// ISO-8859-1: each byte value is its own code point.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

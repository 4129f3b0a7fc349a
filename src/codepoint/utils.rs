//! Low-level text decoding utilities

use encoding_rs::Encoding;

/// Decode raw bytes with the dataset's text encoding.
///
/// A leading byte order mark overrides `encoding`. Malformed sequences are
/// replaced rather than rejected.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

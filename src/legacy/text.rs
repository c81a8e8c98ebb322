//! Character decoding for legacy metadata values.
//!
//! Old Gallery installs wrote `photos.dat` in whatever charset PHP was running
//! with, most often Latin-1. Field values are sliced out as raw bytes, then
//! decoded with the encoding detected for the whole file.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Pick the encoding for a metadata file: UTF-8 if the whole file is valid
/// UTF-8, Windows-1252 (a superset of Latin-1) otherwise.
pub fn detect_encoding(data: &[u8]) -> &'static Encoding {
    if Encoding::utf8_valid_up_to(data) == data.len() {
        UTF_8
    } else {
        WINDOWS_1252
    }
}

/// Decode a field value. Invalid sequences become U+FFFD.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}

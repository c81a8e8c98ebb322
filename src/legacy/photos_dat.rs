//! Caption extraction from `photos.dat` files.
//!
//! The files are PHP `serialize()` output. One album is an array of
//! `AlbumItem` objects, each holding the main image, its thumbnail and a few
//! dozen attributes. We need three of them:
//!
//! ```text
//! "AlbumItem":19:{s:5:"image";O:5:"Image":12:{s:4:"name";s:8:"IMG_0020";
//!   s:4:"type";s:3:"jpg"; ... s:7:"caption";s:82:"The studio apartment ..."; ...}
//! ```
//!
//! `name` and `type` are read as "whatever sits between the next two quotes",
//! so length prefixes that disagree with the value (hand-edited files, charset
//! conversions) are tolerated. `caption` is read by its declared length since
//! free text may itself contain quotes and colons.
//!
//! Everything here operates on bytes. PHP length prefixes count bytes, so
//! slicing by the declared length is exact regardless of the file's charset;
//! values are decoded only after they have been cut out.

use super::text::{decode, detect_encoding};
use crate::types::CaptionEntry;
use encoding_rs::Encoding;
use memchr::{memchr, memmem};
use std::borrow::Cow;

/// Item marker after normalization: the quoted class name from
/// `O:9:"AlbumItem":`. The files spell it `AlbumItem`, older ones
/// `albumitem`. The quotes keep the bare word inside a caption from
/// matching.
pub const ITEM_MARKER: &[u8] = b"\"albumitem\"";

const CAPTION_TAG: &[u8] = b"\"caption\"";

/// Parse one metadata file into caption entries.
///
/// Never fails: segments missing a field, or whose caption is empty or
/// truncated, simply produce nothing.
pub fn parse_captions(data: &[u8]) -> Vec<CaptionEntry> {
    let encoding = detect_encoding(data);
    let normalized = normalize_markers(data);
    split_items(&normalized)
        .into_iter()
        .filter_map(|segment| parse_item(segment, encoding))
        .collect()
}

/// Rewrite every ASCII-case variant of the quoted item marker to lowercase.
///
/// Only the marker bytes change; caption text elsewhere is left alone.
pub fn normalize_markers(data: &[u8]) -> Cow<'_, [u8]> {
    let lowered = data.to_ascii_lowercase();
    let positions: Vec<usize> = memmem::find_iter(&lowered, ITEM_MARKER)
        .filter(|&pos| &data[pos..pos + ITEM_MARKER.len()] != ITEM_MARKER)
        .collect();

    if positions.is_empty() {
        return Cow::Borrowed(data);
    }

    let mut out = data.to_vec();
    for pos in positions {
        out[pos..pos + ITEM_MARKER.len()].copy_from_slice(ITEM_MARKER);
    }
    Cow::Owned(out)
}

/// Split normalized data into per-item segments, each starting at a marker.
///
/// Whatever precedes the first marker (the array header) is not an item and
/// is dropped.
pub fn split_items(data: &[u8]) -> Vec<&[u8]> {
    let starts: Vec<usize> = memmem::find_iter(data, ITEM_MARKER).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(data.len());
            &data[start..end]
        })
        .collect()
}

/// Extract a caption entry from one item segment.
pub fn parse_item(segment: &[u8], encoding: &'static Encoding) -> Option<CaptionEntry> {
    let name = field_value(segment, "name")?;
    let extension = field_value(segment, "type")?;
    let caption = caption_value(segment)?;
    if caption.is_empty() {
        return None;
    }

    Some(CaptionEntry {
        file_name: format!("{}.{}", decode(name, encoding), decode(extension, encoding)),
        caption: decode(caption, encoding),
    })
}

/// Value of a quoted string field: the bytes between the first and second
/// `"` after the first occurrence of `"<field>"`.
pub fn field_value<'a>(segment: &'a [u8], field: &str) -> Option<&'a [u8]> {
    let token = format!("\"{field}\"");
    let after_token = memmem::find(segment, token.as_bytes())? + token.len();
    let rest = &segment[after_token..];

    let open = memchr(b'"', rest)?;
    let value = &rest[open + 1..];
    let close = memchr(b'"', value)?;
    Some(&value[..close])
}

/// Caption bytes, read by the declared length in `;s:<len>:"<value>`.
///
/// Returns `None` for a null caption (`;N;`), an unparseable length, or a
/// length that runs past the end of the segment.
pub fn caption_value(segment: &[u8]) -> Option<&[u8]> {
    let after_tag = memmem::find(segment, CAPTION_TAG)? + CAPTION_TAG.len();
    let rest = &segment[after_tag..];

    let type_end = memchr(b':', rest)?;
    let type_code = rest[..type_end].trim_ascii();
    let type_code = type_code.strip_prefix(b";").unwrap_or(type_code).trim_ascii();
    if type_code != b"s" {
        return None;
    }

    let rest = &rest[type_end + 1..];
    let len_end = memchr(b':', rest)?;
    let declared: usize = std::str::from_utf8(&rest[..len_end])
        .ok()?
        .trim()
        .parse()
        .ok()?;

    let (&quote, value) = rest[len_end + 1..].split_first()?;
    if quote != b'"' {
        return None;
    }
    value.get(..declared)
}

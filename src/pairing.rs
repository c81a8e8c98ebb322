//! Pairing full-size images with their thumbnails.
//!
//! Gallery stored each photo as up to four files next to each other:
//!
//! ```text
//! IMG_0020.jpg            # original
//! IMG_0020.highlight.jpg  # album cover crop (not a photo of its own)
//! IMG_0020.sized.jpg      # resized display copy
//! IMG_0020.thumb.jpg      # thumbnail
//! ```
//!
//! After dropping the `sized` and `highlight` variants and sorting, each
//! original is immediately followed by its thumbnail, so pairing is
//! positional.
//!
//! ## Pairing modes
//!
//! [`PairingMode::Legacy`] walks the list two names at a time. When the second
//! name is not a thumbnail the first is reported and dropped, but both names
//! are consumed. A single stray file (an original whose thumbnail was deleted,
//! say) therefore shifts every later pairing by one and they all fail. This is
//! what the old Gallery export tooling did and remains the default.
//!
//! [`PairingMode::Resync`] consumes only the offending name, so a stray file
//! costs exactly one image.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::listing;
use crate::types::ImagePair;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Substrings marking alternate renditions that are never shown as photos.
const EXCLUDED_MARKERS: &[&str] = &["sized", "highlight"];

pub const THUMBNAIL_MARKER: &str = "thumb";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingMode {
    /// Consume two names per step, whatever happens.
    #[default]
    Legacy,
    /// Consume one name on a failed step and try again from the next.
    Resync,
}

impl FromStr for PairingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(PairingMode::Legacy),
            "resync" => Ok(PairingMode::Resync),
            other => Err(format!(
                "unknown pairing mode '{other}' (expected 'legacy' or 'resync')"
            )),
        }
    }
}

impl fmt::Display for PairingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingMode::Legacy => f.write_str("legacy"),
            PairingMode::Resync => f.write_str("resync"),
        }
    }
}

/// List `dir` and pair its images.
pub fn build(
    dir: &Path,
    mode: PairingMode,
    diagnostics: &mut dyn Diagnostics,
) -> io::Result<Vec<ImagePair>> {
    let names = candidates(listing::file_names(dir)?);
    Ok(pair(&names, mode, diagnostics))
}

/// Keep image files, sort them by byte order, drop alternate renditions.
pub fn candidates(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut images: Vec<String> = names.into_iter().filter(|n| is_image(n)).collect();
    images.sort();
    images.retain(|n| !is_excluded(n));
    images
}

/// Pair an already filtered and sorted list of names.
pub fn pair(
    names: &[String],
    mode: PairingMode,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<ImagePair> {
    let mut pairs = Vec::with_capacity(names.len() / 2);
    let mut ix = 0;

    while ix < names.len() {
        let left = &names[ix];

        if mode == PairingMode::Resync && is_thumbnail(left) {
            diagnostics.report(Diagnostic::OrphanThumbnail {
                thumbnail: left.clone(),
            });
            ix += 1;
            continue;
        }

        match names.get(ix + 1) {
            Some(right) if is_thumbnail(right) => {
                pairs.push(ImagePair::new(left.as_str(), right.as_str()));
                ix += 2;
            }
            _ => {
                diagnostics.report(Diagnostic::MissingThumbnail {
                    image: left.clone(),
                });
                ix += match mode {
                    PairingMode::Legacy => 2,
                    PairingMode::Resync => 1,
                };
            }
        }
    }

    pairs
}

/// `.jpg`, `.jpeg` or `.png`, any case.
pub fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)))
}

pub fn is_excluded(name: &str) -> bool {
    let lower = name.to_lowercase();
    EXCLUDED_MARKERS.iter().any(|m| lower.contains(m))
}

pub fn is_thumbnail(name: &str) -> bool {
    name.to_lowercase().contains(THUMBNAIL_MARKER)
}

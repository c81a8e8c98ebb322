//! Shared types passed between the pipeline stages.
//!
//! All of these live for a single run: the caption index and pair list are
//! built once, then read by the paginator.

use std::path::PathBuf;

/// One caption recovered from a legacy metadata file.
///
/// `caption` is never empty; entries without a caption are not produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionEntry {
    /// Image filename as it appears on disk, e.g. `IMG_0020.jpg`.
    pub file_name: String,
    pub caption: String,
}

/// A full-size image and its thumbnail.
///
/// Both names are adjacent in the sorted, filtered directory listing and the
/// thumbnail name contains `thumb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub main: String,
    pub thumbnail: String,
}

impl ImagePair {
    pub fn new(main: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            thumbnail: thumbnail.into(),
        }
    }
}

/// A page file that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPage {
    /// 1-based page number.
    pub number: usize,
    pub path: PathBuf,
    /// Number of `<img>` lines on the page.
    pub images: usize,
}

//! Caption lookup built from every `photos.dat*` file in a gallery.
//!
//! Large albums were split by Gallery across `photos.dat`, `photos.dat.0`,
//! `photos.dat.1` and so on. Files are read base first, then continuations in
//! numeric order, and an image captioned in more than one file keeps the
//! caption from the file read last.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::legacy::{self, METADATA_PREFIX};
use crate::listing;
use crate::types::CaptionEntry;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Image filename → caption.
#[derive(Debug, Clone, Default)]
pub struct CaptionIndex {
    captions: HashMap<String, String>,
    sources: Vec<PathBuf>,
}

impl CaptionIndex {
    /// Read and merge all metadata files in `dir`.
    ///
    /// Unreadable files are reported and skipped. Finding no metadata files is
    /// reported too, and yields an empty index. Only a failure to list `dir`
    /// is an error.
    pub fn build(dir: &Path, diagnostics: &mut dyn Diagnostics) -> io::Result<Self> {
        let files = metadata_files(dir)?;
        if files.is_empty() {
            diagnostics.report(Diagnostic::NoMetadataFiles {
                dir: dir.to_path_buf(),
            });
            return Ok(Self::default());
        }
        Ok(Self::from_files(files, diagnostics))
    }

    /// Read and merge the given metadata files in order.
    ///
    /// A file that cannot be read is reported and skipped.
    pub fn from_files(
        files: impl IntoIterator<Item = PathBuf>,
        diagnostics: &mut dyn Diagnostics,
    ) -> Self {
        let mut index = Self::default();
        for path in files {
            match fs::read(&path) {
                Ok(data) => {
                    index.extend(legacy::parse_captions(&data));
                    index.sources.push(path);
                }
                Err(err) => diagnostics.report(Diagnostic::MetadataUnreadable {
                    path,
                    reason: err.to_string(),
                }),
            }
        }
        index
    }

    /// Add one entry, replacing any earlier caption for the same file.
    pub fn insert(&mut self, entry: CaptionEntry) {
        self.captions.insert(entry.file_name, entry.caption);
    }

    /// Caption for an image, if one was recorded.
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.captions.get(file_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Metadata files that were read successfully, in read order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

impl Extend<CaptionEntry> for CaptionIndex {
    fn extend<I: IntoIterator<Item = CaptionEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl FromIterator<CaptionEntry> for CaptionIndex {
    fn from_iter<I: IntoIterator<Item = CaptionEntry>>(iter: I) -> Self {
        let mut index = Self::default();
        index.extend(iter);
        index
    }
}

/// Metadata files in `dir`, in the order they should be merged.
pub fn metadata_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut names: Vec<String> = listing::file_names(dir)?
        .into_iter()
        .filter(|name| name.starts_with(METADATA_PREFIX))
        .collect();
    names.sort_by(|a, b| merge_order(a).cmp(&merge_order(b)));
    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

/// Sort key: the base file, then numbered continuations by number, then any
/// other `photos.dat*` name (backups and the like) alphabetically.
fn merge_order(name: &str) -> (u8, u32, &str) {
    let suffix = &name[METADATA_PREFIX.len()..];
    if suffix.is_empty() {
        return (0, 0, name);
    }
    match suffix.strip_prefix('.').and_then(|n| n.parse::<u32>().ok()) {
        Some(n) => (1, n, name),
        None => (2, 0, name),
    }
}

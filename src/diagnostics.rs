//! Non-fatal problems found while migrating a gallery.
//!
//! The parser, indexer, pairer and paginator never print anything. They hand
//! each problem to a [`Diagnostics`] sink and carry on. The binary uses
//! [`TracingDiagnostics`]; tests collect into a `Vec<Diagnostic>` and assert
//! on what was reported.

use std::fmt;
use std::path::PathBuf;

/// A recoverable condition worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A `photos.dat*` file could not be opened or read.
    MetadataUnreadable { path: PathBuf, reason: String },
    /// The gallery directory has no `photos.dat*` files at all.
    NoMetadataFiles { dir: PathBuf },
    /// A candidate main image was not followed by a thumbnail.
    MissingThumbnail { image: String },
    /// A thumbnail with no main image in front of it (re-sync pairing only).
    OrphanThumbnail { thumbnail: String },
    /// A page file could not be created or written.
    PageWriteFailed { path: PathBuf, reason: String },
}

impl Diagnostic {
    /// Whether the condition means some content was lost.
    ///
    /// A gallery without metadata files is valid, just caption-less.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::NoMetadataFiles { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MetadataUnreadable { path, reason } => {
                write!(f, "Error reading file {}: {}", path.display(), reason)
            }
            Diagnostic::NoMetadataFiles { dir } => {
                write!(f, "No photos.dat files found in path {}", dir.display())
            }
            Diagnostic::MissingThumbnail { image } => {
                write!(f, "Could not find thumbnail file for {image}")
            }
            Diagnostic::OrphanThumbnail { thumbnail } => {
                write!(f, "Thumbnail {thumbnail} has no matching image")
            }
            Diagnostic::PageWriteFailed { path, reason } => {
                write!(
                    f,
                    "Error writing to gallery file {}: {}",
                    path.display(),
                    reason
                )
            }
        }
    }
}

/// Sink for diagnostics raised during a run.
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl Diagnostics for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` and keeps a count of warnings.
#[derive(Debug, Default)]
pub struct TracingDiagnostics {
    warnings: usize,
}

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

impl Diagnostics for TracingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            self.warnings += 1;
            tracing::warn!("{diagnostic}");
        } else {
            tracing::info!("{diagnostic}");
        }
    }
}

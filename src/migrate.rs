//! One migration run over a gallery directory.
//!
//! ```text
//! photos.dat*  ──► CaptionIndex ──┐
//!                                 ├──► paginate ──► gallery_01, gallery_02, ...
//! *.jpg/png    ──► pairing     ──┘
//! ```
//!
//! Only a bad source directory (or output directory that cannot be created)
//! stops a run. Everything else is reported through [`Diagnostics`] and the
//! run carries on with whatever it could recover.

use crate::captions::CaptionIndex;
use crate::config::{ConfigError, MigrateConfig};
use crate::diagnostics::Diagnostics;
use crate::paginate;
use crate::pairing;
use crate::types::GalleryPage;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("The path {0} does not exist")]
    NotFound(PathBuf),
    #[error("Cannot read {0}: {1}")]
    Unreadable(PathBuf, #[source] io::Error),
    #[error("{0} should be a directory")]
    NotADirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Metadata files read successfully.
    pub metadata_files: Vec<PathBuf>,
    /// Distinct captioned filenames across all metadata files.
    pub captions: usize,
    /// Image/thumbnail pairs found.
    pub pairs: usize,
    /// Pairs whose main image has a caption.
    pub captioned: usize,
    /// Pages written, in order.
    pub pages: Vec<GalleryPage>,
}

impl MigrationReport {
    /// Images that made it onto a page.
    pub fn images_written(&self) -> usize {
        self.pages.iter().map(|p| p.images).sum()
    }
}

/// Check that `path` is an existing, readable directory.
pub fn validate_source(path: &Path) -> Result<(), MigrateError> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(MigrateError::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(MigrateError::Unreadable(path.to_path_buf(), err)),
    };
    if !metadata.is_dir() {
        return Err(MigrateError::NotADirectory(path.to_path_buf()));
    }
    fs::read_dir(path).map_err(|err| MigrateError::Unreadable(path.to_path_buf(), err))?;
    Ok(())
}

/// Migrate the gallery in `source`.
///
/// Pages go to `output_dir`, or next to the images when `None`. An output
/// directory that does not exist yet is created.
pub fn run(
    source: &Path,
    output_dir: Option<&Path>,
    config: &MigrateConfig,
    diagnostics: &mut dyn Diagnostics,
) -> Result<MigrationReport, MigrateError> {
    config.validate()?;
    validate_source(source)?;

    let captions = CaptionIndex::build(source, diagnostics)?;
    let pairs = pairing::build(source, config.pairing, diagnostics)?;

    let output_dir = output_dir.unwrap_or(source);
    fs::create_dir_all(output_dir)?;

    let pages = paginate::paginate(
        &pairs,
        &captions,
        output_dir,
        config.photos_per_page,
        diagnostics,
    );

    let captioned = pairs
        .iter()
        .filter(|p| captions.get(&p.main).is_some())
        .count();

    Ok(MigrationReport {
        metadata_files: captions.sources().to_vec(),
        captions: captions.len(),
        pairs: pairs.len(),
        captioned,
        pages,
    })
}

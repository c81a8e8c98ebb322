//! Shared test utilities for the gallery-migrate test suite.
//!
//! Builds legacy `photos.dat` content and throwaway gallery directories.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! write_images(tmp.path(), &["IMG_0005.jpg", "IMG_0005.thumb.jpg"]);
//! std::fs::write(
//!     tmp.path().join("photos.dat.1"),
//!     album_item("IMG_0005", "jpg", Some("Late addition")),
//! )
//! .unwrap();
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/album/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/album");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Create placeholder image files. Content is irrelevant to the migrator.
pub fn write_images(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"fake image").unwrap();
    }
}

/// Lines of a written gallery page, without terminators.
pub fn read_page(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read page {}: {e}", path.display()))
        .lines()
        .map(String::from)
        .collect()
}

// =========================================================================
// Legacy metadata builders
// =========================================================================

/// One serialized `AlbumItem` as the old PHP gallery wrote it.
///
/// Declared lengths are byte counts, so non-ASCII captions come out the way
/// PHP's `serialize()` would encode them. `None` writes a null caption.
pub fn album_item(name: &str, ty: &str, caption: Option<&str>) -> String {
    let caption = match caption {
        Some(c) => format!("s:{}:\"{c}\";", c.len()),
        None => "N;".to_string(),
    };
    format!(
        concat!(
            "O:9:\"AlbumItem\":19:{{",
            "s:5:\"image\";O:5:\"Image\":12:{{",
            "s:4:\"name\";s:{name_len}:\"{name}\";",
            "s:4:\"type\";s:{ty_len}:\"{ty}\";",
            "s:5:\"width\";i:1280;s:6:\"height\";i:960;",
            "s:11:\"resizedName\";s:{name_len_sized}:\"{name}.sized\";",
            "}}",
            "s:9:\"thumbnail\";O:5:\"Image\":12:{{",
            "s:4:\"name\";s:{name_len_thumb}:\"{name}.thumb\";",
            "s:4:\"type\";s:{ty_len}:\"{ty}\";",
            "}}",
            "s:7:\"caption\";{caption}",
            "s:6:\"hidden\";N;",
            "s:8:\"keywords\";s:0:\"\";",
            "s:10:\"uploadDate\";i:1104537600;",
            "}}"
        ),
        name = name,
        name_len = name.len(),
        name_len_sized = name.len() + ".sized".len(),
        name_len_thumb = name.len() + ".thumb".len(),
        ty = ty,
        ty_len = ty.len(),
        caption = caption,
    )
}

//! Flat directory listing shared by the caption indexer and the image pairer.

use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Names of the regular files directly inside `dir`, sorted by name.
///
/// Symlinks are followed so that linked images count as files. Entries that
/// cannot be inspected (broken links, races with deletion) are skipped; only a
/// failure to read `dir` itself is an error. Names that are not valid UTF-8
/// cannot be written into the HTML output and are skipped as well.
pub fn file_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(_) => continue,
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

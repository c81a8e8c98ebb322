//! Galleria HTML page output.
//!
//! Pages are bare lists of `<img>` tags meant to be pasted (or server-side
//! included) into a page that loads Galleria:
//!
//! ```text
//! <img src="IMG_0438.thumb.jpg" data-big="IMG_0438.jpg" data-description="Alps 1">
//! <img src="IMG_0439.thumb.jpg" data-big="IMG_0439.jpg">
//! ```
//!
//! Files are named `gallery_01`, `gallery_02`, ... with no extension.
//!
//! Captions are written verbatim, without HTML escaping. Existing pages built
//! from these albums rely on markup inside captions, so a caption containing
//! `"` or `<` will produce broken attributes. Clean such captions in the
//! source data.

use crate::captions::CaptionIndex;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::types::{GalleryPage, ImagePair};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const PAGE_ROOT_NAME: &str = "gallery";

/// Write `pairs` into pages of at most `photos_per_page` images.
///
/// Returns the pages that were written completely. If a page cannot be
/// created or written, that is reported and pagination stops; pages written
/// before it are left in place.
///
/// # Panics
///
/// Panics if `photos_per_page` is zero. [`MigrateConfig`](crate::config::MigrateConfig)
/// validation rejects that value before it gets here.
pub fn paginate(
    pairs: &[ImagePair],
    captions: &CaptionIndex,
    output_dir: &Path,
    photos_per_page: usize,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<GalleryPage> {
    assert!(photos_per_page > 0, "photos_per_page must be at least 1");

    let mut pages = Vec::with_capacity(page_count(pairs.len(), photos_per_page));
    for (i, chunk) in pairs.chunks(photos_per_page).enumerate() {
        let number = i + 1;
        let path = output_dir.join(page_file_name(number));
        let lines = chunk.iter().map(|pair| render_tag(pair, captions.get(&pair.main)));

        match write_page(&path, lines) {
            Ok(()) => pages.push(GalleryPage {
                number,
                path,
                images: chunk.len(),
            }),
            Err(err) => {
                diagnostics.report(Diagnostic::PageWriteFailed {
                    path,
                    reason: err.to_string(),
                });
                break;
            }
        }
    }
    pages
}

/// `gallery_01` for page 1.
pub fn page_file_name(number: usize) -> String {
    format!("{PAGE_ROOT_NAME}_{number:02}")
}

/// Render one newline-terminated `<img>` tag.
///
/// An empty caption is treated as no caption.
pub fn render_tag(pair: &ImagePair, caption: Option<&str>) -> String {
    match caption {
        Some(caption) if !caption.is_empty() => format!(
            "<img src=\"{}\" data-big=\"{}\" data-description=\"{}\">\n",
            pair.thumbnail, pair.main, caption
        ),
        _ => format!(
            "<img src=\"{}\" data-big=\"{}\">\n",
            pair.thumbnail, pair.main
        ),
    }
}

/// Number of pages `images` will fill.
pub fn page_count(images: usize, photos_per_page: usize) -> usize {
    images.div_ceil(photos_per_page)
}

/// Write one page. The file handle is dropped on every path out of here,
/// including a failed write.
fn write_page(path: &Path, lines: impl Iterator<Item = String>) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for line in lines {
        out.write_all(line.as_bytes())?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CaptionEntry;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn numbered_pairs(n: usize) -> Vec<ImagePair> {
        (1..=n)
            .map(|i| {
                ImagePair::new(
                    format!("IMG_{i:04}.jpg"),
                    format!("IMG_{i:04}.thumb.jpg"),
                )
            })
            .collect()
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn tag_with_caption() {
        let pair = ImagePair::new("IMG_0001.jpg", "IMG_0001.thumb.jpg");
        assert_eq!(
            render_tag(&pair, Some("Hello")),
            "<img src=\"IMG_0001.thumb.jpg\" data-big=\"IMG_0001.jpg\" data-description=\"Hello\">\n"
        );
    }

    #[test]
    fn tag_without_caption() {
        let pair = ImagePair::new("IMG_0001.jpg", "IMG_0001.thumb.jpg");
        let expected = "<img src=\"IMG_0001.thumb.jpg\" data-big=\"IMG_0001.jpg\">\n";
        assert_eq!(render_tag(&pair, None), expected);
        assert_eq!(render_tag(&pair, Some("")), expected);
    }

    #[test]
    fn caption_not_escaped() {
        let pair = ImagePair::new("a.jpg", "a.thumb.jpg");
        let tag = render_tag(&pair, Some("<b>Bold</b> & more"));
        assert!(tag.contains("data-description=\"<b>Bold</b> & more\""));
    }

    #[test]
    fn page_names_are_zero_padded() {
        assert_eq!(page_file_name(1), "gallery_01");
        assert_eq!(page_file_name(9), "gallery_09");
        assert_eq!(page_file_name(10), "gallery_10");
        assert_eq!(page_file_name(100), "gallery_100");
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 25), 0);
        assert_eq!(page_count(25, 25), 1);
        assert_eq!(page_count(26, 25), 2);
        assert_eq!(page_count(30, 25), 2);
        assert_eq!(page_count(7, 1), 7);
    }

    #[test]
    fn thirty_pairs_make_two_pages() {
        let tmp = TempDir::new().unwrap();
        let mut diags: Vec<Diagnostic> = Vec::new();
        let pages = paginate(
            &numbered_pairs(30),
            &CaptionIndex::default(),
            tmp.path(),
            25,
            &mut diags,
        );

        assert_eq!(pages.len(), 2);
        assert_eq!(read_lines(&tmp.path().join("gallery_01")).len(), 25);
        assert_eq!(read_lines(&tmp.path().join("gallery_02")).len(), 5);
        assert!(!tmp.path().join("gallery_03").exists());
        assert_eq!(pages[1].images, 5);
        assert!(diags.is_empty());
    }

    #[test]
    fn pages_keep_input_order() {
        let tmp = TempDir::new().unwrap();
        paginate(
            &numbered_pairs(3),
            &CaptionIndex::default(),
            tmp.path(),
            2,
            &mut Vec::<Diagnostic>::new(),
        );
        let first = read_lines(&tmp.path().join("gallery_01"));
        let second = read_lines(&tmp.path().join("gallery_02"));
        assert!(first[0].contains("IMG_0001.jpg"));
        assert!(first[1].contains("IMG_0002.jpg"));
        assert!(second[0].contains("IMG_0003.jpg"));
    }

    #[test]
    fn captions_joined_by_main_image() {
        let tmp = TempDir::new().unwrap();
        let captions: CaptionIndex = vec![CaptionEntry {
            file_name: "IMG_0002.jpg".into(),
            caption: "Second".into(),
        }]
        .into_iter()
        .collect();

        paginate(
            &numbered_pairs(2),
            &captions,
            tmp.path(),
            25,
            &mut Vec::<Diagnostic>::new(),
        );
        let lines = read_lines(&tmp.path().join("gallery_01"));
        assert!(!lines[0].contains("data-description"));
        assert!(lines[1].ends_with("data-description=\"Second\">"));
    }

    #[test]
    fn no_pairs_no_pages() {
        let tmp = TempDir::new().unwrap();
        let pages = paginate(
            &[],
            &CaptionIndex::default(),
            tmp.path(),
            25,
            &mut Vec::<Diagnostic>::new(),
        );
        assert!(pages.is_empty());
        assert!(!tmp.path().join("gallery_01").exists());
    }

    #[test]
    fn unwritable_output_reported_and_stops() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let mut diags: Vec<Diagnostic> = Vec::new();

        let pages = paginate(
            &numbered_pairs(3),
            &CaptionIndex::default(),
            &missing,
            1,
            &mut diags,
        );

        assert!(pages.is_empty());
        assert!(matches!(
            &diags[..],
            [Diagnostic::PageWriteFailed { path, .. }] if path.ends_with("gallery_01")
        ));
    }

    #[test]
    fn earlier_pages_survive_later_failure() {
        let tmp = TempDir::new().unwrap();
        // A directory where page 2 should go makes File::create fail
        fs::create_dir(tmp.path().join("gallery_02")).unwrap();
        let mut diags: Vec<Diagnostic> = Vec::new();

        let pages = paginate(
            &numbered_pairs(5),
            &CaptionIndex::default(),
            tmp.path(),
            2,
            &mut diags,
        );

        assert_eq!(pages.len(), 1);
        assert_eq!(read_lines(&tmp.path().join("gallery_01")).len(), 2);
        assert!(!tmp.path().join("gallery_03").exists());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    #[should_panic(expected = "photos_per_page")]
    fn zero_page_size_panics() {
        let tmp = TempDir::new().unwrap();
        paginate(
            &numbered_pairs(1),
            &CaptionIndex::default(),
            tmp.path(),
            0,
            &mut Vec::<Diagnostic>::new(),
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn page_count_is_ceiling(n in 0usize..120, per_page in 1usize..30) {
            let tmp = TempDir::new().unwrap();
            let pages = paginate(
                &numbered_pairs(n),
                &CaptionIndex::default(),
                tmp.path(),
                per_page,
                &mut Vec::<Diagnostic>::new(),
            );

            prop_assert_eq!(pages.len(), (n + per_page - 1) / per_page);
            prop_assert_eq!(pages.len(), page_count(n, per_page));
            if let Some((last, full)) = pages.split_last() {
                for page in full {
                    prop_assert_eq!(page.images, per_page);
                    prop_assert_eq!(read_lines(&page.path).len(), per_page);
                }
                prop_assert!(last.images >= 1 && last.images <= per_page);
                prop_assert_eq!(read_lines(&last.path).len(), last.images);
            }
        }
    }
}

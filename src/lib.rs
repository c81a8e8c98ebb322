//! # Gallery Migrate
//!
//! Converts albums from the old PHP "Gallery" application (the flat-file
//! format, before it moved to a database) into static HTML fragments for the
//! [Galleria](https://galleria.io/) JavaScript viewer.
//!
//! # Pipeline
//!
//! One linear pass over a single album directory:
//!
//! ```text
//! 1. Captions   photos.dat*       →  CaptionIndex      (filename → caption)
//! 2. Pairing    *.jpg/*.png       →  Vec<ImagePair>    (main + thumbnail)
//! 3. Paginate   pairs + captions  →  gallery_01, ...   (<img> tags)
//! ```
//!
//! Steps 1 and 2 read the same directory independently; step 3 joins them on
//! the main image's filename. Nothing is cached between runs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`legacy`] | Byte-level reader for PHP-serialized `photos.dat` files |
//! | [`captions`] | Merges every `photos.dat*` file of an album into one lookup |
//! | [`pairing`] | Filters the image listing and matches images with thumbnails |
//! | [`paginate`] | Writes fixed-size `gallery_NN` pages of `<img>` tags |
//! | [`migrate`] | Runs the three steps and reports what was written |
//! | [`config`] | Optional `gallery-migrate.toml` loading, layering, and validation |
//! | [`diagnostics`] | Non-fatal problems and the sinks that receive them |
//! | [`listing`] | Sorted directory listing shared by captions and pairing |
//! | [`output`] | CLI output formatting for a run |
//! | [`types`] | Values passed between steps (`CaptionEntry`, `ImagePair`, `GalleryPage`) |
//!
//! # Design Decisions
//!
//! ## Bytes, Not Strings
//!
//! PHP's `serialize()` records string lengths in bytes, and albums from that
//! era are as likely to be Windows-1252 as UTF-8. Parsing therefore works on
//! `&[u8]`, and only the extracted values are decoded (see [`legacy::text`]).
//!
//! ## Keep Going
//!
//! Old albums are messy. A missing thumbnail, an unreadable continuation file,
//! or a page that cannot be written is reported through
//! [`diagnostics::Diagnostics`] and the run continues with what it has. Only a
//! missing or unreadable album directory stops it.
//!
//! ## Legacy Pairing By Default
//!
//! Images are paired with thumbnails by taking the sorted listing two names at
//! a time, exactly as the old export tooling did, so regenerated pages match
//! existing ones. [`pairing::PairingMode::Resync`] recovers from stray files
//! instead.

pub mod captions;
pub mod config;
pub mod diagnostics;
pub mod legacy;
pub mod listing;
pub mod migrate;
pub mod output;
pub mod paginate;
pub mod pairing;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

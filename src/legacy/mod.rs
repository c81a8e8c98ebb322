//! Readers for the old PHP Gallery on-disk format.
//!
//! Only the pre-database format is supported: per-album `photos.dat` files
//! (plus numbered continuations `photos.dat.0`, `photos.dat.1`, ...) holding
//! PHP-serialized `AlbumItem` objects.

pub mod photos_dat;
pub mod text;

pub use photos_dat::parse_captions;

/// Filename prefix shared by the base metadata file and its continuations.
pub const METADATA_PREFIX: &str = "photos.dat";

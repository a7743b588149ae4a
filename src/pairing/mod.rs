//! Tile pairing over a Sentinel-2 style directory tree
//!
//! Scans a dataset directory for single-band rasters named
//! `<tile>_<dateAndSuffix>_..._<band>.<ext>`, groups them by tile, date and
//! band, and emits consecutive-date pairs of complete blue/green/red
//! triplets per tile.

pub mod finder;
pub mod types;

#[cfg(test)]
mod tests;

pub use finder::{find_image_pairs, pair_band_files};
pub use types::{BandTriplet, ImagePair};

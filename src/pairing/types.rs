//! Tile pairing data types

use std::path::PathBuf;

/// Band code for the blue channel raster.
pub const BLUE_BAND: &str = "B02";
/// Band code for the green channel raster.
pub const GREEN_BAND: &str = "B03";
/// Band code for the red channel raster.
pub const RED_BAND: &str = "B04";

/// One band raster parsed out of a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandFile {
    /// Tile id (e.g. "T32TQM")
    pub tile: String,
    /// Acquisition date, YYYYMMDD
    pub date: String,
    /// Band code (e.g. "B02")
    pub band: String,
    /// Path of the raster file
    pub path: PathBuf,
}

/// Blue/green/red raster paths for one (tile, date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandTriplet {
    pub blue: PathBuf,
    pub green: PathBuf,
    pub red: PathBuf,
}

/// Two complete band triplets for the same tile at consecutive acquisition
/// dates, earlier first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub tile: String,
    pub date_earlier: String,
    pub date_later: String,
    pub earlier: BandTriplet,
    pub later: BandTriplet,
}

impl ImagePair {
    /// Get the pair name for display
    pub fn display_name(&self) -> String {
        format!("{} {} -> {}", self.tile, self.date_earlier, self.date_later)
    }
}

//! Directory scanning and consecutive-date pair discovery

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::types::{BandFile, BandTriplet, ImagePair, BLUE_BAND, GREEN_BAND, RED_BAND};

/// Raster extensions picked up by the scanner. `jp2` is the native
/// Sentinel-2 SAFE band format, `tif` the usual distribution format.
const RASTER_EXTENSIONS: [&str; 2] = ["jp2", "tif"];

/// Walk `root` recursively and pair every tile's consecutive acquisition
/// dates that carry a complete blue/green/red triplet.
///
/// A missing or unreadable root yields an empty result rather than an
/// error; callers check for emptiness.
pub fn find_image_pairs(root: &Path) -> Vec<ImagePair> {
    let mut files = Vec::new();
    collect_raster_files(root, &mut files);
    debug!("Scanner found {} raster file(s) under {}", files.len(), root.display());
    pair_band_files(files)
}

fn collect_raster_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Skipping unreadable directory {}: {e}", dir.display());
            return;
        }
    };

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.is_dir() {
            collect_raster_files(&path, out);
        } else if has_raster_extension(&path) {
            out.push(path);
        }
    }
}

fn has_raster_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RASTER_EXTENSIONS.contains(&ext))
}

/// Parse `<tile>_<dateAndSuffix>_..._<band>.<ext>` into its parts.
///
/// The tile id is the first `_`-separated segment, the date the first 8
/// characters of the second, the band code the last segment before the
/// extension. Names with fewer than three segments are skipped.
pub(crate) fn parse_band_file(path: &Path) -> Option<BandFile> {
    let filename = path.file_name()?.to_str()?;
    let parts: Vec<&str> = filename.split('_').collect();
    if parts.len() < 3 {
        return None;
    }

    let tile = parts[0].to_string();
    let date: String = parts[1].chars().take(8).collect();
    let band = parts.last()?.split('.').next()?.to_string();

    Some(BandFile {
        tile,
        date,
        band,
        path: path.to_path_buf(),
    })
}

/// Group band files and emit consecutive-date pairs per tile.
///
/// Grouping uses `BTreeMap` throughout so output order is deterministic
/// regardless of filesystem enumeration order: tiles sort
/// lexicographically, dates ascend within a tile (lexicographic order is
/// chronological for YYYYMMDD strings).
pub fn pair_band_files<I>(files: I) -> Vec<ImagePair>
where
    I: IntoIterator<Item = PathBuf>,
{
    // tile -> date -> band -> path
    let mut tiles: BTreeMap<String, BTreeMap<String, BTreeMap<String, PathBuf>>> = BTreeMap::new();

    for path in files {
        let Some(band_file) = parse_band_file(&path) else {
            debug!("Ignoring raster with unrecognized name: {}", path.display());
            continue;
        };
        tiles
            .entry(band_file.tile)
            .or_default()
            .entry(band_file.date)
            .or_default()
            .insert(band_file.band, band_file.path);
    }

    let mut pairs = Vec::new();
    for (tile, dates) in &tiles {
        let dated: Vec<_> = dates.iter().collect();
        for window in dated.windows(2) {
            let (date0, bands0) = window[0];
            let (date1, bands1) = window[1];
            let (Some(earlier), Some(later)) = (rgb_triplet(bands0), rgb_triplet(bands1)) else {
                continue;
            };
            pairs.push(ImagePair {
                tile: tile.clone(),
                date_earlier: date0.clone(),
                date_later: date1.clone(),
                earlier,
                later,
            });
        }
    }
    pairs
}

/// A date qualifies only when all three required bands are present.
fn rgb_triplet(bands: &BTreeMap<String, PathBuf>) -> Option<BandTriplet> {
    Some(BandTriplet {
        blue: bands.get(BLUE_BAND)?.clone(),
        green: bands.get(GREEN_BAND)?.clone(),
        red: bands.get(RED_BAND)?.clone(),
    })
}

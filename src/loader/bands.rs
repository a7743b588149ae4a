//! Stacks three single-band rasters into an 8-bit RGB composite and
//! derives the grayscale image the matcher consumes.

use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use log::error;
use thiserror::Error;

use crate::pairing::BandTriplet;

type Band16 = ImageBuffer<Luma<u16>, Vec<u16>>;

/// The error type for band loading and stacking.
#[derive(Debug, Error)]
pub enum BandLoadError {
    #[error("failed to open band raster {path}: {source}")]
    Open {
        path: String,
        source: image::ImageError,
    },

    #[error("band raster {path} is {found_w}x{found_h}, expected {expected_w}x{expected_h}")]
    DimensionMismatch {
        path: String,
        expected_w: u32,
        expected_h: u32,
        found_w: u32,
        found_h: u32,
    },

    #[error("all three bands are zero-valued, nothing to normalize")]
    AllZero,
}

/// A stacked acquisition: normalized grayscale plus the 8-bit color
/// composite it derives from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub gray: GrayImage,
    pub color: RgbImage,
}

/// Load and stack one blue/green/red triplet.
///
/// Failures are logged here and collapse to `None`; callers only check
/// for presence and abort the run themselves.
pub fn load_band_triplet(bands: &BandTriplet) -> Option<LoadedImage> {
    match read_band_triplet(bands) {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            error!("Error loading bands: {e}");
            None
        }
    }
}

/// Open the three band rasters, stack them red-green-blue, normalize by
/// the global maximum to 8-bit and derive the grayscale image.
pub fn read_band_triplet(bands: &BandTriplet) -> Result<LoadedImage, BandLoadError> {
    let blue = open_band(&bands.blue)?;
    let green = open_band(&bands.green)?;
    let red = open_band(&bands.red)?;

    let (width, height) = blue.dimensions();
    check_dimensions(&bands.green, &green, width, height)?;
    check_dimensions(&bands.red, &red, width, height)?;

    // Global maximum across all three bands drives the normalization. An
    // all-black triplet has no usable signal and is rejected outright.
    let max = [&red, &green, &blue]
        .iter()
        .flat_map(|band| band.pixels())
        .map(|p| p.0[0])
        .max()
        .unwrap_or(0);
    if max == 0 {
        return Err(BandLoadError::AllZero);
    }

    let mut color = RgbImage::new(width, height);
    for (x, y, pixel) in color.enumerate_pixels_mut() {
        *pixel = Rgb([
            scale_to_u8(red.get_pixel(x, y).0[0], max),
            scale_to_u8(green.get_pixel(x, y).0[0], max),
            scale_to_u8(blue.get_pixel(x, y).0[0], max),
        ]);
    }

    let gray = to_grayscale(&color);
    Ok(LoadedImage { gray, color })
}

fn open_band(path: &Path) -> Result<Band16, BandLoadError> {
    let img = image::open(path).map_err(|source| BandLoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    Ok(img.to_luma16())
}

fn check_dimensions(
    path: &Path,
    band: &Band16,
    expected_w: u32,
    expected_h: u32,
) -> Result<(), BandLoadError> {
    let (found_w, found_h) = band.dimensions();
    if (found_w, found_h) != (expected_w, expected_h) {
        return Err(BandLoadError::DimensionMismatch {
            path: path.display().to_string(),
            expected_w,
            expected_h,
            found_w,
            found_h,
        });
    }
    Ok(())
}

fn scale_to_u8(value: u16, max: u16) -> u8 {
    (value as f32 / max as f32 * 255.0).round() as u8
}

/// BT.601 luminance, the standard RGB-to-gray transform.
fn to_grayscale(color: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(color.width(), color.height());
    for (src, dst) in color.pixels().zip(gray.pixels_mut()) {
        let [r, g, b] = src.0;
        let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        dst.0[0] = y.round().min(255.0) as u8;
    }
    gray
}

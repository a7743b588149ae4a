//! Backend seam for keypoint matching
//!
//! The pretrained matching network is an external dependency; everything
//! this crate needs from it is the narrow [`KeypointMatcher`] interface.
//! The compiled-in fallback is the CPU correlation backend.

use image::{GrayImage, Luma};
use log::debug;

use super::config::MatcherConfig;
use super::correlation::CorrelationMatcher;
use super::types::MatchResult;

/// A single-channel image with intensities normalized to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major, length `width * height`
    pub pixels: Vec<f32>,
}

impl NormalizedImage {
    pub fn from_gray(image: &GrayImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.pixels().map(|p| p.0[0] as f32 / 255.0).collect(),
        }
    }

    /// Recover 8-bit intensities; backends working on integer pixels use this.
    pub fn to_gray(&self) -> GrayImage {
        let width = self.width as usize;
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let v = self.pixels[y as usize * width + x as usize];
            Luma([(v * 255.0).round().clamp(0.0, 255.0) as u8])
        })
    }
}

/// Narrow interface to a keypoint-matching model.
///
/// Implementations take two normalized single-channel images and report
/// keypoints for both, one match index per keypoint of the first image
/// ([`super::types::NO_MATCH`] when unmatched) and one confidence score per
/// keypoint. Exactly one pass runs per call.
pub trait KeypointMatcher {
    /// Short device identifier for reporting ("cpu", "gpu", ...)
    fn device(&self) -> &'static str;

    fn match_images(&self, image0: &NormalizedImage, image1: &NormalizedImage) -> MatchResult;
}

/// Pick the best backend available at runtime.
///
/// Accelerated implementations are probed first; the CPU correlation
/// matcher is the compiled-in fallback and currently the only candidate.
pub fn select_backend(config: &MatcherConfig) -> Box<dyn KeypointMatcher> {
    debug!("No accelerated matching backend available, falling back to CPU");
    Box::new(CorrelationMatcher::new(config.clone()))
}

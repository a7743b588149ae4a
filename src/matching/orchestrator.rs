//! One-shot matching pass over a loaded image pair

use image::imageops::{self, FilterType};
use image::GrayImage;
use log::info;

use super::backend::{select_backend, NormalizedImage};
use super::config::MatcherConfig;
use super::types::MatchResult;

/// Fixed processing width. The source aspect ratio is not preserved;
/// match coordinates are expressed in the resized space.
pub const MATCH_WIDTH: u32 = 640;
/// Fixed processing height.
pub const MATCH_HEIGHT: u32 = 480;

/// Everything downstream consumers need: the resized grayscale inputs and
/// the match result expressed in their coordinate space.
#[derive(Debug, Clone)]
pub struct MatchingOutcome {
    pub image0: GrayImage,
    pub image1: GrayImage,
    pub result: MatchResult,
}

/// Resize both grayscale images to the fixed processing resolution,
/// select a backend and run exactly one matching pass.
pub fn run_matching(
    gray0: &GrayImage,
    gray1: &GrayImage,
    config: &MatcherConfig,
) -> MatchingOutcome {
    let image0 = resize_for_matching(gray0);
    let image1 = resize_for_matching(gray1);

    let backend = select_backend(config);
    info!("Matching on {} backend", backend.device());

    let result = backend.match_images(
        &NormalizedImage::from_gray(&image0),
        &NormalizedImage::from_gray(&image1),
    );
    info!(
        "Keypoints {}:{}, {} match(es) accepted",
        result.keypoints0.len(),
        result.keypoints1.len(),
        result.match_count()
    );

    MatchingOutcome {
        image0,
        image1,
        result,
    }
}

pub fn resize_for_matching(gray: &GrayImage) -> GrayImage {
    imageops::resize(gray, MATCH_WIDTH, MATCH_HEIGHT, FilterType::Triangle)
}

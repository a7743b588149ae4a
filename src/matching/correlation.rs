//! CPU correlation matching backend
//!
//! FAST corners are scored, thresholded against the strongest response,
//! suppressed within the configured radius and capped at the configured
//! count. Each keypoint carries a zero-mean, unit-norm intensity patch;
//! the patch correlation matrix goes through the configured number of
//! row/column normalization rounds before mutual-best assignment gated by
//! the match threshold.

use imageproc::corners::{corners_fast9, Corner};
use log::debug;

use super::backend::{KeypointMatcher, NormalizedImage};
use super::config::MatcherConfig;
use super::types::{Keypoint, MatchResult, NO_MATCH};

/// Intensity step used by the FAST segment test.
const FAST_THRESHOLD: u8 = 10;
/// Half-width of the descriptor patch.
const PATCH_RADIUS: u32 = 5;
/// Sharpening applied to raw correlation before the normalization rounds.
const SCORE_SCALE: f32 = 10.0;

/// Classical detector/matcher running entirely on the CPU.
pub struct CorrelationMatcher {
    config: MatcherConfig,
}

struct DetectedImage {
    keypoints: Vec<Keypoint>,
    descriptors: Vec<Vec<f32>>,
}

impl CorrelationMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    fn detect(&self, image: &NormalizedImage) -> DetectedImage {
        let gray = image.to_gray();
        let mut corners = corners_fast9(&gray, FAST_THRESHOLD);

        // Border corners cannot carry a full descriptor patch.
        corners.retain(|c| {
            c.x >= PATCH_RADIUS
                && c.y >= PATCH_RADIUS
                && c.x + PATCH_RADIUS < image.width
                && c.y + PATCH_RADIUS < image.height
        });

        let max_score = corners.iter().map(|c| c.score).fold(0.0f32, f32::max);
        if max_score > 0.0 {
            let cutoff = self.config.keypoint_threshold * max_score;
            corners.retain(|c| c.score >= cutoff);
        }

        corners.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let kept = suppress(&corners, self.config.nms_radius, self.config.max_keypoints);

        let norm = if max_score > 0.0 { max_score } else { 1.0 };
        let keypoints = kept
            .iter()
            .map(|c| Keypoint {
                x: c.x as f32,
                y: c.y as f32,
                score: c.score / norm,
            })
            .collect();
        let descriptors = kept
            .iter()
            .map(|c| patch_descriptor(image, c.x, c.y))
            .collect();

        DetectedImage {
            keypoints,
            descriptors,
        }
    }
}

impl KeypointMatcher for CorrelationMatcher {
    fn device(&self) -> &'static str {
        "cpu"
    }

    fn match_images(&self, image0: &NormalizedImage, image1: &NormalizedImage) -> MatchResult {
        let det0 = self.detect(image0);
        let det1 = self.detect(image1);
        debug!(
            "Detected {} / {} keypoints",
            det0.keypoints.len(),
            det1.keypoints.len()
        );

        let n0 = det0.keypoints.len();
        let n1 = det1.keypoints.len();
        let mut matches0 = vec![NO_MATCH; n0];
        let mut confidence0 = vec![0.0f32; n0];

        if n0 > 0 && n1 > 0 {
            let mut scores = correlation_matrix(&det0.descriptors, &det1.descriptors);
            normalize_scores(&mut scores, n0, n1, self.config.matcher_iterations);
            assign(
                &scores,
                n0,
                n1,
                self.config.match_threshold,
                &mut matches0,
                &mut confidence0,
            );
        }

        MatchResult {
            keypoints0: det0.keypoints,
            keypoints1: det1.keypoints,
            matches0,
            confidence0,
        }
    }
}

/// Greedy non-maximum suppression over score-sorted corners, capped at
/// `max_keypoints`.
fn suppress(corners: &[Corner], radius: u32, max_keypoints: usize) -> Vec<Corner> {
    let r2 = (radius as i64) * (radius as i64);
    let mut kept: Vec<Corner> = Vec::new();
    for c in corners {
        if kept.len() >= max_keypoints {
            break;
        }
        let close = kept.iter().any(|k| {
            let dx = k.x as i64 - c.x as i64;
            let dy = k.y as i64 - c.y as i64;
            dx * dx + dy * dy <= r2
        });
        if !close {
            kept.push(*c);
        }
    }
    kept
}

/// Zero-mean, unit-norm intensity patch around (cx, cy). Callers ensure
/// the patch lies fully inside the image.
fn patch_descriptor(image: &NormalizedImage, cx: u32, cy: u32) -> Vec<f32> {
    let r = PATCH_RADIUS as i64;
    let width = image.width as usize;
    let side = (2 * PATCH_RADIUS + 1) as usize;
    let mut patch = Vec::with_capacity(side * side);

    for dy in -r..=r {
        for dx in -r..=r {
            let x = (cx as i64 + dx) as usize;
            let y = (cy as i64 + dy) as usize;
            patch.push(image.pixels[y * width + x]);
        }
    }

    let mean = patch.iter().sum::<f32>() / patch.len() as f32;
    for v in &mut patch {
        *v -= mean;
    }
    let norm = patch.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in &mut patch {
            *v /= norm;
        }
    }
    patch
}

/// Dense correlation matrix between the two descriptor sets, row-major
/// with one row per descriptor of image 0.
fn correlation_matrix(d0: &[Vec<f32>], d1: &[Vec<f32>]) -> Vec<f32> {
    let n1 = d1.len();
    let mut scores = vec![0.0f32; d0.len() * n1];
    for (i, a) in d0.iter().enumerate() {
        for (j, b) in d1.iter().enumerate() {
            scores[i * n1 + j] = a.iter().zip(b).map(|(x, y)| x * y).sum();
        }
    }
    scores
}

/// Alternating row/column normalization of the exponentiated score matrix.
/// Each round pushes mass toward unambiguous pairings; the iteration count
/// comes from the configuration.
fn normalize_scores(scores: &mut [f32], n0: usize, n1: usize, iterations: u32) {
    for s in scores.iter_mut() {
        *s = (*s * SCORE_SCALE).exp();
    }
    for _ in 0..iterations {
        for i in 0..n0 {
            let row = &mut scores[i * n1..(i + 1) * n1];
            let sum: f32 = row.iter().sum();
            if sum > f32::EPSILON {
                for v in row.iter_mut() {
                    *v /= sum;
                }
            }
        }
        for j in 0..n1 {
            let mut sum = 0.0f32;
            for i in 0..n0 {
                sum += scores[i * n1 + j];
            }
            if sum > f32::EPSILON {
                for i in 0..n0 {
                    scores[i * n1 + j] /= sum;
                }
            }
        }
    }
}

/// Mutual-best assignment over the normalized scores. Every keypoint of
/// image 0 gets a confidence; only mutual best pairings above the
/// threshold get a match index.
fn assign(
    scores: &[f32],
    n0: usize,
    n1: usize,
    threshold: f32,
    matches0: &mut [i32],
    confidence0: &mut [f32],
) {
    for i in 0..n0 {
        let row = &scores[i * n1..(i + 1) * n1];
        let (best_j, best) = row
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |acc, (j, &v)| if v > acc.1 { (j, v) } else { acc });

        confidence0[i] = best.max(0.0);
        if best < threshold {
            continue;
        }

        let mut best_i = 0;
        let mut best_col = f32::MIN;
        for k in 0..n0 {
            let v = scores[k * n1 + best_j];
            if v > best_col {
                best_col = v;
                best_i = k;
            }
        }
        if best_i == i {
            matches0[i] = best_j as i32;
        }
    }
}

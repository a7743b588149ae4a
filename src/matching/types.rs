//! Match result data types

/// Sentinel match index: the keypoint has no counterpart in the other image.
pub const NO_MATCH: i32 = -1;

/// A distinguishing image location reported by the detector, in resized
/// image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Detector response, normalized to the strongest response in the image
    pub score: f32,
}

/// One accepted correspondence between the two images.
#[derive(Debug, Clone, Copy)]
pub struct PairedMatch {
    pub from: Keypoint,
    pub to: Keypoint,
    pub confidence: f32,
}

/// Parallel-array output of one matching pass.
///
/// Invariants: `matches0` and `confidence0` have exactly one entry per
/// keypoint of image 0, and every non-sentinel entry of `matches0` is a
/// valid index into `keypoints1`.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    pub keypoints0: Vec<Keypoint>,
    pub keypoints1: Vec<Keypoint>,
    /// For each keypoint of image 0, an index into `keypoints1` or [`NO_MATCH`]
    pub matches0: Vec<i32>,
    /// Confidence score per keypoint of image 0
    pub confidence0: Vec<f32>,
}

impl MatchResult {
    /// Resolve the sentinel-filtered matches into keypoint pairs.
    pub fn valid_matches(&self) -> Vec<PairedMatch> {
        self.matches0
            .iter()
            .enumerate()
            .filter(|&(_, &j)| j != NO_MATCH)
            .map(|(i, &j)| PairedMatch {
                from: self.keypoints0[i],
                to: self.keypoints1[j as usize],
                confidence: self.confidence0[i],
            })
            .collect()
    }

    /// Number of keypoints in image 0 with an accepted match.
    pub fn match_count(&self) -> usize {
        self.matches0.iter().filter(|&&j| j != NO_MATCH).count()
    }
}

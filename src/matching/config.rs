//! Configuration for matching backends

/// Options recognized by matching backends. The orchestrator passes these
/// through without interpreting them; each backend maps them onto its own
/// internals.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Keypoint suppression radius in pixels
    pub nms_radius: u32,
    /// Detection confidence threshold, as a fraction of the strongest response
    pub keypoint_threshold: f32,
    /// Maximum number of keypoints kept per image
    pub max_keypoints: usize,
    /// Iteration count for the match score normalization
    pub matcher_iterations: u32,
    /// Minimum confidence for a match to be accepted
    pub match_threshold: f32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            nms_radius: 4,
            keypoint_threshold: 0.005,
            max_keypoints: 1024,
            matcher_iterations: 20,
            match_threshold: 0.2,
        }
    }
}

/// Stricter preset for scenes with repetitive texture (croplands, urban
/// grids) where ambiguous correspondences should be dropped early.
pub fn create_strict_config() -> MatcherConfig {
    MatcherConfig {
        max_keypoints: 512,
        match_threshold: 0.5,
        ..MatcherConfig::default()
    }
}

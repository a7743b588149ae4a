//! Keypoint matching between two acquisitions of the same tile
//!
//! The matching model sits behind the [`KeypointMatcher`] trait; the
//! orchestrator resizes and normalizes the inputs, selects a backend at
//! runtime and performs exactly one matching pass.

pub mod backend;
pub mod config;
pub mod correlation;
pub mod orchestrator;
pub mod types;


pub use backend::{select_backend, KeypointMatcher, NormalizedImage};
pub use config::{create_strict_config, MatcherConfig};
pub use correlation::CorrelationMatcher;
pub use orchestrator::{run_matching, MatchingOutcome, MATCH_HEIGHT, MATCH_WIDTH};
pub use types::{Keypoint, MatchResult, PairedMatch, NO_MATCH};

use thiserror::Error;

use crate::viz::VizError;

/// A specialized `Result` type for pipeline runs.
pub type RunResult<T> = Result<T, RunError>;

/// The error type for a full matching run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("pair index {index} is out of range, {count} pair(s) discovered")]
    PairIndexOutOfRange { index: usize, count: usize },

    #[error("could not load band images for {name}")]
    LoadFailed { name: String },

    #[error("visualization failed: {source}")]
    Viz {
        #[from]
        source: VizError,
    },
}

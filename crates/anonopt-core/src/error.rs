use thiserror::Error;

/// Model error type shared across anonopt crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A hierarchy table is not rectangular.
    #[error("invalid hierarchy: {0}")]
    InvalidHierarchy(String),
    /// A dataset row or header is malformed.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    /// Privacy parameters are out of range.
    #[error("invalid privacy config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results returned by anonopt crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while releasing a dataset handle or running a transform.
///
/// The optimizer treats every variant as a failed candidate, never as a
/// fatal error.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("dataset handle {0} is still held; release it before anonymizing again")]
    HandleInUse(String),
    #[error("no hierarchy defined for quasi-identifier '{0}'")]
    MissingHierarchy(String),
    #[error("quasi-identifier '{0}' is not a dataset column")]
    UnknownColumn(String),
    #[error("value '{value}' of '{qid}' is not covered by its hierarchy")]
    UnmappedValue { qid: String, value: String },
    #[error("invalid generalization bounds for '{qid}': {min}..={max} (height {height})")]
    InvalidBounds {
        qid: String,
        min: usize,
        max: usize,
        height: usize,
    },
    #[error(transparent)]
    Model(#[from] Error),
}

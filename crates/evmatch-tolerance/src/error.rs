use thiserror::Error;

/// Errors produced when parsing tolerance names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToleranceError {
    #[error("unknown tolerance flag: {0}")]
    UnknownFlag(String),

    #[error("unknown tolerance preset: {0} (expected strict, default or lenient)")]
    UnknownPreset(String),
}

/// Convenience alias for tolerance results.
pub type ToleranceResult<T> = Result<T, ToleranceError>;

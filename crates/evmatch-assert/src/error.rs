use std::path::PathBuf;

use thiserror::Error;

use crate::report::EventMismatch;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Mismatch(#[from] EventMismatch),

    #[error("invalid matcher config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MatchError {
    /// The mismatch report, if this error is a failed comparison.
    pub fn as_mismatch(&self) -> Option<&EventMismatch> {
        match self {
            Self::Mismatch(mismatch) => Some(mismatch),
            _ => None,
        }
    }
}

pub type MatchResult<T> = Result<T, MatchError>;

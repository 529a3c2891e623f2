//! Error types shared across the crate.

use thiserror::Error;

/// Error that can occur during group configuration or enumeration.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("generator {0:?} is not an isometry of the group's metric")]
    InvalidGenerator(String),
    #[error("no discoverable inverse for generator {0:?}")]
    MissingInverse(String),
    #[error("change-of-basis matrix is singular")]
    SingularChangeOfBasis,
    #[error("generator word must be a single letter; got {0:?}")]
    BadGeneratorWord(String),
}

/// Result type returned by group operations.
pub type GroupResult<T> = Result<T, GroupError>;

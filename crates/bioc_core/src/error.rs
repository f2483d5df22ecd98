//! Crate error type.
//!
//! # Responsibility
//! - Represent programmer errors raised at construction time.
//! - Represent text that cannot be obtained for a container.
//!
//! # Invariants
//! - Construction errors are returned, never panicked.
//! - Integrity findings from a validation walk are not `BiocError`s; they are
//!   reported as `validate::ValidationFailure` values.

use thiserror::Error;

pub type BiocResult<T> = Result<T, BiocError>;

/// Error type for model construction and text reconstruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BiocError {
    /// Malformed input: negative location field, empty id, no locations.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A container has no stored text and no children to rebuild it from.
    #[error("missing text: {container} has no text and no reconstructable children")]
    MissingText { container: String },
}

impl BiocError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn missing_text(container: impl Into<String>) -> Self {
        Self::MissingText {
            container: container.into(),
        }
    }
}

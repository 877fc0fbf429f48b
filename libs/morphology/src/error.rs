//! # Morphology Errors
//!
//! Errors raised while assembling a skeleton from already-parsed data.

use crate::section::SectionId;
use thiserror::Error;

/// Errors that can occur while building a [`crate::Skeleton`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MorphologyError {
    /// A sample radius is negative or not finite.
    #[error("Invalid radius {radius} at sample {index}")]
    InvalidRadius {
        /// Index of the offending sample within its section
        index: usize,
        /// The rejected radius
        radius: f64,
    },

    /// A sample position has a NaN or infinite coordinate.
    #[error("Non-finite position at sample {index}")]
    NonFinitePosition {
        /// Index of the offending sample within its section
        index: usize,
    },

    /// A section id does not name a section of this skeleton.
    #[error("Unknown section: {0}")]
    UnknownSection(SectionId),

    /// The soma description is unusable.
    #[error("Invalid soma: {message}")]
    InvalidSoma {
        /// Description of the problem
        message: String,
    },
}

impl MorphologyError {
    /// Creates an invalid soma error.
    pub fn invalid_soma(message: impl Into<String>) -> Self {
        Self::InvalidSoma {
            message: message.into(),
        }
    }
}

/// Result type alias for morphology operations.
pub type MorphologyResult<T> = Result<T, MorphologyError>;

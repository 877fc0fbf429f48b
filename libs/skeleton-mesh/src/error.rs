//! # Error Types
//!
//! Errors raised by the skeleton builder.
//!
//! ## Error Policy
//!
//! - Malformed-but-tolerable data (short sections, zero-length segments) is
//!   skipped and never reaches this module
//! - Invalid configuration is rejected before any traversal starts
//! - Host failures are handed back unchanged

use config::constants::ConfigError;
use morphology::MorphologyError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while validating options or building geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// A strategy name that does not match any construction strategy.
    #[error("Unknown construction strategy: '{0}'")]
    UnknownStrategy(String),

    /// Tolerance or radial subdivision count rejected by the shared config.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A distance or tolerance that must be non-negative is not.
    #[error("Threshold '{name}' must be a non-negative number: {value}")]
    NegativeThreshold {
        /// Name of the option
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A radius override outside its accepted range.
    #[error("Radius {policy} {value} outside {min}..={max}")]
    InvalidRadiusOverride {
        /// Which override (fixed radius or scale factor)
        policy: &'static str,
        /// The rejected value
        value: f64,
        /// Smallest accepted value
        min: f64,
        /// Largest accepted value
        max: f64,
    },

    /// Deriving a section failed in the data model.
    #[error("Morphology error: {0}")]
    Morphology(#[from] MorphologyError),
}

impl BuildError {
    /// Creates a negative threshold error.
    pub fn negative(name: &'static str, value: f64) -> Self {
        Self::NegativeThreshold { name, value }
    }
}

/// Errors of a build bound to a scene host.
///
/// The host's own error is carried verbatim so the caller can judge whether
/// it is recoverable.
#[derive(Error, Debug)]
pub enum HostBuildError<E>
where
    E: std::error::Error + 'static,
{
    /// The build was rejected before any host call.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The host failed to materialize a descriptor.
    #[error(transparent)]
    Host(E),
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for builder operations.
pub type BuildResult<T> = Result<T, BuildError>;

// =============================================================================
// TESTS
// =============================================================================

//! # Configuration Constants
//!
//! Centralized constants for the skeleton geometry pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Radial subdivision of cones and spheres
//! - **Resampling**: Defaults for the disconnected-skeleton resampler
//! - **Radii**: Bounds for radius overrides

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Two positions closer than this are treated as the same point; segments
/// shorter than this are zero-length.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Default distance under which a child section's first sample is considered
/// to coincide with its parent's last sample.
///
/// Digitized morphologies store positions with a few decimals, so the
/// continuity point is only reproduced approximately.
///
/// # Example
///
/// ```rust
/// use config::constants::{CONTINUITY_EPSILON, EPSILON};
/// assert!(CONTINUITY_EPSILON > EPSILON);
/// ```
pub const CONTINUITY_EPSILON: f64 = 1e-3;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default number of radial subdivisions of a cone cross-section and of the
/// spheres used for the soma, terminals and joints.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_SIDES, MAX_SIDES, MIN_SIDES};
/// assert!((MIN_SIDES..=MAX_SIDES).contains(&DEFAULT_SIDES));
/// ```
pub const DEFAULT_SIDES: u32 = 16;

/// Minimum number of radial subdivisions. A circular cross-section needs at
/// least three points to enclose an area.
pub const MIN_SIDES: u32 = 3;

/// Maximum number of radial subdivisions.
///
/// Safety limit against tessellation blow-up on large morphologies.
pub const MAX_SIDES: u32 = 128;

// =============================================================================
// RESAMPLING CONSTANTS
// =============================================================================

/// Default maximum perpendicular deviation of a dropped sample from the chord
/// between its retained neighbours.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_DEVIATION_THRESHOLD;
/// assert!(DEFAULT_DEVIATION_THRESHOLD > 0.0);
/// ```
pub const DEFAULT_DEVIATION_THRESHOLD: f64 = 0.1;

/// Default relative radius change that forces a sample to be retained.
///
/// 0.1 means a 10% change with respect to the anchor sample's radius.
pub const DEFAULT_RADIUS_TOLERANCE: f64 = 0.1;

/// Default maximum arc length between two retained samples.
pub const DEFAULT_MAX_SPACING: f64 = 10.0;

// =============================================================================
// RADIUS CONSTANTS
// =============================================================================

/// Smallest accepted value for a fixed arbor radius override.
pub const MIN_FIXED_RADIUS: f64 = 0.05;

/// Largest accepted value for a fixed arbor radius override.
pub const MAX_FIXED_RADIUS: f64 = 5.0;

/// Smallest accepted radius scale factor.
pub const MIN_RADIUS_SCALE: f64 = 0.01;

/// Largest accepted radius scale factor.
pub const MAX_RADIUS_SCALE: f64 = 5.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Branching order used when an arbor has no explicit limit.
///
/// # Example
///
/// ```rust
/// use config::constants::UNLIMITED_BRANCHING_ORDER;
/// assert!(UNLIMITED_BRANCHING_ORDER > 1000);
/// ```
pub const UNLIMITED_BRANCHING_ORDER: u32 = u32::MAX;

// =============================================================================
// GLOBAL CONFIGURATION
// =============================================================================

/// Immutable snapshot of the numeric settings shared by the data model and
/// the geometry builder.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Continuity tolerance between a section and its parent.
    pub tolerance: f64,
    /// Default radial subdivision count.
    pub default_sides: u32,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and radial subdivision count.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-4, 24).expect("valid config");
    /// assert_eq!(cfg.default_sides, 24);
    /// ```
    pub fn new(tolerance: f64, default_sides: u32) -> Result<Self, ConfigError> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if !(MIN_SIDES..=MAX_SIDES).contains(&default_sides) {
            return Err(ConfigError::InvalidSides(default_sides));
        }
        Ok(Self {
            tolerance,
            default_sides,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: CONTINUITY_EPSILON,
            default_sides: DEFAULT_SIDES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the radial subdivision count is outside the supported range.
    InvalidSides(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidSides(value) => {
                write!(f, "sides must be within {MIN_SIDES}..={MAX_SIDES}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Clamps a requested radial subdivision count into the supported range.
///
/// # Example
///
/// ```rust
/// use config::constants::{clamp_sides, MAX_SIDES, MIN_SIDES};
///
/// assert_eq!(clamp_sides(1), MIN_SIDES);
/// assert_eq!(clamp_sides(10_000), MAX_SIDES);
/// assert_eq!(clamp_sides(24), 24);
/// ```
#[inline]
pub fn clamp_sides(sides: u32) -> u32 {
    sides.clamp(MIN_SIDES, MAX_SIDES)
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

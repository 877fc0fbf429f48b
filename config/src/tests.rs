//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

#[test]
fn test_continuity_epsilon_larger_than_epsilon() {
    assert!(
        CONTINUITY_EPSILON >= EPSILON,
        "CONTINUITY_EPSILON should be >= EPSILON"
    );
}

// =============================================================================
// RESOLUTION TESTS
// =============================================================================

#[test]
fn test_min_sides_at_least_three() {
    // A cross-section needs at least 3 points to form a polygon
    assert!(MIN_SIDES >= 3);
}

#[test]
fn test_default_sides_in_range() {
    assert!(DEFAULT_SIDES >= MIN_SIDES);
    assert!(DEFAULT_SIDES <= MAX_SIDES);
}

#[test]
fn test_clamp_sides() {
    assert_eq!(clamp_sides(0), MIN_SIDES);
    assert_eq!(clamp_sides(MAX_SIDES + 1), MAX_SIDES);
    assert_eq!(clamp_sides(DEFAULT_SIDES), DEFAULT_SIDES);
}

// =============================================================================
// RESAMPLING TESTS
// =============================================================================

#[test]
fn test_resampling_defaults_positive() {
    assert!(DEFAULT_DEVIATION_THRESHOLD > 0.0);
    assert!(DEFAULT_RADIUS_TOLERANCE > 0.0);
    assert!(DEFAULT_MAX_SPACING > DEFAULT_DEVIATION_THRESHOLD);
}

#[test]
fn test_radius_override_ranges_ordered() {
    assert!(MIN_FIXED_RADIUS < MAX_FIXED_RADIUS);
    assert!(MIN_RADIUS_SCALE < MAX_RADIUS_SCALE);
}

// =============================================================================
// GLOBAL CONFIG TESTS
// =============================================================================

#[test]
fn test_global_config_default_is_valid() {
    let cfg = GlobalConfig::default();
    assert!(GlobalConfig::new(cfg.tolerance, cfg.default_sides).is_ok());
}

#[test]
fn test_global_config_rejects_invalid_values() {
    assert_eq!(
        GlobalConfig::new(0.0, 16).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert_eq!(
        GlobalConfig::new(1e-3, 2).unwrap_err(),
        ConfigError::InvalidSides(2)
    );
    assert!(GlobalConfig::new(f64::NAN, 16).is_err());
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidSides(1);
    assert!(err.to_string().contains("sides"));
}

// =============================================================================
// APPROX TESTS
// =============================================================================

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(EPSILON / 2.0));
    assert!(!approx_zero(EPSILON * 2.0));
    assert!(!approx_zero(-0.1));
}

//! # Config Crate
//!
//! Centralized configuration constants for the neuronal skeleton geometry
//! pipeline. Tessellation quality, resampling thresholds and floating-point
//! tolerances are defined here so the data model and the builder agree on
//! them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_SIDES, EPSILON, MIN_SIDES};
//!
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! let requested = 2;
//! let sides = if requested >= MIN_SIDES { requested } else { DEFAULT_SIDES };
//! assert_eq!(sides, DEFAULT_SIDES);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Micron Units**: Distances and radii are expressed in morphology units
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;

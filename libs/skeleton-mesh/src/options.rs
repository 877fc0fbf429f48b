//! # Build Options
//!
//! Everything a build needs besides the skeleton. Options deserialize from
//! any serde format with every field optional; missing fields take the
//! defaults from `config::constants`.
//!
//! ```rust
//! use skeleton_mesh::{BuildOptions, Strategy};
//!
//! let options = BuildOptions {
//!     strategy: Strategy::ArticulatedSections,
//!     sides: 8,
//!     ..BuildOptions::default()
//! };
//! assert!(options.validate().is_ok());
//! ```

use crate::builder::Strategy;
use crate::error::{BuildError, BuildResult};
use config::constants::{
    GlobalConfig, CONTINUITY_EPSILON, DEFAULT_DEVIATION_THRESHOLD, DEFAULT_MAX_SPACING,
    DEFAULT_RADIUS_TOLERANCE, DEFAULT_SIDES, MAX_FIXED_RADIUS, MAX_RADIUS_SCALE,
    MIN_FIXED_RADIUS, MIN_RADIUS_SCALE, UNLIMITED_BRANCHING_ORDER,
};
use morphology::SectionType;
use serde::{Deserialize, Serialize};

/// Line or surface output for section chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// A centreline with radii, extruded by the host.
    Line,
    /// One tapered cone per consecutive sample pair.
    #[default]
    Surface,
}

/// How the soma sphere is sized, or whether it is drawn at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SomaPolicy {
    /// No soma geometry.
    Ignore,
    /// Sphere of the soma's mean radius.
    #[default]
    MeanRadius,
    /// Sphere of the soma's maximum radius.
    MaxRadius,
}

/// Radii used for arbor geometry. The soma is never affected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusPolicy {
    /// Radii as recorded in the morphology.
    #[default]
    AsSpecified,
    /// Every sample gets this radius.
    Fixed(f64),
    /// Every radius is multiplied by this factor.
    Scaled(f64),
}

impl RadiusPolicy {
    /// Radius to draw for a recorded radius.
    #[inline]
    pub fn apply(self, radius: f64) -> f64 {
        match self {
            RadiusPolicy::AsSpecified => radius,
            RadiusPolicy::Fixed(value) => value,
            RadiusPolicy::Scaled(factor) => radius * factor,
        }
    }

    fn validate(self) -> BuildResult<()> {
        let (policy, value, min, max) = match self {
            RadiusPolicy::AsSpecified => return Ok(()),
            RadiusPolicy::Fixed(value) => ("fixed radius", value, MIN_FIXED_RADIUS, MAX_FIXED_RADIUS),
            RadiusPolicy::Scaled(value) => ("scale factor", value, MIN_RADIUS_SCALE, MAX_RADIUS_SCALE),
        };
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(BuildError::InvalidRadiusOverride {
                policy,
                value,
                min,
                max,
            })
        }
    }
}

/// Radius of the joint sphere articulating a section onto its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointRadiusPolicy {
    /// The larger of the parent's end radius and the child's start radius.
    #[default]
    Larger,
    /// The smaller of the two.
    Smaller,
}

impl JointRadiusPolicy {
    /// Picks the joint radius.
    #[inline]
    pub fn pick(self, parent_end: f64, child_start: f64) -> f64 {
        match self {
            JointRadiusPolicy::Larger => parent_end.max(child_start),
            JointRadiusPolicy::Smaller => parent_end.min(child_start),
        }
    }
}

/// Thresholds of the disconnected-skeleton resampler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleParams {
    /// Largest perpendicular distance a dropped sample may have from the
    /// chord between the retained samples around it.
    pub deviation_threshold: f64,
    /// Relative radius change that forces a sample to be kept.
    pub radius_tolerance: f64,
    /// Largest arc length allowed between two retained samples.
    pub max_spacing: f64,
}

impl Default for ResampleParams {
    fn default() -> Self {
        Self {
            deviation_threshold: DEFAULT_DEVIATION_THRESHOLD,
            radius_tolerance: DEFAULT_RADIUS_TOLERANCE,
            max_spacing: DEFAULT_MAX_SPACING,
        }
    }
}

impl ResampleParams {
    /// Rejects negative or NaN thresholds.
    pub fn validate(&self) -> BuildResult<()> {
        for (name, value) in [
            ("deviation_threshold", self.deviation_threshold),
            ("radius_tolerance", self.radius_tolerance),
            ("max_spacing", self.max_spacing),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(BuildError::negative(name, value));
            }
        }
        Ok(())
    }
}

/// Whether and how deep an arbor type is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborFilter {
    /// Build arbors of this type.
    pub build: bool,
    /// Deepest branching order drawn; root sections have order 0.
    pub max_branching_order: u32,
}

impl Default for ArborFilter {
    fn default() -> Self {
        Self {
            build: true,
            max_branching_order: UNLIMITED_BRANCHING_ORDER,
        }
    }
}

/// Per-type arbor filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborFilters {
    /// Axon.
    pub axon: ArborFilter,
    /// Basal dendrites.
    pub basal_dendrites: ArborFilter,
    /// Apical dendrite.
    pub apical_dendrite: ArborFilter,
}

impl ArborFilters {
    /// Filter for a section type. Soma-typed sections are always built.
    pub fn for_type(&self, section_type: SectionType) -> ArborFilter {
        match section_type {
            SectionType::Axon => self.axon,
            SectionType::BasalDendrite => self.basal_dendrites,
            SectionType::ApicalDendrite => self.apical_dendrite,
            SectionType::Soma => ArborFilter::default(),
        }
    }
}

/// Options of a skeleton build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Construction strategy.
    pub strategy: Strategy,
    /// Line or surface output.
    pub representation: Representation,
    /// Radial subdivisions of cones and spheres.
    pub sides: u32,
    /// Soma sphere sizing.
    pub soma: SomaPolicy,
    /// Arbor radius override.
    pub radii: RadiusPolicy,
    /// Joint sphere sizing for articulated sections.
    pub joint_radius: JointRadiusPolicy,
    /// Cap terminal sections with spheres when the strategy uses terminals.
    pub terminal_spheres: bool,
    /// Resampler thresholds for the disconnected skeleton.
    pub resample: ResampleParams,
    /// Per-type arbor filters.
    pub arbors: ArborFilters,
    /// Start connected root chains at the soma centre.
    pub connect_to_soma: bool,
    /// Distance under which a child's first sample is the parent's last.
    pub continuity_tolerance: f64,
    /// Build root arbors on the rayon thread pool.
    pub parallel: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            representation: Representation::default(),
            sides: DEFAULT_SIDES,
            soma: SomaPolicy::default(),
            radii: RadiusPolicy::default(),
            joint_radius: JointRadiusPolicy::default(),
            terminal_spheres: true,
            resample: ResampleParams::default(),
            arbors: ArborFilters::default(),
            connect_to_soma: false,
            continuity_tolerance: CONTINUITY_EPSILON,
            parallel: false,
        }
    }
}

impl BuildOptions {
    /// Options with the given strategy and defaults otherwise.
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Checks every option. Called before any traversal starts.
    pub fn validate(&self) -> BuildResult<()> {
        GlobalConfig::new(self.continuity_tolerance, self.sides)?;
        self.radii.validate()?;
        self.resample.validate()
    }
}

//! # Sample
//!
//! One measured point along a section centreline.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A position + radius measurement.
///
/// The arc-length offset is derived when the sample is placed into a
/// [`crate::Section`]; a free-standing sample has an offset of zero.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use morphology::Sample;
///
/// let sample = Sample::new(DVec3::new(1.0, 2.0, 3.0), 0.5);
/// assert_eq!(sample.radius(), 0.5);
/// assert_eq!(sample.arc_length(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    position: DVec3,
    radius: f64,
    #[serde(default)]
    arc_length: f64,
}

impl Sample {
    /// Creates a sample at `position` with the given `radius`.
    pub fn new(position: DVec3, radius: f64) -> Self {
        Self {
            position,
            radius,
            arc_length: 0.0,
        }
    }

    /// Centreline position.
    #[inline]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Cross-section radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance along the section centreline from the first sample.
    #[inline]
    pub fn arc_length(&self) -> f64 {
        self.arc_length
    }

    /// Returns a copy with a different radius, keeping position and offset.
    pub fn with_radius(&self, radius: f64) -> Self {
        Self { radius, ..*self }
    }

    pub(crate) fn with_arc_length(&self, arc_length: f64) -> Self {
        Self {
            arc_length,
            ..*self
        }
    }

    /// Euclidean distance between two samples' positions.
    #[inline]
    pub fn distance(&self, other: &Sample) -> f64 {
        self.position.distance(other.position)
    }
}

/// Assigns cumulative arc-length offsets to `samples`, starting at zero.
pub(crate) fn assign_arc_lengths(samples: &mut [Sample]) {
    let mut offset = 0.0;
    let mut previous: Option<DVec3> = None;
    for sample in samples.iter_mut() {
        if let Some(prev) = previous {
            offset += prev.distance(sample.position);
        }
        *sample = sample.with_arc_length(offset);
        previous = Some(sample.position);
    }
}

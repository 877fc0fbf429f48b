//! # Bounding Boxes
//!
//! Axis-aligned boxes over produced geometry, used by hosts to frame the
//! camera on a morphology.
//!
//! [`BoundsAccumulator`] unions boxes incrementally, so a partial scene can be
//! framed without re-scanning the vertices of objects already accounted for.

use crate::descriptor::GeometryDescriptor;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its minimum and maximum corners.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use skeleton_mesh::BoundingBox;
///
/// let a = BoundingBox::new(DVec3::ZERO, DVec3::ONE);
/// let b = BoundingBox::new(DVec3::new(10.0, 0.0, 0.0), DVec3::new(11.0, 1.0, 1.0));
/// let both = a.union(&b);
/// assert_eq!(both.max, DVec3::new(11.0, 1.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl BoundingBox {
    /// Creates a box from two corners, ordering them component-wise.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The canonical empty-scene box: zero-sized, at the origin.
    pub const fn zero() -> Self {
        Self {
            min: DVec3::ZERO,
            max: DVec3::ZERO,
        }
    }

    /// A degenerate box around a single point.
    pub fn from_point(point: DVec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// A box centred at `center` extending `half_extent` along each axis.
    pub fn around(center: DVec3, half_extent: DVec3) -> Self {
        let half = half_extent.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box covering all `points`, `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec3>,
    {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, |bounds, p| bounds.including(p)))
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Smallest box covering this box and `point`.
    pub fn including(&self, point: DVec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Edge lengths along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Centre of the box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// True when `other` lies inside this box, allowing `tolerance` slack.
    pub fn contains_box(&self, other: &BoundingBox, tolerance: f64) -> bool {
        other.min.cmpge(self.min - DVec3::splat(tolerance)).all()
            && other.max.cmple(self.max + DVec3::splat(tolerance)).all()
    }

    /// True when both corners match within `tolerance`.
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        self.min.abs_diff_eq(other.min, tolerance) && self.max.abs_diff_eq(other.max, tolerance)
    }
}

/// Incremental union of bounding boxes.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use skeleton_mesh::{BoundingBox, BoundsAccumulator};
///
/// let mut acc = BoundsAccumulator::new();
/// assert_eq!(acc.finish(), BoundingBox::zero());
///
/// acc.add_box(&BoundingBox::new(DVec3::ONE, DVec3::splat(2.0)));
/// assert_eq!(acc.finish().min, DVec3::ONE);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundsAccumulator {
    bounds: Option<BoundingBox>,
}

impl BoundsAccumulator {
    /// An accumulator that has seen nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point.
    pub fn add_point(&mut self, point: DVec3) {
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.including(point),
            None => BoundingBox::from_point(point),
        });
    }

    /// Adds an already-computed box.
    pub fn add_box(&mut self, other: &BoundingBox) {
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(other),
            None => *other,
        });
    }

    /// Adds the extent of one geometry descriptor.
    pub fn add_descriptor(&mut self, descriptor: &GeometryDescriptor) {
        if let Some(bounds) = descriptor.geometry.bounds() {
            self.add_box(&bounds);
        }
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &BoundsAccumulator) {
        if let Some(bounds) = other.bounds {
            self.add_box(&bounds);
        }
    }

    /// True until something with an extent has been added.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// The accumulated box, `None` when nothing was added.
    pub fn get(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// The accumulated box, or [`BoundingBox::zero`] when nothing was added.
    pub fn finish(&self) -> BoundingBox {
        self.bounds.unwrap_or_else(BoundingBox::zero)
    }
}

impl<'a> Extend<&'a GeometryDescriptor> for BoundsAccumulator {
    fn extend<I: IntoIterator<Item = &'a GeometryDescriptor>>(&mut self, iter: I) {
        for descriptor in iter {
            self.add_descriptor(descriptor);
        }
    }
}

impl<'a> FromIterator<&'a GeometryDescriptor> for BoundsAccumulator {
    fn from_iter<I: IntoIterator<Item = &'a GeometryDescriptor>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Bounds of a batch of descriptors; the zero box when the batch is empty.
pub fn descriptors_bounds<'a, I>(descriptors: I) -> BoundingBox
where
    I: IntoIterator<Item = &'a GeometryDescriptor>,
{
    descriptors.into_iter().collect::<BoundsAccumulator>().finish()
}

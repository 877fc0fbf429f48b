//! # Skeleton Builder
//!
//! Walks a [`Skeleton`] and emits one [`GeometryDescriptor`] per scene
//! object under the chosen [`Strategy`].
//!
//! ## Emission Order
//!
//! 1. The soma sphere, when the soma policy asks for one
//! 2. Each enabled root in attachment order, depth first: a section's chain
//!    (or segments), its joint sphere, its terminal sphere, then its children
//!
//! The order is the same whether or not roots are built in parallel.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{Sample, SectionType, Skeleton, Soma};
//! use skeleton_mesh::{BuildOptions, SkeletonBuilder, Strategy};
//!
//! let mut skeleton = Skeleton::new(Soma::sphere(DVec3::ZERO, 2.0)?);
//! skeleton.add_root(
//!     SectionType::Axon,
//!     vec![
//!         Sample::new(DVec3::new(0.0, 0.0, 2.0), 1.0),
//!         Sample::new(DVec3::new(0.0, 0.0, 10.0), 0.5),
//!     ],
//! )?;
//!
//! let options = BuildOptions::with_strategy(Strategy::DisconnectedSections);
//! let geometry = SkeletonBuilder::new(&skeleton, options)?.build()?;
//! assert_eq!(geometry.len(), 3); // soma, section, terminal
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod strategy;
mod traversal;

pub use strategy::Strategy;

use crate::bounds::{BoundingBox, BoundsAccumulator};
use crate::descriptor::GeometryDescriptor;
use crate::error::{BuildResult, HostBuildError};
use crate::host::SceneHost;
use crate::options::BuildOptions;
use crate::resample::resample_skeleton;
use morphology::{SectionId, Skeleton};
use rayon::prelude::*;
use std::borrow::Cow;
use traversal::Emitter;

/// Builds geometry descriptors from a skeleton.
///
/// Options are validated on construction, so a builder that exists can
/// only fail on host errors.
#[derive(Debug, Clone)]
pub struct SkeletonBuilder<'a> {
    skeleton: &'a Skeleton,
    options: BuildOptions,
}

impl<'a> SkeletonBuilder<'a> {
    /// Creates a builder after validating `options`.
    pub fn new(skeleton: &'a Skeleton, options: BuildOptions) -> BuildResult<Self> {
        options.validate()?;
        Ok(Self { skeleton, options })
    }

    /// Options in effect.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Emits every descriptor in traversal order.
    pub fn build(&self) -> BuildResult<SkeletonGeometry> {
        let span = tracing::info_span!(
            "skeleton_build",
            strategy = %self.options.strategy,
            sections = self.skeleton.len(),
            parallel = self.options.parallel,
        );
        let _guard = span.enter();

        let skeleton = if self.options.strategy.uses_resampler() {
            Cow::Owned(resample_skeleton(self.skeleton, &self.options.resample)?)
        } else {
            Cow::Borrowed(self.skeleton)
        };

        let emitter = Emitter::new(&skeleton, &self.options);
        let mut descriptors: Vec<GeometryDescriptor> = emitter.soma().into_iter().collect();
        let roots = emitter.roots();

        let arbors: Vec<Vec<GeometryDescriptor>> = if self.options.parallel {
            roots.par_iter().map(|root| emitter.arbor(*root)).collect()
        } else {
            roots.iter().map(|root| emitter.arbor(*root)).collect()
        };
        descriptors.extend(arbors.into_iter().flatten());

        let geometry = SkeletonGeometry::new(descriptors);
        tracing::info!(descriptors = geometry.len(), "skeleton geometry built");
        Ok(geometry)
    }

    /// Builds and hands each descriptor to `host`, in emission order.
    ///
    /// Stops at the first host failure and returns that error unchanged.
    pub fn build_into<H>(&self, host: &mut H) -> Result<Vec<H::Handle>, HostBuildError<H::Error>>
    where
        H: SceneHost,
    {
        let geometry = self.build()?;
        geometry
            .iter()
            .map(|descriptor| host.materialize(descriptor).map_err(HostBuildError::Host))
            .collect()
    }
}

/// Validates `options` and builds `skeleton` in one call.
pub fn build_skeleton(skeleton: &Skeleton, options: BuildOptions) -> BuildResult<SkeletonGeometry> {
    SkeletonBuilder::new(skeleton, options)?.build()
}

/// Descriptors of one build together with their combined extent.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonGeometry {
    descriptors: Vec<GeometryDescriptor>,
    bounds: BoundingBox,
}

impl SkeletonGeometry {
    fn new(descriptors: Vec<GeometryDescriptor>) -> Self {
        let bounds = descriptors.iter().collect::<BoundsAccumulator>().finish();
        Self { descriptors, bounds }
    }

    /// Descriptors in emission order.
    pub fn descriptors(&self) -> &[GeometryDescriptor] {
        &self.descriptors
    }

    /// Union of every descriptor's bounds; a zero box when nothing was built.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// True when nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Iterates descriptors in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, GeometryDescriptor> {
        self.descriptors.iter()
    }

    /// Descriptors originating from one section.
    pub fn by_section(&self, id: SectionId) -> impl Iterator<Item = &GeometryDescriptor> + '_ {
        self.descriptors
            .iter()
            .filter(move |d| d.provenance.section == Some(id))
    }

    /// Gives up the descriptors.
    pub fn into_descriptors(self) -> Vec<GeometryDescriptor> {
        self.descriptors
    }
}

impl<'g> IntoIterator for &'g SkeletonGeometry {
    type Item = &'g GeometryDescriptor;
    type IntoIter = std::slice::Iter<'g, GeometryDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

#[cfg(test)]
mod tests;

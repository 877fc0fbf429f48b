//! # Skeleton Mesh
//!
//! Geometry construction for neuronal skeletons. Turns a
//! [`morphology::Skeleton`] into a batch of [`GeometryDescriptor`]s (soma
//! spheres, section chains, terminal and joint spheres) that a scene host
//! materializes.
//!
//! ## Architecture
//!
//! ```text
//! Skeleton → [resample] → SkeletonBuilder → GeometryDescriptor* → SceneHost
//!                                                  ↓
//!                                          BoundsAccumulator
//! ```
//!
//! ## Modules
//!
//! - [`primitives`]: cones, spheres and polylines from centreline vertices
//! - [`resample`]: shape-preserving sample reduction
//! - [`builder`]: the five construction strategies
//! - [`bounds`]: incremental bounding boxes
//! - [`host`]: the scene host seam and an in-memory mesh host
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{Sample, SectionType, Skeleton, Soma};
//! use skeleton_mesh::{build_skeleton, BuildOptions};
//!
//! let mut skeleton = Skeleton::new(Soma::sphere(DVec3::ZERO, 1.0)?);
//! skeleton.add_root(
//!     SectionType::BasalDendrite,
//!     vec![
//!         Sample::new(DVec3::new(1.0, 0.0, 0.0), 0.5),
//!         Sample::new(DVec3::new(6.0, 0.0, 0.0), 0.25),
//!     ],
//! )?;
//!
//! let geometry = build_skeleton(&skeleton, BuildOptions::default())?;
//! assert_eq!(geometry.len(), 2);
//! assert!(geometry.bounds().max.x >= 6.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bounds;
pub mod builder;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod mesh;
pub mod options;
pub mod primitives;
pub mod resample;

pub use bounds::{descriptors_bounds, BoundingBox, BoundsAccumulator};
pub use builder::{build_skeleton, SkeletonBuilder, SkeletonGeometry, Strategy};
pub use descriptor::{
    ChainVertex, ConeSegment, Geometry, GeometryDescriptor, ObjectRole, Polyline, Provenance,
    Sphere, VertexId,
};
pub use error::{BuildError, BuildResult, HostBuildError};
pub use host::{scene_bounds, JoinObjects, MeshScene, ObjectHandle, SceneError, SceneHost};
pub use mesh::Mesh;
pub use options::{
    ArborFilter, ArborFilters, BuildOptions, JointRadiusPolicy, RadiusPolicy, Representation,
    ResampleParams, SomaPolicy,
};
pub use resample::{resample_section, resample_skeleton};

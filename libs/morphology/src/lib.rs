//! # Morphology
//!
//! Typed, read-only skeleton of a digitized neuron: a soma plus a forest of
//! tubular sections, each an ordered run of position+radius samples.
//!
//! ## Architecture
//!
//! ```text
//! morphology reader (external) → Skeleton → skeleton-mesh (geometry descriptors)
//! ```
//!
//! Sections live in an arena owned by [`Skeleton`]. Parent and child links are
//! [`SectionId`] indices into that arena, never references, so the tree has no
//! ownership cycles.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{Sample, SectionType, Skeleton, Soma};
//!
//! let mut skeleton = Skeleton::new(Soma::sphere(DVec3::ZERO, 2.0)?);
//! let axon = skeleton.add_root(
//!     SectionType::Axon,
//!     vec![
//!         Sample::new(DVec3::ZERO, 1.0),
//!         Sample::new(DVec3::new(0.0, 0.0, 5.0), 0.8),
//!     ],
//! )?;
//! assert!(skeleton.section(axon).is_some_and(|s| s.is_root()));
//! # Ok::<(), morphology::MorphologyError>(())
//! ```

pub mod error;
pub mod sample;
pub mod section;
pub mod skeleton;
pub mod soma;

pub use error::{MorphologyError, MorphologyResult};
pub use sample::Sample;
pub use section::{Section, SectionId, SectionType};
pub use skeleton::{DepthFirst, Skeleton};
pub use soma::Soma;

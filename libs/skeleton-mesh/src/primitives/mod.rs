//! # Primitives
//!
//! Elementary geometry built from samples: tapered cone segments, spheres
//! and polylines, plus their tessellation into triangle meshes.
//!
//! Degenerate input never produces geometry. Zero-length segments are
//! dropped without logging; the resampler keeps duplicate runs out of the
//! data it hands to the builder.

pub mod cone;
pub mod polyline;
pub mod sphere;

pub use cone::{cone_bounds, cone_chain, cone_segment, tessellate_cone};
pub use polyline::{collapse_duplicates, polyline};
pub use sphere::{sphere, tessellate_sphere};

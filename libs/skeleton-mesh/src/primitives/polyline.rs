//! # Polyline Primitive
//!
//! Centreline + radius attribute for the line representation.

use crate::descriptor::{ChainVertex, Polyline};
use config::constants::approx_zero;

/// Removes consecutive vertices that coincide with the previous kept one.
///
/// The first vertex always survives. When the final vertex duplicates its
/// predecessor it takes that predecessor's place, so a chain always ends on
/// the section's own last vertex.
pub fn collapse_duplicates(vertices: &[ChainVertex]) -> Vec<ChainVertex> {
    let mut kept: Vec<ChainVertex> = Vec::with_capacity(vertices.len());
    let last_index = vertices.len().saturating_sub(1);
    for (index, vertex) in vertices.iter().enumerate() {
        let Some(previous) = kept.last() else {
            kept.push(*vertex);
            continue;
        };
        if !approx_zero(previous.position.distance(vertex.position)) {
            kept.push(*vertex);
        } else if index == last_index && kept.len() > 1 {
            let end = kept.len() - 1;
            kept[end] = *vertex;
        }
    }
    kept
}

/// Builds a polyline from centreline vertices.
///
/// Returns `None` when fewer than two distinct positions remain.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use morphology::SectionId;
/// use skeleton_mesh::descriptor::{ChainVertex, VertexId};
/// use skeleton_mesh::primitives::polyline;
///
/// let v = |i: usize, z: f64| ChainVertex {
///     id: VertexId::section(SectionId(0), i),
///     position: DVec3::new(0.0, 0.0, z),
///     radius: 1.0,
/// };
/// assert!(polyline(&[v(0, 0.0), v(1, 1.0)]).is_some());
/// assert!(polyline(&[v(0, 0.0), v(1, 0.0)]).is_none());
/// ```
pub fn polyline(vertices: &[ChainVertex]) -> Option<Polyline> {
    let vertices = collapse_duplicates(vertices);
    (vertices.len() >= 2).then_some(Polyline { vertices })
}

//! # Cone Primitive
//!
//! Tapered cylinder between two centreline vertices.

use crate::bounds::BoundingBox;
use crate::descriptor::{ChainVertex, ConeSegment};
use crate::mesh::Mesh;
use crate::primitives::polyline::collapse_duplicates;
use config::constants::{approx_zero, clamp_sides};
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a cone segment between two vertices.
///
/// Returns `None` for a zero-length segment. A zero radius at either end is
/// legal and collapses that end into an apex.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use morphology::SectionId;
/// use skeleton_mesh::descriptor::{ChainVertex, VertexId};
/// use skeleton_mesh::primitives::cone_segment;
///
/// let a = ChainVertex { id: VertexId::section(SectionId(0), 0), position: DVec3::ZERO, radius: 1.0 };
/// let b = ChainVertex { id: VertexId::section(SectionId(0), 1), position: DVec3::Z, radius: 0.0 };
/// let cone = cone_segment(a, b, 16).unwrap();
/// assert_eq!(cone.length(), 1.0);
/// assert!(cone_segment(a, a, 16).is_none());
/// ```
pub fn cone_segment(start: ChainVertex, end: ChainVertex, sides: u32) -> Option<ConeSegment> {
    (!approx_zero(start.position.distance(end.position))).then_some(ConeSegment { start, end, sides })
}

/// One cone per consecutive pair of distinct vertices.
///
/// Returns `None` when no non-degenerate segment remains.
pub fn cone_chain(vertices: &[ChainVertex], sides: u32) -> Option<Vec<ConeSegment>> {
    let vertices = collapse_duplicates(vertices);
    let segments: Vec<ConeSegment> = vertices
        .windows(2)
        .filter_map(|pair| cone_segment(pair[0], pair[1], sides))
        .collect();
    (!segments.is_empty()).then_some(segments)
}

/// Exact axis-aligned bounds of the cone between `start` and `end`.
///
/// Each end is a circle perpendicular to the axis `a`; along world axis `k`
/// it extends `r * sqrt(1 - a_k^2)` from its centre. A zero-length axis is
/// bounded as a sphere of the larger radius.
pub fn cone_bounds(start: &ChainVertex, end: &ChainVertex) -> BoundingBox {
    let axis = (end.position - start.position).normalize_or_zero();
    let spread = if axis == DVec3::ZERO {
        DVec3::ONE
    } else {
        let squared = (DVec3::ONE - axis * axis).max(DVec3::ZERO);
        DVec3::new(squared.x.sqrt(), squared.y.sqrt(), squared.z.sqrt())
    };
    BoundingBox::around(start.position, spread * start.radius)
        .union(&BoundingBox::around(end.position, spread * end.radius))
}

/// Triangulates a cone segment.
///
/// Rings of `sides` vertices sit in the planes perpendicular to the axis at
/// both ends; a zero radius end becomes a single apex vertex. Both ends are
/// capped. Zero-length cones and cones with two zero radii enclose no area
/// and yield an empty mesh.
pub fn tessellate_cone(cone: &ConeSegment) -> Mesh {
    let axis = cone.end.position - cone.start.position;
    let r0 = cone.start.radius;
    let r1 = cone.end.radius;
    if approx_zero(axis.length()) || (r0 <= 0.0 && r1 <= 0.0) {
        return Mesh::new();
    }

    let segments = clamp_sides(cone.sides);
    let (u, v) = axis.normalize().any_orthonormal_pair();
    let mut mesh = Mesh::with_capacity(2 * segments as usize, 4 * segments as usize);

    let ring = |center: DVec3, radius: f64, mesh: &mut Mesh| -> Vec<u32> {
        if radius <= 0.0 {
            return vec![mesh.add_vertex(center)];
        }
        (0..segments)
            .map(|j| {
                let theta = TAU * j as f64 / segments as f64;
                let (sin, cos) = theta.sin_cos();
                mesh.add_vertex(center + (u * cos + v * sin) * radius)
            })
            .collect()
    };

    let bottom = ring(cone.start.position, r0, &mut mesh);
    let top = ring(cone.end.position, r1, &mut mesh);

    // Side faces
    if r0 > 0.0 && r1 > 0.0 {
        for j in 0..segments as usize {
            let j_next = (j + 1) % segments as usize;
            mesh.add_triangle(bottom[j], bottom[j_next], top[j_next]);
            mesh.add_triangle(bottom[j], top[j_next], top[j]);
        }
    } else if r0 > 0.0 {
        let apex = top[0];
        for j in 0..segments as usize {
            let j_next = (j + 1) % segments as usize;
            mesh.add_triangle(bottom[j], bottom[j_next], apex);
        }
    } else {
        let apex = bottom[0];
        for j in 0..segments as usize {
            let j_next = (j + 1) % segments as usize;
            mesh.add_triangle(apex, top[j_next], top[j]);
        }
    }

    // Caps
    if r0 > 0.0 {
        for j in 1..segments as usize - 1 {
            mesh.add_triangle(bottom[0], bottom[j + 1], bottom[j]);
        }
    }
    if r1 > 0.0 {
        for j in 1..segments as usize - 1 {
            mesh.add_triangle(top[0], top[j], top[j + 1]);
        }
    }

    mesh
}

//! # Sphere Primitive
//!
//! Spheres for the soma, terminals and joints, with latitude/longitude
//! tessellation.

use crate::descriptor::Sphere;
use crate::mesh::Mesh;
use config::constants::{clamp_sides, EPSILON};
use glam::DVec3;
use std::f64::consts::PI;

/// Creates a sphere primitive.
///
/// Returns `None` for a radius that is not a positive finite number, since a
/// point-sized sphere has nothing to draw.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use skeleton_mesh::primitives::sphere;
///
/// assert!(sphere(DVec3::ZERO, 2.0, 16).is_some());
/// assert!(sphere(DVec3::ZERO, 0.0, 16).is_none());
/// ```
pub fn sphere(center: DVec3, radius: f64, sides: u32) -> Option<Sphere> {
    (radius.is_finite() && radius >= EPSILON).then_some(Sphere {
        center,
        radius,
        sides,
    })
}

/// Triangulates a sphere using latitude/longitude tessellation.
///
/// - num_rings = (sides + 1) / 2
/// - Each ring at polar angle phi = 180° * (i + 0.5) / num_rings
/// - No pole vertices; the first and last rings are closed by polygon caps
pub fn tessellate_sphere(sphere: &Sphere) -> Mesh {
    let segments = clamp_sides(sphere.sides);
    let num_rings = segments.div_ceil(2).max(2);
    let mut mesh = Mesh::with_capacity((num_rings * segments) as usize, (2 * num_rings * segments) as usize);

    let rings: Vec<Vec<u32>> = (0..num_rings)
        .map(|i| {
            let phi = PI * (i as f64 + 0.5) / num_rings as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let ring_radius = sphere.radius * sin_phi;
            let z = sphere.radius * cos_phi;
            (0..segments)
                .map(|j| {
                    let theta = 2.0 * PI * j as f64 / segments as f64;
                    let offset = DVec3::new(ring_radius * theta.cos(), ring_radius * theta.sin(), z);
                    mesh.add_vertex(sphere.center + offset)
                })
                .collect()
        })
        .collect();

    // Top cap
    let first_ring = &rings[0];
    for j in 1..segments as usize - 1 {
        mesh.add_triangle(first_ring[0], first_ring[j], first_ring[j + 1]);
    }

    // Middle bands
    for pair in rings.windows(2) {
        let (ring_a, ring_b) = (&pair[0], &pair[1]);
        for j in 0..segments as usize {
            let j_next = (j + 1) % segments as usize;
            mesh.add_triangle(ring_a[j], ring_b[j], ring_b[j_next]);
            mesh.add_triangle(ring_a[j], ring_b[j_next], ring_a[j_next]);
        }
    }

    // Bottom cap
    let last_ring = &rings[rings.len() - 1];
    for j in 1..segments as usize - 1 {
        mesh.add_triangle(last_ring[0], last_ring[j + 1], last_ring[j]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_tessellation_validates() {
        let mesh = tessellate_sphere(&sphere(DVec3::ZERO, 5.0, 16).unwrap());
        assert!(mesh.vertex_count() > 0);
        assert!(mesh.validate());
    }

    #[test]
    fn test_sphere_is_centred() {
        let center = DVec3::new(10.0, -2.0, 3.0);
        let radius = 2.0;
        let bounds = tessellate_sphere(&sphere(center, radius, 32).unwrap()).bounding_box();
        let tolerance = radius * 0.1;
        assert!((bounds.center() - center).length() < tolerance);
        assert!(bounds.max.x <= center.x + radius + tolerance);
        assert!(bounds.min.z >= center.z - radius - tolerance);
    }

    #[test]
    fn test_degenerate_radius_is_rejected() {
        assert!(sphere(DVec3::ZERO, 0.0, 16).is_none());
        assert!(sphere(DVec3::ZERO, -1.0, 16).is_none());
        assert!(sphere(DVec3::ZERO, f64::NAN, 16).is_none());
    }

    #[test]
    fn test_minimum_sides_still_closed() {
        let mesh = tessellate_sphere(&sphere(DVec3::ZERO, 1.0, 3).unwrap());
        assert!(mesh.triangle_count() > 0);
        assert!(mesh.validate());
    }
}

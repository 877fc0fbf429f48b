//! # Mesh Data Structure
//!
//! Triangle mesh produced by tessellating geometry descriptors, for hosts
//! that consume triangles rather than parametric primitives.

use crate::bounds::BoundingBox;
use config::constants::EPSILON;
use glam::DVec3;

/// A triangle mesh with vertices and indices.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use skeleton_mesh::Mesh;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Computes the axis-aligned bounding box of the vertices.
    ///
    /// An empty mesh yields the zero box at the origin.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices.iter().copied()).unwrap_or_else(BoundingBox::zero)
    }

    /// Merges another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No degenerate triangles (repeated index or zero area)
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        self.triangles.iter().all(|tri| {
            if tri.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            (v1 - v0).cross(v2 - v0).length() >= EPSILON
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.bounding_box(), BoundingBox::zero());
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let bounds = mesh.bounding_box();
        assert_eq!(bounds.min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_validate_invalid_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_triangle(0, 1, 2);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_validate_zero_area() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::X * 2.0);
        mesh.add_triangle(0, 1, 2);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_merge_offsets_indices() {
        let mut mesh1 = Mesh::new();
        mesh1.add_vertex(DVec3::ZERO);
        mesh1.add_vertex(DVec3::X);
        mesh1.add_vertex(DVec3::Y);
        mesh1.add_triangle(0, 1, 2);

        let mesh2 = mesh1.clone();
        mesh1.merge(&mesh2);
        assert_eq!(mesh1.vertex_count(), 6);
        assert_eq!(mesh1.triangles()[1], [3, 4, 5]);
        assert_eq!(mesh1.vertices()[3], DVec3::ZERO);
    }
}

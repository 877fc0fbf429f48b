//! # Geometry Descriptors
//!
//! Stateless output units of the builder. A descriptor names one piece of
//! geometry, says where it came from, and carries either a parametric sphere,
//! a polyline for the host to extrude, or a chain of tapered cones.
//!
//! Centreline vertices carry a [`VertexId`]. Two descriptors share a vertex
//! exactly when they carry the same id, which is how the connected strategy
//! welds a child section onto its parent.

use crate::bounds::{BoundingBox, BoundsAccumulator};
use crate::mesh::Mesh;
use crate::primitives::{cone_bounds, tessellate_cone, tessellate_sphere};
use glam::DVec3;
use morphology::{Sample, SectionId, SectionType};
use serde::{Deserialize, Serialize};

/// Identity of a centreline vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexId {
    /// Owning section, `None` for the soma centre.
    pub section: Option<SectionId>,
    /// Owning segment when every segment is its own object.
    pub segment: Option<u32>,
    /// Sample index within the (possibly resampled) section. For a segment
    /// vertex it is the end within that segment, 0 at the start and 1 at
    /// the end.
    pub sample: u32,
}

impl VertexId {
    /// Vertex owned by a section.
    pub fn section(section: SectionId, sample: usize) -> Self {
        Self {
            section: Some(section),
            segment: None,
            sample: sample as u32,
        }
    }

    /// Vertex owned by one segment of a section, `sample` being 0 or 1.
    pub fn segment(section: SectionId, segment: usize, sample: usize) -> Self {
        Self {
            section: Some(section),
            segment: Some(segment as u32),
            sample: sample as u32,
        }
    }

    /// The soma centre, shared by arbors connected to the soma.
    pub fn soma() -> Self {
        Self {
            section: None,
            segment: None,
            sample: 0,
        }
    }
}

/// A centreline vertex with its radius attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainVertex {
    /// Vertex identity.
    pub id: VertexId,
    /// Position.
    pub position: DVec3,
    /// Cross-section radius at this vertex.
    pub radius: f64,
}

impl ChainVertex {
    /// Builds a vertex from a sample.
    pub fn from_sample(id: VertexId, sample: &Sample) -> Self {
        Self {
            id,
            position: sample.position(),
            radius: sample.radius(),
        }
    }
}

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Centre.
    pub center: DVec3,
    /// Radius, always positive.
    pub radius: f64,
    /// Segments around the circumference.
    pub sides: u32,
}

/// A tapered cylinder between two vertices.
///
/// Cross-sections are circles perpendicular to `end - start`. A zero radius
/// collapses that end into an apex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeSegment {
    /// First end.
    pub start: ChainVertex,
    /// Second end.
    pub end: ChainVertex,
    /// Radial subdivisions.
    pub sides: u32,
}

impl ConeSegment {
    /// Unit axis from start to end.
    pub fn axis(&self) -> DVec3 {
        (self.end.position - self.start.position).normalize_or_zero()
    }

    /// Axial length.
    pub fn length(&self) -> f64 {
        self.start.position.distance(self.end.position)
    }
}

/// A centreline with per-vertex radii, for hosts that extrude a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Ordered vertices, at least two distinct positions.
    pub vertices: Vec<ChainVertex>,
}

/// The geometry carried by a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Soma, terminal or joint sphere.
    Sphere(Sphere),
    /// Line representation of a section or segment.
    Polyline(Polyline),
    /// Surface representation: one cone per consecutive vertex pair.
    Cones {
        /// The cones in centreline order.
        segments: Vec<ConeSegment>,
    },
}

impl Geometry {
    /// Centreline vertices in order. Spheres have none.
    pub fn vertices(&self) -> Vec<ChainVertex> {
        match self {
            Geometry::Sphere(_) => Vec::new(),
            Geometry::Polyline(polyline) => polyline.vertices.clone(),
            Geometry::Cones { segments } => {
                let mut vertices: Vec<ChainVertex> = segments.iter().map(|c| c.start).collect();
                vertices.extend(segments.last().map(|c| c.end));
                vertices
            }
        }
    }

    /// First centreline vertex.
    pub fn first_vertex(&self) -> Option<ChainVertex> {
        match self {
            Geometry::Sphere(_) => None,
            Geometry::Polyline(polyline) => polyline.vertices.first().copied(),
            Geometry::Cones { segments } => segments.first().map(|c| c.start),
        }
    }

    /// Last centreline vertex.
    pub fn last_vertex(&self) -> Option<ChainVertex> {
        match self {
            Geometry::Sphere(_) => None,
            Geometry::Polyline(polyline) => polyline.vertices.last().copied(),
            Geometry::Cones { segments } => segments.last().map(|c| c.end),
        }
    }

    /// Exact axis-aligned extent of the surface this geometry describes.
    ///
    /// Polylines are bounded as the tube of circular cross-sections their
    /// host extrusion produces.
    pub fn bounds(&self) -> Option<BoundingBox> {
        match self {
            Geometry::Sphere(sphere) => Some(BoundingBox::around(
                sphere.center,
                DVec3::splat(sphere.radius),
            )),
            Geometry::Polyline(polyline) => {
                let mut acc = BoundsAccumulator::new();
                for pair in polyline.vertices.windows(2) {
                    acc.add_box(&cone_bounds(&pair[0], &pair[1]));
                }
                acc.get()
            }
            Geometry::Cones { segments } => {
                let mut acc = BoundsAccumulator::new();
                for cone in segments {
                    acc.add_box(&cone_bounds(&cone.start, &cone.end));
                }
                acc.get()
            }
        }
    }

    /// Bounds of the centreline positions only.
    pub fn centreline_bounds(&self) -> Option<BoundingBox> {
        match self {
            Geometry::Sphere(sphere) => Some(BoundingBox::from_point(sphere.center)),
            _ => BoundingBox::from_points(self.vertices().iter().map(|v| v.position)),
        }
    }

    /// Triangulates the geometry. Polylines are tessellated with `sides`
    /// radial subdivisions; the other kinds carry their own.
    pub fn tessellate(&self, sides: u32) -> Mesh {
        match self {
            Geometry::Sphere(sphere) => tessellate_sphere(sphere),
            Geometry::Polyline(polyline) => {
                let mut mesh = Mesh::new();
                for pair in polyline.vertices.windows(2) {
                    let cone = ConeSegment {
                        start: pair[0],
                        end: pair[1],
                        sides,
                    };
                    mesh.merge(&tessellate_cone(&cone));
                }
                mesh
            }
            Geometry::Cones { segments } => {
                let mut mesh = Mesh::new();
                for cone in segments {
                    mesh.merge(&tessellate_cone(cone));
                }
                mesh
            }
        }
    }
}

/// What a descriptor stands for in the reconstructed neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectRole {
    /// The soma sphere.
    Soma,
    /// A whole section chain.
    Section,
    /// A single segment between two samples.
    Segment,
    /// Sphere capping a terminal section.
    Terminal,
    /// Sphere articulating a section onto its parent.
    Joint,
}

/// Where a descriptor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Originating section, `None` for the soma.
    pub section: Option<SectionId>,
    /// Segment index within the section, for per-segment objects.
    pub segment: Option<u32>,
    /// Neurite type.
    pub section_type: SectionType,
    /// Branching order of the originating section (0 for the soma).
    pub branching_order: u32,
    /// Role of the object.
    pub role: ObjectRole,
}

/// A named, typed piece of geometry for the host to materialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryDescriptor {
    /// Scene object name.
    pub name: String,
    /// Origin of the geometry.
    pub provenance: Provenance,
    /// The geometry itself.
    pub geometry: Geometry,
}

impl GeometryDescriptor {
    /// Extent of the descriptor's geometry.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.geometry.bounds()
    }
}

//! # Scene Host
//!
//! The seam between the builder and whatever owns scene objects. A host
//! turns descriptors into objects and may report their bounds; joining
//! objects is a separate capability used by callers only.
//!
//! [`MeshScene`] is an in-memory host that tessellates every descriptor
//! into a triangle [`Mesh`].

use crate::bounds::{BoundingBox, BoundsAccumulator};
use crate::descriptor::GeometryDescriptor;
use crate::mesh::Mesh;
use config::constants::DEFAULT_SIDES;
use thiserror::Error;

/// Materializes descriptors into host objects.
pub trait SceneHost {
    /// Reference to a created object.
    type Handle;
    /// Host failure, handed back to the caller unchanged.
    type Error: std::error::Error + 'static;

    /// Creates the object a descriptor describes.
    fn materialize(&mut self, descriptor: &GeometryDescriptor) -> Result<Self::Handle, Self::Error>;

    /// World-space bounds of an object, when the host can tell.
    fn object_bounds(&self, _handle: &Self::Handle) -> Option<BoundingBox> {
        None
    }
}

/// Hosts that can merge several objects into one.
pub trait JoinObjects: SceneHost {
    /// Joins `handles` into a single object and returns its handle.
    fn join(&mut self, handles: Vec<Self::Handle>) -> Result<Self::Handle, Self::Error>;
}

/// Union of the bounds the host reports for `handles`.
///
/// Objects without bounds are ignored; the result is a zero box when none
/// report any.
pub fn scene_bounds<H: SceneHost>(host: &H, handles: &[H::Handle]) -> BoundingBox {
    let mut acc = BoundsAccumulator::new();
    for bounds in handles.iter().filter_map(|handle| host.object_bounds(handle)) {
        acc.add_box(&bounds);
    }
    acc.finish()
}

// =============================================================================
// IN-MEMORY MESH HOST
// =============================================================================

/// Handle of an object in a [`MeshScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(usize);

/// Errors raised by [`MeshScene`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not name a live object.
    #[error("Unknown scene object handle: {0}")]
    UnknownHandle(usize),

    /// Materializing would exceed the scene's vertex budget.
    #[error("Vertex budget exceeded: {requested} vertices requested, {budget} allowed")]
    TooManyVertices {
        /// Vertex count after the operation
        requested: usize,
        /// Configured budget
        budget: usize,
    },
}

/// A named triangle mesh in a [`MeshScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Descriptor name, or the first name for joined objects.
    pub name: String,
    /// Tessellated geometry.
    pub mesh: Mesh,
}

/// In-memory host that keeps one tessellated mesh per object.
#[derive(Debug, Clone)]
pub struct MeshScene {
    objects: Vec<Option<SceneObject>>,
    line_sides: u32,
    vertex_budget: Option<usize>,
    vertex_count: usize,
}

impl MeshScene {
    /// Empty scene. Polylines are extruded with the default side count.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            line_sides: DEFAULT_SIDES,
            vertex_budget: None,
            vertex_count: 0,
        }
    }

    /// Sets the radial subdivisions used to extrude polylines.
    pub fn with_line_sides(mut self, sides: u32) -> Self {
        self.line_sides = sides;
        self
    }

    /// Rejects materializations that would push the total vertex count
    /// above `budget`.
    pub fn with_vertex_budget(mut self, budget: usize) -> Self {
        self.vertex_budget = Some(budget);
        self
    }

    /// Looks an object up.
    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle.0).and_then(Option::as_ref)
    }

    /// Live objects.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.objects.iter().flatten()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects().count()
    }

    /// True when the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total vertices across live objects.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn insert(&mut self, object: SceneObject) -> Result<ObjectHandle, SceneError> {
        let requested = self.vertex_count + object.mesh.vertex_count();
        if let Some(budget) = self.vertex_budget {
            if requested > budget {
                return Err(SceneError::TooManyVertices { requested, budget });
            }
        }
        self.vertex_count = requested;
        self.objects.push(Some(object));
        Ok(ObjectHandle(self.objects.len() - 1))
    }
}

impl Default for MeshScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneHost for MeshScene {
    type Handle = ObjectHandle;
    type Error = SceneError;

    fn materialize(&mut self, descriptor: &GeometryDescriptor) -> Result<ObjectHandle, SceneError> {
        let mesh = descriptor.geometry.tessellate(self.line_sides);
        self.insert(SceneObject {
            name: descriptor.name.clone(),
            mesh,
        })
    }

    fn object_bounds(&self, handle: &ObjectHandle) -> Option<BoundingBox> {
        self.object(*handle)
            .filter(|object| !object.mesh.is_empty())
            .map(|object| object.mesh.bounding_box())
    }
}

impl JoinObjects for MeshScene {
    fn join(&mut self, handles: Vec<ObjectHandle>) -> Result<ObjectHandle, SceneError> {
        if let Some(missing) = handles.iter().find(|h| self.object(**h).is_none()) {
            return Err(SceneError::UnknownHandle(missing.0));
        }

        let mut name = None;
        let mut mesh = Mesh::new();
        for handle in handles {
            if let Some(object) = self.objects.get_mut(handle.0).and_then(Option::take) {
                self.vertex_count -= object.mesh.vertex_count();
                mesh.merge(&object.mesh);
                name.get_or_insert(object.name);
            }
        }
        self.insert(SceneObject {
            name: name.unwrap_or_else(|| "joined".to_string()),
            mesh,
        })
    }
}

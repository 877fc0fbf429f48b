//! Depth-first emission of descriptors for one arbor.
//!
//! The walk is iterative: an explicit stack carries each pending section
//! together with what its parent left behind, so deep arbors cannot
//! overflow the call stack.

use super::Strategy;
use crate::descriptor::{
    ChainVertex, Geometry, GeometryDescriptor, ObjectRole, Provenance, VertexId,
};
use crate::options::{BuildOptions, Representation, SomaPolicy};
use crate::primitives::{cone_chain, polyline, sphere};
use morphology::{Section, SectionId, SectionType, Skeleton};

/// What a drawn parent hands to its children.
#[derive(Debug, Clone, Copy)]
struct Attachment {
    /// Last centreline vertex the parent emitted.
    end: ChainVertex,
}

/// Emits descriptors for a skeleton under fixed options.
///
/// Holds only shared borrows, so one emitter can serve several threads.
pub(crate) struct Emitter<'a> {
    skeleton: &'a Skeleton,
    options: &'a BuildOptions,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(skeleton: &'a Skeleton, options: &'a BuildOptions) -> Self {
        Self { skeleton, options }
    }

    /// The soma sphere, unless the policy or a zero radius rules it out.
    pub(crate) fn soma(&self) -> Option<GeometryDescriptor> {
        let soma = self.skeleton.soma();
        let radius = match self.options.soma {
            SomaPolicy::Ignore => return None,
            SomaPolicy::MeanRadius => soma.mean_radius(),
            SomaPolicy::MaxRadius => soma.max_radius(),
        };
        let Some(geometry) = sphere(soma.center(), radius, self.options.sides) else {
            tracing::debug!(radius, "soma has no extent, no sphere emitted");
            return None;
        };
        Some(GeometryDescriptor {
            name: "soma".to_string(),
            provenance: Provenance {
                section: None,
                segment: None,
                section_type: SectionType::Soma,
                branching_order: 0,
                role: ObjectRole::Soma,
            },
            geometry: Geometry::Sphere(geometry),
        })
    }

    /// Roots whose arbor type is enabled, in attachment order.
    pub(crate) fn roots(&self) -> Vec<SectionId> {
        self.skeleton
            .roots()
            .iter()
            .copied()
            .filter(|id| {
                self.skeleton
                    .section(*id)
                    .is_some_and(|s| self.options.arbors.for_type(s.section_type()).build)
            })
            .collect()
    }

    /// Every descriptor of the arbor rooted at `root`, in emission order.
    ///
    /// The branching limit is the one configured for the root's type and
    /// applies to every section below it, whatever their own type.
    pub(crate) fn arbor(&self, root: SectionId) -> Vec<GeometryDescriptor> {
        let mut out = Vec::new();
        let Some(root_section) = self.skeleton.section(root) else {
            return out;
        };
        let limit = self
            .options
            .arbors
            .for_type(root_section.section_type())
            .max_branching_order;
        let mut stack: Vec<(SectionId, Option<Attachment>)> = vec![(root, self.soma_attachment(root))];

        while let Some((id, attachment)) = stack.pop() {
            let Some(section) = self.skeleton.section(id) else {
                continue;
            };
            if section.branching_order() > limit {
                continue;
            }
            let cut = section.branching_order() == limit && !section.is_terminal();

            let handed_down = self.section(section, attachment, cut, &mut out);
            if !cut {
                stack.extend(section.children().iter().rev().map(|child| (*child, handed_down)));
            }
        }

        tracing::debug!(root = %root, descriptors = out.len(), "arbor built");
        out
    }

    /// Shared soma-centre vertex for connected roots.
    fn soma_attachment(&self, root: SectionId) -> Option<Attachment> {
        if !(self.options.connect_to_soma && self.options.strategy.welds_sections()) {
            return None;
        }
        let first = self.skeleton.section(root)?.first_sample()?;
        Some(Attachment {
            end: ChainVertex {
                id: VertexId::soma(),
                position: self.skeleton.soma().center(),
                radius: self.options.radii.apply(first.radius()),
            },
        })
    }

    /// Emits one section and returns what its children attach to.
    fn section(
        &self,
        section: &Section,
        attachment: Option<Attachment>,
        cut: bool,
        out: &mut Vec<GeometryDescriptor>,
    ) -> Option<Attachment> {
        if !section.is_drawable() {
            tracing::debug!(
                section = %section.id(),
                samples = section.sample_count(),
                "section skipped, fewer than two samples"
            );
            return None;
        }

        let strategy = self.options.strategy;
        let mut vertices = self.vertices(section);

        if strategy.welds_sections() {
            if let Some(parent) = attachment {
                weld(&mut vertices, parent.end, self.options.continuity_tolerance);
            }
        }

        let end = match strategy {
            Strategy::DisconnectedSegments => self.segments(section, &vertices, out),
            _ => self.chain(section, &vertices, out),
        };

        let end = end?;
        if strategy == Strategy::ArticulatedSections {
            self.joint(section, &vertices, attachment, out);
        }
        if strategy.uses_terminals()
            && self.options.terminal_spheres
            && (section.is_terminal() || cut)
        {
            self.terminal(section, end, out);
        }
        Some(Attachment { end })
    }

    /// Centreline vertices with the radius policy applied.
    fn vertices(&self, section: &Section) -> Vec<ChainVertex> {
        section
            .samples()
            .iter()
            .enumerate()
            .map(|(index, sample)| ChainVertex {
                id: VertexId::section(section.id(), index),
                position: sample.position(),
                radius: self.options.radii.apply(sample.radius()),
            })
            .collect()
    }

    fn chain_geometry(&self, vertices: &[ChainVertex]) -> Option<Geometry> {
        match self.options.representation {
            Representation::Line => polyline(vertices).map(Geometry::Polyline),
            Representation::Surface => {
                cone_chain(vertices, self.options.sides).map(|segments| Geometry::Cones { segments })
            }
        }
    }

    fn chain(
        &self,
        section: &Section,
        vertices: &[ChainVertex],
        out: &mut Vec<GeometryDescriptor>,
    ) -> Option<ChainVertex> {
        let Some(geometry) = self.chain_geometry(vertices) else {
            tracing::debug!(section = %section.id(), "section collapses to a point, skipped");
            return None;
        };
        let end = geometry.last_vertex();
        out.push(GeometryDescriptor {
            name: section_name(section),
            provenance: provenance(section, None, ObjectRole::Section),
            geometry,
        });
        end
    }

    fn segments(
        &self,
        section: &Section,
        vertices: &[ChainVertex],
        out: &mut Vec<GeometryDescriptor>,
    ) -> Option<ChainVertex> {
        let mut end = None;
        for (index, pair) in vertices.windows(2).enumerate() {
            let own = |vertex: &ChainVertex, sample: usize| ChainVertex {
                id: VertexId::segment(section.id(), index, sample),
                ..*vertex
            };
            let pair = [own(&pair[0], 0), own(&pair[1], 1)];
            let Some(geometry) = self.chain_geometry(&pair) else {
                continue;
            };
            end = geometry.last_vertex();
            out.push(GeometryDescriptor {
                name: format!("{}_segment_{index}", section_name(section)),
                provenance: provenance(section, Some(index as u32), ObjectRole::Segment),
                geometry,
            });
        }
        end
    }

    fn joint(
        &self,
        section: &Section,
        vertices: &[ChainVertex],
        attachment: Option<Attachment>,
        out: &mut Vec<GeometryDescriptor>,
    ) {
        let Some(start) = vertices.first() else {
            return;
        };
        let radius = match attachment {
            Some(parent) => self.options.joint_radius.pick(parent.end.radius, start.radius),
            None => start.radius,
        };
        if let Some(geometry) = sphere(start.position, radius, self.options.sides) {
            out.push(GeometryDescriptor {
                name: format!("{}_joint", section_name(section)),
                provenance: provenance(section, None, ObjectRole::Joint),
                geometry: Geometry::Sphere(geometry),
            });
        }
    }

    fn terminal(&self, section: &Section, end: ChainVertex, out: &mut Vec<GeometryDescriptor>) {
        if let Some(geometry) = sphere(end.position, end.radius, self.options.sides) {
            out.push(GeometryDescriptor {
                name: format!("{}_terminal", section_name(section)),
                provenance: provenance(section, None, ObjectRole::Terminal),
                geometry: Geometry::Sphere(geometry),
            });
        }
    }
}

/// Makes the chain start on `parent`.
///
/// A first vertex within `tolerance` becomes the parent's vertex, sharing
/// its identity, position and radius. Otherwise `parent` is prepended as a
/// bridge.
fn weld(vertices: &mut Vec<ChainVertex>, parent: ChainVertex, tolerance: f64) {
    match vertices.first_mut() {
        Some(first) if first.position.distance(parent.position) <= tolerance => {
            *first = parent;
        }
        _ => vertices.insert(0, parent),
    }
}

fn section_name(section: &Section) -> String {
    format!("{}_{}", section.section_type(), section.id())
}

fn provenance(section: &Section, segment: Option<u32>, role: ObjectRole) -> Provenance {
    Provenance {
        section: Some(section.id()),
        segment,
        section_type: section.section_type(),
        branching_order: section.branching_order(),
        role,
    }
}

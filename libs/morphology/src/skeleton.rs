//! # Skeleton
//!
//! Arena-backed morphology tree: one soma and a forest of sections.

use crate::error::{MorphologyError, MorphologyResult};
use crate::sample::Sample;
use crate::section::{Section, SectionId, SectionType};
use crate::soma::Soma;
use config::constants::CONTINUITY_EPSILON;

/// The morphology tree.
///
/// The skeleton exclusively owns its sections; sections own their samples.
/// Once loaded it is only read, so a `&Skeleton` may be shared across
/// threads by concurrent builds.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    soma: Soma,
    sections: Vec<Section>,
    roots: Vec<SectionId>,
}

impl Skeleton {
    /// Creates a skeleton with only a soma.
    pub fn new(soma: Soma) -> Self {
        Self {
            soma,
            sections: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Adds a root section (branching order 0) and returns its id.
    pub fn add_root(
        &mut self,
        section_type: SectionType,
        samples: Vec<Sample>,
    ) -> MorphologyResult<SectionId> {
        let id = self.next_id();
        let section = Section::new(id, section_type, samples, None, 0)?;
        self.sections.push(section);
        self.roots.push(id);
        Ok(id)
    }

    /// Attaches a child section to `parent` and returns its id.
    ///
    /// Topology is not validated: any type may be attached under any parent.
    pub fn add_child(
        &mut self,
        parent: SectionId,
        section_type: SectionType,
        samples: Vec<Sample>,
    ) -> MorphologyResult<SectionId> {
        let order = self
            .section(parent)
            .ok_or(MorphologyError::UnknownSection(parent))?
            .branching_order()
            + 1;
        let id = self.next_id();
        let section = Section::new(id, section_type, samples, Some(parent), order)?;
        self.sections.push(section);
        self.sections[parent.index()].push_child(id);
        Ok(id)
    }

    fn next_id(&self) -> SectionId {
        SectionId(self.sections.len() as u32)
    }

    /// The soma.
    #[inline]
    pub fn soma(&self) -> &Soma {
        &self.soma
    }

    /// All sections in arena order.
    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Root sections in attachment order.
    #[inline]
    pub fn roots(&self) -> &[SectionId] {
        &self.roots
    }

    /// Looks up a section by id.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.index())
    }

    /// Parent of `id`, if it exists and is not a root.
    pub fn parent(&self, id: SectionId) -> Option<&Section> {
        self.section(id)?.parent().and_then(|p| self.section(p))
    }

    /// Children of `id` in attachment order.
    pub fn children(&self, id: SectionId) -> impl Iterator<Item = &Section> + '_ {
        self.section(id)
            .map(Section::children)
            .unwrap_or(&[])
            .iter()
            .filter_map(move |c| self.section(*c))
    }

    /// Number of sections.
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the skeleton has no sections (soma only).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Depth-first walk of the arbor rooted at `root`, children in
    /// attachment order.
    pub fn depth_first(&self, root: SectionId) -> DepthFirst<'_> {
        DepthFirst {
            skeleton: self,
            stack: vec![root],
        }
    }

    /// Depth-first walk over every arbor, roots in attachment order.
    pub fn iter_depth_first(&self) -> impl Iterator<Item = &Section> + '_ {
        self.roots.iter().flat_map(move |root| self.depth_first(*root))
    }

    /// Root sections of the given type.
    pub fn roots_of_type(&self, section_type: SectionType) -> impl Iterator<Item = &Section> + '_ {
        self.roots
            .iter()
            .filter_map(move |id| self.section(*id))
            .filter(move |s| s.section_type() == section_type)
    }

    /// Total number of samples over all sections.
    pub fn sample_count(&self) -> usize {
        self.sections.iter().map(Section::sample_count).sum()
    }

    /// Deepest branching order in the tree, `None` without sections.
    pub fn max_branching_order(&self) -> Option<u32> {
        self.sections.iter().map(Section::branching_order).max()
    }

    /// Non-root sections whose first sample does not meet the parent's last
    /// sample within `tolerance`.
    ///
    /// Sections without samples, or whose parent has none, are not reported.
    pub fn continuity_breaks(&self, tolerance: f64) -> Vec<SectionId> {
        self.sections
            .iter()
            .filter(|section| {
                let Some(parent) = self.parent(section.id()) else {
                    return false;
                };
                match (parent.last_sample(), section.first_sample()) {
                    (Some(end), Some(start)) => end.distance(start) > tolerance,
                    _ => false,
                }
            })
            .map(Section::id)
            .collect()
    }

    /// True when every section continues from its parent within
    /// [`CONTINUITY_EPSILON`].
    pub fn is_continuous(&self) -> bool {
        self.continuity_breaks(CONTINUITY_EPSILON).is_empty()
    }

    /// Builds a derived skeleton by rewriting each section's samples.
    ///
    /// Topology, ids, types and the soma are preserved; `self` is untouched.
    pub fn map_samples<F>(&self, mut rewrite: F) -> MorphologyResult<Skeleton>
    where
        F: FnMut(&Section) -> Vec<Sample>,
    {
        let sections = self
            .sections
            .iter()
            .map(|section| section.with_samples(rewrite(section)))
            .collect::<MorphologyResult<Vec<_>>>()?;
        Ok(Skeleton {
            soma: self.soma.clone(),
            sections,
            roots: self.roots.clone(),
        })
    }

    /// Replaces sections wholesale, keeping topology from `self`.
    ///
    /// `derive` receives each section and must return a section with the same
    /// id; it is used by passes that already produce whole sections.
    pub fn map_sections<F>(&self, derive: F) -> MorphologyResult<Skeleton>
    where
        F: FnMut(&Section) -> MorphologyResult<Section>,
    {
        let sections = self
            .sections
            .iter()
            .map(derive)
            .collect::<MorphologyResult<Vec<_>>>()?;
        if let Some(section) = sections
            .iter()
            .enumerate()
            .find(|(index, s)| s.id().index() != *index)
            .map(|(_, s)| s)
        {
            return Err(MorphologyError::UnknownSection(section.id()));
        }
        Ok(Skeleton {
            soma: self.soma.clone(),
            sections,
            roots: self.roots.clone(),
        })
    }
}

/// Depth-first iterator over an arbor.
///
/// Created by [`Skeleton::depth_first`]. Children are visited in the order
/// they were attached.
pub struct DepthFirst<'a> {
    skeleton: &'a Skeleton,
    stack: Vec<SectionId>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(section) = self.skeleton.section(id) {
                self.stack.extend(section.children().iter().rev().copied());
                return Some(section);
            }
        }
        None
    }
}

//! # Section
//!
//! A maximal unbranched run of samples between two branch or terminal points.

use crate::error::{MorphologyError, MorphologyResult};
use crate::sample::{assign_arc_lengths, Sample};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a section inside its [`crate::Skeleton`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(pub u32);

impl SectionId {
    /// Position of the section in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Neurite type of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    /// Cell body.
    Soma,
    /// Axon.
    Axon,
    /// Basal dendrite.
    BasalDendrite,
    /// Apical dendrite.
    ApicalDendrite,
}

impl SectionType {
    /// Lower-case name used to label scene objects.
    pub fn name(self) -> &'static str {
        match self {
            SectionType::Soma => "soma",
            SectionType::Axon => "axon",
            SectionType::BasalDendrite => "basal_dendrite",
            SectionType::ApicalDendrite => "apical_dendrite",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A section of the morphology tree.
///
/// Sections are created through [`crate::Skeleton::add_root`] and
/// [`crate::Skeleton::add_child`], which fill in the structural fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: SectionId,
    section_type: SectionType,
    samples: Vec<Sample>,
    parent: Option<SectionId>,
    children: Vec<SectionId>,
    branching_order: u32,
}

impl Section {
    pub(crate) fn new(
        id: SectionId,
        section_type: SectionType,
        samples: Vec<Sample>,
        parent: Option<SectionId>,
        branching_order: u32,
    ) -> MorphologyResult<Self> {
        let samples = validate_samples(samples)?;
        Ok(Self {
            id,
            section_type,
            samples,
            parent,
            children: Vec::new(),
            branching_order,
        })
    }

    pub(crate) fn push_child(&mut self, child: SectionId) {
        self.children.push(child);
    }

    /// Returns a copy of this section with a different sample sequence.
    ///
    /// Identity, type and tree links are preserved; arc lengths are derived
    /// again from the new sequence. The original section is untouched.
    pub fn with_samples(&self, samples: Vec<Sample>) -> MorphologyResult<Self> {
        Ok(Self {
            samples: validate_samples(samples)?,
            children: self.children.clone(),
            ..*self
        })
    }

    /// Unique identifier (arena index).
    #[inline]
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Neurite type.
    #[inline]
    pub fn section_type(&self) -> SectionType {
        self.section_type
    }

    /// The ordered samples.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// First sample, if any.
    pub fn first_sample(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Last sample, if any.
    pub fn last_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Parent section, `None` for roots.
    #[inline]
    pub fn parent(&self) -> Option<SectionId> {
        self.parent
    }

    /// Children in attachment order.
    #[inline]
    pub fn children(&self) -> &[SectionId] {
        &self.children
    }

    /// Generation depth from the arbor root (root = 0).
    #[inline]
    pub fn branching_order(&self) -> u32 {
        self.branching_order
    }

    /// True when the section has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True when the section has no children.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// True when the section has enough samples to produce geometry.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.samples.len() >= 2
    }

    /// Total centreline length.
    pub fn length(&self) -> f64 {
        self.samples.last().map_or(0.0, Sample::arc_length)
    }

    /// Axis-aligned bounds of the sample positions, ignoring radii.
    pub fn position_bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = self.samples.first()?.position();
        Some(
            self.samples
                .iter()
                .fold((first, first), |(min, max), s| {
                    (min.min(s.position()), max.max(s.position()))
                }),
        )
    }

    /// Bounds of the samples inflated by their radii on every axis.
    ///
    /// A conservative extent of the tube; it never undershoots the exact
    /// surface bounds.
    pub fn padded_bounds(&self) -> Option<(DVec3, DVec3)> {
        let pad = |s: &Sample| DVec3::splat(s.radius());
        let first = self.samples.first()?;
        Some(self.samples.iter().fold(
            (first.position() - pad(first), first.position() + pad(first)),
            |(min, max), s| (min.min(s.position() - pad(s)), max.max(s.position() + pad(s))),
        ))
    }
}

fn validate_samples(mut samples: Vec<Sample>) -> MorphologyResult<Vec<Sample>> {
    for (index, sample) in samples.iter().enumerate() {
        if !sample.position().is_finite() {
            return Err(MorphologyError::NonFinitePosition { index });
        }
        let radius = sample.radius();
        if !radius.is_finite() || radius < 0.0 {
            return Err(MorphologyError::InvalidRadius { index, radius });
        }
    }
    assign_arc_lengths(&mut samples);
    Ok(samples)
}

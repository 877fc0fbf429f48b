//! # Disconnected Skeleton Resampler
//!
//! Derives a sparser sample sequence for each section. The source skeleton
//! is never modified; callers get a new section (or a new tree with the same
//! topology) back.
//!
//! ## Algorithm
//!
//! Greedy walk from the last retained sample, the anchor. A run from the
//! anchor to a candidate is rejected as soon as one of these holds:
//!
//! - an intermediate sample lies further than `deviation_threshold` from the
//!   chord anchor→candidate
//! - the radius changes by more than `radius_tolerance` relative to the
//!   anchor's radius
//! - the path length anchor→candidate exceeds `max_spacing`
//!
//! On rejection the last acceptable candidate becomes the new anchor; if
//! there is none, the rejected candidate itself is kept. First and last
//! samples always survive.

use crate::options::ResampleParams;
use config::constants::{approx_zero, EPSILON};
use glam::DVec3;
use morphology::{MorphologyResult, Sample, Section, Skeleton};

/// Resamples one section.
///
/// Pure and deterministic. Sections with fewer than three samples come back
/// unchanged apart from re-derived arc lengths.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use morphology::{Sample, SectionType, Skeleton, Soma};
/// use skeleton_mesh::options::ResampleParams;
/// use skeleton_mesh::resample::resample_section;
///
/// let mut skeleton = Skeleton::new(Soma::point(DVec3::ZERO));
/// let samples = (0..=10)
///     .map(|i| Sample::new(DVec3::new(i as f64, 0.0, 0.0), 1.0))
///     .collect();
/// let id = skeleton.add_root(SectionType::Axon, samples)?;
/// let section = skeleton.section(id).unwrap();
///
/// let sparse = resample_section(section, &ResampleParams::default())?;
/// assert_eq!(sparse.sample_count(), 2);
/// assert_eq!(section.sample_count(), 11);
/// # Ok::<(), morphology::MorphologyError>(())
/// ```
pub fn resample_section(section: &Section, params: &ResampleParams) -> MorphologyResult<Section> {
    section.with_samples(resample_samples(section.samples(), params))
}

/// Resamples every section of a skeleton into a new skeleton.
///
/// Topology, section ids, types and the soma are carried over unchanged.
pub fn resample_skeleton(skeleton: &Skeleton, params: &ResampleParams) -> MorphologyResult<Skeleton> {
    skeleton.map_sections(|section| resample_section(section, params))
}

/// Retained subsequence of `samples`.
pub fn resample_samples(samples: &[Sample], params: &ResampleParams) -> Vec<Sample> {
    if samples.len() <= 2 {
        return samples.to_vec();
    }

    let offsets = path_offsets(samples);
    let last = samples.len() - 1;
    let mut kept = vec![samples[0]];
    let mut anchor = 0;
    let mut acceptable: Option<usize> = None;
    let mut candidate = 1;

    while candidate <= last {
        if approx_zero(samples[anchor].distance(&samples[candidate])) {
            candidate += 1;
            continue;
        }
        if !rejects(samples, &offsets, anchor, candidate, params) {
            acceptable = Some(candidate);
            candidate += 1;
            continue;
        }
        // Re-examine the rejected candidate from the new anchor unless it
        // was the first one tried.
        anchor = match acceptable.take() {
            Some(previous) => previous,
            None => {
                candidate += 1;
                candidate - 1
            }
        };
        kept.push(samples[anchor]);
    }

    if anchor != last {
        let end = samples[last];
        let len = kept.len();
        match kept.last_mut() {
            Some(tail) if len > 1 && approx_zero(tail.distance(&end)) => *tail = end,
            _ => kept.push(end),
        }
    }
    kept
}

fn rejects(
    samples: &[Sample],
    offsets: &[f64],
    anchor: usize,
    candidate: usize,
    params: &ResampleParams,
) -> bool {
    let start = &samples[anchor];
    let end = &samples[candidate];

    if offsets[candidate] - offsets[anchor] > params.max_spacing {
        return true;
    }

    if radius_changed(start.radius(), end.radius(), params.radius_tolerance) {
        return true;
    }

    samples[anchor + 1..candidate].iter().any(|sample| {
        distance_to_chord(sample.position(), start.position(), end.position())
            > params.deviation_threshold
    })
}

/// Radius change relative to the anchor's radius. From a zero radius any
/// non-zero radius counts as a change.
fn radius_changed(anchor: f64, candidate: f64, tolerance: f64) -> bool {
    if approx_zero(anchor) {
        return !approx_zero(candidate);
    }
    (candidate - anchor).abs() > tolerance * anchor
}

/// Cumulative centreline distance of each sample from the first.
///
/// Computed here rather than read from [`Sample::arc_length`], which is only
/// derived for samples placed in a section.
fn path_offsets(samples: &[Sample]) -> Vec<f64> {
    let mut offset = 0.0;
    let mut offsets = Vec::with_capacity(samples.len());
    offsets.push(offset);
    for pair in samples.windows(2) {
        offset += pair[0].distance(&pair[1]);
        offsets.push(offset);
    }
    offsets
}

/// Distance from `point` to the segment `a`–`b`.
fn distance_to_chord(point: DVec3, a: DVec3, b: DVec3) -> f64 {
    let chord = b - a;
    let length_squared = chord.length_squared();
    if length_squared < EPSILON * EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(chord) / length_squared).clamp(0.0, 1.0);
    point.distance(a + chord * t)
}

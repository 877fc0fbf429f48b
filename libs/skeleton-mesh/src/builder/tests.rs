//! Builder tests: emission order, naming and per-strategy structure.

use super::*;
use crate::descriptor::{Geometry, ObjectRole, VertexId};
use crate::error::BuildError;
use crate::host::{MeshScene, SceneError};
use crate::options::{ArborFilter, RadiusPolicy, Representation, SomaPolicy};
use glam::DVec3;
use morphology::{Sample, SectionType, Soma};
use config::constants::UNLIMITED_BRANCHING_ORDER;
use std::collections::HashSet;

fn sample(x: f64, y: f64, z: f64, r: f64) -> Sample {
    Sample::new(DVec3::new(x, y, z), r)
}

/// Soma at the origin, an axon root forking into two children, one of
/// which continues into a leaf.
fn forked() -> (Skeleton, [SectionId; 4]) {
    let mut skeleton = Skeleton::new(Soma::sphere(DVec3::ZERO, 2.0).unwrap());
    let root = skeleton
        .add_root(SectionType::Axon, vec![sample(0.0, 0.0, 2.0, 1.0), sample(0.0, 0.0, 5.0, 0.8)])
        .unwrap();
    let left = skeleton
        .add_child(root, SectionType::Axon, vec![sample(0.0, 0.0, 5.0, 0.6), sample(-3.0, 0.0, 8.0, 0.5)])
        .unwrap();
    let right = skeleton
        .add_child(root, SectionType::Axon, vec![sample(0.0, 0.0, 5.0, 0.6), sample(3.0, 0.0, 8.0, 0.5)])
        .unwrap();
    let leaf = skeleton
        .add_child(left, SectionType::Axon, vec![sample(-3.0, 0.0, 8.0, 0.4), sample(-4.0, 0.0, 12.0, 0.2)])
        .unwrap();
    (skeleton, [root, left, right, leaf])
}

fn build(skeleton: &Skeleton, options: BuildOptions) -> SkeletonGeometry {
    build_skeleton(skeleton, options).unwrap()
}

fn names(geometry: &SkeletonGeometry) -> Vec<&str> {
    geometry.iter().map(|d| d.name.as_str()).collect()
}

fn chain_of(geometry: &SkeletonGeometry, id: SectionId) -> Vec<crate::descriptor::ChainVertex> {
    geometry
        .by_section(id)
        .find(|d| d.provenance.role == ObjectRole::Section)
        .map(|d| d.geometry.vertices())
        .unwrap_or_default()
}

#[test]
fn test_disconnected_sections_order_and_names() {
    let (skeleton, _) = forked();
    let geometry = build(&skeleton, BuildOptions::with_strategy(Strategy::DisconnectedSections));
    assert_eq!(
        names(&geometry),
        vec![
            "soma",
            "axon_0",
            "axon_1",
            "axon_3",
            "axon_3_terminal",
            "axon_2",
            "axon_2_terminal",
        ]
    );
}

#[test]
fn test_disconnected_segments_one_object_per_segment() {
    let mut skeleton = Skeleton::new(Soma::point(DVec3::ZERO));
    let root = skeleton
        .add_root(
            SectionType::BasalDendrite,
            (0..4).map(|i| sample(i as f64, 0.0, 0.0, 0.5)).collect(),
        )
        .unwrap();
    let geometry = build(&skeleton, BuildOptions::with_strategy(Strategy::DisconnectedSegments));

    let segments: Vec<_> = geometry
        .by_section(root)
        .filter(|d| d.provenance.role == ObjectRole::Segment)
        .collect();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[2].name, "basal_dendrite_0_segment_2");
    assert_eq!(segments[2].provenance.segment, Some(2));
    let ends: Vec<VertexId> = segments[2].geometry.vertices().iter().map(|v| v.id).collect();
    assert_eq!(ends, vec![VertexId::segment(root, 2, 0), VertexId::segment(root, 2, 1)]);

    let ids: Vec<VertexId> = segments.iter().flat_map(|d| d.geometry.vertices()).map(|v| v.id).collect();
    let unique: HashSet<VertexId> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert!(geometry.iter().any(|d| d.name == "basal_dendrite_0_terminal"));
}

#[test]
fn test_connected_children_share_parent_end() {
    let (skeleton, [root, left, right, leaf]) = forked();
    let geometry = build(&skeleton, BuildOptions::with_strategy(Strategy::ConnectedSections));
    assert_eq!(geometry.len(), 5);
    assert!(geometry.iter().all(|d| d.provenance.role != ObjectRole::Terminal));

    let parent_end = *chain_of(&geometry, root).last().unwrap();
    for child in [left, right] {
        let first = chain_of(&geometry, child)[0];
        assert_eq!(first, parent_end);
        // Children start at 0.6 in the source but share the 0.8 end vertex.
        assert_eq!(first.radius, 0.8);
    }
    let left_end = *chain_of(&geometry, left).last().unwrap();
    assert_eq!(chain_of(&geometry, leaf)[0].id, left_end.id);
}

#[test]
fn test_connected_bridges_discontinuous_child() {
    let mut skeleton = Skeleton::new(Soma::point(DVec3::ZERO));
    let root = skeleton
        .add_root(SectionType::Axon, vec![sample(0.0, 0.0, 0.0, 1.0), sample(0.0, 0.0, 5.0, 1.0)])
        .unwrap();
    let child = skeleton
        .add_child(root, SectionType::Axon, vec![sample(0.0, 0.0, 6.0, 1.0), sample(0.0, 0.0, 9.0, 1.0)])
        .unwrap();
    let geometry = build(&skeleton, BuildOptions::with_strategy(Strategy::ConnectedSections));

    let chain = chain_of(&geometry, child);
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0].id, VertexId::section(root, 1));
    assert_eq!(chain[1].id, VertexId::section(child, 0));
}

#[test]
fn test_connect_to_soma_starts_roots_at_soma_centre() {
    let (skeleton, [root, ..]) = forked();
    let options = BuildOptions {
        connect_to_soma: true,
        ..BuildOptions::with_strategy(Strategy::ConnectedSections)
    };
    let geometry = build(&skeleton, options);
    let chain = chain_of(&geometry, root);
    assert_eq!(chain[0].id, VertexId::soma());
    assert_eq!(chain[0].position, DVec3::ZERO);
    assert_eq!(chain.len(), 3);
}

#[test]
fn test_disconnected_strategies_never_share_vertices() {
    let (skeleton, _) = forked();
    for strategy in [
        Strategy::DisconnectedSegments,
        Strategy::DisconnectedSections,
        Strategy::DisconnectedSkeleton,
        Strategy::ArticulatedSections,
    ] {
        let geometry = build(&skeleton, BuildOptions::with_strategy(strategy));
        let mut seen = HashSet::new();
        for descriptor in &geometry {
            for vertex in descriptor.geometry.vertices() {
                assert_eq!(vertex.id.section, descriptor.provenance.section, "{strategy}");
                assert!(seen.insert(vertex.id), "{strategy} reuses {:?}", vertex.id);
            }
        }
    }
}

#[test]
fn test_articulated_joints() {
    let (skeleton, [root, left, ..]) = forked();
    let geometry = build(&skeleton, BuildOptions::with_strategy(Strategy::ArticulatedSections));
    assert_eq!(geometry.len(), 11);

    let joint_radius = |id| {
        geometry
            .by_section(id)
            .find_map(|d| match (&d.geometry, d.provenance.role) {
                (Geometry::Sphere(s), ObjectRole::Joint) => Some(s.radius),
                _ => None,
            })
            .unwrap()
    };
    assert_eq!(joint_radius(root), 1.0);
    assert_eq!(joint_radius(left), 0.8);

    let smaller = BuildOptions {
        joint_radius: crate::options::JointRadiusPolicy::Smaller,
        ..BuildOptions::with_strategy(Strategy::ArticulatedSections)
    };
    let geometry = build(&skeleton, smaller);
    let joint = geometry.iter().find(|d| d.name == "axon_1_joint").unwrap();
    assert!(matches!(&joint.geometry, Geometry::Sphere(s) if s.radius == 0.6));
}

#[test]
fn test_disconnected_skeleton_uses_resampled_samples() {
    let mut skeleton = Skeleton::new(Soma::point(DVec3::ZERO));
    let root = skeleton
        .add_root(
            SectionType::Axon,
            (0..=10).map(|i| sample(0.0, 0.0, i as f64, 1.0)).collect(),
        )
        .unwrap();
    let geometry = build(&skeleton, BuildOptions::with_strategy(Strategy::DisconnectedSkeleton));

    assert_eq!(geometry.len(), 1);
    assert_eq!(chain_of(&geometry, root).len(), 2);
    assert_eq!(skeleton.section(root).unwrap().sample_count(), 11);
}

#[test]
fn test_short_section_is_skipped_but_children_are_visited() {
    let mut skeleton = Skeleton::new(Soma::point(DVec3::ZERO));
    let stub = skeleton
        .add_root(SectionType::Axon, vec![sample(0.0, 0.0, 1.0, 1.0)])
        .unwrap();
    let child = skeleton
        .add_child(stub, SectionType::Axon, vec![sample(0.0, 0.0, 1.0, 1.0), sample(0.0, 0.0, 4.0, 1.0)])
        .unwrap();

    for strategy in Strategy::ALL {
        let geometry = build(&skeleton, BuildOptions::with_strategy(strategy));
        assert_eq!(geometry.by_section(stub).count(), 0, "{strategy}");
        assert!(geometry.by_section(child).count() >= 1, "{strategy}");
    }

    let geometry = build(&skeleton, BuildOptions::with_strategy(Strategy::ConnectedSections));
    assert_eq!(chain_of(&geometry, child)[0].id, VertexId::section(child, 0));
}

#[test]
fn test_soma_policies() {
    let (skeleton, _) = forked();
    let ignored = BuildOptions {
        soma: SomaPolicy::Ignore,
        ..BuildOptions::default()
    };
    assert!(build(&skeleton, ignored).iter().all(|d| d.provenance.role != ObjectRole::Soma));

    let point = Skeleton::new(Soma::point(DVec3::ONE));
    assert!(build(&point, BuildOptions::default()).is_empty());

    let mut profiled = Skeleton::new(
        Soma::from_profile(DVec3::ZERO, vec![DVec3::X, DVec3::Y * 3.0]).unwrap(),
    );
    profiled
        .add_root(SectionType::Axon, vec![sample(0.0, 0.0, 3.0, 1.0), sample(0.0, 0.0, 6.0, 1.0)])
        .unwrap();
    let radius = |policy: SomaPolicy| {
        let options = BuildOptions {
            soma: policy,
            ..BuildOptions::default()
        };
        match &build(&profiled, options).descriptors()[0].geometry {
            Geometry::Sphere(s) => s.radius,
            _ => f64::NAN,
        }
    };
    assert_eq!(radius(SomaPolicy::MeanRadius), 2.0);
    assert_eq!(radius(SomaPolicy::MaxRadius), 3.0);
}

#[test]
fn test_no_roots_builds_only_the_soma() {
    let skeleton = Skeleton::new(Soma::sphere(DVec3::new(1.0, 2.0, 3.0), 1.5).unwrap());
    let geometry = build(&skeleton, BuildOptions::default());
    assert_eq!(names(&geometry), vec!["soma"]);
    assert_eq!(geometry.bounds().min, DVec3::new(-0.5, 0.5, 1.5));
}

#[test]
fn test_arbor_filters() {
    let (skeleton, [root, ..]) = forked();
    let mut options = BuildOptions::with_strategy(Strategy::DisconnectedSections);
    options.arbors.axon.build = false;
    assert_eq!(names(&build(&skeleton, options)), vec!["soma"]);

    options.arbors.axon = ArborFilter {
        build: true,
        max_branching_order: 0,
    };
    let geometry = build(&skeleton, options);
    assert_eq!(names(&geometry), vec!["soma", "axon_0", "axon_0_terminal"]);
    assert!(geometry.iter().all(|d| d.provenance.section.map_or(true, |id| id == root)));

    options.arbors.basal_dendrites.build = false;
    options.arbors.axon.max_branching_order = 1;
    assert_eq!(build(&skeleton, options).len(), 6);
}

#[test]
fn test_branching_limit_follows_the_root_type() {
    let mut skeleton = Skeleton::new(Soma::sphere(DVec3::ZERO, 1.0).unwrap());
    let root = skeleton
        .add_root(SectionType::Axon, vec![sample(0.0, 0.0, 1.0, 1.0), sample(0.0, 0.0, 4.0, 1.0)])
        .unwrap();
    let child = skeleton
        .add_child(
            root,
            SectionType::BasalDendrite,
            vec![sample(0.0, 0.0, 4.0, 1.0), sample(0.0, 2.0, 6.0, 1.0)],
        )
        .unwrap();

    let mut options = BuildOptions::with_strategy(Strategy::DisconnectedSections);
    options.arbors.axon.max_branching_order = 0;
    options.arbors.basal_dendrites.max_branching_order = UNLIMITED_BRANCHING_ORDER;
    let geometry = build(&skeleton, options);
    assert_eq!(geometry.by_section(child).count(), 0);
    assert_eq!(names(&geometry), vec!["soma", "axon_0", "axon_0_terminal"]);

    options.arbors.axon.max_branching_order = UNLIMITED_BRANCHING_ORDER;
    options.arbors.basal_dendrites.max_branching_order = 0;
    let geometry = build(&skeleton, options);
    assert_eq!(geometry.by_section(child).count(), 2);
}

#[test]
fn test_line_representation_emits_polylines() {
    let (skeleton, _) = forked();
    let options = BuildOptions {
        representation: Representation::Line,
        ..BuildOptions::with_strategy(Strategy::ConnectedSections)
    };
    let geometry = build(&skeleton, options);
    let chains: Vec<_> = geometry.iter().filter(|d| d.provenance.role == ObjectRole::Section).collect();
    assert_eq!(chains.len(), 4);
    assert!(chains.iter().all(|d| matches!(d.geometry, Geometry::Polyline(_))));
}

#[test]
fn test_radius_policy_leaves_source_untouched() {
    let (skeleton, [root, ..]) = forked();
    let options = BuildOptions {
        radii: RadiusPolicy::Fixed(1.5),
        ..BuildOptions::with_strategy(Strategy::DisconnectedSections)
    };
    let geometry = build(&skeleton, options);
    assert!(chain_of(&geometry, root).iter().all(|v| v.radius == 1.5));
    assert_eq!(skeleton.section(root).unwrap().samples()[0].radius(), 1.0);
    match &geometry.descriptors()[0].geometry {
        Geometry::Sphere(soma) => assert_eq!(soma.radius, 2.0),
        other => unreachable!("soma is a sphere, got {other:?}"),
    }
}

#[test]
fn test_parallel_build_matches_serial() {
    let mut skeleton = Skeleton::new(Soma::sphere(DVec3::ZERO, 1.0).unwrap());
    for k in 0..6 {
        let direction = DVec3::new((k as f64).cos(), (k as f64).sin(), 0.0);
        let root = skeleton
            .add_root(SectionType::BasalDendrite, vec![
                Sample::new(direction, 0.5),
                Sample::new(direction * 4.0, 0.4),
            ])
            .unwrap();
        skeleton
            .add_child(root, SectionType::BasalDendrite, vec![
                Sample::new(direction * 4.0, 0.3),
                Sample::new(direction * 7.0 + DVec3::Z, 0.2),
            ])
            .unwrap();
    }
    for strategy in Strategy::ALL {
        let serial = build(&skeleton, BuildOptions::with_strategy(strategy));
        let parallel = build(&skeleton, BuildOptions {
            parallel: true,
            ..BuildOptions::with_strategy(strategy)
        });
        assert_eq!(serial, parallel, "{strategy}");
    }
}

#[test]
fn test_invalid_options_rejected_up_front() {
    let (skeleton, _) = forked();
    let options = BuildOptions {
        continuity_tolerance: -1.0,
        ..BuildOptions::default()
    };
    assert!(matches!(
        SkeletonBuilder::new(&skeleton, options),
        Err(BuildError::Config(_))
    ));
}

#[test]
fn test_build_into_materializes_in_order() {
    let (skeleton, _) = forked();
    let builder = SkeletonBuilder::new(&skeleton, BuildOptions::default()).unwrap();
    let mut scene = MeshScene::new();
    let handles = builder.build_into(&mut scene).unwrap();

    assert_eq!(handles.len(), builder.build().unwrap().len());
    assert_eq!(scene.object(handles[0]).unwrap().name, "soma");
}

#[test]
fn test_build_into_returns_host_error_unchanged() {
    let (skeleton, _) = forked();
    let builder = SkeletonBuilder::new(&skeleton, BuildOptions::default()).unwrap();
    let mut scene = MeshScene::new().with_vertex_budget(0);
    match builder.build_into(&mut scene) {
        Err(HostBuildError::Host(SceneError::TooManyVertices { budget, .. })) => assert_eq!(budget, 0),
        other => unreachable!("expected a host error, got {other:?}"),
    }
}

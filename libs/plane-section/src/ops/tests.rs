//! # Section Integration Tests
//!
//! End-to-end queries over primitives and hand-built meshes.

use super::*;
use crate::mesh::Mesh;
use crate::plane::Plane;
use crate::primitives::{create_cone, create_sphere};
use approx::{assert_abs_diff_eq, assert_relative_eq};
use config::constants::{SectionConfig, DEFAULT_SEGMENTS};
use glam::DVec3;
use std::f64::consts::PI;

fn unit_sphere() -> Mesh {
    create_sphere(1.0, DVec3::ZERO, DEFAULT_SEGMENTS).unwrap()
}

fn assert_on_plane(section: &crate::polyline::CrossSection, plane: &Plane) {
    for polyline in section.polylines() {
        for p in polyline.points() {
            assert_abs_diff_eq!(plane.signed_distance(*p), 0.0, epsilon = 1e-9);
        }
    }
}

// =============================================================================
// Sphere
// =============================================================================

#[test]
fn test_sphere_oblique_plane_crosses() {
    let plane = Plane::new(DVec3::new(-1.0, 0.5, 0.0), DVec3::new(0.0, 2.0, 1.0)).unwrap();
    assert!(intersects(&unit_sphere(), &plane));
}

#[test]
fn test_sphere_oblique_plane_misses() {
    let plane = Plane::new(DVec3::new(-1.0, 1.5, 0.0), DVec3::new(0.0, 2.0, 1.0)).unwrap();
    let sphere = unit_sphere();
    assert!(!intersects(&sphere, &plane));

    let section = intersection_polylines(&sphere, &plane);
    assert!(section.is_empty());
    assert_eq!(section.point_count(), 0);
}

#[test]
fn test_sphere_section_is_one_loop_on_plane() {
    let plane = Plane::new(DVec3::new(-1.0, 0.5, 0.0), DVec3::new(0.0, 2.0, 1.0)).unwrap();
    let section = intersection_polylines(&unit_sphere(), &plane);

    assert_eq!(section.polylines().len(), 1);
    let ring = &section.polylines()[0];
    assert!(ring.is_closed());
    assert_eq!(ring.points().first(), ring.points().last());
    assert_eq!(ring.node_count(), section.point_count());
    assert_on_plane(&section, &plane);
}

#[test]
fn test_repeated_queries_agree() {
    let sphere = unit_sphere();
    let plane = Plane::new(DVec3::new(0.1, -0.2, 0.3), DVec3::new(1.0, 1.0, 1.0)).unwrap();
    assert_eq!(
        intersection_polylines(&sphere, &plane),
        intersection_polylines(&sphere, &plane)
    );
}

#[test]
fn test_chunk_size_does_not_change_result() {
    let sphere = unit_sphere();
    let plane = Plane::new(DVec3::new(0.0, 0.0, 0.2), DVec3::new(0.1, 0.0, 1.0)).unwrap();

    let reference = intersection_polylines(&sphere, &plane);
    let config = SectionConfig::new(1e-9, 1e-9, 5).unwrap();
    let chunked = PlaneSection::with_config(&sphere, &plane, config).polylines();
    assert_eq!(chunked, reference);

    let single = SectionConfig::new(1e-9, 1e-9, 1).unwrap();
    let section = PlaneSection::with_config(&sphere, &plane, single);
    assert_eq!(section.intersects(), intersects(&sphere, &plane));
    assert_eq!(section.polylines(), reference);
}

#[test]
fn test_zero_chunk_size_is_rejected() {
    assert!(SectionConfig::new(1e-9, 1e-9, 0).is_err());
    assert_eq!(SectionConfig::default().chunk_size(), config::constants::PARALLEL_CHUNK_TRIANGLES);
}

#[test]
fn test_translated_sphere_keeps_its_section() {
    let plane = Plane::new(DVec3::new(0.0, 0.0, 0.1), DVec3::new(0.0, 0.3, 1.0)).unwrap();
    let reference = intersection_polylines(&unit_sphere(), &plane);
    assert_eq!(reference.polylines().len(), 1);

    for offset in [1.0e6, 1.0e9] {
        let shift = DVec3::new(offset, 0.0, 0.0);
        let mut far = unit_sphere();
        far.translate(shift).unwrap();
        let far_plane = Plane::new(DVec3::new(0.0, 0.0, 0.1) + shift, DVec3::new(0.0, 0.3, 1.0)).unwrap();

        let section = intersection_polylines(&far, &far_plane);
        assert_eq!(section.point_count(), reference.point_count(), "offset {offset}");
        assert_eq!(section.polylines().len(), 1, "offset {offset}");
        assert!(section.polylines()[0].is_closed());
    }
}

#[test]
fn test_millimetre_sphere_far_from_origin() {
    let plane = Plane::new(DVec3::new(0.0, 0.0, 1.0e-4), DVec3::Z).unwrap();
    let near = create_sphere(1.0e-3, DVec3::ZERO, DEFAULT_SEGMENTS).unwrap();
    let reference = intersection_polylines(&near, &plane);
    assert_eq!(reference.point_count(), DEFAULT_SEGMENTS as usize);

    let center = DVec3::new(1.0e6, 0.0, 0.0);
    let far = create_sphere(1.0e-3, center, DEFAULT_SEGMENTS).unwrap();
    let far_plane = Plane::new(center + DVec3::new(0.0, 0.0, 1.0e-4), DVec3::Z).unwrap();

    let section = intersection_polylines(&far, &far_plane);
    assert_eq!(section.point_count(), reference.point_count());
    assert_eq!(section.polylines().len(), 1);
}

#[test]
fn test_non_finite_vertices_never_reach_the_section() {
    let mut sphere = unit_sphere();
    let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();
    let before = intersection_polylines(&sphere, &plane);

    assert!(sphere.add_vertex(DVec3::new(f64::NAN, 0.0, 0.0)).is_err());
    assert!(sphere.translate(DVec3::splat(f64::INFINITY)).is_err());
    assert!(sphere.scale_about(DVec3::ZERO, f64::INFINITY).is_err());

    assert!(sphere.vertices().iter().all(|v| v.is_finite()));
    assert_eq!(intersection_polylines(&sphere, &plane), before);
}

// =============================================================================
// Cones
// =============================================================================

#[test]
fn test_cone_horizontal_cut() {
    let cone = create_cone(1.5, 0.5, DVec3::ZERO, DEFAULT_SEGMENTS).unwrap();
    let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();

    let section = intersection_polylines(&cone, &plane);
    assert_eq!(section.polylines().len(), 1);
    assert!(section.polylines()[0].is_closed());
    assert_eq!(section.point_count(), 32);
    assert_on_plane(&section, &plane);
}

#[test]
fn test_two_merged_cones_give_two_loops() {
    let mut cones = create_cone(1.5, 0.5, DVec3::new(1.0, 0.0, 0.0), DEFAULT_SEGMENTS).unwrap();
    cones
        .merge(&create_cone(1.5, 0.5, DVec3::new(1.0, 0.5, 0.0), DEFAULT_SEGMENTS).unwrap())
        .unwrap();
    let plane = Plane::new(DVec3::new(0.0, 0.0, 0.5), DVec3::Z).unwrap();

    assert!(intersects(&cones, &plane));
    let section = intersection_polylines(&cones, &plane);
    assert_eq!(section.polylines().len(), 2);
    assert!(section.polylines().iter().all(|p| p.is_closed() && p.node_count() == 32));
    assert_eq!(section.point_count(), 64);

    // The first cone's triangles come first
    assert!(section.polylines()[0].points()[0].y < 0.25);
    assert!(section.polylines()[1].points()[0].y > 0.25);
}

#[test]
fn test_cone_vertical_cut_through_side_and_base() {
    let cone = create_cone(1.5, 0.5, DVec3::ZERO, DEFAULT_SEGMENTS).unwrap();
    let plane = Plane::new(DVec3::new(0.1, 0.0, 0.0), DVec3::X).unwrap();

    let section = intersection_polylines(&cone, &plane);
    assert_eq!(section.polylines().len(), 1);
    assert!(section.polylines()[0].is_closed());
    // 13 apex edges, 2 base rim edges, 19 base fan chords
    assert_eq!(section.point_count(), 34);
    assert_on_plane(&section, &plane);
}

#[test]
fn test_cone_oblique_cut_through_side_and_base() {
    // Tilted half a segment so no vertex lies on the plane
    let phi = PI / 32.0;
    let axis = DVec3::new(phi.cos(), phi.sin(), 0.0);
    let cone = create_cone(1.5, 0.5, DVec3::ZERO, DEFAULT_SEGMENTS).unwrap();
    let plane = Plane::new(axis * 0.35 + DVec3::new(0.0, 0.0, -0.75), axis + DVec3::Z).unwrap();

    assert!(intersects(&cone, &plane));
    let section = intersection_polylines(&cone, &plane);
    assert_eq!(section.polylines().len(), 1);
    assert!(section.polylines()[0].is_closed());
    // 24 apex edges, 2 base rim edges, 24 base fan chords
    assert_eq!(section.point_count(), 50);
    assert_eq!(section.polylines()[0].node_count(), 50);
    assert_on_plane(&section, &plane);
}

#[test]
fn test_plane_from_coefficients() {
    let cone = create_cone(1.5, 0.5, DVec3::ZERO, DEFAULT_SEGMENTS).unwrap();
    let plane = Plane::from_coefficients(0.0, 0.0, 2.0, 0.5).unwrap();

    let section = intersection_polylines(&cone, &plane);
    assert_eq!(section.point_count(), 32);
    for p in section.polylines()[0].points() {
        assert_relative_eq!(p.z, 0.25, epsilon = 1e-12);
    }
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_one_sided_mesh() {
    let sphere = create_sphere(0.5, DVec3::new(0.0, 0.0, 3.0), 16).unwrap();
    let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();

    assert!(!intersects(&sphere, &plane));
    assert!(crossing_triangles(&sphere, &plane).is_empty());
    assert_eq!(intersection_polylines(&sphere, &plane).point_count(), 0);
}

#[test]
fn test_uniform_scaling_scales_the_section() {
    let k = 2.0;
    let cone = create_cone(1.5, 0.5, DVec3::ZERO, DEFAULT_SEGMENTS).unwrap();
    let plane = Plane::new(DVec3::new(0.1, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.3)).unwrap();

    let mut scaled_cone = cone.clone();
    scaled_cone.scale_about(DVec3::ZERO, k).unwrap();
    let scaled_plane = plane.scaled(k).unwrap();

    let original = intersection_polylines(&cone, &plane);
    let scaled = intersection_polylines(&scaled_cone, &scaled_plane);

    assert_eq!(intersects(&cone, &plane), intersects(&scaled_cone, &scaled_plane));
    assert_eq!(original.point_count(), scaled.point_count());
    assert_eq!(original.polylines().len(), scaled.polylines().len());
    for (a, b) in original.polylines().iter().zip(scaled.polylines()) {
        assert_eq!(a.is_closed(), b.is_closed());
        assert_eq!(a.len(), b.len());
        for (p, q) in a.points().iter().zip(b.points()) {
            assert!((*p * k).abs_diff_eq(*q, 1e-12));
        }
    }
}

#[test]
fn test_scale_mesh_with_centroid_keeps_crossing_through_center() {
    let sphere = create_sphere(1.0, DVec3::new(2.0, 0.0, 0.0), 16).unwrap();
    let center = sphere.centroid().unwrap();
    let plane = Plane::new(center, DVec3::new(0.0, 1.0, 1.0)).unwrap();

    let grown = scale_mesh(&sphere, 3.0, None).unwrap();
    assert!(intersects(&grown, &plane));
    assert_eq!(
        intersection_polylines(&grown, &plane).point_count(),
        intersection_polylines(&sphere, &plane).point_count()
    );
}

#[test]
fn test_assemble_from_precomputed_list() {
    let sphere = unit_sphere();
    let plane = Plane::new(DVec3::new(0.0, 0.0, 0.4), DVec3::Z).unwrap();

    let crossing = crossing_triangles(&sphere, &plane);
    assert!(!crossing.is_empty());
    let reference = intersection_polylines(&sphere, &plane);
    assert_eq!(assemble_polylines(&sphere, &plane, &crossing), reference);

    // Repeats, misses and stale indices add nothing
    let mut noisy = crossing.clone();
    noisy.extend_from_slice(&crossing[..3]);
    noisy.push(0);
    noisy.push(sphere.triangle_count() + 10);
    assert_eq!(assemble_polylines(&sphere, &plane, &noisy), reference);

    assert!(assemble_polylines(&sphere, &plane, &[]).is_empty());
}

// =============================================================================
// Boundary cases
// =============================================================================

#[test]
fn test_non_manifold_book_edge() {
    // Four pages hinged on the Z axis; the hinge crosses the plane
    let mut vertices = vec![DVec3::new(0.0, 0.0, -1.0), DVec3::new(0.0, 0.0, 1.0)];
    vertices.extend([DVec3::X, DVec3::Y, DVec3::NEG_X, DVec3::NEG_Y].map(|d| d + DVec3::new(0.0, 0.0, 0.5)));
    let triangles = vec![[0, 1, 2], [0, 1, 3], [0, 1, 4], [0, 1, 5]];
    let book = Mesh::from_parts(vertices, triangles).unwrap();
    let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();

    let section = intersection_polylines(&book, &plane);
    assert_eq!(section.point_count(), 5);
    assert_eq!(section.polylines().len(), 2);
    assert!(section.polylines().iter().all(|p| !p.is_closed() && p.len() == 3));

    // Pages pair up in triangle order: +X with +Y, -X with -Y
    let first = section.polylines()[0].points();
    let second = section.polylines()[1].points();
    assert!(first[0].x > 0.0 && first[2].y > 0.0);
    assert!(second[0].x < 0.0 && second[2].y < 0.0);
    assert_eq!(first[1], DVec3::ZERO);
    assert_eq!(second[1], DVec3::ZERO);

    assert_eq!(intersection_polylines(&book, &plane), section);
}

#[test]
fn test_open_strip_gives_open_chain() {
    // A strip of two triangles standing across the plane
    let vertices = vec![
        DVec3::new(0.0, 0.0, -1.0),
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(1.0, 0.0, -1.0),
        DVec3::new(1.0, 0.0, 1.0),
    ];
    let strip = Mesh::from_parts(vertices, vec![[0, 2, 1], [1, 2, 3]]).unwrap();
    let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();

    let section = intersection_polylines(&strip, &plane);
    assert_eq!(section.polylines().len(), 1);
    let chain = &section.polylines()[0];
    assert!(!chain.is_closed());
    assert_eq!(chain.len(), 3);
    assert_eq!(section.point_count(), 3);
    assert_relative_eq!(chain.length(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_vertex_ring_touch_is_not_an_intersection() {
    // The cone's base ring lies exactly on the plane
    let cone = create_cone(2.0, 1.0, DVec3::new(0.0, 0.0, 1.0), 16).unwrap();
    let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();

    assert!(!intersects(&cone, &plane));
    assert!(intersection_polylines(&cone, &plane).is_empty());
}

#[test]
fn test_triangle_with_vertex_on_plane() {
    let mesh = Mesh::from_parts(
        vec![DVec3::ZERO, DVec3::new(1.0, 0.0, 1.0), DVec3::new(1.0, 0.0, -1.0)],
        vec![[0, 1, 2]],
    )
    .unwrap();
    let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();

    let section = intersection_polylines(&mesh, &plane);
    assert_eq!(section.polylines().len(), 1);
    assert_eq!(section.polylines()[0].points(), &[DVec3::ZERO, DVec3::X]);
}

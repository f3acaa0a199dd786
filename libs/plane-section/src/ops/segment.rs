//! # Triangle Segments
//!
//! The chord a plane cuts through one crossing triangle.

use super::classify::{is_crossing_triangle, sides_cross};
use crate::mesh::Mesh;
use crate::plane::{Plane, Side};
use glam::DVec3;
use rayon::prelude::*;

/// Two intersection points on the boundary of one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment {
    pub start: DVec3,
    pub end: DVec3,
}

/// Computes the segment of a crossing triangle.
///
/// Corners and edges are visited in cyclic order `v0, v0-v1, v1, v1-v2, v2,
/// v2-v0`. A corner on the plane contributes itself; an edge whose ends lie
/// strictly on opposite sides contributes its interpolated crossing. Returns
/// `None` for triangles that do not cross or are degenerate.
pub(crate) fn triangle_segment(mesh: &Mesh, plane: &Plane, index: usize) -> Option<Segment> {
    if !is_crossing_triangle(mesh, plane, index) {
        return None;
    }

    let ids = mesh.triangle(index);
    let positions = mesh.triangle_positions(index);
    let distances = positions.map(|p| plane.signed_distance(p));
    let sides = distances.map(Side::of);
    debug_assert!(sides_cross(&sides));

    let mut points = [DVec3::ZERO; 2];
    let mut count = 0;
    let mut push = |p: DVec3| {
        if count < points.len() {
            points[count] = p;
        }
        count += 1;
    };

    for i in 0..3 {
        let j = (i + 1) % 3;
        if sides[i] == Side::On {
            push(positions[i]);
        }
        if sides[i].is_opposite(sides[j]) {
            push(edge_crossing(
                (ids[i], positions[i], distances[i]),
                (ids[j], positions[j], distances[j]),
            ));
        }
    }

    // A crossing triangle has exactly one zero corner and one crossed edge,
    // or two crossed edges.
    debug_assert_eq!(count, 2);
    (count == 2).then(|| Segment {
        start: points[0],
        end: points[1],
    })
}

/// Point where the plane crosses an edge with strictly opposite end distances.
///
/// Ends are ordered by vertex index first, so both triangles sharing the edge
/// produce the same bits.
fn edge_crossing(a: (u32, DVec3, f64), b: (u32, DVec3, f64)) -> DVec3 {
    let ((_, p1, d1), (_, p2, d2)) = if a.0 <= b.0 { (a, b) } else { (b, a) };
    let t = d1.abs() / (d1.abs() + d2.abs());
    p1 + (p2 - p1) * t
}

/// Segments of the listed triangles, in list order.
///
/// Extraction is split into `chunk_size` slices processed in parallel and
/// concatenated. Indices past the end of the mesh are ignored.
pub(crate) fn extract_segments(
    mesh: &Mesh,
    plane: &Plane,
    triangles: &[usize],
    chunk_size: usize,
) -> Vec<Segment> {
    let per_chunk: Vec<Vec<Segment>> = triangles
        .par_chunks(chunk_size)
        .map(|chunk| {
            chunk
                .iter()
                .filter(|&&t| t < mesh.triangle_count())
                .filter_map(|&t| triangle_segment(mesh, plane, t))
                .collect()
        })
        .collect();
    per_chunk.concat()
}

//! # Crossing Classifier
//!
//! Decides which triangles the plane passes through.
//!
//! ## Algorithm
//!
//! 1. Evaluate the plane at the 8 corners of the mesh's cached bounding box.
//!    If every corner lies strictly on the same side, nothing can cross.
//! 2. Otherwise scan triangles in parallel chunks. A triangle crosses when it
//!    has one strictly positive and one strictly negative vertex. A vertex
//!    exactly on the plane is compatible with both sides.
//!
//! ## Boundary behaviour
//!
//! Coplanar triangles and triangles touching the plane only at vertices or
//! along an edge are not crossing. A mesh whose only contact with the plane is
//! a ring of vertices lying exactly on it therefore reports no intersection.
//!
//! Degenerate triangles (repeated indices, zero area) never cross.

use crate::mesh::Mesh;
use crate::plane::{Plane, Side};
use config::constants::PARALLEL_CHUNK_TRIANGLES;
use log::{debug, trace};
use rayon::prelude::*;

/// Returns true if the plane intersects the mesh surface.
///
/// # Example
///
/// ```rust
/// use plane_section::{intersects, primitives::create_sphere, Plane};
/// use glam::DVec3;
///
/// let sphere = create_sphere(1.0, DVec3::ZERO, 32).unwrap();
/// let normal = DVec3::new(0.0, 2.0, 1.0);
///
/// let near = Plane::new(DVec3::new(-1.0, 0.5, 0.0), normal).unwrap();
/// let far = Plane::new(DVec3::new(-1.0, 1.5, 0.0), normal).unwrap();
/// assert!(intersects(&sphere, &near));
/// assert!(!intersects(&sphere, &far));
/// ```
pub fn intersects(mesh: &Mesh, plane: &Plane) -> bool {
    intersects_chunked(mesh, plane, PARALLEL_CHUNK_TRIANGLES)
}

/// Indices of all crossing triangles, in mesh order.
pub fn crossing_triangles(mesh: &Mesh, plane: &Plane) -> Vec<usize> {
    crossing_triangles_chunked(mesh, plane, PARALLEL_CHUNK_TRIANGLES)
}

/// Returns true if the bounding box proves the plane misses the mesh.
///
/// An empty mesh is always rejected.
pub fn bounds_reject(mesh: &Mesh, plane: &Plane) -> bool {
    let Some(aabb) = mesh.aabb() else {
        return true;
    };

    let mut corners = aabb.corners().into_iter().map(|c| plane.side(c));
    let Some(first) = corners.next() else {
        return true;
    };
    first != Side::On && corners.all(|side| side == first)
}

/// Sides of the three triangle corners.
#[inline]
pub fn triangle_sides(mesh: &Mesh, plane: &Plane, index: usize) -> [Side; 3] {
    mesh.triangle_positions(index).map(|p| plane.side(p))
}

/// Returns true if the sides straddle the plane.
#[inline]
pub fn sides_cross(sides: &[Side; 3]) -> bool {
    sides.contains(&Side::Positive) && sides.contains(&Side::Negative)
}

/// Returns true if the triangle is a non-degenerate crossing triangle.
pub fn is_crossing_triangle(mesh: &Mesh, plane: &Plane, index: usize) -> bool {
    if !sides_cross(&triangle_sides(mesh, plane, index)) {
        return false;
    }
    if mesh.is_degenerate_triangle(index) {
        trace!("skipping degenerate crossing triangle {index}");
        return false;
    }
    true
}

pub(crate) fn intersects_chunked(mesh: &Mesh, plane: &Plane, chunk_size: usize) -> bool {
    if mesh.triangle_count() == 0 {
        return false;
    }
    if bounds_reject(mesh, plane) {
        debug!("plane rejected by mesh bounds");
        return false;
    }

    mesh.triangles()
        .par_chunks(chunk_size)
        .enumerate()
        .any(|(chunk, tris)| {
            let base = chunk * chunk_size;
            (base..base + tris.len()).any(|t| is_crossing_triangle(mesh, plane, t))
        })
}

pub(crate) fn crossing_triangles_chunked(
    mesh: &Mesh,
    plane: &Plane,
    chunk_size: usize,
) -> Vec<usize> {
    if mesh.triangle_count() == 0 || bounds_reject(mesh, plane) {
        return Vec::new();
    }

    let per_chunk: Vec<Vec<usize>> = mesh
        .triangles()
        .par_chunks(chunk_size)
        .enumerate()
        .map(|(chunk, tris)| {
            let base = chunk * chunk_size;
            (base..base + tris.len())
                .filter(|&t| is_crossing_triangle(mesh, plane, t))
                .collect()
        })
        .collect();

    let crossing = per_chunk.concat();
    debug!(
        "{} of {} triangles cross the plane",
        crossing.len(),
        mesh.triangle_count()
    );
    crossing
}

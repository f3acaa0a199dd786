//! # Sphere Primitive
//!
//! Generates a closed sphere mesh using latitude/longitude tessellation.

use crate::error::{SectionError, SectionResult};
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;
use glam::DVec3;
use std::f64::consts::PI;

/// Creates a sphere mesh using latitude/longitude tessellation.
///
/// # Arguments
///
/// * `radius` - The radius of the sphere
/// * `center` - Center of the sphere
/// * `segments` - Number of segments around the circumference
///
/// # Algorithm
///
/// - num_rings = (segments + 1) / 2
/// - Each ring at polar angle phi = 180° * (i + 0.5) / num_rings
/// - No pole vertices; the first and last rings are closed by triangle fans
///
/// # Example
///
/// ```rust
/// use plane_section::primitives::create_sphere;
/// use glam::DVec3;
///
/// let mesh = create_sphere(5.0, DVec3::ZERO, 32).unwrap();
/// assert!(mesh.vertex_count() > 0);
/// ```
pub fn create_sphere(radius: f64, center: DVec3, segments: u32) -> SectionResult<Mesh> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(SectionError::invalid_parameter(format!(
            "Sphere radius must be positive: {}",
            radius
        )));
    }

    if segments < MIN_SEGMENTS {
        return Err(SectionError::invalid_parameter(format!(
            "Sphere segments must be at least {MIN_SEGMENTS}: {}",
            segments
        )));
    }

    if !center.is_finite() {
        return Err(SectionError::invalid_parameter(format!(
            "Sphere center must be finite: {center:?}"
        )));
    }

    let num_rings = (segments + 1) / 2;
    let mut mesh = Mesh::with_capacity(
        (num_rings * segments) as usize,
        (2 * num_rings * segments) as usize,
    );

    let mut rings: Vec<Vec<u32>> = Vec::with_capacity(num_rings as usize);

    for i in 0..num_rings {
        // Polar angle (0 = top, PI = bottom)
        let phi = PI * (i as f64 + 0.5) / num_rings as f64;
        let ring_radius = radius * phi.sin();
        let z = radius * phi.cos();

        let ring: Vec<u32> = (0..segments)
            .map(|j| {
                let theta = 2.0 * PI * j as f64 / segments as f64;
                let offset = DVec3::new(ring_radius * theta.cos(), ring_radius * theta.sin(), z);
                mesh.add_vertex(center + offset)
            })
            .collect::<SectionResult<_>>()?;

        rings.push(ring);
    }

    // Top cap (first ring as polygon fan)
    let first_ring = &rings[0];
    for j in 1..segments - 1 {
        mesh.add_triangle(
            first_ring[0],
            first_ring[j as usize],
            first_ring[(j + 1) as usize],
        )?;
    }

    // Middle bands (quads between adjacent rings)
    for pair in rings.windows(2) {
        let (ring_a, ring_b) = (&pair[0], &pair[1]);

        for j in 0..segments as usize {
            let j_next = (j + 1) % segments as usize;

            let a0 = ring_a[j];
            let a1 = ring_a[j_next];
            let b0 = ring_b[j];
            let b1 = ring_b[j_next];

            mesh.add_triangle(a0, b0, b1)?;
            mesh.add_triangle(a0, b1, a1)?;
        }
    }

    // Bottom cap (last ring as polygon fan, reversed)
    let last_ring = &rings[rings.len() - 1];
    for j in 1..segments - 1 {
        mesh.add_triangle(
            last_ring[0],
            last_ring[(j + 1) as usize],
            last_ring[j as usize],
        )?;
    }

    Ok(mesh)
}

//! # Cone Primitive
//!
//! Generates a closed cone mesh pointing along +Z.

use crate::error::{SectionError, SectionResult};
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;
use glam::DVec3;
use std::f64::consts::PI;

/// Creates a cone mesh.
///
/// The cone is centered on `center`: the base circle lies at
/// `center.z - height / 2` and the apex at `center.z + height / 2`.
///
/// # Arguments
///
/// * `height` - Height along Z axis
/// * `radius` - Base radius
/// * `center` - Center of the cone's bounding box
/// * `segments` - Number of segments around the base circle
///
/// # Layout
///
/// Vertices `0..segments` form the base circle, vertex `segments` is the apex.
/// Triangles `0..segments` are the sides, followed by a fan from base vertex 0
/// closing the base.
///
/// # Example
///
/// ```rust
/// use plane_section::primitives::create_cone;
/// use glam::DVec3;
///
/// let cone = create_cone(1.5, 0.5, DVec3::new(1.0, 0.0, 0.0), 32).unwrap();
/// assert_eq!(cone.vertex_count(), 33);
/// assert_eq!(cone.triangle_count(), 32 + 30);
/// ```
pub fn create_cone(height: f64, radius: f64, center: DVec3, segments: u32) -> SectionResult<Mesh> {
    if !(height > 0.0 && height.is_finite()) {
        return Err(SectionError::invalid_parameter(format!(
            "Cone height must be positive: {}",
            height
        )));
    }

    if !(radius > 0.0 && radius.is_finite()) {
        return Err(SectionError::invalid_parameter(format!(
            "Cone radius must be positive: {}",
            radius
        )));
    }

    if segments < MIN_SEGMENTS {
        return Err(SectionError::invalid_parameter(format!(
            "Cone segments must be at least {MIN_SEGMENTS}: {}",
            segments
        )));
    }

    if !center.is_finite() {
        return Err(SectionError::invalid_parameter(format!(
            "Cone center must be finite: {center:?}"
        )));
    }

    let mut mesh = Mesh::with_capacity(segments as usize + 1, 2 * segments as usize - 2);

    let z_base = center.z - height / 2.0;
    let z_apex = center.z + height / 2.0;

    let base: Vec<u32> = (0..segments)
        .map(|j| {
            let theta = 2.0 * PI * j as f64 / segments as f64;
            let x = center.x + radius * theta.cos();
            let y = center.y + radius * theta.sin();
            mesh.add_vertex(DVec3::new(x, y, z_base))
        })
        .collect::<SectionResult<_>>()?;

    let apex = mesh.add_vertex(DVec3::new(center.x, center.y, z_apex))?;

    // Sides: triangles from base circle to apex
    for j in 0..segments as usize {
        let j_next = (j + 1) % segments as usize;
        mesh.add_triangle(base[j], base[j_next], apex)?;
    }

    // Base cap, facing -Z
    for j in 1..segments as usize - 1 {
        mesh.add_triangle(base[0], base[j + 1], base[j])?;
    }

    Ok(mesh)
}

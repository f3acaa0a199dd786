//! # Uniform Scaling
//!
//! Scales a mesh about a center point, by default its vertex centroid.

use crate::error::{SectionError, SectionResult};
use crate::mesh::Mesh;
use glam::DVec3;

/// Returns a copy of `mesh` scaled uniformly by `factor`.
///
/// # Arguments
///
/// * `mesh` - Input mesh
/// * `factor` - Uniform scale factor, must be positive and finite
/// * `center` - Fixed point of the scaling; `None` uses the vertex centroid
///
/// # Example
///
/// ```rust
/// use plane_section::ops::scale::scale_mesh;
/// use plane_section::primitives::create_sphere;
/// use glam::DVec3;
///
/// let sphere = create_sphere(1.0, DVec3::new(1.0, -2.0, 0.5), 24).unwrap();
/// let scaled = scale_mesh(&sphere, 2.5, None).unwrap();
///
/// let before = sphere.centroid().unwrap();
/// let after = scaled.centroid().unwrap();
/// assert!(after.abs_diff_eq(before, 1e-9));
///
/// assert!(scale_mesh(&sphere, 0.0, None).is_err());
/// ```
pub fn scale_mesh(mesh: &Mesh, factor: f64, center: Option<DVec3>) -> SectionResult<Mesh> {
    if !(factor > 0.0 && factor.is_finite()) {
        return Err(SectionError::invalid_parameter(format!(
            "scale factor must be positive and finite: {factor}"
        )));
    }
    if let Some(c) = center {
        if !c.is_finite() {
            return Err(SectionError::invalid_parameter(format!(
                "scale center must be finite: {c:?}"
            )));
        }
    }

    let mut scaled = mesh.clone();
    if let Some(fixed) = center.or_else(|| mesh.centroid()) {
        scaled.scale_about(fixed, factor)?;
    }
    Ok(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_sphere;
    use approx::assert_relative_eq;

    #[test]
    fn test_scale_keeps_center() {
        let mesh = create_sphere(1.0, DVec3::new(1.0, -2.0, 0.5), 24).unwrap();
        let scaled = scale_mesh(&mesh, 2.5, None).unwrap();

        let before = mesh.aabb().unwrap();
        let after = scaled.aabb().unwrap();
        assert!(after.center().abs_diff_eq(before.center(), 1e-9));

        let half_before = (before.max - before.min) * 0.5;
        let half_after = (after.max - after.min) * 0.5;
        for axis in 0..3 {
            assert_relative_eq!(half_after[axis], half_before[axis] * 2.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_scale_about_explicit_center() {
        let mesh = create_sphere(1.0, DVec3::ZERO, 16).unwrap();
        let scaled = scale_mesh(&mesh, 3.0, Some(DVec3::new(1.0, 0.0, 0.0))).unwrap();
        let centroid = scaled.centroid().unwrap();
        assert_relative_eq!(centroid.x, -2.0, epsilon = 1e-9);
        assert_relative_eq!(centroid.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(centroid.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_scale_rejects_nonpositive() {
        let mesh = create_sphere(1.0, DVec3::ZERO, 16).unwrap();
        assert!(matches!(
            scale_mesh(&mesh, 0.0, None),
            Err(SectionError::InvalidParameter { .. })
        ));
        assert!(scale_mesh(&mesh, -1.0, None).is_err());
        assert!(scale_mesh(&mesh, f64::NAN, None).is_err());
    }

    #[test]
    fn test_scale_empty_mesh() {
        let scaled = scale_mesh(&Mesh::new(), 2.0, None).unwrap();
        assert!(scaled.is_empty());
    }
}

//! # Cutting Plane
//!
//! Infinite plane given by an origin and a normal, with signed-distance
//! classification of points.

use crate::error::{SectionError, SectionResult};
use glam::DVec3;
use serde::Serialize;

// =============================================================================
// SIDE
// =============================================================================

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Signed distance strictly positive.
    Positive,
    /// Signed distance strictly negative.
    Negative,
    /// Signed distance exactly zero (NaN also lands here).
    On,
}

impl Side {
    /// Classifies a signed distance by its sign.
    #[inline]
    pub fn of(distance: f64) -> Self {
        if distance > 0.0 {
            Side::Positive
        } else if distance < 0.0 {
            Side::Negative
        } else {
            Side::On
        }
    }

    /// True for the two strict sides on opposite halves of the plane.
    #[inline]
    pub fn is_opposite(self, other: Side) -> bool {
        matches!(
            (self, other),
            (Side::Positive, Side::Negative) | (Side::Negative, Side::Positive)
        )
    }
}

// =============================================================================
// PLANE
// =============================================================================

/// An infinite plane in 3D space defined by an origin point and a normal.
///
/// The normal is stored at unit length, so signed distances are Euclidean and
/// stay finite for any finite input normal, however large or small.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Plane {
    /// A point on the plane.
    origin: DVec3,
    /// Unit normal vector.
    normal: DVec3,
}

impl Plane {
    /// Create a plane from a point on it and a normal vector of any length.
    ///
    /// Fails with [`SectionError::InvalidPlane`] for a zero or non-finite
    /// normal, or a non-finite origin.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plane_section::Plane;
    /// use glam::DVec3;
    ///
    /// let plane = Plane::new(DVec3::new(-1.0, 0.5, 0.0), DVec3::new(0.0, 2.0, 1.0)).unwrap();
    /// assert!(plane.signed_distance(DVec3::new(0.0, 1.0, 0.0)) > 0.0);
    ///
    /// assert!(Plane::new(DVec3::ZERO, DVec3::ZERO).is_err());
    /// ```
    pub fn new(origin: DVec3, normal: DVec3) -> SectionResult<Self> {
        let (unit, _) = unit_and_length(normal)?;
        if !origin.is_finite() {
            return Err(SectionError::invalid_plane(format!(
                "origin must be finite: {origin:?}"
            )));
        }
        Ok(Self {
            origin,
            normal: unit,
        })
    }

    /// Create the plane `a*x + b*y + c*z = d`.
    ///
    /// The origin is the point of the plane closest to the world origin,
    /// `d / |n|^2 * n` with `n = (a, b, c)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plane_section::Plane;
    /// use glam::DVec3;
    ///
    /// let plane = Plane::from_coefficients(0.0, 0.0, 2.0, 1.0).unwrap();
    /// assert_eq!(plane.origin(), DVec3::new(0.0, 0.0, 0.5));
    /// assert_eq!(plane.normal(), DVec3::Z);
    /// ```
    pub fn from_coefficients(a: f64, b: f64, c: f64, d: f64) -> SectionResult<Self> {
        let normal = DVec3::new(a, b, c);
        let (_, largest) = unit_and_length(normal)?;
        if !d.is_finite() {
            return Err(SectionError::invalid_plane(format!("offset d must be finite: {d}")));
        }

        // Work with n / max|n_i| so |n|^2 cannot overflow or underflow
        let reduced = normal / largest;
        let origin = reduced * (d / largest / reduced.length_squared());
        Self::new(origin, normal)
    }

    /// Get the plane origin.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the unit normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Euclidean signed distance: `dot(point - origin, normal)`.
    ///
    /// Positive = front, negative = back, zero = on plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    /// Classify a point relative to this plane.
    #[inline]
    pub fn side(&self, point: DVec3) -> Side {
        Side::of(self.signed_distance(point))
    }

    /// Returns a plane with every point and the origin scaled by `factor`
    /// about the world origin. The normal is unchanged.
    pub fn scaled(&self, factor: f64) -> SectionResult<Self> {
        Self::new(self.origin * factor, self.normal)
    }
}

/// Unit vector along `normal` and its largest absolute component.
fn unit_and_length(normal: DVec3) -> SectionResult<(DVec3, f64)> {
    if !normal.is_finite() {
        return Err(SectionError::invalid_plane(format!(
            "normal must be finite: {normal:?}"
        )));
    }
    let largest = normal.abs().max_element();
    if largest == 0.0 {
        return Err(SectionError::invalid_plane("normal must be non-zero"));
    }
    let reduced = normal / largest;
    Ok((reduced / reduced.length(), largest))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_rejects_zero_normal() {
        let err = Plane::new(DVec3::ONE, DVec3::ZERO).unwrap_err();
        assert!(matches!(err, SectionError::InvalidPlane { .. }));
    }

    #[test]
    fn test_plane_rejects_non_finite() {
        assert!(Plane::new(DVec3::ZERO, DVec3::new(f64::NAN, 1.0, 0.0)).is_err());
        assert!(Plane::new(DVec3::new(f64::INFINITY, 0.0, 0.0), DVec3::Z).is_err());
    }

    #[test]
    fn test_plane_side() {
        let plane = Plane::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 3.0)).unwrap();

        assert_eq!(plane.side(DVec3::new(0.0, 0.0, 1.0)), Side::Positive);
        assert_eq!(plane.side(DVec3::new(0.0, 0.0, -1.0)), Side::Negative);
        assert_eq!(plane.side(DVec3::new(1.0, 1.0, 0.0)), Side::On);
    }

    #[test]
    fn test_signed_distance_is_euclidean() {
        let plane = Plane::new(DVec3::new(0.0, 0.0, 1.0), DVec3::new(0.0, 0.0, 2.0)).unwrap();
        let p = DVec3::new(5.0, 5.0, 4.0);
        assert_eq!(plane.normal(), DVec3::Z);
        assert_eq!(plane.signed_distance(p), 3.0);
    }

    #[test]
    fn test_extreme_normal_lengths() {
        let p = DVec3::new(0.0, 0.0, 2.0);
        for scale in [1.0e300, 1.0e-300] {
            let plane = Plane::new(DVec3::ZERO, DVec3::new(0.0, 0.0, scale)).unwrap();
            assert_eq!(plane.normal(), DVec3::Z);
            assert_eq!(plane.signed_distance(p), 2.0);
        }

        let huge = Plane::new(DVec3::ZERO, DVec3::new(1.0e300, 1.0e300, 0.0)).unwrap();
        let d = huge.signed_distance(DVec3::new(1.0, 1.0, 0.0));
        assert!(d.is_finite());
        assert_relative_eq!(d, 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_from_coefficients_huge_normal() {
        let plane = Plane::from_coefficients(0.0, 0.0, 1.0e300, 5.0e299).unwrap();
        assert_relative_eq!(plane.origin().z, 0.5, epsilon = 1e-12);
        assert_eq!(plane.normal(), DVec3::Z);
    }

    #[test]
    fn test_side_opposite() {
        assert!(Side::Positive.is_opposite(Side::Negative));
        assert!(Side::Negative.is_opposite(Side::Positive));
        assert!(!Side::On.is_opposite(Side::Positive));
        assert!(!Side::Negative.is_opposite(Side::Negative));
        assert_eq!(Side::of(f64::NAN), Side::On);
    }

    #[test]
    fn test_from_coefficients() {
        let plane = Plane::from_coefficients(1.0, 1.0, 0.0, 2.0).unwrap();
        assert_eq!(plane.origin(), DVec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(plane.normal().length(), 1.0, epsilon = 1e-15);
        assert_eq!(plane.signed_distance(DVec3::new(2.0, 0.0, 7.0)), 0.0);
    }

    #[test]
    fn test_from_coefficients_zero_normal() {
        assert!(Plane::from_coefficients(0.0, 0.0, 0.0, 1.0).is_err());
        assert!(Plane::from_coefficients(0.0, 0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_scaled_keeps_normal() {
        let plane = Plane::new(DVec3::new(1.0, 2.0, 3.0), DVec3::Y).unwrap();
        let scaled = plane.scaled(2.0).unwrap();
        assert_eq!(scaled.origin(), DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(scaled.normal(), DVec3::Y);
    }
}

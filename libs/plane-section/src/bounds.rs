//! # Axis-Aligned Bounding Box
//!
//! Bounds snapshot cached by [`Mesh`](crate::Mesh) for the plane fast path.

use glam::DVec3;

/// Axis-aligned bounding box given by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Aabb {
    /// Creates a box from two corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plane_section::bounds::Aabb;
    /// use glam::DVec3;
    ///
    /// let aabb = Aabb::from_points(&[DVec3::ZERO, DVec3::new(1.0, -2.0, 3.0)]).unwrap();
    /// assert_eq!(aabb.min, DVec3::new(0.0, -2.0, 0.0));
    /// assert_eq!(aabb.max, DVec3::new(1.0, 0.0, 3.0));
    /// ```
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// The eight corners, x varying fastest.
    pub fn corners(&self) -> [DVec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            DVec3::new(a.x, a.y, a.z),
            DVec3::new(b.x, a.y, a.z),
            DVec3::new(a.x, b.y, a.z),
            DVec3::new(b.x, b.y, a.z),
            DVec3::new(a.x, a.y, b.z),
            DVec3::new(b.x, a.y, b.z),
            DVec3::new(a.x, b.y, b.z),
            DVec3::new(b.x, b.y, b.z),
        ]
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Length of the diagonal from `min` to `max`.
    ///
    /// Measures the size of the box independently of where it sits, so it is
    /// the extent used for relative tolerances.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_empty() {
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_from_points_single() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        let aabb = Aabb::from_points(&[p]).unwrap();
        assert_eq!(aabb.min, p);
        assert_eq!(aabb.max, p);
    }

    #[test]
    fn test_corners_cover_box() {
        let aabb = Aabb::new(DVec3::new(-1.0, -2.0, -3.0), DVec3::new(1.0, 2.0, 3.0));
        let corners = aabb.corners();
        assert_eq!(corners[0], aabb.min);
        assert_eq!(corners[7], aabb.max);
        for c in corners {
            assert_eq!(c.abs(), DVec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_diagonal_and_center() {
        let aabb = Aabb::new(DVec3::new(-7.0, 0.0, 0.0), DVec3::new(-4.0, 4.0, 0.0));
        assert_eq!(aabb.diagonal(), 5.0);
        assert_eq!(aabb.center(), DVec3::new(-5.5, 2.0, 0.0));
    }

    #[test]
    fn test_diagonal_ignores_position() {
        let near = Aabb::new(DVec3::ZERO, DVec3::ONE);
        let offset = DVec3::new(1.0e9, -3.0e6, 0.0);
        let far = Aabb::new(near.min + offset, near.max + offset);
        assert_eq!(near.diagonal(), far.diagonal());
    }
}

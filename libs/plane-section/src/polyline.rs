//! # Cross-Section Output
//!
//! Polylines produced by stitching plane/triangle segments.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An ordered chain of intersection points.
///
/// A closed polyline repeats its first point as its last point, so a loop
/// through `n` distinct nodes holds `n + 1` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<DVec3>,
    closed: bool,
}

impl Polyline {
    pub(crate) fn new(points: Vec<DVec3>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Points in walk order.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// True when the chain returns to its first point.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of stored points, including the repeated point of a loop.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the polyline has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct nodes visited.
    pub fn node_count(&self) -> usize {
        if self.closed {
            self.points.len().saturating_sub(1)
        } else {
            self.points.len()
        }
    }

    /// Number of segments along the chain.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Result of sectioning a mesh with a plane.
///
/// # Example
///
/// ```rust
/// use plane_section::{intersection_polylines, primitives::create_cone, Plane};
/// use glam::DVec3;
///
/// let cone = create_cone(1.5, 0.5, DVec3::ZERO, 32).unwrap();
/// let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();
///
/// let section = intersection_polylines(&cone, &plane);
/// assert_eq!(section.polylines().len(), 1);
/// assert!(section.polylines()[0].is_closed());
/// assert_eq!(section.point_count(), 32);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    polylines: Vec<Polyline>,
    point_count: usize,
}

impl CrossSection {
    pub(crate) fn new(polylines: Vec<Polyline>, point_count: usize) -> Self {
        Self {
            polylines,
            point_count,
        }
    }

    /// Polylines ordered by first discovery of their start node.
    #[inline]
    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    /// Number of distinct intersection points after stitching.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Returns true if the plane produced no segment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Consumes the section, returning its polylines.
    pub fn into_polylines(self) -> Vec<Polyline> {
        self.polylines
    }
}

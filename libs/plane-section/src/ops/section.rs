//! # Plane Section
//!
//! Query object tying a mesh, a plane and a [`SectionConfig`] together.
//!
//! ## Phases
//!
//! ```text
//! Mesh + Plane → classify (parallel) → crossing triangles
//!              → extract segments (parallel) → stitch (sequential) → CrossSection
//! ```
//!
//! Callers that need cancellation can run [`PlaneSection::crossing_triangles`]
//! and [`PlaneSection::assemble`] separately and check their flag in between.

use super::classify::{bounds_reject, crossing_triangles_chunked, intersects_chunked};
use super::segment::extract_segments;
use super::stitch::stitch;
use crate::mesh::Mesh;
use crate::plane::Plane;
use crate::polyline::CrossSection;
use config::constants::SectionConfig;
use log::debug;

/// A plane/mesh intersection query.
///
/// # Example
///
/// ```rust
/// use plane_section::{PlaneSection, Plane, primitives::create_cone};
/// use config::constants::SectionConfig;
/// use glam::DVec3;
///
/// let cone = create_cone(1.5, 0.5, DVec3::ZERO, 32).unwrap();
/// let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();
/// let config = SectionConfig::new(1e-7, 0.0, 8).unwrap();
///
/// let query = PlaneSection::with_config(&cone, &plane, config);
/// let crossing = query.crossing_triangles();
/// assert_eq!(crossing.len(), 32);
///
/// let section = query.assemble(&crossing);
/// assert_eq!(section.point_count(), 32);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlaneSection<'a> {
    mesh: &'a Mesh,
    plane: &'a Plane,
    config: SectionConfig,
}

impl<'a> PlaneSection<'a> {
    /// Creates a query with the default configuration.
    pub fn new(mesh: &'a Mesh, plane: &'a Plane) -> Self {
        Self::with_config(mesh, plane, SectionConfig::default())
    }

    /// Creates a query with explicit tolerances and chunking.
    ///
    /// The configuration can only be built through
    /// [`SectionConfig::new`], so its chunk size is never zero.
    pub fn with_config(mesh: &'a Mesh, plane: &'a Plane, config: SectionConfig) -> Self {
        Self {
            mesh,
            plane,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    /// Returns true if the plane crosses the mesh surface.
    pub fn intersects(&self) -> bool {
        intersects_chunked(self.mesh, self.plane, self.config.chunk_size())
    }

    /// Indices of the crossing triangles, in mesh order.
    pub fn crossing_triangles(&self) -> Vec<usize> {
        crossing_triangles_chunked(self.mesh, self.plane, self.config.chunk_size())
    }

    /// Builds the cross-section from a crossing-triangle list.
    ///
    /// The list normally comes from [`PlaneSection::crossing_triangles`].
    /// Entries that are out of range, not crossing, or degenerate are
    /// ignored; repeated entries add nothing.
    pub fn assemble(&self, crossing: &[usize]) -> CrossSection {
        let segments = extract_segments(self.mesh, self.plane, crossing, self.config.chunk_size());
        if segments.is_empty() {
            return CrossSection::default();
        }

        let tolerance = self.merge_distance();
        debug!(
            "assembling {} segments with merge distance {tolerance:e}",
            segments.len()
        );
        stitch(&segments, tolerance)
    }

    /// Classifies and assembles in one call.
    pub fn polylines(&self) -> CrossSection {
        if bounds_reject(self.mesh, self.plane) {
            return CrossSection::default();
        }
        let crossing = self.crossing_triangles();
        self.assemble(&crossing)
    }

    fn merge_distance(&self) -> f64 {
        let extent = self.mesh.aabb().map_or(0.0, |aabb| aabb.diagonal());
        self.config.merge_distance(extent)
    }
}

/// Returns the polylines where the plane cuts the mesh surface.
///
/// # Example
///
/// ```rust
/// use approx::assert_abs_diff_eq;
/// use plane_section::{intersection_polylines, primitives::create_sphere, Plane};
/// use glam::DVec3;
///
/// let sphere = create_sphere(1.0, DVec3::ZERO, 32).unwrap();
/// let plane = Plane::new(DVec3::new(-1.0, 0.5, 0.0), DVec3::new(0.0, 2.0, 1.0)).unwrap();
///
/// let section = intersection_polylines(&sphere, &plane);
/// assert_eq!(section.polylines().len(), 1);
/// for p in section.polylines()[0].points() {
///     assert_abs_diff_eq!(plane.signed_distance(*p), 0.0, epsilon = 1e-9);
/// }
/// ```
pub fn intersection_polylines(mesh: &Mesh, plane: &Plane) -> CrossSection {
    PlaneSection::new(mesh, plane).polylines()
}

/// Builds the cross-section from a precomputed crossing-triangle list.
pub fn assemble_polylines(mesh: &Mesh, plane: &Plane, crossing: &[usize]) -> CrossSection {
    PlaneSection::new(mesh, plane).assemble(crossing)
}

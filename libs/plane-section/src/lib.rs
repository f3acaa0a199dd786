//! # Plane Section
//!
//! Intersection of an infinite plane with a triangle mesh.
//!
//! ## Architecture
//!
//! ```text
//! Mesh + Plane → ops::classify → ops::segment → ops::stitch → CrossSection
//! ```
//!
//! ## Queries
//!
//! - [`intersects`]: does the plane cross the mesh surface?
//! - [`intersection_polylines`]: the cut as open chains and closed loops,
//!   plus the number of distinct intersection points
//!
//! Both scan triangles in parallel with rayon; stitching is sequential and
//! deterministic for a given input.
//!
//! ## Usage
//!
//! ```rust
//! use plane_section::{intersection_polylines, intersects, primitives::create_sphere, Plane};
//! use glam::DVec3;
//!
//! let sphere = create_sphere(1.0, DVec3::ZERO, 32).unwrap();
//! let plane = Plane::new(DVec3::ZERO, DVec3::new(0.0, 0.3, 1.0)).unwrap();
//!
//! assert!(intersects(&sphere, &plane));
//! let section = intersection_polylines(&sphere, &plane);
//! assert_eq!(section.polylines().len(), 1);
//! assert!(section.polylines()[0].is_closed());
//! ```

pub mod bounds;
pub mod error;
pub mod io;
pub mod mesh;
pub mod ops;
pub mod plane;
pub mod polyline;
pub mod primitives;

pub use error::{SectionError, SectionResult};
pub use mesh::Mesh;
pub use ops::{assemble_polylines, crossing_triangles, intersection_polylines, intersects, PlaneSection};
pub use plane::{Plane, Side};
pub use polyline::{CrossSection, Polyline};

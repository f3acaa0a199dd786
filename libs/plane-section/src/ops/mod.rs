//! # Mesh Operations
//!
//! Plane sectioning (classification, segment extraction, stitching) and
//! uniform scaling.

pub mod classify;
pub mod scale;
pub mod section;
mod segment;
mod stitch;

#[cfg(test)]
mod tests;

pub use classify::{crossing_triangles, intersects};
pub use scale::scale_mesh;
pub use section::{assemble_polylines, intersection_polylines, PlaneSection};

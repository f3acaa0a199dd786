//! # Config Crate
//!
//! Centralized tolerances and tuning constants for plane/mesh sectioning.
//! Every magic number used by the geometry crates is defined here so that
//! the classifier, the polyline assembler and the primitive generators agree
//! on the same values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{SectionConfig, STITCH_ABSOLUTE_TOLERANCE};
//!
//! let cfg = SectionConfig::default();
//! assert_eq!(cfg.absolute_tolerance(), STITCH_ABSOLUTE_TOLERANCE);
//!
//! // Merge distance grows with the size of the mesh
//! assert!(cfg.merge_distance(1000.0) > cfg.merge_distance(1.0));
//! ```

pub mod constants;

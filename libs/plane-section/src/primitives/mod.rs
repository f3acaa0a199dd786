//! # Primitives
//!
//! Procedural meshes (sphere, cone) used to feed and test sectioning.

pub mod cone;
pub mod sphere;

pub use cone::create_cone;
pub use sphere::create_sphere;

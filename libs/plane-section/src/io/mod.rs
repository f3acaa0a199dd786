//! # Mesh I/O
//!
//! Wavefront OBJ and STL reading and writing for meshes, OBJ output for
//! cross-sections. [`read_mesh`] and [`write_mesh`] pick the format from the
//! file extension.

pub mod obj;
pub mod stl;

pub use obj::{parse_obj, read_obj, save_obj, write_cross_section_obj, write_obj};
pub use stl::{parse_stl, read_stl, save_stl, write_stl, write_stl_binary};

use crate::error::{SectionError, SectionResult};
use crate::mesh::Mesh;
use std::path::Path;

/// Mesh file formats known by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Stl,
}

impl MeshFormat {
    /// Format for `path`, from its case-insensitive extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plane_section::io::MeshFormat;
    ///
    /// assert_eq!(MeshFormat::from_path("part.STL").unwrap(), MeshFormat::Stl);
    /// assert!(MeshFormat::from_path("part.ply").is_err());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> SectionResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("obj") => Ok(Self::Obj),
            Some("stl") => Ok(Self::Stl),
            _ => Err(SectionError::invalid_parameter(format!(
                "Unsupported mesh format for {} (use .obj or .stl)",
                path.display()
            ))),
        }
    }
}

/// Reads an OBJ or STL mesh, rejecting files without any vertex.
pub fn read_mesh<P: AsRef<Path>>(path: P) -> SectionResult<Mesh> {
    let path = path.as_ref();
    let mesh = match MeshFormat::from_path(path)? {
        MeshFormat::Obj => read_obj(path)?,
        MeshFormat::Stl => read_stl(path)?,
    };
    if mesh.vertex_count() == 0 {
        return Err(SectionError::invalid_mesh(format!(
            "{} holds no vertices",
            path.display()
        )));
    }
    Ok(mesh)
}

/// Writes a mesh as OBJ or ASCII STL, creating missing parent directories.
pub fn write_mesh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> SectionResult<()> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    match format {
        MeshFormat::Obj => save_obj(mesh, path),
        MeshFormat::Stl => save_stl(mesh, path),
    }
}

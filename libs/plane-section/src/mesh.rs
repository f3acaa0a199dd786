//! # Mesh Data Structure
//!
//! Indexed triangle mesh with a cached bounding box.

use crate::bounds::Aabb;
use crate::error::{SectionError, SectionResult};
use config::constants::DEGENERATE_SINE_EPSILON;
use glam::DVec3;
use std::sync::OnceLock;

/// A triangle mesh with vertices and indices.
///
/// Every triangle index is checked against the vertex array when the triangle
/// is added, so a `Mesh` can always be sectioned without further validation.
/// The bounding box is computed on first use and dropped by every method that
/// moves vertices.
///
/// # Example
///
/// ```rust
/// use plane_section::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0)).unwrap();
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0)).unwrap();
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0)).unwrap();
/// mesh.add_triangle(0, 1, 2).unwrap();
/// assert!(mesh.add_triangle(0, 1, 3).is_err());
/// assert!(mesh.add_vertex(DVec3::new(f64::NAN, 0.0, 0.0)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Lazily computed bounds, `None` inside when there are no vertices
    bounds: OnceLock<Option<Aabb>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            bounds: OnceLock::new(),
        }
    }

    /// Builds a mesh from vertex and triangle arrays.
    ///
    /// Fails with [`SectionError::InvalidMesh`] when a coordinate is not
    /// finite or an index is out of bounds.
    pub fn from_parts(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> SectionResult<Self> {
        if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(SectionError::invalid_mesh(format!(
                "vertex {i} has a non-finite coordinate: {:?}",
                vertices[i]
            )));
        }

        let vertex_count = vertices.len();
        for (t, tri) in triangles.iter().enumerate() {
            check_indices(t, tri, vertex_count)?;
        }

        Ok(Self {
            vertices,
            triangles,
            bounds: OnceLock::new(),
        })
    }

    /// Builds a mesh from flattened `[x, y, z, ...]` and `[i0, i1, i2, ...]`
    /// buffers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plane_section::Mesh;
    ///
    /// let mesh = Mesh::from_buffers(
    ///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    ///     &[0, 1, 2],
    /// ).unwrap();
    /// assert_eq!(mesh.triangle_count(), 1);
    ///
    /// assert!(Mesh::from_buffers(&[0.0, 1.0], &[]).is_err());
    /// ```
    pub fn from_buffers(positions: &[f64], indices: &[u32]) -> SectionResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(SectionError::invalid_mesh(format!(
                "position buffer length {} is not a multiple of 3",
                positions.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(SectionError::invalid_mesh(format!(
                "index buffer length {} is not a multiple of 3",
                indices.len()
            )));
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| DVec3::new(c[0], c[1], c[2]))
            .collect();
        let triangles = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Self::from_parts(vertices, triangles)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    ///
    /// Fails with [`SectionError::InvalidMesh`] for a non-finite position or
    /// when the index would not fit in `u32`.
    pub fn add_vertex(&mut self, position: DVec3) -> SectionResult<u32> {
        if !position.is_finite() {
            return Err(SectionError::invalid_mesh(format!(
                "vertex {} has a non-finite coordinate: {position:?}",
                self.vertices.len()
            )));
        }
        let index = vertex_index(self.vertices.len())?;
        self.vertices.push(position);
        self.bounds = OnceLock::new();
        Ok(index)
    }

    /// Adds a triangle by vertex indices.
    ///
    /// Indices must refer to vertices already in the mesh.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) -> SectionResult<()> {
        let tri = [v0, v1, v2];
        check_indices(self.triangles.len(), &tri, self.vertices.len())?;
        self.triangles.push(tri);
        Ok(())
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Returns the three corner positions of a triangle.
    #[inline]
    pub fn triangle_positions(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Cached axis-aligned bounding box, `None` for a mesh without vertices.
    pub fn aabb(&self) -> Option<Aabb> {
        *self.bounds.get_or_init(|| Aabb::from_points(&self.vertices))
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box, both zero when empty.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        self.aabb()
            .map_or((DVec3::ZERO, DVec3::ZERO), |aabb| (aabb.min, aabb.max))
    }

    /// Average of all vertex positions, `None` when empty.
    pub fn centroid(&self) -> Option<DVec3> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum: DVec3 = self.vertices.iter().copied().sum();
        Some(sum / self.vertices.len() as f64)
    }

    /// Translates the mesh by a vector.
    ///
    /// The mesh is left untouched if any moved vertex would not be finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plane_section::primitives::create_sphere;
    /// use glam::DVec3;
    ///
    /// let mut mesh = create_sphere(1.0, DVec3::ZERO, 16).unwrap();
    /// mesh.translate(DVec3::new(10.0, 0.0, 0.0)).unwrap();
    /// assert!(mesh.bounding_box().0.x > 8.0);
    /// ```
    pub fn translate(&mut self, offset: DVec3) -> SectionResult<()> {
        self.move_vertices("translation", |v| v + offset)
    }

    /// Scales every vertex by `factor` about `center`.
    ///
    /// The mesh is left untouched if any moved vertex would not be finite.
    pub fn scale_about(&mut self, center: DVec3, factor: f64) -> SectionResult<()> {
        self.move_vertices("scaling", |v| center + (v - center) * factor)
    }

    fn move_vertices(&mut self, what: &str, f: impl Fn(DVec3) -> DVec3) -> SectionResult<()> {
        let moved: Vec<DVec3> = self.vertices.iter().map(|&v| f(v)).collect();
        if let Some(i) = moved.iter().position(|v| !v.is_finite()) {
            return Err(SectionError::invalid_mesh(format!(
                "{what} moves vertex {i} to a non-finite position: {:?}",
                moved[i]
            )));
        }
        self.vertices = moved;
        self.bounds = OnceLock::new();
        Ok(())
    }

    /// Merges another mesh into this one.
    ///
    /// Fails with [`SectionError::InvalidMesh`], leaving `self` untouched,
    /// when the merged vertex indices would not fit in `u32`.
    pub fn merge(&mut self, other: &Mesh) -> SectionResult<()> {
        let offset = vertex_index(self.vertices.len())?;
        if let Some(last) = (self.vertices.len() + other.vertices.len()).checked_sub(1) {
            vertex_index(last)?;
        }

        self.vertices.extend_from_slice(&other.vertices);
        self.triangles
            .extend(other.triangles.iter().map(|tri| tri.map(|i| i + offset)));

        self.bounds = OnceLock::new();
        Ok(())
    }

    /// Returns true if the triangle cannot carry a plane crossing: repeated
    /// vertex indices, or corners (nearly) collinear.
    pub fn is_degenerate_triangle(&self, index: usize) -> bool {
        let [a, b, c] = self.triangles[index];
        if a == b || b == c || a == c {
            return true;
        }

        let [v0, v1, v2] = self.triangle_positions(index);
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let area2 = edge1.cross(edge2).length();
        area2 <= DEGENERATE_SINE_EPSILON * edge1.length() * edge2.length()
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks that no triangle is degenerate. Indices are always in bounds.
    pub fn validate(&self) -> bool {
        (0..self.triangles.len()).all(|t| !self.is_degenerate_triangle(t))
    }
}

/// Converts a vertex position to a triangle index.
fn vertex_index(position: usize) -> SectionResult<u32> {
    u32::try_from(position).map_err(|_| {
        SectionError::invalid_mesh(format!(
            "vertex index {position} does not fit in a 32-bit triangle index"
        ))
    })
}

fn check_indices(triangle: usize, tri: &[u32; 3], vertex_count: usize) -> SectionResult<()> {
    match tri.iter().find(|&&i| i as usize >= vertex_count) {
        Some(bad) => Err(SectionError::invalid_mesh(format!(
            "triangle {triangle} references vertex {bad}, but the mesh has {vertex_count} vertices"
        ))),
        None => Ok(()),
    }
}

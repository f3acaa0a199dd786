//! # Wavefront OBJ
//!
//! Reads `v` and `f` records; polygon faces are fan-triangulated. Every other
//! record (normals, texture coordinates, groups, materials) is skipped.
//!
//! Cross-sections are written as `v` records followed by one `l` record per
//! polyline.

use crate::error::{SectionError, SectionResult};
use crate::mesh::Mesh;
use crate::polyline::CrossSection;
use glam::DVec3;
use log::{debug, trace};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads a mesh from an OBJ file.
pub fn read_obj<P: AsRef<Path>>(path: P) -> SectionResult<Mesh> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let mesh = parse_obj(&source)?;
    debug!(
        "read {} vertices and {} triangles from {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        path.display()
    );
    Ok(mesh)
}

/// Parses OBJ text into a mesh.
///
/// Face tokens may carry texture and normal indices (`7/1/3`, `7//3`); only
/// the position index is used. Negative indices count back from the most
/// recent vertex.
///
/// # Example
///
/// ```rust
/// use plane_section::io::parse_obj;
///
/// let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.triangle_count(), 2);
///
/// assert!(parse_obj("v 0 0\n").is_err());
/// ```
pub fn parse_obj(source: &str) -> SectionResult<Mesh> {
    let mut vertices: Vec<DVec3> = Vec::new();
    let mut triangles: Vec<[u32; 3]> = Vec::new();

    for (n, raw) in source.lines().enumerate() {
        let line_no = n + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("v") => {
                let mut coords = [0.0; 3];
                for coord in &mut coords {
                    let token = parts
                        .next()
                        .ok_or_else(|| SectionError::parse(line_no, "vertex needs 3 coordinates"))?;
                    *coord = token.parse().map_err(|_| {
                        SectionError::parse(line_no, format!("invalid coordinate '{token}'"))
                    })?;
                }
                let v = DVec3::from_array(coords);
                if !v.is_finite() {
                    return Err(SectionError::parse(line_no, "vertex coordinate is not finite"));
                }
                vertices.push(v);
            }
            Some("f") => {
                let face = parts
                    .map(|token| face_index(token, vertices.len(), line_no))
                    .collect::<SectionResult<Vec<u32>>>()?;
                if face.len() < 3 {
                    return Err(SectionError::parse(line_no, "face needs at least 3 vertices"));
                }
                for k in 1..face.len() - 1 {
                    triangles.push([face[0], face[k], face[k + 1]]);
                }
            }
            Some(other) => trace!("skipping OBJ record '{other}' at line {line_no}"),
            None => {}
        }
    }

    Mesh::from_parts(vertices, triangles)
}

/// Resolves one face token to a 0-based vertex index.
fn face_index(token: &str, vertex_count: usize, line_no: usize) -> SectionResult<u32> {
    let position = token.split('/').next().unwrap_or_default();
    let index: i64 = position
        .parse()
        .map_err(|_| SectionError::parse(line_no, format!("invalid face index '{token}'")))?;

    let resolved = match index {
        0 => None,
        i if i > 0 => Some(i - 1),
        i => Some(vertex_count as i64 + i),
    };

    match resolved {
        Some(i) if i >= 0 && (i as usize) < vertex_count => Ok(i as u32),
        _ => Err(SectionError::parse(
            line_no,
            format!("face index {index} out of range for {vertex_count} vertices"),
        )),
    }
}

/// Writes a mesh as OBJ `v`/`f` records.
pub fn write_obj<W: Write>(mesh: &Mesh, out: &mut W) -> SectionResult<()> {
    for v in mesh.vertices() {
        writeln!(out, "v {:?} {:?} {:?}", v.x, v.y, v.z)?;
    }
    // OBJ is 1-based
    for [a, b, c] in mesh.triangles() {
        writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

/// Writes a cross-section as OBJ `v`/`l` records.
///
/// Closed polylines are written with their repeated first point dropped and
/// the `l` record returning to the first index.
///
/// # Example
///
/// ```rust
/// use plane_section::{intersection_polylines, primitives::create_cone, Plane};
/// use plane_section::io::write_cross_section_obj;
/// use glam::DVec3;
///
/// let cone = create_cone(1.5, 0.5, DVec3::ZERO, 32).unwrap();
/// let plane = Plane::new(DVec3::ZERO, DVec3::Z).unwrap();
/// let section = intersection_polylines(&cone, &plane);
///
/// let mut out = Vec::new();
/// write_cross_section_obj(&section, &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 32);
/// assert_eq!(text.lines().filter(|l| l.starts_with("l ")).count(), 1);
/// ```
pub fn write_cross_section_obj<W: Write>(section: &CrossSection, out: &mut W) -> SectionResult<()> {
    let mut next = 1usize;

    for polyline in section.polylines() {
        let points = if polyline.is_closed() {
            &polyline.points()[..polyline.len() - 1]
        } else {
            polyline.points()
        };
        for p in points {
            writeln!(out, "v {:?} {:?} {:?}", p.x, p.y, p.z)?;
        }

        let mut record = String::from("l");
        for i in next..next + points.len() {
            record.push_str(&format!(" {i}"));
        }
        if polyline.is_closed() {
            record.push_str(&format!(" {next}"));
        }
        writeln!(out, "{record}")?;

        next += points.len();
    }
    Ok(())
}

/// Writes a mesh to an OBJ file.
pub fn save_obj<P: AsRef<Path>>(mesh: &Mesh, path: P) -> SectionResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut out)?;
    out.flush()?;
    Ok(())
}

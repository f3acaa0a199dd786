//! # STL
//!
//! Binary and ASCII stereolithography files. STL stores every facet with its
//! own three corners; reading welds corners with identical coordinates back
//! into shared vertices so that neighbouring facets share edges.
//!
//! Binary layout: 80-byte header, little-endian `u32` facet count, then per
//! facet a normal and three corners as `f32` triples plus a `u16` attribute.

use crate::error::{SectionError, SectionResult};
use crate::mesh::Mesh;
use glam::DVec3;
use log::{debug, trace};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Reads a mesh from a binary or ASCII STL file.
pub fn read_stl<P: AsRef<Path>>(path: P) -> SectionResult<Mesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let mesh = parse_stl(&bytes)?;
    debug!(
        "read {} vertices and {} triangles from {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        path.display()
    );
    Ok(mesh)
}

/// Parses STL bytes into a mesh, detecting binary or ASCII.
///
/// A file is binary when its size matches the facet count in its header, or
/// when it does not start with `solid`. Some exporters write `solid` into the
/// binary header, hence the size check first.
///
/// # Example
///
/// ```rust
/// use plane_section::io::parse_stl;
///
/// let text = "solid t\n\
///     facet normal 0 0 1\n outer loop\n\
///     vertex 0 0 0\n vertex 1 0 0\n vertex 0 1 0\n\
///     endloop\n endfacet\n\
///     facet normal 0 0 1\n outer loop\n\
///     vertex 1 0 0\n vertex 1 1 0\n vertex 0 1 0\n\
///     endloop\n endfacet\n\
///     endsolid t\n";
/// let mesh = parse_stl(text.as_bytes()).unwrap();
/// assert_eq!(mesh.triangle_count(), 2);
/// assert_eq!(mesh.vertex_count(), 4);
/// ```
pub fn parse_stl(bytes: &[u8]) -> SectionResult<Mesh> {
    if is_binary(bytes) {
        parse_binary(bytes)
    } else {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SectionError::invalid_mesh(format!("ASCII STL is not UTF-8: {e}")))?;
        parse_ascii(text)
    }
}

fn is_binary(bytes: &[u8]) -> bool {
    if let Some(count) = binary_facet_count(bytes) {
        if HEADER_LEN + 4 + count * FACET_LEN == bytes.len() {
            return true;
        }
    }
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    !bytes[start..].starts_with(b"solid")
}

fn binary_facet_count(bytes: &[u8]) -> Option<usize> {
    let raw = bytes.get(HEADER_LEN..HEADER_LEN + 4)?;
    let count = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    usize::try_from(count).ok()
}

fn parse_binary(bytes: &[u8]) -> SectionResult<Mesh> {
    let count = binary_facet_count(bytes)
        .ok_or_else(|| SectionError::invalid_mesh("binary STL is shorter than its header"))?;
    let expected = count
        .checked_mul(FACET_LEN)
        .and_then(|body| body.checked_add(HEADER_LEN + 4));
    if expected != Some(bytes.len()) {
        return Err(SectionError::invalid_mesh(format!(
            "binary STL declares {count} facets but holds {} bytes",
            bytes.len()
        )));
    }

    let mut welder = Welder::with_capacity(count);
    for (f, facet) in bytes[HEADER_LEN + 4..].chunks_exact(FACET_LEN).enumerate() {
        // Skip the stored normal; it is recomputed from the winding
        let mut corners = [0u32; 3];
        for (k, corner) in corners.iter_mut().enumerate() {
            let at = 12 + 12 * k;
            let p = DVec3::new(
                read_f32(facet, at),
                read_f32(facet, at + 4),
                read_f32(facet, at + 8),
            );
            if !p.is_finite() {
                return Err(SectionError::invalid_mesh(format!(
                    "facet {f} has a non-finite corner: {p:?}"
                )));
            }
            *corner = welder.weld(p)?;
        }
        welder.triangles.push(corners);
    }

    welder.finish()
}

#[inline]
fn read_f32(facet: &[u8], at: usize) -> f64 {
    let b = &facet[at..at + 4];
    f64::from(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn parse_ascii(source: &str) -> SectionResult<Mesh> {
    let mut welder = Welder::with_capacity(0);
    let mut corners: Vec<u32> = Vec::with_capacity(3);
    let mut in_facet = false;

    for (n, raw) in source.lines().enumerate() {
        let line_no = n + 1;
        let mut parts = raw.split_whitespace();

        match parts.next() {
            Some("facet") => {
                if in_facet {
                    return Err(SectionError::parse(line_no, "facet opened before endfacet"));
                }
                in_facet = true;
                corners.clear();
            }
            Some("vertex") => {
                if !in_facet {
                    return Err(SectionError::parse(line_no, "vertex outside a facet"));
                }
                let mut coords = [0.0; 3];
                for coord in &mut coords {
                    let token = parts
                        .next()
                        .ok_or_else(|| SectionError::parse(line_no, "vertex needs 3 coordinates"))?;
                    *coord = token.parse().map_err(|_| {
                        SectionError::parse(line_no, format!("invalid coordinate '{token}'"))
                    })?;
                }
                let p = DVec3::from_array(coords);
                if !p.is_finite() {
                    return Err(SectionError::parse(line_no, "vertex coordinate is not finite"));
                }
                corners.push(welder.weld(p)?);
            }
            Some("endfacet") => {
                let &[a, b, c] = corners.as_slice() else {
                    return Err(SectionError::parse(
                        line_no,
                        format!("facet has {} vertices, expected 3", corners.len()),
                    ));
                };
                welder.triangles.push([a, b, c]);
                in_facet = false;
            }
            Some("solid" | "endsolid" | "outer" | "endloop") | None => {}
            Some(other) => trace!("skipping STL keyword '{other}' at line {line_no}"),
        }
    }

    if in_facet {
        return Err(SectionError::invalid_mesh("ASCII STL ends inside a facet"));
    }
    welder.finish()
}

/// Merges facet corners with bit-identical coordinates.
struct Welder {
    ids: HashMap<[u64; 3], u32>,
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl Welder {
    fn with_capacity(facets: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(facets / 2),
            vertices: Vec::with_capacity(facets / 2),
            triangles: Vec::with_capacity(facets),
        }
    }

    fn weld(&mut self, p: DVec3) -> SectionResult<u32> {
        // Adding zero folds -0.0 into +0.0
        let key = p.to_array().map(|c| (c + 0.0).to_bits());
        if let Some(&id) = self.ids.get(&key) {
            return Ok(id);
        }
        let id = u32::try_from(self.vertices.len())
            .map_err(|_| SectionError::invalid_mesh("STL has more vertices than u32 indices allow"))?;
        self.ids.insert(key, id);
        self.vertices.push(p);
        Ok(id)
    }

    fn finish(self) -> SectionResult<Mesh> {
        Mesh::from_parts(self.vertices, self.triangles)
    }
}

fn facet_normal(mesh: &Mesh, [a, b, c]: [u32; 3]) -> DVec3 {
    let (a, b, c) = (mesh.vertex(a), mesh.vertex(b), mesh.vertex(c));
    (b - a).cross(c - a).normalize_or_zero()
}

/// Writes a mesh as ASCII STL.
///
/// Coordinates are printed in shortest round-trip form, so reading the file
/// back yields the same positions.
pub fn write_stl<W: Write>(mesh: &Mesh, out: &mut W) -> SectionResult<()> {
    writeln!(out, "solid mesh")?;
    for &tri in mesh.triangles() {
        let n = facet_normal(mesh, tri);
        writeln!(out, "  facet normal {:?} {:?} {:?}", n.x, n.y, n.z)?;
        writeln!(out, "    outer loop")?;
        for i in tri {
            let v = mesh.vertex(i);
            writeln!(out, "      vertex {:?} {:?} {:?}", v.x, v.y, v.z)?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }
    writeln!(out, "endsolid mesh")?;
    Ok(())
}

/// Writes a mesh as binary STL. Coordinates are narrowed to `f32`.
pub fn write_stl_binary<W: Write>(mesh: &Mesh, out: &mut W) -> SectionResult<()> {
    let count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        SectionError::invalid_mesh(format!(
            "{} triangles do not fit in a binary STL",
            mesh.triangle_count()
        ))
    })?;

    let mut header = [0u8; HEADER_LEN];
    let label = b"binary STL written by plane-section";
    header[..label.len()].copy_from_slice(label);
    out.write_all(&header)?;
    out.write_all(&count.to_le_bytes())?;

    for &tri in mesh.triangles() {
        let mut facet = [0u8; FACET_LEN];
        let points = [
            facet_normal(mesh, tri),
            mesh.vertex(tri[0]),
            mesh.vertex(tri[1]),
            mesh.vertex(tri[2]),
        ];
        for (k, p) in points.iter().enumerate() {
            for (c, value) in p.to_array().iter().enumerate() {
                let at = 12 * k + 4 * c;
                facet[at..at + 4].copy_from_slice(&(*value as f32).to_le_bytes());
            }
        }
        out.write_all(&facet)?;
    }
    Ok(())
}

/// Writes a mesh to an ASCII STL file.
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, path: P) -> SectionResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_stl(mesh, &mut out)?;
    out.flush()?;
    Ok(())
}

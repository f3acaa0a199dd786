//! # Plane Section CLI
//!
//! Subcommands over the `plane-section` library:
//!
//! ```text
//! sphere       --radius R [--segments N] --out FILE
//! cone         --radius R --height H [--segments N] --out FILE
//! scale        --mesh FILE --coef K --out FILE
//! is_intersect --mesh FILE --a A --b B --c C --d D [--out FILE]
//! ```
//!
//! Meshes are read and written as OBJ or STL, chosen by extension.
//! `is_intersect` prints `true` or `false` and exits with status 0 or 1; its
//! cut is written as OBJ polylines.

mod error;


pub use error::{CliError, CliResult};

use clap::{Parser, Subcommand};
use config::constants::DEFAULT_SEGMENTS;
use glam::DVec3;
use log::info;
use plane_section::io::{read_mesh, write_cross_section_obj, write_mesh, MeshFormat};
use plane_section::ops::scale_mesh;
use plane_section::primitives::{create_cone, create_sphere};
use plane_section::{intersection_polylines, intersects, Mesh, Plane};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Generate meshes and cut them with planes (OBJ/STL).
#[derive(Debug, Parser)]
#[command(name = "plane-section", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a sphere centred at the origin and save it
    Sphere {
        #[arg(long)]
        radius: f64,
        #[arg(long, default_value_t = DEFAULT_SEGMENTS)]
        segments: u32,
        #[arg(long)]
        out: PathBuf,
    },

    /// Generate a cone centred at the origin, apex along +Z, and save it
    Cone {
        #[arg(long)]
        radius: f64,
        #[arg(long)]
        height: f64,
        #[arg(long, default_value_t = DEFAULT_SEGMENTS)]
        segments: u32,
        #[arg(long)]
        out: PathBuf,
    },

    /// Scale a mesh uniformly around its centroid
    Scale {
        /// Input mesh (.obj or .stl)
        #[arg(long)]
        mesh: PathBuf,
        /// Uniform scaling coefficient
        #[arg(long, allow_negative_numbers = true)]
        coef: f64,
        /// Output mesh (.obj or .stl)
        #[arg(long)]
        out: PathBuf,
    },

    /// Check whether the plane ax + by + cz = d crosses the mesh
    #[command(name = "is_intersect")]
    IsIntersect {
        /// Input mesh (.obj or .stl)
        #[arg(long)]
        mesh: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        a: f64,
        #[arg(long, allow_negative_numbers = true)]
        b: f64,
        #[arg(long, allow_negative_numbers = true)]
        c: f64,
        #[arg(long, allow_negative_numbers = true)]
        d: f64,
        /// Cross-section output (.obj)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// How a successful subcommand ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Intersects,
    Misses,
}

impl Outcome {
    /// Process exit status: 1 when the plane misses the mesh, 0 otherwise.
    pub fn status(self) -> u8 {
        match self {
            Self::Misses => 1,
            Self::Done | Self::Intersects => 0,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.status())
    }
}

/// Runs one subcommand, printing its report to `stdout`.
pub fn run<W: Write>(cli: Cli, stdout: &mut W) -> CliResult<Outcome> {
    match cli.command {
        Command::Sphere {
            radius,
            segments,
            out,
        } => {
            let mesh = create_sphere(radius, DVec3::ZERO, segments)?;
            save(&mesh, &out)?;
            Ok(Outcome::Done)
        }

        Command::Cone {
            radius,
            height,
            segments,
            out,
        } => {
            let mesh = create_cone(height, radius, DVec3::ZERO, segments)?;
            save(&mesh, &out)?;
            Ok(Outcome::Done)
        }

        Command::Scale { mesh, coef, out } => {
            let input = read_mesh(&mesh)?;
            let scaled = scale_mesh(&input, coef, None)?;
            save(&scaled, &out)?;
            writeln!(stdout, "mesh was written to {}", out.display())?;
            Ok(Outcome::Done)
        }

        Command::IsIntersect {
            mesh,
            a,
            b,
            c,
            d,
            out,
        } => {
            let plane = Plane::from_coefficients(a, b, c, d)?;
            if let Some(path) = &out {
                if MeshFormat::from_path(path)? != MeshFormat::Obj {
                    return Err(CliError::CutFormat { path: path.clone() });
                }
            }

            let input = read_mesh(&mesh)?;
            let crossed = intersects(&input, &plane);
            writeln!(stdout, "{crossed}")?;

            if let Some(path) = &out {
                write_cut(&input, &plane, path)?;
            }
            Ok(if crossed {
                Outcome::Intersects
            } else {
                Outcome::Misses
            })
        }
    }
}

fn save(mesh: &Mesh, path: &Path) -> CliResult<()> {
    write_mesh(mesh, path)?;
    info!(
        "{} vertices and {} triangles written to {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        path.display()
    );
    Ok(())
}

/// Writes the cross-section, empty when the plane misses.
fn write_cut(mesh: &Mesh, plane: &Plane, path: &Path) -> CliResult<()> {
    let section = intersection_polylines(mesh, plane);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut out = BufWriter::new(File::create(path)?);
    write_cross_section_obj(&section, &mut out)?;
    out.flush()?;

    info!(
        "{} polylines with {} points written to {}",
        section.polylines().len(),
        section.point_count(),
        path.display()
    );
    Ok(())
}

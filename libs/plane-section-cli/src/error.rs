//! Errors surfaced by the command-line front end.

use plane_section::SectionError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors a subcommand can end with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Mesh, plane or file-format problem reported by the library
    #[error(transparent)]
    Section(#[from] SectionError),

    /// Cross-sections only have an OBJ form
    #[error("Cross-sections are written as OBJ polylines, not to {}", path.display())]
    CutFormat { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for subcommands.
pub type CliResult<T> = Result<T, CliError>;

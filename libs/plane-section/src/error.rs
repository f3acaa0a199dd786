//! # Section Errors
//!
//! Error types for mesh construction, plane construction and mesh I/O.
//!
//! Structural problems abort immediately. Geometric degeneracies met while
//! sectioning (zero-area triangles, non-manifold junctions) are resolved
//! locally and never show up here.

use thiserror::Error;

/// Errors that can occur while building inputs for a section query.
#[derive(Debug, Error)]
pub enum SectionError {
    /// Plane normal is zero or not finite
    #[error("Invalid plane: {message}")]
    InvalidPlane { message: String },

    /// Triangle references a missing vertex, or buffers are malformed
    #[error("Invalid mesh: {message}")]
    InvalidMesh { message: String },

    /// Out-of-range argument to a primitive or transform
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Malformed mesh file
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Underlying reader/writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SectionError {
    /// Creates an invalid plane error.
    pub fn invalid_plane(message: impl Into<String>) -> Self {
        Self::InvalidPlane {
            message: message.into(),
        }
    }

    /// Creates an invalid mesh error.
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for section operations.
pub type SectionResult<T> = Result<T, SectionError>;

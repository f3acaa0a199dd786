//! # Configuration Constants
//!
//! Centralized constants for plane/mesh sectioning.
//!
//! ## Categories
//!
//! - **Stitching**: tolerances used to merge intersection points
//! - **Degeneracy**: thresholds for skipping zero-area triangles
//! - **Parallelism**: chunking of the per-triangle scan
//! - **Tessellation**: defaults for the procedural primitives

use std::fmt;

// =============================================================================
// STITCHING CONSTANTS
// =============================================================================

/// Absolute part of the endpoint merge tolerance.
///
/// Two intersection points closer than
/// `STITCH_ABSOLUTE_TOLERANCE + STITCH_RELATIVE_TOLERANCE * extent` are
/// treated as the same polyline node.
///
/// # Example
///
/// ```rust
/// use config::constants::STITCH_ABSOLUTE_TOLERANCE;
/// assert!(STITCH_ABSOLUTE_TOLERANCE < 1e-6);
/// ```
pub const STITCH_ABSOLUTE_TOLERANCE: f64 = 1e-9;

/// Relative part of the endpoint merge tolerance.
///
/// Multiplied by the bounding-box diagonal of the mesh, so the merge distance
/// follows the size of the model and not its position. Translating a mesh
/// never changes which points merge.
///
/// # Example
///
/// ```rust
/// use config::constants::STITCH_RELATIVE_TOLERANCE;
///
/// let extent = 1.0e4;
/// let slack = STITCH_RELATIVE_TOLERANCE * extent;
/// assert!(slack < 1e-3);
/// ```
pub const STITCH_RELATIVE_TOLERANCE: f64 = 1e-9;

// =============================================================================
// DEGENERACY CONSTANTS
// =============================================================================

/// Sine threshold below which a triangle counts as zero-area.
///
/// A triangle with edges `e1`, `e2` from its first vertex is degenerate when
/// `|e1 x e2| <= DEGENERATE_SINE_EPSILON * |e1| * |e2|`. The test is
/// independent of the mesh units.
pub const DEGENERATE_SINE_EPSILON: f64 = 1e-12;

// =============================================================================
// PARALLELISM CONSTANTS
// =============================================================================

/// Number of triangles handled by one rayon task during the crossing scan.
///
/// # Example
///
/// ```rust
/// use config::constants::PARALLEL_CHUNK_TRIANGLES;
///
/// let triangles: usize = 10_000;
/// let chunks = triangles.div_ceil(PARALLEL_CHUNK_TRIANGLES);
/// assert!(chunks >= 1);
/// ```
pub const PARALLEL_CHUNK_TRIANGLES: usize = 2048;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default number of segments around sphere and cone circumferences.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SEGMENTS;
/// assert!(DEFAULT_SEGMENTS >= 12);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Minimum number of segments for any circular primitive.
pub const MIN_SEGMENTS: u32 = 3;

// =============================================================================
// SECTION CONFIG
// =============================================================================

/// Immutable snapshot of the tunables used by a sectioning query.
///
/// Fields are private: a `SectionConfig` only comes from
/// [`SectionConfig::new`] or [`Default`], so every instance holds valid
/// values.
///
/// # Examples
/// ```
/// use config::constants::SectionConfig;
/// let config = SectionConfig::default();
/// assert!(config.absolute_tolerance() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionConfig {
    /// Absolute endpoint merge tolerance.
    absolute_tolerance: f64,
    /// Relative endpoint merge tolerance, scaled by the mesh extent.
    relative_tolerance: f64,
    /// Triangles per parallel task, at least 1.
    chunk_size: usize,
}

impl SectionConfig {
    /// Builds a configuration, rejecting negative or non-finite tolerances,
    /// a tolerance pair that is zero in both parts, and an empty chunk size.
    ///
    /// # Examples
    /// ```
    /// use config::constants::SectionConfig;
    /// let cfg = SectionConfig::new(1.0e-6, 0.0, 512).expect("valid config");
    /// assert_eq!(cfg.chunk_size(), 512);
    /// ```
    pub fn new(
        absolute_tolerance: f64,
        relative_tolerance: f64,
        chunk_size: usize,
    ) -> Result<Self, ConfigError> {
        for tolerance in [absolute_tolerance, relative_tolerance] {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::InvalidTolerance(tolerance));
            }
        }
        if absolute_tolerance == 0.0 && relative_tolerance == 0.0 {
            return Err(ConfigError::InvalidTolerance(0.0));
        }
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            absolute_tolerance,
            relative_tolerance,
            chunk_size,
        })
    }

    /// Absolute endpoint merge tolerance.
    #[inline]
    pub fn absolute_tolerance(&self) -> f64 {
        self.absolute_tolerance
    }

    /// Relative endpoint merge tolerance.
    #[inline]
    pub fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }

    /// Triangles per parallel task, never zero.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Distance under which two points merge, for a mesh whose bounding-box
    /// diagonal is `extent`.
    ///
    /// # Examples
    /// ```
    /// use approx::assert_relative_eq;
    /// use config::constants::SectionConfig;
    /// let cfg = SectionConfig::new(1.0e-9, 1.0e-6, 64).unwrap();
    /// assert_relative_eq!(cfg.merge_distance(10.0), 1.0e-9 + 1.0e-5, max_relative = 1e-12);
    /// ```
    #[inline]
    pub fn merge_distance(&self, extent: f64) -> f64 {
        self.absolute_tolerance + self.relative_tolerance * extent.abs()
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            absolute_tolerance: STITCH_ABSOLUTE_TOLERANCE,
            relative_tolerance: STITCH_RELATIVE_TOLERANCE,
            chunk_size: PARALLEL_CHUNK_TRIANGLES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when a tolerance is negative, non-finite, or both parts are zero.
    InvalidTolerance(f64),
    /// Raised when the parallel chunk size is zero.
    InvalidChunkSize(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be finite and non-negative, and not all zero: {value}")
            }
            ConfigError::InvalidChunkSize(value) => {
                write!(f, "chunk_size must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

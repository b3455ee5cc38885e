//! # Conversion Errors
//!
//! Error types for the surface-to-tetrahedra pipeline.
//!
//! ## Error Policy
//!
//! - Geometric rejections inside search loops are plain `bool` results,
//!   never errors
//! - `CollapseExhausted` is recovered by the converter when a partial
//!   Delaunay result exists
//! - A failed final volume check is always fatal

use tetra_delaunay::DelaunayError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while converting a surface into tetrahedra.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Structurally invalid input surface
    #[error("Invalid input mesh: {message}")]
    Validation { message: String },

    /// Self-intersections survived preprocessing in strict mode
    #[error(
        "Boundary mesh still has {pairs} self-intersecting face pairs after preprocessing. \
         Disable fail_on_self_intersections to continue at your own risk."
    )]
    SelfIntersection { pairs: usize },

    /// The boundary collapse ran out of retries
    #[error("Boundary collapse failed after {retries} retries with {remaining_faces} faces left")]
    CollapseExhausted {
        retries: usize,
        remaining_faces: usize,
    },

    /// Boundary plus tetrahedra no longer match the source volume
    #[error("Volume invariant violated after {stage}: expected {expected}, got {actual}")]
    VolumeInvariant {
        stage: &'static str,
        expected: f64,
        actual: f64,
    },

    /// Error from the Delaunay primitive
    #[error("Delaunay error: {0}")]
    Delaunay(#[from] DelaunayError),
}

impl ConvertError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a volume invariant error.
    pub fn volume_invariant(stage: &'static str, expected: f64, actual: f64) -> Self {
        Self::VolumeInvariant {
            stage,
            expected,
            actual,
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

// =============================================================================
// TESTS
// =============================================================================

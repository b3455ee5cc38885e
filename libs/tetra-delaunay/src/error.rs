//! # Delaunay Errors
//!
//! Error types for the tetrahedralization primitive.

use thiserror::Error;

/// Errors that can occur while tetrahedralizing a point set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DelaunayError {
    /// Not enough points to span a tetrahedron
    #[error("Delaunay tetrahedralization requires at least 4 points, got {count}")]
    TooFewPoints { count: usize },

    /// Points are non-finite or span no volume
    #[error("Degenerate point set: {message}")]
    Degenerate { message: String },

    /// The insertion cavity could not be made star-shaped
    #[error("Cavity repair failed while inserting point {point}")]
    CavityRepair { point: usize },
}

impl DelaunayError {
    /// Creates a degenerate point set error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate {
            message: message.into(),
        }
    }
}

/// Result type alias for tetrahedralization.
pub type DelaunayResult<T> = Result<T, DelaunayError>;

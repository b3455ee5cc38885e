//! # Input Validation
//!
//! Structural checks on the raw input surface.

use config::constants::{MIN_CLOSED_FACES, MIN_CLOSED_VERTICES};
use glam::DVec3;

use crate::error::{ConvertError, ConvertResult};
use crate::types::Face;

/// Rejects surfaces that cannot possibly enclose a volume.
///
/// # Errors
///
/// Returns [`ConvertError::Validation`] when there are fewer than four
/// vertices or faces, a face index is out of range, a face repeats an index,
/// or a vertex coordinate is not finite.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh2tetra::{validation::validate_input, Face};
///
/// let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
/// let faces = vec![Face::new(0, 1, 2); 4];
/// assert!(validate_input(&vertices, &faces).is_err());
/// ```
pub fn validate_input(vertices: &[DVec3], faces: &[Face]) -> ConvertResult<()> {
    if vertices.len() < MIN_CLOSED_VERTICES {
        return Err(ConvertError::validation(
            "A closed 3D mesh requires at least 4 vertices.",
        ));
    }
    if faces.len() < MIN_CLOSED_FACES {
        return Err(ConvertError::validation(
            "A closed 3D mesh requires at least 4 faces.",
        ));
    }

    for (index, face) in faces.iter().enumerate() {
        if face.0.iter().any(|&v| v >= vertices.len()) {
            return Err(ConvertError::validation(format!(
                "Face {index} index is out of range."
            )));
        }
        if face.is_degenerate() {
            return Err(ConvertError::validation(format!(
                "Degenerate face {index} found."
            )));
        }
    }

    if let Some(index) = vertices.iter().position(|p| !p.is_finite()) {
        return Err(ConvertError::validation(format!(
            "Vertex {index} has a non-finite coordinate."
        )));
    }

    Ok(())
}

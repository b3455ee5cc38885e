//! # Boundary Preprocessing
//!
//! Repairs the input surface before any tetrahedra are built.
//!
//! ## Stages
//!
//! 1. Drop faces whose doubled area is at or below `epsilon`
//! 2. Cancel duplicate faces pairwise by canonical key
//! 3. Rewind inconsistent or inward surfaces
//! 4. Collapse vertices to remove self-intersections
//! 5. Fail on surviving self-intersections in strict mode

mod intersections;

#[cfg(test)]
mod tests;

use glam::DVec3;

use crate::error::{ConvertError, ConvertResult};
use crate::geometry::triangle_normal;
use crate::options::ConvertOptions;
use crate::predicates::{
    find_intersecting_face_pairs, has_orientation_imbalance, signed_face_mesh_volume,
};
use crate::topology::{cancel_duplicate_faces, flip_orientation};
use crate::types::Face;

pub use intersections::{resolve_intersections, IntersectionRepair};

/// Counts of what each preprocessing stage changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessReport {
    /// Faces dropped for near-zero area
    pub degenerate_removed: usize,
    /// Faces removed by duplicate cancellation
    pub duplicates_removed: usize,
    /// Global orientation flips applied
    pub orientation_flips: usize,
    /// Vertex collapses performed by intersection repair
    pub intersection_collapses: usize,
    /// Faces dropped by the last-resort intersection removal
    pub intersecting_faces_removed: usize,
    /// Intersecting face pairs left after preprocessing
    pub remaining_intersections: usize,
}

/// The repaired boundary and what was done to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    pub faces: Vec<Face>,
    pub report: PreprocessReport,
}

/// Runs every preprocessing stage enabled in `options`.
///
/// # Errors
///
/// Returns [`ConvertError::SelfIntersection`] when
/// `fail_on_self_intersections` is set and intersecting face pairs survive.
pub fn preprocess_boundary_faces(
    vertices: &[DVec3],
    faces: &[Face],
    options: &ConvertOptions,
) -> ConvertResult<Preprocessed> {
    let mut report = PreprocessReport::default();

    let mut result: Vec<Face> = faces
        .iter()
        .copied()
        .filter(|face| !is_degenerate_by_area(vertices, face, options.epsilon))
        .collect();
    report.degenerate_removed = faces.len() - result.len();

    let before = result.len();
    result = cancel_duplicate_faces(&result);
    report.duplicates_removed = before - result.len();

    if options.auto_fix_face_orientation {
        if has_orientation_imbalance(&result) {
            result = flip_orientation(&result);
            report.orientation_flips += 1;
        }
        // An all-inward shell is balanced but encloses negative volume
        if signed_face_mesh_volume(vertices, &result) < 0.0 {
            result = flip_orientation(&result);
            report.orientation_flips += 1;
        }
    }

    if options.auto_resolve_intersections {
        let repair = resolve_intersections(
            vertices,
            result,
            options.max_solve_intersection_iterations,
        );
        report.intersection_collapses = repair.collapses;
        report.intersecting_faces_removed = repair.faces_removed;
        result = repair.faces;
    }

    let pairs = find_intersecting_face_pairs(vertices, &result, None).len();
    report.remaining_intersections = pairs;
    if pairs > 0 {
        if options.fail_on_self_intersections {
            return Err(ConvertError::SelfIntersection { pairs });
        }
        log::warn!("Continuing with {pairs} self-intersecting face pairs");
    }

    log::debug!("Preprocessing: {report:?}");
    Ok(Preprocessed {
        faces: result,
        report,
    })
}

fn is_degenerate_by_area(vertices: &[DVec3], face: &Face, epsilon: f64) -> bool {
    let [a, b, c] = face.0.map(|v| vertices[v]);
    triangle_normal(a, b, c).length() <= epsilon
}

//! # Boundary Collapse
//!
//! Fills the residual volume left by the Delaunay phase by repeatedly
//! collapsing boundary vertices onto edge neighbours. Each collapse sweeps
//! the faces around the vertex into tetrahedra, shrinking the residual
//! surface until nothing is left.
//!
//! ## Algorithm
//!
//! ```text
//! V0 = boundary volume + tetrahedron volume
//! while boundary is not empty:
//!     for v in boundary vertices (reordered after a failed pass):
//!         for w in edge neighbours of v:
//!             commit the first collapse v -> w that passes every guard
//!     if nothing was committed:
//!         restart from the seed state with a new ordering
//!         give up after max_collapse_retries restarts
//! check tetrahedron volume == V0
//! ```

mod candidate;
mod ordering;
mod pockets;


use config::constants::volume_tolerance;
use glam::DVec3;

use crate::error::{ConvertError, ConvertResult};
use crate::options::ConvertOptions;
use crate::predicates::{face_mesh_volume, has_orientation_imbalance, tetra_mesh_volume};
use crate::topology::{ordered_vertices, vertex_neighbors};
use crate::types::{Face, Tetrahedron};

use candidate::CandidateCheck;

pub use ordering::{RetryOrdering, Rotate, SeededShuffle};

/// Working state of the collapse: residual boundary and tetrahedra so far.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapseState {
    pub boundary: Vec<Face>,
    pub tetrahedra: Vec<Tetrahedron>,
    /// Sum of absolute tetrahedron volumes
    pub tet_volume: f64,
    imbalanced: bool,
}

impl CollapseState {
    pub fn new(vertices: &[DVec3], boundary: Vec<Face>, tetrahedra: Vec<Tetrahedron>) -> Self {
        Self {
            tet_volume: tetra_mesh_volume(vertices, &tetrahedra),
            imbalanced: has_orientation_imbalance(&boundary),
            boundary,
            tetrahedra,
        }
    }
}

/// A completed collapse.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapseOutcome {
    /// Input tetrahedra followed by the ones created by the collapse
    pub tetrahedra: Vec<Tetrahedron>,
    /// Committed collapses of the pass that emptied the boundary
    pub steps: usize,
    /// Restarts after failed passes
    pub retries: usize,
    /// Four-face components converted directly
    pub pockets: usize,
}

/// Boundary collapse over one vertex array, with a pluggable retry ordering.
pub struct BoundaryCollapse<'a, R> {
    vertices: &'a [DVec3],
    options: &'a ConvertOptions,
    ordering: R,
}

impl<'a> BoundaryCollapse<'a, SeededShuffle> {
    /// Creates a collapse that shuffles candidates with `options.seed`.
    pub fn new(vertices: &'a [DVec3], options: &'a ConvertOptions) -> Self {
        Self::with_ordering(vertices, options, SeededShuffle::new(options.seed))
    }
}

impl<'a, R: RetryOrdering> BoundaryCollapse<'a, R> {
    pub fn with_ordering(vertices: &'a [DVec3], options: &'a ConvertOptions, ordering: R) -> Self {
        Self {
            vertices,
            options,
            ordering,
        }
    }

    /// Collapses `boundary` to nothing, adding tetrahedra to `existing`.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::CollapseExhausted`] when every restart fails
    /// - [`ConvertError::VolumeInvariant`] when the final tetrahedra do not
    ///   match the reference volume
    pub fn run(&mut self, boundary: &[Face], existing: &[Tetrahedron]) -> ConvertResult<CollapseOutcome> {
        let seed = CollapseState::new(self.vertices, boundary.to_vec(), existing.to_vec());
        let reference = face_mesh_volume(self.vertices, &seed.boundary) + seed.tet_volume;
        let check = CandidateCheck {
            vertices: self.vertices,
            epsilon: self.options.epsilon,
            reference_volume: reference,
            tolerance: volume_tolerance(self.options.volume_tolerance, reference),
        };

        let mut state = seed.clone();
        let mut steps = 0;
        let mut retries = 0;
        let mut stripped = 0;

        while !state.boundary.is_empty() {
            let mut candidates = ordered_vertices(&state.boundary);
            if retries > 0 {
                self.ordering.reorder(&mut candidates, retries);
            }

            if let Some(next) = find_collapse(&check, &state, &candidates) {
                state = next;
                steps += 1;
                continue;
            }

            if retries >= self.options.max_collapse_retries {
                return Err(ConvertError::CollapseExhausted {
                    retries,
                    remaining_faces: state.boundary.len(),
                });
            }
            retries += 1;
            log::debug!(
                "Collapse pass stuck with {} faces left, restarting (retry {retries})",
                state.boundary.len()
            );

            state = seed.clone();
            steps = 0;
            stripped = pockets::strip_pockets(self.vertices, &mut state, self.options.epsilon);
        }

        let actual = tetra_mesh_volume(self.vertices, &state.tetrahedra);
        if (actual - reference).abs() > check.tolerance {
            return Err(ConvertError::volume_invariant("boundary collapse", reference, actual));
        }

        Ok(CollapseOutcome {
            tetrahedra: state.tetrahedra,
            steps,
            retries,
            pockets: stripped,
        })
    }
}

/// Fills the volume enclosed by `boundary` on top of `existing` tetrahedra.
///
/// Retries shuffle candidates with a `StdRng` seeded from `options.seed`.
pub fn fill_residual_volume(
    vertices: &[DVec3],
    boundary: &[Face],
    existing: &[Tetrahedron],
    options: &ConvertOptions,
) -> ConvertResult<CollapseOutcome> {
    BoundaryCollapse::new(vertices, options).run(boundary, existing)
}

/// First passing collapse in candidate order.
fn find_collapse(check: &CandidateCheck<'_>, state: &CollapseState, candidates: &[usize]) -> Option<CollapseState> {
    candidates.iter().find_map(|&vertex| {
        vertex_neighbors(&state.boundary, vertex)
            .into_iter()
            .find_map(|target| check.try_collapse(state, vertex, target))
    })
}

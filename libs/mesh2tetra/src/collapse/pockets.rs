//! # Tetrahedral Pockets
//!
//! Closed four-face components of the residual boundary are tetrahedra
//! already; they are converted directly instead of being collapsed.

use glam::DVec3;

use super::CollapseState;
use crate::predicates::{has_orientation_imbalance, signed_face_mesh_volume, tetra_volume};
use crate::topology::{ordered_vertices, separate_face_objects};
use crate::types::{Face, Tetrahedron};

/// Replaces every tetrahedral pocket of the boundary with its tetrahedron.
///
/// Returns the number of pockets stripped.
pub(super) fn strip_pockets(vertices: &[DVec3], state: &mut CollapseState, epsilon: f64) -> usize {
    let mut boundary = Vec::with_capacity(state.boundary.len());
    let mut stripped = 0;

    for component in separate_face_objects(&state.boundary) {
        match pocket_tetrahedron(vertices, &component, epsilon) {
            Some(tet) => {
                state.tet_volume += tetra_volume(vertices, &tet);
                state.tetrahedra.push(tet);
                stripped += 1;
            }
            None => boundary.extend(component),
        }
    }

    state.boundary = boundary;
    state.imbalanced = has_orientation_imbalance(&state.boundary);
    stripped
}

/// The positively oriented tetrahedron bounded by `faces`, if they form an
/// outward-wound tetrahedron with volume above `epsilon`.
pub(super) fn pocket_tetrahedron(vertices: &[DVec3], faces: &[Face], epsilon: f64) -> Option<Tetrahedron> {
    if faces.len() != 4 || has_orientation_imbalance(faces) {
        return None;
    }
    let corners = ordered_vertices(faces);
    if corners.len() != 4 {
        return None;
    }

    let mut keys: Vec<_> = faces.iter().map(Face::canonical).collect();
    keys.sort_unstable();
    keys.dedup();
    if keys.len() != 4 || signed_face_mesh_volume(vertices, faces) <= epsilon {
        return None;
    }

    let [a, b, c] = faces[0].0;
    let d = corners.into_iter().find(|v| !faces[0].contains(*v))?;
    let tet = Tetrahedron::new(a, b, c, d);
    let volume = tetra_volume(vertices, &tet);
    if volume.abs() <= epsilon {
        return None;
    }
    Some(if volume < 0.0 { tet.inverted() } else { tet })
}

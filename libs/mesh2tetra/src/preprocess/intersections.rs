//! # Self-Intersection Repair
//!
//! Greedy vertex collapses that lower the number of intersecting face pairs,
//! with wholesale removal of intersecting faces as the last resort.

use config::constants::MIN_CLOSED_FACES;
use glam::DVec3;

use crate::predicates::{find_intersecting_face_pairs, has_mesh_intersections};
use crate::topology::{cancel_duplicate_faces, vertex_neighbors};
use crate::types::Face;

/// Outcome of [`resolve_intersections`].
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionRepair {
    pub faces: Vec<Face>,
    pub collapses: usize,
    pub faces_removed: usize,
}

/// Removes self-intersections where possible.
///
/// Each iteration tries to collapse every vertex of an intersecting face onto
/// each of its edge neighbours, in ascending vertex order, and commits the
/// first collapse that strictly lowers the intersecting pair count. Stops
/// when no intersections are left, no collapse helps, or after
/// `max_iterations`.
///
/// If intersections remain, every face still in an intersecting pair is
/// dropped; that result is kept only when at least four faces survive and
/// none of them intersect.
pub fn resolve_intersections(
    vertices: &[DVec3],
    faces: Vec<Face>,
    max_iterations: usize,
) -> IntersectionRepair {
    let mut faces = faces;
    let mut collapses = 0;

    for _ in 0..max_iterations {
        let pairs = find_intersecting_face_pairs(vertices, &faces, None);
        if pairs.is_empty() {
            break;
        }

        match best_collapse(vertices, &faces, &pairs) {
            Some(candidate) => {
                faces = candidate;
                collapses += 1;
            }
            None => break,
        }
    }

    let mut faces_removed = 0;
    let pairs = find_intersecting_face_pairs(vertices, &faces, None);
    if !pairs.is_empty() {
        let mut remove = vec![false; faces.len()];
        for (j, i) in pairs {
            remove[j] = true;
            remove[i] = true;
        }
        let filtered: Vec<Face> = faces
            .iter()
            .zip(&remove)
            .filter(|(_, &removed)| !removed)
            .map(|(face, _)| *face)
            .collect();

        if filtered.len() >= MIN_CLOSED_FACES && !has_mesh_intersections(vertices, &filtered) {
            faces_removed = faces.len() - filtered.len();
            log::debug!("Dropped {faces_removed} intersecting faces");
            faces = filtered;
        }
    }

    IntersectionRepair {
        faces,
        collapses,
        faces_removed,
    }
}

/// First collapse that strictly lowers the intersecting pair count.
fn best_collapse(vertices: &[DVec3], faces: &[Face], pairs: &[(usize, usize)]) -> Option<Vec<Face>> {
    let mut involved: Vec<usize> = pairs
        .iter()
        .flat_map(|&(j, i)| faces[j].0.into_iter().chain(faces[i].0))
        .collect();
    involved.sort_unstable();
    involved.dedup();

    for &vertex in &involved {
        for target in vertex_neighbors(faces, vertex) {
            let candidate = collapse_vertex(faces, vertex, target);
            if candidate.len() < MIN_CLOSED_FACES {
                continue;
            }
            if find_intersecting_face_pairs(vertices, &candidate, None).len() < pairs.len() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Replaces `from` with `to`, drops collapsed faces, and cancels duplicates.
pub(crate) fn collapse_vertex(faces: &[Face], from: usize, to: usize) -> Vec<Face> {
    let replaced: Vec<Face> = faces
        .iter()
        .map(|face| face.replace(from, to))
        .filter(|face| !face.is_degenerate())
        .collect();
    cancel_duplicate_faces(&replaced)
}

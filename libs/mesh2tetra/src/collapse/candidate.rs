//! # Collapse Candidates
//!
//! Builds the boundary that results from collapsing one vertex onto an edge
//! neighbour and decides whether that boundary is acceptable.
//!
//! ## Acceptance
//!
//! - Boundary volume plus tetrahedron volume still matches the reference
//! - No orientation imbalance is introduced
//! - The collapsed vertex lies above every face that sweeps a tetrahedron
//! - The new boundary is consistent: no same-winding duplicates, no flat or
//!   folded replacement faces, no new crossings, and no boundary vertex
//!   swallowed by a new tetrahedron

use std::collections::{HashMap, HashSet};

use config::constants::CORNER_EPSILON;
use glam::DVec3;

use super::CollapseState;
use crate::geometry::triangle_normal;
use crate::predicates::{
    barycentric_tetrahedron, check_move_inside, face_mesh_volume, has_orientation_imbalance,
    signed_tetra_volume, triangle_triangle_intersection,
};
use crate::topology::ordered_vertices;
use crate::types::{Face, FaceKey, Tetrahedron};

/// Fixed context for evaluating candidates of one collapse run.
#[derive(Debug, Clone, Copy)]
pub(super) struct CandidateCheck<'a> {
    pub vertices: &'a [DVec3],
    pub epsilon: f64,
    pub reference_volume: f64,
    pub tolerance: f64,
}

impl CandidateCheck<'_> {
    /// Collapses `from` onto `to`, returning the next state if it passes
    /// every guard.
    pub fn try_collapse(&self, state: &CollapseState, from: usize, to: usize) -> Option<CollapseState> {
        let apex = self.vertices[from];

        let mut pooled = Vec::with_capacity(state.boundary.len());
        let mut replacements = Vec::new();
        let mut swept = Vec::new();
        let mut slides = Vec::new();
        let mut tetrahedra = Vec::new();
        let mut added_volume = 0.0;

        for face in &state.boundary {
            if !face.contains(from) {
                pooled.push(*face);
                continue;
            }
            let replaced = face.replace(from, to);
            if replaced.is_degenerate() {
                continue;
            }

            let [a, b, c] = replaced.0.map(|v| self.vertices[v]);
            let volume = signed_tetra_volume(a, b, c, apex);
            if volume.abs() > self.epsilon {
                let [i, j, k] = replaced.0;
                let tet = Tetrahedron::new(i, j, k, from);
                tetrahedra.push(if volume < 0.0 { tet.inverted() } else { tet });
                added_volume += volume.abs();
                swept.push(replaced);
            } else {
                slides.push((*face, replaced));
            }
            replacements.push(replaced);
        }

        pooled.extend(replacements.iter().copied());
        let boundary = cancel_opposite_pairs(&pooled)?;

        let tet_volume = state.tet_volume + added_volume;
        let total = face_mesh_volume(self.vertices, &boundary) + tet_volume;
        if (total - self.reference_volume).abs() > self.tolerance {
            return None;
        }

        let imbalanced = has_orientation_imbalance(&boundary);
        if imbalanced && !state.imbalanced {
            return None;
        }

        if !check_move_inside(self.vertices, &swept, from) {
            return None;
        }

        let surviving: HashSet<FaceKey> = boundary.iter().map(Face::canonical).collect();
        let new_faces: Vec<Face> = replacements
            .iter()
            .filter(|f| surviving.contains(&f.canonical()))
            .copied()
            .collect();
        if !self.is_consistent(state, &boundary, &new_faces, &slides, &surviving, &tetrahedra) {
            return None;
        }

        let mut all_tetrahedra = state.tetrahedra.clone();
        all_tetrahedra.extend(tetrahedra);
        Some(CollapseState {
            boundary,
            tetrahedra: all_tetrahedra,
            tet_volume,
            imbalanced,
        })
    }

    fn is_consistent(
        &self,
        state: &CollapseState,
        boundary: &[Face],
        new_faces: &[Face],
        slides: &[(Face, Face)],
        surviving: &HashSet<FaceKey>,
        tetrahedra: &[Tetrahedron],
    ) -> bool {
        let normal = |face: &Face| {
            let [a, b, c] = face.0.map(|v| self.vertices[v]);
            triangle_normal(a, b, c)
        };

        if new_faces.iter().any(|f| normal(f).length() <= self.epsilon) {
            return false;
        }

        let folded = slides.iter().any(|(old, new)| {
            surviving.contains(&new.canonical()) && normal(old).dot(normal(new)) <= 0.0
        });
        if folded {
            return false;
        }

        !self.crosses_boundary(boundary, new_faces)
            && !self.swallows_vertex(&state.boundary, tetrahedra)
    }

    /// True when a new face intersects any other boundary face.
    fn crosses_boundary(&self, boundary: &[Face], new_faces: &[Face]) -> bool {
        let triangle = |face: &Face| face.0.map(|v| self.vertices[v]);
        new_faces.iter().any(|new| {
            let key = new.canonical();
            boundary
                .iter()
                .filter(|other| other.canonical() != key)
                .any(|other| triangle_triangle_intersection(triangle(new), triangle(other), true))
        })
    }

    /// True when a boundary vertex lies strictly inside a new tetrahedron.
    fn swallows_vertex(&self, boundary: &[Face], tetrahedra: &[Tetrahedron]) -> bool {
        if tetrahedra.is_empty() {
            return false;
        }
        let candidates = ordered_vertices(boundary);
        tetrahedra.iter().any(|tet| {
            let [a, b, c, d] = tet.0.map(|v| self.vertices[v]);
            candidates
                .iter()
                .filter(|&&v| !tet.0.contains(&v))
                .any(|&v| {
                    barycentric_tetrahedron(self.vertices[v], a, b, c, d)
                        .is_some_and(|l| l.iter().all(|&x| x > CORNER_EPSILON))
                })
        })
    }
}

/// Cancels faces sharing a canonical key with opposite winding.
///
/// Returns `None` when two same-winding copies of a face would survive.
/// Survivors keep the position of their key's first appearance.
pub(super) fn cancel_opposite_pairs(faces: &[Face]) -> Option<Vec<Face>> {
    let mut groups: Vec<Vec<Face>> = Vec::new();
    let mut slots: HashMap<FaceKey, usize> = HashMap::new();
    for face in faces {
        let slot = *slots.entry(face.canonical()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(*face);
    }

    let mut result = Vec::with_capacity(faces.len());
    for group in groups {
        let reference = group[0];
        let (forward, reverse): (Vec<Face>, Vec<Face>) =
            group.iter().copied().partition(|f| f.same_winding(&reference));
        match forward.len().abs_diff(reverse.len()) {
            0 => {}
            1 if forward.len() > reverse.len() => result.push(forward[0]),
            1 => result.push(reverse[0]),
            _ => return None,
        }
    }
    Some(result)
}

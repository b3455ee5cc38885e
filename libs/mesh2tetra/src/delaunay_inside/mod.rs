//! # Interior Delaunay Phase
//!
//! Fills as much of the enclosed volume as possible with Delaunay cells that
//! lie inside the boundary.
//!
//! ## Algorithm
//!
//! ```text
//! worklist = [(boundary, depth 0)]
//! while let Some((faces, depth)) = worklist.pop():
//!     for component in separate_face_objects(faces):
//!         cells = tetrahedralize(component vertices)
//!         keep cells whose centroid is inside and whose volume > epsilon
//!         accept iff volumes balance and the residual is intersection-free
//!         push (residual, depth + 1) while depth < max depth
//! ```

#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use config::constants::{volume_tolerance, MIN_CLOSED_FACES, MIN_CLOSED_VERTICES};
use glam::DVec3;
use tetra_delaunay::Tetrahedralizer;

use crate::geometry::centroid;
use crate::options::ConvertOptions;
use crate::predicates::{
    face_mesh_volume, has_mesh_intersections, point_inside_closed_mesh, tetra_mesh_volume,
    tetra_volume,
};
use crate::topology::{inside_points, remaining_faces, separate_face_objects, LocalMesh};
use crate::types::{Face, Tetrahedron};

/// Result of the interior Delaunay phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DelaunayPhase {
    /// Accepted tetrahedra, positively oriented, over global indices
    pub tetrahedra: Vec<Tetrahedron>,
    /// Boundary faces left uncovered, outward-wound around the residual volume
    pub remaining_faces: Vec<Face>,
}

/// A face set waiting to be tetrahedralized.
#[derive(Debug, Clone)]
struct WorkItem {
    faces: Vec<Face>,
    depth: usize,
}

/// Tetrahedra accepted for one component and the faces they leave uncovered.
#[derive(Debug, Clone)]
struct ComponentFill {
    tetrahedra: Vec<Tetrahedron>,
    remaining: Vec<Face>,
}

/// Runs the interior Delaunay phase over a repaired boundary.
///
/// Components whose cells cannot be validated are skipped and left to the
/// boundary collapse. Errors from the tetrahedralizer count as "no cells".
pub fn build<T: Tetrahedralizer + ?Sized>(
    tetrahedralizer: &T,
    vertices: &[DVec3],
    boundary: &[Face],
    options: &ConvertOptions,
) -> DelaunayPhase {
    let mut tetrahedra = Vec::new();
    let mut worklist = VecDeque::from([WorkItem {
        faces: boundary.to_vec(),
        depth: 0,
    }]);

    while let Some(item) = worklist.pop_front() {
        for component in separate_face_objects(&item.faces) {
            let Some(fill) = fill_component(tetrahedralizer, vertices, &component, options) else {
                continue;
            };
            log::debug!(
                "Depth {}: {} cells accepted, {} faces left",
                item.depth,
                fill.tetrahedra.len(),
                fill.remaining.len()
            );

            tetrahedra.extend(fill.tetrahedra);
            if !fill.remaining.is_empty() && item.depth < options.max_delaunay_recursion_depth {
                worklist.push_back(WorkItem {
                    faces: fill.remaining,
                    depth: item.depth + 1,
                });
            }
        }
    }

    let remaining_faces = remaining_faces(&tetrahedra, boundary);
    DelaunayPhase {
        tetrahedra,
        remaining_faces,
    }
}

/// Tetrahedralizes one connected component and validates the result.
fn fill_component<T: Tetrahedralizer + ?Sized>(
    tetrahedralizer: &T,
    vertices: &[DVec3],
    component: &[Face],
    options: &ConvertOptions,
) -> Option<ComponentFill> {
    let local = inside_points(vertices, component);
    if local.vertices.len() < MIN_CLOSED_VERTICES || local.faces.len() < MIN_CLOSED_FACES {
        return None;
    }

    let cells = match tetrahedralizer.tetrahedralize(&local.vertices, options.plane_distance_tolerance)
    {
        Ok(cells) => cells,
        Err(err) => {
            log::warn!("Skipping component of {} faces: {err}", local.faces.len());
            return None;
        }
    };

    let kept = interior_cells(&local, cells, options.epsilon);
    if kept.is_empty() {
        return None;
    }

    let remaining = remaining_faces(&kept, &local.faces);
    let boundary_volume = face_mesh_volume(&local.vertices, &local.faces);
    let filled = face_mesh_volume(&local.vertices, &remaining)
        + tetra_mesh_volume(&local.vertices, &kept);
    if (filled - boundary_volume).abs() > volume_tolerance(options.volume_tolerance, boundary_volume)
    {
        log::debug!("Rejected cells: covered {filled}, enclosed {boundary_volume}");
        return None;
    }
    if has_mesh_intersections(&local.vertices, &remaining) {
        log::debug!("Rejected cells: residual surface self-intersects");
        return None;
    }

    Some(ComponentFill {
        tetrahedra: kept.iter().map(|t| local.to_global(t)).collect(),
        remaining: remaining
            .iter()
            .map(|f| Face(f.0.map(|v| local.global_ids[v])))
            .collect(),
    })
}

/// Keeps cells inside the component surface with volume above `epsilon`,
/// oriented positively.
fn interior_cells(local: &LocalMesh, cells: Vec<[usize; 4]>, epsilon: f64) -> Vec<Tetrahedron> {
    let n = local.vertices.len();
    cells
        .into_iter()
        .filter(|cell| cell.iter().all(|&v| v < n))
        .map(Tetrahedron)
        .filter(|tet| {
            let corners = tet.0.map(|v| local.vertices[v]);
            point_inside_closed_mesh(centroid(&corners), &local.vertices, &local.faces)
        })
        .filter_map(|tet| {
            let volume = tetra_volume(&local.vertices, &tet);
            if volume.abs() <= epsilon {
                None
            } else if volume < 0.0 {
                Some(tet.inverted())
            } else {
                Some(tet)
            }
        })
        .collect()
}

//! # Geometric Predicates
//!
//! Volume, orientation, intersection, and containment tests over indexed
//! triangle and tetrahedron sets. All tests are floating point with the fixed
//! thresholds from `config::constants`.
//!
//! ## Submodules
//!
//! - [`intersection`]: triangle/triangle and face-pair intersection
//! - [`containment`]: ray parity, point-in-tetrahedron, circumspheres

pub mod containment;
pub mod intersection;


use std::collections::HashMap;

use config::constants::{NORMAL_EPSILON, PLANE_CONSISTENCY_TOLERANCE};
use glam::DVec3;

use crate::geometry::closest_point_on_plane;
use crate::types::{Face, Tetrahedron};

pub use containment::{
    barycentric_tetrahedron, check_inside_tetrahedron, point_in_tetrahedron,
    point_inside_closed_mesh, sphere_from_four_points,
};
pub use intersection::{
    find_intersecting_face_pairs, has_mesh_intersections, triangle_triangle_intersection,
};

// =============================================================================
// VOLUMES
// =============================================================================

/// Signed volume `(b - a) . ((c - a) x (d - a)) / 6`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh2tetra::predicates::signed_tetra_volume;
///
/// let v = signed_tetra_volume(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z);
/// assert!((v - 1.0 / 6.0).abs() < 1e-15);
/// ```
#[inline]
pub fn signed_tetra_volume(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> f64 {
    (b - a).dot((c - a).cross(d - a)) / 6.0
}

/// Signed volume of an indexed tetrahedron.
#[inline]
pub fn tetra_volume(vertices: &[DVec3], tet: &Tetrahedron) -> f64 {
    let [a, b, c, d] = tet.0.map(|v| vertices[v]);
    signed_tetra_volume(a, b, c, d)
}

/// Signed enclosed volume of a face set (divergence theorem).
///
/// Positive for a closed outward-wound surface.
pub fn signed_face_mesh_volume(vertices: &[DVec3], faces: &[Face]) -> f64 {
    faces
        .iter()
        .map(|face| {
            let [a, b, c] = face.0.map(|v| vertices[v]);
            a.dot(b.cross(c))
        })
        .sum::<f64>()
        / 6.0
}

/// Absolute enclosed volume of a face set.
///
/// Meaningful only for a closed surface.
#[inline]
pub fn face_mesh_volume(vertices: &[DVec3], faces: &[Face]) -> f64 {
    signed_face_mesh_volume(vertices, faces).abs()
}

/// Sum of absolute tetrahedron volumes.
pub fn tetra_mesh_volume(vertices: &[DVec3], tets: &[Tetrahedron]) -> f64 {
    tets.iter().map(|t| tetra_volume(vertices, t).abs()).sum()
}

// =============================================================================
// ORIENTATION
// =============================================================================

/// True when some directed edge is not matched by an equal number of
/// reverse-directed uses.
///
/// A consistently oriented closed surface uses every directed edge exactly as
/// often as its reverse.
pub fn has_orientation_imbalance(faces: &[Face]) -> bool {
    let mut edge_counts: HashMap<(usize, usize), usize> = HashMap::new();
    for face in faces {
        for edge in face.edges() {
            *edge_counts.entry(edge).or_insert(0) += 1;
        }
    }

    edge_counts.iter().any(|(&(a, b), &count)| {
        let reverse = edge_counts.get(&(b, a)).copied().unwrap_or(0);
        count != reverse
    })
}

/// Plane-consistency check for a collapsed vertex.
///
/// For every face in `new_faces` the vertex must lie off the face plane, on
/// the side its normal points to. Faces with a degenerate normal fail.
pub fn check_move_inside(vertices: &[DVec3], new_faces: &[Face], vertex: usize) -> bool {
    let p = vertices[vertex];
    new_faces.iter().all(|face| {
        let [a, b, c] = face.0.map(|v| vertices[v]);

        let normal = (a - c).cross(b - c);
        let normal_length = normal.length();
        if normal_length <= NORMAL_EPSILON {
            return false;
        }
        let normal = normal / normal_length;

        let offset = p - closest_point_on_plane(p, a, normal);
        let offset_length = offset.length();
        if offset_length <= NORMAL_EPSILON {
            return false;
        }

        (normal - offset / offset_length).length_squared() < PLANE_CONSISTENCY_TOLERANCE
    })
}

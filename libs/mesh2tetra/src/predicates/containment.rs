//! # Containment Tests
//!
//! Point-in-mesh ray parity, point-in-tetrahedron tests, and circumspheres.

use config::constants::{NORMAL_EPSILON, RAY_DIRECTION, RAY_EPSILON};
use glam::{DMat3, DVec3};

use super::signed_tetra_volume;
use crate::types::Face;

/// Ray-parity inside test against a closed face set.
///
/// Casts a ray along the fixed direction `RAY_DIRECTION` and counts the
/// faces it crosses; an odd count means inside. Winding is ignored.
pub fn point_inside_closed_mesh(p: DVec3, vertices: &[DVec3], faces: &[Face]) -> bool {
    let direction = DVec3::from_array(RAY_DIRECTION);
    let hits = faces
        .iter()
        .filter(|face| {
            let [a, b, c] = face.0.map(|v| vertices[v]);
            ray_hits_triangle(p, direction, a, b, c)
        })
        .count();
    hits % 2 == 1
}

/// Moller-Trumbore ray/triangle test; hits at or behind the origin are
/// ignored.
fn ray_hits_triangle(origin: DVec3, direction: DVec3, v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let p = direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < RAY_EPSILON {
        return false;
    }

    let inv_det = 1.0 / det;
    let t = origin - v0;
    let u = t.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let q = t.cross(e1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    e2.dot(q) * inv_det > RAY_EPSILON
}

/// Sub-volume test: `p` is inside when the four sub-tetrahedra volumes add up
/// to the whole within `eps`. Tetrahedra with volume `<= eps` contain nothing.
pub fn point_in_tetrahedron(p: DVec3, a: DVec3, b: DVec3, c: DVec3, d: DVec3, eps: f64) -> bool {
    let volume = signed_tetra_volume(a, b, c, d).abs();
    if volume <= eps {
        return false;
    }

    let parts = signed_tetra_volume(p, b, c, d).abs()
        + signed_tetra_volume(a, p, c, d).abs()
        + signed_tetra_volume(a, b, p, d).abs()
        + signed_tetra_volume(a, b, c, p).abs();
    (parts - volume).abs() <= eps
}

/// Barycentric coordinates of `p` with respect to `(a, b, c, d)`.
///
/// Returns `None` for a flat tetrahedron.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh2tetra::predicates::barycentric_tetrahedron;
///
/// let l = barycentric_tetrahedron(DVec3::splat(0.25), DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z)
///     .unwrap();
/// assert!((l.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// ```
pub fn barycentric_tetrahedron(p: DVec3, a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> Option<[f64; 4]> {
    let volume = signed_tetra_volume(a, b, c, d);
    if volume.abs() <= f64::EPSILON * (b - a).length() * (c - a).length() * (d - a).length() {
        return None;
    }

    Some([
        signed_tetra_volume(p, b, c, d) / volume,
        signed_tetra_volume(a, p, c, d) / volume,
        signed_tetra_volume(a, b, p, d) / volume,
        signed_tetra_volume(a, b, c, p) / volume,
    ])
}

/// True when every barycentric coordinate of `p` lies in `[0, 1]`.
pub fn check_inside_tetrahedron(p: DVec3, a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> bool {
    barycentric_tetrahedron(p, a, b, c, d)
        .is_some_and(|l| l.iter().all(|x| (0.0..=1.0).contains(x)))
}

/// Circumsphere through four points as `(center, radius)`.
///
/// Returns `None` when the points are coplanar.
pub fn sphere_from_four_points(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3) -> Option<(DVec3, f64)> {
    // Rows are 2 (p_i - p0); rhs is |p_i|^2 - |p0|^2.
    let rows = DMat3::from_cols((p1 - p0) * 2.0, (p2 - p0) * 2.0, (p3 - p0) * 2.0).transpose();
    let det = rows.determinant();
    if det.abs() <= NORMAL_EPSILON {
        return None;
    }

    let base = p0.length_squared();
    let rhs = DVec3::new(
        p1.length_squared() - base,
        p2.length_squared() - base,
        p3.length_squared() - base,
    );
    let center = rows.inverse() * rhs;
    Some((center, center.distance(p0)))
}

//! # Triangle Intersection
//!
//! Triangle/triangle intersection reduced to six segment/triangle tests, and
//! the all-pairs scan over a face set.
//!
//! ## Algorithm
//!
//! 1. Reject pairs whose bounding boxes are disjoint
//! 2. Intersect each edge of one triangle with the plane of the other
//! 3. Project the hit onto the dominant plane of the normal
//! 4. Accept when its barycentric coordinates fall in the inclusion band
//!
//! With `ignore_corners` the band shrinks to `[CORNER_EPSILON,
//! 1 - CORNER_EPSILON]` so faces that merely share a vertex or an edge do not
//! count as intersecting.

use config::constants::{
    BARYCENTRIC_DEGENERACY, CORNER_EPSILON, NORMAL_EPSILON, SEGMENT_DENOMINATOR_BIAS,
};
use glam::{DVec2, DVec3};

use crate::geometry::BoundingBox;
use crate::types::Face;

/// Tests two triangles for intersection.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh2tetra::predicates::triangle_triangle_intersection;
///
/// let a = [DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 2.0, 0.0)];
/// let b = [
///     DVec3::new(0.5, 0.5, -1.0),
///     DVec3::new(0.5, 0.5, 1.0),
///     DVec3::new(1.5, 0.2, 0.0),
/// ];
/// assert!(triangle_triangle_intersection(a, b, true));
/// ```
pub fn triangle_triangle_intersection(
    triangle_a: [DVec3; 3],
    triangle_b: [DVec3; 3],
    ignore_corners: bool,
) -> bool {
    if !BoundingBox::from_points(&triangle_a).overlaps(&BoundingBox::from_points(&triangle_b)) {
        return false;
    }

    let [p1, p2, p3] = triangle_a;
    let [o1, o2, o3] = triangle_b;
    segment_hits_triangle(triangle_a, o1, o2, ignore_corners)
        || segment_hits_triangle(triangle_a, o2, o3, ignore_corners)
        || segment_hits_triangle(triangle_a, o3, o1, ignore_corners)
        || segment_hits_triangle(triangle_b, p1, p2, ignore_corners)
        || segment_hits_triangle(triangle_b, p2, p3, ignore_corners)
        || segment_hits_triangle(triangle_b, p3, p1, ignore_corners)
}

/// Finds intersecting face pairs `(j, i)` with `j < i`.
///
/// Only faces `j < max_outer` are used as the outer face; `None` scans all.
/// Pairs of faces with the same canonical key are skipped.
pub fn find_intersecting_face_pairs(
    vertices: &[DVec3],
    faces: &[Face],
    max_outer: Option<usize>,
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let n = faces.len();
    if n <= 1 {
        return pairs;
    }
    let outer = max_outer.map_or(n - 1, |limit| limit.min(n - 1));

    let triangles: Vec<[DVec3; 3]> = faces.iter().map(|f| f.0.map(|v| vertices[v])).collect();
    let keys: Vec<_> = faces.iter().map(Face::canonical).collect();

    for j in 0..outer {
        for i in (j + 1)..n {
            if keys[i] == keys[j] {
                continue;
            }
            if triangle_triangle_intersection(triangles[i], triangles[j], true) {
                pairs.push((j, i));
            }
        }
    }

    pairs
}

/// True when any pair of faces intersects.
pub fn has_mesh_intersections(vertices: &[DVec3], faces: &[Face]) -> bool {
    let n = faces.len();
    for j in 0..n.saturating_sub(1) {
        let key_j = faces[j].canonical();
        let triangle_j = faces[j].0.map(|v| vertices[v]);
        for face in &faces[(j + 1)..] {
            if face.canonical() == key_j {
                continue;
            }
            if triangle_triangle_intersection(face.0.map(|v| vertices[v]), triangle_j, true) {
                return true;
            }
        }
    }
    false
}

/// Tests the segment `[p1, p2]` against a triangle.
fn segment_hits_triangle(triangle: [DVec3; 3], p1: DVec3, p2: DVec3, ignore_corners: bool) -> bool {
    if !BoundingBox::from_points(&triangle).overlaps(&BoundingBox::from_points(&[p1, p2])) {
        return false;
    }

    let [a, b, c] = triangle;
    let normal = (a - c).cross(b - c);
    let normal_length = normal.length();
    if normal_length <= NORMAL_EPSILON {
        return false;
    }
    let n = normal / normal_length;

    let direction = p2 - p1;
    let t = n.dot(c - p1) / (n.dot(direction) + SEGMENT_DENOMINATOR_BIAS);
    if !(0.0..=1.0).contains(&t) {
        return false;
    }
    let hit = p1 + direction * t;

    let (i, j) = dominant_plane(n);
    let project = |v: DVec3| DVec2::new(v[i], v[j]);
    inside_face(
        [project(a), project(b), project(c)],
        project(hit),
        ignore_corners,
    )
}

/// Picks the two coordinate axes to keep when projecting along `n`.
fn dominant_plane(n: DVec3) -> (usize, usize) {
    let abs = n.abs();
    if abs.x > abs.y {
        if abs.x > abs.z {
            (1, 2)
        } else {
            (0, 1)
        }
    } else if abs.y > abs.z {
        (0, 2)
    } else {
        (0, 1)
    }
}

/// 2D containment with the barycentric inclusion band.
fn inside_face(triangle: [DVec2; 3], r: DVec2, ignore_corners: bool) -> bool {
    let min = triangle[0].min(triangle[1]).min(triangle[2]);
    let max = triangle[0].max(triangle[1]).max(triangle[2]);
    if r.x < min.x || r.x > max.x || r.y < min.y || r.y > max.y {
        return false;
    }

    let Some(lambda) = barycentric_triangle(triangle, r) else {
        return false;
    };
    let (low, high) = if ignore_corners {
        (CORNER_EPSILON, 1.0 - CORNER_EPSILON)
    } else {
        (0.0, 1.0)
    };
    lambda.iter().all(|l| (low..=high).contains(l))
}

/// Barycentric coordinates of `r` in a 2D triangle; `None` when flat.
fn barycentric_triangle([v0, v1, v2]: [DVec2; 3], r: DVec2) -> Option<[f64; 3]> {
    let f12 = (v1.y - v2.y) * v0.x + (v2.x - v1.x) * v0.y + v1.x * v2.y - v2.x * v1.y;
    let f20 = (v2.y - v0.y) * v1.x + (v0.x - v2.x) * v1.y + v2.x * v0.y - v0.x * v2.y;
    let f01 = (v0.y - v1.y) * v2.x + (v1.x - v0.x) * v2.y + v0.x * v1.y - v1.x * v0.y;
    if [f12, f20, f01]
        .iter()
        .any(|f| f.abs() < BARYCENTRIC_DEGENERACY)
    {
        return None;
    }

    let l1 = ((v1.y - v2.y) * r.x + (v2.x - v1.x) * r.y + v1.x * v2.y - v2.x * v1.y) / f12;
    let l2 = ((v2.y - v0.y) * r.x + (v0.x - v2.x) * r.y + v2.x * v0.y - v0.x * v2.y) / f20;
    let l3 = ((v0.y - v1.y) * r.x + (v1.x - v0.x) * r.y + v0.x * v1.y - v1.x * v0.y) / f01;
    Some([l1, l2, l3])
}

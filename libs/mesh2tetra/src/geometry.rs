//! # Geometry Primitives
//!
//! Small vector helpers on top of `glam::DVec3`, plus the axis-aligned
//! bounding box used to reject triangle pairs early.

use glam::DVec3;

/// Unnormalized normal `(b - a) x (c - a)` of a triangle.
#[inline]
pub fn triangle_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a)
}

/// Area of a triangle.
#[inline]
pub fn triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    triangle_normal(a, b, c).length() * 0.5
}

/// Arithmetic mean of a set of points.
///
/// Returns `DVec3::ZERO` for an empty slice.
pub fn centroid(points: &[DVec3]) -> DVec3 {
    if points.is_empty() {
        return DVec3::ZERO;
    }
    points.iter().copied().sum::<DVec3>() / points.len() as f64
}

/// Orthogonal projection of `p` onto the plane through `origin` with the
/// given unit `normal`.
#[inline]
pub fn closest_point_on_plane(p: DVec3, origin: DVec3, normal: DVec3) -> DVec3 {
    p - normal * (p - origin).dot(normal)
}

/// Closest point to `p` on the segment `[a, b]`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh2tetra::geometry::closest_point_on_segment;
///
/// let q = closest_point_on_segment(DVec3::new(0.5, 1.0, 0.0), DVec3::ZERO, DVec3::X);
/// assert_eq!(q, DVec3::new(0.5, 0.0, 0.0));
/// ```
pub fn closest_point_on_segment(p: DVec3, a: DVec3, b: DVec3) -> DVec3 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    a + ab * t
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl BoundingBox {
    /// Creates a bounding box from min/max corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point.
    pub fn from_points(points: &[DVec3]) -> Self {
        points.iter().fold(
            Self::new(DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |bounds, p| Self::new(bounds.min.min(*p), bounds.max.max(*p)),
        )
    }

    /// Checks if this bounding box overlaps another (touching counts).
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

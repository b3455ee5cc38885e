//! # Mesh Value Types
//!
//! Oriented triangles and tetrahedra as index tuples into a caller-owned
//! vertex array. Vertices are never created or destroyed by the pipeline.

use serde::{Deserialize, Serialize};

/// Orientation-agnostic identity of a triangle: its sorted vertex indices.
pub type FaceKey = [usize; 3];

/// An oriented triangle.
///
/// The winding `(a, b, c)` defines the normal `(b - a) x (c - a)`. Boundary
/// faces are wound so that this normal points out of the enclosed volume.
///
/// # Example
///
/// ```rust
/// use mesh2tetra::Face;
///
/// let face = Face::new(4, 1, 7);
/// assert_eq!(face.canonical(), [1, 4, 7]);
/// assert_eq!(face.flipped().canonical(), face.canonical());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face(pub [usize; 3]);

impl Face {
    /// Creates a face from three vertex indices.
    #[inline]
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self([a, b, c])
    }

    /// Returns the vertex indices.
    #[inline]
    pub const fn vertices(&self) -> [usize; 3] {
        self.0
    }

    /// Sorted index triple used as a lookup key.
    #[inline]
    pub fn canonical(&self) -> FaceKey {
        let mut key = self.0;
        key.sort_unstable();
        key
    }

    /// The same triangle with reversed winding.
    #[inline]
    pub const fn flipped(&self) -> Self {
        let [a, b, c] = self.0;
        Self([c, b, a])
    }

    /// True when an index repeats.
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.0;
        a == b || b == c || a == c
    }

    /// True when `vertex` is one of the corners.
    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        self.0.contains(&vertex)
    }

    /// Directed edges in winding order.
    #[inline]
    pub const fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.0;
        [(a, b), (b, c), (c, a)]
    }

    /// True when `other` is a cyclic rotation of this face.
    #[inline]
    pub fn same_winding(&self, other: &Face) -> bool {
        let [a, b, c] = self.0;
        other.0 == [a, b, c] || other.0 == [b, c, a] || other.0 == [c, a, b]
    }

    /// Replaces every occurrence of `from` with `to`.
    #[inline]
    pub fn replace(&self, from: usize, to: usize) -> Self {
        Self(self.0.map(|v| if v == from { to } else { v }))
    }
}

impl From<[usize; 3]> for Face {
    fn from(vertices: [usize; 3]) -> Self {
        Self(vertices)
    }
}

/// A tetrahedron as four vertex indices.
///
/// Tetrahedra produced by the converter always have positive signed volume
/// `(b - a) . ((c - a) x (d - a)) / 6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetrahedron(pub [usize; 4]);

impl Tetrahedron {
    /// Creates a tetrahedron from four vertex indices.
    #[inline]
    pub const fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self([a, b, c, d])
    }

    /// Returns the vertex indices.
    #[inline]
    pub const fn vertices(&self) -> [usize; 4] {
        self.0
    }

    /// The four faces, outward-wound when the signed volume is positive.
    #[inline]
    pub const fn faces(&self) -> [Face; 4] {
        let [a, b, c, d] = self.0;
        [
            Face([c, b, a]),
            Face([b, d, a]),
            Face([d, c, a]),
            Face([d, b, c]),
        ]
    }

    /// Sorted index quadruple.
    #[inline]
    pub fn canonical(&self) -> [usize; 4] {
        let mut key = self.0;
        key.sort_unstable();
        key
    }

    /// Swaps two vertices, reversing the orientation.
    #[inline]
    pub const fn inverted(&self) -> Self {
        let [a, b, c, d] = self.0;
        Self([b, a, c, d])
    }

    /// True when the four indices are pairwise distinct.
    pub fn has_distinct_vertices(&self) -> bool {
        let key = self.canonical();
        key.windows(2).all(|pair| pair[0] != pair[1])
    }
}

impl From<[usize; 4]> for Tetrahedron {
    fn from(vertices: [usize; 4]) -> Self {
        Self(vertices)
    }
}

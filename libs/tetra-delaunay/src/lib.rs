//! # Tetra Delaunay
//!
//! Delaunay tetrahedralization of 3D point sets, used as a black-box
//! primitive by the surface-to-tetrahedra pipeline.
//!
//! ## Architecture
//!
//! ```text
//! points (DVec3) → Tetrahedralizer → cells [usize; 4]
//! ```
//!
//! ## Algorithms
//!
//! - **Bowyer-Watson**: incremental insertion with exact `orient3d` /
//!   `insphere` predicates from the `robust` crate
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use tetra_delaunay::{BowyerWatson, Tetrahedralizer};
//!
//! let points = vec![
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//!     DVec3::new(0.0, 0.0, 1.0),
//! ];
//! let cells = BowyerWatson.tetrahedralize(&points, 1e-10)?;
//! assert_eq!(cells.len(), 1);
//! # Ok::<(), tetra_delaunay::DelaunayError>(())
//! ```

pub mod bowyer_watson;
pub mod error;


pub use bowyer_watson::tetrahedralize;
pub use error::{DelaunayError, DelaunayResult};

use glam::DVec3;

/// A point-set tetrahedralization primitive.
///
/// Implementations return 4-point cells indexing `points`; no ordering of the
/// cells or of the vertices within a cell is guaranteed.
pub trait Tetrahedralizer {
    /// Tetrahedralizes `points`, treating points within
    /// `plane_distance_tolerance` of a plane as lying on it.
    fn tetrahedralize(
        &self,
        points: &[DVec3],
        plane_distance_tolerance: f64,
    ) -> DelaunayResult<Vec<[usize; 4]>>;
}

/// Incremental Bowyer-Watson tetrahedralizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BowyerWatson;

impl Tetrahedralizer for BowyerWatson {
    fn tetrahedralize(
        &self,
        points: &[DVec3],
        plane_distance_tolerance: f64,
    ) -> DelaunayResult<Vec<[usize; 4]>> {
        bowyer_watson::tetrahedralize(points, plane_distance_tolerance)
    }
}

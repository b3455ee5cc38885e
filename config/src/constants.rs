//! # Configuration Constants
//!
//! Centralized constants for the surface-to-tetrahedra pipeline. Default
//! tolerances, search limits, and the fixed probing directions used by the
//! geometric predicates are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Degeneracy and volume tolerances
//! - **Predicates**: Fixed thresholds inside intersection and containment tests
//! - **Limits**: Caps that bound every search loop
//! - **Randomness**: Default seed for the collapse retry ordering

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Default degeneracy threshold.
///
/// Faces whose doubled area is at or below this value are dropped during
/// preprocessing, and tetrahedra whose absolute volume is at or below it are
/// never emitted.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// let sliver_volume = 1e-12;
/// assert!(sliver_volume <= EPSILON);
/// ```
pub const EPSILON: f64 = 1e-8;

/// Default coplanarity tolerance handed to the Delaunay primitive.
///
/// A point closer than this distance to a cavity face is treated as lying on
/// that face during insertion.
pub const PLANE_DISTANCE_TOLERANCE: f64 = 1e-10;

/// Default tolerance for the volume invariant.
///
/// Acts as an absolute tolerance for small solids and is scaled by the
/// reference volume once that volume exceeds one unit.
///
/// # Example
///
/// ```rust
/// use config::constants::{volume_tolerance, VOLUME_TOLERANCE};
///
/// assert_eq!(volume_tolerance(VOLUME_TOLERANCE, 0.5), VOLUME_TOLERANCE);
/// assert_eq!(volume_tolerance(VOLUME_TOLERANCE, 100.0), VOLUME_TOLERANCE * 100.0);
/// ```
pub const VOLUME_TOLERANCE: f64 = 1e-8;

// =============================================================================
// PREDICATE CONSTANTS
// =============================================================================

/// Ray direction for the point-in-mesh parity test.
///
/// Deliberately not aligned with any axis or common diagonal so that rays
/// rarely graze edges or run parallel to axis-aligned faces.
pub const RAY_DIRECTION: [f64; 3] = [1.0, 0.137, 0.071];

/// Determinant and hit-distance guard for ray/triangle intersection.
pub const RAY_EPSILON: f64 = 1e-12;

/// Normals shorter than this are treated as degenerate.
pub const NORMAL_EPSILON: f64 = 1e-12;

/// Added to the segment/plane denominator to avoid division by zero.
pub const SEGMENT_DENOMINATOR_BIAS: f64 = 1e-16;

/// Barycentric denominators below this magnitude mark a flat projection.
pub const BARYCENTRIC_DEGENERACY: f64 = 1e-16;

/// Width of the barycentric band ignored around triangle corners and edges
/// when adjacent faces are tested for intersection.
///
/// # Example
///
/// ```rust
/// use config::constants::CORNER_EPSILON;
///
/// let on_shared_edge = 0.0;
/// assert!(on_shared_edge < CORNER_EPSILON);
/// ```
pub const CORNER_EPSILON: f64 = 1e-8;

/// Squared tolerance between a face normal and the direction towards a
/// collapsed vertex in the plane-consistency check.
pub const PLANE_CONSISTENCY_TOLERANCE: f64 = 1e-5;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum worklist depth of the interior Delaunay phase.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_DELAUNAY_RECURSION_DEPTH;
///
/// let depth = 3;
/// assert!(depth < MAX_DELAUNAY_RECURSION_DEPTH);
/// ```
pub const MAX_DELAUNAY_RECURSION_DEPTH: usize = 8;

/// Maximum iterations of the preprocessing self-intersection repair.
pub const MAX_SOLVE_INTERSECTION_ITERATIONS: usize = 10;

/// Maximum failed passes of the boundary collapse before it gives up.
pub const MAX_COLLAPSE_RETRIES: usize = 8;

/// Minimum number of faces for a closed surface (a tetrahedron).
pub const MIN_CLOSED_FACES: usize = 4;

/// Minimum number of vertices for a closed surface (a tetrahedron).
pub const MIN_CLOSED_VERTICES: usize = 4;

/// Scale of the enclosing simplex used by the Delaunay primitive, relative to
/// the bounding box extent of the input points.
pub const SUPER_SIMPLEX_SCALE: f64 = 1e3;

// =============================================================================
// RANDOMNESS
// =============================================================================

/// Default seed for the collapse retry ordering.
pub const DEFAULT_SEED: u64 = 0x5EED_7E7A;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Returns the volume tolerance for a given reference volume.
///
/// # Example
///
/// ```rust
/// use config::constants::volume_tolerance;
///
/// assert_eq!(volume_tolerance(1e-8, 2.0), 2e-8);
/// ```
#[inline]
pub fn volume_tolerance(tolerance: f64, reference_volume: f64) -> f64 {
    tolerance * reference_volume.abs().max(1.0)
}

/// Checks if two volumes agree within the volume tolerance for `expected`.
///
/// # Example
///
/// ```rust
/// use config::constants::{volumes_match, VOLUME_TOLERANCE};
///
/// assert!(volumes_match(1.0, 1.0 + 1e-10, VOLUME_TOLERANCE));
/// assert!(!volumes_match(1.0, 1.1, VOLUME_TOLERANCE));
/// ```
#[inline]
pub fn volumes_match(expected: f64, actual: f64, tolerance: f64) -> bool {
    (expected - actual).abs() <= volume_tolerance(tolerance, expected)
}

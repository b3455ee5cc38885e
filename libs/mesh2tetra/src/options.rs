//! # Conversion Options
//!
//! Recognised options with their defaults. Every default comes from the
//! `config` crate so tolerances live in one place.

use config::constants::{
    DEFAULT_SEED, EPSILON, MAX_COLLAPSE_RETRIES, MAX_DELAUNAY_RECURSION_DEPTH,
    MAX_SOLVE_INTERSECTION_ITERATIONS, PLANE_DISTANCE_TOLERANCE, VOLUME_TOLERANCE,
};
use serde::{Deserialize, Serialize};

/// Options controlling validation, repair, and the fill phases.
///
/// # Example
///
/// ```rust
/// use mesh2tetra::ConvertOptions;
///
/// let options = ConvertOptions::default()
///     .with_verbose(true)
///     .with_seed(42);
/// assert!(options.fail_on_self_intersections);
/// assert_eq!(options.seed, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Log stage summaries at `info` instead of `debug`
    pub verbose: bool,
    /// Run structural validation before anything else
    ///
    /// When disabled the faces must only reference existing vertices; an
    /// out-of-range index panics while indexing the vertex slice.
    pub check_input: bool,
    /// Rewind inconsistently or inward oriented surfaces
    pub auto_fix_face_orientation: bool,
    /// Try to collapse away self-intersections
    pub auto_resolve_intersections: bool,
    /// Fail if self-intersections survive preprocessing
    pub fail_on_self_intersections: bool,
    /// Degeneracy threshold for face areas and tetrahedron volumes
    pub epsilon: f64,
    /// Coplanarity tolerance passed to the Delaunay primitive
    pub plane_distance_tolerance: f64,
    /// Worklist depth cap of the interior Delaunay phase
    pub max_delaunay_recursion_depth: usize,
    /// Iteration cap of the self-intersection repair
    pub max_solve_intersection_iterations: usize,
    /// Volume invariant tolerance, scaled by volumes above one unit
    pub volume_tolerance: f64,
    /// Failed collapse passes allowed before giving up
    pub max_collapse_retries: usize,
    /// Seed of the collapse retry ordering
    pub seed: u64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            check_input: true,
            auto_fix_face_orientation: true,
            auto_resolve_intersections: true,
            fail_on_self_intersections: true,
            epsilon: EPSILON,
            plane_distance_tolerance: PLANE_DISTANCE_TOLERANCE,
            max_delaunay_recursion_depth: MAX_DELAUNAY_RECURSION_DEPTH,
            max_solve_intersection_iterations: MAX_SOLVE_INTERSECTION_ITERATIONS,
            volume_tolerance: VOLUME_TOLERANCE,
            max_collapse_retries: MAX_COLLAPSE_RETRIES,
            seed: DEFAULT_SEED,
        }
    }
}

impl ConvertOptions {
    /// Sets verbose logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enables or disables input validation.
    pub fn with_check_input(mut self, check_input: bool) -> Self {
        self.check_input = check_input;
        self
    }

    /// Enables or disables orientation repair.
    pub fn with_auto_fix_face_orientation(mut self, enabled: bool) -> Self {
        self.auto_fix_face_orientation = enabled;
        self
    }

    /// Enables or disables self-intersection repair.
    pub fn with_auto_resolve_intersections(mut self, enabled: bool) -> Self {
        self.auto_resolve_intersections = enabled;
        self
    }

    /// Sets strict handling of remaining self-intersections.
    pub fn with_fail_on_self_intersections(mut self, enabled: bool) -> Self {
        self.fail_on_self_intersections = enabled;
        self
    }

    /// Sets the degeneracy threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the coplanarity tolerance of the Delaunay primitive.
    pub fn with_plane_distance_tolerance(mut self, tolerance: f64) -> Self {
        self.plane_distance_tolerance = tolerance;
        self
    }

    /// Sets the Delaunay worklist depth cap.
    pub fn with_max_delaunay_recursion_depth(mut self, depth: usize) -> Self {
        self.max_delaunay_recursion_depth = depth;
        self
    }

    /// Sets the self-intersection repair iteration cap.
    pub fn with_max_solve_intersection_iterations(mut self, iterations: usize) -> Self {
        self.max_solve_intersection_iterations = iterations;
        self
    }

    /// Sets the volume invariant tolerance.
    pub fn with_volume_tolerance(mut self, tolerance: f64) -> Self {
        self.volume_tolerance = tolerance;
        self
    }

    /// Sets the collapse retry cap.
    pub fn with_max_collapse_retries(mut self, retries: usize) -> Self {
        self.max_collapse_retries = retries;
        self
    }

    /// Sets the retry ordering seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

//! # Config Crate
//!
//! Centralized configuration constants for the surface-to-tetrahedra
//! pipeline. All tolerances, search caps and fixed predicate parameters are
//! defined here so the geometry crates never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, MAX_DELAUNAY_RECURSION_DEPTH};
//!
//! let degenerate_area = 1e-12;
//! assert!(degenerate_area <= EPSILON);
//! assert!(MAX_DELAUNAY_RECURSION_DEPTH > 0);
//! ```

pub mod constants;

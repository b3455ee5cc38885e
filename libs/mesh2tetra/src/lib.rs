//! # Mesh2Tetra
//!
//! Converts a closed, outward-wound triangle surface into a set of
//! positively oriented tetrahedra whose union fills the enclosed volume.
//! Output tetrahedra only use the input vertices.
//!
//! ## Architecture
//!
//! ```text
//! vertices + faces
//!     → validation      (structural checks)
//!     → preprocess      (degenerates, duplicates, orientation, intersections)
//!     → delaunay_inside (interior cells per component)
//!     → collapse        (residual cavity by boundary collapse)
//!     → Conversion
//! ```
//!
//! ## Modules
//!
//! - **types**: [`Face`] and [`Tetrahedron`] index records
//! - **geometry**: triangle and plane helpers over `glam::DVec3`
//! - **predicates**: volumes, orientation, intersection and containment tests
//! - **topology**: face components, adjacency, remaining faces
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use mesh2tetra::{convert, ConvertOptions, Face};
//!
//! let vertices = vec![
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//!     DVec3::new(0.0, 0.0, 1.0),
//! ];
//! let faces = [[2, 1, 0], [1, 3, 0], [3, 2, 0], [3, 1, 2]].map(Face::from);
//!
//! let conversion = convert(&vertices, &faces, &ConvertOptions::default())?;
//! assert_eq!(conversion.tetrahedra.len(), 1);
//! # Ok::<(), mesh2tetra::ConvertError>(())
//! ```

pub mod collapse;
pub mod converter;
pub mod delaunay_inside;
pub mod error;
pub mod geometry;
pub mod options;
pub mod predicates;
pub mod preprocess;
pub mod topology;
pub mod types;
pub mod validation;

pub use converter::{convert, Completeness, Conversion, ConversionStats, Converter};
pub use error::{ConvertError, ConvertResult};
pub use options::ConvertOptions;
pub use tetra_delaunay::{BowyerWatson, Tetrahedralizer};
pub use types::{Face, FaceKey, Tetrahedron};

//! # Converter
//!
//! Entry point of the pipeline:
//!
//! ```text
//! validate → preprocess → Delaunay phase → boundary collapse → tetrahedra
//! ```
//!
//! A collapse that runs out of retries falls back to the Delaunay tetrahedra
//! when there are any, and the result is marked partial.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tetra_delaunay::{BowyerWatson, Tetrahedralizer};

use config::constants::volumes_match;

use crate::collapse::fill_residual_volume;
use crate::delaunay_inside;
use crate::error::{ConvertError, ConvertResult};
use crate::options::ConvertOptions;
use crate::predicates::{face_mesh_volume, tetra_mesh_volume};
use crate::preprocess::preprocess_boundary_faces;
use crate::types::{Face, Tetrahedron};
use crate::validation::validate_input;

/// Whether the tetrahedra fill the whole enclosed volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Completeness {
    /// The boundary collapse finished; the tetrahedra fill the volume
    Complete,
    /// Only the Delaunay tetrahedra are returned
    Partial { reason: String },
}

/// Pipeline counters for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Volume enclosed by the repaired boundary
    pub source_volume: f64,
    /// Volume of the returned tetrahedra
    pub output_volume: f64,
    pub boundary_faces: usize,
    pub delaunay_tetrahedra: usize,
    pub residual_faces: usize,
    pub collapse_steps: usize,
    pub collapse_retries: usize,
    /// Tetrahedral pockets converted directly after a restart
    pub collapse_pockets: usize,
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Positively oriented tetrahedra over the input vertex indices
    pub tetrahedra: Vec<Tetrahedron>,
    pub completeness: Completeness,
    pub stats: ConversionStats,
}

impl Conversion {
    /// True when the tetrahedra fill the whole volume.
    pub fn is_complete(&self) -> bool {
        self.completeness == Completeness::Complete
    }
}

/// Converts a closed triangle surface into tetrahedra with the default
/// Delaunay primitive.
///
/// # Errors
///
/// See [`Converter::convert`].
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh2tetra::{convert, ConvertOptions, Tetrahedron};
///
/// let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
/// let faces = Tetrahedron::new(0, 1, 2, 3).faces();
///
/// let conversion = convert(&vertices, &faces, &ConvertOptions::default())?;
/// assert_eq!(conversion.tetrahedra.len(), 1);
/// assert!(conversion.is_complete());
/// # Ok::<(), mesh2tetra::ConvertError>(())
/// ```
pub fn convert(vertices: &[DVec3], faces: &[Face], options: &ConvertOptions) -> ConvertResult<Conversion> {
    Converter::new().convert(vertices, faces, options)
}

/// The conversion pipeline over a chosen Delaunay primitive.
#[derive(Debug, Clone, Default)]
pub struct Converter<T = BowyerWatson> {
    tetrahedralizer: T,
}

impl Converter<BowyerWatson> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Tetrahedralizer> Converter<T> {
    /// Creates a converter over a custom Delaunay primitive.
    pub fn with_tetrahedralizer(tetrahedralizer: T) -> Self {
        Self { tetrahedralizer }
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::Validation`] for structurally invalid input
    /// - [`ConvertError::SelfIntersection`] in strict mode
    /// - [`ConvertError::CollapseExhausted`] when the collapse fails and the
    ///   Delaunay phase produced nothing to fall back on
    /// - [`ConvertError::VolumeInvariant`] when the result does not match the
    ///   source volume
    pub fn convert(
        &self,
        vertices: &[DVec3],
        faces: &[Face],
        options: &ConvertOptions,
    ) -> ConvertResult<Conversion> {
        if options.check_input {
            validate_input(vertices, faces)?;
        }

        let boundary = preprocess_boundary_faces(vertices, faces, options)?.faces;
        let source_volume = face_mesh_volume(vertices, &boundary);
        report(options, &format!("Input volume: {source_volume:.8}"));
        report(options, &format!("Boundary faces after preprocessing: {}", boundary.len()));

        let phase = delaunay_inside::build(&self.tetrahedralizer, vertices, &boundary, options);
        report(options, &format!("Delaunay tets: {}", phase.tetrahedra.len()));
        report(options, &format!("Residual faces: {}", phase.remaining_faces.len()));

        let mut stats = ConversionStats {
            source_volume,
            boundary_faces: boundary.len(),
            delaunay_tetrahedra: phase.tetrahedra.len(),
            residual_faces: phase.remaining_faces.len(),
            ..ConversionStats::default()
        };

        let (tetrahedra, completeness) =
            match fill_residual_volume(vertices, &phase.remaining_faces, &phase.tetrahedra, options) {
                Ok(outcome) => {
                    stats.collapse_steps = outcome.steps;
                    stats.collapse_retries = outcome.retries;
                    stats.collapse_pockets = outcome.pockets;
                    (outcome.tetrahedra, Completeness::Complete)
                }
                Err(err @ ConvertError::CollapseExhausted { .. }) if !phase.tetrahedra.is_empty() => {
                    log::warn!("Keeping Delaunay tetrahedra only: {err}");
                    if let ConvertError::CollapseExhausted { retries, .. } = err {
                        stats.collapse_retries = retries;
                    }
                    (
                        phase.tetrahedra,
                        Completeness::Partial {
                            reason: err.to_string(),
                        },
                    )
                }
                Err(err) => return Err(err),
            };

        let output_volume = tetra_mesh_volume(vertices, &tetrahedra);
        if completeness == Completeness::Complete
            && !volumes_match(source_volume, output_volume, options.volume_tolerance)
        {
            return Err(ConvertError::volume_invariant(
                "conversion",
                source_volume,
                output_volume,
            ));
        }
        stats.output_volume = output_volume;

        report(options, &format!("Final tets: {}", tetrahedra.len()));
        Ok(Conversion {
            tetrahedra,
            completeness,
            stats,
        })
    }
}

/// Stage summary at `info` when verbose, `debug` otherwise.
fn report(options: &ConvertOptions, message: &str) {
    if options.verbose {
        log::info!("[mesh2tetra] {message}");
    } else {
        log::debug!("[mesh2tetra] {message}");
    }
}

//! # Delaunay Phase Tests

use super::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use tetra_delaunay::{BowyerWatson, DelaunayError, DelaunayResult};

struct Failing;

impl Tetrahedralizer for Failing {
    fn tetrahedralize(&self, _points: &[DVec3], _tolerance: f64) -> DelaunayResult<Vec<[usize; 4]>> {
        Err(DelaunayError::degenerate("always fails"))
    }
}

struct Empty;

impl Tetrahedralizer for Empty {
    fn tetrahedralize(&self, _points: &[DVec3], _tolerance: f64) -> DelaunayResult<Vec<[usize; 4]>> {
        Ok(Vec::new())
    }
}

fn tetra() -> (Vec<DVec3>, Vec<Face>) {
    (
        vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
        Tetrahedron::new(0, 1, 2, 3).faces().to_vec(),
    )
}

fn unit_cube() -> (Vec<DVec3>, Vec<Face>) {
    let vertices = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(1.0, 0.0, 1.0),
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(0.0, 1.0, 1.0),
    ];
    let faces = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ]
    .map(Face::from)
    .to_vec();
    (vertices, faces)
}

#[test]
fn test_tetrahedron_is_filled_completely() {
    let (vertices, faces) = tetra();
    let phase = build(&BowyerWatson, &vertices, &faces, &ConvertOptions::default());

    assert_eq!(phase.tetrahedra.len(), 1);
    assert_eq!(phase.tetrahedra[0].canonical(), [0, 1, 2, 3]);
    assert!(phase.remaining_faces.is_empty());
}

#[test]
fn test_cube_cells_fill_volume() {
    let (vertices, faces) = unit_cube();
    let phase = build(&BowyerWatson, &vertices, &faces, &ConvertOptions::default());

    assert!(!phase.tetrahedra.is_empty());
    for tet in &phase.tetrahedra {
        assert!(tetra_volume(&vertices, tet) > 0.0);
    }
    assert_relative_eq!(tetra_mesh_volume(&vertices, &phase.tetrahedra), 1.0, epsilon = 1e-12);
    // Any residual faces enclose no volume
    assert_abs_diff_eq!(face_mesh_volume(&vertices, &phase.remaining_faces), 0.0, epsilon = 1e-12);
}

#[test]
fn test_disjoint_components_are_filled_separately() {
    let (mut vertices, mut faces) = tetra();
    vertices.extend([
        DVec3::new(3.0, 0.0, 0.0),
        DVec3::new(4.0, 0.0, 0.0),
        DVec3::new(3.0, 1.0, 0.0),
        DVec3::new(3.0, 0.0, 1.0),
    ]);
    faces.extend(Tetrahedron::new(4, 5, 6, 7).faces());

    let phase = build(&BowyerWatson, &vertices, &faces, &ConvertOptions::default());
    let mut keys: Vec<[usize; 4]> = phase.tetrahedra.iter().map(Tetrahedron::canonical).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![[0, 1, 2, 3], [4, 5, 6, 7]]);
    assert!(phase.remaining_faces.is_empty());
}

#[test]
fn test_primitive_errors_are_not_fatal() {
    let (vertices, faces) = unit_cube();
    let phase = build(&Failing, &vertices, &faces, &ConvertOptions::default());

    assert!(phase.tetrahedra.is_empty());
    assert_eq!(phase.remaining_faces, faces);
}

#[test]
fn test_empty_primitive_leaves_boundary() {
    let (vertices, faces) = tetra();
    let phase = build(&Empty, &vertices, &faces, &ConvertOptions::default());
    assert!(phase.tetrahedra.is_empty());
    assert_eq!(phase.remaining_faces, faces);
}

#[test]
fn test_components_below_minimum_are_skipped() {
    let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
    let faces = vec![Face::new(0, 2, 1), Face::new(0, 1, 3)];
    let phase = build(&BowyerWatson, &vertices, &faces, &ConvertOptions::default());

    assert!(phase.tetrahedra.is_empty());
    assert_eq!(phase.remaining_faces, faces);
}

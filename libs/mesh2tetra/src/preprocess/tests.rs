//! # Preprocessing Tests

use super::intersections::collapse_vertex;
use super::*;
use crate::predicates::face_mesh_volume;
use crate::types::Tetrahedron;
use approx::assert_relative_eq;

fn tetra() -> (Vec<DVec3>, Vec<Face>) {
    (
        vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
        Tetrahedron::new(0, 1, 2, 3).faces().to_vec(),
    )
}

fn interpenetrating_tetrahedra() -> (Vec<DVec3>, Vec<Face>) {
    let mut vertices = vec![
        DVec3::ZERO,
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(0.0, 2.0, 0.0),
        DVec3::new(0.0, 0.0, 2.0),
    ];
    let shifted: Vec<DVec3> = vertices.iter().map(|p| *p + DVec3::splat(0.5)).collect();
    vertices.extend(shifted);

    let mut faces = Tetrahedron::new(0, 1, 2, 3).faces().to_vec();
    faces.extend(Tetrahedron::new(4, 5, 6, 7).faces());
    (vertices, faces)
}

#[test]
fn test_clean_surface_is_unchanged() {
    let (vertices, faces) = tetra();
    let result = preprocess_boundary_faces(&vertices, &faces, &ConvertOptions::default()).unwrap();
    assert_eq!(result.faces, faces);
    assert_eq!(result.report, PreprocessReport::default());
}

#[test]
fn test_zero_area_faces_are_dropped() {
    let (mut vertices, mut faces) = tetra();
    vertices.push(DVec3::new(2.0, 0.0, 0.0));
    faces.push(Face::new(0, 1, 4));

    let result = preprocess_boundary_faces(&vertices, &faces, &ConvertOptions::default()).unwrap();
    assert_eq!(result.report.degenerate_removed, 1);
    assert_eq!(result.faces.len(), 4);
}

#[test]
fn test_duplicate_pairs_cancel() {
    let (mut vertices, mut faces) = tetra();
    vertices.extend([DVec3::new(5.0, 0.0, 0.0), DVec3::new(6.0, 0.0, 0.0), DVec3::new(5.0, 1.0, 0.0)]);
    faces.push(Face::new(4, 5, 6));
    faces.push(Face::new(6, 5, 4));

    let result = preprocess_boundary_faces(&vertices, &faces, &ConvertOptions::default()).unwrap();
    assert_eq!(result.report.duplicates_removed, 2);
    assert_eq!(result.faces, tetra().1);
}

#[test]
fn test_odd_duplicate_group_keeps_first() {
    let (vertices, mut faces) = tetra();
    faces.push(faces[0]);
    faces.push(faces[0].flipped());

    let result = preprocess_boundary_faces(&vertices, &faces, &ConvertOptions::default()).unwrap();
    assert_eq!(result.faces, tetra().1);
}

#[test]
fn test_inward_surface_is_rewound() {
    let (vertices, faces) = tetra();
    let inward = flip_orientation(&faces);

    let result = preprocess_boundary_faces(&vertices, &inward, &ConvertOptions::default()).unwrap();
    assert_eq!(result.faces, faces);
    assert_eq!(result.report.orientation_flips, 1);
    assert!(signed_face_mesh_volume(&vertices, &result.faces) > 0.0);
}

#[test]
fn test_orientation_left_alone_when_disabled() {
    let (vertices, faces) = tetra();
    let inward = flip_orientation(&faces);
    let options = ConvertOptions::default().with_auto_fix_face_orientation(false);

    let result = preprocess_boundary_faces(&vertices, &inward, &options).unwrap();
    assert_eq!(result.faces, inward);
}

#[test]
fn test_strict_mode_rejects_intersections() {
    let (vertices, faces) = interpenetrating_tetrahedra();
    let options = ConvertOptions::default().with_auto_resolve_intersections(false);

    let result = preprocess_boundary_faces(&vertices, &faces, &options);
    assert!(matches!(result, Err(ConvertError::SelfIntersection { pairs }) if pairs > 0));
}

#[test]
fn test_lenient_mode_reports_intersections() {
    let (vertices, faces) = interpenetrating_tetrahedra();
    let options = ConvertOptions::default()
        .with_auto_resolve_intersections(false)
        .with_fail_on_self_intersections(false);

    let result = preprocess_boundary_faces(&vertices, &faces, &options).unwrap();
    assert_eq!(result.faces.len(), 8);
    assert!(result.report.remaining_intersections > 0);
}

#[test]
fn test_repair_collapses_interpenetration() {
    let (vertices, faces) = interpenetrating_tetrahedra();
    assert_eq!(find_intersecting_face_pairs(&vertices, &faces, None).len(), 3);

    let repair = resolve_intersections(&vertices, faces, 10);
    assert_eq!(repair.collapses, 1);
    assert_eq!(repair.faces_removed, 0);
    assert_eq!(repair.faces.len(), 4);
    assert!(find_intersecting_face_pairs(&vertices, &repair.faces, None).is_empty());
}

#[test]
fn test_report_counts_intersection_collapses() {
    let (vertices, faces) = interpenetrating_tetrahedra();
    let result = preprocess_boundary_faces(&vertices, &faces, &ConvertOptions::default()).unwrap();

    assert_eq!(result.report.intersection_collapses, 1);
    assert_eq!(result.report.intersecting_faces_removed, 0);
    assert_eq!(result.report.remaining_intersections, 0);
    assert_eq!(result.faces.len(), 4);
}

#[test]
fn test_repair_drops_intersecting_faces_as_last_resort() {
    // Without collapse iterations only the face removal runs: the slanted face
    // of the first tetrahedron and the three faces around the corner of the
    // second one that pokes through it.
    let (vertices, faces) = interpenetrating_tetrahedra();
    let repair = resolve_intersections(&vertices, faces, 0);

    assert_eq!(repair.collapses, 0);
    assert_eq!(repair.faces_removed, 4);
    assert_eq!(
        repair.faces,
        vec![
            Face::new(2, 1, 0),
            Face::new(1, 3, 0),
            Face::new(3, 2, 0),
            Face::new(7, 5, 6),
        ]
    );
}

#[test]
fn test_last_resort_rejected_below_four_faces() {
    let vertices = vec![
        DVec3::ZERO,
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(0.0, 2.0, 0.0),
        DVec3::new(0.5, 0.5, -1.0),
        DVec3::new(0.5, 0.5, 1.0),
        DVec3::new(0.5, -1.0, 0.0),
    ];
    let faces = vec![Face::new(0, 1, 2), Face::new(3, 4, 5)];

    let repair = resolve_intersections(&vertices, faces.clone(), 0);
    assert_eq!(repair.faces, faces);
    assert_eq!(repair.faces_removed, 0);
    assert_eq!(find_intersecting_face_pairs(&vertices, &repair.faces, None).len(), 1);
}

#[test]
fn test_repair_keeps_clean_surface() {
    let (vertices, faces) = tetra();
    let repair = resolve_intersections(&vertices, faces.clone(), 10);
    assert_eq!(repair.faces, faces);
    assert_eq!(repair.collapses, 0);
    assert_relative_eq!(face_mesh_volume(&vertices, &repair.faces), 1.0 / 6.0);
}

#[test]
fn test_collapse_vertex_drops_and_cancels() {
    // Two triangles of a square sharing the diagonal 0-2
    let faces = [Face::new(0, 1, 2), Face::new(0, 2, 3), Face::new(2, 1, 3)];
    let collapsed = collapse_vertex(&faces, 0, 1);
    // (0,1,2) collapses; (0,2,3) -> (1,2,3) cancels against (2,1,3)
    assert!(collapsed.is_empty());
}

use glam::DVec3;
use mesh2tetra::delaunay_inside;
use mesh2tetra::{
    convert, BowyerWatson, Completeness, ConvertError, ConvertOptions, Converter, Face, Tetrahedralizer,
    Tetrahedron,
};
use tetra_delaunay::DelaunayResult;

fn tetra_at(offset: DVec3) -> Vec<DVec3> {
    [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z]
        .map(|p| p + offset)
        .to_vec()
}

fn tetra_faces(first: usize) -> Vec<Face> {
    Tetrahedron::new(first, first + 1, first + 2, first + 3)
        .faces()
        .to_vec()
}

/// Schönhardt's twisted triangular prism: every tetrahedron on its six
/// corners pokes out through a reflex side edge, so it has no
/// tetrahedralization without extra points.
fn schonhardt_prism(first: usize) -> (Vec<DVec3>, Vec<Face>) {
    let twist = 30f64.to_radians();
    let corner = |angle: f64, z: f64| DVec3::new(angle.cos(), angle.sin(), z);
    let step = 120f64.to_radians();

    let mut vertices: Vec<DVec3> = (0..3).map(|i| corner(step * i as f64, 0.0)).collect();
    vertices.extend((0..3).map(|i| corner(step * i as f64 + twist, 1.0)));

    let v = |i: usize| first + i;
    let mut faces = vec![Face::new(v(0), v(2), v(1)), Face::new(v(3), v(4), v(5))];
    for i in 0..3 {
        let j = (i + 1) % 3;
        faces.push(Face::new(v(i), v(j), v(j + 3)));
        faces.push(Face::new(v(i), v(j + 3), v(i + 3)));
    }
    (vertices, faces)
}

/// Delaunay primitive that never produces cells.
struct NoCells;

impl Tetrahedralizer for NoCells {
    fn tetrahedralize(&self, _points: &[DVec3], _tolerance: f64) -> DelaunayResult<Vec<[usize; 4]>> {
        Ok(Vec::new())
    }
}

#[test]
fn too_few_vertices_is_validation_error() {
    let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
    let faces = vec![Face::new(0, 1, 2); 4];
    let err = convert(&vertices, &faces, &ConvertOptions::default()).unwrap_err();
    match err {
        ConvertError::Validation { message } => assert!(message.contains("4 vertices")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn too_few_faces_is_validation_error() {
    let vertices = tetra_at(DVec3::ZERO);
    let faces = tetra_faces(0)[..3].to_vec();
    let err = convert(&vertices, &faces, &ConvertOptions::default()).unwrap_err();
    match err {
        ConvertError::Validation { message } => assert!(message.contains("4 faces")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn out_of_range_index_is_validation_error() {
    let vertices = tetra_at(DVec3::ZERO);
    let mut faces = tetra_faces(0);
    faces[2] = Face::new(0, 1, 9);
    let err = convert(&vertices, &faces, &ConvertOptions::default()).unwrap_err();
    assert_eq!(err, ConvertError::validation("Face 2 index is out of range."));
}

#[test]
fn interpenetrating_tetrahedra_fail_in_strict_mode() {
    let mut vertices = tetra_at(DVec3::ZERO);
    vertices.extend(tetra_at(DVec3::splat(0.25)));
    let mut faces = tetra_faces(0);
    faces.extend(tetra_faces(4));

    let options = ConvertOptions::default().with_auto_resolve_intersections(false);
    let err = convert(&vertices, &faces, &options).unwrap_err();
    assert!(matches!(err, ConvertError::SelfIntersection { pairs } if pairs > 0));
}

#[test]
fn disjoint_tetrahedra_convert_independently() {
    let mut vertices = tetra_at(DVec3::ZERO);
    vertices.extend(tetra_at(DVec3::new(3.0, 0.0, 0.0)));
    let mut faces = tetra_faces(0);
    faces.extend(tetra_faces(4));

    let conversion = convert(&vertices, &faces, &ConvertOptions::default()).unwrap();
    let mut tets: Vec<[usize; 4]> = conversion.tetrahedra.iter().map(Tetrahedron::canonical).collect();
    tets.sort_unstable();
    assert_eq!(tets, vec![[0, 1, 2, 3], [4, 5, 6, 7]]);
}

#[test]
fn collapse_alone_fills_a_tetrahedron() {
    let vertices = tetra_at(DVec3::ZERO);
    let faces = tetra_faces(0);

    let conversion = Converter::with_tetrahedralizer(NoCells)
        .convert(&vertices, &faces, &ConvertOptions::default())
        .unwrap();

    assert_eq!(conversion.completeness, Completeness::Complete);
    assert_eq!(conversion.stats.delaunay_tetrahedra, 0);
    assert_eq!(conversion.stats.collapse_steps, 1);
    assert_eq!(conversion.tetrahedra.len(), 1);
}

#[test]
fn delaunay_phase_accepts_trait_objects() {
    let vertices = tetra_at(DVec3::ZERO);
    let faces = tetra_faces(0);
    let primitive: &dyn Tetrahedralizer = &BowyerWatson;

    let phase = delaunay_inside::build(primitive, &vertices, &faces, &ConvertOptions::default());
    assert_eq!(phase.tetrahedra.len(), 1);
    assert!(phase.remaining_faces.is_empty());
}

#[test]
fn options_deserialize_with_defaults() {
    let options: ConvertOptions = serde_json::from_str(r#"{ "seed": 3, "verbose": true }"#).unwrap();
    assert_eq!(options.seed, 3);
    assert!(options.verbose);
    assert_eq!(options.max_collapse_retries, ConvertOptions::default().max_collapse_retries);
}

#[test]
fn exhausted_collapse_keeps_delaunay_tetrahedra() {
    let (mut vertices, mut faces) = schonhardt_prism(0);
    vertices.extend(tetra_at(DVec3::new(5.0, 0.0, 0.0)));
    faces.extend(tetra_faces(6));

    let conversion = convert(&vertices, &faces, &ConvertOptions::default()).unwrap();

    assert!(matches!(conversion.completeness, Completeness::Partial { .. }));
    assert!(!conversion.is_complete());
    assert_eq!(conversion.tetrahedra.len(), 1);
    assert_eq!(conversion.tetrahedra[0].canonical(), [6, 7, 8, 9]);
    assert_eq!(conversion.stats.collapse_retries, ConvertOptions::default().max_collapse_retries);
}

#[test]
fn exhausted_collapse_without_delaunay_tetrahedra_fails() {
    let (vertices, faces) = schonhardt_prism(0);

    let err = convert(&vertices, &faces, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::CollapseExhausted { remaining_faces, .. } if remaining_faces > 0
    ));
}

#[test]
#[should_panic]
fn unchecked_input_with_bad_index_panics() {
    let vertices = tetra_at(DVec3::ZERO);
    let mut faces = tetra_faces(0);
    faces[1] = Face::new(1, 3, 12);

    let options = ConvertOptions::default().with_check_input(false);
    let _ = convert(&vertices, &faces, &options);
}

//! # Mesh Topology
//!
//! Combinatorial operations on face sets: connected components, residual
//! faces, local index remapping, and vertex adjacency.
//!
//! Every grouping preserves first-appearance order so that results never
//! depend on hash map iteration order.

use std::collections::{HashMap, HashSet, VecDeque};

use glam::DVec3;

use crate::types::{Face, FaceKey, Tetrahedron};

/// Splits faces into components connected through shared vertices.
///
/// Components are listed in order of their first face; faces within a
/// component appear in breadth-first visit order.
pub fn separate_face_objects(faces: &[Face]) -> Vec<Vec<Face>> {
    let mut vertex_faces: HashMap<usize, Vec<usize>> = HashMap::new();
    for (index, face) in faces.iter().enumerate() {
        for v in face.0 {
            vertex_faces.entry(v).or_default().push(index);
        }
    }

    let mut visited = vec![false; faces.len()];
    let mut objects = Vec::new();
    for start in 0..faces.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;

        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(index) = queue.pop_front() {
            let face = faces[index];
            component.push(face);
            for v in face.0 {
                for &next in vertex_faces.get(&v).into_iter().flatten() {
                    if !visited[next] {
                        visited[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        objects.push(component);
    }

    objects
}

/// Faces not covered by the tetrahedra.
///
/// Tetrahedron faces and boundary faces are pooled by canonical key; keys
/// seen exactly once survive. Boundary faces keep their winding while
/// surviving tetrahedron faces are reversed, so the residual surface stays
/// outward-wound around the uncovered volume.
pub fn remaining_faces(tets: &[Tetrahedron], boundary: &[Face]) -> Vec<Face> {
    let pooled: Vec<Face> = tets
        .iter()
        .flat_map(|t| t.faces().map(|f| f.flipped()))
        .chain(boundary.iter().copied())
        .collect();

    let mut counts: HashMap<FaceKey, usize> = HashMap::with_capacity(pooled.len());
    for face in &pooled {
        *counts.entry(face.canonical()).or_insert(0) += 1;
    }

    pooled
        .into_iter()
        .filter(|face| counts[&face.canonical()] == 1)
        .collect()
}

/// A face set remapped onto its own dense vertex array.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMesh {
    /// Positions of the referenced vertices, in ascending global order
    pub vertices: Vec<DVec3>,
    /// Faces over local indices
    pub faces: Vec<Face>,
    /// Local index -> global index
    pub global_ids: Vec<usize>,
}

impl LocalMesh {
    /// Maps a local tetrahedron back to global indices.
    pub fn to_global(&self, tet: &Tetrahedron) -> Tetrahedron {
        Tetrahedron(tet.0.map(|v| self.global_ids[v]))
    }
}

/// Collects the vertices referenced by `faces` and remaps the faces onto
/// them.
pub fn inside_points(vertices: &[DVec3], faces: &[Face]) -> LocalMesh {
    let mut global_ids: Vec<usize> = faces.iter().flat_map(|f| f.0).collect();
    global_ids.sort_unstable();
    global_ids.dedup();

    let to_local: HashMap<usize, usize> = global_ids
        .iter()
        .enumerate()
        .map(|(local, &global)| (global, local))
        .collect();

    LocalMesh {
        vertices: global_ids.iter().map(|&g| vertices[g]).collect(),
        faces: faces
            .iter()
            .map(|f| Face(f.0.map(|v| to_local[&v])))
            .collect(),
        global_ids,
    }
}

/// Reverses the winding of every face.
pub fn flip_orientation(faces: &[Face]) -> Vec<Face> {
    faces.iter().map(Face::flipped).collect()
}

/// True when every corner of `face` is a vertex of `tet`.
pub fn tetra_contains_face(tet: &Tetrahedron, face: &Face) -> bool {
    face.0.iter().all(|v| tet.0.contains(v))
}

/// Distinct vertices in order of first appearance.
pub fn ordered_vertices(faces: &[Face]) -> Vec<usize> {
    let mut seen = HashSet::new();
    faces
        .iter()
        .flat_map(|f| f.0)
        .filter(|&v| seen.insert(v))
        .collect()
}

/// Vertices sharing an edge with `vertex`, in order of first appearance.
pub fn vertex_neighbors(faces: &[Face], vertex: usize) -> Vec<usize> {
    let mut neighbors = Vec::new();
    for face in faces.iter().filter(|f| f.contains(vertex)) {
        for v in face.0 {
            if v != vertex && !neighbors.contains(&v) {
                neighbors.push(v);
            }
        }
    }
    neighbors
}

/// Cancels faces by canonical key: groups of even size vanish and odd groups
/// keep their first face. Groups are emitted in first-appearance order.
pub fn cancel_duplicate_faces(faces: &[Face]) -> Vec<Face> {
    let mut groups: Vec<(Face, usize)> = Vec::new();
    let mut slots: HashMap<FaceKey, usize> = HashMap::new();
    for face in faces {
        match slots.get(&face.canonical()) {
            Some(&slot) => groups[slot].1 += 1,
            None => {
                slots.insert(face.canonical(), groups.len());
                groups.push((*face, 1));
            }
        }
    }

    groups
        .into_iter()
        .filter(|(_, count)| count % 2 == 1)
        .map(|(face, _)| face)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetra_faces(offset: usize) -> Vec<Face> {
        Tetrahedron::new(offset, offset + 1, offset + 2, offset + 3)
            .faces()
            .to_vec()
    }

    #[test]
    fn test_separate_disjoint_objects() {
        let mut faces = tetra_faces(0);
        faces.extend(tetra_faces(4));

        let objects = separate_face_objects(&faces);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].len(), 4);
        assert!(objects[0].iter().all(|f| f.0.iter().all(|&v| v < 4)));
        assert!(objects[1].iter().all(|f| f.0.iter().all(|&v| v >= 4)));
    }

    #[test]
    fn test_objects_sharing_a_vertex_are_joined() {
        let mut faces = tetra_faces(0);
        faces.extend(tetra_faces(3));
        assert_eq!(separate_face_objects(&faces).len(), 1);
        assert!(separate_face_objects(&[]).is_empty());
    }

    #[test]
    fn test_remaining_faces_of_covered_tetrahedron() {
        let tet = Tetrahedron::new(0, 1, 2, 3);
        let boundary = tet.faces().to_vec();
        assert!(remaining_faces(&[tet], &boundary).is_empty());
    }

    #[test]
    fn test_remaining_faces_are_outward() {
        // Square pyramid split into two tetrahedra; only one is covered
        let boundary = [
            Face::new(0, 2, 1),
            Face::new(0, 3, 2),
            Face::new(0, 1, 4),
            Face::new(1, 2, 4),
            Face::new(2, 3, 4),
            Face::new(3, 0, 4),
        ];
        let covered = Tetrahedron::new(0, 1, 2, 4);
        let remaining = remaining_faces(&[covered], &boundary);

        let mut keys: Vec<FaceKey> = remaining.iter().map(Face::canonical).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![[0, 2, 3], [0, 2, 4], [0, 3, 4], [2, 3, 4]]);

        // The exposed diagonal is wound opposite to the covering face
        let diagonal = remaining.iter().find(|f| f.canonical() == [0, 2, 4]).unwrap();
        let covering = covered.faces().into_iter().find(|f| f.canonical() == [0, 2, 4]).unwrap();
        assert_eq!(diagonal.flipped(), covering);
    }

    #[test]
    fn test_inside_points_remaps_ascending() {
        let vertices: Vec<DVec3> = (0..10).map(|i| DVec3::splat(i as f64)).collect();
        let faces = [Face::new(7, 3, 9), Face::new(3, 9, 5)];

        let local = inside_points(&vertices, &faces);
        assert_eq!(local.global_ids, vec![3, 5, 7, 9]);
        assert_eq!(local.faces, vec![Face::new(2, 0, 3), Face::new(0, 3, 1)]);
        assert_eq!(local.vertices[2], DVec3::splat(7.0));
        assert_eq!(
            local.to_global(&Tetrahedron::new(0, 1, 2, 3)),
            Tetrahedron::new(3, 5, 7, 9)
        );
    }

    #[test]
    fn test_flip_orientation() {
        let flipped = flip_orientation(&[Face::new(0, 1, 2)]);
        assert_eq!(flipped, vec![Face::new(2, 1, 0)]);
    }

    #[test]
    fn test_tetra_contains_face() {
        let tet = Tetrahedron::new(0, 1, 2, 3);
        assert!(tetra_contains_face(&tet, &Face::new(3, 1, 0)));
        assert!(!tetra_contains_face(&tet, &Face::new(3, 1, 4)));
    }

    #[test]
    fn test_vertex_neighbors_in_first_appearance_order() {
        let faces = [Face::new(5, 2, 9), Face::new(9, 2, 7), Face::new(1, 9, 5)];
        assert_eq!(vertex_neighbors(&faces, 9), vec![5, 2, 7, 1]);
        assert_eq!(ordered_vertices(&faces), vec![5, 2, 9, 7, 1]);
    }

    #[test]
    fn test_cancel_duplicate_faces() {
        let faces = [
            Face::new(0, 1, 2),
            Face::new(3, 4, 5),
            Face::new(2, 1, 0),
            Face::new(5, 4, 3),
            Face::new(3, 5, 4),
        ];
        assert_eq!(cancel_duplicate_faces(&faces), vec![Face::new(3, 4, 5)]);
    }
}

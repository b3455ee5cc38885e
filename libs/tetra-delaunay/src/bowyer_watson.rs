//! # Bowyer-Watson Algorithm
//!
//! Incremental 3D Delaunay tetrahedralization.
//!
//! ## Algorithm Steps
//!
//! 1. Enclose all points in a large super-simplex
//! 2. For each point, in input order:
//!    a. Locate a cell containing the point
//!    b. Grow the cavity over neighbours whose circumsphere strictly contains it
//!    c. Expand the cavity until every boundary face sees the point
//!    d. Replace the cavity with cells joining the point to its boundary
//! 3. Drop every cell touching the super-simplex
//!
//! Orientation and insphere tests use exact predicates, so cospherical and
//! coplanar inputs (cube corners, flat faces) never yield inverted or flat
//! cells.

use std::collections::{HashMap, VecDeque};

use config::constants::SUPER_SIMPLEX_SCALE;
use glam::DVec3;
use robust::{insphere, orient3d, Coord3D};

use crate::error::{DelaunayError, DelaunayResult};

/// Vertex positions of each cell face, indexed by the opposite vertex.
const FACE_INDICES: [[usize; 3]; 4] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

/// Computes the Delaunay tetrahedralization of a point set.
///
/// # Arguments
///
/// * `points` - Points to tetrahedralize (at least 4)
/// * `plane_distance_tolerance` - Distance below which a point counts as lying
///   on a cavity face; also the duplicate-point radius
///
/// # Returns
///
/// Cells as quadruples of indices into `points`, each with positive signed
/// volume. Duplicate points are skipped and a coplanar input yields no cells.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use tetra_delaunay::tetrahedralize;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ];
/// let cells = tetrahedralize(&points, 1e-10).unwrap();
/// assert_eq!(cells.len(), 1);
/// ```
pub fn tetrahedralize(
    points: &[DVec3],
    plane_distance_tolerance: f64,
) -> DelaunayResult<Vec<[usize; 4]>> {
    if points.len() < 4 {
        return Err(DelaunayError::TooFewPoints {
            count: points.len(),
        });
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(DelaunayError::degenerate(
            "Point set contains non-finite coordinates",
        ));
    }

    let mut triangulation = Triangulation::new(points)?;
    for index in 0..points.len() {
        triangulation.insert(index, plane_distance_tolerance)?;
    }

    Ok(triangulation.finish())
}

/// A tetrahedral cell of the working triangulation.
#[derive(Debug, Clone)]
struct Cell {
    /// Vertex indices, ordered for positive signed volume
    vertices: [usize; 4],
    /// False once the cell has been replaced by a cavity retriangulation
    alive: bool,
}

impl Cell {
    /// Returns the face opposite `vertex_slot` and the opposite vertex.
    fn face(&self, vertex_slot: usize) -> ([usize; 3], usize) {
        let [i, j, k] = FACE_INDICES[vertex_slot];
        (
            [self.vertices[i], self.vertices[j], self.vertices[k]],
            self.vertices[vertex_slot],
        )
    }
}

/// A face on the boundary of an insertion cavity.
#[derive(Debug, Clone, Copy)]
struct CavityFace {
    vertices: [usize; 3],
    /// Cavity cell owning this face
    cell: usize,
    /// Vertex of `cell` opposite this face
    opposite: usize,
}

/// Working triangulation: input points followed by the super-simplex.
struct Triangulation {
    positions: Vec<DVec3>,
    input_count: usize,
    cells: Vec<Cell>,
    /// Sorted face key -> cells sharing that face
    face_cells: HashMap<[usize; 3], Vec<usize>>,
    inserted: Vec<usize>,
}

impl Triangulation {
    /// Creates a triangulation holding only the super-simplex.
    fn new(points: &[DVec3]) -> DelaunayResult<Self> {
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }

        let extent = (max - min).max_element();
        if extent <= 0.0 {
            return Err(DelaunayError::degenerate("Point set has zero extent"));
        }

        let center = (min + max) * 0.5;
        let radius = extent * SUPER_SIMPLEX_SCALE;
        let mut positions = points.to_vec();
        positions.extend([
            center + DVec3::new(1.0, 1.0, 1.0) * radius,
            center + DVec3::new(1.0, -1.0, -1.0) * radius,
            center + DVec3::new(-1.0, 1.0, -1.0) * radius,
            center + DVec3::new(-1.0, -1.0, 1.0) * radius,
        ]);

        let n = points.len();
        let mut triangulation = Self {
            positions,
            input_count: n,
            cells: Vec::new(),
            face_cells: HashMap::new(),
            inserted: Vec::with_capacity(n),
        };
        triangulation.add_cell([n, n + 1, n + 2, n + 3]);
        Ok(triangulation)
    }

    /// Inserts one input point.
    fn insert(&mut self, point: usize, tolerance: f64) -> DelaunayResult<()> {
        let p = self.positions[point];
        if self
            .inserted
            .iter()
            .any(|&q| self.positions[q].distance(p) <= tolerance)
        {
            return Ok(());
        }

        let start = self
            .locate(p)
            .ok_or(DelaunayError::CavityRepair { point })?;

        let mut in_cavity = vec![false; self.cells.len()];
        let mut cavity = vec![start];
        in_cavity[start] = true;

        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            for slot in 0..4 {
                let (face, _) = self.cells[cell].face(slot);
                if let Some(next) = self.neighbor(cell, face) {
                    if !in_cavity[next] && self.in_circumsphere(next, p) {
                        in_cavity[next] = true;
                        cavity.push(next);
                        queue.push_back(next);
                    }
                }
            }
        }

        // Grow the cavity until it is star-shaped around the point.
        let boundary = loop {
            let boundary = self.cavity_boundary(&cavity);
            let blocked = boundary
                .iter()
                .find(|face| !self.sees(face, p, tolerance))
                .copied();

            let Some(face) = blocked else {
                break boundary;
            };

            match self.neighbor(face.cell, face.vertices) {
                Some(next) if !in_cavity[next] => {
                    in_cavity[next] = true;
                    cavity.push(next);
                }
                _ => return Err(DelaunayError::CavityRepair { point }),
            }
        };

        for &cell in &cavity {
            self.kill(cell);
        }
        for face in boundary {
            self.add_cell([face.vertices[0], face.vertices[1], face.vertices[2], point]);
        }
        self.inserted.push(point);

        Ok(())
    }

    /// Returns the cells that contain no super-simplex vertex.
    fn finish(self) -> Vec<[usize; 4]> {
        let n = self.input_count;
        self.cells
            .into_iter()
            .filter(|cell| cell.alive && cell.vertices.iter().all(|&v| v < n))
            .map(|cell| cell.vertices)
            .collect()
    }

    /// Finds a live cell containing `p` (interior or boundary).
    fn locate(&self, p: DVec3) -> Option<usize> {
        self.cells.iter().enumerate().find_map(|(index, cell)| {
            if !cell.alive {
                return None;
            }
            let inside = (0..4).all(|slot| {
                let (face, opposite) = cell.face(slot);
                let [a, b, c] = face.map(|v| self.positions[v]);
                let towards_p = orientation(a, b, c, p);
                let towards_opposite = orientation(a, b, c, self.positions[opposite]);
                towards_p * towards_opposite >= 0.0
            });
            inside.then_some(index)
        })
    }

    /// True when `p` lies strictly inside the circumsphere of `cell`.
    fn in_circumsphere(&self, cell: usize, p: DVec3) -> bool {
        let [a, b, c, d] = self.cells[cell].vertices.map(|v| self.positions[v]);
        let side = insphere(coord(a), coord(b), coord(c), coord(d), coord(p));
        let orient = orient3d(coord(a), coord(b), coord(c), coord(d));
        side * orient > 0.0
    }

    /// True when `p` lies strictly on the cavity side of `face`, farther
    /// than `tolerance` from its plane.
    fn sees(&self, face: &CavityFace, p: DVec3, tolerance: f64) -> bool {
        let [a, b, c] = face.vertices.map(|v| self.positions[v]);
        let towards_p = orientation(a, b, c, p);
        let towards_opposite = orientation(a, b, c, self.positions[face.opposite]);
        if towards_p * towards_opposite <= 0.0 {
            return false;
        }

        let doubled_area = (b - a).cross(c - a).length();
        doubled_area > 0.0 && towards_p.abs() / doubled_area > tolerance
    }

    /// Faces of the cavity used by exactly one cavity cell.
    fn cavity_boundary(&self, cavity: &[usize]) -> Vec<CavityFace> {
        let mut counts: HashMap<[usize; 3], usize> = HashMap::new();
        for &cell in cavity {
            for slot in 0..4 {
                let (face, _) = self.cells[cell].face(slot);
                *counts.entry(face_key(face)).or_insert(0) += 1;
            }
        }

        let mut boundary = Vec::new();
        for &cell in cavity {
            for slot in 0..4 {
                let (face, opposite) = self.cells[cell].face(slot);
                if counts[&face_key(face)] == 1 {
                    boundary.push(CavityFace {
                        vertices: face,
                        cell,
                        opposite,
                    });
                }
            }
        }
        boundary
    }

    /// Returns the live cell across `face` from `cell`.
    fn neighbor(&self, cell: usize, face: [usize; 3]) -> Option<usize> {
        self.face_cells
            .get(&face_key(face))?
            .iter()
            .copied()
            .find(|&other| other != cell && self.cells[other].alive)
    }

    /// Adds a cell, reordering it for positive signed volume.
    fn add_cell(&mut self, mut vertices: [usize; 4]) {
        let [a, b, c, d] = vertices.map(|v| self.positions[v]);
        if orientation(a, b, c, d) < 0.0 {
            vertices.swap(0, 1);
        }

        let index = self.cells.len();
        self.cells.push(Cell {
            vertices,
            alive: true,
        });
        for slot in 0..4 {
            let (face, _) = self.cells[index].face(slot);
            self.face_cells.entry(face_key(face)).or_default().push(index);
        }
    }

    /// Marks a cell dead and unlinks it from its faces.
    fn kill(&mut self, cell: usize) {
        self.cells[cell].alive = false;
        for slot in 0..4 {
            let (face, _) = self.cells[cell].face(slot);
            if let Some(list) = self.face_cells.get_mut(&face_key(face)) {
                list.retain(|&other| other != cell);
            }
        }
    }
}

/// Six times the signed volume of `(a, b, c, d)`, exact in sign.
///
/// Positive when `d` lies on the side of `(b - a) x (c - a)`.
fn orientation(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> f64 {
    -orient3d(coord(a), coord(b), coord(c), coord(d))
}

fn coord(p: DVec3) -> Coord3D<f64> {
    Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

fn face_key(face: [usize; 3]) -> [usize; 3] {
    let mut key = face;
    key.sort_unstable();
    key
}

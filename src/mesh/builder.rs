//! Mesh construction.
//!
//! Faces are inserted one at a time with [`HalfEdgeMesh::add_face`], which
//! maintains the half-edge links, the boundary loops and the vertex anchors
//! after every insertion. The batch builders below feed face-vertex lists, as
//! found in mesh file formats, through it.

use nalgebra::Point3;

use super::halfedge::{Face, HalfEdgeMesh};
use super::index::{FaceId, HalfEdgeId, VertexId};
use crate::error::{MeshError, Result};

impl HalfEdgeMesh {
    /// Add a polygon with the given vertices in counter-clockwise order.
    ///
    /// Fails with [`MeshError::Topology`] if the polygon has fewer than three
    /// distinct vertices, if a vertex is already surrounded by faces, if one of
    /// its edges already has a face on this side, or if the fans around a
    /// shared vertex cannot be joined into a manifold. The mesh is unchanged
    /// when an error is returned.
    ///
    /// # Example
    /// ```
    /// use subsurf::mesh::HalfEdgeMesh;
    /// use nalgebra::Point3;
    ///
    /// let mut mesh = HalfEdgeMesh::new();
    /// let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    /// let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
    /// let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
    /// let f = mesh.add_face(&[a, b, c]).unwrap();
    ///
    /// assert_eq!(mesh.face_degree(f), 3);
    /// assert!(mesh.add_face(&[a, b]).is_err());
    /// ```
    pub fn add_face(&mut self, vertices: &[VertexId]) -> Result<FaceId> {
        let n = vertices.len();
        if n < 3 {
            return Err(MeshError::topology(format!(
                "a face needs at least 3 vertices, got {}",
                n
            )));
        }
        for (i, &v) in vertices.iter().enumerate() {
            if !v.is_valid() || v.index() >= self.num_vertices() {
                return Err(MeshError::topology(format!("face references unknown {:?}", v)));
            }
            if vertices[..i].contains(&v) {
                return Err(MeshError::topology(format!("face repeats {:?}", v)));
            }
        }

        // halfedges[i] runs from vertices[i] to vertices[i + 1].
        let mut halfedges = vec![HalfEdgeId::invalid(); n];
        let mut is_new = vec![false; n];
        let mut needs_adjust = vec![false; n];
        let mut next_cache: Vec<(HalfEdgeId, HalfEdgeId)> = Vec::with_capacity(3 * n);

        for i in 0..n {
            let ii = (i + 1) % n;
            if !self.is_boundary_vertex(vertices[i]) {
                return Err(MeshError::topology(format!(
                    "{:?} is already surrounded by faces",
                    vertices[i]
                )));
            }
            match self.find_halfedge(vertices[i], vertices[ii]) {
                Some(he) if !self.is_boundary_halfedge(he) => {
                    return Err(MeshError::topology(format!(
                        "edge ({:?}, {:?}) already has a face on this side",
                        vertices[i], vertices[ii]
                    )));
                }
                Some(he) => halfedges[i] = he,
                None => is_new[i] = true,
            }
        }

        // Two consecutive existing edges that are not consecutive in their
        // boundary loop: move the patch between them elsewhere in the loop.
        for i in 0..n {
            let ii = (i + 1) % n;
            if is_new[i] || is_new[ii] {
                continue;
            }
            let inner_prev = halfedges[i];
            let inner_next = halfedges[ii];
            if self.next(inner_prev) == inner_next {
                continue;
            }

            let outer_prev = inner_next.twin();
            let mut boundary_prev = outer_prev;
            let mut steps = 0;
            loop {
                boundary_prev = self.next(boundary_prev).twin();
                if self.is_boundary_halfedge(boundary_prev) && boundary_prev != inner_prev {
                    break;
                }
                steps += 1;
                if steps > self.num_halfedges() {
                    return Err(MeshError::topology(format!(
                        "no free boundary gap around {:?}",
                        vertices[ii]
                    )));
                }
            }
            let boundary_next = self.next(boundary_prev);
            if boundary_next == inner_next {
                return Err(MeshError::topology(format!(
                    "cannot re-link the fans around {:?}",
                    vertices[ii]
                )));
            }

            let patch_start = self.next(inner_prev);
            let patch_end = self.prev(inner_next);
            next_cache.push((boundary_prev, patch_start));
            next_cache.push((patch_end, boundary_next));
            next_cache.push((inner_prev, inner_next));
        }

        // Nothing below can fail.
        for i in 0..n {
            if is_new[i] {
                halfedges[i] = self.new_edge(vertices[i], vertices[(i + 1) % n]);
            }
        }

        let f = FaceId::new(self.faces.len());
        self.faces.push(Face::new(halfedges[n - 1]));

        for i in 0..n {
            let ii = (i + 1) % n;
            let v = vertices[ii];
            let inner_prev = halfedges[i];
            let inner_next = halfedges[ii];

            match (is_new[i], is_new[ii]) {
                (false, false) => {
                    needs_adjust[ii] = self.vertex(v).halfedge == inner_next;
                }
                (true, false) => {
                    let boundary_prev = self.prev(inner_next);
                    let outer_next = inner_prev.twin();
                    next_cache.push((boundary_prev, outer_next));
                    self.vertices[v.index()].halfedge = outer_next;
                    next_cache.push((inner_prev, inner_next));
                }
                (false, true) => {
                    let boundary_next = self.next(inner_prev);
                    let outer_prev = inner_next.twin();
                    next_cache.push((outer_prev, boundary_next));
                    self.vertices[v.index()].halfedge = boundary_next;
                    next_cache.push((inner_prev, inner_next));
                }
                (true, true) => {
                    let outer_prev = inner_next.twin();
                    let outer_next = inner_prev.twin();
                    match self.vertex_halfedge(v) {
                        None => {
                            self.vertices[v.index()].halfedge = outer_next;
                            next_cache.push((outer_prev, outer_next));
                        }
                        Some(boundary_next) => {
                            let boundary_prev = self.prev(boundary_next);
                            next_cache.push((boundary_prev, outer_next));
                            next_cache.push((outer_prev, boundary_next));
                        }
                    }
                    next_cache.push((inner_prev, inner_next));
                }
            }

            self.halfedges[inner_prev.index()].face = f;
        }

        for (a, b) in next_cache {
            self.set_next(a, b);
        }

        for i in 0..n {
            if needs_adjust[i] {
                self.adjust_outgoing_halfedge(vertices[i]);
            }
        }

        Ok(f)
    }

    /// Add a triangle. Shorthand for [`add_face`](Self::add_face).
    pub fn add_triangle(&mut self, v0: VertexId, v1: VertexId, v2: VertexId) -> Result<FaceId> {
        self.add_face(&[v0, v1, v2])
    }

    /// Add a quadrilateral. Shorthand for [`add_face`](Self::add_face).
    pub fn add_quad(
        &mut self,
        v0: VertexId,
        v1: VertexId,
        v2: VertexId,
        v3: VertexId,
    ) -> Result<FaceId> {
        self.add_face(&[v0, v1, v2, v3])
    }
}

/// Build a half-edge mesh from vertices and polygon faces of any degree.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of faces, each a list of vertex indices in counter-clockwise order
///
/// # Returns
/// A half-edge mesh, or an error if the input is invalid or non-manifold.
///
/// # Example
/// ```
/// use subsurf::mesh::build_from_polygons;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.5, 1.5, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2, 3], vec![3, 2, 4]];
///
/// let mesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_faces(), 2);
/// assert_eq!(mesh.num_edges(), 6);
/// ```
pub fn build_from_polygons<F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
) -> Result<HalfEdgeMesh> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        if let Some(&vi) = face.as_ref().iter().find(|&&vi| vi >= vertices.len()) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
    }

    let corner_count: usize = faces.iter().map(|f| f.as_ref().len()).sum();
    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), corner_count, faces.len());

    let vertex_ids: Vec<VertexId> = vertices.iter().map(|&pos| mesh.add_vertex(pos)).collect();

    let mut corners: Vec<VertexId> = Vec::new();
    for face in faces {
        corners.clear();
        corners.extend(face.as_ref().iter().map(|&vi| vertex_ids[vi]));
        mesh.add_face(&corners)?;
    }

    Ok(mesh)
}

/// Build a half-edge mesh from vertices and triangle faces.
///
/// # Example
/// ```
/// use subsurf::mesh::build_from_triangles;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_triangles(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh> {
    build_from_polygons(vertices, faces)
}

/// Build a half-edge mesh from vertices and quad faces (counter-clockwise).
pub fn build_from_quads(vertices: &[Point3<f64>], faces: &[[usize; 4]]) -> Result<HalfEdgeMesh> {
    build_from_polygons(vertices, faces)
}

/// Convert a half-edge mesh back to a face-vertex representation.
///
/// Returns (vertices, faces); each face lists its vertex indices in cyclic order.
pub fn to_face_vertex(mesh: &HalfEdgeMesh) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let vertices: Vec<Point3<f64>> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();

    let faces: Vec<Vec<usize>> = mesh
        .face_ids()
        .map(|f| mesh.face_vertices(f).map(|v| v.index()).collect())
        .collect();

    (vertices, faces)
}

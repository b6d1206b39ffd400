//! Half-edge mesh data structure.
//!
//! This module provides a half-edge (doubly-connected edge list) representation
//! for polygon meshes. All elements live in flat arrays and refer to each other
//! through typed handles, so the cyclic next/prev/twin graph never needs
//! shared ownership.
//!
//! # Structure
//!
//! - Each edge is split into two **half-edges** pointing in opposite directions.
//!   The two halves of edge `k` are stored at slots `2k` and `2k + 1`, so the
//!   **twin** and the **edge** of a half-edge are pure index arithmetic.
//! - Each half-edge knows its **next** and **prev** half-edge around its face
//!   (or boundary loop), its **origin vertex** and its **face**.
//! - Each vertex stores one outgoing half-edge.
//! - Each face stores one half-edge on its boundary.
//!
//! # Boundary Handling
//!
//! Boundary half-edges have an invalid face ID and are linked into boundary
//! loops through `next`/`prev`. A boundary vertex always stores a boundary
//! outgoing half-edge, which makes [`HalfEdgeMesh::is_boundary_vertex`] O(1).

use nalgebra::{Point3, Vector3};

use super::index::{EdgeId, FaceId, HalfEdgeId, VertexId};
use crate::error::{MeshError, Result};

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// One outgoing half-edge from this vertex.
    /// For boundary vertices, this is guaranteed to be a boundary half-edge.
    pub halfedge: HalfEdgeId,
}

impl Vertex {
    /// Create a new isolated vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    /// The vertex this half-edge originates from.
    pub origin: VertexId,

    /// The next half-edge around the face (or boundary loop).
    pub next: HalfEdgeId,

    /// The previous half-edge around the face (or boundary loop).
    pub prev: HalfEdgeId,

    /// The face this half-edge belongs to.
    /// Invalid for boundary half-edges.
    pub face: FaceId,
}

impl HalfEdge {
    /// Create an unlinked half-edge leaving `origin`.
    pub fn new(origin: VertexId) -> Self {
        Self {
            origin,
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
        }
    }

    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId,
}

impl Face {
    /// Create a new face with the given half-edge.
    pub fn new(halfedge: HalfEdgeId) -> Self {
        Self { halfedge }
    }
}

/// A half-edge mesh for polygon meshes of arbitrary face degree.
///
/// Faces are added through [`add_face`](HalfEdgeMesh::add_face), which keeps
/// the mesh a 2-manifold: every edge borders at most two faces.
///
/// Elements are addressed by 32-bit handles, so each element kind holds fewer
/// than `u32::MAX` entries (half-edges included, two per edge).
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex>,

    /// All half-edges in the mesh, twins in adjacent slots.
    pub(crate) halfedges: Vec<HalfEdge>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face>,
}

impl HalfEdgeMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_edges: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_edges * 2),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.halfedges.len() / 2
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Get the position of a vertex for in-place modification.
    #[inline]
    pub fn position_mut(&mut self, v: VertexId) -> &mut Point3<f64> {
        &mut self.vertices[v.index()].position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId, pos: Point3<f64>) {
        self.vertices[v.index()].position = pos;
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId) -> HalfEdgeId {
        he.twin()
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.halfedge(he).prev
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId) -> VertexId {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId) -> VertexId {
        self.origin(he.twin())
    }

    /// Get the face of a half-edge, invalid on the boundary side.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId) -> FaceId {
        self.halfedge(he).face
    }

    /// Get the edge a half-edge belongs to.
    #[inline]
    pub fn edge_of(&self, he: HalfEdgeId) -> EdgeId {
        he.edge()
    }

    /// One outgoing half-edge of `v`, or `None` for an isolated vertex.
    #[inline]
    pub fn vertex_halfedge(&self, v: VertexId) -> Option<HalfEdgeId> {
        self.vertex(v).halfedge.valid()
    }

    /// One half-edge of edge `e` (`side` is 0 or 1).
    #[inline]
    pub fn edge_halfedge(&self, e: EdgeId, side: usize) -> HalfEdgeId {
        e.halfedge(side)
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if a vertex is on the boundary.
    ///
    /// Isolated vertices count as boundary vertices.
    #[inline]
    pub fn is_boundary_vertex(&self, v: VertexId) -> bool {
        match self.vertex_halfedge(v) {
            Some(he) => self.is_boundary_halfedge(he),
            None => true,
        }
    }

    /// Check if a vertex has no incident edges.
    #[inline]
    pub fn is_isolated(&self, v: VertexId) -> bool {
        !self.vertex(v).halfedge.is_valid()
    }

    /// Check if an edge has fewer than two incident faces.
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId) -> bool {
        self.is_boundary_halfedge(e.halfedge(0)) || self.is_boundary_halfedge(e.halfedge(1))
    }

    /// Find the half-edge going from `start` to `end`, if the edge exists.
    pub fn find_halfedge(&self, start: VertexId, end: VertexId) -> Option<HalfEdgeId> {
        self.vertex_halfedges(start).find(|&he| self.dest(he) == end)
    }

    /// Find the edge connecting `a` and `b`, if it exists.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.find_halfedge(a, b).map(HalfEdgeId::edge)
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.num_edges()).map(EdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over half-edges around a vertex (outgoing half-edges).
    pub fn vertex_halfedges(&self, v: VertexId) -> VertexHalfEdgeIter<'_> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Iterate over vertices adjacent to a vertex (its one-ring).
    pub fn vertex_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex_halfedges(v).map(|he| self.dest(he))
    }

    /// Iterate over faces adjacent to a vertex.
    pub fn vertex_faces(&self, v: VertexId) -> impl Iterator<Item = FaceId> + '_ {
        self.vertex_halfedges(v)
            .filter_map(|he| self.face_of(he).valid())
    }

    /// Iterate over edges incident to a vertex.
    pub fn vertex_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.vertex_halfedges(v).map(HalfEdgeId::edge)
    }

    /// Iterate over half-edges around a face.
    pub fn face_halfedges(&self, f: FaceId) -> FaceHalfEdgeIter<'_> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Iterate over vertices of a face in cyclic order.
    pub fn face_vertices(&self, f: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        self.face_halfedges(f).map(|he| self.origin(he))
    }

    /// Iterate over edges of a face in cyclic order.
    pub fn face_edges(&self, f: FaceId) -> impl Iterator<Item = EdgeId> + '_ {
        self.face_halfedges(f).map(HalfEdgeId::edge)
    }

    /// The two endpoint vertices of an edge.
    pub fn edge_vertices(&self, e: EdgeId) -> [VertexId; 2] {
        [self.origin(e.halfedge(0)), self.origin(e.halfedge(1))]
    }

    /// The up-to-two faces incident to an edge.
    pub fn edge_faces(&self, e: EdgeId) -> [Option<FaceId>; 2] {
        [
            self.face_of(e.halfedge(0)).valid(),
            self.face_of(e.halfedge(1)).valid(),
        ]
    }

    // ==================== Mesh Properties ====================

    /// Number of edges incident to a vertex.
    pub fn valence(&self, v: VertexId) -> usize {
        self.vertex_halfedges(v).count()
    }

    /// Number of sides of a face.
    pub fn face_degree(&self, f: FaceId) -> usize {
        self.face_halfedges(f).count()
    }

    /// True if every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        self.face_ids().all(|f| self.face_degree(f) == 3)
    }

    /// True if every face is a quadrilateral.
    pub fn is_quad_mesh(&self) -> bool {
        self.face_ids().all(|f| self.face_degree(f) == 4)
    }

    /// True if the mesh has no boundary half-edges.
    pub fn is_closed(&self) -> bool {
        self.halfedges.iter().all(|he| !he.is_boundary())
    }

    /// Euler characteristic `V - E + F`.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_edges() as i64 + self.num_faces() as i64
    }

    // ==================== Geometry ====================

    /// Compute the centroid (vertex average) of a face.
    pub fn face_centroid(&self, f: FaceId) -> Point3<f64> {
        let mut sum = Vector3::zeros();
        let mut n = 0usize;
        for v in self.face_vertices(f) {
            sum += self.position(v).coords;
            n += 1;
        }
        Point3::from(sum / n as f64)
    }

    /// Compute the midpoint of an edge.
    pub fn edge_midpoint(&self, e: EdgeId) -> Point3<f64> {
        let [v0, v1] = self.edge_vertices(e);
        Point3::from((self.position(v0).coords + self.position(v1).coords) * 0.5)
    }

    /// Compute the length of an edge.
    pub fn edge_length(&self, e: EdgeId) -> f64 {
        let [v0, v1] = self.edge_vertices(e);
        (self.position(v1) - self.position(v0)).norm()
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?.position;
        let mut min = first;
        let mut max = first;

        for v in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }

        Some((min, max))
    }

    // ==================== Construction ====================

    /// Add a new isolated vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        id
    }

    /// Allocate a new edge from `start` to `end` and return its first half.
    ///
    /// The returned half-edge leaves `start`; its twin leaves `end`. Neither
    /// half is linked into a face or loop yet.
    pub(crate) fn new_edge(&mut self, start: VertexId, end: VertexId) -> HalfEdgeId {
        let he = HalfEdgeId::new(self.halfedges.len());
        self.halfedges.push(HalfEdge::new(start));
        self.halfedges.push(HalfEdge::new(end));
        he
    }

    /// Link `a -> b` in both directions.
    #[inline]
    pub(crate) fn set_next(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        self.halfedges[a.index()].next = b;
        self.halfedges[b.index()].prev = a;
    }

    /// Re-anchor `v` on a boundary outgoing half-edge if it has one.
    pub(crate) fn adjust_outgoing_halfedge(&mut self, v: VertexId) {
        let boundary = self
            .vertex_halfedges(v)
            .find(|&he| self.is_boundary_halfedge(he));
        if let Some(he) = boundary {
            self.vertices[v.index()].halfedge = he;
        }
    }

    // ==================== Validation ====================

    /// Check the connectivity invariants and describe the first violation.
    pub fn validate(&self) -> Result<()> {
        let nh = self.halfedges.len();
        let in_range = |h: HalfEdgeId| h.is_valid() && h.index() < nh;

        if nh % 2 != 0 {
            return Err(MeshError::topology(format!("odd half-edge count {}", nh)));
        }

        for h in self.halfedge_ids() {
            let he = self.halfedge(h);
            if !in_range(he.next) || !in_range(he.prev) {
                return Err(MeshError::topology(format!("{:?} is not linked", h)));
            }
            if self.prev(he.next) != h || self.next(he.prev) != h {
                return Err(MeshError::topology(format!("{:?} has inconsistent next/prev", h)));
            }
            if !he.origin.is_valid() || he.origin.index() >= self.vertices.len() {
                return Err(MeshError::topology(format!("{:?} has no origin", h)));
            }
            if self.origin(he.next) != self.dest(h) {
                return Err(MeshError::topology(format!("{:?} does not chain to its next", h)));
            }
            if self.face_of(he.next) != he.face {
                return Err(MeshError::topology(format!("{:?} and its next disagree on face", h)));
            }
        }

        for e in self.edge_ids() {
            if self.edge_faces(e) == [None, None] {
                return Err(MeshError::topology(format!("{:?} has no incident face", e)));
            }
        }

        for (fi, face) in self.faces.iter().enumerate() {
            let f = FaceId::new(fi);
            if !in_range(face.halfedge) {
                return Err(MeshError::topology(format!("{:?} has no half-edge", f)));
            }
            let mut degree = 0;
            let mut he = face.halfedge;
            loop {
                if self.face_of(he) != f {
                    return Err(MeshError::topology(format!("{:?} does not own {:?}", f, he)));
                }
                degree += 1;
                he = self.next(he);
                if he == face.halfedge {
                    break;
                }
                if degree > nh {
                    return Err(MeshError::topology(format!("{:?} cycle does not close", f)));
                }
            }
            if degree < 3 {
                return Err(MeshError::topology(format!("{:?} has degree {}", f, degree)));
            }
        }

        for (v, vertex) in self.vertices() {
            if !vertex.halfedge.is_valid() {
                continue;
            }
            if !in_range(vertex.halfedge) || self.origin(vertex.halfedge) != v {
                return Err(MeshError::topology(format!("{:?} has a foreign half-edge", v)));
            }
            let mut has_boundary = false;
            let mut he = vertex.halfedge;
            let mut steps = 0;
            loop {
                has_boundary |= self.is_boundary_halfedge(he);
                he = self.next(he.twin());
                steps += 1;
                if he == vertex.halfedge {
                    break;
                }
                if steps > nh {
                    return Err(MeshError::topology(format!("{:?} fan does not close", v)));
                }
            }
            if has_boundary && !self.is_boundary_halfedge(vertex.halfedge) {
                return Err(MeshError::topology(format!(
                    "{:?} is on the boundary but anchored on an interior half-edge",
                    v
                )));
            }
        }

        Ok(())
    }

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Iterator over outgoing half-edges around a vertex.
pub struct VertexHalfEdgeIter<'a> {
    mesh: &'a HalfEdgeMesh,
    start: HalfEdgeId,
    current: HalfEdgeId,
    done: bool,
}

impl<'a> VertexHalfEdgeIter<'a> {
    fn new(mesh: &'a HalfEdgeMesh, v: VertexId) -> Self {
        let start = mesh.vertex(v).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a> Iterator for VertexHalfEdgeIter<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;

        // he: v -> w, twin(he): w -> v, next(twin(he)) leaves v again.
        self.current = self.mesh.next(self.current.twin());

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a> {
    mesh: &'a HalfEdgeMesh,
    start: HalfEdgeId,
    current: HalfEdgeId,
    done: bool,
}

impl<'a> FaceHalfEdgeIter<'a> {
    fn new(mesh: &'a HalfEdgeMesh, f: FaceId) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a> Iterator for FaceHalfEdgeIter<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.bounding_box().is_none());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = HalfEdgeMesh::new();
        let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));

        assert_eq!(mesh.num_vertices(), 2);
        assert_eq!(v0.index(), 0);
        assert_eq!(v1.index(), 1);
        assert!(mesh.is_isolated(v0));
        assert!(mesh.is_boundary_vertex(v0));
        assert_eq!(mesh.valence(v0), 0);
    }

    #[test]
    fn test_position_in_place() {
        let mut mesh = fixtures::unit_square();
        let v = VertexId::new(2);
        *mesh.position_mut(v) = Point3::new(5.0, 5.0, 5.0);
        assert_eq!(*mesh.position(v), Point3::new(5.0, 5.0, 5.0));
        mesh.set_position(v, Point3::new(1.0, 1.0, 0.0));
        assert_eq!(*mesh.position(v), Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_square_adjacency() {
        let mesh = fixtures::unit_square();
        let f = FaceId::new(0);

        let verts: Vec<_> = mesh.face_vertices(f).collect();
        assert_eq!(verts.len(), 4);
        // Cyclic order is preserved up to rotation.
        let start = verts.iter().position(|&v| v == VertexId::new(0)).unwrap();
        let rotated: Vec<usize> = (0..4).map(|i| verts[(start + i) % 4].index()).collect();
        assert_eq!(rotated, vec![0, 1, 2, 3]);

        assert_eq!(mesh.face_degree(f), 4);
        assert_eq!(mesh.face_edges(f).count(), 4);
        assert!(mesh.is_quad_mesh());
        assert!(!mesh.is_triangle_mesh());
        assert!(!mesh.is_closed());

        for e in mesh.edge_ids() {
            assert!(mesh.is_boundary_edge(e));
            let faces = mesh.edge_faces(e);
            assert_eq!(faces.iter().flatten().count(), 1);
        }
        for v in mesh.vertex_ids() {
            assert!(mesh.is_boundary_vertex(v));
            assert_eq!(mesh.valence(v), 2);
            assert_eq!(mesh.vertex_faces(v).collect::<Vec<_>>(), vec![f]);
        }
    }

    #[test]
    fn test_cube_is_closed() {
        let mesh = fixtures::unit_cube();

        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_edges(), 12);
        assert_eq!(mesh.num_faces(), 6);
        assert_eq!(mesh.euler_characteristic(), 2);
        assert!(mesh.is_closed());
        assert!(mesh.is_valid());

        for v in mesh.vertex_ids() {
            assert!(!mesh.is_boundary_vertex(v));
            assert_eq!(mesh.valence(v), 3);
            assert_eq!(mesh.vertex_faces(v).count(), 3);
            assert_eq!(mesh.vertex_edges(v).count(), 3);
        }
        for e in mesh.edge_ids() {
            assert!(!mesh.is_boundary_edge(e));
            let [a, b] = mesh.edge_vertices(e);
            assert_ne!(a, b);
            assert!((mesh.edge_length(e) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_one_ring_of_fan_center() {
        let mesh = fixtures::hexagon_fan();
        let center = VertexId::new(0);

        assert!(!mesh.is_boundary_vertex(center));
        let mut ring: Vec<usize> = mesh.vertex_neighbors(center).map(|v| v.index()).collect();
        ring.sort_unstable();
        assert_eq!(ring, vec![1, 2, 3, 4, 5, 6]);

        // Iteration is restartable.
        assert_eq!(mesh.vertex_neighbors(center).count(), 6);
        assert_eq!(mesh.vertex_neighbors(center).count(), 6);
    }

    #[test]
    fn test_find_edge() {
        let mesh = fixtures::two_triangles();
        let e = mesh.find_edge(VertexId::new(0), VertexId::new(1)).unwrap();
        assert!(!mesh.is_boundary_edge(e));
        assert!(mesh.find_edge(VertexId::new(2), VertexId::new(3)).is_none());

        let he = mesh.find_halfedge(VertexId::new(1), VertexId::new(0)).unwrap();
        assert_eq!(mesh.origin(he), VertexId::new(1));
        assert_eq!(mesh.dest(he), VertexId::new(0));
        assert_eq!(mesh.twin(mesh.twin(he)), he);
    }

    #[test]
    fn test_geometry_helpers() {
        let mesh = fixtures::unit_square();
        let c = mesh.face_centroid(FaceId::new(0));
        assert!((c - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-12);

        let e = mesh.find_edge(VertexId::new(0), VertexId::new(1)).unwrap();
        assert!((mesh.edge_midpoint(e) - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-12);

        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_validate_detects_broken_link() {
        let mut mesh = fixtures::two_triangles();
        let h = HalfEdgeId::new(0);
        let bogus = mesh.next(mesh.next(h));
        mesh.halfedges[h.index()].next = bogus;
        assert!(mesh.validate().is_err());
    }
}

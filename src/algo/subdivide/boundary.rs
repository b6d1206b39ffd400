//! Boundary classification shared by both subdivision schemes.
//!
//! Boundary elements take different stencils than interior ones, so each step
//! classifies the source mesh once up front.

use crate::error::{MeshError, Result};
use crate::mesh::{EdgeId, HalfEdgeMesh, VertexId};

/// Per-vertex and per-edge boundary flags for one mesh.
///
/// An edge is a boundary edge iff it has exactly one incident face. A vertex
/// is a boundary vertex iff one of its incident half-edges has no face.
#[derive(Debug, Clone)]
pub struct BoundaryMap {
    vertices: Vec<bool>,
    edges: Vec<bool>,
}

impl BoundaryMap {
    /// Classify every vertex and edge of `mesh`.
    pub fn classify(mesh: &HalfEdgeMesh) -> Self {
        let vertices = mesh
            .vertex_ids()
            .map(|v| !mesh.is_isolated(v) && mesh.is_boundary_vertex(v))
            .collect();
        let edges = mesh.edge_ids().map(|e| mesh.is_boundary_edge(e)).collect();
        Self { vertices, edges }
    }

    /// Whether `v` lies on the boundary. Isolated vertices are not boundary.
    #[inline]
    pub fn is_boundary_vertex(&self, v: VertexId) -> bool {
        self.vertices.get(v.index()).copied().unwrap_or(false)
    }

    /// Whether `e` has exactly one incident face.
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId) -> bool {
        self.edges.get(e.index()).copied().unwrap_or(false)
    }

    /// Number of boundary vertices.
    pub fn num_boundary_vertices(&self) -> usize {
        self.vertices.iter().filter(|&&b| b).count()
    }

    /// Number of boundary edges.
    pub fn num_boundary_edges(&self) -> usize {
        self.edges.iter().filter(|&&b| b).count()
    }

    /// True if nothing is on the boundary.
    pub fn is_closed(&self) -> bool {
        self.edges.iter().all(|&b| !b)
    }
}

/// The two vertices adjacent to `v` along boundary edges.
///
/// A manifold boundary vertex has exactly two. Anything else (an isolated
/// vertex, an interior vertex, or a fan touching the boundary more than once)
/// is reported as a topology error instead of being mis-weighted.
pub fn boundary_neighbors(mesh: &HalfEdgeMesh, v: VertexId) -> Result<[VertexId; 2]> {
    let mut found = [VertexId::invalid(); 2];
    let mut count = 0usize;

    for he in mesh.vertex_halfedges(v) {
        if !mesh.is_boundary_edge(he.edge()) {
            continue;
        }
        if count < 2 {
            found[count] = mesh.dest(he);
        }
        count += 1;
    }

    if count != 2 {
        return Err(MeshError::topology(format!(
            "boundary vertex {:?} has {} boundary neighbors, expected 2",
            v, count
        )));
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;
    use nalgebra::Point3;

    #[test]
    fn test_square_is_all_boundary() {
        let mesh = fixtures::unit_square();
        let map = BoundaryMap::classify(&mesh);

        assert_eq!(map.num_boundary_vertices(), 4);
        assert_eq!(map.num_boundary_edges(), 4);
        assert!(!map.is_closed());
    }

    #[test]
    fn test_cube_is_closed() {
        let mesh = fixtures::unit_cube();
        let map = BoundaryMap::classify(&mesh);

        assert!(map.is_closed());
        assert_eq!(map.num_boundary_vertices(), 0);
        assert!(mesh.vertex_ids().all(|v| !map.is_boundary_vertex(v)));
    }

    #[test]
    fn test_fan_center_is_interior() {
        let mesh = fixtures::hexagon_fan();
        let map = BoundaryMap::classify(&mesh);

        assert!(!map.is_boundary_vertex(VertexId::new(0)));
        for k in 1..7 {
            assert!(map.is_boundary_vertex(VertexId::new(k)));
        }
        // Six spokes are interior, six rim edges are boundary.
        assert_eq!(map.num_boundary_edges(), 6);
        assert_eq!(mesh.num_edges(), 12);
    }

    #[test]
    fn test_boundary_neighbors_on_rim() {
        let mesh = fixtures::hexagon_fan();
        let mut n = boundary_neighbors(&mesh, VertexId::new(1)).unwrap();
        n.sort();
        assert_eq!(n, [VertexId::new(2), VertexId::new(6)]);
    }

    #[test]
    fn test_boundary_neighbors_rejects_interior() {
        let mesh = fixtures::hexagon_fan();
        let err = boundary_neighbors(&mesh, VertexId::new(0)).unwrap_err();
        assert!(err.is_topology());
    }

    #[test]
    fn test_boundary_neighbors_rejects_bowtie() {
        let mesh = fixtures::bowtie();

        let err = boundary_neighbors(&mesh, VertexId::new(0)).unwrap_err();
        assert!(err.is_topology());
    }

    #[test]
    fn test_isolated_vertex_is_not_boundary() {
        let mut mesh = fixtures::single_triangle();
        let v = mesh.add_vertex(Point3::new(5.0, 5.0, 5.0));
        let map = BoundaryMap::classify(&mesh);

        assert!(!map.is_boundary_vertex(v));
        assert!(boundary_neighbors(&mesh, v).is_err());
    }
}

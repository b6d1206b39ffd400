//! Loop subdivision for triangle meshes.

use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};

use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{EdgeId, EdgeProperty, HalfEdgeMesh, PropertyMap, VertexId, VertexProperty};

use super::boundary::{boundary_neighbors, BoundaryMap};
use super::driver::{subdivide, subdivide_with_progress, Scheme};
use super::{instantiate, try_map_indices, SubdivideOptions};

/// Points computed by the Loop compute pass, indexed by source handles.
#[derive(Debug, Clone)]
pub struct LoopPoints {
    /// New point on every edge.
    pub edge_points: EdgeProperty<Point3<f64>>,
    /// Updated position of every vertex referenced by a face.
    pub vertex_points: VertexProperty<Point3<f64>>,
}

/// Performs Loop subdivision on a triangle mesh.
///
/// Each triangle is split into four. Meshes with any non-triangular face are
/// rejected with [`MeshError::InvalidInput`] before anything is computed, and
/// the mesh is left untouched.
///
/// # Vertex Rules
///
/// - **Edge point**: midpoint on the boundary, otherwise
///   `3/8 (p0 + p1) + 1/8 (p2 + p3)` with p2, p3 the opposite vertices
/// - **Vertex point**: `3/4 S + 1/8 (a + b)` on the boundary, otherwise
///   `(1 - β) S + β Q` with Q the one-ring average and
///   `β = 5/8 - (3/8 + 1/4 cos(2π/n))²`
pub fn loop_subdivide(mesh: &mut HalfEdgeMesh, options: &SubdivideOptions) -> Result<()> {
    subdivide(mesh, Scheme::Loop, options)
}

/// Loop subdivision with progress reporting.
pub fn loop_subdivide_with_progress(
    mesh: &mut HalfEdgeMesh,
    options: &SubdivideOptions,
    progress: &Progress,
) -> Result<()> {
    subdivide_with_progress(mesh, Scheme::Loop, options, progress)
}

/// Total weight given to the one-ring of an interior vertex of valence `n`.
#[inline]
pub fn loop_beta(n: usize) -> f64 {
    let c = 0.375 + 0.25 * (2.0 * PI / n as f64).cos();
    0.625 - c * c
}

/// Reject anything that is not a pure triangulation.
pub(crate) fn check_triangles(mesh: &HalfEdgeMesh) -> Result<()> {
    match mesh.face_ids().find(|&f| mesh.face_degree(f) != 3) {
        Some(f) => Err(MeshError::InvalidInput(format!(
            "loop subdivision needs a triangle mesh, {:?} has {} sides",
            f,
            mesh.face_degree(f)
        ))),
        None => Ok(()),
    }
}

/// Compute edge and vertex points from the unmodified source mesh.
pub fn compute(mesh: &HalfEdgeMesh, parallel: bool) -> Result<LoopPoints> {
    check_triangles(mesh)?;
    let boundary = BoundaryMap::classify(mesh);

    let edge_points = try_map_indices(mesh.num_edges(), parallel, |i| {
        let e = EdgeId::new(i);
        let h = e.halfedge(0);
        let t = e.halfedge(1);
        let p0 = mesh.position(mesh.origin(h)).coords;
        let p1 = mesh.position(mesh.origin(t)).coords;

        if boundary.is_boundary_edge(e) {
            return Ok(Point3::from((p0 + p1) * 0.5));
        }

        // The vertex of each incident triangle not on `e`.
        let p2 = mesh.position(mesh.dest(mesh.next(h))).coords;
        let p3 = mesh.position(mesh.dest(mesh.next(t))).coords;
        Ok(Point3::from((p0 + p1) * 0.375 + (p2 + p3) * 0.125))
    })?;

    let vertex_points = try_map_indices(mesh.num_vertices(), parallel, |i| {
        let v = VertexId::new(i);
        if mesh.is_isolated(v) {
            return Ok(None);
        }
        let p = mesh.position(v).coords;

        if boundary.is_boundary_vertex(v) {
            let [a, b] = boundary_neighbors(mesh, v)?;
            let ring = mesh.position(a).coords + mesh.position(b).coords;
            return Ok(Some(Point3::from(p * 0.75 + ring * 0.125)));
        }

        let mut n = 0usize;
        let mut q = Vector3::zeros();
        for w in mesh.vertex_neighbors(v) {
            q += mesh.position(w).coords;
            n += 1;
        }
        if n < 3 {
            return Err(MeshError::topology(format!(
                "interior {:?} has valence {}",
                v, n
            )));
        }
        q /= n as f64;

        let beta = loop_beta(n);
        Ok(Some(Point3::from(p * (1.0 - beta) + q * beta)))
    })?;

    Ok(LoopPoints {
        edge_points: PropertyMap::from_values(edge_points),
        vertex_points: PropertyMap::from_slots(vertex_points),
    })
}

/// Build the subdivided mesh from the source connectivity and `points`.
///
/// ```text
///            v0
///           /  \
///         e0 -- e1
///         / \  / \
///       v2 - e2 - v1
/// ```
///
/// Walking the face half-edges `h0, h1, h2`, corner `v_i` is `dest(h_i)` and
/// `e_i` is the edge point of `h_i`. The four triangles keep the orientation
/// of the source face.
pub fn rebuild(mesh: &HalfEdgeMesh, points: &LoopPoints) -> Result<HalfEdgeMesh> {
    let mut out = HalfEdgeMesh::with_capacity(
        mesh.num_vertices() + mesh.num_edges(),
        2 * mesh.num_edges() + 3 * mesh.num_faces(),
        4 * mesh.num_faces(),
    );

    let mut carried: VertexProperty<VertexId> = PropertyMap::for_vertices(mesh);
    let mut split: EdgeProperty<VertexId> = PropertyMap::for_edges(mesh);

    for f in mesh.face_ids() {
        let mut hs = mesh.face_halfedges(f);
        let (h0, h1, h2) = match (hs.next(), hs.next(), hs.next(), hs.next()) {
            (Some(h0), Some(h1), Some(h2), None) => (h0, h1, h2),
            _ => {
                return Err(MeshError::InvalidInput(format!(
                    "{:?} is not a triangle",
                    f
                )))
            }
        };

        let v0 = instantiate(&mut out, &mut carried, &points.vertex_points, mesh.dest(h0))?;
        let v1 = instantiate(&mut out, &mut carried, &points.vertex_points, mesh.dest(h1))?;
        let v2 = instantiate(&mut out, &mut carried, &points.vertex_points, mesh.dest(h2))?;
        let e0 = instantiate(&mut out, &mut split, &points.edge_points, h0.edge())?;
        let e1 = instantiate(&mut out, &mut split, &points.edge_points, h1.edge())?;
        let e2 = instantiate(&mut out, &mut split, &points.edge_points, h2.edge())?;

        out.add_face(&[v0, e1, e0])?;
        out.add_face(&[e1, v1, e2])?;
        out.add_face(&[e0, e1, e2])?;
        out.add_face(&[e0, e2, v2])?;
    }

    Ok(out)
}

/// One full Loop step: check, compute, then rebuild.
pub(crate) fn step(mesh: &HalfEdgeMesh, parallel: bool) -> Result<HalfEdgeMesh> {
    let points = compute(mesh, parallel)?;
    log::debug!(
        "loop: {} edge points, {} vertex points",
        points.edge_points.len(),
        points.vertex_points.count_set()
    );

    let out = rebuild(mesh, &points)?;
    log::debug!(
        "loop: {}v/{}f -> {}v/{}f",
        mesh.num_vertices(),
        mesh.num_faces(),
        out.num_vertices(),
        out.num_faces()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;

    fn approx(a: &Point3<f64>, b: &Point3<f64>) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_beta_regular_valences() {
        assert!((loop_beta(3) - 0.5625).abs() < 1e-12);
        assert!((loop_beta(6) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_single_triangle() {
        let mesh = fixtures::single_triangle();
        let out = step(&mesh, false).unwrap();

        assert_eq!(out.num_vertices(), 6);
        assert_eq!(out.num_faces(), 4);
        assert!(out.is_triangle_mesh());
        assert!(out.is_valid());
    }

    #[test]
    fn test_interior_edge_point() {
        let mesh = fixtures::two_triangles();
        let points = compute(&mesh, false).unwrap();

        let e = mesh
            .find_edge(VertexId::new(0), VertexId::new(1))
            .unwrap();
        // 3/8 ((0,0,0) + (2,0,0)) + 1/8 ((1,2,0) + (1,-2,0))
        assert!(approx(points.edge_points.get(e).unwrap(), &Point3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_boundary_edge_point_is_midpoint() {
        let mesh = fixtures::two_triangles();
        let points = compute(&mesh, true).unwrap();

        let e = mesh
            .find_edge(VertexId::new(1), VertexId::new(2))
            .unwrap();
        assert!(approx(points.edge_points.get(e).unwrap(), &Point3::new(1.5, 1.0, 0.0)));
    }

    #[test]
    fn test_boundary_vertex_rule() {
        let mesh = fixtures::hexagon_fan();
        let points = compute(&mesh, false).unwrap();

        // 3/4 (1,0,0) + 1/8 ((0.5, s) + (0.5, -s))
        let vp = points.vertex_points.get(VertexId::new(1)).unwrap();
        assert!(approx(vp, &Point3::new(0.875, 0.0, 0.0)));

        // The center sits at its ring average, so it stays put.
        let vp = points.vertex_points.get(VertexId::new(0)).unwrap();
        assert!(approx(vp, &Point3::origin()));
    }

    #[test]
    fn test_interior_vertex_rule() {
        let mesh = fixtures::octahedron();
        let points = compute(&mesh, false).unwrap();

        // Valence 4, ring average at the origin.
        let beta = loop_beta(4);
        assert!((beta - 0.484375).abs() < 1e-12);
        let vp = points.vertex_points.get(VertexId::new(0)).unwrap();
        assert!(approx(vp, &Point3::new(1.0 - beta, 0.0, 0.0)));
    }

    #[test]
    fn test_counts_and_closedness() {
        let mut mesh = fixtures::octahedron();

        for _ in 0..3 {
            let (v, e, f) = (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces());
            mesh = step(&mesh, true).unwrap();

            assert_eq!(mesh.num_vertices(), v + e);
            assert_eq!(mesh.num_faces(), 4 * f);
            assert!(mesh.is_triangle_mesh());
            assert!(mesh.is_closed());
            assert_eq!(mesh.euler_characteristic(), 2);
            assert!(mesh.is_valid());
        }
    }

    #[test]
    fn test_grid_with_boundary() {
        let mesh = fixtures::triangle_grid(3);
        let (v, e, f) = (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces());

        let out = step(&mesh, true).unwrap();
        assert_eq!(out.num_vertices(), v + e);
        assert_eq!(out.num_faces(), 4 * f);
        assert_eq!(out.euler_characteristic(), 1);
        assert!(out.is_valid());
    }

    #[test]
    fn test_orientation_is_preserved() {
        let mesh = fixtures::single_triangle();
        let out = step(&mesh, false).unwrap();

        // The source triangle is counter-clockwise seen from +z; so is every child.
        for f in out.face_ids() {
            let p: Vec<_> = out.face_vertices(f).map(|v| *out.position(v)).collect();
            let n = (p[1] - p[0]).cross(&(p[2] - p[0]));
            assert!(n.z > 0.0);
        }
    }

    #[test]
    fn test_rejects_non_triangles() {
        let mesh = fixtures::unit_square();
        let err = compute(&mesh, false).unwrap_err();
        assert!(err.is_invalid_input());

        let mesh = fixtures::quad_and_triangle();
        assert!(step(&mesh, true).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_valence_two_vertex_is_rejected() {
        let mesh = fixtures::triangle_pillow();
        assert!(mesh.is_closed());

        let err = compute(&mesh, false).unwrap_err();
        assert!(err.is_topology());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mesh = fixtures::triangle_grid(2);
        let seq = step(&mesh, false).unwrap();
        let par = step(&mesh, true).unwrap();

        assert_eq!(seq.num_vertices(), par.num_vertices());
        for v in seq.vertex_ids() {
            assert!(approx(seq.position(v), par.position(v)));
        }
    }

    #[test]
    fn test_wrapper_rejects_quads_without_mutation() {
        let mut mesh = fixtures::unit_square();
        let err = loop_subdivide(&mut mesh, &SubdivideOptions::new(1)).unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_vertices(), 4);
    }
}

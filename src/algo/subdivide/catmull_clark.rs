//! Catmull-Clark subdivision for arbitrary polygon meshes.

use nalgebra::{Point3, Vector3};

use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{
    EdgeId, EdgeProperty, FaceId, FaceProperty, HalfEdgeMesh, PropertyMap, VertexId,
    VertexProperty,
};

use super::boundary::{boundary_neighbors, BoundaryMap};
use super::driver::{subdivide, subdivide_with_progress, Scheme};
use super::{instantiate, try_map_indices, SubdivideOptions};

/// Points computed by the Catmull-Clark compute pass.
///
/// Every map is indexed by a handle of the *source* mesh. `vertex_points` is
/// unset for isolated vertices, which do not survive subdivision.
#[derive(Debug, Clone)]
pub struct CatmullClarkPoints {
    /// Centroid of every face.
    pub face_points: FaceProperty<Point3<f64>>,
    /// New point on every edge.
    pub edge_points: EdgeProperty<Point3<f64>>,
    /// Updated position of every vertex referenced by a face.
    pub vertex_points: VertexProperty<Point3<f64>>,
}

/// Performs Catmull-Clark subdivision on a polygon mesh.
///
/// Each face of degree *n* becomes *n* quads, so after one iteration the mesh
/// is all quads. On error the mesh is left as it was before the call.
///
/// # Vertex Rules
///
/// - **Face point**: centroid of the face vertices
/// - **Edge point**: midpoint on the boundary, otherwise the average of both
///   endpoints and both adjacent face points
/// - **Vertex point**: `(6S + a + b) / 8` on the boundary (a, b the boundary
///   neighbors), otherwise `((n-3)S + F + E) / n` where:
///   - F = average of adjacent face points
///   - E = sum of doubled adjacent edge points, divided by n
///   - S = original position
///   - n = number of adjacent faces
pub fn catmull_clark_subdivide(mesh: &mut HalfEdgeMesh, options: &SubdivideOptions) -> Result<()> {
    subdivide(mesh, Scheme::CatmullClark, options)
}

/// Catmull-Clark subdivision with progress reporting.
pub fn catmull_clark_subdivide_with_progress(
    mesh: &mut HalfEdgeMesh,
    options: &SubdivideOptions,
    progress: &Progress,
) -> Result<()> {
    subdivide_with_progress(mesh, Scheme::CatmullClark, options, progress)
}

/// Compute face, edge and vertex points from the unmodified source mesh.
///
/// Only original positions are read. With `parallel` set, each element kind
/// is evaluated on the rayon pool; the result does not depend on it.
pub fn compute(mesh: &HalfEdgeMesh, parallel: bool) -> Result<CatmullClarkPoints> {
    let boundary = BoundaryMap::classify(mesh);

    let face_points = try_map_indices(mesh.num_faces(), parallel, |i| {
        Ok(mesh.face_centroid(FaceId::new(i)))
    })?;

    let edge_points = try_map_indices(mesh.num_edges(), parallel, |i| {
        let e = EdgeId::new(i);
        let [v0, v1] = mesh.edge_vertices(e);
        let p0 = mesh.position(v0).coords;
        let p1 = mesh.position(v1).coords;

        if boundary.is_boundary_edge(e) {
            return Ok(Point3::from((p0 + p1) * 0.5));
        }
        match mesh.edge_faces(e) {
            [Some(f0), Some(f1)] => {
                let q0 = face_points[f0.index()].coords;
                let q1 = face_points[f1.index()].coords;
                Ok(Point3::from((p0 + p1 + q0 + q1) * 0.25))
            }
            _ => Err(MeshError::topology(format!("{:?} has no incident face", e))),
        }
    })?;

    let vertex_points = try_map_indices(mesh.num_vertices(), parallel, |i| {
        let v = VertexId::new(i);
        if mesh.is_isolated(v) {
            return Ok(None);
        }
        let p = mesh.position(v).coords;

        if boundary.is_boundary_vertex(v) {
            let [a, b] = boundary_neighbors(mesh, v)?;
            let sum = p * 6.0 + mesh.position(a).coords + mesh.position(b).coords;
            return Ok(Some(Point3::from(sum * 0.125)));
        }

        let mut n = 0usize;
        let mut f_sum = Vector3::zeros();
        let mut e_sum = Vector3::zeros();
        for he in mesh.vertex_halfedges(v) {
            let f = mesh.face_of(he).valid().ok_or_else(|| {
                MeshError::topology(format!("interior {:?} borders a hole", v))
            })?;
            f_sum += face_points[f.index()].coords;
            e_sum += edge_points[he.edge().index()].coords * 2.0;
            n += 1;
        }
        if n < 3 {
            return Err(MeshError::topology(format!(
                "interior {:?} has valence {}",
                v, n
            )));
        }

        let n_f = n as f64;
        let new_pos = (p * (n_f - 3.0) + f_sum / n_f + e_sum / n_f) / n_f;
        Ok(Some(Point3::from(new_pos)))
    })?;

    Ok(CatmullClarkPoints {
        face_points: PropertyMap::from_values(face_points),
        edge_points: PropertyMap::from_values(edge_points),
        vertex_points: PropertyMap::from_slots(vertex_points),
    })
}

/// Build the subdivided mesh from the source connectivity and `points`.
///
/// For each face and each of its half-edges `h`, one quad
/// `[face point, edge point of h, dest(h), edge point of next(h)]` is emitted.
/// Shared edge points and carried-over vertices are created once.
pub fn rebuild(mesh: &HalfEdgeMesh, points: &CatmullClarkPoints) -> Result<HalfEdgeMesh> {
    let corners: usize = mesh.face_ids().map(|f| mesh.face_degree(f)).sum();
    let mut out = HalfEdgeMesh::with_capacity(
        mesh.num_vertices() + mesh.num_edges() + mesh.num_faces(),
        2 * mesh.num_edges() + corners,
        corners,
    );

    let mut carried: VertexProperty<VertexId> = PropertyMap::for_vertices(mesh);
    let mut split: EdgeProperty<VertexId> = PropertyMap::for_edges(mesh);

    for f in mesh.face_ids() {
        let fp = points
            .face_points
            .get(f)
            .ok_or_else(|| MeshError::topology(format!("no face point for {:?}", f)))?;
        let center = out.add_vertex(*fp);

        for he in mesh.face_halfedges(f) {
            let next = mesh.next(he);
            let e0 = instantiate(&mut out, &mut split, &points.edge_points, he.edge())?;
            let corner = instantiate(&mut out, &mut carried, &points.vertex_points, mesh.dest(he))?;
            let e1 = instantiate(&mut out, &mut split, &points.edge_points, next.edge())?;
            out.add_face(&[center, e0, corner, e1])?;
        }
    }

    Ok(out)
}

/// One full Catmull-Clark step: compute, then rebuild.
pub(crate) fn step(mesh: &HalfEdgeMesh, parallel: bool) -> Result<HalfEdgeMesh> {
    let points = compute(mesh, parallel)?;
    log::debug!(
        "catmull-clark: {} face points, {} edge points, {} vertex points",
        points.face_points.len(),
        points.edge_points.len(),
        points.vertex_points.count_set()
    );

    let out = rebuild(mesh, &points)?;
    log::debug!(
        "catmull-clark: {}v/{}f -> {}v/{}f",
        mesh.num_vertices(),
        mesh.num_faces(),
        out.num_vertices(),
        out.num_faces()
    );
    Ok(out)
}

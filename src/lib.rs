//! # subsurf
//!
//! Subdivision surfaces on a half-edge mesh.
//!
//! subsurf refines polygon meshes towards their smooth limit surface with the
//! two classical schemes:
//!
//! - **Catmull-Clark**: any polygon mesh, every face of degree *n* becomes
//!   *n* quads
//! - **Loop**: triangle meshes only, every triangle becomes four
//!
//! ## Features
//!
//! - **Half-edge data structure**: O(1) adjacency queries with type-safe handles
//!   and manifold-checked incremental face insertion
//! - **Two-pass subdivision**: a parallel compute pass over the unmodified
//!   mesh, then a rebuild pass producing a brand-new mesh
//! - **Atomic batches**: a failed batch leaves the mesh and depth untouched
//! - **PLY I/O**: polygon faces preserved on load and save
//!
//! ## Quick Start
//!
//! ```no_run
//! use subsurf::prelude::*;
//!
//! let mesh = subsurf::io::load("model.ply").unwrap();
//!
//! let mut subdivider = Subdivider::new(mesh);
//! if !subdivider.exceeds_depth(2, RECOMMENDED_MAX_DEPTH) {
//!     subdivider.apply(Scheme::CatmullClark, 2).unwrap();
//! }
//!
//! subsurf::io::save(subdivider.current_mesh(), "smooth.ply").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use subsurf::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1],  // bottom
//!     [0, 1, 3],  // front
//!     [1, 2, 3],  // right
//!     [2, 0, 3],  // left
//! ];
//!
//! let mut mesh = build_from_triangles(&vertices, &faces).unwrap();
//! subdivide(&mut mesh, Scheme::Loop, &SubdivideOptions::new(1)).unwrap();
//!
//! assert_eq!(mesh.num_vertices(), 4 + 6);
//! assert_eq!(mesh.num_faces(), 16);
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use subsurf::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! # ];
//! # let mesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//! let v = VertexId::new(0);
//! for neighbor in mesh.vertex_neighbors(v) {
//!     println!("Neighbor: {:?}", neighbor);
//! }
//!
//! let f = FaceId::new(0);
//! let corners: Vec<_> = mesh.face_vertices(f).collect();
//! assert_eq!(corners.len(), 3);
//! assert!(mesh.is_boundary_vertex(v));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use subsurf::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::subdivide::{
        subdivide, subdivide_once, Scheme, SubdivideOptions, Subdivider, RECOMMENDED_MAX_DEPTH,
    };
    pub use crate::algo::Progress;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex, EdgeId,
        FaceId, HalfEdgeId, HalfEdgeMesh, Handle, PropertyMap, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];

        let faces = vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ];

        let mesh = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);
        // Closed: every half-edge belongs to a face.
        assert_eq!(mesh.num_halfedges(), 12);
        assert!(mesh.is_valid());

        for v in mesh.vertex_ids() {
            assert!(!mesh.is_boundary_vertex(v), "vertex {:?} should not be on boundary", v);
        }
    }

    #[test]
    fn test_both_schemes_end_to_end() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        let mesh = build_from_triangles(&vertices, &faces).unwrap();

        let mut subdivider = Subdivider::new(mesh);
        subdivider.apply(Scheme::Loop, 2).unwrap();
        subdivider.apply(Scheme::CatmullClark, 1).unwrap();

        let out = subdivider.current_mesh();
        assert_eq!(subdivider.applied_depth(), 3);
        assert!(out.is_quad_mesh());
        assert!(out.is_closed());
        assert_eq!(out.euler_characteristic(), 2);
        assert!(out.is_valid());
    }
}

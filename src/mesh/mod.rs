//! Core mesh data structures.
//!
//! This module provides the half-edge mesh representation (the mesh store the
//! subdivision passes read from and write to) and the per-pass property maps.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], which represents a polygon mesh using
//! a half-edge (doubly-connected edge list) data structure. This representation
//! provides O(1) adjacency queries and keeps every edge bordered by at most two
//! faces.
//!
//! # Handle Types
//!
//! Mesh elements are identified by type-safe handles:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`EdgeId`] - Identifies a full edge
//! - [`FaceId`] - Identifies a face
//!
//! # Construction
//!
//! Meshes are built incrementally with [`HalfEdgeMesh::add_face`] or from
//! face-vertex lists:
//!
//! ```
//! use subsurf::mesh::{HalfEdgeMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! ```

mod builder;
mod halfedge;
mod index;
mod property;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::{build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex};
pub use halfedge::{Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex, VertexHalfEdgeIter};
pub use index::{EdgeId, FaceId, HalfEdgeId, Handle, VertexId};
pub use property::{EdgeProperty, FaceProperty, PropertyMap, VertexProperty};

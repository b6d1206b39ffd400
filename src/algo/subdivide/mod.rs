//! Mesh subdivision algorithms.
//!
//! Each step of either scheme runs in two passes over an unmodified source
//! mesh:
//!
//! 1. **Compute pass**: auxiliary points (face points, edge points) and the
//!    new positions of existing vertices, all from the original positions.
//! 2. **Rebuild pass**: a brand-new [`HalfEdgeMesh`] whose connectivity is
//!    derived from the source faces, with every shared vertex and edge point
//!    instantiated exactly once.
//!
//! The source mesh is never mutated, so a failed step leaves it intact.
//!
//! # Catmull-Clark Subdivision (Arbitrary Polygons)
//!
//! Catmull-Clark subdivision (Catmull & Clark, 1978) turns every face of
//! degree *n* into *n* quadrilaterals. After one step the mesh is all quads.
//!
//! # Loop Subdivision (Triangle Meshes)
//!
//! Loop subdivision (Loop, 1987) splits every triangle into four. It is only
//! defined for pure triangulations; other meshes are rejected up front with
//! [`MeshError::InvalidInput`].
//!
//! # Example
//!
//! ```
//! use subsurf::prelude::*;
//! use subsurf::algo::subdivide::{Scheme, Subdivider};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//!
//! let mut subdivider = Subdivider::new(mesh);
//! subdivider.apply(Scheme::CatmullClark, 2).unwrap();
//!
//! assert_eq!(subdivider.applied_depth(), 2);
//! assert_eq!(subdivider.current_mesh().num_faces(), 16);
//! ```
//!
//! # References
//!
//! - Loop, C. (1987). "Smooth Subdivision Surfaces Based on Triangles."
//!   Master's thesis, University of Utah.
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod boundary;
pub mod catmull_clark;
mod driver;
pub mod loop_subdivision;

use nalgebra::Point3;
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeMesh, Handle, PropertyMap, VertexId};

pub use boundary::{boundary_neighbors, BoundaryMap};
pub use catmull_clark::{
    catmull_clark_subdivide, catmull_clark_subdivide_with_progress, CatmullClarkPoints,
};
pub use driver::{
    subdivide, subdivide_once, subdivide_with_progress, Scheme, Subdivider,
    RECOMMENDED_MAX_DEPTH,
};
pub use loop_subdivision::{loop_subdivide, loop_subdivide_with_progress, LoopPoints};

/// Options for subdivision algorithms.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Number of subdivision iterations.
    pub iterations: usize,

    /// Whether to run the compute pass in parallel (default: true).
    pub parallel: bool,
}

impl SubdivideOptions {
    /// Create options with the specified number of iterations.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            parallel: true,
        }
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Evaluate `f` for every index in `0..len`, on the rayon pool if `parallel`.
///
/// Output order matches index order either way, and the first error wins.
fn try_map_indices<T, F>(len: usize, parallel: bool, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    if parallel {
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}

/// Return the new-mesh vertex for `handle`, creating it on first use.
///
/// `created` is the per-pass dedup slot; `points` holds the position computed
/// for each source element. A missing point means the compute pass skipped
/// the element, which the rebuild pass treats as broken topology.
fn instantiate<H: Handle>(
    out: &mut HalfEdgeMesh,
    created: &mut PropertyMap<H, VertexId>,
    points: &PropertyMap<H, Point3<f64>>,
    handle: H,
) -> Result<VertexId> {
    created
        .get_or_try_insert_with(handle, || {
            let p = points
                .get(handle)
                .ok_or_else(|| MeshError::topology(format!("no point computed for {:?}", handle)))?;
            Ok(out.add_vertex(*p))
        })
        .copied()
}

//! Subdivision driver: scheme dispatch, batching and the depth counter.

use std::fmt;
use std::str::FromStr;

use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::HalfEdgeMesh;

use super::{catmull_clark, loop_subdivision, SubdivideOptions};

/// Cumulative depth beyond which callers should refuse further subdivision.
///
/// Every step multiplies the face count by roughly four, so meshes become
/// unwieldy after a handful of steps. [`Subdivider::apply`] does not enforce
/// this; callers check [`Subdivider::exceeds_depth`] before applying.
pub const RECOMMENDED_MAX_DEPTH: usize = 5;

/// Subdivision scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Catmull-Clark, any polygon mesh, produces quads.
    CatmullClark,
    /// Loop, triangle meshes only, produces triangles.
    Loop,
}

impl Scheme {
    /// Name used on the command line and in log messages.
    pub fn name(self) -> &'static str {
        match self {
            Scheme::CatmullClark => "catmull-clark",
            Scheme::Loop => "loop",
        }
    }

    /// Check that `mesh` can be subdivided with this scheme.
    ///
    /// Only Loop has a precondition: every face must be a triangle.
    pub fn check(self, mesh: &HalfEdgeMesh) -> Result<()> {
        match self {
            Scheme::CatmullClark => Ok(()),
            Scheme::Loop => loop_subdivision::check_triangles(mesh),
        }
    }

    /// Run one compute + rebuild step, returning the new mesh.
    fn step(self, mesh: &HalfEdgeMesh, parallel: bool) -> Result<HalfEdgeMesh> {
        match self {
            Scheme::CatmullClark => catmull_clark::step(mesh, parallel),
            Scheme::Loop => loop_subdivision::step(mesh, parallel),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "catmull-clark" | "catmull_clark" | "catmullclark" | "cc" => Ok(Scheme::CatmullClark),
            "loop" => Ok(Scheme::Loop),
            _ => Err(MeshError::invalid_param(
                "scheme",
                s,
                "expected `catmull-clark` or `loop`",
            )),
        }
    }
}

/// Run `times` steps starting from `mesh`, or nothing at all on error.
fn run_batch(
    mesh: &HalfEdgeMesh,
    scheme: Scheme,
    times: usize,
    parallel: bool,
    progress: &Progress,
) -> Result<Option<HalfEdgeMesh>> {
    if times == 0 {
        return Ok(None);
    }
    scheme.check(mesh)?;

    progress.report(0, times, scheme.name());
    let mut current = scheme.step(mesh, parallel)?;
    for i in 1..times {
        progress.report(i, times, scheme.name());
        current = scheme.step(&current, parallel)?;
    }
    progress.report(times, times, scheme.name());

    Ok(Some(current))
}

/// Owns the current mesh and counts how many steps have been applied to it.
///
/// # Example
///
/// ```
/// use subsurf::algo::subdivide::{Scheme, Subdivider, RECOMMENDED_MAX_DEPTH};
/// use subsurf::mesh::build_from_quads;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
/// let mut subdivider = Subdivider::new(mesh);
///
/// // Loop needs triangles: rejected, nothing changes.
/// assert!(subdivider.apply(Scheme::Loop, 1).is_err());
/// assert_eq!(subdivider.applied_depth(), 0);
///
/// if !subdivider.exceeds_depth(3, RECOMMENDED_MAX_DEPTH) {
///     subdivider.apply(Scheme::CatmullClark, 3).unwrap();
/// }
/// assert_eq!(subdivider.applied_depth(), 3);
/// assert!(subdivider.exceeds_depth(3, RECOMMENDED_MAX_DEPTH));
/// ```
#[derive(Debug, Clone)]
pub struct Subdivider {
    mesh: HalfEdgeMesh,
    depth: usize,
    parallel: bool,
}

impl Subdivider {
    /// Take ownership of `mesh` with a depth of zero.
    pub fn new(mesh: HalfEdgeMesh) -> Self {
        Self {
            mesh,
            depth: 0,
            parallel: true,
        }
    }

    /// Set whether the compute pass runs on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the current mesh with a new source mesh and reset the depth.
    pub fn load(&mut self, mesh: HalfEdgeMesh) {
        self.mesh = mesh;
        self.depth = 0;
    }

    /// The current mesh.
    pub fn current_mesh(&self) -> &HalfEdgeMesh {
        &self.mesh
    }

    /// Consume the driver, returning the current mesh.
    pub fn into_mesh(self) -> HalfEdgeMesh {
        self.mesh
    }

    /// Whether the current mesh is a pure triangulation (Loop is available).
    pub fn is_triangle_mesh(&self) -> bool {
        self.mesh.is_triangle_mesh()
    }

    /// Number of steps applied since the current source mesh was loaded.
    pub fn applied_depth(&self) -> usize {
        self.depth
    }

    /// Depth the counter would reach after `times` more steps.
    pub fn depth_after(&self, times: usize) -> usize {
        self.depth.saturating_add(times)
    }

    /// Whether applying `times` more steps would go past `cap`.
    pub fn exceeds_depth(&self, times: usize, cap: usize) -> bool {
        self.depth_after(times) > cap
    }

    /// Apply `times` steps of `scheme`.
    ///
    /// The batch is atomic: on error neither the mesh nor the depth counter
    /// changes. `times == 0` is a no-op.
    pub fn apply(&mut self, scheme: Scheme, times: usize) -> Result<()> {
        self.apply_with_progress(scheme, times, &Progress::none())
    }

    /// [`apply`](Self::apply) with a progress callback, called once per step.
    pub fn apply_with_progress(
        &mut self,
        scheme: Scheme,
        times: usize,
        progress: &Progress,
    ) -> Result<()> {
        let before = (self.mesh.num_vertices(), self.mesh.num_faces());

        match run_batch(&self.mesh, scheme, times, self.parallel, progress) {
            Ok(Some(mesh)) => {
                self.mesh = mesh;
                self.depth = self.depth_after(times);
                log::info!(
                    "{} x{}: {}v/{}f -> {}v/{}f, depth {}",
                    scheme,
                    times,
                    before.0,
                    before.1,
                    self.mesh.num_vertices(),
                    self.mesh.num_faces(),
                    self.depth
                );
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => {
                log::warn!("{} x{} rejected: {}", scheme, times, err);
                Err(err)
            }
        }
    }
}

/// Run a single step of `scheme` on `mesh`, returning the refined mesh.
///
/// `options.iterations` is ignored; `options.parallel` selects the
/// compute-pass execution mode.
pub fn subdivide_once(
    mesh: &HalfEdgeMesh,
    scheme: Scheme,
    options: &SubdivideOptions,
) -> Result<HalfEdgeMesh> {
    scheme.check(mesh)?;
    scheme.step(mesh, options.parallel)
}

/// Apply `options.iterations` steps of `scheme` to `mesh` in place.
///
/// On error `mesh` is left exactly as it was.
pub fn subdivide(mesh: &mut HalfEdgeMesh, scheme: Scheme, options: &SubdivideOptions) -> Result<()> {
    subdivide_with_progress(mesh, scheme, options, &Progress::none())
}

/// [`subdivide`] with progress reporting.
pub fn subdivide_with_progress(
    mesh: &mut HalfEdgeMesh,
    scheme: Scheme,
    options: &SubdivideOptions,
    progress: &Progress,
) -> Result<()> {
    if let Some(out) = run_batch(mesh, scheme, options.iterations, options.parallel, progress)? {
        *mesh = out;
    }
    Ok(())
}

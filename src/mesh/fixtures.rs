//! Small meshes shared by the unit tests.

use nalgebra::Point3;

use super::builder::{build_from_polygons, build_from_quads, build_from_triangles};
use super::halfedge::HalfEdgeMesh;

pub(crate) fn single_triangle() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 1.0, 0.0),
    ];
    build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap()
}

/// Two triangles sharing the edge (0, 1).
pub(crate) fn two_triangles() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(1.0, 2.0, 0.0),
        Point3::new(1.0, -2.0, 0.0),
    ];
    build_from_triangles(&vertices, &[[0, 1, 2], [1, 0, 3]]).unwrap()
}

pub(crate) fn unit_square() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap()
}

/// Axis-aligned unit cube with outward-facing quads.
pub(crate) fn unit_cube() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0), // 0
        Point3::new(1.0, 0.0, 0.0), // 1
        Point3::new(1.0, 1.0, 0.0), // 2
        Point3::new(0.0, 1.0, 0.0), // 3
        Point3::new(0.0, 0.0, 1.0), // 4
        Point3::new(1.0, 0.0, 1.0), // 5
        Point3::new(1.0, 1.0, 1.0), // 6
        Point3::new(0.0, 1.0, 1.0), // 7
    ];
    let faces = vec![
        [0, 3, 2, 1], // bottom
        [4, 5, 6, 7], // top
        [0, 1, 5, 4], // front
        [2, 3, 7, 6], // back
        [0, 4, 7, 3], // left
        [1, 2, 6, 5], // right
    ];
    build_from_quads(&vertices, &faces).unwrap()
}

pub(crate) fn tetrahedron() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 1.0, 0.0),
        Point3::new(0.5, 0.5, 1.0),
    ];
    let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
    build_from_triangles(&vertices, &faces).unwrap()
}

pub(crate) fn octahedron() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let faces = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    build_from_triangles(&vertices, &faces).unwrap()
}

/// Six triangles around vertex 0, a regular hexagon of radius 1 in the z = 0 plane.
pub(crate) fn hexagon_fan() -> HalfEdgeMesh {
    let mut vertices = vec![Point3::origin()];
    for k in 0..6 {
        let a = k as f64 * std::f64::consts::PI / 3.0;
        vertices.push(Point3::new(a.cos(), a.sin(), 0.0));
    }
    let faces: Vec<[usize; 3]> = (0..6).map(|k| [0, 1 + k, 1 + (k + 1) % 6]).collect();
    build_from_triangles(&vertices, &faces).unwrap()
}

/// A unit quad with a triangle on top, sharing the edge (2, 3).
pub(crate) fn quad_and_triangle() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.5, 1.5, 0.0),
    ];
    build_from_polygons(&vertices, &[vec![0, 1, 2, 3], vec![3, 2, 4]]).unwrap()
}

/// Two triangles touching only at vertex 0.
pub(crate) fn bowtie() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(-1.0, -1.0, 0.0),
    ];
    build_from_triangles(&vertices, &[[0, 1, 2], [0, 3, 4]]).unwrap()
}

/// The unit square glued back to back with itself: closed, every vertex has
/// valence 2.
pub(crate) fn quad_pillow() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    build_from_quads(&vertices, &[[0, 1, 2, 3], [3, 2, 1, 0]]).unwrap()
}

/// Triangle counterpart of [`quad_pillow`].
pub(crate) fn triangle_pillow() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 1.0, 0.0),
    ];
    build_from_triangles(&vertices, &[[0, 1, 2], [2, 1, 0]]).unwrap()
}

/// An `n` x `n` grid of unit squares, each split into two triangles.
pub(crate) fn triangle_grid(n: usize) -> HalfEdgeMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    let mut faces = Vec::with_capacity(n * n * 2);
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;
            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    build_from_triangles(&vertices, &faces).unwrap()
}

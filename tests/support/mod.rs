//! Test support library
//! Fixture meshes and comparison helpers shared by the integration tests.
#![allow(dead_code)]

use nalgebra::{Point2, Point3, Vector3};
use symrs::{float_types::Real, mesh::Mesh};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Component-wise [`approx_eq`] for vectors.
pub fn approx_vec(a: &Vector3<Real>, b: &Vector3<Real>, eps: Real) -> bool {
    (a - b).norm() < eps
}

/// A `columns × 2` grid of vertices in the XY plane with `columns - 1` quads,
/// x running from `x0` in unit steps. Vertex `i + columns * row` sits at
/// `(x0 + i, row, 0)`; quad `k` is `[k, k + 1, k + 1 + columns, k + columns]`,
/// counter-clockwise seen from +Z.
pub fn strip(x0: Real, columns: usize) -> Mesh {
    let mut positions = Vec::with_capacity(columns * 2);
    for row in 0..2 {
        for i in 0..columns {
            positions.push(Point3::new(x0 + i as Real, row as Real, 0.0));
        }
    }
    let faces = (0..columns - 1).map(|k| vec![k, k + 1, k + 1 + columns, k + columns]);
    Mesh::new(positions, faces)
}

/// The right half of a body: x from 0 to 2, cut at the mirror plane.
pub fn half_strip() -> Mesh {
    strip(0.0, 3)
}

/// A symmetric strip: x from -2 to 2, four quads.
pub fn full_strip() -> Mesh {
    strip(-2.0, 5)
}

/// One UV per loop, `u = 0.5 + 0.1 * x` and `v = y` of the loop's vertex.
pub fn planar_uvs(mesh: &Mesh) -> Vec<Point2<Real>> {
    let mut uvs = vec![Point2::origin(); mesh.loop_count()];
    for face in mesh.faces() {
        for (l, v) in face.corners() {
            let p = mesh.positions[v];
            uvs[l] = Point2::new(0.5 + 0.1 * p.x, p.y);
        }
    }
    uvs
}

/// Custom normals of every loop of face `f` set to `normals[f]`.
pub fn per_face_normals(mesh: &Mesh, normals: &[Vector3<Real>]) -> Vec<Vector3<Real>> {
    let mut out = vec![Vector3::z(); mesh.loop_count()];
    for (f, face) in mesh.faces().iter().enumerate() {
        for l in face.loops() {
            out[l] = normals[f];
        }
    }
    out
}

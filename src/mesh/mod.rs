//! `Mesh` struct: vertex positions, face loops and the attribute layers the
//! symmetry engine reconciles.

use crate::algorithm::uv::IslandSet;
use crate::errors::{Result, SymmetryError};
use crate::float_types::Real;
use nalgebra::{Point2, Point3, Vector3};
use std::ops::Range;

pub mod selection;
pub mod shape_keys;
pub mod vertex_groups;

pub use selection::{MirrorAxis, MirrorDirection, MirroredSelection};
pub use shape_keys::{ShapeKey, ShapeKeys};
pub use vertex_groups::{VertexGroups, WeightChannel};

/// A face, defined by an ordered loop of indices into the vertex array.
///
/// Loops are stored face-major: corner `k` of this face is loop `first_loop + k`
/// in every per-loop layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Indices into the vertex array
    pub indices: Vec<usize>,
    first_loop: usize,
}

impl Face {
    /// Index of this face's first loop
    pub const fn first_loop(&self) -> usize {
        self.first_loop
    }

    /// Range of loop indices belonging to this face
    pub fn loops(&self) -> Range<usize> {
        self.first_loop..self.first_loop + self.indices.len()
    }

    /// Iterate `(loop index, vertex index)` for every corner
    pub fn corners(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indices
            .iter()
            .enumerate()
            .map(|(k, &v)| (self.first_loop + k, v))
    }

    /// Return an iterator over paired indices each forming an edge of the face
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indices
            .iter()
            .zip(self.indices.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    }

    /// Fan triangulation over corner positions `0..n`
    pub fn fan(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (1..self.indices.len().saturating_sub(1)).map(|i| [0, i, i + 1])
    }
}

/// A polygon mesh with the attribute layers of a rigged character.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions, one contiguous buffer
    pub positions: Vec<Point3<Real>>,

    faces: Vec<Face>,
    loop_count: usize,

    /// Active UV layer, one entry per loop
    pub uvs: Option<Vec<Point2<Real>>>,

    /// Custom split normals, one entry per loop
    pub custom_normals: Option<Vec<Vector3<Real>>>,

    /// Deform weight channels
    pub vertex_groups: VertexGroups,

    /// Morph targets, Basis first
    pub shape_keys: Option<ShapeKeys>,

    /// Named UV islands used for mirroring
    pub uv_islands: Option<IslandSet>,

    /// Explicit island index per face. `None` selects the legacy membership scheme.
    pub face_islands: Option<Vec<usize>>,
}

impl Mesh {
    /// Build a mesh from positions and face loops. Attribute layers start empty.
    pub fn new<I>(positions: Vec<Point3<Real>>, faces: I) -> Self
    where
        I: IntoIterator<Item = Vec<usize>>,
    {
        let mut mesh = Mesh {
            positions,
            ..Default::default()
        };
        for face in faces {
            mesh.push_face(face);
        }
        mesh
    }

    /// Append a face and return its index. Per-loop layers are not extended.
    pub fn push_face(&mut self, indices: Vec<usize>) -> usize {
        let first_loop = self.loop_count;
        self.loop_count += indices.len();
        self.faces.push(Face {
            indices,
            first_loop,
        });
        self.faces.len() - 1
    }

    pub fn with_uvs(mut self, uvs: Vec<Point2<Real>>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    pub fn with_custom_normals(mut self, normals: Vec<Vector3<Real>>) -> Self {
        self.custom_normals = Some(normals);
        self
    }

    pub fn with_vertex_groups(mut self, groups: VertexGroups) -> Self {
        self.vertex_groups = groups;
        self
    }

    pub fn with_shape_keys(mut self, keys: ShapeKeys) -> Self {
        self.shape_keys = Some(keys);
        self
    }

    pub fn with_uv_islands(mut self, islands: IslandSet) -> Self {
        self.uv_islands = Some(islands);
        self
    }

    pub fn with_face_islands(mut self, tags: Vec<usize>) -> Self {
        self.face_islands = Some(tags);
        self
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub const fn loop_count(&self) -> usize {
        self.loop_count
    }

    pub fn has_custom_normals(&self) -> bool {
        self.custom_normals.is_some()
    }

    /// Loop indices grouped by the vertex they belong to.
    pub fn vertex_loops(&self) -> Vec<Vec<usize>> {
        let mut loops = vec![Vec::new(); self.positions.len()];
        for face in &self.faces {
            for (l, v) in face.corners() {
                if let Some(slot) = loops.get_mut(v) {
                    slot.push(l);
                }
            }
        }
        loops
    }

    /// Face owning each loop.
    pub fn loop_faces(&self) -> Vec<usize> {
        let mut owners = Vec::with_capacity(self.loop_count);
        for (f, face) in self.faces.iter().enumerate() {
            owners.extend(std::iter::repeat_n(f, face.indices.len()));
        }
        owners
    }

    /// Unit face normal by Newell's method. Degenerate faces yield a zero vector.
    pub fn face_normal(&self, face: usize) -> Vector3<Real> {
        let indices = &self.faces[face].indices;
        let mut normal = Vector3::zeros();
        for (k, &a) in indices.iter().enumerate() {
            let p = self.positions[a];
            let q = self.positions[indices[(k + 1) % indices.len()]];
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        normal.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros)
    }

    /// Check that every layer is consistent with the topology.
    ///
    /// Called before any mutation so that a failing operation leaves the mesh untouched.
    pub fn validate(&self) -> Result<()> {
        if self.positions.is_empty() {
            return Err(SymmetryError::EmptyMesh("vertices"));
        }
        if self.faces.is_empty() {
            return Err(SymmetryError::EmptyMesh("faces"));
        }

        check_finite("positions", &self.positions, |p| p.coords.iter().all(|c| c.is_finite()))?;

        let count = self.positions.len();
        for (f, face) in self.faces.iter().enumerate() {
            if face.indices.len() < 3 {
                return Err(SymmetryError::DegenerateFace {
                    face: f,
                    corners: face.indices.len(),
                });
            }
            if let Some(&vertex) = face.indices.iter().find(|&&v| v >= count) {
                return Err(SymmetryError::FaceIndexOutOfRange {
                    face: f,
                    vertex,
                    count,
                });
            }
        }

        check_len("uv", self.uvs.as_ref().map(Vec::len), self.loop_count)?;
        check_len(
            "custom normals",
            self.custom_normals.as_ref().map(Vec::len),
            self.loop_count,
        )?;
        if let Some(uvs) = &self.uvs {
            check_finite("uv", uvs, |uv| uv.coords.iter().all(|c| c.is_finite()))?;
        }
        if let Some(normals) = &self.custom_normals {
            check_finite("custom normals", normals, |n| n.iter().all(|c| c.is_finite()))?;
        }
        check_len(
            "face islands",
            self.face_islands.as_ref().map(Vec::len),
            self.faces.len(),
        )?;

        for channel in self.vertex_groups.iter() {
            if let Some(last) = channel.max_vertex() {
                if last >= count {
                    return Err(SymmetryError::LayerLength {
                        layer: format!("vertex group `{}`", channel.name()),
                        expected: count,
                        found: last + 1,
                    });
                }
            }
        }

        if let Some(keys) = &self.shape_keys {
            for key in keys.iter() {
                let layer = format!("shape key `{}`", key.name);
                check_len(&layer, Some(key.coords.len()), count)?;
                check_finite(&layer, &key.coords, |p| p.coords.iter().all(|c| c.is_finite()))?;
            }
        }

        if let Some(islands) = &self.uv_islands {
            islands.validate()?;
        }

        Ok(())
    }
}

fn check_len(layer: &str, found: Option<usize>, expected: usize) -> Result<()> {
    match found {
        Some(found) if found != expected => Err(SymmetryError::LayerLength {
            layer: layer.to_string(),
            expected,
            found,
        }),
        _ => Ok(()),
    }
}

fn check_finite<'a, T: 'a>(
    layer: &str,
    values: impl IntoIterator<Item = &'a T>,
    finite: impl Fn(&T) -> bool,
) -> Result<()> {
    match values.into_iter().position(|v| !finite(v)) {
        Some(index) => Err(SymmetryError::InvalidCoordinate {
            layer: layer.to_string(),
            index,
        }),
        None => Ok(()),
    }
}

//! Geometry for previewing where mirrored UVs will land.
//!
//! The overlay that draws it lives outside this crate. It owns a
//! [`PreviewState`], calls [`PreviewState::refresh`] after any island edit,
//! and reads back segments, triangles and the cursor.

use super::mirror::mirror_uv;
use super::resolver::resolver_for;
use crate::errors::{Result, SymmetryError};
use crate::float_types::{DEFAULT_AXIS_U, Real};
use crate::mesh::Mesh;
use nalgebra::Point2;

/// Mirrored UV wireframe of a mesh, plus the filled faces of the active island.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewState {
    running: bool,
    segments: Vec<[Point2<Real>; 2]>,
    triangles: Vec<[Point2<Real>; 3]>,
    cursor: Point2<Real>,
}

impl PreviewState {
    /// An inactive preview with empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the preview and compute its first frame.
    pub fn start(&mut self, mesh: &Mesh) -> Result<()> {
        if mesh.uvs.is_none() {
            return Err(SymmetryError::MissingUvLayer);
        }
        self.running = true;
        self.refresh(mesh)
    }

    /// Deactivate and release the buffers.
    pub fn stop(&mut self) {
        self.running = false;
        self.segments = Vec::new();
        self.triangles = Vec::new();
        self.cursor = Point2::origin();
    }

    /// Start when stopped, stop when running. Returns the new running state.
    pub fn toggle(&mut self, mesh: &Mesh) -> Result<bool> {
        if self.running {
            self.stop();
        } else {
            self.start(mesh)?;
        }
        Ok(self.running)
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Recompute from the mesh's current islands and assignments.
    /// Does nothing while stopped.
    pub fn refresh(&mut self, mesh: &Mesh) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        mesh.validate()?;
        self.segments.clear();
        self.triangles.clear();

        let Some(uvs) = mesh.uvs.as_ref() else {
            return Err(SymmetryError::MissingUvLayer);
        };
        let Some(islands) = mesh.uv_islands.as_ref().filter(|i| !i.is_empty()) else {
            return Ok(());
        };

        let assignment = resolver_for(mesh).assign(mesh, islands);
        let active = islands.active_index();
        let (active_u, active_v) = islands
            .active()
            .map_or((DEFAULT_AXIS_U, 0.0), |i| (i.mirror_axis_u, i.offset_v));

        let mut sum_v = 0.0;
        let mut count_v = 0usize;
        for (face, &island) in mesh.faces().iter().zip(&assignment.face_islands) {
            let (axis, offset_v) = islands.params(island);
            let mirrored: Vec<Point2<Real>> = uvs[face.loops()]
                .iter()
                .map(|&uv| mirror_uv(uv, axis, offset_v))
                .collect();

            if island == active {
                sum_v += uvs[face.loops()].iter().map(|uv| uv.y).sum::<Real>();
                count_v += mirrored.len();
                self.triangles
                    .extend(face.fan().map(|[a, b, c]| [mirrored[a], mirrored[b], mirrored[c]]));
            }
            let n = mirrored.len();
            self.segments
                .extend((0..n).map(|k| [mirrored[k], mirrored[(k + 1) % n]]));
        }

        self.cursor = Point2::new(active_u, active_v);
        if count_v > 0 {
            self.cursor.y += sum_v / count_v as Real;
        }
        Ok(())
    }

    /// Edge segments of every mirrored face
    pub fn segments(&self) -> &[[Point2<Real>; 2]] {
        &self.segments
    }

    /// Fan triangles of the active island's mirrored faces
    pub fn triangles(&self) -> &[[Point2<Real>; 3]] {
        &self.triangles
    }

    /// Active island's axis in U, and its offset added to the island's mean V
    pub const fn cursor(&self) -> Point2<Real> {
        self.cursor
    }
}

//! Custom split normal recovery by nearest-surface correspondence.
//!
//! A topology mirror rebuilds the overwritten half, and whatever custom
//! normals it produces there are only as good as its own reflection. The
//! [`ReferenceCopy`] is the pre-mirror mesh reflected across the mirror
//! plane: sampled at a vertex of the new half, it holds the normal the
//! authoritative half had at the mirrored spot.

use crate::errors::{Result, Skipped};
use crate::float_types::{
    Real,
    parry3d::{query::PointQueryWithLocation, shape::TriMesh},
};
use crate::mesh::{Mesh, MirrorAxis, MirroredSelection};
use nalgebra::{Point3, Vector3};

/// The pre-mirror mesh, reflected across the mirror plane.
///
/// Lives for the duration of one symmetrize and is released when dropped,
/// whichever way the run ends.
#[derive(Debug)]
pub struct ReferenceCopy {
    mesh: Mesh,
    face_normals: Vec<Vector3<Real>>,
}

impl ReferenceCopy {
    /// Clone `mesh` and reflect its positions and custom normals across `axis`.
    ///
    /// Face normals are taken from the unreflected mesh and reflected, so they
    /// keep pointing outward although the loops keep their winding.
    pub fn capture(mesh: &Mesh, axis: MirrorAxis) -> Self {
        let face_normals = (0..mesh.face_count())
            .map(|f| axis.reflect_vector(&mesh.face_normal(f)))
            .collect();

        let mut reflected = mesh.clone();
        for p in &mut reflected.positions {
            *p = axis.reflect_point(p);
        }
        if let Some(normals) = reflected.custom_normals.as_mut() {
            for n in normals.iter_mut() {
                *n = axis.reflect_vector(n);
            }
        }
        log::trace!("reference copy captured: {} vertices", reflected.vertex_count());

        ReferenceCopy {
            mesh: reflected,
            face_normals,
        }
    }

    /// The reflected mesh
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Fan-triangulated positions and indices for building a parry `TriMesh`
    fn triangles(&self) -> (Vec<Point3<Real>>, Vec<[u32; 3]>) {
        let mut indices = Vec::new();
        for face in self.mesh.faces() {
            for [a, b, c] in face.fan() {
                indices.push([
                    face.indices[a] as u32,
                    face.indices[b] as u32,
                    face.indices[c] as u32,
                ]);
            }
        }
        (self.mesh.positions.clone(), indices)
    }
}

impl Drop for ReferenceCopy {
    fn drop(&mut self) {
        log::trace!("reference copy released");
    }
}

/// Copy custom normals from `reference` onto the masked vertices of `mesh`.
///
/// For each selected off-plane vertex, the nearest point on the reference
/// surface within `max_distance` is located, and the reference corner closest
/// to it supplies candidate loops. Every loop of the vertex then takes the
/// normal of the candidate whose face normal agrees best with its own face's
/// normal. Vertices without a hit keep their normals and are reported.
///
/// Does nothing when either mesh lacks custom normals.
pub fn transfer_normals(
    mesh: &mut Mesh,
    reference: &ReferenceCopy,
    max_distance: Real,
    mask: &MirroredSelection,
) -> Result<Vec<Skipped>> {
    let Some(donor_normals) = reference.mesh.custom_normals.as_ref() else {
        return Ok(Vec::new());
    };
    if mesh.custom_normals.is_none() || mask.is_empty() {
        return Ok(Vec::new());
    }

    let (vertices, indices) = reference.triangles();
    let surface = TriMesh::new(vertices, indices)?;
    let donor_loops = reference.mesh.vertex_loops();
    let donor_faces = reference.mesh.loop_faces();

    let target_loops = mesh.vertex_loops();
    let target_faces = mesh.loop_faces();
    let target_face_normals: Vec<Vector3<Real>> =
        (0..mesh.face_count()).map(|f| mesh.face_normal(f)).collect();

    let mut skipped = Vec::new();
    let mut writes: Vec<(usize, Vector3<Real>)> = Vec::new();

    for v in mask.off_plane() {
        let (Some(p), Some(loops)) = (mesh.positions.get(v), target_loops.get(v)) else {
            continue;
        };
        if loops.is_empty() {
            continue;
        }

        let (projection, (tri, _)) = surface.project_local_point_and_get_location(p, false);
        if (projection.point - *p).norm() > max_distance {
            skipped.push(Skipped::NormalWithoutMatch { vertex: v });
            continue;
        }

        let corners = surface.indices()[tri as usize];
        let Some(donor) = corners
            .iter()
            .map(|&c| c as usize)
            .min_by(|&a, &b| {
                let da = (reference.mesh.positions[a] - projection.point).norm_squared();
                let db = (reference.mesh.positions[b] - projection.point).norm_squared();
                da.total_cmp(&db)
            })
        else {
            continue;
        };

        let candidates = &donor_loops[donor];
        for &l in loops {
            let wanted = target_face_normals[target_faces[l]];
            let best = candidates.iter().copied().max_by(|&a, &b| {
                let sa = reference.face_normals[donor_faces[a]].dot(&wanted);
                let sb = reference.face_normals[donor_faces[b]].dot(&wanted);
                sa.total_cmp(&sb)
            });
            if let Some(best) = best {
                writes.push((l, donor_normals[best]));
            }
        }
    }

    if let Some(normals) = mesh.custom_normals.as_mut() {
        for &(l, n) in &writes {
            normals[l] = n;
        }
    }

    log::debug!(
        "normal transfer: {} loops written, {} vertices without a match",
        writes.len(),
        skipped.len()
    );
    Ok(skipped)
}

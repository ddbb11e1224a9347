//! The topology half of a symmetrize: rebuilding the overwritten side from
//! the kept one.

use crate::errors::{Result, SymmetryError};
use crate::float_types::Real;
use crate::mesh::{Mesh, MirrorAxis, MirrorDirection, MirroredSelection};

/// Produces a mirrored mesh and the vertices its overwritten side consists of.
///
/// The attribute stages that follow only rely on the returned selection and
/// on the new mesh's layers being consistent with its topology.
pub trait TopologyMirror {
    fn symmetrize(
        &self,
        mesh: &Mesh,
        axis: MirrorAxis,
        direction: MirrorDirection,
        weld_tolerance: Real,
    ) -> Result<(Mesh, MirroredSelection)>;
}

/// Discards the overwritten half and replaces it with a reflection of the kept one.
///
/// Faces straddling the mirror plane are dropped, so the input is expected to
/// be cut along the plane already. Vertices within the weld tolerance of the
/// plane are snapped onto it and shared by both halves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectHalf;

#[derive(Clone, Copy, PartialEq)]
enum Side {
    Kept,
    Plane,
    Dropped,
}

impl TopologyMirror for ReflectHalf {
    fn symmetrize(
        &self,
        mesh: &Mesh,
        axis: MirrorAxis,
        direction: MirrorDirection,
        weld_tolerance: Real,
    ) -> Result<(Mesh, MirroredSelection)> {
        mesh.validate()?;

        let sides: Vec<Side> = mesh
            .positions
            .iter()
            .map(|p| {
                let c = axis.coord(p);
                if c.abs() <= weld_tolerance {
                    Side::Plane
                } else if direction.is_source_side(c) {
                    Side::Kept
                } else {
                    Side::Dropped
                }
            })
            .collect();

        // old index -> index in the kept half
        let mut remap: Vec<Option<usize>> = vec![None; mesh.vertex_count()];
        let mut kept: Vec<usize> = Vec::new();
        for (v, side) in sides.iter().enumerate() {
            if *side != Side::Dropped {
                remap[v] = Some(kept.len());
                kept.push(v);
            }
        }

        // kept-half index -> index of its reflection (plane vertices reflect onto themselves)
        let mut reflection: Vec<usize> = Vec::with_capacity(kept.len());
        let mut extra = 0;
        for &v in &kept {
            if sides[v] == Side::Plane {
                reflection.push(reflection.len());
            } else {
                reflection.push(kept.len() + extra);
                extra += 1;
            }
        }

        let kept_faces: Vec<usize> = (0..mesh.face_count())
            .filter(|&f| mesh.faces()[f].indices.iter().all(|&v| sides[v] != Side::Dropped))
            .collect();
        if kept_faces.is_empty() {
            return Err(SymmetryError::EmptyMesh("faces on the kept side"));
        }
        let reflected_faces: Vec<usize> = kept_faces
            .iter()
            .copied()
            .filter(|&f| mesh.faces()[f].indices.iter().any(|&v| sides[v] == Side::Kept))
            .collect();
        let dropped = mesh.face_count() - kept_faces.len();
        if dropped > 0 {
            log::debug!("topology mirror: {dropped} faces on the overwritten side discarded");
        }

        let snap = |v: usize| {
            let mut p = mesh.positions[v];
            if sides[v] == Side::Plane {
                p[axis.index()] = 0.0;
            }
            p
        };
        let mut positions: Vec<_> = kept.iter().map(|&v| snap(v)).collect();
        positions.extend(
            kept.iter()
                .filter(|&&v| sides[v] == Side::Kept)
                .map(|&v| axis.reflect_point(&mesh.positions[v])),
        );

        // loop index in the source for every loop of the new mesh, with a flag for reflected loops
        let mut loop_sources: Vec<(usize, bool)> = Vec::new();
        let mut faces: Vec<Vec<usize>> = Vec::with_capacity(kept_faces.len() + reflected_faces.len());
        for &f in &kept_faces {
            let face = &mesh.faces()[f];
            faces.push(face.indices.iter().filter_map(|&v| remap[v]).collect());
            loop_sources.extend(face.loops().map(|l| (l, false)));
        }
        for &f in &reflected_faces {
            let face = &mesh.faces()[f];
            let corners: Vec<(usize, usize)> = face.corners().collect();
            faces.push(
                corners
                    .iter()
                    .rev()
                    .filter_map(|&(_, v)| remap[v].map(|k| reflection[k]))
                    .collect(),
            );
            loop_sources.extend(corners.iter().rev().map(|&(l, _)| (l, true)));
        }

        let mut mirrored = Mesh::new(positions, faces);

        mirrored.uvs = mesh
            .uvs
            .as_ref()
            .map(|uvs| loop_sources.iter().map(|&(l, _)| uvs[l]).collect());
        mirrored.custom_normals = mesh.custom_normals.as_ref().map(|normals| {
            loop_sources
                .iter()
                .map(|&(l, flip)| {
                    if flip {
                        axis.reflect_vector(&normals[l])
                    } else {
                        normals[l]
                    }
                })
                .collect()
        });
        mirrored.face_islands = mesh.face_islands.as_ref().map(|tags| {
            kept_faces
                .iter()
                .chain(&reflected_faces)
                .map(|&f| tags[f])
                .collect()
        });
        mirrored.uv_islands = mesh.uv_islands.clone();

        let mut groups = mesh.vertex_groups.clone();
        groups.remap_vertices(&remap);
        for (k, &r) in reflection.iter().enumerate() {
            if r != k {
                groups.duplicate_vertex(k, r);
            }
        }
        mirrored.vertex_groups = groups;

        mirrored.shape_keys = mesh.shape_keys.clone().map(|mut keys| {
            for key in keys.iter_mut() {
                let mut coords: Vec<_> = kept.iter().map(|&v| key.coords[v]).collect();
                coords.extend(
                    kept.iter()
                        .filter(|&&v| sides[v] == Side::Kept)
                        .map(|&v| axis.reflect_point(&key.coords[v])),
                );
                key.coords = coords;
            }
            keys
        });

        let selection = MirroredSelection::from_sign_test(&mirrored.positions, axis, direction);
        log::debug!(
            "topology mirror: {} kept faces, {} reflected, {} vertices on the overwritten side",
            kept_faces.len(),
            reflected_faces.len(),
            selection.len()
        );
        Ok((mirrored, selection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn plane_vertices_are_shared_and_winding_reversed() {
        // a single triangle touching the plane along one edge
        let mesh = Mesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            [vec![0, 1, 2]],
        );
        let (mirrored, selection) = ReflectHalf
            .symmetrize(&mesh, MirrorAxis::X, MirrorDirection::PositiveToNegative, 1e-5)
            .unwrap();

        assert_eq!(mirrored.vertex_count(), 4);
        assert_eq!(mirrored.positions[3], Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(mirrored.faces()[1].indices, vec![2, 3, 0]);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 2, 3]);
        assert_eq!(selection.off_plane().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn nothing_on_the_kept_side_is_an_error() {
        let mesh = Mesh::new(
            vec![
                Point3::new(-1.0, 0.0, 0.0),
                Point3::new(-2.0, 0.0, 0.0),
                Point3::new(-1.0, 1.0, 0.0),
            ],
            [vec![0, 1, 2]],
        );
        assert!(matches!(
            ReflectHalf.symmetrize(&mesh, MirrorAxis::X, MirrorDirection::PositiveToNegative, 1e-5),
            Err(SymmetryError::EmptyMesh(_))
        ));
    }
}

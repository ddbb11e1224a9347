//! Face → island assignment strategies.
//!
//! Two persisted schemes exist: an explicit per-face island tag, and the
//! older scheme where a face belongs to an island when every one of its
//! vertices is in the vertex group named like the island.

use super::island::IslandSet;
use crate::errors::Skipped;
use crate::mesh::Mesh;

/// Island index of every face, plus the islands that could not be resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IslandAssignment {
    pub face_islands: Vec<usize>,
    pub skipped: Vec<Skipped>,
}

impl IslandAssignment {
    /// Faces assigned to `island`, ascending
    pub fn faces_of(&self, island: usize) -> impl Iterator<Item = usize> + '_ {
        self.face_islands
            .iter()
            .enumerate()
            .filter(move |&(_, &i)| i == island)
            .map(|(f, _)| f)
    }
}

/// Strategy seam for deciding which island a face belongs to.
pub trait FaceIslandResolver {
    /// Assign every face of `mesh` to exactly one island of `islands`.
    fn assign(&self, mesh: &Mesh, islands: &IslandSet) -> IslandAssignment;
}

/// Reads the mesh's explicit per-face island tags.
///
/// Tags pointing past the island list, and meshes without tags, fall back to island 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedFaces;

impl FaceIslandResolver for TaggedFaces {
    fn assign(&self, mesh: &Mesh, islands: &IslandSet) -> IslandAssignment {
        let face_islands = (0..mesh.face_count())
            .map(|f| {
                mesh.face_islands
                    .as_ref()
                    .and_then(|tags| tags.get(f).copied())
                    .filter(|&tag| tag < islands.len())
                    .unwrap_or(0)
            })
            .collect();
        IslandAssignment {
            face_islands,
            skipped: Vec::new(),
        }
    }
}

/// Infers islands from vertex group membership.
///
/// A face joins the first island, in declaration order, whose same-named
/// vertex group holds every vertex of the face. Faces matching several
/// islands go to the earliest one; faces matching none go to island 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightMembership;

impl FaceIslandResolver for WeightMembership {
    fn assign(&self, mesh: &Mesh, islands: &IslandSet) -> IslandAssignment {
        let mut skipped = Vec::new();
        let first = usize::from(islands.has_default());
        let channels: Vec<(usize, usize)> = islands
            .iter()
            .enumerate()
            .skip(first)
            .filter_map(|(i, island)| match mesh.vertex_groups.find(&island.name) {
                Some(id) => Some((i, id)),
                None => {
                    skipped.push(Skipped::IslandWithoutChannel {
                        island: island.name.clone(),
                    });
                    None
                },
            })
            .collect();

        let face_islands = mesh
            .faces()
            .iter()
            .map(|face| {
                channels
                    .iter()
                    .find(|&&(_, id)| {
                        mesh.vertex_groups
                            .get(id)
                            .is_some_and(|c| face.indices.iter().all(|&v| c.contains(v)))
                    })
                    .map_or(0, |&(i, _)| i)
            })
            .collect();

        IslandAssignment {
            face_islands,
            skipped,
        }
    }
}

/// Pick the strategy matching the schema the mesh was saved with.
pub fn resolver_for(mesh: &Mesh) -> &'static dyn FaceIslandResolver {
    if mesh.face_islands.is_some() {
        &TaggedFaces
    } else {
        &WeightMembership
    }
}

/// Faces belonging to one island under the mesh's own scheme.
///
/// Used to select an island's faces in an editor.
pub fn island_faces(mesh: &Mesh, islands: &IslandSet, island: usize) -> Vec<usize> {
    resolver_for(mesh)
        .assign(mesh, islands)
        .faces_of(island)
        .collect()
}

//! UV island partition and mirroring.

pub mod island;
pub mod mirror;
pub mod preview;
pub mod resolver;

pub use island::{DEFAULT_ISLAND_NAME, IslandSet, LegacyIsland, UvIsland};
pub use mirror::{mirror_uv, mirror_uvs, reflect_u};
pub use preview::PreviewState;
pub use resolver::{
    FaceIslandResolver, IslandAssignment, TaggedFaces, WeightMembership, island_faces,
    resolver_for,
};

use crate::errors::{Result, SymmetryError};
use crate::float_types::Real;
use crate::mesh::Mesh;

/// Mean V of the loops of one island's faces, `None` if the island has no faces.
pub fn island_mean_v(mesh: &Mesh, islands: &IslandSet, island: usize) -> Result<Option<Real>> {
    mesh.validate()?;
    let uvs = mesh.uvs.as_ref().ok_or(SymmetryError::MissingUvLayer)?;
    let mut sum = 0.0;
    let mut count = 0usize;
    for f in island_faces(mesh, islands, island) {
        for l in mesh.faces()[f].loops() {
            sum += uvs[l].y;
            count += 1;
        }
    }
    Ok((count > 0).then(|| sum / count as Real))
}

/// Set an island's offset so that its faces' mean V lands on `cursor_v`.
///
/// Returns the new offset.
pub fn offset_from_cursor(
    mesh: &Mesh,
    islands: &mut IslandSet,
    island: usize,
    cursor_v: Real,
) -> Result<Real> {
    let mean = island_mean_v(mesh, islands, island)?.unwrap_or(0.0);
    let offset = cursor_v - mean;
    islands.set_offset_v(island, offset)?;
    Ok(offset)
}

/// Use the U of the first picked loop as an island's axis.
///
/// Returns the new axis, or `None` when no loop was picked.
pub fn axis_from_uv<I>(mesh: &Mesh, islands: &mut IslandSet, island: usize, picked: I) -> Result<Option<Real>>
where
    I: IntoIterator<Item = usize>,
{
    let uvs = mesh.uvs.as_ref().ok_or(SymmetryError::MissingUvLayer)?;
    let Some(u) = picked.into_iter().find_map(|l| uvs.get(l)).map(|uv| uv.x) else {
        return Ok(None);
    };
    islands.set_axis_u(island, u)?;
    Ok(Some(u))
}

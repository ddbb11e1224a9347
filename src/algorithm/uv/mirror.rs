use super::island::IslandSet;
use super::resolver::FaceIslandResolver;
use crate::errors::{Result, Skipped, SymmetryError};
use crate::float_types::{Real, UV_SNAP_TOLERANCE};
use crate::mesh::{Mesh, MirroredSelection};
use nalgebra::Point2;

/// Reflect `u` about `axis`. Values within [`UV_SNAP_TOLERANCE`] of the axis
/// land exactly on it.
///
/// ```
/// # use symrs::algorithm::uv::reflect_u;
/// assert!((reflect_u(0.30, 0.25) - 0.20).abs() < 1e-6);
/// assert_eq!(reflect_u(0.25004, 0.25), 0.25);
/// ```
#[inline]
pub fn reflect_u(u: Real, axis: Real) -> Real {
    let du = u - axis;
    if du.abs() < UV_SNAP_TOLERANCE {
        axis
    } else {
        axis - du
    }
}

/// Reflect a UV about `axis` in U, then shift it by `offset_v` in V.
#[inline]
pub fn mirror_uv(uv: Point2<Real>, axis: Real, offset_v: Real) -> Point2<Real> {
    Point2::new(reflect_u(uv.x, axis), uv.y + offset_v)
}

/// Mirror the UVs of every face touching the overwritten side.
///
/// A face qualifies when at least one of its vertices is selected and off
/// the mirror plane; faces resting only on the plane or on the kept side
/// are left alone. Each qualifying face uses its island's axis and offset.
/// Returns the islands that could not be resolved.
pub fn mirror_uvs(
    mesh: &mut Mesh,
    islands: &IslandSet,
    resolver: &dyn FaceIslandResolver,
    selection: &MirroredSelection,
) -> Result<Vec<Skipped>> {
    if mesh.uvs.is_none() {
        return Err(SymmetryError::MissingUvLayer);
    }
    mesh.validate()?;
    islands.validate()?;
    let assignment = resolver.assign(mesh, islands);

    let targets: Vec<(std::ops::Range<usize>, usize)> = mesh
        .faces()
        .iter()
        .zip(&assignment.face_islands)
        .filter(|(face, _)| face.indices.iter().any(|&v| selection.contains_off_plane(v)))
        .map(|(face, &island)| (face.loops(), island))
        .collect();

    let Some(uvs) = mesh.uvs.as_mut() else {
        return Err(SymmetryError::MissingUvLayer);
    };
    for (loops, island) in &targets {
        let (axis, offset_v) = islands.params(*island);
        for uv in &mut uvs[loops.clone()] {
            *uv = mirror_uv(*uv, axis, offset_v);
        }
    }

    log::debug!(
        "uv mirror: {} faces reflected across {} islands",
        targets.len(),
        islands.len().max(1)
    );
    Ok(assignment.skipped)
}

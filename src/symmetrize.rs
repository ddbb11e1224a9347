//! The symmetrize pipeline: topology mirror followed by attribute reconciliation.

use crate::algorithm::normals::{ReferenceCopy, transfer_normals};
use crate::algorithm::shape_keys::unsymmetrize;
use crate::algorithm::topology::TopologyMirror;
use crate::algorithm::uv::{IslandSet, mirror_uvs, resolver_for};
use crate::algorithm::weights::mirror_weights;
use crate::errors::{Result, Skipped};
use crate::float_types::{DEFAULT_NORMAL_MAX_DISTANCE, Real, weld_tolerance};
use crate::mesh::{Mesh, MirrorAxis, MirrorDirection};
use crate::naming::PairingMap;
use std::time::{Duration, Instant};

/// What a symmetrize run reconciles, and how.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetrizeOptions {
    pub axis: MirrorAxis,
    pub direction: MirrorDirection,
    /// Split side-suffixed shape keys back onto their own half
    pub unsymmetrize_shape_keys: bool,
    /// Recover custom normals on the overwritten half from the pre-mirror mesh
    pub transfer_normals: bool,
    /// Reflect UVs of the overwritten half about each island's axis
    pub mirror_uvs: bool,
    pub weld_tolerance: Real,
    pub normal_max_distance: Real,
}

impl Default for SymmetrizeOptions {
    fn default() -> Self {
        SymmetrizeOptions {
            axis: MirrorAxis::X,
            direction: MirrorDirection::PositiveToNegative,
            unsymmetrize_shape_keys: false,
            transfer_normals: true,
            mirror_uvs: false,
            weld_tolerance: weld_tolerance(),
            normal_max_distance: DEFAULT_NORMAL_MAX_DISTANCE,
        }
    }
}

impl SymmetrizeOptions {
    pub const fn axis(mut self, axis: MirrorAxis) -> Self {
        self.axis = axis;
        self
    }

    pub const fn direction(mut self, direction: MirrorDirection) -> Self {
        self.direction = direction;
        self
    }

    pub const fn unsymmetrize_shape_keys(mut self, enabled: bool) -> Self {
        self.unsymmetrize_shape_keys = enabled;
        self
    }

    pub const fn transfer_normals(mut self, enabled: bool) -> Self {
        self.transfer_normals = enabled;
        self
    }

    pub const fn mirror_uvs(mut self, enabled: bool) -> Self {
        self.mirror_uvs = enabled;
        self
    }

    pub const fn weld_tolerance(mut self, tolerance: Real) -> Self {
        self.weld_tolerance = tolerance;
        self
    }

    pub const fn normal_max_distance(mut self, distance: Real) -> Self {
        self.normal_max_distance = distance;
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryReport {
    pub vertex_count_before: usize,
    pub vertex_count_after: usize,
    pub elapsed: Duration,
    /// Every element no counterpart was found for, in stage order
    pub skipped: Vec<Skipped>,
}

/// Runs one symmetrize over a mesh.
///
/// ```
/// # use nalgebra::Point3;
/// # use symrs::{Mesh, ReflectHalf, Symmetrizer, SymmetrizeOptions};
/// let mut mesh = Mesh::new(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     [vec![0, 1, 2]],
/// );
/// let report = Symmetrizer::new(SymmetrizeOptions::default())
///     .run(&mut mesh, &ReflectHalf)
///     .unwrap();
/// assert_eq!(report.vertex_count_after, 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Symmetrizer {
    options: SymmetrizeOptions,
}

impl Symmetrizer {
    pub const fn new(options: SymmetrizeOptions) -> Self {
        Symmetrizer { options }
    }

    pub const fn options(&self) -> &SymmetrizeOptions {
        &self.options
    }

    /// Mirror `mesh` with `topology`, then reconcile its attributes.
    ///
    /// Stages run in a fixed order: weights, UVs, normals, shape keys. On
    /// error `mesh` is left exactly as it was; the result only replaces it
    /// once every stage has succeeded.
    pub fn run(&self, mesh: &mut Mesh, topology: &dyn TopologyMirror) -> Result<SymmetryReport> {
        let start = Instant::now();
        let opts = &self.options;
        mesh.validate()?;
        let before = mesh.vertex_count();

        let reference = (opts.transfer_normals && mesh.has_custom_normals())
            .then(|| ReferenceCopy::capture(mesh, opts.axis));

        let (mut mirrored, selection) =
            topology.symmetrize(mesh, opts.axis, opts.direction, opts.weld_tolerance)?;
        mirrored.validate()?;
        let mut skipped = Vec::new();

        let names: Vec<&str> = mirrored.vertex_groups.names().collect();
        let pairing = PairingMap::from_names(&names, opts.direction);
        mirror_weights(&mut mirrored.vertex_groups, &pairing, &selection);

        if opts.mirror_uvs && mirrored.uvs.is_some() {
            let islands = mirrored.uv_islands.clone().unwrap_or_else(IslandSet::with_default);
            let resolver = resolver_for(&mirrored);
            skipped.extend(mirror_uvs(&mut mirrored, &islands, resolver, &selection)?);
        }

        if let Some(reference) = &reference {
            skipped.extend(transfer_normals(
                &mut mirrored,
                reference,
                opts.normal_max_distance,
                &selection,
            )?);
        }
        drop(reference);

        if opts.unsymmetrize_shape_keys {
            if let Some(keys) = mirrored.shape_keys.as_mut() {
                skipped.extend(unsymmetrize(keys, &selection, opts.direction));
            }
        }

        for skip in &skipped {
            log::debug!("skipped: {skip}");
        }

        let after = mirrored.vertex_count();
        *mesh = mirrored;
        let elapsed = start.elapsed();
        log::info!(
            "symmetrize {}: {before} → {after} vertices in {elapsed:?}",
            opts.direction.label()
        );

        Ok(SymmetryReport {
            vertex_count_before: before,
            vertex_count_after: after,
            elapsed,
            skipped,
        })
    }
}

//! Re-splitting left/right shape keys after a symmetrize.
//!
//! Symmetrizing copies each side-specific expression onto both halves. This
//! moves the freshly mirrored-in half of a donor key into its paired key and
//! returns the donor to rest pose there.

use crate::errors::Skipped;
use crate::mesh::{MirrorDirection, MirroredSelection, ShapeKeys};
use crate::naming::shape_key_pairs;

/// For every `(target, source)` key pair and every selected vertex, copy
/// `source[v]` into `target[v]` and reset `source[v]` to `Basis[v]`.
///
/// `+X → -X` copies right-named keys onto left-named keys, `-X → +X` the
/// reverse. The Basis key is never written. Returns the keys that carry a
/// target-side suffix but have no counterpart.
pub fn unsymmetrize(
    keys: &mut ShapeKeys,
    selection: &MirroredSelection,
    direction: MirrorDirection,
) -> Vec<Skipped> {
    let names: Vec<String> = keys.iter().map(|k| k.name.clone()).collect();
    let (pairs, unmatched) = shape_key_pairs(&names, direction);
    for name in &unmatched {
        log::debug!("shape key `{name}` has no opposite key, left unchanged");
    }

    if !selection.is_empty() {
        let (basis, rest) = keys.split_basis_mut();
        for pair in &pairs {
            // indices into `rest` are shifted by the Basis slot
            let (t, s) = (pair.target - 1, pair.source - 1);
            for v in selection.iter() {
                let (Some(&source), Some(&rest_pose)) = (rest[s].coords.get(v), basis.coords.get(v))
                else {
                    continue;
                };
                if let Some(slot) = rest[t].coords.get_mut(v) {
                    *slot = source;
                }
                rest[s].coords[v] = rest_pose;
            }
        }
    }

    log::debug!(
        "shape key unsymmetrize: {} pairs over {} vertices ({})",
        pairs.len(),
        selection.len(),
        direction.label()
    );
    unmatched
        .into_iter()
        .map(|name| Skipped::ShapeKeyWithoutPair { name })
        .collect()
}

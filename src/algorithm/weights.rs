//! Vertex weight mirroring between paired channels.

use crate::float_types::Real;
use crate::mesh::{MirroredSelection, VertexGroups};
use crate::naming::PairingMap;
use std::collections::BTreeMap;

/// Swap weights between paired channels on every selected vertex.
///
/// Geometry on the overwritten side was copied from the kept side, so its
/// weights sit in the kept side's channels. For each channel `c` a vertex
/// weighs nonzero in, with partner `p != c`, the vertex ends up with
/// `new[p] = old[c]` and `new[c] = old[p]`. All values are read from a per-vertex
/// snapshot before anything is written, so a mutually paired `L`/`R` couple
/// swaps rather than doubling up. Zero results drop the entry. Channels paired
/// with themselves are never touched.
///
/// Returns the number of vertices whose weights changed.
pub fn mirror_weights(
    groups: &mut VertexGroups,
    pairing: &PairingMap,
    selection: &MirroredSelection,
) -> usize {
    let mut changed = 0;

    for v in selection.iter() {
        let snapshot: BTreeMap<usize, Real> = groups.weights_at(v).into_iter().collect();
        if snapshot.is_empty() {
            continue;
        }

        let mut staged: BTreeMap<usize, Real> = BTreeMap::new();
        for &c in snapshot.keys() {
            let p = pairing.partner(c);
            if p == c {
                continue;
            }
            staged.insert(p, snapshot[&c]);
            staged.insert(c, snapshot.get(&p).copied().unwrap_or(0.0));
        }
        if staged.is_empty() {
            continue;
        }

        for (id, w) in staged {
            let Some(channel) = groups.get_mut(id) else {
                continue;
            };
            if w == 0.0 {
                channel.remove(v);
            } else {
                channel.set(v, w);
            }
        }
        changed += 1;
    }

    log::debug!(
        "weight mirror: {} of {} selected vertices reassigned across {} pairs",
        changed,
        selection.len(),
        pairing.pairs().count()
    );
    changed
}

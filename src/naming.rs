//! Left/right name pairing for vertex groups and shape keys.
//!
//! Side suffixes are matched against a fixed table, checked in order. Only the
//! suffix of the authoritative side is looked for: left suffixes when mirroring
//! `+X → -X`, right suffixes when mirroring `-X → +X`.

use crate::mesh::MirrorDirection;
use std::collections::HashMap;

/// Left/right suffix pairs, in matching priority.
pub const SUFFIX_PAIRS: [(&str, &str); 4] = [("_L", "_R"), (".L", ".R"), ("-L", "-R"), ("Left", "Right")];

/// Shape key names from MMD models that do not follow the suffix convention,
/// mapped onto names that do. Applied for matching only.
pub const LEGACY_KEY_ALIASES: [(&str, &str); 4] = [
    ("ウィンク", "MMD_Wink_R"),
    ("ウィンク右", "MMD_Wink_L"),
    ("ウィンク２", "MMD_Wink2_R"),
    ("ｳｨﾝｸ２右", "MMD_Wink2_L"),
];

/// Split a trailing `.NNN`-style variant off `name`, unless the dotted part is
/// itself a side letter. Returns `(base, extra)` with `extra` including its dot.
///
/// ```
/// use symrs::naming::split_variant;
/// assert_eq!(split_variant("Arm.L.001"), ("Arm.L", ".001"));
/// assert_eq!(split_variant("Arm.L"), ("Arm.L", ""));
/// ```
pub fn split_variant(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((head, tail)) if tail != "L" && tail != "R" => (head, &name[head.len()..]),
        _ => (name, ""),
    }
}

/// `(current, opposite)` suffix for one table row under `direction`
#[inline]
const fn oriented(pair: (&'static str, &'static str), direction: MirrorDirection) -> (&'static str, &'static str) {
    match direction {
        MirrorDirection::PositiveToNegative => (pair.0, pair.1),
        MirrorDirection::NegativeToPositive => (pair.1, pair.0),
    }
}

/// The name `name` would pair with, if it carries the authoritative side's suffix.
///
/// The variant part (`.001`) is re-appended after the swapped suffix. Whether a
/// channel of that name exists is up to the caller.
pub fn opposite_name(name: &str, direction: MirrorDirection) -> Option<String> {
    let (base, extra) = split_variant(name);
    SUFFIX_PAIRS.iter().find_map(|&pair| {
        let (current, opposite) = oriented(pair, direction);
        base.strip_suffix(current)
            .map(|stem| format!("{stem}{opposite}{extra}"))
    })
}

/// Id-based symmetric pairing of channels. Unpaired channels map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingMap {
    partner: Vec<usize>,
}

impl PairingMap {
    /// Every channel paired with itself
    pub fn identity(len: usize) -> Self {
        PairingMap {
            partner: (0..len).collect(),
        }
    }

    /// Pair channel names; ids are positions in `names`.
    pub fn from_names<S: AsRef<str>>(names: &[S], direction: MirrorDirection) -> Self {
        let index: HashMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_ref(), i))
            .collect();
        let mut map = PairingMap::identity(names.len());

        for (id, name) in names.iter().enumerate() {
            let Some(opposite) = opposite_name(name.as_ref(), direction) else {
                continue;
            };
            let Some(&other) = index.get(opposite.as_str()) else {
                continue;
            };
            if other == id || map.is_paired(id) || map.is_paired(other) {
                log::debug!(
                    "vertex group `{}` cannot pair with `{}`: already claimed",
                    name.as_ref(),
                    opposite
                );
                continue;
            }
            map.partner[id] = other;
            map.partner[other] = id;
        }
        map
    }

    /// Partner of `id`; ids outside the map are their own partner.
    #[inline]
    pub fn partner(&self, id: usize) -> usize {
        self.partner.get(id).copied().unwrap_or(id)
    }

    #[inline]
    pub fn is_paired(&self, id: usize) -> bool {
        self.partner(id) != id
    }

    /// Each pair once, as `(lower id, higher id)`
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.partner
            .iter()
            .enumerate()
            .filter(|&(a, &b)| a < b)
            .map(|(a, &b)| (a, b))
    }

    pub fn len(&self) -> usize {
        self.partner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partner.is_empty()
    }
}

/// Resolve a name set into a `name → partner name` mapping (identity for unpaired names).
pub fn resolve<I, S>(names: I, direction: MirrorDirection) -> HashMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
    names.sort();
    names.dedup();
    let map = PairingMap::from_names(&names, direction);
    names
        .iter()
        .enumerate()
        .map(|(id, n)| (n.clone(), names[map.partner(id)].clone()))
        .collect()
}

/// A shape key that receives another key's deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    /// Index of the key that is overwritten over the selection
    pub target: usize,
    /// Index of the key whose deltas are copied and then reset to Basis
    pub source: usize,
}

/// Find `(target, source)` shape key pairs among `names`, index 0 (Basis) excluded.
///
/// `+X → -X` targets left-named keys with their right-named counterparts as
/// source; `-X → +X` is the reverse. Legacy aliases are applied before matching.
/// Returns the pairs and the names of target-side keys that found no source.
pub fn shape_key_pairs<S: AsRef<str>>(
    names: &[S],
    direction: MirrorDirection,
) -> (Vec<KeyPair>, Vec<String>) {
    let normalized: Vec<&str> = names
        .iter()
        .map(|n| {
            let n = n.as_ref();
            LEGACY_KEY_ALIASES
                .iter()
                .find(|(from, _)| *from == n)
                .map_or(n, |(_, to)| *to)
        })
        .collect();
    let lookup = |wanted: &str| {
        normalized
            .iter()
            .enumerate()
            .skip(1)
            .find(|&(_, &n)| n == wanted)
            .map(|(i, _)| i)
    };

    let mut pairs = Vec::new();
    let mut unmatched = Vec::new();
    for (target, &name) in normalized.iter().enumerate().skip(1) {
        let mut had_suffix = false;
        let mut found = None;
        for &pair in SUFFIX_PAIRS.iter() {
            let (target_suffix, source_suffix) = oriented(pair, direction);
            let Some(stem) = name.strip_suffix(target_suffix) else {
                continue;
            };
            had_suffix = true;
            if let Some(source) = lookup(&format!("{stem}{source_suffix}")) {
                if source != target {
                    found = Some(source);
                    break;
                }
            }
        }
        match found {
            Some(source) => pairs.push(KeyPair { target, source }),
            None if had_suffix => unmatched.push(names[target].as_ref().to_string()),
            None => {},
        }
    }
    (pairs, unmatched)
}

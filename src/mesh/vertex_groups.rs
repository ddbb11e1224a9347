//! Named sparse per-vertex weight channels.

use crate::errors::{Result, SymmetryError};
use crate::float_types::Real;
use std::collections::BTreeMap;

/// A named deform channel owning a sparse `vertex → weight` map.
///
/// Absent entries read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightChannel {
    name: String,
    weights: BTreeMap<usize, Real>,
}

impl WeightChannel {
    pub fn new(name: impl Into<String>) -> Self {
        WeightChannel {
            name: name.into(),
            weights: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Weight of `vertex`, `0.0` when absent
    #[inline]
    pub fn weight(&self, vertex: usize) -> Real {
        self.weights.get(&vertex).copied().unwrap_or(0.0)
    }

    /// `true` if the channel has an entry for `vertex`, whatever its value
    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        self.weights.contains_key(&vertex)
    }

    /// Store `weight` for `vertex`, zero included.
    pub fn set(&mut self, vertex: usize, weight: Real) {
        self.weights.insert(vertex, weight);
    }

    pub fn remove(&mut self, vertex: usize) -> Option<Real> {
        self.weights.remove(&vertex)
    }

    /// `(vertex, weight)` in ascending vertex order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, Real)> + '_ {
        self.weights.iter().map(|(&v, &w)| (v, w))
    }

    pub fn max_vertex(&self) -> Option<usize> {
        self.weights.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// The ordered set of weight channels of a mesh. A channel's id is its index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexGroups {
    channels: Vec<WeightChannel>,
}

impl VertexGroups {
    pub const fn new() -> Self {
        VertexGroups {
            channels: Vec::new(),
        }
    }

    /// Add an empty channel and return its id.
    pub fn add(&mut self, name: impl Into<String>) -> Result<usize> {
        let name = name.into();
        if self.find(&name).is_some() {
            return Err(SymmetryError::DuplicateChannel(name));
        }
        self.channels.push(WeightChannel::new(name));
        Ok(self.channels.len() - 1)
    }

    /// Add a channel pre-filled with `(vertex, weight)` entries.
    pub fn add_with<I>(&mut self, name: impl Into<String>, weights: I) -> Result<usize>
    where
        I: IntoIterator<Item = (usize, Real)>,
    {
        let id = self.add(name)?;
        for (v, w) in weights {
            self.channels[id].set(v, w);
        }
        Ok(id)
    }

    /// Id of the channel called `name`
    pub fn find(&self, name: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.name == name)
    }

    pub fn get(&self, id: usize) -> Option<&WeightChannel> {
        self.channels.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut WeightChannel> {
        self.channels.get_mut(id)
    }

    pub fn by_name(&self, name: &str) -> Option<&WeightChannel> {
        self.find(name).map(|id| &self.channels[id])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.channels.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightChannel> + '_ {
        self.channels.iter()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Nonzero `(channel id, weight)` entries of one vertex, ascending by id.
    pub fn weights_at(&self, vertex: usize) -> Vec<(usize, Real)> {
        self.channels
            .iter()
            .enumerate()
            .filter_map(|(id, c)| match c.weights.get(&vertex) {
                Some(&w) if w != 0.0 => Some((id, w)),
                _ => None,
            })
            .collect()
    }

    /// Copy every entry of `from` onto `to` in the same channel.
    pub fn duplicate_vertex(&mut self, from: usize, to: usize) {
        for channel in &mut self.channels {
            if let Some(&w) = channel.weights.get(&from) {
                channel.weights.insert(to, w);
            }
        }
    }

    /// Re-index every entry through `remap`, dropping vertices mapped to `None`.
    pub fn remap_vertices(&mut self, remap: &[Option<usize>]) {
        for channel in &mut self.channels {
            channel.weights = channel
                .weights
                .iter()
                .filter_map(|(&v, &w)| remap.get(v).copied().flatten().map(|nv| (nv, w)))
                .collect();
        }
    }
}

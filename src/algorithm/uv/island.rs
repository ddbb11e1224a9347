//! Named UV islands and the ordered island list persisted with a mesh.

use crate::errors::{Result, SymmetryError};
use crate::float_types::{DEFAULT_AXIS_U, Real};
use crate::mesh::VertexGroups;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of island 0, the region covering every face not assigned elsewhere.
pub const DEFAULT_ISLAND_NAME: &str = "__General__";

/// A named group of faces sharing one mirror axis and vertical offset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UvIsland {
    pub name: String,
    /// U coordinate the island's faces are reflected about
    pub mirror_axis_u: Real,
    /// Added to V after reflection
    pub offset_v: Real,
}

impl UvIsland {
    pub fn new(name: impl Into<String>) -> Self {
        UvIsland {
            name: name.into(),
            mirror_axis_u: DEFAULT_AXIS_U,
            offset_v: 0.0,
        }
    }

    pub fn with_axis(mut self, mirror_axis_u: Real) -> Self {
        self.mirror_axis_u = mirror_axis_u;
        self
    }

    pub fn with_offset(mut self, offset_v: Real) -> Self {
        self.offset_v = offset_v;
        self
    }

    pub fn is_finite(&self) -> bool {
        self.mirror_axis_u.is_finite() && self.offset_v.is_finite()
    }
}

/// Island record of the older persisted schema, keyed by vertex group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegacyIsland {
    pub vertex_group: String,
    pub uv_coord_u: Real,
    #[cfg_attr(feature = "serde", serde(default))]
    pub uv_offset_v: Real,
}

/// Ordered island list with an active entry. Island 0 is the default island.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IslandSet {
    items: Vec<UvIsland>,
    #[cfg_attr(feature = "serde", serde(default))]
    active_index: usize,
}

impl IslandSet {
    /// A list holding only the default island
    pub fn with_default() -> Self {
        IslandSet {
            items: vec![UvIsland::new(DEFAULT_ISLAND_NAME)],
            active_index: 0,
        }
    }

    /// Append an island, creating the default island first if the list is empty.
    pub fn push(&mut self, island: UvIsland) -> usize {
        if self.items.is_empty() {
            self.items.push(UvIsland::new(DEFAULT_ISLAND_NAME));
        }
        self.items.push(island);
        self.items.len() - 1
    }

    /// Builder form of [`IslandSet::push`]
    pub fn with(mut self, island: UvIsland) -> Self {
        self.push(island);
        self
    }

    /// Append an island for an existing vertex group of the same name.
    pub fn push_for_group(&mut self, name: &str, groups: &VertexGroups) -> Result<usize> {
        if groups.find(name).is_none() {
            return Err(SymmetryError::UnknownChannel(name.to_string()));
        }
        Ok(self.push(UvIsland::new(name)))
    }

    /// Remove a named island. The active index moves to the previous entry.
    pub fn remove(&mut self, index: usize) -> Result<UvIsland> {
        self.check_index(index)?;
        if index == 0 {
            return Err(SymmetryError::DefaultIslandLocked);
        }
        let removed = self.items.remove(index);
        self.active_index = self
            .active_index
            .saturating_sub(1)
            .min(self.items.len().saturating_sub(1));
        Ok(removed)
    }

    /// Move the active island one slot up. Island 0 and slot 1 stay put.
    pub fn move_up(&mut self) -> bool {
        let index = self.active_index;
        if index > 1 && index < self.items.len() {
            self.items.swap(index, index - 1);
            self.active_index -= 1;
            return true;
        }
        false
    }

    /// Move the active island one slot down. Island 0 stays put.
    pub fn move_down(&mut self) -> bool {
        let index = self.active_index;
        if index != 0 && index + 1 < self.items.len() {
            self.items.swap(index, index + 1);
            self.active_index += 1;
            return true;
        }
        false
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.active_index = index;
        Ok(())
    }

    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> Option<&UvIsland> {
        self.items.get(self.active_index)
    }

    /// Set an island's mirror axis, e.g. from the 2D cursor or a picked UV.
    pub fn set_axis_u(&mut self, index: usize, u: Real) -> Result<()> {
        self.check_index(index)?;
        if !u.is_finite() {
            return Err(SymmetryError::NonFiniteIslandParameter(self.items[index].name.clone()));
        }
        self.items[index].mirror_axis_u = u;
        Ok(())
    }

    /// Set an island's vertical offset.
    pub fn set_offset_v(&mut self, index: usize, v: Real) -> Result<()> {
        self.check_index(index)?;
        if !v.is_finite() {
            return Err(SymmetryError::NonFiniteIslandParameter(self.items[index].name.clone()));
        }
        self.items[index].offset_v = v;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&UvIsland> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UvIsland> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` if island 0 carries the default island's name
    pub fn has_default(&self) -> bool {
        self.items
            .first()
            .is_some_and(|i| i.name == DEFAULT_ISLAND_NAME)
    }

    /// `(mirror_axis_u, offset_v)` of an island. Index 0, and any index without
    /// an island, uses island 0 when present and `(0.5, 0.0)` otherwise.
    pub fn params(&self, index: usize) -> (Real, Real) {
        let island = match self.items.get(index) {
            Some(island) if index != 0 => Some(island),
            _ => self.items.first().filter(|_| self.has_default()),
        };
        island.map_or((DEFAULT_AXIS_U, 0.0), |i| (i.mirror_axis_u, i.offset_v))
    }

    pub fn validate(&self) -> Result<()> {
        match self.items.iter().find(|i| !i.is_finite()) {
            Some(island) => Err(SymmetryError::NonFiniteIslandParameter(island.name.clone())),
            None => Ok(()),
        }
    }

    /// Rebuild the list with the default island at index 0, keeping its
    /// parameters if it already exists elsewhere in the list.
    ///
    /// Named islands are kept in order. When the list has no named island and
    /// an older vertex-group keyed list is supplied, its records are imported.
    pub fn migrate_legacy(&mut self, legacy: Option<&[LegacyIsland]>) {
        let (defaults, current): (Vec<UvIsland>, Vec<UvIsland>) = self
            .items
            .drain(..)
            .partition(|i| i.name == DEFAULT_ISLAND_NAME);
        let import_legacy = current.is_empty();

        self.items.push(
            defaults
                .into_iter()
                .next()
                .unwrap_or_else(|| UvIsland::new(DEFAULT_ISLAND_NAME)),
        );
        self.items.extend(current);
        if import_legacy {
            if let Some(legacy) = legacy {
                self.items.extend(legacy.iter().map(|old| {
                    UvIsland::new(old.vertex_group.clone())
                        .with_axis(old.uv_coord_u)
                        .with_offset(old.uv_offset_v)
                }));
            }
        }
        self.active_index = self.active_index.min(self.items.len() - 1);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(SymmetryError::IslandIndex {
                index,
                count: self.items.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> IslandSet {
        IslandSet::with_default()
            .with(UvIsland::new("Sleeve"))
            .with(UvIsland::new("Collar"))
    }

    #[test]
    fn default_island_cannot_be_removed() {
        let mut set = three();
        assert_eq!(set.remove(0), Err(SymmetryError::DefaultIslandLocked));
        set.set_active(2).unwrap();
        assert_eq!(set.remove(2).unwrap().name, "Collar");
        assert_eq!(set.active_index(), 1);
    }

    #[test]
    fn moves_never_cross_the_default_island() {
        let mut set = three();
        set.set_active(1).unwrap();
        assert!(!set.move_up());
        assert!(set.move_down());
        assert_eq!(set.get(2).unwrap().name, "Sleeve");
        assert!(set.move_up());
        set.set_active(0).unwrap();
        assert!(!set.move_down());
    }

    #[test]
    fn params_fall_back_to_default_island() {
        let mut set = IslandSet::default();
        assert_eq!(set.params(0), (0.5, 0.0));
        set.push(UvIsland::new("Sleeve").with_axis(0.25));
        set.set_axis_u(0, 0.75).unwrap();
        assert_eq!(set.params(0), (0.75, 0.0));
        assert_eq!(set.params(1), (0.25, 0.0));
        assert_eq!(set.params(9), (0.75, 0.0));
    }

    #[test]
    fn group_islands_need_their_group() {
        let mut groups = VertexGroups::new();
        groups.add("Sleeve").unwrap();
        let mut set = IslandSet::default();
        assert_eq!(set.push_for_group("Sleeve", &groups), Ok(1));
        assert_eq!(
            set.push_for_group("Cuff", &groups),
            Err(SymmetryError::UnknownChannel("Cuff".into()))
        );
        assert!(set.has_default());
    }

    #[test]
    fn non_finite_axis_is_rejected() {
        let mut set = three();
        assert!(matches!(
            set.set_axis_u(1, Real::NAN),
            Err(SymmetryError::NonFiniteIslandParameter(_))
        ));
    }
}

//! Shape keys (morph targets) stored as contiguous absolute coordinates.

use crate::float_types::Real;
use nalgebra::Point3;

pub const BASIS_NAME: &str = "Basis";

/// A morph target: one absolute position per mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeKey {
    pub name: String,
    /// Blend value, carried through untouched
    pub value: Real,
    pub coords: Vec<Point3<Real>>,
}

impl ShapeKey {
    pub fn new(name: impl Into<String>, coords: Vec<Point3<Real>>) -> Self {
        ShapeKey {
            name: name.into(),
            value: 0.0,
            coords,
        }
    }
}

/// Shape keys of a mesh. The first key is the Basis (rest pose) and is never
/// paired or written by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeKeys {
    keys: Vec<ShapeKey>,
}

impl ShapeKeys {
    /// Start a key set from the rest pose.
    pub fn new(basis: Vec<Point3<Real>>) -> Self {
        ShapeKeys {
            keys: vec![ShapeKey::new(BASIS_NAME, basis)],
        }
    }

    /// Append a key and return its index.
    pub fn push(&mut self, key: ShapeKey) -> usize {
        self.keys.push(key);
        self.keys.len() - 1
    }

    /// Builder form of [`ShapeKeys::push`]
    pub fn with(mut self, name: impl Into<String>, coords: Vec<Point3<Real>>) -> Self {
        self.push(ShapeKey::new(name, coords));
        self
    }

    pub fn basis(&self) -> &ShapeKey {
        &self.keys[0]
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&ShapeKey> {
        self.keys.iter().find(|k| k.name == name)
    }

    pub fn key(&self, index: usize) -> Option<&ShapeKey> {
        self.keys.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeKey> + '_ {
        self.keys.iter()
    }

    /// Every key, Basis included, mutably. Used by the topology step.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ShapeKey> + '_ {
        self.keys.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false`: a key set holds at least its Basis.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Split into the Basis and the mutable non-basis keys.
    pub fn split_basis_mut(&mut self) -> (&ShapeKey, &mut [ShapeKey]) {
        let (basis, rest) = self.keys.split_at_mut(1);
        (&basis[0], rest)
    }
}

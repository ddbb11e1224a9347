//! Mirror axis, direction and the set of vertices a mirror overwrites.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};
use std::collections::BTreeSet;

/// The coordinate axis whose zero-plane is the mirror plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MirrorAxis {
    #[default]
    X,
    Y,
    Z,
}

impl MirrorAxis {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            MirrorAxis::X => 0,
            MirrorAxis::Y => 1,
            MirrorAxis::Z => 2,
        }
    }

    /// Coordinate of `p` along this axis
    #[inline]
    pub fn coord(self, p: &Point3<Real>) -> Real {
        p[self.index()]
    }

    /// Reflect a point across the axis plane (scale −1 along the axis).
    #[inline]
    pub fn reflect_point(self, p: &Point3<Real>) -> Point3<Real> {
        let mut q = *p;
        q[self.index()] = -q[self.index()];
        q
    }

    /// Reflect a direction across the axis plane.
    #[inline]
    pub fn reflect_vector(self, n: &Vector3<Real>) -> Vector3<Real> {
        let mut m = *n;
        m[self.index()] = -m[self.index()];
        m
    }
}

/// Which half of the mesh is authoritative.
///
/// `PositiveToNegative` ("+X → −X") keeps the positive half and overwrites the
/// negative one; side-suffixed names on the left (`_L`, `.L`, ...) belong to the
/// positive half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MirrorDirection {
    #[default]
    PositiveToNegative,
    NegativeToPositive,
}

impl MirrorDirection {
    /// `true` if a vertex with this axis coordinate lies on the overwritten side,
    /// the mirror plane included.
    #[inline]
    pub fn is_target_side(self, coord: Real) -> bool {
        match self {
            MirrorDirection::PositiveToNegative => coord <= 0.0,
            MirrorDirection::NegativeToPositive => coord >= 0.0,
        }
    }

    /// `true` if a vertex with this axis coordinate lies on the kept side,
    /// the mirror plane included.
    #[inline]
    pub fn is_source_side(self, coord: Real) -> bool {
        self.reversed().is_target_side(coord)
    }

    #[inline]
    pub const fn reversed(self) -> Self {
        match self {
            MirrorDirection::PositiveToNegative => MirrorDirection::NegativeToPositive,
            MirrorDirection::NegativeToPositive => MirrorDirection::PositiveToNegative,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MirrorDirection::PositiveToNegative => "+X → -X",
            MirrorDirection::NegativeToPositive => "-X → +X",
        }
    }
}

/// Vertices on the side being overwritten by the mirror.
///
/// Built from a sign test, it also remembers which of those vertices sit exactly
/// on the mirror plane; those have no "other side" and are excluded from UV
/// and normal recovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirroredSelection {
    vertices: BTreeSet<usize>,
    on_plane: BTreeSet<usize>,
}

impl MirroredSelection {
    /// Sign test of every position along `axis`.
    pub fn from_sign_test(
        positions: &[Point3<Real>],
        axis: MirrorAxis,
        direction: MirrorDirection,
    ) -> Self {
        let mut selection = MirroredSelection::default();
        for (i, p) in positions.iter().enumerate() {
            let c = axis.coord(p);
            if direction.is_target_side(c) {
                selection.vertices.insert(i);
                if c == 0.0 {
                    selection.on_plane.insert(i);
                }
            }
        }
        selection
    }

    /// Explicit vertex indices, none of them treated as on-plane.
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        MirroredSelection {
            vertices: indices.into_iter().collect(),
            on_plane: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }

    #[inline]
    pub fn is_on_plane(&self, vertex: usize) -> bool {
        self.on_plane.contains(&vertex)
    }

    /// Selected and off the mirror plane
    #[inline]
    pub fn contains_off_plane(&self, vertex: usize) -> bool {
        self.contains(vertex) && !self.is_on_plane(vertex)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Selected vertices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices.iter().copied()
    }

    /// Selected vertices that do not lie on the mirror plane
    pub fn off_plane(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices.difference(&self.on_plane).copied()
    }
}

impl FromIterator<usize> for MirroredSelection {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        MirroredSelection::from_indices(iter)
    }
}

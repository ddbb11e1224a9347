//! Fatal errors and non-fatal skips

use crate::float_types::parry3d::shape::TriMeshBuilderError;

/// Result type alias using [`SymmetryError`].
pub type Result<T> = std::result::Result<T, SymmetryError>;

/// Everything that aborts an operation before the mesh is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SymmetryError {
    /// (EmptyMesh) There is nothing to symmetrize
    #[error("(EmptyMesh) the mesh has no {0}")]
    EmptyMesh(&'static str),
    /// (FaceIndexOutOfRange) A face loop references a vertex that does not exist
    #[error("(FaceIndexOutOfRange) face {face} references vertex {vertex} (vertex count {count})")]
    FaceIndexOutOfRange { face: usize, vertex: usize, count: usize },
    /// (DegenerateFace) A face has fewer than three corners
    #[error("(DegenerateFace) face {face} has {corners} corners")]
    DegenerateFace { face: usize, corners: usize },
    /// (InvalidCoordinate) A coordinate in this layer is NaN or infinite
    #[error("(InvalidCoordinate) {layer} entry {index} has a NaN or infinite coordinate")]
    InvalidCoordinate { layer: String, index: usize },
    /// (LayerLength) An attribute layer does not match the element count it annotates
    #[error("(LayerLength) layer `{layer}` has {found} entries, expected {expected}")]
    LayerLength { layer: String, expected: usize, found: usize },
    /// (DuplicateChannel) Two vertex groups share a name
    #[error("(DuplicateChannel) a vertex group named `{0}` already exists")]
    DuplicateChannel(String),
    /// (UnknownChannel) No vertex group carries this name
    #[error("(UnknownChannel) no vertex group named `{0}`")]
    UnknownChannel(String),
    /// (NonFiniteIslandParameter) An island's axis or offset is NaN or infinite
    #[error("(NonFiniteIslandParameter) island `{0}` has a NaN or infinite mirror parameter")]
    NonFiniteIslandParameter(String),
    /// (MissingUvLayer) The operation needs UV coordinates
    #[error("(MissingUvLayer) the mesh has no UV layer")]
    MissingUvLayer,
    /// (IslandIndex) The island index is out of range
    #[error("(IslandIndex) island index {index} is out of range ({count} islands)")]
    IslandIndex { index: usize, count: usize },
    /// (DefaultIslandLocked) Island 0 cannot be removed, renamed or moved
    #[error("(DefaultIslandLocked) the default island cannot be removed or moved")]
    DefaultIslandLocked,
    /// Indicates an inconsistency while building the reference triangle mesh
    #[error(transparent)]
    TriMesh(#[from] TriMeshBuilderError),
}

/// A single element the engine could not find a counterpart for.
///
/// These are expected in steady state and never abort an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    /// A membership-inferred island has no vertex group of the same name
    IslandWithoutChannel { island: String },
    /// A side-suffixed shape key has no counterpart on the other side
    ShapeKeyWithoutPair { name: String },
    /// No reference surface lies within the search radius of this vertex
    NormalWithoutMatch { vertex: usize },
}

impl std::fmt::Display for Skipped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skipped::IslandWithoutChannel { island } => {
                write!(f, "island `{island}` has no matching vertex group")
            },
            Skipped::ShapeKeyWithoutPair { name } => {
                write!(f, "shape key `{name}` has no opposite key")
            },
            Skipped::NormalWithoutMatch { vertex } => {
                write!(f, "vertex {vertex} has no reference normal within range")
            },
        }
    }
}

//! The reconciliation stages run after a topology mirror, plus the bundled mirror itself.

pub mod normals;
pub mod shape_keys;
pub mod topology;
pub mod uv;
pub mod weights;

pub use normals::{ReferenceCopy, transfer_normals};
pub use shape_keys::unsymmetrize;
pub use topology::{ReflectHalf, TopologyMirror};
pub use weights::mirror_weights;

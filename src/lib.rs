//! Attribute reconciliation for **mesh symmetrize** operations on rigged characters.
//!
//! A topology mirror copies one half of a mesh onto the other. What it copies
//! verbatim is wrong on the new half: weights sit in the kept side's vertex
//! groups, UVs overlap the originals, custom normals are lost, and side-specific
//! shape keys now move both halves. This crate takes the mirrored mesh and puts
//! each of those layers back onto the right side.
//!
//! - [`naming`]: `_L`/`_R` style name pairing for vertex groups and shape keys
//! - [`algorithm::weights`]: weight swap between paired channels
//! - [`algorithm::uv`]: UV islands, their face assignment, reflection and preview
//! - [`algorithm::normals`]: custom normal recovery by nearest-surface lookup
//! - [`algorithm::shape_keys`]: shape key unsymmetrize
//! - [`symmetrize`]: the pipeline running all of it behind a [`TopologyMirror`]
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **serde**: serialize UV island lists and read the legacy island format
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod algorithm;
pub mod errors;
pub mod float_types;
pub mod mesh;
pub mod naming;
pub mod symmetrize;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use algorithm::topology::{ReflectHalf, TopologyMirror};
pub use errors::{Result, Skipped, SymmetryError};
pub use mesh::{Mesh, MirrorAxis, MirrorDirection, MirroredSelection};
pub use symmetrize::{SymmetrizeOptions, SymmetryReport, Symmetrizer};

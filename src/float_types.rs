// Re-export parry for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// UV coordinates closer than this to an island's mirror axis are snapped onto it
/// before reflection, so seam loops land exactly on the axis.
pub const UV_SNAP_TOLERANCE: Real = 1e-4;

/// Default search radius for custom normal correspondence.
pub const DEFAULT_NORMAL_MAX_DISTANCE: Real = 1e-4;

/// U coordinate used for the default island when no island 0 exists.
pub const DEFAULT_AXIS_U: Real = 0.5;

/// Lazily-initialized weld distance used by the topology mirror.
/// Defaults to `1e-5`, but can be overridden:
///  1) **Build-time**: set env var `SYMRS_WELD_TOLERANCE` (e.g. `SYMRS_WELD_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_weld_tolerance`] once before using the library
static WELD_TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_weld_tolerance() -> Real {
    1e-5
}

/// Returns the current weld distance.
/// If not set yet, it tries `SYMRS_WELD_TOLERANCE` (parsed as the active `Real`) and
/// falls back to `1e-5`.
pub fn weld_tolerance() -> Real {
    *WELD_TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("SYMRS_WELD_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_weld_tolerance()
    })
}

/// Set the weld distance programmatically once (subsequent calls are ignored).
pub fn set_weld_tolerance(value: Real) {
    let _ = WELD_TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

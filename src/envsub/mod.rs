//! Environment substitution inside goose `ENVSUB` regions.
//!
//! - [`region`] - the line scanner that finds regions and drives interpolation
//! - [`interpolate`] - the per-line `${VAR}` substitution primitive
//! - [`env`] - variable sources the primitive reads from
//! - [`observer`] - optional per-line diagnostics

pub mod env;
pub mod interpolate;
pub mod observer;
pub mod region;

pub use env::{Environment, ProcessEnv, VariableContext};
pub use interpolate::{interpolate, parse_interpolation, InterpolationError, Operator, Segment};
pub use observer::{InterpolationObserver, NoopObserver, TracingObserver};
pub use region::{
    process, process_bytes, process_bytes_with_observer, process_with_observer, Marker,
    RegionState, ENVSUB_OFF, ENVSUB_ON,
};

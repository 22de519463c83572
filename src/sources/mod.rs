//! UV index sources
//!
//! Real lookups live outside this crate; they plug in through [`UvSource`].

pub mod simulated;
pub mod uv_source;

pub use simulated::{SimulatedSource, UnconfiguredSource};
pub use uv_source::{validate_postcode, Coordinates, SourceError, UvSource};

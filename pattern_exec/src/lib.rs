//! # Search pattern library.
//!
//! Geodetic navigation primitives and the coverage/search pattern generators built on them. Every
//! operation is a pure computation over immutable coordinates, the library performs no I/O.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Geographic coordinates and bounding boxes
pub mod coord;

/// Geodetic primitives - distances, bearings and local tangent-plane offsets
pub mod geo;

/// Pattern generators - lawnmower sweeps and circular/helical spirals
pub mod pattern;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use coord::{Bounds, Coordinate};
pub use geo::{DistanceStrategy, EarthModel, GeoError};
pub use pattern::{
    CirclePattern, HelixPattern, Path, Pattern, PatternError, PatternParams, SpiralFacing,
    Waypoint,
};

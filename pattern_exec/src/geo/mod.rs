//! Geodetic primitives
//!
//! Distance and bearing between pairs of [`Coordinate`](crate::coord::Coordinate)s, and
//! conversion of local planar offsets back into coordinates. All functions are pure.
//!
//! Two different earth radii are in use, and are kept distinct in [`EarthModel`]:
//!
//! - `sphere_radius_m` is used for great-circle distances (haversine and the flat
//!   approximations),
//! - `projection_radius_m` (WGS-84 equatorial radius) is used only when projecting planar offsets
//!   onto the local tangent plane.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod bearing;
mod distance;
mod offset;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// Internal
pub use bearing::*;
pub use distance::*;
pub use offset::polar_to_planar;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Radius of the sphere used for distance calculations.
///
/// Units: meters
pub const SPHERE_RADIUS_M: f64 = 6_364_963.0;

/// WGS-84 equatorial radius, used for local tangent-plane projection.
///
/// Units: meters
pub const WGS84_EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

/// Bias added to angular differences in the flat distance approximations to keep their
/// denominators away from zero. Equal to 1e-6 degrees.
///
/// Units: radians
pub const FLAT_EPSILON_RAD: f64 = 1.7453292519943295e-8;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The earth model used by the geodetic functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarthModel {
    /// Radius of the sphere for great-circle distances.
    ///
    /// Units: meters
    pub sphere_radius_m: f64,

    /// Radius used to project planar offsets onto the local tangent plane.
    ///
    /// Units: meters
    pub projection_radius_m: f64,

    /// Division guard bias for the flat distance approximations.
    ///
    /// Units: radians
    pub flat_epsilon_rad: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur when building or computing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("Coordinate ({lat_deg}, {lon_deg}) is outside the valid latitude/longitude range")]
    InvalidCoordinate { lat_deg: f64, lon_deg: f64 },

    #[error("Coordinate ({lat_deg}, {lon_deg}, {alt_m}) has a non-finite component")]
    NonFinite { lat_deg: f64, lon_deg: f64, alt_m: f64 },

    #[error("Cannot project a planar offset from a pole")]
    PolarOrigin,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for EarthModel {
    fn default() -> Self {
        Self {
            sphere_radius_m: SPHERE_RADIUS_M,
            projection_radius_m: WGS84_EQUATORIAL_RADIUS_M,
            flat_epsilon_rad: FLAT_EPSILON_RAD,
        }
    }
}

impl EarthModel {
    /// Check that all radii are finite and positive and the epsilon is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.sphere_radius_m.is_finite()
            && self.sphere_radius_m > 0.0
            && self.projection_radius_m.is_finite()
            && self.projection_radius_m > 0.0
            && self.flat_epsilon_rad.is_finite()
            && self.flat_epsilon_rad >= 0.0
    }

    /// Length of one degree of arc on the distance sphere.
    ///
    /// Units: kilometers/degree
    pub fn km_per_deg(&self) -> f64 {
        self.sphere_radius_m / 1000.0 * std::f64::consts::PI / 180.0
    }
}

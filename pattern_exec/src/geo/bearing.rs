//! Bearings between coordinates

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::f64::consts::TAU;
use util::maths::map_pi_to_2pi;

use crate::coord::Coordinate;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initial great-circle bearing from `a` to `b`, measured clockwise from north.
///
/// The result is in the range (-pi, pi] and is not normalised, see [`compass_bearing_rad`] for a
/// [0, 2pi) variant. Identical points have a bearing of zero.
///
/// Units: radians
pub fn bearing_rad(a: &Coordinate, b: &Coordinate) -> f64 {
    let (east, north) = bearing_terms(a, b);
    east.atan2(north)
}

/// Initial bearing from `a` to `b` normalised into [0, 2pi).
///
/// Units: radians
pub fn compass_bearing_rad(a: &Coordinate, b: &Coordinate) -> f64 {
    let bearing = map_pi_to_2pi(bearing_rad(a, b));

    // Tiny negative bearings land on 2pi after the shift
    if bearing >= TAU {
        0.0
    } else {
        bearing
    }
}

/// Initial bearing from `a` to `b` normalised into [0, 360).
///
/// Units: degrees
pub fn compass_bearing_deg(a: &Coordinate, b: &Coordinate) -> f64 {
    let bearing = compass_bearing_rad(a, b).to_degrees();

    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// Direction from `a` to `b` measured counter-clockwise from local east.
///
/// This is the angle of `b` in the local tangent plane centred on `a`, so an offset of
/// `(r cos(angle), r sin(angle))` east/north from `a` points towards `b`.
///
/// Units: radians
pub fn planar_angle_rad(a: &Coordinate, b: &Coordinate) -> f64 {
    let (east, north) = bearing_terms(a, b);
    north.atan2(east)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// The east and north components of the initial great-circle direction from `a` to `b`.
fn bearing_terms(a: &Coordinate, b: &Coordinate) -> (f64, f64) {
    let (lat1, lat2) = (a.lat_rad(), b.lat_rad());
    let dlon = b.lon_rad() - a.lon_rad();

    let east = dlon.sin() * lat2.cos();
    let north = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    (east, north)
}

//! # Lawnmower pattern
//!
//! A boustrophedon sweep over the axis-aligned box spanned by two opposite corners. Legs run
//! parallel to the longer side of the box and are stepped along the shorter side, alternating
//! direction so that consecutive legs connect.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, trace};

use super::{Path, PatternError, PatternParams, Waypoint};
use crate::coord::Coordinate;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The axis along which successive legs are offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepAxis {
    /// Legs run east-west, stepping north or south
    Latitude,

    /// Legs run north-south, stepping east or west
    Longitude,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Generate a lawnmower path covering the box between `corner1` and `corner2`.
///
/// The path starts at `corner1` and ends at `corner2`. Intermediate waypoints take the altitude of
/// `corner1` and have no region of interest.
pub fn lawnmower(
    corner1: &Coordinate,
    corner2: &Coordinate,
    params: &PatternParams,
) -> Result<Path, PatternError> {
    params.validate()?;

    if corner1.same_position(corner2) {
        debug!("Lawnmower corners coincide, returning minimal path");
        return Ok(minimal_path(corner1, corner2));
    }

    let (d1_m, d2_m) = edge_lengths_m(corner1, corner2, params);
    let sweeps = sweeps_for(d1_m, d2_m, params.sweep_spacing_m);

    if sweeps == 0 {
        debug!(
            "Lawnmower box {:.3} x {:.3} m is narrower than the sweep spacing",
            d1_m, d2_m
        );
        return Ok(minimal_path(corner1, corner2));
    }

    // A full sweep list is 2 points per leg, a closing corner and the end point. A tiny spacing
    // saturates the sweep count, so the total must saturate as well.
    let num_points = sweeps.saturating_mul(2).saturating_add(2);
    if num_points > params.max_waypoints {
        return Err(PatternError::TooManyWaypoints {
            required: num_points,
            max: params.max_waypoints,
        });
    }

    let axis = if d1_m > d2_m {
        StepAxis::Latitude
    } else {
        StepAxis::Longitude
    };

    debug!(
        "Lawnmower over {:.3} x {:.3} m: {} sweeps stepping {:?}",
        d1_m, d2_m, sweeps, axis
    );

    let (lat1, lon1, alt_m) = (corner1.lat_deg(), corner1.lon_deg(), corner1.alt_m());
    let (lat2, lon2) = (corner2.lat_deg(), corner2.lon_deg());

    let mut waypoints = Vec::with_capacity(num_points);

    for i in 0..sweeps {
        let (v1, v2) = match axis {
            StepAxis::Latitude => {
                let lat = lat1 + (lat2 - lat1) / sweeps as f64 * i as f64;
                (
                    Coordinate::new(lat, lon1, alt_m)?,
                    Coordinate::new(lat, lon2, alt_m)?,
                )
            }
            StepAxis::Longitude => {
                let lon = lon1 + (lon2 - lon1) / sweeps as f64 * i as f64;
                (
                    Coordinate::new(lat1, lon, alt_m)?,
                    Coordinate::new(lat2, lon, alt_m)?,
                )
            }
        };

        let leg = if i % 2 == 0 { [v1, v2] } else { [v2, v1] };
        for p in leg.iter() {
            trace!("Lawnmower waypoint {}: {}", waypoints.len(), p);
            waypoints.push(Waypoint::new(*p));
        }
    }

    // With an even number of legs the last one finished on the start side, so cross over to the
    // far edge before heading to the final corner
    if sweeps % 2 == 0 {
        let closing = match axis {
            StepAxis::Latitude => Coordinate::new(lat2, lon1, alt_m)?,
            StepAxis::Longitude => Coordinate::new(lat1, lon2, alt_m)?,
        };
        waypoints.push(Waypoint::new(closing));
    }

    waypoints.push(Waypoint::new(*corner2));

    Ok(Path::from_waypoints(waypoints))
}

/// The number of legs [`lawnmower`] would generate for this box.
pub fn sweep_count(corner1: &Coordinate, corner2: &Coordinate, params: &PatternParams) -> usize {
    let (d1_m, d2_m) = edge_lengths_m(corner1, corner2, params);
    sweeps_for(d1_m, d2_m, params.sweep_spacing_m)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Lengths of the east-west edge along `corner1`'s latitude and the north-south edge along
/// `corner2`'s longitude.
fn edge_lengths_m(
    corner1: &Coordinate,
    corner2: &Coordinate,
    params: &PatternParams,
) -> (f64, f64) {
    let shared = corner1.with_lon_of(corner2);

    (
        params.earth.haversine_m(corner1, &shared),
        params.earth.haversine_m(&shared, corner2),
    )
}

fn sweeps_for(d1_m: f64, d2_m: f64, spacing_m: f64) -> usize {
    (d1_m.min(d2_m) / spacing_m).floor() as usize
}

/// The path for a box too small to sweep.
fn minimal_path(corner1: &Coordinate, corner2: &Coordinate) -> Path {
    if corner1 == corner2 {
        Path::from_waypoints(vec![Waypoint::new(*corner1)])
    } else {
        Path::from_waypoints(vec![Waypoint::new(*corner1), Waypoint::new(*corner2)])
    }
}

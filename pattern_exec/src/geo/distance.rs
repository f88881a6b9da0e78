//! Great-circle distance and its flat short-baseline approximations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::maths::clamp;

use super::EarthModel;
use crate::coord::Coordinate;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The available distance formulas.
///
/// Only [`DistanceStrategy::Haversine`] is accurate over long baselines, the flat variants project
/// the difference onto a plane at the mean latitude and are only valid for separations of up to a
/// few tens of kilometers. The pattern generators always use the haversine formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceStrategy {
    /// Exact great-circle distance on the sphere
    Haversine,

    /// Flat approximation evaluated in degrees
    FlatDegrees,

    /// Flat approximation evaluated in radians, using `atan2`
    FlatRadians,

    /// Flat approximation evaluated in radians, scaled by the sphere radius
    FlatRadiansScaled,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DistanceStrategy {
    /// All strategies, in order of decreasing accuracy.
    pub const ALL: [DistanceStrategy; 4] = [
        DistanceStrategy::Haversine,
        DistanceStrategy::FlatDegrees,
        DistanceStrategy::FlatRadians,
        DistanceStrategy::FlatRadiansScaled,
    ];
}

impl EarthModel {
    /// Distance between two coordinates using the chosen strategy.
    ///
    /// Units: meters
    pub fn distance_m(&self, strategy: DistanceStrategy, a: &Coordinate, b: &Coordinate) -> f64 {
        match strategy {
            DistanceStrategy::Haversine => self.haversine_m(a, b),
            DistanceStrategy::FlatDegrees => self.flat_degrees_km(a, b) * 1000.0,
            DistanceStrategy::FlatRadians => self.flat_radians_km(a, b) * 1000.0,
            DistanceStrategy::FlatRadiansScaled => self.flat_radians_scaled_km(a, b) * 1000.0,
        }
    }

    /// Great-circle distance between two coordinates using the haversine formula.
    ///
    /// Altitude is ignored.
    ///
    /// Units: meters
    pub fn haversine_m(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let (lat1, lon1) = (a.lat_rad(), a.lon_rad());
        let (lat2, lon2) = (b.lat_rad(), b.lon_rad());

        let sin_dlat = ((lat2 - lat1) / 2.0).sin();
        let sin_dlon = ((lon2 - lon1) / 2.0).sin();

        let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;

        // Rounding can push h just past 1 for antipodal points
        2.0 * self.sphere_radius_m * clamp(h, 0.0, 1.0).sqrt().asin()
    }

    /// Approximate distance, computed in degrees.
    ///
    /// Both differences are biased by the epsilon so that `lat1 == lat2` does not divide by zero,
    /// which also means that the distance between identical points is small but not zero.
    ///
    /// Units: kilometers
    pub fn flat_degrees_km(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let eps_deg = self.flat_epsilon_rad.to_degrees();

        let dlat = b.lat_deg() - a.lat_deg();
        let dlon = b.lon_deg() - a.lon_deg();

        let term1 = self.km_per_deg() * (dlat + eps_deg);
        let term2 = (a.lat_deg() + dlat / 2.0).to_radians().cos();
        let term3 = (dlon + eps_deg) / (dlat + eps_deg);

        (term1 / (term2 * term3).atan().cos()).abs()
    }

    /// Approximate distance, computed in radians with a quadrant-aware arctangent.
    ///
    /// Units: kilometers
    pub fn flat_radians_km(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let eps = self.flat_epsilon_rad;

        let dlat = b.lat_rad() - a.lat_rad();
        let dlon = b.lon_rad() - a.lon_rad();

        let term1 = self.km_per_deg() * (dlat.to_degrees() + eps.to_degrees());
        let term2 = (a.lat_rad() + dlat / 2.0).cos() * (dlon + eps);
        let term3 = dlat + eps;

        term1 / term2.atan2(term3).cos()
    }

    /// Approximate distance, computed in radians and scaled directly by the sphere radius.
    ///
    /// Units: kilometers
    pub fn flat_radians_scaled_km(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let eps = self.flat_epsilon_rad;
        let radius_km = self.sphere_radius_m / 1000.0;

        let dlat = b.lat_rad() - a.lat_rad();
        let dlon = b.lon_rad() - a.lon_rad();

        let term1 = radius_km * dlat + radius_km * eps;
        let term2 = (a.lat_rad() + dlat / 2.0).cos();
        let term3 = (dlon + eps) / (dlat + eps);

        (term1 / (term2 * term3).atan().cos()).abs()
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Haversine distance using the default [`EarthModel`].
///
/// Units: meters
pub fn haversine_m(a: &Coordinate, b: &Coordinate) -> f64 {
    EarthModel::default().haversine_m(a, b)
}

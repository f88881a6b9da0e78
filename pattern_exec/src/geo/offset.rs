//! Local tangent-plane projection of planar offsets

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use util::maths::wrap_180;

use super::{EarthModel, GeoError};
use crate::coord::{Coordinate, MAX_ABS_LAT_DEG};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Origins closer than this to a pole have no usable east direction.
///
/// Units: degrees
const POLE_TOLERANCE_DEG: f64 = 1e-9;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl EarthModel {
    /// Move `origin` by a planar offset, given as `[east, north]` in meters, using an
    /// equirectangular approximation of the local tangent plane.
    ///
    /// The result keeps the altitude of `origin`. Longitude wraps across the antimeridian, but an
    /// offset which would pass over a pole (or any origin at a pole, where east is undefined) is
    /// an error.
    pub fn offset(
        &self,
        origin: &Coordinate,
        offset_m: &Vector2<f64>,
    ) -> Result<Coordinate, GeoError> {
        if MAX_ABS_LAT_DEG - origin.lat_deg().abs() < POLE_TOLERANCE_DEG {
            return Err(GeoError::PolarOrigin);
        }

        let dlat_rad = offset_m.y / self.projection_radius_m;
        let dlon_rad = offset_m.x / (self.projection_radius_m * origin.lat_rad().cos());

        Coordinate::new(
            origin.lat_deg() + dlat_rad.to_degrees(),
            wrap_180(origin.lon_deg() + dlon_rad.to_degrees()),
            origin.alt_m(),
        )
    }

    /// Move `origin` by `distance_m` in the direction `angle_rad`, measured counter-clockwise from
    /// local east.
    pub fn offset_polar(
        &self,
        origin: &Coordinate,
        distance_m: f64,
        angle_rad: f64,
    ) -> Result<Coordinate, GeoError> {
        self.offset(origin, &polar_to_planar(distance_m, angle_rad))
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a distance and counter-clockwise-from-east angle into an `[east, north]` vector.
pub fn polar_to_planar(distance_m: f64, angle_rad: f64) -> Vector2<f64> {
    Vector2::new(distance_m * angle_rad.cos(), distance_m * angle_rad.sin())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geo::planar_angle_rad;

    #[test]
    fn test_offset_north_and_east() {
        let model = EarthModel::default();
        let origin = Coordinate::new(-32.0, 116.0, 12.0).unwrap();

        let north = model.offset(&origin, &Vector2::new(0.0, 100.0)).unwrap();
        let expected_lat = -32.0 + (100.0 / 6_378_137.0f64).to_degrees();
        assert!((north.lat_deg() - expected_lat).abs() < 1e-12);
        assert_eq!(north.lon_deg(), origin.lon_deg());
        assert_eq!(north.alt_m(), 12.0);

        let east = model.offset(&origin, &Vector2::new(100.0, 0.0)).unwrap();
        assert_eq!(east.lat_deg(), origin.lat_deg());
        assert!(east.lon_deg() > origin.lon_deg());
    }

    #[test]
    fn test_offset_distance_matches_request() {
        // The projection radius is larger than the distance sphere radius, so measured distances
        // come out shorter by their ratio
        let model = EarthModel::default();
        let ratio = model.sphere_radius_m / model.projection_radius_m;
        let origin = Coordinate::new_2d(-31.98, 115.82).unwrap();

        for i in 0..12 {
            let angle = (i as f64 * 30.0).to_radians();
            let moved = model.offset_polar(&origin, 150.0, angle).unwrap();
            let d = model.haversine_m(&origin, &moved);
            assert!(((d / 150.0) - ratio).abs() < 1e-4, "angle {} gave {} m", i * 30, d);

            let back = planar_angle_rad(&origin, &moved);
            let err = util::maths::rem_euclid(back - angle + 1.0, std::f64::consts::TAU) - 1.0;
            assert!(err.abs() < 1e-3);
        }
    }

    #[test]
    fn test_offset_wraps_longitude() {
        let model = EarthModel::default();
        let origin = Coordinate::new_2d(0.0, 179.9999).unwrap();

        let moved = model.offset(&origin, &Vector2::new(100.0, 0.0)).unwrap();
        assert!(moved.lon_deg() < -179.0);
    }

    #[test]
    fn test_offset_over_pole_is_error() {
        let model = EarthModel::default();

        let near_pole = Coordinate::new_2d(89.9999, 0.0).unwrap();
        assert!(model.offset(&near_pole, &Vector2::new(0.0, 1000.0)).is_err());

        let pole = Coordinate::new_2d(90.0, 0.0).unwrap();
        assert_eq!(
            model.offset(&pole, &Vector2::new(10.0, 0.0)),
            Err(GeoError::PolarOrigin)
        );
    }
}

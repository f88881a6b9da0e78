//! # Coordinates
//!
//! Geographic positions used throughout the library. A [`Coordinate`] can only be built through a
//! validating constructor, so every function taking one can assume it is in range.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

use crate::geo::GeoError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum absolute latitude.
///
/// Units: degrees
pub const MAX_ABS_LAT_DEG: f64 = 90.0;

/// Maximum absolute longitude.
///
/// Units: degrees
pub const MAX_ABS_LON_DEG: f64 = 180.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    /// Latitude, positive north.
    ///
    /// Units: degrees
    lat_deg: f64,

    /// Longitude, positive east.
    ///
    /// Units: degrees
    lon_deg: f64,

    /// Altitude.
    ///
    /// Units: meters
    alt_m: f64,
}

/// Unvalidated mirror of [`Coordinate`], used when deserializing.
#[derive(Deserialize)]
struct RawCoordinate {
    lat_deg: f64,
    lon_deg: f64,
    #[serde(default)]
    alt_m: f64,
}

/// An axis-aligned latitude/longitude box, used as a geofence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// The south-west (minimum lat/lon) corner
    pub south_west: Coordinate,

    /// The north-east (maximum lat/lon) corner
    pub north_east: Coordinate,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Coordinate {
    /// Create a new coordinate, checking that the latitude and longitude are in range and that all
    /// components are finite.
    pub fn new(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Result<Self, GeoError> {
        if !(lat_deg.is_finite() && lon_deg.is_finite() && alt_m.is_finite()) {
            return Err(GeoError::NonFinite {
                lat_deg,
                lon_deg,
                alt_m,
            });
        }

        if lat_deg.abs() > MAX_ABS_LAT_DEG || lon_deg.abs() > MAX_ABS_LON_DEG {
            return Err(GeoError::InvalidCoordinate { lat_deg, lon_deg });
        }

        Ok(Self {
            lat_deg,
            lon_deg,
            alt_m,
        })
    }

    /// Create a new coordinate at zero altitude.
    pub fn new_2d(lat_deg: f64, lon_deg: f64) -> Result<Self, GeoError> {
        Self::new(lat_deg, lon_deg, 0.0)
    }

    /// Latitude in degrees
    pub fn lat_deg(&self) -> f64 {
        self.lat_deg
    }

    /// Longitude in degrees
    pub fn lon_deg(&self) -> f64 {
        self.lon_deg
    }

    /// Altitude in meters
    pub fn alt_m(&self) -> f64 {
        self.alt_m
    }

    /// Latitude in radians
    pub fn lat_rad(&self) -> f64 {
        self.lat_deg.to_radians()
    }

    /// Longitude in radians
    pub fn lon_rad(&self) -> f64 {
        self.lon_deg.to_radians()
    }

    /// Return a copy of this coordinate at a different altitude.
    pub fn with_alt(&self, alt_m: f64) -> Result<Self, GeoError> {
        Self::new(self.lat_deg, self.lon_deg, alt_m)
    }

    /// Return a copy of this coordinate with its longitude replaced by the longitude of `other`.
    ///
    /// Both inputs are already valid so the result is too.
    pub fn with_lon_of(&self, other: &Coordinate) -> Self {
        Self {
            lat_deg: self.lat_deg,
            lon_deg: other.lon_deg,
            alt_m: self.alt_m,
        }
    }

    /// True if both coordinates refer to the same horizontal position, ignoring altitude.
    pub fn same_position(&self, other: &Coordinate) -> bool {
        self.lat_deg == other.lat_deg && self.lon_deg == other.lon_deg
    }
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat_deg, raw.lon_deg, raw.alt_m)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.7}, {:.7}, {:.3})",
            self.lat_deg, self.lon_deg, self.alt_m
        )
    }
}

impl Bounds {
    /// Create a new bounding box from any two opposite corners.
    pub fn from_corners(a: &Coordinate, b: &Coordinate) -> Self {
        Self {
            south_west: Coordinate {
                lat_deg: a.lat_deg.min(b.lat_deg),
                lon_deg: a.lon_deg.min(b.lon_deg),
                alt_m: 0.0,
            },
            north_east: Coordinate {
                lat_deg: a.lat_deg.max(b.lat_deg),
                lon_deg: a.lon_deg.max(b.lon_deg),
                alt_m: 0.0,
            },
        }
    }

    /// Check if the coordinate is inside the box, including its edges. Altitude is ignored.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.lat_deg >= self.south_west.lat_deg
            && coord.lat_deg <= self.north_east.lat_deg
            && coord.lon_deg >= self.south_west.lon_deg
            && coord.lon_deg <= self.north_east.lon_deg
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(Coordinate::new(-31.9, 115.8, 10.0).is_ok());
        assert!(Coordinate::new(90.0, -180.0, 0.0).is_ok());

        assert!(matches!(
            Coordinate::new(90.1, 0.0, 0.0),
            Err(GeoError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.5, 0.0),
            Err(GeoError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            Coordinate::new(std::f64::NAN, 0.0, 0.0),
            Err(GeoError::NonFinite { .. })
        ));
        assert!(matches!(
            Coordinate::new(0.0, 0.0, std::f64::INFINITY),
            Err(GeoError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let c: Coordinate =
            serde_json::from_str(r#"{"lat_deg": -32.0, "lon_deg": 116.0}"#).unwrap();
        assert_eq!(c, Coordinate::new_2d(-32.0, 116.0).unwrap());

        let bad: Result<Coordinate, _> =
            serde_json::from_str(r#"{"lat_deg": -132.0, "lon_deg": 116.0, "alt_m": 5.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_in_bounds() {
        let perth = Bounds::from_corners(
            &Coordinate::new_2d(-31.0, 117.0).unwrap(),
            &Coordinate::new_2d(-33.0, 115.0).unwrap(),
        );

        let outside = [(-34.0, 116.0), (-30.0, 116.0), (-32.0, 114.0), (-32.0, 118.0)];
        let inside = [(-32.0, 116.0), (-31.0, 115.0), (-33.0, 117.0)];

        for &(lat, lon) in outside.iter() {
            assert!(!perth.contains(&Coordinate::new_2d(lat, lon).unwrap()));
        }
        for &(lat, lon) in inside.iter() {
            assert!(perth.contains(&Coordinate::new_2d(lat, lon).unwrap()));
        }
    }
}

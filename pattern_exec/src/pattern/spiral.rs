//! # Spiral patterns
//!
//! Circles and helices around a centre point. A helix starts on a boundary point and winds
//! towards a target point, interpolating radius, altitude and angle linearly over a whole number
//! of revolutions so that the climb per revolution never exceeds the configured rate. A circle is
//! a helix whose target is its boundary.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use util::maths::lerp;

use super::{Path, PatternError, PatternParams, Waypoint};
use crate::coord::Coordinate;
use crate::geo::planar_angle_rad;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single circle at constant altitude around `center`, starting and ending at `boundary`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePattern {
    pub center: Coordinate,
    pub boundary: Coordinate,

    #[serde(default)]
    pub facing: SpiralFacing,
}

/// A helix around `center` from `boundary` to `target`.
///
/// The radius, altitude and angle of the waypoints are interpolated between those of the boundary
/// and the target, relative to the centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HelixPattern {
    pub center: Coordinate,
    pub boundary: Coordinate,
    pub target: Coordinate,

    #[serde(default)]
    pub facing: SpiralFacing,
}

/// Interpolated state at one point along a spiral.
struct SpiralSample {
    radius_m: f64,
    angle_rad: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Which way the vehicle should look while flying a spiral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiralFacing {
    /// Face the centre of the spiral
    Inward,

    /// Face away from the centre, along the radial through the waypoint
    Outward,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SpiralFacing {
    fn default() -> Self {
        SpiralFacing::Inward
    }
}

impl std::str::FromStr for SpiralFacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inward" | "in" => Ok(SpiralFacing::Inward),
            "outward" | "out" => Ok(SpiralFacing::Outward),
            _ => Err(format!("Unknown spiral facing \"{}\"", s)),
        }
    }
}

impl CirclePattern {
    /// Generate the path for this circle.
    pub fn generate(&self, params: &PatternParams) -> Result<Path, PatternError> {
        HelixPattern::from(*self).generate(params)
    }
}

impl From<CirclePattern> for HelixPattern {
    fn from(circle: CirclePattern) -> Self {
        Self {
            center: circle.center,
            boundary: circle.boundary,
            target: circle.boundary,
            facing: circle.facing,
        }
    }
}

impl HelixPattern {
    /// Number of full revolutions needed to change altitude from the boundary to the target
    /// without exceeding the maximum climb rate.
    ///
    /// Level spirals and descents take a single revolution.
    pub fn revolutions(&self, params: &PatternParams) -> usize {
        let diff_m = self.target.alt_m() - self.boundary.alt_m();
        let climb_m = params.max_climb_rate_m_per_rev.min(diff_m);

        if climb_m != 0.0 {
            ((diff_m / climb_m).ceil() as usize).max(1)
        } else {
            1
        }
    }

    /// Generate the path for this helix.
    ///
    /// The first waypoint is exactly `boundary` and the last exactly `target`. If both the start
    /// and end radii are smaller than the minimum spiral radius the path only contains the
    /// boundary and target.
    pub fn generate(&self, params: &PatternParams) -> Result<Path, PatternError> {
        params.validate()?;

        let earth = &params.earth;

        let start_radius_m = earth.haversine_m(&self.center, &self.boundary);
        let end_radius_m = earth.haversine_m(&self.center, &self.target);

        if start_radius_m < params.min_spiral_radius_m && end_radius_m < params.min_spiral_radius_m
        {
            debug!(
                "Spiral radii {:.3} m and {:.3} m are below the minimum, returning minimal path",
                start_radius_m, end_radius_m
            );
            return Ok(self.minimal_path());
        }

        let start_angle_rad = planar_angle_rad(&self.center, &self.boundary);
        let end_angle_rad = planar_angle_rad(&self.center, &self.target);
        let (start_alt_m, end_alt_m) = (self.boundary.alt_m(), self.target.alt_m());

        let revs = self.revolutions(params);

        // Steps shrink as the radius grows, so the largest radius bounds the points per rev
        let max_step_count =
            (360.0 / step_deg(start_radius_m.max(end_radius_m), params)).ceil() as usize;
        let max_points = revs.saturating_mul(max_step_count).saturating_add(1);
        if max_points > params.max_waypoints {
            return Err(PatternError::TooManyWaypoints {
                required: max_points,
                max: params.max_waypoints,
            });
        }

        debug!(
            "Spiral from {:.3} m to {:.3} m radius, {:.3} m to {:.3} m altitude, {} revolution(s)",
            start_radius_m, end_radius_m, start_alt_m, end_alt_m, revs
        );

        let mut waypoints = Vec::with_capacity(max_points);

        for i in 0..revs {
            let mut j_deg = 0.0f64;

            while j_deg < 360.0 {
                let pct = (i as f64 + j_deg / 360.0) / revs as f64;
                let sample = SpiralSample {
                    radius_m: lerp(start_radius_m, end_radius_m, pct),
                    angle_rad: lerp(start_angle_rad, end_angle_rad, pct) + j_deg.to_radians(),
                };

                let position = if i == 0 && j_deg == 0.0 {
                    self.boundary
                } else {
                    earth
                        .offset_polar(&self.center, sample.radius_m, sample.angle_rad)?
                        .with_alt(lerp(start_alt_m, end_alt_m, pct))?
                };

                let waypoint = Waypoint::facing(position, self.roi(&sample, params)?);
                trace!("Spiral waypoint {}: {}", waypoints.len(), waypoint);
                waypoints.push(waypoint);

                j_deg += step_deg(sample.radius_m, params);
            }
        }

        let last = SpiralSample {
            radius_m: end_radius_m,
            angle_rad: end_angle_rad,
        };
        waypoints.push(Waypoint::facing(self.target, self.roi(&last, params)?));

        Ok(Path::from_waypoints(waypoints))
    }

    /// The region of interest for a waypoint at the given sample.
    fn roi(
        &self,
        sample: &SpiralSample,
        params: &PatternParams,
    ) -> Result<Coordinate, PatternError> {
        match self.facing {
            SpiralFacing::Inward => Ok(self.center),
            SpiralFacing::Outward => Ok(params.earth.offset_polar(
                &self.center,
                sample.radius_m + params.roi_offset_m,
                sample.angle_rad,
            )?),
        }
    }

    /// The path used when the spiral is too small to fly.
    fn minimal_path(&self) -> Path {
        let mut waypoints = vec![Waypoint::facing(self.boundary, self.center)];

        if self.boundary != self.target {
            waypoints.push(Waypoint::facing(self.target, self.center));
        }

        Path::from_waypoints(waypoints)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Angular step which covers `spiral_arc_step_m` of ground track at the given radius, capped at a
/// full revolution.
///
/// Units: degrees
fn step_deg(radius_m: f64, params: &PatternParams) -> f64 {
    let circumference_m = TAU * radius_m;
    (360.0 * params.spiral_arc_step_m / circumference_m).min(360.0)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geo::{EarthModel, GeoError};

    fn coord(lat: f64, lon: f64, alt: f64) -> Coordinate {
        Coordinate::new(lat, lon, alt).unwrap()
    }

    /// Total angle swept around `center` by the path, counter-clockwise positive.
    fn swept_angle(center: &Coordinate, path: &Path) -> f64 {
        let angles: Vec<f64> = path.positions().map(|p| planar_angle_rad(center, p)).collect();

        angles
            .windows(2)
            .map(|w| util::maths::rem_euclid(w[1] - w[0] + std::f64::consts::PI, TAU))
            .map(|d| d - std::f64::consts::PI)
            .sum()
    }

    #[test]
    fn test_flat_circle() {
        let params = PatternParams::default();
        let earth = EarthModel::default();
        let center = coord(0.0, 0.0, 0.0);
        let boundary = coord(0.001, 0.0, 10.0);
        let circle = CirclePattern {
            center,
            boundary,
            facing: SpiralFacing::Inward,
        };

        assert_eq!(HelixPattern::from(circle).revolutions(&params), 1);

        let path = circle.generate(&params).unwrap();
        assert!(path.len() > 170);
        assert_eq!(path.first().unwrap().position, boundary);
        assert_eq!(path.last().unwrap().position, boundary);

        for w in path.waypoints() {
            assert_eq!(w.position.alt_m(), 10.0);
            assert_eq!(w.roi, Some(center));

            let r = earth.haversine_m(&center, &w.position);
            assert!((r - 111.0).abs() < 0.5, "radius {} m", r);
        }

        assert!((swept_angle(&center, &path) - TAU).abs() < 1e-3);
    }

    #[test]
    fn test_circle_spacing() {
        let params = PatternParams::default();
        let earth = EarthModel::default();
        let circle = CirclePattern {
            center: coord(-31.98, 115.82, 0.0),
            boundary: coord(-31.979, 115.82, 30.0),
            facing: SpiralFacing::Inward,
        };

        let path = circle.generate(&params).unwrap();
        let w = path.waypoints();

        for (k, pair) in w.windows(2).enumerate() {
            let d = earth.haversine_m(&pair[0].position, &pair[1].position);
            assert!(d <= params.spiral_arc_step_m + 0.05, "step {} was {} m", k, d);

            // The final step onto the boundary closes whatever is left of the circle
            if k + 2 < w.len() {
                assert!(d >= params.spiral_arc_step_m - 0.1, "step {} was {} m", k, d);
            }
        }
    }

    #[test]
    fn test_helix_climb() {
        let params = PatternParams::default();
        let center = coord(-31.98, 115.82, 0.0);
        let helix = HelixPattern {
            center,
            boundary: coord(-31.9798, 115.82, 5.0),
            target: coord(-31.9798, 115.82, 15.0),
            facing: SpiralFacing::Inward,
        };

        assert_eq!(helix.revolutions(&params), 10);

        let path = helix.generate(&params).unwrap();
        assert_eq!(path.first().unwrap().position, helix.boundary);
        assert_eq!(path.last().unwrap().position, helix.target);

        let alts: Vec<f64> = path.positions().map(|p| p.alt_m()).collect();
        for pair in alts.windows(2) {
            assert!(pair[1] >= pair[0]);
        }

        let turns = swept_angle(&center, &path) / TAU;
        assert!((turns - 10.0).abs() < 1e-2, "swept {} turns", turns);
    }

    #[test]
    fn test_revolutions_round_up() {
        let params = PatternParams::default();
        let mut helix = HelixPattern {
            center: coord(-31.98, 115.82, 0.0),
            boundary: coord(-31.9798, 115.82, 5.0),
            target: coord(-31.9798, 115.82, 7.5),
            facing: SpiralFacing::Inward,
        };
        assert_eq!(helix.revolutions(&params), 3);

        helix.target = coord(-31.9798, 115.82, 5.4);
        assert_eq!(helix.revolutions(&params), 1);

        let params = PatternParams {
            max_climb_rate_m_per_rev: 0.25,
            ..Default::default()
        };
        assert_eq!(helix.revolutions(&params), 2);
    }

    #[test]
    fn test_descent_is_single_revolution() {
        let params = PatternParams::default();
        let center = coord(-31.98, 115.82, 0.0);
        let helix = HelixPattern {
            center,
            boundary: coord(-31.9798, 115.82, 15.0),
            target: coord(-31.9798, 115.82, 5.0),
            facing: SpiralFacing::Inward,
        };

        assert_eq!(helix.revolutions(&params), 1);

        let path = helix.generate(&params).unwrap();
        let alts: Vec<f64> = path.positions().map(|p| p.alt_m()).collect();
        for pair in alts.windows(2) {
            assert!(pair[1] <= pair[0]);
        }

        let turns = swept_angle(&center, &path) / TAU;
        assert!((turns - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_expanding_helix_radius() {
        let params = PatternParams::default();
        let earth = EarthModel::default();
        let center = coord(-31.98, 115.82, 0.0);
        let helix = HelixPattern {
            center,
            boundary: coord(-31.9798, 115.82, 5.0),
            target: coord(-31.9805, 115.82, 8.0),
            facing: SpiralFacing::Inward,
        };

        let start_r = earth.haversine_m(&center, &helix.boundary);
        let end_r = earth.haversine_m(&center, &helix.target);

        let path = helix.generate(&params).unwrap();
        for p in path.positions() {
            let r = earth.haversine_m(&center, p);
            assert!(r > start_r * 0.99 && r < end_r * 1.001, "radius {} m", r);
        }

        // Three climbing revolutions, less the half turn the angle unwinds from north to south
        let turns = swept_angle(&center, &path) / TAU;
        assert!((turns - 2.5).abs() < 1e-2, "swept {} turns", turns);
    }

    #[test]
    fn test_outward_roi() {
        let params = PatternParams::default();
        let earth = EarthModel::default();
        let center = coord(-31.98, 115.82, 0.0);
        let helix = HelixPattern {
            center,
            boundary: coord(-31.9798, 115.82, 5.0),
            target: coord(-31.9798, 115.82, 8.0),
            facing: SpiralFacing::Outward,
        };

        let path = helix.generate(&params).unwrap();
        for w in path.waypoints() {
            let roi = w.roi.unwrap();
            let r_pos = earth.haversine_m(&center, &w.position);
            let r_roi = earth.haversine_m(&center, &roi);
            assert!(r_roi > r_pos + 9.0, "roi at {} m for waypoint at {} m", r_roi, r_pos);

            // Along the same radial
            let dir = planar_angle_rad(&center, &w.position) - planar_angle_rad(&center, &roi);
            let dir = util::maths::rem_euclid(dir + std::f64::consts::PI, TAU);
            assert!((dir - std::f64::consts::PI).abs() < 1e-2);
        }
    }

    #[test]
    fn test_degenerate_spiral() {
        let params = PatternParams::default();
        let center = coord(-31.98, 115.82, 10.0);

        let path = CirclePattern {
            center,
            boundary: center,
            facing: SpiralFacing::Inward,
        }
        .generate(&params)
        .unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.first().unwrap().position, center);

        let target = coord(-31.98, 115.82, 20.0);
        let path = HelixPattern {
            center,
            boundary: center,
            target,
            facing: SpiralFacing::Outward,
        }
        .generate(&params)
        .unwrap();
        let positions: Vec<_> = path.positions().copied().collect();
        assert_eq!(positions, vec![center, target]);

        // About 0.3 m from the centre
        let near = coord(-31.980003, 115.82, 10.0);
        let path = CirclePattern {
            center,
            boundary: near,
            facing: SpiralFacing::Inward,
        }
        .generate(&params)
        .unwrap();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_spiral_around_pole() {
        let params = PatternParams::default();
        let helix = HelixPattern {
            center: coord(90.0, 0.0, 0.0),
            boundary: coord(89.999, 0.0, 0.0),
            target: coord(89.999, 0.0, 0.0),
            facing: SpiralFacing::Inward,
        };

        assert!(matches!(
            helix.generate(&params),
            Err(PatternError::Geo(GeoError::PolarOrigin))
        ));
    }

    #[test]
    fn test_too_many_waypoints() {
        let params = PatternParams {
            max_waypoints: 50,
            ..Default::default()
        };
        let circle = CirclePattern {
            center: coord(0.0, 0.0, 0.0),
            boundary: coord(0.001, 0.0, 10.0),
            facing: SpiralFacing::Inward,
        };

        assert!(matches!(
            circle.generate(&params),
            Err(PatternError::TooManyWaypoints { .. })
        ));
    }

    #[test]
    fn test_tiny_climb_rate_exceeds_limit() {
        let params = PatternParams {
            max_climb_rate_m_per_rev: 1e-300,
            ..Default::default()
        };
        let helix = HelixPattern {
            center: coord(-31.98, 115.82, 0.0),
            boundary: coord(-31.9798, 115.82, 5.0),
            target: coord(-31.9798, 115.82, 15.0),
            facing: SpiralFacing::Inward,
        };

        assert_eq!(helix.revolutions(&params), usize::MAX);
        assert_eq!(
            helix.generate(&params),
            Err(PatternError::TooManyWaypoints {
                required: usize::MAX,
                max: params.max_waypoints,
            })
        );
    }

    #[test]
    fn test_tiny_arc_step_exceeds_limit() {
        let params = PatternParams {
            spiral_arc_step_m: 1e-300,
            ..Default::default()
        };
        let circle = CirclePattern {
            center: coord(-31.98, 115.82, 0.0),
            boundary: coord(-31.9798, 115.82, 5.0),
            facing: SpiralFacing::Outward,
        };

        assert!(matches!(
            circle.generate(&params),
            Err(PatternError::TooManyWaypoints { required, .. }) if required > params.max_waypoints
        ));
    }

    #[test]
    fn test_facing_from_str() {
        assert_eq!("inward".parse::<SpiralFacing>(), Ok(SpiralFacing::Inward));
        assert_eq!("Outward".parse::<SpiralFacing>(), Ok(SpiralFacing::Outward));
        assert!("sideways".parse::<SpiralFacing>().is_err());
    }
}

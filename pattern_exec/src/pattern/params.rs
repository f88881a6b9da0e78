//! Parameters for pattern generation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::PatternError;
use crate::geo::EarthModel;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters used by the pattern generators.
///
/// Every field has a default, so a parameter file only needs to list the values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternParams {
    // ---- LAWNMOWER ----
    /// Distance between adjacent sweep legs.
    ///
    /// Units: meters
    pub sweep_spacing_m: f64,

    // ---- SPIRAL ----
    /// Maximum altitude change per revolution of a helix.
    ///
    /// Units: meters/revolution
    pub max_climb_rate_m_per_rev: f64,

    /// Target ground-track distance between consecutive spiral waypoints.
    ///
    /// Units: meters
    pub spiral_arc_step_m: f64,

    /// Spirals whose start and end radii are both below this produce a minimal path.
    ///
    /// Units: meters
    pub min_spiral_radius_m: f64,

    /// How far beyond the spiral the region of interest is placed when facing outwards.
    ///
    /// Units: meters
    pub roi_offset_m: f64,

    // ---- LIMITS ----
    /// Maximum number of waypoints a single generated path may contain.
    pub max_waypoints: usize,

    // ---- EARTH ----
    /// Earth radii and numerical guards.
    pub earth: EarthModel,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            sweep_spacing_m: 3.0,
            max_climb_rate_m_per_rev: 1.0,
            spiral_arc_step_m: 4.0,
            min_spiral_radius_m: 0.5,
            roi_offset_m: 10.0,
            max_waypoints: 100_000,
            earth: EarthModel::default(),
        }
    }
}

impl PatternParams {
    /// Check that the parameters can be used for generation.
    pub fn validate(&self) -> Result<(), PatternError> {
        let positive = [
            ("sweep_spacing_m", self.sweep_spacing_m),
            ("max_climb_rate_m_per_rev", self.max_climb_rate_m_per_rev),
            ("spiral_arc_step_m", self.spiral_arc_step_m),
        ];
        for &(name, value) in positive.iter() {
            if !(value.is_finite() && value > 0.0) {
                return Err(PatternError::InvalidParams(format!(
                    "{} must be finite and positive, found {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("min_spiral_radius_m", self.min_spiral_radius_m),
            ("roi_offset_m", self.roi_offset_m),
        ];
        for &(name, value) in non_negative.iter() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PatternError::InvalidParams(format!(
                    "{} must be finite and non-negative, found {}",
                    name, value
                )));
            }
        }

        if self.max_waypoints < 2 {
            return Err(PatternError::InvalidParams(format!(
                "max_waypoints must be at least 2, found {}",
                self.max_waypoints
            )));
        }

        if !self.earth.is_valid() {
            return Err(PatternError::InvalidParams(format!(
                "invalid earth model {:?}",
                self.earth
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PatternParams::default().validate().is_ok());
    }

    #[test]
    fn test_params_file_matches_defaults() {
        let params: PatternParams =
            util::params::from_toml_str(include_str!("../../../params/pattern_exec.toml"))
                .unwrap();
        assert_eq!(params, PatternParams::default());
    }

    #[test]
    fn test_partial_toml() {
        let params: PatternParams = util::params::from_toml_str(
            r#"
            sweep_spacing_m = 5.0

            [earth]
            sphere_radius_m = 6371000.0
            "#,
        )
        .unwrap();

        assert_eq!(params.sweep_spacing_m, 5.0);
        assert_eq!(params.max_climb_rate_m_per_rev, 1.0);
        assert_eq!(params.earth.sphere_radius_m, 6_371_000.0);
        assert_eq!(params.earth.projection_radius_m, 6_378_137.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            PatternParams {
                sweep_spacing_m: 0.0,
                ..Default::default()
            },
            PatternParams {
                max_climb_rate_m_per_rev: -1.0,
                ..Default::default()
            },
            PatternParams {
                spiral_arc_step_m: std::f64::NAN,
                ..Default::default()
            },
            PatternParams {
                roi_offset_m: -0.1,
                ..Default::default()
            },
            PatternParams {
                max_waypoints: 1,
                ..Default::default()
            },
            PatternParams {
                earth: EarthModel {
                    projection_radius_m: 0.0,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];

        for params in bad.iter() {
            assert!(matches!(
                params.validate(),
                Err(PatternError::InvalidParams(_))
            ));
        }
    }
}

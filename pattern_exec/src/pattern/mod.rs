//! # Pattern generators
//!
//! Generators turn a handful of anchor coordinates into a [`Path`] of waypoints:
//!
//! - [`lawnmower`] sweeps the box between two corners,
//! - [`CirclePattern`] and [`HelixPattern`] orbit a centre point, optionally climbing or
//!   descending between a boundary and a target.
//!
//! Every generator takes its [`PatternParams`] explicitly and is free of side effects other than
//! log records.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod lawnmower;
mod params;
mod path;
mod spiral;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;
use crate::geo::GeoError;

// Internal
pub use lawnmower::{lawnmower, sweep_count};
pub use params::PatternParams;
pub use path::{Path, Waypoint};
pub use spiral::{CirclePattern, HelixPattern, SpiralFacing};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A pattern description which can be generated into a [`Path`].
///
/// Patterns are tagged by `type` when serialized, for example:
///
/// ```toml
/// type = "circle"
/// center = { lat_deg = -31.98, lon_deg = 115.82 }
/// boundary = { lat_deg = -31.979, lon_deg = 115.82, alt_m = 30.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    /// Boustrophedon sweep over the box between two corners
    Lawnmower {
        corner1: Coordinate,
        corner2: Coordinate,
    },

    /// Level circle around a centre
    Circle(CirclePattern),

    /// Climbing or descending spiral around a centre
    Helix(HelixPattern),
}

/// Errors which can occur while generating a pattern.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid pattern parameters: {0}")]
    InvalidParams(String),

    #[error("Pattern would need {required} waypoints, but at most {max} are allowed")]
    TooManyWaypoints { required: usize, max: usize },

    #[error("Geodetic error while generating the pattern: {0}")]
    Geo(#[from] GeoError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pattern {
    /// Generate the path for this pattern.
    pub fn generate(&self, params: &PatternParams) -> Result<Path, PatternError> {
        match self {
            Pattern::Lawnmower { corner1, corner2 } => lawnmower(corner1, corner2, params),
            Pattern::Circle(circle) => circle.generate(params),
            Pattern::Helix(helix) => helix.generate(params),
        }
    }

    /// The short name of the pattern, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Lawnmower { .. } => "lawnmower",
            Pattern::Circle(_) => "circle",
            Pattern::Helix(_) => "helix",
        }
    }
}

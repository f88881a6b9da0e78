//! # Path
//!
//! This module defines the path produced by the pattern generators.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coord::{Bounds, Coordinate};
use crate::geo::EarthModel;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single element of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// The position the vehicle should fly through
    pub position: Coordinate,

    /// The region of interest the vehicle should face while at this waypoint, if any
    pub roi: Option<Coordinate>,
}

/// An ordered, non-empty sequence of waypoints.
///
/// Paths are only built by the generators, which guarantee that the first and last positions are
/// exactly the anchor coordinates the caller supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    waypoints: Vec<Waypoint>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Waypoint {
    /// A waypoint with no region of interest.
    pub fn new(position: Coordinate) -> Self {
        Self {
            position,
            roi: None,
        }
    }

    /// A waypoint facing the given region of interest.
    pub fn facing(position: Coordinate, roi: Coordinate) -> Self {
        Self {
            position,
            roi: Some(roi),
        }
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.roi {
            Some(roi) => write!(f, "{} facing {}", self.position, roi),
            None => write!(f, "{}", self.position),
        }
    }
}

impl Path {
    /// Build a path from a sequence of waypoints.
    ///
    /// Callers must not pass an empty vector.
    pub(crate) fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        debug_assert!(!waypoints.is_empty(), "Attempted to create an empty path");
        Self { waypoints }
    }

    /// The waypoints in order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Iterate over the positions of the waypoints.
    pub fn positions(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        self.waypoints.iter().map(|w| &w.position)
    }

    /// The first waypoint.
    pub fn first(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    /// The last waypoint.
    pub fn last(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    /// Number of waypoints in the path
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false, a generated path holds at least one waypoint
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Total great-circle length of the path, ignoring altitude changes.
    ///
    /// Units: meters
    pub fn length_m(&self, earth: &EarthModel) -> f64 {
        self.waypoints
            .windows(2)
            .map(|w| earth.haversine_m(&w[0].position, &w[1].position))
            .sum()
    }

    /// True if every waypoint position lies inside the given bounds.
    pub fn within(&self, bounds: &Bounds) -> bool {
        self.positions().all(|p| bounds.contains(p))
    }

    /// Consume the path, returning the waypoints.
    pub fn into_waypoints(self) -> Vec<Waypoint> {
        self.waypoints
    }
}

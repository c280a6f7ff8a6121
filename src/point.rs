//! Trajectory point records.
//!
//! [`MotionPoint`] is the unit of everything in this crate: observed samples
//! come from an external producer, forecast samples come from the
//! [`predictor`](crate::predictor). [`WeatherPoint`] is the raw shape the
//! external weather producer packs; the core only moves it to and from disk.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::quadrant::{classify, Quadrant};

/// One time-sampled 3D motion vector plus its classification and norm.
///
/// `quadrant` is kept as the raw stored integer. Values outside `0..=7` are
/// legal on disk and are dropped by the sequence extractor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionPoint {
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
    pub quadrant: i32,
    pub magnitude: f32,
}

impl MotionPoint {
    /// Build a point from its components, deriving magnitude and quadrant.
    #[must_use]
    pub fn from_delta(dx: f32, dy: f32, dz: f32) -> Self {
        Self::from_vector(&Vector3::new(dx, dy, dz))
    }

    /// Build a point from a motion vector, deriving magnitude and quadrant.
    #[must_use]
    pub fn from_vector(v: &Vector3<f32>) -> Self {
        Self {
            dx: v.x,
            dy: v.y,
            dz: v.z,
            quadrant: classify(v.x, v.y).stored_index(),
            magnitude: v.norm(),
        }
    }

    /// Build a point with an explicit stored quadrant, trusted as given.
    #[must_use]
    pub const fn with_quadrant(dx: f32, dy: f32, dz: f32, quadrant: i32, magnitude: f32) -> Self {
        Self {
            dx,
            dy,
            dz,
            quadrant,
            magnitude,
        }
    }

    /// Motion components as a vector.
    #[must_use]
    pub fn vector(&self) -> Vector3<f32> {
        Vector3::new(self.dx, self.dy, self.dz)
    }

    /// Stored quadrant as a directional symbol, if it is in `0..=7`.
    #[must_use]
    pub fn symbol(&self) -> Option<Quadrant> {
        Quadrant::from_index(self.quadrant)
    }
}

/// Raw weather sample as packed by the external weather producer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherPoint {
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
}

impl WeatherPoint {
    #[must_use]
    pub const fn new(temperature: f32, humidity: f32, pressure: f32) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
        }
    }
}

/// Mean motion over the usable records of a trajectory file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrajectoryAverage {
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
    pub magnitude: f32,
    /// Records that contributed to the mean.
    pub count: usize,
}

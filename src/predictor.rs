//! Linear trajectory forecasting.
//!
//! The forecast carries the last observed first difference forward at
//! constant velocity: no acceleration term, no smoothing. Error grows with
//! the number of steps; that is a property of the model, not something this
//! module tries to correct.

use std::path::Path;

use crate::codec::{read_points, write_points, write_points_atomic};
use crate::config::ForecastConfig;
use crate::error::Result;
use crate::point::MotionPoint;

/// Minimum history length needed to derive a momentum vector.
pub const MIN_HISTORY: usize = 2;

/// Forecast length used when the caller does not choose one.
pub const DEFAULT_FORECAST_STEPS: i32 = 10;

/// Extrapolate `steps` future points from the last two points of `history`.
///
/// With `last` and `prev` the final two samples and `Δ = last - prev`,
/// point `i` (1-based) is `last + Δ·i`. Magnitude and quadrant are
/// recomputed for every emitted point.
///
/// Returns an empty vector when `history` has fewer than two points or when
/// `steps <= 0`.
///
/// # Example
///
/// ```
/// use fishing_trajectory::{predict, MotionPoint, Quadrant};
///
/// let history = [
///     MotionPoint::from_delta(0.0, 0.0, 0.0),
///     MotionPoint::from_delta(1.0, 1.0, 0.0),
/// ];
/// let forecast = predict(&history, 3);
/// assert_eq!(forecast.len(), 3);
/// assert_eq!(forecast[2].dx, 4.0);
/// assert_eq!(forecast[2].symbol(), Some(Quadrant::B));
/// ```
#[must_use]
pub fn predict(history: &[MotionPoint], steps: i32) -> Vec<MotionPoint> {
    let (prev, last) = match history {
        [.., prev, last] => (prev.vector(), last.vector()),
        _ => return Vec::new(),
    };
    if steps <= 0 {
        return Vec::new();
    }

    let delta = last - prev;
    (1..=steps)
        .map(|i| MotionPoint::from_vector(&(last + delta * i as f32)))
        .collect()
}

/// Read history from `history_path`, forecast `steps` points and write them
/// to `output_path` in the same binary format.
///
/// Returns the number of forecast points written. A missing or short history
/// still produces a valid, empty output file.
///
/// # Errors
///
/// Returns [`crate::TrajectoryError::Io`] if the output cannot be written.
pub fn predict_trajectory(
    history_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    steps: i32,
) -> Result<usize> {
    // Non-positive steps forecast nothing, same as `predict`.
    let config = ForecastConfig::default().with_steps(steps.max(0));
    predict_trajectory_with(history_path, output_path, &config)
}

/// [`predict_trajectory`] driven by a [`ForecastConfig`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the output cannot be
/// written.
pub fn predict_trajectory_with(
    history_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ForecastConfig,
) -> Result<usize> {
    config.validate()?;

    let history = read_points(history_path.as_ref());
    if history.len() < MIN_HISTORY {
        tracing::debug!(
            path = %history_path.as_ref().display(),
            points = history.len(),
            "history too short to forecast"
        );
    }

    let forecast = predict(&history, config.steps);
    if config.atomic_write {
        write_points_atomic(output_path.as_ref(), &forecast)?;
    } else {
        write_points(output_path.as_ref(), &forecast)?;
    }
    Ok(forecast.len())
}

//! Fishing Trajectory Library
//!
//! Turns noisy motion telemetry into a single, reproducible "fishing score".
//!
//! A trajectory is a binary file of [`MotionPoint`] records. Each point
//! carries a stored quadrant symbol; the sequence of those symbols is scored
//! against a library of bite patterns and a Markov transition matrix, then
//! combined with four fixed placeholder signals into a total in `[0, 100]`.
//! A separate forward path forecasts future points by linear extrapolation
//! and writes them back in the same format.
//!
//! # Pipeline
//!
//! ```text
//! file ─▶ codec ─▶ points ─▶ sequence ─┬─▶ pattern ────┬─▶ score
//!                                      └─▶ transition ─┘
//! history ─▶ predictor ─▶ forecast ─▶ codec ─▶ file
//! ```
//!
//! # Quick Start
//!
//! ```
//! use fishing_trajectory::{compute_score, extract_quadrant_string, write_points, MotionPoint};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("trajectory.bin");
//!
//! let points: Vec<MotionPoint> = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0)]
//!     .iter()
//!     .map(|&(dx, dy)| MotionPoint::from_delta(dx, dy, 0.0))
//!     .collect();
//! write_points(&path, &points)?;
//!
//! assert_eq!(extract_quadrant_string(&path, 32), "dgb");
//! let score = compute_score(&path);
//! assert!(score > 0.0 && score <= 100.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Failure Model
//!
//! Reads never fail: a missing or corrupt file is indistinguishable from an
//! empty trajectory and scores `0.0`. Writes return [`TrajectoryError`].

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod codec;
pub mod config;
pub mod error;
pub mod pattern;
pub mod point;
pub mod predictor;
pub mod quadrant;
pub mod score;
pub mod sequence;
pub mod transition;

// Re-exports for convenient access
pub use codec::{
    average_point, read_last_point, read_points, read_weather_points, write_points,
    write_points_atomic, write_weather_points, Record,
};
pub use config::{ForecastConfig, ScoreConfig};
pub use error::{Result, TrajectoryError};
pub use pattern::{
    analyze_patterns, count_occurrences, score_patterns, PatternStats, BITE_PATTERNS,
};
pub use point::{MotionPoint, TrajectoryAverage, WeatherPoint};
pub use predictor::{predict, predict_trajectory, predict_trajectory_with, DEFAULT_FORECAST_STEPS};
pub use quadrant::{classify, Quadrant};
pub use score::{compute_breakdown, compute_score, FishingScorer, ScoreBreakdown};
pub use sequence::{
    extract_quadrant_string, extract_sequence, render_sequence, sequence_from_points,
    write_quadrant_string,
};
pub use transition::{build_matrix, score_transitions, TransitionMatrix, FAVORABLE_TRANSITIONS};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let history_path = dir.path().join("history.bin");
        let forecast_path = dir.path().join("forecast.bin");

        let history = [
            MotionPoint::from_delta(-2.0, -1.0, 0.0),
            MotionPoint::from_delta(-1.0, -0.5, 0.5),
        ];
        write_points(&history_path, &history).unwrap();

        // Δ = (1, 0.5, 0.5): (0, 0, 1), (1, 0.5, 1.5), (2, 1, 2)
        let written = predict_trajectory(&history_path, &forecast_path, 3).unwrap();
        assert_eq!(written, 3);
        assert_eq!(extract_quadrant_string(&forecast_path, 16), "bb");

        let breakdown = compute_breakdown(&forecast_path);
        // hits: b=2; possible: 2 + 1 + 1 + 0
        assert_relative_eq!(breakdown.pattern, 2.0 / 4.0 * 15.0);
        assert_eq!(breakdown.transition, 0.0);
        assert_relative_eq!(compute_score(&forecast_path), 7.5 + 32.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traj.bin");
        let points: Vec<_> = (0..40)
            .map(|i| {
                let t = i as f32 * 0.7;
                MotionPoint::from_delta(t.cos(), t.sin(), 0.1)
            })
            .collect();
        write_points(&path, &points).unwrap();

        let first = compute_score(&path);
        assert_eq!(first, compute_score(&path));
        assert!((0.0..=100.0).contains(&first));
    }
}

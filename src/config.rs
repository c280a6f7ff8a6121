//! Configuration for scoring and forecasting.
//!
//! [`ScoreConfig`] centralizes the sub-score weights used by the
//! [`FishingScorer`](crate::FishingScorer); [`ForecastConfig`] drives
//! [`predict_trajectory_with`](crate::predict_trajectory_with).
//!
//! # Example
//!
//! ```
//! use fishing_trajectory::{ForecastConfig, ScoreConfig};
//!
//! let config = ScoreConfig::default();
//! assert_eq!(config.pattern_weight, 15.0);
//!
//! let forecast = ForecastConfig::default().with_steps(20).with_atomic_write(true);
//! assert!(forecast.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrajectoryError};
use crate::predictor::DEFAULT_FORECAST_STEPS;

/// Cap of the bite-pattern sub-score.
pub const WEIGHT_PATTERN: f32 = 15.0;

/// Cap of the transition sub-score.
pub const WEIGHT_TRANSITION: f32 = 20.0;

/// Weight of each favorable transition cell.
pub const WEIGHT_TRANSITION_CELL: f32 = 5.0;

/// Weight of each placeholder sub-score (momentum, direction, current, seasonal).
pub const WEIGHT_PLACEHOLDER: f32 = 10.0;

/// Share of its weight a placeholder sub-score always awards.
pub const PLACEHOLDER_FACTOR: f32 = 0.8;

/// Upper clamp of the total score.
pub const MAX_SCORE: f32 = 100.0;

/// Weights and bounds for score aggregation.
///
/// The momentum, direction, current and seasonal signals have no real
/// computation behind them; each awards `placeholder_factor × weight`
/// regardless of input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreConfig {
    /// Cap of the bite-pattern sub-score.
    pub pattern_weight: f32,

    /// Cap of the transition sub-score.
    pub transition_weight: f32,

    /// Weight applied to each favorable transition probability.
    pub transition_cell_weight: f32,

    pub momentum_weight: f32,
    pub direction_weight: f32,
    pub current_weight: f32,
    pub seasonal_weight: f32,

    /// Fraction of its weight each placeholder awards.
    pub placeholder_factor: f32,

    /// Upper clamp of the total.
    pub max_score: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            pattern_weight: WEIGHT_PATTERN,
            transition_weight: WEIGHT_TRANSITION,
            transition_cell_weight: WEIGHT_TRANSITION_CELL,
            momentum_weight: WEIGHT_PLACEHOLDER,
            direction_weight: WEIGHT_PLACEHOLDER,
            current_weight: WEIGHT_PLACEHOLDER,
            seasonal_weight: WEIGHT_PLACEHOLDER,
            placeholder_factor: PLACEHOLDER_FACTOR,
            max_score: MAX_SCORE,
        }
    }
}

impl ScoreConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is negative or non-finite, if
    /// `placeholder_factor` is outside `[0, 1]`, or if `max_score` is not
    /// positive.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("pattern_weight", self.pattern_weight),
            ("transition_weight", self.transition_weight),
            ("transition_cell_weight", self.transition_cell_weight),
            ("momentum_weight", self.momentum_weight),
            ("direction_weight", self.direction_weight),
            ("current_weight", self.current_weight),
            ("seasonal_weight", self.seasonal_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(TrajectoryError::invalid_config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.placeholder_factor) {
            return Err(TrajectoryError::invalid_config(
                "placeholder_factor must be within [0, 1]",
            ));
        }
        if !self.max_score.is_finite() || self.max_score <= 0.0 {
            return Err(TrajectoryError::invalid_config(
                "max_score must be finite and positive",
            ));
        }
        Ok(())
    }

    /// Sum of all sub-score caps.
    #[must_use]
    pub fn total_weight(&self) -> f32 {
        self.pattern_weight
            + self.transition_weight
            + self.momentum_weight
            + self.direction_weight
            + self.current_weight
            + self.seasonal_weight
    }

    /// Set the bite-pattern cap.
    #[must_use]
    pub const fn with_pattern_weight(mut self, weight: f32) -> Self {
        self.pattern_weight = weight;
        self
    }

    /// Set the transition cap.
    #[must_use]
    pub const fn with_transition_weight(mut self, weight: f32) -> Self {
        self.transition_weight = weight;
        self
    }

    /// Set all four placeholder weights at once.
    #[must_use]
    pub const fn with_placeholder_weights(mut self, weight: f32) -> Self {
        self.momentum_weight = weight;
        self.direction_weight = weight;
        self.current_weight = weight;
        self.seasonal_weight = weight;
        self
    }

    /// Set the total clamp.
    #[must_use]
    pub const fn with_max_score(mut self, max_score: f32) -> Self {
        self.max_score = max_score;
        self
    }
}

/// Parameters for file-to-file forecasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForecastConfig {
    /// Number of points to extrapolate.
    pub steps: i32,

    /// Write through a temporary file and rename instead of overwriting in
    /// place.
    pub atomic_write: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_FORECAST_STEPS,
            atomic_write: false,
        }
    }
}

impl ForecastConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` is negative.
    pub fn validate(&self) -> Result<()> {
        if self.steps < 0 {
            return Err(TrajectoryError::invalid_config(format!(
                "steps must be non-negative, got {}",
                self.steps
            )));
        }
        Ok(())
    }

    /// Set the forecast length.
    #[must_use]
    pub const fn with_steps(mut self, steps: i32) -> Self {
        self.steps = steps;
        self
    }

    /// Enable or disable temp-file-then-rename writes.
    #[must_use]
    pub const fn with_atomic_write(mut self, atomic: bool) -> Self {
        self.atomic_write = atomic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pattern_weight, 15.0);
        assert_eq!(config.transition_weight, 20.0);
        assert_eq!(config.momentum_weight, 10.0);
        assert_eq!(config.total_weight(), 75.0);
    }

    #[test]
    fn test_validation() {
        let mut config = ScoreConfig::default();

        config.pattern_weight = -1.0;
        assert!(config.validate().is_err());

        config.pattern_weight = f32::NAN;
        assert!(config.validate().is_err());

        config.pattern_weight = 15.0;
        config.placeholder_factor = 1.5;
        assert!(config.validate().is_err());

        config.placeholder_factor = 0.8;
        config.max_score = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ScoreConfig::new()
            .with_pattern_weight(30.0)
            .with_placeholder_weights(5.0)
            .with_max_score(50.0);
        assert_eq!(config.pattern_weight, 30.0);
        assert_eq!(config.seasonal_weight, 5.0);
        assert_eq!(config.max_score, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_forecast_config() {
        let config = ForecastConfig::default();
        assert_eq!(config.steps, 10);
        assert!(!config.atomic_write);
        assert!(config.validate().is_ok());
        assert!(config.with_steps(-1).validate().is_err());
        assert!(config.with_steps(0).validate().is_ok());
    }
}

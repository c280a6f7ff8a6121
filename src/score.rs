//! Score aggregation.
//!
//! Combines the pattern and transition sub-scores with four fixed placeholder
//! sub-scores into one total clamped to `[0, max_score]`.
//!
//! # Sub-scores (default weights)
//!
//! | Sub-score | Cap | Source |
//! |-----------|-----|--------|
//! | pattern | 15 | [`score_patterns`](crate::score_patterns) |
//! | transition | 20 | [`score_transitions`](crate::score_transitions) |
//! | momentum | 10 | placeholder, always 8 |
//! | direction | 10 | placeholder, always 8 |
//! | current | 10 | placeholder, always 8 |
//! | seasonal | 10 | placeholder, always 8 |

use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ScoreConfig;
use crate::error::Result;
use crate::pattern::score_patterns_weighted;
use crate::point::MotionPoint;
use crate::quadrant::Quadrant;
use crate::sequence::{extract_sequence, sequence_from_points};
use crate::transition::{build_matrix, score_transitions_weighted};

/// Per-component result of one scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreBreakdown {
    pub pattern: f32,
    pub transition: f32,
    pub momentum: f32,
    pub direction: f32,
    pub current: f32,
    pub seasonal: f32,

    /// Sum of the six sub-scores, clamped to `[0, max_score]`.
    pub total: f32,
}

impl ScoreBreakdown {
    /// Sub-scores in display order, paired with their names.
    #[must_use]
    pub fn components(&self) -> [(&'static str, f32); 6] {
        [
            ("pattern", self.pattern),
            ("transition", self.transition),
            ("momentum", self.momentum),
            ("direction", self.direction),
            ("current", self.current),
            ("seasonal", self.seasonal),
        ]
    }
}

/// Stand-in for a signal that has no computation yet.
// TODO: replace with real momentum/direction/current/seasonal signals once
// their inputs are defined; until then every call awards the same share.
#[must_use]
pub fn placeholder_score(weight: f32, factor: f32) -> f32 {
    factor * weight
}

/// Scores quadrant sequences under a validated [`ScoreConfig`].
///
/// # Example
///
/// ```
/// use fishing_trajectory::{FishingScorer, Quadrant};
///
/// let scorer = FishingScorer::default();
/// let breakdown = scorer.score_sequence(&[Quadrant::D, Quadrant::G, Quadrant::B]);
/// assert_eq!(breakdown.transition, 10.0);
/// assert!(breakdown.total <= 100.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FishingScorer {
    config: ScoreConfig,
}

impl FishingScorer {
    /// Create a scorer after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ScoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Score a quadrant sequence. An empty sequence scores zero everywhere.
    #[must_use]
    pub fn score_sequence(&self, sequence: &[Quadrant]) -> ScoreBreakdown {
        if sequence.is_empty() {
            return ScoreBreakdown::default();
        }
        let c = &self.config;

        let pattern = score_patterns_weighted(sequence, c.pattern_weight);
        let matrix = build_matrix(sequence);
        let transition =
            score_transitions_weighted(&matrix, c.transition_cell_weight, c.transition_weight);

        let momentum = placeholder_score(c.momentum_weight, c.placeholder_factor);
        let direction = placeholder_score(c.direction_weight, c.placeholder_factor);
        let current = placeholder_score(c.current_weight, c.placeholder_factor);
        let seasonal = placeholder_score(c.seasonal_weight, c.placeholder_factor);

        let total = (pattern + transition + momentum + direction + current + seasonal)
            .clamp(0.0, c.max_score);

        ScoreBreakdown {
            pattern,
            transition,
            momentum,
            direction,
            current,
            seasonal,
            total,
        }
    }

    /// Score in-memory points, applying the same drop rule as file reads.
    #[must_use]
    pub fn score_points(&self, points: &[MotionPoint]) -> ScoreBreakdown {
        self.score_sequence(&sequence_from_points(points))
    }

    /// Score the trajectory file at `path`.
    ///
    /// Missing, empty and unparseable files all score zero.
    pub fn score_file(&self, path: impl AsRef<Path>) -> ScoreBreakdown {
        let path = path.as_ref();
        let breakdown = self.score_sequence(&extract_sequence(path));
        tracing::debug!(
            path = %path.display(),
            pattern = breakdown.pattern,
            transition = breakdown.transition,
            total = breakdown.total,
            "scored trajectory"
        );
        breakdown
    }
}

/// Full breakdown for `path` under the default configuration.
pub fn compute_breakdown(path: impl AsRef<Path>) -> ScoreBreakdown {
    FishingScorer::default().score_file(path)
}

/// Fishing score for the trajectory file at `path`, in `[0, 100]`.
///
/// Deterministic in the file's contents. A missing or empty file scores 0.
pub fn compute_score(path: impl AsRef<Path>) -> f32 {
    compute_breakdown(path).total
}

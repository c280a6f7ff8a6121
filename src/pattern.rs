//! Bite-pattern scoring.
//!
//! Counts occurrences of a fixed library of short symbol sequences and turns
//! the hit density into a capped sub-score.

use crate::config::WEIGHT_PATTERN;
use crate::quadrant::Quadrant;

/// Short quadrant sequences that precede a bite. All of them end in the
/// ideal symbol `b`.
pub static BITE_PATTERNS: [&[Quadrant]; 4] = [
    &[Quadrant::B],
    &[Quadrant::F, Quadrant::B],
    &[Quadrant::G, Quadrant::B],
    &[Quadrant::E, Quadrant::F, Quadrant::B],
];

/// Number of contiguous, possibly overlapping, occurrences of `pattern`.
#[must_use]
pub fn count_occurrences(sequence: &[Quadrant], pattern: &[Quadrant]) -> usize {
    if pattern.is_empty() {
        return 0;
    }
    sequence.windows(pattern.len()).filter(|w| *w == pattern).count()
}

/// Pattern sub-score with the default cap of 15.
#[must_use]
pub fn score_patterns(sequence: &[Quadrant]) -> f32 {
    score_patterns_weighted(sequence, WEIGHT_PATTERN)
}

/// Pattern sub-score: `min(hits / possible × weight, weight)`.
///
/// `possible` sums, over every bite pattern, the number of windows of that
/// pattern's length in `sequence`. A sequence too short for any window
/// scores zero.
#[must_use]
pub fn score_patterns_weighted(sequence: &[Quadrant], weight: f32) -> f32 {
    let (hits, possible) = BITE_PATTERNS
        .iter()
        .fold((0usize, 0usize), |(hits, possible), pattern| {
            (
                hits + count_occurrences(sequence, pattern),
                possible + (sequence.len() + 1).saturating_sub(pattern.len()),
            )
        });

    if possible == 0 {
        return 0.0;
    }
    let ratio = hits as f32 / possible as f32;
    (ratio * weight).min(weight)
}

/// Match statistics for one bite pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternStats {
    pub pattern: &'static [Quadrant],
    pub matches: usize,
    /// Windows of the pattern's length in the sequence.
    pub windows: usize,
    /// `matches / windows`, or `0` when the sequence is shorter than the
    /// pattern.
    pub probability: f32,
}

/// Per-pattern breakdown behind the pattern sub-score, in
/// [`BITE_PATTERNS`] order.
#[must_use]
pub fn analyze_patterns(sequence: &[Quadrant]) -> Vec<PatternStats> {
    BITE_PATTERNS
        .iter()
        .map(|&pattern| {
            let matches = count_occurrences(sequence, pattern);
            let windows = (sequence.len() + 1).saturating_sub(pattern.len());
            let probability = if windows == 0 {
                0.0
            } else {
                matches as f32 / windows as f32
            };
            PatternStats {
                pattern,
                matches,
                windows,
                probability,
            }
        })
        .collect()
}

//! Markov transition scoring.
//!
//! Builds a first-order transition matrix over the nine quadrant symbols and
//! rewards probability mass on a handful of directed transitions that lead
//! toward the ideal bite symbol.

use nalgebra::SMatrix;

use crate::config::{WEIGHT_TRANSITION, WEIGHT_TRANSITION_CELL};
use crate::quadrant::{Quadrant, SYMBOL_COUNT};

/// Favorable `(from, to)` transitions, each weighted equally.
///
/// - `d → g`: chaos settles into lift
/// - `g → b`: lift into ideal
/// - `e → f`: alternate chain entry into mid
/// - `f → b`: mid into ideal
pub static FAVORABLE_TRANSITIONS: [(Quadrant, Quadrant); 4] = [
    (Quadrant::D, Quadrant::G),
    (Quadrant::G, Quadrant::B),
    (Quadrant::E, Quadrant::F),
    (Quadrant::F, Quadrant::B),
];

/// Row-stochastic 9×9 transition table. Row = predecessor, column = successor.
///
/// A row sums to 1 when its symbol appeared as a predecessor at least once,
/// and is all zero otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    probabilities: SMatrix<f32, SYMBOL_COUNT, SYMBOL_COUNT>,
}

impl TransitionMatrix {
    /// Probability of moving from `from` to `to`.
    #[must_use]
    pub fn probability(&self, from: Quadrant, to: Quadrant) -> f32 {
        self.probabilities[(from.index(), to.index())]
    }

    /// Sum of the row for `from`: 1 if it was ever a predecessor, else 0.
    #[must_use]
    pub fn row_sum(&self, from: Quadrant) -> f32 {
        self.probabilities.row(from.index()).sum()
    }

    /// Underlying matrix.
    #[must_use]
    pub const fn as_matrix(&self) -> &SMatrix<f32, SYMBOL_COUNT, SYMBOL_COUNT> {
        &self.probabilities
    }
}

/// Count adjacent symbol pairs and normalize each row by its total.
#[must_use]
pub fn build_matrix(sequence: &[Quadrant]) -> TransitionMatrix {
    let mut counts = SMatrix::<u32, SYMBOL_COUNT, SYMBOL_COUNT>::zeros();
    for pair in sequence.windows(2) {
        counts[(pair[0].index(), pair[1].index())] += 1;
    }

    let mut probabilities = SMatrix::<f32, SYMBOL_COUNT, SYMBOL_COUNT>::zeros();
    for (i, row) in counts.row_iter().enumerate() {
        let total: u32 = row.iter().sum();
        if total == 0 {
            continue;
        }
        for (j, &count) in row.iter().enumerate() {
            probabilities[(i, j)] = count as f32 / total as f32;
        }
    }

    TransitionMatrix { probabilities }
}

/// Transition sub-score with the default cap of 20.
#[must_use]
pub fn score_transitions(matrix: &TransitionMatrix) -> f32 {
    score_transitions_weighted(matrix, WEIGHT_TRANSITION_CELL, WEIGHT_TRANSITION)
}

/// Sum of `cell_weight × P(from → to)` over [`FAVORABLE_TRANSITIONS`],
/// capped at `cap`.
#[must_use]
pub fn score_transitions_weighted(matrix: &TransitionMatrix, cell_weight: f32, cap: f32) -> f32 {
    let score: f32 = FAVORABLE_TRANSITIONS
        .iter()
        .map(|&(from, to)| matrix.probability(from, to) * cell_weight)
        .sum();
    score.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrant::Quadrant::{Unknown, B, C, D, E, F, G};
    use approx::assert_relative_eq;

    #[test]
    fn test_rows_are_stochastic_or_zero() {
        let matrix = build_matrix(&[B, C, B, D, B, Unknown]);
        assert_relative_eq!(matrix.row_sum(B), 1.0);
        assert_relative_eq!(matrix.row_sum(C), 1.0);
        assert_relative_eq!(matrix.row_sum(D), 1.0);
        // Unknown only appears last, E never appears.
        assert_eq!(matrix.row_sum(Unknown), 0.0);
        assert_eq!(matrix.row_sum(E), 0.0);
    }

    #[test]
    fn test_probabilities() {
        let matrix = build_matrix(&[B, C, B, D, B, Unknown]);
        assert_relative_eq!(matrix.probability(B, C), 1.0 / 3.0);
        assert_relative_eq!(matrix.probability(B, D), 1.0 / 3.0);
        assert_relative_eq!(matrix.probability(B, Unknown), 1.0 / 3.0);
        assert_relative_eq!(matrix.probability(C, B), 1.0);
        assert_eq!(matrix.probability(B, B), 0.0);
    }

    #[test]
    fn test_unknown_uses_last_index() {
        let matrix = build_matrix(&[Unknown, Unknown]);
        assert_relative_eq!(matrix.as_matrix()[(8, 8)], 1.0);
    }

    #[test]
    fn test_short_sequences_are_empty() {
        for seq in [&[][..], &[B][..]] {
            let matrix = build_matrix(seq);
            assert_eq!(matrix.as_matrix().sum(), 0.0);
            assert_eq!(score_transitions(&matrix), 0.0);
        }
    }

    #[test]
    fn test_alternate_chain_scores_two_cells() {
        let seq: Vec<_> = [E, F, B].iter().copied().cycle().take(12).collect();
        let matrix = build_matrix(&seq);
        assert_relative_eq!(score_transitions(&matrix), 10.0);
    }

    #[test]
    fn test_full_chain_saturates() {
        let seq: Vec<_> = [D, G, B, E, F, B].iter().copied().cycle().take(60).collect();
        let matrix = build_matrix(&seq);
        assert_relative_eq!(score_transitions(&matrix), 20.0);
    }

    #[test]
    fn test_weighted_cap() {
        let matrix = build_matrix(&[D, G, B]);
        assert_relative_eq!(score_transitions_weighted(&matrix, 5.0, 20.0), 10.0);
        assert_relative_eq!(score_transitions_weighted(&matrix, 5.0, 7.5), 7.5);
    }
}

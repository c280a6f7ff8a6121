//! Directional quadrant symbols.
//!
//! Every motion sample is reduced to one of nine symbols: eight directional
//! letters `a`..=`h` (dense indices 0..=7) and a neutral [`Quadrant::Unknown`]
//! (`x`, index 8). The sign classifier only ever produces `b`, `c`, `d`, `g`
//! and `x`; the remaining letters arrive from externally produced trajectory
//! files and take part in pattern and transition scoring.
//!
//! | Letter | Index | Role in scoring |
//! |--------|-------|-----------------|
//! | `a` | 0 | none |
//! | `b` | 1 | ideal bite (`+dx`, `+dy`) |
//! | `c` | 2 | `-dx`, `+dy` |
//! | `d` | 3 | chaos (`-dx`, `-dy`) |
//! | `e` | 4 | alternate-chain entry |
//! | `f` | 5 | alternate-chain mid |
//! | `g` | 6 | lift (`+dx`, `-dy`) |
//! | `h` | 7 | none |
//! | `x` | 8 | neutral / unknown |

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of distinct symbols, including [`Quadrant::Unknown`].
pub const SYMBOL_COUNT: usize = 9;

/// One of the nine quadrant symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quadrant {
    A,
    /// Ideal bite direction.
    B,
    C,
    /// Chaotic motion.
    D,
    /// Entry of the alternate approach chain.
    E,
    /// Middle of the alternate approach chain.
    F,
    /// Lift.
    G,
    H,
    /// Neutral / unclassified.
    #[default]
    Unknown,
}

impl Quadrant {
    /// All symbols in index order.
    pub const ALL: [Self; SYMBOL_COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::Unknown,
    ];

    /// Dense index in `0..=8`. [`Quadrant::Unknown`] is 8.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Map a stored quadrant index back to a directional symbol.
    ///
    /// Only `0..=7` are accepted. Anything else (including 8) is `None`,
    /// which is how the sequence extractor recognizes records to drop.
    #[must_use]
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < 8)
            .map(|i| Self::ALL[i])
    }

    /// Map a letter to its symbol. Unrecognized letters become `Unknown`.
    #[must_use]
    pub const fn from_letter(letter: char) -> Self {
        match letter {
            'a' => Self::A,
            'b' => Self::B,
            'c' => Self::C,
            'd' => Self::D,
            'e' => Self::E,
            'f' => Self::F,
            'g' => Self::G,
            'h' => Self::H,
            _ => Self::Unknown,
        }
    }

    /// Letter used in rendered sequences.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'a',
            Self::B => 'b',
            Self::C => 'c',
            Self::D => 'd',
            Self::E => 'e',
            Self::F => 'f',
            Self::G => 'g',
            Self::H => 'h',
            Self::Unknown => 'x',
        }
    }

    /// Index value stored in a [`crate::MotionPoint`] for this symbol.
    #[must_use]
    pub const fn stored_index(self) -> i32 {
        self as i32
    }

    /// True for the eight directional letters.
    #[must_use]
    pub const fn is_directional(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Classify a planar motion delta by the signs of its components.
///
/// Both components must be strictly non-zero to land in a directional
/// quadrant. Zeros, NaN and mixed cases fall through to `Unknown`, so the
/// function is total over every `f32` pair.
#[must_use]
pub fn classify(dx: f32, dy: f32) -> Quadrant {
    if dx > 0.0 && dy > 0.0 {
        Quadrant::B
    } else if dx < 0.0 && dy > 0.0 {
        Quadrant::C
    } else if dx < 0.0 && dy < 0.0 {
        Quadrant::D
    } else if dx > 0.0 && dy < 0.0 {
        Quadrant::G
    } else {
        Quadrant::Unknown
    }
}

//! Quadrant sequence extraction.
//!
//! Reduces a trajectory file to the ordered symbols of its points. Only
//! stored indices `0..=7` survive; any other stored value drops the point
//! entirely rather than mapping it to [`Quadrant::Unknown`]. Scores of
//! corrupt-but-readable files depend on that.

use std::fs;
use std::path::Path;

use crate::codec::{decode_records, read_points};
use crate::point::MotionPoint;
use crate::quadrant::Quadrant;

/// Symbols of the points whose stored quadrant is in `0..=7`, in order.
#[must_use]
pub fn sequence_from_points(points: &[MotionPoint]) -> Vec<Quadrant> {
    points.iter().filter_map(MotionPoint::symbol).collect()
}

/// Read `path` and reduce it to its quadrant sequence.
///
/// A missing, empty or header-only file yields an empty sequence.
pub fn extract_sequence(path: impl AsRef<Path>) -> Vec<Quadrant> {
    let points = read_points(path.as_ref());
    let sequence = sequence_from_points(&points);
    if sequence.len() < points.len() {
        tracing::debug!(
            path = %path.as_ref().display(),
            dropped = points.len() - sequence.len(),
            "dropped points with out-of-range quadrant"
        );
    }
    sequence
}

/// Render symbols as their letters.
#[must_use]
pub fn render_sequence(sequence: &[Quadrant]) -> String {
    sequence.iter().map(|q| q.letter()).collect()
}

/// Letter string for `path`, truncated to `max_len - 1` characters.
///
/// The reserved slot mirrors the NUL terminator of a host buffer of
/// `max_len` bytes. `max_len <= 1` yields an empty string.
pub fn extract_quadrant_string(path: impl AsRef<Path>, max_len: i32) -> String {
    let limit = usize::try_from(max_len).map_or(0, |n| n.saturating_sub(1));
    extract_sequence(path)
        .iter()
        .take(limit)
        .map(|q| q.letter())
        .collect()
}

/// Copy the letter string for `path` into a NUL-terminated host buffer.
///
/// At most `buffer.len() - 1` letters are copied, followed by a `0` byte.
/// Returns the number of letters copied. The buffer is left untouched when
/// it is empty, when the file cannot be read, or when its header declares no
/// records. A file whose records are all dropped still gets `buffer[0] = 0`.
pub fn write_quadrant_string(path: impl AsRef<Path>, buffer: &mut [u8]) -> usize {
    if buffer.is_empty() {
        return 0;
    }
    let Ok(bytes) = fs::read(path.as_ref()) else {
        return 0;
    };
    let Some(decoded) = decode_records::<MotionPoint>(&bytes) else {
        return 0;
    };
    if decoded.declared == 0 {
        return 0;
    }

    let sequence = sequence_from_points(&decoded.records);
    let copied = sequence.len().min(buffer.len() - 1);
    for (slot, q) in buffer.iter_mut().zip(&sequence[..copied]) {
        // Letters are ASCII.
        *slot = q.letter() as u8;
    }
    buffer[copied] = 0;
    copied
}

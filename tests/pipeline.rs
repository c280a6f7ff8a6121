//! End-to-end tests for trajectory files on disk.
//!
//! Each test writes real binary files into a temporary directory and drives
//! the public entry points: `compute_score`, `predict_trajectory` and
//! `extract_quadrant_string`.

use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use fishing_trajectory::{
    compute_breakdown, compute_score, extract_quadrant_string, extract_sequence,
    predict_trajectory, read_points, write_points, MotionPoint, Quadrant,
};
use tempfile::TempDir;

// =============================================================================
// FIXTURES
// =============================================================================

/// Points whose stored quadrant follows `letters`, `x` stored as `-1`.
fn points_from_letters(letters: &str) -> Vec<MotionPoint> {
    letters
        .chars()
        .map(|c| {
            let q = Quadrant::from_letter(c);
            let stored = if q.is_directional() { q.stored_index() } else { -1 };
            MotionPoint::with_quadrant(1.0, 1.0, 0.0, stored, 1.414_213_5)
        })
        .collect()
}

fn write_letters(dir: &TempDir, name: &str, letters: &str) -> PathBuf {
    let path = dir.path().join(name);
    write_points(&path, &points_from_letters(letters)).expect("write should succeed");
    path
}

fn raw_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("raw write should succeed");
    path
}

fn score(path: &Path) -> f32 {
    compute_score(path)
}

// =============================================================================
// ZERO-SIGNAL INPUTS
// =============================================================================

#[test]
fn test_missing_file_scores_zero() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(score(&dir.path().join("does_not_exist.bin")), 0.0);
}

#[test]
fn test_empty_and_header_only_files_score_zero() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(score(&raw_file(&dir, "empty.bin", &[])), 0.0);
    assert_eq!(score(&raw_file(&dir, "short.bin", &[3, 0])), 0.0);
    assert_eq!(score(&raw_file(&dir, "zero.bin", &0u32.to_le_bytes())), 0.0);
}

#[test]
fn test_all_dropped_points_score_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_letters(&dir, "neutral.bin", "xxxxxx");
    assert!(extract_sequence(&path).is_empty());
    assert_eq!(score(&path), 0.0);
}

#[test]
fn test_truncated_file_scores_complete_records() {
    let dir = tempfile::tempdir().unwrap();
    let full = write_letters(&dir, "full.bin", "dgb");

    let mut bytes = fs::read(&full).unwrap();
    bytes.truncate(bytes.len() - 7);
    let truncated = raw_file(&dir, "truncated.bin", &bytes);

    assert_eq!(extract_quadrant_string(&truncated, 32), "dg");
    assert_eq!(score(&truncated), score(&write_letters(&dir, "dg.bin", "dg")));
}

// =============================================================================
// SCORING
// =============================================================================

#[test]
fn test_efb_run_scores_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_letters(&dir, "efb.bin", &"efb".repeat(10));

    // n = 30: hits 10 + 10 + 0 + 10, possible 30 + 29 + 29 + 28
    let expected_pattern = 30.0 / 116.0 * 15.0;
    let breakdown = compute_breakdown(&path);
    assert_relative_eq!(breakdown.pattern, expected_pattern, epsilon = 1e-5);
    assert_relative_eq!(breakdown.transition, 10.0);
    assert_relative_eq!(breakdown.total, expected_pattern + 10.0 + 32.0, epsilon = 1e-4);
}

#[test]
fn test_score_never_exceeds_saturated_ceiling() {
    let dir = tempfile::tempdir().unwrap();
    for (i, letters) in ["b", "dgbefb", "bbbbbbbb", "efbgbfb", "dgdgdgb"].iter().enumerate() {
        let path = write_letters(&dir, &format!("run{i}.bin"), &letters.repeat(5));
        let total = score(&path);
        assert!(total <= 15.0 + 20.0 + 32.0, "{letters}: {total}");
        assert!(total >= 32.0, "{letters}: {total}");
    }
}

#[test]
fn test_single_ideal_symbol_saturates_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let breakdown = compute_breakdown(write_letters(&dir, "b.bin", "b"));
    assert_relative_eq!(breakdown.pattern, 15.0);
    assert_eq!(breakdown.transition, 0.0);
    assert_relative_eq!(breakdown.total, 47.0);
}

#[test]
fn test_out_of_range_indices_are_dropped_not_neutral() {
    let dir = tempfile::tempdir().unwrap();
    let points = vec![
        MotionPoint::with_quadrant(1.0, -1.0, 0.0, 6, 1.4),
        MotionPoint::with_quadrant(0.0, 0.0, 0.0, -1, 0.0),
        MotionPoint::with_quadrant(0.0, 0.0, 0.0, 9, 0.0),
        MotionPoint::with_quadrant(1.0, 1.0, 0.0, 1, 1.4),
    ];
    let path = dir.path().join("mixed.bin");
    write_points(&path, &points).unwrap();

    let seq = extract_sequence(&path);
    assert_eq!(seq, vec![Quadrant::G, Quadrant::B]);

    // g→b stays adjacent once the corrupt records are gone.
    assert_relative_eq!(compute_breakdown(&path).transition, 5.0);
}

#[test]
fn test_identical_files_score_identically() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_letters(&dir, "a.bin", "dgbcadefbhgb");
    let b = write_letters(&dir, "b.bin", "dgbcadefbhgb");
    assert_eq!(score(&a), score(&b));
    assert_eq!(compute_breakdown(&a), compute_breakdown(&b));
}

// =============================================================================
// FORECASTING
// =============================================================================

#[test]
fn test_forecast_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("history.bin");
    let forecast = dir.path().join("forecast.bin");
    write_points(
        &history,
        &[
            MotionPoint::from_delta(0.0, 0.0, 0.0),
            MotionPoint::from_delta(1.0, 1.0, 0.0),
        ],
    )
    .unwrap();

    assert_eq!(predict_trajectory(&history, &forecast, 3).unwrap(), 3);

    let points = read_points(&forecast);
    let coords: Vec<(f32, f32, f32)> = points.iter().map(|p| (p.dx, p.dy, p.dz)).collect();
    assert_eq!(coords, vec![(2.0, 2.0, 0.0), (3.0, 3.0, 0.0), (4.0, 4.0, 0.0)]);
    assert!(points.iter().all(|p| p.symbol() == Some(Quadrant::B)));
    assert_eq!(extract_quadrant_string(&forecast, 32), "bbb");
}

#[test]
fn test_forecast_feeds_scoring() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("history.bin");
    let forecast = dir.path().join("forecast.bin");
    write_points(
        &history,
        &[
            MotionPoint::from_delta(-3.0, 2.0, 0.0),
            MotionPoint::from_delta(-2.0, 1.0, 0.0),
        ],
    )
    .unwrap();

    // Δ = (1, -1, 0): (-1, 0) and (0, -1) are neutral, then g from step 3 on.
    predict_trajectory(&history, &forecast, 10).unwrap();
    let seq = extract_sequence(&forecast);
    assert!(seq.iter().all(|q| *q == Quadrant::G));
    assert!(!seq.is_empty());
    assert!(score(&forecast) >= 32.0);
}

#[test]
fn test_forecast_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let history = write_letters(&dir, "history.bin", "bb");
    let result = predict_trajectory(&history, dir.path().join("nope").join("out.bin"), 5);
    assert!(result.is_err());
}

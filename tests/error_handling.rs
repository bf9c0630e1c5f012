//! Error handling integration tests.
//!
//! These tests verify that meaningful, contextual errors are returned for
//! the main failure conditions.

use framealign::{align, resolve_timecode, FrameAlignError, MediaFile, TimecodeRequest};

#[test]
fn cardinality_mismatch_reports_both_counts() {
    let source = vec![
        MediaFile::new("/a/Show.S01E01.mkv"),
        MediaFile::new("/a/Show.S01E02.mkv"),
    ];
    let comparison = vec![MediaFile::new("/b/Show.S01E01.mkv")];

    let error_message = align(&source, &[comparison]).unwrap_err().to_string();
    assert!(
        error_message.contains("2 file(s)"),
        "Error message should carry the source count: {error_message}",
    );
    assert!(
        error_message.contains("has 1"),
        "Error message should carry the comparison count: {error_message}",
    );
}

#[test]
fn duplicate_episode_reports_both_paths() {
    let source = vec![
        MediaFile::new("/a/Show.S01E01.mkv"),
        MediaFile::new("/a/Show.S01E01.v2.mkv"),
    ];

    let error_message = align(&source, &[]).unwrap_err().to_string();
    assert!(
        error_message.contains("Show.S01E01.mkv") && error_message.contains("Show.S01E01.v2.mkv"),
        "Error message should name both files: {error_message}",
    );
}

#[test]
fn unknown_episode_names_the_file() {
    let source = vec![MediaFile::new("/a/randomfile.mkv")];

    let error_message = align(&source, &[]).unwrap_err().to_string();
    assert!(
        error_message.contains("randomfile.mkv"),
        "Error message should name the file: {error_message}",
    );
}

#[test]
fn out_of_range_timecode_reports_both_values() {
    let error_message = resolve_timecode(100.0, 24.0, &TimecodeRequest::Explicit(150.0))
        .unwrap_err()
        .to_string();
    assert!(
        error_message.contains("150") && error_message.contains("100"),
        "Error message should carry timecode and duration: {error_message}",
    );
}

#[test]
fn bad_timecode_prefix_is_rejected_with_guidance() {
    let error_message = "x=10".parse::<TimecodeRequest>().unwrap_err().to_string();
    assert!(
        error_message.contains("t=") && error_message.contains("f="),
        "Error message should explain the expected prefixes: {error_message}",
    );
}

#[test]
fn malformed_clock_string_is_rejected() {
    let result = resolve_timecode(
        100.0,
        24.0,
        &TimecodeRequest::Duration("1:2:3:4".to_string()),
    );
    assert!(matches!(
        result,
        Err(FrameAlignError::InvalidTimecodeFormat(_))
    ));
}

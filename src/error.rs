//! Error types for the `framealign` crate.
//!
//! This module defines [`FrameAlignError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry rich context to aid
//! debugging, including file paths, episode identifiers, and the offending
//! timecode values.

use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

/// The unified error type for all `framealign` operations.
///
/// Every public function that can fail returns `Result<T, FrameAlignError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site. Pre-flight variants
/// ([`PathNotFound`](FrameAlignError::PathNotFound),
/// [`PathCollision`](FrameAlignError::PathCollision),
/// [`CardinalityMismatch`](FrameAlignError::CardinalityMismatch)) abort a run
/// before any extraction I/O; probe and extraction failures are recorded per
/// episode group and processing continues.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameAlignError {
    /// A source or comparison path does not exist on disk.
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// A comparison path is identical to the source path.
    #[error("Comparison path is the same as the source path: {0}")]
    PathCollision(PathBuf),

    /// A comparison file set does not contain the same number of files as
    /// the source set.
    #[error(
        "Source has {source_count} file(s) but comparison {comparison_index} has \
         {comparison_count} — try narrowing the run with --episodes"
    )]
    CardinalityMismatch {
        /// Number of files resolved for the source.
        source_count: usize,
        /// Zero-based index of the offending comparison set.
        comparison_index: usize,
        /// Number of files resolved for that comparison set.
        comparison_count: usize,
    },

    /// Two files within one source resolved to the same episode identifier.
    #[error(
        "Episode {episode} appears twice in one source: {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateEpisodeId {
        /// The ambiguous episode number.
        episode: u32,
        /// First file claiming the episode.
        first: PathBuf,
        /// Second file claiming the episode.
        second: PathBuf,
    },

    /// An episode present in the source has no counterpart in a comparison
    /// set.
    #[error("Episode {episode} has no matching file in comparison {comparison_index}")]
    IncompleteGroup {
        /// The episode missing a member.
        episode: u32,
        /// Zero-based index of the comparison set lacking the episode.
        comparison_index: usize,
    },

    /// No episode number could be parsed from the file name.
    #[error("Cannot find an episode number in the file name: {0}")]
    UnknownEpisodeId(PathBuf),

    /// A timecode request string could not be parsed.
    #[error("Invalid timecode: {0} (expected t=<time> or f=<frame index>)")]
    InvalidTimecodeFormat(String),

    /// A resolved timecode falls outside the file's duration.
    #[error("Timecode {seconds}s is out of range for a duration of {duration}s")]
    InvalidTimecodeRange {
        /// The resolved offset in seconds.
        seconds: f64,
        /// The file's duration in seconds.
        duration: f64,
    },

    /// The probed frame rate cannot be used for frame-index conversion.
    #[error("Frame rate {0} is not usable for frame-index timecodes")]
    InvalidFrameRate(f64),

    /// The file does not contain a video stream.
    #[error("No video stream found in {0}")]
    NoVideoStream(PathBuf),

    /// Probing a media file for duration and frame rate failed.
    #[error("Failed to probe {path}: {reason}")]
    ProbeFailed {
        /// The file that was probed.
        path: PathBuf,
        /// Underlying reason the probe failed.
        reason: String,
    },

    /// An external tool exited with a non-zero status.
    #[error("{tool} exited with status {exit_code}: {message}")]
    CommandFailed {
        /// The tool that was invoked (`ffprobe` or `ffmpeg`).
        tool: String,
        /// The tool's exit code (`-1` when terminated by a signal).
        exit_code: i32,
        /// Captured stderr output.
        message: String,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Probe output could not be parsed as JSON.
    #[error("Probe output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

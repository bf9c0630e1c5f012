//! Single-frame extraction with deterministic output naming.
//!
//! [`extract_frame`] turns one (file, resolved timecode) pair into one image
//! on disk. The output name is composed entirely from values that are stable
//! across runs — the human-readable timecode label, the input file's stem,
//! and the episode number — so re-running with the same inputs overwrites
//! the previous frame instead of accumulating duplicates.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::FrameAlignError,
    probe::MediaProber,
    source::MediaFile,
    timecode::human_label,
};

/// One written frame: where it went, where it came from, and at what offset.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Path of the written image.
    pub output_path: PathBuf,
    /// The media file the frame was taken from.
    pub source_file: MediaFile,
    /// The resolved offset in seconds.
    pub timecode: f64,
}

/// Compose the deterministic output file name for a frame.
///
/// Format: `{timecode label}-{input stem}-{episode}.{ext}`.
///
/// # Errors
///
/// Returns [`FrameAlignError::UnknownEpisodeId`] when the file carries the
/// unknown-episode sentinel — such files must never reach extraction.
pub fn output_filename(
    file: &MediaFile,
    seconds: f64,
    image_ext: &str,
) -> Result<String, FrameAlignError> {
    let episode = file
        .episode()
        .number()
        .ok_or_else(|| FrameAlignError::UnknownEpisodeId(file.path().to_path_buf()))?;
    let label = human_label(seconds);
    let extension = image_ext.trim_start_matches('.');
    Ok(format!("{label}-{}-{episode}.{extension}", file.stem()))
}

/// Extract one frame from `file` at `seconds` into `output_dir`.
///
/// Creates the output directory recursively when missing (idempotent), then
/// delegates the decode and write to the prober, which overwrites any
/// existing file at the destination. A file with an unknown episode id is
/// rejected before the prober is touched — no output is produced for it.
///
/// # Errors
///
/// Returns [`FrameAlignError::UnknownEpisodeId`] for sentinel files, I/O
/// errors from directory creation, and whatever the prober reports for the
/// extraction itself.
pub fn extract_frame(
    prober: &dyn MediaProber,
    file: &MediaFile,
    seconds: f64,
    output_dir: &Path,
    image_ext: &str,
) -> Result<ExtractionResult, FrameAlignError> {
    let name = output_filename(file, seconds, image_ext)?;

    fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(name);

    prober.extract_frame(file.path(), seconds, &output_path)?;
    log::debug!(
        "Wrote frame at {seconds}s from {} to {}",
        file.path().display(),
        output_path.display()
    );

    Ok(ExtractionResult {
        output_path,
        source_file: file.clone(),
        timecode: seconds,
    })
}

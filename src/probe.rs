//! The external media-tool boundary.
//!
//! Decoding is never done in-process: duration/frame-rate probing and the
//! actual frame write are delegated to the `ffprobe` and `ffmpeg`
//! command-line tools, one blocking invocation per file. [`MediaProber`] is
//! the seam — the extraction driver and orchestrator only ever talk to the
//! trait, so tests substitute a recording implementation and never spawn a
//! process.
//!
//! # Example
//!
//! ```no_run
//! use framealign::{FfmpegTool, MediaProber};
//!
//! let tool = FfmpegTool::new();
//! let probe = tool.probe("episode.mkv".as_ref())?;
//! println!("{}s @ {:.3} fps", probe.duration, probe.frame_rate);
//! # Ok::<(), framealign::FrameAlignError>(())
//! ```

use std::{
    path::Path,
    process::Command,
};

use serde_json::Value;

use crate::error::FrameAlignError;

/// Stream information read from a media file without decoding frame data.
///
/// Re-probed whenever needed; never cached across uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    /// Container duration in seconds.
    pub duration: f64,
    /// Video stream frame rate in frames per second.
    pub frame_rate: f64,
    /// Video width in pixels, when reported.
    pub width: Option<u32>,
    /// Video height in pixels, when reported.
    pub height: Option<u32>,
}

/// Capability contract for the external media tool.
///
/// `probe` answers "how long is this file and at what frame rate";
/// `extract_frame` writes exactly one frame at a seconds offset to an output
/// path, overwriting any existing file there. Both operations block until
/// the underlying tool completes — concurrent invocations against one output
/// directory have no interlocking, and a batch utility has no throughput
/// needs that would justify them.
pub trait MediaProber {
    /// Read duration and video stream properties from a media file.
    ///
    /// # Errors
    ///
    /// Returns [`FrameAlignError::NoVideoStream`] when the file has no video
    /// stream and [`FrameAlignError::ProbeFailed`] when the tool cannot be
    /// run or its output is unusable.
    fn probe(&self, path: &Path) -> Result<ProbeResult, FrameAlignError>;

    /// Write one frame at `offset_seconds` into `output`, overwriting.
    ///
    /// # Errors
    ///
    /// Returns [`FrameAlignError::CommandFailed`] when the tool exits with a
    /// non-zero status.
    fn extract_frame(
        &self,
        path: &Path,
        offset_seconds: f64,
        output: &Path,
    ) -> Result<(), FrameAlignError>;
}

/// [`MediaProber`] backed by the `ffprobe` and `ffmpeg` executables.
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    ffprobe: String,
    ffmpeg: String,
}

impl Default for FfmpegTool {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegTool {
    /// Use `ffprobe` and `ffmpeg` from the search path.
    pub fn new() -> Self {
        Self {
            ffprobe: "ffprobe".to_string(),
            ffmpeg: "ffmpeg".to_string(),
        }
    }

    /// Use explicit executable paths instead of the search path.
    pub fn with_executables<S: Into<String>>(ffprobe: S, ffmpeg: S) -> Self {
        Self {
            ffprobe: ffprobe.into(),
            ffmpeg: ffmpeg.into(),
        }
    }
}

impl MediaProber for FfmpegTool {
    fn probe(&self, path: &Path) -> Result<ProbeResult, FrameAlignError> {
        if !path.exists() {
            return Err(FrameAlignError::PathNotFound(path.to_path_buf()));
        }

        log::debug!("Probing {}", path.display());
        let output = Command::new(&self.ffprobe)
            .args(["-v", "error", "-show_format", "-show_streams", "-of", "json"])
            .arg(path)
            .output()
            .map_err(|error| FrameAlignError::ProbeFailed {
                path: path.to_path_buf(),
                reason: format!("failed to run {}: {error}", self.ffprobe),
            })?;

        if !output.status.success() {
            return Err(FrameAlignError::CommandFailed {
                tool: self.ffprobe.clone(),
                exit_code: output.status.code().unwrap_or(-1),
                message: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let json: Value = serde_json::from_slice(&output.stdout)?;
        parse_probe_json(&json, path)
    }

    fn extract_frame(
        &self,
        path: &Path,
        offset_seconds: f64,
        output: &Path,
    ) -> Result<(), FrameAlignError> {
        log::debug!(
            "Extracting frame at {offset_seconds}s from {} to {}",
            path.display(),
            output.display()
        );

        // -y overwrites any previous run's frame at the same deterministic
        // path. The call blocks until ffmpeg has written the file.
        let result = Command::new(&self.ffmpeg)
            .args(["-v", "error", "-y", "-ss"])
            .arg(offset_seconds.to_string())
            .arg("-i")
            .arg(path)
            .args(["-frames:v", "1"])
            .arg(output)
            .output()
            .map_err(|error| FrameAlignError::ProbeFailed {
                path: path.to_path_buf(),
                reason: format!("failed to run {}: {error}", self.ffmpeg),
            })?;

        if !result.status.success() {
            return Err(FrameAlignError::CommandFailed {
                tool: self.ffmpeg.clone(),
                exit_code: result.status.code().unwrap_or(-1),
                message: String::from_utf8_lossy(&result.stderr).to_string(),
            });
        }
        Ok(())
    }
}

/// Parse the JSON document produced by `ffprobe -of json`.
fn parse_probe_json(json: &Value, path: &Path) -> Result<ProbeResult, FrameAlignError> {
    let streams = json
        .get("streams")
        .and_then(|streams| streams.as_array())
        .ok_or_else(|| FrameAlignError::ProbeFailed {
            path: path.to_path_buf(),
            reason: "no streams section in probe output".to_string(),
        })?;

    let video = streams
        .iter()
        .find(|stream| {
            stream.get("codec_type").and_then(|t| t.as_str()) == Some("video")
        })
        .ok_or_else(|| FrameAlignError::NoVideoStream(path.to_path_buf()))?;

    let frame_rate = video
        .get("r_frame_rate")
        .and_then(|rate| rate.as_str())
        .and_then(parse_frame_rate)
        .ok_or_else(|| FrameAlignError::ProbeFailed {
            path: path.to_path_buf(),
            reason: "video stream reports no usable frame rate".to_string(),
        })?;

    // Container duration is authoritative; fall back to the stream's own
    // duration for containers that do not report one.
    let duration = json
        .get("format")
        .and_then(|format| format.get("duration"))
        .and_then(|duration| duration.as_str())
        .and_then(|duration| duration.parse::<f64>().ok())
        .or_else(|| {
            video
                .get("duration")
                .and_then(|duration| duration.as_str())
                .and_then(|duration| duration.parse::<f64>().ok())
        })
        .ok_or_else(|| FrameAlignError::ProbeFailed {
            path: path.to_path_buf(),
            reason: "probe output reports no duration".to_string(),
        })?;

    Ok(ProbeResult {
        duration,
        frame_rate,
        width: video.get("width").and_then(|w| w.as_u64()).map(|w| w as u32),
        height: video.get("height").and_then(|h| h.as_u64()).map(|h| h as u32),
    })
}

/// Parse a frame rate string like `24000/1001` into a float.
fn parse_frame_rate(rate: &str) -> Option<f64> {
    if let Some((numerator, denominator)) = rate.split_once('/') {
        let numerator: f64 = numerator.parse().ok()?;
        let denominator: f64 = denominator.parse().ok()?;
        if denominator != 0.0 {
            return Some(numerator / denominator);
        }
        return None;
    }
    rate.parse().ok()
}

//! Run orchestration.
//!
//! [`run`] wires the pipeline together: pre-flight path validation, file set
//! resolution per source, episode selection, cross-source alignment, then —
//! per aligned episode group — probing the source member, resolving one
//! shared timecode, and extracting a frame from every member at that same
//! offset so the images are directly comparable.
//!
//! Error policy follows two tiers. Pre-flight and alignment failures
//! (missing path, path collision, cardinality mismatch, duplicate or
//! missing episode) abort before any extraction I/O. Once groups are being
//! processed, a probe failure, an out-of-range timecode, or a failed write
//! is recorded against that group and processing continues with the next
//! one — a single bad file does not abort the batch.
//!
//! All configuration flows through the immutable [`RunConfig`]; nothing in
//! the core reads process-global state.

use std::{
    collections::BTreeSet,
    path::PathBuf,
};

use crate::{
    align::{align, EpisodeGroup},
    error::FrameAlignError,
    extract::{extract_frame, ExtractionResult},
    probe::MediaProber,
    source::{resolve_files, select_episodes, Selection},
    timecode::{resolve_timecode, TimecodeRequest},
};

/// Immutable configuration for one extraction run.
///
/// Built once (typically from CLI arguments) and passed by reference into
/// [`run`].
///
/// # Example
///
/// ```
/// use framealign::{RunConfig, TimecodeRequest};
///
/// let config = RunConfig::new("/library/release-a")
///     .with_comparisons(vec!["/library/release-b".into()])
///     .with_episodes([8])
///     .with_timecode(TimecodeRequest::Explicit(10.0));
/// ```
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The primary source path (file or directory).
    pub source: PathBuf,
    /// Comparison source paths, possibly empty.
    pub comparisons: Vec<PathBuf>,
    /// Video file extension to match. Defaults to `mkv`.
    pub file_type: String,
    /// Explicit episode numbers, or `None` to auto-detect.
    pub episodes: Option<BTreeSet<u32>>,
    /// Frames to extract per episode group. Defaults to 1.
    pub num_frames: u32,
    /// The timecode request shared by every file in a group.
    pub timecode: TimecodeRequest,
    /// Directory receiving the output images. Defaults to the working
    /// directory.
    pub output_dir: PathBuf,
    /// Output image extension. Defaults to `png`.
    pub image_ext: String,
}

impl RunConfig {
    /// Create a configuration with default settings for the given source.
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        Self {
            source: source.into(),
            comparisons: Vec::new(),
            file_type: "mkv".to_string(),
            episodes: None,
            num_frames: 1,
            timecode: TimecodeRequest::Random,
            output_dir: PathBuf::from("."),
            image_ext: "png".to_string(),
        }
    }

    /// Set the comparison source paths.
    #[must_use]
    pub fn with_comparisons(mut self, comparisons: Vec<PathBuf>) -> Self {
        self.comparisons = comparisons;
        self
    }

    /// Set the video file extension to match.
    #[must_use]
    pub fn with_file_type<S: Into<String>>(mut self, file_type: S) -> Self {
        self.file_type = file_type.into();
        self
    }

    /// Restrict the run to an explicit set of episode numbers.
    #[must_use]
    pub fn with_episodes<I: IntoIterator<Item = u32>>(mut self, episodes: I) -> Self {
        self.episodes = Some(episodes.into_iter().collect());
        self
    }

    /// Set the number of frames to extract per episode group.
    /// Clamped to a minimum of 1.
    #[must_use]
    pub fn with_num_frames(mut self, num_frames: u32) -> Self {
        self.num_frames = num_frames.max(1);
        self
    }

    /// Set the timecode request.
    #[must_use]
    pub fn with_timecode(mut self, timecode: TimecodeRequest) -> Self {
        self.timecode = timecode;
        self
    }

    /// Set the directory receiving the output images.
    #[must_use]
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the output image extension.
    #[must_use]
    pub fn with_image_ext<S: Into<String>>(mut self, image_ext: S) -> Self {
        self.image_ext = image_ext.into();
        self
    }
}

/// A failure recorded against one episode group.
#[derive(Debug, Clone)]
pub struct GroupFailure {
    /// The episode whose group failed.
    pub episode: u32,
    /// The resolved timecode, when resolution had already succeeded.
    pub timecode: Option<f64>,
    /// Human-readable description with enough context to reproduce.
    pub message: String,
}

/// The outcome of one run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Every frame that was written, in processing order.
    pub extractions: Vec<ExtractionResult>,
    /// Requested episode numbers absent from at least one source.
    pub missing_episodes: BTreeSet<u32>,
    /// Failures recorded during group processing.
    pub failures: Vec<GroupFailure>,
}

impl RunReport {
    /// Returns `true` when no group failure was recorded.
    ///
    /// Missing requested episodes are warnings and do not affect this.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Execute a full extraction run.
///
/// Equivalent to [`run_with_progress`] with a no-op callback.
///
/// # Errors
///
/// Returns pre-flight errors ([`FrameAlignError::PathNotFound`],
/// [`FrameAlignError::PathCollision`]) and alignment errors before any
/// extraction I/O has happened. Per-group failures do not surface here —
/// they are recorded in the returned [`RunReport`].
pub fn run(
    config: &RunConfig,
    prober: &dyn MediaProber,
) -> Result<RunReport, FrameAlignError> {
    run_with_progress(config, prober, |_, _| {})
}

/// Execute a full extraction run, reporting progress after each group.
///
/// `on_group` is called with `(completed, total)` after each episode group
/// finishes, whether it succeeded or failed.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_progress<F>(
    config: &RunConfig,
    prober: &dyn MediaProber,
    mut on_group: F,
) -> Result<RunReport, FrameAlignError>
where
    F: FnMut(usize, usize),
{
    preflight(config)?;

    let source_files = resolve_files(&config.source, &config.file_type);
    if source_files.is_empty() {
        log::warn!(
            "No .{} files found under {}",
            config.file_type,
            config.source.display()
        );
    }

    let requested = config.episodes.as_ref();
    let Selection {
        files: source_files,
        missing,
    } = select_episodes(source_files, requested);
    let mut missing_episodes = missing;

    let comparison_sets: Vec<_> = config
        .comparisons
        .iter()
        .map(|path| {
            let selection = select_episodes(resolve_files(path, &config.file_type), requested);
            missing_episodes.extend(selection.missing.iter().copied());
            selection.files
        })
        .collect();

    let groups = align(&source_files, &comparison_sets)?;
    log::info!(
        "Processing {} episode group(s), {} frame(s) each",
        groups.len(),
        config.num_frames
    );

    let mut report = RunReport {
        missing_episodes,
        ..RunReport::default()
    };

    let total = groups.len();
    for (index, group) in groups.iter().enumerate() {
        if let Err(error) = process_group(config, prober, group, &mut report) {
            log::error!("Episode {}: {error}", group.episode);
            report.failures.push(GroupFailure {
                episode: group.episode,
                timecode: None,
                message: error.to_string(),
            });
        }
        on_group(index + 1, total);
    }

    Ok(report)
}

/// Path-level validation that must pass before any I/O.
fn preflight(config: &RunConfig) -> Result<(), FrameAlignError> {
    if !config.source.exists() {
        return Err(FrameAlignError::PathNotFound(config.source.clone()));
    }
    for comparison in &config.comparisons {
        if !comparison.exists() {
            return Err(FrameAlignError::PathNotFound(comparison.clone()));
        }
        if comparison == &config.source {
            return Err(FrameAlignError::PathCollision(comparison.clone()));
        }
    }
    Ok(())
}

/// Process one aligned episode group.
///
/// The source member is probed (fresh, per frame), one timecode is resolved
/// from its duration and frame rate, and every member is extracted at that
/// same offset. Errors returned here are fatal to the group only; per-file
/// extraction failures are recorded and the remaining members still run.
fn process_group(
    config: &RunConfig,
    prober: &dyn MediaProber,
    group: &EpisodeGroup,
    report: &mut RunReport,
) -> Result<(), FrameAlignError> {
    for _ in 0..config.num_frames {
        let probe = prober.probe(group.source.path())?;
        let seconds = resolve_timecode(probe.duration, probe.frame_rate, &config.timecode)?;

        for member in group.members() {
            match extract_frame(prober, member, seconds, &config.output_dir, &config.image_ext) {
                Ok(result) => {
                    log::info!(
                        "Frame extracted (timecode {seconds}s) and saved to {}",
                        result.output_path.display()
                    );
                    report.extractions.push(result);
                }
                Err(error) => {
                    log::error!(
                        "Episode {} ({} at {seconds}s): {error}",
                        group.episode,
                        member.path().display()
                    );
                    report.failures.push(GroupFailure {
                        episode: group.episode,
                        timecode: Some(seconds),
                        message: format!("{}: {error}", member.path().display()),
                    });
                }
            }
        }
    }
    Ok(())
}

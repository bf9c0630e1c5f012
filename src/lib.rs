//! # framealign
//!
//! Extract aligned comparison frames from TV episode releases.
//!
//! `framealign` locates episode video files across one or more parallel
//! source directory trees (different encodes or releases of the same
//! series), pairs them by episode number, resolves one shared timecode per
//! episode, and writes a still frame from every release at that exact
//! offset — so the resulting images can be compared side by side.
//!
//! The interesting work is episode-identity resolution: release groups name
//! files inconsistently, so episode numbers are parsed with an ordered
//! strategy list (`S01E08` tags first, a loose numeric heuristic second),
//! sets are intersected across sources, and alignment is validated strictly
//! before anything touches ffmpeg. The decode itself is a black box — one
//! blocking `ffprobe`/`ffmpeg` subprocess invocation per file, behind the
//! [`MediaProber`] trait.
//!
//! ## Quick Start
//!
//! ```no_run
//! use framealign::{run, FfmpegTool, RunConfig, TimecodeRequest};
//!
//! let config = RunConfig::new("/library/release-a")
//!     .with_comparisons(vec!["/library/release-b".into()])
//!     .with_episodes([8])
//!     .with_timecode(TimecodeRequest::Explicit(10.0));
//!
//! let report = run(&config, &FfmpegTool::new())?;
//! for extraction in &report.extractions {
//!     println!("wrote {}", extraction.output_path.display());
//! }
//! # Ok::<(), framealign::FrameAlignError>(())
//! ```
//!
//! ## Pieces
//!
//! - **Episode extraction** — [`extract_episode_id`] with tagged strategies
//!   ([`MatchStrategy`]) and an explicit [`EpisodeId::Unknown`] sentinel
//! - **Timecode handling** — [`TimeValue`] normalizes clock strings and
//!   component lists; [`resolve_timecode`] turns a [`TimecodeRequest`]
//!   (`t=`, `f=`, or random) into a bounds-checked offset
//! - **File sets** — [`resolve_files`] walks a source tree,
//!   [`select_episodes`] narrows to requested or auto-detected episodes
//! - **Alignment** — [`align`] pairs files across sources by episode
//!   identifier with strict cardinality and duplicate validation
//! - **Extraction** — [`extract_frame`] writes deterministically-named
//!   frames through any [`MediaProber`]
//! - **Orchestration** — [`run`] drives the whole pipeline from an
//!   immutable [`RunConfig`] into a [`RunReport`]
//!
//! ## Requirements
//!
//! The `ffprobe` and `ffmpeg` executables must be available on the search
//! path (or configured via [`FfmpegTool::with_executables`]).

pub mod align;
pub mod driver;
pub mod episode;
pub mod error;
pub mod extract;
pub mod probe;
pub mod source;
pub mod timecode;

pub use align::{align, EpisodeGroup};
pub use driver::{run, run_with_progress, GroupFailure, RunConfig, RunReport};
pub use episode::{extract_episode_id, extract_with_strategy, EpisodeId, MatchStrategy};
pub use error::FrameAlignError;
pub use extract::{extract_frame, output_filename, ExtractionResult};
pub use probe::{FfmpegTool, MediaProber, ProbeResult};
pub use source::{resolve_files, select_episodes, MediaFile, Selection};
pub use timecode::{human_label, resolve_timecode, TimeValue, TimecodeRequest};

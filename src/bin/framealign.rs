use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::filter::LevelFilter;

use framealign::{run_with_progress, FfmpegTool, RunConfig, TimecodeRequest};

const CLI_AFTER_HELP: &str = "Examples:\n  framealign ./release-a -c ./release-b -e 8 -t t=10\n  framealign ./season1 --file-type mp4 --num-frames 3\n  framealign ./release-a -c ./release-b ./release-c -t f=1432 -o frames --progress\n  framealign --completions zsh > _framealign";

#[derive(Debug, Parser)]
#[command(
    name = "framealign",
    version,
    about = "Extract aligned comparison frames from TV episode releases",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Path of the folder/file containing the episode files.
    #[arg(required_unless_present = "completions", value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Paths of the folders/files to compare against the source.
    #[arg(short = 'c', long = "compare", num_args = 1.., value_name = "PATH")]
    comparisons: Vec<PathBuf>,

    /// Video file extension to match (e.g. mp4, avi).
    #[arg(long, default_value = "mkv", value_name = "EXT")]
    file_type: String,

    /// Episode numbers to extract frames from (default: all detected).
    #[arg(short, long, num_args = 1.., value_name = "N")]
    episodes: Option<Vec<u32>>,

    /// Number of frames to extract per episode.
    #[arg(short = 'n', long, default_value_t = 1, value_name = "COUNT")]
    num_frames: u32,

    /// Timecode to extract at: t=<seconds|H:M:S> or f=<frame index>
    /// (default: random per episode).
    #[arg(short, long, value_name = "TIMECODE")]
    timecode: Option<String>,

    /// Output directory for extracted frames.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    output_dir: PathBuf,

    /// Output image extension (png, jpg, bmp).
    #[arg(long, default_value = "png", value_name = "EXT")]
    image_ext: String,

    /// Show a progress bar across episode groups.
    #[arg(long)]
    progress: bool,

    /// Enable debug-level diagnostics on stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion scripts and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "framealign", &mut std::io::stdout());
        return Ok(());
    }

    let source = cli.source.ok_or("a source path is required")?;
    let timecode = match &cli.timecode {
        Some(raw) => raw.parse::<TimecodeRequest>()?,
        None => TimecodeRequest::Random,
    };

    let mut config = RunConfig::new(source)
        .with_comparisons(cli.comparisons)
        .with_file_type(cli.file_type)
        .with_num_frames(cli.num_frames)
        .with_timecode(timecode)
        .with_output_dir(cli.output_dir)
        .with_image_ext(cli.image_ext);
    if let Some(episodes) = cli.episodes {
        config = config.with_episodes(episodes);
    }

    let want_progress = cli.progress;
    let mut bar: Option<ProgressBar> = None;
    let report = run_with_progress(&config, &FfmpegTool::new(), |done, total| {
        if !want_progress {
            return;
        }
        let bar = bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(total as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("##-"));
            }
            bar
        });
        bar.set_position(done as u64);
    })?;
    if let Some(bar) = bar {
        bar.finish_with_message("done");
    }

    for extraction in &report.extractions {
        println!(
            "{} {} (timecode {}s, episode {})",
            "saved".green().bold(),
            extraction.output_path.display(),
            extraction.timecode,
            extraction.source_file.episode(),
        );
    }
    for episode in &report.missing_episodes {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!("episode {episode} was requested but not found").yellow()
        );
    }
    for failure in &report.failures {
        eprintln!(
            "{} {}",
            "error:".red().bold(),
            format!("episode {}: {}", failure.episode, failure.message).red()
        );
    }

    if report.is_success() {
        println!(
            "{} {}",
            "success:".green().bold(),
            format!("Finished extracting {} frame(s)", report.extractions.len()).green()
        );
        Ok(())
    } else {
        Err(format!("{} episode group(s) failed", report.failures.len()).into())
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

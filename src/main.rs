mod input;
mod logging;
mod model;
mod pipeline;
mod posture;
mod render;
mod report;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};

use crate::input::{ReplayCamera, ReplayPoseModel};
use crate::model::frame::FrameGeometry;
use crate::model::thresholds::ScoringProfile;
use crate::pipeline::frame_loop::{FramePipeline, PipelineError, Presenter};
use crate::pipeline::report_writer::{
    ReportError, ReportInput, ReportMode, SessionLog, write_reports,
};
use crate::posture::PostureEvaluator;
use crate::render::presenter::{NullPresenter, OverlayWriter};

#[derive(Debug, Parser)]
#[command(name = "postureqc", version, about = "Posture quality scoring from pose keypoints")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a recorded session of pose-model output.
    Run(RunConfig),
}

#[derive(Debug, Clone, Args)]
struct RunConfig {
    /// Newline-delimited JSON, one frame of poses per line (.gz accepted).
    #[arg(long = "input")]
    input_path: PathBuf,

    #[arg(long = "out")]
    out_dir: PathBuf,

    #[arg(long = "mode", value_enum, default_value_t = ReportMode::Frame)]
    report_mode: ReportMode,

    /// Requested camera width.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Requested camera height.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Also write per-frame draw commands to overlay.jsonl.
    #[arg(long)]
    overlay: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("cannot create {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);
    let result = match &cli.command {
        Command::Run(config) => run(config),
    };
    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &RunConfig) -> Result<(), AppError> {
    let profile = ScoringProfile::default_v1();
    let geometry = FrameGeometry {
        width: config.width,
        height: config.height,
    };

    let log = if config.overlay {
        let path = config.out_dir.join("overlay.jsonl");
        let file = create_output(&path)?;
        let writer = OverlayWriter::new(BufWriter::new(file), profile.draw_confidence);
        let (log, writer) = match run_session(config, geometry, &profile, writer) {
            Ok(done) => done,
            Err(err) => {
                // a fatal run leaves no partial overlay behind
                let _ = std::fs::remove_file(&path);
                return Err(err);
            }
        };
        writer
            .into_inner()
            .flush()
            .map_err(|source| AppError::Output { path, source })?;
        log
    } else {
        run_session(config, geometry, &profile, NullPresenter)?.0
    };

    let input = ReportInput {
        log: &log,
        profile: &profile,
        input: config.input_path.display().to_string(),
        geometry: log.geometry,
        tool_name: "postureqc".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(&PathBuf::from(".")),
    };
    write_reports(&input, &config.out_dir, config.report_mode)?;

    Ok(())
}

fn run_session<P: Presenter>(
    config: &RunConfig,
    geometry: FrameGeometry,
    profile: &ScoringProfile,
    presenter: P,
) -> Result<(SessionLog, P), AppError> {
    let mut pipeline = FramePipeline::new(
        ReplayCamera::new(&config.input_path, geometry),
        ReplayPoseModel::new(),
        presenter,
        PostureEvaluator::new(profile.clone()),
    );
    pipeline.start()?;

    let mut log = SessionLog::default();
    let stats = pipeline.run(|report| log.push_frame(report))?;
    log.stats = stats;
    log.geometry = pipeline.geometry().unwrap_or(geometry);
    log.final_good_percent = pipeline.history().good_percent();
    log.history_len = pipeline.history().len();
    info!(
        good_percent = log.final_good_percent,
        window = log.history_len,
        "final rolling statistic"
    );
    Ok((log, pipeline.into_presenter()))
}

fn create_output(path: &Path) -> Result<File, AppError> {
    let to_err = |source: std::io::Error| AppError::Output {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_err)?;
    }
    File::create(path).map_err(to_err)
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::model::frame::FrameGeometry;
use crate::model::thresholds::ScoringProfile;
use crate::model::verdict::{PostureLabel, PostureMeasurements, label_order};
use crate::pipeline::frame_loop::{FrameReport, PoseResult, SessionStats};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    FrameCounts, LabelStat, PoseCounts, ReportContext, ScoreStats, SummaryData, format_f64_3,
    mean, median, p10, p90,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportMode {
    /// One row per evaluated pose.
    Frame,
    /// One row per posture label.
    Session,
}

impl ReportMode {
    fn name(self) -> &'static str {
        match self {
            ReportMode::Frame => "frame",
            ReportMode::Session => "session",
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdictRow {
    pub frame_index: u64,
    pub result: PoseResult,
}

/// Everything the reports need from a finished run.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    pub rows: Vec<VerdictRow>,
    pub stats: SessionStats,
    /// Resolution granted by the camera.
    pub geometry: FrameGeometry,
    pub final_good_percent: u8,
    pub history_len: usize,
}

impl SessionLog {
    pub fn push_frame(&mut self, report: &FrameReport) {
        for result in &report.results {
            self.rows.push(VerdictRow {
                frame_index: report.frame_index,
                result: *result,
            });
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub log: &'a SessionLog,
    pub profile: &'a ScoringProfile,
    pub input: String,
    pub geometry: FrameGeometry,
    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,
}

pub fn write_reports(
    input: &ReportInput<'_>,
    out_dir: &Path,
    mode: ReportMode,
) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    let verdicts_path = out_dir.join("verdicts.tsv");
    match mode {
        ReportMode::Frame => write_frame_tsv(input, &verdicts_path)?,
        ReportMode::Session => write_session_tsv(input, &verdicts_path)?,
    }

    let summary_path = out_dir.join("summary.json");
    let summary = build_summary(input, mode);
    let json = render_summary_json(&summary)?;
    write_text(&summary_path, &json)?;

    let report_path = out_dir.join("report.txt");
    let report_ctx = build_report_context(input, &summary);
    let report = render_report_text(&report_ctx);
    write_text(&report_path, &report)?;

    info!(out_dir = %out_dir.display(), mode = mode.name(), "reports written");
    Ok(())
}

fn write_frame_tsv(input: &ReportInput<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "frame",
        "pose",
        "label",
        "score",
        "good_percent",
        "back_angle",
        "head_offset",
        "shoulder_tilt",
        "back_score",
        "head_score",
        "shoulder_score",
    ];
    writeln!(w, "{}", header.join("\t"))?;

    for row in &input.log.rows {
        let r = &row.result;
        let measures = match &r.measurements {
            Some(m) => [
                m.back_angle,
                m.head_offset,
                m.shoulder_tilt,
                m.back_score,
                m.head_score,
                m.shoulder_score,
            ]
            .iter()
            .map(|v| format_f64_3(*v))
            .collect::<Vec<_>>()
            .join("\t"),
            None => vec!["NA"; 6].join("\t"),
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.frame_index,
            r.pose_index,
            r.verdict.label.name(),
            r.verdict.score,
            r.good_percent,
            measures
        )?;
    }
    w.flush()
}

fn write_session_tsv(input: &ReportInput<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "label\tcount\tfraction")?;
    for stat in label_stats(&input.log.rows) {
        writeln!(
            w,
            "{}\t{}\t{}",
            stat.name,
            stat.count,
            format_f64_3(stat.fraction)
        )?;
    }
    w.flush()
}

fn label_stats(rows: &[VerdictRow]) -> Vec<LabelStat> {
    let total = rows.len();
    label_order()
        .iter()
        .map(|&label| {
            let count = rows
                .iter()
                .filter(|r| r.result.verdict.label == label)
                .count();
            let fraction = if total > 0 {
                count as f64 / total as f64
            } else {
                0.0
            };
            LabelStat {
                name: label.name(),
                count,
                fraction,
            }
        })
        .collect()
}

fn known_scores(rows: &[VerdictRow]) -> Vec<f64> {
    rows.iter()
        .filter(|r| r.result.verdict.is_known())
        .map(|r| r.result.verdict.score as f64)
        .collect()
}

pub fn build_summary(input: &ReportInput<'_>, mode: ReportMode) -> SummaryData {
    let log = input.log;
    let scores = known_scores(&log.rows);
    let unknown = log
        .rows
        .iter()
        .filter(|r| r.result.verdict.label == PostureLabel::Unknown)
        .count() as u64;

    SummaryData {
        tool: input.tool_name.clone(),
        version: input.tool_version.clone(),
        git_hash: input.git_hash.clone(),
        input: input.input.clone(),
        report_mode: mode.name().to_string(),
        width: input.geometry.width,
        height: input.geometry.height,
        frames: FrameCounts {
            processed: log.stats.frames_processed,
            failed: log.stats.frames_failed,
        },
        poses: PoseCounts {
            seen: log.stats.poses_seen,
            scored: log.stats.poses_scored,
            unknown,
        },
        labels: label_stats(&log.rows),
        score: ScoreStats {
            median: median(&scores),
            p10: p10(&scores),
            p90: p90(&scores),
            mean: mean(&scores),
        },
        final_good_percent: log.final_good_percent,
        history_len: log.history_len,
        profile: input.profile.clone(),
    }
}

fn build_report_context(input: &ReportInput<'_>, summary: &SummaryData) -> ReportContext {
    let measured: Vec<_> = input
        .log
        .rows
        .iter()
        .filter_map(|r| r.result.measurements)
        .collect();
    let profile = input.profile;

    let back_cost = column(&measured, |m| 100.0 - m.back_score);
    let head_cost = column(&measured, |m| 100.0 - m.head_score);
    let shoulder_cost = column(&measured, |m| 100.0 - m.shoulder_score);

    ReportContext {
        frames_processed: summary.frames.processed,
        frames_failed: summary.frames.failed,
        poses_scored: summary.poses.scored,
        labels: summary.labels.clone(),
        score_median: summary.score.median,
        final_good_percent: summary.final_good_percent,
        back_angle_median: median(&column(&measured, |m| m.back_angle)),
        head_offset_median: median(&column(&measured, |m| m.head_offset)),
        shoulder_tilt_median: median(&column(&measured, |m| m.shoulder_tilt)),
        contributor_costs: vec![
            ("back lean", median(&back_cost) * profile.back_weight),
            ("forward head", median(&head_cost) * profile.head_weight),
            (
                "uneven shoulders",
                median(&shoulder_cost) * profile.shoulder_weight,
            ),
        ],
    }
}

fn column<F>(measured: &[PostureMeasurements], f: F) -> Vec<f64>
where
    F: Fn(&PostureMeasurements) -> f64,
{
    measured.iter().map(f).collect()
}

fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(text.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/report_writer.rs"]
mod tests;

pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::thresholds::ScoringProfile;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreStats {
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelStat {
    pub name: &'static str,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameCounts {
    pub processed: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoseCounts {
    pub seen: u64,
    pub scored: u64,
    pub unknown: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub git_hash: Option<String>,
    pub input: String,
    pub report_mode: String,
    pub width: u32,
    pub height: u32,

    pub frames: FrameCounts,
    pub poses: PoseCounts,
    pub labels: Vec<LabelStat>,
    pub score: ScoreStats,

    pub final_good_percent: u8,
    pub history_len: usize,
    pub profile: ScoringProfile,
}

#[derive(Debug, Clone)]
pub struct ReportContext {
    pub frames_processed: u64,
    pub frames_failed: u64,
    pub poses_scored: u64,
    pub labels: Vec<LabelStat>,
    pub score_median: f64,
    pub final_good_percent: u8,
    pub back_angle_median: f64,
    pub head_offset_median: f64,
    pub shoulder_tilt_median: f64,
    /// Median points each contributor takes off the weighted score.
    pub contributor_costs: Vec<(&'static str, f64)>,
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

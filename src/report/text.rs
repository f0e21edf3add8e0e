use crate::report::{LabelStat, ReportContext, format_f64_3};

pub fn render_report_text(ctx: &ReportContext) -> String {
    let mut out = String::new();

    out.push_str("Posture Quality Report\n");
    out.push_str("======================\n\n");

    out.push_str("1. Session\n");
    out.push_str(&format!("Frames processed: {}\n", ctx.frames_processed));
    out.push_str(&format!("Frames skipped: {}\n", ctx.frames_failed));
    out.push_str(&format!("Poses scored: {}\n\n", ctx.poses_scored));

    out.push_str("2. Overall posture\n");
    out.push_str(&format!("Label mix: {}\n", label_mix(&ctx.labels)));
    out.push_str(&format!(
        "Score median: {}\n",
        format_f64_3(ctx.score_median)
    ));
    out.push_str(&format!(
        "Good posture in recent window: {}%\n",
        ctx.final_good_percent
    ));
    out.push_str(&format!(
        "Overall: {}\n\n",
        overall_statement(ctx.poses_scored, ctx.final_good_percent)
    ));

    out.push_str("3. Contributors (median)\n");
    out.push_str(&format!(
        "Back lean: {} deg\nHead offset: {} px\nShoulder tilt: {} px\n",
        format_f64_3(ctx.back_angle_median),
        format_f64_3(ctx.head_offset_median),
        format_f64_3(ctx.shoulder_tilt_median)
    ));
    if let Some(hint) = dominant_issue(ctx) {
        out.push_str(&format!("Main issue: {}\n", hint));
    }

    out
}

fn label_mix(labels: &[LabelStat]) -> String {
    let parts: Vec<String> = labels
        .iter()
        .map(|l| format!("{} {} ({})", l.name, l.count, format_f64_3(l.fraction)))
        .collect();
    parts.join(", ")
}

fn overall_statement(scored: u64, good_percent: u8) -> &'static str {
    if scored == 0 {
        "no confident poses were observed"
    } else if good_percent >= 75 {
        "posture mostly good"
    } else if good_percent >= 40 {
        "posture mixed"
    } else {
        "posture mostly poor"
    }
}

fn dominant_issue(ctx: &ReportContext) -> Option<&'static str> {
    if ctx.poses_scored == 0 {
        return None;
    }
    let (name, cost) = ctx
        .contributor_costs
        .iter()
        .copied()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))?;
    if cost < 1.0 { None } else { Some(name) }
}

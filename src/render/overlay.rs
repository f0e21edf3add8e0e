use crate::model::verdict::{PostureLabel, PostureVerdict};
use crate::render::{Color, Surface};

pub const STATUS_ORIGIN: (f64, f64) = (20.0, 40.0);
pub const STATUS_FONT: &str = "24px Arial";

pub fn status_text(verdict: &PostureVerdict, good_percent: u8) -> String {
    format!(
        "{} ({}%) • Good: {}%",
        verdict.label.display(),
        verdict.score,
        good_percent
    )
}

pub fn label_color(label: PostureLabel) -> Color {
    match label {
        PostureLabel::Good => Color::Lime,
        PostureLabel::Average => Color::Orange,
        PostureLabel::Bad | PostureLabel::Unknown => Color::Red,
    }
}

/// Draws the status line; returns false (drawing nothing) for Unknown so the
/// previously shown status stays in place.
pub fn draw_status(surface: &mut dyn Surface, verdict: &PostureVerdict, good_percent: u8) -> bool {
    if !verdict.is_known() {
        return false;
    }
    surface.fill_text(
        STATUS_ORIGIN.0,
        STATUS_ORIGIN.1,
        &status_text(verdict, good_percent),
        label_color(verdict.label),
        STATUS_FONT,
    );
    true
}

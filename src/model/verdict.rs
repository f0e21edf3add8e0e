use serde::Serialize;

use crate::model::thresholds::ScoringProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PostureLabel {
    Unknown,
    Good,
    Average,
    Bad,
}

impl PostureLabel {
    /// Inclusive lower bounds: good_min_score and above is Good,
    /// average_min_score up to it is Average, the rest Bad.
    pub fn from_score(score: u8, profile: &ScoringProfile) -> Self {
        if score >= profile.good_min_score {
            PostureLabel::Good
        } else if score >= profile.average_min_score {
            PostureLabel::Average
        } else {
            PostureLabel::Bad
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PostureLabel::Unknown => "Unknown",
            PostureLabel::Good => "Good",
            PostureLabel::Average => "Average",
            PostureLabel::Bad => "Bad",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            PostureLabel::Unknown => "❓ Unknown",
            PostureLabel::Good => "✅ Good",
            PostureLabel::Average => "⚠️ Average",
            PostureLabel::Bad => "❌ Bad",
        }
    }
}

pub fn label_order() -> &'static [PostureLabel] {
    &[
        PostureLabel::Good,
        PostureLabel::Average,
        PostureLabel::Bad,
        PostureLabel::Unknown,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostureVerdict {
    pub label: PostureLabel,
    pub score: u8,
}

impl PostureVerdict {
    pub fn unknown() -> Self {
        Self {
            label: PostureLabel::Unknown,
            score: 0,
        }
    }

    pub fn is_known(&self) -> bool {
        self.label != PostureLabel::Unknown
    }
}

/// Raw measurements and sub-scores behind a known verdict.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PostureMeasurements {
    pub back_angle: f64,
    pub head_offset: f64,
    pub shoulder_tilt: f64,
    pub back_score: f64,
    pub head_score: f64,
    pub shoulder_score: f64,
}

use serde::Serialize;

/// Fixed constants of the posture scorer.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringProfile {
    pub min_confidence: f64,
    pub draw_confidence: f64,
    pub vertical_offset: f64,
    pub back_slope: f64,
    pub head_slope: f64,
    pub shoulder_slope: f64,
    pub back_weight: f64,
    pub head_weight: f64,
    pub shoulder_weight: f64,
    pub good_min_score: u8,
    pub average_min_score: u8,
    pub history_capacity: usize,
}

impl ScoringProfile {
    pub fn default_v1() -> Self {
        Self {
            min_confidence: 0.4,
            draw_confidence: 0.4,
            vertical_offset: 100.0,
            back_slope: 3.5,
            head_slope: 0.7,
            shoulder_slope: 2.5,
            back_weight: 0.4,
            head_weight: 0.3,
            shoulder_weight: 0.3,
            good_min_score: 65,
            average_min_score: 50,
            history_capacity: 60,
        }
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

use crate::model::geometry::{Point2, angle_between, midpoint};
use crate::model::keypoint::{Keypoint, KeypointSet, Landmark};
use crate::model::thresholds::ScoringProfile;
use crate::model::verdict::{PostureLabel, PostureMeasurements, PostureVerdict};

pub const REQUIRED_LANDMARKS: [Landmark; 5] = [
    Landmark::LeftShoulder,
    Landmark::RightShoulder,
    Landmark::LeftHip,
    Landmark::RightHip,
    Landmark::Nose,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureAssessment {
    pub verdict: PostureVerdict,
    pub measurements: Option<PostureMeasurements>,
}

#[derive(Debug, Clone, Default)]
pub struct PostureEvaluator {
    profile: ScoringProfile,
}

struct RequiredKeypoints<'a> {
    left_shoulder: &'a Keypoint,
    right_shoulder: &'a Keypoint,
    left_hip: &'a Keypoint,
    right_hip: &'a Keypoint,
    nose: &'a Keypoint,
}

impl PostureEvaluator {
    pub fn new(profile: ScoringProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    #[cfg(test)]
    pub fn evaluate(&self, keypoints: &KeypointSet) -> PostureVerdict {
        self.assess(keypoints).verdict
    }

    pub fn assess(&self, keypoints: &KeypointSet) -> PostureAssessment {
        let Some(required) = self.required(keypoints) else {
            return PostureAssessment {
                verdict: PostureVerdict::unknown(),
                measurements: None,
            };
        };

        let m = self.measure(&required);
        let score = (self.profile.back_weight * m.back_score
            + self.profile.head_weight * m.head_score
            + self.profile.shoulder_weight * m.shoulder_score)
            .round()
            .clamp(0.0, 100.0) as u8;

        PostureAssessment {
            verdict: PostureVerdict {
                label: PostureLabel::from_score(score, &self.profile),
                score,
            },
            measurements: Some(m),
        }
    }

    pub fn missing_landmarks(&self, keypoints: &KeypointSet) -> Vec<Landmark> {
        REQUIRED_LANDMARKS
            .iter()
            .copied()
            .filter(|&l| {
                keypoints
                    .get(l)
                    .is_none_or(|kp| kp.score < self.profile.min_confidence)
            })
            .collect()
    }

    // Fails closed: any absent or low-confidence landmark yields None.
    fn required<'a>(&self, keypoints: &'a KeypointSet) -> Option<RequiredKeypoints<'a>> {
        let min = self.profile.min_confidence;
        let pick = |landmark: Landmark| keypoints.get(landmark).filter(|kp| kp.score >= min);
        Some(RequiredKeypoints {
            left_shoulder: pick(Landmark::LeftShoulder)?,
            right_shoulder: pick(Landmark::RightShoulder)?,
            left_hip: pick(Landmark::LeftHip)?,
            right_hip: pick(Landmark::RightHip)?,
            nose: pick(Landmark::Nose)?,
        })
    }

    fn measure(&self, kp: &RequiredKeypoints<'_>) -> PostureMeasurements {
        let mid_shoulder = midpoint(kp.left_shoulder.position(), kp.right_shoulder.position());
        let mid_hip = midpoint(kp.left_hip.position(), kp.right_hip.position());
        let vertical = Point2::new(mid_hip.x, mid_hip.y + self.profile.vertical_offset);

        // The reference hangs below the hips, so an upright spine is a straight
        // angle at the hip; lean is measured as the deviation from it.
        let back_angle = 180.0 - angle_between(mid_shoulder, mid_hip, vertical);
        let head_offset = (kp.nose.x - mid_shoulder.x).abs();
        let shoulder_tilt = (kp.left_shoulder.y - kp.right_shoulder.y).abs();

        PostureMeasurements {
            back_angle,
            head_offset,
            shoulder_tilt,
            back_score: penalty_score(back_angle, self.profile.back_slope),
            head_score: penalty_score(head_offset, self.profile.head_slope),
            shoulder_score: penalty_score(shoulder_tilt, self.profile.shoulder_slope),
        }
    }
}

pub fn penalty_score(measurement: f64, slope: f64) -> f64 {
    (100.0 - measurement * slope).clamp(0.0, 100.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/posture/evaluator.rs"]
mod tests;

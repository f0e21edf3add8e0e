use crate::model::keypoint::{KeypointSet, Landmark, Pose};
use crate::render::{Color, Surface};

pub const KEYPOINT_RADIUS: f64 = 6.0;
pub const BONE_WIDTH: f64 = 2.0;

/// Adjacent landmark pairs of the MoveNet skeleton.
pub const ADJACENT_PAIRS: [(Landmark, Landmark); 16] = [
    (Landmark::Nose, Landmark::LeftEye),
    (Landmark::Nose, Landmark::RightEye),
    (Landmark::LeftEye, Landmark::LeftEar),
    (Landmark::RightEye, Landmark::RightEar),
    (Landmark::LeftShoulder, Landmark::RightShoulder),
    (Landmark::LeftShoulder, Landmark::LeftElbow),
    (Landmark::LeftShoulder, Landmark::LeftHip),
    (Landmark::RightShoulder, Landmark::RightElbow),
    (Landmark::RightShoulder, Landmark::RightHip),
    (Landmark::LeftElbow, Landmark::LeftWrist),
    (Landmark::RightElbow, Landmark::RightWrist),
    (Landmark::LeftHip, Landmark::RightHip),
    (Landmark::LeftHip, Landmark::LeftKnee),
    (Landmark::RightHip, Landmark::RightKnee),
    (Landmark::LeftKnee, Landmark::LeftAnkle),
    (Landmark::RightKnee, Landmark::RightAnkle),
];

/// Dots for every keypoint strictly above `min_score`, named or not.
pub fn draw_keypoints(surface: &mut dyn Surface, pose: &Pose, min_score: f64) {
    for kp in &pose.keypoints {
        if kp.score > min_score {
            surface.fill_circle(kp.x, kp.y, KEYPOINT_RADIUS, Color::Lime);
        }
    }
}

pub fn draw_skeleton(surface: &mut dyn Surface, keypoints: &KeypointSet, min_score: f64) {
    for (a, b) in ADJACENT_PAIRS {
        let (Some(kp1), Some(kp2)) = (keypoints.get(a), keypoints.get(b)) else {
            continue;
        };
        if kp1.score > min_score && kp2.score > min_score {
            surface.stroke_line((kp1.x, kp1.y), (kp2.x, kp2.y), Color::Aqua, BONE_WIDTH);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/skeleton.rs"]
mod tests;

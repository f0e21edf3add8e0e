use serde::{Deserialize, Serialize};

use crate::model::geometry::Point2;

pub const LANDMARK_COUNT: usize = 17;

/// Body landmarks emitted by MoveNet-style (COCO 17) pose models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Landmark {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Landmark {
    pub const ALL: [Landmark; LANDMARK_COUNT] = [
        Landmark::Nose,
        Landmark::LeftEye,
        Landmark::RightEye,
        Landmark::LeftEar,
        Landmark::RightEar,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
        Landmark::LeftHip,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftAnkle,
        Landmark::RightAnkle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Landmark::Nose => "nose",
            Landmark::LeftEye => "left_eye",
            Landmark::RightEye => "right_eye",
            Landmark::LeftEar => "left_ear",
            Landmark::RightEar => "right_ear",
            Landmark::LeftShoulder => "left_shoulder",
            Landmark::RightShoulder => "right_shoulder",
            Landmark::LeftElbow => "left_elbow",
            Landmark::RightElbow => "right_elbow",
            Landmark::LeftWrist => "left_wrist",
            Landmark::RightWrist => "right_wrist",
            Landmark::LeftHip => "left_hip",
            Landmark::RightHip => "right_hip",
            Landmark::LeftKnee => "left_knee",
            Landmark::RightKnee => "right_knee",
            Landmark::LeftAnkle => "left_ankle",
            Landmark::RightAnkle => "right_ankle",
        }
    }

    pub fn from_name(name: &str) -> Option<Landmark> {
        Landmark::ALL.iter().copied().find(|l| l.name() == name)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    #[serde(default)]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub score: f64,
}

impl Keypoint {
    #[cfg(test)]
    pub fn new(name: &str, x: f64, y: f64, score: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            x,
            y,
            score,
        }
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// One detected person as reported by the pose model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub keypoints: Vec<Keypoint>,
}

/// Keypoints of a single pose resolved onto the fixed landmark set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeypointSet {
    slots: [Option<Keypoint>; LANDMARK_COUNT],
    unmapped: usize,
}

impl KeypointSet {
    /// Later keypoints with a repeated name replace earlier ones.
    pub fn from_keypoints<'a, I>(keypoints: I) -> Self
    where
        I: IntoIterator<Item = &'a Keypoint>,
    {
        let mut set = KeypointSet::default();
        for kp in keypoints {
            match kp.name.as_deref().and_then(Landmark::from_name) {
                Some(landmark) => set.slots[landmark.index()] = Some(kp.clone()),
                None => set.unmapped += 1,
            }
        }
        set
    }

    pub fn from_pose(pose: &Pose) -> Self {
        Self::from_keypoints(&pose.keypoints)
    }

    pub fn get(&self, landmark: Landmark) -> Option<&Keypoint> {
        self.slots[landmark.index()].as_ref()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn unmapped(&self) -> usize {
        self.unmapped
    }
}

pub mod frame;
pub mod geometry;
pub mod keypoint;
pub mod thresholds;
pub mod verdict;

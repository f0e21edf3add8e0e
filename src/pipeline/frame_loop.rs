use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::input::InputError;
use crate::model::frame::{FrameGeometry, VideoFrame};
use crate::model::keypoint::{KeypointSet, Pose};
use crate::model::verdict::{PostureMeasurements, PostureVerdict};
use crate::posture::{HistoryTracker, PostureEvaluator};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("camera unavailable: {0}")]
    Camera(#[source] InputError),
    #[error("frame source failed: {0}")]
    FrameSource(#[source] InputError),
    #[error("pose model unavailable: {0}")]
    Model(String),
    #[error("pipeline is not running")]
    NotRunning,
    #[error("pose estimation failed on frame {frame}: {reason}")]
    Estimation { frame: u64, reason: String },
    #[error("presentation failed: {0}")]
    Presentation(#[from] std::io::Error),
    #[error("overlay encoding failed: {0}")]
    Overlay(#[from] serde_json::Error),
}

impl PipelineError {
    /// Failures confined to a single frame; the loop may carry on after them.
    pub fn is_frame_local(&self) -> bool {
        matches!(self, PipelineError::Estimation { .. })
    }
}

pub trait CameraSource {
    fn open(&mut self) -> Result<FrameGeometry, PipelineError>;
    /// `None` once the source is exhausted. Live cameras never return it.
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, PipelineError>;
}

pub trait PoseModel {
    fn load(&mut self) -> Result<(), PipelineError>;
    fn estimate_poses(&mut self, frame: &VideoFrame) -> Result<Vec<Pose>, PipelineError>;
}

pub trait Presenter {
    fn present(
        &mut self,
        frame: &VideoFrame,
        poses: &[Pose],
        results: &[PoseResult],
    ) -> Result<(), PipelineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseResult {
    pub pose_index: usize,
    pub verdict: PostureVerdict,
    pub measurements: Option<PostureMeasurements>,
    pub good_percent: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    pub results: Vec<PoseResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Frame(FrameReport),
    EndOfStream,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames_processed: u64,
    pub frames_failed: u64,
    pub poses_seen: u64,
    pub poses_scored: u64,
}

pub struct FramePipeline<C, M, P> {
    camera: C,
    model: M,
    presenter: P,
    evaluator: PostureEvaluator,
    history: HistoryTracker,
    state: PipelineState,
    geometry: Option<FrameGeometry>,
}

impl<C, M, P> FramePipeline<C, M, P>
where
    C: CameraSource,
    M: PoseModel,
    P: Presenter,
{
    pub fn new(camera: C, model: M, presenter: P, evaluator: PostureEvaluator) -> Self {
        let history = HistoryTracker::new(evaluator.profile().history_capacity);
        Self {
            camera,
            model,
            presenter,
            evaluator,
            history,
            state: PipelineState::Idle,
            geometry: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn geometry(&self) -> Option<FrameGeometry> {
        self.geometry
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    #[cfg(test)]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Idle -> Running once both the camera and the model are ready.
    pub fn start(&mut self) -> Result<(), PipelineError> {
        if self.state == PipelineState::Running {
            return Ok(());
        }
        let geometry = self.camera.open()?;
        self.model.load()?;
        info!(
            width = geometry.width,
            height = geometry.height,
            "camera and pose model ready"
        );
        self.geometry = Some(geometry);
        self.state = PipelineState::Running;
        Ok(())
    }

    pub fn step(&mut self) -> Result<StepOutcome, PipelineError> {
        if self.state != PipelineState::Running {
            return Err(PipelineError::NotRunning);
        }
        let Some(frame) = self.camera.next_frame()? else {
            return Ok(StepOutcome::EndOfStream);
        };
        let poses = self.model.estimate_poses(&frame)?;
        let results = self.process_frame(&frame, &poses);
        self.presenter.present(&frame, &poses, &results)?;
        Ok(StepOutcome::Frame(FrameReport {
            frame_index: frame.index,
            results,
        }))
    }

    /// Scores every pose of one frame and folds known labels into the history.
    pub fn process_frame(&mut self, frame: &VideoFrame, poses: &[Pose]) -> Vec<PoseResult> {
        let mut results = Vec::with_capacity(poses.len());
        for (pose_index, pose) in poses.iter().enumerate() {
            let keypoints = KeypointSet::from_pose(pose);
            let assessment = self.evaluator.assess(&keypoints);
            let verdict = assessment.verdict;
            if verdict.is_known() {
                self.history.record(verdict.label);
                debug!(
                    frame = frame.index,
                    pose = pose_index,
                    label = verdict.label.name(),
                    score = verdict.score,
                    good_percent = self.history.good_percent(),
                    "posture evaluated"
                );
            } else {
                trace!(
                    frame = frame.index,
                    pose = pose_index,
                    mapped = keypoints.len(),
                    unmapped = keypoints.unmapped(),
                    missing = ?self.evaluator.missing_landmarks(&keypoints),
                    "insufficient keypoints"
                );
            }
            results.push(PoseResult {
                pose_index,
                verdict,
                measurements: assessment.measurements,
                good_percent: self.history.good_percent(),
            });
        }
        results
    }

    /// Steps until the camera is exhausted. Frame-local failures are logged
    /// and skipped; anything else stops the loop.
    pub fn run<F>(&mut self, mut on_frame: F) -> Result<SessionStats, PipelineError>
    where
        F: FnMut(&FrameReport),
    {
        let mut stats = SessionStats::default();
        loop {
            match self.step() {
                Ok(StepOutcome::Frame(report)) => {
                    stats.frames_processed += 1;
                    stats.poses_seen += report.results.len() as u64;
                    stats.poses_scored +=
                        report.results.iter().filter(|r| r.verdict.is_known()).count() as u64;
                    on_frame(&report);
                }
                Ok(StepOutcome::EndOfStream) => break,
                Err(err) if err.is_frame_local() => {
                    warn!(error = %err, "skipping frame");
                    stats.frames_failed += 1;
                }
                Err(err) => return Err(err),
            }
        }
        info!(
            frames = stats.frames_processed,
            failed = stats.frames_failed,
            poses = stats.poses_seen,
            scored = stats.poses_scored,
            good_percent = self.history.good_percent(),
            "session finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/frame_loop.rs"]
mod tests;

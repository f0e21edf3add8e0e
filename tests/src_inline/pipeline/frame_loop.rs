use std::collections::VecDeque;

use super::*;
use crate::model::keypoint::Keypoint;
use crate::model::verdict::PostureLabel;
use crate::render::presenter::NullPresenter;

struct ScriptedCamera {
    frames: u64,
    next: u64,
    fail_open: bool,
}

impl ScriptedCamera {
    fn new(frames: u64) -> Self {
        Self {
            frames,
            next: 0,
            fail_open: false,
        }
    }
}

impl CameraSource for ScriptedCamera {
    fn open(&mut self) -> Result<FrameGeometry, PipelineError> {
        if self.fail_open {
            return Err(PipelineError::Camera(InputError::MissingInput(
                "no device".to_string(),
            )));
        }
        Ok(FrameGeometry::default())
    }

    fn next_frame(&mut self) -> Result<Option<VideoFrame>, PipelineError> {
        if self.next >= self.frames {
            return Ok(None);
        }
        let frame = VideoFrame {
            index: self.next,
            geometry: FrameGeometry::default(),
            payload: Vec::new(),
        };
        self.next += 1;
        Ok(Some(frame))
    }
}

/// Plays back one scripted answer per frame.
struct ScriptedModel {
    answers: VecDeque<Option<Vec<Pose>>>,
}

impl PoseModel for ScriptedModel {
    fn load(&mut self) -> Result<(), PipelineError> {
        Ok(())
    }

    fn estimate_poses(&mut self, frame: &VideoFrame) -> Result<Vec<Pose>, PipelineError> {
        match self.answers.pop_front().flatten() {
            Some(poses) => Ok(poses),
            None => Err(PipelineError::Estimation {
                frame: frame.index,
                reason: "model crashed".to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct CountingPresenter {
    presented: Vec<u64>,
}

impl Presenter for CountingPresenter {
    fn present(
        &mut self,
        frame: &VideoFrame,
        _poses: &[Pose],
        _results: &[PoseResult],
    ) -> Result<(), PipelineError> {
        self.presented.push(frame.index);
        Ok(())
    }
}

fn upright() -> Pose {
    Pose {
        score: Some(0.9),
        keypoints: vec![
            Keypoint::new("left_shoulder", 100.0, 100.0, 0.9),
            Keypoint::new("right_shoulder", 200.0, 100.0, 0.9),
            Keypoint::new("left_hip", 110.0, 300.0, 0.9),
            Keypoint::new("right_hip", 190.0, 300.0, 0.9),
            Keypoint::new("nose", 150.0, 90.0, 0.9),
        ],
    }
}

fn slouched() -> Pose {
    Pose {
        score: Some(0.9),
        keypoints: vec![
            Keypoint::new("left_shoulder", 250.0, 100.0, 0.9),
            Keypoint::new("right_shoulder", 350.0, 100.0, 0.9),
            Keypoint::new("left_hip", 110.0, 300.0, 0.9),
            Keypoint::new("right_hip", 190.0, 300.0, 0.9),
            Keypoint::new("nose", 500.0, 90.0, 0.9),
        ],
    }
}

fn faceless() -> Pose {
    let mut pose = upright();
    pose.keypoints.pop();
    pose
}

fn pipeline(
    answers: Vec<Option<Vec<Pose>>>,
) -> FramePipeline<ScriptedCamera, ScriptedModel, CountingPresenter> {
    FramePipeline::new(
        ScriptedCamera::new(answers.len() as u64),
        ScriptedModel {
            answers: answers.into(),
        },
        CountingPresenter::default(),
        PostureEvaluator::default(),
    )
}

#[test]
fn test_step_requires_start() {
    let mut p = pipeline(vec![Some(vec![upright()])]);
    assert_eq!(p.state(), PipelineState::Idle);
    assert!(matches!(p.step(), Err(PipelineError::NotRunning)));
    p.start().unwrap();
    assert_eq!(p.state(), PipelineState::Running);
    assert_eq!(p.geometry(), Some(FrameGeometry::default()));
}

#[test]
fn test_acquisition_failure_keeps_pipeline_idle() {
    let mut camera = ScriptedCamera::new(1);
    camera.fail_open = true;
    let mut p = FramePipeline::new(
        camera,
        ScriptedModel {
            answers: VecDeque::new(),
        },
        NullPresenter,
        PostureEvaluator::default(),
    );
    let err = p.start().unwrap_err();
    assert!(matches!(err, PipelineError::Camera(_)));
    assert!(!err.is_frame_local());
    assert_eq!(p.state(), PipelineState::Idle);
}

#[test]
fn test_step_scores_and_records() {
    let mut p = pipeline(vec![Some(vec![upright(), slouched()])]);
    p.start().unwrap();
    let StepOutcome::Frame(report) = p.step().unwrap() else {
        panic!("expected a frame");
    };
    assert_eq!(report.frame_index, 0);
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].verdict.label, PostureLabel::Good);
    assert_eq!(report.results[0].good_percent, 100);
    assert_eq!(report.results[1].verdict.label, PostureLabel::Bad);
    assert_eq!(report.results[1].good_percent, 50);
    assert_eq!(p.history().len(), 2);
    assert_eq!(p.presenter().presented, vec![0]);
    assert_eq!(p.step().unwrap(), StepOutcome::EndOfStream);
}

#[test]
fn test_unknown_poses_are_not_recorded() {
    let answers = (0..10)
        .map(|i| {
            if i % 2 == 0 {
                Some(vec![upright()])
            } else {
                Some(vec![faceless()])
            }
        })
        .collect();
    let mut p = pipeline(answers);
    p.start().unwrap();
    let stats = p.run(|_| {}).unwrap();
    assert_eq!(stats.frames_processed, 10);
    assert_eq!(stats.poses_seen, 10);
    assert_eq!(stats.poses_scored, 5);
    assert_eq!(p.history().len(), 5);
    assert!(p.history().labels().all(|l| l == PostureLabel::Good));
}

#[test]
fn test_frame_failure_is_skipped() {
    let mut p = pipeline(vec![
        Some(vec![upright()]),
        None,
        Some(vec![slouched()]),
        Some(vec![]),
    ]);
    p.start().unwrap();
    let mut seen = Vec::new();
    let stats = p.run(|report| seen.push(report.frame_index)).unwrap();
    assert_eq!(seen, vec![0, 2, 3]);
    assert_eq!(stats.frames_processed, 3);
    assert_eq!(stats.frames_failed, 1);
    assert_eq!(p.presenter().presented, vec![0, 2, 3]);
    assert_eq!(p.history().good_percent(), 50);
}

#[test]
fn test_history_is_bounded_across_frames() {
    let answers = (0..100).map(|_| Some(vec![upright()])).collect();
    let mut p = pipeline(answers);
    p.start().unwrap();
    p.run(|_| {}).unwrap();
    assert_eq!(p.history().len(), 60);
    assert_eq!(p.history().good_percent(), 100);
}

#[test]
fn test_process_frame_reports_unknown_with_current_percent() {
    let mut p = pipeline(vec![]);
    let frame = VideoFrame {
        index: 7,
        geometry: FrameGeometry::default(),
        payload: Vec::new(),
    };
    let first = p.process_frame(&frame, &[upright()]);
    assert_eq!(first[0].good_percent, 100);
    let second = p.process_frame(&frame, &[faceless()]);
    assert_eq!(second[0].verdict, PostureVerdict::unknown());
    assert!(second[0].measurements.is_none());
    assert_eq!(second[0].good_percent, 100);
}

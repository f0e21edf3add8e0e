use std::io::Write;

use serde::Serialize;

use crate::model::frame::VideoFrame;
use crate::model::keypoint::{KeypointSet, Pose};
use crate::pipeline::frame_loop::{PipelineError, PoseResult, Presenter};
use crate::render::overlay::{draw_status, status_text};
use crate::render::skeleton::{draw_keypoints, draw_skeleton};
use crate::render::{DrawCommand, DrawList, Surface};

#[derive(Debug, Serialize)]
struct OverlayLine<'a> {
    frame: u64,
    status: Option<&'a str>,
    commands: &'a [DrawCommand],
}

/// Renders each frame onto a `DrawList` and writes it as one JSON line.
pub struct OverlayWriter<W: Write> {
    out: W,
    surface: DrawList,
    draw_confidence: f64,
    last_status: Option<String>,
}

impl<W: Write> OverlayWriter<W> {
    pub fn new(out: W, draw_confidence: f64) -> Self {
        Self {
            out,
            surface: DrawList::default(),
            draw_confidence,
            last_status: None,
        }
    }

    /// Status text currently on screen; Unknown frames leave it unchanged.
    #[cfg(test)]
    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, frame: &VideoFrame, poses: &[Pose], results: &[PoseResult]) {
        let surface: &mut dyn Surface = &mut self.surface;
        surface.clear(frame.geometry.width, frame.geometry.height);
        surface.draw_frame(frame.index, frame.geometry.width, frame.geometry.height);
        for (pose, result) in poses.iter().zip(results) {
            draw_keypoints(surface, pose, self.draw_confidence);
            draw_skeleton(surface, &KeypointSet::from_pose(pose), self.draw_confidence);
            if draw_status(surface, &result.verdict, result.good_percent) {
                self.last_status = Some(status_text(&result.verdict, result.good_percent));
            }
        }
    }
}

impl<W: Write> Presenter for OverlayWriter<W> {
    fn present(
        &mut self,
        frame: &VideoFrame,
        poses: &[Pose],
        results: &[PoseResult],
    ) -> Result<(), PipelineError> {
        self.render(frame, poses, results);
        let commands = self.surface.take();
        let line = OverlayLine {
            frame: frame.index,
            status: self.last_status.as_deref(),
            commands: &commands,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// Presenter for headless runs.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _: &VideoFrame, _: &[Pose], _: &[PoseResult]) -> Result<(), PipelineError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/presenter.rs"]
mod tests;

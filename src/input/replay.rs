use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::input::InputError;
use crate::input::cache::{open_maybe_gz, read_content_line};
use crate::model::frame::{FrameGeometry, VideoFrame};
use crate::model::keypoint::Pose;
use crate::pipeline::frame_loop::{CameraSource, PipelineError, PoseModel};

/// One line of a recorded session: the pose model output for one frame.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub poses: Vec<Pose>,
}

/// Camera that replays a recorded session, one frame per non-blank line.
pub struct ReplayCamera {
    path: PathBuf,
    geometry: FrameGeometry,
    reader: Option<Box<dyn BufRead>>,
    buf: Vec<u8>,
    line_no: usize,
    next_index: u64,
}

impl ReplayCamera {
    pub fn new(path: &Path, geometry: FrameGeometry) -> Self {
        Self {
            path: path.to_path_buf(),
            geometry,
            reader: None,
            buf: Vec::new(),
            line_no: 0,
            next_index: 0,
        }
    }

    #[cfg(test)]
    pub fn from_reader(reader: Box<dyn BufRead>, geometry: FrameGeometry) -> Self {
        let mut camera = Self::new(Path::new("<memory>"), geometry);
        camera.reader = Some(reader);
        camera
    }

    #[cfg(test)]
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl CameraSource for ReplayCamera {
    fn open(&mut self) -> Result<FrameGeometry, PipelineError> {
        if self.reader.is_none() {
            let reader = open_maybe_gz(&self.path).map_err(PipelineError::Camera)?;
            info!(path = %self.path.display(), "opened recorded session");
            self.reader = Some(reader);
        }
        Ok(self.geometry)
    }

    fn next_frame(&mut self) -> Result<Option<VideoFrame>, PipelineError> {
        let Some(reader) = self.reader.as_mut() else {
            return Err(PipelineError::Camera(InputError::MissingInput(
                "camera has not been opened".to_string(),
            )));
        };
        let has_line = read_content_line(&mut **reader, &mut self.buf, &mut self.line_no)
            .map_err(PipelineError::FrameSource)?;
        if !has_line {
            debug!(lines = self.line_no, "recorded session exhausted");
            return Ok(None);
        }
        let frame = VideoFrame {
            index: self.next_index,
            geometry: self.geometry,
            payload: self.buf.clone(),
        };
        self.next_index += 1;
        Ok(Some(frame))
    }
}

/// Pose model whose estimates were recorded alongside the frames.
#[derive(Debug, Default)]
pub struct ReplayPoseModel {
    loaded: bool,
}

impl ReplayPoseModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PoseModel for ReplayPoseModel {
    fn load(&mut self) -> Result<(), PipelineError> {
        self.loaded = true;
        Ok(())
    }

    fn estimate_poses(&mut self, frame: &VideoFrame) -> Result<Vec<Pose>, PipelineError> {
        if !self.loaded {
            return Err(PipelineError::Model("pose model has not been loaded".to_string()));
        }
        let recorded: RecordedFrame =
            serde_json::from_slice(&frame.payload).map_err(|e| PipelineError::Estimation {
                frame: frame.index,
                reason: e.to_string(),
            })?;
        Ok(recorded.poses)
    }
}

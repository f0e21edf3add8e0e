/// Resolution granted by the camera at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// One acquired video frame. The payload is opaque to the scorer; only the
/// pose model looks inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub index: u64,
    pub geometry: FrameGeometry,
    pub payload: Vec<u8>,
}

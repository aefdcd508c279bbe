use super::{DrawContext, Frame};

/// Drawing surface that keeps every submitted frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    width: f64,
    height: f64,
    frames: Vec<Frame>,
}

impl RecordingContext {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl DrawContext for RecordingContext {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn submit(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}

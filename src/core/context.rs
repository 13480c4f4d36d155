//! Per-frame context handed to behaviors

use crate::render::Canvas;

/// What a behavior can see and touch during one frame
pub struct FrameContext<'a> {
    /// Surface to draw onto this frame
    pub canvas: &'a mut dyn Canvas,
    /// Seconds since the previous frame
    pub delta: f32,
    /// Index of the current frame, starting at 1
    pub frame: u64,
}

impl<'a> FrameContext<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, delta: f32, frame: u64) -> Self {
        Self {
            canvas,
            delta,
            frame,
        }
    }
}

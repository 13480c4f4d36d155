//! Rendering module
//!
//! 2D rectangle drawing behind the [`Canvas`] seam, with a wgpu window
//! renderer and a software frame buffer.

mod canvas;
mod context;
mod rect;

pub use canvas::{Canvas, FrameBuffer};
pub use context::{RectInstance, RenderError, Renderer};
pub use rect::Rect;

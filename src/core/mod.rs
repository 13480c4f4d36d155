//! Core engine module

mod context;
mod engine;
mod error;
pub(crate) mod id;
mod time;

pub use context::FrameContext;
pub use engine::{Engine, EngineConfig};
pub use error::{ErrorKind, LudiError, Result};
pub use time::Time;

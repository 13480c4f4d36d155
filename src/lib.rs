//! A small 2D game engine built in Rust
//!
//! This engine provides:
//! - JSON game files: games list scenes, scenes list game objects
//! - Scenes of game objects stepped once per frame through linked behaviors
//! - Rectangle drawing with wgpu, or into a software frame buffer
//! - A browser for the game files in a directory

pub mod browser;
pub mod core;
pub mod loader;
pub mod object;
pub mod render;
pub mod world;

// Re-exports for convenience
pub use glam;
pub use wgpu;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::browser::{GameCatalog, GameEntry};
    pub use crate::core::{
        Engine, EngineConfig, ErrorKind, FrameContext, LudiError, Result, Time,
    };
    pub use crate::loader::{CancelToken, LoadReport, Loader, load_game, save_game};
    pub use crate::object::{
        Behavior, Color, GameObject, ObjectId, ObjectKind, ObjectType, Transform, Vector,
    };
    pub use crate::render::{Canvas, FrameBuffer, Rect, Renderer};
    pub use crate::world::{Game, GameId, GameRegistry, Scene, SceneId, StepReport};
    pub use glam::Vec2;
}

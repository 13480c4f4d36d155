//! Runtime object graph: games, scenes and the game registry

mod game;
mod registry;
mod scene;

pub use game::{Game, GameId};
pub use registry::GameRegistry;
pub use scene::{Scene, SceneId, StepReport};

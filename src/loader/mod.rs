//! Game file loading and saving
//!
//! Games are stored as three tiers of JSON files:
//! - game files (`.ludi.json`) list scene files
//! - scene files (`.ludsc.json`) list game object files
//! - game object resource files (`.ludres.json`) describe one object each

mod cancel;
mod format;
mod lector;
mod writer;

pub use cancel::CancelToken;
pub(crate) use format::{has_suffix, stem_without};
pub use format::{
    GAME_SUFFIX, GameFile, OBJECT_SUFFIX, ObjectFile, ObjectList, PlainProperties,
    RectangleProperties, SCENE_SUFFIX, SceneFile, SceneList,
};
pub use lector::{LoadReport, Loader, load_game};
pub use writer::save_game;

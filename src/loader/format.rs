//! On-disk shapes of the three file tiers

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::object::{Color, Transform};

/// Suffix of game files
pub const GAME_SUFFIX: &str = ".ludi.json";
/// Suffix of scene files
pub const SCENE_SUFFIX: &str = ".ludsc.json";
/// Suffix of game object resource files
pub const OBJECT_SUFFIX: &str = ".ludres.json";

/// Root document listing the scene files
///
/// Unknown top-level fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub scenes: SceneList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneList {
    pub all_scenes: Vec<PathBuf>,
}

/// Scene document listing the game object files
///
/// Without a `name` the scene is named after the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub gameobjects: ObjectList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectList {
    pub all_gameobjects: Vec<PathBuf>,
}

/// Just the type tag of a resource file, read before anything else
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ObjectHeader {
    #[serde(rename = "type")]
    pub tag: String,
}

/// A game object resource file with variant-specific properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectFile<P> {
    #[serde(rename = "type")]
    pub tag: String,
    pub name: String,
    pub properties: P,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlainProperties {
    pub transform: Transform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectangleProperties {
    pub transform: Transform,
    pub color: Color,
}

/// File name with `suffix` removed, falling back to the plain file stem
pub(crate) fn stem_without(path: &Path, suffix: &str) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix(suffix) {
        Some(stem) => stem.to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or(file_name),
    }
}

/// Whether the file name ends with `suffix`
pub(crate) fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().ends_with(suffix))
}

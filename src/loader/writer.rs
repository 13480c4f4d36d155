//! Save a game back to the three file tiers
//!
//! Files are written in place with no atomicity: the last write wins.
//! References between tiers are written as `dir.join(file)`, so a game saved
//! to a relative directory reloads from the same working directory.
//!
//! Scene files are prefixed with the scene's position in the game, so scenes
//! sharing a name never share files. The active scene is listed first, since
//! the loader activates the first listed scene.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{LudiError, Result};
use crate::object::{GameObject, ObjectKind};
use crate::world::{Game, Scene};

use super::format::{
    GAME_SUFFIX, GameFile, OBJECT_SUFFIX, ObjectFile, ObjectList, PlainProperties,
    RectangleProperties, SCENE_SUFFIX, SceneFile, SceneList,
};

/// Write `game` into `dir` and return the path of the game file
///
/// # Errors
///
/// `Io` if the directory cannot be created or a file cannot be written.
pub fn save_game(game: &Game, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| LudiError::from_io(dir, e))?;

    let mut all_scenes = Vec::with_capacity(game.scene_count());
    for (index, scene) in game.scenes().iter().enumerate() {
        all_scenes.push(save_scene(scene, index, dir)?);
    }

    if let Some(active) = game.active_scene_id()
        && let Some(pos) = game.scenes().iter().position(|s| s.id() == active)
    {
        let path = all_scenes.remove(pos);
        all_scenes.insert(0, path);
    }

    let path = dir.join(format!("{}{}", file_stem(&game.name), GAME_SUFFIX));
    let file = GameFile {
        name: Some(game.name.clone()),
        scenes: SceneList { all_scenes },
    };
    write_json(&path, &file)?;

    log::info!("Saved game '{}' to {}", game.name, path.display());
    Ok(path)
}

fn save_scene(scene: &Scene, index: usize, dir: &Path) -> Result<PathBuf> {
    let scene_stem = format!("{}_{}", index, file_stem(&scene.name));

    let mut all_gameobjects = Vec::with_capacity(scene.len());
    for (index, object) in scene.objects().iter().enumerate() {
        let path = dir.join(format!(
            "{}_{}_{}{}",
            scene_stem,
            index,
            file_stem(&object.name),
            OBJECT_SUFFIX
        ));
        save_object(object, &path)?;
        all_gameobjects.push(path);
    }

    let path = dir.join(format!("{scene_stem}{SCENE_SUFFIX}"));
    let file = SceneFile {
        name: Some(scene.name.clone()),
        gameobjects: ObjectList { all_gameobjects },
    };
    write_json(&path, &file)?;
    log::debug!("Saved scene '{}' to {}", scene.name, path.display());
    Ok(path)
}

fn save_object(object: &GameObject, path: &Path) -> Result<()> {
    let tag = object.object_type().code().to_string();
    let name = object.name.clone();
    let transform = object.transform;

    match &object.kind {
        ObjectKind::Plain => write_json(
            path,
            &ObjectFile {
                tag,
                name,
                properties: PlainProperties { transform },
            },
        ),
        ObjectKind::Rectangle(shape) => write_json(
            path,
            &ObjectFile {
                tag,
                name,
                properties: RectangleProperties {
                    transform,
                    color: shape.color,
                },
            },
        ),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| LudiError::Io {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    fs::write(path, text).map_err(|e| LudiError::from_io(path, e))
}

/// Make a name safe to use as a file stem
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_game;
    use crate::object::{Color, ObjectType, Transform};
    use tempfile::TempDir;

    fn sample_game() -> Game {
        let mut menu = Scene::new("menu");
        menu.add(GameObject::rectangle(
            "start button",
            Transform::from_components([10.0, 20.0, 0.0, 0.0, 30.0, 40.0]),
            Color::from_rgba8(12, 34, 56, 255),
        ))
        .unwrap();
        menu.add(GameObject::plain(
            "anchor",
            Transform::from_components([1.0, 1.0, 0.5, 0.25, 2.0, 2.0]),
        ))
        .unwrap();

        let mut game = Game::new("Saved Game");
        game.add_scene(Scene::new("level")).unwrap();
        let menu = game.add_scene(menu).unwrap();
        game.set_active_scene(menu).unwrap();
        game
    }

    #[test]
    fn test_saved_game_reloads() {
        let dir = TempDir::new().unwrap();
        let path = save_game(&sample_game(), dir.path()).unwrap();
        assert!(path.ends_with("Saved_Game.ludi.json"));

        let game = load_game(&path).unwrap();
        assert_eq!(game.name, "Saved Game");
        assert_eq!(game.scene_count(), 2);

        // Active scene is written first so it stays active
        let order: Vec<&str> = game.scenes().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, ["menu", "level"]);
        let active = game.active_scene().unwrap();
        assert_eq!(active.name, "menu");
        assert_eq!(active.len(), 2);

        let button = &active.objects()[0];
        assert_eq!(button.name, "start button");
        assert_eq!(button.object_type(), ObjectType::Rectangle);
        assert_eq!(
            button.as_rectangle().unwrap().color.to_rgba8(),
            [12, 34, 56, 255]
        );

        let anchor = &active.objects()[1];
        assert_eq!(
            anchor.transform.to_components(),
            [1.0, 1.0, 0.5, 0.25, 2.0, 2.0]
        );
    }

    #[test]
    fn test_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let mut game = sample_game();
        save_game(&game, dir.path()).unwrap();

        for scene in game.scenes_mut() {
            for object in scene.objects_mut() {
                object.name = format!("{} v2", object.name);
            }
        }
        let path = save_game(&game, dir.path()).unwrap();

        let reloaded = load_game(&path).unwrap();
        let names: Vec<&str> = reloaded
            .active_scene()
            .unwrap()
            .objects()
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(names, ["start button v2", "anchor v2"]);
    }

    #[test]
    fn test_file_stem_sanitizes() {
        assert_eq!(file_stem("a b/c"), "a_b_c");
        assert_eq!(file_stem(""), "untitled");
    }

    #[test]
    fn test_scenes_sharing_a_name_keep_their_objects() {
        let dir = TempDir::new().unwrap();
        let mut first = Scene::new("level");
        first
            .add(GameObject::plain("a", Transform::default()))
            .unwrap();
        let mut second = Scene::new("level");
        for name in ["b", "c"] {
            second
                .add(GameObject::plain(name, Transform::default()))
                .unwrap();
        }

        let mut game = Game::new("twins");
        let first = game.add_scene(first).unwrap();
        game.add_scene(second).unwrap();
        game.set_active_scene(first).unwrap();

        let reloaded = load_game(save_game(&game, dir.path()).unwrap()).unwrap();
        let counts: Vec<(&str, usize)> = reloaded
            .scenes()
            .iter()
            .map(|s| (s.name.as_str(), s.len()))
            .collect();
        assert_eq!(counts, [("level", 1), ("level", 2)]);
    }
}

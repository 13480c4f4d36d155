//! Game file loader
//!
//! Turns the three file tiers into a live object graph:
//!
//! ```text
//! mygame.ludi.json ──► scenes.all_scenes[]
//!     main.ludsc.json ──► gameobjects.all_gameobjects[]
//!         player.ludres.json ──► GameObject
//! ```
//!
//! Structural failures abort the whole load and nothing partial is
//! returned. The one tolerated failure is an object whose `type` tag is not
//! in [`OBJECT_TYPES`](crate::object::OBJECT_TYPES): it is logged, recorded
//! in the [`LoadReport`] and skipped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::core::{LudiError, Result};
use crate::object::{GameObject, ObjectType};
use crate::world::{Game, Scene};

use super::CancelToken;
use super::format::{
    GAME_SUFFIX, GameFile, ObjectFile, ObjectHeader, PlainProperties, RectangleProperties,
    SCENE_SUFFIX, SceneFile, has_suffix, stem_without,
};

/// What a successful load had to skip or tolerate
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Scenes assembled
    pub scenes: usize,
    /// Objects constructed across all scenes
    pub objects: usize,
    /// `UnknownObjectType` errors for the objects that were left out
    pub skipped: Vec<LudiError>,
}

/// Which tier a file belongs to; picks the parse error variant
#[derive(Debug, Clone, Copy)]
enum Tier {
    Game,
    Scene,
    Object,
}

impl Tier {
    fn malformed(self, path: &Path, source: serde_json::Error) -> LudiError {
        let path = path.to_path_buf();
        match self {
            Self::Game => LudiError::MalformedGameFile { path, source },
            Self::Scene => LudiError::MalformedSceneFile { path, source },
            Self::Object => LudiError::MalformedObjectFile { path, source },
        }
    }
}

/// Configurable game loader
#[derive(Debug, Clone, Default)]
pub struct Loader {
    root: Option<PathBuf>,
    cancel: Option<CancelToken>,
}

impl Loader {
    /// Loader resolving relative paths against the working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths (including the game file path) against `root`
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Abort the load when `token` is cancelled
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Load a game, its scenes and their game objects
    ///
    /// # Errors
    ///
    /// See [`Loader::load_game_with_report`].
    pub fn load_game(&self, path: impl AsRef<Path>) -> Result<Game> {
        self.load_game_with_report(path).map(|(game, _)| game)
    }

    /// Load a game and report the objects that were skipped
    ///
    /// # Errors
    ///
    /// - `NotFound` if the game file (or any file it references) is missing
    /// - `InvalidExtension` if the game file does not end in `.ludi.json`
    /// - `MalformedGameFile` / `MalformedSceneFile` / `MalformedObjectFile`
    ///   if a file cannot be parsed
    /// - `EmptyGame` if no scenes are listed
    /// - `Cancelled` if the cancel token fired
    pub fn load_game_with_report(&self, path: impl AsRef<Path>) -> Result<(Game, LoadReport)> {
        let path = self.resolve(path.as_ref());

        if !path.is_file() {
            return Err(LudiError::NotFound { path });
        }
        if !has_suffix(&path, GAME_SUFFIX) {
            return Err(LudiError::InvalidExtension {
                path,
                expected: GAME_SUFFIX,
            });
        }

        log::info!("Loading game {}", path.display());
        let game_file: GameFile = self.read_tier(&path, Tier::Game)?;

        let mut report = LoadReport::default();
        let mut scenes = Vec::with_capacity(game_file.scenes.all_scenes.len());
        for scene_path in &game_file.scenes.all_scenes {
            let scene = self.load_scene_inner(scene_path, &mut report)?;
            scenes.push(scene);
        }

        if scenes.is_empty() {
            return Err(LudiError::EmptyGame { path });
        }

        let name = game_file
            .name
            .unwrap_or_else(|| stem_without(&path, GAME_SUFFIX));
        let mut game = Game::new(name);
        let mut first = None;
        for scene in scenes {
            let id = game.add_scene(scene)?;
            first.get_or_insert(id);
        }
        if let Some(first) = first {
            game.set_active_scene(first)?;
        }

        report.scenes = game.scene_count();
        log::info!(
            "Loaded game '{}': {} scene(s), {} object(s), {} skipped",
            game.name,
            report.scenes,
            report.objects,
            report.skipped.len()
        );
        Ok((game, report))
    }

    /// Load a single scene file and its objects
    ///
    /// # Errors
    ///
    /// Same structural errors as [`Loader::load_game_with_report`].
    pub fn load_scene(&self, path: impl AsRef<Path>) -> Result<Scene> {
        let mut report = LoadReport::default();
        self.load_scene_inner(path.as_ref(), &mut report)
    }

    /// Load a single game object file
    ///
    /// Returns `Ok(None)` for an unrecognized `type` tag. The object comes
    /// back with an empty behavior attached.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Io`, `MalformedObjectFile` or `Cancelled`.
    pub fn load_object(&self, path: impl AsRef<Path>) -> Result<Option<GameObject>> {
        match self.load_object_inner(path.as_ref()) {
            Ok(object) => Ok(Some(object)),
            Err(LudiError::UnknownObjectType { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn load_scene_inner(&self, path: &Path, report: &mut LoadReport) -> Result<Scene> {
        let path = self.resolve(path);
        log::debug!("Loading scene {}", path.display());

        let scene_file: SceneFile = self.read_tier(&path, Tier::Scene)?;
        let name = scene_file
            .name
            .unwrap_or_else(|| stem_without(&path, SCENE_SUFFIX));
        let mut scene = Scene::new(name);

        for object_path in &scene_file.gameobjects.all_gameobjects {
            match self.load_object_inner(object_path) {
                Ok(object) => {
                    scene.add(object)?;
                    report.objects += 1;
                }
                Err(e @ LudiError::UnknownObjectType { .. }) => {
                    log::warn!("Skipping game object: {e}");
                    report.skipped.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(scene)
    }

    fn load_object_inner(&self, path: &Path) -> Result<GameObject> {
        let path = self.resolve(path);
        let text = self.read(&path)?;

        let header: ObjectHeader = parse(&text, &path, Tier::Object)?;
        let object_type =
            ObjectType::from_tag(&header.tag).ok_or_else(|| LudiError::UnknownObjectType {
                path: path.clone(),
                tag: header.tag.clone(),
            })?;

        let mut object = match object_type {
            ObjectType::Plain => {
                let file: ObjectFile<PlainProperties> = parse(&text, &path, Tier::Object)?;
                GameObject::plain(file.name, file.properties.transform)
            }
            ObjectType::Rectangle => {
                let file: ObjectFile<RectangleProperties> = parse(&text, &path, Tier::Object)?;
                GameObject::rectangle(
                    file.name,
                    file.properties.transform,
                    file.properties.color,
                )
            }
        };
        object.attach_empty_behavior();

        log::debug!(
            "Loaded {} '{}' from {}",
            object_type,
            object.name,
            path.display()
        );
        Ok(object)
    }

    fn read_tier<T: DeserializeOwned>(&self, path: &Path, tier: Tier) -> Result<T> {
        let text = self.read(path)?;
        parse(&text, path, tier)
    }

    fn read(&self, path: &Path) -> Result<String> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            log::info!("Load cancelled before {}", path.display());
            return Err(LudiError::Cancelled {
                path: path.to_path_buf(),
            });
        }
        fs::read_to_string(path).map_err(|e| LudiError::from_io(path, e))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn parse<T: DeserializeOwned>(text: &str, path: &Path, tier: Tier) -> Result<T> {
    serde_json::from_str(text).map_err(|e| tier.malformed(path, e))
}

/// Load a game with the default loader
///
/// # Errors
///
/// See [`Loader::load_game_with_report`].
pub fn load_game(path: impl AsRef<Path>) -> Result<Game> {
    Loader::new().load_game(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::object::Color;
    use glam::Vec2;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, value: Value) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
        path
    }

    fn plain_object(dir: &TempDir, name: &str) -> PathBuf {
        write(
            dir,
            &format!("{name}.ludres.json"),
            json!({
                "type": "go",
                "name": name,
                "properties": { "transform": [1, 2, 0, 0, 1, 1] }
            }),
        )
    }

    fn rect_object(dir: &TempDir, name: &str) -> PathBuf {
        write(
            dir,
            &format!("{name}.ludres.json"),
            json!({
                "type": "rgo",
                "name": name,
                "properties": { "transform": [100, 50, 0, 0, 40, 20], "color": [255, 0, 0] }
            }),
        )
    }

    fn scene(dir: &TempDir, name: &str, objects: &[PathBuf]) -> PathBuf {
        write(
            dir,
            &format!("{name}.ludsc.json"),
            json!({ "gameobjects": { "all_gameobjects": objects } }),
        )
    }

    fn game(dir: &TempDir, name: &str, scenes: &[PathBuf]) -> PathBuf {
        write(
            dir,
            &format!("{name}.ludi.json"),
            json!({ "name": name, "version": 3, "scenes": { "all_scenes": scenes } }),
        )
    }

    #[test]
    fn test_two_scene_scenario() {
        let dir = TempDir::new().unwrap();
        let player = plain_object(&dir, "player");
        let panel = rect_object(&dir, "panel");
        let ghost = write(
            &dir,
            "ghost.ludres.json",
            json!({ "type": "sprite", "name": "ghost", "properties": {} }),
        );
        let a = scene(&dir, "a", &[player, panel]);
        let b = scene(&dir, "b", &[ghost]);
        let path = game(&dir, "mygame", &[a, b]);

        let (game, report) = Loader::new().load_game_with_report(&path).unwrap();

        assert_eq!(game.name, "mygame");
        assert_eq!(game.scene_count(), 2);
        let active = game.active_scene().unwrap();
        assert_eq!(active.id(), game.scenes()[0].id());
        assert_eq!(active.name, "a");
        assert_eq!(game.scenes()[0].len(), 2);
        assert_eq!(game.scenes()[1].len(), 0);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].kind(), ErrorKind::UnknownObjectType);
        assert_eq!(report.objects, 2);
    }

    #[test]
    fn test_objects_are_typed_and_get_empty_behavior() {
        let dir = TempDir::new().unwrap();
        let panel = rect_object(&dir, "panel");
        let player = plain_object(&dir, "player");
        let s = scene(&dir, "main", &[panel, player]);
        let path = game(&dir, "g", &[s]);

        let game = load_game(&path).unwrap();
        let objects = game.scenes()[0].objects();

        assert_eq!(objects[0].name, "panel");
        assert_eq!(objects[0].object_type(), ObjectType::Rectangle);
        let shape = objects[0].as_rectangle().unwrap();
        assert_eq!(shape.color, Color::RED);
        assert_eq!(shape.rect().center(), Vec2::new(100.0, 50.0));

        assert_eq!(objects[1].object_type(), ObjectType::Plain);
        for object in objects {
            let behavior = object.behavior().unwrap();
            assert_eq!(behavior.owner(), object.id());
            assert!(!behavior.is_linked());
        }
    }

    #[test]
    fn test_missing_game_file() {
        let dir = TempDir::new().unwrap();
        let err = load_game(dir.path().join("absent.ludi.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_wrong_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "game.json", json!({ "scenes": { "all_scenes": [] } }));
        let err = load_game(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidExtension);
    }

    #[test]
    fn test_missing_file_wins_over_wrong_extension() {
        let dir = TempDir::new().unwrap();
        let err = load_game(dir.path().join("absent.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_malformed_game_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.ludi.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_game(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedGameFile);

        let path = write(&dir, "noscenes.ludi.json", json!({ "name": "x" }));
        let err = load_game(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedGameFile);
    }

    #[test]
    fn test_malformed_scene_aborts_load() {
        let dir = TempDir::new().unwrap();
        let good = scene(&dir, "good", &[plain_object(&dir, "p")]);
        let bad = write(&dir, "bad.ludsc.json", json!({ "objects": [] }));
        let path = game(&dir, "g", &[good, bad]);

        let err = load_game(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedSceneFile);
    }

    #[test]
    fn test_malformed_object_aborts_load() {
        let dir = TempDir::new().unwrap();
        let bad = write(
            &dir,
            "bad.ludres.json",
            json!({ "type": "rgo", "name": "no-color", "properties": { "transform": [0, 0, 0, 0, 1, 1] } }),
        );
        let s = scene(&dir, "main", &[bad]);
        let path = game(&dir, "g", &[s]);

        let err = load_game(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedObjectFile);
    }

    #[test]
    fn test_missing_scene_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = game(&dir, "g", &[dir.path().join("ghost.ludsc.json")]);

        let err = load_game(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("ghost.ludsc.json"));
    }

    #[test]
    fn test_empty_game() {
        let dir = TempDir::new().unwrap();
        let path = game(&dir, "empty", &[]);
        let err = load_game(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyGame);
    }

    #[test]
    fn test_scene_count_matches_files_and_first_is_active() {
        let dir = TempDir::new().unwrap();
        let scenes: Vec<PathBuf> = (0..4)
            .map(|i| scene(&dir, &format!("s{i}"), &[]))
            .collect();
        let path = game(&dir, "g", &scenes);

        let game = load_game(&path).unwrap();
        assert_eq!(game.scene_count(), 4);
        assert_eq!(game.active_scene().unwrap().name, "s0");
    }

    #[test]
    fn test_relative_paths_resolve_against_root() {
        let dir = TempDir::new().unwrap();
        plain_object(&dir, "p");
        write(
            &dir,
            "main.ludsc.json",
            json!({ "gameobjects": { "all_gameobjects": ["p.ludres.json"] } }),
        );
        write(
            &dir,
            "rel.ludi.json",
            json!({ "scenes": { "all_scenes": ["main.ludsc.json"] } }),
        );

        let game = Loader::new()
            .with_root(dir.path())
            .load_game("rel.ludi.json")
            .unwrap();
        assert_eq!(game.name, "rel");
        assert_eq!(game.scenes()[0].len(), 1);
    }

    #[test]
    fn test_cancelled_load() {
        let dir = TempDir::new().unwrap();
        let s = scene(&dir, "main", &[]);
        let path = game(&dir, "g", &[s]);

        let token = CancelToken::new();
        token.cancel();
        let err = Loader::new()
            .with_cancel_token(token)
            .load_game(&path)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_load_object_unknown_type_is_none() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "odd.ludres.json",
            json!({ "type": "circle", "name": "odd" }),
        );
        assert!(Loader::new().load_object(&path).unwrap().is_none());
    }

    #[test]
    fn test_each_load_rereads_files() {
        let dir = TempDir::new().unwrap();
        let p = plain_object(&dir, "p");
        let s = scene(&dir, "main", &[p]);
        let path = game(&dir, "g", &[s]);

        let first = load_game(&path).unwrap();
        write(
            &dir,
            "p.ludres.json",
            json!({ "type": "go", "name": "renamed", "properties": { "transform": [0, 0, 0, 0, 1, 1] } }),
        );
        let second = load_game(&path).unwrap();

        assert_eq!(first.scenes()[0].objects()[0].name, "p");
        assert_eq!(second.scenes()[0].objects()[0].name, "renamed");
    }

    #[test]
    fn test_bundled_sample_game_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("thagames/mygame.ludi.json");
        let game = Loader::new()
            .with_root(env!("CARGO_MANIFEST_DIR"))
            .load_game(path)
            .unwrap();

        assert_eq!(game.name, "My Game");
        assert_eq!(game.scene_count(), 2);
        let editor = game.active_scene().unwrap();
        assert_eq!(editor.len(), 3);
        assert_eq!(editor.objects()[2].object_type(), ObjectType::Plain);
        assert_eq!(
            editor.objects()[1].as_rectangle().unwrap().color,
            Color::from_rgba8(0x2a, 0x2d, 0x34, 255)
        );
    }
}

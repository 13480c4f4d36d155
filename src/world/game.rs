//! Games: ordered scenes with one active scene

use crate::core::id::define_id;
use crate::core::{FrameContext, LudiError, Result};

use super::{Scene, SceneId, StepReport};

define_id!(
    /// Stable handle to a game, unique within the process
    GameId,
    "game"
);

/// A playable game made of scenes
#[derive(Debug)]
pub struct Game {
    id: GameId,
    /// Game title
    pub name: String,
    scenes: Vec<Scene>,
    active_scene: Option<SceneId>,
}

impl Game {
    /// Create a game with no scenes
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GameId::next(),
            name: name.into(),
            scenes: Vec::new(),
            active_scene: None,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    /// Append a scene
    ///
    /// # Errors
    ///
    /// `DuplicateMembership` if a scene with the same id is already here.
    pub fn add_scene(&mut self, scene: Scene) -> Result<SceneId> {
        let id = scene.id();
        if self.contains_scene(id) {
            log::warn!("{} is already in game '{}'", id, self.name);
            return Err(LudiError::DuplicateMembership {
                what: "scene",
                id: id.get(),
            });
        }
        self.scenes.push(scene);
        Ok(id)
    }

    /// Detach a scene and hand it back
    ///
    /// Removing the active scene leaves the game with no active scene.
    ///
    /// # Errors
    ///
    /// `AbsentMembership` if the scene is not part of this game.
    pub fn remove_scene(&mut self, id: SceneId) -> Result<Scene> {
        let Some(index) = self.index_of(id) else {
            return Err(self.absent(id));
        };
        if self.active_scene == Some(id) {
            log::debug!("Removed the active scene of game '{}'", self.name);
            self.active_scene = None;
        }
        Ok(self.scenes.remove(index))
    }

    /// Make a member scene the one stepped by `run`
    ///
    /// # Errors
    ///
    /// `AbsentMembership` if the scene is not part of this game; the active
    /// scene is left unchanged.
    pub fn set_active_scene(&mut self, id: SceneId) -> Result<()> {
        if !self.contains_scene(id) {
            return Err(self.absent(id));
        }
        self.active_scene = Some(id);
        Ok(())
    }

    /// Step the active scene once
    ///
    /// # Errors
    ///
    /// `NoActiveScene` if no scene has been made active.
    pub fn run(&mut self, ctx: &mut FrameContext<'_>) -> Result<StepReport> {
        let scene = self.active_scene_mut().ok_or(LudiError::NoActiveScene)?;
        Ok(scene.step(ctx))
    }

    pub fn active_scene_id(&self) -> Option<SceneId> {
        self.active_scene
    }

    pub fn active_scene(&self) -> Option<&Scene> {
        self.active_scene.and_then(|id| self.scene(id))
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        let id = self.active_scene?;
        self.scene_mut(id)
    }

    #[must_use]
    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id() == id)
    }

    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id() == id)
    }

    /// Scenes in file order
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> impl Iterator<Item = &mut Scene> {
        self.scenes.iter_mut()
    }

    #[must_use]
    pub fn contains_scene(&self, id: SceneId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    fn index_of(&self, id: SceneId) -> Option<usize> {
        self.scenes.iter().position(|s| s.id() == id)
    }

    fn absent(&self, id: SceneId) -> LudiError {
        log::warn!("{} is not linked to game '{}'", id, self.name);
        LudiError::AbsentMembership {
            what: "scene",
            id: id.get(),
            owner: "game",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::object::{GameObject, Transform};
    use crate::render::FrameBuffer;

    #[test]
    fn test_run_without_active_scene() {
        let mut game = Game::new("empty");
        let mut fb = FrameBuffer::new(1, 1);
        let mut ctx = FrameContext::new(&mut fb, 0.0, 1);

        let err = game.run(&mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoActiveScene);
    }

    #[test]
    fn test_set_active_scene_rejects_foreign_scene() {
        let mut game = Game::new("g");
        let foreign = Scene::new("elsewhere");

        // Stays unset
        let err = game.set_active_scene(foreign.id()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AbsentMembership);
        assert_eq!(game.active_scene_id(), None);

        // Stays on the previous scene
        let home = game.add_scene(Scene::new("home")).unwrap();
        game.set_active_scene(home).unwrap();
        assert!(game.set_active_scene(foreign.id()).is_err());
        assert_eq!(game.active_scene_id(), Some(home));
    }

    #[test]
    fn test_run_steps_only_the_active_scene() {
        let mut game = Game::new("g");
        let mut first = Scene::new("first");
        let mut second = Scene::new("second");
        let a = first
            .add(GameObject::plain("a", Transform::default()))
            .unwrap();
        let b = second
            .add(GameObject::plain("b", Transform::default()))
            .unwrap();
        first.link_behavior(a, |_, _| Ok(())).unwrap();
        second.link_behavior(b, |_, _| Ok(())).unwrap();

        game.add_scene(first).unwrap();
        let second = game.add_scene(second).unwrap();
        game.set_active_scene(second).unwrap();

        let mut fb = FrameBuffer::new(1, 1);
        let mut ctx = FrameContext::new(&mut fb, 0.0, 1);
        let report = game.run(&mut ctx).unwrap();
        assert_eq!(report.invoked, 1);
        assert_eq!(game.active_scene().unwrap().name, "second");
    }

    #[test]
    fn test_remove_active_scene_clears_active() {
        let mut game = Game::new("g");
        let id = game.add_scene(Scene::new("only")).unwrap();
        game.set_active_scene(id).unwrap();

        let scene = game.remove_scene(id).unwrap();
        assert_eq!(scene.name, "only");
        assert_eq!(game.active_scene_id(), None);
        assert_eq!(
            game.remove_scene(id).unwrap_err().kind(),
            ErrorKind::AbsentMembership
        );
    }

    #[test]
    fn test_add_duplicate_scene_id_leaves_game_unchanged() {
        let mut game = Game::new("g");
        let id = game.add_scene(Scene::new("original")).unwrap();

        let err = game
            .add_scene(Scene::new("impostor").with_id(id))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateMembership);
        assert_eq!(game.scene_count(), 1);
        assert_eq!(game.scene(id).unwrap().name, "original");
    }
}

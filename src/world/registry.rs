//! Registry of loaded games
//!
//! Owns every game the process has loaded and remembers which one is
//! active. Pass it by reference to whatever needs to enumerate or select
//! games.

use crate::core::{LudiError, Result};

use super::{Game, GameId};

/// Loaded games plus the one currently selected
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: Vec<Game>,
    active: Option<GameId>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a game; the first game registered becomes active
    pub fn register(&mut self, game: Game) -> GameId {
        let id = game.id();
        log::info!("Registered game '{}' ({})", game.name, id);
        self.games.push(game);
        if self.active.is_none() {
            self.active = Some(id);
        }
        id
    }

    /// Detach a game; removing the active game clears the selection
    ///
    /// # Errors
    ///
    /// `AbsentMembership` if the game is not registered.
    pub fn remove(&mut self, id: GameId) -> Result<Game> {
        let index = self.index_of(id).ok_or_else(|| Self::absent(id))?;
        if self.active == Some(id) {
            self.active = None;
        }
        Ok(self.games.remove(index))
    }

    /// Select the game the run loop drives
    ///
    /// # Errors
    ///
    /// `AbsentMembership` if the game is not registered; the selection is
    /// left unchanged.
    pub fn set_active(&mut self, id: GameId) -> Result<()> {
        if self.index_of(id).is_none() {
            return Err(Self::absent(id));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn active_id(&self) -> Option<GameId> {
        self.active
    }

    pub fn active(&self) -> Option<&Game> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Game> {
        let id = self.active?;
        self.get_mut(id)
    }

    pub fn get(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id() == id)
    }

    pub fn get_mut(&mut self, id: GameId) -> Option<&mut Game> {
        self.games.iter_mut().find(|g| g.id() == id)
    }

    /// First game with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.name == name)
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn index_of(&self, id: GameId) -> Option<usize> {
        self.games.iter().position(|g| g.id() == id)
    }

    fn absent(id: GameId) -> LudiError {
        log::warn!("{} is not registered", id);
        LudiError::AbsentMembership {
            what: "game",
            id: id.get(),
            owner: "registry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    #[test]
    fn test_first_registered_game_is_active() {
        let mut registry = GameRegistry::new();
        let first = registry.register(Game::new("first"));
        let second = registry.register(Game::new("second"));

        assert_eq!(registry.active_id(), Some(first));
        registry.set_active(second).unwrap();
        assert_eq!(registry.active().unwrap().name, "second");
        assert_eq!(registry.find_by_name("first").unwrap().id(), first);
    }

    #[test]
    fn test_set_active_unknown_game() {
        let mut registry = GameRegistry::new();
        let id = registry.register(Game::new("only"));
        let stranger = Game::new("stranger");

        let err = registry.set_active(stranger.id()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AbsentMembership);
        assert_eq!(registry.active_id(), Some(id));
    }

    #[test]
    fn test_remove_active_game() {
        let mut registry = GameRegistry::new();
        let id = registry.register(Game::new("only"));

        let game = registry.remove(id).unwrap();
        assert_eq!(game.name, "only");
        assert!(registry.active().is_none());
        assert!(registry.is_empty());
    }
}

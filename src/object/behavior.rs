//! Per-object behaviors ("scripts")
//!
//! A [`Behavior`] points back at its owner through an [`ObjectId`] handle and
//! holds at most one callable. The owner is never stored by reference, so a
//! game object owns its behavior and nothing owns the game object twice.

use std::fmt;

use crate::core::FrameContext;

use super::{GameObject, ObjectId};

/// Callable run once per frame with the owning object
pub type BehaviorFn = Box<dyn FnMut(&mut GameObject, &mut FrameContext<'_>) -> anyhow::Result<()>>;

/// A behavior slot attached to one game object
pub struct Behavior {
    owner: ObjectId,
    function: Option<BehaviorFn>,
}

impl Behavior {
    /// Create an empty behavior for `owner`
    pub fn new(owner: ObjectId) -> Self {
        Self {
            owner,
            function: None,
        }
    }

    /// The object this behavior belongs to
    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    /// Replace the linked callable
    pub fn link<F>(&mut self, function: F)
    where
        F: FnMut(&mut GameObject, &mut FrameContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.function = Some(Box::new(function));
    }

    pub fn is_linked(&self) -> bool {
        self.function.is_some()
    }

    /// Run the callable; an empty behavior does nothing
    pub(crate) fn invoke(
        &mut self,
        object: &mut GameObject,
        ctx: &mut FrameContext<'_>,
    ) -> anyhow::Result<()> {
        match self.function.as_mut() {
            Some(function) => function(object, ctx),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("owner", &self.owner)
            .field("linked", &self.is_linked())
            .finish()
    }
}

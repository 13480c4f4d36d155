//! Scenes: ordered collections of game objects

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::core::id::define_id;
use crate::core::{FrameContext, LudiError, Result};
use crate::object::{GameObject, ObjectId};

define_id!(
    /// Stable handle to a scene, unique within the process
    SceneId,
    "scene"
);

/// Outcome of one pass over a scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Objects whose behavior was invoked
    pub invoked: usize,
    /// Invoked behaviors that returned an error
    pub failed: usize,
    /// Objects without a behavior
    pub skipped: usize,
}

impl std::ops::AddAssign for StepReport {
    fn add_assign(&mut self, rhs: Self) {
        self.invoked += rhs.invoked;
        self.failed += rhs.failed;
        self.skipped += rhs.skipped;
    }
}

/// An ordered set of game objects stepped once per frame
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    /// Scene name, usually the scene file's stem
    pub name: String,
    objects: Vec<GameObject>,
}

impl Scene {
    /// Create a new empty scene
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SceneId::next(),
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Append a game object
    ///
    /// # Errors
    ///
    /// `DuplicateMembership` if an object with the same id is already here;
    /// the scene is left unchanged.
    pub fn add(&mut self, object: GameObject) -> Result<ObjectId> {
        let id = object.id();
        if self.contains(id) {
            log::warn!("{} is already in scene '{}'", id, self.name);
            return Err(LudiError::DuplicateMembership {
                what: "game object",
                id: id.get(),
            });
        }
        self.objects.push(object);
        Ok(id)
    }

    /// Detach a game object and hand it back
    ///
    /// # Errors
    ///
    /// `AbsentMembership` if the object belongs to a different scene.
    pub fn remove(&mut self, id: ObjectId) -> Result<GameObject> {
        match self.index_of(id) {
            Some(index) => Ok(self.objects.remove(index)),
            None => Err(self.absent(id)),
        }
    }

    /// Link a callable to a member object's behavior
    ///
    /// An empty behavior is attached first if the object has none.
    ///
    /// # Errors
    ///
    /// `AbsentMembership` if the object belongs to a different scene.
    pub fn link_behavior<F>(&mut self, id: ObjectId, function: F) -> Result<()>
    where
        F: FnMut(&mut GameObject, &mut FrameContext<'_>) -> anyhow::Result<()> + 'static,
    {
        let Some(index) = self.index_of(id) else {
            return Err(self.absent(id));
        };
        let object = &mut self.objects[index];
        if !object.has_behavior() {
            object.attach_empty_behavior();
        }
        if let Some(behavior) = object.behavior_mut() {
            behavior.link(function);
        }
        Ok(())
    }

    /// Run every attached behavior once, in insertion order
    ///
    /// A failing behavior is logged and counted; the remaining objects still
    /// run. A behavior that panics is counted as failed and stays detached
    /// from its object afterwards.
    pub fn step(&mut self, ctx: &mut FrameContext<'_>) -> StepReport {
        let mut report = StepReport::default();

        for object in &mut self.objects {
            if !object.has_behavior() {
                report.skipped += 1;
                continue;
            }
            report.invoked += 1;

            let id = object.id();
            match panic::catch_unwind(AssertUnwindSafe(|| object.run_behavior(ctx))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    report.failed += 1;
                    log::warn!("Scene '{}': {}", self.name, e);
                }
                Err(payload) => {
                    report.failed += 1;
                    log::error!(
                        "Scene '{}': behavior of {} panicked and was detached: {}",
                        self.name,
                        id,
                        panic_message(payload.as_ref())
                    );
                }
            }
        }

        report
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// Objects in step order
    #[must_use]
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.objects.iter_mut()
    }

    /// Draw every rectangle object at its current bounds
    pub fn draw(&self, canvas: &mut dyn crate::render::Canvas) {
        for object in &self.objects {
            object.draw(canvas);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }

    fn absent(&self, id: ObjectId) -> LudiError {
        log::warn!("{} belongs to a different scene than '{}'", id, self.name);
        LudiError::AbsentMembership {
            what: "game object",
            id: id.get(),
            owner: "scene",
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
impl Scene {
    /// Reuse another scene's id
    pub(crate) fn with_id(mut self, id: SceneId) -> Self {
        self.id = id;
        self
    }
}

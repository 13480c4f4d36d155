//! Game objects and their closed set of variants

use std::fmt;

use crate::core::id::define_id;
use crate::core::{FrameContext, LudiError, Result};
use crate::render::{Canvas, Rect};

use super::{Behavior, Color, Transform};

define_id!(
    /// Stable handle to a game object, unique within the process
    ObjectId,
    "object"
);

/// Type tags accepted in resource files: `(short code, canonical name)`
pub const OBJECT_TYPES: [(&str, &str); 2] =
    [("go", "GameObject"), ("rgo", "RectangleGameObject")];

/// The closed set of object types a resource file may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Transform only
    Plain,
    /// Transform plus a coloured rectangle
    Rectangle,
}

impl ObjectType {
    /// Resolve a `type` tag, accepting either the short code or canonical name
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let index = OBJECT_TYPES
            .iter()
            .position(|(code, name)| *code == tag || *name == tag)?;
        Some(match index {
            0 => Self::Plain,
            _ => Self::Rectangle,
        })
    }

    /// Short code written to resource files
    #[must_use]
    pub const fn code(self) -> &'static str {
        OBJECT_TYPES[self.index()].0
    }

    /// Canonical type name
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        OBJECT_TYPES[self.index()].1
    }

    const fn index(self) -> usize {
        match self {
            Self::Plain => 0,
            Self::Rectangle => 1,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Visual data of a rectangle object
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    /// Fill colour
    pub color: Color,
    /// Bounds derived from the transform at the last `update_rect`
    rect: Rect,
}

impl RectangleShape {
    pub fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// Variant-specific data of a game object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Plain,
    Rectangle(RectangleShape),
}

/// An entity in a scene
#[derive(Debug)]
pub struct GameObject {
    id: ObjectId,
    /// Display name from the resource file
    pub name: String,
    /// Position, rotation and scale
    pub transform: Transform,
    /// Variant data
    pub kind: ObjectKind,
    behavior: Option<Behavior>,
}

impl GameObject {
    /// Create a plain object
    #[must_use]
    pub fn plain(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            transform,
            kind: ObjectKind::Plain,
            behavior: None,
        }
    }

    /// Create a rectangle object whose bounds start in sync with `transform`
    #[must_use]
    pub fn rectangle(name: impl Into<String>, transform: Transform, color: Color) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            transform,
            kind: ObjectKind::Rectangle(RectangleShape {
                color,
                rect: Self::rect_for(&transform),
            }),
            behavior: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn object_type(&self) -> ObjectType {
        match self.kind {
            ObjectKind::Plain => ObjectType::Plain,
            ObjectKind::Rectangle(_) => ObjectType::Rectangle,
        }
    }

    /// Rectangle data, if this is a rectangle object
    pub fn as_rectangle(&self) -> Option<&RectangleShape> {
        match &self.kind {
            ObjectKind::Rectangle(shape) => Some(shape),
            ObjectKind::Plain => None,
        }
    }

    pub fn as_rectangle_mut(&mut self) -> Option<&mut RectangleShape> {
        match &mut self.kind {
            ObjectKind::Rectangle(shape) => Some(shape),
            ObjectKind::Plain => None,
        }
    }

    /// Current bounds of a rectangle object
    pub fn rect(&self) -> Option<&Rect> {
        self.as_rectangle().map(RectangleShape::rect)
    }

    /// Recompute rectangle bounds from the transform's position and scale
    ///
    /// Rotation is not applied. Does nothing for plain objects.
    pub fn update_rect(&mut self) {
        let rect = Self::rect_for(&self.transform);
        if let Some(shape) = self.as_rectangle_mut() {
            shape.rect = rect;
        }
    }

    fn rect_for(transform: &Transform) -> Rect {
        Rect::from_center(transform.position, transform.scale)
    }

    /// Fill the current bounds with the object's colour
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(shape) = self.as_rectangle() {
            canvas.fill_rect(&shape.rect, shape.color);
        }
    }

    pub fn behavior(&self) -> Option<&Behavior> {
        self.behavior.as_ref()
    }

    pub fn behavior_mut(&mut self) -> Option<&mut Behavior> {
        self.behavior.as_mut()
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    /// Attach an empty behavior, replacing any existing one
    pub fn attach_empty_behavior(&mut self) -> &mut Behavior {
        self.behavior.insert(Behavior::new(self.id))
    }

    /// Run the attached behavior with this object
    ///
    /// # Errors
    ///
    /// `MissingBehavior` if nothing is attached; `Behavior` if the callable
    /// fails.
    pub fn run_behavior(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        let mut behavior = self
            .behavior
            .take()
            .ok_or(LudiError::MissingBehavior { object: self.id })?;

        let result = behavior.invoke(self, ctx);

        // The callable may have installed a replacement; keep it if so.
        if self.behavior.is_none() {
            self.behavior = Some(behavior);
        }

        result.map_err(|e| LudiError::Behavior {
            object: self.id,
            message: format!("{e:#}"),
        })
    }
}

#[cfg(test)]
impl GameObject {
    /// Reuse another object's id
    pub(crate) fn with_id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }
}

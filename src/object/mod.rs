//! Game object model
//!
//! Transforms, colours, the [`GameObject`] sum type and per-object behaviors.

mod behavior;
mod color;
mod components;
mod gameobject;

pub use behavior::{Behavior, BehaviorFn};
pub use color::Color;
pub use components::{Transform, Vector};
pub use gameobject::{GameObject, OBJECT_TYPES, ObjectId, ObjectKind, ObjectType, RectangleShape};

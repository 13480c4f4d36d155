//! Value types carried by game objects

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, rotation and scale of a game object
///
/// Serialized as the flat record `[x, y, rot_x, rot_y, scal_x, scal_y]`.
/// The two rotation fields are kept as-is for file compatibility; nothing in
/// the renderer reads them yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 6]", into = "[f32; 6]")]
pub struct Transform {
    /// Position in screen space (x, y)
    pub position: Vec2,
    /// Rotation (rot_x, rot_y)
    pub rotation: Vec2,
    /// Scale (scal_x, scal_y), also the size of rectangle objects
    pub scale: Vec2,
}

impl Transform {
    /// Build from `[x, y, rot_x, rot_y, scal_x, scal_y]`
    #[must_use]
    pub const fn from_components(c: [f32; 6]) -> Self {
        Self {
            position: Vec2::new(c[0], c[1]),
            rotation: Vec2::new(c[2], c[3]),
            scale: Vec2::new(c[4], c[5]),
        }
    }

    /// Flatten back into `[x, y, rot_x, rot_y, scal_x, scal_y]`
    #[must_use]
    pub const fn to_components(&self) -> [f32; 6] {
        [
            self.position.x,
            self.position.y,
            self.rotation.x,
            self.rotation.y,
            self.scale.x,
            self.scale.y,
        ]
    }

    /// Translate by a delta
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl From<[f32; 6]> for Transform {
    fn from(c: [f32; 6]) -> Self {
        Self::from_components(c)
    }
}

impl From<Transform> for [f32; 6] {
    fn from(t: Transform) -> Self {
        t.to_components()
    }
}

/// A 2D vector with derived magnitude and direction
///
/// The normalized form is computed once when the vector is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    value: Vec2,
    normalized: Vec2,
}

impl Vector {
    /// Create a vector from its components
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        let value = Vec2::new(x, y);
        let normalized = if (value.length() - 1.0).abs() > f32::EPSILON {
            value.normalize_or_zero()
        } else {
            value
        };
        Self { value, normalized }
    }

    pub fn x(&self) -> f32 {
        self.value.x
    }

    pub fn y(&self) -> f32 {
        self.value.y
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f32 {
        self.value.length()
    }

    /// Angle from the positive x axis in radians, in `(-pi, pi]`
    pub fn direction(&self) -> f32 {
        self.value.y.atan2(self.value.x)
    }

    /// Unit-length copy, or zero for the zero vector
    pub fn normalized(&self) -> Vector {
        Self {
            value: self.normalized,
            normalized: self.normalized,
        }
    }

    pub fn as_vec2(&self) -> Vec2 {
        self.value
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_transform_from_json_record() {
        let t: Transform = serde_json::from_str("[10, 20, 0.5, 0, 40, 30]").unwrap();
        assert_eq!(t.position, Vec2::new(10.0, 20.0));
        assert_eq!(t.rotation, Vec2::new(0.5, 0.0));
        assert_eq!(t.scale, Vec2::new(40.0, 30.0));

        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "[10.0,20.0,0.5,0.0,40.0,30.0]");
    }

    #[test]
    fn test_transform_rejects_short_record() {
        assert!(serde_json::from_str::<Transform>("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_vector_magnitude_and_direction() {
        let v = Vector::new(3.0, 4.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-6);
        assert!((v.direction() - (4.0f32).atan2(3.0)).abs() < 1e-6);

        let n = v.normalized();
        assert!((n.x() - 0.6).abs() < 1e-6);
        assert!((n.y() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_vector_vertical_and_zero() {
        let up = Vector::new(0.0, 2.0);
        assert!((up.direction() - FRAC_PI_2).abs() < 1e-6);

        let zero = Vector::new(0.0, 0.0);
        assert_eq!(zero.magnitude(), 0.0);
        assert_eq!(zero.direction(), 0.0);
        assert_eq!(zero.normalized().as_vec2(), Vec2::ZERO);
    }

    #[test]
    fn test_unit_vector_normalizes_to_itself() {
        let v = Vector::new(1.0, 0.0);
        assert_eq!(v.normalized(), v);
    }
}

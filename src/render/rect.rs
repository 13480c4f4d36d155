//! Axis-aligned rectangle in screen space

use glam::Vec2;

/// A 2D rectangle described by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner (in pixels)
    pub position: Vec2,
    /// Size (width, height)
    pub size: Vec2,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Create a rectangle centered on a point
    #[must_use]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            position: center - size * 0.5,
            size,
        }
    }

    /// Center point
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Check if a point is inside the rectangle
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = self.bounds();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Get the bounds as (min, max)
    ///
    /// Negative sizes are normalized so `min <= max` always holds.
    #[must_use]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let far = self.position + self.size;
        (self.position.min(far), self.position.max(far))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);

        assert!(rect.contains(Vec2::new(50.0, 30.0)));
        assert!(!rect.contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center(Vec2::new(400.0, 300.0), Vec2::new(100.0, 50.0));

        assert!((rect.position.x - 350.0).abs() < 0.01);
        assert!((rect.position.y - 275.0).abs() < 0.01);
        assert_eq!(rect.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_negative_size_bounds() {
        let rect = Rect::new(10.0, 10.0, -4.0, 2.0);
        let (min, max) = rect.bounds();
        assert_eq!(min, Vec2::new(6.0, 10.0));
        assert_eq!(max, Vec2::new(10.0, 12.0));
    }
}

//! Math types used by UI layout and draw lists

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// RGBA color with components in `0.0..=1.0`
pub type Color = Vec4;

/// Axis-aligned rectangle in UI pixel space (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from its corners
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its top-left corner and size
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, max: min + size }
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Width in pixels
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height in pixels
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Whether the point lies inside (max edge exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Whether the two rectangles overlap by a non-zero area
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Same rectangle moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self { min: self.min + offset, max: self.max + offset }
    }

    /// Column `index` of `count` equal-width columns spanning this rectangle
    pub fn column(&self, index: usize, count: usize) -> Self {
        let count = count.max(1) as f32;
        let width = self.width() / count;
        let left = self.min.x + width * index as f32;
        Self::new(Vec2::new(left, self.min.y), Vec2::new(left + width, self.max.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_contains_excludes_max_edge() {
        let rect = Rect::from_min_size(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert!(rect.contains(Vec2::new(10.0, 29.9)));
        assert!(!rect.contains(Vec2::new(30.0, 15.0)));
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::from_min_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::from_min_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&b.translated(Vec2::new(-1.0, 0.0))));
    }

    #[test]
    fn test_columns_split_width_evenly() {
        let rect = Rect::from_min_size(Vec2::new(0.0, 20.0), Vec2::new(300.0, 100.0));
        let second = rect.column(1, 3);
        assert_relative_eq!(second.min.x, 100.0);
        assert_relative_eq!(second.max.x, 200.0);
        assert_relative_eq!(second.min.y, 20.0);
    }
}

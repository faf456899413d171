//! Core geometric types for connector routing

use serde::Deserialize;

/// A 2D point in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether two points coincide within `tolerance` on both axes
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

/// Width and height of a node
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Smallest width or height a node may have
    pub const MIN_DIMENSION: f64 = 10.0;

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions meet [`Size::MIN_DIMENSION`]
    pub fn is_valid(&self) -> bool {
        self.width >= Self::MIN_DIMENSION && self.height >= Self::MIN_DIMENSION
    }
}

/// An axis-aligned rectangle described by its center and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Center of the rectangle
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Shorthand for `Rect::new(Point::new(cx, cy), Size::new(width, height))`
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(cx, cy), Size::new(width, height))
    }

    pub fn half_width(&self) -> f64 {
        self.size.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.size.height / 2.0
    }

    /// Left edge x-coordinate
    pub fn left(&self) -> f64 {
        self.position.x - self.half_width()
    }

    /// Top edge y-coordinate
    pub fn top(&self) -> f64 {
        self.position.y - self.half_height()
    }

    /// Top-left anchored bounding box of this rectangle
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.left(), self.top(), self.size.width, self.size.height)
    }

    /// Bounding box grown by `margin` on every side
    pub fn inflate(&self, margin: f64) -> BoundingBox {
        self.bounding_box().inflate(margin)
    }
}

/// Axis-aligned box anchored at its top-left corner, used as a routing obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grow the box by `margin` on every side
    pub fn inflate(&self, margin: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Check whether a point lies strictly inside the box
    pub fn contains_strict(&self, point: Point) -> bool {
        point.x > self.x && point.x < self.right() && point.y > self.y && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::centered(100.0, 100.0, 50.0, 40.0);
        assert_eq!(rect.left(), 75.0);
        assert_eq!(rect.top(), 80.0);
        assert_eq!(rect.bounding_box(), BoundingBox::new(75.0, 80.0, 50.0, 40.0));
    }

    #[test]
    fn test_rect_inflate() {
        let rect = Rect::centered(100.0, 100.0, 50.0, 40.0);
        let inflated = rect.inflate(2.0);
        assert_eq!(inflated, BoundingBox::new(73.0, 78.0, 54.0, 44.0));
    }

    #[test]
    fn test_size_minimum() {
        assert!(Size::new(10.0, 10.0).is_valid());
        assert!(!Size::new(9.9, 50.0).is_valid());
    }

    #[test]
    fn test_bounding_box_contains_strict() {
        let bounds = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bounds.contains_strict(Point::new(5.0, 5.0)));
        assert!(!bounds.contains_strict(Point::new(10.0, 5.0)), "border is outside");
        assert_eq!((bounds.right(), bounds.bottom()), (10.0, 10.0));
    }
}

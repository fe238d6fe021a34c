//! Integer pixel geometry: points and cell rectangles.

use crate::util::math::euclidean;

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        euclidean(self.x, self.y, other.x, other.y)
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle with exclusive right/bottom edges.
///
/// Bounds may lie outside the image; consumers clamp when sampling pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Area in pixels; zero for degenerate rectangles.
    pub fn area(&self) -> i64 {
        i64::from(self.width().max(0)) * i64::from(self.height().max(0))
    }

    /// The same rectangle moved by `(dx, dy)`.
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Overlapping area with `other`, zero when they only touch or are apart.
    pub fn overlap_area(&self, other: &Rect) -> i64 {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left >= right || top >= bottom {
            return 0;
        }
        i64::from(right - left) * i64::from(bottom - top)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn overlap_of_touching_rects_is_zero() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.overlap_area(&Rect::new(10, 0, 20, 10)), 0);
        assert_eq!(a.overlap_area(&Rect::new(5, 5, 15, 15)), 25);
        assert_eq!(a.overlap_area(&a), 100);
    }

    #[test]
    fn translated_keeps_size() {
        let a = Rect::new(-30, 5, 30, 65).translated(60, -60);
        assert_eq!(a, Rect::new(30, -55, 90, 5));
        assert_eq!((a.width(), a.height(), a.area()), (60, 60, 3600));
    }

    #[test]
    fn point_distance() {
        assert!((Point::new(1, 1).distance(Point::new(4, 5)) - 5.0).abs() < 1e-6);
        assert_eq!(Point::from((3, 4)).offset(30, -10), Point::new(33, -6));
    }
}

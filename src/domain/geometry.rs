// Geometry - translation between page and canvas-local coordinates
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point (or vector) in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes to `max(0, value)`.
    pub fn clamp_non_negative(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Bounding rectangle of the canvas element in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// A rect is measurable when every component is finite and it has an area.
    pub fn is_measurable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Convert page coordinates into canvas-local coordinates.
///
/// Returns `None` when the canvas has not been measured yet, so callers
/// treat the drop as invalid instead of working with NaN coordinates.
pub fn to_canvas_local(canvas: Option<&CanvasRect>, page: Point) -> Option<Point> {
    let rect = canvas.filter(|rect| rect.is_measurable())?;
    if !page.is_finite() {
        return None;
    }
    Some(page - rect.origin())
}

/// Vector from `start` to `current`.
pub fn displacement(start: Point, current: Point) -> Point {
    current - start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_canvas_local_subtracts_origin() {
        let rect = CanvasRect::new(120.0, 80.0, 800.0, 600.0);
        let local = to_canvas_local(Some(&rect), Point::new(160.0, 140.0));
        assert_eq!(local, Some(Point::new(40.0, 60.0)));
    }

    #[test]
    fn test_to_canvas_local_can_be_negative() {
        let rect = CanvasRect::new(120.0, 80.0, 800.0, 600.0);
        let local = to_canvas_local(Some(&rect), Point::new(100.0, 90.0));
        assert_eq!(local, Some(Point::new(-20.0, 10.0)));
    }

    #[test]
    fn test_missing_or_degenerate_rect_is_no_drop() {
        assert_eq!(to_canvas_local(None, Point::new(1.0, 1.0)), None);

        let collapsed = CanvasRect::new(0.0, 0.0, 0.0, 600.0);
        assert_eq!(to_canvas_local(Some(&collapsed), Point::new(1.0, 1.0)), None);

        let nan = CanvasRect::new(f64::NAN, 0.0, 800.0, 600.0);
        assert_eq!(to_canvas_local(Some(&nan), Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_displacement_and_clamp() {
        let delta = displacement(Point::new(100.0, 100.0), Point::new(220.0, 160.0));
        assert_eq!(delta, Point::new(120.0, 60.0));

        assert_eq!(
            Point::new(-5.0, 12.0).clamp_non_negative(),
            Point::new(0.0, 12.0)
        );
    }
}

//! Canvas-space geometry for glyph placement.
//!
//! All coordinates are relative to the canvas center, y pointing down (the
//! renderer translates by `(width / 2, height / 2)` before drawing).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Axis-aligned extent of this box after rotating it by `degrees` about its center.
    ///
    /// Right angles are special-cased so that `0`, `90`, `180` and `270` produce exact
    /// extents instead of carrying `cos(90°) ≈ 6e-8` noise into the collision test.
    pub fn rotated_extent(&self, degrees: f32) -> Size {
        let normalized = degrees.rem_euclid(360.0);
        if normalized == 0.0 || normalized == 180.0 {
            return *self;
        }
        if normalized == 90.0 || normalized == 270.0 {
            return Size::new(self.height, self.width);
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        Size::new(
            self.width * cos + self.height * sin,
            self.width * sin + self.height * cos,
        )
    }
}

/// Axis-aligned rectangle stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_min_max(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn centered(center: Point, size: Size) -> Self {
        let hw = size.width * 0.5;
        let hh = size.height * 0.5;
        Self {
            min: Point::new(center.x - hw, center.y - hh),
            max: Point::new(center.x + hw, center.y + hh),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Rect {
        Rect {
            min: Point::new(self.min.x - amount, self.min.y - amount),
            max: Point::new(self.max.x + amount, self.max.y + amount),
        }
    }

    /// Returns true if the gap between the two rectangles is smaller than `padding`
    /// along both axes.
    ///
    /// Boxes separated by exactly `padding` on either axis do NOT collide. With a
    /// padding of zero, touching edges do not collide either.
    pub fn collides_with(&self, other: &Rect, padding: f32) -> bool {
        let gap_x = (other.min.x - self.max.x).max(self.min.x - other.max.x);
        let gap_y = (other.min.y - self.max.y).max(self.min.y - other.max.y);
        gap_x < padding && gap_y < padding
    }

    /// Returns true if `other` lies fully inside `self` (shared edges count as inside).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }
}

//! Canvas-space primitives.
//!
//! The canvas uses screen orientation: `x` grows to the right, `y` grows
//! downwards, and every rectangle is stored as top-left corner plus size.

use core::ops::{Add, Sub};

use crate::numeric::Real;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
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

/// Axis-aligned rectangle (top-left corner + size).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: Real,
    pub y: Real,
    pub width: Real,
    pub height: Real,
}

impl Rect {
    pub fn new(x: Real, y: Real, width: Real, height: Real) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanning two arbitrary corners (box selection).
    pub fn from_two_points(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self::new(min_x, min_y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> Real {
        self.x + self.width
    }

    pub fn bottom(&self) -> Real {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True when the rectangles share any point, touching edges included.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    pub fn translated(&self, dx: Real, dy: Real) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Smallest rectangle covering every input, `None` for an empty input.
    pub fn bounding<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        let mut min_x = Real::INFINITY;
        let mut min_y = Real::INFINITY;
        let mut max_x = Real::NEG_INFINITY;
        let mut max_y = Real::NEG_INFINITY;
        let mut has_items = false;

        for rect in rects {
            min_x = min_x.min(rect.x);
            min_y = min_y.min(rect.y);
            max_x = max_x.max(rect.right());
            max_y = max_y.max(rect.bottom());
            has_items = true;
        }

        if has_items {
            Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
        } else {
            None
        }
    }
}

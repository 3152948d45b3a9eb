//! Drawing-surface geometry primitives.
//!
//! Coordinates are expressed in surface units (typically millimeters),
//! with the origin at the lower-left corner of the sheet and Y growing
//! upward.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Reflect `control` through this point: `2*self - control`.
    ///
    /// Used for smooth-curve continuation, where the implicit first
    /// control point mirrors the previous curve's last control point
    /// about the current position.
    pub fn reflect(&self, control: Point) -> Point {
        Point::new(2.0 * self.x - control.x, 2.0 * self.y - control.y)
    }

    /// True when both coordinates are within `tolerance` of `other`.
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Bézier curve family, used to tag curve-continuation memory.
///
/// A smooth-continuation command only inherits a control point from a
/// previous curve of the same family; drawing anything else clears the
/// memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveFamily {
    /// Cubic Bézier (two control points).
    Cubic,
    /// Quadratic Bézier (one control point).
    Quadratic,
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

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn test_reflect() {
        let pivot = Point::new(10.0, 10.0);
        let control = Point::new(4.0, 7.0);
        assert_eq!(pivot.reflect(control), Point::new(16.0, 13.0));
    }

    #[test]
    fn test_reflect_through_origin_is_negation() {
        let control = Point::new(2.0, -3.0);
        assert_eq!(Point::ORIGIN.reflect(control), Point::new(-2.0, 3.0));
    }
}

/*
This code is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT
*/
use serde::Serialize;
use std::fmt;
use std::ops::Sub;

/// A 2-D point, with x and y fields.
#[derive(Default, Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

impl Point2D {
    /// Creates a new Point2D,
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    /// Returns the point with its axes exchanged.
    pub fn swapped(&self) -> Point2D {
        Point2D::new(self.y, self.x)
    }

    /// Cross product of (p1 - self) and (p2 - self). Positive when p2 lies to
    /// the left of the directed line self -> p1, zero when collinear.
    pub fn cross(&self, p1: &Point2D, p2: &Point2D) -> f64 {
        (p1.x - self.x) * (p2.y - self.y) - (p2.x - self.x) * (p1.y - self.y)
    }

    /// Checks whether the point lies on the closed segment a-b.
    pub fn is_on_segment(&self, a: &Point2D, b: &Point2D) -> bool {
        if a.cross(b, self) != 0f64 {
            return false;
        }
        self.x >= a.x.min(b.x)
            && self.x <= a.x.max(b.x)
            && self.y >= a.y.min(b.y)
            && self.y <= a.y.max(b.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    fn sub(self, rhs: Self) -> Point2D {
        Point2D {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

use serde::Serialize;
use std::fmt;

/// An axis-aligned 2-D extent, as stored in shapefile headers and in the
/// bodies of multi-point, polyline, and polygon records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> BoundingBox {
        let (x1, x2) = if min_x < max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        let (y1, y2) = if min_y < max_y {
            (min_y, max_y)
        } else {
            (max_y, min_y)
        };
        BoundingBox {
            min_x: x1,
            min_y: y1,
            max_x: x2,
            max_y: y2,
        }
    }

    pub fn get_height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn get_width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn overlaps(&self, other: BoundingBox) -> bool {
        !(self.max_y < other.min_y
            || self.max_x < other.min_x
            || self.min_y > other.max_y
            || self.min_x > other.max_x)
    }

    pub fn contains(&self, other: BoundingBox) -> bool {
        other.max_y <= self.max_y
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.min_x >= self.min_x
    }

    pub fn is_point_in_box(&self, x: f64, y: f64) -> bool {
        !(self.max_y < y || self.max_x < x || self.min_y > y || self.min_x > x)
    }

    /// Exchanges the x and y extents.
    pub fn swapped(&self) -> BoundingBox {
        BoundingBox {
            min_x: self.min_y,
            min_y: self.min_x,
            max_x: self.max_y,
            max_y: self.max_x,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "x: [{}, {}], y: [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

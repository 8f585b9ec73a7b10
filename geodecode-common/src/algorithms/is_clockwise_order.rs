use crate::structures::Point2D;
use serde::Serialize;

/// Rotational direction of a ring's vertex sequence, with y increasing
/// upward (the shapefile convention: exteriors clockwise, holes
/// counter-clockwise).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum RingOrientation {
    Clockwise,
    CounterClockwise,
}

/// Rings with fewer vertices than this are degenerate and never clockwise.
pub const MIN_RING_VERTICES: usize = 4;

/// Shoelace sum over consecutive vertices, wrapping last to first. The sum
/// is non-negative for clockwise rings and negative for counter-clockwise
/// ones. Its magnitude is twice the enclosed area.
pub fn clockwise_signed_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0f64;
    }
    let mut area = 0f64;
    let mut prev = &points[n - 1];
    for p in points {
        area += p.x * prev.y - prev.x * p.y;
        prev = p;
    }
    area
}

/// Checks whether a sequence of Point2D are in clockwise order.
pub fn is_clockwise_order(points: &[Point2D]) -> bool {
    if points.len() < MIN_RING_VERTICES {
        return false;
    }
    clockwise_signed_area(points) >= 0f64
}

pub fn ring_orientation(points: &[Point2D]) -> RingOrientation {
    if is_clockwise_order(points) {
        RingOrientation::Clockwise
    } else {
        RingOrientation::CounterClockwise
    }
}

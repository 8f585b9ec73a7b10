/*
This code is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT
*/

use crate::structures::Point2D;

/// Tests whether a point lies within a ring using the even-odd rule. A
/// horizontal ray is cast from `p` toward +x and crossings with the ring's
/// edges are counted. Points lying exactly on an edge or vertex are treated
/// as contained.
///
/// The ring may be open or closed (first vertex repeated at the end).
pub fn point_in_poly(p: &Point2D, ring: &[Point2D]) -> bool {
    let n = ring.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = &ring[j];
        let b = &ring[i];
        if p.is_on_segment(a, b) {
            return true;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Tests whether any vertex of `candidate` falls within `ring`.
pub fn any_point_in_poly(candidate: &[Point2D], ring: &[Point2D]) -> bool {
    candidate.iter().any(|p| point_in_poly(p, ring))
}

/*
This file is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT

Notes: Rebuilds polygon topology from the flat parts/points arrays of a
polygon record. Clockwise rings are exteriors, counter-clockwise rings are
holes, and each hole belongs to the first exterior that contains any of its
vertices.
*/
use super::geometry::part_ranges;
use geodecode_common::algorithms::{
    any_point_in_poly, clockwise_signed_area, point_in_poly, ring_orientation, RingOrientation,
    MIN_RING_VERTICES,
};
use geodecode_common::configs::DecoderConfigs;
use geodecode_common::error::{DecodeWarning, Result};
use geodecode_common::structures::Point2D;
use serde::Serialize;

/// An ordered sequence of vertices. The first and last vertices need not be
/// identical.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Ring {
    pub points: Vec<Point2D>,
}

impl Ring {
    pub fn new(points: Vec<Point2D>) -> Ring {
        Ring { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_degenerate(&self) -> bool {
        self.points.len() < MIN_RING_VERTICES
    }

    /// Non-negative for clockwise rings, negative for counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        clockwise_signed_area(&self.points)
    }

    pub fn orientation(&self) -> RingOrientation {
        ring_orientation(&self.points)
    }

    pub fn is_clockwise(&self) -> bool {
        self.orientation() == RingOrientation::Clockwise
    }

    pub fn contains_point(&self, p: &Point2D) -> bool {
        point_in_poly(p, &self.points)
    }

    /// Checks whether any vertex of `other` lies within this ring.
    pub fn contains_any_vertex_of(&self, other: &Ring) -> bool {
        any_point_in_poly(&other.points, &self.points)
    }
}

/// One exterior ring and the holes it encloses.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Polygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring) -> Polygon {
        Polygon {
            exterior,
            holes: vec![],
        }
    }

    pub fn num_rings(&self) -> usize {
        1 + self.holes.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopologyResult {
    pub polygons: Vec<Polygon>,
    pub warnings: Vec<DecodeWarning>,
}

/// Slices `points` into rings along `parts`. Empty parts are dropped.
pub fn split_rings(parts: &[u32], points: &[Point2D]) -> Vec<Ring> {
    part_ranges(parts, points.len())
        .into_iter()
        .filter(|r| !r.is_empty())
        .map(|r| Ring::new(points[r].to_vec()))
        .collect()
}

/// Assigns rings to polygons. Exteriors keep their input order; holes are
/// attached in input order to the first exterior containing any of their
/// vertices. Holes that fit no exterior become single-ring polygons after
/// the exteriors.
pub fn build_polygons(parts: &[u32], points: &[Point2D]) -> TopologyResult {
    // lenient configs never turn a warning into an error
    build_polygons_with_configs(parts, points, &DecoderConfigs::default()).unwrap_or_default()
}

/// As `build_polygons`, with warnings routed through `configs`. In strict
/// mode the first degenerate ring or orphan hole is an error.
pub fn build_polygons_with_configs(
    parts: &[u32],
    points: &[Point2D],
    configs: &DecoderConfigs,
) -> Result<TopologyResult> {
    let mut warnings = vec![];
    let mut polygons: Vec<Polygon> = vec![];
    // (ring index, ring) so orphan warnings can name the original part
    let mut holes: Vec<(usize, Ring)> = vec![];

    for (ring_index, ring) in split_rings(parts, points).into_iter().enumerate() {
        if ring.is_degenerate() {
            configs.report(
                DecodeWarning::DegenerateRing {
                    ring_index,
                    vertices: ring.len(),
                },
                &mut warnings,
            )?;
        }
        if ring.is_clockwise() {
            polygons.push(Polygon::new(ring));
        } else {
            holes.push((ring_index, ring));
        }
    }

    let num_exteriors = polygons.len();
    for (ring_index, hole) in holes {
        let parent = polygons[..num_exteriors]
            .iter()
            .position(|poly| poly.exterior.contains_any_vertex_of(&hole));
        match parent {
            Some(i) => polygons[i].holes.push(hole),
            None => {
                configs.report(DecodeWarning::OrphanHole { ring_index }, &mut warnings)?;
                polygons.push(Polygon::new(hole));
            }
        }
    }

    Ok(TopologyResult { polygons, warnings })
}

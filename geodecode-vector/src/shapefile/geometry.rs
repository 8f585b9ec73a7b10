/*
This file is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT
*/
use super::topology::{build_polygons, build_polygons_with_configs, TopologyResult};
use geodecode_common::configs::DecoderConfigs;
use geodecode_common::error::Result;
use geodecode_common::structures::{BoundingBox, Point2D};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// The fixed shapefile file code.
pub const FILE_CODE: i32 = 9994;
/// The header occupies the first 100 bytes (50 16-bit words).
pub const HEADER_LENGTH_BYTES: usize = 100;
pub const MIN_FILE_LENGTH_WORDS: i32 = 50;
/// Versions below this are suspicious but still decoded.
pub const MIN_VERSION: i32 = 1000;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ShapefileHeader {
    pub file_code: i32,        // BigEndian; value is 9994
    pub file_length: i32,      // BigEndian; in 16-bit words
    pub version: i32,          // LittleEndian
    pub shape_type: ShapeType, // LittleEndian
    pub x_min: f64,            // LittleEndian
    pub y_min: f64,            // LittleEndian
    pub x_max: f64,            // LittleEndian
    pub y_max: f64,            // LittleEndian
    pub z_min: f64,            // LittleEndian; 0 unless shapeType is z or measured
    pub z_max: f64,            // LittleEndian; 0 unless shapeType is z or measured
    pub m_min: f64,            // LittleEndian; 0 unless shapeType is measured
    pub m_max: f64,            // LittleEndian; 0 unless shapeType is measured
}

impl ShapefileHeader {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.x_min, self.x_max, self.y_min, self.y_max)
    }

    /// The declared file length converted from 16-bit words to bytes.
    pub fn file_length_bytes(&self) -> usize {
        self.file_length.max(0) as usize * 2
    }
}

impl fmt::Display for ShapefileHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = format!(
            "file_code: {}
file_length: {}
version: {}
shape_type: {}
x_min: {}
x_max: {}
y_min: {}
y_max: {}
z_min: {}
z_max: {}
m_min: {}
m_max: {}",
            self.file_code,
            self.file_length,
            self.version,
            self.shape_type,
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max,
            self.z_min,
            self.z_max,
            self.m_min,
            self.m_max
        );
        write!(f, "{}", s)
    }
}

/// A decoded shape. Z and M channels of the Z/M shape types are not kept;
/// those records decode to the variant of their base type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ShapeRecord {
    Null,
    Point {
        x: f64,
        y: f64,
    },
    PolyLine {
        bounding_box: BoundingBox,
        parts: Vec<u32>,
        points: Vec<Point2D>,
    },
    /// Same layout as `PolyLine`; see `polygons()` for ring topology.
    Polygon {
        bounding_box: BoundingBox,
        parts: Vec<u32>,
        points: Vec<Point2D>,
    },
    MultiPoint {
        bounding_box: BoundingBox,
        points: Vec<Point2D>,
    },
    /// Only the leading shape type tag of a multipatch body is decoded.
    MultiPatch {
        shape_type: ShapeType,
    },
}

impl ShapeRecord {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeRecord::Null => ShapeType::Null,
            ShapeRecord::Point { .. } => ShapeType::Point,
            ShapeRecord::PolyLine { .. } => ShapeType::PolyLine,
            ShapeRecord::Polygon { .. } => ShapeType::Polygon,
            ShapeRecord::MultiPoint { .. } => ShapeType::MultiPoint,
            ShapeRecord::MultiPatch { .. } => ShapeType::MultiPatch,
        }
    }

    pub fn num_parts(&self) -> usize {
        match self {
            ShapeRecord::PolyLine { parts, .. } | ShapeRecord::Polygon { parts, .. } => parts.len(),
            _ => 0,
        }
    }

    pub fn num_points(&self) -> usize {
        match self {
            ShapeRecord::Point { .. } => 1,
            ShapeRecord::PolyLine { points, .. }
            | ShapeRecord::Polygon { points, .. }
            | ShapeRecord::MultiPoint { points, .. } => points.len(),
            ShapeRecord::Null | ShapeRecord::MultiPatch { .. } => 0,
        }
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match self {
            ShapeRecord::Point { x, y } => Some(BoundingBox::new(*x, *x, *y, *y)),
            ShapeRecord::PolyLine { bounding_box, .. }
            | ShapeRecord::Polygon { bounding_box, .. }
            | ShapeRecord::MultiPoint { bounding_box, .. } => Some(*bounding_box),
            ShapeRecord::Null | ShapeRecord::MultiPatch { .. } => None,
        }
    }

    /// The point index range of each part. The last part extends to the end
    /// of the points array.
    pub fn part_ranges(&self) -> Vec<Range<usize>> {
        match self {
            ShapeRecord::PolyLine { parts, points, .. }
            | ShapeRecord::Polygon { parts, points, .. } => part_ranges(parts, points.len()),
            _ => vec![],
        }
    }

    /// Rebuilds exterior/hole topology. Returns `None` for non-polygon records.
    pub fn polygons(&self) -> Option<TopologyResult> {
        match self {
            ShapeRecord::Polygon { parts, points, .. } => Some(build_polygons(parts, points)),
            _ => None,
        }
    }

    /// As `polygons`, with topology warnings routed through `configs`.
    pub fn polygons_with_configs(&self, configs: &DecoderConfigs) -> Result<Option<TopologyResult>> {
        match self {
            ShapeRecord::Polygon { parts, points, .. } => {
                Ok(Some(build_polygons_with_configs(parts, points, configs)?))
            }
            _ => Ok(None),
        }
    }
}

/// Splits `num_points` into part ranges. Out-of-range or non-increasing
/// indices are clamped to produce empty ranges rather than panicking.
pub fn part_ranges(parts: &[u32], num_points: usize) -> Vec<Range<usize>> {
    let mut ret = Vec::with_capacity(parts.len());
    for (i, &start) in parts.iter().enumerate() {
        let start = (start as usize).min(num_points);
        let end = match parts.get(i + 1) {
            Some(&next) => (next as usize).min(num_points),
            None => num_points,
        };
        ret.push(start..end.max(start));
    }
    ret
}

#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ShapeType {
    Null = 0,
    Point = 1,
    PolyLine = 3,
    Polygon = 5,
    MultiPoint = 8,
    PointZ = 11,
    PolyLineZ = 13,
    PolygonZ = 15,
    MultiPointZ = 18,
    PointM = 21,
    PolyLineM = 23,
    PolygonM = 25,
    MultiPointM = 28,
    MultiPatch = 31,
}

impl ShapeType {
    pub fn from_int(value: i32) -> Option<ShapeType> {
        let st = match value {
            0 => ShapeType::Null,
            1 => ShapeType::Point,
            3 => ShapeType::PolyLine,
            5 => ShapeType::Polygon,
            8 => ShapeType::MultiPoint,
            11 => ShapeType::PointZ,
            13 => ShapeType::PolyLineZ,
            15 => ShapeType::PolygonZ,
            18 => ShapeType::MultiPointZ,
            21 => ShapeType::PointM,
            23 => ShapeType::PolyLineM,
            25 => ShapeType::PolygonM,
            28 => ShapeType::MultiPointM,
            31 => ShapeType::MultiPatch,
            _ => return None,
        };
        Some(st)
    }

    pub fn to_int(&self) -> i32 {
        *self as i32
    }

    pub fn base_shape_type(&self) -> ShapeType {
        match self {
            ShapeType::Null => ShapeType::Null,
            ShapeType::Point | ShapeType::PointZ | ShapeType::PointM => ShapeType::Point,
            ShapeType::PolyLine | ShapeType::PolyLineZ | ShapeType::PolyLineM => {
                ShapeType::PolyLine
            }
            ShapeType::Polygon | ShapeType::PolygonZ | ShapeType::PolygonM => ShapeType::Polygon,
            ShapeType::MultiPoint | ShapeType::MultiPointZ | ShapeType::MultiPointM => {
                ShapeType::MultiPoint
            }
            ShapeType::MultiPatch => ShapeType::MultiPatch,
        }
    }

    pub fn dimension(&self) -> ShapeTypeDimension {
        match self {
            ShapeType::Null
            | ShapeType::MultiPoint
            | ShapeType::Point
            | ShapeType::Polygon
            | ShapeType::PolyLine => ShapeTypeDimension::XY,
            ShapeType::MultiPointM
            | ShapeType::PointM
            | ShapeType::PolygonM
            | ShapeType::PolyLineM => ShapeTypeDimension::Measure,
            ShapeType::MultiPointZ
            | ShapeType::PointZ
            | ShapeType::PolygonZ
            | ShapeType::PolyLineZ
            | ShapeType::MultiPatch => ShapeTypeDimension::Z,
        }
    }
}

#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeTypeDimension {
    XY,
    Measure,
    Z,
}

impl Default for ShapeType {
    fn default() -> ShapeType {
        ShapeType::Null
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let printable = match *self {
            ShapeType::Null => "Null",
            ShapeType::Point => "Point",
            ShapeType::PolyLine => "PolyLine",
            ShapeType::Polygon => "Polygon",
            ShapeType::MultiPoint => "MultiPoint",
            ShapeType::PointZ => "PointZ",
            ShapeType::PolyLineZ => "PolyLineZ",
            ShapeType::PolygonZ => "PolygonZ",
            ShapeType::MultiPointZ => "MultiPointZ",
            ShapeType::PointM => "PointM",
            ShapeType::PolyLineM => "PolyLineM",
            ShapeType::PolygonM => "PolygonM",
            ShapeType::MultiPointM => "MultiPointM",
            ShapeType::MultiPatch => "MultiPatch",
        };
        write!(f, "{}", printable)
    }
}

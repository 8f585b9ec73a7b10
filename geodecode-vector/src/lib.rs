/*
This code is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT
*/

pub mod dbf;
pub mod shapefile;

// exports identifiers from sub-modules in the current module namespace
pub use crate::dbf::{AttributeTable, DbfHeader, DbfRecord, DbfVersion, FieldData, FieldDescriptor, FieldType};
pub use crate::shapefile::decoder::ShapefileDecode;
pub use crate::shapefile::geometry::*;
pub use crate::shapefile::topology::{
    build_polygons, build_polygons_with_configs, Polygon, Ring, TopologyResult,
};
pub use crate::shapefile::Shapefile;
pub use geodecode_common::structures::{BoundingBox, Point2D};

/*
This code is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT

Notes: Reads an ESRI Shapefile together with its sibling .dbf and .prj files.
*/

pub mod decoder;
pub mod geometry;
pub mod topology;

use self::geometry::*;
use self::topology::TopologyResult;
use crate::dbf::{self, AttributeTable, DbfRecord};
use geodecode_common::configs::DecoderConfigs;
use geodecode_common::error::{DecodeWarning, Result};
use log::{info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// A decoded Shapefile. Shapes come from the .shp file; attributes from the
/// .dbf file, when present; `projection` holds the raw WKT of the .prj file.
///
/// Example:
///
/// ```no_run
/// use geodecode_vector::Shapefile;
///
/// let input = Shapefile::read("rivers.shp")?;
/// for i in 0..input.num_records() {
///     if let Some(attrs) = input.get_attributes(i) {
///         println!("{:?} {:?}", input.get_record(i), attrs.get("NAME"));
///     }
/// }
/// # Ok::<(), geodecode_common::error::DecodeError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Shapefile {
    pub file_name: String,
    pub header: ShapefileHeader,
    pub records: Vec<ShapeRecord>,
    /// The record number each shape was stored under, parallel to `records`.
    pub record_numbers: Vec<i32>,
    pub attributes: Option<AttributeTable>,
    pub projection: String,
    /// Warnings from both decoders plus those raised while pairing them.
    pub warnings: Vec<DecodeWarning>,
}

impl Shapefile {
    pub fn read<P: AsRef<Path>>(file_name: P) -> Result<Shapefile> {
        Shapefile::read_with_configs(file_name, &DecoderConfigs::default())
    }

    pub fn read_with_configs<P: AsRef<Path>>(
        file_name: P,
        configs: &DecoderConfigs,
    ) -> Result<Shapefile> {
        let path = file_name.as_ref();
        let shp_bytes = fs::read(path)?;
        let dbf_bytes = read_optional(&path.with_extension("dbf"))?;
        let projection = match read_optional(&path.with_extension("prj"))? {
            Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            None => {
                warn!("Projection file not located.");
                String::new()
            }
        };

        // the two decodes share nothing
        let (shapes, attributes) = rayon::join(
            || decoder::decode_with_configs(&shp_bytes, configs),
            || match &dbf_bytes {
                Some(bytes) => dbf::decode_with_configs(bytes, configs).map(Some),
                None => Ok(None),
            },
        );
        let shapes = shapes?;
        let attributes = attributes?;

        let mut warnings = shapes.warnings;
        match &attributes {
            Some(table) => {
                warnings.extend(table.warnings.iter().cloned());
                if table.num_records() != shapes.records.len() {
                    configs.report(
                        DecodeWarning::RowCountMismatch {
                            shapes: shapes.records.len(),
                            attributes: table.num_records(),
                        },
                        &mut warnings,
                    )?;
                }
            }
            None => warn!("Attribute table not located."),
        }

        let sf = Shapefile {
            file_name: path.to_string_lossy().into_owned(),
            header: shapes.header,
            records: shapes.records,
            record_numbers: shapes.record_numbers,
            attributes,
            projection,
            warnings,
        };
        info!(
            "read {}: {} records, {} warnings",
            sf.get_short_filename(),
            sf.num_records(),
            sf.warnings.len()
        );
        Ok(sf)
    }

    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    pub fn get_total_num_parts(&self) -> usize {
        self.records.iter().map(|r| r.num_parts()).sum()
    }

    pub fn get_total_num_points(&self) -> usize {
        self.records.iter().map(|r| r.num_points()).sum()
    }

    /// Returns the file stem (e.g. `rivers` for `data/rivers.shp`).
    pub fn get_short_filename(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Returns the shape at a specified index, starting at zero.
    pub fn get_record(&self, index: usize) -> Option<&ShapeRecord> {
        self.records.get(index)
    }

    /// Returns the attribute row paired with the shape at `index`. Shapes are
    /// matched to rows by record number (record 1 is row 0). Records packing
    /// several shapes, or numbered outside the table, fall back to `index`.
    pub fn get_attributes(&self, index: usize) -> Option<&DbfRecord> {
        let table = self.attributes.as_ref()?;
        let row = self
            .record_numbers
            .get(index)
            .filter(|_| self.record_numbers.len() == table.num_records())
            .and_then(|&n| n.checked_sub(1))
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&row| row < table.num_records())
            .unwrap_or(index);
        table.get_record(row)
    }

    /// Rebuilds exterior/hole topology for a polygon record.
    pub fn polygons(&self, index: usize) -> Option<TopologyResult> {
        self.records.get(index).and_then(|r| r.polygons())
    }

    pub fn has_attributes(&self) -> bool {
        self.attributes.is_some()
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

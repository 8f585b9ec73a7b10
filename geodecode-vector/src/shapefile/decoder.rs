/*
This file is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT

Notes: Decodes the .shp geometry stream. The format uses mixed endianness:
the file code, file length, and every record header are big-endian while
the rest of the header and all record bodies are little-endian, so the
cursor's byte order is switched frequently.
*/
use super::geometry::*;
use geodecode_common::configs::DecoderConfigs;
use geodecode_common::error::{DecodeError, DecodeWarning, Result};
use geodecode_common::structures::{BoundingBox, Point2D};
use geodecode_common::utils::{ByteCursor, Endianness};
use log::{debug, info};

/// The output of one .shp decode.
#[derive(Clone, Debug, Default)]
pub struct ShapefileDecode {
    pub header: ShapefileHeader,
    pub records: Vec<ShapeRecord>,
    /// The record number of the record header each shape was read from,
    /// parallel to `records`.
    pub record_numbers: Vec<i32>,
    pub warnings: Vec<DecodeWarning>,
}

/// Decodes a .shp buffer with default configs.
pub fn decode(buffer: &[u8]) -> Result<ShapefileDecode> {
    decode_with_configs(buffer, &DecoderConfigs::default())
}

pub fn decode_with_configs(buffer: &[u8], configs: &DecoderConfigs) -> Result<ShapefileDecode> {
    let mut bc = ByteCursor::new(buffer, Endianness::BigEndian);
    let mut ret = ShapefileDecode::default();

    ret.header = read_header(&mut bc)?;
    if ret.header.version < MIN_VERSION {
        configs.report(
            DecodeWarning::LowVersion {
                found: ret.header.version,
                minimum: MIN_VERSION,
            },
            &mut ret.warnings,
        )?;
    }
    if configs.swap_xy {
        swap_header_axes(&mut ret.header);
    }

    bc.seek(HEADER_LENGTH_BYTES)?;
    let file_shape_type = ret.header.shape_type;
    while !bc.is_at_end() {
        bc.set_byte_order(Endianness::BigEndian);
        let record_start = bc.pos();
        let record_number = bc.read_i32()?;
        let content_length = bc.read_i32()?;
        if content_length < 0 {
            // no way to find the next record header
            configs.report(
                DecodeWarning::MalformedRecord {
                    record_number,
                    offset: record_start,
                    reason: format!("negative content length {}", content_length),
                },
                &mut ret.warnings,
            )?;
            break;
        }
        let end_of_record = bc.pos() + content_length as usize * 2;
        if end_of_record > buffer.len() {
            // the record's own extent is truncated
            return Err(DecodeError::UnexpectedEof {
                offset: bc.pos(),
                needed: end_of_record - bc.pos(),
                available: bc.remaining(),
            });
        }
        if content_length == 0 {
            // keeps positional pairing visible to the caller
            configs.report(
                DecodeWarning::MalformedRecord {
                    record_number,
                    offset: record_start,
                    reason: "empty record body".to_string(),
                },
                &mut ret.warnings,
            )?;
            continue;
        }
        if configs.verbose_mode {
            debug!(
                "record {} at offset {}: {} bytes",
                record_number,
                record_start,
                content_length as usize * 2
            );
        }

        bc.set_byte_order(Endianness::LittleEndian);
        let mut shapes = vec![];
        let outcome = read_record_body(&mut bc, file_shape_type, end_of_record, &mut shapes)?;
        for shape in shapes {
            let shape = if configs.swap_xy {
                swap_axes(shape)
            } else {
                shape
            };
            ret.records.push(shape);
            ret.record_numbers.push(record_number);
        }
        if let Err(reason) = outcome {
            configs.report(
                DecodeWarning::MalformedRecord {
                    record_number,
                    offset: record_start,
                    reason,
                },
                &mut ret.warnings,
            )?;
        }

        // resynchronize with the declared record length, whatever the body consumed
        if bc.pos() != end_of_record {
            if configs.verbose_mode {
                debug!(
                    "record {}: body ended at {}, seeking to {}",
                    record_number,
                    bc.pos(),
                    end_of_record
                );
            }
            bc.seek(end_of_record)?;
        }
    }

    info!(
        "decoded {} {} shapes with {} warnings",
        ret.records.len(),
        ret.header.shape_type,
        ret.warnings.len()
    );
    Ok(ret)
}

/// Reads the fixed 100-byte header.
pub fn read_header(bc: &mut ByteCursor) -> Result<ShapefileHeader> {
    let mut header = ShapefileHeader::default();
    bc.set_byte_order(Endianness::BigEndian);
    bc.seek(0)?;
    header.file_code = bc.read_i32()?;
    if header.file_code != FILE_CODE {
        return Err(DecodeError::InvalidMagic {
            offset: 0,
            expected: FILE_CODE,
            found: header.file_code,
        });
    }
    // five unused big-endian integers
    bc.skip(20)?;
    let offset = bc.pos();
    header.file_length = bc.read_i32()?;
    if header.file_length < MIN_FILE_LENGTH_WORDS {
        return Err(DecodeError::TruncatedHeader {
            offset,
            minimum: MIN_FILE_LENGTH_WORDS,
            found: header.file_length,
        });
    }

    // the rest of the header is in LittleEndian format
    bc.set_byte_order(Endianness::LittleEndian);
    header.version = bc.read_i32()?;
    let offset = bc.pos();
    let st = bc.read_i32()?;
    header.shape_type =
        ShapeType::from_int(st).ok_or(DecodeError::UnsupportedShapeType { offset, found: st })?;

    // bounding box
    header.x_min = bc.read_f64()?;
    header.y_min = bc.read_f64()?;
    header.x_max = bc.read_f64()?;
    header.y_max = bc.read_f64()?;
    header.z_min = bc.read_f64()?;
    header.z_max = bc.read_f64()?;
    header.m_min = bc.read_f64()?;
    header.m_max = bc.read_f64()?;
    Ok(header)
}

/// Smallest body, shape type tag included, for each base type.
fn min_body_length(base: ShapeType) -> usize {
    match base {
        ShapeType::Point => 20,
        ShapeType::MultiPoint => 40,
        ShapeType::PolyLine | ShapeType::Polygon => 44,
        _ => 4,
    }
}

/// Reads every shape packed into one record body. All reads are bounded by
/// `end_of_record`, which lies inside the buffer. A record that cannot be
/// used is reported through the inner `Err(reason)` after any shapes read
/// before it are kept in `out`. The caller always resynchronizes to
/// `end_of_record`.
fn read_record_body(
    bc: &mut ByteCursor,
    file_shape_type: ShapeType,
    end_of_record: usize,
    out: &mut Vec<ShapeRecord>,
) -> Result<std::result::Result<(), String>> {
    let base = file_shape_type.base_shape_type();
    let min_length = min_body_length(base);
    let mut first = true;
    while bc.pos() < end_of_record {
        if !first && end_of_record - bc.pos() < min_length {
            // padding after the last complete shape
            break;
        }
        let offset = bc.pos();
        if let Err(reason) = check_fits(bc, end_of_record, 4) {
            return Ok(Err(reason));
        }
        let st = bc.read_i32()?;
        if st == 0 {
            if first {
                out.push(ShapeRecord::Null);
            }
            // a zero tag after the first shape is padding
            break;
        }
        let record_type = match ShapeType::from_int(st) {
            Some(t) => t,
            None => {
                return Ok(Err(format!(
                    "unknown shape type {} at offset {}",
                    st, offset
                )))
            }
        };
        if record_type.base_shape_type() != base {
            return Ok(Err(format!(
                "shape type {} does not match file shape type {}",
                record_type, file_shape_type
            )));
        }

        let shape = match base {
            ShapeType::Point => {
                if let Err(reason) = check_fits(bc, end_of_record, 16) {
                    return Ok(Err(reason));
                }
                ShapeRecord::Point {
                    x: bc.read_f64()?,
                    y: bc.read_f64()?,
                }
            }
            ShapeType::MultiPoint => {
                if let Err(reason) = check_fits(bc, end_of_record, 36) {
                    return Ok(Err(reason));
                }
                let bounding_box = read_bounding_box(bc)?;
                let num_points = bc.read_i32()?;
                if num_points < 0 {
                    return Ok(Err(format!("negative point count {}", num_points)));
                }
                let needed = (num_points as usize).saturating_mul(16);
                if let Err(reason) = check_fits(bc, end_of_record, needed) {
                    return Ok(Err(reason));
                }
                let points = read_points(bc, num_points as usize)?;
                ShapeRecord::MultiPoint {
                    bounding_box,
                    points,
                }
            }
            ShapeType::PolyLine | ShapeType::Polygon => {
                if let Err(reason) = check_fits(bc, end_of_record, 40) {
                    return Ok(Err(reason));
                }
                let bounding_box = read_bounding_box(bc)?;
                let num_parts = bc.read_i32()?;
                let num_points = bc.read_i32()?;
                if num_parts < 0 || num_points < 0 {
                    return Ok(Err(format!(
                        "negative part or point count ({}, {})",
                        num_parts, num_points
                    )));
                }
                let (num_parts, num_points) = (num_parts as usize, num_points as usize);
                let needed = num_parts
                    .saturating_mul(4)
                    .saturating_add(num_points.saturating_mul(16));
                if let Err(reason) = check_fits(bc, end_of_record, needed) {
                    return Ok(Err(reason));
                }
                let mut parts = Vec::with_capacity(num_parts);
                for _ in 0..num_parts {
                    parts.push(bc.read_i32()?);
                }
                let points = read_points(bc, num_points)?;
                let parts = match validate_parts(&parts, num_points) {
                    Ok(p) => p,
                    Err(reason) => return Ok(Err(reason)),
                };
                if base == ShapeType::Polygon {
                    ShapeRecord::Polygon {
                        bounding_box,
                        parts,
                        points,
                    }
                } else {
                    ShapeRecord::PolyLine {
                        bounding_box,
                        parts,
                        points,
                    }
                }
            }
            ShapeType::MultiPatch => {
                // only the leading tag is decoded
                out.push(ShapeRecord::MultiPatch {
                    shape_type: record_type,
                });
                return Ok(Ok(()));
            }
            _ => return Ok(Err(format!("unexpected base shape type {}", base))),
        };
        out.push(shape);
        first = false;

        if file_shape_type.dimension() != ShapeTypeDimension::XY {
            // z and m channels follow the x/y data; skip them
            break;
        }
    }
    Ok(Ok(()))
}

/// Checks that `needed` bytes fit before the end of the record. The caller
/// has already checked that the record itself lies inside the buffer, so a
/// body that overruns its declared length is unusable but recoverable.
fn check_fits(
    bc: &ByteCursor,
    end_of_record: usize,
    needed: usize,
) -> std::result::Result<(), String> {
    if bc.pos().saturating_add(needed) > end_of_record {
        return Err(format!(
            "body needs {} bytes at offset {} but the record ends at offset {}",
            needed,
            bc.pos(),
            end_of_record
        ));
    }
    Ok(())
}

/// Part indices must start at 0, increase strictly, and stay below the
/// point count.
fn validate_parts(parts: &[i32], num_points: usize) -> std::result::Result<Vec<u32>, String> {
    if parts.is_empty() {
        if num_points == 0 {
            return Ok(vec![]);
        }
        return Err(format!("{} points but no parts", num_points));
    }
    if parts[0] != 0 {
        return Err(format!("first part index is {}, not 0", parts[0]));
    }
    let mut ret = Vec::with_capacity(parts.len());
    let mut prev: Option<i32> = None;
    for &p in parts {
        if p < 0 || p as usize >= num_points {
            return Err(format!(
                "part index {} out of range for {} points",
                p, num_points
            ));
        }
        if let Some(q) = prev {
            if p <= q {
                return Err(format!("part indices not increasing ({} after {})", p, q));
            }
        }
        prev = Some(p);
        ret.push(p as u32);
    }
    Ok(ret)
}

fn read_bounding_box(bc: &mut ByteCursor) -> Result<BoundingBox> {
    let x_min = bc.read_f64()?;
    let y_min = bc.read_f64()?;
    let x_max = bc.read_f64()?;
    let y_max = bc.read_f64()?;
    Ok(BoundingBox {
        min_x: x_min,
        min_y: y_min,
        max_x: x_max,
        max_y: y_max,
    })
}

fn read_points(bc: &mut ByteCursor, num_points: usize) -> Result<Vec<Point2D>> {
    let mut points = Vec::with_capacity(num_points.min(bc.remaining() / 16));
    for _ in 0..num_points {
        points.push(Point2D {
            x: bc.read_f64()?,
            y: bc.read_f64()?,
        });
    }
    Ok(points)
}

fn swap_header_axes(header: &mut ShapefileHeader) {
    std::mem::swap(&mut header.x_min, &mut header.y_min);
    std::mem::swap(&mut header.x_max, &mut header.y_max);
}

fn swap_axes(shape: ShapeRecord) -> ShapeRecord {
    let swap_all = |points: Vec<Point2D>| -> Vec<Point2D> {
        points.iter().map(|p| p.swapped()).collect()
    };
    match shape {
        ShapeRecord::Point { x, y } => ShapeRecord::Point { x: y, y: x },
        ShapeRecord::PolyLine {
            bounding_box,
            parts,
            points,
        } => ShapeRecord::PolyLine {
            bounding_box: bounding_box.swapped(),
            parts,
            points: swap_all(points),
        },
        ShapeRecord::Polygon {
            bounding_box,
            parts,
            points,
        } => ShapeRecord::Polygon {
            bounding_box: bounding_box.swapped(),
            parts,
            points: swap_all(points),
        },
        ShapeRecord::MultiPoint {
            bounding_box,
            points,
        } => ShapeRecord::MultiPoint {
            bounding_box: bounding_box.swapped(),
            points: swap_all(points),
        },
        other => other,
    }
}

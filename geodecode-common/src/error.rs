/*
This code is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT

Notes: Fatal decode errors and recoverable decode warnings shared by the
shapefile and attribute table readers.
*/

use std::fmt;
use thiserror::Error;

/// A condition that stops the current decode. The stream cannot be trusted
/// past the reported offset.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected end of buffer at offset {offset}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid file code at offset {offset}: expected {expected}, found {found}")]
    InvalidMagic {
        offset: usize,
        expected: i32,
        found: i32,
    },

    #[error("truncated header at offset {offset}: file length must be at least {minimum} words, found {found}")]
    TruncatedHeader {
        offset: usize,
        minimum: i32,
        found: i32,
    },

    #[error("unsupported shape type {found} at offset {offset}")]
    UnsupportedShapeType { offset: usize, found: i32 },

    #[error("unsupported dBase version byte 0x{found:02X} at offset {offset}")]
    UnsupportedVersion { offset: usize, found: u8 },

    #[error("unsupported field type 0x{found:02X} in field '{field}' at offset {offset}")]
    UnsupportedFieldType {
        offset: usize,
        field: String,
        found: u8,
    },

    #[error("unknown text encoding label '{0}'")]
    UnknownEncoding(String),

    #[error("strict mode: {0}")]
    Strict(DecodeWarning),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// A recoverable condition. The decoder keeps going and reports these
/// alongside its best-effort result.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeWarning {
    /// A single record could not be used and was skipped.
    MalformedRecord {
        record_number: i32,
        offset: usize,
        reason: String,
    },
    /// A ring has too few vertices to enclose an area; it is never treated
    /// as an exterior.
    DegenerateRing { ring_index: usize, vertices: usize },
    /// A hole ring matched no exterior ring and was emitted as its own polygon.
    OrphanHole { ring_index: usize },
    /// The shapefile version is older than the format documents.
    LowVersion { found: i32, minimum: i32 },
    /// The field-descriptor array was not followed by the 0x0D terminator.
    MissingTerminator { offset: usize, found: u8 },
    /// The .shp and .dbf files disagree on the number of rows.
    RowCountMismatch { shapes: usize, attributes: usize },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeWarning::MalformedRecord {
                record_number,
                offset,
                reason,
            } => write!(
                f,
                "malformed record {} at offset {}: {}",
                record_number, offset, reason
            ),
            DecodeWarning::DegenerateRing {
                ring_index,
                vertices,
            } => write!(
                f,
                "ring {} has only {} vertices and is degenerate",
                ring_index, vertices
            ),
            DecodeWarning::OrphanHole { ring_index } => write!(
                f,
                "hole ring {} is not contained by any exterior ring",
                ring_index
            ),
            DecodeWarning::LowVersion { found, minimum } => write!(
                f,
                "shapefile version {} is below the documented minimum {}",
                found, minimum
            ),
            DecodeWarning::MissingTerminator { offset, found } => write!(
                f,
                "expected field descriptor terminator 0x0D at offset {}, found 0x{:02X}",
                offset, found
            ),
            DecodeWarning::RowCountMismatch { shapes, attributes } => write!(
                f,
                "{} shape records but {} attribute records",
                shapes, attributes
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/*
This file is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT

NOTE: Field descriptors and typed column values of the .dbf attribute table.
*/
use serde::Serialize;
use std::fmt;

/// Column type, from the descriptor's one-byte type tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Binary,
    Character,
    Date,
    Numeric,
    Logical,
    Memo,
    Timestamp,
    Long,
    Autoincrement,
    Float,
    Double,
    Ole,
    /// A tag this decoder does not know. Kept so the header still decodes;
    /// reading a record with such a column fails.
    Unknown(u8),
}

impl FieldType {
    pub fn from_byte(tag: u8) -> FieldType {
        match tag {
            b'B' => FieldType::Binary,
            b'C' => FieldType::Character,
            b'D' => FieldType::Date,
            b'N' => FieldType::Numeric,
            b'L' => FieldType::Logical,
            b'M' => FieldType::Memo,
            b'@' => FieldType::Timestamp,
            b'I' => FieldType::Long,
            b'+' => FieldType::Autoincrement,
            b'F' => FieldType::Float,
            b'O' => FieldType::Double,
            b'G' => FieldType::Ole,
            other => FieldType::Unknown(other),
        }
    }

    pub fn to_byte(&self) -> u8 {
        match self {
            FieldType::Binary => b'B',
            FieldType::Character => b'C',
            FieldType::Date => b'D',
            FieldType::Numeric => b'N',
            FieldType::Logical => b'L',
            FieldType::Memo => b'M',
            FieldType::Timestamp => b'@',
            FieldType::Long => b'I',
            FieldType::Autoincrement => b'+',
            FieldType::Float => b'F',
            FieldType::Double => b'O',
            FieldType::Ole => b'G',
            FieldType::Unknown(tag) => *tag,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldType::Binary
                | FieldType::Numeric
                | FieldType::Float
                | FieldType::Long
                | FieldType::Autoincrement
                | FieldType::Double
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", char::from(self.to_byte()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub length: u8,
    pub decimal_count: u8,
    // bookkeeping; parsed but not used to decode records
    pub work_area_id: u8,
    pub mdx_flag: u8,
    pub memory_address: u32,
    pub next_autoincrement: u32,
}

impl FieldDescriptor {
    pub fn new(name: &str, field_type: FieldType, length: u8, decimal_count: u8) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            field_type,
            length,
            decimal_count,
            work_area_id: 0,
            mdx_flag: 0,
            memory_address: 0,
            next_autoincrement: 0,
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}, length {}, decimals {})",
            self.name, self.field_type, self.length, self.decimal_count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldData {
    Int(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl FieldData {
    pub fn is_null(&self) -> bool {
        *self == FieldData::Null
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldData::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldData::Int(v) => Some(*v as f64),
            FieldData::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldData::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldData::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldData::Int(v) => write!(f, "{}", v),
            FieldData::Real(v) => write!(f, "{}", v),
            FieldData::Text(s) => write!(f, "{}", s),
            FieldData::Bool(b) => write!(f, "{}", b),
            FieldData::Null => write!(f, "null"),
        }
    }
}

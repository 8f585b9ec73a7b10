/*
This file is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT

NOTE: Decodes the .dbf attribute table that accompanies a shapefile.
*/
pub mod field;
pub mod header;

pub use self::field::{FieldData, FieldDescriptor, FieldType};
pub use self::header::{DbfHeader, DbfVersion};

use geodecode_common::configs::DecoderConfigs;
use geodecode_common::error::{DecodeError, DecodeWarning, Result};
use geodecode_common::utils::{parse_leading_int, ByteCursor, Endianness};
use log::{debug, info};
use serde::Serialize;

/// Deletion flag value that marks a row as deleted.
const DELETED_FLAG: u8 = 0x1A;

/// One table row. Values keep the column order of the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DbfRecord {
    pub deleted: bool,
    values: Vec<(String, FieldData)>,
}

impl DbfRecord {
    pub fn new(deleted: bool) -> DbfRecord {
        DbfRecord {
            deleted,
            values: vec![],
        }
    }

    /// Sets a column value. A repeated name replaces the earlier value in place.
    pub fn insert(&mut self, name: &str, value: FieldData) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldData> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldData)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A decoded table plus the recoverable problems met on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTable {
    pub header: DbfHeader,
    pub records: Vec<DbfRecord>,
    pub warnings: Vec<DecodeWarning>,
}

impl AttributeTable {
    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    pub fn get_record(&self, index: usize) -> Option<&DbfRecord> {
        self.records.get(index)
    }

    pub fn get_value(&self, index: usize, field_name: &str) -> Option<&FieldData> {
        self.records.get(index).and_then(|r| r.get(field_name))
    }

    pub fn is_field_numeric(&self, field_index: usize) -> bool {
        self.header
            .fields
            .get(field_index)
            .map_or(false, |f| f.field_type.is_numeric())
    }
}

pub fn decode(buffer: &[u8]) -> Result<(DbfHeader, Vec<DbfRecord>)> {
    let table = decode_with_configs(buffer, &DecoderConfigs::default())?;
    Ok((table.header, table.records))
}

/// Same as `decode`, keeping the accumulated warnings.
pub fn decode_with_warnings(buffer: &[u8]) -> Result<AttributeTable> {
    decode_with_configs(buffer, &DecoderConfigs::default())
}

pub fn decode_with_configs(buffer: &[u8], configs: &DecoderConfigs) -> Result<AttributeTable> {
    let mut bc = ByteCursor::new(buffer, Endianness::LittleEndian).with_encoding(configs.encoding()?);
    let mut warnings = vec![];
    let header = header::read_header(&mut bc, configs, &mut warnings)?;

    let mut records = Vec::with_capacity((header.num_records as usize).min(bc.remaining()));
    for i in 0..header.num_records {
        let offset = bc.pos();
        let flag = bc.read_u8()?;
        let mut record = DbfRecord::new(flag == DELETED_FLAG);
        for field in &header.fields {
            let value = read_value(&mut bc, field)?;
            record.insert(&field.name, value);
        }
        if configs.verbose_mode {
            debug!(
                "dbf record {} at offset {}{}",
                i,
                offset,
                if record.deleted { " (deleted)" } else { "" }
            );
        }
        records.push(record);
    }

    info!(
        "decoded {} attribute records with {} fields",
        records.len(),
        header.fields.len()
    );
    Ok(AttributeTable {
        header,
        records,
        warnings,
    })
}

fn read_value(bc: &mut ByteCursor, field: &FieldDescriptor) -> Result<FieldData> {
    let length = field.length as usize;
    let value = match field.field_type {
        FieldType::Binary | FieldType::Numeric | FieldType::Float => {
            let text = bc.read_fixed_string(length)?;
            parse_leading_int(&text).map_or(FieldData::Null, FieldData::Int)
        }
        FieldType::Character | FieldType::Date | FieldType::Memo | FieldType::Ole => {
            FieldData::Text(bc.read_fixed_string(length)?)
        }
        FieldType::Logical => {
            let text = bc.read_fixed_string(length)?;
            match text.trim_start().chars().next() {
                Some('t' | 'T' | 'y' | 'Y') => FieldData::Bool(true),
                Some('f' | 'F' | 'n' | 'N') => FieldData::Bool(false),
                _ => FieldData::Null,
            }
        }
        FieldType::Timestamp => {
            bc.skip(length)?;
            FieldData::Null
        }
        FieldType::Long | FieldType::Autoincrement => {
            if length >= 4 {
                let v = bc.read_i32()?;
                bc.skip(length - 4)?;
                FieldData::Int(v as i64)
            } else {
                bc.skip(length)?;
                FieldData::Null
            }
        }
        FieldType::Double => {
            if length >= 8 {
                let v = bc.read_f64()?;
                bc.skip(length - 8)?;
                FieldData::Real(v)
            } else {
                bc.skip(length)?;
                FieldData::Null
            }
        }
        FieldType::Unknown(found) => {
            return Err(DecodeError::UnsupportedFieldType {
                offset: bc.pos(),
                field: field.name.clone(),
                found,
            })
        }
    };
    Ok(value)
}

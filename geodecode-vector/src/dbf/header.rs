/*
This file is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT

NOTE: The .dbf table header. Four on-disk layouts exist, selected by the
leading version byte; each has its own header size and descriptor size.
*/
use super::field::{FieldDescriptor, FieldType};
use chrono::NaiveDate;
use geodecode_common::configs::DecoderConfigs;
use geodecode_common::error::{DecodeError, DecodeWarning, Result};
use geodecode_common::utils::ByteCursor;
use log::debug;
use serde::Serialize;

/// Records of a dBASE II table always start here.
pub const DBASE2_DATA_START: usize = 521;
const DBASE2_MAX_FIELDS: usize = 32;
pub const HEADER_TERMINATOR: u8 = 0x0D;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum DbfVersion {
    DBase2,
    DBase3,
    DBase4,
    DBase7,
}

impl DbfVersion {
    pub fn from_byte(value: u8) -> Option<DbfVersion> {
        match value {
            0x02 => Some(DbfVersion::DBase2),
            0x03 | 0x83 | 0xF5 | 0x30 | 0x31 => Some(DbfVersion::DBase3),
            0x04 | 0x8B | 0x7B | 0xCB | 0xFB | 0x43 | 0x63 => Some(DbfVersion::DBase4),
            0x05 | 0x07 | 0x8C => Some(DbfVersion::DBase7),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DbfHeader {
    pub version: DbfVersion,
    pub version_byte: u8,
    pub year: u32,
    pub month: u8,
    pub day: u8,
    pub num_records: u32,
    pub bytes_in_header: u16,
    pub bytes_in_record: u16,
    pub incomplete_transaction: u8,
    pub encryption_flag: u8,
    pub mdx_flag: u8,
    pub language_driver_id: u8,
    pub language_driver_name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl DbfHeader {
    fn new(version: DbfVersion, version_byte: u8) -> DbfHeader {
        DbfHeader {
            version,
            version_byte,
            year: 1900,
            month: 0,
            day: 0,
            num_records: 0,
            bytes_in_header: 0,
            bytes_in_record: 0,
            incomplete_transaction: 0,
            encryption_flag: 0,
            mdx_flag: 0,
            language_driver_id: 0,
            language_driver_name: String::new(),
            fields: vec![],
        }
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn get_field_num(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// The last-update date, if the stored bytes form a valid calendar date.
    pub fn last_modified(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)
    }

    /// Where the first record begins.
    pub fn data_start(&self) -> usize {
        match self.version {
            DbfVersion::DBase2 => DBASE2_DATA_START,
            _ => self.bytes_in_header as usize,
        }
    }
}

/// Reads the version byte, the layout-specific header, the field
/// descriptor array and its terminator, leaving the cursor at the first
/// record.
pub fn read_header(
    bc: &mut ByteCursor,
    configs: &DecoderConfigs,
    warnings: &mut Vec<DecodeWarning>,
) -> Result<DbfHeader> {
    let offset = bc.pos();
    let version_byte = bc.read_u8()?;
    let version = DbfVersion::from_byte(version_byte).ok_or(DecodeError::UnsupportedVersion {
        offset,
        found: version_byte,
    })?;
    let mut header = DbfHeader::new(version, version_byte);

    match version {
        DbfVersion::DBase2 => read_dbase2(bc, &mut header)?,
        DbfVersion::DBase3 => read_dbase3(bc, &mut header)?,
        DbfVersion::DBase4 => read_dbase4(bc, &mut header)?,
        DbfVersion::DBase7 => read_dbase7(bc, &mut header)?,
    }
    debug!(
        "dbf version 0x{:02X} ({:?}): {} fields, {} records",
        version_byte,
        version,
        header.fields.len(),
        header.num_records
    );

    // some writers omit the terminator
    let offset = bc.pos();
    let found = bc.peek_u8()?;
    if found == HEADER_TERMINATOR {
        bc.skip(1)?;
    } else {
        configs.report(DecodeWarning::MissingTerminator { offset, found }, warnings)?;
    }

    let data_start = header.data_start();
    if data_start > bc.pos() {
        bc.seek(data_start)?;
    }
    Ok(header)
}

fn read_dbase2(bc: &mut ByteCursor, header: &mut DbfHeader) -> Result<()> {
    header.num_records = bc.read_u16()? as u32;
    header.month = bc.read_u8()?;
    header.day = bc.read_u8()?;
    header.year = 1900 + bc.read_u8()? as u32;
    header.bytes_in_record = bc.read_u16()?;

    while header.fields.len() < DBASE2_MAX_FIELDS && bc.peek_u8()? != HEADER_TERMINATOR {
        let name = bc.read_fixed_string(11)?;
        let field_type = FieldType::from_byte(bc.read_u8()?);
        let length = bc.read_u8()?;
        let mut field = FieldDescriptor::new(&name, field_type, length, 0);
        field.memory_address = bc.read_u16()? as u32;
        field.decimal_count = bc.read_u8()?;
        header.fields.push(field);
    }
    Ok(())
}

/// The 32-byte header shared by dBASE III+, IV and 7. Returns the offset
/// at which the descriptor array must end.
fn read_common(bc: &mut ByteCursor, header: &mut DbfHeader) -> Result<usize> {
    header.year = 1900 + bc.read_u8()? as u32;
    header.month = bc.read_u8()?;
    header.day = bc.read_u8()?;
    header.num_records = bc.read_u32()?;
    header.bytes_in_header = bc.read_u16()?;
    header.bytes_in_record = bc.read_u16()?;
    Ok((header.bytes_in_header as usize).saturating_sub(1))
}

fn read_dbase4_reserved(bc: &mut ByteCursor, header: &mut DbfHeader) -> Result<()> {
    // reserved bytes
    bc.skip(2)?;
    header.incomplete_transaction = bc.read_u8()?;
    header.encryption_flag = bc.read_u8()?;
    // multi-user processing
    bc.skip(12)?;
    header.mdx_flag = bc.read_u8()?;
    header.language_driver_id = bc.read_u8()?;
    bc.skip(2)?;
    Ok(())
}

fn read_dbase3(bc: &mut ByteCursor, header: &mut DbfHeader) -> Result<()> {
    let end = read_common(bc, header)?;
    // reserved bytes
    bc.skip(20)?;

    while bc.pos() < end && bc.peek_u8()? != HEADER_TERMINATOR {
        let name = bc.read_fixed_string(11)?;
        let field_type = FieldType::from_byte(bc.read_u8()?);
        let memory_address = bc.read_u32()?;
        let length = bc.read_u8()?;
        let decimal_count = bc.read_u8()?;
        let mut field = FieldDescriptor::new(&name, field_type, length, decimal_count);
        field.memory_address = memory_address;
        // reserved for multi-user dBASE
        bc.skip(2)?;
        field.work_area_id = bc.read_u8()?;
        bc.skip(2)?;
        // set fields flag
        bc.skip(1)?;
        bc.skip(8)?;
        header.fields.push(field);
    }
    Ok(())
}

fn read_dbase4(bc: &mut ByteCursor, header: &mut DbfHeader) -> Result<()> {
    let end = read_common(bc, header)?;
    read_dbase4_reserved(bc, header)?;

    while bc.pos() < end && bc.peek_u8()? != HEADER_TERMINATOR {
        let name = bc.read_fixed_string(11)?;
        let field_type = FieldType::from_byte(bc.read_u8()?);
        bc.skip(4)?;
        let length = bc.read_u8()?;
        let decimal_count = bc.read_u8()?;
        let mut field = FieldDescriptor::new(&name, field_type, length, decimal_count);
        bc.skip(2)?;
        field.work_area_id = bc.read_u8()?;
        bc.skip(10)?;
        field.mdx_flag = bc.read_u8()?;
        header.fields.push(field);
    }
    Ok(())
}

fn read_dbase7(bc: &mut ByteCursor, header: &mut DbfHeader) -> Result<()> {
    let end = read_common(bc, header)?;
    read_dbase4_reserved(bc, header)?;
    header.language_driver_name = bc.read_fixed_string(32)?;
    bc.skip(4)?;

    while bc.pos() < end && bc.peek_u8()? != HEADER_TERMINATOR {
        let name = bc.read_fixed_string(32)?;
        let field_type = FieldType::from_byte(bc.read_u8()?);
        let length = bc.read_u8()?;
        let decimal_count = bc.read_u8()?;
        let mut field = FieldDescriptor::new(&name, field_type, length, decimal_count);
        bc.skip(2)?;
        field.mdx_flag = bc.read_u8()?;
        bc.skip(2)?;
        field.next_autoincrement = bc.read_u32()?;
        bc.skip(4)?;
        header.fields.push(field);
    }
    Ok(())
}

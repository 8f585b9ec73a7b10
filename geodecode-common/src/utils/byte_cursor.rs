/*
This code is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT
*/
use crate::error::{DecodeError, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use encoding_rs::{Encoding, WINDOWS_1252};

/// A positional reader over an in-memory byte buffer.
///
/// Both the shapefile and the dBase formats mix byte orders within a single
/// file, so the order can be switched between reads without moving the
/// cursor. Every read is bounds-checked; a failed read leaves the position
/// untouched.
#[derive(Clone, Copy)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    pos: usize,
    is_le: bool,
    encoding: &'static Encoding,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8], byte_order: Endianness) -> ByteCursor<'a> {
        ByteCursor {
            buffer,
            pos: 0usize,
            is_le: byte_order == Endianness::LittleEndian,
            encoding: WINDOWS_1252,
        }
    }

    /// Sets the single-byte encoding used by `read_fixed_string`.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> ByteCursor<'a> {
        self.encoding = encoding;
        self
    }

    pub fn set_byte_order(&mut self, byte_order: Endianness) {
        self.is_le = byte_order == Endianness::LittleEndian;
    }

    pub fn byte_order(&self) -> Endianness {
        if self.is_le {
            return Endianness::LittleEndian;
        }
        Endianness::BigEndian
    }

    /// Moves the cursor to an absolute position. Seeking to exactly the end
    /// of the buffer is allowed.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.buffer.len() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: position - self.pos.min(position),
                available: self.remaining(),
            });
        }
        self.pos = position;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.pos)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buffer.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = match self.pos.checked_add(n) {
            Some(end) if end <= self.buffer.len() => end,
            _ => {
                return Err(DecodeError::UnexpectedEof {
                    offset: self.pos,
                    needed: n,
                    available: self.remaining(),
                })
            }
        };
        let bytes = &self.buffer[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Reads `length` bytes as single-byte text, trimming trailing NUL and
    /// space padding.
    pub fn read_fixed_string(&mut self, length: usize) -> Result<String> {
        let bytes = self.take(length)?;
        let (text, _, _) = self.encoding.decode(bytes);
        Ok(text
            .trim_end_matches(|c: char| c == '\0' || c == ' ')
            .to_string())
    }

    pub fn peek_u8(&self) -> Result<u8> {
        self.buffer
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: 1,
                available: 0,
            })
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        // no byte order for single bytes
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        if self.is_le {
            return Ok(LittleEndian::read_u16(b));
        }
        Ok(BigEndian::read_u16(b))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let b = self.take(2)?;
        if self.is_le {
            return Ok(LittleEndian::read_i16(b));
        }
        Ok(BigEndian::read_i16(b))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        if self.is_le {
            return Ok(LittleEndian::read_u32(b));
        }
        Ok(BigEndian::read_u32(b))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        if self.is_le {
            return Ok(LittleEndian::read_i32(b));
        }
        Ok(BigEndian::read_i32(b))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        if self.is_le {
            return Ok(LittleEndian::read_f32(b));
        }
        Ok(BigEndian::read_f32(b))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let b = self.take(8)?;
        if self.is_le {
            return Ok(LittleEndian::read_f64(b));
        }
        Ok(BigEndian::read_f64(b))
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Endianness {
    LittleEndian,
    BigEndian,
}

impl Default for Endianness {
    fn default() -> Endianness {
        Endianness::LittleEndian
    }
}

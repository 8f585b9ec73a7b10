// Hand-built .shp and .dbf byte streams for the integration tests.
#![allow(dead_code)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

pub const FILE_CODE: i32 = 9994;

pub struct ShpBuilder {
    pub file_code: i32,
    pub version: i32,
    pub shape_type: i32,
    pub file_length: Option<i32>,
    records: Vec<u8>,
    /// Byte offsets at which each record header starts.
    pub record_offsets: Vec<usize>,
}

impl ShpBuilder {
    pub fn new(shape_type: i32) -> ShpBuilder {
        ShpBuilder {
            file_code: FILE_CODE,
            version: 1000,
            shape_type,
            file_length: None,
            records: vec![],
            record_offsets: vec![],
        }
    }

    /// Appends a record whose declared content length matches `body`.
    pub fn record(&mut self, record_number: i32, body: &[u8]) -> &mut ShpBuilder {
        self.record_with_length(record_number, (body.len() / 2) as i32, body)
    }

    pub fn record_with_length(
        &mut self,
        record_number: i32,
        content_length: i32,
        body: &[u8],
    ) -> &mut ShpBuilder {
        self.record_offsets.push(100 + self.records.len());
        self.records.write_i32::<BigEndian>(record_number).unwrap();
        self.records.write_i32::<BigEndian>(content_length).unwrap();
        self.records.extend_from_slice(body);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = vec![];
        buf.write_i32::<BigEndian>(self.file_code).unwrap();
        for _ in 0..5 {
            buf.write_i32::<BigEndian>(0).unwrap();
        }
        let total = ((100 + self.records.len()) / 2) as i32;
        buf.write_i32::<BigEndian>(self.file_length.unwrap_or(total))
            .unwrap();
        buf.write_i32::<LittleEndian>(self.version).unwrap();
        buf.write_i32::<LittleEndian>(self.shape_type).unwrap();
        for v in [0.0, 0.0, 100.0, 100.0, 0.0, 0.0, 0.0, 0.0] {
            buf.write_f64::<LittleEndian>(v).unwrap();
        }
        assert_eq!(buf.len(), 100);
        buf.extend_from_slice(&self.records);
        buf
    }
}

pub fn null_body() -> Vec<u8> {
    let mut b = vec![];
    b.write_i32::<LittleEndian>(0).unwrap();
    b
}

pub fn point_body(x: f64, y: f64) -> Vec<u8> {
    let mut b = vec![];
    b.write_i32::<LittleEndian>(1).unwrap();
    b.write_f64::<LittleEndian>(x).unwrap();
    b.write_f64::<LittleEndian>(y).unwrap();
    b
}

pub fn multipoint_body(points: &[(f64, f64)]) -> Vec<u8> {
    let mut b = vec![];
    b.write_i32::<LittleEndian>(8).unwrap();
    write_bbox(&mut b, points);
    b.write_i32::<LittleEndian>(points.len() as i32).unwrap();
    for (x, y) in points {
        b.write_f64::<LittleEndian>(*x).unwrap();
        b.write_f64::<LittleEndian>(*y).unwrap();
    }
    b
}

/// A PolyLine (tag 3) or Polygon (tag 5) body with one part per ring.
pub fn poly_body(tag: i32, rings: &[Vec<(f64, f64)>]) -> Vec<u8> {
    let points: Vec<(f64, f64)> = rings.iter().flatten().copied().collect();
    let mut parts = vec![];
    let mut start = 0i32;
    for r in rings {
        parts.push(start);
        start += r.len() as i32;
    }
    poly_body_raw(tag, &parts, &points)
}

pub fn poly_body_raw(tag: i32, parts: &[i32], points: &[(f64, f64)]) -> Vec<u8> {
    let mut b = vec![];
    b.write_i32::<LittleEndian>(tag).unwrap();
    write_bbox(&mut b, points);
    b.write_i32::<LittleEndian>(parts.len() as i32).unwrap();
    b.write_i32::<LittleEndian>(points.len() as i32).unwrap();
    for p in parts {
        b.write_i32::<LittleEndian>(*p).unwrap();
    }
    for (x, y) in points {
        b.write_f64::<LittleEndian>(*x).unwrap();
        b.write_f64::<LittleEndian>(*y).unwrap();
    }
    b
}

fn write_bbox(b: &mut Vec<u8>, points: &[(f64, f64)]) {
    let mut bbox = [0.0f64; 4];
    if let Some(&(x, y)) = points.first() {
        bbox = [x, y, x, y];
    }
    for &(x, y) in points {
        bbox[0] = bbox[0].min(x);
        bbox[1] = bbox[1].min(y);
        bbox[2] = bbox[2].max(x);
        bbox[3] = bbox[3].max(y);
    }
    for v in bbox {
        b.write_f64::<LittleEndian>(v).unwrap();
    }
}

/// Clockwise (y up) closed square.
pub fn cw_square(x0: f64, y0: f64, size: f64) -> Vec<(f64, f64)> {
    vec![
        (x0, y0),
        (x0, y0 + size),
        (x0 + size, y0 + size),
        (x0 + size, y0),
        (x0, y0),
    ]
}

pub fn ccw_square(x0: f64, y0: f64, size: f64) -> Vec<(f64, f64)> {
    let mut r = cw_square(x0, y0, size);
    r.reverse();
    r
}

/// dBASE III+ table with one Character field `NAME` (length 10) and one
/// Numeric field `ID` (length 4).
pub fn dbase3_table(rows: &[(bool, &str, i32)]) -> Vec<u8> {
    let fields: [(&str, u8, u8); 2] = [("NAME", b'C', 10), ("ID", b'N', 4)];
    let bytes_in_header = 32 + 32 * fields.len() + 1;
    let bytes_in_record = 1 + 10 + 4;
    let mut b = vec![0x03u8, 124, 3, 1];
    b.write_u32::<LittleEndian>(rows.len() as u32).unwrap();
    b.write_u16::<LittleEndian>(bytes_in_header as u16).unwrap();
    b.write_u16::<LittleEndian>(bytes_in_record as u16).unwrap();
    b.extend_from_slice(&[0; 20]);
    for (name, tag, length) in fields {
        let mut n = name.as_bytes().to_vec();
        n.resize(11, 0);
        b.extend(n);
        b.push(tag);
        b.extend_from_slice(&[0; 4]);
        b.push(length);
        b.push(0);
        b.extend_from_slice(&[0; 14]);
    }
    b.push(0x0D);
    for (deleted, name, id) in rows {
        b.push(if *deleted { 0x1A } else { b' ' });
        b.extend(format!("{:<10}", name).into_bytes());
        b.extend(format!("{:>4}", id).into_bytes());
    }
    b
}

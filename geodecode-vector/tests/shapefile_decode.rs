mod fixtures;

use fixtures::*;
use geodecode_common::algorithms::RingOrientation;
use geodecode_common::configs::DecoderConfigs;
use geodecode_common::error::{DecodeError, DecodeWarning};
use geodecode_common::structures::Point2D;
use geodecode_vector::shapefile::decoder::{decode, decode_with_configs};
use geodecode_vector::{ShapeRecord, ShapeType};
use proptest::prelude::*;

#[test]
fn wrong_magic_returns_no_records() {
    let mut b = ShpBuilder::new(1);
    b.file_code = 9995;
    b.record(1, &point_body(1.0, 2.0));
    match decode(&b.build()) {
        Err(DecodeError::InvalidMagic {
            offset,
            expected,
            found,
        }) => {
            assert_eq!(offset, 0);
            assert_eq!(expected, 9994);
            assert_eq!(found, 9995);
        }
        other => panic!("expected InvalidMagic, got {:?}", other),
    }
}

#[test]
fn short_file_length_is_truncated_header() {
    let mut b = ShpBuilder::new(1);
    b.file_length = Some(49);
    assert!(matches!(
        decode(&b.build()),
        Err(DecodeError::TruncatedHeader {
            offset: 24,
            minimum: 50,
            found: 49
        })
    ));
}

#[test]
fn unknown_file_shape_type() {
    let b = ShpBuilder::new(2);
    assert!(matches!(
        decode(&b.build()),
        Err(DecodeError::UnsupportedShapeType { offset: 32, found: 2 })
    ));
}

#[test]
fn zero_records_is_valid() {
    let res = decode(&ShpBuilder::new(5).build()).unwrap();
    assert_eq!(res.header.file_code, 9994);
    assert_eq!(res.header.shape_type, ShapeType::Polygon);
    assert_eq!(res.header.file_length, 50);
    assert!(res.records.is_empty());
    assert!(res.warnings.is_empty());
}

#[test]
fn low_version_only_warns() {
    let mut b = ShpBuilder::new(1);
    b.version = 999;
    b.record(1, &point_body(3.0, 4.0));
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.records, vec![ShapeRecord::Point { x: 3.0, y: 4.0 }]);
    assert_eq!(
        res.warnings,
        vec![DecodeWarning::LowVersion {
            found: 999,
            minimum: 1000
        }]
    );
}

#[test]
fn null_and_point_records() {
    let mut b = ShpBuilder::new(1);
    b.record(1, &point_body(1.0, 2.0))
        .record(2, &null_body())
        .record(3, &point_body(-5.5, 7.25));
    let res = decode(&b.build()).unwrap();
    assert_eq!(
        res.records,
        vec![
            ShapeRecord::Point { x: 1.0, y: 2.0 },
            ShapeRecord::Null,
            ShapeRecord::Point { x: -5.5, y: 7.25 },
        ]
    );
    assert_eq!(res.record_numbers, vec![1, 2, 3]);
}

#[test]
fn polyline_parts_and_points() {
    let line_a = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)];
    let line_b = vec![(5.0, 5.0), (6.0, 6.0)];
    let mut b = ShpBuilder::new(3);
    b.record(1, &poly_body(3, &[line_a, line_b]));
    let res = decode(&b.build()).unwrap();
    match &res.records[0] {
        ShapeRecord::PolyLine {
            bounding_box,
            parts,
            points,
        } => {
            assert_eq!(parts, &vec![0, 3]);
            assert_eq!(points.len(), 5);
            assert_eq!(points[3], Point2D::new(5.0, 5.0));
            assert_eq!(bounding_box.max_x, 6.0);
        }
        other => panic!("expected PolyLine, got {:?}", other),
    }
    assert_eq!(res.records[0].part_ranges(), vec![0..3, 3..5]);
}

#[test]
fn multipoint_record() {
    let mut b = ShpBuilder::new(8);
    b.record(1, &multipoint_body(&[(1.0, 1.0), (2.0, 3.0), (4.0, -1.0)]));
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.records[0].num_points(), 3);
    let bb = res.records[0].bounding_box().unwrap();
    assert_eq!((bb.min_y, bb.max_x), (-1.0, 4.0));
}

#[test]
fn bad_part_indices_skip_the_record() {
    let points = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 3.0)];
    let mut b = ShpBuilder::new(3);
    b.record(1, &poly_body_raw(3, &[0, 2, 1], &points))
        .record(2, &poly_body_raw(3, &[0, 9], &points))
        .record(3, &poly_body_raw(3, &[1], &points))
        .record(4, &poly_body_raw(3, &[0, 2], &points));
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.records.len(), 1);
    assert_eq!(res.record_numbers, vec![4]);
    assert_eq!(res.warnings.len(), 3);
    assert!(res
        .warnings
        .iter()
        .all(|w| matches!(w, DecodeWarning::MalformedRecord { .. })));
}

#[test]
fn mismatched_record_tag_is_skipped() {
    let mut b = ShpBuilder::new(5);
    b.record(1, &point_body(1.0, 1.0))
        .record(2, &poly_body(5, &[cw_square(0.0, 0.0, 1.0)]));
    let buf = b.build();
    let res = decode(&buf).unwrap();
    assert_eq!(res.records.len(), 1);
    assert_eq!(res.record_numbers, vec![2]);
    match &res.warnings[..] {
        [DecodeWarning::MalformedRecord {
            record_number,
            offset,
            ..
        }] => {
            assert_eq!(*record_number, 1);
            assert_eq!(*offset, 100);
        }
        other => panic!("unexpected warnings {:?}", other),
    }

    let strict = DecoderConfigs {
        strict_mode: true,
        ..Default::default()
    };
    assert!(matches!(
        decode_with_configs(&buf, &strict),
        Err(DecodeError::Strict(DecodeWarning::MalformedRecord { .. }))
    ));
}

#[test]
fn oversized_content_length_resynchronizes() {
    // 8 trailing bytes: too short to hold another point
    let mut body = point_body(1.0, 2.0);
    body.extend_from_slice(&[0xAB; 8]);
    let mut b = ShpBuilder::new(1);
    b.record(1, &body).record(2, &point_body(3.0, 4.0));
    let res = decode(&b.build()).unwrap();
    assert_eq!(
        res.records,
        vec![
            ShapeRecord::Point { x: 1.0, y: 2.0 },
            ShapeRecord::Point { x: 3.0, y: 4.0 },
        ]
    );
    assert!(res.warnings.is_empty());
}

#[test]
fn zero_padding_after_a_shape_is_ignored() {
    let mut body = point_body(1.0, 2.0);
    body.extend_from_slice(&[0; 24]);
    let mut b = ShpBuilder::new(1);
    b.record(1, &body).record(2, &point_body(3.0, 4.0));
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.records.len(), 2);
    assert_eq!(res.record_numbers, vec![1, 2]);
}

#[test]
fn packed_sub_shapes_share_a_record_number() {
    let mut body = point_body(1.0, 2.0);
    body.extend(point_body(3.0, 4.0));
    let mut b = ShpBuilder::new(1);
    b.record(7, &body);
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.records.len(), 2);
    assert_eq!(res.record_numbers, vec![7, 7]);
}

#[test]
fn measured_points_skip_the_m_channel() {
    let mut body = point_body(1.0, 2.0);
    body[0] = 21;
    body.extend_from_slice(&42.0f64.to_le_bytes());
    let mut b = ShpBuilder::new(21);
    b.record(1, &body).record(2, &body);
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.records, vec![ShapeRecord::Point { x: 1.0, y: 2.0 }; 2]);
}

#[test]
fn multipatch_only_decodes_the_tag() {
    let mut body = vec![];
    body.extend_from_slice(&31i32.to_le_bytes());
    body.extend_from_slice(&[0x11; 60]);
    let mut b = ShpBuilder::new(31);
    b.record(1, &body).record(2, &body);
    let res = decode(&b.build()).unwrap();
    assert_eq!(
        res.records,
        vec![
            ShapeRecord::MultiPatch {
                shape_type: ShapeType::MultiPatch
            };
            2
        ]
    );
}

#[test]
fn negative_content_length_stops_the_stream() {
    let mut b = ShpBuilder::new(1);
    b.record(1, &point_body(1.0, 2.0))
        .record_with_length(2, -4, &point_body(3.0, 4.0));
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.records.len(), 1);
    assert!(matches!(
        res.warnings[..],
        [DecodeWarning::MalformedRecord { record_number: 2, .. }]
    ));
}

#[test]
fn content_length_past_the_buffer_is_eof() {
    let mut b = ShpBuilder::new(1);
    b.record_with_length(1, 40, &point_body(1.0, 2.0));
    assert!(matches!(
        decode(&b.build()),
        Err(DecodeError::UnexpectedEof { .. })
    ));
}

#[test]
fn huge_point_count_does_not_allocate() {
    let mut body = vec![];
    body.extend_from_slice(&8i32.to_le_bytes());
    body.extend_from_slice(&[0; 32]);
    body.extend_from_slice(&i32::MAX.to_le_bytes());
    let mut b = ShpBuilder::new(8);
    b.record(1, &body)
        .record(2, &multipoint_body(&[(1.0, 1.0), (2.0, 2.0)]));
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.record_numbers, vec![2]);
    assert_eq!(res.records[0].num_points(), 2);
    assert!(matches!(
        res.warnings[..],
        [DecodeWarning::MalformedRecord { record_number: 1, .. }]
    ));
}

#[test]
fn overlong_point_count_skips_only_that_record() {
    let square = cw_square(0.0, 0.0, 1.0);
    let mut bad = poly_body(5, &[square.clone()]);
    // num_points sits after the tag, the bounding box and num_parts
    bad[40..44].copy_from_slice(&1_000_000i32.to_le_bytes());
    let mut b = ShpBuilder::new(5);
    b.record(1, &poly_body(5, &[square.clone()]))
        .record(2, &bad)
        .record(3, &poly_body(5, &[square]));
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.record_numbers, vec![1, 3]);
    assert!(matches!(
        res.warnings[..],
        [DecodeWarning::MalformedRecord { record_number: 2, .. }]
    ));
}

#[test]
fn record_shorter_than_its_prefix_is_malformed() {
    let mut b = ShpBuilder::new(5);
    b.record(1, &poly_body(5, &[cw_square(0.0, 0.0, 1.0)]))
        .record(2, &5i32.to_le_bytes());
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.records.len(), 1);
    assert!(matches!(
        res.warnings[..],
        [DecodeWarning::MalformedRecord { record_number: 2, .. }]
    ));
}

#[test]
fn empty_record_body_is_reported() {
    let mut b = ShpBuilder::new(1);
    b.record(1, &[])
        .record(2, &point_body(3.0, 4.0));
    let res = decode(&b.build()).unwrap();
    assert_eq!(res.record_numbers, vec![2]);
    assert!(matches!(
        res.warnings[..],
        [DecodeWarning::MalformedRecord { record_number: 1, .. }]
    ));
}

#[test]
fn polygon_with_hole_end_to_end() {
    let mut b = ShpBuilder::new(5);
    b.record(
        1,
        &poly_body(
            5,
            &[
                cw_square(0.0, 0.0, 10.0),
                ccw_square(2.0, 2.0, 3.0),
                cw_square(20.0, 20.0, 5.0),
            ],
        ),
    );
    let res = decode(&b.build()).unwrap();
    let topo = res.records[0].polygons().unwrap();
    assert!(topo.warnings.is_empty());
    assert_eq!(topo.polygons.len(), 2);
    assert_eq!(topo.polygons[0].holes.len(), 1);
    assert_eq!(
        topo.polygons[0].holes[0].orientation(),
        RingOrientation::CounterClockwise
    );
    assert!(topo.polygons[1].holes.is_empty());
}

#[test]
fn strict_topology_rejects_an_orphan_hole() {
    let mut b = ShpBuilder::new(5);
    b.record(
        1,
        &poly_body(5, &[cw_square(0.0, 0.0, 1.0), ccw_square(40.0, 40.0, 1.0)]),
    )
    .record(2, &null_body());
    let res = decode(&b.build()).unwrap();
    let strict = DecoderConfigs {
        strict_mode: true,
        ..Default::default()
    };
    assert!(matches!(
        res.records[0].polygons_with_configs(&strict),
        Err(DecodeError::Strict(DecodeWarning::OrphanHole { ring_index: 1 }))
    ));
    let lenient = res.records[0]
        .polygons_with_configs(&DecoderConfigs::default())
        .unwrap()
        .unwrap();
    assert_eq!(lenient.polygons.len(), 2);
    assert!(res.records[1].polygons_with_configs(&strict).unwrap().is_none());
}

#[test]
fn swap_xy_exchanges_axes() {
    let mut b = ShpBuilder::new(1);
    b.record(1, &point_body(1.0, 2.0));
    let configs = DecoderConfigs {
        swap_xy: true,
        ..Default::default()
    };
    let res = decode_with_configs(&b.build(), &configs).unwrap();
    assert_eq!(res.records, vec![ShapeRecord::Point { x: 2.0, y: 1.0 }]);
    assert_eq!((res.header.x_max, res.header.y_max), (100.0, 100.0));
}

fn sample_file() -> (Vec<u8>, Vec<usize>) {
    let mut b = ShpBuilder::new(5);
    b.record(1, &poly_body(5, &[cw_square(0.0, 0.0, 10.0), ccw_square(1.0, 1.0, 2.0)]))
        .record(2, &null_body())
        .record(3, &poly_body(5, &[cw_square(5.0, 5.0, 1.0)]));
    let buf = b.build();
    let mut boundaries = b.record_offsets.clone();
    boundaries.push(buf.len());
    (buf, boundaries)
}

proptest! {
    #[test]
    fn truncated_buffers_fail_with_eof(cut in 0usize..100_000) {
        let (buf, boundaries) = sample_file();
        let cut = cut % buf.len();
        // cutting exactly between records leaves a valid, shorter file
        prop_assume!(!boundaries.contains(&cut));
        let res = decode(&buf[..cut]);
        prop_assert!(
            matches!(res, Err(DecodeError::UnexpectedEof { .. })),
            "cut at {} gave {:?}",
            cut,
            res
        );
    }
}

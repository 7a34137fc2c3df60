use crate::geom::rect;
use crate::*;

#[test]
fn record_rects_preserve_field_order() {
    let rects = reconcile_record_rects(
        "0,0,10,10 10,0,20,10",
        &[],
        DecodeOptions::native(),
        RecordOptions::default(),
    )
    .unwrap();
    assert_eq!(
        rects,
        vec![rect(0.0, 0.0, 10.0, 10.0), rect(10.0, 0.0, 10.0, 10.0)]
    );
    assert_eq!(rects[0].size.width, 10.0);
    assert_eq!(rects[1].size.width, 10.0);
}

#[test]
fn record_rects_empty_input() {
    for raw in ["", "   "] {
        let rects = reconcile_record_rects(
            raw,
            &[],
            DecodeOptions::native(),
            RecordOptions::snapped(),
        )
        .unwrap();
        assert!(rects.is_empty());
    }
}

#[test]
fn record_rects_flip_to_top_left() {
    let rects = reconcile_record_rects(
        "0,0,10,10\n0,10,10,30",
        &[],
        DecodeOptions::top_left(30.0),
        RecordOptions::default(),
    )
    .unwrap();
    assert_eq!(
        rects,
        vec![rect(0.0, 20.0, 10.0, 10.0), rect(0.0, 0.0, 10.0, 20.0)]
    );
}

#[test]
fn record_rects_snap_to_nearest_drawing_coordinate() {
    let drawing = decode(
        "p 4 0 0 0 10 20 10 20 0 L 2 9.8 0 9.8 10",
        DecodeOptions::native(),
    )
    .unwrap();
    let rects = reconcile_record_rects(
        "0,0.2,10,10 10,0,20,9.9",
        &drawing,
        DecodeOptions::native(),
        RecordOptions::snapped(),
    )
    .unwrap();

    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].origin.x, 0.0);
    assert_eq!(rects[0].origin.y, 0.0);
    assert_eq!(rects[0].max_x(), 9.8);
    assert_eq!(rects[0].max_y(), 10.0);
    assert_eq!(rects[1].origin.x, 9.8);
    assert!((rects[1].max_x() - 20.0).abs() < 1e-9);
    assert_eq!(rects[1].max_y(), 10.0);
}

#[test]
fn record_rects_snap_in_the_target_coordinate_system() {
    let options = DecodeOptions::top_left(10.0);
    let drawing = decode("p 4 0 0 0 10 20 10 20 0", options).unwrap();
    let rects = reconcile_record_rects(
        "0.1,0.1,19.5,9.5",
        &drawing,
        options,
        RecordOptions::snapped(),
    )
    .unwrap();
    assert_eq!(rects, vec![rect(0.0, 0.0, 20.0, 10.0)]);
}

#[test]
fn record_rects_without_snap_candidates_are_left_alone() {
    let drawing = decode("c 7 -#000000 E 10 10 10 10", DecodeOptions::native()).unwrap();
    let rects = reconcile_record_rects(
        "0.5,0.5,9.5,9.5",
        &drawing,
        DecodeOptions::native(),
        RecordOptions::snapped(),
    )
    .unwrap();
    assert_eq!(rects, vec![rect(0.5, 0.5, 9.0, 9.0)]);
}

#[test]
fn record_rects_report_malformed_quadruples() {
    let err = reconcile_record_rects(
        "0,0,10",
        &[],
        DecodeOptions::native(),
        RecordOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.offset(), 0);
    assert!(matches!(err.reason(), Malformed::Expected { .. }));

    let err = reconcile_record_rects(
        "0,0,10,10 1,a,3,4",
        &[],
        DecodeOptions::native(),
        RecordOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::malformed(12, Malformed::InvalidNumber("a".to_string()))
    );

    let err = reconcile_record_rects(
        "0,0,1,1,2",
        &[],
        DecodeOptions::native(),
        RecordOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err.reason(), Malformed::Expected { .. }));
}

use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use xdot::geom::{point, rect, size};
use xdot::{
    Attributes, CoordinateSystem, DrawingAttribute, DrawingOp, DrawingOptions, Error,
    LayoutReader, Malformed, Spline,
};

fn attrs(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn graph() -> Attributes {
    attrs(&[("bb", "0,0,54,116")])
}

fn node_a() -> Attributes {
    attrs(&[
        ("pos", "27,98"),
        ("width", "0.75"),
        ("height", "0.5"),
        ("label", ""),
        ("_draw_", "c 7 -#000000 e 27 98 27 18 "),
        ("_ldraw_", "F 14 11 -Times-Roman c 7 -#000000 T 27 94.3 0 7 1 -A "),
    ])
}

#[test]
fn graph_bounding_box_sets_the_drawing_height() {
    let reader = LayoutReader::from_graph(&graph(), DrawingOptions::default()).unwrap();
    assert_eq!(reader.max_y(), 116.0);
    assert_eq!(reader.bounding_box(), rect(0.0, 0.0, 54.0, 116.0));

    let reader = LayoutReader::from_graph(&Attributes::default(), DrawingOptions::top_left()).unwrap();
    assert_eq!(reader.max_y(), 0.0);
    assert!(reader.bounding_box().is_empty());
}

#[test]
fn node_geometry_in_top_left_coordinates() {
    let reader = LayoutReader::from_graph(&graph(), DrawingOptions::top_left()).unwrap();
    let node = node_a();

    assert_eq!(reader.node_position(&node).unwrap(), Some(point(27.0, 18.0)));
    assert_eq!(reader.node_size(&node).unwrap(), Some(size(54.0, 36.0)));
    assert_eq!(
        reader.node_bounding_box(&node).unwrap(),
        Some(rect(0.0, 0.0, 54.0, 36.0))
    );

    let ops = reader.drawing(&node, DrawingAttribute::Draw).unwrap();
    assert_eq!(ops[1], DrawingOp::UnfilledEllipse(rect(0.0, 0.0, 54.0, 36.0)));

    let ops = reader.drawing(&node, DrawingAttribute::LabelDraw).unwrap();
    let Some(DrawingOp::Text(label)) = ops.last() else {
        panic!("unexpected label ops: {ops:?}");
    };
    assert_eq!(label.coord_system, CoordinateSystem::TopLeft);
    assert!((label.anchor.y - 21.7).abs() < 1e-9);
}

#[test]
fn absent_attributes_are_empty() {
    let reader = LayoutReader::from_graph(&graph(), DrawingOptions::top_left()).unwrap();
    let node = node_a();
    for attr in [
        DrawingAttribute::HeadArrowDraw,
        DrawingAttribute::TailArrowDraw,
        DrawingAttribute::HeadLabelDraw,
        DrawingAttribute::TailLabelDraw,
    ] {
        assert!(reader.drawing(&node, attr).unwrap().is_empty());
    }
    assert!(reader.record_rectangles(&node).unwrap().is_empty());

    let bare = Attributes::default();
    assert!(reader.edge_splines(&bare).unwrap().is_empty());
    assert_eq!(reader.first_spline(&bare).unwrap(), None);
    assert_eq!(reader.node_position(&bare).unwrap(), None);
    assert_eq!(reader.node_size(&bare).unwrap(), None);
    assert_eq!(reader.node_bounding_box(&bare).unwrap(), None);
}

#[test]
fn pinned_node_position() {
    let reader = LayoutReader::from_graph(&graph(), DrawingOptions::default()).unwrap();
    let node = attrs(&[("pos", "27,98!")]);
    assert_eq!(reader.node_position(&node).unwrap(), Some(point(27.0, 98.0)));
}

#[test]
fn edge_splines_with_arrow_tips() {
    let reader = LayoutReader::from_graph(&graph(), DrawingOptions::top_left()).unwrap();
    let edge = attrs(&[("pos", "e,27,36 27,72 27,64 27,54 27,46")]);

    let spline = reader.first_spline(&edge).unwrap().unwrap();
    assert_eq!(spline.start, None);
    assert_eq!(spline.end, Some(point(27.0, 80.0)));
    assert_eq!(
        spline.points,
        vec![
            point(27.0, 44.0),
            point(27.0, 52.0),
            point(27.0, 62.0),
            point(27.0, 70.0)
        ]
    );

    let edge = attrs(&[(
        "pos",
        "s,0,0 e,10,10 1,1 2,2 3,3 4,4;5,5 6,6 7,7 8,8",
    )]);
    let reader = LayoutReader::from_graph(&graph(), DrawingOptions::default()).unwrap();
    let splines = reader.edge_splines(&edge).unwrap();
    assert_eq!(splines.len(), 2);
    assert_eq!(splines[0].start, Some(point(0.0, 0.0)));
    assert_eq!(splines[0].end, Some(point(10.0, 10.0)));
    assert_eq!(splines[1].start, None);
    assert_eq!(splines[1].points.len(), 4);
    assert_eq!(
        serde_json::to_value(&splines[1]).unwrap(),
        json!({
            "start": null,
            "end": null,
            "points": [[5.0, 5.0], [6.0, 6.0], [7.0, 7.0], [8.0, 8.0]]
        })
    );
}

#[test]
fn record_rectangles_snap_when_enabled() {
    let graph = attrs(&[("bb", "0,0,108.5,36")]);
    let node = attrs(&[
        ("rects", "0.2,0,54.1,36 54.1,0,108.5,36"),
        (
            "_draw_",
            "c 7 -#000000 p 4 0 0 0 36 108.5 36 108.5 0 L 2 54 0 54 36 ",
        ),
    ]);

    let plain = LayoutReader::from_graph(&graph, DrawingOptions::top_left()).unwrap();
    let rects = plain.record_rectangles(&node).unwrap();
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].origin.x, 0.2);

    let snapping = LayoutReader::from_graph(
        &graph,
        DrawingOptions::top_left().with_snap_record_rects(true),
    )
    .unwrap();
    assert_eq!(
        snapping.record_rectangles(&node).unwrap(),
        vec![rect(0.0, 0.0, 54.0, 36.0), rect(54.0, 0.0, 54.5, 36.0)]
    );
}

#[test]
fn malformed_layout_attributes_report_offsets() {
    let err = LayoutReader::from_graph(&attrs(&[("bb", "0,0,54")]), DrawingOptions::default())
        .unwrap_err();
    assert_eq!(err.offset(), 0);
    assert!(matches!(err.reason(), Malformed::Expected { .. }));

    let reader = LayoutReader::from_graph(&graph(), DrawingOptions::default()).unwrap();
    let err = reader
        .node_position(&attrs(&[("pos", "27,x")]))
        .unwrap_err();
    assert_eq!(
        err,
        Error::malformed(3, Malformed::InvalidNumber("x".to_string()))
    );

    let err = reader
        .drawing(&attrs(&[("_draw_", "c 7 -#000000 Z")]), DrawingAttribute::Draw)
        .unwrap_err();
    assert!(err.is_unknown_directive());
    assert_eq!(err.offset(), 13);
}

#[test]
fn std_maps_are_attribute_sources() {
    let mut node: HashMap<String, String> = HashMap::new();
    node.insert("pos".to_string(), "1,2".to_string());
    let reader = LayoutReader::from_graph(&graph(), DrawingOptions::default()).unwrap();
    assert_eq!(reader.node_position(&node).unwrap(), Some(point(1.0, 2.0)));

    let edge: BTreeMap<String, String> = [("pos".to_string(), "1,2 3,4 5,6 7,8".to_string())]
        .into_iter()
        .collect();
    let spline: Option<Spline> = reader.first_spline(&&edge).unwrap();
    assert_eq!(spline.map(|s| s.points.len()), Some(4));
}

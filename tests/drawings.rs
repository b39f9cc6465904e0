mod common;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use common::*;

fn shape(id: &str, extra: Value) -> Value {
    let mut block = json!({ "kind": "drawing", "drawingKind": "vectorShape", "id": id });
    if let (Some(obj), Some(extra)) = (block.as_object_mut(), extra.as_object()) {
        obj.extend(extra.clone());
    }
    block
}

fn drawing_measure() -> Value {
    json!({ "kind": "drawing", "width": 100, "height": 50 })
}

fn drawing_fragment(id: &str, kind: &str) -> Value {
    json!({
        "kind": "drawing", "blockId": id, "drawingKind": kind,
        "x": 96, "y": 96, "width": 100, "height": 50
    })
}

fn single_shape_stream(block: Value) -> String {
    let painter = painter(vec![block], vec![drawing_measure()]);
    page_stream(&painter, &page(1, json!([drawing_fragment("s1", "vectorShape")])))
}

#[test]
fn filled_and_stroked_rectangle() {
    let stream = single_shape_stream(shape(
        "s1",
        json!({ "shapeKind": "rect", "fillColor": "#FF0000", "strokeColor": "#000000" }),
    ));
    assert_eq!(
        stream,
        "q\n\
         1 0 0 1 72.00 682.50 cm\n\
         0.00 0.00 75.00 37.50 re\n\
         W n\n\
         1 0 0 1 37.50 18.75 cm\n\
         1 0 0 1 -37.50 -18.75 cm\n\
         q\n\
         1.0000 0.0000 0.0000 rg\n\
         0.0000 0.0000 0.0000 RG\n\
         0.75 w\n\
         0.00 0.00 75.00 37.50 re\n\
         B\n\
         Q\n\
         Q\n"
    );
}

#[test]
fn ellipse_is_drawn_with_curves() {
    let stream = single_shape_stream(shape("s1", json!({ "shapeKind": "ellipse", "fillColor": "#00FF00" })));
    assert_eq!(stream.matches(" c\n").count(), 4);
    assert!(stream.contains("h\nf\n"));
}

#[test]
fn lines_are_never_filled() {
    let stream = single_shape_stream(shape(
        "s1",
        json!({ "shapeKind": "line", "fillColor": "#00FF00", "strokeColor": "#0000FF", "strokeWidth": 2 }),
    ));
    assert!(!stream.contains("rg"));
    assert!(stream.contains("1.50 w\n0.00 37.50 m\n75.00 0.00 l\nS\n"));
}

#[test]
fn unpainted_shape_only_sets_up_its_frame() {
    let stream = single_shape_stream(shape("s1", json!({ "shapeKind": "rect" })));
    assert!(!stream.contains(" re\nf\n"));
    assert!(!stream.contains("B\n"));
}

#[test]
fn missing_or_mismatched_drawings_are_skipped() {
    let painter = painter(
        vec![shape("s1", json!({ "fillColor": "#FF0000" }))],
        vec![drawing_measure()],
    );
    let stream = page_stream(&painter, &page(1, json!([drawing_fragment("ghost", "vectorShape")])));
    assert!(!stream.contains("W n"));
    let stream = page_stream(&painter, &page(1, json!([drawing_fragment("s1", "image")])));
    assert!(stream.is_empty());
}

#[test]
fn translucent_fill_uses_a_graphics_state() {
    let painter = painter(
        vec![shape(
            "s1",
            json!({ "fillColor": { "type": "solidWithAlpha", "color": "#00FF00", "alpha": 0.5 } }),
        )],
        vec![drawing_measure()],
    );
    let layout = layout(vec![json!({ "number": 1, "fragments": [drawing_fragment("s1", "vectorShape")] })]);
    let pdf = pdf_text(&painter.render(&layout).expect("render"));
    assert!(pdf.contains("/GS1 gs\n0.0000 1.0000 0.0000 rg\n"));
    assert!(pdf.contains("/ExtGState"));
    assert!(pdf.contains("/ca 0.5"));
    assert!(pdf.contains("/CA 0.5"));
}

#[test]
fn gradient_fill_paints_its_first_stop() {
    let stream = single_shape_stream(shape(
        "s1",
        json!({ "fillColor": { "type": "gradient", "stops": [
            { "position": 0, "color": "#0000FF" },
            { "position": 1, "color": "#FF0000" }
        ] } }),
    ));
    assert!(stream.contains("0.0000 0.0000 1.0000 rg\n"));
    assert!(!stream.contains("gs\n"));
}

#[test]
fn rotation_and_flips_turn_around_the_centre() {
    let stream = single_shape_stream(shape(
        "s1",
        json!({ "fillColor": "#FF0000", "geometry": { "rotation": 90, "flipH": true } }),
    ));
    let rotate = stream
        .find("0.0000 -1.0000 1.0000 0.0000 0.00 0.00 cm\n")
        .expect("rotation matrix");
    let flip = stream
        .find("-1.0000 0.0000 0.0000 1.0000 0.00 0.00 cm\n")
        .expect("flip matrix");
    let centre = stream.find("1 0 0 1 37.50 18.75 cm\n").expect("centre");
    assert!(centre < rotate && rotate < flip);
}

#[test]
fn intrinsic_size_is_scaled_onto_the_fragment() {
    let stream = single_shape_stream(shape(
        "s1",
        json!({ "fillColor": "#FF0000", "geometry": { "width": 200, "height": 100 } }),
    ));
    assert!(stream.contains("0.5000 0.0000 0.0000 0.5000 0.00 0.00 cm\n1 0 0 1 -75.00 -37.50 cm\n"));
    assert!(stream.contains("0.00 0.00 150.00 75.00 re\nf\n"));
}

#[test]
fn group_children_map_from_child_space() {
    let group = json!({
        "kind": "drawing", "drawingKind": "shapeGroup", "id": "g1",
        "groupTransform": { "width": 100, "height": 50, "childWidth": 200, "childHeight": 100 },
        "shapes": [
            { "shapeType": "rect", "attrs": { "x": 0, "y": 0, "width": 100, "height": 50, "fillColor": "#0000FF" } },
            { "shapeType": "image", "attrs": { "x": 100, "y": 50, "width": 100, "height": 50 } },
            { "shapeType": "rect", "attrs": { "x": 0, "y": 0, "width": 0, "height": 50, "fillColor": "#0000FF" } }
        ]
    });
    let painter = painter(vec![group], vec![drawing_measure()]);
    let stream = page_stream(&painter, &page(1, json!([drawing_fragment("g1", "shapeGroup")])));
    // top-left child lands at the top of the y-up frame
    assert!(stream.contains("0.0000 0.0000 1.0000 rg\n0.00 18.75 37.50 18.75 re\nf\n"));
    // image child without a fill is shown as a placeholder
    assert!(stream.contains("0.8510 0.8510 0.8510 rg\n37.50 0.00 37.50 18.75 re\nf\n"));
    assert_eq!(stream.matches(" re\nf\n").count(), 2);
}

#[test]
fn image_drawing_without_source_gets_a_placeholder() {
    let painter = painter(
        vec![json!({ "kind": "drawing", "drawingKind": "image", "id": "d1" })],
        vec![drawing_measure()],
    );
    let stream = page_stream(&painter, &page(1, json!([drawing_fragment("d1", "image")])));
    assert!(stream.contains("0.8510 0.8510 0.8510 rg\n0.00 0.00 75.00 37.50 re\nf\n"));
}

#[test]
fn image_drawing_paints_its_xobject() {
    let painter = painter(
        vec![json!({
            "kind": "drawing", "drawingKind": "image", "id": "d1",
            "src": data_url("image/jpeg", &tiny_jpeg(8, 4))
        })],
        vec![drawing_measure()],
    );
    let stream = page_stream(&painter, &page(1, json!([drawing_fragment("d1", "image")])));
    assert!(stream.contains("q\n75.0000 0.0000 0.0000 37.5000 0.00 0.00 cm\n/Im1 Do\nQ\n"));
}

#[test]
fn tables_are_outlined() {
    let painter = painter(
        vec![json!({ "kind": "table", "id": "t1" })],
        vec![json!({ "kind": "table", "totalWidth": 200, "totalHeight": 100 })],
    );
    let frag = json!({ "kind": "table", "blockId": "t1", "x": 96, "y": 96, "width": 200, "height": 100 });
    let stream = page_stream(&painter, &page(1, json!([frag])));
    assert_eq!(
        stream,
        "q\n0.7490 0.7490 0.7490 RG\n0.75 w\n72.00 645.00 150.00 75.00 re\nS\nQ\n"
    );
}

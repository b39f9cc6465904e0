mod common;

use layout_pdf::model::{PageDecoration, PageMargins};
use serde_json::json;

use common::*;

const SMALL_H: f32 = 500.0;

fn decorated_painter() -> layout_pdf::PdfPainter {
    painter(
        vec![
            paragraph("body", json!([text_run("Body")]), json!({})),
            paragraph("head", json!([text_run("Head")]), json!({})),
            paragraph("foot", json!([text_run("Foot")]), json!({})),
        ],
        vec![
            paragraph_measure(json!([line(0, 0, 0, 4, 32.0)])),
            paragraph_measure(json!([line(0, 0, 0, 4, 32.0)])),
            paragraph_measure(json!([line(0, 0, 0, 4, 32.0)])),
        ],
    )
}

fn footer(extra: serde_json::Value) -> PageDecoration {
    let mut value = json!({
        "fragments": [para_fragment("foot", 0, 1, 10.0, 2.0, 200.0)],
        "height": 50
    });
    if let (Some(obj), Some(extra)) = (value.as_object_mut(), extra.as_object()) {
        obj.extend(extra.clone());
    }
    decoration(value)
}

fn small_stream(painter: &layout_pdf::PdfPainter) -> String {
    let images = painter.resolve_images();
    painter
        .build_page_stream(&page(1, json!([])), SMALL_H, &images)
        .expect("page stream")
}

#[test]
fn footer_sits_on_the_bottom_of_its_band() {
    let painter = decorated_painter().with_footer_provider(footer(json!({})));
    // band 450 + (50 - 18) = 482; fragment y 484, baseline 496
    assert!(small_stream(&painter).contains("12.00 0 0 12.00 7.50 3.00 Tm\n"));
}

#[test]
fn footer_honours_explicit_content_height_and_margin() {
    let painter =
        decorated_painter().with_footer_provider(footer(json!({ "contentHeight": 40, "marginLeft": 40 })));
    // band 450 + (50 - 40) = 460; fragment y 462, baseline 474
    assert!(small_stream(&painter).contains("12.00 0 0 12.00 37.50 19.50 Tm\n"));
}

#[test]
fn header_is_offset_from_the_top() {
    let header = decoration(json!({
        "fragments": [para_fragment("head", 0, 1, 0.0, 0.0, 200.0)],
        "height": 40,
        "offset": 20
    }));
    let painter = decorated_painter().with_header_provider(header);
    // baseline 20 + 12 = 32px
    assert!(small_stream(&painter).contains("12.00 0 0 12.00 0.00 351.00 Tm\n"));
}

#[test]
fn header_body_footer_paint_in_order() {
    let header = decoration(json!({
        "fragments": [para_fragment("head", 0, 1, 0.0, 0.0, 200.0)],
        "height": 40
    }));
    let painter = decorated_painter()
        .with_header_provider(header)
        .with_footer_provider(footer(json!({})));
    let images = painter.resolve_images();
    let stream = painter
        .build_page_stream(&page(1, json!([para_fragment("body", 0, 1, 0.0, 100.0, 200.0)])), SMALL_H, &images)
        .expect("page stream");
    let order: Vec<usize> = ["(Head) Tj", "(Body) Tj", "(Foot) Tj"]
        .iter()
        .map(|needle| stream.find(needle).expect(needle))
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{stream}");
}

#[test]
fn providers_see_page_number_and_margins() {
    let header = |number: u32, margins: Option<&PageMargins>| -> Option<PageDecoration> {
        // Odd pages only, shifted by the page's left margin.
        (number % 2 == 1).then(|| {
            decoration(json!({
                "fragments": [para_fragment("head", 0, 1, 0.0, 0.0, 200.0)],
                "height": 40,
                "marginLeft": margins.map(|m| m.left).unwrap_or(0.0)
            }))
        })
    };
    let painter = decorated_painter().with_header_provider(header);
    let pages = (1..=2)
        .map(|n| json!({ "number": n, "margins": { "left": 96, "top": 96 }, "fragments": [] }))
        .collect();
    let images = painter.resolve_images();
    let layout = layout(pages);
    let first = painter
        .build_page_stream(&layout.pages[0], PAGE_H, &images)
        .expect("page 1");
    let second = painter
        .build_page_stream(&layout.pages[1], PAGE_H, &images)
        .expect("page 2");
    assert!(first.contains("12.00 0 0 12.00 72.00 783.00 Tm\n(Head) Tj"));
    assert!(second.is_empty());
}

#[test]
fn footer_fields_resolve_per_page() {
    let painter = painter(
        vec![paragraph(
            "foot",
            json!([
                text_run("Page "),
                { "kind": "text", "text": "0", "fontSize": 16, "token": "pageNumber" },
                text_run(" of "),
                { "kind": "text", "text": "0", "fontSize": 16, "token": "totalPageCount" }
            ]),
            json!({}),
        )],
        vec![paragraph_measure(json!([line(0, 0, 3, 1, 80.0)]))],
    )
    .with_footer_provider(decoration(json!({
        "fragments": [para_fragment("foot", 0, 1, 0.0, 0.0, 200.0)],
        "height": 40
    })));
    let pages = vec![
        json!({ "number": 1 }),
        json!({ "number": 2, "numberText": "ii" }),
        json!({ "number": 3 }),
    ];
    let pdf = pdf_text(&painter.render(&layout(pages)).expect("render"));
    assert!(pdf.contains("(Page ) Tj\n(1) Tj\n( of ) Tj\n(3) Tj"));
    assert!(pdf.contains("(ii) Tj"));
    assert!(pdf.contains("(Page ) Tj\n(3) Tj\n( of ) Tj\n(3) Tj"));
}

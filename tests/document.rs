mod common;

use layout_pdf::model::{Block, Measure};
use layout_pdf::{Error, PDF_MIME_TYPE, PdfPainter, RenderInput, RenderOptions};
use serde_json::json;

use common::*;

fn hello_painter() -> PdfPainter {
    painter(
        vec![paragraph("p1", json!([text_run("Hello")]), json!({}))],
        vec![paragraph_measure(json!([line(0, 0, 0, 5, 40.0)]))],
    )
}

#[test]
fn one_page_object_per_layout_page() {
    let painter = hello_painter();
    for n in [1usize, 3] {
        let pages = (1..=n)
            .map(|i| json!({ "number": i, "fragments": [para_fragment("p1", 0, 1, 96.0, 96.0, 624.0)] }))
            .collect();
        let bytes = painter.render(&layout(pages)).expect("render");
        let pdf = pdf_text(&bytes);
        assert!(pdf.starts_with("%PDF-1.4"));
        assert_eq!(count_page_objects(&pdf), n);
        assert!(pdf.contains("xref"));
        assert!(pdf.contains("trailer"));
        assert!(pdf.trim_end().ends_with("%%EOF"));
    }
}

#[test]
fn every_page_lists_the_standard_fonts() {
    let bytes = hello_painter()
        .render(&layout(vec![json!({ "number": 1, "fragments": [] })]))
        .expect("render");
    let pdf = pdf_text(&bytes);
    for base in ["Helvetica", "Helvetica-Bold", "Helvetica-Oblique", "Helvetica-BoldOblique"] {
        assert!(pdf.contains(&format!("/BaseFont /{base}")));
    }
    assert_eq!(pdf.matches("/WinAnsiEncoding").count(), 4);
    assert!(pdf.contains("/F4"));
}

#[test]
fn media_box_follows_page_size_override() {
    let painter = hello_painter();
    let layout = layout(vec![
        json!({ "number": 1, "fragments": [] }),
        json!({ "number": 2, "size": { "w": 400, "h": 500 }, "fragments": [] }),
    ]);
    let pdf = pdf_text(&painter.render(&layout).expect("render"));
    assert!(pdf.contains("/MediaBox [0 0 612 792]"));
    assert!(pdf.contains("/MediaBox [0 0 300 375]"));
}

#[test]
fn rejects_unpaired_blocks_and_measures() {
    let blocks: Vec<Block> = vec![
        serde_json::from_value(paragraph("p1", json!([]), json!({}))).unwrap(),
        serde_json::from_value(paragraph("p2", json!([]), json!({}))).unwrap(),
    ];
    let measures: Vec<Measure> = vec![serde_json::from_value(paragraph_measure(json!([]))).unwrap()];
    let err = PdfPainter::new(blocks, measures).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { blocks: 2, measures: 1 }));
}

#[test]
fn missing_paragraph_block_fails_the_render() {
    let painter = hello_painter();
    let layout = layout(vec![json!({
        "number": 1,
        "fragments": [para_fragment("ghost", 0, 1, 0.0, 0.0, 100.0)]
    })]);
    let err = painter.render(&layout).unwrap_err();
    assert!(matches!(err, Error::MissingBlock { ref block_id } if block_id == "ghost"));
}

#[test]
fn kind_mismatch_is_reported() {
    let painter = painter(
        vec![json!({ "kind": "image", "id": "p1" })],
        vec![json!({ "kind": "image", "width": 10, "height": 10 })],
    );
    let layout = layout(vec![json!({
        "number": 1,
        "fragments": [para_fragment("p1", 0, 1, 0.0, 0.0, 100.0)]
    })]);
    let err = painter.render(&layout).unwrap_err();
    assert!(matches!(err, Error::KindMismatch { expected: "paragraph", .. }));
    assert!(err.to_string().contains("p1"));
}

#[test]
fn later_duplicate_ids_win() {
    let painter = painter(
        vec![
            paragraph("p1", json!([text_run("First")]), json!({})),
            paragraph("p1", json!([text_run("Second")]), json!({})),
        ],
        vec![
            paragraph_measure(json!([line(0, 0, 0, 5, 40.0)])),
            paragraph_measure(json!([line(0, 0, 0, 6, 48.0)])),
        ],
    );
    let stream = page_stream(&painter, &page(1, json!([para_fragment("p1", 0, 1, 0.0, 0.0, 200.0)])));
    assert!(stream.contains("(Second) Tj"));
    assert!(!stream.contains("(First) Tj"));
}

#[test]
fn compression_hides_operators() {
    let painter = hello_painter().with_options(RenderOptions {
        compress_streams: true,
        ..RenderOptions::default()
    });
    let layout = layout(vec![json!({
        "number": 1,
        "fragments": [para_fragment("p1", 0, 1, 96.0, 96.0, 624.0)]
    })]);
    let pdf = pdf_text(&painter.render(&layout).expect("render"));
    assert!(pdf.contains("/FlateDecode"));
    assert!(!pdf.contains("(Hello) Tj"));
}

#[test]
fn json_bundle_round_trip() {
    let bundle = json!({
        "blocks": [paragraph("p1", json!([text_run("Bundle")]), json!({}))],
        "measures": [paragraph_measure(json!([line(0, 0, 0, 6, 48.0)]))],
        "layout": {
            "pageSize": { "w": PAGE_W, "h": PAGE_H },
            "pages": [{ "number": 1, "fragments": [para_fragment("p1", 0, 1, 96.0, 96.0, 624.0)] }]
        },
        "options": { "compressStreams": false }
    });
    let input = RenderInput::from_json(&bundle.to_string()).expect("bundle");
    assert!(input.options.raster_fallback);
    let (painter, layout) = input.into_painter().expect("painter");
    let pdf = pdf_text(&painter.render(&layout).expect("render"));
    assert!(pdf.contains("(Bundle) Tj"));
    assert_eq!(PDF_MIME_TYPE, "application/pdf");
}

#[test]
fn writes_file_from_json_bundle() {
    let dir = std::env::temp_dir().join(format!("layout-pdf-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("bundle.json");
    let output = dir.join("bundle.pdf");
    let bundle = json!({
        "blocks": [],
        "measures": [],
        "layout": { "pageSize": { "w": PAGE_W, "h": PAGE_H }, "pages": [{ "number": 1 }] }
    });
    std::fs::write(&input, bundle.to_string()).unwrap();
    layout_pdf::render_json_file(&input, &output, None).expect("render file");
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    std::fs::remove_dir_all(&dir).ok();
}

#![allow(dead_code)]

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use layout_pdf::PdfPainter;
use layout_pdf::model::{Block, Layout, Measure, Page, PageDecoration};
use serde_json::{Value, json};

/// Letter size in CSS pixels.
pub const PAGE_W: f32 = 816.0;
pub const PAGE_H: f32 = 1056.0;

pub fn text_run(text: &str) -> Value {
    json!({ "kind": "text", "text": text, "fontSize": 16 })
}

/// A 16px line (ascent 12) covering `[from_run:from_char, to_run:to_char)`.
pub fn line(from_run: usize, from_char: usize, to_run: usize, to_char: usize, width: f32) -> Value {
    json!({
        "fromRun": from_run, "fromChar": from_char,
        "toRun": to_run, "toChar": to_char,
        "width": width, "ascent": 12, "descent": 4, "lineHeight": 16
    })
}

pub fn paragraph(id: &str, runs: Value, attrs: Value) -> Value {
    json!({ "kind": "paragraph", "id": id, "runs": runs, "attrs": attrs })
}

pub fn paragraph_measure(lines: Value) -> Value {
    let count = lines.as_array().map(Vec::len).unwrap_or(0);
    json!({ "kind": "paragraph", "lines": lines, "totalHeight": 16.0 * count as f32 })
}

pub fn para_fragment(block_id: &str, from_line: usize, to_line: usize, x: f32, y: f32, width: f32) -> Value {
    json!({
        "kind": "para", "blockId": block_id,
        "fromLine": from_line, "toLine": to_line,
        "x": x, "y": y, "width": width
    })
}

pub fn page(number: u32, fragments: Value) -> Page {
    serde_json::from_value(json!({ "number": number, "fragments": fragments })).expect("page fixture")
}

pub fn layout(pages: Vec<Value>) -> Layout {
    serde_json::from_value(json!({ "pageSize": { "w": PAGE_W, "h": PAGE_H }, "pages": pages }))
        .expect("layout fixture")
}

pub fn decoration(value: Value) -> PageDecoration {
    serde_json::from_value(value).expect("decoration fixture")
}

pub fn painter(blocks: Vec<Value>, measures: Vec<Value>) -> PdfPainter {
    let _ = env_logger::try_init();
    let blocks: Vec<Block> = blocks
        .into_iter()
        .map(|b| serde_json::from_value(b).expect("block fixture"))
        .collect();
    let measures: Vec<Measure> = measures
        .into_iter()
        .map(|m| serde_json::from_value(m).expect("measure fixture"))
        .collect();
    PdfPainter::new(blocks, measures).expect("painter")
}

/// Content stream of a single letter-size page.
pub fn page_stream(painter: &PdfPainter, page: &Page) -> String {
    let images = painter.resolve_images();
    painter
        .build_page_stream(page, PAGE_H, &images)
        .expect("page stream")
}

pub fn pdf_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// `/Type /Page` objects, not counting the page tree node.
pub fn count_page_objects(pdf: &str) -> usize {
    pdf.matches("/Type /Page").count() - pdf.matches("/Type /Pages").count()
}

/// Text objects (`BT` .. `ET`) of a content stream, in paint order.
pub fn text_objects(stream: &str) -> Vec<&str> {
    stream
        .split("BT\n")
        .skip(1)
        .filter_map(|chunk| chunk.split("ET\n").next())
        .collect()
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Smallest marker sequence the frame scanner accepts: SOI, SOF0, EOI.
pub fn tiny_jpeg(width: u16, height: u16) -> Vec<u8> {
    let mut v = vec![0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08];
    v.extend_from_slice(&height.to_be_bytes());
    v.extend_from_slice(&width.to_be_bytes());
    v.push(3);
    for id in 1..=3u8 {
        v.extend_from_slice(&[id, 0x11, 0x00]);
    }
    v.extend_from_slice(&[0xFF, 0xD9]);
    v
}

pub fn rgb_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}

pub fn rgba_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 120, 200, 128]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}

mod error;
mod fonts;
pub mod geometry;
pub mod images;
mod lookup;
pub mod model;
mod painter;
mod pdf;

pub use error::Error;
pub use painter::{DecorationProvider, PDF_MIME_TYPE, PdfPainter, RenderInput, RenderOptions};

use std::path::Path;
use std::time::Instant;

/// Read a JSON render bundle from `input`, paint it and write the PDF to
/// `output`. `overrides` replaces the bundle's own options when given.
pub fn render_json_file(input: &Path, output: &Path, overrides: Option<RenderOptions>) -> Result<(), Error> {
    let t0 = Instant::now();

    let json = std::fs::read_to_string(input)?;
    let mut bundle = RenderInput::from_json(&json)?;
    if let Some(options) = overrides {
        bundle.options = options;
    }
    let (painter, layout) = bundle.into_painter()?;
    let t_parse = t0.elapsed();

    let bytes = painter.render(&layout)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

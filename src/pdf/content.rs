use std::fmt::Write;

use crate::geometry::{Rgb, fmt_fine, fmt_num, rgb_operands};

/// Growable PDF content-stream buffer. All operands are already in points
/// with a bottom-left origin; the builder only formats and appends.
#[derive(Default)]
pub(crate) struct ContentStream {
    buf: String,
}

impl ContentStream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }

    fn op(&mut self, line: std::fmt::Arguments<'_>) -> &mut Self {
        let _ = self.buf.write_fmt(line);
        self.buf.push('\n');
        self
    }

    pub(crate) fn save_state(&mut self) -> &mut Self {
        self.op(format_args!("q"))
    }

    pub(crate) fn restore_state(&mut self) -> &mut Self {
        self.op(format_args!("Q"))
    }

    pub(crate) fn set_fill_rgb(&mut self, color: Rgb) -> &mut Self {
        self.op(format_args!("{} rg", rgb_operands(color)))
    }

    pub(crate) fn set_stroke_rgb(&mut self, color: Rgb) -> &mut Self {
        self.op(format_args!("{} RG", rgb_operands(color)))
    }

    pub(crate) fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(format_args!("{} w", fmt_num(width)))
    }

    pub(crate) fn set_line_cap(&mut self, cap: u8) -> &mut Self {
        self.op(format_args!("{cap} J"))
    }

    /// `[] 0 d` restores solid lines.
    pub(crate) fn set_dash(&mut self, dashes: &[f32]) -> &mut Self {
        let parts: Vec<String> = dashes.iter().map(|d| fmt_num(*d)).collect();
        self.op(format_args!("[{}] 0 d", parts.join(" ")))
    }

    pub(crate) fn set_ext_gstate(&mut self, name: &str) -> &mut Self {
        self.op(format_args!("/{name} gs"))
    }

    pub(crate) fn transform(&mut self, m: [f32; 6]) -> &mut Self {
        self.op(format_args!(
            "{} {} {} {} {} {} cm",
            fmt_fine(m[0]),
            fmt_fine(m[1]),
            fmt_fine(m[2]),
            fmt_fine(m[3]),
            fmt_num(m[4]),
            fmt_num(m[5])
        ))
    }

    pub(crate) fn translate(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(format_args!("1 0 0 1 {} {} cm", fmt_num(x), fmt_num(y)))
    }

    pub(crate) fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> &mut Self {
        self.op(format_args!("{} {} {} {} re", fmt_num(x), fmt_num(y), fmt_num(w), fmt_num(h)))
    }

    pub(crate) fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(format_args!("{} {} m", fmt_num(x), fmt_num(y)))
    }

    pub(crate) fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(format_args!("{} {} l", fmt_num(x), fmt_num(y)))
    }

    pub(crate) fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> &mut Self {
        self.op(format_args!(
            "{} {} {} {} {} {} c",
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2),
            fmt_num(x3),
            fmt_num(y3)
        ))
    }

    pub(crate) fn close_path(&mut self) -> &mut Self {
        self.op(format_args!("h"))
    }

    pub(crate) fn fill(&mut self) -> &mut Self {
        self.op(format_args!("f"))
    }

    pub(crate) fn stroke(&mut self) -> &mut Self {
        self.op(format_args!("S"))
    }

    pub(crate) fn fill_stroke(&mut self) -> &mut Self {
        self.op(format_args!("B"))
    }

    /// Intersect the clip with the current path and discard it.
    pub(crate) fn clip(&mut self) -> &mut Self {
        self.op(format_args!("W n"))
    }

    /// Filled axis-aligned rectangle in its own graphics state.
    pub(crate) fn fill_rect(&mut self, color: Rgb, x: f32, y: f32, w: f32, h: f32) -> &mut Self {
        self.save_state()
            .set_fill_rgb(color)
            .rect(x, y, w, h)
            .fill()
            .restore_state()
    }

    /// Stroked straight rule in its own graphics state.
    pub(crate) fn stroke_line(
        &mut self,
        color: Rgb,
        width: f32,
        dashes: &[f32],
        from: (f32, f32),
        to: (f32, f32),
    ) -> &mut Self {
        self.save_state().set_stroke_rgb(color).set_line_width(width);
        if !dashes.is_empty() {
            self.set_dash(dashes);
        }
        self.move_to(from.0, from.1)
            .line_to(to.0, to.1)
            .stroke()
            .restore_state()
    }

    pub(crate) fn x_object(&mut self, name: &str) -> &mut Self {
        self.op(format_args!("/{name} Do"))
    }

    pub(crate) fn begin_text(&mut self) -> &mut Self {
        self.op(format_args!("BT"))
    }

    pub(crate) fn end_text(&mut self) -> &mut Self {
        self.op(format_args!("ET"))
    }

    pub(crate) fn set_font(&mut self, name: &str, size: f32) -> &mut Self {
        self.op(format_args!("/{name} {} Tf", fmt_fine(size)))
    }

    /// Text matrix scaled uniformly by `scale` with its origin at `(x, y)`.
    pub(crate) fn set_text_matrix(&mut self, scale: f32, x: f32, y: f32) -> &mut Self {
        self.op(format_args!(
            "{} 0 0 {} {} {} Tm",
            fmt_num(scale),
            fmt_num(scale),
            fmt_num(x),
            fmt_num(y)
        ))
    }

    pub(crate) fn set_word_spacing(&mut self, spacing: f32) -> &mut Self {
        self.op(format_args!("{} Tw", fmt_fine(spacing)))
    }

    /// `encoded` must already be a PDF string operand (`(...)` or `<...>`).
    pub(crate) fn show(&mut self, encoded: &str) -> &mut Self {
        self.op(format_args!("{encoded} Tj"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_keep_fixed_precision() {
        let mut content = ContentStream::new();
        content
            .set_fill_rgb([255, 0, 0])
            .begin_text()
            .set_font("F1", 1.0)
            .set_text_matrix(12.0, 57.0, 708.0)
            .set_word_spacing(0.0)
            .end_text()
            .rect(0.0, -0.0, 75.0, 37.5);
        assert_eq!(
            content.into_string(),
            "1.0000 0.0000 0.0000 rg\n\
             BT\n\
             /F1 1.0000 Tf\n\
             12.00 0 0 12.00 57.00 708.00 Tm\n\
             0.0000 Tw\n\
             ET\n\
             0.00 0.00 75.00 37.50 re\n"
        );
    }
}

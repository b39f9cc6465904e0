//! Unit conversion, number formatting and colour helpers shared by the
//! content-stream emitters.

/// Points per CSS pixel (72 / 96).
pub const PX_TO_PT: f32 = 72.0 / 96.0;

pub fn px_to_pt(px: f32) -> f32 {
    px * PX_TO_PT
}

/// Flip a top-left pixel y coordinate into bottom-left PDF points.
pub fn y_to_pt(page_height_px: f32, y_px: f32) -> f32 {
    (page_height_px - y_px) * PX_TO_PT
}

/// Coordinates and lengths: two decimals, no negative zero.
pub fn fmt_num(v: f32) -> String {
    let s = format!("{v:.2}");
    if s == "-0.00" { "0.00".to_string() } else { s }
}

/// Colour components, matrix coefficients and text-state ratios: four decimals.
pub fn fmt_fine(v: f32) -> String {
    let s = format!("{v:.4}");
    if s == "-0.0000" { "0.0000".to_string() } else { s }
}

pub type Rgb = [u8; 3];

/// Parse `#rgb`, `#rrggbb` or the same without `#`. `auto`, `none` and
/// malformed values yield `None`.
pub fn parse_hex_color(value: &str) -> Option<Rgb> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some([expand(0)?, expand(1)?, expand(2)?])
        }
        _ => None,
    }
}

/// `r g b` operands in the 0..1 range, e.g. `0.9020 0.9569 0.9255`.
pub fn rgb_operands(color: Rgb) -> String {
    format!(
        "{} {} {}",
        fmt_fine(color[0] as f32 / 255.0),
        fmt_fine(color[1] as f32 / 255.0),
        fmt_fine(color[2] as f32 / 255.0)
    )
}

/// Blend `amount` (0..1) of the way toward white.
pub fn lighten(color: Rgb, amount: f32) -> Rgb {
    let amount = amount.clamp(0.0, 1.0);
    color.map(|c| (c as f32 + (255.0 - c as f32) * amount).round() as u8)
}

/// Dash array (in points) for a border style. `Some(vec![])` is a solid
/// rule; `None` means the side is not painted.
pub fn dash_pattern(style: Option<&str>, width_pt: f32) -> Option<Vec<f32>> {
    let w = width_pt.max(0.5);
    match style.map(str::to_ascii_lowercase).as_deref() {
        None | Some("single" | "solid" | "thick" | "double" | "triple" | "inset" | "outset") => {
            Some(vec![])
        }
        Some("dashed" | "dashsmallgap") => Some(vec![3.0 * w, 2.0 * w]),
        Some("dotted") => Some(vec![w, w]),
        Some("dotdash" | "dashdot") => Some(vec![3.0 * w, w, w, w]),
        Some("dotdotdash") => Some(vec![3.0 * w, w, w, w, w, w]),
        Some("none" | "nil") => None,
        Some(other) => {
            log::debug!("Unrecognised border style {other:?}; side skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_pixels_to_points() {
        assert_eq!(fmt_num(px_to_pt(96.0)), "72.00");
        assert_eq!(fmt_num(y_to_pt(500.0, 482.0)), "13.50");
        assert_eq!(fmt_num(-0.001), "0.00");
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#e6f4ec"), Some([0xe6, 0xf4, 0xec]));
        assert_eq!(parse_hex_color("FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#abc"), Some([0xaa, 0xbb, 0xcc]));
        assert_eq!(parse_hex_color("auto"), None);
        assert_eq!(rgb_operands([0xcb, 0x0e, 0x47]), "0.7961 0.0549 0.2784");
    }

    #[test]
    fn lightens_toward_white() {
        assert_eq!(lighten([0, 0, 0], 0.75), [191, 191, 191]);
        assert_eq!(lighten([255, 255, 255], 0.75), [255, 255, 255]);
    }

    #[test]
    fn border_styles_map_to_dashes() {
        assert_eq!(dash_pattern(None, 1.0), Some(vec![]));
        assert_eq!(dash_pattern(Some("dotted"), 1.0), Some(vec![1.0, 1.0]));
        assert_eq!(dash_pattern(Some("none"), 1.0), None);
        assert_eq!(dash_pattern(Some("wave"), 1.0), None);
    }
}

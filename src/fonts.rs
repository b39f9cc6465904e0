use std::fmt::Write;

/// The four base-14 Helvetica faces every document carries. Requested font
/// families are ignored; only the bold/italic flags pick a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum StandardFont {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl StandardFont {
    pub(crate) const ALL: [StandardFont; 4] = [
        StandardFont::Regular,
        StandardFont::Bold,
        StandardFont::Italic,
        StandardFont::BoldItalic,
    ];

    pub(crate) fn select(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => StandardFont::BoldItalic,
            (true, false) => StandardFont::Bold,
            (false, true) => StandardFont::Italic,
            (false, false) => StandardFont::Regular,
        }
    }

    /// Resource name used in page `/Font` dictionaries and `Tf` operators.
    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Regular => "F1",
            StandardFont::Bold => "F2",
            StandardFont::Italic => "F3",
            StandardFont::BoldItalic => "F4",
        }
    }

    pub(crate) fn base_font(self) -> &'static str {
        match self {
            StandardFont::Regular => "Helvetica",
            StandardFont::Bold => "Helvetica-Bold",
            StandardFont::Italic => "Helvetica-Oblique",
            StandardFont::BoldItalic => "Helvetica-BoldOblique",
        }
    }
}

/// Map a char into the small WinAnsi subset the standard fonts are used with.
/// Anything outside it becomes `?`.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0000..=0x007F => c as u8,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x2026 => 0x85,
        0x00B0 => 0xB0,
        _ => b'?',
    }
}

/// Encode text as a PDF string operand: a literal `(...)` for pure ASCII,
/// otherwise a `<...>` hex string of WinAnsi bytes. Control characters in
/// literals are octal-escaped.
pub(crate) fn encode_pdf_string(text: &str) -> String {
    if text.is_ascii() {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('(');
        for c in text.chars() {
            match c {
                '(' | ')' | '\\' => {
                    out.push('\\');
                    out.push(c);
                }
                c if c.is_ascii_control() => {
                    let _ = write!(out, "\\{:03o}", c as u32);
                }
                _ => out.push(c),
            }
        }
        out.push(')');
        out
    } else {
        let mut out = String::with_capacity(text.len() * 2 + 2);
        out.push('<');
        for c in text.chars() {
            let _ = write!(out, "{:02X}", char_to_winansi(c));
        }
        out.push('>');
        out
    }
}

use pdf_writer::{Name, Pdf, Ref};

/// Resource name of the single font every page references.
pub(crate) const FONT_RESOURCE: &str = "F1";

/// Glyph advance measurement, queried once per candidate line while wrapping.
pub trait TextMeasure {
    /// Advance width of `text` at `font_size`, in points.
    fn width(&self, text: &str, font_size: f32) -> f32;
}

/// Metrics of the standard Type1 Helvetica face (no embedding required).
#[derive(Clone, Copy, Debug, Default)]
pub struct Helvetica;

impl Helvetica {
    /// Width of a single character in 1000-units. Control characters and
    /// anything outside printable ASCII measure zero.
    pub fn char_width_1000(ch: char) -> f32 {
        match ch as u32 {
            0x20..=0x7E => HELVETICA_WIDTHS[(ch as u32 - 0x20) as usize] as f32,
            _ => 0.0,
        }
    }
}

impl TextMeasure for Helvetica {
    fn width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| Helvetica::char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }
}

/// Helvetica AFM advance widths for WinAnsi 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015,                                             // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // 'N'..'Z'
    278, 278, 278, 469, 556, 333,                                                   // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // 'n'..'z'
    334, 260, 334, 584,                                                             // '{'..'~'
];

/// Encode text for a WinAnsi `Str`. Only printable ASCII survives sanitizing,
/// so anything else is dropped rather than mapped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x20..=0x7E => Some(c as u8),
            _ => None,
        })
        .collect()
}

/// Write the Helvetica font dictionary at `font_ref`.
pub(crate) fn register_helvetica(pdf: &mut Pdf, font_ref: Ref) {
    pdf.type1_font(font_ref)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    log::debug!("register_font: Helvetica (standard 14, not embedded)");
}

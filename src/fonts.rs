use pdf_writer::{Name, Pdf, Ref};

/// The base-14 faces the certificate uses. None of them are embedded; viewers
/// supply the glyphs, we only need the advance widths for line breaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    TimesRoman,
    TimesBold,
    TimesItalic,
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 5] = [
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
    ];

    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams.
    pub fn pdf_name(self) -> &'static str {
        match self {
            StandardFont::TimesRoman => "F1",
            StandardFont::TimesBold => "F2",
            StandardFont::TimesItalic => "F3",
            StandardFont::Helvetica => "F4",
            StandardFont::HelveticaBold => "F5",
        }
    }

    fn ascii_widths(self) -> &'static [u16; 95] {
        match self {
            StandardFont::TimesRoman => &TIMES_ROMAN_WIDTHS,
            StandardFont::TimesBold => &TIMES_BOLD_WIDTHS,
            StandardFont::TimesItalic => &TIMES_ITALIC_WIDTHS,
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    pub fn ascender_ratio(self) -> f32 {
        match self {
            StandardFont::TimesRoman | StandardFont::TimesBold | StandardFont::TimesItalic => {
                0.683
            }
            StandardFont::Helvetica | StandardFont::HelveticaBold => 0.718,
        }
    }

    /// Width of a single character in 1000-units. Printable ASCII comes from
    /// the AFM tables; the rest of WinAnsi falls back to a typical lowercase width
    /// and unmappable characters measure as the `?` they are written as.
    pub fn char_width_1000(self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        match byte {
            32..=126 => self.ascii_widths()[(byte - 32) as usize] as f32,
            0 => self.char_width_1000('?'),
            _ => match self {
                StandardFont::Helvetica | StandardFont::HelveticaBold => 556.0,
                _ => 500.0,
            },
        }
    }

    pub fn word_width(self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub fn space_width(self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }
}

// AFM advance widths for WinAnsi 32..=126.
#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC_WIDTHS: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page become `?`.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match char_to_winansi(c) {
            0 => b'?',
            b => b,
        })
        .collect()
}

/// Write one Type1 font dictionary per face and return the resource pairs.
pub(crate) fn register_fonts(
    pdf: &mut Pdf,
    alloc: &mut impl FnMut() -> Ref,
) -> Vec<(StandardFont, Ref)> {
    StandardFont::ALL
        .iter()
        .map(|&font| {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(font.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            log::debug!("register_font: {} as {}", font.base_font(), font.pdf_name());
            (font, font_ref)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_widths_match_afm() {
        assert_eq!(StandardFont::TimesRoman.char_width_1000(' '), 250.0);
        assert_eq!(StandardFont::TimesRoman.char_width_1000('M'), 889.0);
        assert_eq!(StandardFont::TimesBold.char_width_1000('W'), 1000.0);
        assert_eq!(StandardFont::Helvetica.char_width_1000('i'), 222.0);
        assert_eq!(StandardFont::HelveticaBold.char_width_1000('~'), 584.0);
    }

    #[test]
    fn word_width_scales_with_size() {
        let w10 = StandardFont::TimesRoman.word_width("Moisture", 10.0);
        let w20 = StandardFont::TimesRoman.word_width("Moisture", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-3);
        // M o i s t u r e = 889+500+278+389+278+500+333+444
        assert!((w10 - 36.11).abs() < 1e-2);
    }

    #[test]
    fn winansi_encoding_maps_dash_and_replaces_unknown() {
        assert_eq!(to_winansi_bytes("a\u{2013}b"), vec![b'a', 0x96, b'b']);
        assert_eq!(to_winansi_bytes("\u{4E2D}"), vec![b'?']);
        assert_eq!(to_winansi_bytes("µg"), vec![0xB5, b'g']);
    }

    #[test]
    fn non_ascii_winansi_uses_fallback_width() {
        assert_eq!(StandardFont::TimesRoman.char_width_1000('\u{2013}'), 500.0);
        assert_eq!(StandardFont::Helvetica.char_width_1000('é'), 556.0);
        assert_eq!(StandardFont::Helvetica.char_width_1000('\u{4E2D}'), 556.0);
    }
}

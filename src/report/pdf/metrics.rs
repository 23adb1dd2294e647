//! Glyph widths for the standard Times faces and greedy line wrapping.
//!
//! Widths are the Adobe AFM advance widths (1/1000 em) for the printable
//! ASCII range. Other WinAnsi glyphs fall back to an average width, which is
//! close enough for wrapping decisions.

use super::styles::Font;

#[rustfmt::skip]
const TIMES_ROMAN_ASCII: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_ASCII: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

const FALLBACK_WIDTH: u16 = 500;

/// Map a character to its WinAnsiEncoding byte; unmappable characters become `?`.
pub fn winansi_byte(ch: char) -> u8 {
    match ch {
        '\t' => b' ',
        ' '..='~' => ch as u8,
        '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => b'?',
    }
}

pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars().map(winansi_byte).collect()
}

fn byte_width(font: Font, byte: u8) -> u16 {
    let table = match font {
        Font::TimesRoman => &TIMES_ROMAN_ASCII,
        Font::TimesBold => &TIMES_BOLD_ASCII,
    };
    match byte {
        0x20..=0x7e => table[(byte - 0x20) as usize],
        0x91 | 0x92 => 333,
        0x85 | 0x97 => 1000,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points when set in `font` at `size`.
pub fn string_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|ch| byte_width(font, winansi_byte(ch)) as u32)
        .sum();
    units as f32 * size / 1000.0
}

/// Break `text` into lines no wider than `max_width`. Explicit newlines are
/// honoured; words wider than a whole line are split between characters.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let space = string_width(" ", font, size);
    let mut lines = Vec::new();

    for hard_line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in hard_line.split_whitespace() {
            let word_width = string_width(word, font, size);

            if !current.is_empty() && current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
            } else {
                let mut pieces = split_long_word(word, font, size, max_width);
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    current_width = string_width(&last, font, size);
                    current = last;
                }
            }
        }

        lines.push(current);
    }

    lines
}

fn split_long_word(word: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;

    for ch in word.chars() {
        let w = byte_width(font, winansi_byte(ch)) as f32 * size / 1000.0;
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width() {
        // "Hi" = H(722) + i(278) = 1000 units
        assert!((string_width("Hi", Font::TimesRoman, 10.0) - 10.0).abs() < 1e-4);
        assert!((string_width("W", Font::TimesBold, 10.0) - 10.0).abs() < 1e-4);
        assert_eq!(string_width("", Font::TimesRoman, 12.0), 0.0);
    }

    #[test]
    fn test_winansi_mapping() {
        assert_eq!(encode_winansi("Café"), vec![b'C', b'a', b'f', 0xe9]);
        assert_eq!(winansi_byte('\u{2019}'), 0x92);
        assert_eq!(winansi_byte('—'), 0x97);
        assert_eq!(winansi_byte('漢'), b'?');
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        let lines = wrap_text("Activity Report", Font::TimesRoman, 10.0, 500.0);
        assert_eq!(lines, vec!["Activity Report"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, Font::TimesRoman, 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(string_width(line, Font::TimesRoman, 10.0) <= 60.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_honours_newlines() {
        let lines = wrap_text("first\n\nsecond", Font::TimesRoman, 10.0, 400.0);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, Font::TimesRoman, 10.0, 100.0);
        assert!(lines.len() >= 10);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_text("   \n ", Font::TimesRoman, 10.0, 100.0).is_empty());
    }
}

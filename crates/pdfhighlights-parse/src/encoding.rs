//! Byte-to-text decoding for simple fonts and PDF text strings.

use std::collections::HashMap;

use encoding_rs::Encoding;

/// Base encoding named by a font's `/Encoding` (or its `/BaseEncoding`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseEncoding {
    #[default]
    Standard,
    WinAnsi,
    MacRoman,
}

impl BaseEncoding {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "StandardEncoding" => Some(BaseEncoding::Standard),
            "WinAnsiEncoding" => Some(BaseEncoding::WinAnsi),
            "MacRomanEncoding" => Some(BaseEncoding::MacRoman),
            _ => None,
        }
    }

    fn decode_byte(self, code: u8) -> String {
        match (self, code) {
            // StandardEncoding differs from ASCII on the quote glyphs.
            (BaseEncoding::Standard, b'\'') => "\u{2019}".to_string(),
            (BaseEncoding::Standard, b'`') => "\u{2018}".to_string(),
            (BaseEncoding::Standard, 0x20..=0x7E) => char::from(code).to_string(),
            (BaseEncoding::MacRoman, _) => decode_with(encoding_rs::MACINTOSH, &[code]),
            _ => decode_with(encoding_rs::WINDOWS_1252, &[code]),
        }
    }
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> String {
    let (decoded, _) = encoding.decode_without_bom_handling(bytes);
    decoded.into_owned()
}

/// One-byte font encoding: a base table plus `/Differences` overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleEncoding {
    base: BaseEncoding,
    differences: HashMap<u8, String>,
}

impl SimpleEncoding {
    pub fn new(base: BaseEncoding) -> Self {
        Self {
            base,
            differences: HashMap::new(),
        }
    }

    /// Override `code` with the text for `glyph_name`. Unknown glyph names
    /// leave the base mapping in place.
    pub fn set_difference(&mut self, code: u8, glyph_name: &str) {
        if let Some(text) = glyph_to_text(glyph_name) {
            self.differences.insert(code, text);
        }
    }

    pub fn decode(&self, code: u8) -> String {
        match self.differences.get(&code) {
            Some(text) => text.clone(),
            None => self.base.decode_byte(code),
        }
    }
}

/// Unicode text for an Adobe glyph name.
///
/// Covers single letters, digits, the common punctuation and ligature names
/// and the `uniXXXX` / `uXXXX` forms.
pub fn glyph_to_text(name: &str) -> Option<String> {
    let base = name.split('.').next().unwrap_or(name);

    if base.len() == 1 && base.is_ascii() {
        return Some(base.to_string());
    }
    if let Some(hex) = base.strip_prefix("uni") {
        return utf16_hex(hex);
    }
    if let Some(hex) = base.strip_prefix('u').filter(|h| (4..=6).contains(&h.len())) {
        if let Some(ch) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
            return Some(ch.to_string());
        }
    }

    let text = match base {
        "zero" => "0",
        "one" => "1",
        "two" => "2",
        "three" => "3",
        "four" => "4",
        "five" => "5",
        "six" => "6",
        "seven" => "7",
        "eight" => "8",
        "nine" => "9",
        "space" | "nbspace" => " ",
        "exclam" => "!",
        "quotedbl" => "\"",
        "numbersign" => "#",
        "dollar" => "$",
        "percent" => "%",
        "ampersand" => "&",
        "quotesingle" => "'",
        "parenleft" => "(",
        "parenright" => ")",
        "asterisk" => "*",
        "plus" => "+",
        "comma" => ",",
        "hyphen" | "minus" => "-",
        "period" => ".",
        "slash" => "/",
        "colon" => ":",
        "semicolon" => ";",
        "less" => "<",
        "equal" => "=",
        "greater" => ">",
        "question" => "?",
        "at" => "@",
        "bracketleft" => "[",
        "backslash" => "\\",
        "bracketright" => "]",
        "asciicircum" => "^",
        "underscore" => "_",
        "grave" => "`",
        "braceleft" => "{",
        "bar" => "|",
        "braceright" => "}",
        "asciitilde" => "~",
        "quoteleft" => "\u{2018}",
        "quoteright" => "\u{2019}",
        "quotedblleft" => "\u{201C}",
        "quotedblright" => "\u{201D}",
        "quotesinglbase" => "\u{201A}",
        "quotedblbase" => "\u{201E}",
        "endash" => "\u{2013}",
        "emdash" => "\u{2014}",
        "bullet" => "\u{2022}",
        "ellipsis" => "\u{2026}",
        "dagger" => "\u{2020}",
        "daggerdbl" => "\u{2021}",
        "degree" => "\u{00B0}",
        "copyright" => "\u{00A9}",
        "registered" => "\u{00AE}",
        "trademark" => "\u{2122}",
        "section" => "\u{00A7}",
        "paragraph" => "\u{00B6}",
        "fi" => "fi",
        "fl" => "fl",
        "ff" => "ff",
        "ffi" => "ffi",
        "ffl" => "ffl",
        "germandbls" => "\u{00DF}",
        "eacute" => "\u{00E9}",
        "egrave" => "\u{00E8}",
        "agrave" => "\u{00E0}",
        "adieresis" => "\u{00E4}",
        "odieresis" => "\u{00F6}",
        "udieresis" => "\u{00FC}",
        "idieresis" => "\u{00EF}",
        "ccedilla" => "\u{00E7}",
        "ntilde" => "\u{00F1}",
        "Adieresis" => "\u{00C4}",
        "Odieresis" => "\u{00D6}",
        "Udieresis" => "\u{00DC}",
        "Eacute" => "\u{00C9}",
        _ => return None,
    };
    Some(text.to_string())
}

fn utf16_hex(hex: &str) -> Option<String> {
    if hex.is_empty() || hex.len() % 4 != 0 {
        return None;
    }
    let units = hex
        .as_bytes()
        .chunks(4)
        .map(|chunk| {
            std::str::from_utf8(chunk)
                .ok()
                .and_then(|s| u16::from_str_radix(s, 16).ok())
        })
        .collect::<Option<Vec<u16>>>()?;
    String::from_utf16(&units).ok()
}

/// Decode a PDF text string (annotation `/T`, `/Contents`, ...).
///
/// UTF-16BE and UTF-8 are recognised by their byte order marks; anything else
/// is PDFDocEncoding, which agrees with Windows-1252 on the printable range.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_with(encoding_rs::UTF_16BE, rest);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    decode_with(encoding_rs::WINDOWS_1252, bytes)
}

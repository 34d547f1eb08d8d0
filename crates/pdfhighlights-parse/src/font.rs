//! Font loading: glyph widths and code-to-text decoding.
//!
//! Only what text positioning needs is read. Simple fonts (Type1, TrueType,
//! Type3) use one-byte codes with `/Widths` and an encoding; composite Type0
//! fonts use two-byte codes with the descendant's `/W` and `/DW`.

use std::collections::HashMap;

use crate::cmap::ToUnicode;
use crate::encoding::{BaseEncoding, SimpleEncoding};
use crate::error::BackendError;
use crate::lopdf_backend::{decode_stream, object_to_f64, resolve_ref};
use crate::standard_fonts::{self, StandardWidths};

/// Width used when a font provides nothing better (1/1000 em).
const DEFAULT_WIDTH: f64 = 500.0;

/// Default `/DW` for CID fonts.
const DEFAULT_CID_WIDTH: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
enum WidthTable {
    Simple { first_char: u32, widths: Vec<f64> },
    Cid { widths: HashMap<u32, f64> },
}

/// One decoded glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub code: u32,
    pub text: String,
    /// Advance width in glyph space (1/1000 em).
    pub width: f64,
    /// Single-byte code 32, the only code word spacing applies to.
    pub is_word_space: bool,
}

/// A font ready for show-text operators.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    pub base_font: String,
    widths: WidthTable,
    missing_width: f64,
    standard: Option<&'static StandardWidths>,
    to_unicode: Option<ToUnicode>,
    encoding: SimpleEncoding,
    code_bytes: usize,
}

impl LoadedFont {
    /// Load a font dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Font`] if a Type0 font has no usable
    /// descendant font.
    pub fn load(doc: &lopdf::Document, dict: &lopdf::Dictionary) -> Result<Self, BackendError> {
        let base_font = name_entry(dict, b"BaseFont").unwrap_or_default();
        let to_unicode = dict
            .get(b"ToUnicode")
            .ok()
            .map(|obj| resolve_ref(doc, obj))
            .and_then(|obj| obj.as_stream().ok())
            .and_then(|stream| decode_stream(stream).ok())
            .and_then(|data| ToUnicode::parse(&data).ok());

        if name_entry(dict, b"Subtype").as_deref() == Some("Type0") {
            return Self::load_type0(doc, dict, base_font, to_unicode);
        }

        let first_char = dict
            .get(b"FirstChar")
            .ok()
            .and_then(|o| object_to_f64(resolve_ref(doc, o)).ok())
            .map_or(0, |v| v.max(0.0) as u32);
        let widths: Vec<f64> = dict
            .get(b"Widths")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_array().ok())
            .map(|arr| {
                arr.iter()
                    .map(|w| object_to_f64(resolve_ref(doc, w)).unwrap_or(0.0))
                    .collect()
            })
            .unwrap_or_default();

        let standard = standard_fonts::lookup(&base_font);
        let missing_width = descriptor_missing_width(doc, dict).unwrap_or(if widths.is_empty() {
            DEFAULT_WIDTH
        } else {
            0.0
        });

        Ok(Self {
            base_font,
            widths: WidthTable::Simple { first_char, widths },
            missing_width,
            standard,
            to_unicode,
            encoding: simple_encoding(doc, dict),
            code_bytes: 1,
        })
    }

    fn load_type0(
        doc: &lopdf::Document,
        dict: &lopdf::Dictionary,
        base_font: String,
        to_unicode: Option<ToUnicode>,
    ) -> Result<Self, BackendError> {
        let descendant = dict
            .get(b"DescendantFonts")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_array().ok())
            .and_then(|arr| arr.first())
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_dict().ok())
            .ok_or_else(|| {
                BackendError::Font(format!("Type0 font {base_font} has no descendant font"))
            })?;

        let missing_width = descendant
            .get(b"DW")
            .ok()
            .and_then(|o| object_to_f64(resolve_ref(doc, o)).ok())
            .unwrap_or(DEFAULT_CID_WIDTH);
        let widths = descendant
            .get(b"W")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_array().ok())
            .map(|arr| cid_widths(doc, arr))
            .unwrap_or_default();

        Ok(Self {
            base_font,
            widths: WidthTable::Cid { widths },
            missing_width,
            standard: None,
            to_unicode,
            encoding: SimpleEncoding::default(),
            code_bytes: 2,
        })
    }

    /// Font used when `Tf` names a resource that does not exist.
    pub fn fallback(resource_name: &str) -> Self {
        Self {
            base_font: resource_name.to_string(),
            widths: WidthTable::Simple {
                first_char: 0,
                widths: Vec::new(),
            },
            missing_width: DEFAULT_WIDTH,
            standard: None,
            to_unicode: None,
            encoding: SimpleEncoding::new(BaseEncoding::WinAnsi),
            code_bytes: 1,
        }
    }

    /// Whether codes can be turned into text other than by guessing.
    pub fn has_text_mapping(&self) -> bool {
        self.code_bytes == 1 || self.to_unicode.is_some()
    }

    pub fn width(&self, code: u32) -> f64 {
        match &self.widths {
            WidthTable::Simple { first_char, widths } => code
                .checked_sub(*first_char)
                .and_then(|i| widths.get(i as usize).copied())
                .or_else(|| self.standard.map(|s| s.width(code)))
                .unwrap_or(self.missing_width),
            WidthTable::Cid { widths } => {
                widths.get(&code).copied().unwrap_or(self.missing_width)
            }
        }
    }

    fn text_for(&self, code: u32) -> String {
        if let Some(text) = self.to_unicode.as_ref().and_then(|c| c.lookup(code)) {
            return text.to_string();
        }
        match u8::try_from(code) {
            Ok(byte) if self.code_bytes == 1 => self.encoding.decode(byte),
            // Composite font without ToUnicode: codes are often Unicode already.
            _ => char::from_u32(code)
                .filter(|c| !c.is_control())
                .map(String::from)
                .unwrap_or_default(),
        }
    }

    /// Split a show-text string into glyphs.
    pub fn decode(&self, bytes: &[u8]) -> Vec<Glyph> {
        bytes
            .chunks(self.code_bytes)
            .map(|chunk| {
                let code = chunk
                    .iter()
                    .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
                Glyph {
                    code,
                    text: self.text_for(code),
                    width: self.width(code),
                    is_word_space: self.code_bytes == 1 && code == 32,
                }
            })
            .collect()
    }
}

fn name_entry(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key)
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(|n| String::from_utf8_lossy(n).into_owned())
}

fn descriptor_missing_width(doc: &lopdf::Document, dict: &lopdf::Dictionary) -> Option<f64> {
    let descriptor = dict
        .get(b"FontDescriptor")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())?;
    descriptor
        .get(b"MissingWidth")
        .ok()
        .and_then(|o| object_to_f64(resolve_ref(doc, o)).ok())
}

fn simple_encoding(doc: &lopdf::Document, dict: &lopdf::Dictionary) -> SimpleEncoding {
    let Some(obj) = dict.get(b"Encoding").ok().map(|o| resolve_ref(doc, o)) else {
        return SimpleEncoding::default();
    };

    if let Ok(name) = obj.as_name() {
        let base = BaseEncoding::from_name(&String::from_utf8_lossy(name)).unwrap_or_default();
        return SimpleEncoding::new(base);
    }

    let Ok(enc_dict) = obj.as_dict() else {
        return SimpleEncoding::default();
    };
    let base = name_entry(enc_dict, b"BaseEncoding")
        .and_then(|n| BaseEncoding::from_name(&n))
        .unwrap_or_default();
    let mut encoding = SimpleEncoding::new(base);

    // [code /name /name ... code /name ...]: names take consecutive codes.
    if let Some(differences) = enc_dict
        .get(b"Differences")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_array().ok())
    {
        let mut code: Option<u8> = None;
        for item in differences {
            match item {
                lopdf::Object::Integer(i) => code = u8::try_from(*i).ok(),
                lopdf::Object::Name(glyph) => {
                    if let Some(c) = code {
                        encoding.set_difference(c, &String::from_utf8_lossy(glyph));
                        code = c.checked_add(1);
                    }
                }
                _ => {}
            }
        }
    }

    encoding
}

/// Parse a CID `/W` array: `c [w1 w2 ...]` and `c_first c_last w` forms.
fn cid_widths(doc: &lopdf::Document, array: &[lopdf::Object]) -> HashMap<u32, f64> {
    let mut widths = HashMap::new();
    let items: Vec<&lopdf::Object> = array.iter().map(|o| resolve_ref(doc, o)).collect();
    let mut i = 0;

    while i < items.len() {
        let Ok(first) = object_to_f64(items[i]) else {
            i += 1;
            continue;
        };
        let first = first.max(0.0) as u32;

        match items.get(i + 1) {
            Some(lopdf::Object::Array(list)) => {
                for (offset, w) in list.iter().enumerate() {
                    if let Ok(w) = object_to_f64(resolve_ref(doc, w)) {
                        widths.insert(first + offset as u32, w);
                    }
                }
                i += 2;
            }
            Some(last) => {
                let last = object_to_f64(last).map_or(first, |v| v.max(0.0) as u32);
                if let Some(w) = items.get(i + 2).and_then(|o| object_to_f64(o).ok()) {
                    // Ranges beyond the CID space are damaged; cap them.
                    for cid in first..=last.min(first.saturating_add(0xFFFF)) {
                        widths.insert(cid, w);
                    }
                }
                i += 3;
            }
            None => break,
        }
    }

    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Dictionary, Object, Stream, dictionary};

    fn simple_font(extra: Vec<(&str, Object)>) -> Dictionary {
        let mut dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        };
        for (key, value) in extra {
            dict.set(key, value);
        }
        dict
    }

    #[test]
    fn standard_font_without_widths() {
        let doc = lopdf::Document::with_version("1.5");
        let font = LoadedFont::load(&doc, &simple_font(Vec::new())).unwrap();
        let glyphs = font.decode(b"Hi ");
        assert_eq!(glyphs.len(), 3);
        assert_eq!(glyphs[0].text, "H");
        assert_eq!(glyphs[0].width, 722.0);
        assert_eq!(glyphs[1].width, 222.0);
        assert!(glyphs[2].is_word_space);
    }

    #[test]
    fn explicit_widths_take_precedence() {
        let doc = lopdf::Document::with_version("1.5");
        let font = LoadedFont::load(
            &doc,
            &simple_font(vec![
                ("FirstChar", Object::Integer(65)),
                ("Widths", vec![Object::Integer(100), Object::Integer(200)].into()),
            ]),
        )
        .unwrap();
        assert_eq!(font.width(65), 100.0);
        assert_eq!(font.width(66), 200.0);
        // Outside /Widths falls back to the standard table.
        assert_eq!(font.width(u32::from(b'i')), 222.0);
    }

    #[test]
    fn differences_apply_to_consecutive_codes() {
        let doc = lopdf::Document::with_version("1.5");
        let font = LoadedFont::load(
            &doc,
            &simple_font(vec![(
                "Encoding",
                Object::Dictionary(dictionary! {
                    "BaseEncoding" => "WinAnsiEncoding",
                    "Differences" => vec![
                        Object::Integer(1),
                        Object::Name(b"f".to_vec()),
                        Object::Name(b"fi".to_vec()),
                    ],
                }),
            )]),
        )
        .unwrap();
        let text: String = font.decode(&[1, 2, 0xE9]).into_iter().map(|g| g.text).collect();
        assert_eq!(text, "ffié");
    }

    #[test]
    fn to_unicode_overrides_encoding() {
        let mut doc = lopdf::Document::with_version("1.5");
        let cmap = Stream::new(
            Dictionary::new(),
            b"1 beginbfchar <41> <005A> endbfchar".to_vec(),
        );
        let cmap_id = doc.add_object(cmap);
        let font = LoadedFont::load(
            &doc,
            &simple_font(vec![("ToUnicode", Object::Reference(cmap_id))]),
        )
        .unwrap();
        assert_eq!(font.decode(b"AB")[0].text, "Z");
        assert_eq!(font.decode(b"AB")[1].text, "B");
    }

    #[test]
    fn type0_font_uses_two_byte_codes() {
        let doc = lopdf::Document::with_version("1.5");
        let dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "ABCDEF+NotoSans",
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Dictionary(dictionary! {
                "Type" => "Font",
                "Subtype" => "CIDFontType2",
                "DW" => Object::Integer(900),
                "W" => vec![
                    Object::Integer(65),
                    Object::Array(vec![Object::Integer(600), Object::Integer(650)]),
                    Object::Integer(100),
                    Object::Integer(102),
                    Object::Integer(400),
                ],
            })],
        };
        let font = LoadedFont::load(&doc, &dict).unwrap();
        let glyphs = font.decode(&[0x00, 0x41, 0x00, 0x42, 0x00, 0x65, 0x01, 0x00]);
        assert_eq!(glyphs.len(), 4);
        assert_eq!(glyphs[0].text, "A");
        assert_eq!(glyphs[0].width, 600.0);
        assert_eq!(glyphs[1].width, 650.0);
        assert_eq!(glyphs[2].width, 400.0);
        assert_eq!(glyphs[3].width, 900.0);
        assert!(!glyphs.iter().any(|g| g.is_word_space));
        assert!(!font.has_text_mapping());
    }

    #[test]
    fn type0_without_descendant_is_an_error() {
        let doc = lopdf::Document::with_version("1.5");
        let dict = dictionary! { "Subtype" => "Type0", "BaseFont" => "Broken" };
        assert!(matches!(
            LoadedFont::load(&doc, &dict),
            Err(BackendError::Font(_))
        ));
    }

    #[test]
    fn fallback_font() {
        let font = LoadedFont::fallback("F9");
        assert_eq!(font.base_font, "F9");
        assert_eq!(font.width(u32::from(b'M')), DEFAULT_WIDTH);
        assert_eq!(font.decode(b"ok")[1].text, "k");
    }
}

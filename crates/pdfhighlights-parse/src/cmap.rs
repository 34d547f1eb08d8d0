//! `/ToUnicode` CMap reader.
//!
//! A ToUnicode stream is PostScript, but the parts that matter (`bfchar` and
//! `bfrange` blocks) lex cleanly with the content stream lexer: each
//! `endbfchar` / `endbfrange` keyword arrives as an operation carrying the
//! hex strings of its block.

use std::collections::HashMap;

use crate::content::{Operand, parse_content};
use crate::error::BackendError;

/// Character code to Unicode text mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToUnicode {
    mappings: HashMap<u32, String>,
    /// Byte width of codes, from `begincodespacerange` (or the first mapping).
    code_width: Option<usize>,
}

impl ToUnicode {
    /// Parse a decoded ToUnicode stream.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Font`] when the stream cannot be lexed.
    pub fn parse(data: &[u8]) -> Result<Self, BackendError> {
        let operations = parse_content(data)
            .map_err(|e| BackendError::Font(format!("unreadable ToUnicode CMap: {e}")))?;
        let mut cmap = ToUnicode::default();

        for op in &operations {
            match op.operator.as_str() {
                "endcodespacerange" => {
                    if let Some(Operand::String(low)) = op.operands.first() {
                        cmap.code_width.get_or_insert(low.len());
                    }
                }
                "endbfchar" => {
                    for pair in op.operands.chunks_exact(2) {
                        if let (Operand::String(src), Operand::String(dst)) = (&pair[0], &pair[1]) {
                            cmap.note_width(src.len());
                            cmap.mappings.insert(code_of(src), utf16_be(dst));
                        }
                    }
                }
                "endbfrange" => {
                    for triple in op.operands.chunks_exact(3) {
                        cmap.add_range(&triple[0], &triple[1], &triple[2]);
                    }
                }
                _ => {}
            }
        }

        Ok(cmap)
    }

    fn note_width(&mut self, width: usize) {
        self.code_width.get_or_insert(width);
    }

    fn add_range(&mut self, low: &Operand, high: &Operand, dst: &Operand) {
        let (Operand::String(low), Operand::String(high)) = (low, high) else {
            return;
        };
        self.note_width(low.len());
        let (low, high) = (code_of(low), code_of(high));
        if high < low {
            return;
        }

        match dst {
            // <00> <02> [<0041> <0042> <0043>]
            Operand::Array(targets) => {
                for (code, target) in (low..=high).zip(targets) {
                    if let Operand::String(bytes) = target {
                        self.mappings.insert(code, utf16_be(bytes));
                    }
                }
            }
            // <00> <02> <0041>: the last code unit increments across the range.
            Operand::String(start) => {
                let mut units = utf16_units(start);
                let Some(last) = units.len().checked_sub(1) else {
                    return;
                };
                // Ranges are capped at one byte's worth of codes.
                for code in (low..=high).take(256) {
                    self.mappings
                        .insert(code, String::from_utf16_lossy(&units));
                    units[last] = units[last].wrapping_add(1);
                }
            }
            _ => {}
        }
    }

    pub fn lookup(&self, code: u32) -> Option<&str> {
        self.mappings.get(&code).map(String::as_str)
    }

    /// Byte width of character codes declared by this CMap, if any.
    pub fn code_width(&self) -> Option<usize> {
        self.code_width
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Big-endian integer value of a code string.
fn code_of(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

fn utf16_units(bytes: &[u8]) -> Vec<u16> {
    if bytes.len() == 1 {
        return vec![u16::from(bytes[0])];
    }
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}

fn utf16_be(bytes: &[u8]) -> String {
    String::from_utf16_lossy(&utf16_units(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
3 beginbfchar
<0003> <0020>
<0024> <0041>
<00B7> <00660069>
endbfchar
2 beginbfrange
<0044> <0046> <0061>
<0050> <0051> [<0078> <D835DC00>]
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

    #[test]
    fn reads_bfchar_entries() {
        let cmap = ToUnicode::parse(SAMPLE).unwrap();
        assert_eq!(cmap.lookup(0x0003), Some(" "));
        assert_eq!(cmap.lookup(0x0024), Some("A"));
        assert_eq!(cmap.lookup(0x00B7), Some("fi"));
    }

    #[test]
    fn reads_incrementing_range() {
        let cmap = ToUnicode::parse(SAMPLE).unwrap();
        assert_eq!(cmap.lookup(0x0044), Some("a"));
        assert_eq!(cmap.lookup(0x0045), Some("b"));
        assert_eq!(cmap.lookup(0x0046), Some("c"));
        assert_eq!(cmap.lookup(0x0047), None);
    }

    #[test]
    fn reads_array_range_with_surrogates() {
        let cmap = ToUnicode::parse(SAMPLE).unwrap();
        assert_eq!(cmap.lookup(0x0050), Some("x"));
        assert_eq!(cmap.lookup(0x0051), Some("\u{1D400}"));
    }

    #[test]
    fn code_width_from_codespace() {
        let cmap = ToUnicode::parse(SAMPLE).unwrap();
        assert_eq!(cmap.code_width(), Some(2));
        assert_eq!(cmap.len(), 8);
    }

    #[test]
    fn single_byte_codes() {
        let cmap = ToUnicode::parse(b"1 beginbfchar <41> <0058> endbfchar").unwrap();
        assert_eq!(cmap.code_width(), Some(1));
        assert_eq!(cmap.lookup(0x41), Some("X"));
    }

    #[test]
    fn empty_stream() {
        let cmap = ToUnicode::parse(b"").unwrap();
        assert!(cmap.is_empty());
        assert_eq!(cmap.code_width(), None);
    }
}

//! Printable-ASCII advance widths for common standard fonts.
//!
//! Used when a simple font has no `/Widths`. Values are Adobe AFM advances in
//! 1/1000 em for codes 32..=126; codes outside that range use the font's
//! fallback width.

/// Width table for one base font.
#[derive(Debug)]
pub struct StandardWidths {
    pub name: &'static str,
    ascii: Option<&'static [u16; 95]>,
    /// Width for codes without an ASCII entry (and every code when monospaced).
    pub fallback: u16,
}

impl StandardWidths {
    /// Advance width of `code` in glyph space.
    pub fn width(&self, code: u32) -> f64 {
        let width = match (self.ascii, code) {
            (Some(table), 32..=126) => table[(code - 32) as usize],
            _ => self.fallback,
        };
        f64::from(width)
    }
}

/// Find widths for a `/BaseFont`, ignoring any `ABCDEF+` subset tag.
///
/// Common metric-compatible aliases (Arial, Times New Roman, Courier New)
/// map onto their standard counterparts.
pub fn lookup(base_font: &str) -> Option<&'static StandardWidths> {
    let name = strip_subset_tag(base_font);
    let (family, style) = name.split_once([',', '-']).unwrap_or((name, ""));
    let bold = style.contains("Bold");

    match family {
        "Helvetica" | "Arial" | "ArialMT" => Some(if bold { &HELVETICA_BOLD } else { &HELVETICA }),
        "Times" | "TimesNewRoman" | "TimesNewRomanPSMT" => {
            Some(if bold { &TIMES_BOLD } else { &TIMES_ROMAN })
        }
        "Courier" | "CourierNew" | "CourierNewPSMT" => Some(&COURIER),
        _ => None,
    }
}

/// `ABCDEF+Name` becomes `Name`.
pub fn strip_subset_tag(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.bytes().all(|b| b.is_ascii_uppercase()) => rest,
        _ => name,
    }
}

static COURIER: StandardWidths = StandardWidths {
    name: "Courier",
    ascii: None,
    fallback: 600,
};

#[rustfmt::skip]
static HELVETICA: StandardWidths = StandardWidths {
    name: "Helvetica",
    ascii: Some(&[
        // space ! " # $ % & ' ( ) * + , - . /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9 : ; < = > ?
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
        // @ A-O
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
        // P-Z [ \ ] ^ _
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
        // ` a-o
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
        // p-z { | } ~
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
    ]),
    fallback: 556,
};

#[rustfmt::skip]
static HELVETICA_BOLD: StandardWidths = StandardWidths {
    name: "Helvetica-Bold",
    ascii: Some(&[
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
        975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
        333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
        611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
    ]),
    fallback: 611,
};

#[rustfmt::skip]
static TIMES_ROMAN: StandardWidths = StandardWidths {
    name: "Times-Roman",
    ascii: Some(&[
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
        921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
        556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
        333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
        500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
    ]),
    fallback: 500,
};

#[rustfmt::skip]
static TIMES_BOLD: StandardWidths = StandardWidths {
    name: "Times-Bold",
    ascii: Some(&[
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
        930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
        611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
        333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
        556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
    ]),
    fallback: 500,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_ascii_widths() {
        let font = lookup("Helvetica").unwrap();
        assert_eq!(font.width(u32::from(b' ')), 278.0);
        assert_eq!(font.width(u32::from(b'H')), 722.0);
        assert_eq!(font.width(u32::from(b'i')), 222.0);
        assert_eq!(font.width(u32::from(b'~')), 584.0);
        assert_eq!(font.width(200), 556.0);
    }

    #[test]
    fn courier_is_monospaced() {
        let font = lookup("Courier-BoldOblique").unwrap();
        assert_eq!(font.name, "Courier");
        assert_eq!(font.width(u32::from(b'i')), 600.0);
        assert_eq!(font.width(u32::from(b'W')), 600.0);
    }

    #[test]
    fn bold_variants_and_aliases() {
        assert_eq!(lookup("Helvetica-Bold").unwrap().name, "Helvetica-Bold");
        assert_eq!(lookup("Helvetica-BoldOblique").unwrap().name, "Helvetica-Bold");
        assert_eq!(lookup("Arial,Bold").unwrap().name, "Helvetica-Bold");
        assert_eq!(lookup("ArialMT").unwrap().name, "Helvetica");
        assert_eq!(lookup("Times-Roman").unwrap().name, "Times-Roman");
        assert_eq!(lookup("TimesNewRomanPS-BoldMT").map(|f| f.name), None);
        assert_eq!(lookup("Times-Bold").unwrap().name, "Times-Bold");
    }

    #[test]
    fn subset_tag_is_ignored() {
        assert_eq!(lookup("ABCDEF+Helvetica").unwrap().name, "Helvetica");
        assert_eq!(strip_subset_tag("abcdef+Helvetica"), "abcdef+Helvetica");
        assert_eq!(strip_subset_tag("Helvetica"), "Helvetica");
    }

    #[test]
    fn unknown_font() {
        assert!(lookup("Symbol").is_none());
        assert!(lookup("Garamond").is_none());
    }
}

//! Annotation input and output types.
//!
//! [`RawAnnotation`] is the typed view of a page annotation dictionary that
//! the parsing layer produces; only the fields the highlight pipeline reads
//! are kept. [`AnnotationRecord`] is what the pipeline hands to callers.

use crate::highlight::Highlight;

/// Annotation `/Subtype`, as far as highlight extraction cares.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnotationType {
    Highlight,
    /// Any other `/Subtype`, kept verbatim.
    Other(String),
}

impl AnnotationType {
    /// Parse a `/Subtype` name.
    pub fn from_subtype(subtype: &str) -> Self {
        match subtype {
            "Highlight" => Self::Highlight,
            other => Self::Other(other.to_string()),
        }
    }
}

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert a `/C` colour array (components in `0.0..=1.0`).
    ///
    /// One component is gray, three are RGB, four are CMYK. An empty array
    /// means "transparent" and any other length is malformed; both yield
    /// `None`.
    pub fn from_components(components: &[f64]) -> Option<Self> {
        match *components {
            [gray] => {
                let v = unit_to_byte(gray);
                Some(Self::new(v, v, v))
            }
            [r, g, b] => Some(Self::new(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))),
            [c, m, y, k] => Some(Self::new(
                unit_to_byte((1.0 - c) * (1.0 - k)),
                unit_to_byte((1.0 - m) * (1.0 - k)),
                unit_to_byte((1.0 - y) * (1.0 - k)),
            )),
            _ => None,
        }
    }

    /// CSS colour with the fixed highlight alpha of 0.5.
    pub fn to_rgba(&self) -> String {
        format!("rgba({}, {}, {}, 0.5)", self.r, self.g, self.b)
    }
}

fn unit_to_byte(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// A page annotation as read from the document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawAnnotation {
    pub subtype: AnnotationType,
    /// Flat `/QuadPoints`, 8 numbers per quad. `None` when absent or malformed.
    pub quad_points: Option<Vec<f64>>,
    /// `/C`. `None` when absent, empty or malformed.
    pub color: Option<Rgb>,
    /// `/T`.
    pub author: Option<String>,
    /// `/M`, raw PDF date string.
    pub modification_date: Option<String>,
}

impl RawAnnotation {
    /// A bare annotation of the given subtype with no optional fields.
    pub fn new(subtype: &str) -> Self {
        Self {
            subtype: AnnotationType::from_subtype(subtype),
            quad_points: None,
            color: None,
            author: None,
            modification_date: None,
        }
    }

    pub fn is_highlight(&self) -> bool {
        self.subtype == AnnotationType::Highlight
    }

    /// Colour used for output; black when the annotation has none.
    pub fn color_or_default(&self) -> Rgb {
        self.color.unwrap_or(Rgb::BLACK)
    }
}

/// One highlight as delivered to callers.
///
/// With the `serde` feature the JSON shape is
/// `{"highlight": {"text", "colorRgba"}, "author", "modificationDate", "page"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AnnotationRecord {
    pub highlight: Highlight,
    pub author: String,
    pub modification_date: String,
    /// 1-based page number.
    pub page: usize,
}

impl AnnotationRecord {
    /// Package reconstructed `text` with the metadata of `annot`.
    pub fn from_annotation(annot: &RawAnnotation, text: String, page: usize) -> Self {
        Self {
            highlight: Highlight {
                text,
                color_rgba: annot.color_or_default().to_rgba(),
            },
            author: annot.author.clone().unwrap_or_default(),
            modification_date: annot.modification_date.clone().unwrap_or_default(),
            page,
        }
    }
}

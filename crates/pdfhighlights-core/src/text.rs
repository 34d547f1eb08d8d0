//! Positioned text runs and reading order.

use std::cmp::Ordering;

/// One run of glyphs shown at a single position.
///
/// `origin_x`/`origin_y` is the baseline start in page space and `width` the
/// run's total advance in the same units.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    pub text: String,
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
}

impl TextRun {
    pub fn new(text: impl Into<String>, origin_x: f64, origin_y: f64, width: f64) -> Self {
        Self {
            text: text.into(),
            origin_x,
            origin_y,
            width,
        }
    }

    /// X coordinate where the run ends.
    pub fn end_x(&self) -> f64 {
        self.origin_x + self.width
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Reading-order comparator: higher baselines first, then left to right.
pub fn reading_order(a: &TextRun, b: &TextRun) -> Ordering {
    b.origin_y
        .total_cmp(&a.origin_y)
        .then_with(|| a.origin_x.total_cmp(&b.origin_x))
}

/// Sort runs top-to-bottom then left-to-right.
///
/// The sort is stable: runs sharing both coordinates keep their content
/// stream order.
pub fn sort_reading_order(runs: &mut [TextRun]) {
    runs.sort_by(reading_order);
}

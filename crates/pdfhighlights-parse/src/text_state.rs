//! Text state for the content stream interpreter.
//!
//! Tracks the text and line matrices (`BT`, `Tm`, `Td`, `TD`, `T*`) and the
//! text parameters that belong to the graphics state (`Tc`, `Tw`, `Tz`,
//! `TL`, `Tf`, `Ts`), which `q`/`Q` save and restore.

use pdfhighlights_core::{Ctm, Point};

/// Text parameters saved by `q` and restored by `Q`.
///
/// The text and line matrices are not part of this: they only live inside a
/// `BT`/`ET` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParams {
    pub char_spacing: f64,
    pub word_spacing: f64,
    /// Horizontal scaling in percent (100 = normal).
    pub h_scaling: f64,
    pub leading: f64,
    /// Resource name of the current font (`/F1`), without the slash.
    pub font_name: String,
    pub font_size: f64,
    pub rise: f64,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scaling: 100.0,
            leading: 0.0,
            font_name: String::new(),
            font_size: 0.0,
            rise: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextState {
    pub params: TextParams,
    text_matrix: Ctm,
    line_matrix: Ctm,
}

impl TextState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text_matrix(&self) -> &Ctm {
        &self.text_matrix
    }

    pub fn line_matrix(&self) -> &Ctm {
        &self.line_matrix
    }

    /// Horizontal scaling as a fraction (1.0 = 100%).
    pub fn h_scale(&self) -> f64 {
        self.params.h_scaling / 100.0
    }

    /// `BT`
    pub fn begin_text(&mut self) {
        self.text_matrix = Ctm::identity();
        self.line_matrix = Ctm::identity();
    }

    /// `Tm`: replaces both matrices.
    pub fn set_text_matrix(&mut self, m: [f64; 6]) {
        self.text_matrix = Ctm::from_array(m);
        self.line_matrix = self.text_matrix;
    }

    /// `Td`: offset from the start of the current line.
    pub fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = Ctm::new(1.0, 0.0, 0.0, 1.0, tx, ty).concat(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    /// `TD`: like `Td` and sets the leading to `-ty`.
    pub fn move_line_set_leading(&mut self, tx: f64, ty: f64) {
        self.params.leading = -ty;
        self.move_line(tx, ty);
    }

    /// `T*`
    pub fn next_line(&mut self) {
        let leading = self.params.leading;
        self.move_line(0.0, -leading);
    }

    /// Shift the text matrix by `tx` text space units along the baseline.
    pub fn advance(&mut self, tx: f64) {
        self.text_matrix = Ctm::new(1.0, 0.0, 0.0, 1.0, tx, 0.0).concat(&self.text_matrix);
    }

    /// Advance in text space for a glyph of width `w0` (glyph space, 1/1000 em).
    pub fn glyph_advance(&self, w0: f64, is_space: bool) -> f64 {
        let word = if is_space {
            self.params.word_spacing
        } else {
            0.0
        };
        ((w0 / 1000.0) * self.params.font_size + self.params.char_spacing + word) * self.h_scale()
    }

    /// Advance in text space for a `TJ` adjustment (thousandths of an em,
    /// positive moves left).
    pub fn adjustment_advance(&self, adjustment: f64) -> f64 {
        -(adjustment / 1000.0) * self.params.font_size * self.h_scale()
    }

    /// Current baseline position in page space under `ctm`.
    pub fn origin(&self, ctm: &Ctm) -> Point {
        self.text_matrix
            .concat(ctm)
            .transform_point(Point::new(0.0, self.params.rise))
    }
}

//! pdfhighlights-core: backend-independent highlight reconstruction.
//!
//! Turns highlight annotation geometry plus a page's positioned text runs
//! into readable highlight text. Nothing in this crate touches PDF bytes;
//! the parsing layer lives in `pdfhighlights-parse`.
//!
//! Pipeline, leaf first:
//!
//! - [`letters`]: wide/slim letter classification used to correct rounding
//! - [`geometry`]: points, matrices, quads and their bounding [`Band`]s
//! - [`band`]: [`search_band`] recovers the substring covered by one band
//! - [`highlight`]: [`extract_highlight`] stitches all quads of one annotation

pub mod annotation;
pub mod band;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod letters;
pub mod text;
pub mod unicode_norm;

pub use annotation::{AnnotationRecord, AnnotationType, RawAnnotation, Rgb};
pub use band::search_band;
pub use error::{ExtractOptions, ExtractWarning, ExtractWarningCode, PdfError};
pub use geometry::{Band, Ctm, Point, Quad, decompose_quad_points};
pub use highlight::{Highlight, extract_highlight, join_fragments};
pub use letters::{count_slim, count_wide, is_slim, is_wide};
pub use text::{TextRun, sort_reading_order};
pub use unicode_norm::UnicodeNorm;

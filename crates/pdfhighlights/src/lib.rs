//! pdfhighlights: recover the text under PDF highlight annotations.
//!
//! This is the public API facade. It re-exports the data types of
//! pdfhighlights-core and uses pdfhighlights-parse to read documents.
//!
//! # Architecture
//!
//! - **pdfhighlights-core**: geometry, band search and highlight assembly
//! - **pdfhighlights-parse**: lopdf backend and content stream interpreter
//! - **pdfhighlights** (this crate): [`Pdf`] for one document, [`PdfManager`]
//!   for lookups by basename in an indexed folder
//!
//! ```ignore
//! let manager = PdfManager::with_tracing(ManagerOptions::new("/papers"));
//! for record in manager.get_highlights("smith2020").await? {
//!     println!("p{} {}: {}", record.page, record.author, record.highlight.text);
//! }
//! ```

mod index;
mod manager;
mod notice;
mod page;
mod pdf;

pub use pdfhighlights_core;
pub use pdfhighlights_parse;

pub use index::PdfIndex;
pub use manager::{ManagerOptions, PdfManager};
pub use notice::{CollectingNotifier, Notifier, TracingNotifier};
pub use page::{Page, PageHighlights, collect_page};
pub use pdf::Pdf;

pub use pdfhighlights_core::{
    AnnotationRecord, AnnotationType, ExtractOptions, ExtractWarning, ExtractWarningCode,
    Highlight, PdfError, RawAnnotation, Rgb, TextRun, UnicodeNorm, extract_highlight,
    search_band,
};

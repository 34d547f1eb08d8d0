//! pdfhighlights-parse: reading PDFs into highlight pipeline inputs.
//!
//! lopdf parses the file; this crate walks the page tree, reads annotation
//! dictionaries into [`RawAnnotation`](pdfhighlights_core::RawAnnotation)s and
//! interprets content streams into positioned
//! [`TextRun`](pdfhighlights_core::TextRun)s.
//!
//! Enable the `tracing` feature to get debug events from the interpreter.

pub mod backend;
pub mod cmap;
pub mod content;
pub mod encoding;
pub mod error;
pub mod font;
pub mod handler;
pub mod interpreter;
pub mod lopdf_backend;
pub mod standard_fonts;
pub mod text_state;

pub use backend::PdfBackend;
pub use error::BackendError;
pub use handler::{RunCollector, TextHandler};
pub use lopdf_backend::{LopdfBackend, LopdfDocument, LopdfPage};
pub use pdfhighlights_core;

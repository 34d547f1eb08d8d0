//! Error type for the parsing layer.
//!
//! [`BackendError`] is derived with [`thiserror`] and converts into the
//! dependency-free [`PdfError`] used by the public API.

use pdfhighlights_core::PdfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// PDF structure, syntax or object resolution failed.
    #[error("PDF parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A font or encoding could not be resolved.
    #[error("font error: {0}")]
    Font(String),

    /// A content stream could not be tokenized or interpreted.
    #[error("interpreter error: {0}")]
    Interpreter(String),

    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => PdfError::ParseError(msg),
            BackendError::Io(e) => PdfError::IoError(e.to_string()),
            BackendError::Font(msg) => PdfError::FontError(msg),
            BackendError::Interpreter(msg) => PdfError::InterpreterError(msg),
            BackendError::Core(e) => e,
        }
    }
}

impl From<lopdf::Error> for BackendError {
    fn from(err: lopdf::Error) -> Self {
        BackendError::Parse(err.to_string())
    }
}

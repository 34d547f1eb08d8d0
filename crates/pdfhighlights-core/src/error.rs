//! Error, warning and option types.
//!
//! [`PdfError`] stops processing of a document. [`ExtractWarning`] records
//! input that was skipped or approximated while processing continued.
//! [`ExtractOptions`] carries resource limits and text post-processing.

use std::fmt;

use crate::unicode_norm::UnicodeNorm;

/// Fatal errors while opening or reading a document.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// The PDF structure or syntax could not be parsed.
    ParseError(String),
    /// Reading the document failed.
    IoError(String),
    /// A font or encoding could not be resolved.
    FontError(String),
    /// A content stream could not be interpreted.
    InterpreterError(String),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: usize,
        actual_value: usize,
    },
    /// The document is encrypted.
    PasswordRequired,
    /// A background task reading the document failed.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::FontError(msg) => write!(f, "font error: {msg}"),
            PdfError::InterpreterError(msg) => write!(f, "interpreter error: {msg}"),
            PdfError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            PdfError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}

/// Category of a non-fatal extraction issue.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum ExtractWarningCode {
    /// A font referenced by `Tf` is missing from the resources.
    MissingFont,
    /// An object has an unexpected type or structure.
    MalformedObject,
    /// Highlight geometry is missing or unusable.
    MalformedGeometry,
    /// Text decoding fell back to a default mapping.
    EncodingFallback,
}

impl ExtractWarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractWarningCode::MissingFont => "MISSING_FONT",
            ExtractWarningCode::MalformedObject => "MALFORMED_OBJECT",
            ExtractWarningCode::MalformedGeometry => "MALFORMED_GEOMETRY",
            ExtractWarningCode::EncodingFallback => "ENCODING_FALLBACK",
        }
    }
}

impl fmt::Display for ExtractWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue met during extraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractWarning {
    pub code: ExtractWarningCode,
    pub description: String,
    /// 0-based page index, when known.
    pub page: Option<usize>,
    /// Index of the content stream operator involved, when known.
    pub operator_index: Option<usize>,
    /// Font resource name involved, when known.
    pub font_name: Option<String>,
}

impl ExtractWarning {
    pub fn new(code: ExtractWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            operator_index: None,
            font_name: None,
        }
    }

    pub fn on_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn at_operator(mut self, index: usize) -> Self {
        self.operator_index = Some(index);
        self
    }

    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {})", page + 1)?;
        }
        if let Some(ref font_name) = self.font_name {
            write!(f, " [font {font_name}]")?;
        }
        if let Some(index) = self.operator_index {
            write!(f, " [operator #{index}]")?;
        }
        Ok(())
    }
}

/// Options controlling extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Maximum nesting of Form XObjects (default: 10).
    pub max_recursion_depth: usize,
    /// Reject inputs larger than this many bytes (default: no limit).
    pub max_input_bytes: Option<usize>,
    /// Process at most this many pages (default: no limit).
    pub max_pages: Option<usize>,
    /// Keep warnings on pages (default: true).
    pub collect_warnings: bool,
    /// Normalisation applied to assembled highlight text (default: none).
    pub unicode_norm: UnicodeNorm,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_recursion_depth: 10,
            max_input_bytes: None,
            max_pages: None,
            collect_warnings: true,
            unicode_norm: UnicodeNorm::None,
        }
    }
}

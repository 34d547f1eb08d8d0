use std::path::{Path, PathBuf};
use std::sync::Arc;

use pdfhighlights::{ExtractOptions, ManagerOptions, Pdf, PdfManager, TracingNotifier};

use crate::cli::UnicodeNormArg;
use crate::page_range::parse_page_range;

pub fn extract_options(unicode_norm: Option<UnicodeNormArg>) -> ExtractOptions {
    ExtractOptions {
        unicode_norm: unicode_norm.map(UnicodeNormArg::to_norm).unwrap_or_default(),
        ..ExtractOptions::default()
    }
}

/// Manager over `root` whose notices go to the log on stderr.
pub fn manager(root: &Path, extract: ExtractOptions) -> PdfManager {
    let options = ManagerOptions {
        pdf_folder: PathBuf::from(root),
        extract,
    };
    PdfManager::new(options, Arc::new(TracingNotifier))
}

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or cannot be parsed as a PDF.
pub fn open_pdf(file: &Path, options: ExtractOptions) -> Result<Pdf, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    Pdf::open_file(file, Some(options)).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// 0-based page indices for an optional `--pages` value; all pages if absent.
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Quote a CSV field when it contains a comma, quote or line break.
pub fn csv_escape(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Flatten line breaks so a record stays on one tab-separated line.
pub fn single_line(text: &str) -> String {
    text.split(['\n', '\r', '\t'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

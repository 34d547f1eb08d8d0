//! Top-level document type for reading highlights from one PDF.

use pdfhighlights_core::{AnnotationRecord, ExtractOptions, PdfError, RawAnnotation};
use pdfhighlights_parse::{LopdfBackend, LopdfDocument, LopdfPage, PdfBackend, RunCollector};

use crate::Page;

/// A PDF document opened for highlight extraction.
///
/// # Example
///
/// ```ignore
/// let pdf = Pdf::open_file("paper.pdf", None)?;
/// for record in pdf.highlights()? {
///     println!("p{}: {}", record.page, record.highlight.text);
/// }
/// pdf.close();
/// ```
pub struct Pdf {
    doc: LopdfDocument,
    options: ExtractOptions,
}

impl Pdf {
    /// Open a PDF from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the file cannot be read or is not a valid PDF.
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        options: Option<ExtractOptions>,
    ) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes, options)
    }

    /// Open a PDF from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::ResourceLimitExceeded`] if the input is larger than
    /// `max_input_bytes`, [`PdfError::PasswordRequired`] for encrypted files
    /// and [`PdfError::ParseError`] if the bytes are not a PDF.
    pub fn open(bytes: &[u8], options: Option<ExtractOptions>) -> Result<Self, PdfError> {
        let options = options.unwrap_or_default();
        if let Some(max_bytes) = options.max_input_bytes {
            if bytes.len() > max_bytes {
                return Err(PdfError::ResourceLimitExceeded {
                    limit_name: "max_input_bytes".to_string(),
                    limit_value: max_bytes,
                    actual_value: bytes.len(),
                });
            }
        }

        let doc = LopdfBackend::open(bytes).map_err(PdfError::from)?;
        tracing::debug!(
            bytes = bytes.len(),
            pages = LopdfBackend::page_count(&doc),
            "opened document"
        );
        Ok(Self { doc, options })
    }

    /// Number of pages that will be processed, capped by `max_pages`.
    pub fn page_count(&self) -> usize {
        let total = LopdfBackend::page_count(&self.doc);
        match self.options.max_pages {
            Some(max) => total.min(max),
            None => total,
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Interpret page `index` (0-based) and read its annotations.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the index is out of range or the page content
    /// cannot be interpreted.
    pub fn page(&self, index: usize) -> Result<Page, PdfError> {
        let page = LopdfBackend::get_page(&self.doc, index)?;
        let annotations = LopdfBackend::page_annotations(&self.doc, &page)?;
        self.interpret(index, &page, annotations)
    }

    fn interpret(
        &self,
        index: usize,
        page: &LopdfPage,
        annotations: Vec<RawAnnotation>,
    ) -> Result<Page, PdfError> {
        let mut collector = RunCollector::for_page(index, self.options.collect_warnings);
        LopdfBackend::page_text_runs(&self.doc, page, &mut collector, &self.options)?;
        tracing::debug!(
            page = index + 1,
            runs = collector.runs.len(),
            annotations = annotations.len(),
            "interpreted page"
        );
        for warning in &collector.warnings {
            tracing::debug!(page = index + 1, %warning, "extraction warning");
        }

        Ok(Page::new(
            index + 1,
            collector.runs,
            annotations,
            collector.warnings,
            &self.options,
        ))
    }

    /// Annotations of page `index` (0-based) without interpreting its content.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the index is out of range or `/Annots` cannot be
    /// resolved.
    pub fn page_annotations(&self, index: usize) -> Result<Vec<RawAnnotation>, PdfError> {
        let page = LopdfBackend::get_page(&self.doc, index)?;
        Ok(LopdfBackend::page_annotations(&self.doc, &page)?)
    }

    /// Every highlight of the document, ascending by page.
    ///
    /// Pages are processed one at a time. A page without highlight
    /// annotations is not interpreted.
    ///
    /// # Errors
    ///
    /// Returns the first [`PdfError`] raised by any page.
    pub fn highlights(&self) -> Result<Vec<AnnotationRecord>, PdfError> {
        let mut records = Vec::new();
        for index in 0..self.page_count() {
            let page = LopdfBackend::get_page(&self.doc, index)?;
            let annotations = LopdfBackend::page_annotations(&self.doc, &page)?;
            if !annotations.iter().any(RawAnnotation::is_highlight) {
                continue;
            }
            records.extend(self.interpret(index, &page, annotations)?.highlights());
        }
        tracing::debug!(highlights = records.len(), "collected highlights");
        Ok(records)
    }

    /// Number of highlight annotations in the document.
    ///
    /// # Errors
    ///
    /// Returns the first [`PdfError`] raised while reading annotations.
    pub fn highlight_count(&self) -> Result<usize, PdfError> {
        let mut count = 0;
        for index in 0..self.page_count() {
            count += self
                .page_annotations(index)?
                .iter()
                .filter(|a| a.is_highlight())
                .count();
        }
        Ok(count)
    }

    /// Release the document.
    ///
    /// Consumes `self`; the parsed document is freed when it is dropped, so
    /// this only marks the end of use in the logs.
    pub fn close(self) {
        tracing::debug!("closed document");
    }
}

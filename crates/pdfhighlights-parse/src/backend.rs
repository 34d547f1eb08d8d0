//! PDF backend trait.
//!
//! [`PdfBackend`] is the seam between the highlight pipeline and whatever
//! parses the file. It exposes exactly the two inputs the pipeline needs per
//! page: the annotation list and the positioned text runs.

use pdfhighlights_core::{ExtractOptions, PdfError, RawAnnotation};

use crate::handler::TextHandler;

/// Parsing operations needed for highlight extraction.
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// for index in 0..MyBackend::page_count(&doc) {
///     let page = MyBackend::get_page(&doc, index)?;
///     let annots = MyBackend::page_annotations(&doc, &page)?;
///     MyBackend::page_text_runs(&doc, &page, &mut collector, &options)?;
/// }
/// ```
pub trait PdfBackend {
    type Document;
    type Page;
    type Error: std::error::Error + Into<PdfError>;

    /// Parse PDF bytes.
    ///
    /// # Errors
    ///
    /// Fails if the bytes are not a readable PDF or the PDF is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    fn page_count(doc: &Self::Document) -> usize;

    /// Page by 0-based index.
    ///
    /// # Errors
    ///
    /// Fails if `index` is out of range.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// Annotation dictionaries of a page, in `/Annots` order.
    ///
    /// Entries that are not dictionaries or have no `/Subtype` are skipped.
    ///
    /// # Errors
    ///
    /// Fails if the page dictionary or its `/Annots` entry cannot be resolved.
    fn page_annotations(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Vec<RawAnnotation>, Self::Error>;

    /// Interpret the page content and report text runs to `handler`.
    ///
    /// # Errors
    ///
    /// Fails if the content cannot be decoded or lexed.
    fn page_text_runs(
        doc: &Self::Document,
        page: &Self::Page,
        handler: &mut dyn TextHandler,
        options: &ExtractOptions,
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::RunCollector;
    use pdfhighlights_core::TextRun;

    struct MockBackend;

    #[derive(Debug)]
    struct MockError(String);

    impl std::fmt::Display for MockError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl std::error::Error for MockError {}

    impl From<MockError> for PdfError {
        fn from(err: MockError) -> Self {
            PdfError::Other(err.0)
        }
    }

    #[derive(Debug)]
    struct MockDocument {
        pages: Vec<(Vec<RawAnnotation>, Vec<TextRun>)>,
    }

    impl PdfBackend for MockBackend {
        type Document = MockDocument;
        type Page = usize;
        type Error = MockError;

        fn open(bytes: &[u8]) -> Result<MockDocument, MockError> {
            if bytes.is_empty() {
                return Err(MockError("empty input".to_string()));
            }
            let mut highlight = RawAnnotation::new("Highlight");
            highlight.quad_points = Some(vec![0.0, 20.0, 100.0, 20.0, 0.0, 0.0, 100.0, 0.0]);
            Ok(MockDocument {
                pages: vec![(
                    vec![highlight],
                    vec![TextRun::new("mock text", 0.0, 10.0, 50.0)],
                )],
            })
        }

        fn page_count(doc: &MockDocument) -> usize {
            doc.pages.len()
        }

        fn get_page(doc: &MockDocument, index: usize) -> Result<usize, MockError> {
            if index < doc.pages.len() {
                Ok(index)
            } else {
                Err(MockError(format!("no page {index}")))
            }
        }

        fn page_annotations(
            doc: &MockDocument,
            page: &usize,
        ) -> Result<Vec<RawAnnotation>, MockError> {
            Ok(doc.pages[*page].0.clone())
        }

        fn page_text_runs(
            doc: &MockDocument,
            page: &usize,
            handler: &mut dyn TextHandler,
            _options: &ExtractOptions,
        ) -> Result<(), MockError> {
            for run in &doc.pages[*page].1 {
                handler.on_text_run(run.clone());
            }
            Ok(())
        }
    }

    #[test]
    fn mock_backend_feeds_the_pipeline() {
        let doc = MockBackend::open(b"%PDF").unwrap();
        assert_eq!(MockBackend::page_count(&doc), 1);
        let page = MockBackend::get_page(&doc, 0).unwrap();

        let annots = MockBackend::page_annotations(&doc, &page).unwrap();
        let mut collector = RunCollector::for_page(page, true);
        MockBackend::page_text_runs(&doc, &page, &mut collector, &ExtractOptions::default())
            .unwrap();

        let quads = annots[0].quad_points.as_deref().unwrap();
        assert_eq!(
            pdfhighlights_core::extract_highlight(quads, &collector.runs),
            "mock text"
        );
    }

    #[test]
    fn errors_convert_to_pdf_error() {
        let err = MockBackend::open(b"").unwrap_err();
        assert_eq!(PdfError::from(err), PdfError::Other("empty input".to_string()));
        let doc = MockBackend::open(b"x").unwrap();
        assert!(MockBackend::get_page(&doc, 3).is_err());
    }
}

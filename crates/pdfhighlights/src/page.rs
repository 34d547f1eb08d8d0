//! Per-page highlight collection.

use pdfhighlights_core::{
    AnnotationRecord, ExtractOptions, ExtractWarning, ExtractWarningCode, RawAnnotation, TextRun,
    UnicodeNorm, extract_highlight, sort_reading_order,
};

/// Highlights found on one page plus anything skipped while building them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageHighlights {
    pub records: Vec<AnnotationRecord>,
    pub warnings: Vec<ExtractWarning>,
}

/// Collect the highlight records of one page.
///
/// `runs` are sorted into reading order first; `annotations` keep their
/// `/Annots` order and everything that is not a highlight is ignored.
/// `page_number` is 1-based and copied into every record.
///
/// ```
/// use pdfhighlights::{ExtractOptions, RawAnnotation, TextRun, collect_page};
///
/// let mut annot = RawAnnotation::new("Highlight");
/// annot.quad_points = Some(vec![0.0, 105.0, 55.0, 105.0, 0.0, 95.0, 55.0, 95.0]);
/// let runs = vec![TextRun::new("Hello world", 0.0, 100.0, 110.0)];
///
/// let page = collect_page(runs, &[annot], 1, &ExtractOptions::default());
/// assert_eq!(page.records[0].highlight.text, "Hello");
/// ```
pub fn collect_page(
    mut runs: Vec<TextRun>,
    annotations: &[RawAnnotation],
    page_number: usize,
    options: &ExtractOptions,
) -> PageHighlights {
    sort_reading_order(&mut runs);
    PageHighlights {
        records: assemble(&runs, annotations, page_number, options.unicode_norm),
        warnings: if options.collect_warnings {
            geometry_warnings(annotations, page_number)
        } else {
            Vec::new()
        },
    }
}

fn assemble(
    sorted_runs: &[TextRun],
    annotations: &[RawAnnotation],
    page_number: usize,
    norm: UnicodeNorm,
) -> Vec<AnnotationRecord> {
    annotations
        .iter()
        .filter(|annot| annot.is_highlight())
        .filter_map(|annot| {
            let quads = annot.quad_points.as_deref()?;
            let text = norm.normalize(&extract_highlight(quads, sorted_runs));
            Some(AnnotationRecord::from_annotation(annot, text, page_number))
        })
        .collect()
}

/// One warning per highlight that has no quad points to search with.
fn geometry_warnings(annotations: &[RawAnnotation], page_number: usize) -> Vec<ExtractWarning> {
    annotations
        .iter()
        .enumerate()
        .filter(|(_, annot)| annot.is_highlight() && annot.quad_points.is_none())
        .map(|(index, _)| {
            tracing::warn!(
                page = page_number,
                annotation = index,
                "highlight without QuadPoints skipped"
            );
            ExtractWarning::new(
                ExtractWarningCode::MalformedGeometry,
                format!("highlight annotation #{index} has no QuadPoints"),
            )
            .on_page(page_number.saturating_sub(1))
        })
        .collect()
}

/// A single page of a document, ready for highlight collection.
///
/// Built by [`Pdf::page`](crate::Pdf::page). Text runs are already in
/// reading order.
#[derive(Debug, Clone)]
pub struct Page {
    /// 1-based page number.
    number: usize,
    runs: Vec<TextRun>,
    annotations: Vec<RawAnnotation>,
    warnings: Vec<ExtractWarning>,
    unicode_norm: UnicodeNorm,
}

impl Page {
    /// Create a page from interpreter output. Runs are sorted here.
    pub fn new(
        number: usize,
        mut runs: Vec<TextRun>,
        annotations: Vec<RawAnnotation>,
        mut warnings: Vec<ExtractWarning>,
        options: &ExtractOptions,
    ) -> Self {
        sort_reading_order(&mut runs);
        if options.collect_warnings {
            warnings.extend(geometry_warnings(&annotations, number));
        } else {
            warnings.clear();
        }
        Self {
            number,
            runs,
            annotations,
            warnings,
            unicode_norm: options.unicode_norm,
        }
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn annotations(&self) -> &[RawAnnotation] {
        &self.annotations
    }

    /// Non-fatal issues from interpreting the page and reading its highlights.
    pub fn warnings(&self) -> &[ExtractWarning] {
        &self.warnings
    }

    /// Highlight records of this page in annotation order.
    pub fn highlights(&self) -> Vec<AnnotationRecord> {
        assemble(&self.runs, &self.annotations, self.number, self.unicode_norm)
    }

    /// Number of highlight annotations, including ones without geometry.
    pub fn highlight_count(&self) -> usize {
        self.annotations.iter().filter(|a| a.is_highlight()).count()
    }
}

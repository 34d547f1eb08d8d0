use std::path::Path;

use pdfhighlights::{AnnotationRecord, Pdf};

use crate::cli::{OutputFormat, UnicodeNormArg};
use crate::output::print_records;
use crate::shared::{extract_options, open_pdf, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: OutputFormat,
    unicode_norm: Option<UnicodeNormArg>,
) -> Result<(), i32> {
    let pdf = open_pdf(file, extract_options(unicode_norm))?;
    let result = collect(&pdf, pages);
    pdf.close();
    print_records(&result?, format)
}

fn collect(pdf: &Pdf, pages: Option<&str>) -> Result<Vec<AnnotationRecord>, i32> {
    let Some(range) = pages else {
        return pdf.highlights().map_err(|e| {
            eprintln!("Error: {e}");
            1
        });
    };

    let mut records = Vec::new();
    for idx in resolve_pages(Some(range), pdf.page_count())? {
        let page = pdf.page(idx).map_err(|e| {
            eprintln!("Error reading page {}: {e}", idx + 1);
            1
        })?;
        records.extend(page.highlights());
    }
    Ok(records)
}

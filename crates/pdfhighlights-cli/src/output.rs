//! Rendering of highlight records.

use std::io::{self, Write};

use pdfhighlights::AnnotationRecord;

use crate::cli::OutputFormat;
use crate::shared::{csv_escape, single_line};

/// Write `records` to stdout in `format`.
pub fn print_records(records: &[AnnotationRecord], format: OutputFormat) -> Result<(), i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_records(&mut out, records, format).map_err(|e| {
        eprintln!("Error: failed to write output: {e}");
        1
    })
}

pub fn write_records(
    out: &mut impl Write,
    records: &[AnnotationRecord],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "page\tcolor\tauthor\tdate\ttext")?;
            for r in records {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    r.page,
                    r.highlight.color_rgba,
                    single_line(&r.author),
                    r.modification_date,
                    single_line(&r.highlight.text),
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, records).map_err(io::Error::other)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "page,color,author,date,text")?;
            for r in records {
                writeln!(
                    out,
                    "{},{},{},{},{}",
                    r.page,
                    csv_escape(&r.highlight.color_rgba),
                    csv_escape(&r.author),
                    csv_escape(&r.modification_date),
                    csv_escape(&r.highlight.text),
                )?;
            }
        }
    }
    Ok(())
}

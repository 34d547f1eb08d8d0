use std::path::Path;

use crate::cli::{OutputFormat, UnicodeNormArg};
use crate::output::print_records;
use crate::shared::{extract_options, manager};

pub async fn run(
    basename: &str,
    root: &Path,
    format: OutputFormat,
    unicode_norm: Option<UnicodeNormArg>,
) -> Result<(), i32> {
    let manager = manager(root, extract_options(unicode_norm));
    let records = manager.get_highlights(basename).await.map_err(|e| {
        eprintln!("Error: failed to read highlights of '{basename}': {e}");
        1
    })?;
    print_records(&records, format)
}

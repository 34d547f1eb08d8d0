use std::path::Path;

use pdfhighlights::ExtractOptions;

use crate::shared::manager;

pub async fn run(basename: &str, root: &Path) -> Result<(), i32> {
    let manager = manager(root, ExtractOptions::default());
    let count = manager.get_highlight_count(basename).await.map_err(|e| {
        eprintln!("Error: failed to count highlights of '{basename}': {e}");
        1
    })?;
    println!("{count}");
    Ok(())
}

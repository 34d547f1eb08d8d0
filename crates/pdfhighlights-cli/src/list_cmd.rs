use std::path::Path;

use pdfhighlights::ExtractOptions;

use crate::shared::manager;

pub async fn run(root: &Path) -> Result<(), i32> {
    let manager = manager(root, ExtractOptions::default());
    for path in manager.list_pdfs().await.iter() {
        println!("{}", path.display());
    }
    Ok(())
}

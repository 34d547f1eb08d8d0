//! Highlight lookup by document basename.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pdfhighlights_core::{AnnotationRecord, ExtractOptions, PdfError};

use crate::index::PdfIndex;
use crate::notice::{Notifier, TracingNotifier};
use crate::pdf::Pdf;

/// Settings for a [`PdfManager`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagerOptions {
    /// Folder searched recursively for PDFs.
    pub pdf_folder: PathBuf,
    pub extract: ExtractOptions,
}

impl ManagerOptions {
    pub fn new(pdf_folder: impl Into<PathBuf>) -> Self {
        Self {
            pdf_folder: pdf_folder.into(),
            extract: ExtractOptions::default(),
        }
    }
}

/// Resolves basenames against an indexed folder and reads their highlights.
///
/// An unknown basename is not an error: it produces one notice and an empty
/// result. Parse failures of a found document are returned as [`PdfError`].
///
/// ```ignore
/// let manager = PdfManager::with_tracing(ManagerOptions::new("/papers"));
/// let records = manager.get_highlights("smith2020").await?;
/// ```
pub struct PdfManager {
    index: PdfIndex,
    extract: ExtractOptions,
    notifier: Arc<dyn Notifier>,
}

impl PdfManager {
    /// Create a manager and start indexing `options.pdf_folder`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(options: ManagerOptions, notifier: Arc<dyn Notifier>) -> Self {
        let index = PdfIndex::spawn(options.pdf_folder, Arc::clone(&notifier));
        Self {
            index,
            extract: options.extract,
            notifier,
        }
    }

    /// [`PdfManager::new`] with notices sent to `tracing`.
    pub fn with_tracing(options: ManagerOptions) -> Self {
        Self::new(options, Arc::new(TracingNotifier))
    }

    pub fn index(&self) -> &PdfIndex {
        &self.index
    }

    /// Every indexed PDF path.
    pub async fn list_pdfs(&self) -> Arc<Vec<PathBuf>> {
        self.index.files().await
    }

    /// Path of the first indexed PDF ending in `<basename>.pdf`.
    pub async fn resolve(&self, basename: &str) -> Option<PathBuf> {
        self.index.resolve(basename).await
    }

    async fn resolve_or_notify(&self, basename: &str) -> Option<PathBuf> {
        let path = self.resolve(basename).await;
        if path.is_none() {
            self.notifier
                .notify(&format!("Could not find PDF '{basename}'."));
        }
        path
    }

    /// Highlights of the document named `basename`, ascending by page.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the document was found but could not be read.
    pub async fn get_highlights(&self, basename: &str) -> Result<Vec<AnnotationRecord>, PdfError> {
        match self.resolve_or_notify(basename).await {
            Some(path) => self.get_highlights_from_path(&path).await,
            None => Ok(Vec::new()),
        }
    }

    /// Highlights of the document at `path`, ascending by page.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the file cannot be read or parsed.
    pub async fn get_highlights_from_path(
        &self,
        path: &Path,
    ) -> Result<Vec<AnnotationRecord>, PdfError> {
        tracing::debug!(path = %path.display(), "reading highlights");
        self.with_document(path, |pdf| pdf.highlights()).await
    }

    /// Number of highlight annotations in the document named `basename`.
    ///
    /// An unknown basename gives the same notice as [`get_highlights`] and a
    /// count of 0.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the document was found but could not be read.
    ///
    /// [`get_highlights`]: PdfManager::get_highlights
    pub async fn get_highlight_count(&self, basename: &str) -> Result<usize, PdfError> {
        let Some(path) = self.resolve_or_notify(basename).await else {
            return Ok(0);
        };
        self.with_document(&path, |pdf| pdf.highlight_count()).await
    }

    /// Open the document at `path`, run `read` on it and close it, all on
    /// tokio's blocking pool.
    async fn with_document<T, F>(&self, path: &Path, read: F) -> Result<T, PdfError>
    where
        T: Send + 'static,
        F: FnOnce(&Pdf) -> Result<T, PdfError> + Send + 'static,
    {
        let path = path.to_path_buf();
        let options = self.extract.clone();
        tokio::task::spawn_blocking(move || {
            let pdf = Pdf::open_file(&path, Some(options))?;
            let result = read(&pdf);
            pdf.close();
            result
        })
        .await
        .map_err(|err| PdfError::Other(format!("document task failed: {err}")))?
    }
}

impl std::fmt::Debug for PdfManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfManager")
            .field("index", &self.index)
            .field("extract", &self.extract)
            .finish_non_exhaustive()
    }
}

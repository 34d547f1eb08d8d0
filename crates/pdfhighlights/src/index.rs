//! Background-built index of the PDFs under a folder.
//!
//! The walk starts when the index is created and runs on tokio's blocking
//! pool. Its result is memoized in a [`Shared`] future: the first caller
//! awaits the walk, later callers get the same list. The index is never
//! rebuilt, so files added or removed afterwards are not seen.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use crate::notice::Notifier;

type FileList = Arc<Vec<PathBuf>>;

/// Recursive listing of `*.pdf` files under a root folder.
#[derive(Clone)]
pub struct PdfIndex {
    root: PathBuf,
    files: Shared<BoxFuture<'static, FileList>>,
}

impl PdfIndex {
    /// Start indexing `root`.
    ///
    /// Must be called inside a tokio runtime. An unreadable root produces the
    /// notice `Could not find folder <root>` and an empty index.
    pub fn spawn(root: impl Into<PathBuf>, notifier: Arc<dyn Notifier>) -> Self {
        let root = root.into();
        let walk_root = root.clone();
        let handle = tokio::task::spawn_blocking(move || walk(&walk_root, notifier.as_ref()));

        let files = async move {
            match handle.await {
                Ok(files) => Arc::new(files),
                Err(err) => {
                    tracing::warn!(error = %err, "PDF index task failed");
                    Arc::new(Vec::new())
                }
            }
        }
        .boxed()
        .shared();

        Self { root, files }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All indexed paths, waiting for the walk if it is still running.
    pub async fn files(&self) -> FileList {
        self.files.clone().await
    }

    /// First indexed path ending in `<basename>.pdf`.
    pub async fn resolve(&self, basename: &str) -> Option<PathBuf> {
        let suffix = format!("{basename}.pdf");
        self.files()
            .await
            .iter()
            .find(|path| path.to_string_lossy().ends_with(&suffix))
            .cloned()
    }
}

impl std::fmt::Debug for PdfIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfIndex")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

fn walk(root: &Path, notifier: &dyn Notifier) -> Vec<PathBuf> {
    let mut files = Vec::new();
    match std::fs::read_dir(root) {
        Ok(entries) => {
            collect_dir(entries, &mut files);
            tracing::info!(root = %root.display(), pdfs = files.len(), "indexed PDF folder");
        }
        Err(err) => {
            tracing::warn!(root = %root.display(), error = %err, "cannot read PDF folder");
            notifier.notify(&format!("Could not find folder {}", root.display()));
        }
    }
    files
}

/// Depth-first, entries visited in file name order. Symlinked directories
/// are not followed.
fn collect_dir(entries: std::fs::ReadDir, files: &mut Vec<PathBuf>) {
    let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            match std::fs::read_dir(&path) {
                Ok(sub) => collect_dir(sub, files),
                Err(err) => {
                    tracing::warn!(dir = %path.display(), error = %err, "skipping unreadable folder");
                }
            }
        } else if is_pdf(&path) {
            files.push(path);
        }
    }
}

/// Exact lowercase `.pdf`, the same suffix [`PdfIndex::resolve`] matches.
fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "pdf")
}

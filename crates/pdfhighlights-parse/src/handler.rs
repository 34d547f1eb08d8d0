//! Callback seam between the interpreter and its consumers.

use pdfhighlights_core::{ExtractWarning, TextRun};

/// Receives what the content stream interpreter produces.
///
/// Both methods default to no-ops so a handler can listen to one kind of
/// event only.
pub trait TextHandler {
    /// One show-text operation (`Tj`, `TJ`, `'` or `"`) rendered a run.
    fn on_text_run(&mut self, _run: TextRun) {}

    /// Something was skipped or approximated; interpretation continues.
    fn on_warning(&mut self, _warning: ExtractWarning) {}
}

/// Handler that stores runs and, optionally, warnings.
#[derive(Debug, Default)]
pub struct RunCollector {
    pub runs: Vec<TextRun>,
    pub warnings: Vec<ExtractWarning>,
    page_index: Option<usize>,
    collect_warnings: bool,
}

impl RunCollector {
    /// Collector for page `page_index` (0-based); warnings are tagged with it.
    pub fn for_page(page_index: usize, collect_warnings: bool) -> Self {
        Self {
            runs: Vec::new(),
            warnings: Vec::new(),
            page_index: Some(page_index),
            collect_warnings,
        }
    }
}

impl TextHandler for RunCollector {
    fn on_text_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    fn on_warning(&mut self, mut warning: ExtractWarning) {
        if !self.collect_warnings {
            return;
        }
        if warning.page.is_none() {
            warning.page = self.page_index;
        }
        self.warnings.push(warning);
    }
}

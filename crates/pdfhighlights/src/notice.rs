//! User-visible notices.
//!
//! A notice is a single line meant for the person who asked for highlights,
//! such as an unknown basename. It is not an error; the operation that emits
//! it still returns a (possibly empty) result.

use std::sync::{Mutex, PoisonError};

/// Sink for notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Emits notices as `warn` events with target `pdfhighlights::notice`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "pdfhighlights::notice", "{message}");
    }
}

/// Keeps notices in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn collecting_notifier_keeps_order() {
        let notifier = CollectingNotifier::new();
        notifier.notify("first");
        notifier.notify("second");
        assert_eq!(notifier.messages(), vec!["first", "second"]);
    }

    #[test]
    fn notifiers_are_shareable() {
        let notifier = Arc::new(CollectingNotifier::new());
        let shared: Arc<dyn Notifier> = notifier.clone();
        std::thread::spawn(move || shared.notify("from thread"))
            .join()
            .unwrap();
        assert_eq!(notifier.messages(), vec!["from thread"]);
        TracingNotifier.notify("goes to tracing");
    }
}

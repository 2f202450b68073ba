//! Singleton holder of the most recently uploaded document's text.

use std::sync::RwLock;

/// Process-wide document text, overwritten on each upload.
///
/// Concurrent uploads are last-write-wins; there is exactly one document
/// at a time and no versioning.
#[derive(Debug, Default)]
pub struct DocumentStore {
    text: RwLock<Option<String>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored text with a freshly extracted document.
    pub fn replace(&self, text: String) {
        *self
            .text
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text);
    }

    /// Clone the stored text out so no lock is held while the caller
    /// awaits the model backend. Empty text counts as absent.
    pub fn snapshot(&self) -> Option<String> {
        self.text
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .filter(|text| !text.is_empty())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_without_a_document() {
        let store = DocumentStore::new();
        assert_eq!(store.snapshot(), None);
    }

    #[test]
    fn replace_overwrites_the_previous_document() {
        let store = DocumentStore::new();
        store.replace("first document".to_owned());
        store.replace("second document".to_owned());
        assert_eq!(store.snapshot().as_deref(), Some("second document"));
    }

    #[test]
    fn empty_text_counts_as_absent() {
        let store = DocumentStore::new();
        store.replace(String::new());
        assert_eq!(store.snapshot(), None);
    }
}

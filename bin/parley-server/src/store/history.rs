//! Ordered log of user/bot message pairs for the process lifetime.

use std::sync::RwLock;

use crate::schemas::chat::ChatEntry;

/// Append-only (until explicitly cleared) chat history.
///
/// Interleaved appends from concurrent requests are serialized by the
/// lock; entries keep their insertion order.
#[derive(Debug, Default)]
pub struct ChatHistory {
    entries: RwLock<Vec<ChatEntry>>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed exchange. Infallible, O(1) amortized.
    pub fn append(&self, entry: ChatEntry) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
    }

    /// Snapshot of the current history, oldest first.
    pub fn list(&self) -> Vec<ChatEntry> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Remove all entries. Idempotent.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    fn entry(user: &str, bot: &str) -> ChatEntry {
        ChatEntry {
            user: user.to_owned(),
            bot: bot.to_owned(),
        }
    }

    #[test]
    fn append_preserves_insertion_order() {
        let history = ChatHistory::new();
        history.append(entry("first", "a"));
        history.append(entry("second", "b"));
        history.append(entry("third", "c"));

        let entries = history.list();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].user, "first");
        assert_eq!(entries[2].user, "third");
    }

    #[test]
    fn clear_is_idempotent() {
        let history = ChatHistory::new();
        history.append(entry("hello", "hi"));

        history.clear();
        assert!(history.list().is_empty());

        history.clear();
        assert!(history.list().is_empty());
    }
}

use std::collections::VecDeque;

use tala_types::HistoryEntry;

pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded store of committed translations, newest first.
///
/// Identical (source, translated) pairs are stored once. When full, the
/// least recently added entry is evicted.
#[derive(Debug, Clone)]
pub struct HistoryCache {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// `capacity` is clamped to `1..=DEFAULT_CAPACITY`
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, DEFAULT_CAPACITY);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns `false` when the exact pair was already present
    pub fn add(&mut self, source_text: &str, translated_text: &str) -> bool {
        let exists = self
            .entries
            .iter()
            .any(|e| e.source_text == source_text && e.translated_text == translated_text);
        if exists {
            return false;
        }

        self.entries
            .push_front(HistoryEntry::new(source_text, translated_text));
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }

        true
    }

    /// Most recent translation recorded for `source_text`
    pub fn lookup(&self, source_text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.source_text == source_text)
            .map(|e| e.translated_text.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn source_texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.source_text.clone()).collect()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for HistoryCache {
    fn default() -> Self {
        Self::new()
    }
}

//! Severity keyword classification shared by all parsers.
//!
//! Tools spell severities in many ways (`error`, `SEVERE`, `Suggestion`...).
//! A `SeverityTable` maps such keywords, case-insensitively, onto a
//! [`Priority`]. Lookup is total: absent or unrecognized tokens map to
//! `Priority::Normal`, since most formats omit severity for the common case.

use crate::models::Priority;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ordered keyword table; later entries override earlier ones.
pub struct SeverityTable {
    entries: Vec<(String, Priority)>,
}

impl SeverityTable {
    /// A table without any keyword: everything classifies as `Normal`.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Keywords shared by most compilers and linters.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for kw in ["error", "fatal", "severe", "critical", "high"] {
            table.insert(kw, Priority::High);
        }
        for kw in ["warning", "warn", "normal", "medium"] {
            table.insert(kw, Priority::Normal);
        }
        for kw in ["info", "note", "low", "suggestion", "hint", "style"] {
            table.insert(kw, Priority::Low);
        }
        table
    }

    /// Add or override a keyword.
    pub fn with(mut self, keyword: &str, priority: Priority) -> Self {
        self.insert(keyword, priority);
        self
    }

    pub fn insert(&mut self, keyword: &str, priority: Priority) {
        let key = keyword.trim().to_ascii_lowercase();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = priority;
        } else {
            self.entries.push((key, priority));
        }
    }

    pub fn lookup(&self, token: &str) -> Option<Priority> {
        let key = token.trim().to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, p)| *p)
    }

    pub fn classify(&self, token: Option<&str>) -> Priority {
        token.and_then(|t| self.lookup(t)).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SeverityTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classify `token` with the standard table.
pub fn classify(token: &str) -> Priority {
    SeverityTable::standard().classify(Some(token))
}

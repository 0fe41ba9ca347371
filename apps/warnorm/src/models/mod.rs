//! Normalized data model shared by every parser.
//!
//! - `Issue`: immutable record of one finding.
//! - `IssueBuilder`: reusable staging area that produces `Issue` snapshots.
//! - `Issues`: insertion-ordered container handed back by a parse call.

pub mod builder;
pub mod issues;

pub use builder::IssueBuilder;
pub use issues::{Issues, OutOfRange, Summary};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Three-level severity of an issue.
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Normal => "NORMAL",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
/// Secondary span of interest, independent of the primary start/end lines.
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single normalized finding.
///
/// Fields are private; an `Issue` can only be created through
/// [`IssueBuilder::build`] and never changes afterwards. Numeric locations
/// use `0` for "unknown" and are stored exactly as the parser provided them.
pub struct Issue {
    file_name: String,
    line_start: u32,
    line_end: u32,
    column_start: u32,
    column_end: u32,
    line_ranges: Vec<LineRange>,
    category: String,
    #[serde(rename = "type")]
    type_name: String,
    package_name: String,
    module_name: String,
    origin: String,
    reference: String,
    priority: Priority,
    message: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
}

impl Issue {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn line_start(&self) -> u32 {
        self.line_start
    }

    pub fn line_end(&self) -> u32 {
        self.line_end
    }

    pub fn column_start(&self) -> u32 {
        self.column_start
    }

    pub fn column_end(&self) -> u32 {
        self.column_end
    }

    pub fn line_ranges(&self) -> &[LineRange] {
        &self.line_ranges
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_default_and_display() {
        assert_eq!(Priority::default(), Priority::Normal);
        assert_eq!(Priority::High.to_string(), "HIGH");
        assert_eq!(Priority::Low.as_str(), "LOW");
    }

    #[test]
    fn test_issue_serializes_with_type_key() {
        let issue = IssueBuilder::default()
            .set_file_name("a.c")
            .set_line_start(3)
            .set_type("Cast")
            .set_priority(Priority::Low)
            .build();
        let v = serde_json::to_value(&issue).unwrap();
        assert_eq!(v["file_name"], "a.c");
        assert_eq!(v["type"], "Cast");
        assert_eq!(v["priority"], "LOW");
        // fingerprint omitted when absent
        assert!(v.get("fingerprint").is_none());
    }
}

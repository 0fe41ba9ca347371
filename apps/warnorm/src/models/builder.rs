//! Mutable staging area for `Issue` values.
//!
//! A parser keeps one builder for the whole parse call, overwrites the
//! fields for each match and takes a snapshot with [`IssueBuilder::build`].
//! Building never resets the builder, so it doubles as a template.
//!
//! ```
//! use warnorm::models::{IssueBuilder, Priority};
//!
//! let issue = IssueBuilder::default()
//!     .set_file_name("affected.file")
//!     .set_line_start(12)
//!     .set_category("JavaDoc")
//!     .set_message("Missing JavaDoc")
//!     .set_priority(Priority::Low)
//!     .build();
//! assert_eq!(issue.category(), "JavaDoc");
//! ```

use super::{Issue, LineRange, Priority};

#[derive(Debug, Default, Clone)]
/// Fluent builder mirroring every `Issue` field.
pub struct IssueBuilder {
    file_name: String,
    line_start: u32,
    line_end: u32,
    column_start: u32,
    column_end: u32,
    line_ranges: Vec<LineRange>,
    category: String,
    type_name: String,
    package_name: String,
    module_name: String,
    origin: String,
    reference: String,
    priority: Option<Priority>,
    message: String,
    description: String,
    fingerprint: Option<String>,
}

impl IssueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) -> &mut Self {
        self.file_name = file_name.into();
        self
    }

    pub fn set_line_start(&mut self, line_start: u32) -> &mut Self {
        self.line_start = line_start;
        self
    }

    pub fn set_line_end(&mut self, line_end: u32) -> &mut Self {
        self.line_end = line_end;
        self
    }

    pub fn set_column_start(&mut self, column_start: u32) -> &mut Self {
        self.column_start = column_start;
        self
    }

    pub fn set_column_end(&mut self, column_end: u32) -> &mut Self {
        self.column_end = column_end;
        self
    }

    /// Store a private copy of `line_ranges`.
    pub fn set_line_ranges(&mut self, line_ranges: &[LineRange]) -> &mut Self {
        self.line_ranges = line_ranges.to_vec();
        self
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> &mut Self {
        self.category = category.into();
        self
    }

    pub fn set_type(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.type_name = type_name.into();
        self
    }

    pub fn set_package_name(&mut self, package_name: impl Into<String>) -> &mut Self {
        self.package_name = package_name.into();
        self
    }

    pub fn set_module_name(&mut self, module_name: impl Into<String>) -> &mut Self {
        self.module_name = module_name.into();
        self
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) -> &mut Self {
        self.origin = origin.into();
        self
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) -> &mut Self {
        self.reference = reference.into();
        self
    }

    pub fn set_priority(&mut self, priority: Priority) -> &mut Self {
        self.priority = Some(priority);
        self
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = message.into();
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    pub fn set_fingerprint(&mut self, fingerprint: Option<String>) -> &mut Self {
        self.fingerprint = fingerprint;
        self
    }

    /// Load every property of `issue` into this builder.
    pub fn copy(&mut self, issue: &Issue) -> &mut Self {
        self.file_name = issue.file_name.clone();
        self.line_start = issue.line_start;
        self.line_end = issue.line_end;
        self.column_start = issue.column_start;
        self.column_end = issue.column_end;
        self.line_ranges = issue.line_ranges.clone();
        self.category = issue.category.clone();
        self.type_name = issue.type_name.clone();
        self.package_name = issue.package_name.clone();
        self.module_name = issue.module_name.clone();
        self.origin = issue.origin.clone();
        self.reference = issue.reference.clone();
        self.priority = Some(issue.priority);
        self.message = issue.message.clone();
        self.description = issue.description.clone();
        self.fingerprint = issue.fingerprint.clone();
        self
    }

    /// Restore every field to its default value.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Snapshot the current state into a new `Issue`. The builder is left
    /// untouched.
    pub fn build(&self) -> Issue {
        Issue {
            file_name: self.file_name.clone(),
            line_start: self.line_start,
            line_end: self.line_end,
            column_start: self.column_start,
            column_end: self.column_end,
            line_ranges: self.line_ranges.clone(),
            category: self.category.clone(),
            type_name: self.type_name.clone(),
            package_name: self.package_name.clone(),
            module_name: self.module_name.clone(),
            origin: self.origin.clone(),
            reference: self.reference.clone(),
            priority: self.priority.unwrap_or_default(),
            message: self.message.clone(),
            description: self.description.clone(),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

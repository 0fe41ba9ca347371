//! Line-pattern extraction.
//!
//! Reads the stream as logical records (single lines, or lines joined by a
//! continuation pattern) and matches each record against one regex. Named
//! groups feed the issue fields:
//!
//! | group | field |
//! |---|---|
//! | `file` | file name (falls back to the default placeholder) |
//! | `line`, `line_end`, `column` | location, `0` when absent |
//! | `category`, `type` | classification |
//! | `severity` | priority via the severity table |
//! | `message`, `description` | text, trimmed |
//!
//! Records that do not match are skipped: this is a recognizer, not a
//! validator.

use super::{ParseContext, Parser};
use crate::error::{ParsingError, Result};
use crate::models::{Issue, IssueBuilder, Issues};
use crate::severity::SeverityTable;
use regex::{Captures, Regex};
use std::io::{BufRead, BufReader, Read};
use tracing::{debug, trace};

/// Format-specific adjustment applied after the generic fields are set.
/// Returning `false` drops the match.
pub type RefineFn = fn(&Captures<'_>, &mut IssueBuilder) -> bool;

#[derive(Debug, Clone)]
/// How physical lines are grouped into logical records.
pub enum Records {
    /// Every line is its own record
    Lines,
    /// Lines matching the pattern are appended to the previous record
    Continuation(Regex),
}

/// Single-pass regex parser configured per report format.
pub struct LinePatternParser {
    id: String,
    name: String,
    pattern: Regex,
    records: Records,
    severities: SeverityTable,
    default_file_name: String,
    default_category: String,
    refine: Option<RefineFn>,
}

/// Configuration for a [`LinePatternParser`].
pub struct LinePatternParserBuilder {
    id: String,
    name: String,
    pattern: String,
    continuation: Option<String>,
    severities: SeverityTable,
    default_file_name: String,
    default_category: String,
    refine: Option<RefineFn>,
}

impl LinePatternParserBuilder {
    pub fn continuation(mut self, pattern: impl Into<String>) -> Self {
        self.continuation = Some(pattern.into());
        self
    }

    pub fn severities(mut self, table: SeverityTable) -> Self {
        self.severities = table;
        self
    }

    pub fn default_file_name(mut self, name: impl Into<String>) -> Self {
        self.default_file_name = name.into();
        self
    }

    pub fn default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    pub fn refine(mut self, f: RefineFn) -> Self {
        self.refine = Some(f);
        self
    }

    /// Compile the patterns. Fails with a `Pattern` error on invalid regex.
    pub fn build(self) -> std::result::Result<LinePatternParser, ParsingError> {
        let pattern = Regex::new(&self.pattern)
            .map_err(|e| ParsingError::from(e).in_format(self.id.as_str()))?;
        let records = match self.continuation {
            Some(c) => Records::Continuation(
                Regex::new(&c).map_err(|e| ParsingError::from(e).in_format(self.id.as_str()))?,
            ),
            None => Records::Lines,
        };
        Ok(LinePatternParser {
            id: self.id,
            name: self.name,
            pattern,
            records,
            severities: self.severities,
            default_file_name: self.default_file_name,
            default_category: self.default_category,
            refine: self.refine,
        })
    }
}

impl LinePatternParser {
    pub fn builder(
        id: impl Into<String>,
        name: impl Into<String>,
        pattern: impl Into<String>,
    ) -> LinePatternParserBuilder {
        LinePatternParserBuilder {
            id: id.into(),
            name: name.into(),
            pattern: pattern.into(),
            continuation: None,
            severities: SeverityTable::standard(),
            default_file_name: String::new(),
            default_category: String::new(),
            refine: None,
        }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Fill `builder` from a successful match and snapshot it.
    ///
    /// All fields are reset first so nothing from a previous match survives.
    pub fn create_issue(&self, caps: &Captures<'_>, builder: &mut IssueBuilder) -> Option<Issue> {
        let line = group(caps, "line").map(parse_number).unwrap_or(0);
        let line_end = group(caps, "line_end").map(parse_number).unwrap_or(line);
        builder
            .reset()
            .set_file_name(group(caps, "file").unwrap_or(self.default_file_name.as_str()))
            .set_line_start(line)
            .set_line_end(line_end)
            .set_column_start(group(caps, "column").map(parse_number).unwrap_or(0))
            .set_category(group(caps, "category").unwrap_or(self.default_category.as_str()))
            .set_type(group(caps, "type").unwrap_or_default())
            .set_priority(self.severities.classify(group(caps, "severity")))
            .set_message(group(caps, "message").unwrap_or_default())
            .set_description(group(caps, "description").unwrap_or_default())
            .set_origin(self.id.as_str());
        if let Some(refine) = self.refine {
            if !refine(caps, builder) {
                return None;
            }
        }
        Some(builder.build())
    }

    fn handle_record(
        &self,
        record: &str,
        builder: &mut IssueBuilder,
        ctx: &ParseContext<'_>,
        issues: &mut Issues,
    ) -> Result<()> {
        ctx.check_canceled()?;
        let text = ctx.pre_process(record);
        match self.pattern.captures(&text) {
            Some(caps) => {
                if let Some(issue) = self.create_issue(&caps, builder) {
                    issues.add(issue);
                }
            }
            None => trace!(format = %self.id, "skipping unmatched record"),
        }
        Ok(())
    }
}

impl Parser for LinePatternParser {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parse<'a>(
        &self,
        reader: Box<dyn Read + 'a>,
        builder: &mut IssueBuilder,
        ctx: &ParseContext<'_>,
    ) -> Result<Issues> {
        ctx.check_canceled()?;
        let reader = BufReader::new(reader);
        let mut issues = Issues::new();
        let mut pending: Option<String> = None;
        for line in reader.lines() {
            let line = line.map_err(|e| ParsingError::read(e).in_format(self.id.as_str()))?;
            match &self.records {
                Records::Lines => self.handle_record(&line, builder, ctx, &mut issues)?,
                Records::Continuation(cont) => {
                    if let Some(record) = pending.as_mut() {
                        if cont.is_match(&line) {
                            record.push('\n');
                            record.push_str(&line);
                            continue;
                        }
                    }
                    if let Some(record) = pending.replace(line) {
                        self.handle_record(&record, builder, ctx, &mut issues)?;
                    }
                }
            }
        }
        if let Some(record) = pending.take() {
            self.handle_record(&record, builder, ctx, &mut issues)?;
        }
        debug!(format = %self.id, count = issues.len(), "parsed line report");
        Ok(issues)
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Numbers too large for `u32` saturate; anything else non-numeric is `0`.
fn parse_number(s: &str) -> u32 {
    s.parse().unwrap_or_else(|_| {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            trace!(value = s, "number out of range, saturating");
            u32::MAX
        } else {
            0
        }
    })
}

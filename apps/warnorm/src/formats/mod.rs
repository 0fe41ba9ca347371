//! Built-in report formats and the registry that selects them by id.
//!
//! Every format is a configuration of one of the two extraction strategies:
//! - line patterns: `xlc-linker`, `go-vet`, `ant-javac`, and user formats
//!   declared in `warnorm.toml`;
//! - structured XML: `gendarme`, `resharper`.

pub mod gendarme;
pub mod govet;
pub mod javac;
pub mod resharper;
pub mod xlc;

use crate::error::{ErrorKind, ParsingError};
use crate::models::Priority;
use crate::parser::{LinePatternParser, Parser};
use crate::severity::SeverityTable;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
/// A line-pattern format declared in configuration (`[[formats]]`).
pub struct CustomFormat {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Regex with named groups (`file`, `line`, `column`, `severity`, `message`...)
    pub pattern: String,
    #[serde(default)]
    pub continuation: Option<String>,
    #[serde(default)]
    pub default_file: Option<String>,
    #[serde(default)]
    pub default_category: Option<String>,
    /// Keyword -> HIGH|NORMAL|LOW; extends the standard table
    #[serde(default)]
    pub severity: BTreeMap<String, Priority>,
}

impl CustomFormat {
    /// Compile into a parser; invalid ids or patterns are `Config` errors.
    pub fn compile(&self) -> Result<LinePatternParser, ParsingError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ParsingError::new(
                ErrorKind::Config,
                "custom format without an id",
            ));
        }
        let mut severities = SeverityTable::standard();
        for (keyword, priority) in &self.severity {
            severities.insert(keyword, *priority);
        }
        let mut builder = LinePatternParser::builder(
            id,
            self.name.clone().unwrap_or_else(|| id.to_string()),
            self.pattern.as_str(),
        )
        .severities(severities);
        if let Some(c) = &self.continuation {
            builder = builder.continuation(c.as_str());
        }
        if let Some(f) = &self.default_file {
            builder = builder.default_file_name(f.as_str());
        }
        if let Some(c) = &self.default_category {
            builder = builder.default_category(c.as_str());
        }
        builder.build().map_err(|mut e| {
            e.kind = ErrorKind::Config;
            e
        })
    }
}

/// Dispatch table from format id to parser
pub struct FormatRegistry {
    map: BTreeMap<String, Box<dyn Parser>>,
}

impl FormatRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Registry holding every built-in format
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(xlc::parser()));
        registry.register(Box::new(govet::parser()));
        registry.register(Box::new(javac::parser()));
        registry.register(Box::new(gendarme::parser()));
        registry.register(Box::new(resharper::parser()));
        registry
    }

    /// Built-ins plus compiled custom formats. Custom ids replace built-ins.
    pub fn with_custom(formats: &[CustomFormat]) -> Result<Self, ParsingError> {
        let mut registry = Self::builtin();
        for format in formats {
            let parser = format.compile()?;
            if registry.register(Box::new(parser)).is_some() {
                debug!(format = %format.id, "custom format replaces built-in");
            }
        }
        Ok(registry)
    }

    /// Register a parser under its own id, returning the one it replaced
    pub fn register(&mut self, parser: Box<dyn Parser>) -> Option<Box<dyn Parser>> {
        self.map.insert(parser.id().to_string(), parser)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Parser> {
        self.map.get(id).map(|p| &**p)
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        self.map.keys().map(|s| s.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Parser> {
        self.map.values().map(|p| &**p)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

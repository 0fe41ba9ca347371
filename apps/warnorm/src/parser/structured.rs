//! Structured (XML) extraction with a call-scoped rule registry.
//!
//! Reports of this family declare their rules once and reference them from
//! each result. Parsing is two-phase:
//! 1. registry: every rule definition node becomes a [`Rule`] keyed by id;
//! 2. resolution: every result node is resolved against the registry and
//!    yields one issue per occurrence.
//!
//! The document layout is described by a [`RuleSchema`]; the traversal,
//! cancellation and error handling live in [`StructuredParser`].

use super::{ParseContext, Parser};
use crate::error::{ParsingError, Result};
use crate::models::{IssueBuilder, Issues, Priority};
use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};
use url::Url;

static LOCATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\(\D?(\d+)\).*$").expect("valid location pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// What a rule applies to.
pub enum RuleKind {
    Method,
    Type,
    Assembly,
    Unspecified,
}

impl RuleKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "Method" => RuleKind::Method,
            "Type" => RuleKind::Type,
            "Assembly" => RuleKind::Assembly,
            _ => RuleKind::Unspecified,
        }
    }

    /// Only method rules embed a `<path>(<line>)` location in their results.
    pub fn carries_location(&self) -> bool {
        matches!(self, RuleKind::Method)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Rule metadata collected in the registry phase.
pub struct Rule {
    pub id: String,
    pub name: String,
    pub kind: RuleKind,
    pub url: Option<Url>,
    pub priority: Option<Priority>,
    /// Family or implementing type of the rule, copied to the issue type
    pub group: String,
    pub description: String,
}

impl Rule {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: RuleKind::Unspecified,
            url: None,
            priority: None,
            group: String::new(),
            description: String::new(),
        }
    }

    /// Parse a reference URL; malformed or empty values become `None`.
    pub fn parse_url(raw: &str) -> Option<Url> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(url = raw, error = %err, "ignoring malformed rule URL");
                None
            }
        }
    }
}

#[derive(Debug, Default)]
/// Rule id to metadata, built and consumed within one parse call.
pub struct RuleRegistry {
    rules: HashMap<String, Rule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule; a later definition with the same id replaces the
    /// earlier one.
    pub fn insert(&mut self, rule: Rule) -> Option<Rule> {
        self.rules.insert(rule.id.clone(), rule)
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// Like `get`, but an unknown id is a parsing error.
    pub fn resolve(&self, id: &str) -> std::result::Result<&Rule, ParsingError> {
        self.rules
            .get(id)
            .ok_or_else(|| ParsingError::unknown_rule(id))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Layout of one structured report format.
pub trait RuleSchema: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Tag name the document root element must have
    fn root_tag(&self) -> &str;

    fn rule_nodes<'a, 'i>(&self, root: Node<'a, 'i>) -> Vec<Node<'a, 'i>>;

    fn read_rule(&self, node: Node<'_, '_>) -> Rule;

    /// Top-level entries; cancellation is polled before each one
    fn result_nodes<'a, 'i>(&self, root: Node<'a, 'i>) -> Vec<Node<'a, 'i>>;

    /// Rule id referenced by a result
    fn rule_ref(&self, result: Node<'_, '_>) -> String;

    fn occurrences<'a, 'i>(&self, result: Node<'a, 'i>) -> Vec<Node<'a, 'i>>;

    /// Set the issue fields for one occurrence. The builder is already reset
    /// and carries the format id as origin.
    fn fill(
        &self,
        rule: &Rule,
        result: Node<'_, '_>,
        occurrence: Node<'_, '_>,
        builder: &mut IssueBuilder,
    );
}

/// Two-phase parser driven by a [`RuleSchema`].
pub struct StructuredParser<S> {
    schema: S,
}

impl<S: RuleSchema> StructuredParser<S> {
    pub fn new(schema: S) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    fn build_registry(&self, root: Node<'_, '_>) -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        for node in self.schema.rule_nodes(root) {
            registry.insert(self.schema.read_rule(node));
        }
        registry
    }
}

impl<S: RuleSchema> Parser for StructuredParser<S> {
    fn id(&self) -> &str {
        self.schema.id()
    }

    fn name(&self) -> &str {
        self.schema.name()
    }

    fn parse<'a>(
        &self,
        mut reader: Box<dyn Read + 'a>,
        builder: &mut IssueBuilder,
        ctx: &ParseContext<'_>,
    ) -> Result<Issues> {
        let id = self.schema.id();
        ctx.check_canceled()?;
        let mut raw = String::new();
        reader
            .read_to_string(&mut raw)
            .map_err(|e| ParsingError::read(e).in_format(id))?;
        drop(reader);

        let text = ctx.pre_process(&raw);
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(&text, options)
            .map_err(|e| ParsingError::from(e).in_format(id))?;
        let root = doc.root_element();
        if !root.has_tag_name(self.schema.root_tag()) {
            return Err(ParsingError::document(format!(
                "expected <{}> root element, found <{}>",
                self.schema.root_tag(),
                root.tag_name().name()
            ))
            .in_format(id)
            .into());
        }

        let registry = self.build_registry(root);
        debug!(format = id, rules = registry.len(), "built rule registry");

        let mut issues = Issues::new();
        for result in self.schema.result_nodes(root) {
            ctx.check_canceled()?;
            let rule_id = self.schema.rule_ref(result);
            let rule = registry.resolve(&rule_id).map_err(|e| e.in_format(id))?;
            for occurrence in self.schema.occurrences(result) {
                builder.reset().set_origin(id);
                self.schema.fill(rule, result, occurrence, builder);
                issues.add(builder.build());
            }
        }
        debug!(format = id, count = issues.len(), "parsed structured report");
        Ok(issues)
    }
}

/// Split a composite location such as `Foo.cs(16)` or `Foo.cs(≈16)extra`
/// into file name and line.
pub fn extract_location(source: &str) -> Option<(String, u32)> {
    let caps = LOCATION_PATTERN.captures(source)?;
    let file = caps.get(1)?.as_str().to_string();
    let line = caps.get(2)?.as_str().parse().unwrap_or(0);
    Some((file, line))
}

/// Closed three-way severity mapping used by per-occurrence attributes.
pub fn occurrence_priority(severity: &str) -> Priority {
    match severity {
        "Low" => Priority::Low,
        "High" => Priority::High,
        _ => Priority::Normal,
    }
}

/// Element children of `node` with tag `name`, in document order.
pub fn child_elements<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Vec<Node<'a, 'i>> {
    node.children()
        .filter(|n| n.is_element() && n.has_tag_name(name))
        .collect()
}

pub fn first_child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|n| n.is_element() && n.has_tag_name(name))
}

/// Concatenated, trimmed text content of `node`.
pub fn text_of(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

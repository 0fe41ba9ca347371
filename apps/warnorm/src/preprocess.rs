//! Variable substitution applied to raw report text before matching.
//!
//! `${NAME}` is replaced by the configured value; unknown names stay as
//! they are.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid variable pattern"));

#[derive(Debug, Default, Clone)]
pub struct VariableExpander {
    vars: BTreeMap<String, String>,
}

impl VariableExpander {
    pub fn new(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn expand(&self, raw: &str) -> String {
        if self.vars.is_empty() || !raw.contains("${") {
            return raw.to_string();
        }
        VARIABLE
            .replace_all(raw, |caps: &Captures<'_>| match self.vars.get(&caps[1]) {
                Some(v) => v.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Parse `NAME=VALUE` definitions from the command line.
pub fn parse_defines(defines: &[String]) -> Result<BTreeMap<String, String>, String> {
    let mut out = BTreeMap::new();
    for def in defines {
        match def.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                out.insert(name.trim().to_string(), value.to_string());
            }
            _ => return Err(format!("invalid --define '{}', expected NAME=VALUE", def)),
        }
    }
    Ok(out)
}

//! Configuration discovery and effective settings resolution.
//!
//! Warnorm reads `warnorm.toml|yaml|yml` from the working root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `format`: none (must come from CLI or config)
//! - `output`: `human`
//! - `variables`: empty
//! - `formats`: no custom formats
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::formats::CustomFormat;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["warnorm.toml", "warnorm.yaml", "warnorm.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `warnorm.toml|yaml`.
pub struct WarnormConfig {
    /// Default format id used by `warnorm parse`
    pub format: Option<String>,
    pub output: Option<String>,
    /// Values substituted for `${NAME}` before matching
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    /// Additional line-pattern formats (`[[formats]]`)
    #[serde(default)]
    pub formats: Vec<CustomFormat>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub format: Option<String>,
    pub output: String,
    pub variables: BTreeMap<String, String>,
    pub formats: Vec<CustomFormat>,
}

/// Walk upward from `start` to detect the working root.
///
/// Stops when a `warnorm.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `WarnormConfig` from `warnorm.toml` or `warnorm.yaml|yml` if present.
///
/// Returns `Err` with a readable message when a config file exists but cannot
/// be read or parsed; `Ok(None)` when there is no config file.
pub fn load_config(root: &Path) -> Result<Option<WarnormConfig>, String> {
    let toml_path = root.join("warnorm.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path)
            .map_err(|e| format!("cannot read {}: {}", toml_path.to_string_lossy(), e))?;
        let cfg: WarnormConfig = toml::from_str(&s)
            .map_err(|e| format!("{} is not valid TOML: {}", toml_path.to_string_lossy(), e))?;
        return Ok(Some(cfg));
    }
    for yml in ["warnorm.yaml", "warnorm.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p)
                .map_err(|e| format!("cannot read {}: {}", p.to_string_lossy(), e))?;
            let cfg: WarnormConfig = serde_yaml::from_str(&s)
                .map_err(|e| format!("{} is not valid YAML: {}", p.to_string_lossy(), e))?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_format: Option<&str>,
    cli_output: Option<&str>,
    cli_variables: BTreeMap<String, String>,
) -> Result<Effective, String> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let format = cli_format.map(|s| s.to_string()).or(cfg.format);

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    // CLI definitions win over [variables]
    let mut variables = cfg.variables;
    variables.extend(cli_variables);

    Ok(Effective {
        repo_root,
        config_found,
        format,
        output,
        variables,
        formats: cfg.formats,
    })
}

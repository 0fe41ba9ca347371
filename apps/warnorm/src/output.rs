//! Output rendering for parsed issues and the format list.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! the issues and a top-level summary.

use crate::formats::FormatRegistry;
use crate::models::{Issue, Issues, Priority};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print issues in the requested format.
pub fn print_issues(issues: &Issues, format: &str, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_issues_json(issues, format)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} cannot render JSON: {}", crate::utils::error_prefix(), e),
        },
        _ => {
            let color = use_colors(output);
            for issue in issues {
                println!("{}", render_issue(issue, color));
            }
            let s = issues.summary();
            let summary = format!(
                "— Summary — high={} normal={} low={} total={}",
                s.high, s.normal, s.low, s.total
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn render_issue(issue: &Issue, color: bool) -> String {
    let label = format!("⟦{}⟧", issue.priority().as_str().to_ascii_lowercase());
    let (icon, sev) = match (issue.priority(), color) {
        (Priority::High, true) => ("✖".red().to_string(), label.red().bold().to_string()),
        (Priority::Normal, true) => ("▲".yellow().to_string(), label.yellow().bold().to_string()),
        (Priority::Low, true) => ("◆".blue().to_string(), label.blue().bold().to_string()),
        (Priority::High, false) => ("✖".to_string(), label),
        (Priority::Normal, false) => ("▲".to_string(), label),
        (Priority::Low, false) => ("◆".to_string(), label),
    };
    let location = compose_location(issue);
    let location = if color {
        location.bold().to_string()
    } else {
        location
    };
    if issue.category().is_empty() {
        format!("{} {} {} — {}", icon, sev, location, issue.message())
    } else {
        format!(
            "{} {} {} ❲{}❳ — {}",
            icon,
            sev,
            location,
            issue.category(),
            issue.message()
        )
    }
}

/// `file:line:column`, omitting unknown parts.
pub fn compose_location(issue: &Issue) -> String {
    let mut out = if issue.file_name().is_empty() {
        "-".to_string()
    } else {
        issue.file_name().to_string()
    };
    if issue.line_start() > 0 {
        out.push_str(&format!(":{}", issue.line_start()));
        if issue.column_start() > 0 {
            out.push_str(&format!(":{}", issue.column_start()));
        }
    }
    out
}

/// Compose issues JSON object (pure) for testing/snapshot purposes.
pub fn compose_issues_json(issues: &Issues, format: &str) -> JsonVal {
    json!({
        "format": format,
        "issues": issues,
        "summary": issues.summary(),
    })
}

/// Print the available formats.
pub fn print_formats(registry: &FormatRegistry, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_formats_json(registry)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} cannot render JSON: {}", crate::utils::error_prefix(), e),
        },
        _ => {
            let color = use_colors(output);
            for parser in registry.iter() {
                if color {
                    println!("{:<14} {}", parser.id().bold(), parser.name());
                } else {
                    println!("{:<14} {}", parser.id(), parser.name());
                }
            }
        }
    }
}

/// Compose formats JSON array (pure) for testing/snapshot purposes.
pub fn compose_formats_json(registry: &FormatRegistry) -> JsonVal {
    let items: Vec<_> = registry
        .iter()
        .map(|p| json!({"id": p.id(), "name": p.name()}))
        .collect();
    json!({ "formats": items })
}

//! IBM xlC linker (`ld`) diagnostics.
//!
//! ```text
//! ld: 0711-317 ERROR: Undefined symbol: nofun()
//! ld: 0711-224 WARNING: Duplicate symbol: dupe
//! ld: 0706-012 The -9 flag is not recognized.
//! ```
//!
//! Linker messages have no source location; the file name is `-`.

use crate::models::{IssueBuilder, Priority};
use crate::parser::LinePatternParser;
use crate::severity::SeverityTable;
use regex::Captures;

pub const ID: &str = "xlc-linker";

const PATTERN: &str = r"^\s*ld:\s+(?P<category>\d{4}-\d{3})\s+(?:(?P<severity>SEVERE ERROR|ERROR|WARNING):\s*)?(?P<message>.+)$";

pub fn parser() -> LinePatternParser {
    LinePatternParser::builder(ID, "IBM xlC linker", PATTERN)
        .severities(
            SeverityTable::empty()
                .with("SEVERE ERROR", Priority::High)
                .with("ERROR", Priority::High)
                .with("WARNING", Priority::Normal),
        )
        .default_file_name("-")
        .refine(untagged_priority)
        .build()
        .expect("valid xlc-linker pattern")
}

/// Untagged messages are errors when they say so, informational otherwise.
fn untagged_priority(caps: &Captures<'_>, builder: &mut IssueBuilder) -> bool {
    if caps.name("severity").is_none() {
        let message = caps.name("message").map(|m| m.as_str()).unwrap_or_default();
        let priority = if message.trim_start().to_ascii_lowercase().starts_with("error") {
            Priority::High
        } else {
            Priority::Low
        };
        builder.set_priority(priority);
    }
    true
}

//! `go vet` diagnostics: `file.go:LINE[:COL]: message`.

use crate::parser::LinePatternParser;

pub const ID: &str = "go-vet";

const PATTERN: &str =
    r"^\s*(?:vet:\s+)?(?P<file>[^\s:]+\.go):(?P<line>\d+)(?::(?P<column>\d+))?:\s*(?P<message>.+)$";

pub fn parser() -> LinePatternParser {
    LinePatternParser::builder(ID, "Go Vet", PATTERN)
        .build()
        .expect("valid go-vet pattern")
}

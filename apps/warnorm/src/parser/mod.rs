//! Parser contract and the two extraction strategies.
//!
//! - `line`: regex matching over text records.
//! - `structured`: rule registry + result resolution over an XML tree.
//!
//! Every parser consumes the stream it is given; the stream is dropped when
//! `parse` returns, whether it succeeded, failed, or was canceled.

pub mod line;
pub mod structured;

pub use line::{LinePatternParser, LinePatternParserBuilder, Records, RefineFn};
pub use structured::{
    extract_location, occurrence_priority, Rule, RuleKind, RuleRegistry, RuleSchema,
    StructuredParser,
};

use crate::error::{ParsingCanceled, Result};
use crate::models::{IssueBuilder, Issues};
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Core trait that all report parsers implement
pub trait Parser: Send + Sync {
    /// Registry key, e.g. `xlc-linker`
    fn id(&self) -> &str;

    /// Human readable name
    fn name(&self) -> &str;

    /// Parse one complete tool report.
    ///
    /// `builder` is reused for every issue of this call and is reset before
    /// each one. On failure no issues are returned.
    fn parse<'a>(
        &self,
        reader: Box<dyn Read + 'a>,
        builder: &mut IssueBuilder,
        ctx: &ParseContext<'_>,
    ) -> Result<Issues>;
}

/// Shared cancellation flag, polled between top-level entries.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-call options: optional pre-processor and cancellation token.
#[derive(Default, Clone, Copy)]
pub struct ParseContext<'a> {
    pre_processor: Option<&'a (dyn Fn(&str) -> String + Sync)>,
    cancel: Option<&'a CancelToken>,
}

impl<'a> ParseContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pre_processor(mut self, f: &'a (dyn Fn(&str) -> String + Sync)) -> Self {
        self.pre_processor = Some(f);
        self
    }

    pub fn with_cancel(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Apply the pre-processor, or return the input unchanged.
    pub fn pre_process(&self, raw: &str) -> String {
        match self.pre_processor {
            Some(f) => f(raw),
            None => raw.to_string(),
        }
    }

    pub fn check_canceled(&self) -> std::result::Result<(), ParsingCanceled> {
        match self.cancel {
            Some(token) if token.is_canceled() => Err(ParsingCanceled),
            _ => Ok(()),
        }
    }
}

/// Parse an in-memory report with a fresh builder and default options.
pub fn parse_text(parser: &dyn Parser, text: &str) -> Result<Issues> {
    let mut builder = IssueBuilder::new();
    parser.parse(
        Box::new(text.as_bytes()),
        &mut builder,
        &ParseContext::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_canceled());
        token.cancel();
        assert!(other.is_canceled());
    }

    #[test]
    fn test_context_defaults() {
        let ctx = ParseContext::new();
        assert_eq!(ctx.pre_process("a ${X}"), "a ${X}");
        assert!(ctx.check_canceled().is_ok());
    }

    #[test]
    fn test_context_pre_processor_and_cancel() {
        let upper = |s: &str| s.to_uppercase();
        let token = CancelToken::new();
        let ctx = ParseContext::new()
            .with_pre_processor(&upper)
            .with_cancel(&token);
        assert_eq!(ctx.pre_process("abc"), "ABC");
        token.cancel();
        assert_eq!(ctx.check_canceled(), Err(ParsingCanceled));
    }
}

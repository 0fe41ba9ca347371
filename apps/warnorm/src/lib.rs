//! Warnorm core library.
//!
//! Normalizes the output of heterogeneous build and analysis tools into one
//! `Issue` record collected in an ordered `Issues` container.
//!
//! High-level modules:
//! - `models`: `Issue`, `IssueBuilder`, `Issues`, `Priority`.
//! - `parser`: the `Parser` contract, cancellation, and the line-pattern and
//!   structured (XML rule registry) extraction strategies.
//! - `severity`: keyword to priority classification.
//! - `formats`: built-in report formats and the format registry.
//! - `preprocess`: `${NAME}` substitution applied before matching.
//! - `config`: discovery and effective configuration resolution.
//! - `cli`, `output`, `utils`: command-line surface and printers.
pub mod cli;
pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod output;
pub mod parser;
pub mod preprocess;
pub mod severity;
pub mod utils;

pub use error::{ErrorKind, ParseError, ParsingCanceled, ParsingError};
pub use formats::FormatRegistry;
pub use models::{Issue, IssueBuilder, Issues, LineRange, Priority};
pub use parser::{parse_text, CancelToken, ParseContext, Parser};

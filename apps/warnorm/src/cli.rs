//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "warnorm",
    version,
    about = "Normalize compiler and analyzer output into one issue format",
    long_about = "Warnorm reads reports of build tools (compiler warnings, linker messages, static-analysis XML) and prints them as normalized issues.\n\nConfiguration precedence: CLI > warnorm.toml > defaults.",
    after_help = "Examples:\n  warnorm parse --format go-vet vet.log\n  go vet ./... 2>&1 | warnorm parse --format go-vet --output json\n  warnorm parse --format gendarme 'reports/*.xml'\n  warnorm formats",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current warnorm version.")]
    Version,
    /// Parse reports into normalized issues
    #[command(
        about = "Parse tool reports",
        long_about = "Parse one or more reports with the selected format. Inputs may be paths or glob patterns; without inputs the report is read from stdin. Exits 1 when a HIGH priority issue is found.",
        after_help = "Examples:\n  warnorm parse --format xlc-linker build.log\n  warnorm parse --format ant-javac --define WORKSPACE=/ws --output json build.log"
    )]
    Parse {
        #[arg(long, help = "Working root used to discover warnorm.toml (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, short = 'f', help = "Format id (see `warnorm formats`)")]
        format: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long = "define", short = 'D', value_name = "NAME=VALUE", help = "Substitute ${NAME} in the input before matching")]
        defines: Vec<String>,
        #[arg(help = "Report files or glob patterns (default: stdin)")]
        inputs: Vec<String>,
    },
    /// List available formats
    #[command(
        about = "List formats",
        long_about = "List built-in formats and custom formats declared in warnorm.toml."
    )]
    Formats {
        #[arg(long, help = "Working root used to discover warnorm.toml (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

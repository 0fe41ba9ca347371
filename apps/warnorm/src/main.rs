//! Warnorm CLI binary entry point.
//! Resolves configuration, selects a format and prints normalized issues.

use clap::Parser as _;
use rayon::prelude::*;
use std::fs::File;
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use warnorm::cli::{Cli, Commands};
use warnorm::config;
use warnorm::formats::FormatRegistry;
use warnorm::models::{IssueBuilder, Issues};
use warnorm::output;
use warnorm::parser::{ParseContext, Parser};
use warnorm::preprocess::{parse_defines, VariableExpander};
use warnorm::utils;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("WARNORM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", utils::error_prefix(), message);
    std::process::exit(2);
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Parse {
            repo_root,
            format,
            output,
            defines,
            inputs,
        } => {
            let cli_vars = parse_defines(&defines).unwrap_or_else(|e| fail(e));
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                format.as_deref(),
                output.as_deref(),
                cli_vars,
            )
            .unwrap_or_else(|e| fail(e));
            if !eff.config_found && eff.output != "json" && eff.format.is_none() {
                eprintln!(
                    "{} No warnorm.toml found; using defaults.",
                    utils::note_prefix()
                );
            }
            let registry = FormatRegistry::with_custom(&eff.formats).unwrap_or_else(|e| fail(e));
            let format_id = match eff.format.as_deref() {
                Some(f) => f,
                None => fail("Format is not configured. Pass --format or add warnorm.toml."),
            };
            let parser = match registry.get(format_id) {
                Some(p) => p,
                None => fail(format!(
                    "Unknown format '{}'. Known formats: {}",
                    format_id,
                    registry.ids().join(", ")
                )),
            };

            let expander = VariableExpander::new(eff.variables.clone());
            let pre = |raw: &str| expander.expand(raw);
            let mut ctx = ParseContext::new();
            if !expander.is_empty() {
                ctx = ctx.with_pre_processor(&pre);
            }

            let issues = if inputs.is_empty() {
                let mut builder = IssueBuilder::new();
                parser
                    .parse(Box::new(io::stdin().lock()), &mut builder, &ctx)
                    .unwrap_or_else(|e| fail(format!("<stdin>: {}", e)))
            } else {
                let paths = expand_inputs(&inputs).unwrap_or_else(|e| fail(e));
                if eff.output != "json" {
                    eprintln!(
                        "{} Parsing {} file(s) as {}",
                        utils::info_prefix(),
                        paths.len(),
                        parser.name()
                    );
                }
                parse_files(parser, &paths, &ctx).unwrap_or_else(|e| fail(e))
            };
            output::print_issues(&issues, format_id, &eff.output);
            if issues.summary().high > 0 {
                std::process::exit(1);
            }
        }
        Commands::Formats { repo_root, output } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                None,
                output.as_deref(),
                Default::default(),
            )
            .unwrap_or_else(|e| fail(e));
            let registry = FormatRegistry::with_custom(&eff.formats).unwrap_or_else(|e| fail(e));
            output::print_formats(&registry, &eff.output);
        }
    }
}

/// Expand glob patterns, keeping plain paths as given and input order stable.
fn expand_inputs(inputs: &[String]) -> Result<Vec<String>, String> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            paths.push(input.clone());
            continue;
        }
        let entries =
            glob::glob(input).map_err(|e| format!("bad glob pattern '{}': {}", input, e))?;
        let before = paths.len();
        for entry in entries.flatten() {
            paths.push(entry.to_string_lossy().to_string());
        }
        if paths.len() == before {
            return Err(format!("No files match '{}'", input));
        }
    }
    Ok(paths)
}

/// Parse every file with its own builder; results keep the order of `paths`.
fn parse_files(
    parser: &dyn Parser,
    paths: &[String],
    ctx: &ParseContext<'_>,
) -> Result<Issues, String> {
    let per_file: Vec<Result<Issues, String>> = paths
        .par_iter()
        .map(|path| {
            let file = File::open(path).map_err(|e| format!("{}: {}", path, e))?;
            let mut builder = IssueBuilder::new();
            parser
                .parse(Box::new(file), &mut builder, ctx)
                .map_err(|e| format!("{}: {}", path, e))
        })
        .collect();
    let mut all = Issues::new();
    for (path, result) in paths.iter().zip(per_file) {
        let issues = result?;
        debug!(path = %path, count = issues.len(), "parsed report file");
        all.append(issues);
    }
    Ok(all)
}

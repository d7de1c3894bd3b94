//! Generate `Codable` members for the records of a Rust source file.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use codable_synth::codegen::{expand_file, CodegenOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "codable-codegen")]
#[command(about = "Generate coding keys, decode and encode impls for Rust records", long_about = None)]
struct Cli {
    /// Rust source file to read
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the generated items here instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only generate for these types (default: every `#[derive(Codable)]`)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Report fields of unrecognized shape instead of skipping them
    #[arg(long = "strict")]
    strict: bool,

    /// Path of the runtime crate in the generated code
    #[arg(long = "crate-path", value_name = "PATH")]
    crate_path: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let options = CodegenOptions {
        types: cli.types,
        strict: cli.strict,
        crate_path: cli.crate_path,
    };
    let expansion = expand_file(&source, &options)
        .with_context(|| format!("failed to expand {}", cli.input.display()))?;

    for diagnostic in &expansion.diagnostics {
        let (line, column) = diagnostic.location();
        eprintln!(
            "{}: {}:{}:{}: {} [{}]",
            diagnostic.severity,
            cli.input.display(),
            line,
            column,
            diagnostic.message,
            diagnostic.kind.id()
        );
    }

    let generated = expansion.to_source();
    match &cli.output {
        Some(path) => {
            fs::write(path, &generated)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                output = %path.display(),
                records = expansion.generated.len(),
                "wrote generated members"
            );
        }
        None => print!("{}", generated),
    }

    if expansion.has_errors() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

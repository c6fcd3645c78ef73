use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use coal_asm::{assemble, AsmConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computer Organization Assembly Language. Turns COAL text into machine code."
)]
struct Opts {
    /// Input file path
    #[arg(short = 'i', value_name = "FILE")]
    input: PathBuf,
    /// Output file path (prints to console when absent)
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
    /// Debug mode, traces every pass to stderr
    #[arg(short = 'd')]
    debug: bool,
    /// Reject immediates and targets outside 0..=15 instead of wrapping
    #[arg(long)]
    strict: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let default_level = if opts.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(input = %opts.input.display(), output = ?opts.output, "starting assembly");

    let cfg = AsmConfig {
        strict_ranges: opts.strict,
        ..AsmConfig::default()
    };
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let program = assemble(&text, &cfg)?;

    if program.exceeds_capacity(&cfg) {
        eprintln!(
            "\n\x1b[91mWarning: Program contains {} instructions, which exceeds the {}-instruction limit of the target CPU.\x1b[0m\n",
            program.instruction_count(),
            cfg.imem_words
        );
    }

    let rendered = match opts.format {
        OutputFormat::Text => program.to_hex_line(),
        OutputFormat::Json => serde_json::to_string_pretty(&program.report(&cfg))?,
    };

    match &opts.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

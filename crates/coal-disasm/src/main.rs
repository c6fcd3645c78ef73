use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;

use coal_asm::AsmConfig;
use coal_disasm::listing::{build_listing, render_source};
use coal_disasm::load_hex_image;

#[derive(Parser, Debug)]
#[command(author, version, about = "COAL disassembler CLI", long_about = None)]
struct Cli {
    /// File holding the assembler's hex line
    #[arg(value_name = "HEXFILE")]
    input: PathBuf,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Name branch targets with generated labels
    #[arg(long)]
    labels: bool,
    /// Emit plain COAL source instead of an address listing (text format only)
    #[arg(long)]
    source: bool,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let img = load_hex_image(&cli.input)?;
    let lines = build_listing(&img, cli.labels || cli.source);

    let buf = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&lines)?,
        OutputFormat::Text if cli.source => render_source(&lines),
        OutputFormat::Text => {
            let mut buf = String::new();
            for l in &lines {
                if let Some(label) = &l.label {
                    writeln!(buf, "{label}:")?;
                }
                writeln!(buf, "  {:#04x}: {}  {}", l.addr, l.word, l.text)?;
            }
            let imem = AsmConfig::default().imem_words;
            if img.words.len() > imem {
                writeln!(buf, "# {} words exceed the {imem}-word instruction memory", img.words.len())?;
            }
            buf
        }
    };

    if let Some(path) = cli.out {
        std::fs::write(path, buf)?;
    } else {
        print!("{buf}");
    }
    Ok(())
}

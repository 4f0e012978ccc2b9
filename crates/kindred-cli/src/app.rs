//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use kindred_core::{parse_with_report, ParseReport};
use kindred_model::FamilyData;

/// Output format for parse results and diagnostics
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "kindred")]
#[command(author, version, about = "Plain-text family charts, parsed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a chart file and dump the family graph
    Parse {
        /// Input chart file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check a chart file and report parse diagnostics
    Check {
        /// Input chart file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Strict mode: exit with error code if any warnings found
        #[arg(long)]
        strict: bool,
    },

    /// Print summary statistics for a chart file
    Stats {
        /// Input chart file
        input: PathBuf,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            output,
            format,
        } => {
            parse_command(&input, output.as_deref(), format)?;
        }
        Commands::Check {
            input,
            format,
            strict,
        } => {
            check_command(&input, format, strict)?;
        }
        Commands::Stats { input } => {
            stats_command(&input)?;
        }
    }

    Ok(())
}

/// Execute the parse command
pub fn parse_command(input: &Path, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let (family, _) = load_chart(input)?;

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&family)
            .context("Failed to serialize family graph to JSON")?,
        OutputFormat::Text => render_summary(&family),
    };

    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Execute the check command
pub fn check_command(input: &Path, format: OutputFormat, strict: bool) -> Result<()> {
    let (_, report) = load_chart(input)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report.diagnostics())
                .context("Failed to serialize diagnostics to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if report.is_empty() {
                println!("✓ No issues found in {}", input.display());
            } else {
                for diag in report.iter() {
                    println!("{}", diag);
                }
                println!(
                    "Found {} note(s) and {} warning(s)",
                    report.len() - report.warning_count(),
                    report.warning_count()
                );
            }
        }
    }

    // Exit with error code in strict mode if anything was dropped or dangling
    if strict && report.has_warnings() {
        std::process::exit(1);
    }

    Ok(())
}

/// Execute the stats command
pub fn stats_command(input: &Path) -> Result<()> {
    let (family, report) = load_chart(input)?;

    let spouse_count: usize = family.iter().map(|p| p.spouses.len()).sum();
    let max_generation = family.iter().map(|p| p.generation).max().unwrap_or(0);

    println!("kindred v{}", kindred_core::VERSION);
    println!("Chart: {}", input.display());
    println!("  Persons: {}", family.len());
    println!("  Spouses: {}", spouse_count);
    println!("  Generations: {}", max_generation);
    match family.root() {
        Some(root) => println!("  Root: {} ({})", root.name, root.id),
        None => println!("  Root: none"),
    }
    if !report.is_empty() {
        println!("  Diagnostics: {} ({} warnings)", report.len(), report.warning_count());
    }

    Ok(())
}

/// Read and parse a chart file
fn load_chart(input: &Path) -> Result<(FamilyData, ParseReport)> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read chart: {}", input.display()))?;
    let parsed = parse_with_report(&text)
        .with_context(|| format!("Failed to parse chart: {}", input.display()))?;
    Ok(parsed)
}

/// Human-readable one-person-per-line graph dump
fn render_summary(family: &FamilyData) -> String {
    let mut out = String::new();

    match family.root() {
        Some(root) => out.push_str(&format!("Root: {} ({})\n", root.name, root.id)),
        None => out.push_str("Root: none\n"),
    }

    // Stable order for output
    let mut persons: Vec<_> = family.iter().collect();
    persons.sort_by(|a, b| a.id.cmp(&b.id));

    for person in persons {
        out.push_str(&format!(
            "({}) {} {} [{}]\n",
            person.generation, person.index_label, person.name, person.id
        ));
        for spouse in &person.spouses {
            out.push_str(&format!(
                "  & {} ({} children)\n",
                spouse.name,
                spouse.children.len()
            ));
        }
    }

    out
}

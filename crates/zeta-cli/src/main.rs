//! Zeta - stylesheet and script linker
//!
//! Usage:
//!   zeta styles/main.css          # Link one root file
//!   zeta static/                  # Link every root in a directory
//!   zeta -n -p min. static/       # Strip comments, name outputs min.<name>

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zeta_core::commands::{LinkCommand, LinkOptions, LinkOutcome};
use zeta_core::config::{ConfigOverrides, discover_config};

#[derive(Parser)]
#[command(name = "zeta")]
#[command(
    about = "Parse file or dir, import css, js code and save with prefix.",
    long_about = None
)]
struct Cli {
    /// Root file, or a directory whose css/js files are each linked
    path: PathBuf,

    /// Save result with prefix (default '_')
    #[arg(short, long)]
    prefix: Option<String>,

    /// Strip comments from linked content
    #[arg(short, long)]
    no_comments: bool,

    /// Directory backing zeta:// imports
    #[arg(short, long)]
    library: Option<PathBuf>,

    /// Config file (default: ./zeta.toml, then the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable summary
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zeta_core=info,zeta_cli=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let outcomes = run_link(&cli)?;
    match cli.format {
        OutputFormat::Table => print_table(&outcomes),
        OutputFormat::Json => print_json(&outcomes)?,
    }

    if outcomes.iter().any(|outcome| !outcome.is_ok()) {
        std::process::exit(1);
    }
    Ok(())
}

fn run_link(cli: &Cli) -> Result<Vec<LinkOutcome>> {
    let project_root = std::env::current_dir()?;
    let (config, config_dir) = discover_config(cli.config.as_deref(), &project_root)?;

    let overrides = ConfigOverrides {
        prefix: cli.prefix.clone(),
        no_comments: cli.no_comments,
        library_dir: cli.library.clone(),
    };
    let linker = config.into_options(overrides, config_dir.as_deref())?;
    tracing::debug!(
        prefix = %linker.prefix,
        strip_comments = linker.strip_comments,
        library = %linker.library_dir.display(),
        "Link options"
    );

    let options = LinkOptions::new(&cli.path).with_linker(linker);
    LinkCommand::new().execute(&options)
}

fn print_table(outcomes: &[LinkOutcome]) {
    if outcomes.is_empty() {
        println!("No files to link");
        return;
    }

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                println!(
                    "✓ {} -> {} ({} files)",
                    report.root.display(),
                    report.output.display(),
                    report.entries
                );
                for warning in &report.warnings {
                    println!("  ⚠ {}", warning);
                }
            }
            Err(err) => {
                println!("✗ {}: {}", outcome.root.display(), err);
            }
        }
    }
}

fn print_json(outcomes: &[LinkOutcome]) -> Result<()> {
    let output: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(report) => serde_json::json!({
                "root": report.root,
                "ok": true,
                "output": report.output,
                "entries": report.entries,
                "warnings": report.warnings,
            }),
            Err(err) => serde_json::json!({
                "root": outcome.root,
                "ok": false,
                "error": err.to_string(),
            }),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

//! AECV - ticket validation CLI
//!
//! The `aecv` command scores a ticket JSON file against the seven
//! validation criteria.
//!
//! ## Commands
//!
//! - `validate`: Run every validator and print a report
//! - `criteria`: Show effective weights and thresholds

use std::path::{Path, PathBuf};
use std::time::Duration;

use aecv_core::{
    render_report_md, render_report_text, Criterion, EngineConfig, Ticket, ValidationEngine,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};

/// Exit code for a ticket that did not pass under `--strict`.
const EXIT_NOT_PASSED: i32 = 2;

#[derive(Parser)]
#[command(name = "aecv")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Multi-criteria validation for ticket specifications", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a ticket stored as JSON
    Validate {
        /// Path to the ticket JSON file
        ticket: PathBuf,

        /// Engine configuration (TOML or JSON)
        #[arg(short, long, env = "AECV_CONFIG")]
        config: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Per-validator time bound, overriding the config file
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Exit non-zero when the ticket does not pass
        #[arg(long)]
        strict: bool,
    },

    /// List criteria with their effective weight and threshold
    Criteria {
        /// Engine configuration (TOML or JSON)
        #[arg(short, long, env = "AECV_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    aecv_core::init_tracing(cli.json_logs, level);

    match cli.command {
        Commands::Validate {
            ticket,
            config,
            format,
            timeout_ms,
            strict,
        } => {
            let passed = cmd_validate(&ticket, config.as_deref(), format, timeout_ms).await?;
            if strict && !passed {
                std::process::exit(EXIT_NOT_PASSED);
            }
            Ok(())
        }
        Commands::Criteria { config } => cmd_criteria(config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn load_ticket(path: &Path) -> Result<Ticket> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ticket {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse ticket {}", path.display()))
}

async fn cmd_validate(
    ticket_path: &Path,
    config_path: Option<&Path>,
    format: OutputFormat,
    timeout_ms: Option<u64>,
) -> Result<bool> {
    let config = load_config(config_path)?;
    let ticket = load_ticket(ticket_path)?;

    let mut builder = ValidationEngine::builder().with_config(config);
    if let Some(ms) = timeout_ms {
        builder = builder.with_timeout(Duration::from_millis(ms));
    }
    let engine = builder.build().context("Invalid engine configuration")?;

    info!(ticket = %ticket_path.display(), "validating ticket");
    let report = engine
        .validate_report(&ticket)
        .await
        .context("Validation failed")?;

    let rendered = match format {
        OutputFormat::Text => render_report_text(&report),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Markdown => render_report_md(&report),
    };
    println!("{rendered}");

    Ok(report.summary.passed)
}

fn criteria_table(config: &EngineConfig) -> String {
    let mut out = format!("overall pass threshold: {:.2}\n\n", config.pass_threshold);
    out.push_str(&format!("{:<18} {:>6} {:>9}\n", "criterion", "weight", "threshold"));
    for criterion in Criterion::ALL {
        let vc = config.validator_config(criterion);
        out.push_str(&format!(
            "{:<18} {:>6.2} {:>9.2}\n",
            criterion.as_str(),
            vc.weight(),
            vc.pass_threshold()
        ));
    }
    out
}

fn cmd_criteria(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", criteria_table(&config));
    Ok(())
}

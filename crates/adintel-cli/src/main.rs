mod commands;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adintel")]
#[command(about = "Competitor ad intelligence from ad-library exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify ads and print the full intelligence report as JSON
    Analyze {
        /// JSON array of ads; `-` reads stdin
        input: PathBuf,

        /// Competitor name shown in the report
        #[arg(long)]
        competitor: String,

        /// Industry for CPM benchmark lookup (overrides `ADINTEL_INDUSTRY`)
        #[arg(long)]
        industry: Option<String>,

        /// YAML rules file (overrides `ADINTEL_RULES_PATH`)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Reference time for ad-age calculations, RFC 3339
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Classify ads and print them annotated with category and confidence
    Categorize {
        /// JSON array of ads; `-` reads stdin
        input: PathBuf,

        /// YAML rules file (overrides `ADINTEL_RULES_PATH`)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Print per-ad scores and matched signals instead of annotated ads
        #[arg(long)]
        explain: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Before config loading: `--help` must not need a valid environment.
    let cli = Cli::parse();

    let mut config = adintel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Analyze {
            input,
            competitor,
            industry,
            rules,
            as_of,
            pretty,
        } => {
            if rules.is_some() {
                config.rules_path = rules;
            }
            let industry = industry.or_else(|| config.industry.clone());
            commands::run_analyze(
                &config,
                &input,
                &competitor,
                industry.as_deref(),
                as_of,
                pretty,
            )?;
        }
        Commands::Categorize {
            input,
            rules,
            explain,
            pretty,
        } => {
            if rules.is_some() {
                config.rules_path = rules;
            }
            commands::run_categorize(&config, &input, explain, pretty)?;
        }
    }

    Ok(())
}

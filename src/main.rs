//! Medical Risk Analyst - Main Entry Point
//!
//! Trains the risk model once, then serves dashboard views, one-shot
//! predictions or an interactive prediction session.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use medical_risk_analyst::config::{AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH};
use medical_risk_analyst::RiskClassifier;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;

/// Patient risk prediction on a synthetic training corpus
#[derive(Parser)]
#[command(name = "medical-risk-analyst")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Corpus summary and the first rows of the training data
    Dashboard,

    /// Predict the risk for one patient
    Predict {
        #[command(flatten)]
        input: commands::PatientArgs,

        /// Write latest_prediction.csv into this directory
        #[arg(short, long)]
        export_dir: Option<PathBuf>,
    },

    /// Start an interactive prediction session on stdin
    Session,

    /// Age histogram and BMI vs glucose points
    Graphs {
        /// Print the scatter points as JSON
        #[arg(long)]
        json: bool,
    },

    /// Feature importances of the trained model
    Explain,

    /// Preview an uploaded CSV file
    Preview {
        /// CSV file to preview
        file: PathBuf,
    },

    /// Print a random health tip
    Tip,
}

fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!("warn,medical_risk_analyst={level}"))
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let from_file = cli.config.exists();
    let config = AppConfig::load_or_default(&cli.config)?;
    init_logging(&config.logging, cli.verbose)?;
    info!(
        path = %cli.config.display(),
        from_file,
        "Configuration loaded"
    );

    let classifier = RiskClassifier::new(config);

    match cli.command {
        Commands::Dashboard => commands::views::dashboard(&classifier)?,
        Commands::Predict { input, export_dir } => {
            commands::predict::run(&classifier, &input, export_dir.as_deref())?
        }
        Commands::Session => {
            let stdin = std::io::stdin();
            commands::session::run(&classifier, stdin.lock(), std::io::stdout())?
        }
        Commands::Graphs { json } => commands::views::graphs(&classifier, json)?,
        Commands::Explain => commands::views::explain(&classifier)?,
        Commands::Preview { file } => commands::views::preview(&classifier, &file),
        Commands::Tip => commands::views::tip(),
    }

    Ok(())
}

//! Corpus Dump
//!
//! Writes the synthetic training corpus as CSV, e.g. to feed the upload
//! preview or inspect the data outside the tool.

use anyhow::{Context, Result};
use clap::Parser;
use medical_risk_analyst::export::corpus_to_table;
use medical_risk_analyst::SyntheticGenerator;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "corpus-dump")]
#[command(about = "Write the synthetic patient corpus as CSV")]
struct Args {
    /// Generator seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of rows
    #[arg(long, default_value_t = 300)]
    samples: usize,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medical_risk_analyst=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let corpus = SyntheticGenerator::new(args.seed, args.samples).generate();
    let table = corpus_to_table(corpus.rows())?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &table)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), rows = corpus.len(), "Corpus written");
        }
        None => print!("{table}"),
    }

    Ok(())
}

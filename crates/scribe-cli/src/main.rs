//! Scribe CLI - the presentation surface of the content writer.
//!
//! Thin wiring only: argument parsing, tracing setup, config load, and
//! dispatch into the application and infrastructure crates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scribe_application::ContentGenerator;
use scribe_core::config::AppConfig;
use scribe_core::content::{ContentKind, ContentRecord, GenerationRequest, HistoryRepository};
use scribe_infrastructure::{JsonHistoryRepository, export};
use scribe_interaction::{ChatCompletionsBackend, TavilySearchProvider};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Scribe - search-grounded multi-channel content generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate blog, LinkedIn, and X content for a subject
    Generate {
        /// Campaign the content belongs to
        #[arg(long)]
        campaign: String,
        /// Subject to research and write about
        #[arg(long)]
        subject: String,
        /// Audience the content targets
        #[arg(long)]
        audience: String,
    },
    /// List the stored content history
    List,
    /// Show one history entry in full
    Show { id: String },
    /// Delete one history entry
    Delete { id: String },
    /// Export the full history to an xlsx workbook
    Export {
        /// Directory the workbook is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Missing required keys are fatal here, before any command runs.
    let config = AppConfig::from_env()?;

    if let Err(err) = run(cli.command, &config).await {
        tracing::error!(error = %err, "command failed");
        return Err(err);
    }

    Ok(())
}

async fn run(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Generate {
            campaign,
            subject,
            audience,
        } => generate(config, campaign, subject, audience).await,
        Commands::List => list(config).await,
        Commands::Show { id } => show(config, &id).await,
        Commands::Delete { id } => delete(config, &id).await,
        Commands::Export { out_dir } => export_history(config, &out_dir).await,
    }
}

fn history_store(config: &AppConfig) -> JsonHistoryRepository {
    JsonHistoryRepository::new(config.history_path.clone())
}

async fn generate(
    config: &AppConfig,
    campaign: String,
    subject: String,
    audience: String,
) -> Result<()> {
    let generator = ContentGenerator::new(
        Arc::new(TavilySearchProvider::from_config(&config.search)),
        Arc::new(ChatCompletionsBackend::from_config(&config.llm)),
        Arc::new(history_store(config)),
    );

    let record = generator
        .generate(GenerationRequest::new(campaign, subject, audience))
        .await?;
    print_record(&record);
    Ok(())
}

async fn list(config: &AppConfig) -> Result<()> {
    let records = history_store(config).load().await?;
    if records.is_empty() {
        println!("history is empty");
        return Ok(());
    }
    for record in &records {
        println!(
            "{}  {}  {} ({})",
            record.id, record.timestamp, record.content_subject, record.campaign
        );
    }
    Ok(())
}

async fn show(config: &AppConfig, id: &str) -> Result<()> {
    let records = history_store(config).load().await?;
    match records.iter().find(|record| record.id == id) {
        Some(record) => print_record(record),
        None => println!("no history entry with id {id}"),
    }
    Ok(())
}

async fn delete(config: &AppConfig, id: &str) -> Result<()> {
    let remaining = history_store(config).remove(id).await?;
    println!("history now holds {} entries", remaining.len());
    Ok(())
}

async fn export_history(config: &AppConfig, out_dir: &Path) -> Result<()> {
    let records = history_store(config).load().await?;
    let (bytes, filename) = export::to_table(&records)?;
    let path = out_dir.join(filename);
    std::fs::write(&path, bytes)?;
    println!("exported {} entries to {}", records.len(), path.display());
    Ok(())
}

fn print_record(record: &ContentRecord) {
    println!("{} ({})", record.content_subject, record.timestamp);
    println!("campaign: {}", record.campaign);
    println!("audience: {}", record.target_audience);
    for kind in ContentKind::ALL {
        println!("\n== {kind} ==");
        println!("{}", record.content(kind));
    }
}

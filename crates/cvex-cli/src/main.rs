//! CLI application for resume detail extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, csv, process};

/// Resume extraction - pull structured candidate details out of resumes
#[derive(Parser)]
#[command(name = "cvex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// API key for the completion service (prompted for if omitted)
    #[arg(short = 'k', long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single resume (text file, PDF, or stdin)
    Process(process::ProcessArgs),

    /// Process multiple resume PDFs
    Batch(batch::BatchArgs),

    /// Process resume rows from a CSV dataset
    Csv(csv::CsvArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Process(args) => {
            process::run(args, cli.config.as_deref(), cli.api_key.as_deref()).await
        }
        Commands::Batch(args) => {
            batch::run(args, cli.config.as_deref(), cli.api_key.as_deref()).await
        }
        Commands::Csv(args) => csv::run(args, cli.config.as_deref(), cli.api_key.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}

//! Csv command - extract details from rows of a resume dataset.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use cvex_core::llm::OpenAiClient;
use cvex_core::models::config::CvexConfig;
use cvex_core::session::Session;

use super::{format_store, print_summary, resolve_api_key};

/// Arguments for the csv command.
#[derive(Args)]
pub struct CsvArgs {
    /// Input CSV file
    #[arg(required = true)]
    input: PathBuf,

    /// Number of rows to process
    #[arg(short, long, default_value = "5")]
    rows: usize,

    /// Column holding the resume text (default: from config)
    #[arg(long)]
    column: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: super::process::OutputFormat,
}

pub async fn run(
    args: CsvArgs,
    config_path: Option<&str>,
    api_key: Option<&str>,
) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        CvexConfig::from_file(std::path::Path::new(path))?
    } else {
        CvexConfig::default()
    };

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if args.rows == 0 {
        anyhow::bail!("Row count must be at least 1");
    }

    let rows = if args.rows > config.table.max_rows {
        println!(
            "{} Row count capped at the configured maximum of {}",
            style("ℹ").blue(),
            config.table.max_rows
        );
        config.table.max_rows
    } else {
        args.rows
    };

    let column = args
        .column
        .unwrap_or_else(|| config.table.text_column.clone());

    let api_key = resolve_api_key(api_key)?;
    let client = OpenAiClient::new(api_key, &config.llm)?;
    let mut session = Session::new(client);

    let file = fs::File::open(&args.input)?;

    // Set up progress bar
    let pb = ProgressBar::new(rows as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let result = session
        .process_table(file, &column, rows, |done, total, item| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
            pb.set_message(item.to_string());
        })
        .await;

    // A missing column is fatal before any row is attempted
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    pb.finish_with_message("Complete");

    // Print summary
    println!();
    println!(
        "{} Processed {} out of {} rows in {:?}",
        style("✓").green(),
        report.extracted,
        report.attempted,
        start.elapsed()
    );

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Skipped rows:").yellow());
        for failure in &report.failures {
            println!("  - {}: {}", failure.item, failure.reason);
        }
    }

    // Write outputs
    let output = format_store(session.store(), args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else if !session.store().is_empty() {
        println!();
        println!("{}", output);
    }

    print_summary(session.store());

    Ok(())
}

//! Batch processing command for multiple resume PDFs.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use cvex_core::llm::OpenAiClient;
use cvex_core::models::config::CvexConfig;
use cvex_core::session::{PdfInput, Session};

use super::{format_store, print_summary, resolve_api_key};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (e.g. "resumes/*.pdf")
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: super::process::OutputFormat,
}

pub async fn run(
    args: BatchArgs,
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

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} PDF files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Read the selected files up front; an unreadable file is skipped,
    // never fatal for the rest of the batch.
    let mut inputs = Vec::with_capacity(files.len());
    let mut unreadable = Vec::new();

    for (i, path) in files.iter().enumerate() {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("resume.pdf")
            .to_string();

        match fs::read(path) {
            Ok(data) => {
                println!(
                    "  {}. {} ({:.1} KB)",
                    i + 1,
                    path.display(),
                    data.len() as f64 / 1024.0
                );
                inputs.push(PdfInput { name, data });
            }
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                unreadable.push((name, e.to_string()));
            }
        }
    }

    let api_key = resolve_api_key(api_key)?;
    let client = OpenAiClient::new(api_key, &config.llm)?;
    let mut session = Session::new(client);

    // Set up progress bar
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let report = session
        .process_pdfs(&inputs, |done, _total, item| {
            pb.set_position(done as u64);
            pb.set_message(item.to_string());
        })
        .await;

    pb.finish_with_message("Complete");

    // Print summary
    println!();
    println!(
        "{} Processed {} out of {} PDFs in {:?}",
        style("✓").green(),
        report.extracted,
        report.attempted + unreadable.len(),
        start.elapsed()
    );

    if !unreadable.is_empty() || !report.failures.is_empty() {
        println!();
        println!("{}", style("Skipped files:").yellow());
        for (name, reason) in &unreadable {
            println!("  - {}: {}", name, reason);
        }
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

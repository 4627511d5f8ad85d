//! Process command - extract details from a single resume.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cvex_core::llm::OpenAiClient;
use cvex_core::models::config::CvexConfig;
use cvex_core::models::record::ResumeRecord;
use cvex_core::pdf::PdfTextExtractor;
use cvex_core::session::Session;

use super::{format_store, resolve_api_key};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text), or "-" to read text from stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show the resume text extracted from a PDF
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(
    args: ProcessArgs,
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

    // Check input file exists ("-" means stdin)
    let reads_stdin = args.input.as_os_str() == "-";
    if !reads_stdin && !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Processing input: {}", args.input.display());

    let api_key = resolve_api_key(api_key)?;
    let client = OpenAiClient::new(api_key, &config.llm)?;
    let mut session = Session::new(client);

    // Create progress bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    match extension.as_str() {
        "pdf" if !reads_stdin => process_pdf(&mut session, &args, &pb).await?,
        _ => process_text(&mut session, &args, reads_stdin, &pb).await?,
    };

    pb.finish_with_message("Done");

    // Format output
    let output = format_store(session.store(), args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

async fn process_pdf(
    session: &mut Session<OpenAiClient>,
    args: &ProcessArgs,
    pb: &ProgressBar,
) -> anyhow::Result<()> {
    pb.set_message("Reading PDF...");
    pb.set_position(10);

    let data = fs::read(&args.input)?;
    info!("PDF file size: {:.1} KB", data.len() as f64 / 1024.0);

    if args.show_text {
        let text = PdfTextExtractor::new().extract_text(&data)?;
        eprintln!("{}", style("Extracted text:").yellow());
        eprintln!("{}", text);
    }

    pb.set_message("Extracting resume details...");
    pb.set_position(40);

    let name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("resume.pdf");

    session.process_pdf(name, &data).await?;

    pb.set_position(100);

    Ok(())
}

async fn process_text(
    session: &mut Session<OpenAiClient>,
    args: &ProcessArgs,
    reads_stdin: bool,
    pb: &ProgressBar,
) -> anyhow::Result<()> {
    pb.set_message("Reading input...");
    pb.set_position(10);

    let text = if reads_stdin {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.input)?
    };

    if text.trim().is_empty() {
        anyhow::bail!("Input contains no resume text");
    }

    debug!("Read {} chars of resume text", text.len());

    pb.set_message("Extracting resume details...");
    pb.set_position(40);

    session.process_text(&text).await?;

    pb.set_position(100);

    Ok(())
}

/// Plain text rendering of a single record.
pub(crate) fn format_record_text(record: &ResumeRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name: {}\n", record.name));
    output.push_str(&format!("Email: {}\n", record.email));
    output.push_str(&format!("Experience: {} years\n", record.experience_years));

    output.push_str("Skills:\n");
    for skill in &record.skills {
        output.push_str(&format!("  - {}\n", skill));
    }

    if let Some(source) = &record.source_file {
        output.push_str(&format!("Source: {}\n", source));
    }

    output
}

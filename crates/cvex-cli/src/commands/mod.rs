//! Command implementations.

pub mod batch;
pub mod config;
pub mod csv;
pub mod process;

use console::style;

use cvex_core::store::ResultStore;

use process::OutputFormat;

/// Resolve the API key for this session.
///
/// The `--api-key` flag wins; otherwise the user is prompted on the
/// terminal with echo disabled. The key is never read from the
/// environment or written anywhere.
pub(crate) fn resolve_api_key(flag: Option<&str>) -> anyhow::Result<String> {
    let key = match flag {
        Some(key) => key.to_string(),
        None => {
            let term = console::Term::stderr();
            term.write_str("OpenAI API key: ")?;
            term.read_secure_line()?
        }
    };

    let key = key.trim().to_string();
    if key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    Ok(key)
}

/// Render the accumulated results in the requested format.
pub(crate) fn format_store(store: &ResultStore, format: OutputFormat) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Json => store.to_json()?,
        OutputFormat::Csv => store.to_csv()?,
        OutputFormat::Text => {
            let mut out = String::new();
            for (i, record) in store.records().iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&process::format_record_text(record));
            }
            out
        }
    };

    Ok(output)
}

/// Print the summary statistics block for a non-empty store.
pub(crate) fn print_summary(store: &ResultStore) {
    if let Some(summary) = store.summary() {
        println!();
        println!("{} Summary statistics", style("ℹ").blue());
        println!("  Total candidates: {}", summary.total);
        println!(
            "  Average experience: {:.1} years",
            summary.mean_experience_years
        );
        if let Some(skill) = &summary.top_skill {
            println!("  Most common skill: {}", skill);
        }
    }
}

//! Error types for the cvex-core library.

use thiserror::Error;

/// Main error type for the cvex library.
#[derive(Error, Debug)]
pub enum CvexError {
    /// PDF text acquisition error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Completion service error.
    #[error("extraction service error: {0}")]
    Llm(#[from] LlmError),

    /// Tabular input error.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// Export serialization error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF text acquisition.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// A strategy failed while extracting text.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// No strategy produced non-whitespace text.
    #[error("no extractable text in document")]
    NoText,
}

/// Errors related to the external completion service.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response carried no tool call to read arguments from.
    #[error("response contained no tool call")]
    MissingToolCall,

    /// The tool-call arguments did not deserialize as a record.
    #[error("malformed tool-call payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Errors related to tabular (CSV) ingestion.
#[derive(Error, Debug)]
pub enum TableError {
    /// The configured resume-text column is absent.
    #[error("column '{0}' was not found in the input")]
    MissingColumn(String),

    /// The input could not be read as a table.
    #[error("failed to read table: {0}")]
    Read(#[from] csv::Error),
}

/// Errors related to result export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer produced non-UTF-8 output.
    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the cvex library.
pub type Result<T> = std::result::Result<T, CvexError>;

//! Core library for resume detail extraction.
//!
//! This crate provides:
//! - PDF text acquisition with ordered fallback strategies
//! - Structured detail extraction via an LLM completion service
//! - Session contexts that accumulate results across operations
//! - Batch processing for PDF sets and tabular (CSV) inputs
//! - JSON/CSV export and summary statistics

pub mod error;
pub mod llm;
pub mod models;
pub mod pdf;
pub mod session;
pub mod store;

pub use error::{CvexError, ExportError, LlmError, PdfError, Result, TableError};
pub use llm::{DetailExtractor, OpenAiClient};
pub use models::config::{CvexConfig, LlmConfig, TableConfig};
pub use models::record::ResumeRecord;
pub use pdf::{PdfTextExtractor, TextStrategy};
pub use session::{BatchFailure, BatchReport, BatchStage, PdfInput, Session};
pub use store::{ResultStore, StoreSummary};

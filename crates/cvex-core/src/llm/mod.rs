//! Completion service client and the detail-extraction contract.

mod client;

pub use client::OpenAiClient;

use crate::error::LlmError;
use crate::models::record::ResumeRecord;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// A service that turns resume text into a structured record.
///
/// Callers guarantee the text is non-empty. An implementation makes at most
/// one external request per call; there is no retry.
#[allow(async_fn_in_trait)]
pub trait DetailExtractor {
    /// Extract applicant details from one unit of resume text.
    async fn extract_details(&self, text: &str) -> Result<ResumeRecord>;
}

//! PDF text acquisition module.

mod extractor;

pub use extractor::{LayoutText, PageText, PdfTextExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A single text-extraction strategy.
///
/// [`PdfTextExtractor`] tries strategies in order; the first one that yields
/// non-whitespace text wins. Each strategy reads the raw bytes from the
/// start, so falling back never depends on stream position.
pub trait TextStrategy {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Extract plain text from raw PDF bytes.
    fn extract(&self, data: &[u8]) -> Result<String>;
}

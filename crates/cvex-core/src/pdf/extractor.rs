//! PDF text extraction using pdf-extract and lopdf.

use lopdf::Document;
use tracing::{debug, warn};

use super::{Result, TextStrategy};
use crate::error::PdfError;

/// Layout-aware extraction over the whole document.
///
/// Produces the best transcription for resumes with columns, tables, or
/// unusual ordering, at the cost of being stricter about malformed files.
pub struct LayoutText;

impl TextStrategy for LayoutText {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn extract(&self, data: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }
}

/// Simple page-by-page extraction using lopdf.
///
/// More tolerant of structurally odd PDFs; page texts are concatenated with
/// a newline and pages that fail individually are skipped.
pub struct PageText;

impl TextStrategy for PageText {
    fn name(&self) -> &'static str {
        "page"
    }

    fn extract(&self, data: &[u8]) -> Result<String> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");
        }

        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        if pages.is_empty() {
            return Err(PdfError::NoPages);
        }

        let mut text = String::new();
        for page in pages {
            match doc.extract_text(&[page]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(e) => {
                    warn!("could not extract text from page {}: {}", page, e);
                }
            }
        }

        Ok(text)
    }
}

/// Multi-strategy PDF text extractor.
///
/// Strategies are attempted in order until one produces non-whitespace
/// output. Failures and empty results are reported and swallowed so a later
/// strategy still gets its chance; only exhausting the whole list is an
/// error.
pub struct PdfTextExtractor {
    strategies: Vec<Box<dyn TextStrategy>>,
}

impl PdfTextExtractor {
    /// Create an extractor with the default order: layout-aware extraction
    /// first, page-by-page extraction as the fallback.
    pub fn new() -> Self {
        Self {
            strategies: vec![Box::new(LayoutText), Box::new(PageText)],
        }
    }

    /// Create an extractor with a custom strategy list.
    pub fn with_strategies(strategies: Vec<Box<dyn TextStrategy>>) -> Self {
        Self { strategies }
    }

    /// Extract plain text from raw PDF bytes.
    ///
    /// Returns [`PdfError::NoText`] when no strategy yields non-whitespace
    /// output. Callers must treat that as an acquisition failure, never as a
    /// valid empty resume.
    pub fn extract_text(&self, data: &[u8]) -> Result<String> {
        for strategy in &self.strategies {
            match strategy.extract(data) {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(
                        "strategy '{}' extracted {} chars",
                        strategy.name(),
                        text.len()
                    );
                    return Ok(text);
                }
                Ok(_) => {
                    warn!("strategy '{}' produced no text", strategy.name());
                }
                Err(e) => {
                    warn!("strategy '{}' failed: {}", strategy.name(), e);
                }
            }
        }

        Err(PdfError::NoText)
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl TextStrategy for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn extract(&self, _data: &[u8]) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl TextStrategy for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn extract(&self, _data: &[u8]) -> Result<String> {
            Err(PdfError::Parse("broken document".to_string()))
        }
    }

    #[test]
    fn test_first_strategy_wins() {
        let extractor = PdfTextExtractor::with_strategies(vec![
            Box::new(Fixed("primary text")),
            Box::new(Fixed("fallback text")),
        ]);
        assert_eq!(extractor.extract_text(b"%PDF").unwrap(), "primary text");
    }

    #[test]
    fn test_whitespace_output_falls_through() {
        let extractor = PdfTextExtractor::with_strategies(vec![
            Box::new(Fixed("  \n\t  ")),
            Box::new(Fixed("fallback text")),
        ]);
        assert_eq!(extractor.extract_text(b"%PDF").unwrap(), "fallback text");
    }

    #[test]
    fn test_strategy_error_falls_through() {
        let extractor = PdfTextExtractor::with_strategies(vec![
            Box::new(Failing),
            Box::new(Fixed("fallback text")),
        ]);
        assert_eq!(extractor.extract_text(b"%PDF").unwrap(), "fallback text");
    }

    #[test]
    fn test_exhausted_strategies_is_no_text() {
        let extractor = PdfTextExtractor::with_strategies(vec![
            Box::new(Failing),
            Box::new(Fixed("   ")),
        ]);
        assert!(matches!(
            extractor.extract_text(b"%PDF"),
            Err(PdfError::NoText)
        ));
    }

    #[test]
    fn test_garbage_bytes_are_an_error() {
        let extractor = PdfTextExtractor::new();
        assert!(extractor.extract_text(b"not a pdf at all").is_err());
    }
}

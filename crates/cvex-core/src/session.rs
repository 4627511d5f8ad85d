//! Session context and batch orchestration.
//!
//! A [`Session`] owns everything one interactive session needs: the detail
//! extractor bound to its credential, the PDF text extractor, and the result
//! store. All orchestration goes through it; nothing else mutates the store.

use std::io;

use tracing::{debug, info, warn};

use crate::error::{Result, TableError};
use crate::llm::DetailExtractor;
use crate::models::record::ResumeRecord;
use crate::pdf::PdfTextExtractor;
use crate::store::ResultStore;

/// One document in a PDF batch.
#[derive(Debug, Clone)]
pub struct PdfInput {
    /// Display name, used for source tagging and diagnostics.
    pub name: String,

    /// Raw PDF bytes.
    pub data: Vec<u8>,
}

/// The stage at which a batch item was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStage {
    /// No usable text could be obtained from the item.
    Acquisition,

    /// The completion service failed or returned a malformed payload.
    Extraction,
}

/// A single skipped or failed batch item.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// The item's display name (file name or row label).
    pub item: String,

    /// Stage that rejected the item.
    pub stage: BatchStage,

    /// Human-readable reason.
    pub reason: String,
}

/// Outcome of a batch operation.
///
/// Successful records land in the session store in input order; failures are
/// simply absent there and listed here instead.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Items attempted (every input, exactly once).
    pub attempted: usize,

    /// Items that produced a record.
    pub extracted: usize,

    /// Items skipped or omitted, with the stage that rejected them.
    pub failures: Vec<BatchFailure>,
}

/// Session context: detail extractor, PDF extractor, and result store.
pub struct Session<E> {
    extractor: E,
    pdf: PdfTextExtractor,
    store: ResultStore,
}

impl<E: DetailExtractor> Session<E> {
    /// Create a session with the default PDF strategy order.
    pub fn new(extractor: E) -> Self {
        Self::with_pdf_extractor(extractor, PdfTextExtractor::new())
    }

    /// Create a session with a custom PDF extractor.
    pub fn with_pdf_extractor(extractor: E, pdf: PdfTextExtractor) -> Self {
        Self {
            extractor,
            pdf,
            store: ResultStore::new(),
        }
    }

    /// The accumulated results so far.
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Reset the session's results.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Extract details from raw resume text.
    ///
    /// The text must contain something non-whitespace; the record is
    /// appended to the store and returned (no source tag).
    pub async fn process_text(&mut self, text: &str) -> Result<ResumeRecord> {
        let record = self.extractor.extract_details(text).await?;
        self.store.push(record.clone());
        Ok(record)
    }

    /// Extract details from a single PDF.
    ///
    /// The record is tagged with `name` as its source, appended to the
    /// store, and returned.
    pub async fn process_pdf(&mut self, name: &str, data: &[u8]) -> Result<ResumeRecord> {
        let text = self.pdf.extract_text(data)?;
        debug!("extracted {} chars of text from {}", text.len(), name);

        let record = self.extractor.extract_details(&text).await?.with_source(name);
        self.store.push(record.clone());
        Ok(record)
    }

    /// Process a batch of PDFs, one at a time, in order.
    ///
    /// Per item: acquire text, skip on acquisition failure with a warning,
    /// call the service once, append on success (tagged with the item name)
    /// or omit on failure. `progress` is invoked after every attempt with
    /// the 1-indexed count, the total, and the item name. One bad document
    /// never aborts the rest.
    pub async fn process_pdfs(
        &mut self,
        inputs: &[PdfInput],
        mut progress: impl FnMut(usize, usize, &str),
    ) -> BatchReport {
        let total = inputs.len();
        let mut report = BatchReport::default();

        for (i, input) in inputs.iter().enumerate() {
            info!("processing PDF {} of {}: {}", i + 1, total, input.name);

            match self.pdf.extract_text(&input.data) {
                Ok(text) => match self.extractor.extract_details(&text).await {
                    Ok(record) => {
                        self.store.push(record.with_source(input.name.clone()));
                        report.extracted += 1;
                    }
                    Err(e) => {
                        warn!("extraction failed for {}: {}", input.name, e);
                        report.failures.push(BatchFailure {
                            item: input.name.clone(),
                            stage: BatchStage::Extraction,
                            reason: e.to_string(),
                        });
                    }
                },
                Err(e) => {
                    warn!("could not extract text from {}: {}", input.name, e);
                    report.failures.push(BatchFailure {
                        item: input.name.clone(),
                        stage: BatchStage::Acquisition,
                        reason: e.to_string(),
                    });
                }
            }

            report.attempted += 1;
            progress(i + 1, total, &input.name);
        }

        report
    }

    /// Process the first `rows` rows of a CSV input.
    ///
    /// The header must contain `column`; its absence is a fatal error
    /// reported before any row is attempted. Rows whose cell is empty or
    /// whitespace are skipped with a warning; service failures omit the row.
    /// Progress reporting matches [`Session::process_pdfs`].
    pub async fn process_table<R: io::Read>(
        &mut self,
        reader: R,
        column: &str,
        rows: usize,
        mut progress: impl FnMut(usize, usize, &str),
    ) -> Result<BatchReport> {
        let texts = read_text_column(reader, column)?;
        let take = rows.min(texts.len());
        info!("table has {} rows, processing {}", texts.len(), take);

        let mut report = BatchReport::default();

        for (i, text) in texts[..take].iter().enumerate() {
            let label = format!("row {}", i + 1);

            if text.trim().is_empty() {
                warn!("row {} has no resume text, skipping", i + 1);
                report.failures.push(BatchFailure {
                    item: label.clone(),
                    stage: BatchStage::Acquisition,
                    reason: "empty resume text".to_string(),
                });
            } else {
                match self.extractor.extract_details(text).await {
                    Ok(record) => {
                        self.store.push(record);
                        report.extracted += 1;
                    }
                    Err(e) => {
                        warn!("extraction failed for row {}: {}", i + 1, e);
                        report.failures.push(BatchFailure {
                            item: label.clone(),
                            stage: BatchStage::Extraction,
                            reason: e.to_string(),
                        });
                    }
                }
            }

            report.attempted += 1;
            progress(i + 1, take, &label);
        }

        Ok(report)
    }
}

/// Read every value of the named column, validating the header first.
fn read_text_column<R: io::Read>(reader: R, column: &str) -> Result<Vec<String>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers().map_err(TableError::Read)?;
    let idx = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| TableError::MissingColumn(column.to_string()))?;

    let mut texts = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(TableError::Read)?;
        texts.push(record.get(idx).unwrap_or("").to_string());
    }

    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CvexError, LlmError};
    use crate::llm;
    use crate::pdf::TextStrategy;
    use pretty_assertions::assert_eq;

    /// Echoes a fixed record regardless of input text.
    struct StubService(ResumeRecord);

    impl DetailExtractor for StubService {
        async fn extract_details(&self, _text: &str) -> llm::Result<ResumeRecord> {
            Ok(self.0.clone())
        }
    }

    /// Always fails, standing in for a broken service.
    struct BrokenService;

    impl DetailExtractor for BrokenService {
        async fn extract_details(&self, _text: &str) -> llm::Result<ResumeRecord> {
            Err(LlmError::MissingToolCall)
        }
    }

    /// Treats the input bytes as UTF-8 text, so tests can model documents
    /// with and without extractable text without real PDFs.
    struct BytesAsText;

    impl TextStrategy for BytesAsText {
        fn name(&self) -> &'static str {
            "bytes"
        }

        fn extract(&self, data: &[u8]) -> crate::pdf::Result<String> {
            Ok(String::from_utf8_lossy(data).into_owned())
        }
    }

    fn stub_record() -> ResumeRecord {
        ResumeRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            skills: vec!["Rust".to_string()],
            experience_years: 6.0,
            source_file: None,
        }
    }

    fn text_session(service: impl DetailExtractor) -> Session<impl DetailExtractor> {
        Session::with_pdf_extractor(
            service,
            PdfTextExtractor::with_strategies(vec![Box::new(BytesAsText)]),
        )
    }

    fn pdf(name: &str, content: &str) -> PdfInput {
        PdfInput {
            name: name.to_string(),
            data: content.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_process_text_appends_untagged_record() {
        let mut session = Session::new(StubService(stub_record()));

        let record = session.process_text("some resume text").await.unwrap();
        assert_eq!(record, stub_record());
        assert_eq!(record.source_file, None);
        assert_eq!(session.store().len(), 1);
    }

    #[tokio::test]
    async fn test_process_pdf_tags_source() {
        let mut session = text_session(StubService(stub_record()));

        let record = session
            .process_pdf("cv_001.pdf", b"resume body")
            .await
            .unwrap();
        assert_eq!(record.source_file.as_deref(), Some("cv_001.pdf"));
        assert_eq!(session.store().records()[0], record);
    }

    #[tokio::test]
    async fn test_pdf_batch_skips_unreadable_and_keeps_order() {
        let mut session = text_session(StubService(stub_record()));
        let inputs = vec![
            pdf("a.pdf", "text a"),
            pdf("b.pdf", "   "),
            pdf("c.pdf", "text c"),
            pdf("d.pdf", ""),
            pdf("e.pdf", "text e"),
        ];

        let mut calls = Vec::new();
        let report = session
            .process_pdfs(&inputs, |done, total, _item| calls.push((done, total)))
            .await;

        assert_eq!(report.attempted, 5);
        assert_eq!(report.extracted, 3);
        assert_eq!(report.failures.len(), 2);
        assert!(report
            .failures
            .iter()
            .all(|f| f.stage == BatchStage::Acquisition));

        // Only the readable documents produce records, in input order.
        let sources: Vec<&str> = session
            .store()
            .records()
            .iter()
            .map(|r| r.source_file.as_deref().unwrap())
            .collect();
        assert_eq!(sources, vec!["a.pdf", "c.pdf", "e.pdf"]);

        // Progress is 1-indexed and fires after every attempt.
        assert_eq!(calls, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    }

    #[tokio::test]
    async fn test_pdf_batch_omits_service_failures() {
        let mut session = text_session(BrokenService);
        let inputs = vec![pdf("a.pdf", "text a"), pdf("b.pdf", "text b")];

        let report = session.process_pdfs(&inputs, |_, _, _| {}).await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.extracted, 0);
        assert!(report
            .failures
            .iter()
            .all(|f| f.stage == BatchStage::Extraction));
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_table_processes_named_column() {
        let mut session = Session::new(StubService(stub_record()));
        let csv = "Category,Resume_str\nIT,first resume\nHR,second resume\nIT,third resume\n";

        let mut calls = Vec::new();
        let report = session
            .process_table(csv.as_bytes(), "Resume_str", 2, |done, total, _| {
                calls.push((done, total))
            })
            .await
            .unwrap();

        assert_eq!(report.attempted, 2);
        assert_eq!(report.extracted, 2);
        assert_eq!(session.store().len(), 2);
        assert_eq!(calls, vec![(1, 2), (2, 2)]);
        // Tabular records carry no source tag.
        assert!(session
            .store()
            .records()
            .iter()
            .all(|r| r.source_file.is_none()));
    }

    #[tokio::test]
    async fn test_table_missing_column_aborts_before_any_row() {
        let mut session = Session::new(StubService(stub_record()));
        let csv = "Category,Other\nIT,x\n";

        let mut calls = 0;
        let err = session
            .process_table(csv.as_bytes(), "Resume_str", 5, |_, _, _| calls += 1)
            .await
            .unwrap_err();

        match err {
            CvexError::Table(TableError::MissingColumn(column)) => {
                assert_eq!(column, "Resume_str");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(calls, 0);
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_table_skips_empty_cells() {
        let mut session = Session::new(StubService(stub_record()));
        let csv = "Resume_str\nfirst resume\n\nthird resume\n";

        let report = session
            .process_table(csv.as_bytes(), "Resume_str", 10, |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(report.attempted, 3);
        assert_eq!(report.extracted, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, BatchStage::Acquisition);
        assert_eq!(report.failures[0].item, "row 2");
    }

    #[tokio::test]
    async fn test_table_row_bound_caps_at_available() {
        let mut session = Session::new(StubService(stub_record()));
        let csv = "Resume_str\none\ntwo\n";

        let report = session
            .process_table(csv.as_bytes(), "Resume_str", 20, |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(report.attempted, 2);
    }

    #[tokio::test]
    async fn test_clear_resets_session_results() {
        let mut session = Session::new(StubService(stub_record()));
        session.process_text("text").await.unwrap();
        assert_eq!(session.store().len(), 1);

        session.clear();
        assert!(session.store().is_empty());

        session.process_text("text").await.unwrap();
        assert_eq!(session.store().len(), 1);
    }
}

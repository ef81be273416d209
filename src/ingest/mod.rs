//! Record-by-record ingestion into the command-memory store.
//!
//! Ingestion is best-effort: every record is attempted once, a failing record
//! is counted and reported but never stops the records after it. Only setup
//! problems (dataset missing, unreadable file) abort a run.

use std::path::Path;

use crate::domain::{DatasetRecord, IngestionOutcome, OutcomeKind};
use crate::error::{DatasetError, Result};
use crate::storage::DatasetReader;
use crate::store::{Store, StoreError};

/// Run-scoped tally of ingestion outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub success_count: usize,
    pub error_count: usize,
    pub skipped_count: usize,
    /// Every failed outcome, in file order
    pub failures: Vec<IngestionOutcome>,
}

impl IngestReport {
    /// Fold one outcome into the tally
    pub fn record(&mut self, outcome: &IngestionOutcome) {
        match outcome.kind {
            OutcomeKind::Saved => self.success_count += 1,
            OutcomeKind::Skipped => self.skipped_count += 1,
            _ => {
                self.error_count += 1;
                self.failures.push(outcome.clone());
            }
        }
    }

    pub fn total(&self) -> usize {
        self.success_count + self.error_count + self.skipped_count
    }
}

/// Drives a [`Store`] over every record of a dataset file
pub struct IngestionPipeline<S> {
    store: S,
}

impl<S: Store> IngestionPipeline<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Ingest one parsed record
    pub fn ingest_record(&mut self, line_number: usize, record: &DatasetRecord) -> IngestionOutcome {
        let description = record.instruction.trim();
        let content = record.output.trim();

        if description.is_empty() || content.is_empty() {
            log::info!("Line {}: skipping incomplete entry", line_number);
            return IngestionOutcome::new(line_number, description, OutcomeKind::Skipped);
        }

        let kind = match self.store.save(content, description) {
            Ok(ack) => {
                log::debug!("Line {}: saved ({})", line_number, ack.message);
                OutcomeKind::Saved
            }
            Err(StoreError::Rejected { code, stdout, stderr }) => {
                log::warn!("Line {}: failed to save '{}' (exit {:?}): {}", line_number, description, code, stderr);
                OutcomeKind::Rejected { code, stdout, stderr }
            }
            Err(e) => {
                log::error!("Line {}: unexpected error: {}", line_number, e);
                OutcomeKind::Error(e.to_string())
            }
        };
        IngestionOutcome::new(line_number, description, kind)
    }

    /// Ingest every line of the dataset at `path`.
    ///
    /// `on_outcome` sees each outcome as it happens so callers can report
    /// failures inline.
    pub fn run<F>(&mut self, path: impl AsRef<Path>, mut on_outcome: F) -> Result<IngestReport>
    where
        F: FnMut(&IngestionOutcome),
    {
        let reader = DatasetReader::open(path)?;
        log::info!("Ingesting {}", reader.path().display());

        let mut report = IngestReport::default();
        for item in reader.records()? {
            let outcome = match item {
                Ok(numbered) => self.ingest_record(numbered.line, &numbered.record),
                Err(DatasetError::MalformedLine { line, reason }) => {
                    log::warn!("Line {}: invalid JSON: {}", line, reason);
                    IngestionOutcome::new(line, "", OutcomeKind::Malformed(reason))
                }
                Err(e) => return Err(e),
            };
            report.record(&outcome);
            on_outcome(&outcome);
        }

        log::info!(
            "Ingestion finished: {} saved, {} errors, {} skipped",
            report.success_count,
            report.error_count,
            report.skipped_count
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn line(instruction: &str, output: &str) -> String {
        serde_json::to_string(&DatasetRecord::new(instruction, output)).unwrap()
    }

    fn write_lines(dir: &TempDir, lines: &[String]) -> std::path::PathBuf {
        let path = dir.path().join("data.jsonl");
        fs::write(&path, lines.join("\n") + "\n").unwrap();
        path
    }

    #[test]
    fn test_failure_does_not_stop_run() {
        let temp = TempDir::new().unwrap();
        let lines: Vec<String> = (1..=5).map(|i| line(&format!("record {}", i), "out")).collect();
        let path = write_lines(&temp, &lines);

        let mut pipeline = IngestionPipeline::new(MemoryStore::new().rejecting("record 3"));
        let report = pipeline.run(&path, |_| {}).unwrap();

        assert_eq!(report.success_count, 4);
        assert_eq!(report.error_count, 1);
        assert_eq!(pipeline.store().attempts(), 5);
        assert_eq!(pipeline.store().saved()[3].description, "record 5");
        assert_eq!(report.failures[0].line_number, 3);
    }

    #[test]
    fn test_malformed_line_counts_as_error() {
        let temp = TempDir::new().unwrap();
        let mut lines: Vec<String> = (0..10).map(|i| line(&format!("r{}", i), "o")).collect();
        lines.insert(4, "{\"instruction\": oops".to_string());
        let path = write_lines(&temp, &lines);

        let mut pipeline = IngestionPipeline::new(MemoryStore::new());
        let report = pipeline.run(&path, |_| {}).unwrap();

        assert_eq!(report.success_count, 10);
        assert_eq!(report.error_count, 1);
        assert!(matches!(report.failures[0].kind, OutcomeKind::Malformed(_)));
        assert_eq!(report.failures[0].line_number, 5);
    }

    #[test]
    fn test_incomplete_records_are_skipped() {
        let temp = TempDir::new().unwrap();
        let path = write_lines(&temp, &[line("", "out"), line("desc", "  "), line("desc", "out")]);

        let mut pipeline = IngestionPipeline::new(MemoryStore::new());
        let report = pipeline.run(&path, |_| {}).unwrap();

        assert_eq!(report.skipped_count, 2);
        assert_eq!(report.success_count, 1);
        assert_eq!(report.error_count, 0);
        assert_eq!(pipeline.store().attempts(), 1);
    }

    #[test]
    fn test_content_and_description_are_trimmed() {
        let mut pipeline = IngestionPipeline::new(MemoryStore::new());
        let outcome = pipeline.ingest_record(1, &DatasetRecord::new("  Bold it \n", "\n**b**\n"));

        assert!(outcome.succeeded());
        let saved = &pipeline.store().saved()[0];
        assert_eq!(saved.content, "**b**");
        assert_eq!(saved.description, "Bold it");
    }

    #[test]
    fn test_callback_sees_every_outcome() {
        let temp = TempDir::new().unwrap();
        let path = write_lines(&temp, &[line("a", "1"), "nope".to_string(), line("", "2")]);

        let mut seen = Vec::new();
        let mut pipeline = IngestionPipeline::new(MemoryStore::new());
        let report = pipeline.run(&path, |o| seen.push(o.line_number)).unwrap();

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_run() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.jsonl");
        let mut data = (line("a", "1") + "\n").into_bytes();
        data.extend_from_slice(b"{\"instruction\":\"\xff\xfe\",\"output\":\"2\"}\n");
        data.extend_from_slice((line("c", "3") + "\n").as_bytes());
        fs::write(&path, data).unwrap();

        let mut pipeline = IngestionPipeline::new(MemoryStore::new());
        let report = pipeline.run(&path, |_| {}).unwrap();

        assert_eq!(pipeline.store().attempts(), 2);
        assert_eq!(report.success_count, 2);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.failures[0].line_number, 2);
        assert!(matches!(report.failures[0].kind, OutcomeKind::Malformed(_)));
        assert_eq!(pipeline.store().saved()[1].description, "c");
    }

    #[test]
    fn test_missing_dataset_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mut pipeline = IngestionPipeline::new(MemoryStore::new());
        let err = pipeline.run(temp.path().join("missing.jsonl"), |_| {}).unwrap_err();

        assert!(matches!(err, DatasetError::DatasetNotFound(_)));
        assert_eq!(pipeline.store().attempts(), 0);
    }

    #[test]
    fn test_spawn_error_counted() {
        struct Broken;
        impl Store for Broken {
            fn save(&mut self, _: &str, _: &str) -> std::result::Result<crate::store::Ack, StoreError> {
                Err(StoreError::Spawn(std::io::Error::other("boom")))
            }
        }

        let mut pipeline = IngestionPipeline::new(Broken);
        let outcome = pipeline.ingest_record(7, &DatasetRecord::new("a", "b"));
        assert!(matches!(outcome.kind, OutcomeKind::Error(ref msg) if msg.contains("boom")));
    }
}

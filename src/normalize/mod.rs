//! Instruction normalization.
//!
//! Ensures every instruction mentions the domain keyword. Instructions that
//! already contain it (case-insensitive) are left byte-for-byte unchanged,
//! which makes a second pass over normalized output a no-op.

use std::borrow::Cow;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::domain::DatasetRecord;
use crate::error::{DatasetError, Result};
use crate::storage::{DatasetReader, write_records};

/// Appends "in <Domain>" to instructions that lack the keyword
#[derive(Debug, Clone)]
pub struct InstructionNormalizer {
    keyword: String,
    lowered: String,
}

impl InstructionNormalizer {
    pub fn new(keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        let lowered = keyword.to_lowercase();
        Self { keyword, lowered }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Rewrite a single instruction.
    ///
    /// Trailing `?` or `.` is kept after the suffix; any other ending gets
    /// the bare suffix appended.
    pub fn normalize<'a>(&self, instruction: &'a str) -> Cow<'a, str> {
        if instruction.to_lowercase().contains(&self.lowered) {
            return Cow::Borrowed(instruction);
        }

        let trimmed = instruction.trim();
        let rewritten = if let Some(stem) = trimmed.strip_suffix('?') {
            format!("{} in {}?", stem, self.keyword)
        } else if let Some(stem) = trimmed.strip_suffix('.') {
            format!("{} in {}.", stem, self.keyword)
        } else {
            format!("{} in {}", trimmed, self.keyword)
        };
        Cow::Owned(rewritten)
    }

    /// Normalize a record in place, returning whether it changed
    pub fn apply(&self, record: &mut DatasetRecord) -> bool {
        match self.normalize(&record.instruction) {
            Cow::Borrowed(_) => false,
            Cow::Owned(rewritten) => {
                record.instruction = rewritten;
                true
            }
        }
    }

    /// Normalize a dataset file in place.
    ///
    /// Records are written to a sibling temporary file which is renamed over
    /// `path` only after every record has been written. Malformed lines are
    /// reported in the returned summary and left out of the rewritten file.
    pub fn normalize_file(&self, path: impl AsRef<Path>) -> Result<NormalizeReport> {
        let reader = DatasetReader::open(&path)?;
        let mut report = NormalizeReport::default();
        let mut records = Vec::new();

        for item in reader.records()? {
            match item {
                Ok(numbered) => {
                    let mut record = numbered.record;
                    if self.apply(&mut record) {
                        report.updated += 1;
                    }
                    records.push(record);
                }
                Err(e) if e.is_recoverable() => {
                    log::warn!("Skipping invalid JSON line in {}: {}", reader.path().display(), e);
                    report.malformed.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        let temp_path = temp_path_for(reader.path());
        let written = write_records(File::create(&temp_path)?, &records);
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        fs::rename(&temp_path, reader.path())?;

        report.records = records.len();
        log::info!(
            "Normalized {}: {} of {} instructions updated",
            reader.path().display(),
            report.updated,
            report.records
        );
        Ok(report)
    }
}

/// The `<file>.tmp` path next to a dataset file
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Summary of a normalization pass
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// Records written back
    pub records: usize,
    /// Records whose instruction was rewritten
    pub updated: usize,
    /// Lines that could not be parsed and were dropped
    pub malformed: Vec<DatasetError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::write_dataset;
    use tempfile::TempDir;

    fn normalizer() -> InstructionNormalizer {
        InstructionNormalizer::new("Markdown")
    }

    #[test]
    fn test_question_keeps_question_mark() {
        assert_eq!(normalizer().normalize("How do I bold text?"), "How do I bold text in Markdown?");
    }

    #[test]
    fn test_period_keeps_period() {
        assert_eq!(normalizer().normalize("Make a table."), "Make a table in Markdown.");
    }

    #[test]
    fn test_other_ending_gets_bare_suffix() {
        assert_eq!(normalizer().normalize("Make a table"), "Make a table in Markdown");
        assert_eq!(normalizer().normalize("List items!"), "List items! in Markdown");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed_on_rewrite() {
        assert_eq!(normalizer().normalize("  Quote this?  "), "Quote this in Markdown?");
    }

    #[test]
    fn test_keyword_present_is_unchanged() {
        let input = "Explain markdown syntax for Lists.";
        assert!(matches!(normalizer().normalize(input), Cow::Borrowed(s) if s == input));
        assert!(matches!(normalizer().normalize("A MARKDOWN table"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_normalize_twice_is_noop() {
        let n = normalizer();
        for input in ["How?", "Do it.", "Do it", ""] {
            let once = n.normalize(input).into_owned();
            assert_eq!(n.normalize(&once), once);
        }
    }

    #[test]
    fn test_apply_reports_change() {
        let mut record = DatasetRecord::new("Add a rule", "---");
        assert!(normalizer().apply(&mut record));
        assert_eq!(record.instruction, "Add a rule in Markdown");
        assert!(!normalizer().apply(&mut record));
    }

    #[test]
    fn test_normalize_file_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.jsonl");
        write_dataset(
            &path,
            &[
                DatasetRecord::new("How do I bold text?", "**b**"),
                DatasetRecord::new("Explain Markdown lists.", "- a"),
                DatasetRecord::new("Insert an image", "![a](b)"),
            ],
        )
        .unwrap();

        let first = normalizer().normalize_file(&path).unwrap();
        assert_eq!(first.records, 3);
        assert_eq!(first.updated, 2);
        let once = fs::read(&path).unwrap();

        let second = normalizer().normalize_file(&path).unwrap();
        assert_eq!(second.updated, 0);
        assert_eq!(fs::read(&path).unwrap(), once);
    }

    #[test]
    fn test_normalize_file_skips_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.jsonl");
        fs::write(
            &path,
            "{\"instruction\":\"a?\",\"input\":\"\",\"output\":\"1\"}\n{broken\n{\"instruction\":\"b\",\"input\":\"\",\"output\":\"2\"}\n",
        )
        .unwrap();

        let report = normalizer().normalize_file(&path).unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(report.malformed.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_normalize_file_skips_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.jsonl");
        let mut data = b"{\"instruction\":\"a?\",\"input\":\"\",\"output\":\"1\"}\n".to_vec();
        data.extend_from_slice(b"{\"instruction\":\"\xff\",\"output\":\"2\"}\n");
        data.extend_from_slice(b"{\"instruction\":\"c\",\"input\":\"\",\"output\":\"3\"}\n");
        fs::write(&path, data).unwrap();

        let report = normalizer().normalize_file(&path).unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(report.updated, 2);
        assert_eq!(report.malformed.len(), 1);
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec![
            r#"{"instruction":"a in Markdown?","input":"","output":"1"}"#,
            r#"{"instruction":"c in Markdown","input":"","output":"3"}"#,
        ]);
    }

    #[test]
    fn test_normalize_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = normalizer().normalize_file(temp.path().join("none.jsonl")).unwrap_err();
        assert!(matches!(err, DatasetError::DatasetNotFound(_)));
    }

    #[test]
    fn test_temp_path_for() {
        assert_eq!(temp_path_for(Path::new("/a/data.jsonl")), PathBuf::from("/a/data.jsonl.tmp"));
    }
}

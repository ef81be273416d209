//! Read-only dataset audit.

use std::path::Path;

use crate::error::{DatasetError, Result};
use crate::storage::DatasetReader;

/// Problems found in a dataset file
#[derive(Debug, Default)]
pub struct AuditReport {
    pub records: usize,
    pub malformed: Vec<DatasetError>,
    /// Line numbers whose instruction lacks the domain keyword
    pub missing_keyword: Vec<usize>,
    /// Line numbers with an empty instruction or output
    pub incomplete: Vec<usize>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.missing_keyword.is_empty() && self.incomplete.is_empty()
    }
}

/// Scan a dataset without modifying it
pub fn check_dataset(path: impl AsRef<Path>, keyword: &str) -> Result<AuditReport> {
    let reader = DatasetReader::open(path)?;
    let mut report = AuditReport::default();

    for item in reader.records()? {
        match item {
            Ok(numbered) => {
                report.records += 1;
                if !numbered.record.is_complete() {
                    report.incomplete.push(numbered.line);
                }
                if !numbered.record.mentions(keyword) {
                    report.missing_keyword.push(numbered.line);
                }
            }
            Err(e) if e.is_recoverable() => report.malformed.push(e),
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

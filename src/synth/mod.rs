//! Record synthesis: turn manual examples and document sections into a dataset.
//!
//! Output order is fixed: manual examples, then two records per retained
//! section in document order, then one whole-document record.

mod examples;

use std::path::{Path, PathBuf};

use crate::domain::{DatasetRecord, Section};
use crate::error::Result;
use crate::extract::{SectionExtractor, read_document};
use crate::storage::{DatasetReader, write_dataset};

pub use examples::builtin_examples;

/// Builds dataset records framed around a domain keyword
#[derive(Debug, Clone)]
pub struct RecordSynthesizer {
    domain: String,
    manual: Vec<DatasetRecord>,
}

impl RecordSynthesizer {
    /// Create a synthesizer with no manual examples
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            manual: Vec::new(),
        }
    }

    /// Append hand-authored examples; they are emitted first, in order
    pub fn with_examples(mut self, examples: impl IntoIterator<Item = DatasetRecord>) -> Self {
        self.manual.extend(examples);
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The two records derived from one section, sharing the same output
    pub fn section_records(&self, section: &Section<'_>) -> [DatasetRecord; 2] {
        [
            DatasetRecord::new(
                format!("Explain {} syntax for {}.", self.domain, section.title),
                section.body,
            ),
            DatasetRecord::new(
                format!("Provide examples of {} in {}.", section.title, self.domain),
                section.body,
            ),
        ]
    }

    /// The record whose output is the complete document
    pub fn document_record(&self, document: &str) -> DatasetRecord {
        DatasetRecord::new(format!("Generate a comprehensive {} cheat sheet.", self.domain), document)
    }

    /// Assemble the full dataset for `document`
    pub fn synthesize<'d>(
        &self,
        document: &str,
        sections: impl IntoIterator<Item = Section<'d>>,
    ) -> Vec<DatasetRecord> {
        let mut records = self.manual.clone();
        for section in sections {
            records.extend(self.section_records(&section));
        }
        records.push(self.document_record(document));
        records
    }
}

/// Load extra manual examples from a dataset file, skipping bad lines
pub fn load_examples(path: impl AsRef<Path>) -> Result<Vec<DatasetRecord>> {
    let reader = DatasetReader::open(path)?;
    let mut examples = Vec::new();
    for item in reader.records()? {
        match item {
            Ok(numbered) => examples.push(numbered.record),
            Err(e) if e.is_recoverable() => {
                log::warn!("Skipping example in {}: {}", reader.path().display(), e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(examples)
}

/// Summary of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub manual_count: usize,
    pub section_count: usize,
    pub record_count: usize,
}

/// Extract, synthesize and write a dataset in one step.
///
/// The destination is overwritten directly, not swapped in atomically.
pub fn generate_dataset(
    document_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    extractor: &SectionExtractor,
    synthesizer: &RecordSynthesizer,
) -> Result<GenerateReport> {
    let document = read_document(&document_path)?;
    let sections: Vec<Section<'_>> = extractor.sections(&document).collect();
    let section_count = sections.len();
    log::info!(
        "Extracted {} sections from {}",
        section_count,
        document_path.as_ref().display()
    );

    let records = synthesizer.synthesize(&document, sections);
    let record_count = write_dataset(&output_path, &records)?;
    log::info!("Dataset written to {} ({} records)", output_path.as_ref().display(), record_count);

    Ok(GenerateReport {
        output: output_path.as_ref().to_path_buf(),
        manual_count: synthesizer.manual.len(),
        section_count,
        record_count,
    })
}

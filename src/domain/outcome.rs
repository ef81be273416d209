//! Per-record ingestion outcome types.

/// What happened to one dataset line during ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    /// The store accepted the record
    Saved,
    /// Instruction or output was empty, nothing was sent
    Skipped,
    /// The store process exited nonzero
    Rejected {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The line was not a valid record
    Malformed(String),
    /// Any other per-record failure (e.g. the process could not be spawned)
    Error(String),
}

/// Result of processing a single dataset line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionOutcome {
    /// 1-based line number in the dataset file
    pub line_number: usize,
    /// Record instruction, empty when the line did not parse
    pub description: String,
    pub kind: OutcomeKind,
}

impl IngestionOutcome {
    pub fn new(line_number: usize, description: impl Into<String>, kind: OutcomeKind) -> Self {
        Self {
            line_number,
            description: description.into(),
            kind,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.kind, OutcomeKind::Saved)
    }

    /// Failures count toward the error tally; skips count toward neither
    pub fn is_failure(&self) -> bool {
        matches!(
            self.kind,
            OutcomeKind::Rejected { .. } | OutcomeKind::Malformed(_) | OutcomeKind::Error(_)
        )
    }

    pub fn stdout(&self) -> Option<&str> {
        match &self.kind {
            OutcomeKind::Rejected { stdout, .. } => Some(stdout),
            _ => None,
        }
    }

    pub fn stderr(&self) -> Option<&str> {
        match &self.kind {
            OutcomeKind::Rejected { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

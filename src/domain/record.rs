//! Dataset record - one instruction/input/output triple.

use serde::{Deserialize, Serialize};

/// A single supervised fine-tuning example.
///
/// Field order is the serialized key order, so a record written by this
/// crate always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Task description
    pub instruction: String,
    /// Supplementary context, usually empty
    #[serde(default)]
    pub input: String,
    /// Expected response
    pub output: String,
}

impl DatasetRecord {
    /// Create a record with an empty input
    pub fn new(instruction: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            input: String::new(),
            output: output.into(),
        }
    }

    /// Set the input context
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    /// True when both instruction and output carry non-whitespace text
    pub fn is_complete(&self) -> bool {
        !self.instruction.trim().is_empty() && !self.output.trim().is_empty()
    }

    /// Case-insensitive check for the domain keyword in the instruction
    pub fn mentions(&self, keyword: &str) -> bool {
        self.instruction.to_lowercase().contains(&keyword.to_lowercase())
    }
}

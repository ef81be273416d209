//! Command-memory store boundary.
//!
//! Ingestion only needs one capability from the store: save a piece of
//! content under a description. [`CommandStore`] provides it by running the
//! store's executable; [`MemoryStore`] keeps saves in memory for dry runs
//! and tests.

mod process;

use thiserror::Error;

pub use process::{CommandStore, DEFAULT_PROGRAM, DEFAULT_SAVE_FLAG, resolve_executable, resolve_executable_in, search_path};

/// Acknowledgement returned by a successful save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    /// Whatever the store printed on success
    pub message: String,
}

/// Errors from a single save
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store process could not be started
    #[error("Failed to run store: {0}")]
    Spawn(#[from] std::io::Error),

    /// The store ran and reported failure
    #[error("Store exited with code {code:?}")]
    Rejected {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

/// Something that can persist content under a description
pub trait Store {
    /// Save `content` keyed by `description`
    fn save(&mut self, content: &str, description: &str) -> Result<Ack, StoreError>;
}

/// A saved entry held by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedEntry {
    pub content: String,
    pub description: String,
}

/// In-memory store; can be told to reject specific descriptions
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Vec<SavedEntry>,
    reject: Vec<String>,
    attempts: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any save whose description contains `needle`
    pub fn rejecting(mut self, needle: impl Into<String>) -> Self {
        self.reject.push(needle.into());
        self
    }

    pub fn saved(&self) -> &[SavedEntry] {
        &self.saved
    }

    /// Number of save calls, accepted or not
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl Store for MemoryStore {
    fn save(&mut self, content: &str, description: &str) -> Result<Ack, StoreError> {
        self.attempts += 1;
        if self.reject.iter().any(|needle| description.contains(needle.as_str())) {
            return Err(StoreError::Rejected {
                code: Some(1),
                stdout: String::new(),
                stderr: format!("rejected: {}", description),
            });
        }
        self.saved.push(SavedEntry {
            content: content.to_string(),
            description: description.to_string(),
        });
        Ok(Ack {
            message: format!("saved #{}", self.saved.len()),
        })
    }
}

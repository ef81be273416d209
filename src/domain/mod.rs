//! Domain types for mdtrain
//!
//! - DatasetRecord: one instruction/input/output training example
//! - Section: a heading plus body extracted from a reference document
//! - IngestionOutcome: per-line result of pushing a record into the store

pub mod outcome;
pub mod record;
pub mod section;

pub use outcome::{IngestionOutcome, OutcomeKind};
pub use record::DatasetRecord;
pub use section::Section;

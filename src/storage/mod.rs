//! Dataset persistence as line-delimited JSON.

mod jsonl;

pub use jsonl::{DatasetReader, NumberedRecord, Records, parse_line, write_dataset, write_records};

//! mdtrain - Markdown instruction dataset tooling
//!
//! Builds an instruction/input/output dataset from a heading-structured
//! reference document, normalizes its instructions around a domain keyword,
//! and ingests every record into an external command-memory store.

pub mod audit;
pub mod domain;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod normalize;
pub mod storage;
pub mod store;
pub mod synth;

pub use error::{DatasetError, Result};

//! CLI command definitions using clap.
//!
//! Subcommands mirror the dataset lifecycle:
//! - generate: extract sections and write a fresh dataset
//! - normalize: rewrite instructions around the domain keyword
//! - build: generate then normalize
//! - ingest: push every record into the command-memory store
//! - check: audit a dataset without changing it

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mdtrain - build, normalize and ingest Markdown instruction datasets
#[derive(Parser, Debug)]
#[command(name = "mdtrain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Options shared by commands that produce a dataset
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Reference document to extract sections from
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// Dataset file to write (overwritten)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a dataset from the reference document
    Generate(GenerateArgs),

    /// Ensure every instruction mentions the domain keyword
    Normalize {
        /// Dataset file to rewrite in place
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Domain keyword to require
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Generate and then normalize the dataset
    Build {
        #[command(flatten)]
        generate: GenerateArgs,

        /// Domain keyword to require
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Save every record into the command-memory store
    Ingest {
        /// Dataset file to read
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Explicit path to the store executable
        #[arg(short, long)]
        executable: Option<PathBuf>,

        /// Record saves in memory instead of running the store
        #[arg(long)]
        dry_run: bool,
    },

    /// Report malformed lines and records that break dataset rules
    Check {
        /// Dataset file to audit
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Domain keyword every instruction should mention
        #[arg(short, long)]
        keyword: Option<String>,
    },
}

//! CLI module for mdtrain - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;

//! Command-line interface for jotter.
//!
//! This module provides the CLI structure for the `jot` binary and the
//! interactive shell.

mod commands;
pub mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DeleteCommand, EditCommand, ListCommand, NewCommand, OutputFormat,
    ShowCommand, StatusCommand, SummarizeCommand, ThemeArg, ThemeCommand,
};

/// jot - Local notes with optional AI summaries
///
/// Notes are stored on this machine. Summaries are generated by the Gemini
/// API when an API key is available in the `API_KEY` environment variable.
#[derive(Debug, Parser)]
#[command(name = "jot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a note
    New(NewCommand),

    /// List notes, newest first
    List(ListCommand),

    /// Show a note
    Show(ShowCommand),

    /// Replace a note's content
    Edit(EditCommand),

    /// Delete a note
    Delete(DeleteCommand),

    /// Summarize a note with AI
    Summarize(SummarizeCommand),

    /// View or change the color theme
    #[command(subcommand)]
    Theme(ThemeCommand),

    /// Show storage and summarizer status
    Status(StatusCommand),

    /// Start an interactive session
    Shell,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

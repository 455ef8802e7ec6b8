//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Create command arguments.
#[derive(Debug, Args)]
pub struct NewCommand {
    /// Note content (defaults to a "# New Note" template)
    pub content: Vec<String>,

    /// Read the content from stdin
    #[arg(long, conflicts_with = "content")]
    pub stdin: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Note id, id prefix, or list position
    pub note: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Edit command arguments.
///
/// Without `--content` or `--file`, the new content is read from stdin.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Note id, id prefix, or list position
    pub note: String,

    /// Replace the content with this text
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,

    /// Replace the content with this file's contents
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Note id, id prefix, or list position
    pub note: String,
}

/// Summarize command arguments.
#[derive(Debug, Args)]
pub struct SummarizeCommand {
    /// Note id, id prefix, or list position
    pub note: String,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Theme commands.
#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Show the current theme
    Show,

    /// Switch between light and dark
    Toggle,

    /// Set the theme
    Set {
        /// Theme to use
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Theme argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
}

impl From<ThemeArg> for crate::theme::Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}
